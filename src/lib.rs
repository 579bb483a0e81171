//! Gemrelay - Gemini API 中继服务
//!
//! 一个轻量级的 HTTP 中继，把文本、图片、音频和文档请求转换成
//! Gemini `generateContent` 调用，并把生成的文本以 JSON 返回。
//!
//! # 功能特性
//!
//! - 纯文本生成（JSON 请求体）
//! - 图片 / 音频多模态生成（multipart 上传，inline data 透传）
//! - 文档问答（UTF-8 解码后拼接进提示词）
//! - 统一的错误到状态码映射（400 校验错误 / 500 上游错误）
//!
//! # 命令行接口
//!
//! - `serve`: 启动中继服务器
//! - `test`: 向本地服务器发送测试请求

pub mod commands;
pub mod config;
pub mod gateway;
pub mod providers;
pub mod utils;
