//! 上游生成服务抽象层
//!
//! 定义生成式 AI 后端的统一接口以及请求负载类型

pub mod gemini;

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

pub use gemini::{GeminiConfig, GeminiProvider};

/// 随请求上传的二进制附件（图片或音频）
#[derive(Debug, Clone)]
pub struct Attachment {
    /// 客户端声明的 MIME 类型
    pub mime_type: String,
    /// 原始文件内容，仅在单次请求内驻留内存
    pub data: Bytes,
}

/// 一次生成调用的完整输入
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// 模型标识（按路由选择）
    pub model: String,
    /// 提示词，已通过非空校验
    pub prompt: String,
    /// 可选的二进制附件，以 inline data 形式随提示词发送
    pub attachment: Option<Attachment>,
}

/// Generator Trait - 生成式 AI 后端的统一接口
///
/// 在服务启动时构造并注入到路由处理器中，便于测试时替换为 stub 实现
#[async_trait]
pub trait Generator: Send + Sync {
    /// 后端名称（用于日志和标识）
    fn name(&self) -> &str;

    /// 发起一次生成调用，返回生成的纯文本
    ///
    /// 任何上游失败（网络错误、非 2xx 状态、响应解析失败）都以
    /// `Err` 形式向上传播，不做重试，也不返回部分结果
    async fn generate(&self, request: GenerateRequest) -> Result<String>;
}
