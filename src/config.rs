//! 应用配置模块
//!
//! 负责从环境变量加载应用配置，包括：
//! - 服务器监听地址和端口
//! - Gemini API Key
//! - 各路由使用的模型标识

use anyhow::{Context, Result};
use serde::Serialize;

/// 所有路由的默认模型
const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// 默认监听端口
const DEFAULT_PORT: &str = "3000";

/// 请求的模态，决定使用哪个模型以及上游负载的构造方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Text,
    Image,
    Audio,
    Document,
}

impl Modality {
    /// 日志用的小写名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Image => "image",
            Modality::Audio => "audio",
            Modality::Document => "document",
        }
    }
}

/// 各路由的模型配置
///
/// 文档路由不发送二进制内容，复用文本模型
#[derive(Debug, Clone, Serialize)]
pub struct ModelConfig {
    pub text_model: String,
    pub image_model: String,
    pub audio_model: String,
}

impl ModelConfig {
    /// 根据模态选择模型标识
    pub fn model_for(&self, modality: Modality) -> &str {
        match modality {
            Modality::Text | Modality::Document => &self.text_model,
            Modality::Image => &self.image_model,
            Modality::Audio => &self.audio_model,
        }
    }
}

/// 应用配置
///
/// 包含服务器运行所需的所有配置项
#[derive(Debug, Clone)]
pub struct Config {
    /// 服务器监听地址（如 "0.0.0.0" 或 "127.0.0.1"）
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// Gemini API Key
    pub api_key: String,
    /// 各路由的模型配置
    pub models: ModelConfig,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// # 环境变量
    ///
    /// - `GEMRELAY_HOST`: 服务器监听地址（默认: "0.0.0.0"）
    /// - `GEMRELAY_PORT`: 服务器监听端口（默认: 3000）
    /// - `GEMINI_API_KEY`: Gemini API Key（**必需**）
    /// - `GEMRELAY_TEXT_MODEL` / `GEMRELAY_IMAGE_MODEL` / `GEMRELAY_AUDIO_MODEL`:
    ///   各路由的模型标识（默认: "gemini-1.5-flash-latest"）
    ///
    /// # 错误
    ///
    /// - 如果 `GEMINI_API_KEY` 未设置
    /// - 如果 `GEMRELAY_PORT` 不是有效的端口号
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("GEMRELAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("GEMRELAY_PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()
            .context("GEMRELAY_PORT must be a valid port number")?;

        let api_key = std::env::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY environment variable is required")?;

        let models = ModelConfig {
            text_model: env_or_default("GEMRELAY_TEXT_MODEL", DEFAULT_MODEL),
            image_model: env_or_default("GEMRELAY_IMAGE_MODEL", DEFAULT_MODEL),
            audio_model: env_or_default("GEMRELAY_AUDIO_MODEL", DEFAULT_MODEL),
        };

        Ok(Self {
            host,
            port,
            api_key,
            models,
        })
    }
}

fn env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
