//! Gemini Provider
//!
//! 调用 Google Generative Language API 的 `generateContent` 端点。
//! 文本部分直接透传，二进制附件以 base64 inline data 形式发送。

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::providers::{Attachment, GenerateRequest, Generator};
use crate::utils::should_disable_tls_verify;

/// Gemini API 基础地址
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// API 请求超时（秒）
const API_TIMEOUT_SECS: u64 = 120;

/// 共享的 API 客户端
static API_CLIENT: OnceLock<Client> = OnceLock::new();

fn get_api_client() -> &'static Client {
    API_CLIENT.get_or_init(|| {
        let mut builder = Client::builder()
            .timeout(std::time::Duration::from_secs(API_TIMEOUT_SECS))
            .pool_max_idle_per_host(10);

        if should_disable_tls_verify() {
            tracing::warn!("TLS certificate verification is DISABLED - for debugging only!");
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder.build().expect("Failed to create Gemini API client")
    })
}

/// Gemini Provider 配置
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    /// API 基础地址，测试时可指向 mock 服务器
    pub base_url: String,
}

impl GeminiConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: GEMINI_API_BASE.to_string(),
        }
    }
}

pub struct GeminiProvider {
    config: GeminiConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Self {
        Self { config }
    }

    /// 构造 generateContent 请求地址，API Key 作为 query 参数
    fn request_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url,
            model,
            urlencoding::encode(&self.config.api_key)
        )
    }
}

/// 构造请求体：文本 part 在前，inline data part 在后
fn build_request_body(prompt: &str, attachment: Option<&Attachment>) -> GenerateContentRequest {
    let mut parts = vec![Part::Text {
        text: prompt.to_string(),
    }];

    if let Some(attachment) = attachment {
        parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: attachment.mime_type.clone(),
                data: BASE64.encode(&attachment.data),
            },
        });
    }

    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
    }
}

/// 从响应中提取生成的文本
///
/// 取第一个 candidate，按顺序拼接其所有文本 part。
/// 没有 candidate 视为上游错误。
fn extract_text(response: &GenerateContentResponse) -> Result<String> {
    let candidate = response
        .candidates
        .first()
        .context("Gemini response contains no candidates")?;

    let text: String = candidate
        .content
        .parts
        .iter()
        .filter_map(|part| match part {
            Part::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect();

    Ok(text)
}

#[async_trait]
impl Generator for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        let url = self.request_url(&request.model);
        let body = build_request_body(&request.prompt, request.attachment.as_ref());

        let response = get_api_client()
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error {}: {}", status, error_body);
        }

        let response_body: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        extract_text(&response_body)
    }
}

// Gemini API 请求/响应类型

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
