//! 生成端点处理器
//!
//! 四个路由共享同一个流程：校验 → 构造上游请求 → 调用 Generator →
//! 映射结果。文档路由不发送二进制内容，而是把文件按 UTF-8 解码后
//! 拼接进提示词。

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::config::Modality;
use crate::gateway::{handlers::ApiError, state::AppState};
use crate::providers::{Attachment, GenerateRequest};

const PROMPT_REQUIRED: &str = "Prompt is required";

/// 成功响应体
#[derive(Serialize)]
pub struct GenerateResponse {
    #[serde(rename = "generatedText")]
    pub generated_text: String,
}

/// POST /generate-text 请求体
#[derive(Deserialize)]
pub struct GenerateTextRequest {
    prompt: Option<String>,
}

/// POST /generate-text 处理器
pub async fn handle_generate_text(
    State(state): State<AppState>,
    Json(body): Json<GenerateTextRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let prompt = require_prompt(body.prompt)?;
    run_generation(&state, Modality::Text, prompt, None, "Failed to generate text").await
}

/// POST /generate-from-image 处理器
pub async fn handle_generate_from_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, ApiError> {
    let form = collect_upload(multipart, "image").await;
    let attachment = form
        .file
        .ok_or(ApiError::BadRequest("Image file is required"))?;
    let prompt = require_prompt(form.prompt)?;

    run_generation(
        &state,
        Modality::Image,
        prompt,
        Some(attachment),
        "Failed to generate from image",
    )
    .await
}

/// POST /generate-from-audio 处理器
pub async fn handle_generate_from_audio(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, ApiError> {
    let form = collect_upload(multipart, "audio").await;
    let attachment = form
        .file
        .ok_or(ApiError::BadRequest("Audio file is required"))?;
    let prompt = require_prompt(form.prompt)?;

    run_generation(
        &state,
        Modality::Audio,
        prompt,
        Some(attachment),
        "Failed to generate from audio",
    )
    .await
}

/// POST /generate-from-document 处理器
///
/// 文档内容按 UTF-8 解码后直接嵌入提示词，作为纯文本请求发送
pub async fn handle_generate_from_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, ApiError> {
    let form = collect_upload(multipart, "document").await;
    let attachment = form
        .file
        .ok_or(ApiError::BadRequest("Document file is required"))?;
    let prompt = require_prompt(form.prompt)?;

    let content = String::from_utf8_lossy(&attachment.data);
    let prompt = document_prompt(&content, &prompt);

    run_generation(
        &state,
        Modality::Document,
        prompt,
        None,
        "Failed to generate from document",
    )
    .await
}

/// 校验提示词：缺失或空字符串都视为未提供
fn require_prompt(prompt: Option<String>) -> Result<String, ApiError> {
    match prompt {
        Some(prompt) if !prompt.is_empty() => Ok(prompt),
        _ => Err(ApiError::BadRequest(PROMPT_REQUIRED)),
    }
}

/// 构造文档问答提示词
fn document_prompt(content: &str, question: &str) -> String {
    format!(
        "Based on the following document content: \n\n{}\n\nAnswer the following question: {}",
        content, question
    )
}

/// multipart 表单解析结果
#[derive(Default)]
struct UploadForm {
    prompt: Option<String>,
    file: Option<Attachment>,
}

/// 收集 multipart 表单中的提示词和指定名称的文件字段
///
/// 未声明 Content-Type 的文件按 application/octet-stream 处理，
/// 无法读取的字段跳过，由后续的存在性校验报错
async fn collect_upload(mut multipart: Multipart, file_field: &str) -> UploadForm {
    let mut form = UploadForm::default();

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("prompt") => {
                if let Ok(text) = field.text().await {
                    form.prompt = Some(text);
                }
            }
            Some(name) if name == file_field => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                if let Ok(data) = field.bytes().await {
                    form.file = Some(Attachment { mime_type, data });
                }
            }
            _ => {}
        }
    }

    form
}

/// 调用注入的 Generator 并映射结果
///
/// 成功返回 200 和生成的文本；失败记录原始错误并返回 500 和
/// 按路由固定的通用提示
async fn run_generation(
    state: &AppState,
    modality: Modality,
    prompt: String,
    attachment: Option<Attachment>,
    failure_message: &'static str,
) -> Result<Json<GenerateResponse>, ApiError> {
    let model = state.model_for(modality).to_string();

    tracing::info!(
        modality = modality.as_str(),
        model,
        prompt_len = prompt.len(),
        attachment_bytes = attachment.as_ref().map(|a| a.data.len()),
        "request"
    );

    let request = GenerateRequest {
        model,
        prompt,
        attachment,
    };

    let generated_text = state.generator().generate(request).await.map_err(|err| {
        tracing::error!(
            modality = modality.as_str(),
            "generation failed: {:#}",
            err
        );
        ApiError::Upstream(failure_message)
    })?;

    tracing::info!(
        modality = modality.as_str(),
        response_len = generated_text.len(),
        "response"
    );

    Ok(Json(GenerateResponse { generated_text }))
}
