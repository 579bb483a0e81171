//! HTTP 请求处理器

pub mod generate;
pub mod health;

pub use generate::{
    handle_generate_from_audio, handle_generate_from_document, handle_generate_from_image,
    handle_generate_text,
};
pub use health::{handle_health, handle_index};

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// 统一的错误响应体
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

/// 处理器错误，只有两种：
///
/// - `BadRequest`: 请求校验失败，返回 400 和具体的缺失字段提示
/// - `Upstream`: 上游调用失败，返回 500 和固定的通用提示，
///   原始错误只记录在服务端日志，绝不透传给客户端
pub enum ApiError {
    BadRequest(&'static str),
    Upstream(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Upstream(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
