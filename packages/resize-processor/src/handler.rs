use axum::extract::{Path, Query, State};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

use crate::AppState;
use resize_core::{ImageRequest, ResponseEnvelope};

/// 幅と高さは生文字列のまま受け取り、解釈はコア側の検証に任せる
#[derive(Debug, Deserialize)]
pub struct ResizeQuery {
    pub width: Option<String>,
    pub height: Option<String>,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// 画像リクエストを解決して HTTP レスポンスとして返す
pub async fn resolve_image(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<ResizeQuery>,
) -> Response {
    let request = ImageRequest::new(key, query.width, query.height);
    let envelope = state.resolver.handle(&request).await;
    into_http(envelope)
}

/// ResponseEnvelope を HTTP レスポンスへ変換する
///
/// base64 フラグが立っている body はバイナリへ戻す
fn into_http(envelope: ResponseEnvelope) -> Response {
    let status =
        StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body: Vec<u8> = if envelope.is_base64_encoded {
        match STANDARD.decode(&envelope.body) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::error!(%err, "invalid base64 in response body");
                return (StatusCode::INTERNAL_SERVER_ERROR, "invalid response body")
                    .into_response();
            }
        }
    } else {
        envelope.body.into_bytes()
    };

    let mut response = (status, body).into_response();
    for (name, value) in &envelope.headers {
        let Ok(name) = name.parse::<HeaderName>() else {
            continue;
        };
        let Ok(value) = HeaderValue::from_str(value) else {
            continue;
        };
        response.headers_mut().insert(name, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_http_decodes_base64_body() {
        let envelope = ResponseEnvelope::image(&[0xFF, 0xD8, 0xFF], "image/jpeg");
        let response = into_http(envelope);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "image/jpeg");
        assert_eq!(
            response.headers()["cache-control"],
            "public, max-age=31536000"
        );
    }

    #[test]
    fn test_into_http_plain_text_body() {
        let envelope = ResponseEnvelope::text(403, "Error: Invalid image size.");
        let response = into_http(envelope);

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
