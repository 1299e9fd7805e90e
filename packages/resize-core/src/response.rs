use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use crate::constants::RESPONSE_CACHE_CONTROL;
use crate::errors::ResolveError;

/// トランスポート層へ返すレスポンス
///
/// statusCode / headers / body / isBase64Encoded のプロキシ形式で
/// 直列化される。リクエストごとに一度だけ構築され、以後変更されない。
/// バイナリの body は常に base64 でエンコードし、フラグを立てる
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ResponseEnvelope {
    /// エンコード済み画像を載せた成功レスポンス
    pub fn image(bytes: &[u8], content_type: &'static str) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), content_type.to_string());
        headers.insert(
            "Cache-Control".to_string(),
            RESPONSE_CACHE_CONTROL.to_string(),
        );

        Self {
            status_code: 200,
            headers,
            body: STANDARD.encode(bytes),
            is_base64_encoded: true,
        }
    }

    /// プレーンテキストのレスポンス
    pub fn text(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            headers: BTreeMap::new(),
            body: body.into(),
            is_base64_encoded: false,
        }
    }

    /// パイプラインの失敗をレスポンスへ変換する
    ///
    /// どの失敗も必ずここでレスポンスになり、呼び出し側へは伝播しない
    pub fn from_error(err: &ResolveError) -> Self {
        match err {
            ResolveError::MissingBucket => {
                Self::text(404, "Error: Set environment variables BUCKET.")
            }
            ResolveError::KeyMissing | ResolveError::KeyInvalid(_) => {
                Self::text(404, "Error: Image not found.")
            }
            ResolveError::SizeRejected => Self::text(403, "Error: Invalid image size."),
            ResolveError::Storage(_) | ResolveError::Transform(_) => {
                // ストアが報告したステータスを優先し、なければ 404
                let status = err.reported_status().unwrap_or(404);
                let body = serde_json::json!({ "error": err.to_string() }).to_string();
                Self::text(status, body)
            }
        }
    }
}
