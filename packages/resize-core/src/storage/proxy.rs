use crate::errors::StorageError;
use crate::storage::store::{ObjectStore, PutOptions};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode, header};

/// S3 互換の Storage Proxy に HTTP リクエストを送信して
/// オブジェクトを取得・保存するクライアント
///
/// オブジェクトは {base_url}/{bucket}/{key} で公開されている
#[derive(Clone)]
pub struct StorageProxyClient {
    client: Client,
    base_url: String,
    access_client_id: String,
    access_client_secret: String,
}

impl StorageProxyClient {
    /// 新しい StorageProxyClient を作成する
    pub fn new(base_url: String, access_client_id: String, access_client_secret: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_client_id,
            access_client_secret,
        }
    }

    /// 環境変数から StorageProxyClient を作成する
    ///
    /// 必須の環境変数:
    /// - STORAGE_PROXY_URL
    /// - STORAGE_ACCESS_CLIENT_ID
    /// - STORAGE_ACCESS_CLIENT_SECRET
    pub fn from_env() -> Result<Self, String> {
        let base_url = std::env::var("STORAGE_PROXY_URL")
            .map_err(|_| "STORAGE_PROXY_URL is not set".to_string())?;
        let access_client_id = std::env::var("STORAGE_ACCESS_CLIENT_ID")
            .map_err(|_| "STORAGE_ACCESS_CLIENT_ID is not set".to_string())?;
        let access_client_secret = std::env::var("STORAGE_ACCESS_CLIENT_SECRET")
            .map_err(|_| "STORAGE_ACCESS_CLIENT_SECRET is not set".to_string())?;

        Ok(Self::new(base_url, access_client_id, access_client_secret))
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.base_url, bucket, key)
    }

    /// 失敗ステータスを StorageError へ対応付ける
    ///
    /// ストアが報告したコードは Upstream として保持し、
    /// レスポンス側でそのまま使えるようにする
    fn classify_status(status: StatusCode, key: &str) -> StorageError {
        match status {
            StatusCode::NOT_FOUND => StorageError::NotFound {
                key: key.to_string(),
            },
            StatusCode::FORBIDDEN => {
                tracing::error!(key = %key, "access denied by storage proxy");
                StorageError::Forbidden
            }
            status => {
                tracing::error!(key = %key, status = %status, "unexpected response from storage proxy");
                StorageError::Upstream {
                    status: status.as_u16(),
                    message: format!("unexpected status: {status}"),
                }
            }
        }
    }
}

#[async_trait]
impl ObjectStore for StorageProxyClient {
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        let url = self.object_url(bucket, key);

        let response = self
            .client
            .get(&url)
            .header("Access-Client-Id", &self.access_client_id)
            .header("Access-Client-Secret", &self.access_client_secret)
            .send()
            .await
            .map_err(|e| StorageError::Internal(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::classify_status(status, key));
        }

        response
            .bytes()
            .await
            .map_err(|e| StorageError::Internal(e.to_string()))
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        options: &PutOptions,
    ) -> Result<(), StorageError> {
        let url = self.object_url(bucket, key);

        let mut request = self
            .client
            .put(&url)
            .header("Access-Client-Id", &self.access_client_id)
            .header("Access-Client-Secret", &self.access_client_secret)
            .header(header::CONTENT_TYPE, options.content_type)
            .header(header::CACHE_CONTROL, options.cache_control)
            .body(body);

        if let Some(acl) = options.acl {
            request = request.header("x-amz-acl", acl.header_value());
        }

        let response = request
            .send()
            .await
            .map_err(|e| StorageError::Internal(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::classify_status(status, key));
        }

        Ok(())
    }
}
