use crate::errors::StorageError;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

/// 派生オブジェクトの可視性（ACL）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectAcl {
    PublicRead,
    Private,
}

impl ObjectAcl {
    pub fn header_value(&self) -> &'static str {
        match self {
            ObjectAcl::PublicRead => "public-read",
            ObjectAcl::Private => "private",
        }
    }
}

/// オブジェクト保存時の付帯情報
#[derive(Debug, Clone)]
pub struct PutOptions {
    pub content_type: &'static str,
    pub cache_control: &'static str,
    pub acl: Option<ObjectAcl>,
}

/// オブジェクトストアへの最小インターフェース
///
/// このパイプラインが使うのは取得と書き込みのみ。
/// ソースオブジェクトは決して上書きせず、変換結果は常に別キーへ書く
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// バケットからキーを指定してオブジェクトを取得する
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError>;

    /// オブジェクトをバケットに書き込む
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        options: &PutOptions,
    ) -> Result<(), StorageError>;
}

#[async_trait]
impl<S: ObjectStore + ?Sized> ObjectStore for Arc<S> {
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        (**self).get(bucket, key).await
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        options: &PutOptions,
    ) -> Result<(), StorageError> {
        (**self).put(bucket, key, body, options).await
    }
}
