use crate::errors::StorageError;
use crate::storage::store::{ObjectAcl, ObjectStore, PutOptions};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::RwLock;

/// 保存済みオブジェクトとその付帯情報
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: String,
    pub cache_control: String,
    pub acl: Option<ObjectAcl>,
}

/// メモリ上のオブジェクトストア
///
/// ローカル実行とテスト用。バケットとキーの組でオブジェクトを保持する
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<(String, String), StoredObject>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// オブジェクトを事前に配置する
    pub fn insert(&self, bucket: &str, key: &str, body: Bytes, content_type: &str) {
        let object = StoredObject {
            body,
            content_type: content_type.to_string(),
            cache_control: String::new(),
            acl: None,
        };
        self.objects
            .write()
            .expect("memory store lock poisoned")
            .insert((bucket.to_string(), key.to_string()), object);
    }

    /// 保存済みオブジェクトを取り出す（検証用）
    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .read()
            .expect("memory store lock poisoned")
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.objects
            .read()
            .expect("memory store lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        self.object(bucket, key)
            .map(|object| object.body)
            .ok_or_else(|| StorageError::NotFound {
                key: key.to_string(),
            })
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        options: &PutOptions,
    ) -> Result<(), StorageError> {
        let object = StoredObject {
            body,
            content_type: options.content_type.to_string(),
            cache_control: options.cache_control.to_string(),
            acl: options.acl,
        };
        self.objects
            .write()
            .expect("memory store lock poisoned")
            .insert((bucket.to_string(), key.to_string()), object);
        Ok(())
    }
}
