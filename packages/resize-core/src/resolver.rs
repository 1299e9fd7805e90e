use bytes::Bytes;
use tracing::{info, warn};

use crate::constants::{DEFAULT_VARIANT_PREFIX, VARIANT_CACHE_CONTROL};
use crate::errors::ResolveError;
use crate::keys::variant_key;
use crate::request::ImageRequest;
use crate::response::ResponseEnvelope;
use crate::storage::{ObjectAcl, ObjectStore, PutOptions};
use crate::transform::{EncodeSettings, decode_image, encode_image, resize_to_width};
use crate::validation::{SizeSpec, TargetWidth, normalize_key};

/// 解決パイプラインの設定
///
/// 許可リスト・出力コーデック・キー戦略・ACL をまとめて注入する。
/// グローバル状態は持たず、すべてここから渡す
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// 保存先バケット。未設定でもプロセスは落とさず、
    /// 各リクエストに 404 を返す
    pub bucket: Option<String>,
    pub sizes: SizeSpec,
    pub encode: EncodeSettings,
    pub variant_prefix: String,
    pub acl: Option<ObjectAcl>,
}

impl ResolverConfig {
    /// 環境変数 BUCKET とデフォルト設定から構築する
    pub fn from_env() -> Self {
        Self {
            bucket: std::env::var("BUCKET").ok(),
            ..Self::default()
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            bucket: None,
            sizes: SizeSpec::default(),
            encode: EncodeSettings::default(),
            variant_prefix: DEFAULT_VARIANT_PREFIX.to_string(),
            acl: Some(ObjectAcl::PublicRead),
        }
    }
}

/// リクエストから派生アーティファクトへの解決を担う中心コンポーネント
///
/// fetch → decode → (resize) → encode → (store) → respond を
/// 一本のパイプラインとして実行する。リトライはどこにもない
pub struct Resolver<S> {
    store: S,
    config: ResolverConfig,
}

impl<S: ObjectStore> Resolver<S> {
    pub fn new(store: S, config: ResolverConfig) -> Self {
        Self { store, config }
    }

    /// リクエストを処理してレスポンスを返す
    ///
    /// 失敗もすべてここでレスポンスに変換され、
    /// 呼び出し側へエラーが伝播することはない
    pub async fn handle(&self, request: &ImageRequest) -> ResponseEnvelope {
        let response = match self.resolve(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(key = %request.source_key, error = %err, "request failed");
                ResponseEnvelope::from_error(&err)
            }
        };
        info!(key = %request.source_key, status = response.status_code, "response");
        response
    }

    async fn resolve(&self, request: &ImageRequest) -> Result<ResponseEnvelope, ResolveError> {
        let bucket = self
            .config
            .bucket
            .as_deref()
            .ok_or(ResolveError::MissingBucket)?;
        let key = normalize_key(&request.source_key)?;
        let content_type = self.config.encode.format.content_type();

        // パススルー: リサイズ指定がなければ再エンコードのみで応答し、
        // 派生バリアントは保存しない
        if !request.wants_resize() {
            info!(key = %key, "fetching source object");
            let source = self.store.get(bucket, &key).await?;
            let img = decode_image(&source)?;
            let encoded = encode_image(&img, &self.config.encode)?;
            return Ok(ResponseEnvelope::image(&encoded, content_type));
        }

        let width = self.config.sizes.validate(request.width.as_deref())?;

        info!(key = %key, width = %width.label(), "fetching source object");
        let source = self.store.get(bucket, &key).await?;
        let img = decode_image(&source)?;
        let img = match width {
            TargetWidth::Pixels(w) => resize_to_width(&img, w)?,
            // AUTO はリサイズせず再エンコードのみ
            TargetWidth::Auto => img,
        };
        let encoded = Bytes::from(encode_image(&img, &self.config.encode)?);

        let derived_key = variant_key(&self.config.variant_prefix, &key, &width);
        info!(key = %key, derived_key = %derived_key, "storing derived variant");
        let options = PutOptions {
            content_type,
            cache_control: VARIANT_CACHE_CONTROL,
            acl: self.config.acl,
        };
        self.store
            .put(bucket, &derived_key, encoded.clone(), &options)
            .await?;

        Ok(ResponseEnvelope::image(&encoded, content_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StorageError;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use image::DynamicImage;
    use std::io::Cursor;
    use std::sync::Arc;

    fn png_bytes(width: u32, height: u32) -> Bytes {
        let img = DynamicImage::new_rgb8(width, height);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        Bytes::from(buf.into_inner())
    }

    fn config() -> ResolverConfig {
        ResolverConfig {
            bucket: Some("media".to_string()),
            ..ResolverConfig::default()
        }
    }

    /// 64x48 のソース画像を photos/a.jpg に持つストアとリゾルバ
    fn resolver_with_source() -> (Arc<MemoryStore>, Resolver<Arc<MemoryStore>>) {
        let store = Arc::new(MemoryStore::new());
        store.insert("media", "photos/a.jpg", png_bytes(64, 48), "image/png");
        (store.clone(), Resolver::new(store, config()))
    }

    fn request(key: &str, width: Option<&str>, height: Option<&str>) -> ImageRequest {
        ImageRequest::new(key, width.map(str::to_string), height.map(str::to_string))
    }

    fn decoded_body(response: &ResponseEnvelope) -> Vec<u8> {
        assert!(response.is_base64_encoded);
        STANDARD.decode(&response.body).unwrap()
    }

    #[tokio::test]
    async fn test_passthrough_reencodes_without_storing() {
        let (store, resolver) = resolver_with_source();
        let response = resolver.handle(&request("photos/a.jpg", None, None)).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["Content-Type"], "image/jpeg");
        assert_eq!(
            response.headers["Cache-Control"],
            "public, max-age=31536000"
        );

        // JPEG に再エンコードされ、リサイズはされていない
        let body = decoded_body(&response);
        assert_eq!(&body[0..2], &[0xFF, 0xD8]);
        let img = image::load_from_memory(&body).unwrap();
        assert_eq!((img.width(), img.height()), (64, 48));

        // 派生バリアントは保存されない
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_allowed_width_stores_variant_under_derived_key() {
        let (store, resolver) = resolver_with_source();
        let response = resolver
            .handle(&request("photos/a.jpg", Some("128"), None))
            .await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["Content-Type"], "image/jpeg");

        let variant = store.object("media", "resized/128/photos/a.jpg").unwrap();
        assert_eq!(variant.content_type, "image/jpeg");
        assert_eq!(variant.cache_control, "max-age=31536000");
        assert_eq!(variant.acl, Some(ObjectAcl::PublicRead));

        // 幅 128 へ拡大され、高さは自動計算（アスペクト比維持）
        let img = image::load_from_memory(&variant.body).unwrap();
        assert_eq!((img.width(), img.height()), (128, 96));

        // レスポンス本文は保存されたバリアントと同じバイト列
        assert_eq!(decoded_body(&response), variant.body.to_vec());
    }

    #[tokio::test]
    async fn test_same_request_derives_same_key() {
        let (store, resolver) = resolver_with_source();
        resolver
            .handle(&request("photos/a.jpg", Some("128"), None))
            .await;
        resolver
            .handle(&request("photos/a.jpg", Some("128"), None))
            .await;

        // ソース + 1 バリアントのみ（同じキーに上書きされる）
        assert_eq!(store.len(), 2);
        assert!(store.object("media", "resized/128/photos/a.jpg").is_some());
    }

    #[tokio::test]
    async fn test_width_not_in_allow_list_is_forbidden() {
        let (store, resolver) = resolver_with_source();
        let response = resolver
            .handle(&request("photos/a.jpg", Some("130"), None))
            .await;

        assert_eq!(response.status_code, 403);
        assert_eq!(response.body, "Error: Invalid image size.");
        // 高さを足しても結果は変わらない
        let response = resolver
            .handle(&request("photos/a.jpg", Some("130"), Some("600")))
            .await;
        assert_eq!(response.status_code, 403);

        // 何も保存されない
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_width_values_are_forbidden() {
        let (_, resolver) = resolver_with_source();
        for width in ["abc", "0", "-128", ""] {
            let response = resolver
                .handle(&request("photos/a.jpg", Some(width), None))
                .await;
            assert_eq!(response.status_code, 403, "width={width:?}");
        }
    }

    #[tokio::test]
    async fn test_height_only_is_forbidden() {
        let (_, resolver) = resolver_with_source();
        let response = resolver
            .handle(&request("photos/a.jpg", None, Some("600")))
            .await;

        assert_eq!(response.status_code, 403);
        assert_eq!(response.body, "Error: Invalid image size.");
    }

    #[tokio::test]
    async fn test_auto_width_skips_resize_but_stores_variant() {
        let (store, resolver) = resolver_with_source();
        let response = resolver
            .handle(&request("photos/a.jpg", Some("AUTO"), None))
            .await;

        assert_eq!(response.status_code, 200);
        let variant = store.object("media", "resized/auto/photos/a.jpg").unwrap();
        let img = image::load_from_memory(&variant.body).unwrap();
        assert_eq!((img.width(), img.height()), (64, 48));
    }

    #[tokio::test]
    async fn test_empty_key_is_not_found() {
        let (_, resolver) = resolver_with_source();
        let response = resolver.handle(&request("", None, None)).await;

        assert_eq!(response.status_code, 404);
        assert_eq!(response.body, "Error: Image not found.");
    }

    #[tokio::test]
    async fn test_missing_bucket_is_not_found_regardless_of_request() {
        let store = Arc::new(MemoryStore::new());
        store.insert("media", "photos/a.jpg", png_bytes(64, 48), "image/png");
        let resolver = Resolver::new(store, ResolverConfig::default());

        let response = resolver.handle(&request("photos/a.jpg", None, None)).await;
        assert_eq!(response.status_code, 404);
        assert_eq!(response.body, "Error: Set environment variables BUCKET.");

        let response = resolver
            .handle(&request("photos/a.jpg", Some("128"), None))
            .await;
        assert_eq!(response.status_code, 404);
        assert_eq!(response.body, "Error: Set environment variables BUCKET.");
    }

    #[tokio::test]
    async fn test_unknown_key_is_not_found() {
        let (_, resolver) = resolver_with_source();
        let response = resolver.handle(&request("photos/missing.jpg", None, None)).await;

        assert_eq!(response.status_code, 404);
        assert!(response.body.contains("object not found"));
    }

    #[tokio::test]
    async fn test_undecodable_source_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        store.insert(
            "media",
            "broken.jpg",
            Bytes::from_static(b"not an image"),
            "image/jpeg",
        );
        let resolver = Resolver::new(store, config());

        let response = resolver.handle(&request("broken.jpg", None, None)).await;
        assert_eq!(response.status_code, 404);
        assert!(response.body.contains("decode failed"));
    }

    /// ストアが報告したステータスがレスポンスへ引き継がれることの確認用
    struct FailingStore {
        error: fn() -> StorageError,
    }

    #[async_trait]
    impl ObjectStore for FailingStore {
        async fn get(&self, _bucket: &str, _key: &str) -> Result<Bytes, StorageError> {
            Err((self.error)())
        }

        async fn put(
            &self,
            _bucket: &str,
            _key: &str,
            _body: Bytes,
            _options: &PutOptions,
        ) -> Result<(), StorageError> {
            Err((self.error)())
        }
    }

    #[tokio::test]
    async fn test_store_reported_status_is_preserved() {
        let store = FailingStore {
            error: || StorageError::Upstream {
                status: 503,
                message: "slow down".to_string(),
            },
        };
        let resolver = Resolver::new(store, config());

        let response = resolver.handle(&request("photos/a.jpg", None, None)).await;
        assert_eq!(response.status_code, 503);
    }

    #[tokio::test]
    async fn test_store_error_without_status_defaults_to_404() {
        let store = FailingStore {
            error: || StorageError::Internal("connection reset".to_string()),
        };
        let resolver = Resolver::new(store, config());

        let response = resolver.handle(&request("photos/a.jpg", None, None)).await;
        assert_eq!(response.status_code, 404);
        assert!(response.body.contains("connection reset"));
    }
}
