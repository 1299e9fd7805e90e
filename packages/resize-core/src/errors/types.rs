use thiserror::Error;

/// 解決パイプラインの統合エラー型
///
/// どのエラーもリトライされず、パイプライン境界でレスポンスに変換される
#[derive(Debug, Error)]
pub enum ResolveError {
    /// 保存先バケットが設定されていない
    #[error("destination bucket is not configured")]
    MissingBucket,

    /// ソースキーが空
    #[error("image key is missing")]
    KeyMissing,

    /// ソースキーが不正
    #[error("invalid image key: {0}")]
    KeyInvalid(String),

    /// 要求された幅が許可リストにない
    #[error("requested size is not allowed")]
    SizeRejected,

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("transform error: {0}")]
    Transform(#[from] TransformError),
}

impl ResolveError {
    /// 下層エラーが報告した HTTP ステータスコード（あれば）
    pub fn reported_status(&self) -> Option<u16> {
        match self {
            ResolveError::Storage(err) => err.reported_status(),
            _ => None,
        }
    }
}

/// ストレージアクセスエラー
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("access denied")]
    Forbidden,

    /// ストア側がステータスコード付きで失敗を報告した
    #[error("storage returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("storage error: {0}")]
    Internal(String),
}

impl StorageError {
    /// レスポンスのステータスに使うコード。報告がない場合は None
    pub fn reported_status(&self) -> Option<u16> {
        match self {
            StorageError::NotFound { .. } => Some(404),
            StorageError::Forbidden => Some(403),
            StorageError::Upstream { status, .. } => Some(*status),
            StorageError::Internal(_) => None,
        }
    }
}

/// 画像変換エラー
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("image resolution exceeds maximum ({width}x{height})")]
    ResolutionTooLarge { width: u32, height: u32 },

    #[error("processing failed: {0}")]
    ProcessingFailed(String),
}
