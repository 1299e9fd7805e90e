use crate::constants::DEFAULT_QUALITY;

/// 出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    WebP,
}

impl OutputFormat {
    /// 文字列から OutputFormat を作成
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "jpeg" | "jpg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Content-Type を取得
    ///
    /// レスポンスと保存オブジェクトの Content-Type は常にここから取る
    /// （実際のコーデックと食い違うラベルを付けない）
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
        }
    }
}

/// エンコード設定
///
/// パイプライン全体で一つの出力コーデックと品質を共有する
#[derive(Debug, Clone)]
pub struct EncodeSettings {
    pub format: OutputFormat,
    pub quality: u8,
}

impl EncodeSettings {
    pub fn new(format: OutputFormat, quality: Option<u8>) -> Self {
        Self {
            format,
            quality: quality.unwrap_or(DEFAULT_QUALITY),
        }
    }
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self::new(OutputFormat::Jpeg, None)
    }
}
