use crate::constants::DEFAULT_WIDTHS;
use crate::errors::ResolveError;

/// 検証を通過したリサイズ幅
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetWidth {
    /// リサイズせず再エンコードのみ行う
    Auto,
    /// 許可リスト内のピクセル幅
    Pixels(u32),
}

impl TargetWidth {
    /// 派生キーに使うラベル
    pub fn label(&self) -> String {
        match self {
            TargetWidth::Auto => "auto".to_string(),
            TargetWidth::Pixels(w) => w.to_string(),
        }
    }
}

/// 許可されるリサイズ幅の閉じた集合
///
/// プロセス起動時に一度だけ構築され、以後は読み取り専用。
/// 無制限のリサイズ要求を防ぐための許可リスト
#[derive(Debug, Clone)]
pub struct SizeSpec {
    widths: Vec<u32>,
    allow_auto: bool,
}

impl SizeSpec {
    pub fn new(mut widths: Vec<u32>, allow_auto: bool) -> Self {
        widths.sort_unstable();
        widths.dedup();
        Self { widths, allow_auto }
    }

    pub fn widths(&self) -> &[u32] {
        &self.widths
    }

    /// 生のクエリ値を許可リストと照合する
    ///
    /// ゼロ・負数・数値以外・リスト外の値はすべて拒否。
    /// 幅が欠けている場合（高さのみ指定された場合）も拒否になる
    pub fn validate(&self, raw: Option<&str>) -> Result<TargetWidth, ResolveError> {
        let raw = raw.ok_or(ResolveError::SizeRejected)?;

        if raw == "AUTO" {
            return if self.allow_auto {
                Ok(TargetWidth::Auto)
            } else {
                Err(ResolveError::SizeRejected)
            };
        }

        match raw.parse::<u32>() {
            Ok(w) if w > 0 && self.widths.binary_search(&w).is_ok() => Ok(TargetWidth::Pixels(w)),
            _ => Err(ResolveError::SizeRejected),
        }
    }
}

impl Default for SizeSpec {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTHS.to_vec(), true)
    }
}
