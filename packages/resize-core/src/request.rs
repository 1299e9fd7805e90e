/// 受信リクエスト
///
/// パスとクエリから一度だけ構築され、以後変更されない。
/// width / height は受信したままの生文字列で保持し、解釈は検証側で行う。
/// height は受け付けるがリサイズにもキー導出にも使われない
#[derive(Debug, Clone)]
pub struct ImageRequest {
    /// URL エンコードされたままのソースキー
    pub source_key: String,
    pub width: Option<String>,
    pub height: Option<String>,
}

impl ImageRequest {
    pub fn new(
        source_key: impl Into<String>,
        width: Option<String>,
        height: Option<String>,
    ) -> Self {
        Self {
            source_key: source_key.into(),
            width,
            height,
        }
    }

    /// リサイズ指定のないキーのみのリクエストか
    ///
    /// 幅も高さもない場合だけパススルー（再エンコードのみ）になる
    pub fn wants_resize(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }
}
