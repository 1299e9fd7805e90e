/// 再エンコード時のデフォルト品質（1-100）
pub const DEFAULT_QUALITY: u8 = 95;

/// 許可されるリサイズ幅のデフォルト一覧（px、昇順）
pub const DEFAULT_WIDTHS: &[u32] = &[
    56, 128, 168, 264, 300, 360, 372, 400, 411, 500, 590, 616, 750, 828, 1242,
];

/// 派生バリアントのキーに付けるデフォルトプレフィックス
pub const DEFAULT_VARIANT_PREFIX: &str = "resized";

/// レスポンスに付与する Cache-Control
pub const RESPONSE_CACHE_CONTROL: &str = "public, max-age=31536000";

/// 派生バリアント保存時の Cache-Control
pub const VARIANT_CACHE_CONTROL: &str = "max-age=31536000";

/// オブジェクトキーの最大長
pub const MAX_KEY_LENGTH: usize = 1024;

/// 画像の最大ピクセル数（極端な攻撃のみ防止）
pub const MAX_PIXELS: u64 = 1_000_000_000;
