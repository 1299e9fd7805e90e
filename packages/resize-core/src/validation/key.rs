use crate::constants::MAX_KEY_LENGTH;
use crate::errors::ResolveError;

/// ソースキーを URL デコードして検証する
///
/// パストラバーサル攻撃を防止し、不正な文字を検出する。
/// 空キーは KeyMissing になり、その他の不正は KeyInvalid になる
pub fn normalize_key(raw: &str) -> Result<String, ResolveError> {
    let decoded = urlencoding::decode(raw)
        .map_err(|_| ResolveError::KeyInvalid("invalid URL encoding".to_string()))?
        .into_owned();

    // 空文字チェック
    if decoded.is_empty() {
        return Err(ResolveError::KeyMissing);
    }

    // 長さチェック
    if decoded.len() > MAX_KEY_LENGTH {
        return Err(ResolveError::KeyInvalid(format!(
            "key is too long (max {MAX_KEY_LENGTH})"
        )));
    }

    // パストラバーサル防止
    if decoded.contains("..")
        || decoded.starts_with('/')
        || decoded.contains("//")
        || decoded.contains('\\')
    {
        return Err(ResolveError::KeyInvalid(
            "path traversal detected".to_string(),
        ));
    }

    // 許可された文字のみ（英数字、ハイフン、アンダースコア、ドット、スラッシュ）
    if !decoded
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '/')
    {
        return Err(ResolveError::KeyInvalid(
            "invalid characters in key".to_string(),
        ));
    }

    Ok(decoded)
}
