use crate::validation::TargetWidth;

/// 派生バリアントの保存キーを導出する
///
/// 純粋な決定的関数。同じ (ソースキー, 幅) は常に同じキーになり、
/// 幅が異なれば必ずキーも異なる。乱数やタイムスタンプを含まないため、
/// 前段のキャッシュ層は再起動をまたいで同一キーで配信できる
pub fn variant_key(prefix: &str, source_key: &str, width: &TargetWidth) -> String {
    format!(
        "{}/{}/{}",
        prefix.trim_end_matches('/'),
        width.label(),
        source_key
    )
}
