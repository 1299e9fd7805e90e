/// 幅のみ指定時の出力寸法を計算する
///
/// アスペクト比を維持し、高さは自動計算する。縮小だけでなく
/// 拡大も許可する。最小1pxを保証
pub fn width_driven_dimensions(src_w: u32, src_h: u32, target_w: u32) -> (u32, u32) {
    let scale = target_w as f64 / src_w as f64;
    let new_h = (src_h as f64 * scale).round() as u32;
    (target_w.max(1), new_h.max(1))
}
