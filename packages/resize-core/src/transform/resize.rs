use crate::constants::MAX_PIXELS;
use crate::errors::TransformError;
use crate::transform::dimensions::width_driven_dimensions;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::DynamicImage;

/// 画像を指定幅にリサイズする
///
/// 高さはアスペクト比維持で自動計算する。fast_image_resize の
/// Lanczos3 フィルタで畳み込みリサイズを行う
pub fn resize_to_width(img: &DynamicImage, target_w: u32) -> Result<DynamicImage, TransformError> {
    // RGB8 に変換
    let rgb = img.to_rgb8();
    let (src_w, src_h) = (rgb.width(), rgb.height());
    let (dst_w, dst_h) = width_driven_dimensions(src_w, src_h, target_w);

    // ピクセル数チェック
    if dst_w as u64 * dst_h as u64 > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge {
            width: dst_w,
            height: dst_h,
        });
    }

    if dst_w == src_w && dst_h == src_h {
        return Ok(DynamicImage::ImageRgb8(rgb));
    }

    let src_image = Image::from_vec_u8(src_w, src_h, rgb.into_raw(), PixelType::U8x3)
        .map_err(|e| {
            TransformError::ProcessingFailed(format!("failed to create source image: {e}"))
        })?;
    let mut dst_image = Image::new(dst_w, dst_h, PixelType::U8x3);

    let mut resizer = Resizer::new();
    resizer
        .resize(
            &src_image,
            &mut dst_image,
            &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3)),
        )
        .map_err(|e| TransformError::ProcessingFailed(format!("resize failed: {e}")))?;

    let resized =
        image::RgbImage::from_raw(dst_w, dst_h, dst_image.into_vec()).ok_or_else(|| {
            TransformError::ProcessingFailed("failed to convert resized image".to_string())
        })?;

    Ok(DynamicImage::ImageRgb8(resized))
}
