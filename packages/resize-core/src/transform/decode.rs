use crate::constants::MAX_PIXELS;
use crate::errors::TransformError;
use bytes::Bytes;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;

/// 画像バイト列をデコードする
///
/// フォーマットはマジックナンバーから推測する。
/// 極端に大きい画像はメモリ枯渇を防ぐため拒否する
pub fn decode_image(input: &Bytes) -> Result<DynamicImage, TransformError> {
    let reader = ImageReader::new(Cursor::new(input.as_ref()))
        .with_guessed_format()
        .map_err(|e| TransformError::ProcessingFailed(format!("failed to guess format: {e}")))?;

    let img = reader
        .decode()
        .map_err(|e| TransformError::ProcessingFailed(format!("decode failed: {e}")))?;

    let (width, height) = (img.width(), img.height());
    if width as u64 * height as u64 > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge { width, height });
    }

    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;

    fn png_bytes(width: u32, height: u32) -> Bytes {
        let img = DynamicImage::new_rgb8(width, height);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        Bytes::from(buf.into_inner())
    }

    #[test]
    fn test_decode_png() {
        let img = decode_image(&png_bytes(12, 8)).unwrap();
        assert_eq!(img.width(), 12);
        assert_eq!(img.height(), 8);
    }

    #[test]
    fn test_decode_garbage() {
        let result = decode_image(&Bytes::from_static(b"not an image"));
        assert!(matches!(result, Err(TransformError::ProcessingFailed(_))));
    }
}
