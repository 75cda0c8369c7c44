use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;

use crate::device::CaptureError;

/// JPEG quality used for detection payloads and preview frames. Matches the
/// quality the detection service was tuned against.
pub const JPEG_QUALITY: u8 = 60;

/// Encodes an RGB frame as JPEG at the given quality.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, CaptureError> {
    let mut jpeg = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, quality);
    encoder.encode(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ColorType::Rgb8.into(),
    )?;
    Ok(jpeg)
}

/// Packages JPEG bytes as a `data:image/jpeg;base64,` URL.
///
/// This is the exact payload format the detection service expects in the
/// `image` field of a detect request.
pub fn to_data_url(jpeg: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", STANDARD.encode(jpeg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_carries_the_payload() {
        let url = to_data_url(&[0xFF, 0xD8, 0xFF]);
        let encoded = url
            .strip_prefix("data:image/jpeg;base64,")
            .expect("data url prefix");
        assert_eq!(STANDARD.decode(encoded).unwrap(), vec![0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn encodes_a_frame_to_jpeg() {
        let image = RgbImage::from_pixel(8, 8, image::Rgb([10, 200, 30]));
        let jpeg = encode_jpeg(&image, JPEG_QUALITY).expect("jpeg encoding");
        // JPEG magic bytes
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }
}
