use image::RgbImage;

/// Mirrors an RGB frame horizontally in place.
///
/// Preview surfaces show the camera the way a mirror would, so the subject's
/// left appears on the viewer's left. The detection payload is built from the
/// unmirrored frame; only display copies go through this function.
pub fn mirror_in_place(image: &mut RgbImage) {
    let width = image.width() as usize;
    let channels = 3;
    for row in image.chunks_exact_mut(width * channels) {
        mirror_row(row, width, channels);
    }
}

/// Reverses the pixel order of one interleaved row, preserving channel order
/// within each pixel.
fn mirror_row(row: &mut [u8], width: usize, channels: usize) {
    for column in 0..width / 2 {
        let left = column * channels;
        let right = (width - 1 - column) * channels;
        for channel in 0..channels {
            row.swap(left + channel, right + channel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverses_pixels_and_keeps_channels() {
        // Two pixels: red then blue.
        let mut row = vec![255, 0, 0, 0, 0, 255];
        mirror_row(&mut row, 2, 3);
        assert_eq!(row, vec![0, 0, 255, 255, 0, 0]);
    }

    #[test]
    fn odd_width_keeps_center_pixel() {
        let mut row = vec![1, 1, 1, 2, 2, 2, 3, 3, 3];
        mirror_row(&mut row, 3, 3);
        assert_eq!(row, vec![3, 3, 3, 2, 2, 2, 1, 1, 1]);
    }

    #[test]
    fn mirrors_a_full_image() {
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(0, 0, image::Rgb([10, 0, 0]));
        image.put_pixel(1, 0, image::Rgb([20, 0, 0]));
        image.put_pixel(0, 1, image::Rgb([30, 0, 0]));
        image.put_pixel(1, 1, image::Rgb([40, 0, 0]));

        mirror_in_place(&mut image);

        assert_eq!(image.get_pixel(0, 0).0, [20, 0, 0]);
        assert_eq!(image.get_pixel(1, 0).0, [10, 0, 0]);
        assert_eq!(image.get_pixel(0, 1).0, [40, 0, 0]);
        assert_eq!(image.get_pixel(1, 1).0, [30, 0, 0]);
    }
}
