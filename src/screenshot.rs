//! BMP export of a finished frame.

use std::path::Path;

use image::{ColorType, ImageFormat, ImageResult};
use simd_mandelbrot::{screen, Pixel};

/// `screenshot(n).bmp`, the name of the `n`th screenshot of a session.
pub fn file_name(index: usize) -> String {
    format!("screenshot({}).bmp", index)
}

pub fn save(path: impl AsRef<Path>, size: screen::Size, pixels: &[Pixel]) -> ImageResult<()> {
    let bytes: Vec<u8> = pixels
        .iter()
        .flat_map(|pixel| [pixel.red, pixel.green, pixel.blue, pixel.opacity])
        .collect();

    image::save_buffer_with_format(
        path,
        &bytes,
        size.width(),
        size.height(),
        ColorType::Rgba8,
        ImageFormat::Bmp,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_count_from_zero() {
        assert_eq!(file_name(0), "screenshot(0).bmp");
        assert_eq!(file_name(12), "screenshot(12).bmp");
    }

    #[test]
    fn writes_a_bmp_file() {
        let size = screen::Size::new(3, 2).unwrap();
        let pixels = vec![Pixel::opaque(10, 20, 30); size.pixel_count()];
        let path = std::env::temp_dir().join(format!("simd-mandelbrot-{}.bmp", std::process::id()));

        save(&path, size, &pixels).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(&bytes[..2], b"BM");
    }
}
