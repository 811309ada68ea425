// THEORY:
// The `PixelBuffer` module is the boundary between the outside world and the
// comparison engine. Everything upstream of this type — file decoding,
// platform bitmap handles, color-space normalization — is an external
// collaborator's concern. The engine's entire input contract is captured
// here: a row-major sequence of RGBA8 pixels with a known width and height,
// contiguous, with a row stride of exactly width * 4 bytes.
//
// Key architectural principles:
// 1.  **Borrowed, read-only view**: A `PixelBuffer` never owns or copies the
//     image data. Callers keep ownership; the comparator reads the slice
//     once per pass and holds no state between calls.
// 2.  **Validate once, trust after**: `new` checks the byte-length invariant
//     (len == width * height * 4) up front. Every traversal downstream can
//     then index pixels without re-checking bounds arithmetic.
// 3.  **Adapter surface**: anything the `image` crate can decode becomes a
//     `PixelBuffer` through the `RgbaImage` conversion, so the core never
//     learns about file formats.

use crate::core_modules::pixel::pixel::{CHANNELS, Pixel};
use crate::error::{CompareError, Result};
use image::RgbaImage;

/// A read-only view over row-major RGBA8 image data.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    /// The width of the image in pixels.
    width: u32,
    /// The height of the image in pixels.
    height: u32,
    /// The raw samples, exactly `width * height * 4` bytes.
    data: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    /// Wraps a raw RGBA8 slice. Fails if the slice length does not match
    /// the declared dimensions.
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(CompareError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of bytes in the buffer: width * height * 4.
    pub fn byte_count(&self) -> usize {
        self.data.len()
    }

    /// Total number of pixels in the buffer: width * height.
    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    /// The raw sample slice in row-major order.
    pub fn bytes(&self) -> &'a [u8] {
        self.data
    }

    /// The pixel at a linear (row-major) index.
    pub fn pixel(&self, index: usize) -> Pixel {
        let start = index * CHANNELS;
        Pixel::from(&self.data[start..start + CHANNELS])
    }

    /// Checks the shared precondition of every comparison: both buffers
    /// must have identical pixel dimensions.
    pub fn ensure_same_dimensions(&self, other: &PixelBuffer<'_>) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(CompareError::DimensionMismatch {
                width_a: self.width,
                height_a: self.height,
                width_b: other.width,
                height_b: other.height,
            });
        }
        Ok(())
    }
}

impl<'a> From<&'a RgbaImage> for PixelBuffer<'a> {
    fn from(image: &'a RgbaImage) -> Self {
        // RgbaImage guarantees a contiguous row-major RGBA8 layout.
        Self {
            width: image.width(),
            height: image.height(),
            data: image.as_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_matching_length() {
        let data = vec![0u8; 2 * 3 * 4];
        let buffer = PixelBuffer::new(2, 3, &data).unwrap();
        assert_eq!(buffer.byte_count(), 24);
        assert_eq!(buffer.pixel_count(), 6);
        assert_eq!(buffer.dimensions(), (2, 3));
    }

    #[test]
    fn new_rejects_wrong_length() {
        let data = vec![0u8; 10];
        let err = PixelBuffer::new(2, 2, &data).unwrap_err();
        assert_eq!(
            err,
            CompareError::BufferSizeMismatch {
                expected: 16,
                actual: 10
            }
        );
    }

    #[test]
    fn pixel_accessor_reads_row_major() {
        let data = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
        let buffer = PixelBuffer::new(2, 1, &data).unwrap();
        assert_eq!(buffer.pixel(0), Pixel::new(1, 2, 3, 4));
        assert_eq!(buffer.pixel(1), Pixel::new(5, 6, 7, 8));
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let a_data = vec![0u8; 2 * 2 * 4];
        let b_data = vec![0u8; 3 * 3 * 4];
        let a = PixelBuffer::new(2, 2, &a_data).unwrap();
        let b = PixelBuffer::new(3, 3, &b_data).unwrap();
        assert!(matches!(
            a.ensure_same_dimensions(&b),
            Err(CompareError::DimensionMismatch { .. })
        ));
        assert!(a.ensure_same_dimensions(&a).is_ok());
    }

    #[test]
    fn from_rgba_image_borrows_raw_samples() {
        let image = RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]));
        let buffer = PixelBuffer::from(&image);
        assert_eq!(buffer.dimensions(), (4, 2));
        assert_eq!(buffer.pixel(7), Pixel::new(10, 20, 30, 255));
    }

    #[test]
    fn zero_sized_buffer_is_valid() {
        let buffer = PixelBuffer::new(0, 5, &[]).unwrap();
        assert_eq!(buffer.byte_count(), 0);
        assert_eq!(buffer.pixel_count(), 0);
    }
}
