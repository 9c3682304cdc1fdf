//! Linear-color image buffer and deterministic PNG writer.
//!
//! Uses fixed compression settings so the same frame always encodes to the
//! same bytes, which keeps the printed BLAKE3 hashes comparable across runs.

use std::io::Write;
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use thiserror::Error;
use volcast_field::Color;

/// Errors from image output.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    pub compression: Compression,
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

/// Row-major buffer of unclamped linear colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    pub fn new(width: u32, height: u32, fill: Color) -> Result<Self, PngError> {
        if width == 0 || height == 0 {
            return Err(PngError::InvalidDimensions(format!(
                "{}x{} has no pixels",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Mutable access to whole rows, for filling rows in parallel.
    pub fn rows_mut(&mut self) -> std::slice::ChunksMut<'_, Color> {
        self.pixels.chunks_mut(self.width as usize)
    }

    /// Quantize to 8-bit RGB, clamping each channel to [0, 1].
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgb8()).collect()
    }
}

/// Write an image buffer as 8-bit RGB PNG to any writer.
pub fn write_rgb_to_writer<W: Write>(
    buffer: &ImageBuffer,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    let mut encoder = Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.to_rgb8())?;

    Ok(())
}

/// Encode to memory and return the bytes with their hash.
pub fn write_rgb_to_vec_with_hash(
    buffer: &ImageBuffer,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), PngError> {
    let mut data = Vec::new();
    write_rgb_to_writer(buffer, &mut data, config)?;
    let hash = hash_png(&data);
    Ok((data, hash))
}

/// Write a PNG file and return the BLAKE3 hash of its bytes.
pub fn write_rgb(buffer: &ImageBuffer, path: &Path, config: &PngConfig) -> Result<String, PngError> {
    let (data, hash) = write_rgb_to_vec_with_hash(buffer, config)?;
    std::fs::write(path, data)?;
    Ok(hash)
}

pub fn hash_png(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> ImageBuffer {
        let mut buffer = ImageBuffer::new(32, 16, Color::black()).unwrap();
        for y in 0..16 {
            for x in 0..32 {
                buffer.set(x, y, Color::rgb(x as f64 / 31.0, y as f64 / 15.0, 2.0));
            }
        }
        buffer
    }

    #[test]
    fn test_png_deterministic() {
        let buffer = gradient();
        let config = PngConfig::default();
        let (data1, hash1) = write_rgb_to_vec_with_hash(&buffer, &config).unwrap();
        let (data2, hash2) = write_rgb_to_vec_with_hash(&buffer, &config).unwrap();
        assert_eq!(data1, data2, "PNG data should be identical");
        assert_eq!(hash1, hash2);
        assert_eq!(&data1[1..4], b"PNG");
    }

    #[test]
    fn test_quantization_clamps() {
        let buffer = gradient();
        let bytes = buffer.to_rgb8();
        assert_eq!(bytes.len(), 32 * 16 * 3);
        assert_eq!(bytes[2], 255);
        assert_eq!(bytes[0], 0);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            ImageBuffer::new(0, 4, Color::black()),
            Err(PngError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_rows_mut_covers_image() {
        let mut buffer = ImageBuffer::new(4, 3, Color::black()).unwrap();
        for (y, row) in buffer.rows_mut().enumerate() {
            for px in row.iter_mut() {
                *px = Color::gray(y as f64);
            }
        }
        assert_eq!(buffer.get(3, 2), Color::gray(2.0));
    }
}
