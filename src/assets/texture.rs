//! CPU-side texture data and image decoding

use crate::core::error::Error;

/// Decoded RGBA8 texture data, ready for GPU upload.
#[derive(Clone)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureData {
    /// Decode an encoded image (webp/jpeg/png/...) into RGBA8.
    pub fn decode(bytes: &[u8], name: &str) -> Result<Self, Error> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| Error::Asset(format!("{name}: {e}")))?
            .to_rgba8();
        let (width, height) = image.dimensions();
        log::info!("Decoded {name}: {width}x{height}");
        Ok(Self {
            width,
            height,
            rgba: image.into_raw(),
        })
    }

    /// Sample the red channel at a pixel, clamped to the image bounds.
    /// Used by CPU-side tests; the GPU samples the real texture.
    pub fn red_at(&self, x: u32, y: u32) -> u8 {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        self.rgba[((y * self.width + x) * 4) as usize]
    }
}

impl std::fmt::Debug for TextureData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureData")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_png() {
        // 1x1 opaque red PNG
        let mut png = Vec::new();
        let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 0, 0, 255]));
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let tex = TextureData::decode(&png, "red").unwrap();
        assert_eq!((tex.width, tex.height), (1, 1));
        assert_eq!(tex.red_at(0, 0), 255);
        assert_eq!(tex.rgba.len(), 4);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = TextureData::decode(b"definitely not an image", "bad").unwrap_err();
        assert!(matches!(err, Error::Asset(_)));
    }
}
