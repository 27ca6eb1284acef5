//! PNG export of composited frames.

use std::path::Path;

use crate::error::ExportError;
use crate::raster::{Raster, Surface};
use image::RgbaImage;
use log::info;

/// Convert a raster to an 8-bit straight-alpha image.
pub fn to_image(raster: &Raster) -> Result<RgbaImage, ExportError> {
    let (width, height) = (raster.width(), raster.height());
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyRaster);
    }
    let bytes: Vec<u8> = raster.to_rgba8().into_iter().flatten().collect();
    RgbaImage::from_raw(width, height, bytes).ok_or(ExportError::EmptyRaster)
}

/// Write a raster to `path` as PNG.
pub fn save_png(raster: &Raster, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let image = to_image(raster)?;
    image.save_with_format(path, image::ImageFormat::Png)?;
    info!("Saved {}x{} frame to {}", raster.width(), raster.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::raster::BlendMode;
    use glam::Vec2;

    #[test]
    fn test_empty_raster_rejected() {
        let raster = Raster::new(0, 10);
        assert!(matches!(to_image(&raster), Err(ExportError::EmptyRaster)));
    }

    #[test]
    fn test_image_matches_raster() {
        let mut raster = Raster::new(8, 4);
        raster.fill_circle(Vec2::new(4.0, 2.0), 10.0, Rgba::new(1.0, 0.0, 0.0, 1.0), BlendMode::Alpha);
        let image = to_image(&raster).unwrap();
        assert_eq!(image.dimensions(), (8, 4));
        assert_eq!(image.get_pixel(3, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_save_png_round_trip() {
        let mut raster = Raster::new(5, 5);
        raster.fill_circle(Vec2::new(2.5, 2.5), 10.0, Rgba::WHITE, BlendMode::Alpha);
        let path = std::env::temp_dir().join(format!("cosmic_field_export_{}.png", std::process::id()));
        save_png(&raster, &path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.dimensions(), (5, 5));
        assert_eq!(loaded.get_pixel(2, 2).0, [255, 255, 255, 255]);
    }
}
