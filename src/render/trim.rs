use std::path::Path;

use anyhow::{Context, Result};
use image::RgbaImage;

/// Bounding box `(x, y, width, height)` of every pixel with any channel
/// below 255. `None` for an all-white image.
pub fn content_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0.iter().all(|&c| c == 255) {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
}

/// Crop a saved image to its non-white content and write it back in place.
pub fn trim_image(path: &Path) -> Result<()> {
    let image = image::open(path)
        .with_context(|| format!("failed to reopen {} for trimming", path.display()))?;
    let Some((x, y, width, height)) = content_bounds(&image.to_rgba8()) else {
        return Ok(());
    };
    image
        .crop_imm(x, y, width, height)
        .save(path)
        .with_context(|| format!("failed to write trimmed {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::fs;
    use std::path::PathBuf;

    fn unique_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "lor_results_trim_{}_{}.png",
            name,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        path
    }

    #[test]
    fn saved_png_is_cropped_in_place() {
        let path = unique_path("block");
        let mut img = RgbaImage::from_pixel(60, 40, Rgba([255, 255, 255, 255]));
        for x in 12..20 {
            for y in 5..30 {
                img.put_pixel(x, y, Rgba([200, 10, 10, 255]));
            }
        }
        img.save(&path).unwrap();

        trim_image(&path).unwrap();
        let trimmed = image::open(&path).unwrap().to_rgba8();
        assert_eq!(trimmed.dimensions(), (8, 25));
        assert_eq!(*trimmed.get_pixel(0, 0), Rgba([200, 10, 10, 255]));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn all_white_png_is_left_unchanged() {
        let path = unique_path("white");
        RgbaImage::from_pixel(16, 9, Rgba([255, 255, 255, 255]))
            .save(&path)
            .unwrap();
        let before = fs::read(&path).unwrap();

        trim_image(&path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), before);
        assert_eq!(image::open(&path).unwrap().to_rgba8().dimensions(), (16, 9));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn bounds_cover_all_non_white_pixels() {
        let mut img = RgbaImage::from_pixel(40, 30, Rgba([255, 255, 255, 255]));
        img.put_pixel(5, 7, Rgba([0, 0, 0, 255]));
        img.put_pixel(20, 25, Rgba([255, 254, 255, 255]));
        assert_eq!(content_bounds(&img), Some((5, 7, 16, 19)));
    }

    #[test]
    fn transparent_pixels_count_as_content() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        img.put_pixel(3, 0, Rgba([255, 255, 255, 0]));
        assert_eq!(content_bounds(&img), Some((3, 0, 1, 1)));
    }

    #[test]
    fn all_white_has_no_bounds() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255]));
        assert_eq!(content_bounds(&img), None);
    }
}
