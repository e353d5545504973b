use image::{
    Rgb, RgbImage,
    imageops::{self, FilterType},
};
use imageproc::{drawing::draw_hollow_rect_mut, rect::Rect};

use crate::{SRegion, SplicingResult};

#[derive(Debug, Clone, Copy)]
pub struct VisualizationConfig {
    pub preview_size: (u32, u32),
    pub filter: FilterType,
    pub gap: u32,
    pub background: Rgb<u8>,
    pub outline_color: Rgb<u8>,
    pub border_thickness: u32,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            preview_size: (300, 300),
            filter: FilterType::Lanczos3,
            gap: 8,
            background: Rgb([255, 255, 255]),
            outline_color: Rgb([255, 0, 0]),
            border_thickness: 2,
        }
    }
}

pub struct Visualizer {
    config: VisualizationConfig,
}

impl Visualizer {
    pub fn new() -> Self {
        Self {
            config: VisualizationConfig::default(),
        }
    }

    pub fn with_config(config: VisualizationConfig) -> Self {
        Self { config }
    }

    // Previews are stretched to the box; aspect ratio is not preserved.
    pub fn preview(&self, image: &RgbImage) -> RgbImage {
        let (width, height) = self.config.preview_size;

        if image.width() == 0 || image.height() == 0 {
            return RgbImage::from_pixel(width, height, self.config.background);
        }

        imageops::resize(image, width, height, self.config.filter)
    }

    pub fn outline_splice(&self, image: &RgbImage, region: Option<SRegion>) -> RgbImage {
        let mut vis = image.clone();

        if let Some(region) = region {
            self.draw_region_border(&mut vis, &region, self.config.outline_color);
        }

        vis
    }

    pub fn visualize_detection(&self, forged: &RgbImage, result: &SplicingResult) -> RgbImage {
        self.outline_splice(forged, result.summary.bounding_box)
    }

    pub fn panel(&self, images: &[&RgbImage]) -> RgbImage {
        let (preview_w, preview_h) = self.config.preview_size;
        let gap = self.config.gap;
        let count = images.len() as u32;

        let width = count * preview_w + (count + 1) * gap;
        let height = preview_h + 2 * gap;
        let mut canvas = RgbImage::from_pixel(width, height, self.config.background);

        for (i, image) in images.iter().enumerate() {
            let preview = self.preview(image);
            let x = gap + i as u32 * (preview_w + gap);
            imageops::overlay(&mut canvas, &preview, x as i64, gap as i64);
        }

        canvas
    }

    fn draw_region_border(&self, image: &mut RgbImage, region: &SRegion, color: Rgb<u8>) {
        for t in 0..self.config.border_thickness {
            let rect = Rect::at(region.x as i32 - t as i32, region.y as i32 - t as i32)
                .of_size(region.width + 2 * t, region.height + 2 * t);
            draw_hollow_rect_mut(image, rect, color);
        }
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_has_fixed_size() {
        let visualizer = Visualizer::new();
        let image = RgbImage::from_pixel(640, 120, Rgb([10, 20, 30]));
        assert_eq!(visualizer.preview(&image).dimensions(), (300, 300));

        let tiny = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));
        assert_eq!(visualizer.preview(&tiny).dimensions(), (300, 300));
    }

    #[test]
    fn test_panel_layout() {
        let visualizer = Visualizer::with_config(VisualizationConfig {
            preview_size: (10, 10),
            gap: 2,
            ..VisualizationConfig::default()
        });
        let black = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));

        let panel = visualizer.panel(&[&black, &black, &black]);
        assert_eq!(panel.dimensions(), (3 * 10 + 4 * 2, 14));
        assert_eq!(panel.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(panel.get_pixel(2, 2).0, [0, 0, 0]);
        assert_eq!(panel.get_pixel(12, 5).0, [255, 255, 255]);
    }

    #[test]
    fn test_outline_draws_around_region() {
        let visualizer = Visualizer::new();
        let image = RgbImage::from_pixel(20, 20, Rgb([0, 0, 0]));
        let region = SRegion { x: 5, y: 5, width: 4, height: 4 };

        let vis = visualizer.outline_splice(&image, Some(region));
        assert_eq!(vis.get_pixel(5, 5).0, [255, 0, 0]);
        assert_eq!(vis.get_pixel(4, 4).0, [255, 0, 0]);
        assert_eq!(vis.get_pixel(6, 6).0, [0, 0, 0]);

        let untouched = visualizer.outline_splice(&image, None);
        assert_eq!(untouched, image);
    }
}
