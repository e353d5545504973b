use std::{fs, io::Cursor, path::Path};

use image::{DynamicImage, GrayImage, RgbImage, codecs::jpeg::JpegEncoder};
use log::{debug, info};

use crate::{
    SplicingResult,
    detection::{DetectionSummary, SplicingConfig},
    error::{Result, SpliceError},
    image_utils::{
        abs_diff, bitwise_and, bounding_box, calculate_histogram, count_nonzero, gray_to_rgb,
        invert, rgb_to_gray, threshold_binary,
    },
};

pub struct SplicingDetector {
    config: SplicingConfig,
}

impl SplicingDetector {
    pub fn new() -> Self {
        Self {
            config: SplicingConfig::default(),
        }
    }

    pub fn with_config(config: SplicingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn detect(&self, forged: &DynamicImage, original: &DynamicImage) -> Result<SplicingResult> {
        let forged = forged.to_rgb8();
        let original = original.to_rgb8();

        if forged.dimensions() != original.dimensions() {
            return Err(SpliceError::DimensionMismatch {
                forged: forged.dimensions(),
                original: original.dimensions(),
            });
        }

        let forged_gray = rgb_to_gray(&forged);
        let original_gray = rgb_to_gray(&original);

        let difference = abs_diff(&forged_gray, &original_gray);
        let binary_mask = threshold_binary(&difference, self.config.difference_threshold);

        let regions_mask = gray_to_rgb(&invert(&binary_mask));
        let highlighted_original = bitwise_and(&original, &regions_mask);

        // Keep only the forged content inside the changed regions.
        let change_mask = gray_to_rgb(&binary_mask);
        let spliced_only = bitwise_and(&forged, &change_mask);

        let spliced_binary_mask =
            threshold_binary(&rgb_to_gray(&spliced_only), self.config.residue_threshold);
        let spliced_regions_output = gray_to_rgb(&invert(&spliced_binary_mask));

        let summary = self.summarize(&difference, &binary_mask, &spliced_binary_mask);
        debug!(
            "Changed pixels: {}, spliced pixels: {}, max difference: {}",
            summary.changed_pixels, summary.spliced_pixels, summary.max_difference
        );

        Ok(SplicingResult {
            binary_mask,
            regions_mask,
            highlighted_original,
            spliced_only,
            spliced_regions_output,
            summary,
        })
    }

    pub fn detect_and_save(
        &self,
        forged: &DynamicImage,
        original: &DynamicImage,
    ) -> Result<SplicingResult> {
        let result = self.detect(forged, original)?;
        self.save(&result)?;
        Ok(result)
    }

    pub fn save(&self, result: &SplicingResult) -> Result<()> {
        self.save_to(result, &self.config.output_path)
    }

    pub fn save_to<P: AsRef<Path>>(&self, result: &SplicingResult, path: P) -> Result<()> {
        let bytes = encode_jpeg(&result.spliced_regions_output, self.config.jpeg_quality)?;
        fs::write(&path, bytes)?;

        info!("Spliced regions output saved to {}", path.as_ref().display());
        Ok(())
    }

    fn summarize(
        &self,
        difference: &GrayImage,
        binary_mask: &GrayImage,
        spliced_binary_mask: &GrayImage,
    ) -> DetectionSummary {
        let (width, height) = difference.dimensions();
        let total = width as u64 * height as u64;

        let histogram = calculate_histogram(difference);
        let max_difference = histogram
            .iter()
            .rposition(|&count| count > 0)
            .unwrap_or(0) as u8;
        let mean_difference = if total > 0 {
            histogram
                .iter()
                .enumerate()
                .map(|(value, &count)| value as f64 * count as f64)
                .sum::<f64>()
                / total as f64
        } else {
            0.0
        };

        let changed_pixels = count_nonzero(binary_mask);
        let spliced_pixels = count_nonzero(spliced_binary_mask);
        let changed_ratio = if total > 0 {
            changed_pixels as f64 / total as f64
        } else {
            0.0
        };

        DetectionSummary {
            width,
            height,
            changed_pixels,
            changed_ratio,
            spliced_pixels,
            max_difference,
            mean_difference,
            bounding_box: bounding_box(spliced_binary_mask),
            is_spliced: spliced_pixels > 0,
        }
    }
}

impl Default for SplicingDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());

    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    image.write_with_encoder(encoder)?;

    Ok(buffer.into_inner())
}
