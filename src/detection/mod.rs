pub mod splicing;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{OUTPUT_FILE_NAME, SRegion, error::{Result, SpliceError}};

#[derive(Debug, Clone)]
pub struct SplicingConfig {
    pub difference_threshold: u8,
    pub residue_threshold: u8,
    pub output_path: PathBuf,
    pub jpeg_quality: u8,
}

impl Default for SplicingConfig {
    fn default() -> Self {
        Self {
            difference_threshold: 25,
            residue_threshold: 1,
            output_path: PathBuf::from(OUTPUT_FILE_NAME),
            jpeg_quality: 95,
        }
    }
}

impl SplicingConfig {
    pub fn with_difference_threshold(mut self, threshold: u8) -> Self {
        self.difference_threshold = threshold;
        self
    }

    pub fn with_residue_threshold(mut self, threshold: u8) -> Self {
        self.residue_threshold = threshold;
        self
    }

    pub fn with_output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(SpliceError::InvalidParameter(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(SpliceError::InvalidParameter("output path is empty".into()));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionSummary {
    pub width: u32,
    pub height: u32,
    pub changed_pixels: u64,
    pub changed_ratio: f64,
    pub spliced_pixels: u64,
    pub max_difference: u8,
    pub mean_difference: f64,
    pub bounding_box: Option<SRegion>,
    pub is_spliced: bool,
}

impl DetectionSummary {
    pub fn describe(&self) -> String {
        match self.bounding_box {
            Some(region) if self.is_spliced => format!(
                "Detected {} spliced pixel(s) ({:.2}% of image) within {}x{} region at ({}, {})",
                self.spliced_pixels,
                self.changed_ratio * 100.0,
                region.width,
                region.height,
                region.x,
                region.y
            ),
            _ => "No spliced regions detected".to_string(),
        }
    }
}
