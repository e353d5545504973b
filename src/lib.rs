use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, RgbImage};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    detection::{DetectionSummary, SplicingConfig, splicing::SplicingDetector},
    error::{Result, SpliceError},
};

pub mod detection;
pub mod error;
pub mod image_utils;
pub mod report;
pub mod session;

pub const OUTPUT_FILE_NAME: &str = "spliced_regions_output.jpg";

pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();
    info!("Loading image: {}", path.display());

    image::open(path).map_err(|source| SpliceError::Load {
        path: path.to_path_buf(),
        source,
    })
}

pub fn is_supported_image<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

pub struct SpliceAnalyzer {
    forged: DynamicImage,
    original: DynamicImage,
    config: SplicingConfig,
    paths: Option<(PathBuf, PathBuf)>,
}

impl SpliceAnalyzer {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(forged_path: P, original_path: Q) -> Result<Self> {
        let forged = load_image(&forged_path)?;
        let original = load_image(&original_path)?;

        Ok(Self {
            forged,
            original,
            config: SplicingConfig::default(),
            paths: Some((
                forged_path.as_ref().to_path_buf(),
                original_path.as_ref().to_path_buf(),
            )),
        })
    }

    pub fn from_images(forged: DynamicImage, original: DynamicImage) -> Self {
        Self {
            forged,
            original,
            config: SplicingConfig::default(),
            paths: None,
        }
    }

    pub fn with_config(mut self, config: SplicingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn forged(&self) -> &DynamicImage {
        &self.forged
    }

    pub fn original(&self) -> &DynamicImage {
        &self.original
    }

    pub fn paths(&self) -> Option<(&Path, &Path)> {
        self.paths
            .as_ref()
            .map(|(forged, original)| (forged.as_path(), original.as_path()))
    }

    pub fn detect(&self) -> Result<SplicingResult> {
        let detector = SplicingDetector::with_config(self.config.clone())?;
        detector.detect(&self.forged, &self.original)
    }

    pub fn detect_and_save(&self) -> Result<SplicingResult> {
        let detector = SplicingDetector::with_config(self.config.clone())?;
        detector.detect_and_save(&self.forged, &self.original)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct SplicingResult {
    pub binary_mask: GrayImage,
    pub regions_mask: RgbImage,
    pub highlighted_original: RgbImage,
    pub spliced_only: RgbImage,
    pub spliced_regions_output: RgbImage,
    pub summary: DetectionSummary,
}
