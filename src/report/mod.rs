pub mod visualization;

use std::{fs, path::Path};

use serde::Serialize;

use crate::{SRegion, SplicingResult, error::Result};

#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub forged_path: Option<String>,
    pub original_path: Option<String>,
    pub output_path: Option<String>,
    pub dimensions: DimensionsSection,
    pub difference: DifferenceSection,
    pub splicing: SplicingSection,
}

#[derive(Debug, Serialize)]
pub struct DimensionsSection {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Serialize)]
pub struct DifferenceSection {
    pub max_difference: u8,
    pub mean_difference: f64,
    pub changed_pixels: u64,
    pub changed_ratio: f64,
}

#[derive(Debug, Serialize)]
pub struct SplicingSection {
    pub is_spliced: bool,
    pub spliced_pixels: u64,
    pub bounding_box: Option<SRegion>,
    pub summary: String,
}

impl From<&SplicingResult> for JsonReport {
    fn from(result: &SplicingResult) -> Self {
        let summary = &result.summary;

        Self {
            forged_path: None,
            original_path: None,
            output_path: None,
            dimensions: DimensionsSection {
                width: summary.width,
                height: summary.height,
            },
            difference: DifferenceSection {
                max_difference: summary.max_difference,
                mean_difference: summary.mean_difference,
                changed_pixels: summary.changed_pixels,
                changed_ratio: summary.changed_ratio,
            },
            splicing: SplicingSection {
                is_spliced: summary.is_spliced,
                spliced_pixels: summary.spliced_pixels,
                bounding_box: summary.bounding_box,
                summary: summary.describe(),
            },
        }
    }
}

impl JsonReport {
    pub fn with_inputs<P: AsRef<Path>, Q: AsRef<Path>>(mut self, forged: P, original: Q) -> Self {
        self.forged_path = Some(forged.as_ref().display().to_string());
        self.original_path = Some(original.as_ref().display().to_string());
        self
    }

    pub fn with_output<P: AsRef<Path>>(mut self, output: P) -> Self {
        self.output_path = Some(output.as_ref().display().to_string());
        self
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
