//! Front-end state for an interactive splice check.
//!
//! A `Session` holds the two selected paths and the latest detection result.
//! Input handlers update it and `render` turns it into a `Frame` of previews
//! that a window (or the CLI) can display.

use std::path::{Path, PathBuf};

use image::RgbImage;
use log::{error, info};

use crate::{
    SpliceAnalyzer, SplicingResult, is_supported_image,
    detection::SplicingConfig,
    error::{Result, SpliceError},
    report::visualization::Visualizer,
};

pub const STATUS_COMPLETED: &str = "Splicing detection completed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRole {
    Forged,
    Original,
}

pub struct Session {
    forged_path: Option<PathBuf>,
    original_path: Option<PathBuf>,
    analyzer: Option<SpliceAnalyzer>,
    result: Option<SplicingResult>,
    status: String,
    config: SplicingConfig,
    visualizer: Visualizer,
}

pub struct Frame {
    pub forged: Option<RgbImage>,
    pub original: Option<RgbImage>,
    pub highlighted_original: Option<RgbImage>,
    pub spliced_regions: Option<RgbImage>,
    pub status: String,
}

impl Frame {
    pub fn panes(&self) -> Vec<&RgbImage> {
        [
            &self.forged,
            &self.original,
            &self.highlighted_original,
            &self.spliced_regions,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Session {
    pub fn new(config: SplicingConfig) -> Self {
        Self {
            forged_path: None,
            original_path: None,
            analyzer: None,
            result: None,
            status: String::new(),
            config,
            visualizer: Visualizer::new(),
        }
    }

    pub fn with_visualizer(mut self, visualizer: Visualizer) -> Self {
        self.visualizer = visualizer;
        self
    }

    pub fn forged_path(&self) -> Option<&Path> {
        self.forged_path.as_deref()
    }

    pub fn original_path(&self) -> Option<&Path> {
        self.original_path.as_deref()
    }

    pub fn result(&self) -> Option<&SplicingResult> {
        self.result.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn select_forged<P: Into<PathBuf>>(&mut self, path: P) -> Result<()> {
        self.select(ImageRole::Forged, path.into())
    }

    pub fn select_original<P: Into<PathBuf>>(&mut self, path: P) -> Result<()> {
        self.select(ImageRole::Original, path.into())
    }

    fn select(&mut self, role: ImageRole, path: PathBuf) -> Result<()> {
        if !is_supported_image(&path) {
            let err = SpliceError::UnsupportedFormat(format!(
                "{} (expected .jpg, .jpeg or .png)",
                path.display()
            ));
            self.status = err.to_string();
            return Err(err);
        }

        match role {
            ImageRole::Forged => self.forged_path = Some(path),
            ImageRole::Original => self.original_path = Some(path),
        }

        self.refresh()
    }

    pub fn refresh(&mut self) -> Result<()> {
        let (forged, original) = match (&self.forged_path, &self.original_path) {
            (Some(forged), Some(original)) => (forged.clone(), original.clone()),
            (None, _) => {
                self.status = "Select the forged image".into();
                return Ok(());
            }
            (_, None) => {
                self.status = "Select the original image".into();
                return Ok(());
            }
        };

        match self.run(&forged, &original) {
            Ok(()) => {
                self.status = STATUS_COMPLETED.into();
                Ok(())
            }
            Err(err) => {
                error!("Splicing detection failed: {}", err);
                self.analyzer = None;
                self.result = None;
                self.status = err.to_string();
                Err(err)
            }
        }
    }

    fn run(&mut self, forged: &Path, original: &Path) -> Result<()> {
        info!("Forged image path: {}", forged.display());
        info!("Original image path: {}", original.display());

        let analyzer = SpliceAnalyzer::new(forged, original)?.with_config(self.config.clone());
        let result = analyzer.detect_and_save()?;

        self.analyzer = Some(analyzer);
        self.result = Some(result);
        Ok(())
    }

    pub fn render(&self) -> Frame {
        let preview = |image: &RgbImage| self.visualizer.preview(image);

        let (forged, original) = match &self.analyzer {
            Some(analyzer) => (
                Some(preview(&analyzer.forged().to_rgb8())),
                Some(preview(&analyzer.original().to_rgb8())),
            ),
            None => (None, None),
        };

        Frame {
            forged,
            original,
            highlighted_original: self
                .result
                .as_ref()
                .map(|r| preview(&r.highlighted_original)),
            spliced_regions: self
                .result
                .as_ref()
                .map(|r| preview(&r.spliced_regions_output)),
            status: self.status.clone(),
        }
    }

    pub fn render_panel(&self) -> Option<RgbImage> {
        let frame = self.render();
        let panes = frame.panes();

        (!panes.is_empty()).then(|| self.visualizer.panel(&panes))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SplicingConfig::default())
    }
}
