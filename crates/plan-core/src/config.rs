// File: crates/plan-core/src/config.rs
// Summary: TOML render configuration (output paths, canvas sizes, theme, label fitting knobs).
// Notes:
// - Every field has a default, so an empty file or a missing file is valid.
// - The plan itself is never read from here; only how it is drawn.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PlanError, Result};
use crate::layout::{LabelFit, TextMetrics};
use crate::render::RenderOptions;
use crate::theme;
use crate::types::Insets;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasConfig {
    pub width: i32,
    pub height: i32,
    /// Margins as `[left, right, top, bottom]` pixels.
    pub insets: [u32; 4],
}

impl CanvasConfig {
    fn gantt() -> Self {
        Self { width: 1800, height: 1350, insets: [240, 40, 270, 90] }
    }

    fn milestone() -> Self {
        Self { width: 1800, height: 900, insets: [50, 50, 120, 110] }
    }
}

/// Keys present in a `[gantt]` / `[milestone]` table; the rest come from that chart's defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CanvasOverrides {
    width: Option<i32>,
    height: Option<i32>,
    insets: Option<[u32; 4]>,
}

impl CanvasOverrides {
    fn apply(self, base: CanvasConfig) -> CanvasConfig {
        CanvasConfig {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            insets: self.insets.unwrap_or(base.insets),
        }
    }
}

fn gantt_canvas<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<CanvasConfig, D::Error> {
    CanvasOverrides::deserialize(de).map(|o| o.apply(CanvasConfig::gantt()))
}

fn milestone_canvas<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<CanvasConfig, D::Error> {
    CanvasOverrides::deserialize(de).map(|o| o.apply(CanvasConfig::milestone()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub font_size: f64,
    pub margin: f64,
    pub gap: f64,
    pub min_space: f64,
    pub narrow_unit: f64,
    pub wide_unit: f64,
    pub wide_threshold: u32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        let fit = LabelFit::default();
        Self {
            font_size: fit.metrics.font_size,
            margin: fit.margin,
            gap: fit.gap,
            min_space: fit.min_space,
            narrow_unit: fit.metrics.narrow_unit,
            wide_unit: fit.metrics.wide_unit,
            wide_threshold: fit.metrics.wide_threshold,
        }
    }
}

impl LabelConfig {
    pub fn metrics(&self) -> TextMetrics {
        TextMetrics {
            font_size: self.font_size,
            narrow_unit: self.narrow_unit,
            wide_unit: self.wide_unit,
            wide_threshold: self.wide_threshold,
        }
    }

    /// Fitting parameters; `canvas_right` is filled in by the chart layout.
    pub fn label_fit(&self, weight_unit: &str) -> LabelFit {
        LabelFit {
            margin: self.margin,
            gap: self.gap,
            min_space: self.min_space,
            weight_unit: weight_unit.to_string(),
            metrics: self.metrics(),
            ..LabelFit::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub output_dir: PathBuf,
    pub gantt_file: String,
    pub milestone_file: String,
    pub theme: String,
    #[serde(deserialize_with = "gantt_canvas")]
    pub gantt: CanvasConfig,
    #[serde(deserialize_with = "milestone_canvas")]
    pub milestone: CanvasConfig,
    pub labels: LabelConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("/tmp"),
            gantt_file: "final_gantt.svg".to_string(),
            milestone_file: "final_milestone.svg".to_string(),
            theme: "light".to_string(),
            gantt: CanvasConfig::gantt(),
            milestone: CanvasConfig::milestone(),
            labels: LabelConfig::default(),
        }
    }
}

impl ChartConfig {
    pub fn from_toml_str(raw: &str, origin: &Path) -> Result<Self> {
        toml::from_str(raw).map_err(|source| PlanError::Config { path: origin.to_path_buf(), source })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw, path)
    }

    /// Defaults when `path` does not exist; parse errors still surface.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn gantt_path(&self) -> PathBuf {
        self.output_dir.join(&self.gantt_file)
    }

    pub fn milestone_path(&self) -> PathBuf {
        self.output_dir.join(&self.milestone_file)
    }

    pub fn gantt_options(&self) -> RenderOptions {
        self.render_options(&self.gantt)
    }

    pub fn milestone_options(&self) -> RenderOptions {
        self.render_options(&self.milestone)
    }

    fn render_options(&self, canvas: &CanvasConfig) -> RenderOptions {
        let [left, right, top, bottom] = canvas.insets;
        RenderOptions {
            width: canvas.width,
            height: canvas.height,
            insets: Insets::new(left, right, top, bottom),
            theme: theme::find(&self.theme),
            draw_labels: true,
        }
    }
}
