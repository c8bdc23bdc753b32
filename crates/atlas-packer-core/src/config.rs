use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Packing strategies.
///
/// The set is closed: each variant is a materially different algorithm that
/// shares only the input/output contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PackStrategy {
    /// Guillotine binary-tree packing with an iterative atlas-size search.
    Regular,
    /// Shelf packing: images side by side along x, one full-height row each.
    HorizontalStrip,
    /// Shelf packing: images stacked along y, one full-width column each.
    VerticalStrip,
}

impl FromStr for PackStrategy {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "regular" => Ok(Self::Regular),
            "horizontal" | "horizontal_strip" => Ok(Self::HorizontalStrip),
            "vertical" | "vertical_strip" => Ok(Self::VerticalStrip),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackerConfig {
    /// Maximum atlas width in pixels.
    pub max_width: u32,
    /// Maximum atlas height in pixels.
    pub max_height: u32,
    /// Round atlas dimensions up to powers of two.
    pub force_power_of_two: bool,
    /// Overflow into additional max-size atlases instead of rescaling
    /// everything into one.
    pub multi_atlas: bool,
    #[serde(default = "default_strategy")]
    pub strategy: PackStrategy,
    /// Smallest on-atlas size (pixels, either axis) an image may be scaled
    /// down to before the single-atlas packer redoes the layout with a
    /// larger minimum image size.
    #[serde(default = "default_master_min_image_size")]
    pub master_min_image_size: u32,
    /// Strip strategies only: stretch each image across the full used
    /// cross-axis extent of its atlas (useful for tiling).
    #[serde(default)]
    pub strip_fill_cross_axis: bool,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            max_width: 1024,
            max_height: 1024,
            force_power_of_two: false,
            multi_atlas: false,
            strategy: default_strategy(),
            master_min_image_size: default_master_min_image_size(),
            strip_fill_cross_axis: false,
        }
    }
}

impl PackerConfig {
    /// Validates the configuration before any packing work begins.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::PackError;

        if self.max_width == 0 || self.max_height == 0 {
            return Err(PackError::InvalidInput(format!(
                "atlas maximum must be positive, got {}x{}",
                self.max_width, self.max_height
            )));
        }
        if self.master_min_image_size == 0 {
            return Err(PackError::InvalidInput(
                "master_min_image_size must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}

fn default_strategy() -> PackStrategy {
    PackStrategy::Regular
}
fn default_master_min_image_size() -> u32 {
    16
}

/// Builder for `PackerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn with_max_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.max_width = w;
        self.cfg.max_height = h;
        self
    }
    pub fn pow2(mut self, v: bool) -> Self {
        self.cfg.force_power_of_two = v;
        self
    }
    pub fn multi_atlas(mut self, v: bool) -> Self {
        self.cfg.multi_atlas = v;
        self
    }
    pub fn strategy(mut self, v: PackStrategy) -> Self {
        self.cfg.strategy = v;
        self
    }
    pub fn master_min_image_size(mut self, v: u32) -> Self {
        self.cfg.master_min_image_size = v;
        self
    }
    pub fn strip_fill_cross_axis(mut self, v: bool) -> Self {
        self.cfg.strip_fill_cross_axis = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}
