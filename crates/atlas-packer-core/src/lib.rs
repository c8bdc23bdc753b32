//! Core library for laying out rectangles in texture atlases.
//!
//! - Strategies: guillotine binary tree with iterative size search
//!   (`Regular`), fixed-size multi-atlas overflow, and horizontal/vertical
//!   shelf strips.
//! - Pure geometry: `pack` takes sizes plus per-image padding and returns
//!   pixel and [0,1]-normalized placement rectangles; rendering the packed
//!   layout into actual pixels is the caller's job.
//! - Data model is serde-serializable; a JSON export helper is provided.
//!
//! Quick example:
//! ```
//! use atlas_packer_core::{InputRect, PackerConfig, Padding, pack};
//! # fn main() -> Result<(), atlas_packer_core::PackError> {
//! let inputs = vec![
//!     InputRect::new(64, 64, Padding::uniform(2)),
//!     InputRect::new(32, 32, Padding::uniform(2)),
//! ];
//! let cfg = PackerConfig::builder()
//!     .with_max_dimensions(256, 256)
//!     .pow2(true)
//!     .build();
//! let out = pack(inputs, cfg)?;
//! println!("atlases: {}", out.atlases.len());
//! # Ok(()) }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod packer;
pub mod pipeline;

pub use config::*;
pub use error::*;
pub use export::*;
pub use model::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
/// Importing `atlas_packer_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{PackStrategy, PackerConfig, PackerConfigBuilder};
    pub use crate::error::{PackError, Result};
    pub use crate::model::{
        AtlasPackingResult, InputRect, PackOutput, PackStats, PackWarning, Padding, PixRect,
        UvRect,
    };
    pub use crate::pipeline::{pack, pack_with_paddings};
}
