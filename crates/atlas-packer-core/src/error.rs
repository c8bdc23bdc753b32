use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("Nothing to pack")]
    Empty,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(
        "Image {index} ({width}x{height} incl. padding) exceeds the atlas maximum {max_width}x{max_height}"
    )]
    ImageExceedsAtlas {
        index: usize,
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },
    #[error("No feasible packing found within the search budget")]
    NoFeasiblePacking,
}

pub type Result<T> = std::result::Result<T, PackError>;
