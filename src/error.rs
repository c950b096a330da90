//! Error types for island map generation

use thiserror::Error;

/// Errors that can occur while building a map or querying it
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No sites were supplied
    #[error("site set is empty")]
    EmptySiteSet,

    /// Bounding rectangle has zero or negative area
    #[error("degenerate bounds: {width} x {height}")]
    DegenerateBounds { width: f64, height: f64 },

    /// Two sites share exact coordinates
    #[error("site {index} at ({x}, {y}) duplicates site {first}")]
    DuplicateSite {
        index: usize,
        first: usize,
        x: f64,
        y: f64,
    },

    /// A site coordinate is NaN or infinite
    #[error("site {index} has non-finite coordinates ({x}, {y})")]
    InvalidSite { index: usize, x: f64, y: f64 },

    /// A site lies outside the bounding rectangle
    #[error("site {index} at ({x}, {y}) lies outside the map bounds")]
    SiteOutOfBounds { index: usize, x: f64, y: f64 },

    /// The per-site color list does not match the point list
    #[error("{colors} colors supplied for {points} points")]
    ColorCountMismatch { points: usize, colors: usize },

    /// Requested center index does not exist
    #[error("center not found: {0}")]
    CenterNotFound(usize),
}

/// Result type alias for map operations
pub type Result<T> = std::result::Result<T, MapError>;
