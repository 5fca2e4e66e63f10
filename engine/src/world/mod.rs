//! World Module
//!
//! Ground geometry for the island scene.
//!
//! ## Coordinates
//! - Y is up, 1 unit = 1 meter
//! - Heightmaps lie on the XZ plane

pub mod heightmap;

pub use heightmap::Heightmap;
