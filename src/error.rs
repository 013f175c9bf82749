use std::io;

use thiserror::Error;

/// Errors raised by the collaborators around the rasterizer: mesh loading and image export.
///
/// The rasterizer itself never fails; malformed primitives are silently dropped.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed mesh on line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("Face {face} has {sides} sides, only triangles are supported")]
    NonTriangularFace { face: usize, sides: usize },
    #[error("Face {face} references vertex {index}, but the mesh only has {count} vertices")]
    VertexOutOfRange {
        face: usize,
        index: usize,
        count: usize,
    },
    #[error("Frame buffer of size {0:?} cannot be encoded")]
    InvalidImageSize([usize; 2]),
    #[cfg(feature = "image")]
    #[error("Image encoding failed: {0}")]
    Image(#[from] crate::image::ImageError),
}
