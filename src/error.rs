// Copyright 2025 Lars Brubaker
// License: MIT
//
// Error taxonomy for a partition call. Every failure aborts the whole call;
// no partial mesh is returned and nothing is retried.

use thiserror::Error;

use crate::geom::Real;
use crate::grid::SectionId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EarclipError {
    /// The corner walk that closes a section fragment ran past every wall
    /// without finding a start point. Only malformed (self-intersecting)
    /// rings get here.
    #[error("self-intersecting input: section {section} not closed after {hops} corner hops")]
    SelfIntersectingInput { section: SectionId, hops: usize },

    /// A coordinate is not finite or lies outside `[0, extent]`.
    #[error("invalid coordinate ({s}, {t}) at ring {ring}, vertex {index}")]
    InvalidCoordinate {
        ring: usize,
        index: usize,
        s: Real,
        t: Real,
    },

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// Failure reported by the triangulator, passed through unchanged.
    #[error("triangulation failed: {0}")]
    Triangulation(String),
}

pub type Result<T> = core::result::Result<T, EarclipError>;
