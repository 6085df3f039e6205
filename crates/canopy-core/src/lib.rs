//! Core types for the Canopy treemap chart.
//!
//! This crate provides foundational types used throughout Canopy:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] with CSS parsing and RGB interpolation
//! - Pointer input: [`Event`], [`MouseButton`]

mod color;
mod event;
mod geometry;

pub use color::{Color, ColorParseError};
pub use event::{Event, MouseButton};
pub use geometry::{round_half_up, Point, Rect, Size};
