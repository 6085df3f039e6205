//! Pointer input events delivered by the hosting shell.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types.
///
/// Positions are in container coordinates (origin at the top-left corner of
/// the drawing surface).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Pointer moved to position
    PointerMove {
        /// New position
        position: Point,
    },
    /// Pointer button pressed
    PointerDown {
        /// Position of click
        position: Point,
        /// Button pressed
        button: MouseButton,
    },
    /// Pointer left the drawing surface
    PointerLeave,
}

impl Event {
    /// Position carried by the event, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::PointerMove { position } | Self::PointerDown { position, .. } => Some(*position),
            Self::PointerLeave => None,
        }
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}
