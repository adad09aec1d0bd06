//! `PaneBounds`: pixel-space bounding box for a pane.

use super::common::SplitOrientation;
use serde::{Deserialize, Serialize};

/// Bounds of a pane in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PaneBounds {
    /// X position in pixels from left edge of content area
    pub x: f32,
    /// Y position in pixels from top of content area
    pub y: f32,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl PaneBounds {
    /// Create new bounds
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized 1x1 area used when no real geometry is known yet
    pub fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// True when the area has no width or no height
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get the center point of the bounds
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Extent along the axis a split of `orientation` divides
    pub fn extent(&self, orientation: SplitOrientation) -> f32 {
        match orientation {
            SplitOrientation::Horizontal => self.width,
            SplitOrientation::Vertical => self.height,
        }
    }

    /// Divide these bounds between the two children of a split
    pub fn split(&self, orientation: SplitOrientation, ratio: f32) -> (PaneBounds, PaneBounds) {
        match orientation {
            SplitOrientation::Horizontal => {
                let first_width = self.width * ratio;
                (
                    PaneBounds::new(self.x, self.y, first_width, self.height),
                    PaneBounds::new(
                        self.x + first_width,
                        self.y,
                        self.width - first_width,
                        self.height,
                    ),
                )
            }
            SplitOrientation::Vertical => {
                let first_height = self.height * ratio;
                (
                    PaneBounds::new(self.x, self.y, self.width, first_height),
                    PaneBounds::new(
                        self.x,
                        self.y + first_height,
                        self.width,
                        self.height - first_height,
                    ),
                )
            }
        }
    }
}
