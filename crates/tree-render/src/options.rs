//! Configuration options for drawing a tree.

use serde::{Deserialize, Serialize};

use euclid::default::{Point2D, Size2D};
use crate::layout::{TreeLayout, TreeLayoutStyle};

/// Configuration options for laying a tree out on a drawing surface.
///
/// The tree is fitted into the surface minus `margin` on every side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Width of the drawing surface.
    pub width: f32,

    /// Height of the drawing surface.
    pub height: f32,

    /// Empty border kept around the tree.
    pub margin: f32,

    /// Orientation of the tree.
    pub style: TreeLayoutStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin: 50.0,
            style: TreeLayoutStyle::TopDown,
        }
    }
}

impl RenderOptions {
    /// Create new render options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the surface width.
    pub fn width(mut self, width: f32) -> Self {
        self.width = width.max(0.0);
        self
    }

    /// Set the surface height.
    pub fn height(mut self, height: f32) -> Self {
        self.height = height.max(0.0);
        self
    }

    /// Set the margin.
    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = margin.max(0.0);
        self
    }

    /// Set the layout style.
    pub fn style(mut self, style: TreeLayoutStyle) -> Self {
        self.style = style;
        self
    }

    /// The tree layout described by these options.
    pub fn layout(&self) -> TreeLayout {
        TreeLayout::new()
            .style(self.style)
            .origin(Point2D::new(self.margin, self.margin))
            .size(Size2D::new(
                (self.width - 2.0 * self.margin).max(0.0),
                (self.height - 2.0 * self.margin).max(0.0),
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.width, 800.0);
        assert_eq!(options.height, 600.0);
        assert_eq!(options.layout(), TreeLayout::default());
    }

    #[test]
    fn test_builder_pattern() {
        let options = RenderOptions::new()
            .width(200.0)
            .height(100.0)
            .margin(10.0)
            .style(TreeLayoutStyle::LeftToRight);

        let layout = options.layout();
        assert_eq!(layout.origin, Point2D::new(10.0, 10.0));
        assert_eq!(layout.size, Size2D::new(180.0, 80.0));
        assert_eq!(layout.style, TreeLayoutStyle::LeftToRight);
    }

    #[test]
    fn test_margin_larger_than_surface_clamps() {
        let layout = RenderOptions::new().width(50.0).margin(40.0).layout();
        assert_eq!(layout.size.width, 0.0);
    }
}
