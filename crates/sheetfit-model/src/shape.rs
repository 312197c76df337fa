//! Floating shapes on a sheet's draw page

use crate::geometry::{Point, SizeBox};

/// A floating graphic object (image, chart, drawing) anchored on a sheet
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    /// Optional object name
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    /// Top-left corner relative to the sheet origin
    pub position: Point,
    /// Object size
    pub size: SizeBox,
}

impl Shape {
    pub fn new(position: Point, size: SizeBox) -> Self {
        Self {
            name: None,
            position,
            size,
        }
    }

    /// Set the object name
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Extent of the shape measured from the sheet origin
    pub fn far_corner(&self) -> SizeBox {
        SizeBox::new(
            self.position.x.saturating_add(self.size.width),
            self.position.y.saturating_add(self.size.height),
        )
    }
}
