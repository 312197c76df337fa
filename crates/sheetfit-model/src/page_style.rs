//! Page style types
//!
//! A page style is a named set of print-layout properties. Several sheets may
//! reference the same style, so a write to a style is visible to all of them.

use crate::geometry::SizeBox;

/// Name of the page style every new sheet references
pub const DEFAULT_PAGE_STYLE: &str = "Default";

/// The four page margins, in 1/100 mm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl Margins {
    /// All margins zero
    pub const ZERO: Margins = Margins {
        top: 0,
        bottom: 0,
        left: 0,
        right: 0,
    };

    /// Same value on all four sides
    pub fn uniform(value: i32) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }
}

/// Print-layout properties of a page style
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageStyle {
    /// Physical page size
    pub size: SizeBox,
    /// Page margins
    pub margins: Margins,
    /// Header is printed
    pub header_on: bool,
    /// Header height (including its spacing)
    pub header_height: i32,
    /// Footer is printed
    pub footer_on: bool,
    /// Footer height (including its spacing)
    pub footer_height: i32,
    /// Fit the printout on this many pages (0 = off)
    pub scale_to_pages: i16,
    /// Center the printout horizontally
    pub center_horizontally: bool,
    /// Center the printout vertically
    pub center_vertically: bool,
}

impl Default for PageStyle {
    /// A4 portrait with 2 cm margins, header and footer on
    fn default() -> Self {
        Self {
            size: SizeBox::new(21000, 29700),
            margins: Margins::uniform(2000),
            header_on: true,
            header_height: 750,
            footer_on: true,
            footer_height: 750,
            scale_to_pages: 0,
            center_horizontally: false,
            center_vertically: false,
        }
    }
}

impl PageStyle {
    /// Apply a layout write to this style
    pub fn apply(&mut self, layout: &PageLayout) {
        self.size = layout.size;
        self.margins = layout.margins;
        self.center_horizontally = layout.center_horizontally;
        self.center_vertically = layout.center_vertically;
        self.scale_to_pages = layout.scale_to_pages;
    }
}

/// The set of page-style properties written by the single-page fitter
///
/// Header and footer settings are left untouched by a layout write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageLayout {
    pub size: SizeBox,
    pub margins: Margins,
    pub center_horizontally: bool,
    pub center_vertically: bool,
    pub scale_to_pages: i16,
}

impl PageLayout {
    /// A centered, margin-less, one-page layout of the given size
    pub fn single_page(size: SizeBox) -> Self {
        Self {
            size,
            margins: Margins::ZERO,
            center_horizontally: true,
            center_vertically: true,
            scale_to_pages: 1,
        }
    }
}
