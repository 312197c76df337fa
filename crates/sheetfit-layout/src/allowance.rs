//! Header, footer and margin allowances

use sheetfit_model::{PageStyle, SizeBox};

use crate::options::FitOptions;

/// Space added around the sheet content, in 1/100 mm
///
/// The header counts together with the top margin, only while the header is
/// switched on. The footer and bottom margin are always counted, as are the
/// left and right margins. Every counted term is floored at its minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allowances {
    pub width: i32,
    pub height: i32,
}

impl Allowances {
    /// Allowances for a page style
    pub fn for_style(style: &PageStyle, options: &FitOptions) -> Self {
        let margin = |m: i32| m.max(options.min_margin);
        let band = |h: i32| h.max(options.min_header_footer_height);

        let mut height = 0i32;
        if style.header_on {
            height = height
                .saturating_add(band(style.header_height))
                .saturating_add(margin(style.margins.top));
        }
        height = height
            .saturating_add(band(style.footer_height))
            .saturating_add(margin(style.margins.bottom));

        let width = margin(style.margins.left).saturating_add(margin(style.margins.right));

        Self { width, height }
    }

    /// Page size holding `content` plus these allowances
    pub fn page_size(&self, content: SizeBox) -> SizeBox {
        SizeBox::new(
            content.width.saturating_add(self.width),
            content.height.saturating_add(self.height),
        )
    }
}
