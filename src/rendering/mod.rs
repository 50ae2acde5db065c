//! Page renderers: HTML body markup and the matching stylesheet.
//!
//! Both renderers walk the page in the same object-then-component order and
//! only read the page and the material index.

pub mod markup;
pub mod style;

pub use markup::render_body;
pub use style::{render_style_sheet, render_styles, StyleSheet, SPRITE_SCALE_DIVISOR};

use crate::model::PageObject;

/// CSS class generated for a page object.
pub fn class_name(object: &PageObject) -> String {
    format!("{}Class", object.name)
}
