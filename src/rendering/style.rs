/// Stylesheet rendering

use std::fmt;

use log::{debug, warn};

use super::class_name;
use crate::materials::MaterialIndex;
use crate::model::{Color, Component, Page};

/// Sprites are authored at four times their displayed size.
pub const SPRITE_SCALE_DIVISOR: i64 = 4;

/// A rendered stylesheet, split into the page-level `body` rule and the
/// per-component rules that follow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    pub body: String,
    pub rules: String,
}

impl fmt::Display for StyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.body, self.rules)
    }
}

/// Rule for the page background. The alpha channel is not emitted; without a
/// resolved color the rule carries no declarations.
pub fn body_rule(background: Option<&Color>) -> String {
    match background {
        Some(c) => format!(
            "body{{ \nbackground-color: rgb({},{},{}); \n}} \n",
            c.r, c.g, c.b
        ),
        None => "body{ \n} \n".to_string(),
    }
}

pub fn text_rule(class: &str, font_size_px: i64) -> String {
    format!(".{}{{ \nfont-size: {}px;\n}} \n", class, font_size_px)
}

pub fn sprite_rule(class: &str, width_px: i64, height_px: i64) -> String {
    format!(
        ".{}{{ \nwidth: {}px;\nheight: {}px;\n}} \n",
        class,
        width_px / SPRITE_SCALE_DIVISOR,
        height_px / SPRITE_SCALE_DIVISOR
    )
}

/// Render the body rule and one rule per text or sprite component.
pub fn render_style_sheet(page: &Page, materials: &MaterialIndex) -> StyleSheet {
    let background_name = &page.config.background_material;
    let background = materials.lookup(background_name).map(|m| &m.tint);
    if background.is_none() {
        warn!(
            "background material {:?} not found, page background left unset",
            background_name
        );
    }

    let mut sheet = StyleSheet {
        body: body_rule(background),
        rules: String::new(),
    };

    for object in &page.objects {
        let class = class_name(object);
        for component in &object.components {
            match component {
                Component::Text(text) => {
                    sheet.rules.push_str(&text_rule(&class, text.font_size_px));
                    sheet.rules.push('\n');
                }
                Component::Sprite(sprite) => {
                    sheet
                        .rules
                        .push_str(&sprite_rule(&class, sprite.width_px, sprite.height_px));
                    sheet.rules.push('\n');
                }
                Component::Other { kind, .. } => {
                    debug!("object {}: no style rule for {:?} component", object.name, kind);
                }
            }
        }
    }

    sheet
}

/// Render the complete stylesheet as one string, body rule first.
pub fn render_styles(page: &Page, materials: &MaterialIndex) -> String {
    render_style_sheet(page, materials).to_string()
}
