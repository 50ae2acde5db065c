//! Outer HTML/CSS templates and placeholder substitution.

use std::fs;
use std::path::Path;

use log::debug;

use crate::{Error, Result};

/// Page title in the HTML template
pub const NAME_TOKEN: &str = "{name}";
/// Rendered body markup in the HTML template
pub const BODY_TOKEN: &str = "{body}";
/// Page-level `body` rule in the CSS template
pub const BODY_CSS_TOKEN: &str = "{bodyCss}";
/// Per-component rules in the CSS template
pub const CSS_TOKEN: &str = "{css}";

const BUILTIN_HTML: &str = include_str!("templates/page.html");
const BUILTIN_CSS: &str = include_str!("templates/page.css");

/// Replace placeholder tokens in a single left-to-right pass.
///
/// Inserted values are never rescanned, so a value that happens to contain a
/// token is emitted as-is. When several tokens match at the same position the
/// one listed first wins. Tokens not present in `placeholders` are left alone.
pub fn substitute(template: &str, placeholders: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    'scan: while !rest.is_empty() {
        for (token, value) in placeholders {
            if !token.is_empty() && rest.starts_with(token) {
                out.push_str(value);
                rest = &rest[token.len()..];
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            out.push(ch);
        }
        rest = chars.as_str();
    }

    out
}

/// The pair of outer templates a page is compiled into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    pub html: String,
    pub css: String,
}

impl TemplateSet {
    pub fn new(html: impl Into<String>, css: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
        }
    }

    /// Templates bundled with the crate.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_HTML, BUILTIN_CSS)
    }

    /// Read both templates from disk.
    pub fn load(html_path: &Path, css_path: &Path) -> Result<Self> {
        Ok(Self {
            html: read_template(html_path)?,
            css: read_template(css_path)?,
        })
    }

    /// Load the templates that have a path, falling back to the bundled ones
    /// for the others.
    pub fn resolve(html_path: Option<&Path>, css_path: Option<&Path>) -> Result<Self> {
        let html = match html_path {
            Some(p) => read_template(p)?,
            None => BUILTIN_HTML.to_string(),
        };
        let css = match css_path {
            Some(p) => read_template(p)?,
            None => BUILTIN_CSS.to_string(),
        };
        Ok(Self { html, css })
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::builtin()
    }
}

fn read_template(path: &Path) -> Result<String> {
    debug!("loading template {}", path.display());
    fs::read_to_string(path)
        .map_err(|e| Error::TemplateLoadError(format!("{}: {}", path.display(), e)))
}
