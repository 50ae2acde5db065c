//! Compiles one project payload into an HTML document and a stylesheet.

use log::{info, warn};
use sha2::{Digest, Sha256};

use crate::materials::MaterialIndex;
use crate::model::ProjectPayload;
use crate::rendering::{render_body, render_style_sheet};
use crate::template::{substitute, TemplateSet, BODY_CSS_TOKEN, BODY_TOKEN, CSS_TOKEN, NAME_TOKEN};
use crate::{Error, Result};

/// The two artifacts produced for a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSite {
    /// Name of the compiled (first listed) page
    pub page_name: String,
    pub html: String,
    pub css: String,
}

impl CompiledSite {
    /// Hex SHA-256 over both artifacts; equal payloads and templates always
    /// produce equal digests.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.html.as_bytes());
        hasher.update([0u8]);
        hasher.update(self.css.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Compile the first listed page of `payload` into `templates`.
///
/// Fails without producing any output when the project API flagged the
/// payload as an error or when the page listing is empty. Missing materials
/// and unknown component types only degrade the rendered result.
pub fn compile(payload: &ProjectPayload, templates: &TemplateSet) -> Result<CompiledSite> {
    if payload.error {
        return Err(Error::FetchError(
            "project service flagged the payload as an error".into(),
        ));
    }
    let page_name = payload
        .first_page()
        .ok_or(Error::EmptyPageListing)?
        .name
        .clone();

    let index = MaterialIndex::build(payload.materials().iter().cloned());
    let page = payload.page();
    if page.objects.is_empty() {
        warn!("page {} has no content", page_name);
    }

    let body = render_body(page, &index);
    let sheet = render_style_sheet(page, &index);

    let html = substitute(
        &templates.html,
        &[(NAME_TOKEN, page_name.as_str()), (BODY_TOKEN, body.as_str())],
    );
    let css = substitute(
        &templates.css,
        &[(BODY_CSS_TOKEN, sheet.body.as_str()), (CSS_TOKEN, sheet.rules.as_str())],
    );

    info!(
        "compiled page {} ({} objects, {} materials)",
        page_name,
        page.objects.len(),
        index.len()
    );

    Ok(CompiledSite {
        page_name,
        html,
        css,
    })
}

/// Decode a JSON payload and compile it.
pub fn compile_json(json: &str, templates: &TemplateSet) -> Result<CompiledSite> {
    let payload = ProjectPayload::from_json(json)?;
    compile(&payload, templates)
}
