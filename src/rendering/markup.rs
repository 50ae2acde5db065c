/// HTML body rendering

use log::debug;

use super::class_name;
use crate::materials::MaterialIndex;
use crate::model::{Component, Page};

/// Render the page's components as HTML elements, one per line.
///
/// Text and attribute values are inserted verbatim, without escaping.
pub fn render_body(page: &Page, materials: &MaterialIndex) -> String {
    let mut body = String::new();
    if page.objects.is_empty() {
        return body;
    }

    for object in &page.objects {
        let class = class_name(object);
        for component in &object.components {
            match component {
                Component::Text(text) => {
                    body.push_str(&format!(
                        "<{tag} class=\"{class}\" >{content}</{tag}>\n",
                        tag = text.paragraph_tag,
                        class = class,
                        content = text.text_content,
                    ));
                }
                Component::Sprite(sprite) => {
                    let src = match materials.lookup(&sprite.material_name) {
                        Some(material) => material.diffuse.as_str(),
                        None => {
                            debug!(
                                "object {}: material {:?} not found, leaving image source empty",
                                object.name, sprite.material_name
                            );
                            ""
                        }
                    };
                    body.push_str(&format!("<img class=\"{}\" src=\"{}\"/>\n", class, src));
                }
                Component::Other { kind, .. } => {
                    debug!("object {}: skipping {:?} component", object.name, kind);
                }
            }
        }
    }

    body
}
