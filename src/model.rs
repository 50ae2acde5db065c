//! Project payload data model.
//!
//! These types mirror the JSON document served by the design tool's project
//! API. Every field falls back to its zero value when absent so that a sparse
//! or partially populated project still decodes; structural problems (such as
//! an empty page listing) are caught later by the compiler.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

// The project API emits `null` for unset values; treat it like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// An RGBA tint. Channels are meant to lie in `0..=255` but are not clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Color {
    #[serde(deserialize_with = "null_as_default")]
    pub r: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub g: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub b: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub a: i64,
}

impl Color {
    pub fn new(r: i64, g: i64, b: i64, a: i64) -> Self {
        Self { r, g, b, a }
    }
}

/// A named visual resource: a diffuse image reference plus a tint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// URI or path of the diffuse image asset
    #[serde(deserialize_with = "null_as_default")]
    pub diffuse: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tint: Color,
}

impl Material {
    pub fn new(name: impl Into<String>, diffuse: impl Into<String>, tint: Color) -> Self {
        Self {
            name: name.into(),
            diffuse: diffuse.into(),
            tint,
        }
    }
}

/// Text content rendered as a single element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextComponent {
    pub name: String,
    /// Element tag to emit, e.g. `p` or `h1`
    pub paragraph_tag: String,
    pub text_content: String,
    pub font_size_px: i64,
}

/// An image whose source is resolved through a material.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpriteComponent {
    pub name: String,
    pub width_px: i64,
    pub height_px: i64,
    pub material_name: String,
}

/// The smallest renderable unit of a page object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawComponent", into = "RawComponent")]
pub enum Component {
    Text(TextComponent),
    Sprite(SpriteComponent),
    /// A component type the compiler does not render
    Other { name: String, kind: String },
}

impl Component {
    /// The `type` tag this component carries on the wire.
    pub fn kind(&self) -> &str {
        match self {
            Component::Text(_) => "text",
            Component::Sprite(_) => "sprite",
            Component::Other { kind, .. } => kind,
        }
    }
}

// Flat wire shape shared by every component type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawComponent {
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    kind: String,
    #[serde(rename = "paragraphType", deserialize_with = "null_as_default")]
    paragraph_type: String,
    #[serde(rename = "textContent", deserialize_with = "null_as_default")]
    text_content: String,
    #[serde(rename = "font-Size", deserialize_with = "null_as_default")]
    font_size: i64,
    #[serde(deserialize_with = "null_as_default")]
    width: i64,
    #[serde(deserialize_with = "null_as_default")]
    height: i64,
    #[serde(rename = "materialName", deserialize_with = "null_as_default")]
    material_name: String,
}

impl From<RawComponent> for Component {
    fn from(raw: RawComponent) -> Self {
        match raw.kind.as_str() {
            "text" => Component::Text(TextComponent {
                name: raw.name,
                paragraph_tag: raw.paragraph_type,
                text_content: raw.text_content,
                font_size_px: raw.font_size,
            }),
            "sprite" => Component::Sprite(SpriteComponent {
                name: raw.name,
                width_px: raw.width,
                height_px: raw.height,
                material_name: raw.material_name,
            }),
            _ => Component::Other {
                name: raw.name,
                kind: raw.kind,
            },
        }
    }
}

impl From<Component> for RawComponent {
    fn from(component: Component) -> Self {
        match component {
            Component::Text(t) => RawComponent {
                name: t.name,
                kind: "text".to_string(),
                paragraph_type: t.paragraph_tag,
                text_content: t.text_content,
                font_size: t.font_size_px,
                ..Default::default()
            },
            Component::Sprite(s) => RawComponent {
                name: s.name,
                kind: "sprite".to_string(),
                width: s.width_px,
                height: s.height_px,
                material_name: s.material_name,
                ..Default::default()
            },
            Component::Other { name, kind } => RawComponent {
                name,
                kind,
                ..Default::default()
            },
        }
    }
}

/// A named group of components; the name doubles as the CSS class stem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageObject {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub components: Vec<Component>,
}

/// Page-level settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub width: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub height: i64,
    /// Material whose tint becomes the page background
    #[serde(rename = "materialName", deserialize_with = "null_as_default")]
    pub background_material: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    #[serde(rename = "pageConfig", deserialize_with = "null_as_default")]
    pub config: PageConfig,
    #[serde(deserialize_with = "null_as_default")]
    pub objects: Vec<PageObject>,
}

/// One entry of the project's page listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub file: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageListing {
    #[serde(deserialize_with = "null_as_default")]
    pub pages: Vec<PageEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectData {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub page: Page,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialList {
    #[serde(deserialize_with = "null_as_default")]
    pub materials: Vec<Material>,
}

/// The decoded project document consumed by one compile call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectPayload {
    /// Set by the project API when it could not assemble the project
    #[serde(deserialize_with = "null_as_default")]
    pub error: bool,
    #[serde(rename = "projectPages", deserialize_with = "null_as_default")]
    pub page_listing: PageListing,
    #[serde(rename = "pageData", deserialize_with = "null_as_default")]
    pub project: ProjectData,
    #[serde(rename = "materialsData", deserialize_with = "null_as_default")]
    pub materials: MaterialList,
}

impl ProjectPayload {
    /// Decode a payload from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::DecodeError(e.to_string()))
    }

    /// Decode a payload from raw response bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| Error::DecodeError(e.to_string()))
    }

    pub fn page(&self) -> &Page {
        &self.project.page
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials.materials
    }

    /// The first listed page, which is the one being compiled.
    pub fn first_page(&self) -> Option<&PageEntry> {
        self.page_listing.pages.first()
    }
}
