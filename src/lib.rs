//! Sitecompiler
//!
//! Compiles a page authored in the visual design tool into a static website:
//! one HTML document and one matching CSS stylesheet.
//!
//! A compile request flows one way:
//!
//! - a [`PayloadSource`](source::PayloadSource) produces a decoded
//!   [`ProjectPayload`](model::ProjectPayload),
//! - [`compile`](compiler::compile) builds the material index, renders the
//!   body markup and the stylesheet and substitutes them into the outer
//!   templates,
//! - an [`OutputSink`](sink::OutputSink) persists the two artifacts.
//!
//! # Features
//!
//! - **http** (default): fetch payloads from the project API with reqwest
//! - **server** (default): expose `POST /api/make-website` with tiny_http
//!
//! # Example
//!
//! ```
//! use sitecompiler::{compile, ProjectPayload, TemplateSet};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let payload = ProjectPayload::from_json(r#"{
//!     "projectPages": { "pages": [ { "name": "Home" } ] },
//!     "pageData": { "page": { "objects": [
//!         { "name": "Title", "components": [
//!             { "type": "text", "paragraphType": "h1", "textContent": "Hello", "font-Size": 24 }
//!         ] }
//!     ] } }
//! }"#)?;
//!
//! let site = compile(&payload, &TemplateSet::builtin())?;
//! assert!(site.html.contains("<h1 class=\"TitleClass\" >Hello</h1>"));
//! assert!(site.css.contains("font-size: 24px;"));
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod compiler;
pub mod materials;
pub mod model;
pub mod rendering;
pub mod sink;
pub mod source;
pub mod template;

pub mod service;

// HTTP trigger surface
#[cfg(feature = "server")]
pub mod server;

pub use compiler::{compile, compile_json, CompiledSite};
pub use materials::MaterialIndex;
pub use model::ProjectPayload;
pub use service::CompileService;
pub use sink::{DirSink, MemorySink, OutputSink};
pub use source::{FileSource, PayloadSource};
pub use template::{substitute, TemplateSet};

#[cfg(feature = "http")]
pub use source::HttpSource;

#[cfg(feature = "server")]
pub use server::CompileServer;

/// Configuration for fetching, compiling and writing a site
///
/// The defaults match the design tool's local deployment: the project API on
/// port 7000, the compile trigger on port 8200 and output written to
/// `Resources/index.html` and `Resources/Page.css`.
///
/// # Examples
///
/// ```
/// let cfg = sitecompiler::CompilerConfig::default();
/// assert_eq!(cfg.html_file_name, "index.html");
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Project API endpoint returning the project JSON
    pub source_url: String,
    /// User agent string to send with requests
    pub user_agent: String,
    /// Timeout for the payload fetch in milliseconds
    pub timeout_ms: u64,
    /// Extra HTTP headers for the payload fetch
    pub headers: HashMap<String, String>,
    /// HTML template file; the bundled template is used when unset
    pub html_template: Option<PathBuf>,
    /// CSS template file; the bundled template is used when unset
    pub css_template: Option<PathBuf>,
    /// Directory receiving the compiled files
    pub output_dir: PathBuf,
    pub html_file_name: String,
    /// Stylesheet file name. The HTML template links its stylesheet by a
    /// literal path (`Page.css` in the bundled template), so a custom name
    /// needs a custom `html_template` linking the same file.
    pub css_file_name: String,
    /// Address the compile trigger listens on
    pub bind_addr: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            source_url:
                "http://127.0.0.1:7000/api/design-tool-manager/get-project-json-data/local/TestProject"
                    .to_string(),
            user_agent: format!("sitecompiler/{}", env!("CARGO_PKG_VERSION")),
            timeout_ms: 30000,
            headers: HashMap::new(),
            html_template: None,
            css_template: None,
            output_dir: PathBuf::from("Resources"),
            html_file_name: "index.html".to_string(),
            css_file_name: "Page.css".to_string(),
            bind_addr: "127.0.0.1:8200".to_string(),
        }
    }
}

impl CompilerConfig {
    /// Read a JSON config file; missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::ConfigError(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&text)
            .map_err(|e| Error::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// Check every setting, including the project API endpoint.
    pub fn validate(&self) -> Result<()> {
        self.validate_source()?;
        self.validate_output()
    }

    /// Check the settings used when fetching from the project API.
    pub fn validate_source(&self) -> Result<()> {
        let url = url::Url::parse(&self.source_url)
            .map_err(|e| Error::ConfigError(format!("source_url {:?}: {}", self.source_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::ConfigError(format!(
                "source_url must be http or https, got {}",
                url.scheme()
            )));
        }
        if self.timeout_ms == 0 {
            return Err(Error::ConfigError("timeout_ms must be greater than zero".into()));
        }
        Ok(())
    }

    /// Check the output file settings; enough for builds from a local file.
    pub fn validate_output(&self) -> Result<()> {
        if self.html_file_name.trim().is_empty() || self.css_file_name.trim().is_empty() {
            return Err(Error::ConfigError("output file names must not be empty".into()));
        }
        if self.html_file_name == self.css_file_name {
            return Err(Error::ConfigError(
                "html_file_name and css_file_name must differ".into(),
            ));
        }
        Ok(())
    }

    /// Output sink for this configuration
    pub fn dir_sink(&self) -> DirSink {
        DirSink::new(&self.output_dir, &self.html_file_name, &self.css_file_name)
    }
}

/// Build a compile service that fetches from the project API and writes into
/// the configured output directory.
#[cfg(feature = "http")]
pub fn new_service(config: &CompilerConfig) -> Result<CompileService<HttpSource, DirSink>> {
    config.validate()?;
    let source = HttpSource::new(config)?;
    Ok(CompileService::new(source, config.dir_sink())
        .with_templates(config.html_template.clone(), config.css_template.clone()))
}
