//! Where project payloads come from.
//!
//! The compiler itself never performs I/O; a `PayloadSource` hands it an
//! already decoded `ProjectPayload`.

use std::fs;
use std::path::PathBuf;

use log::info;

use crate::model::ProjectPayload;
use crate::{Error, Result};

#[cfg(feature = "http")]
use crate::CompilerConfig;
#[cfg(feature = "http")]
use reqwest::blocking::Client;
#[cfg(feature = "http")]
use std::collections::HashMap;
#[cfg(feature = "http")]
use std::time::Duration;

/// Produces the payload for one compile request.
pub trait PayloadSource {
    /// Retrieve and decode a project payload. No retries are attempted.
    fn fetch(&self) -> Result<ProjectPayload>;

    /// Human-readable origin, used in logs
    fn describe(&self) -> String;
}

impl<S: PayloadSource + ?Sized> PayloadSource for Box<S> {
    fn fetch(&self) -> Result<ProjectPayload> {
        (**self).fetch()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Fetches the project JSON from the design tool's project API.
#[cfg(feature = "http")]
pub struct HttpSource {
    client: Client,
    url: String,
    user_agent: String,
    headers: HashMap<String, String>,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(config: &CompilerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.source_url.clone(),
            user_agent: config.user_agent.clone(),
            headers: config.headers.clone(),
        })
    }
}

#[cfg(feature = "http")]
impl PayloadSource for HttpSource {
    fn fetch(&self) -> Result<ProjectPayload> {
        let mut request = self
            .client
            .get(&self.url)
            .header("User-Agent", self.user_agent.clone());
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let resp = request
            .send()
            .map_err(|e| Error::FetchError(format!("GET {} failed: {}", self.url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::FetchError(format!(
                "GET {} returned {}",
                self.url, status
            )));
        }

        let body = resp
            .bytes()
            .map_err(|e| Error::FetchError(format!("Failed to read response body: {}", e)))?;
        info!("fetched {} bytes of project data from {}", body.len(), self.url);

        ProjectPayload::from_slice(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads a previously exported project JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PayloadSource for FileSource {
    fn fetch(&self) -> Result<ProjectPayload> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| Error::FetchError(format!("{}: {}", self.path.display(), e)))?;
        info!("read project data from {}", self.path.display());
        ProjectPayload::from_json(&text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
