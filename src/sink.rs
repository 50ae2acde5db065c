//! Destinations for compiled artifacts.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use crate::compiler::CompiledSite;
use crate::{Error, Result};

/// Receives the artifacts of a successful compile.
pub trait OutputSink {
    fn write(&mut self, site: &CompiledSite) -> Result<()>;
}

impl<K: OutputSink + ?Sized> OutputSink for Box<K> {
    fn write(&mut self, site: &CompiledSite) -> Result<()> {
        (**self).write(site)
    }
}

/// Writes the HTML document and stylesheet into a directory.
#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
    html_file_name: String,
    css_file_name: String,
}

impl DirSink {
    pub fn new(
        dir: impl Into<PathBuf>,
        html_file_name: impl Into<String>,
        css_file_name: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            html_file_name: html_file_name.into(),
            css_file_name: css_file_name.into(),
        }
    }

    pub fn html_path(&self) -> PathBuf {
        self.dir.join(&self.html_file_name)
    }

    pub fn css_path(&self) -> PathBuf {
        self.dir.join(&self.css_file_name)
    }
}

impl OutputSink for DirSink {
    fn write(&mut self, site: &CompiledSite) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| Error::OutputError(format!("{}: {}", self.dir.display(), e)))?;

        let html_path = self.html_path();
        let css_path = self.css_path();
        write_file(&html_path, &site.html)?;
        write_file(&css_path, &site.css)?;

        info!(
            "wrote {} and {} (digest {})",
            html_path.display(),
            css_path.display(),
            site.digest()
        );
        Ok(())
    }
}

// The handle is dropped (and the file closed) on every return path.
fn write_file(path: &Path, contents: &str) -> Result<()> {
    let mut file = File::create(path)
        .map_err(|e| Error::OutputError(format!("{}: {}", path.display(), e)))?;
    file.write_all(contents.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| Error::OutputError(format!("{}: {}", path.display(), e)))
}

/// Keeps compiled sites in memory, newest last.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub sites: Vec<CompiledSite>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&CompiledSite> {
        self.sites.last()
    }
}

impl OutputSink for MemorySink {
    fn write(&mut self, site: &CompiledSite) -> Result<()> {
        self.sites.push(site.clone());
        Ok(())
    }
}
