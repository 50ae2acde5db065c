//! One compile request end to end: fetch, compile, write.

use std::path::PathBuf;

use log::{debug, info};

use crate::compiler::{compile, CompiledSite};
use crate::sink::OutputSink;
use crate::source::PayloadSource;
use crate::template::TemplateSet;
use crate::Result;

/// Runs compile requests against a payload source and an output sink.
///
/// Templates are resolved on every run so edits to template files are picked
/// up without restarting a long-running server.
pub struct CompileService<S, K> {
    source: S,
    sink: K,
    html_template: Option<PathBuf>,
    css_template: Option<PathBuf>,
}

impl<S: PayloadSource, K: OutputSink> CompileService<S, K> {
    /// A service using the bundled templates.
    pub fn new(source: S, sink: K) -> Self {
        Self {
            source,
            sink,
            html_template: None,
            css_template: None,
        }
    }

    /// Use template files instead of the bundled templates. `None` keeps the
    /// bundled template for that artifact.
    pub fn with_templates(mut self, html: Option<PathBuf>, css: Option<PathBuf>) -> Self {
        self.html_template = html;
        self.css_template = css;
        self
    }

    /// Fetch, compile and write one page. The sink is only touched when every
    /// earlier step succeeded.
    pub fn run(&mut self) -> Result<CompiledSite> {
        debug!("compile requested from {}", self.source.describe());
        let payload = self.source.fetch()?;
        let templates =
            TemplateSet::resolve(self.html_template.as_deref(), self.css_template.as_deref())?;
        let site = compile(&payload, &templates)?;
        self.sink.write(&site)?;
        info!("page {} compiled, digest {}", site.page_name, site.digest());
        Ok(site)
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageEntry, ProjectPayload};
    use crate::sink::MemorySink;
    use crate::Error;

    struct Fixed(ProjectPayload);

    impl PayloadSource for Fixed {
        fn fetch(&self) -> Result<ProjectPayload> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "fixed".into()
        }
    }

    struct Failing;

    impl PayloadSource for Failing {
        fn fetch(&self) -> Result<ProjectPayload> {
            Err(Error::FetchError("connection refused".into()))
        }

        fn describe(&self) -> String {
            "failing".into()
        }
    }

    fn one_page() -> ProjectPayload {
        let mut p = ProjectPayload::default();
        p.page_listing.pages.push(PageEntry {
            name: "Home".into(),
            ..Default::default()
        });
        p
    }

    #[test]
    fn run_writes_to_sink() {
        let mut service = CompileService::new(Fixed(one_page()), MemorySink::new());
        let site = service.run().expect("run");
        assert_eq!(site.page_name, "Home");
        assert!(site.html.contains("<title>Home</title>"));
        assert_eq!(service.sink().sites.len(), 1);
    }

    #[test]
    fn fetch_failure_leaves_sink_untouched() {
        let mut service = CompileService::new(Failing, MemorySink::new());
        assert!(matches!(service.run(), Err(Error::FetchError(_))));
        assert!(service.sink().sites.is_empty());
    }

    #[test]
    fn empty_listing_leaves_sink_untouched() {
        let mut service = CompileService::new(Fixed(ProjectPayload::default()), MemorySink::new());
        assert!(matches!(service.run(), Err(Error::EmptyPageListing)));
        assert!(service.sink().sites.is_empty());
    }

    #[test]
    fn missing_template_leaves_sink_untouched() {
        let mut service = CompileService::new(Fixed(one_page()), MemorySink::new())
            .with_templates(Some(PathBuf::from("/nonexistent/page.html")), None);
        assert!(matches!(service.run(), Err(Error::TemplateLoadError(_))));
        let (_, sink) = service.into_parts();
        assert!(sink.sites.is_empty());
    }
}
