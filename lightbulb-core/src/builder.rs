//! Fragment builder: renders every source document into the build tree.

use crate::config::Config;
use crate::discovery::list_sources;
use crate::error::{DocumentError, PipelineError};
use crate::parser::DocumentParser;
use crate::paths::PathResolver;
use crate::record::Assembler;
use crate::report::{ClaimSet, RunReport};
use std::fs;
use std::path::Path;

pub struct Builder {
    config: Config,
    assembler: Assembler,
}

impl Builder {
    pub fn new(config: Config) -> Self {
        let assembler = Assembler::new(PathResolver::new(&config), DocumentParser::new());
        Self { config, assembler }
    }

    /// Render and write the fragment of every discovered source
    ///
    /// A document that fails to read or render is reported and skipped,
    /// unless `fail_fast` is set. Two sources resolving to the same slug or
    /// fragment path abort the run before the second is written.
    pub fn run(&self) -> Result<RunReport, PipelineError> {
        let resolver = self.assembler.resolver();
        let mut report = RunReport::default();
        let mut slugs = ClaimSet::default();
        let mut outputs = ClaimSet::default();

        tracing::info!("Building fragments from {:?}", resolver.source_dir());

        for source in list_sources(resolver.source_dir()) {
            let slug = resolver.slug(&source);
            let fragment_abspath = resolver.fragment_abspath(&source);

            slugs
                .claim(&slug, &source)
                .map_err(|first| PipelineError::PathCollision {
                    slug: slug.clone(),
                    first,
                    second: source.clone(),
                })?;
            outputs
                .claim(&fragment_abspath.to_string_lossy(), &source)
                .map_err(|first| PipelineError::PathCollision {
                    slug: slug.clone(),
                    first,
                    second: source.clone(),
                })?;

            let fragment = match self.assembler.build_fragment(&source) {
                Ok(fragment) => fragment,
                Err(err) => {
                    self.handle_failure(&mut report, err)?;
                    continue;
                }
            };

            write_fragment(&fragment_abspath, &fragment)?;
            tracing::debug!("Wrote {:?}", fragment_abspath);
            report.processed.push(slug);
        }

        tracing::info!(
            "Done. {} fragments written, {} failed",
            report.processed.len(),
            report.failures.len()
        );
        Ok(report)
    }

    fn handle_failure(&self, report: &mut RunReport, err: DocumentError) -> Result<(), PipelineError> {
        if self.config.fail_fast {
            tracing::error!("{}", err);
            return Err(err.into());
        }
        report.record_failure(err);
        Ok(())
    }
}

/// Write `fragment` plus a trailing newline, creating parent directories
fn write_fragment(path: &Path, fragment: &str) -> Result<(), PipelineError> {
    let write_err = |source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, format!("{}\n", fragment)).map_err(write_err)
}
