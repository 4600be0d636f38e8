//! `weft render` command implementation.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use weft_index::ContentIndex;
use weft_renderer::{DocumentRenderer, ExpansionConfig};

use crate::error::CliError;
use crate::index_loader::load_index;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Id of the content unit to render (relative path without `.md`).
    entry: String,

    /// Directory holding the markdown content units.
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit a JSON report with html and warnings instead of raw HTML.
    #[arg(long)]
    json: bool,

    /// Maximum expansion depth.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Maximum characters embedded per reference.
    #[arg(long)]
    max_chars: Option<usize>,

    /// Maximum references expanded per document.
    #[arg(long)]
    max_refs: Option<usize>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        tracing::info!(root = %self.root.display(), entry = %self.entry, "loading content index");
        let index = load_index(&self.root)?;
        let unit = index
            .get(&self.entry)
            .ok_or_else(|| CliError::EntryNotFound(self.entry.clone()))?;

        let result = DocumentRenderer::new(&index)
            .with_config(self.expansion_config())
            .render(&unit.full_source);

        for warning in &result.warnings {
            output.warning(warning);
        }

        if self.json {
            let report = serde_json::to_string_pretty(&result)?;
            self.write(report.as_bytes())?;
        } else {
            self.write(result.html.as_bytes())?;
        }

        if let Some(path) = &self.output {
            output.success(&format!("Rendered {} to {}", self.entry, path.display()));
        }
        Ok(())
    }

    /// Default budgets with any command-line overrides applied.
    fn expansion_config(&self) -> ExpansionConfig {
        let mut config = ExpansionConfig::new();
        if let Some(depth) = self.max_depth {
            config = config.with_max_depth(depth);
        }
        if let Some(chars) = self.max_chars {
            config = config.with_max_chars_per_reference(chars);
        }
        if let Some(refs) = self.max_refs {
            config = config.with_max_references_per_document(refs);
        }
        config
    }

    fn write(&self, bytes: &[u8]) -> Result<(), CliError> {
        match &self.output {
            Some(path) => fs::write(path, bytes)?,
            None => std::io::stdout().lock().write_all(bytes)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use weft_renderer::{
        DEFAULT_MAX_CHARS_PER_REFERENCE, DEFAULT_MAX_DEPTH, DEFAULT_MAX_REFERENCES_PER_DOCUMENT,
    };

    use super::*;

    fn args() -> RenderArgs {
        RenderArgs {
            entry: "intro".to_owned(),
            root: PathBuf::from("."),
            output: None,
            json: false,
            max_depth: None,
            max_chars: None,
            max_refs: None,
            verbose: false,
        }
    }

    #[test]
    fn test_config_defaults_without_overrides() {
        let config = args().expansion_config();

        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.max_chars_per_reference, DEFAULT_MAX_CHARS_PER_REFERENCE);
        assert_eq!(
            config.max_references_per_document,
            DEFAULT_MAX_REFERENCES_PER_DOCUMENT
        );
    }

    #[test]
    fn test_config_applies_overrides() {
        let mut overridden = args();
        overridden.max_depth = Some(1);
        overridden.max_chars = Some(100);
        overridden.max_refs = Some(5);

        let config = overridden.expansion_config();

        assert_eq!(config.max_depth, 1);
        assert_eq!(config.max_chars_per_reference, 100);
        assert_eq!(config.max_references_per_document, 5);
    }
}
