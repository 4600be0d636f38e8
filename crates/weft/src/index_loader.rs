//! Filesystem loading of content units.

use std::fs;
use std::path::{Path, PathBuf};

use weft_index::{ContentUnit, MemoryIndex};

use crate::error::CliError;

/// Load every markdown file under `root` into an in-memory index.
///
/// Unit ids are `/`-separated relative paths with the `.md` extension
/// dropped, so `guides/setup.md` becomes `guides/setup`. Loading happens
/// up front; rendering itself stays free of I/O.
pub(crate) fn load_index(root: &Path) -> Result<MemoryIndex, CliError> {
    let mut files = Vec::new();
    collect_markdown(root, &mut files)?;
    // Insertion order does not affect lookups, but deterministic logs help.
    files.sort();

    if files.is_empty() {
        return Err(CliError::IndexEmpty(root.to_path_buf()));
    }

    let mut index = MemoryIndex::new();
    for path in files {
        let source = fs::read_to_string(&path)?;
        let id = unit_id(root, &path);
        tracing::debug!(id = %id, path = %path.display(), "loaded content unit");
        index.insert(content_unit(&id, &source));
    }
    Ok(index)
}

fn collect_markdown(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), CliError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_markdown(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    Ok(())
}

/// Relative path with the extension dropped, `/`-separated on every platform.
fn unit_id(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .with_extension("")
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Build a unit from raw markdown.
///
/// The first non-empty line provides the title when it is a `#` heading and
/// is then dropped from the body; otherwise the id doubles as the title and
/// the body is the whole file.
fn content_unit(id: &str, source: &str) -> ContentUnit {
    match leading_title(source) {
        Some((title, body)) => ContentUnit::new(id, title, body).with_full_source(source),
        None => ContentUnit::new(id, id, source),
    }
}

fn leading_title(source: &str) -> Option<(&str, &str)> {
    let mut rest = source;
    loop {
        let (line, tail) = match rest.split_once('\n') {
            Some((line, tail)) => (line, tail),
            None => (rest, ""),
        };
        if line.trim().is_empty() {
            if tail.is_empty() {
                return None;
            }
            rest = tail;
            continue;
        }
        let title = line.trim().strip_prefix("# ")?;
        return Some((title.trim(), tail.trim_start_matches(['\r', '\n'])));
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use weft_index::ContentIndex;

    use super::*;

    #[test]
    fn test_load_index_walks_recursively() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("intro.md"), "# Intro\n\nHello.").unwrap();
        fs::create_dir(dir.path().join("guides")).unwrap();
        fs::write(dir.path().join("guides/setup.md"), "# Setup\n\nSteps.").unwrap();

        let index = load_index(dir.path()).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.ids(), vec!["guides/setup", "intro"]);
    }

    #[test]
    fn test_title_and_body_split() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("intro.md"), "\n# Intro\n\nHello from the intro.").unwrap();

        let index = load_index(dir.path()).unwrap();
        let unit = index.get("intro").unwrap();

        assert_eq!(unit.title, "Intro");
        assert_eq!(unit.raw_body, "Hello from the intro.");
        assert_eq!(unit.full_source, "\n# Intro\n\nHello from the intro.");
    }

    #[test]
    fn test_unit_without_heading_keeps_whole_body() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("note.md"), "Just a body.").unwrap();

        let index = load_index(dir.path()).unwrap();
        let unit = index.get("note").unwrap();

        assert_eq!(unit.title, "note");
        assert_eq!(unit.raw_body, "Just a body.");
    }

    #[test]
    fn test_non_markdown_files_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("intro.md"), "body").unwrap();
        fs::write(dir.path().join("notes.txt"), "not loaded").unwrap();

        let index = load_index(dir.path()).unwrap();

        assert_eq!(index.ids(), vec!["intro"]);
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_index(dir.path()).unwrap_err();

        assert!(matches!(err, CliError::IndexEmpty(_)));
    }

    #[test]
    fn test_subheadings_stay_in_body() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("doc.md"), "# Title\n\n## Section\n\nText.").unwrap();

        let index = load_index(dir.path()).unwrap();
        let unit = index.get("doc").unwrap();

        assert_eq!(unit.title, "Title");
        assert_eq!(unit.raw_body, "## Section\n\nText.");
    }
}
