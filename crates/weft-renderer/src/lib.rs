//! Markdown rendering with recursive node reference expansion.
//!
//! Documents link to content units with `node:` destinations. This crate
//! renders such a document to a single HTML string, embedding referenced
//! content inline up to configurable budgets.
//!
//! # Architecture
//!
//! - [`DocumentRenderer`] drives a render. Markdown goes through
//!   `pulldown-cmark`; node links are intercepted on the event stream and
//!   replaced with display-mode markup (inline, stretch, overlay, footnote,
//!   sidenote, margin, panel).
//! - [`ExpansionConfig`] bounds the recursion: expansion depth, characters
//!   per reference, references per document.
//! - Rendering never fails. A missing target, a reference cycle or an
//!   exhausted budget degrades to a badge in the markup and a warning on
//!   [`RenderOutput`], and the same input always produces the same output.
//!
//! # Example
//!
//! ```
//! use weft_index::{ContentUnit, MemoryIndex};
//! use weft_renderer::DocumentRenderer;
//!
//! let index = MemoryIndex::new()
//!     .with_unit(ContentUnit::new("intro", "Intro", "Hello from the intro."));
//! let output = DocumentRenderer::new(&index)
//!     .render("Start at [the intro](node:intro?display=overlay).");
//! assert!(output.warnings.is_empty());
//! ```

mod config;
mod context;
mod display;
mod engine;
mod escape;
mod markdown;
mod reference;
mod registry;
mod template;

pub use config::{
    DEFAULT_MAX_CHARS_PER_REFERENCE, DEFAULT_MAX_DEPTH, DEFAULT_MAX_REFERENCES_PER_DOCUMENT,
    ExpansionConfig,
};
pub use engine::{DocumentRenderer, RenderOutput, render};
pub use escape::escape_html;
pub use reference::{DisplayMode, NODE_SCHEME, NodeReference};
