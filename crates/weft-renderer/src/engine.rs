//! Recursive node reference expansion.
//!
//! A reference resolves in a fixed order: missing target, cycle, depth
//! budget, document budget, then expansion. Every failed check degrades to
//! a badge in the output plus a warning on the context; rendering itself
//! never fails. Triggers embed their content server-side where possible and
//! deferred triggers carry nested templates for the client to unfold.

use weft_index::{ContentIndex, ContentUnit};

use crate::config::ExpansionConfig;
use crate::context::ExpansionContext;
use crate::display::{self, Expanded};
use crate::markdown::{self, Nesting};
use crate::reference::{DisplayMode, NodeReference};
use crate::template;

/// Cut `source` after `max_chars` characters, on a char boundary.
pub(crate) fn truncate_chars(source: &str, max_chars: usize) -> (&str, bool) {
    match source.char_indices().nth(max_chars) {
        Some((idx, _)) => (&source[..idx], true),
        None => (source, false),
    }
}

/// Expand one node reference found at `current_depth`.
///
/// The document sits at depth 0, so references in the document body arrive
/// here with depth 1. Returns replacement markup for the whole link.
pub(crate) fn expand(
    reference: &NodeReference,
    link_text: &str,
    current_depth: usize,
    ctx: &mut ExpansionContext,
    index: &dyn ContentIndex,
) -> String {
    let target_id = reference.target_id.as_str();

    let Some(unit) = index.get(target_id) else {
        tracing::warn!(target_id = %target_id, "node reference target not found");
        ctx.warn(format!("Node reference target not found: {target_id}"));
        return display::missing_badge(target_id, link_text);
    };

    // Cycles outrank the depth check so a self-referential chain reports
    // what it is instead of a depth limit.
    if ctx.is_active(target_id) {
        tracing::warn!(target_id = %target_id, "reference cycle detected");
        ctx.warn(format!("Reference cycle detected: {target_id}"));
        let anchor = ctx.embed_anchor(target_id);
        return display::cycle_badge(target_id, link_text, anchor);
    }

    if current_depth > ctx.config.max_depth {
        tracing::warn!(
            target_id = %target_id,
            max_depth = ctx.config.max_depth,
            "expansion depth exceeded"
        );
        ctx.warn(format!(
            "Maximum expansion depth ({}) exceeded at: {target_id}",
            ctx.config.max_depth
        ));
        return display::depth_badge(target_id, link_text);
    }

    if ctx.expanded_count >= ctx.config.max_references_per_document {
        tracing::warn!(
            target_id = %target_id,
            max_references = ctx.config.max_references_per_document,
            "reference budget exhausted"
        );
        ctx.warn(format!(
            "Reference budget ({}) exhausted at: {target_id}",
            ctx.config.max_references_per_document
        ));
        return display::limit_badge(target_id, link_text);
    }

    ctx.expanded_count += 1;
    ctx.push_active(target_id);
    let html = render_expanded(reference, link_text, &unit, current_depth, ctx, index);
    ctx.pop_active();
    html
}

/// Build the mode-specific markup for a reference that passed every check.
fn render_expanded(
    reference: &NodeReference,
    link_text: &str,
    unit: &ContentUnit,
    current_depth: usize,
    ctx: &mut ExpansionContext,
    index: &dyn ContentIndex,
) -> String {
    let mode = reference.effective_display_mode();
    let target_id = reference.target_id.as_str();
    let title = unit.title.as_str();

    // Panels show the unit as authored, front matter included.
    let source = match mode {
        DisplayMode::Panel => unit.full_source.as_str(),
        _ => unit.raw_body.as_str(),
    };
    let (body, truncated) = truncate_chars(source, ctx.config.max_chars_per_reference);

    match mode {
        // Inline keeps nested references deferred so a collapsed trigger
        // costs nothing until the reader opens it.
        DisplayMode::Inline => {
            let embed_anchor = ctx.next_embed_anchor(target_id);
            let mut content =
                markdown::render_fragment(body, current_depth, Nesting::Strip, ctx, index);
            if truncated {
                content.push_str(display::TRUNCATION_MARKER);
            }
            let templates = template::generate_templates(&content, current_depth + 1, ctx, index);
            let mut out = display::trigger(
                mode,
                &Expanded {
                    reference,
                    link_text,
                    title,
                    content_html: &content,
                    embed_anchor: &embed_anchor,
                },
            );
            out.push_str(&templates);
            out
        }
        DisplayMode::Stretch | DisplayMode::Overlay | DisplayMode::Panel => {
            // Minted before the content render so a cycle inside the content
            // can link back to this trigger.
            let embed_anchor = ctx.next_embed_anchor(target_id);
            let mut content =
                markdown::render_fragment(body, current_depth, Nesting::Full, ctx, index);
            if truncated {
                content.push_str(display::TRUNCATION_MARKER);
            }
            display::trigger(
                mode,
                &Expanded {
                    reference,
                    link_text,
                    title,
                    content_html: &content,
                    embed_anchor: &embed_anchor,
                },
            )
        }
        DisplayMode::Footnote => {
            // Content renders once per target; repeat citations only add an
            // anchor to the existing entry.
            let content = if ctx.footnotes.contains(target_id) {
                String::new()
            } else {
                let mut content =
                    markdown::render_fragment(body, current_depth, Nesting::Strip, ctx, index);
                if truncated {
                    content.push_str(display::TRUNCATION_MARKER);
                }
                let templates =
                    template::generate_templates(&content, current_depth + 1, ctx, index);
                content.push_str(&templates);
                content
            };
            let anchor_id = ctx.footnotes.register(target_id, title, content);
            // The citation anchor doubles as the cycle back-reference target.
            ctx.record_embed_anchor(target_id, &anchor_id);
            let number = ctx.footnotes.number_of(target_id).unwrap_or(0);
            display::footnote_ref(reference, link_text, &anchor_id, number)
        }
        DisplayMode::Sidenote => {
            let mut content = markdown::render_inline_fragment(body, ctx);
            if truncated {
                content.push_str(display::TRUNCATION_MARKER);
            }
            let templates = template::generate_templates(&content, current_depth + 1, ctx, index);
            let number = ctx.next_sidenote();
            ctx.record_embed_anchor(target_id, &format!("weft-sn-{number}"));
            let mut out = display::sidenote(reference, link_text, number, &content);
            out.push_str(&templates);
            out
        }
        DisplayMode::Margin => {
            // Margin notes carry no id, so no back-reference anchor is recorded.
            let mut content = markdown::render_inline_fragment(body, ctx);
            if truncated {
                content.push_str(display::TRUNCATION_MARKER);
            }
            let templates = template::generate_templates(&content, current_depth + 1, ctx, index);
            let mut out = display::margin(reference, link_text, &content);
            out.push_str(&templates);
            out
        }
    }
}

/// Finished render of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderOutput {
    /// Complete HTML for the document body, footnote section included.
    pub html: String,
    /// Degradation notices in encounter order, empty on a clean render.
    pub warnings: Vec<String>,
}

/// Renders markdown documents against a content index.
///
/// ```
/// use weft_index::{ContentUnit, MemoryIndex};
/// use weft_renderer::DocumentRenderer;
///
/// let index = MemoryIndex::new()
///     .with_unit(ContentUnit::new("intro", "Intro", "Hello from the intro."));
/// let output = DocumentRenderer::new(&index).render("See [the intro](node:intro).");
///
/// assert!(output.html.contains("Hello from the intro."));
/// assert!(output.warnings.is_empty());
/// ```
pub struct DocumentRenderer<'a> {
    index: &'a dyn ContentIndex,
    config: ExpansionConfig,
}

impl<'a> DocumentRenderer<'a> {
    /// Renderer with the default expansion budgets.
    pub fn new(index: &'a dyn ContentIndex) -> Self {
        Self { index, config: ExpansionConfig::default() }
    }

    /// Replace the expansion budgets.
    #[must_use]
    pub fn with_config(mut self, config: ExpansionConfig) -> Self {
        self.config = config;
        self
    }

    /// Render a document to HTML.
    ///
    /// Never fails. Every degraded reference leaves a badge in the markup
    /// and a message in [`RenderOutput::warnings`]; given the same index
    /// and source the output is byte-for-byte reproducible.
    pub fn render(&self, source: &str) -> RenderOutput {
        let mut ctx = ExpansionContext::new(self.config.clone());
        let mut html = markdown::render_fragment(source, 0, Nesting::Full, &mut ctx, self.index);
        let (footnotes, warnings) = ctx.finish();
        html.push_str(&footnotes);
        RenderOutput { html, warnings }
    }
}

/// One-shot render for callers that do not need the warning list.
pub fn render(source: &str, index: &dyn ContentIndex, config: ExpansionConfig) -> String {
    DocumentRenderer::new(index).with_config(config).render(source).html
}
