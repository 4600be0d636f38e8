//! Markdown fragment rendering with node reference interception.
//!
//! References are plain CommonMark links whose destination uses the `node:`
//! scheme, so interception happens on the parser event stream rather than on
//! raw text. Link text inside code spans or fenced blocks never produces a
//! link event, which keeps those contexts inert for free.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use weft_index::ContentIndex;

use crate::context::ExpansionContext;
use crate::display;
use crate::engine;
use crate::escape::escape_html;
use crate::reference::{NODE_SCHEME, NodeReference};

/// Extensions enabled for every fragment render.
///
/// The footnote extension stays off: footnote numbering and the deferred
/// section are owned by the expansion engine, not the parser.
pub(crate) fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// How node references inside a fragment are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Nesting {
    /// References go through the expansion engine and may recurse.
    Full,
    /// References become inert deferred triggers; no lookup, no budget use.
    Strip,
}

/// A node link currently being swallowed from the event stream.
struct LinkCapture {
    dest: String,
    text: String,
}

impl LinkCapture {
    fn new(dest: &str) -> Self {
        Self { dest: dest.to_owned(), text: String::new() }
    }

    /// Resolve the captured link into replacement markup.
    fn resolve(
        self,
        depth: usize,
        nesting: Nesting,
        ctx: &mut ExpansionContext,
        index: &dyn ContentIndex,
    ) -> String {
        match NodeReference::parse(&self.dest) {
            Some(reference) => match nesting {
                Nesting::Full => engine::expand(&reference, &self.text, depth + 1, ctx, index),
                Nesting::Strip => display::deferred_trigger(&reference, &self.text),
            },
            None => {
                tracing::warn!(destination = %self.dest, "malformed node reference");
                ctx.warn(format!("Malformed node reference: {}", self.dest));
                display::unresolved_badge(&self.text)
            }
        }
    }
}

/// Render a markdown fragment at the given expansion depth.
///
/// Node links are swallowed from the event stream and replaced with a single
/// inline HTML event; everything else passes through to the stock HTML
/// writer. The fragment's own depth is `depth`; references found inside it
/// expand one level further down.
pub(crate) fn render_fragment(
    source: &str,
    depth: usize,
    nesting: Nesting,
    ctx: &mut ExpansionContext,
    index: &dyn ContentIndex,
) -> String {
    let parser = Parser::new_ext(source, markdown_options());
    let mut events: Vec<Event<'_>> = Vec::new();
    let mut capture: Option<LinkCapture> = None;

    for event in parser {
        if capture.is_some() {
            match event {
                Event::End(TagEnd::Link) => {
                    let Some(captured) = capture.take() else { continue };
                    let replacement = captured.resolve(depth, nesting, ctx, index);
                    events.push(Event::InlineHtml(CowStr::from(replacement)));
                }
                // Link text flattens to plain text for the trigger label.
                Event::Text(text) | Event::Code(text) => {
                    if let Some(cap) = capture.as_mut() {
                        cap.text.push_str(&text);
                    }
                }
                Event::SoftBreak | Event::HardBreak => {
                    if let Some(cap) = capture.as_mut() {
                        cap.text.push(' ');
                    }
                }
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(Tag::Link { ref dest_url, .. })
                if dest_url.starts_with(NODE_SCHEME) =>
            {
                capture = Some(LinkCapture::new(dest_url));
            }
            other => events.push(other),
        }
    }

    let mut out = String::with_capacity(source.len() * 2);
    html::push_html(&mut out, events.into_iter());
    out
}

/// Render markdown down to span-safe inline HTML.
///
/// Sidenote and margin bodies live inside `<span>` hosts, so block wrappers
/// are dropped and block boundaries collapse to spaces. Raw HTML in the
/// source is escaped rather than passed through, node links become deferred
/// triggers, and other links keep their href.
pub(crate) fn render_inline_fragment(source: &str, ctx: &mut ExpansionContext) -> String {
    let parser = Parser::new_ext(source, markdown_options());
    let mut out = String::with_capacity(source.len() * 2);
    let mut capture: Option<LinkCapture> = None;

    for event in parser {
        if capture.is_some() {
            match event {
                Event::End(TagEnd::Link) => {
                    let Some(captured) = capture.take() else { continue };
                    match NodeReference::parse(&captured.dest) {
                        Some(reference) => {
                            out.push_str(&display::deferred_trigger(&reference, &captured.text));
                        }
                        None => {
                            tracing::warn!(destination = %captured.dest, "malformed node reference");
                            ctx.warn(format!("Malformed node reference: {}", captured.dest));
                            out.push_str(&display::unresolved_badge(&captured.text));
                        }
                    }
                }
                Event::Text(text) | Event::Code(text) => {
                    if let Some(cap) = capture.as_mut() {
                        cap.text.push_str(&text);
                    }
                }
                Event::SoftBreak | Event::HardBreak => {
                    if let Some(cap) = capture.as_mut() {
                        cap.text.push(' ');
                    }
                }
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(tag) => match tag {
                Tag::Link { dest_url, .. } => {
                    if dest_url.starts_with(NODE_SCHEME) {
                        capture = Some(LinkCapture::new(&dest_url));
                    } else {
                        out.push_str(&format!(r#"<a href="{}">"#, escape_html(&dest_url)));
                    }
                }
                Tag::Emphasis => out.push_str("<em>"),
                Tag::Strong => out.push_str("<strong>"),
                Tag::Strikethrough => out.push_str("<del>"),
                Tag::CodeBlock(_) => out.push_str("<code>"),
                _ => {}
            },
            Event::End(tag_end) => match tag_end {
                TagEnd::Link => out.push_str("</a>"),
                TagEnd::Emphasis => out.push_str("</em>"),
                TagEnd::Strong => out.push_str("</strong>"),
                TagEnd::Strikethrough => out.push_str("</del>"),
                TagEnd::CodeBlock => out.push_str("</code> "),
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item => out.push(' '),
                _ => {}
            },
            Event::Text(text) => out.push_str(&escape_html(&text)),
            Event::Code(text) => {
                out.push_str("<code>");
                out.push_str(&escape_html(&text));
                out.push_str("</code>");
            }
            // Raw HTML stays inert inside span hosts.
            Event::Html(raw) | Event::InlineHtml(raw) => out.push_str(&escape_html(&raw)),
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push_str("<br>"),
            Event::Rule => out.push(' '),
            Event::TaskListMarker(checked) => {
                out.push_str(if checked { "[x] " } else { "[ ] " });
            }
            _ => {}
        }
    }

    out.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use weft_index::MemoryIndex;

    use super::*;
    use crate::config::ExpansionConfig;

    fn ctx() -> ExpansionContext {
        ExpansionContext::new(ExpansionConfig::default())
    }

    fn render_strip(source: &str, ctx: &mut ExpansionContext) -> String {
        let index = MemoryIndex::new();
        render_fragment(source, 0, Nesting::Strip, ctx, &index)
    }

    #[test]
    fn test_plain_markdown_passes_through() {
        let mut ctx = ctx();
        let html = render_strip("# Title\n\nSome *text*.", &mut ctx);

        assert_eq!(html, "<h1>Title</h1>\n<p>Some <em>text</em>.</p>\n");
        assert!(ctx.warnings.is_empty());
    }

    #[test]
    fn test_regular_links_untouched() {
        let mut ctx = ctx();
        let html = render_strip("[docs](https://example.com)", &mut ctx);

        assert!(html.contains(r#"<a href="https://example.com">docs</a>"#));
        assert!(!html.contains("data-weft"));
    }

    #[test]
    fn test_strip_nesting_defers_references() {
        let mut ctx = ctx();
        let html = render_strip("See [the intro](node:intro).", &mut ctx);

        assert!(html.contains(r#"data-weft="deferred""#));
        assert!(html.contains(r#"data-target="intro""#));
        assert!(html.contains(">the intro</span>"));
        assert_eq!(ctx.expanded_count, 0);
    }

    #[test]
    fn test_malformed_reference_degrades_to_badge() {
        let mut ctx = ctx();
        let html = render_strip("[x](node:?display=inline)", &mut ctx);

        assert!(html.contains(r#"data-weft="unresolved""#));
        assert_eq!(ctx.warnings.len(), 1);
        assert!(ctx.warnings[0].contains("Malformed node reference"));
    }

    #[test]
    fn test_code_span_is_not_a_reference() {
        let mut ctx = ctx();
        let html = render_strip("run `[x](node:y)` verbatim", &mut ctx);

        assert!(html.contains("<code>[x](node:y)</code>"));
        assert!(!html.contains("data-weft"));
    }

    #[test]
    fn test_fenced_block_is_not_a_reference() {
        let mut ctx = ctx();
        let html = render_strip("```\n[x](node:y)\n```", &mut ctx);

        assert!(html.contains("[x](node:y)"));
        assert!(!html.contains("data-weft"));
    }

    #[test]
    fn test_link_text_flattens_to_plain_text() {
        let mut ctx = ctx();
        let html = render_strip("[**bold** text](node:x)", &mut ctx);

        assert!(html.contains(">bold text</span>"));
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn test_break_in_link_text_becomes_space() {
        let mut ctx = ctx();
        let html = render_strip("[first\nsecond](node:x)", &mut ctx);

        assert!(html.contains(">first second</span>"));
    }

    #[test]
    fn test_inline_fragment_subset() {
        let mut ctx = ctx();
        let html = render_inline_fragment("Some **bold** and `code`.", &mut ctx);

        assert_eq!(html, "Some <strong>bold</strong> and <code>code</code>.");
    }

    #[test]
    fn test_inline_fragment_drops_block_wrappers() {
        let mut ctx = ctx();
        let html = render_inline_fragment("# Head\n\npara one\n\npara two", &mut ctx);

        assert_eq!(html, "Head para one para two");
    }

    #[test]
    fn test_inline_fragment_defers_node_links() {
        let mut ctx = ctx();
        let html = render_inline_fragment("see [deep](node:deep)", &mut ctx);

        assert!(html.starts_with("see <span"));
        assert!(html.contains(r#"data-weft="deferred""#));
        assert_eq!(ctx.expanded_count, 0);
    }

    #[test]
    fn test_inline_fragment_keeps_regular_links() {
        let mut ctx = ctx();
        let html = render_inline_fragment("[site](https://example.com)", &mut ctx);

        assert_eq!(html, r#"<a href="https://example.com">site</a>"#);
    }

    #[test]
    fn test_inline_fragment_escapes_raw_html() {
        let mut ctx = ctx();
        let html = render_inline_fragment("a <b>raw</b> tag", &mut ctx);

        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_inline_fragment_hard_break() {
        let mut ctx = ctx();
        let html = render_inline_fragment("first  \nsecond", &mut ctx);

        assert_eq!(html, "first<br>second");
    }

    #[test]
    fn test_inline_fragment_list_items_collapse() {
        let mut ctx = ctx();
        let html = render_inline_fragment("- one\n- two", &mut ctx);

        assert_eq!(html, "one two");
    }

    #[test]
    fn test_inline_fragment_malformed_reference() {
        let mut ctx = ctx();
        let html = render_inline_fragment("[x](node:)", &mut ctx);

        assert!(html.contains(r#"data-weft="unresolved""#));
        assert_eq!(ctx.warnings.len(), 1);
    }
}
