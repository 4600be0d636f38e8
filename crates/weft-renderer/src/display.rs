//! Display strategies and fallback markup for node references.
//!
//! Every fragment emitted here is self-contained and carries the stable
//! `data-weft` marker attribute plus `data-target`, which is the contract
//! the client-side script (and the engine's own template scan) relies on.
//! Attribute order is fixed by this emitter; other code may depend on it.

use crate::escape::escape_html;
use crate::reference::{DisplayMode, NodeReference};

// SVG icon markers for anchor-only references (GitHub Octicons-style, 16x16).
// Unfold communicates "expands in place", info communicates "details on demand".
const SVG_UNFOLD: &str = r#"<svg class="weft-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M8.177.677l2.896 2.896a.25.25 0 01-.177.427H8.75v1.25a.75.75 0 01-1.5 0V4H5.104a.25.25 0 01-.177-.427L7.823.677a.25.25 0 01.354 0zM7.25 10.75a.75.75 0 011.5 0V12h2.146a.25.25 0 01.177.427l-2.896 2.896a.25.25 0 01-.354 0l-2.896-2.896A.25.25 0 015.104 12H7.25v-1.25zm-5-2a.75.75 0 000-1.5h-.5a.75.75 0 000 1.5h.5zM6 8a.75.75 0 01-.75.75h-.5a.75.75 0 010-1.5h.5A.75.75 0 016 8zm2.25.75a.75.75 0 000-1.5h-.5a.75.75 0 000 1.5h.5zM11 8a.75.75 0 01-.75.75h-.5a.75.75 0 010-1.5h.5A.75.75 0 0111 8zm2.25.75a.75.75 0 000-1.5h-.5a.75.75 0 000 1.5h.5z"></path></svg>"#;
const SVG_INFO: &str = r#"<svg class="weft-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M0 8a8 8 0 1 1 16 0A8 8 0 0 1 0 8Zm8-6.5a6.5 6.5 0 1 0 0 13 6.5 6.5 0 0 0 0-13ZM6.5 7.75A.75.75 0 0 1 7.25 7h1a.75.75 0 0 1 .75.75v2.75h.25a.75.75 0 0 1 0 1.5h-2a.75.75 0 0 1 0-1.5h.25v-2h-.25a.75.75 0 0 1-.75-.75ZM8 6a1 1 0 1 1 0-2 1 1 0 0 1 0 2Z"></path></svg>"#;

/// Appended inside embedded content that hit the per-reference character budget.
pub(crate) const TRUNCATION_MARKER: &str =
    r#"<span class="weft-truncated" data-weft="truncated">(content truncated)</span>"#;

/// Inputs shared by the trigger-bearing strategies.
pub(crate) struct Expanded<'a> {
    pub(crate) reference: &'a NodeReference,
    pub(crate) link_text: &'a str,
    pub(crate) title: &'a str,
    pub(crate) content_html: &'a str,
    pub(crate) embed_anchor: &'a str,
}

/// `data-export` attribute fragment, empty when the reference has no hint.
fn export_attr(reference: &NodeReference) -> String {
    match &reference.export_hint {
        Some(hint) => format!(r#" data-export="{}""#, escape_html(hint)),
        None => String::new(),
    }
}

/// Visible trigger label: the link text, or an icon for anchor-only references.
fn trigger_label(mode: DisplayMode, link_text: &str) -> String {
    if link_text.trim().is_empty() {
        let icon = match mode {
            DisplayMode::Overlay => SVG_INFO,
            _ => SVG_UNFOLD,
        };
        icon.to_owned()
    } else {
        escape_html(link_text)
    }
}

/// Fallback display text: the link text, or the target id when empty.
fn fallback_text(link_text: &str, target_id: &str) -> String {
    if link_text.trim().is_empty() {
        escape_html(target_id)
    } else {
        escape_html(link_text)
    }
}

/// Trigger plus adjacent content template, for the inline, stretch, overlay
/// and panel modes. Stretch uses a block-level trigger; the rest are spans.
pub(crate) fn trigger(mode: DisplayMode, input: &Expanded<'_>) -> String {
    let token = mode.as_token();
    let tag = match mode {
        DisplayMode::Stretch => "div",
        _ => "span",
    };
    let target = escape_html(&input.reference.target_id);
    let label = trigger_label(mode, input.link_text);

    let mut out = String::with_capacity(input.content_html.len() + 256);
    out.push_str(&format!(
        r#"<{tag} class="weft-trigger weft-trigger-{token}" data-weft="trigger" data-display="{token}" data-target="{target}"{export} id="{anchor}" role="button" tabindex="0" aria-expanded="false" title="{title}">{label}</{tag}>"#,
        export = export_attr(input.reference),
        anchor = input.embed_anchor,
        title = escape_html(input.title),
    ));
    out.push_str(&format!(
        r#"<template class="weft-content weft-content-{token}" data-weft="template" data-target="{target}">{content}</template>"#,
        content = input.content_html,
    ));
    out
}

/// Inert marker for a reference whose expansion was deferred to the client.
///
/// No adjacent template: the nested template generator emits one separately.
/// The template scan relies on `data-weft="deferred"` preceding `data-target`.
pub(crate) fn deferred_trigger(reference: &NodeReference, link_text: &str) -> String {
    let mode = reference.effective_display_mode();
    let token = mode.as_token();
    format!(
        r#"<span class="weft-trigger weft-trigger-{token} weft-deferred" data-weft="deferred" data-display="{token}" data-target="{target}"{export} role="button" tabindex="0" aria-expanded="false">{label}</span>"#,
        target = escape_html(&reference.target_id),
        export = export_attr(reference),
        label = trigger_label(mode, link_text),
    )
}

/// Standalone content template keyed by target id, emitted by the nested
/// template generator for deferred triggers.
pub(crate) fn template_definition(target_id: &str, content_html: &str) -> String {
    format!(
        r#"<template class="weft-content" data-weft="template" data-target="{}">{content_html}</template>"#,
        escape_html(target_id),
    )
}

/// Superscript footnote reference. Content lives in the footnote registry.
pub(crate) fn footnote_ref(
    reference: &NodeReference,
    link_text: &str,
    anchor_id: &str,
    number: usize,
) -> String {
    let text = if link_text.trim().is_empty() {
        String::new()
    } else {
        escape_html(link_text)
    };
    format!(
        r##"{text}<sup class="weft-footnote-ref" data-weft="footnote-ref" data-target="{target}"><a id="{anchor_id}" href="#weft-fn-{number}" aria-label="Footnote {number}">[{number}]</a></sup>"##,
        target = escape_html(&reference.target_id),
    )
}

/// Numbered sidenote: superscript anchor plus an adjacent margin note.
pub(crate) fn sidenote(
    reference: &NodeReference,
    link_text: &str,
    number: usize,
    content_html: &str,
) -> String {
    let target = escape_html(&reference.target_id);
    let text = if link_text.trim().is_empty() {
        String::new()
    } else {
        escape_html(link_text)
    };
    let mut out = String::with_capacity(content_html.len() + 256);
    out.push_str(&format!(
        r##"{text}<sup class="weft-sidenote-ref" data-weft="sidenote-ref" data-target="{target}" id="weft-sn-ref-{number}"><a href="#weft-sn-{number}" aria-label="Sidenote {number}">{number}</a></sup>"##,
    ));
    out.push_str(&format!(
        r#"<span class="weft-sidenote" data-weft="note" data-target="{target}" id="weft-sn-{number}" role="note" aria-describedby="weft-sn-ref-{number}"><span class="weft-sidenote-number">{number}</span>{content_html}</span>"#,
    ));
    out
}

/// Unnumbered margin note. The inline anchor is omitted entirely when the
/// link text is empty.
pub(crate) fn margin(reference: &NodeReference, link_text: &str, content_html: &str) -> String {
    let target = escape_html(&reference.target_id);
    let mut out = String::with_capacity(content_html.len() + 128);
    if !link_text.trim().is_empty() {
        out.push_str(&format!(
            r#"<span class="weft-margin-ref" data-weft="margin-ref" data-target="{target}">{}</span>"#,
            escape_html(link_text),
        ));
    }
    out.push_str(&format!(
        r#"<span class="weft-margin-note" data-weft="note" data-target="{target}" role="note">{content_html}</span>"#,
    ));
    out
}

fn badge(role: &str, target_id: &str, text: &str, badge_text: &str) -> String {
    format!(
        r#"<span class="weft-ref weft-ref-{role}" data-weft="{role}" data-target="{}">{} <span class="weft-badge">{badge_text}</span></span>"#,
        escape_html(target_id),
        fallback_text(text, target_id),
    )
}

/// Fallback for a target the lookup does not know.
pub(crate) fn missing_badge(target_id: &str, link_text: &str) -> String {
    badge("missing", target_id, link_text, "missing")
}

/// Fallback for a reference to an ancestor already being expanded. Links
/// back to the ancestor's first embedding when one exists.
pub(crate) fn cycle_badge(target_id: &str, link_text: &str, anchor: Option<&str>) -> String {
    let target = escape_html(target_id);
    let text = fallback_text(link_text, target_id);
    let badge_html = match anchor {
        Some(anchor) => format!(
            r##"<a class="weft-badge" href="#{anchor}">already expanded above</a>"##
        ),
        None => r#"<span class="weft-badge">already expanded above</span>"#.to_owned(),
    };
    format!(
        r#"<span class="weft-ref weft-ref-cycle" data-weft="cycle" data-target="{target}">{text} {badge_html}</span>"#
    )
}

/// Fallback for a reference past the depth budget.
pub(crate) fn depth_badge(target_id: &str, link_text: &str) -> String {
    badge("depth-limit", target_id, link_text, "depth limit")
}

/// Fallback once the per-document reference budget is spent.
pub(crate) fn limit_badge(target_id: &str, link_text: &str) -> String {
    badge("ref-limit", target_id, link_text, "reference limit")
}

/// Fallback for a `node:` destination that does not parse.
pub(crate) fn unresolved_badge(link_text: &str) -> String {
    let text = if link_text.trim().is_empty() {
        "reference".to_owned()
    } else {
        escape_html(link_text)
    };
    format!(
        r#"<span class="weft-ref weft-ref-unresolved" data-weft="unresolved">{text} <span class="weft-badge">unresolved reference</span></span>"#
    )
}
