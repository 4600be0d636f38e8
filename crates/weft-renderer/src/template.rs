//! Nested content templates for deferred triggers.
//!
//! Embedded fragments keep their own references deferred, so a client can
//! only unfold them if the render pass also shipped their content. Each
//! deferred trigger therefore gets a `<template>` holding the target's
//! rendered body, recursively, until the depth budget runs out. The scan
//! operates on markup this crate emitted itself; the display module's fixed
//! attribute order is load-bearing here.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use weft_index::ContentIndex;

use crate::context::ExpansionContext;
use crate::display;
use crate::engine::truncate_chars;
use crate::escape::unescape_attr;
use crate::markdown::{self, Nesting};

static DEFERRED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"data-weft="deferred"[^>]*data-target="([^"]*)""#).unwrap()
});

/// Emit template definitions for every deferred trigger in `fragment_html`.
///
/// `depth` is the depth at which the found references would expand. Targets
/// already on the active expansion stack and targets the index does not know
/// are skipped, and each target yields at most one template per top-level
/// call. The document reference budget is never consumed here.
pub(crate) fn generate_templates(
    fragment_html: &str,
    depth: usize,
    ctx: &mut ExpansionContext,
    index: &dyn ContentIndex,
) -> String {
    let mut seen = HashSet::new();
    collect(fragment_html, depth, ctx, index, &mut seen)
}

fn collect(
    fragment_html: &str,
    depth: usize,
    ctx: &mut ExpansionContext,
    index: &dyn ContentIndex,
    seen: &mut HashSet<String>,
) -> String {
    if depth > ctx.config.max_depth {
        return String::new();
    }

    // Collect ids up front; rendering the bodies needs the context mutably.
    let targets: Vec<String> = DEFERRED_RE
        .captures_iter(fragment_html)
        .map(|caps| unescape_attr(&caps[1]))
        .collect();

    let mut out = String::new();
    for target_id in targets {
        if seen.contains(&target_id) || ctx.is_active(&target_id) {
            continue;
        }
        let Some(unit) = index.get(&target_id) else {
            tracing::debug!(target_id = %target_id, "no template for unknown target");
            continue;
        };
        seen.insert(target_id.clone());

        let (body, truncated) =
            truncate_chars(&unit.raw_body, ctx.config.max_chars_per_reference);
        let mut body_html = markdown::render_fragment(body, depth, Nesting::Strip, ctx, index);
        if truncated {
            body_html.push_str(display::TRUNCATION_MARKER);
        }

        out.push_str(&display::template_definition(&target_id, &body_html));
        out.push_str(&collect(&body_html, depth + 1, ctx, index, seen));
    }
    out
}
