//! Per-render mutable expansion state.
//!
//! One [`ExpansionContext`] is constructed at the start of every top-level
//! render call, threaded by `&mut` through every recursive step, and
//! consumed at the end when the deferred footnote section is flushed. It is
//! never shared across calls or documents, so concurrent renders cannot
//! interfere.

use std::collections::HashMap;

use crate::config::ExpansionConfig;
use crate::registry::FootnoteRegistry;

/// Mutable render state for a single document pass.
#[derive(Debug)]
pub(crate) struct ExpansionContext {
    pub(crate) config: ExpansionConfig,
    /// Monotonic count of fully expanded references; never resets mid-render.
    pub(crate) expanded_count: usize,
    pub(crate) footnotes: FootnoteRegistry,
    /// Ids currently open on the recursion path. Membership is the cycle
    /// guard: ancestors are flagged, siblings are not.
    active_stack: Vec<String>,
    sidenote_counter: usize,
    embed_counter: usize,
    /// First in-document anchor per target, for cycle back-references.
    embed_anchors: HashMap<String, String>,
    pub(crate) warnings: Vec<String>,
}

impl ExpansionContext {
    pub(crate) fn new(config: ExpansionConfig) -> Self {
        Self {
            config,
            expanded_count: 0,
            footnotes: FootnoteRegistry::new(),
            active_stack: Vec::new(),
            sidenote_counter: 0,
            embed_counter: 0,
            embed_anchors: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    /// True if `target_id` is an ancestor on the current recursion path.
    pub(crate) fn is_active(&self, target_id: &str) -> bool {
        self.active_stack.iter().any(|id| id == target_id)
    }

    /// Open a target for expansion. Must be paired with [`Self::pop_active`].
    pub(crate) fn push_active(&mut self, target_id: &str) {
        self.active_stack.push(target_id.to_owned());
    }

    /// Close the most recently opened target.
    pub(crate) fn pop_active(&mut self) {
        self.active_stack.pop();
    }

    /// Next sidenote number. Independent of the footnote sequence and not
    /// deduplicated: every occurrence gets a fresh number.
    pub(crate) fn next_sidenote(&mut self) -> usize {
        self.sidenote_counter += 1;
        self.sidenote_counter
    }

    /// Mint the embed anchor id for a resolved trigger expansion.
    pub(crate) fn next_embed_anchor(&mut self, target_id: &str) -> String {
        self.embed_counter += 1;
        let anchor = format!("weft-embed-{}", self.embed_counter);
        self.record_embed_anchor(target_id, &anchor);
        anchor
    }

    /// Remember the first in-document anchor for `target_id`; cycle badges
    /// link back to it. Only ids the markup actually emits may be recorded.
    pub(crate) fn record_embed_anchor(&mut self, target_id: &str, anchor: &str) {
        self.embed_anchors
            .entry(target_id.to_owned())
            .or_insert_with(|| anchor.to_owned());
    }

    /// First recorded in-document anchor for `target_id`, if any.
    pub(crate) fn embed_anchor(&self, target_id: &str) -> Option<&str> {
        self.embed_anchors.get(target_id).map(String::as_str)
    }

    pub(crate) fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Flush the deferred footnote section and hand back the warnings.
    ///
    /// Consuming the context here makes "flush exactly once, after the main
    /// pass" structural rather than a calling convention.
    pub(crate) fn finish(self) -> (String, Vec<String>) {
        debug_assert!(
            self.active_stack.is_empty(),
            "active stack must be empty after the document pass"
        );
        (self.footnotes.flush(), self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_stack_ancestors_only() {
        let mut ctx = ExpansionContext::new(ExpansionConfig::default());

        ctx.push_active("a");
        ctx.push_active("b");
        assert!(ctx.is_active("a"));
        assert!(ctx.is_active("b"));
        assert!(!ctx.is_active("c"));

        ctx.pop_active();
        // A sibling reference to "b" after the pop is not a cycle.
        assert!(!ctx.is_active("b"));
        assert!(ctx.is_active("a"));
    }

    #[test]
    fn test_sidenote_counter_sequence() {
        let mut ctx = ExpansionContext::new(ExpansionConfig::default());

        assert_eq!(ctx.next_sidenote(), 1);
        assert_eq!(ctx.next_sidenote(), 2);
        assert_eq!(ctx.next_sidenote(), 3);
    }

    #[test]
    fn test_embed_anchor_first_wins() {
        let mut ctx = ExpansionContext::new(ExpansionConfig::default());

        let first = ctx.next_embed_anchor("a");
        let second = ctx.next_embed_anchor("a");

        assert_eq!(first, "weft-embed-1");
        assert_eq!(second, "weft-embed-2");
        // Cycle badges link to the first expansion of the target.
        assert_eq!(ctx.embed_anchor("a"), Some("weft-embed-1"));
        assert_eq!(ctx.embed_anchor("b"), None);
    }

    #[test]
    fn test_recorded_anchor_outranks_later_minting() {
        let mut ctx = ExpansionContext::new(ExpansionConfig::default());

        ctx.record_embed_anchor("a", "weft-fnref-1");
        let minted = ctx.next_embed_anchor("a");

        // The counter still advances, but the earlier anchor stays the
        // back-reference target.
        assert_eq!(minted, "weft-embed-1");
        assert_eq!(ctx.embed_anchor("a"), Some("weft-fnref-1"));
    }

    #[test]
    fn test_finish_returns_warnings() {
        let mut ctx = ExpansionContext::new(ExpansionConfig::default());
        ctx.warn("something degraded".to_owned());

        let (footnotes, warnings) = ctx.finish();

        assert_eq!(footnotes, "");
        assert_eq!(warnings, vec!["something degraded".to_owned()]);
    }
}
