//! Footnote registry with deduplication and deferred emission.
//!
//! Footnote-mode references do not inline their content; they register it
//! here and render only a superscript anchor. After the main document pass
//! the registry is flushed exactly once into a single ordered section.

use std::collections::HashMap;

use crate::escape::escape_html;

/// One deduplicated footnote entry.
#[derive(Debug)]
pub(crate) struct FootnoteEntry {
    pub(crate) target_id: String,
    /// 1-based sequence number, assigned in first-encounter order.
    pub(crate) number: usize,
    pub(crate) title: String,
    pub(crate) content_html: String,
    /// One anchor id per reference site, in document order.
    pub(crate) anchor_ids: Vec<String>,
}

/// Ordered, deduplicating footnote store for one render call.
///
/// Numbers are assigned on first sight of a target id and stay stable for
/// the lifetime of the render call only. Repeat references to the same
/// target share the entry but each get their own back-reference anchor.
#[derive(Debug, Default)]
pub(crate) struct FootnoteRegistry {
    entries: Vec<FootnoteEntry>,
    by_target: HashMap<String, usize>,
    anchor_counter: usize,
}

impl FootnoteRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// True if this target already has an entry.
    pub(crate) fn contains(&self, target_id: &str) -> bool {
        self.by_target.contains_key(target_id)
    }

    /// Assigned number for a registered target.
    pub(crate) fn number_of(&self, target_id: &str) -> Option<usize> {
        self.by_target.get(target_id).map(|idx| self.entries[*idx].number)
    }

    /// Register a footnote reference and return its new anchor id.
    ///
    /// First sight of a target assigns the next number and stores title and
    /// content; on repeats the passed title and content are ignored. Every
    /// call appends a fresh anchor id to the entry, so each citation site
    /// stays individually addressable.
    pub(crate) fn register(
        &mut self,
        target_id: &str,
        title: &str,
        content_html: String,
    ) -> String {
        self.anchor_counter += 1;
        let anchor_id = format!("weft-fnref-{}", self.anchor_counter);

        if let Some(idx) = self.by_target.get(target_id) {
            self.entries[*idx].anchor_ids.push(anchor_id.clone());
            tracing::debug!(target_id = %target_id, "footnote target already registered");
        } else {
            let number = self.entries.len() + 1;
            self.by_target.insert(target_id.to_owned(), self.entries.len());
            self.entries.push(FootnoteEntry {
                target_id: target_id.to_owned(),
                number,
                title: title.to_owned(),
                content_html,
                anchor_ids: vec![anchor_id.clone()],
            });
        }
        anchor_id
    }

    /// Emit the deferred footnote section.
    ///
    /// Consumes the registry so a render call cannot flush twice. Returns an
    /// empty string when nothing was registered.
    pub(crate) fn flush(self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }

        let mut out = String::with_capacity(self.entries.len() * 160);
        out.push_str(r#"<section class="weft-footnotes" data-weft="footnotes"><hr><ol class="weft-footnote-list">"#);
        // Entries are stored in first-encounter order, which is number order.
        for entry in &self.entries {
            out.push_str(&format!(
                r#"<li id="weft-fn-{number}" class="weft-footnote" data-target="{target}">"#,
                number = entry.number,
                target = escape_html(&entry.target_id),
            ));
            if let Some(first_anchor) = entry.anchor_ids.first() {
                out.push_str(&format!(
                    r##"<a class="weft-footnote-backref" href="#{first_anchor}" aria-label="Back to reference">&#8617;</a> "##,
                ));
            }
            out.push_str(&format!(
                "<strong>{}</strong>: {}</li>",
                escape_html(&entry.title),
                entry.content_html,
            ));
        }
        out.push_str("</ol></section>");
        out
    }
}
