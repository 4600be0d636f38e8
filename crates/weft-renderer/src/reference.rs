//! Node reference syntax parsing.
//!
//! Parses the wire form `node:id` / `node:id?key=value&...` into a
//! structured [`NodeReference`]. Parsing never fails hard: an unusable
//! string yields `None`, and malformed query parameters degrade to an empty
//! or partial parameter set so the id-level fallback still works.

use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;

/// Scheme prefix that marks a link destination as a node reference.
pub const NODE_SCHEME: &str = "node:";

/// How expanded content is presented at the reference site.
///
/// Closed set; unrecognized `display` values are preserved as unknown
/// parameters rather than mapped here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DisplayMode {
    /// Trigger span with an adjacent hidden content template.
    #[default]
    Inline,
    /// Block-level trigger with an adjacent content template.
    Stretch,
    /// Trigger span with popover content, positioned client-side.
    Overlay,
    /// Superscript reference; content deferred to the footnote section.
    Footnote,
    /// Numbered margin note rendered in place.
    Sidenote,
    /// Unnumbered margin note rendered in place.
    Margin,
    /// Trigger span with the full target document for a slide-in panel.
    Panel,
}

impl DisplayMode {
    /// Parse a wire token into a display mode.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "inline" => Some(Self::Inline),
            "stretch" => Some(Self::Stretch),
            "overlay" => Some(Self::Overlay),
            "footnote" => Some(Self::Footnote),
            "sidenote" => Some(Self::Sidenote),
            "margin" => Some(Self::Margin),
            "panel" => Some(Self::Panel),
            _ => None,
        }
    }

    /// The wire token for this mode.
    #[must_use]
    pub fn as_token(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Stretch => "stretch",
            Self::Overlay => "overlay",
            Self::Footnote => "footnote",
            Self::Sidenote => "sidenote",
            Self::Margin => "margin",
            Self::Panel => "panel",
        }
    }
}

/// A parsed node reference. Immutable once parsed.
///
/// `unknown_params` preserves every query parameter that is not a recognized
/// `display` or `export` key. They are kept for diagnostics and never affect
/// rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeReference {
    /// Id of the referenced content unit.
    pub target_id: String,
    /// Recognized display mode, if the reference specified a valid one.
    pub display_mode: Option<DisplayMode>,
    /// `export` parameter value, copied verbatim without validation.
    pub export_hint: Option<String>,
    /// Unrecognized query parameters, in key order.
    pub unknown_params: BTreeMap<String, String>,
}

impl NodeReference {
    /// Parse a link destination into a node reference.
    ///
    /// Returns `None` when the `node:` scheme prefix is absent or the id
    /// segment is empty. Query keys and values are percent-decoded; invalid
    /// UTF-8 sequences decode lossily.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix(NODE_SCHEME)?;
        let (id_part, query) = match rest.split_once('?') {
            Some((id, query)) => (id, Some(query)),
            None => (rest, None),
        };

        let target_id = percent_decode_str(id_part)
            .decode_utf8_lossy()
            .trim()
            .to_owned();
        if target_id.is_empty() {
            return None;
        }

        let mut reference = Self {
            target_id,
            display_mode: None,
            export_hint: None,
            unknown_params: BTreeMap::new(),
        };
        if let Some(query) = query {
            reference.parse_query(query);
        }
        Some(reference)
    }

    /// The display mode to render with, defaulting to inline.
    #[must_use]
    pub fn effective_display_mode(&self) -> DisplayMode {
        self.display_mode.unwrap_or_default()
    }

    fn parse_query(&mut self, query: &str) {
        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key, value),
                None => (pair, ""),
            };
            let key = percent_decode_str(key).decode_utf8_lossy().into_owned();
            let value = percent_decode_str(value).decode_utf8_lossy().into_owned();
            if key.is_empty() {
                continue;
            }
            match key.as_str() {
                "display" => match DisplayMode::from_token(&value) {
                    Some(mode) => self.display_mode = Some(mode),
                    None => {
                        // Not one of the seven known tokens: keep it visible
                        // for diagnostics instead of rejecting the reference.
                        self.unknown_params.insert(key, value);
                    }
                },
                "export" => self.export_hint = Some(value),
                _ => {
                    self.unknown_params.insert(key, value);
                }
            }
        }

        if !self.unknown_params.is_empty() {
            tracing::debug!(
                target_id = %self.target_id,
                params = ?self.unknown_params,
                "ignoring unknown node reference parameters"
            );
        }
    }
}
