//! Content unit and lookup trait.
//!
//! Defines the read-only seam between the expansion engine and the host's
//! document store. The engine resolves reference targets through
//! [`ContentIndex::get`] and never mutates or caches what it reads.

/// One addressable piece of content a node reference can point at.
///
/// Owned by the host index; the engine only reads it. `raw_body` is what
/// gets embedded for most display modes, `full_source` is the complete
/// document (used by the panel mode, which shows the whole target).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentUnit {
    /// Stable identifier the reference syntax uses (e.g., "guides/setup").
    pub id: String,
    /// Human-readable title (e.g., first heading of the document).
    pub title: String,
    /// Body markdown without the title heading.
    pub raw_body: String,
    /// Complete document source as authored.
    pub full_source: String,
}

impl ContentUnit {
    /// Create a content unit whose full source equals its body.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, raw_body: impl Into<String>) -> Self {
        let raw_body = raw_body.into();
        Self {
            id: id.into(),
            title: title.into(),
            full_source: raw_body.clone(),
            raw_body,
        }
    }

    /// Set the full source separately from the body.
    #[must_use]
    pub fn with_full_source(mut self, full_source: impl Into<String>) -> Self {
        self.full_source = full_source.into();
        self
    }
}

/// Read-only lookup from target id to content unit.
///
/// The contract mirrors what the expansion engine is allowed to assume:
///
/// - **Synchronous and non-blocking**: `get` must not wait on I/O.
/// - **Side-effect-free**: repeated calls with the same id during one render
///   return the same unit.
/// - **`None` for unknown ids**: missing targets are a normal outcome, not
///   an error.
///
/// Implementations must tolerate concurrent reads from multiple simultaneous
/// render calls; any content mutation is the host's responsibility and
/// happens between renders, not during one.
pub trait ContentIndex: Send + Sync {
    /// Look up a content unit by id.
    fn get(&self, id: &str) -> Option<ContentUnit>;
}
