//! Expansion budget configuration.

/// Default maximum nesting depth for recursive expansion.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Default per-reference character budget for embedded content.
pub const DEFAULT_MAX_CHARS_PER_REFERENCE: usize = 12_000;

/// Default per-document ceiling on fully expanded references.
pub const DEFAULT_MAX_REFERENCES_PER_DOCUMENT: usize = 50;

/// Budgets bounding recursive reference expansion.
///
/// All three limits are enforced per render call; none of them carries over
/// between calls. References that trip a limit degrade to fallback markup
/// instead of failing the render.
///
/// # Example
///
/// ```
/// use weft_renderer::ExpansionConfig;
///
/// let config = ExpansionConfig::default().with_max_depth(1);
/// assert_eq!(config.max_depth, 1);
/// assert_eq!(config.max_chars_per_reference, 12_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpansionConfig {
    /// Maximum nesting depth; references beyond it render a depth badge.
    pub max_depth: usize,
    /// Character budget per embedded body; longer content is truncated.
    pub max_chars_per_reference: usize,
    /// Ceiling on fully expanded references per document.
    pub max_references_per_document: usize,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_chars_per_reference: DEFAULT_MAX_CHARS_PER_REFERENCE,
            max_references_per_document: DEFAULT_MAX_REFERENCES_PER_DOCUMENT,
        }
    }
}

impl ExpansionConfig {
    /// Create a configuration with the default budgets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the per-reference character budget.
    #[must_use]
    pub fn with_max_chars_per_reference(mut self, max_chars: usize) -> Self {
        self.max_chars_per_reference = max_chars;
        self
    }

    /// Set the per-document reference ceiling.
    #[must_use]
    pub fn with_max_references_per_document(mut self, max_references: usize) -> Self {
        self.max_references_per_document = max_references;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExpansionConfig::default();

        assert_eq!(config.max_depth, 3);
        assert_eq!(config.max_chars_per_reference, 12_000);
        assert_eq!(config.max_references_per_document, 50);
    }

    #[test]
    fn test_builder() {
        let config = ExpansionConfig::new()
            .with_max_depth(1)
            .with_max_chars_per_reference(100)
            .with_max_references_per_document(2);

        assert_eq!(config.max_depth, 1);
        assert_eq!(config.max_chars_per_reference, 100);
        assert_eq!(config.max_references_per_document, 2);
    }
}
