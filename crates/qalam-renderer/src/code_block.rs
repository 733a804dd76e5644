//! Code block processor trait for special fenced blocks.
//!
//! Processors are registered with the renderer and checked in order when a
//! code block with a language is encountered. The first processor returning
//! a non-`PassThrough` result wins; otherwise the block is rendered as a
//! regular code block with a copy button.

/// Result of processing a code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessResult {
    /// Replace the code block with this HTML.
    Inline(String),
    /// Render as a regular code block.
    PassThrough,
}

/// Trait for processing special code blocks.
pub trait CodeBlockProcessor {
    /// Process a code block.
    ///
    /// # Arguments
    ///
    /// * `language` - Language identifier from the fence info string
    /// * `source` - Raw content of the code block
    fn process(&mut self, language: &str, source: &str) -> ProcessResult;

    /// Warnings generated during processing.
    fn warnings(&self) -> &[String] {
        &[]
    }
}

/// Language identifier from a fence info string (`rust ignore` → `rust`).
#[must_use]
pub(crate) fn fence_language(info: &str) -> Option<&str> {
    info.split_whitespace().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fence_language() {
        assert_eq!(fence_language("rust"), Some("rust"));
        assert_eq!(fence_language("  mermaid  title=x"), Some("mermaid"));
        assert_eq!(fence_language(""), None);
        assert_eq!(fence_language("   "), None);
    }
}
