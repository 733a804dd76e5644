//! Mermaid diagram blocks.
//!
//! ` ```mermaid ` blocks are not highlighted or given a copy button. They are
//! replaced with a container the diagram library renders in the browser:
//!
//! ```html
//! <div class="mermaid-wrapper"><div class="mermaid">graph TD; A-->B</div></div>
//! ```

use crate::code_block::{CodeBlockProcessor, ProcessResult};
use crate::state::escape_html;

/// Code block processor for `mermaid` fences.
#[derive(Debug, Default)]
pub struct MermaidProcessor {
    warnings: Vec<String>,
}

impl MermaidProcessor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CodeBlockProcessor for MermaidProcessor {
    fn process(&mut self, language: &str, source: &str) -> ProcessResult {
        if language != "mermaid" {
            return ProcessResult::PassThrough;
        }
        let source = source.trim_end();
        if source.trim().is_empty() {
            tracing::warn!("Empty mermaid diagram block");
            self.warnings.push("empty mermaid diagram".to_owned());
        }
        ProcessResult::Inline(format!(
            r#"<div class="mermaid-wrapper"><div class="mermaid">{}</div></div>"#,
            escape_html(source)
        ))
    }

    fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
