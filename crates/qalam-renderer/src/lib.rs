//! Markdown to HTML rendering for Qalam pages.
//!
//! [`MarkdownRenderer`] walks `pulldown-cmark` events and writes HTML with
//! the page post-processing already applied:
//!
//! - tables wrapped in `<div class="table-wrapper">` for horizontal scroll
//! - code blocks wrapped in `<div class="code-block-wrapper">` with a copy
//!   button
//! - `mermaid` blocks replaced by a diagram container ([`MermaidProcessor`])
//!
//! # Example
//!
//! ```
//! use qalam_renderer::render_content;
//!
//! let result = render_content("# Hello\n\n| a |\n|---|\n| 1 |");
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! assert!(result.html.contains("table-wrapper"));
//! ```

mod code_block;
mod html;
mod icons;
mod mermaid;
mod renderer;
mod state;

pub use code_block::{CodeBlockProcessor, ProcessResult};
pub use icons::Icon;
pub use mermaid::MermaidProcessor;
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::escape_html;

/// Render page content with title extraction and diagram support.
#[must_use]
pub fn render_content(markdown: &str) -> RenderResult {
    MarkdownRenderer::new()
        .with_title_extraction()
        .with_processor(MermaidProcessor::new())
        .render_markdown(markdown)
}
