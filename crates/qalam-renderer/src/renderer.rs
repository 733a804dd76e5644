//! Markdown renderer.

use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::code_block::{CodeBlockProcessor, ProcessResult, fence_language};
use crate::html;
use crate::state::{CodeBlockState, ImageState, TableState, TitleState, escape_html};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Text of the first H1 (if title extraction was enabled).
    pub title: Option<String>,
    /// Warnings from code block processors.
    pub warnings: Vec<String>,
}

/// Markdown to HTML renderer.
///
/// Handles GitHub Flavored Markdown and applies content post-processing
/// while rendering: tables are wrapped for horizontal scrolling and code
/// blocks get a copy button. Special code blocks (diagrams) are delegated to
/// registered [`CodeBlockProcessor`]s.
pub struct MarkdownRenderer {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    title: TitleState,
    pending_image: Option<(String, String)>,
    processors: Vec<Box<dyn CodeBlockProcessor>>,
}

/// GitHub Flavored Markdown: tables, strikethrough, task lists and alerts.
const GFM_OPTIONS: Options = Options::ENABLE_TABLES
    .union(Options::ENABLE_STRIKETHROUGH)
    .union(Options::ENABLE_TASKLISTS)
    .union(Options::ENABLE_GFM);

impl MarkdownRenderer {
    /// Create a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            title: TitleState::new(false),
            pending_image: None,
            processors: Vec::new(),
        }
    }

    /// Enable title extraction from the first H1 heading.
    ///
    /// The heading is still rendered.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.title = TitleState::new(true);
        self
    }

    /// Add a code block processor.
    ///
    /// Processors are checked in order when a code block is encountered.
    /// The first processor returning a non-`PassThrough` result wins.
    #[must_use]
    pub fn with_processor<P: CodeBlockProcessor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Render markdown text with GitHub Flavored Markdown enabled.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        let parser = Parser::new_ext(markdown, GFM_OPTIONS);
        self.render(parser)
    }

    /// Render markdown events and return the result.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }

        RenderResult {
            html: std::mem::take(&mut self.output),
            title: self.title.take_title(),
            warnings: self
                .processors
                .iter()
                .flat_map(|p| p.warnings())
                .cloned()
                .collect(),
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) if self.image.is_active() => self.image.push_str(&code),
            Event::Code(code) => {
                self.title.push_text(&code);
                write!(self.output, "<code>{}</code>", escape_html(&code)).unwrap();
            }
            Event::Html(html) | Event::InlineHtml(html) => self.output.push_str(&html),
            // Alt text is plain text on one line.
            Event::SoftBreak | Event::HardBreak if self.image.is_active() => {
                self.image.push_str(" ");
            }
            Event::SoftBreak => {
                if self.code.is_active() {
                    self.code.push_str("\n");
                } else {
                    self.output.push('\n');
                }
            }
            Event::HardBreak => self.output.push_str("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => html::task_list_marker(checked, &mut self.output),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                let level = heading_level_to_num(level);
                self.title.start_heading(level);
                write!(self.output, "<h{level}>").unwrap();
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(ref info) => fence_language(info).map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str(html::TABLE_START);
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                write!(self.output, "<{tag}{align}>").unwrap();
            }
            Tag::Emphasis => self.output.push_str("<em>"),
            Tag::Strong => self.output.push_str("<strong>"),
            Tag::Strikethrough => self.output.push_str("<del>"),
            Tag::Superscript => self.output.push_str("<sup>"),
            Tag::Subscript => self.output.push_str("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => html::link_start(&dest_url, &title, &mut self.output),
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text arrives as text events; the tag is written on end.
                self.image.start();
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(level) => {
                self.title.end_heading();
                write!(self.output, "</h{}>", heading_level_to_num(level)).unwrap();
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => self.end_code_block(),
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str(html::TABLE_END),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.output.push_str("</em>"),
            TagEnd::Strong => self.output.push_str("</strong>"),
            TagEnd::Strikethrough => self.output.push_str("</del>"),
            TagEnd::Superscript => self.output.push_str("</sup>"),
            TagEnd::Subscript => self.output.push_str("</sub>"),
            TagEnd::Link => self.output.push_str("</a>"),
            TagEnd::Image => {
                let alt = self.image.end();
                if let Some((src, title)) = self.pending_image.take() {
                    html::image(&src, &alt, &title, &mut self.output);
                }
            }
        }
    }

    fn end_code_block(&mut self) {
        let (lang, content) = self.code.end();

        let processed = lang.as_deref().and_then(|lang| {
            self.processors
                .iter_mut()
                .find_map(|processor| match processor.process(lang, &content) {
                    ProcessResult::Inline(html) => Some(html),
                    ProcessResult::PassThrough => None,
                })
        });

        match processed {
            Some(html) => self.output.push_str(&html),
            None => html::code_block(lang.as_deref(), &content, &mut self.output),
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else {
            self.title.push_text(text);
            self.output.push_str(&escape_html(text));
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::MermaidProcessor;

    fn render(markdown: &str) -> RenderResult {
        MarkdownRenderer::new().render_markdown(markdown)
    }

    #[test]
    fn test_basic_paragraph() {
        assert_eq!(render("Hello, world!").html, "<p>Hello, world!</p>");
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(render("a < b & c").html, "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_headings_and_inline_formatting() {
        let result = render("## Section\n\n**bold** *em* ~~gone~~ `code`");
        assert_eq!(
            result.html,
            "<h2>Section</h2><p><strong>bold</strong> <em>em</em> <del>gone</del> <code>code</code></p>"
        );
        assert_eq!(result.title, None);
    }

    #[test]
    fn test_title_extraction() {
        let mut renderer = MarkdownRenderer::new().with_title_extraction();
        let result = renderer.render_markdown("Intro\n\n# About `qalam`\n\n# Second");
        assert_eq!(result.title, Some("About qalam".to_owned()));
        assert!(result.html.contains("<h1>About <code>qalam</code></h1>"));
    }

    #[test]
    fn test_arabic_title_extraction() {
        let mut renderer = MarkdownRenderer::new().with_title_extraction();
        let result = renderer.render_markdown("# من أنا\n\nنص");
        assert_eq!(result.title, Some("من أنا".to_owned()));
    }

    #[test]
    fn test_table_is_wrapped() {
        let result = render("| a | b |\n|:--|--:|\n| 1 | 2 |");
        assert_eq!(
            result.html,
            concat!(
                r#"<div class="table-wrapper"><table><thead><tr>"#,
                r#"<th style="text-align:left">a</th><th style="text-align:right">b</th>"#,
                "</tr></thead><tbody><tr>",
                r#"<td style="text-align:left">1</td><td style="text-align:right">2</td>"#,
                "</tr></tbody></table></div>"
            )
        );
    }

    #[test]
    fn test_code_block_gets_copy_button() {
        let result = render("```rust\nfn main() {}\n```");
        assert!(result.html.starts_with(r#"<div class="code-block-wrapper"><pre><code class="language-rust">fn main() {}"#));
        assert!(result.html.contains("code-copy-btn"));
    }

    #[test]
    fn test_indented_code_block_gets_copy_button() {
        let result = render("    let x = 1;\n");
        assert!(result.html.contains("<pre><code>let x = 1;\n</code></pre>"));
        assert!(result.html.contains("code-copy-btn"));
    }

    #[test]
    fn test_mermaid_block_skips_copy_button() {
        let mut renderer = MarkdownRenderer::new().with_processor(MermaidProcessor::new());
        let result = renderer.render_markdown("```mermaid\ngraph TD\nA-->B\n```");
        assert_eq!(
            result.html,
            r#"<div class="mermaid-wrapper"><div class="mermaid">graph TD
A--&gt;B</div></div>"#
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_processor_warnings_are_collected() {
        let mut renderer = MarkdownRenderer::new().with_processor(MermaidProcessor::new());
        let result = renderer.render_markdown("```mermaid\n```");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_lists() {
        assert_eq!(render("- a\n- b").html, "<ul><li>a</li><li>b</li></ul>");
        assert_eq!(render("3. x").html, r#"<ol start="3"><li>x</li></ol>"#);
    }

    #[test]
    fn test_task_list() {
        let result = render("- [x] done\n- [ ] todo");
        assert!(result.html.contains(r#"<input type="checkbox" checked disabled>"#));
        assert!(result.html.contains(r#"<input type="checkbox" disabled>"#));
    }

    #[test]
    fn test_link_and_image() {
        let result = render(r#"[site](https://example.com "Home") ![a b](img.png)"#);
        assert_eq!(
            result.html,
            r#"<p><a href="https://example.com" title="Home">site</a> <img src="img.png" alt="a b"></p>"#
        );
    }

    #[test]
    fn test_raw_html_passes_through() {
        let result = render("<div class=\"note\">hi</div>\n");
        assert!(result.html.starts_with("<div class=\"note\">hi</div>"));
    }

    #[test]
    fn test_image_alt_keeps_inline_code_and_breaks() {
        let result = render("![a `b`\nc](x.png)");
        assert_eq!(
            result.html.trim_end(),
            r#"<p><img src="x.png" alt="a b c"></p>"#
        );
    }
}
