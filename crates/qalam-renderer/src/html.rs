//! HTML fragments for elements that need more than a plain tag.
//!
//! Tables are wrapped for horizontal scrolling and code blocks get a copy
//! button, so content is ready to display without a client-side pass.

use std::fmt::Write;

use crate::icons::Icon;
use crate::state::escape_html;

/// Opening markup for a table.
pub(crate) const TABLE_START: &str = r#"<div class="table-wrapper"><table>"#;

/// Closing markup for a table.
pub(crate) const TABLE_END: &str = "</tbody></table></div>";

/// Copy button label appended after the icon.
const COPY_LABEL: &str = " Copy";

/// Render a code block inside a wrapper with a copy button.
pub(crate) fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
    out.push_str(r#"<div class="code-block-wrapper">"#);
    if let Some(lang) = lang {
        write!(
            out,
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            escape_html(lang),
            escape_html(content)
        )
        .unwrap();
    } else {
        write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap();
    }
    write!(
        out,
        r#"<button class="code-copy-btn" type="button">{}{COPY_LABEL}</button></div>"#,
        Icon::Copy.svg()
    )
    .unwrap();
}

pub(crate) fn image(src: &str, alt: &str, title: &str, out: &mut String) {
    let title_attr = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape_html(title))
    };
    write!(
        out,
        r#"<img src="{}"{title_attr} alt="{}">"#,
        escape_html(src),
        escape_html(alt)
    )
    .unwrap();
}

pub(crate) fn link_start(href: &str, title: &str, out: &mut String) {
    if title.is_empty() {
        write!(out, r#"<a href="{}">"#, escape_html(href)).unwrap();
    } else {
        write!(
            out,
            r#"<a href="{}" title="{}">"#,
            escape_html(href),
            escape_html(title)
        )
        .unwrap();
    }
}

pub(crate) fn task_list_marker(checked: bool, out: &mut String) {
    if checked {
        out.push_str(r#"<input type="checkbox" checked disabled> "#);
    } else {
        out.push_str(r#"<input type="checkbox" disabled> "#);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block_with_language() {
        let mut out = String::new();
        code_block(Some("rust"), "let x = 1 < 2;\n", &mut out);
        assert!(out.starts_with(
            r#"<div class="code-block-wrapper"><pre><code class="language-rust">let x = 1 &lt; 2;"#
        ));
        assert!(out.contains(r#"<button class="code-copy-btn" type="button"><svg "#));
        assert!(out.ends_with("</svg> Copy</button></div>"));
    }

    #[test]
    fn test_code_block_without_language() {
        let mut out = String::new();
        code_block(None, "plain", &mut out);
        assert!(out.contains("<pre><code>plain</code></pre>"));
    }

    #[test]
    fn test_image() {
        let mut out = String::new();
        image("a.png", "Alt", "", &mut out);
        assert_eq!(out, r#"<img src="a.png" alt="Alt">"#);

        let mut out = String::new();
        image("a.png", "Alt", "T", &mut out);
        assert_eq!(out, r#"<img src="a.png" title="T" alt="Alt">"#);
    }

    #[test]
    fn test_link_escapes_href() {
        let mut out = String::new();
        link_start(r#"x"onclick="y"#, "", &mut out);
        assert_eq!(out, r#"<a href="x&quot;onclick=&quot;y">"#);
    }
}
