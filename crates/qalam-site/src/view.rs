//! Rendered page and the HTML document around it.

use std::fmt::Write;

use qalam_config::{Direction, Lang};
use qalam_renderer::{Icon, escape_html};

use crate::chrome::LangToggle;
use crate::meta::MetaTags;
use crate::route::Route;

/// Everything needed to display one route.
#[derive(Clone, Debug)]
pub struct PageView {
    pub route: Route,
    /// Normalized fragment, without `#`.
    pub fragment: String,
    /// Language the page was rendered in, after fallback.
    pub lang: Lang,
    pub dir: Direction,
    /// Document title.
    pub title: String,
    pub meta: MetaTags,
    /// Main content HTML.
    pub content: String,
    pub sidebar: String,
    pub nav: String,
    pub lang_toggle: LangToggle,
    pub footer: String,
    /// Inline CSS with theme custom properties.
    pub theme_style: String,
    /// Favicon `data:` URI.
    pub favicon: String,
    /// False for any "not found" variant.
    pub found: bool,
    /// Warnings raised while rendering content.
    pub warnings: Vec<String>,
}

impl PageView {
    /// Render a complete HTML document.
    #[must_use]
    pub fn to_document(&self) -> String {
        let mut html = String::with_capacity(self.content.len() + 8192);
        html.push_str("<!DOCTYPE html>\n");
        writeln!(
            html,
            r#"<html lang="{}" dir="{}">"#,
            self.lang.code(),
            self.dir.as_str()
        )
        .unwrap();

        html.push_str("<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        writeln!(html, "<title>{}</title>", escape_html(&self.title)).unwrap();
        html.push_str(&self.meta.to_html());
        writeln!(
            html,
            r#"<link rel="icon" type="image/svg+xml" href="{}">"#,
            escape_html(&self.favicon)
        )
        .unwrap();
        writeln!(html, "<style>{}</style>", self.theme_style).unwrap();
        html.push_str("</head>\n<body>\n");

        writeln!(html, r#"<aside id="sidebar" class="sidebar">{}</aside>"#, self.sidebar).unwrap();
        html.push_str("<div id=\"sidebar-overlay\" class=\"sidebar-overlay\"></div>\n");
        html.push_str("<main class=\"main\">\n");
        writeln!(
            html,
            r#"<header class="topbar"><button id="menu-btn" class="menu-btn" type="button" aria-label="Menu">{}</button><nav id="nav-links" class="nav-links">{}</nav>{}</header>"#,
            Icon::Menu.svg(),
            self.nav,
            self.lang_toggle.to_html()
        )
        .unwrap();
        writeln!(html, r#"<article id="content" class="content">{}</article>"#, self.content).unwrap();
        writeln!(html, "<footer>{}</footer>", self.footer).unwrap();
        html.push_str("</main>\n</body>\n</html>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_shell() {
        let view = PageView {
            route: Route::StaticPage {
                slug: "about".to_owned(),
            },
            fragment: "about".to_owned(),
            lang: Lang::Ar,
            dir: Direction::Rtl,
            title: "عن <الموقع>".to_owned(),
            meta: MetaTags::default(),
            content: "<h1>عن</h1>".to_owned(),
            sidebar: "<div>side</div>".to_owned(),
            nav: r##"<a href="#about" class="active">عن</a>"##.to_owned(),
            lang_toggle: LangToggle {
                visible: false,
                active: Lang::Ar,
            },
            footer: "© 2026".to_owned(),
            theme_style: ":root { --accent: #000000; }".to_owned(),
            favicon: "data:image/svg+xml,%3Csvg%3E".to_owned(),
            found: true,
            warnings: Vec::new(),
        };

        let html = view.to_document();
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"ar\" dir=\"rtl\">\n"));
        assert!(html.contains("<title>عن &lt;الموقع&gt;</title>"));
        assert!(html.contains(r#"<article id="content" class="content"><h1>عن</h1></article>"#));
        assert!(html.contains("<footer>© 2026</footer>"));
        assert!(html.contains(r#"<style>:root { --accent: #000000; }</style>"#));
        assert!(html.contains(r#"href="data:image/svg+xml,%3Csvg%3E""#));
        assert!(html.contains(r#"<aside id="sidebar" class="sidebar"><div>side</div></aside>"#));
        assert!(html.ends_with("</html>\n"));
    }
}
