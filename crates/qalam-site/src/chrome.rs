//! Page chrome shared by every route: sidebar, navigation, language toggle,
//! footer and theme.
//!
//! All of it is derived from configuration and availability, never from the
//! page being shown. Text from configuration is escaped on the way out.

use std::fmt::Write;

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};
use qalam_config::{Author, Lang, Platform, SiteConfig, Theme};
use qalam_renderer::{Icon, escape_html};

/// Characters that must be escaped inside an SVG `data:` URI.
const DATA_URI_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b'%')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'"')
    .add(b' ');

/// Icon for a social platform.
#[must_use]
pub fn platform_icon(platform: Platform) -> Icon {
    match platform {
        Platform::Twitter => Icon::Twitter,
        Platform::Github => Icon::Github,
        Platform::Instagram => Icon::Instagram,
        Platform::Linkedin => Icon::Linkedin,
        Platform::Email => Icon::Email,
        Platform::Other => Icon::Link,
    }
}

/// Author profile card with location, website and social links.
#[must_use]
pub fn sidebar(author: &Author, lang: Lang) -> String {
    let name = escape_html(author.name.resolve(lang));
    let bio = escape_html(author.bio.resolve(lang));

    let mut html = String::from(r#"<div class="sidebar-inner">"#);
    write!(
        html,
        r#"<div class="profile-card"><img class="avatar" src="{}" alt="{name}" loading="lazy"><h2 class="author-name">{name}</h2><p class="author-bio">{bio}</p></div>"#,
        escape_html(&author.avatar)
    )
    .unwrap();

    html.push_str(r#"<div class="author-info">"#);
    if let Some(location) = &author.location {
        write!(
            html,
            r#"<div class="info-item">{}<span>{}</span></div>"#,
            Icon::Location.svg(),
            escape_html(location)
        )
        .unwrap();
    }
    if let Some(website) = &author.website {
        write!(
            html,
            r#"<div class="info-item">{}<a href="{}" target="_blank" rel="noopener">{}</a></div>"#,
            Icon::Link.svg(),
            escape_html(&website.url),
            escape_html(&website.label)
        )
        .unwrap();
    }
    html.push_str("</div>");

    html.push_str(r#"<div class="author-links">"#);
    for link in &author.social {
        let label = escape_html(&link.label);
        write!(
            html,
            r#"<a href="{}" class="social-link" target="_blank" rel="noopener" aria-label="{label}">{}<span>{label}</span></a>"#,
            escape_html(&link.url),
            platform_icon(link.platform).svg()
        )
        .unwrap();
    }
    html.push_str("</div></div>");
    html
}

/// Navigation link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub slug: String,
    pub label: String,
    pub active: bool,
}

/// Render navigation links.
#[must_use]
pub fn nav(links: &[NavLink]) -> String {
    let mut html = String::new();
    for link in links {
        let class = if link.active { r#" class="active""# } else { "" };
        write!(
            html,
            r##"<a href="#{}"{class}>{}</a>"##,
            escape_html(&link.slug),
            escape_html(&link.label)
        )
        .unwrap();
    }
    html
}

/// Language toggle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LangToggle {
    /// Whether switching language makes sense for the current page.
    pub visible: bool,
    /// Language shown as selected.
    pub active: Lang,
}

impl LangToggle {
    #[must_use]
    pub fn to_html(&self) -> String {
        let display = if self.visible { "flex" } else { "none" };
        let mut html = format!(r#"<div id="lang-toggle" class="lang-toggle" style="display: {display}">"#);
        for lang in Lang::ALL {
            let class = if lang == self.active { r#" class="active""# } else { "" };
            let label = match lang {
                Lang::Ar => "العربية",
                Lang::En => "English",
            };
            write!(
                html,
                r#"<button type="button" data-lang="{}"{class}>{label}</button>"#,
                lang.code()
            )
            .unwrap();
        }
        html.push_str("</div>");
        html
    }
}

/// Footer text for the language with the year substituted.
#[must_use]
pub fn footer(config: &SiteConfig, lang: Lang, year: i32) -> String {
    escape_html(&config.footer_text(lang, year))
}

/// CSS custom properties for the accent color.
#[must_use]
pub fn theme_style(theme: &Theme) -> String {
    let mut css = format!(":root {{ --accent: {};", theme.accent);
    if let Some(light) = theme.accent_light() {
        write!(css, " --accent-light: {light};").unwrap();
    }
    css.push_str(" }");
    css
}

/// SVG favicon: a rounded square in the accent color with the first letter
/// of the Arabic site name.
#[must_use]
pub fn favicon_svg(config: &SiteConfig) -> String {
    let letter = config
        .site_name
        .ar
        .as_deref()
        .and_then(|name| name.chars().next())
        .unwrap_or('S');
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 32 32"><rect width="32" height="32" rx="6" fill="{}"/><text x="16" y="23" text-anchor="middle" font-family="sans-serif" font-size="20" font-weight="bold" fill="#fff">{}</text></svg>"##,
        escape_html(&config.theme.accent),
        escape_html(&letter.to_string())
    )
}

/// Favicon as a `data:` URI usable in `<link rel="icon">`.
#[must_use]
pub fn favicon_data_uri(config: &SiteConfig) -> String {
    let svg = favicon_svg(config);
    format!(
        "data:image/svg+xml,{}",
        percent_encode(svg.as_bytes(), DATA_URI_ENCODE_SET)
    )
}
