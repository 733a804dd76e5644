//! Progress and diagnostics for `qalam build` and `qalam render`.
//!
//! Every line goes to stderr; stdout carries only rendered documents.

use console::{Style, Term};

/// Stderr writer with one style per kind of line.
pub(crate) struct Output {
    term: Term,
    done: Style,
    skipped: Style,
    failed: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            done: Style::new().green(),
            skipped: Style::new().yellow(),
            failed: Style::new().red().bold(),
        }
    }

    /// Unstyled progress, e.g. `Scanning pages/blogs/`.
    pub(crate) fn info(&self, msg: &str) {
        self.line(None, msg);
    }

    pub(crate) fn blank(&self) {
        self.line(None, "");
    }

    /// A manifest or document was written.
    pub(crate) fn success(&self, msg: &str) {
        self.line(Some(&self.done), msg);
    }

    /// Something was left out but the command carries on.
    pub(crate) fn warning(&self, msg: &str) {
        self.line(Some(&self.skipped), msg);
    }

    /// The command failed and is about to exit with status 1.
    pub(crate) fn error(&self, msg: &str) {
        self.line(Some(&self.failed), msg);
    }

    fn line(&self, style: Option<&Style>, msg: &str) {
        let text = match style {
            Some(style) => style.apply_to(msg).to_string(),
            None => msg.to_owned(),
        };
        // Nothing useful to do when stderr is gone.
        let _ = self.term.write_line(&text);
    }
}
