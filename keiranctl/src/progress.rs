//! Upload progress reporting
//!
//! A byte counter drawn on stderr while the upload body streams out. It only
//! observes the transfer: nothing here can fail or hold up the request.

use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle, TermLike};
use std::fmt;
use std::sync::Arc;

/// Redraws per second. 15 Hz keeps draws at least ~66ms apart; faster
/// updates are folded into the next draw.
const REFRESH_HZ: u8 = 15;

const TEMPLATE: &str =
    "📤 Uploading {spinner} [{wide_bar}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

/// Progress bar for a single upload.
///
/// Cloning is cheap and every clone drives the same bar, so one clone can
/// sit inside the body stream while the caller keeps another to finish it.
#[derive(Clone)]
pub struct UploadProgress {
    bar: ProgressBar,
    /// Terminal the bar draws on; `None` for a hidden bar
    term: Option<Arc<dyn TermLike>>,
}

impl fmt::Debug for UploadProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadProgress")
            .field("position", &self.position())
            .field("total", &self.total())
            .field("visible", &self.term.is_some())
            .finish()
    }
}

impl UploadProgress {
    /// Bar drawn on stderr for a body of `total` bytes.
    pub fn stderr(total: u64) -> Self {
        Self::on_term(total, Term::stderr())
    }

    /// Bar drawn on `term`.
    pub fn on_term<T>(total: u64, term: T) -> Self
    where
        T: TermLike + Clone + 'static,
    {
        let bar = ProgressBar::with_draw_target(
            Some(total),
            ProgressDrawTarget::term_like_with_hz(Box::new(term.clone()), REFRESH_HZ),
        );
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            bar.set_style(style.progress_chars("=> "));
        }
        Self {
            bar,
            term: Some(Arc::new(term)),
        }
    }

    /// Bar that counts bytes without drawing anything.
    pub fn hidden(total: u64) -> Self {
        Self {
            bar: ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::hidden()),
            term: None,
        }
    }

    /// Pick a visible or hidden bar.
    pub fn new(total: u64, visible: bool) -> Self {
        if visible {
            Self::stderr(total)
        } else {
            Self::hidden(total)
        }
    }

    /// Record `bytes` more bytes handed to the connection.
    pub fn advance(&self, bytes: u64) {
        self.bar.inc(bytes);
    }

    /// Bytes recorded so far.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Total body size the bar was created with.
    pub fn total(&self) -> u64 {
        self.bar.length().unwrap_or(0)
    }

    /// Draw the final state and end the bar's line.
    ///
    /// indicatif leaves the cursor after the last draw, so the newline is
    /// written here; whatever is printed next starts on a fresh line.
    pub fn finish(&self) {
        if self.bar.is_finished() {
            return;
        }
        self.bar.finish();
        if let Some(term) = &self.term {
            // Progress output is best effort
            let _ = term.write_line("");
            let _ = term.flush();
        }
    }

    /// Remove the bar without leaving a completed line behind (failed uploads).
    pub fn abandon(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
