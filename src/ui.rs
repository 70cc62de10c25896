// UI layer: wraps the API client so a spinner runs on stderr while a request
// is in flight. indicatif hides the spinner when stderr is not a terminal,
// so piped output stays clean.

use crate::api::{ExpandResult, ShortenResult, UrlShortener};
use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct Spinning<S> {
    inner: S,
}

impl<S> Spinning<S> {
    pub fn new(inner: S) -> Self {
        Spinning { inner }
    }
}

impl<S: UrlShortener> UrlShortener for Spinning<S> {
    fn shorten(&self, url: &str, key: &str) -> Result<ShortenResult> {
        with_spinner("Shortening...", || self.inner.shorten(url, key))
    }

    fn expand(&self, url: &str, key: &str) -> Result<ExpandResult> {
        with_spinner("Expanding...", || self.inner.expand(url, key))
    }
}

fn with_spinner<T>(message: &'static str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    let out = f();
    spinner.finish_and_clear();
    out
}
