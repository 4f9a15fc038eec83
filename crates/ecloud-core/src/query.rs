//! Query-string assembly.
//!
//! List endpoints take pagination and filter parameters which the client
//! forwards verbatim. This builder collects them, skipping empty values,
//! and renders a percent-encoded `?key=value` suffix.

use std::fmt::Display;
use url::form_urlencoded;

/// Builder for URL query parameters.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key/value pair; values rendering to the empty string are
    /// skipped.
    pub fn push<T: Display>(&mut self, key: &'static str, value: T) {
        let rendered = value.to_string();
        if !rendered.is_empty() {
            self.pairs.push((key, rendered));
        }
    }

    /// Append a key/value pair when the value is present.
    pub fn push_opt<T: Display>(&mut self, key: &'static str, value: Option<T>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Append `key=true` when `set` holds.
    pub fn push_flag(&mut self, key: &'static str, set: bool) {
        if set {
            self.pairs.push((key, "true".to_string()));
        }
    }

    /// Returns true when no parameters have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Render `url` with the collected parameters appended, or unchanged
    /// when there are none.
    #[must_use]
    pub fn append_to(&self, url: &str) -> String {
        if self.pairs.is_empty() {
            return url.to_string();
        }
        let mut encoded = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            encoded.append_pair(key, value);
        }
        format!("{url}?{}", encoded.finish())
    }
}
