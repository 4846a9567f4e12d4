//! Run configuration.

use std::fmt;

use cssurl_parser::ParserOptions;

/// Signature of the inclusion predicate applied to each cleaned URL.
pub type UrlFilterFn = dyn Fn(&str) -> bool + Send + Sync;

/// Boxed inclusion predicate.
pub type UrlFilter = Box<UrlFilterFn>;

/// Options for a processing run.
pub struct Options {
    /// Decides whether a URL is extracted. `None` accepts everything.
    pub filter: Option<UrlFilter>,
    /// Function nesting limit passed to the tokenizer.
    pub max_depth: usize,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only extract URLs for which `filter` returns `true`.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub(crate) fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            max_depth: self.max_depth,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            filter: None,
            max_depth: ParserOptions::default().max_depth,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("filter", &self.filter.as_ref().map(|_| "<function>"))
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
