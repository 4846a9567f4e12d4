//! Reference extraction from a parsed value.
//!
//! Only two shapes are recognized: `url(...)` anywhere in the tree, and
//! string or `url(...)` arguments directly inside `image-set(...)`. The walk
//! never descends into either function.

use cssurl_core::{Declaration, Diagnostic, NodeId, ValueNode, ValueTree, Walk};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::options::UrlFilterFn;
use crate::split::split_url;

static NEEDS_PARSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:url|image-set)\(").expect("valid regex"));

static IMAGE_SET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:-[a-z0-9]+-)?image-set$").expect("valid regex"));

static LINE_CONTINUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\(?:\r\n|[\n\r\x0c])").expect("valid regex"));

/// One URL occurrence found in a value tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlReference {
    /// Node that gets replaced by the placeholder.
    pub node: NodeId,
    /// URL with any `?#fragment` suffix removed.
    pub url: String,
    /// The removed suffix, see [`split_url`].
    pub hash: String,
    /// The reference was a bare string inside `image-set`, so the
    /// substituted text has to be quoted again.
    pub needs_quotes: bool,
}

/// References and warnings produced for one value.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub urls: Vec<UrlReference>,
    pub warnings: Vec<Diagnostic>,
}

/// A candidate found by [`walk_url_targets`], before any cleanup or filtering.
#[derive(Debug, Clone)]
pub(crate) struct UrlTarget {
    /// `None` for `url()` without any argument.
    pub node: Option<NodeId>,
    pub raw: String,
    pub needs_quotes: bool,
}

/// Coarse check run before tokenizing: does the text mention `url(` or `image-set(`?
pub fn needs_parse(value: &str) -> bool {
    NEEDS_PARSE.is_match(value)
}

pub(crate) fn is_url_function(name: &str) -> bool {
    name.eq_ignore_ascii_case("url")
}

pub(crate) fn is_image_set_function(name: &str) -> bool {
    IMAGE_SET.is_match(name)
}

/// Remove escaped line breaks and surrounding whitespace.
fn clean_url(raw: &str) -> String {
    LINE_CONTINUATION.replace_all(raw, "").trim().to_string()
}

fn url_function_target(tree: &ValueTree, children: &[NodeId]) -> UrlTarget {
    let first = children.first().copied();
    let raw = match first.map(|id| &tree[id]) {
        Some(ValueNode::String { value, .. }) => value.clone(),
        _ => tree.stringify(children),
    };
    UrlTarget {
        node: first,
        raw,
        needs_quotes: false,
    }
}

/// Visit every URL candidate in document order.
///
/// Extraction and rewriting both go through here, so they always agree on
/// which nodes are candidates.
pub(crate) fn walk_url_targets<F>(tree: &ValueTree, mut visit: F)
where
    F: FnMut(UrlTarget),
{
    tree.walk(|_, node| {
        let ValueNode::Function { name, children, .. } = node else {
            return Walk::Continue;
        };

        if is_url_function(name) {
            visit(url_function_target(tree, children));
            return Walk::Skip;
        }

        if is_image_set_function(name) {
            for &child in children {
                match &tree[child] {
                    ValueNode::Function {
                        name,
                        children: url_children,
                        ..
                    } if is_url_function(name) => {
                        visit(url_function_target(tree, url_children));
                    }
                    ValueNode::String { value, .. } => visit(UrlTarget {
                        node: Some(child),
                        raw: value.clone(),
                        needs_quotes: true,
                    }),
                    _ => {}
                }
            }
            return Walk::Skip;
        }

        Walk::Continue
    });
}

/// Extract URL references from `tree` without modifying it.
///
/// `value` is the text the tree was parsed from. Empty references produce a
/// warning naming `declaration` (or `value` when there is none) and are
/// dropped; references rejected by `filter` are dropped silently.
pub fn extract_urls(
    tree: &ValueTree,
    value: &str,
    declaration: Option<&Declaration>,
    filter: Option<&UrlFilterFn>,
) -> Extraction {
    let mut extraction = Extraction::default();

    walk_url_targets(tree, |target| {
        let cleaned = clean_url(&target.raw);

        let node = match target.node {
            Some(node) if !cleaned.is_empty() => node,
            _ => {
                let (origin, span) = match declaration {
                    Some(decl) => (decl.to_string(), Some(decl.span)),
                    None => (value.to_string(), None),
                };
                extraction
                    .warnings
                    .push(Diagnostic::warning(format!("Unable to find uri in '{origin}'"), span));
                return;
            }
        };

        if let Some(filter) = filter {
            if !filter(&cleaned) {
                return;
            }
        }

        let (url, hash) = split_url(&cleaned);
        extraction.urls.push(UrlReference {
            node,
            url: url.to_string(),
            hash,
            needs_quotes: target.needs_quotes,
        });
    });

    extraction
}
