//! URL reference extraction and rewriting for CSS declarations.
//!
//! This crate:
//! - Finds `url(...)` and `image-set(...)` references in declaration values
//! - Groups identical references and gives each group a placeholder
//! - Rewrites the values with placeholders and emits one import/replacer
//!   record pair per group for the resolver stage

mod dedup;
mod extract;
mod options;
mod processor;
mod records;
mod rewrite;
mod split;

pub use dedup::{collect_groups, placeholder_name, Groups, NodeRef, UrlGroup, PLACEHOLDER_PREFIX};
pub use extract::{extract_urls, needs_parse, Extraction, UrlReference};
pub use options::{Options, UrlFilter, UrlFilterFn};
pub use processor::{process, RunOutput};
pub use records::{records_for, ImportRequest, OutputRecord, ReplaceDirective};
pub use rewrite::rewrite_tree;
pub use split::split_url;
