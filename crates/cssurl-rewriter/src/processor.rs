//! Processing a whole run of declarations.
//!
//! Two passes: every declaration is parsed and its references extracted
//! first, because placeholder assignment needs all references of the run.
//! Only then are the trees rewritten and written back to the declarations.

use cssurl_core::{Declaration, Diagnostic, DiagnosticSink, ValueTree};
use cssurl_parser::parse_value_with;
use tracing::{debug, warn};

use crate::dedup::collect_groups;
use crate::extract::{extract_urls, needs_parse, UrlReference};
use crate::options::Options;
use crate::records::{records_for, OutputRecord};
use crate::rewrite::rewrite_tree;

/// Result of [`process`].
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    /// One import and one replacer record per group, in group index order.
    pub records: Vec<OutputRecord>,
    /// Indices of declarations whose value was rewritten, ascending.
    pub rewritten: Vec<usize>,
}

/// A declaration that produced at least one reference.
struct ParsedDeclaration {
    index: usize,
    tree: ValueTree,
    urls: Vec<UrlReference>,
}

/// Extract, group and rewrite URL references in `declarations`.
///
/// Declarations without references keep their value untouched. Warnings for
/// empty references and errors for values that fail to parse go to `sink`;
/// neither stops the run.
pub fn process<S>(declarations: &mut [Declaration], options: &Options, sink: &mut S) -> RunOutput
where
    S: DiagnosticSink + ?Sized,
{
    let parser_options = options.parser_options();
    let mut parsed = Vec::new();

    for (index, decl) in declarations.iter().enumerate() {
        if !needs_parse(&decl.value) {
            continue;
        }

        let tree = match parse_value_with(&decl.value, &parser_options) {
            Ok(tree) => tree,
            Err(err) => {
                warn!(declaration = index, error = %err, "failed to parse value");
                sink.report(Diagnostic::error(
                    format!("Unable to parse '{decl}': {err}"),
                    Some(decl.span),
                ));
                continue;
            }
        };

        let extraction = extract_urls(&tree, &decl.value, Some(decl), options.filter.as_deref());
        for warning in extraction.warnings {
            warn!(declaration = index, "{}", warning.message);
            sink.report(warning);
        }

        if !extraction.urls.is_empty() {
            parsed.push(ParsedDeclaration {
                index,
                tree,
                urls: extraction.urls,
            });
        }
    }

    let groups = collect_groups(
        parsed
            .iter()
            .flat_map(|item| item.urls.iter().map(move |url| (item.index, url))),
    );
    let records = records_for(&groups);

    let mut rewritten = Vec::new();
    for mut item in parsed {
        rewrite_tree(&mut item.tree, item.index, &groups);
        let value = item.tree.to_string();
        let decl = &mut declarations[item.index];
        if decl.value != value {
            decl.value = value;
            rewritten.push(item.index);
        }
    }

    debug!(
        declarations = declarations.len(),
        groups = groups.len(),
        rewritten = rewritten.len(),
        "processed url references"
    );

    RunOutput { records, rewritten }
}
