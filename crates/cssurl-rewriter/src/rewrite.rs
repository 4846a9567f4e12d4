//! Second pass: substitute placeholders into a parsed value.

use cssurl_core::ValueTree;

use crate::dedup::{Groups, NodeRef};
use crate::extract::walk_url_targets;

/// Replace every grouped URL node of `tree` with its placeholder word.
///
/// `declaration` is the index the tree's references were grouped under.
/// Nodes without a group (empty or filtered references) are left alone.
/// Returns the number of nodes replaced.
pub fn rewrite_tree(tree: &mut ValueTree, declaration: usize, groups: &Groups) -> usize {
    let mut replacements = Vec::new();
    walk_url_targets(tree, |target| {
        let Some(node) = target.node else {
            return;
        };
        if let Some(placeholder) = groups.placeholder_for(NodeRef { declaration, node }) {
            replacements.push((node, placeholder.to_string()));
        }
    });

    let count = replacements.len();
    for (node, placeholder) in replacements {
        tree.replace_with_word(node, placeholder);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup::collect_groups;
    use crate::extract::extract_urls;
    use cssurl_parser::parse_value;

    fn rewrite(value: &str) -> (String, usize) {
        let mut tree = parse_value(value).unwrap();
        let extraction = extract_urls(&tree, value, None, None);
        let groups = collect_groups(extraction.urls.iter().map(|r| (0, r)));
        let count = rewrite_tree(&mut tree, 0, &groups);
        (tree.to_string(), count)
    }

    #[test]
    fn test_rewrite_keeps_surrounding_text() {
        let (text, count) = rewrite(r#"url( "a.png" ) no-repeat, url(b.png)"#);
        assert_eq!(count, 2);
        insta::assert_snapshot!(
            text,
            @"url( ___CSS_LOADER_URL_IMPORT_0___ ) no-repeat, url(___CSS_LOADER_URL_IMPORT_1___)"
        );
    }

    #[test]
    fn test_rewrite_image_set_string_is_bare() {
        let (text, _) = rewrite(r#"image-set("a.png" 1x, url('a.png') 2x)"#);
        insta::assert_snapshot!(
            text,
            @"image-set(___CSS_LOADER_URL_IMPORT_0___ 1x, url(___CSS_LOADER_URL_IMPORT_1___) 2x)"
        );
    }

    #[test]
    fn test_empty_url_untouched() {
        let (text, count) = rewrite("url('') , url(a.png)");
        assert_eq!(count, 1);
        assert_eq!(text, "url('') , url(___CSS_LOADER_URL_IMPORT_0___)");
    }

    #[test]
    fn test_other_tree_index_is_ignored() {
        let value = "url(a.png)";
        let mut tree = parse_value(value).unwrap();
        let extraction = extract_urls(&tree, value, None, None);
        let groups = collect_groups(extraction.urls.iter().map(|r| (7, r)));

        assert_eq!(rewrite_tree(&mut tree, 0, &groups), 0);
        assert_eq!(tree.to_string(), value);
    }

    #[test]
    fn test_no_references_round_trips() {
        let (text, count) = rewrite("linear-gradient(red 0%, blue 100%) /* c */");
        assert_eq!(count, 0);
        assert_eq!(text, "linear-gradient(red 0%, blue 100%) /* c */");
    }
}
