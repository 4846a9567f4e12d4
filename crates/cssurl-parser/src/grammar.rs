//! Grammar for CSS values.
//!
//! Leaf tokens come from the lexer; nesting is handled by a small stateful
//! parser that tracks the remaining input and the current function depth.

use cssurl_core::{NodeId, ParseError, ValueNode, ValueTree};

use crate::lexer::*;

/// Tokenizer configuration.
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Maximum depth of nested functions before parsing fails.
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self { max_depth: 128 }
    }
}

/// Parse a complete value string.
pub fn parse(input: &str, options: &ParserOptions) -> Result<ValueTree, ParseError> {
    let mut parser = Parser::new(input, options.max_depth);
    let (mut roots, trailing, _) = parser.parse_nodes(false)?;
    if !trailing.is_empty() {
        roots.push(parser.space(trailing));
    }
    parser.tree.set_roots(roots);
    Ok(parser.tree)
}

/// Nodes of one nesting level together with what ended them.
type Level<'a> = (Vec<NodeId>, &'a str, bool);

struct Parser<'a> {
    source: &'a str,
    rest: &'a str,
    depth: usize,
    max_depth: usize,
    tree: ValueTree,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, max_depth: usize) -> Self {
        Self {
            source,
            rest: source,
            depth: 0,
            max_depth,
            tree: ValueTree::new(),
        }
    }

    /// Byte offset of the current position.
    fn offset(&self) -> usize {
        self.source.len() - self.rest.len()
    }

    fn space(&mut self, value: &str) -> NodeId {
        self.tree.alloc(ValueNode::Space { value: value.to_string() })
    }

    fn word(&mut self, value: &str) -> NodeId {
        self.tree.alloc(ValueNode::Word { value: value.to_string() })
    }

    /// Parse nodes until end of input or, inside a function, its closing `)`.
    ///
    /// Whitespace is held back until the next token is known: a divider
    /// absorbs it, anything else gets a `Space` node. Whitespace that runs up
    /// to the end of the level is returned unallocated so a function can keep
    /// it as `after`. The flag reports whether a closing `)` was consumed.
    fn parse_nodes(&mut self, in_function: bool) -> Result<Level<'a>, ParseError> {
        let mut nodes = Vec::new();
        let mut pending: &'a str = "";

        loop {
            let Some(c) = self.rest.chars().next() else {
                return Ok((nodes, pending, false));
            };

            if c == ')' && in_function {
                self.rest = &self.rest[1..];
                return Ok((nodes, pending, true));
            }

            if let Ok((rest, ws)) = whitespace(self.rest) {
                self.rest = rest;
                pending = ws;
                continue;
            }

            if is_div(c) && !self.rest.starts_with("/*") {
                let before = std::mem::take(&mut pending);
                self.rest = &self.rest[c.len_utf8()..];
                let (rest, after) = opt_whitespace(self.rest).unwrap_or((self.rest, ""));
                self.rest = rest;
                nodes.push(self.tree.alloc(ValueNode::Div {
                    value: c,
                    before: before.to_string(),
                    after: after.to_string(),
                }));
                continue;
            }

            if !pending.is_empty() {
                let ws = std::mem::take(&mut pending);
                nodes.push(self.space(ws));
            }

            let node = self.parse_token(c)?;
            nodes.push(node);
        }
    }

    /// Parse one non-whitespace, non-divider token starting with `c`.
    fn parse_token(&mut self, c: char) -> Result<NodeId, ParseError> {
        if let Ok((rest, (body, unclosed))) = comment(self.rest) {
            self.rest = rest;
            return Ok(self.tree.alloc(ValueNode::Comment {
                value: body.to_string(),
                unclosed,
            }));
        }

        if let Ok((rest, (quote, body, unclosed))) = quoted_string(self.rest) {
            self.rest = rest;
            return Ok(self.tree.alloc(ValueNode::String {
                value: body.to_string(),
                quote,
                unclosed,
            }));
        }

        if c == '(' {
            return self.parse_function("");
        }

        if let Ok((rest, text)) = word(self.rest) {
            self.rest = rest;
            if self.rest.starts_with('(') {
                return self.parse_function(text);
            }
            return Ok(self.word(text));
        }

        // A `)` outside of any function.
        let (text, rest) = self.rest.split_at(c.len_utf8());
        self.rest = rest;
        Ok(self.word(text))
    }

    /// Parse `name(...)`. The input is positioned on the opening parenthesis.
    fn parse_function(&mut self, name: &str) -> Result<NodeId, ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                depth: self.max_depth,
                offset: self.offset(),
            });
        }

        self.rest = &self.rest[1..];
        let (rest, before) = opt_whitespace(self.rest).unwrap_or((self.rest, ""));
        self.rest = rest;

        if name.eq_ignore_ascii_case("url") && !self.rest.starts_with(['"', '\'']) {
            return Ok(self.parse_unquoted_url(name, before));
        }

        self.depth += 1;
        let (children, after, closed) = self.parse_nodes(true)?;
        self.depth -= 1;

        Ok(self.tree.alloc(ValueNode::Function {
            name: name.to_string(),
            before: before.to_string(),
            after: after.to_string(),
            children,
            unclosed: !closed,
        }))
    }

    /// `url(` followed by anything but a quote: the whole body is one word.
    fn parse_unquoted_url(&mut self, name: &str, before: &str) -> NodeId {
        let (rest, body) = unquoted_url(self.rest).unwrap_or((self.rest, ""));
        let closed = rest.starts_with(')');
        self.rest = if closed { &rest[1..] } else { rest };

        let mut content = body.trim_end_matches(is_space);
        // Keep an escaped whitespace character inside the word.
        let backslashes = content.chars().rev().take_while(|&c| c == '\\').count();
        if backslashes % 2 == 1 && content.len() < body.len() {
            let next = body[content.len()..].chars().next().map_or(0, char::len_utf8);
            content = &body[..content.len() + next];
        }
        let after = &body[content.len()..];

        let children = if content.is_empty() {
            Vec::new()
        } else {
            vec![self.word(content)]
        };

        self.tree.alloc(ValueNode::Function {
            name: name.to_string(),
            before: before.to_string(),
            after: after.to_string(),
            children,
            unclosed: !closed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cssurl_core::NodeKind;
    use proptest::prelude::*;

    fn parse_default(input: &str) -> ValueTree {
        parse(input, &ParserOptions::default()).unwrap()
    }

    fn root_kinds(tree: &ValueTree) -> Vec<NodeKind> {
        tree.roots().iter().map(|&id| tree[id].kind()).collect()
    }

    #[test]
    fn test_parse_words_and_spaces() {
        let tree = parse_default("no-repeat  center");
        assert_eq!(
            root_kinds(&tree),
            vec![NodeKind::Word, NodeKind::Space, NodeKind::Word]
        );
        assert_eq!(tree.to_string(), "no-repeat  center");
        assert_eq!(tree.len(), 3);
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_parse_empty_value() {
        let tree = parse_default("");
        assert!(tree.is_empty());
        assert!(tree.roots().is_empty());
    }

    #[test]
    fn test_parse_unquoted_url_is_single_word() {
        let tree = parse_default("url( data:image/png;base64,AAA= )");
        let func = &tree[tree.roots()[0]];

        if let ValueNode::Function { name, before, after, children, unclosed } = func {
            assert_eq!(name, "url");
            assert_eq!(before, " ");
            assert_eq!(after, " ");
            assert!(!unclosed);
            assert_eq!(children.len(), 1);
            assert_eq!(
                tree[children[0]],
                ValueNode::Word { value: "data:image/png;base64,AAA=".to_string() }
            );
        } else {
            panic!("Expected function node");
        }
    }

    #[test]
    fn test_parse_uppercase_url() {
        let tree = parse_default("URL(a.png)");
        let children = tree[tree.roots()[0]].children();
        assert_eq!(children.len(), 1);
        assert_eq!(tree[children[0]].kind(), NodeKind::Word);
    }

    #[test]
    fn test_parse_quoted_url() {
        let tree = parse_default(r#"url( "a b.png" )"#);
        let func = &tree[tree.roots()[0]];
        let children = func.children();
        assert_eq!(children.len(), 1);
        assert_eq!(
            tree[children[0]],
            ValueNode::String {
                value: "a b.png".to_string(),
                quote: '"',
                unclosed: false,
            }
        );
        assert_eq!(tree.to_string(), r#"url( "a b.png" )"#);
    }

    #[test]
    fn test_parse_empty_url() {
        let tree = parse_default("url(  )");
        let func = &tree[tree.roots()[0]];
        assert!(func.children().is_empty());
        assert_eq!(tree.to_string(), "url(  )");
    }

    #[test]
    fn test_parse_image_set_arguments() {
        let tree = parse_default(r#"image-set("a.png" 1x, url(b.png) 2x)"#);
        let func = &tree[tree.roots()[0]];
        assert_eq!(func.function_name(), Some("image-set"));

        let kinds: Vec<_> = func.children().iter().map(|&id| tree[id].kind()).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::String,
                NodeKind::Space,
                NodeKind::Word,
                NodeKind::Div,
                NodeKind::Function,
                NodeKind::Space,
                NodeKind::Word,
            ]
        );
    }

    #[test]
    fn test_div_absorbs_whitespace() {
        let tree = parse_default("a , b");
        assert_eq!(root_kinds(&tree), vec![NodeKind::Word, NodeKind::Div, NodeKind::Word]);
        assert_eq!(
            tree[tree.roots()[1]],
            ValueNode::Div {
                value: ',',
                before: " ".to_string(),
                after: " ".to_string(),
            }
        );
    }

    #[test]
    fn test_nested_functions() {
        let tree = parse_default("linear-gradient(rgba(0, 0, 0, .5), transparent)");
        let outer = &tree[tree.roots()[0]];
        let inner = &tree[outer.children()[0]];
        assert_eq!(inner.function_name(), Some("rgba"));
        assert_eq!(inner.children().len(), 7);
    }

    #[test]
    fn test_comment_is_not_a_divider() {
        let tree = parse_default("a /* note */ b");
        assert_eq!(
            root_kinds(&tree),
            vec![
                NodeKind::Word,
                NodeKind::Space,
                NodeKind::Comment,
                NodeKind::Space,
                NodeKind::Word,
            ]
        );
    }

    #[test]
    fn test_stray_close_paren_is_word() {
        let tree = parse_default("a) b");
        assert_eq!(tree[tree.roots()[1]], ValueNode::Word { value: ")".to_string() });
        assert_eq!(tree.to_string(), "a) b");
    }

    #[test]
    fn test_unclosed_function() {
        let tree = parse_default("image-set(\"a.png\" 1x");
        if let ValueNode::Function { unclosed, .. } = &tree[tree.roots()[0]] {
            assert!(*unclosed);
        } else {
            panic!("Expected function node");
        }
        assert_eq!(tree.to_string(), "image-set(\"a.png\" 1x");
    }

    #[test]
    fn test_escaped_space_stays_in_url_word() {
        let tree = parse_default(r"url(a\ )");
        let children = tree[tree.roots()[0]].children();
        assert_eq!(tree[children[0]], ValueNode::Word { value: r"a\ ".to_string() });
        assert_eq!(tree.to_string(), r"url(a\ )");
    }

    #[test]
    fn test_escaped_backslash_before_trailing_space() {
        let tree = parse_default(r"url(a\\ )");
        if let ValueNode::Function { after, children, .. } = &tree[tree.roots()[0]] {
            assert_eq!(after, " ");
            assert_eq!(tree[children[0]], ValueNode::Word { value: r"a\\".to_string() });
        } else {
            panic!("Expected function node");
        }
        assert_eq!(tree.to_string(), r"url(a\\ )");
    }

    #[test]
    fn test_max_depth_exceeded() {
        let options = ParserOptions { max_depth: 2 };
        assert!(parse("a(b(c))", &options).is_ok());

        let err = parse("a(b(c(d)))", &options).unwrap_err();
        assert_eq!(err, ParseError::NestingTooDeep { depth: 2, offset: 5 });
    }

    #[test]
    fn test_round_trip_samples() {
        let samples = [
            "",
            "   ",
            "url(a.png?#iefix) format('embedded-opentype'), url(\"b.woff\")",
            "-webkit-image-set(url(a.png) 1x, 'b.png' 2x)",
            "url(a.png\\\n)",
            "url('unterminated",
            "calc(100% - (2 * var(--gap)))",
            "10px/1.5 \"Helvetica Neue\", sans-serif",
            "((",
            "\\",
        ];
        for sample in samples {
            assert_eq!(parse_default(sample).to_string(), sample, "sample {sample:?}");
        }
    }

    proptest! {
        #[test]
        fn prop_round_trip_is_lossless(input in r#"[a-z0-9 ,/:()'"\\*#?.\-\n]{0,48}"#) {
            let tree = parse(&input, &ParserOptions::default()).unwrap();
            prop_assert_eq!(tree.to_string(), input);
        }
    }
}
