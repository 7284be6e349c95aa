// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Property tests for extraction and projection over whole files.
//!
//! Token streams here come from a small line tokenizer: per line, one token
//! for the code (if any), one comment token whose raw span starts at the
//! blanks before `#` and runs through the line break, and one `NEWLINE`.

use rayon::prelude::*;
use tugspan_core::error::SpanError;
use tugspan_core::types::ByteSpan;
use tugspan_python::{
    analyze, extract, project, CommentKind, ParseTreeNode, Token, TokenKind, TokenStream,
};

// ============================================================================
// Helpers
// ============================================================================

fn tokenize(source: &str) -> TokenStream {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut line_start = 0;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let line_no = index as u32 + 1;
        let body = line.trim_end_matches('\n');
        let code_end = body.find('#').unwrap_or(body.len());
        let code = body[..code_end].trim_end();

        if !code.trim_start().is_empty() {
            let start = line_start + (code.len() - code.trim_start().len());
            let end = line_start + code.len();
            let column = (start - line_start) as u32;
            tokens.push(Token::new(TokenKind::Other(1), ByteSpan::new(start, end), line_no, column));
        }
        if code_end < body.len() {
            let start = line_start + code.len();
            let end = line_start + line.len();
            let column = code.len() as u32;
            tokens.push(Token::new(TokenKind::Comment, ByteSpan::new(start, end), line_no, column));
        }
        if line.ends_with('\n') {
            let at = line_start + line.len() - 1;
            let column = (line.len() - 1) as u32;
            tokens.push(Token::new(TokenKind::Newline, ByteSpan::new(at, at + 1), line_no, column));
        }
        line_start += line.len();
    }

    assert_eq!(line_start, bytes.len());
    TokenStream::new(tokens)
}

const SOURCES: &[&str] = &[
    "x = 1\n",
    "# header\nimport os  # stdlib\n\n\ndef f():\n    # body\n    return 1\n",
    "#\n#\n#",
    "class A:  # cml 1 cc background=\"#f00\"\n    pass  # cml+ text=\"more\"\n",
    "s = 'é'  # naïve comment\n",
    "y = 2 # trailing blanks   \n\t# tab indented\n",
];

/// A tree with noise nodes sprinkled through it.
fn noisy_tree() -> ParseTreeNode {
    let stmt = |name: &str| {
        ParseTreeNode::leaf(TokenKind::Other(2), name)
            .with_child(ParseTreeNode::new(TokenKind::Newline))
    };
    ParseTreeNode::leaf(TokenKind::Other(257), "file_input")
        .with_child(stmt("import"))
        .with_child(
            ParseTreeNode::leaf(TokenKind::Other(3), "funcdef")
                .with_child(ParseTreeNode::leaf(TokenKind::Other(4), "suite").with_children([
                    ParseTreeNode::new(TokenKind::Newline),
                    ParseTreeNode::new(TokenKind::Indent)
                        .with_child(stmt("return"))
                        .with_child(ParseTreeNode::new(TokenKind::Dedent).with_child(stmt("pass"))),
                ])),
        )
        .with_child(ParseTreeNode::new(TokenKind::Dedent))
}

/// Rebuild `node` without noise, re-parenting children of dropped nodes.
fn without_noise(node: &ParseTreeNode) -> Vec<ParseTreeNode> {
    let children: Vec<ParseTreeNode> = node.children.iter().flat_map(without_noise).collect();
    if node.kind.is_structural_noise() {
        children
    } else {
        let mut kept = node.clone();
        kept.children = children;
        vec![kept]
    }
}

// ============================================================================
// Examples
// ============================================================================

#[test]
fn leading_blanks_and_line_break_are_trimmed() {
    let source = b"   # hello \n";
    let stream = TokenStream::new(vec![Token::new(
        TokenKind::Comment,
        ByteSpan::new(0, source.len()),
        1,
        0,
    )]);
    let extraction = extract(source, &stream);
    let record = &extraction.comments[0];
    assert_eq!(record.text, "# hello");
    assert_eq!(record.column, 3);
    assert_eq!(&source[record.start..=record.end], b"# hello");
}

#[test]
fn off_channel_comment_comes_from_stream() {
    let source = b"    x\n# c\n";
    let stream = TokenStream::new(vec![
        Token::new(TokenKind::Indent, ByteSpan::new(0, 4), 1, 0),
        Token::new(TokenKind::Other(1), ByteSpan::new(4, 5), 1, 4),
        Token::new(TokenKind::Newline, ByteSpan::new(5, 6), 1, 5),
        Token::new(TokenKind::Comment, ByteSpan::new(6, 10), 2, 0),
        Token::new(TokenKind::Dedent, ByteSpan::new(10, 10), 3, 0),
    ]);
    let tree = ParseTreeNode::new(TokenKind::Indent).with_child(
        ParseTreeNode::leaf(TokenKind::Other(1), "x")
            .with_child(ParseTreeNode::new(TokenKind::Newline)),
    );

    let analysis = analyze(source, &stream, Some(&tree)).unwrap();
    assert_eq!(analysis.logical_tree.len(), 1);
    assert_eq!(analysis.logical_tree[0].kind, TokenKind::Other(1));
    assert_eq!(analysis.logical_tree[0].depth, 0);
    assert_eq!(analysis.comments.len(), 1);
    assert_eq!(analysis.comments[0].text, "# c");
    assert!(analysis.skipped.is_empty());
}

#[test]
fn bare_delimiter_is_a_one_byte_comment() {
    let source = b"#";
    let stream = TokenStream::new(vec![Token::new(TokenKind::Comment, ByteSpan::new(0, 1), 1, 0)]);
    let record = &extract(source, &stream).comments[0];
    assert_eq!(record.text, "#");
    assert_eq!(record.start, record.end);
}

#[test]
fn empty_comment_token_is_skipped_and_rest_extracted() {
    let source = "a = 1  # first\nb = 2  # second\n";
    let mut tokens = tokenize(source).tokens().to_vec();
    let first_comment = tokens
        .iter()
        .position(|t| t.kind == TokenKind::Comment)
        .unwrap();
    let at = tokens[first_comment].start;
    tokens.insert(first_comment, Token::new(TokenKind::Comment, ByteSpan::new(at, at), 1, 5));

    let extraction = extract(source.as_bytes(), &TokenStream::new(tokens));
    assert_eq!(extraction.skipped_offsets(), vec![at]);
    assert!(matches!(extraction.skipped[0].error, SpanError::MalformedSpan { .. }));
    let texts: Vec<&str> = extraction.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["# first", "# second"]);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn extraction_is_idempotent() {
    for source in SOURCES {
        let stream = tokenize(source);
        let first = extract(source.as_bytes(), &stream);
        let second = extract(source.as_bytes(), &stream);
        assert_eq!(first, second, "source: {source:?}");
    }
}

#[test]
fn comments_are_strictly_ordered() {
    for source in SOURCES {
        let comments = extract(source.as_bytes(), &tokenize(source)).comments;
        for pair in comments.windows(2) {
            assert!(pair[0].start < pair[1].start, "source: {source:?}");
        }
    }
}

#[test]
fn records_are_contained_in_the_buffer() {
    for source in SOURCES {
        let bytes = source.as_bytes();
        let extraction = extract(bytes, &tokenize(source));
        assert!(extraction.skipped.is_empty(), "source: {source:?}");
        for record in &extraction.comments {
            assert!(record.start <= record.end);
            assert!(record.end < bytes.len());
            assert_eq!(record.text.as_bytes(), &bytes[record.start..=record.end]);
            assert_eq!(record.bytes(), &bytes[record.start..=record.end]);
            assert_eq!(bytes[record.start], b'#');
            assert_eq!(record.size(), record.text.len());
        }
    }
}

#[test]
fn records_are_contained_in_a_non_utf8_buffer() {
    // Latin-1 source: 0xe9 is 'é', invalid on its own in UTF-8.
    let bytes = b"x = 1  # caf\xe9\n# ok\n#\xff\xfe  \n";
    let stream = TokenStream::new(vec![
        Token::new(TokenKind::Other(1), ByteSpan::new(0, 5), 1, 0),
        Token::new(TokenKind::Comment, ByteSpan::new(5, 14), 1, 5),
        Token::new(TokenKind::Comment, ByteSpan::new(14, 19), 2, 0),
        Token::new(TokenKind::Comment, ByteSpan::new(19, 25), 3, 0),
    ]);
    assert_eq!(stream.validate(bytes.len()), Ok(()));

    let extraction = extract(bytes, &stream);
    assert!(extraction.skipped.is_empty());
    assert_eq!(extraction.comments.len(), 3);
    for record in &extraction.comments {
        assert_eq!(record.bytes(), &bytes[record.start..=record.end]);
        assert_eq!(record.size(), record.bytes().len());
        assert_eq!(bytes[record.start], b'#');
    }

    let spans: Vec<(usize, usize)> = extraction.comments.iter().map(|c| (c.start, c.end)).collect();
    assert_eq!(spans, vec![(7, 12), (14, 17), (19, 21)]);
    assert!(extraction.comments[0].raw.is_some());
    assert_eq!(extraction.comments[1].raw, None);
    assert_eq!(extraction.comments[1].text, "# ok");
}

#[test]
fn cml_bodies_follow_their_records() {
    let source = SOURCES[3];
    let comments = extract(source.as_bytes(), &tokenize(source)).comments;

    let open = comments[0].cml.as_ref().unwrap();
    assert_eq!(open.version, Some(1));
    assert_eq!(open.record_type.as_deref(), Some("cc"));
    assert_eq!(open.properties["background"], "#f00");

    let more = comments[1].cml.as_ref().unwrap();
    assert_eq!(more.record_type, None);
    assert_eq!(more.properties["text"], "more");
    assert!(open.is_clean() && more.is_clean());
}

#[test]
fn comment_count_matches_source() {
    for source in SOURCES {
        let expected = source.lines().filter(|line| line.contains('#')).count();
        let extraction = extract(source.as_bytes(), &tokenize(source));
        assert_eq!(extraction.comments.len(), expected, "source: {source:?}");
    }
}

#[test]
fn cml_comments_are_classified() {
    let source = SOURCES[3];
    let kinds: Vec<CommentKind> = extract(source.as_bytes(), &tokenize(source))
        .comments
        .iter()
        .map(|c| c.kind)
        .collect();
    assert_eq!(kinds, vec![CommentKind::Cml, CommentKind::CmlContinue]);
}

#[test]
fn noise_removal_preserves_depths() {
    let tree = noisy_tree();
    let stripped = without_noise(&tree);
    assert_eq!(stripped.len(), 1);
    assert_eq!(project(&tree), project(&stripped[0]));
}

#[test]
fn logical_tree_size_is_nodes_minus_noise() {
    let tree = noisy_tree();
    let nodes = project(&tree);
    assert!(nodes.len() <= tree.node_count());
    assert_eq!(nodes.len(), tree.node_count() - tree.noise_count());
}

#[test]
fn concurrent_analyses_agree() {
    let source = SOURCES[1];
    let stream = tokenize(source);
    let tree = noisy_tree();
    let expected = analyze(source.as_bytes(), &stream, Some(&tree)).unwrap();

    let results: Vec<_> = (0..64)
        .into_par_iter()
        .map(|_| analyze(source.as_bytes(), &stream, Some(&tree)).unwrap())
        .collect();

    assert!(results.iter().all(|analysis| *analysis == expected));
}
