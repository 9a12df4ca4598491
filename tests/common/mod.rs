// Copyright (c) 2016-2021 Fabian Schuiki
#![allow(dead_code)]

//! Utilities for the front end tests.

pub use vhdl_blocks::common::errors::DiagBuilder2;
pub use vhdl_blocks::*;

/// Run the whole front end on `input`, panicking with a rendered diagnostic
/// if it fails.
pub fn parse(input: &str) -> (Document, GroupStream) {
    let _ = pretty_env_logger::try_init();
    match parse_document(input, ParserOptions::default()) {
        Ok(x) => {
            check_invariants(input, &x.0, &x.1);
            x
        }
        Err(e) => panic!("{}", DiagBuilder2::from(&e).render(input)),
    }
}

pub fn parse_err(input: &str, options: ParserOptions) -> Error {
    let _ = pretty_env_logger::try_init();
    match parse_document(input, options) {
        Ok(_) => panic!("parsing should fail"),
        Err(e) => e,
    }
}

/// Check that tokens, blocks and groups each cover their input exactly once.
pub fn check_invariants(input: &str, doc: &Document, groups: &GroupStream) {
    assert_eq!(doc.tokens.source_text(), input);
    assert!(doc.tokens.verify_links());
    assert!(doc.blocks.verify(doc.tokens.len()));
    assert!(groups.verify(doc.blocks.len()));
    let text: String = doc.blocks.ids().map(|id| doc.text(id)).collect();
    assert_eq!(text, input);
}

/// The kind and text of every group that is not whitespace or a comment.
pub fn significant_groups(doc: &Document, groups: &GroupStream) -> Vec<(BlockKind, String)> {
    groups
        .iter()
        .filter(|g| !g.kind.is_skippable())
        .map(|g| (g.kind, doc.group_text(g)))
        .collect()
}
