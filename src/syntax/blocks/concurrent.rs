// Copyright (c) 2016-2021 Fabian Schuiki

//! The statement part of entities and architectures.

use super::error::BlockParserError;
use super::region::region_trivia;
use super::state::ParserState;
use super::{assertion, end, process, statement};
use crate::lexer::Kw;

/// Concurrent statements recognized, but not supported by the parser.
const UNSUPPORTED: &[(Kw, &str)] = &[
    (Kw::Block, "block statement"),
    (Kw::Case, "case generate statement"),
    (Kw::Component, "component instantiation"),
    (Kw::Configuration, "configuration instantiation"),
    (Kw::Entity, "entity instantiation"),
    (Kw::For, "for generate statement"),
    (Kw::If, "if generate statement"),
    (Kw::Postponed, "postponed statement"),
    (Kw::With, "selected signal assignment"),
];

pub(super) fn region(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.label.is_some() {
        if state.absorb_trivia() {
            return Ok(());
        }
    } else if region_trivia(state) {
        return Ok(());
    }
    let label = state.label.take();
    match state.keyword() {
        Some(Kw::End) if label.is_none() => end::enter(state),
        Some(Kw::Process) => process::enter(state, label),
        Some(Kw::Assert) => assertion::enter_assert(state),
        Some(k) => match UNSUPPORTED.iter().find(|(u, _)| *u == k) {
            Some((_, what)) => return Err(state.not_implemented(*what)),
            None => return Err(expected(state, label.is_none())),
        },
        None if state.is_name() => statement::enter_target(state, label),
        None => return Err(expected(state, label.is_none())),
    }
    Ok(())
}

fn expected(state: &ParserState, end: bool) -> BlockParserError {
    let mut alternatives = vec![Kw::Process.upper(), Kw::Assert.upper(), "a name".to_string()];
    if end {
        alternatives.push(Kw::End.upper());
    }
    state.expected(&alternatives)
}
