// Copyright (c) 2016-2021 Fabian Schuiki

//! Declarative regions, and the whitespace handling shared by all regions.

use super::end::{self, EndSpec};
use super::error::BlockParserError;
use super::state::{Body, ParserState, State};
use super::{list, object, reference, subprogram, BlockKind};
use crate::lexer::Kw;

/// The declarations a construct admits, and how it continues after them.
pub(crate) struct RegionSpec {
    pub items: &'static [Kw],
    /// The block kind of `begin`, for constructs with a statement part.
    pub begin: Option<BlockKind>,
    /// The state parsing the statement part.
    pub statements: Option<State>,
    pub end: &'static EndSpec,
}

/// Declarations recognized, but not supported by the parser.
const UNSUPPORTED: &[Kw] = &[
    Kw::Alias,
    Kw::Attribute,
    Kw::Component,
    Kw::Disconnect,
    Kw::File,
    Kw::For,
    Kw::Group,
    Kw::Package,
    Kw::Subtype,
    Kw::Type,
];

/// Emit the block for a whitespace, line break or comment token between
/// constructs. Returns whether the current token was such a token.
pub(super) fn region_trivia(state: &mut ParserState) -> bool {
    match state.trivia_kind() {
        Some(kind) => {
            state.emit_aside(kind);
            true
        }
        None => false,
    }
}

/// The declarative part of the current construct.
pub(super) fn declarative(state: &mut ParserState) -> Result<(), BlockParserError> {
    if region_trivia(state) {
        return Ok(());
    }
    let spec = state.require(state.context.region, "region")?;
    state.label = None;
    match state.keyword() {
        Some(k) if spec.items.contains(&k) => enter_item(state, k),
        Some(Kw::Begin) if spec.begin.is_some() => {
            if let (Some(kind), Some(statements)) = (spec.begin, spec.statements) {
                state.emit(kind);
                state.context.end = Some(spec.end);
                state.context.body = Body::Plain;
                state.next_state = statements;
            }
            Ok(())
        }
        Some(Kw::End) => {
            state.context.end = Some(spec.end);
            end::enter(state);
            Ok(())
        }
        Some(k) if UNSUPPORTED.contains(&k) => {
            Err(state.not_implemented(format!("{} declaration", k.upper())))
        }
        _ => {
            let mut alternatives: Vec<String> = spec.items.iter().map(|k| k.upper()).collect();
            if spec.begin.is_some() {
                alternatives.push(Kw::Begin.upper());
            }
            alternatives.push(Kw::End.upper());
            Err(state.expected(&alternatives))
        }
    }
}

fn enter_item(state: &mut ParserState, k: Kw) -> Result<(), BlockParserError> {
    match k {
        Kw::Generic => list::enter(state, &list::GENERIC_LIST),
        Kw::Port => list::enter(state, &list::PORT_LIST),
        Kw::Constant => object::enter(state, &object::CONSTANT),
        Kw::Signal => object::enter(state, &object::SIGNAL),
        Kw::Variable => object::enter(state, &object::VARIABLE),
        Kw::Shared => object::enter(state, &object::SHARED_VARIABLE),
        Kw::Use => reference::enter(state, &reference::USE),
        Kw::Procedure => subprogram::enter_procedure(state),
        Kw::Function | Kw::Pure | Kw::Impure => subprogram::enter_function(state),
        _ => return Err(state.bug(format!("no machine for {}", k.upper()))),
    }
    Ok(())
}
