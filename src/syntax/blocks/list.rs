// Copyright (c) 2016-2021 Fabian Schuiki

//! Generic clauses, port clauses, and subprogram parameter lists.

use super::error::BlockParserError;
use super::expression::{self, ExpressionSpec};
use super::object::subtype_indication;
use super::state::{kw, ParserState, State};
use super::BlockKind;
use crate::lexer::{Fused, Kw};

/// The blocks and admitted items of one kind of interface list.
pub(crate) struct ListSpec {
    /// The keyword introducing the list, if any.
    pub keyword: Option<Kw>,
    pub open: BlockKind,
    pub item: BlockKind,
    /// The block kind of `type` items, if the list admits them.
    pub type_item: Option<BlockKind>,
    pub default: &'static ExpressionSpec,
    pub delimiter: BlockKind,
    pub close: BlockKind,
    /// Whether the closing parenthesis is followed by `;`.
    pub semicolon: bool,
    /// Object classes that may precede the names of an item.
    pub classes: &'static [Kw],
}

pub(crate) static GENERIC_LIST: ListSpec = ListSpec {
    keyword: Some(Kw::Generic),
    open: BlockKind::GenericListOpen,
    item: BlockKind::GenericListInterfaceConstant,
    type_item: Some(BlockKind::GenericListInterfaceType),
    default: &expression::GENERIC_DEFAULT,
    delimiter: BlockKind::GenericListDelimiter,
    close: BlockKind::GenericListClose,
    semicolon: true,
    classes: &[Kw::Constant],
};

pub(crate) static PORT_LIST: ListSpec = ListSpec {
    keyword: Some(Kw::Port),
    open: BlockKind::PortListOpen,
    item: BlockKind::PortListInterfaceSignal,
    type_item: None,
    default: &expression::PORT_DEFAULT,
    delimiter: BlockKind::PortListDelimiter,
    close: BlockKind::PortListClose,
    semicolon: true,
    classes: &[Kw::Signal],
};

pub(crate) static PARAMETER_LIST: ListSpec = ListSpec {
    keyword: None,
    open: BlockKind::ParameterListOpen,
    item: BlockKind::ParameterListInterfaceObject,
    type_item: None,
    default: &expression::PARAMETER_DEFAULT,
    delimiter: BlockKind::ParameterListDelimiter,
    close: BlockKind::ParameterListClose,
    semicolon: false,
    classes: &[Kw::Constant, Kw::Signal, Kw::Variable, Kw::File],
};

const MODES: &[Kw] = &[Kw::In, Kw::Out, Kw::Inout, Kw::Buffer, Kw::Linkage];

/// Generic kinds that are recognized but not supported.
const UNSUPPORTED_GENERICS: &[Kw] = &[
    Kw::Procedure,
    Kw::Function,
    Kw::Pure,
    Kw::Impure,
    Kw::Package,
];

/// Parse a list starting at the current token, which is either the list's
/// keyword or its opening parenthesis.
pub(super) fn enter(state: &mut ParserState, spec: &'static ListSpec) {
    let resume = state.running;
    enter_then(state, spec, resume);
}

/// Like `enter`, but continue with `resume` after the list.
pub(super) fn enter_then(state: &mut ParserState, spec: &'static ListSpec, resume: State) {
    state.push(resume, state!(start));
    state.context.list = Some(spec);
    state.reissue = true;
}

fn start(state: &mut ParserState) -> Result<(), BlockParserError> {
    let spec = state.require(state.context.list, "list")?;
    match spec.keyword {
        Some(k) if state.is_keyword(k) => {
            state.classify_word();
            state.next_state = state!(open);
            Ok(())
        }
        Some(k) => Err(state.expected(&[kw(k)])),
        None => {
            state.next_state = state!(open);
            state.reissue = true;
            Ok(())
        }
    }
}

fn open(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    let spec = state.require(state.context.list, "list")?;
    if !state.is_char('(') {
        return Err(match spec.keyword {
            Some(k) => state.unexpected(format!(
                "Expected `(` after {} but found {}.",
                kw(k),
                state.current()
            )),
            None => state.expected(&["`(`"]),
        });
    }
    state.emit(spec.open);
    state.next_state = state!(item_start);
    Ok(())
}

fn item_start(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    let spec = state.require(state.context.list, "list")?;
    let keyword = state.keyword();
    match keyword {
        Some(Kw::Type) if spec.type_item.is_some() => {
            state.classify_word();
            state.next_state = state!(type_name);
            return Ok(());
        }
        Some(k) if spec.keyword == Some(Kw::Generic) && UNSUPPORTED_GENERICS.contains(&k) => {
            return Err(state.not_implemented(format!("generic {} declaration", k.upper())));
        }
        Some(k) if spec.classes.contains(&k) => {
            state.classify_word();
            state.counter = 0;
            state.next_state = state!(names);
            return Ok(());
        }
        _ => (),
    }
    if state.is_name() {
        state.identifier();
        state.counter = 1;
        state.next_state = state!(names);
        return Ok(());
    }
    let mut alternatives: Vec<String> = spec.classes.iter().map(|k| k.upper()).collect();
    if spec.type_item.is_some() {
        alternatives.push(Kw::Type.upper());
    }
    alternatives.push("an interface name".to_string());
    Err(state.expected(&alternatives))
}

/// The identifier list of an item. The counter is 1 directly after a name.
fn names(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if state.counter == 0 {
        if state.is_name() {
            state.identifier();
            state.counter = 1;
            return Ok(());
        }
        return Err(state.expected(&["an interface name"]));
    }
    if state.is_char(',') {
        state.counter = 0;
        return Ok(());
    }
    if state.is_char(':') {
        state.counter = 0;
        state.next_state = state!(mode);
        return Ok(());
    }
    Err(state.expected(&["`,`", "`:`"]))
}

fn mode(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    state.content = false;
    state.next_state = state!(subtype);
    match state.keyword() {
        Some(k) if MODES.contains(&k) => state.classify_word(),
        _ => state.reissue = true,
    }
    Ok(())
}

fn subtype(state: &mut ParserState) -> Result<(), BlockParserError> {
    if subtype_indication(state)? {
        return Ok(());
    }
    let spec = state.require(state.context.list, "list")?;
    if !state.content {
        return Err(state.expected(&["a subtype indication"]));
    }
    if state.is_char(';') {
        state.emit_before(spec.item);
        state.emit(spec.delimiter);
        state.next_state = state!(item_start);
        Ok(())
    } else if state.is_char(')') {
        state.emit_before(spec.item);
        close(state, spec)
    } else if state.is_fused(Fused::VarAssign) {
        state.emit(spec.item);
        state.next_state = state!(default);
        Ok(())
    } else {
        Err(state.expected(&["`;`", "`)`", "`:=`"]))
    }
}

fn default(state: &mut ParserState) -> Result<(), BlockParserError> {
    let spec = state.require(state.context.list, "list")?;
    state.push_expression(state!(after_default), spec.default);
    Ok(())
}

fn after_default(state: &mut ParserState) -> Result<(), BlockParserError> {
    let spec = state.require(state.context.list, "list")?;
    if state.is_char(';') {
        state.emit(spec.delimiter);
        state.next_state = state!(item_start);
        Ok(())
    } else if state.is_char(')') {
        close(state, spec)
    } else {
        Err(state.expected(&["`;`", "`)`"]))
    }
}

fn type_name(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if !state.is_name() {
        return Err(state.expected(&["a type name"]));
    }
    state.identifier();
    state.next_state = state!(after_type_name);
    Ok(())
}

fn after_type_name(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    let spec = state.require(state.context.list, "list")?;
    let kind = match spec.type_item {
        Some(kind) => kind,
        None => return Err(state.bug("type item in a list without types")),
    };
    if state.is_char(';') {
        state.emit_before(kind);
        state.emit(spec.delimiter);
        state.next_state = state!(item_start);
        Ok(())
    } else if state.is_char(')') {
        state.emit_before(kind);
        close(state, spec)
    } else {
        Err(state.expected(&["`;`", "`)`"]))
    }
}

/// Handle the closing parenthesis of the list.
fn close(state: &mut ParserState, spec: &'static ListSpec) -> Result<(), BlockParserError> {
    if spec.semicolon {
        state.next_state = state!(close_semicolon);
        Ok(())
    } else {
        state.emit(spec.close);
        state.pop(1)
    }
}

fn close_semicolon(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    let spec = state.require(state.context.list, "list")?;
    if !state.is_char(';') {
        return Err(state.expected(&["`;`"]));
    }
    state.emit(spec.close);
    state.pop(1)
}
