// Copyright (c) 2016-2021 Fabian Schuiki

//! Simple statements, and statements that start with a name: labels,
//! assignments, and procedure calls.

use super::error::BlockParserError;
use super::expression::{self, ExpressionSpec};
use super::state::{kw, ParserState};
use super::BlockKind;
use crate::lexer::{Fused, Kw, TokenKind};

/// A statement consisting of a start block, an optional expression, and an
/// end block.
pub(crate) struct StatementSpec {
    /// The keyword starting the statement. Assignments have none.
    pub keyword: Option<Kw>,
    pub start: BlockKind,
    pub expression: Option<&'static ExpressionSpec>,
    /// A keyword that must precede the expression, which is optional then.
    pub condition: Option<Kw>,
    /// Whether a loop label may follow the keyword.
    pub loop_label: bool,
    pub end: BlockKind,
}

pub(crate) static RETURN: StatementSpec = StatementSpec {
    keyword: Some(Kw::Return),
    start: BlockKind::ReturnStart,
    expression: Some(&expression::RETURN_EXPRESSION),
    condition: None,
    loop_label: false,
    end: BlockKind::ReturnEnd,
};

pub(crate) static EXIT: StatementSpec = StatementSpec {
    keyword: Some(Kw::Exit),
    start: BlockKind::ExitStart,
    expression: Some(&expression::EXIT_CONDITION),
    condition: Some(Kw::When),
    loop_label: true,
    end: BlockKind::ExitEnd,
};

pub(crate) static NEXT: StatementSpec = StatementSpec {
    keyword: Some(Kw::Next),
    start: BlockKind::NextStart,
    expression: Some(&expression::NEXT_CONDITION),
    condition: Some(Kw::When),
    loop_label: true,
    end: BlockKind::NextEnd,
};

pub(crate) static WAIT: StatementSpec = StatementSpec {
    keyword: Some(Kw::Wait),
    start: BlockKind::WaitStart,
    expression: Some(&expression::WAIT_CONDITION),
    condition: None,
    loop_label: false,
    end: BlockKind::WaitEnd,
};

pub(crate) static NULL: StatementSpec = StatementSpec {
    keyword: Some(Kw::Null),
    start: BlockKind::NullStatement,
    expression: None,
    condition: None,
    loop_label: false,
    end: BlockKind::NullStatement,
};

static SIGNAL_ASSIGNMENT: StatementSpec = StatementSpec {
    keyword: None,
    start: BlockKind::SignalAssignment,
    expression: Some(&expression::SIGNAL_ASSIGNMENT),
    condition: None,
    loop_label: false,
    end: BlockKind::SignalAssignmentEnd,
};

static VARIABLE_ASSIGNMENT: StatementSpec = StatementSpec {
    keyword: None,
    start: BlockKind::VariableAssignment,
    expression: Some(&expression::VARIABLE_ASSIGNMENT),
    condition: None,
    loop_label: false,
    end: BlockKind::VariableAssignmentEnd,
};

pub(super) fn enter(state: &mut ParserState, spec: &'static StatementSpec) {
    let resume = state.running;
    state.push(resume, state!(start));
    state.context.statement = Some(spec);
    state.reissue = true;
}

fn start(state: &mut ParserState) -> Result<(), BlockParserError> {
    let spec = state.require(state.context.statement, "statement")?;
    match spec.keyword {
        Some(k) if state.is_keyword(k) => {
            state.classify_word();
            state.next_state = state!(after_keyword);
            Ok(())
        }
        Some(k) => Err(state.expected(&[kw(k)])),
        None => Err(state.bug("keyword statement without keyword")),
    }
}

/// The counter is 1 once a loop label has been seen.
fn after_keyword(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    let spec = state.require(state.context.statement, "statement")?;
    if state.is_char(';') {
        if spec.start == spec.end {
            state.emit(spec.end);
        } else {
            state.emit_before(spec.start);
            state.emit(spec.end);
        }
        return state.pop(1);
    }
    if spec.loop_label && state.counter == 0 && state.is_name() {
        state.identifier();
        state.counter = 1;
        return Ok(());
    }
    match (spec.condition, spec.expression) {
        (Some(cond), Some(_)) if state.is_keyword(cond) => {
            state.classify_word();
            state.emit(spec.start);
            state.next_state = state!(value);
            Ok(())
        }
        (None, Some(expr)) => {
            state.emit_before(spec.start);
            state.push_expression(state!(end), expr);
            Ok(())
        }
        (Some(cond), _) => {
            let mut alternatives = vec!["`;`".to_string(), kw(cond)];
            if spec.loop_label && state.counter == 0 {
                alternatives.push("a loop label".to_string());
            }
            Err(state.expected(&alternatives))
        }
        (None, None) => Err(state.expected(&["`;`"])),
    }
}

/// Parse the expression starting at the current token.
fn value(state: &mut ParserState) -> Result<(), BlockParserError> {
    let spec = state.require(state.context.statement, "statement")?;
    match spec.expression {
        Some(expr) => {
            state.push_expression(state!(end), expr);
            Ok(())
        }
        None => Err(state.bug("statement without expression")),
    }
}

fn end(state: &mut ParserState) -> Result<(), BlockParserError> {
    let spec = state.require(state.context.statement, "statement")?;
    if !state.is_char(';') {
        return Err(state.expected(&["`;`"]));
    }
    state.emit(spec.end);
    state.pop(1)
}

/// Parse a statement starting with a name. If the name turns out to be a
/// label, the machine returns after the colon with the label recorded in
/// `ParserState::label` and the label still pending, so that it becomes part
/// of the first block of the labeled statement.
pub(super) fn enter_target(state: &mut ParserState, label: Option<String>) {
    let resume = state.running;
    state.push(resume, state!(target));
    state.label = label;
    state.reissue = true;
}

fn target(state: &mut ParserState) -> Result<(), BlockParserError> {
    if !state.is_name() {
        return Err(state.expected(&["a name"]));
    }
    state.identifier();
    state.next_state = state!(after_head);
    Ok(())
}

fn after_head(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    if !state.is_char(':') {
        state.next_state = state!(target_rest);
        state.reissue = true;
        return Ok(());
    }
    if state.label.is_some() {
        return Err(state.unexpected(format!(
            "Found {} after a statement label; statements take one label only.",
            state.current()
        )));
    }
    let label = match state.previous_significant() {
        Some(token) => token.value.clone(),
        None => return Err(state.bug("label without name")),
    };
    debug!("statement label `{}`", label);
    state.label = Some(label);
    state.pop(1)
}

/// The rest of an assignment target or procedure call. The counter holds the
/// parenthesis depth.
fn target_rest(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    let depth = state.counter;
    match state.kind() {
        TokenKind::EndOfDocument => return Err(state.expected(&["`;`", "`<=`", "`:=`"])),
        TokenKind::Character('(') => state.counter += 1,
        TokenKind::Character(')') if depth > 0 => state.counter -= 1,
        TokenKind::Character(')') => {
            return Err(state.unexpected(format!(
                "Found {} without a matching `(`.",
                state.current()
            )))
        }
        TokenKind::Character(';') if depth > 0 => {
            return Err(state.unexpected(format!(
                "Expected `)` before {}.",
                state.current()
            )))
        }
        TokenKind::Character(';') => {
            state.label = None;
            state.emit_before(BlockKind::ProcedureCall);
            state.emit(BlockKind::ProcedureCallEnd);
            return state.pop(1);
        }
        TokenKind::FusedCharacter(Fused::Leq) if depth == 0 => {
            return assignment(state, &SIGNAL_ASSIGNMENT);
        }
        TokenKind::FusedCharacter(Fused::VarAssign) if depth == 0 => {
            return assignment(state, &VARIABLE_ASSIGNMENT);
        }
        TokenKind::Word if depth == 0 && (state.is_keyword(Kw::Port) || state.is_keyword(Kw::Generic)) => {
            return Err(state.not_implemented("component instantiation"));
        }
        TokenKind::Word => state.classify_word(),
        _ => (),
    }
    Ok(())
}

fn assignment(state: &mut ParserState, spec: &'static StatementSpec) -> Result<(), BlockParserError> {
    state.label = None;
    state.emit(spec.start);
    state.context.statement = Some(spec);
    state.next_state = state!(value);
    Ok(())
}
