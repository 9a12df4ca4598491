// Copyright (c) 2016-2021 Fabian Schuiki

//! The statement part of processes and subprograms, and the bodies of if
//! statements and loops.

use super::error::BlockParserError;
use super::region::region_trivia;
use super::state::{Body, ParserState};
use super::{assertion, control, end, statement};
use crate::lexer::Kw;

pub(super) fn region(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.label.is_some() {
        if state.absorb_trivia() {
            return Ok(());
        }
    } else if region_trivia(state) {
        return Ok(());
    }
    let label = state.label.take();
    let body = state.context.body;
    match state.keyword() {
        Some(Kw::End) if label.is_none() => end::enter(state),
        Some(Kw::Elsif) if label.is_none() && body == Body::IfBranch => {
            state.next_state = state!(control::elsif);
            state.reissue = true;
        }
        Some(Kw::Else) if label.is_none() && body == Body::IfBranch => {
            control::else_branch(state)
        }
        Some(Kw::Return) => statement::enter(state, &statement::RETURN),
        Some(Kw::Exit) => statement::enter(state, &statement::EXIT),
        Some(Kw::Next) => statement::enter(state, &statement::NEXT),
        Some(Kw::Wait) => statement::enter(state, &statement::WAIT),
        Some(Kw::Null) => statement::enter(state, &statement::NULL),
        Some(Kw::Report) => assertion::enter_report(state),
        Some(Kw::Assert) => assertion::enter_assert(state),
        Some(Kw::If) => control::enter_if(state, label),
        Some(Kw::For) | Some(Kw::While) | Some(Kw::Loop) => control::enter_loop(state, label),
        Some(Kw::Case) => return Err(state.not_implemented("case statement")),
        _ if state.is_name() => statement::enter_target(state, label),
        _ => {
            let mut alternatives = vec![
                "a statement".to_string(),
                "a label".to_string(),
            ];
            if label.is_none() {
                if body == Body::IfBranch {
                    alternatives.push(Kw::Elsif.upper());
                    alternatives.push(Kw::Else.upper());
                }
                alternatives.push(Kw::End.upper());
            }
            return Err(state.expected(&alternatives));
        }
    }
    Ok(())
}
