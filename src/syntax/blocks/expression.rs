// Copyright (c) 2016-2021 Fabian Schuiki

//! Expressions. An expression block extends up to, but excluding, the first
//! of its terminators found outside of parentheses. Its words and operator
//! symbols are classified on the way.

use super::error::BlockParserError;
use super::state::{kw, ParserState};
use super::BlockKind;
use crate::lexer::{Fused, Kw, Operator, TokenKind};

/// The block kind of an expression, and the tokens that end it.
pub(crate) struct ExpressionSpec {
    pub kind: BlockKind,
    pub characters: &'static [char],
    pub keywords: &'static [Kw],
}

macro_rules! expressions {
    ($($name:ident: $kind:ident, [$($c:expr),*], [$($k:ident),*];)*) => {
        $(
            pub(crate) static $name: ExpressionSpec = ExpressionSpec {
                kind: BlockKind::$kind,
                characters: &[$($c),*],
                keywords: &[$(Kw::$k),*],
            };
        )*
    };
}

expressions! {
    GENERIC_DEFAULT: GenericListDefaultExpression, [';', ')'], [];
    PORT_DEFAULT: PortListDefaultExpression, [';', ')'], [];
    PARAMETER_DEFAULT: ParameterListDefaultExpression, [';', ')'], [];
    CONSTANT_DEFAULT: ConstantDefaultExpression, [';'], [];
    SIGNAL_DEFAULT: SignalDefaultExpression, [';'], [];
    VARIABLE_DEFAULT: VariableDefaultExpression, [';'], [];
    IF_CONDITION: IfCondition, [], [Then];
    ELSIF_CONDITION: ElsIfCondition, [], [Then];
    FOR_RANGE: ForRange, [], [To, Downto, Loop];
    LOOP_BOUND: LoopBound, [], [Loop];
    WHILE_CONDITION: WhileCondition, [], [Loop];
    RETURN_EXPRESSION: ReturnExpression, [';'], [];
    EXIT_CONDITION: ExitCondition, [';'], [];
    NEXT_CONDITION: NextCondition, [';'], [];
    WAIT_CONDITION: WaitCondition, [';'], [];
    REPORT_MESSAGE: ReportMessage, [';'], [Severity];
    REPORT_SEVERITY: ReportSeverityLevel, [';'], [];
    ASSERT_CONDITION: AssertCondition, [';'], [Report, Severity];
    ASSERT_MESSAGE: AssertMessage, [';'], [Severity];
    ASSERT_SEVERITY: AssertSeverityLevel, [';'], [];
    VARIABLE_ASSIGNMENT: VariableAssignmentExpression, [';'], [];
    SIGNAL_ASSIGNMENT: SignalAssignmentExpression, [';'], [];
}

impl ExpressionSpec {
    fn terminates(&self, state: &ParserState) -> bool {
        match state.kind() {
            TokenKind::Character(c) => self.characters.contains(&c),
            _ => match state.keyword() {
                Some(k) => self.keywords.contains(&k),
                None => false,
            },
        }
    }

    /// The terminators, as listed in diagnostics.
    fn describe(&self) -> Vec<String> {
        self.characters
            .iter()
            .map(|c| format!("`{}`", c))
            .chain(self.keywords.iter().map(|&k| kw(k)))
            .collect()
    }
}

/// Entered through `ParserState::push_expression`. The counter holds the
/// parenthesis depth.
pub(super) fn body(state: &mut ParserState) -> Result<(), BlockParserError> {
    if state.absorb_trivia() {
        return Ok(());
    }
    let spec = state.require(state.context.expression, "expression")?;
    let depth = state.counter;
    if depth == 0 && spec.terminates(state) {
        if !state.content {
            return Err(state.expected(&["an expression"]));
        }
        state.emit_before(spec.kind);
        state.pop(1)?;
        state.reissue = true;
        return Ok(());
    }
    match state.kind() {
        TokenKind::EndOfDocument => return Err(state.expected(&spec.describe())),
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
        TokenKind::Character(';') => return Err(state.expected(&spec.describe())),
        TokenKind::FusedCharacter(Fused::VarAssign) => {
            return Err(state.unexpected(format!(
                "Found {} inside an expression.",
                state.current()
            )))
        }
        TokenKind::Word => state.classify_word(),
        TokenKind::Character(c) => {
            if let Some(op) = Operator::from_char(c) {
                state.reclassify(TokenKind::Operator(op));
            }
        }
        TokenKind::FusedCharacter(f) => {
            if let Some(op) = Operator::from_fused(f) {
                state.reclassify(TokenKind::Operator(op));
            }
        }
        _ => (),
    }
    state.content = true;
    Ok(())
}
