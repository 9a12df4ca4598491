// Copyright (c) 2016-2021 Fabian Schuiki

//! The block parser. Reduces a token stream into a linked stream of blocks,
//! each of which spans a contiguous run of tokens and classifies it as a
//! syntactic region of some construct.
//!
//! The parser is a set of cooperating state machines. Each state is a plain
//! function that looks at the current token and either extends the block
//! under construction, emits it, moves on to another state, or pushes a nested
//! machine onto the return stack. See `state` for the machinery.

/// Construct a `State` from a state function, naming it after the function.
macro_rules! state {
    ($first:ident $(:: $rest:ident)*) => {
        $crate::blocks::state::State {
            name: concat!(stringify!($first) $(, "::", stringify!($rest))*),
            func: $first $(:: $rest)*,
        }
    };
}

mod architecture;
mod assertion;
mod comment;
mod concurrent;
mod control;
mod document;
mod end;
mod entity;
mod error;
mod expression;
mod list;
mod object;
mod package;
mod process;
mod reference;
mod region;
mod sequential;
mod statement;
pub(crate) mod state;
mod subprogram;

#[cfg(test)]
mod test;

pub use self::error::{BlockParserError, NameMismatch};
pub use self::state::ParserOptions;

use self::state::ParserState;
use crate::lexer::{Token, TokenId, TokenStream, TokenizerError};
use serde::Serialize;
use std::ops::Index;
use vhdl_blocks_common::source::Span;
use vhdl_blocks_common::util::HasDesc;

/// An index into a block stream.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
pub struct BlockId(pub(crate) u32);

impl BlockId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A contiguous run of tokens classified as one syntactic region.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    /// The first token of the block.
    pub start: TokenId,
    /// The last token of the block, inclusive.
    pub end: TokenId,
    /// Whether this block is one of several fragments of a logical block that
    /// was split by a comment or line break.
    pub multi_part: bool,
    pub(crate) previous: Option<BlockId>,
    pub(crate) next: Option<BlockId>,
}

impl Block {
    pub fn previous(&self) -> Option<BlockId> {
        self.previous
    }

    pub fn next(&self) -> Option<BlockId> {
        self.next
    }
}

macro_rules! declare_block_kinds {(
    $( $(#[$meta:meta])* $kind:ident => $desc:expr, )*
) => {
    /// The classification of a block.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
    pub enum BlockKind {
        $( $(#[$meta])* $kind, )*
    }

    impl HasDesc for BlockKind {
        fn desc(&self) -> &'static str {
            match *self {
                $( BlockKind::$kind => $desc, )*
            }
        }
    }
}}

declare_block_kinds! {
    StartOfDocument => "start of document",
    EndOfDocument => "end of document",

    Whitespace => "whitespace",
    Linebreak => "line break",
    /// A line break directly following another line break.
    EmptyLine => "empty line",
    Indentation => "indentation",
    SingleLineComment => "single-line comment",
    MultiLineComment => "multi-line comment",

    LibraryStart => "library clause",
    LibraryReferenceName => "library name",
    LibraryDelimiter => "library delimiter",
    LibraryEnd => "library clause end",
    UseStart => "use clause",
    UseReferenceName => "use clause name",
    UseDelimiter => "use clause delimiter",
    UseEnd => "use clause end",
    ContextStart => "context reference",
    ContextReferenceName => "context name",
    ContextDelimiter => "context delimiter",
    ContextEnd => "context reference end",

    EntityName => "entity declaration",
    EntityBegin => "entity statement part",
    EntityEnd => "entity end",
    ArchitectureName => "architecture body",
    ArchitectureBegin => "architecture statement part",
    ArchitectureEnd => "architecture end",
    PackageName => "package declaration",
    PackageEnd => "package end",
    PackageBodyName => "package body",
    PackageBodyEnd => "package body end",

    GenericListOpen => "generic clause",
    GenericListInterfaceConstant => "generic constant",
    GenericListInterfaceType => "generic type",
    GenericListDefaultExpression => "generic default",
    GenericListDelimiter => "generic delimiter",
    GenericListClose => "generic clause end",
    PortListOpen => "port clause",
    PortListInterfaceSignal => "port signal",
    PortListDefaultExpression => "port default",
    PortListDelimiter => "port delimiter",
    PortListClose => "port clause end",
    ParameterListOpen => "parameter list",
    ParameterListInterfaceObject => "parameter",
    ParameterListDefaultExpression => "parameter default",
    ParameterListDelimiter => "parameter delimiter",
    ParameterListClose => "parameter list end",

    ConstantDeclaration => "constant declaration",
    ConstantDefaultExpression => "constant value",
    ConstantDeclarationEnd => "constant declaration end",
    SignalDeclaration => "signal declaration",
    SignalDefaultExpression => "signal default",
    SignalDeclarationEnd => "signal declaration end",
    VariableDeclaration => "variable declaration",
    VariableDefaultExpression => "variable default",
    VariableDeclarationEnd => "variable declaration end",
    SharedVariableDeclaration => "shared variable declaration",

    ProcedureName => "procedure specification",
    ProcedureIs => "procedure body",
    ProcedureDeclarationEnd => "procedure declaration end",
    ProcedureBegin => "procedure statement part",
    ProcedureEnd => "procedure end",
    FunctionName => "function specification",
    FunctionReturnType => "function return type",
    FunctionDeclarationEnd => "function declaration end",
    FunctionBegin => "function statement part",
    FunctionEnd => "function end",
    ProcessName => "process statement",
    ProcessBegin => "process statement part",
    ProcessEnd => "process end",

    ReturnStart => "return statement",
    ReturnExpression => "return value",
    ReturnEnd => "return statement end",
    ExitStart => "exit statement",
    ExitCondition => "exit condition",
    ExitEnd => "exit statement end",
    NextStart => "next statement",
    NextCondition => "next condition",
    NextEnd => "next statement end",
    ReportStart => "report statement",
    ReportMessage => "report message",
    ReportSeverity => "report severity",
    ReportSeverityLevel => "report severity level",
    ReportEnd => "report statement end",
    AssertStart => "assertion",
    AssertCondition => "assertion condition",
    AssertReport => "assertion report",
    AssertMessage => "assertion message",
    AssertSeverity => "assertion severity",
    AssertSeverityLevel => "assertion severity level",
    AssertEnd => "assertion end",
    NullStatement => "null statement",
    WaitStart => "wait statement",
    WaitCondition => "wait condition",
    WaitEnd => "wait statement end",

    IfStart => "if statement",
    IfCondition => "if condition",
    IfThen => "if branch",
    ElsIfStart => "elsif clause",
    ElsIfCondition => "elsif condition",
    ElsIfThen => "elsif branch",
    Else => "else branch",
    IfEnd => "if statement end",
    ForStart => "for loop",
    ForRange => "loop range",
    LoopDirection => "loop direction",
    LoopBound => "loop bound",
    WhileStart => "while loop",
    WhileCondition => "while condition",
    LoopBegin => "loop body",
    LoopEnd => "loop end",

    VariableAssignment => "variable assignment",
    VariableAssignmentExpression => "assigned value",
    VariableAssignmentEnd => "variable assignment end",
    SignalAssignment => "signal assignment",
    SignalAssignmentExpression => "assigned waveform",
    SignalAssignmentEnd => "signal assignment end",
    ProcedureCall => "procedure call",
    ProcedureCallEnd => "procedure call end",
}

impl BlockKind {
    /// Check whether blocks of this kind only carry whitespace or comments.
    /// These may appear between the fragments of a split block.
    pub fn is_skippable(self) -> bool {
        match self {
            BlockKind::Whitespace
            | BlockKind::Linebreak
            | BlockKind::EmptyLine
            | BlockKind::Indentation
            | BlockKind::SingleLineComment
            | BlockKind::MultiLineComment => true,
            _ => false,
        }
    }

    pub fn is_comment(self) -> bool {
        match self {
            BlockKind::SingleLineComment | BlockKind::MultiLineComment => true,
            _ => false,
        }
    }
}

/// A doubly-linked sequence of blocks, stored in emission order.
#[derive(Clone, Default, Debug, Serialize)]
pub struct BlockStream {
    blocks: Vec<Block>,
}

impl BlockStream {
    pub fn new() -> BlockStream {
        BlockStream { blocks: Vec::new() }
    }

    /// Append a block and link it to its predecessor.
    pub(crate) fn push(
        &mut self,
        kind: BlockKind,
        start: TokenId,
        end: TokenId,
        multi_part: bool,
    ) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        let previous = match self.blocks.last_mut() {
            Some(last) => {
                last.next = Some(id);
                Some(BlockId(id.0 - 1))
            }
            None => None,
        };
        self.blocks.push(Block {
            kind,
            start,
            end,
            multi_part,
            previous,
            next: None,
        });
        id
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn first(&self) -> Option<BlockId> {
        if self.blocks.is_empty() {
            None
        } else {
            Some(BlockId(0))
        }
    }

    pub fn last(&self) -> Option<BlockId> {
        self.blocks.len().checked_sub(1).map(|i| BlockId(i as u32))
    }

    pub fn iter(&self) -> std::slice::Iter<Block> {
        self.blocks.iter()
    }

    /// The ids of all blocks, in stream order.
    pub fn ids(&self) -> impl Iterator<Item = BlockId> + DoubleEndedIterator {
        (0..self.blocks.len() as u32).map(BlockId)
    }

    /// Check the link invariants of the stream itself, and that the block
    /// spans cover the tokens `0..token_count` in order without gaps or
    /// overlaps.
    pub fn verify(&self, token_count: usize) -> bool {
        let n = self.blocks.len();
        let mut expected_start = 0;
        for (i, block) in self.blocks.iter().enumerate() {
            let previous = if i == 0 {
                None
            } else {
                Some(BlockId(i as u32 - 1))
            };
            let next = if i + 1 == n {
                None
            } else {
                Some(BlockId(i as u32 + 1))
            };
            if block.previous != previous || block.next != next {
                return false;
            }
            if block.start.index() != expected_start || block.end < block.start {
                return false;
            }
            expected_start = block.end.index() + 1;
        }
        expected_start == token_count
    }
}

impl Index<BlockId> for BlockStream {
    type Output = Block;

    fn index(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }
}

impl<'a> IntoIterator for &'a BlockStream {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// A fully parsed source text. Owns the tokens together with the blocks
/// referring to them.
#[derive(Clone, Debug, Serialize)]
pub struct Document {
    pub tokens: TokenStream,
    pub blocks: BlockStream,
    /// Trailing names that did not match the name of their construct.
    pub warnings: Vec<NameMismatch>,
}

impl Document {
    /// The source text covered by a block.
    pub fn text(&self, id: BlockId) -> String {
        let block = &self.blocks[id];
        self.tokens.text(block.start, block.end)
    }

    /// The source extent of a block.
    pub fn span(&self, id: BlockId) -> Span {
        let block = &self.blocks[id];
        Span::new(self.tokens[block.start].start, self.tokens[block.end].end)
    }

    /// The tokens of a block.
    pub fn tokens_of(&self, id: BlockId) -> impl Iterator<Item = &Token> + '_ {
        let block = &self.blocks[id];
        (block.start.index()..=block.end.index()).map(move |i| &self.tokens[TokenId(i as u32)])
    }
}

/// A lazy block parser. Pulls tokens from the underlying iterator as blocks
/// are requested, and yields the id of every block once it is final.
///
/// After an error the iterator is exhausted, but the tokens and blocks
/// produced up to that point remain accessible.
pub struct BlockParser<I> {
    input: I,
    state: ParserState,
    failed: bool,
}

impl<I> BlockParser<I>
where
    I: Iterator<Item = Result<Token, TokenizerError>>,
{
    pub fn new(input: I, options: ParserOptions) -> BlockParser<I> {
        BlockParser {
            input,
            state: ParserState::new(options),
            failed: false,
        }
    }

    /// The tokens consumed so far.
    pub fn tokens(&self) -> &TokenStream {
        &self.state.tokens
    }

    /// The blocks emitted so far.
    pub fn blocks(&self) -> &BlockStream {
        &self.state.blocks
    }

    /// The name mismatches encountered so far.
    pub fn warnings(&self) -> &[NameMismatch] {
        &self.state.warnings
    }

    /// Check whether the end of the document has been reached.
    pub fn is_done(&self) -> bool {
        self.state.done
    }

    /// Release the tokens and blocks produced so far.
    pub fn into_document(self) -> Document {
        Document {
            tokens: self.state.tokens,
            blocks: self.state.blocks,
            warnings: self.state.warnings,
        }
    }

    fn fail(&mut self, err: BlockParserError) -> Option<Result<BlockId, BlockParserError>> {
        self.failed = true;
        Some(Err(err))
    }
}

impl<I> Iterator for BlockParser<I>
where
    I: Iterator<Item = Result<Token, TokenizerError>>,
{
    type Item = Result<BlockId, BlockParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(id) = self.state.fresh.pop_front() {
                return Some(Ok(id));
            }
            if self.failed || self.state.done {
                return None;
            }
            let token = match self.input.next() {
                Some(Ok(token)) => token,
                Some(Err(err)) => return self.fail(err.into()),
                None => {
                    let err = BlockParserError::UnexpectedEnd {
                        state: self.state.next_state.name,
                    };
                    return self.fail(err);
                }
            };
            if let Err(err) = self.state.step(token) {
                return self.fail(err);
            }
        }
    }
}

/// Parse a sequence of tokens into a document.
pub fn parse_blocks<I>(tokens: I, options: ParserOptions) -> Result<Document, BlockParserError>
where
    I: IntoIterator<Item = Result<Token, TokenizerError>>,
{
    let mut parser = BlockParser::new(tokens.into_iter(), options);
    for result in parser.by_ref() {
        result?;
    }
    Ok(parser.into_document())
}

/// Parse an already buffered token stream into a document.
pub fn parse_stream(
    tokens: TokenStream,
    options: ParserOptions,
) -> Result<Document, BlockParserError> {
    parse_blocks(tokens.into_iter().map(Ok), options)
}
