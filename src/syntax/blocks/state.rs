// Copyright (c) 2016-2021 Fabian Schuiki

//! The machinery shared by all block state machines.
//!
//! A state is a function that receives the parser state with the current
//! token. Nested constructs are handled by pushing a frame that remembers
//! where to resume onto the return stack, and popping it once the nested
//! construct is complete. A state may ask for the current token to be
//! re-issued, in which case the engine immediately hands the same token to
//! whatever state is current afterwards.

use super::end::EndSpec;
use super::error::{BlockParserError, NameMismatch};
use super::expression::ExpressionSpec;
use super::list::ListSpec;
use super::object::ObjectSpec;
use super::reference::ReferenceSpec;
use super::region::RegionSpec;
use super::statement::StatementSpec;
use super::{comment, document, expression};
use super::{BlockId, BlockKind, BlockStream};
use crate::lexer::{Fused, Kw, Token, TokenId, TokenKind, TokenStream};
use std::collections::VecDeque;
use std::fmt;

/// The number of times a single token may be re-issued before the parser
/// gives up.
const MAX_REISSUE: usize = 64;

pub(crate) type StateFn = fn(&mut ParserState) -> Result<(), BlockParserError>;

/// A named state function.
#[derive(Clone, Copy)]
pub(crate) struct State {
    pub name: &'static str,
    pub func: StateFn,
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Options controlling the block parser.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Treat a trailing name that does not match the name of its construct
    /// as an error rather than a warning.
    pub strict_names: bool,
    /// Log every state transition at debug level instead of trace level.
    pub trace: bool,
}

/// The kind of statement list being parsed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Body {
    Plain,
    /// The statements after `if ... then` or `elsif ... then`.
    IfBranch,
    /// The statements after `else`.
    ElseBranch,
}

/// The tables of the construct currently being parsed. Saved and restored
/// together with the resume state on the return stack.
#[derive(Clone, Copy)]
pub(crate) struct Context {
    pub region: Option<&'static RegionSpec>,
    pub end: Option<&'static EndSpec>,
    pub object: Option<&'static ObjectSpec>,
    pub list: Option<&'static ListSpec>,
    pub expression: Option<&'static ExpressionSpec>,
    pub reference: Option<&'static ReferenceSpec>,
    pub statement: Option<&'static StatementSpec>,
    pub body: Body,
}

impl Default for Context {
    fn default() -> Context {
        Context {
            region: None,
            end: None,
            object: None,
            list: None,
            expression: None,
            reference: None,
            statement: None,
            body: Body::Plain,
        }
    }
}

struct Frame {
    state: State,
    counter: i32,
    context: Context,
}

/// A piece of a block that was set aside by an interruption. Fragments
/// without a kind belong to the block under construction and receive its
/// kind once it completes.
struct Fragment {
    start: TokenId,
    end: TokenId,
    kind: Option<BlockKind>,
}

/// A construct whose `end` may repeat its name.
#[derive(Clone, Debug)]
pub(crate) struct DeclaredName {
    pub keyword: Kw,
    pub name: Option<String>,
}

pub(crate) struct ParserState {
    pub tokens: TokenStream,
    pub blocks: BlockStream,
    /// The current token.
    pub token: TokenId,
    pub next_state: State,
    /// The state currently being executed.
    pub running: State,
    stack: Vec<Frame>,
    /// The first token of the block under construction.
    pub marker: Option<TokenId>,
    /// Parenthesis depth, or any other per-machine count.
    pub counter: i32,
    /// Whether the current expression has any content yet.
    pub content: bool,
    pub context: Context,
    pub names: Vec<DeclaredName>,
    /// The label of the statement being parsed.
    pub label: Option<String>,
    /// The trailing name of the end block being parsed.
    pub end_name: Option<TokenId>,
    pub warnings: Vec<NameMismatch>,
    pub options: ParserOptions,
    pub reissue: bool,
    pub done: bool,
    deferred: Vec<Fragment>,
    last_emitted: Option<BlockKind>,
    /// Blocks that have been emitted but not yet handed out.
    pub fresh: VecDeque<BlockId>,
}

impl ParserState {
    pub fn new(options: ParserOptions) -> ParserState {
        ParserState {
            tokens: TokenStream::new(),
            blocks: BlockStream::new(),
            token: TokenId(0),
            next_state: state!(document::start),
            running: state!(document::start),
            stack: Vec::new(),
            marker: None,
            counter: 0,
            content: false,
            context: Context::default(),
            names: Vec::new(),
            label: None,
            end_name: None,
            warnings: Vec::new(),
            options,
            reissue: false,
            done: false,
            deferred: Vec::new(),
            last_emitted: None,
            fresh: VecDeque::new(),
        }
    }

    /// Feed the next token through the state machines.
    pub fn step(&mut self, token: Token) -> Result<(), BlockParserError> {
        self.token = self.tokens.push(token);
        if self.marker.is_none() {
            self.marker = Some(self.token);
        }
        for _ in 0..MAX_REISSUE {
            self.reissue = false;
            self.running = self.next_state;
            if self.options.trace {
                debug!("{:<32} {}", self.running.name, self.current());
            } else {
                trace!("{:<32} {}", self.running.name, self.current());
            }
            (self.running.func)(self)?;
            if !self.reissue {
                return Ok(());
            }
            if self.marker.is_none() {
                self.marker = Some(self.token);
            }
        }
        Err(self.bug("token re-issued without progress"))
    }

    pub fn current(&self) -> &Token {
        &self.tokens[self.token]
    }

    pub fn kind(&self) -> TokenKind {
        self.current().kind
    }

    pub fn keyword(&self) -> Option<Kw> {
        self.current().keyword()
    }

    pub fn is_char(&self, c: char) -> bool {
        self.current().is_char(c)
    }

    pub fn is_keyword(&self, kw: Kw) -> bool {
        self.current().is_keyword(kw)
    }

    pub fn is_fused(&self, f: Fused) -> bool {
        self.kind() == TokenKind::FusedCharacter(f)
    }

    /// Check whether the current token is an identifier.
    pub fn is_name(&self) -> bool {
        self.current().is_identifier_word()
    }

    /// The closest token before the current one that is not whitespace or a
    /// comment.
    pub fn previous_significant(&self) -> Option<&Token> {
        let mut id = self.current().previous();
        while let Some(i) = id {
            let token = &self.tokens[i];
            if !token.kind.is_trivia() {
                return Some(token);
            }
            id = token.previous();
        }
        None
    }

    /// Change the kind of the current token.
    pub fn reclassify(&mut self, kind: TokenKind) {
        self.tokens.reclassify(self.token, kind);
    }

    /// Classify the current word as keyword or identifier.
    pub fn classify_word(&mut self) {
        if self.kind() == TokenKind::Word {
            let kind = match self.keyword() {
                Some(kw) => TokenKind::Keyword(kw),
                None => TokenKind::Identifier,
            };
            self.reclassify(kind);
        }
    }

    /// Mark the current word as identifier and return its text.
    pub fn identifier(&mut self) -> String {
        if self.kind() == TokenKind::Word {
            self.reclassify(TokenKind::Identifier);
        }
        self.current().value.clone()
    }

    /// Complete the block under construction with the current token as its
    /// last token.
    pub fn emit(&mut self, kind: BlockKind) {
        let start = self.marker.unwrap_or(self.token);
        self.finish(kind, Some((start, self.token)));
        self.marker = None;
    }

    /// Complete the block under construction with the token before the
    /// current one as its last token. The current token starts the next
    /// block.
    pub fn emit_before(&mut self, kind: BlockKind) {
        let start = self.marker.unwrap_or(self.token);
        let range = if start < self.token {
            Some((start, self.token.prev()))
        } else {
            None
        };
        self.finish(kind, range);
        self.marker = Some(self.token);
    }

    /// Emit a whitespace or comment block consisting of the current token.
    /// While a split block is pending, the block is queued behind its
    /// fragments.
    pub fn emit_aside(&mut self, kind: BlockKind) {
        let start = self.marker.unwrap_or(self.token);
        self.aside(kind, start, self.token);
        self.marker = None;
    }

    fn aside(&mut self, kind: BlockKind, start: TokenId, end: TokenId) {
        if self.deferred.is_empty() {
            self.append(kind, start, end, false);
        } else {
            self.deferred.push(Fragment {
                start,
                end,
                kind: Some(kind),
            });
        }
        self.last_emitted = Some(kind);
    }

    /// The kind of block the current whitespace, line break or comment token
    /// forms. A line break directly after another one is an empty line.
    pub fn trivia_kind(&self) -> Option<BlockKind> {
        Some(match self.kind() {
            TokenKind::Space => BlockKind::Whitespace,
            TokenKind::Indentation => BlockKind::Indentation,
            TokenKind::SingleLineComment => BlockKind::SingleLineComment,
            TokenKind::MultiLineComment => BlockKind::MultiLineComment,
            TokenKind::Linebreak => match self.last_emitted {
                Some(BlockKind::Linebreak) | Some(BlockKind::EmptyLine) => BlockKind::EmptyLine,
                _ => BlockKind::Linebreak,
            },
            _ => return None,
        })
    }

    fn finish(&mut self, kind: BlockKind, range: Option<(TokenId, TokenId)>) {
        if self.deferred.is_empty() {
            if let Some((start, end)) = range {
                self.append(kind, start, end, false);
                self.last_emitted = Some(kind);
            }
            return;
        }
        let parts = self.deferred.iter().filter(|f| f.kind.is_none()).count()
            + if range.is_some() { 1 } else { 0 };
        let multi_part = parts > 1;
        for fragment in std::mem::replace(&mut self.deferred, Vec::new()) {
            match fragment.kind {
                Some(k) => self.append(k, fragment.start, fragment.end, false),
                None => self.append(kind, fragment.start, fragment.end, multi_part),
            }
        }
        if let Some((start, end)) = range {
            self.append(kind, start, end, multi_part);
        }
    }

    fn append(&mut self, kind: BlockKind, start: TokenId, end: TokenId, multi_part: bool) {
        let id = self.blocks.push(kind, start, end, multi_part);
        self.last_emitted = Some(kind);
        self.fresh.push_back(id);
    }

    /// Set the block under construction aside and handle the current line
    /// break, indentation or comment. The current state resumes with the
    /// first token that is neither.
    pub fn interrupt(&mut self) {
        match self.marker {
            Some(start) if start < self.token => {
                let end = self.token.prev();
                if self.is_blank(start, end) {
                    // Nothing of the block has been seen yet.
                    self.aside(BlockKind::Whitespace, start, end);
                } else {
                    self.deferred.push(Fragment {
                        start,
                        end,
                        kind: None,
                    });
                    self.last_emitted = None;
                }
            }
            _ => (),
        }
        self.marker = Some(self.token);
        let resume = self.running;
        self.push(resume, state!(comment::aside));
        self.reissue = true;
    }

    /// Check whether the tokens `start..=end` are all spaces.
    fn is_blank(&self, start: TokenId, end: TokenId) -> bool {
        (start.index()..=end.index())
            .all(|i| self.tokens[TokenId(i as u32)].kind == TokenKind::Space)
    }

    /// Handle whitespace inside a block. Spaces become part of the block,
    /// line breaks, indentation and comments interrupt it. Returns whether
    /// the current token was handled.
    pub fn absorb_trivia(&mut self) -> bool {
        match self.kind() {
            TokenKind::Space => true,
            TokenKind::Linebreak
            | TokenKind::Indentation
            | TokenKind::SingleLineComment
            | TokenKind::MultiLineComment => {
                self.interrupt();
                true
            }
            _ => false,
        }
    }

    /// Enter the nested machine `sub`, resuming with `resume` once it pops.
    pub fn push(&mut self, resume: State, sub: State) {
        self.stack.push(Frame {
            state: resume,
            counter: self.counter,
            context: self.context,
        });
        self.counter = 0;
        self.next_state = sub;
    }

    /// Return from `n` nested machines.
    pub fn pop(&mut self, n: usize) -> Result<(), BlockParserError> {
        for _ in 0..n {
            let frame = match self.stack.pop() {
                Some(frame) => frame,
                None => return Err(self.bug("return stack underflow")),
            };
            self.next_state = frame.state;
            self.counter = frame.counter;
            self.context = frame.context;
        }
        Ok(())
    }

    /// The depth of the return stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Enter an expression starting at the current token, resuming with
    /// `resume` at its terminator.
    pub fn push_expression(&mut self, resume: State, spec: &'static ExpressionSpec) {
        self.push(resume, state!(expression::body));
        self.context.expression = Some(spec);
        self.content = false;
        self.reissue = true;
    }

    /// Fetch a table from the context.
    pub fn require<T>(
        &self,
        table: Option<&'static T>,
        what: &str,
    ) -> Result<&'static T, BlockParserError> {
        match table {
            Some(t) => Ok(t),
            None => Err(self.bug(format!("no {} table in context", what))),
        }
    }

    /// Record a construct whose end may repeat its name.
    pub fn declare(&mut self, keyword: Kw, name: Option<String>) {
        match name {
            Some(ref name) => debug!("entering {} `{}`", keyword, name),
            None => debug!("entering {}", keyword),
        }
        self.names.push(DeclaredName { keyword, name });
    }

    /// Leave the innermost construct, checking the trailing name of its end
    /// block against its declared name.
    pub fn close_name(&mut self) -> Result<(), BlockParserError> {
        let declared = self.names.pop();
        let found = match self.end_name.take() {
            Some(found) => found,
            None => return Ok(()),
        };
        let declared = match declared {
            Some(declared) => declared,
            None => return Err(self.bug("end of an undeclared construct")),
        };
        let token = &self.tokens[found];
        if let Some(ref name) = declared.name {
            if names_match(name, &token.value) {
                return Ok(());
            }
        }
        let mismatch = NameMismatch {
            keyword: declared.keyword,
            expected: declared.name,
            found: token.value.clone(),
            token: found,
            position: token.start,
        };
        if self.options.strict_names {
            return Err(BlockParserError::NameMismatch(mismatch));
        }
        warn!("{}", mismatch);
        self.warnings.push(mismatch);
        Ok(())
    }

    /// An error complaining about the current token.
    pub fn unexpected<S: Into<String>>(&self, message: S) -> BlockParserError {
        BlockParserError::UnexpectedToken {
            token: self.current().clone(),
            message: message.into(),
        }
    }

    /// An error listing the legal continuations at the current token.
    pub fn expected<S: AsRef<str>>(&self, alternatives: &[S]) -> BlockParserError {
        let list = match alternatives.split_last() {
            None => String::from("something else"),
            Some((last, [])) => last.as_ref().to_string(),
            Some((last, init)) => {
                let init: Vec<&str> = init.iter().map(|s| s.as_ref()).collect();
                format!("one of {} or {}", init.join(", "), last.as_ref())
            }
        };
        self.unexpected(format!("Expected {} but found {}.", list, self.current()))
    }

    /// An error signalling a construct that is recognized but unsupported.
    pub fn not_implemented<S: Into<String>>(&self, what: S) -> BlockParserError {
        BlockParserError::NotImplemented {
            token: self.current().clone(),
            what: what.into(),
        }
    }

    /// An error signalling an inconsistency in the state machines.
    pub fn bug<S: Into<String>>(&self, message: S) -> BlockParserError {
        BlockParserError::Bug {
            state: self.running.name,
            message: message.into(),
        }
    }
}

/// Compare two names. Basic identifiers are case-insensitive, extended
/// identifiers are not.
pub(crate) fn names_match(a: &str, b: &str) -> bool {
    if a.starts_with('\\') || b.starts_with('\\') {
        a == b
    } else {
        a.to_lowercase() == b.to_lowercase()
    }
}

/// Quote a keyword for use in a diagnostic.
pub(crate) fn kw(k: Kw) -> String {
    format!("keyword {}", k.upper())
}
