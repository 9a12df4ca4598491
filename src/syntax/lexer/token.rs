// Copyright (c) 2016-2020 Fabian Schuiki

//! The tokens emitted by the lexer, and the keyword and operator tables used
//! by the block parser to reclassify them.

use serde::Serialize;
use std;
use std::fmt::{Display, Formatter, Result};
use vhdl_blocks_common::source::{SourcePosition, Span};
use vhdl_blocks_common::util::HasDesc;

/// An index into a token stream.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
pub struct TokenId(pub(crate) u32);

impl TokenId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn prev(self) -> TokenId {
        TokenId(self.0 - 1)
    }
}

/// A token as emitted by the tokenizer, or as reclassified by the block
/// parser.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// The raw text of the token. Concatenating the values of all tokens
    /// reproduces the input.
    pub value: String,
    /// The position of the first character.
    pub start: SourcePosition,
    /// The position of the last character.
    pub end: SourcePosition,
    pub(crate) previous: Option<TokenId>,
    pub(crate) next: Option<TokenId>,
}

impl Token {
    /// Create a new, not yet linked token.
    pub fn new<S: Into<String>>(
        kind: TokenKind,
        value: S,
        start: SourcePosition,
        end: SourcePosition,
    ) -> Token {
        Token {
            kind,
            value: value.into(),
            start,
            end,
            previous: None,
            next: None,
        }
    }

    /// Create a token that does not originate from any input position.
    pub fn synthetic<S: Into<String>>(kind: TokenKind, value: S) -> Token {
        Token::new(kind, value, SourcePosition::UNKNOWN, SourcePosition::UNKNOWN)
    }

    pub fn previous(&self) -> Option<TokenId> {
        self.previous
    }

    pub fn next(&self) -> Option<TokenId> {
        self.next
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Check whether this token is the character `c`.
    pub fn is_char(&self, c: char) -> bool {
        self.kind == TokenKind::Character(c)
    }

    /// Check whether this is a word (or an already reclassified keyword)
    /// spelling keyword `kw`.
    pub fn is_keyword(&self, kw: Kw) -> bool {
        match self.kind {
            TokenKind::Keyword(k) => k == kw,
            TokenKind::Word => find_keyword(&self.value) == Some(kw),
            _ => false,
        }
    }

    /// The keyword this word spells, if any.
    pub fn keyword(&self) -> Option<Kw> {
        match self.kind {
            TokenKind::Keyword(k) => Some(k),
            TokenKind::Word => find_keyword(&self.value),
            _ => None,
        }
    }

    /// Check whether this is a word that is not a reserved word.
    pub fn is_identifier_word(&self) -> bool {
        match self.kind {
            TokenKind::Word => find_keyword(&self.value).is_none(),
            TokenKind::Identifier | TokenKind::ExtendedIdentifier => true,
            _ => false,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self.kind {
            TokenKind::StartOfDocument | TokenKind::EndOfDocument => {
                write!(f, "{}", self.kind.desc())
            }
            TokenKind::Linebreak => write!(f, "line break"),
            kind => write!(f, "{} `{}`", kind.desc(), self.value.escape_debug()),
        }
    }
}

/// The kind of a token.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum TokenKind {
    StartOfDocument,
    EndOfDocument,
    /// A single punctuation character.
    Character(char),
    /// A multi-character operator such as `:=` or `?/=`.
    FusedCharacter(Fused),
    /// An identifier-shaped lexeme, not yet classified.
    Word,
    Space,
    Linebreak,
    /// A space run directly after a line break or single-line comment.
    Indentation,
    SingleLineComment,
    MultiLineComment,
    IntegerLiteral,
    RealLiteral,
    CharacterLiteral,
    StringLiteral,
    BitStringLiteral,
    ExtendedIdentifier,
    /// A word reclassified as a keyword.
    Keyword(Kw),
    /// A word reclassified as an identifier.
    Identifier,
    /// A character or fused character reclassified as an operator.
    Operator(Operator),
}

impl TokenKind {
    /// Check whether tokens of this kind carry no syntactic meaning.
    pub fn is_trivia(self) -> bool {
        match self {
            TokenKind::Space
            | TokenKind::Linebreak
            | TokenKind::Indentation
            | TokenKind::SingleLineComment
            | TokenKind::MultiLineComment => true,
            _ => false,
        }
    }

    pub fn is_comment(self) -> bool {
        match self {
            TokenKind::SingleLineComment | TokenKind::MultiLineComment => true,
            _ => false,
        }
    }

    pub fn is_literal(self) -> bool {
        match self {
            TokenKind::IntegerLiteral
            | TokenKind::RealLiteral
            | TokenKind::CharacterLiteral
            | TokenKind::StringLiteral
            | TokenKind::BitStringLiteral => true,
            _ => false,
        }
    }
}

impl HasDesc for TokenKind {
    fn desc(&self) -> &'static str {
        match *self {
            TokenKind::StartOfDocument => "start of document",
            TokenKind::EndOfDocument => "end of document",
            TokenKind::Character(_) => "character",
            TokenKind::FusedCharacter(_) => "operator",
            TokenKind::Word => "word",
            TokenKind::Space => "whitespace",
            TokenKind::Linebreak => "line break",
            TokenKind::Indentation => "indentation",
            TokenKind::SingleLineComment => "comment",
            TokenKind::MultiLineComment => "comment",
            TokenKind::IntegerLiteral => "integer literal",
            TokenKind::RealLiteral => "real literal",
            TokenKind::CharacterLiteral => "character literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::BitStringLiteral => "bit string literal",
            TokenKind::ExtendedIdentifier => "extended identifier",
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Operator(_) => "operator",
        }
    }
}

/// The multi-character operators recognized by the tokenizer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum Fused {
    VarAssign,
    Leq,
    Geq,
    Neq,
    Pow,
    MatchEq,
    MatchNeq,
    MatchLt,
    MatchLeq,
    MatchGt,
    MatchGeq,
    LtGt,
    Arrow,
    Lshift,
    Rshift,
    Condition,
}

impl Fused {
    pub fn as_str(self) -> &'static str {
        match self {
            Fused::VarAssign => ":=",
            Fused::Leq => "<=",
            Fused::Geq => ">=",
            Fused::Neq => "/=",
            Fused::Pow => "**",
            Fused::MatchEq => "?=",
            Fused::MatchNeq => "?/=",
            Fused::MatchLt => "?<",
            Fused::MatchLeq => "?<=",
            Fused::MatchGt => "?>",
            Fused::MatchGeq => "?>=",
            Fused::LtGt => "<>",
            Fused::Arrow => "=>",
            Fused::Lshift => "<<",
            Fused::Rshift => ">>",
            Fused::Condition => "??",
        }
    }
}

/// Look up a two-character operator.
pub const fn find_fused2(c0: char, c1: char) -> Option<Fused> {
    match (c0, c1) {
        (':', '=') => Some(Fused::VarAssign),
        ('<', '=') => Some(Fused::Leq),
        ('>', '=') => Some(Fused::Geq),
        ('/', '=') => Some(Fused::Neq),
        ('*', '*') => Some(Fused::Pow),
        ('?', '=') => Some(Fused::MatchEq),
        ('?', '<') => Some(Fused::MatchLt),
        ('?', '>') => Some(Fused::MatchGt),
        ('?', '?') => Some(Fused::Condition),
        ('<', '>') => Some(Fused::LtGt),
        ('=', '>') => Some(Fused::Arrow),
        ('<', '<') => Some(Fused::Lshift),
        ('>', '>') => Some(Fused::Rshift),
        _ => None,
    }
}

/// Look up a three-character operator.
pub const fn find_fused3(c0: char, c1: char, c2: char) -> Option<Fused> {
    match (c0, c1, c2) {
        ('?', '/', '=') => Some(Fused::MatchNeq),
        ('?', '<', '=') => Some(Fused::MatchLeq),
        ('?', '>', '=') => Some(Fused::MatchGeq),
        _ => None,
    }
}

/// The characters that form a token of their own.
pub const fn is_single_character(c: char) -> bool {
    match c {
        '(' | ')' | '[' | ']' | '.' | ',' | ':' | ';' | '\'' | '&' | '=' | '<' | '>' | '+'
        | '-' | '*' | '/' | '|' | '?' | '@' | '#' | '`' => true,
        _ => false,
    }
}

/// The symbolic operators of expressions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum Operator {
    Eq,
    Neq,
    Lt,
    Leq,
    Gt,
    Geq,
    MatchEq,
    MatchNeq,
    MatchLt,
    MatchLeq,
    MatchGt,
    MatchGeq,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Concat,
    Condition,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Neq => "/=",
            Operator::Lt => "<",
            Operator::Leq => "<=",
            Operator::Gt => ">",
            Operator::Geq => ">=",
            Operator::MatchEq => "?=",
            Operator::MatchNeq => "?/=",
            Operator::MatchLt => "?<",
            Operator::MatchLeq => "?<=",
            Operator::MatchGt => "?>",
            Operator::MatchGeq => "?>=",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Pow => "**",
            Operator::Concat => "&",
            Operator::Condition => "??",
        }
    }

    /// Translate a single character into an operator.
    pub const fn from_char(c: char) -> Option<Operator> {
        match c {
            '=' => Some(Operator::Eq),
            '<' => Some(Operator::Lt),
            '>' => Some(Operator::Gt),
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '&' => Some(Operator::Concat),
            _ => None,
        }
    }

    /// Translate a fused character into an operator. Assignments, arrows,
    /// boxes and external-name brackets are not operators.
    pub const fn from_fused(f: Fused) -> Option<Operator> {
        match f {
            Fused::Leq => Some(Operator::Leq),
            Fused::Geq => Some(Operator::Geq),
            Fused::Neq => Some(Operator::Neq),
            Fused::Pow => Some(Operator::Pow),
            Fused::MatchEq => Some(Operator::MatchEq),
            Fused::MatchNeq => Some(Operator::MatchNeq),
            Fused::MatchLt => Some(Operator::MatchLt),
            Fused::MatchLeq => Some(Operator::MatchLeq),
            Fused::MatchGt => Some(Operator::MatchGt),
            Fused::MatchGeq => Some(Operator::MatchGeq),
            Fused::Condition => Some(Operator::Condition),
            Fused::VarAssign | Fused::LtGt | Fused::Arrow | Fused::Lshift | Fused::Rshift => None,
        }
    }
}

/// Generates a `Kw` enum from a list of keywords.
macro_rules! declare_keywords {(
    $( ($konst: ident, $string: expr) )*
) => {
    #[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Debug, Hash, Serialize)]
    pub enum Kw {
        $($konst,)*
    }

    impl Kw {
        pub fn as_str(self) -> &'static str {
            match self {
                $(Kw::$konst => $string,)*
            }
        }
    }

    impl std::fmt::Display for Kw {
        fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "{}", self.as_str())
        }
    }

    pub fn find_keyword<S: AsRef<str>>(name: S) -> Option<Kw> {
        use std::collections::HashMap;
        use once_cell::sync::Lazy;
        static TBL: Lazy<HashMap<&'static str, Kw>> = Lazy::new(|| {
            let mut tbl = HashMap::new();
            $(
                assert!($string.chars().all(|c| !c.is_uppercase()));
                tbl.insert($string, Kw::$konst);
            )*
            tbl
        });
        TBL.get(name.as_ref().to_lowercase().as_str()).map(|kw| *kw)
    }
}}

impl Kw {
    /// Check whether this keyword is a logical, arithmetic, or shift operator.
    pub fn is_operator(self) -> bool {
        match self {
            Kw::Abs
            | Kw::And
            | Kw::Mod
            | Kw::Nand
            | Kw::Nor
            | Kw::Not
            | Kw::Or
            | Kw::Rem
            | Kw::Rol
            | Kw::Ror
            | Kw::Sla
            | Kw::Sll
            | Kw::Sra
            | Kw::Srl
            | Kw::Xnor
            | Kw::Xor => true,
            _ => false,
        }
    }

    /// The keyword in upper case, as used in diagnostics.
    pub fn upper(self) -> String {
        self.as_str().to_uppercase()
    }
}

declare_keywords! {
    // Keywords as per IEEE 1076-2008 section 15.10
    (Abs,                "abs")
    (Access,             "access")
    (After,              "after")
    (Alias,              "alias")
    (All,                "all")
    (And,                "and")
    (Architecture,       "architecture")
    (Array,              "array")
    (Assert,             "assert")
    (Assume,             "assume")
    (AssumeGuarantee,    "assume_guarantee")
    (Attribute,          "attribute")
    (Begin,              "begin")
    (Block,              "block")
    (Body,               "body")
    (Buffer,             "buffer")
    (Bus,                "bus")
    (Case,               "case")
    (Component,          "component")
    (Configuration,      "configuration")
    (Constant,           "constant")
    (Context,            "context")
    (Cover,              "cover")
    (Default,            "default")
    (Disconnect,         "disconnect")
    (Downto,             "downto")
    (Else,               "else")
    (Elsif,              "elsif")
    (End,                "end")
    (Entity,             "entity")
    (Exit,               "exit")
    (Fairness,           "fairness")
    (File,               "file")
    (For,                "for")
    (Force,              "force")
    (Function,           "function")
    (Generate,           "generate")
    (Generic,            "generic")
    (Group,              "group")
    (Guarded,            "guarded")
    (If,                 "if")
    (Impure,             "impure")
    (In,                 "in")
    (Inertial,           "inertial")
    (Inout,              "inout")
    (Is,                 "is")
    (Label,              "label")
    (Library,            "library")
    (Linkage,            "linkage")
    (Literal,            "literal")
    (Loop,               "loop")
    (Map,                "map")
    (Mod,                "mod")
    (Nand,               "nand")
    (New,                "new")
    (Next,               "next")
    (Nor,                "nor")
    (Not,                "not")
    (Null,               "null")
    (Of,                 "of")
    (On,                 "on")
    (Open,               "open")
    (Or,                 "or")
    (Others,             "others")
    (Out,                "out")
    (Package,            "package")
    (Parameter,          "parameter")
    (Port,               "port")
    (Postponed,          "postponed")
    (Procedure,          "procedure")
    (Process,            "process")
    (Property,           "property")
    (Protected,          "protected")
    (Pure,               "pure")
    (Range,              "range")
    (Record,             "record")
    (Register,           "register")
    (Reject,             "reject")
    (Release,            "release")
    (Rem,                "rem")
    (Report,             "report")
    (Restrict,           "restrict")
    (RestrictGuarantee,  "restrict_guarantee")
    (Return,             "return")
    (Rol,                "rol")
    (Ror,                "ror")
    (Select,             "select")
    (Sequence,           "sequence")
    (Severity,           "severity")
    (Shared,             "shared")
    (Signal,             "signal")
    (Sla,                "sla")
    (Sll,                "sll")
    (Sra,                "sra")
    (Srl,                "srl")
    (Strong,             "strong")
    (Subtype,            "subtype")
    (Then,               "then")
    (To,                 "to")
    (Transport,          "transport")
    (Type,               "type")
    (Unaffected,         "unaffected")
    (Units,              "units")
    (Until,              "until")
    (Use,                "use")
    (Variable,           "variable")
    (Vmode,              "vmode")
    (Vprop,              "vprop")
    (Vunit,              "vunit")
    (Wait,               "wait")
    (When,               "when")
    (While,              "while")
    (With,               "with")
    (Xnor,               "xnor")
    (Xor,                "xor")
}
