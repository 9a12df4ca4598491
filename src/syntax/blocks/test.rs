// Copyright (c) 2016-2021 Fabian Schuiki

use super::*;
use crate::lexer::{tokenize, Kw, Token, TokenKind, TokenizerError};
use vhdl_blocks_common::errors::{DiagBuilder2, DiagSegment, Severity};
use vhdl_blocks_common::source::SourcePosition;
use super::BlockKind::*;

fn parse_with(input: &str, options: ParserOptions) -> Result<Document, BlockParserError> {
    let _ = pretty_env_logger::try_init();
    parse_blocks(tokenize(input), options)
}

/// Parse `input`, panicking with a diagnostic on failure, and check the
/// stream invariants of the result.
fn parse(input: &str) -> Document {
    let doc = match parse_with(input, ParserOptions::default()) {
        Ok(doc) => doc,
        Err(err) => panic!("{}", DiagBuilder2::from(&err)),
    };
    assert!(doc.tokens.verify_links(), "broken token links");
    assert!(doc.blocks.verify(doc.tokens.len()), "blocks do not cover tokens");
    assert_eq!(doc.tokens.source_text(), input);
    doc
}

fn error(input: &str) -> BlockParserError {
    match parse_with(input, ParserOptions::default()) {
        Ok(_) => panic!("parsing `{}` should fail", input),
        Err(err) => err,
    }
}

/// The kind and text of every block between the sentinels.
fn blocks(doc: &Document) -> Vec<(BlockKind, String)> {
    let n = doc.blocks.len();
    assert!(n >= 2);
    assert_eq!(doc.blocks.iter().next().map(|b| b.kind), Some(StartOfDocument));
    assert_eq!(doc.blocks.iter().last().map(|b| b.kind), Some(EndOfDocument));
    doc.blocks
        .ids()
        .skip(1)
        .take(n - 2)
        .map(|id| (doc.blocks[id].kind, doc.text(id)))
        .collect()
}

fn expected(list: &[(BlockKind, &str)]) -> Vec<(BlockKind, String)> {
    list.iter().map(|&(k, s)| (k, s.to_string())).collect()
}

/// Compare all blocks of `input` against `list`.
fn check(input: &str, list: &[(BlockKind, &str)]) {
    assert_eq!(blocks(&parse(input)), expected(list));
}

/// Compare the blocks of `input` against `list`, ignoring whitespace and
/// comment blocks.
fn check_significant(input: &str, list: &[(BlockKind, &str)]) {
    let actual: Vec<_> = blocks(&parse(input))
        .into_iter()
        .filter(|(k, _)| !k.is_skippable())
        .collect();
    assert_eq!(actual, expected(list));
}

#[test]
fn empty_document() {
    let doc = parse("");
    let kinds: Vec<_> = doc.blocks.iter().map(|b| b.kind).collect();
    assert_eq!(kinds, vec![StartOfDocument, EndOfDocument]);
}

#[test]
fn entity_short_end() {
    let doc = parse("entity e is end;");
    let kinds: Vec<_> = doc.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds.len(), 10);
    check(
        "entity e is end;",
        &[(EntityName, "entity e is"), (Whitespace, " "), (EntityEnd, "end;")],
    );
}

#[test]
fn entity_full_end() {
    check(
        "entity e is end entity e;",
        &[
            (EntityName, "entity e is"),
            (Whitespace, " "),
            (EntityEnd, "end entity e;"),
        ],
    );
    check_significant("entity e is end e;", &[(EntityName, "entity e is"), (EntityEnd, "end e;")]);
}

#[test]
fn reclassified_tokens() {
    let doc = parse("entity e is end entity e;");
    let kinds: Vec<_> = doc.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::StartOfDocument,
            TokenKind::Keyword(Kw::Entity),
            TokenKind::Space,
            TokenKind::Identifier,
            TokenKind::Space,
            TokenKind::Keyword(Kw::Is),
            TokenKind::Space,
            TokenKind::Keyword(Kw::End),
            TokenKind::Space,
            TokenKind::Keyword(Kw::Entity),
            TokenKind::Space,
            TokenKind::Identifier,
            TokenKind::Character(';'),
            TokenKind::EndOfDocument,
        ]
    );
}

#[test]
fn architecture() {
    check(
        "architecture a of e is begin end;",
        &[
            (ArchitectureName, "architecture a of e is"),
            (Whitespace, " "),
            (ArchitectureBegin, "begin"),
            (Whitespace, " "),
            (ArchitectureEnd, "end;"),
        ],
    );
}

#[test]
fn use_clause() {
    check(
        "use lib0.pkg0.all, lib0.pkg1.all;",
        &[
            (UseStart, "use "),
            (UseReferenceName, "lib0.pkg0.all"),
            (UseDelimiter, ","),
            (UseReferenceName, " lib0.pkg1.all"),
            (UseEnd, ";"),
        ],
    );
}

#[test]
fn library_and_context() {
    check_significant(
        "library ieee, work;\ncontext lib.ctx;",
        &[
            (LibraryStart, "library "),
            (LibraryReferenceName, "ieee"),
            (LibraryDelimiter, ","),
            (LibraryReferenceName, " work"),
            (LibraryEnd, ";"),
            (ContextStart, "context "),
            (ContextReferenceName, "lib.ctx"),
            (ContextEnd, ";"),
        ],
    );
    assert!(error("library ieee.std;").to_string().contains("`.`"));
}

#[test]
fn comments_split_blocks() {
    let input = "architecture/* c */a/* c */of e is begin end;";
    let doc = parse(input);
    let all: Vec<_> = doc
        .blocks
        .ids()
        .map(|id| (doc.blocks[id].kind, doc.blocks[id].multi_part, doc.text(id)))
        .collect();
    let expected: Vec<_> = vec![
        (StartOfDocument, false, ""),
        (ArchitectureName, true, "architecture"),
        (MultiLineComment, false, "/* c */"),
        (ArchitectureName, true, "a"),
        (MultiLineComment, false, "/* c */"),
        (ArchitectureName, true, "of e is"),
        (Whitespace, false, " "),
        (ArchitectureBegin, false, "begin"),
        (Whitespace, false, " "),
        (ArchitectureEnd, false, "end;"),
        (EndOfDocument, false, ""),
    ]
    .into_iter()
    .map(|(k, m, s)| (k, m, s.to_string()))
    .collect();
    assert_eq!(all, expected);
}

#[test]
fn comment_before_first_token() {
    let input = "entity e is generic ( -- c\n  G : integer); end;";
    check(
        input,
        &[
            (EntityName, "entity e is"),
            (Whitespace, " "),
            (GenericListOpen, "generic ("),
            (Whitespace, " "),
            (SingleLineComment, "-- c\n"),
            (Indentation, "  "),
            (GenericListInterfaceConstant, "G : integer"),
            (GenericListClose, ");"),
            (Whitespace, " "),
            (EntityEnd, "end;"),
        ],
    );
    assert!(parse(input).blocks.iter().all(|b| !b.multi_part));

    let input = "package p is constant c : integer := -- c\n 1; end;";
    check(
        input,
        &[
            (PackageName, "package p is"),
            (Whitespace, " "),
            (ConstantDeclaration, "constant c : integer :="),
            (Whitespace, " "),
            (SingleLineComment, "-- c\n"),
            (Indentation, " "),
            (ConstantDefaultExpression, "1"),
            (ConstantDeclarationEnd, ";"),
            (Whitespace, " "),
            (PackageEnd, "end;"),
        ],
    );
    assert!(parse(input).blocks.iter().all(|b| !b.multi_part));
}

#[test]
fn line_break_inside_block() {
    check(
        "entity e is\n  constant x : integer\n  ;\nend;",
        &[
            (EntityName, "entity e is"),
            (Linebreak, "\n"),
            (Indentation, "  "),
            (ConstantDeclaration, "constant x : integer"),
            (Linebreak, "\n"),
            (Indentation, "  "),
            (ConstantDeclarationEnd, ";"),
            (Linebreak, "\n"),
            (EntityEnd, "end;"),
        ],
    );
    let doc = parse("entity e is\n  constant x : integer\n  ;\nend;");
    assert!(doc.blocks.iter().all(|b| !b.multi_part));
}

#[test]
fn trailing_comment_is_not_part_of_block() {
    check(
        "entity e -- the entity\nis end;",
        &[
            (EntityName, "entity e "),
            (SingleLineComment, "-- the entity\n"),
            (EntityName, "is"),
            (Whitespace, " "),
            (EntityEnd, "end;"),
        ],
    );
}

#[test]
fn empty_lines() {
    check(
        "entity e is\n\n\nend;\n",
        &[
            (EntityName, "entity e is"),
            (Linebreak, "\n"),
            (EmptyLine, "\n"),
            (EmptyLine, "\n"),
            (EntityEnd, "end;"),
            (Linebreak, "\n"),
        ],
    );
}

#[test]
fn generic_without_parenthesis() {
    let err = error("entity e is generic G : integer ); end entity e;");
    match err {
        BlockParserError::UnexpectedToken { ref token, ref message } => {
            assert_eq!(token.value, "G");
            assert!(message.contains("`(`"), "message: {}", message);
        }
        ref e => panic!("unexpected error {:?}", e),
    }
}

#[test]
fn generic_and_port_lists() {
    check_significant(
        "entity e is
            generic (N : natural := 8; type T);
            port (a, b : in bit_vector(N-1 downto 0); y : out bit := '0');
        end entity;",
        &[
            (EntityName, "entity e is"),
            (GenericListOpen, "generic ("),
            (GenericListInterfaceConstant, "N : natural :="),
            (GenericListDefaultExpression, " 8"),
            (GenericListDelimiter, ";"),
            (GenericListInterfaceType, " type T"),
            (GenericListClose, ");"),
            (PortListOpen, "port ("),
            (PortListInterfaceSignal, "a, b : in bit_vector(N-1 downto 0)"),
            (PortListDelimiter, ";"),
            (PortListInterfaceSignal, " y : out bit :="),
            (PortListDefaultExpression, " '0'"),
            (PortListClose, ");"),
            (EntityEnd, "end entity;"),
        ],
    );
}

#[test]
fn unsupported_generics() {
    for input in &[
        "entity e is generic (procedure p); end;",
        "entity e is generic (impure function f return bit); end;",
        "entity e is generic (package p is new q); end;",
    ] {
        assert!(error(input).is_not_implemented(), "{}", input);
    }
}

#[test]
fn object_declarations() {
    check_significant(
        "package p is
            constant c : integer := 4 * (2 + 1);
            signal s, t : bit;
            shared variable v : natural;
        end package p;",
        &[
            (PackageName, "package p is"),
            (ConstantDeclaration, "constant c : integer :="),
            (ConstantDefaultExpression, " 4 * (2 + 1)"),
            (ConstantDeclarationEnd, ";"),
            (SignalDeclaration, "signal s, t : bit"),
            (SignalDeclarationEnd, ";"),
            (SharedVariableDeclaration, "shared variable v : natural"),
            (VariableDeclarationEnd, ";"),
            (PackageEnd, "end package p;"),
        ],
    );
}

#[test]
fn expression_errors() {
    assert!(error("package p is constant c : integer := ; end;")
        .to_string()
        .contains("an expression"));
    assert!(error("package p is constant c : integer := (1 + 2; end;")
        .to_string()
        .contains("`)`"));
    assert!(error("package p is constant c : integer := 1 + 2); end;")
        .to_string()
        .contains("matching"));
    assert!(error("package p is constant c : integer := a := b; end;")
        .to_string()
        .contains("inside an expression"));
    match error("package p is constant c : integer := 1 + 2") {
        BlockParserError::UnexpectedToken { ref token, .. } => {
            assert_eq!(token.kind, TokenKind::EndOfDocument)
        }
        ref e => panic!("unexpected error {:?}", e),
    }
}

#[test]
fn expression_operators() {
    let doc = parse("package p is constant c : boolean := a /= b and not c; end;");
    let kinds: Vec<_> = doc
        .tokens
        .iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| t.kind)
        .skip_while(|k| *k != TokenKind::FusedCharacter(crate::lexer::Fused::VarAssign))
        .skip(1)
        .take(6)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Operator(crate::lexer::Operator::Neq),
            TokenKind::Identifier,
            TokenKind::Keyword(Kw::And),
            TokenKind::Keyword(Kw::Not),
            TokenKind::Identifier,
        ]
    );
}

#[test]
fn package_body() {
    check_significant(
        "package body p is
            constant c : integer := 1;
        end package body p;",
        &[
            (PackageBodyName, "package body p is"),
            (ConstantDeclaration, "constant c : integer :="),
            (ConstantDefaultExpression, " 1"),
            (ConstantDeclarationEnd, ";"),
            (PackageBodyEnd, "end package body p;"),
        ],
    );
    assert!(error("package p is new work.q;").is_not_implemented());
}

#[test]
fn subprograms() {
    check_significant(
        "package body p is
            function f(a : integer) return integer is
            begin
                return a;
            end function f;
            pure function \"+\"(a, b : t) return t;
            procedure q;
            procedure r is
                variable v : integer;
            begin
                null;
            end procedure;
            procedure s(constant x : in integer := 0) is
            begin
                return;
            end s;
        end package body p;",
        &[
            (PackageBodyName, "package body p is"),
            (FunctionName, "function f"),
            (ParameterListOpen, "("),
            (ParameterListInterfaceObject, "a : integer"),
            (ParameterListClose, ")"),
            (FunctionReturnType, " return integer is"),
            (FunctionBegin, "begin"),
            (ReturnStart, "return "),
            (ReturnExpression, "a"),
            (ReturnEnd, ";"),
            (FunctionEnd, "end function f;"),
            (FunctionName, "pure function \"+\""),
            (ParameterListOpen, "("),
            (ParameterListInterfaceObject, "a, b : t"),
            (ParameterListClose, ")"),
            (FunctionReturnType, " return t"),
            (FunctionDeclarationEnd, ";"),
            (ProcedureName, "procedure q"),
            (ProcedureDeclarationEnd, ";"),
            (ProcedureName, "procedure r is"),
            (VariableDeclaration, "variable v : integer"),
            (VariableDeclarationEnd, ";"),
            (ProcedureBegin, "begin"),
            (NullStatement, "null;"),
            (ProcedureEnd, "end procedure;"),
            (ProcedureName, "procedure s"),
            (ParameterListOpen, "("),
            (ParameterListInterfaceObject, "constant x : in integer :="),
            (ParameterListDefaultExpression, " 0"),
            (ParameterListClose, ")"),
            (ProcedureIs, " is"),
            (ProcedureBegin, "begin"),
            (ReturnStart, "return"),
            (ReturnEnd, ";"),
            (ProcedureEnd, "end s;"),
            (PackageBodyEnd, "end package body p;"),
        ],
    );
    assert!(parse("package body p is procedure q; end;").warnings.is_empty());
}

#[test]
fn process_and_sequential_statements() {
    check_significant(
        "architecture a of e is
        begin
            p: process (clk) is
                variable v : integer := 0;
            begin
                v := v + 1;
                if v = 2 then
                    report \"two\";
                elsif v > 3 then
                    null;
                else
                    wait;
                end if;
            end process p;
        end architecture a;",
        &[
            (ArchitectureName, "architecture a of e is"),
            (ArchitectureBegin, "begin"),
            (ProcessName, "p: process (clk) is"),
            (VariableDeclaration, "variable v : integer :="),
            (VariableDefaultExpression, " 0"),
            (VariableDeclarationEnd, ";"),
            (ProcessBegin, "begin"),
            (VariableAssignment, "v :="),
            (VariableAssignmentExpression, " v + 1"),
            (VariableAssignmentEnd, ";"),
            (IfStart, "if "),
            (IfCondition, "v = 2 "),
            (IfThen, "then"),
            (ReportStart, "report "),
            (ReportMessage, "\"two\""),
            (ReportEnd, ";"),
            (ElsIfStart, "elsif "),
            (ElsIfCondition, "v > 3 "),
            (ElsIfThen, "then"),
            (NullStatement, "null;"),
            (Else, "else"),
            (WaitStart, "wait"),
            (WaitEnd, ";"),
            (IfEnd, "end if;"),
            (ProcessEnd, "end process p;"),
            (ArchitectureEnd, "end architecture a;"),
        ],
    );
}

#[test]
fn process_without_is() {
    check_significant(
        "architecture a of e is begin process begin wait until clk = '1'; end process; end;",
        &[
            (ArchitectureName, "architecture a of e is"),
            (ArchitectureBegin, "begin"),
            (ProcessName, "process "),
            (ProcessBegin, "begin"),
            (WaitStart, "wait "),
            (WaitCondition, "until clk = '1'"),
            (WaitEnd, ";"),
            (ProcessEnd, "end process;"),
            (ArchitectureEnd, "end;"),
        ],
    );
    assert!(error("architecture a of e is begin process begin end; end;")
        .to_string()
        .contains("PROCESS"));
}

#[test]
fn loops() {
    check_significant(
        "architecture a of e is begin process begin
            outer: for i in 0 to 3 loop
                exit outer when i = 2;
                next;
            end loop outer;
            while true loop end loop;
            for j in r'range loop exit; end loop;
        end process; end;",
        &[
            (ArchitectureName, "architecture a of e is"),
            (ArchitectureBegin, "begin"),
            (ProcessName, "process "),
            (ProcessBegin, "begin"),
            (ForStart, "outer: for i in "),
            (ForRange, "0 "),
            (LoopDirection, "to"),
            (LoopBound, " 3 "),
            (LoopBegin, "loop"),
            (ExitStart, "exit outer when"),
            (ExitCondition, " i = 2"),
            (ExitEnd, ";"),
            (NextStart, "next"),
            (NextEnd, ";"),
            (LoopEnd, "end loop outer;"),
            (WhileStart, "while "),
            (WhileCondition, "true "),
            (LoopBegin, "loop"),
            (LoopEnd, "end loop;"),
            (ForStart, "for j in "),
            (ForRange, "r'range "),
            (LoopBegin, "loop"),
            (ExitStart, "exit"),
            (ExitEnd, ";"),
            (LoopEnd, "end loop;"),
            (ProcessEnd, "end process;"),
            (ArchitectureEnd, "end;"),
        ],
    );
}

#[test]
fn concurrent_statements() {
    check_significant(
        "architecture a of e is begin
            y <= a and b;
            check: assert y = '1' report \"bad\" severity error;
            p(1, 2);
        end;",
        &[
            (ArchitectureName, "architecture a of e is"),
            (ArchitectureBegin, "begin"),
            (SignalAssignment, "y <="),
            (SignalAssignmentExpression, " a and b"),
            (SignalAssignmentEnd, ";"),
            (AssertStart, "check: assert "),
            (AssertCondition, "y = '1' "),
            (AssertReport, "report"),
            (AssertMessage, " \"bad\" "),
            (AssertSeverity, "severity"),
            (AssertSeverityLevel, " error"),
            (AssertEnd, ";"),
            (ProcedureCall, "p(1, 2)"),
            (ProcedureCallEnd, ";"),
            (ArchitectureEnd, "end;"),
        ],
    );
}

#[test]
fn split_label() {
    let doc = parse("architecture a of e is begin\n  p :\n  process begin wait; end process; end;");
    let names: Vec<_> = doc
        .blocks
        .ids()
        .filter(|&id| doc.blocks[id].kind == ProcessName)
        .map(|id| (doc.text(id), doc.blocks[id].multi_part))
        .collect();
    assert_eq!(
        names,
        vec![("p :".to_string(), true), ("process ".to_string(), true)]
    );
}

#[test]
fn double_label() {
    assert!(error("architecture a of e is begin a: b: process begin end process; end;")
        .to_string()
        .contains("one label"));
}

#[test]
fn not_implemented() {
    for input in &[
        "configuration c of e is end;",
        "entity e is type t is range 0 to 1; end;",
        "architecture a of e is component c end component; begin end;",
        "architecture a of e is begin with s select y <= a when '0', b when others; end;",
        "architecture a of e is begin g: for i in 0 to 1 generate end generate; end;",
        "architecture a of e is begin u: c port map (x); end;",
        "architecture a of e is begin process begin case s is end case; end process; end;",
    ] {
        let err = error(input);
        assert!(err.is_not_implemented(), "{}: {}", input, err);
    }
}

#[test]
fn unexpected_token() {
    let err = error("entity e is signal; end;");
    assert_eq!(err.token().map(|t| t.value.as_str()), Some(";"));
    assert!(err.to_string().starts_with("Expected an object name"));
    let err = error("entity e was end;");
    assert!(err.to_string().contains("keyword IS"), "{}", err);
    let err = error("begin");
    assert!(err.to_string().contains("one of"), "{}", err);
}

#[test]
fn name_mismatch_warning() {
    let doc = parse("entity e is end entity f;");
    assert_eq!(doc.warnings.len(), 1);
    let warning = &doc.warnings[0];
    assert_eq!(warning.keyword, Kw::Entity);
    assert_eq!(warning.expected.as_deref(), Some("e"));
    assert_eq!(warning.found, "f");
    assert_eq!(doc.tokens[warning.token].value, "f");
    assert!(parse("entity Foo is end entity FOO;").warnings.is_empty());
    assert_eq!(parse("entity \\Foo\\ is end entity \\FOO\\;").warnings.len(), 1);
}

#[test]
fn unlabeled_statement_with_end_name() {
    let doc = parse(
        "architecture a of e is begin process begin loop end loop l; end process; end;",
    );
    assert_eq!(doc.warnings.len(), 1);
    assert_eq!(doc.warnings[0].expected, None);
}

#[test]
fn strict_names() {
    let options = ParserOptions {
        strict_names: true,
        ..ParserOptions::default()
    };
    match parse_with("entity e is end entity f;", options) {
        Err(BlockParserError::NameMismatch(m)) => assert_eq!(m.found, "f"),
        other => panic!("unexpected result {:?}", other),
    }
    assert!(parse_with("entity e is end entity e;", options).is_ok());
}

#[test]
fn unexpected_end() {
    let tokens = tokenize("entity e is").filter(|t| match t {
        Ok(t) => t.kind != TokenKind::EndOfDocument,
        Err(_) => true,
    });
    match parse_blocks(tokens, ParserOptions::default()) {
        Err(BlockParserError::UnexpectedEnd { .. }) => (),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn end_of_document_inside_construct() {
    let err = error("entity e is");
    assert_eq!(err.token().map(|t| t.kind), Some(TokenKind::EndOfDocument));
}

#[test]
fn tokenizer_error() {
    match error("entity e is \"abc") {
        BlockParserError::Tokenizer(TokenizerError::UnterminatedString { .. }) => (),
        e => panic!("unexpected error {:?}", e),
    }
}

#[test]
fn lazy_parsing() {
    let mut parser = BlockParser::new(
        tokenize("entity e is end; entity f is end;"),
        ParserOptions::default(),
    );
    let first = parser.next().map(|r| r.map(|id| parser.blocks()[id].kind));
    assert_eq!(first, Some(Ok(StartOfDocument)));
    assert_eq!(parser.tokens().len(), 1);
    let rest: Result<Vec<_>, _> = parser.by_ref().collect();
    assert_eq!(rest.map(|ids| ids.len()), Ok(8));
    assert!(parser.is_done());
    assert!(parser.next().is_none());
}

#[test]
fn partial_results_after_error() {
    let mut parser = BlockParser::new(tokenize("entity e is end; entity;"), ParserOptions::default());
    let results: Vec<_> = parser.by_ref().collect();
    assert!(results.last().map(|r| r.is_err()).unwrap_or(false));
    let doc = parser.into_document();
    assert_eq!(doc.blocks.iter().filter(|b| b.kind == EntityEnd).count(), 1);
    assert!(doc.tokens.verify_links());
}

#[test]
fn parse_buffered_stream() {
    let tokens = TokenStream::from_source("entity e is end;").unwrap();
    let doc = parse_stream(tokens, ParserOptions::default()).unwrap();
    assert_eq!(doc.blocks.len(), 5);
    assert!(doc.blocks.verify(doc.tokens.len()));
}

#[test]
fn diagnostics() {
    let err = error("entity e is generic G");
    let diag = DiagBuilder2::from(&err);
    assert!(diag.get_message().contains("`(`"));
    assert!(matches!(diag.get_segments(), [DiagSegment::Span(_)]));
    let doc = parse("entity e is end entity f;");
    let diag = DiagBuilder2::from(&doc.warnings[0]);
    assert_eq!(diag.get_severity(), Severity::Warning);
    assert!(matches!(
        diag.get_segments(),
        [DiagSegment::Span(_), DiagSegment::Note(_)]
    ));
}

#[test]
fn synthetic_tokens() {
    let words = ["entity", " ", "e", " ", "is", " ", "generic", " ", "G"];
    let mut tokens = TokenStream::new();
    tokens.push(Token::synthetic(TokenKind::StartOfDocument, ""));
    for &w in &words {
        let kind = if w == " " { TokenKind::Space } else { TokenKind::Word };
        tokens.push(Token::synthetic(kind, w));
    }
    tokens.push(Token::synthetic(TokenKind::EndOfDocument, ""));
    assert!(tokens.verify_links());
    let err = match parse_stream(tokens, ParserOptions::default()) {
        Ok(_) => panic!("parsing should fail at `G`"),
        Err(err) => err,
    };
    assert_eq!(err.token().map(|t| t.value.as_str()), Some("G"));
    assert_eq!(err.position(), Some(SourcePosition::UNKNOWN));
    let rendered = DiagBuilder2::from(&err).render("");
    assert!(rendered.contains("--> <unknown>"), "{}", rendered);
    assert!(!rendered.contains("   | "), "{}", rendered);
}

#[test]
fn serialized_document() {
    let doc = parse("entity e is end;");
    let json = serde_json::to_value(&doc).unwrap();
    let kinds: Vec<_> = json["blocks"]["blocks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["kind"].as_str().unwrap_or("").to_string())
        .collect();
    assert_eq!(
        kinds,
        vec!["StartOfDocument", "EntityName", "Whitespace", "EntityEnd", "EndOfDocument"]
    );
    assert_eq!(json["blocks"]["blocks"][3]["start"], 7);
    let name = &json["tokens"]["tokens"][3];
    assert_eq!(name["value"], "e");
    assert_eq!(name["kind"], "Identifier");
    assert_eq!(name["start"]["column"], 8);
    assert_eq!(json["warnings"].as_array().map(|w| w.len()), Some(0));
}
