// Copyright (c) 2016-2021 Fabian Schuiki

mod common;
use common::*;

const COUNTER: &str = "-- A simple counter.
library ieee;
use ieee.std_logic_1164.all, ieee.numeric_std.all;

entity counter is
    generic (
        WIDTH : positive := 8 -- bits
    );
    port (
        clk, rst : in  std_logic;
        q        : out unsigned(WIDTH-1 downto 0)
    );
end entity counter;

architecture rtl of counter is
    signal count : unsigned(WIDTH-1 downto 0) := (others => '0');
begin
    tick: process (clk)
    begin
        if rising_edge(clk) then
            if rst = '1' then
                count <= (others => '0');
            else
                count <= count + 1;
            end if;
        end if;
    end process tick;

    q <= count;
end architecture rtl;
";

#[test]
fn counter() {
    let (doc, groups) = parse(COUNTER);
    assert!(doc.warnings.is_empty());
    let kinds: Vec<_> = significant_groups(&doc, &groups)
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    use BlockKind::*;
    assert_eq!(
        kinds,
        vec![
            StartOfDocument,
            LibraryStart,
            LibraryReferenceName,
            LibraryEnd,
            UseStart,
            UseReferenceName,
            UseDelimiter,
            UseReferenceName,
            UseEnd,
            EntityName,
            GenericListOpen,
            GenericListInterfaceConstant,
            GenericListDefaultExpression,
            GenericListClose,
            PortListOpen,
            PortListInterfaceSignal,
            PortListDelimiter,
            PortListInterfaceSignal,
            PortListClose,
            EntityEnd,
            ArchitectureName,
            SignalDeclaration,
            SignalDefaultExpression,
            SignalDeclarationEnd,
            ArchitectureBegin,
            ProcessName,
            ProcessBegin,
            IfStart,
            IfCondition,
            IfThen,
            IfStart,
            IfCondition,
            IfThen,
            SignalAssignment,
            SignalAssignmentExpression,
            SignalAssignmentEnd,
            Else,
            SignalAssignment,
            SignalAssignmentExpression,
            SignalAssignmentEnd,
            IfEnd,
            IfEnd,
            ProcessEnd,
            SignalAssignment,
            SignalAssignmentExpression,
            SignalAssignmentEnd,
            ArchitectureEnd,
            EndOfDocument,
        ]
    );
}

#[test]
fn default_expression_before_comment() {
    let (doc, groups) = parse(COUNTER);
    let default: Vec<_> = groups
        .iter()
        .filter(|g| g.kind == BlockKind::GenericListDefaultExpression)
        .collect();
    assert_eq!(default.len(), 1);
    assert!(!default[0].is_split());
    assert_eq!(doc.group_text(default[0]), " 8 ");
    let close = groups
        .iter()
        .find(|g| g.kind == BlockKind::GenericListClose)
        .unwrap();
    assert_eq!(doc.group_text(close), ");");
}

#[test]
fn split_groups() {
    // Trivia directly in front of the next block does not split anything.
    let (doc, groups) = parse("library ieee;\nuse\n  ieee.all -- everything\n  ;\n");
    assert!(groups.iter().all(|g| !g.is_split()));
    assert_eq!(groups.len(), doc.blocks.len());

    let (doc, groups) = parse("entity e is end entity /* comment */ e;");
    let end = groups
        .iter()
        .find(|g| g.kind == BlockKind::EntityEnd)
        .unwrap();
    assert_eq!(end.parts.len(), 2);
    assert_eq!(doc.group_text(end), "end entity /* comment */ e;");
    assert_eq!(groups.len(), doc.blocks.len() - 3);
}

#[test]
fn comments_are_kept() {
    let (doc, _) = parse(COUNTER);
    let comments: Vec<_> = doc
        .blocks
        .ids()
        .filter(|&id| doc.blocks[id].kind == BlockKind::SingleLineComment)
        .map(|id| doc.text(id))
        .collect();
    assert_eq!(comments, vec!["-- A simple counter.\n", "-- bits\n"]);
}

#[test]
fn backward_walk() {
    let (doc, _) = parse(COUNTER);
    let mut cursor = doc.blocks.last();
    let mut text = Vec::new();
    while let Some(id) = cursor {
        text.push(doc.text(id));
        cursor = doc.blocks[id].previous();
    }
    text.reverse();
    assert_eq!(text.concat(), COUNTER);
}

#[test]
fn name_mismatches() {
    let input = "entity a is end entity b;\narchitecture r of a is begin end architecture s;\n";
    let (doc, _) = parse(input);
    let found: Vec<_> = doc.warnings.iter().map(|w| w.found.as_str()).collect();
    assert_eq!(found, vec!["b", "s"]);
    let options = ParserOptions {
        strict_names: true,
        ..ParserOptions::default()
    };
    match parse_err(input, options) {
        Error::Blocks(BlockParserError::NameMismatch(m)) => assert_eq!(m.position.line, 1),
        e => panic!("unexpected error {:?}", e),
    }
}

#[test]
fn rendered_error() {
    let input = "entity e is\n    generic G : integer );\nend entity e;\n";
    let err = parse_err(input, ParserOptions::default());
    let rendered = DiagBuilder2::from(&err).render(input);
    assert!(rendered.contains("`(`"), "{}", rendered);
    assert!(rendered.contains("    generic G : integer );"), "{}", rendered);
}

#[test]
fn lazy_stages() {
    let mut parser = BlockParser::new(tokenize(COUNTER), ParserOptions::default());
    let first: Vec<_> = parser.by_ref().take(3).collect::<Result<_, _>>().unwrap();
    assert_eq!(first.len(), 3);
    assert!(!parser.is_done());
    assert!(parser.tokens().len() < 10);
    for result in parser.by_ref() {
        result.unwrap();
    }
    assert!(parser.is_done());
    let doc = parser.into_document();
    let groups: Vec<_> = GroupReducer::new(&doc.blocks)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(groups.first().map(|g| g.kind), Some(BlockKind::StartOfDocument));
    assert_eq!(groups.last().map(|g| g.kind), Some(BlockKind::EndOfDocument));
}

#[test]
fn serialize() {
    let (doc, groups) = parse("entity e is end;");
    let json = serde_json::to_value(&doc).unwrap();
    let blocks = json["blocks"]["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 5);
    assert_eq!(blocks[1]["kind"], "EntityName");
    assert_eq!(blocks[1]["multi_part"], false);
    let tokens = json["tokens"]["tokens"].as_array().unwrap();
    assert_eq!(tokens[1]["kind"]["Keyword"], "Entity");
    let json = serde_json::to_value(&groups).unwrap();
    assert_eq!(json["groups"].as_array().map(|g| g.len()), Some(5));
}

#[test]
fn unsupported_construct() {
    let err = parse_err(
        "architecture a of e is begin b: block begin end block; end;",
        ParserOptions::default(),
    );
    match err {
        Error::Blocks(ref e) => assert!(e.is_not_implemented()),
        ref e => panic!("unexpected error {:?}", e),
    }
    let rendered = DiagBuilder2::from(&err).to_string();
    assert!(rendered.contains("block statement"), "{}", rendered);
}
