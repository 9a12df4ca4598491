// Copyright (c) 2016-2021 Fabian Schuiki

//! The group reducer. Coalesces the fragments of a block that was split by
//! comments or line breaks into a single group, such that every group
//! corresponds to exactly one logical block.

use crate::blocks::{BlockId, BlockKind, BlockStream, Document};
use serde::Serialize;
use std::ops::Index;
use thiserror::Error;
use vhdl_blocks_common::errors::DiagBuilder2;
use vhdl_blocks_common::util::HasDesc;

/// An index into a group stream.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
pub struct GroupId(pub(crate) u32);

impl GroupId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A logical block, made up of one or more physical blocks.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Group {
    pub kind: BlockKind,
    /// The first block of the group.
    pub first: BlockId,
    /// The last block of the group, inclusive. Whitespace and comment blocks
    /// between `first` and `last` belong to the group.
    pub last: BlockId,
    /// The fragments of the group, in order. A single block for groups that
    /// were never split.
    pub parts: Vec<BlockId>,
    pub(crate) previous: Option<GroupId>,
    pub(crate) next: Option<GroupId>,
}

impl Group {
    pub fn previous(&self) -> Option<GroupId> {
        self.previous
    }

    pub fn next(&self) -> Option<GroupId> {
        self.next
    }

    /// Check whether the group consists of several fragments.
    pub fn is_split(&self) -> bool {
        self.parts.len() > 1
    }
}

/// An error in the structure of a block stream.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum GroupError {
    #[error("block {0:?} is not linked to its neighbours")]
    BrokenLink(BlockId),
    #[error("block stream does not start with the start of document")]
    MissingStartOfDocument,
    #[error("block stream does not end with the end of document")]
    MissingEndOfDocument,
    #[error("fragment {block:?} of a {} has no other part", .kind.desc())]
    LonelyFragment {
        kind: BlockKind,
        block: BlockId,
        /// The block that interrupted the fragment, if any.
        found: Option<BlockKind>,
    },
}

impl From<&GroupError> for DiagBuilder2 {
    fn from(err: &GroupError) -> DiagBuilder2 {
        match err {
            GroupError::LonelyFragment {
                found: Some(found), ..
            } => DiagBuilder2::bug(format!("{}", err))
                .add_note(format!("The fragment is followed by a {}", found.desc())),
            _ => DiagBuilder2::bug(format!("{}", err)),
        }
    }
}

/// A lazy group reducer over a block stream.
pub struct GroupReducer<'a> {
    blocks: &'a BlockStream,
    cursor: Option<BlockId>,
    previous: Option<BlockId>,
    started: bool,
    finished: bool,
}

impl<'a> GroupReducer<'a> {
    pub fn new(blocks: &'a BlockStream) -> GroupReducer<'a> {
        GroupReducer {
            blocks,
            cursor: blocks.first(),
            previous: None,
            started: false,
            finished: false,
        }
    }

    fn fail(&mut self, err: GroupError) -> Option<Result<Group, GroupError>> {
        self.finished = true;
        Some(Err(err))
    }

    /// Step to the block following `id`, checking the links between the two.
    fn advance(&self, id: BlockId) -> Result<Option<BlockId>, GroupError> {
        let next = self.blocks[id].next();
        if let Some(next) = next {
            if self.blocks.get(next).and_then(|b| b.previous()) != Some(id) {
                return Err(GroupError::BrokenLink(next));
            }
        }
        Ok(next)
    }

    /// Collect the fragments of the split block starting at `first`.
    fn collect_parts(&self, first: BlockId) -> Result<Group, GroupError> {
        let kind = self.blocks[first].kind;
        let mut parts = vec![first];
        let mut cursor = self.advance(first)?;
        let mut found = None;
        while let Some(id) = cursor {
            let block = &self.blocks[id];
            if block.multi_part && block.kind == kind {
                parts.push(id);
            } else if !block.kind.is_skippable() {
                found = Some(block.kind);
                break;
            }
            cursor = self.advance(id)?;
        }
        if parts.len() < 2 {
            return Err(GroupError::LonelyFragment {
                kind,
                block: first,
                found,
            });
        }
        let last = parts[parts.len() - 1];
        trace!("{} split into {} parts", kind.desc(), parts.len());
        Ok(Group {
            kind,
            first,
            last,
            parts,
            previous: None,
            next: None,
        })
    }
}

impl<'a> Iterator for GroupReducer<'a> {
    type Item = Result<Group, GroupError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if !self.started {
            self.started = true;
            match self.cursor.map(|id| self.blocks[id].kind) {
                Some(BlockKind::StartOfDocument) => (),
                _ => return self.fail(GroupError::MissingStartOfDocument),
            }
        }
        let id = match self.cursor {
            Some(id) => id,
            None => {
                self.finished = true;
                return match self.previous.map(|id| self.blocks[id].kind) {
                    Some(BlockKind::EndOfDocument) => None,
                    _ => Some(Err(GroupError::MissingEndOfDocument)),
                };
            }
        };
        let blocks = self.blocks;
        let block = &blocks[id];
        if block.previous() != self.previous {
            return self.fail(GroupError::BrokenLink(id));
        }
        let group = if block.multi_part {
            match self.collect_parts(id) {
                Ok(group) => group,
                Err(err) => return self.fail(err),
            }
        } else {
            Group {
                kind: block.kind,
                first: id,
                last: id,
                parts: vec![id],
                previous: None,
                next: None,
            }
        };
        self.previous = Some(group.last);
        self.cursor = match self.advance(group.last) {
            Ok(next) => next,
            Err(err) => return self.fail(err),
        };
        Some(Ok(group))
    }
}

/// A doubly-linked sequence of groups.
#[derive(Clone, Default, Debug, Serialize)]
pub struct GroupStream {
    groups: Vec<Group>,
}

impl GroupStream {
    pub fn new() -> GroupStream {
        GroupStream { groups: Vec::new() }
    }

    /// Append a group and link it to its predecessor.
    pub fn push(&mut self, mut group: Group) -> GroupId {
        let id = GroupId(self.groups.len() as u32);
        group.next = None;
        group.previous = match self.groups.last_mut() {
            Some(last) => {
                last.next = Some(id);
                Some(GroupId(id.0 - 1))
            }
            None => None,
        };
        self.groups.push(group);
        id
    }

    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn first(&self) -> Option<GroupId> {
        if self.groups.is_empty() {
            None
        } else {
            Some(GroupId(0))
        }
    }

    pub fn last(&self) -> Option<GroupId> {
        self.groups.len().checked_sub(1).map(|i| GroupId(i as u32))
    }

    pub fn iter(&self) -> std::slice::Iter<Group> {
        self.groups.iter()
    }

    /// Check that the groups are linked and cover the blocks
    /// `0..block_count` in order without gaps or overlaps.
    pub fn verify(&self, block_count: usize) -> bool {
        let n = self.groups.len();
        let mut expected_first = 0;
        for (i, group) in self.groups.iter().enumerate() {
            let previous = if i == 0 { None } else { Some(GroupId(i as u32 - 1)) };
            let next = if i + 1 == n { None } else { Some(GroupId(i as u32 + 1)) };
            if group.previous != previous || group.next != next {
                return false;
            }
            if group.first.index() != expected_first
                || group.parts.first() != Some(&group.first)
                || group.parts.last() != Some(&group.last)
            {
                return false;
            }
            expected_first = group.last.index() + 1;
        }
        expected_first == block_count
    }
}

impl Index<GroupId> for GroupStream {
    type Output = Group;

    fn index(&self, id: GroupId) -> &Group {
        &self.groups[id.index()]
    }
}

impl<'a> IntoIterator for &'a GroupStream {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Reduce a block stream into groups.
pub fn group_blocks(blocks: &BlockStream) -> Result<GroupStream, GroupError> {
    let mut groups = GroupStream::new();
    for group in GroupReducer::new(blocks) {
        groups.push(group?);
    }
    debug!("reduced {} blocks to {} groups", blocks.len(), groups.len());
    Ok(groups)
}

impl Document {
    /// Reduce the blocks of the document into groups.
    pub fn groups(&self) -> Result<GroupStream, GroupError> {
        group_blocks(&self.blocks)
    }

    /// The source text covered by a group, including the comments between its
    /// fragments.
    pub fn group_text(&self, group: &Group) -> String {
        let start = self.blocks[group.first].start;
        let end = self.blocks[group.last].end;
        self.tokens.text(start, end)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::blocks::{parse_blocks, BlockKind::*, ParserOptions};
    use crate::lexer::{tokenize, TokenId};

    fn groups(input: &str) -> (Document, GroupStream) {
        let _ = pretty_env_logger::try_init();
        let doc = parse_blocks(tokenize(input), ParserOptions::default())
            .unwrap_or_else(|e| panic!("{}", DiagBuilder2::from(&e)));
        let groups = doc.groups().unwrap_or_else(|e| panic!("{}", e));
        assert!(groups.verify(doc.blocks.len()));
        (doc, groups)
    }

    #[test]
    fn one_group_per_block() {
        let (doc, groups) = groups("entity e is end;");
        assert_eq!(groups.len(), doc.blocks.len());
        assert!(groups.iter().all(|g| !g.is_split()));
    }

    #[test]
    fn split_block() {
        let (doc, groups) = groups("architecture/* c */a/* c */of e is begin end;");
        let kinds: Vec<_> = groups.iter().map(|g| g.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StartOfDocument,
                ArchitectureName,
                Whitespace,
                ArchitectureBegin,
                Whitespace,
                ArchitectureEnd,
                EndOfDocument,
            ]
        );
        let name = &groups[GroupId(1)];
        assert_eq!(name.parts.len(), 3);
        assert_eq!(doc.group_text(name), "architecture/* c */a/* c */of e is");
    }

    #[test]
    fn comment_before_block_is_not_grouped() {
        let (doc, groups) = groups("entity e is generic ( -- c\n  G : integer); end;");
        assert!(groups.iter().all(|g| !g.is_split()));
        assert_eq!(groups.len(), doc.blocks.len());
    }

    #[test]
    fn links() {
        let (_, groups) = groups("entity e -- c\nis end;");
        let last = groups.last().unwrap();
        let mut back = vec![];
        let mut cursor = Some(last);
        while let Some(id) = cursor {
            back.push(groups[id].kind);
            cursor = groups[id].previous();
        }
        assert_eq!(back.len(), groups.len());
        assert_eq!(back.last(), Some(&StartOfDocument));
    }

    #[test]
    fn lonely_fragment() {
        let mut blocks = BlockStream::new();
        blocks.push(StartOfDocument, TokenId(0), TokenId(0), false);
        blocks.push(EntityName, TokenId(1), TokenId(2), true);
        blocks.push(EntityEnd, TokenId(3), TokenId(4), false);
        blocks.push(EndOfDocument, TokenId(5), TokenId(5), false);
        match group_blocks(&blocks) {
            Err(GroupError::LonelyFragment { kind, found, .. }) => {
                assert_eq!(kind, EntityName);
                assert_eq!(found, Some(EntityEnd));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn missing_sentinels() {
        let mut blocks = BlockStream::new();
        assert_eq!(
            group_blocks(&blocks).map(|g| g.len()),
            Err(GroupError::MissingStartOfDocument)
        );
        blocks.push(StartOfDocument, TokenId(0), TokenId(0), false);
        assert_eq!(
            group_blocks(&blocks).map(|g| g.len()),
            Err(GroupError::MissingEndOfDocument)
        );
    }
}
