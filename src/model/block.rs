//! Recursive content blocks.
//!
//! Expressed as a tagged-variant arena (owned tree with stable ids) rather
//! than duck-typed nested objects — see DESIGN.md's "duck-typed content
//! blocks" design note. Traversal is by id, never by structural matching,
//! so callers can resolve a `block_id` target in O(depth) without fighting
//! the borrow checker over cyclic references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::new_block_id;

/// The kind of a content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Paragraph,
    Heading,
    List,
    ListItem,
    Code,
    Quote,
    Callout,
    Divider,
    Table,
    Image,
}

/// A single node in the recursive content-block tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    /// Stable id (`b_` + 12 chars), unique within the owning node.
    pub id: String,
    pub block_type: BlockType,
    pub text: String,
    /// Heading level 1-6, only meaningful when `block_type == Heading`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<u8>,
    #[serde(default)]
    pub children: Vec<ContentBlock>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl ContentBlock {
    /// Construct a new block with a freshly-generated id.
    pub fn new(block_type: BlockType, text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_block_id(),
            block_type,
            text: text.into(),
            heading_level: None,
            children: Vec::new(),
            created_at: now,
            modified_at: now,
        }
    }

    /// Find a block by id anywhere in this block's subtree (including itself).
    pub fn find<'a>(&'a self, id: &str) -> Option<&'a ContentBlock> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Mutable variant of [`ContentBlock::find`].
    pub fn find_mut<'a>(&'a mut self, id: &str) -> Option<&'a mut ContentBlock> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Collect every block id in this subtree (including itself), depth-first.
    pub fn collect_ids(&self, out: &mut Vec<String>) {
        out.push(self.id.clone());
        for child in &self.children {
            child.collect_ids(out);
        }
    }
}

/// Check that every block id in a forest is unique (spec §3 invariant).
pub fn ids_are_unique(blocks: &[ContentBlock]) -> bool {
    let mut seen = std::collections::HashSet::new();
    let mut ids = Vec::new();
    for b in blocks {
        b.collect_ids(&mut ids);
    }
    ids.into_iter().all(|id| seen.insert(id))
}
