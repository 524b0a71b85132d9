//! Token estimation, document chunking, and chunk-retrieval aggregation
//! (spec §4.8).

use std::collections::BTreeSet;

use crate::config::ChunkParams;
use crate::model::{ChunkFields, ParentFields};

/// Conservative token estimate: `⌈chars / 3.5⌉`, `0` for an empty string.
/// Deliberately over-estimates rather than under-estimates.
pub fn estimate_tokens(text: &str) -> u32 {
    let chars = text.chars().count();
    if chars == 0 {
        return 0;
    }
    (chars as f64 / 3.5).ceil() as u32
}

/// Whether a document of this token length should be chunked at all.
pub fn should_chunk(token_count: u32, params: &ChunkParams) -> bool {
    token_count > params.chunk_trigger_tokens
}

/// Number of chunks a document of this length should be split into.
pub fn chunk_count(token_count: u32, params: &ChunkParams) -> u32 {
    (token_count as f64 / params.target_average()).ceil().max(1.0) as u32
}

/// Sibling chunk id convention: `${parent}_chunk_${i}`.
pub fn sibling_chunk_id(parent_id: &str, index: u32) -> String {
    format!("{parent_id}_chunk_{index}")
}

/// Build the `ChunkFields` for chunk `index` of `total_chunks` belonging to
/// `parent_id`. The first chunk has no `previous_chunk_id`; the last has no
/// `next_chunk_id`.
pub fn build_chunk_fields(parent_id: &str, index: u32, total_chunks: u32, token_count: u32) -> ChunkFields {
    ChunkFields {
        parent_id: parent_id.to_string(),
        chunk_index: index,
        previous_chunk_id: (index > 0).then(|| sibling_chunk_id(parent_id, index - 1)),
        next_chunk_id: (index + 1 < total_chunks).then(|| sibling_chunk_id(parent_id, index + 1)),
        token_count,
    }
}

/// Build the `ParentFields` for a document whose children are `child_ids`
/// (already in chunk order).
pub fn build_parent_fields(child_ids: Vec<String>, total_tokens: u32, document_type: String) -> ParentFields {
    let total_chunks = child_ids.len() as u32;
    ParentFields {
        is_parent: true,
        child_ids,
        total_tokens,
        total_chunks,
        document_type,
    }
}

/// Token offsets within a chunk that should actually be embedded, excluding
/// the overlap shared with a neighbor (spec: "overlap is not included in
/// the embedded region", to avoid retrieval duplication). The first chunk
/// keeps its full leading edge; the last chunk keeps its full trailing
/// edge. Returns `(start, end)` as token offsets into the chunk, capped by
/// `max_embedding_tokens`.
pub fn embedded_token_bounds(
    index: u32,
    total_chunks: u32,
    chunk_token_len: u32,
    params: &ChunkParams,
) -> (u32, u32) {
    let start = if index == 0 { 0 } else { params.overlap_tokens.min(chunk_token_len) };
    let raw_end = if index + 1 == total_chunks {
        chunk_token_len
    } else {
        chunk_token_len.saturating_sub(params.overlap_tokens)
    };
    let end = raw_end.max(start);
    let capped_len = (end - start).min(params.max_embedding_tokens);
    (start, start + capped_len)
}

/// What to do with a set of same-document chunk matches during retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalAction {
    /// Fewer than 2 matches from the same document: no special handling.
    None,
    /// 2-3 matches: merge the chunks and add the parent's summary.
    Merge,
    /// 4+ matches: fall back to the parent summary plus highlights.
    Summarize,
}

/// Decide the retrieval action for a count of same-document chunk matches.
pub fn retrieval_action(same_document_match_count: u32) -> RetrievalAction {
    if same_document_match_count >= 4 {
        RetrievalAction::Summarize
    } else if same_document_match_count >= 2 {
        RetrievalAction::Merge
    } else {
        RetrievalAction::None
    }
}

/// Expand a set of matched chunk indices with their immediate neighbors
/// (±1), bounded by a cumulative token budget. `chunk_token_counts` is
/// indexed by chunk position within the document. Deterministic: chunks
/// are considered in ascending matched order, then ascending neighbor
/// order, and the result is always sorted ascending.
pub fn expand_with_adjacent(
    matched: &[u32],
    chunk_token_counts: &[u32],
    max_expansion_tokens: u32,
) -> Vec<u32> {
    let total = chunk_token_counts.len() as u32;
    let mut included: BTreeSet<u32> = matched.iter().copied().collect();
    let mut budget_used = 0u32;

    let mut sorted_matched: Vec<u32> = matched.to_vec();
    sorted_matched.sort_unstable();

    for m in sorted_matched {
        let neighbors = [m.checked_sub(1), m.checked_add(1)];
        for neighbor in neighbors.into_iter().flatten() {
            if neighbor >= total || included.contains(&neighbor) {
                continue;
            }
            let cost = chunk_token_counts[neighbor as usize];
            if budget_used + cost <= max_expansion_tokens {
                included.insert(neighbor);
                budget_used += cost;
            }
        }
    }

    included.into_iter().collect()
}
