//! Four-tier truncation (spec §4.7).

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::chunk::estimate_tokens;
use crate::config::TruncationParams;

/// Which truncation strategy applies to a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    UseSummary,
    SemanticTruncation,
    ExtractRelevant,
    HardTruncation,
}

/// Select the tier for a node: prefer its summary if it has one; else
/// semantic truncation if it's within 2x the target; else extract-relevant
/// (with hard truncation as the tier's own ultimate fallback, invoked by
/// the caller when extract-relevant can't run).
pub fn select_tier(has_summary: bool, node_tokens: u32, target_tokens: u32) -> Tier {
    if has_summary {
        Tier::UseSummary
    } else if node_tokens <= target_tokens.saturating_mul(2) {
        Tier::SemanticTruncation
    } else {
        Tier::ExtractRelevant
    }
}

/// The expected latency (ms) for a tier, per the canonical constants.
pub fn expected_latency_ms(tier: Tier, params: &TruncationParams) -> u32 {
    match tier {
        Tier::UseSummary => params.use_summary_ms,
        Tier::SemanticTruncation => params.semantic_truncation_ms,
        Tier::ExtractRelevant => params.extract_relevant_ms,
        Tier::HardTruncation => params.hard_truncation_ms,
    }
}

/// Keep the first 60% and last 20% of `target_tokens`, joined by the
/// literal marker `" [...] "`. Empty input or input already within budget
/// is returned unchanged.
pub fn semantic_truncation(text: &str, target_tokens: u32) -> String {
    if text.is_empty() {
        return String::new();
    }
    if estimate_tokens(text) <= target_tokens {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let first_chars = (target_tokens as f64 * 0.6 * 3.5).round() as usize;
    let last_chars = (target_tokens as f64 * 0.2 * 3.5).round() as usize;

    let first_part: String = chars.iter().take(first_chars.min(chars.len())).collect();
    let last_take = last_chars.min(chars.len());
    let last_part: String = chars[chars.len() - last_take..].iter().collect();

    format!("{first_part} [...] {last_part}")
}

/// Find the last sentence terminator (`". "`, `"! "`, `"? "`) before
/// `target_tokens * 3.5` characters and cut there, appending `" [truncated]"`.
/// Falls back to a raw character cut at the same budget if no terminator is
/// found. Input already within budget is returned unchanged (no marker).
pub fn hard_truncation(text: &str, target_tokens: u32) -> String {
    if text.is_empty() {
        return String::new();
    }
    if estimate_tokens(text) <= target_tokens {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let search_limit = ((target_tokens as f64) * 3.5).round() as usize;
    let search_limit = search_limit.min(chars.len());

    const TERMINATORS: [&str; 3] = [". ", "! ", "? "];
    let mut best_cut: Option<usize> = None;

    for i in 0..search_limit {
        for term in TERMINATORS {
            let term_chars: Vec<char> = term.chars().collect();
            let end = i + term_chars.len();
            if end <= search_limit && chars[i..end] == term_chars[..] {
                best_cut = Some(best_cut.map_or(end, |b| b.max(end)));
            }
        }
    }

    let cut = best_cut.unwrap_or(search_limit);
    let truncated: String = chars[..cut].iter().collect();
    format!("{truncated} [truncated]")
}

fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < text.len() {
        if i + 2 <= text.len() {
            let two = &text[i..i + 2];
            if two == ". " || two == "! " || two == "? " {
                let piece = text[start..i + 1].trim();
                if !piece.is_empty() {
                    sentences.push(piece);
                }
                start = i + 2;
                i += 2;
                continue;
            }
        }
        i += 1;
    }
    if start < text.len() {
        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest);
        }
    }
    if sentences.is_empty() && !text.trim().is_empty() {
        sentences.push(text.trim());
    }
    sentences
}

/// Greedily select the most relevant sentences (per caller-supplied
/// `relevance_of`, since scoring relevance against a query is an embedding
/// concern outside this crate) that fit within `target_tokens`, preserving
/// their original order in the output. Empty input or input already within
/// budget is returned unchanged.
pub fn extract_relevant(text: &str, target_tokens: u32, relevance_of: impl Fn(&str) -> f64) -> String {
    if text.is_empty() {
        return String::new();
    }
    if estimate_tokens(text) <= target_tokens {
        return text.to_string();
    }

    let sentences = split_sentences(text);
    let mut scored: Vec<(usize, &str, f64)> =
        sentences.iter().enumerate().map(|(i, s)| (i, *s, relevance_of(s))).collect();
    scored.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal));

    let mut budget_used = 0u32;
    let mut selected = BTreeSet::new();
    for (i, s, _) in &scored {
        let cost = estimate_tokens(s);
        if budget_used + cost <= target_tokens {
            selected.insert(*i);
            budget_used += cost;
        }
    }

    selected.into_iter().map(|i| sentences[i]).collect::<Vec<_>>().join(" ")
}
