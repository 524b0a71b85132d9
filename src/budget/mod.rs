//! Per-model context-window budget manager (spec §4.5).

use crate::config::{BudgetParams, ProviderRatio};
use crate::external::{ModelInfo, ModelRegistry};

/// The current persisted-aggregate schema version (spec §6).
pub const SCHEMA_VERSION: u32 = 1;

/// A model's derived default token budget.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelBudget {
    pub model_id: String,
    pub total: u32,
    pub system_prompt_tokens: u32,
    pub min_user_tokens: u32,
    pub response_buffer_tokens: u32,
    pub ratio: f64,
    pub default_retrieved: u32,
    pub default_history: u32,
    pub schema_version: u32,
}

fn flexible(total: u32, system_prompt: u32, user: u32, response_buffer: u32) -> u32 {
    total
        .saturating_sub(system_prompt)
        .saturating_sub(user)
        .saturating_sub(response_buffer)
}

/// Resolve the [`ModelInfo`] to budget against: the requested model if
/// known, otherwise the registry's smallest known model (spec §6: "unknown
/// model falls back to the smallest known budget").
fn resolve_model(model_id: &str, registry: &dyn ModelRegistry) -> Option<ModelInfo> {
    registry.lookup(model_id).or_else(|| registry.smallest())
}

/// Derive a model's default retrieved/history budget split.
///
/// Returns `None` only if the registry has no models at all to fall back
/// to — a configuration error outside this crate's scope, not a spec'd
/// runtime case.
pub fn model_budget(model_id: &str, registry: &dyn ModelRegistry, params: &BudgetParams) -> Option<ModelBudget> {
    let info = resolve_model(model_id, registry)?;
    let response_buffer = info.response_buffer_tokens.unwrap_or(params.fallback_response_buffer);
    let ratio = ProviderRatio::for_provider(&info.provider).ratio();

    let flex = flexible(info.context_window, params.system_prompt_tokens, params.min_user_tokens, response_buffer);
    let default_retrieved = (flex as f64 * ratio).floor() as u32;
    let default_history = flex - default_retrieved;

    Some(ModelBudget {
        model_id: info.id,
        total: info.context_window,
        system_prompt_tokens: params.system_prompt_tokens,
        min_user_tokens: params.min_user_tokens,
        response_buffer_tokens: response_buffer,
        ratio,
        default_retrieved,
        default_history,
        schema_version: SCHEMA_VERSION,
    })
}

/// A single request's token demands.
#[derive(Debug, Clone, Copy)]
pub struct AllocationRequest<'a> {
    pub model_id: &'a str,
    pub user_tokens: u32,
    pub retrieved_tokens: u32,
    pub history_tokens: u32,
}

/// What the caller should do given the computed allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationAction {
    Proceed,
    PrioritizeNodes,
    SummarizeHistory,
}

/// The result of allocating one request's budget.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub model_id: String,
    pub user_alloc: u32,
    pub retrieved_alloc: u32,
    pub history_alloc: u32,
    pub action: AllocationAction,
    pub unused_tokens: u32,
    pub schema_version: u32,
}

/// Allocate budget for a single request against a resolved model.
///
/// Steps (spec §4.5):
/// 1. `user_alloc = max(min_user, user_tokens)`.
/// 2. Recompute flexible budget with `user_alloc`.
/// 3. Split flexible by the model's ratio into `retrieved_alloc`/`history_alloc`.
/// 4. Decide the action by comparing requested usage against those splits.
/// 5. If retrieved usage is under half its allocation, move half the slack
///    to history.
/// 6. Clamp the returned allocations to actual requested usage and report
///    what's left over as `unused_tokens`.
pub fn allocate(request: &AllocationRequest, registry: &dyn ModelRegistry, params: &BudgetParams) -> Option<Allocation> {
    let info = resolve_model(request.model_id, registry)?;
    let response_buffer = info.response_buffer_tokens.unwrap_or(params.fallback_response_buffer);
    let ratio = ProviderRatio::for_provider(&info.provider).ratio();

    let user_alloc = request.user_tokens.max(params.min_user_tokens);
    let flex = flexible(info.context_window, params.system_prompt_tokens, user_alloc, response_buffer);

    let mut retrieved_alloc = (flex as f64 * ratio).floor() as u32;
    let mut history_alloc = flex - retrieved_alloc;

    let action = if request.retrieved_tokens > retrieved_alloc {
        AllocationAction::PrioritizeNodes
    } else if request.history_tokens > history_alloc {
        AllocationAction::SummarizeHistory
    } else {
        AllocationAction::Proceed
    };

    if (request.retrieved_tokens as f64) < retrieved_alloc as f64 / 2.0 {
        let slack = retrieved_alloc - request.retrieved_tokens;
        let moved = slack / 2;
        retrieved_alloc -= moved;
        history_alloc += moved;
    }

    let retrieved_used = retrieved_alloc.min(request.retrieved_tokens);
    let history_used = history_alloc.min(request.history_tokens);
    let unused_tokens = (retrieved_alloc - retrieved_used) + (history_alloc - history_used);

    Some(Allocation {
        model_id: info.id,
        user_alloc,
        retrieved_alloc: retrieved_used,
        history_alloc: history_used,
        action,
        unused_tokens,
        schema_version: SCHEMA_VERSION,
    })
}

/// Sparse-retrieval reallocation (spec: `retrieved_tokens < 1000` widens
/// the response buffer by 4000 and recomputes the split). Returns a new
/// [`ModelBudget`]; the original is left untouched.
pub fn sparse_reallocate(budget: &ModelBudget) -> ModelBudget {
    let response_buffer = budget.response_buffer_tokens + 4000;
    let flex = flexible(budget.total, budget.system_prompt_tokens, budget.min_user_tokens, response_buffer);
    let default_retrieved = (flex as f64 * budget.ratio).floor() as u32;
    let default_history = flex - default_retrieved;

    ModelBudget {
        response_buffer_tokens: response_buffer,
        default_retrieved,
        default_history,
        ..budget.clone()
    }
}

/// Threshold below which retrieved-token usage counts as "sparse retrieval".
pub const SPARSE_RETRIEVAL_THRESHOLD: u32 = 1000;
