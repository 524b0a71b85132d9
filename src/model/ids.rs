//! Entity id schemes.
//!
//! Persisted shapes MUST remain bit-stable (spec §6): node ids are `n_` +
//! 12-character alphanumeric token, block ids `b_` + 12, edit ids `edit_` +
//! 12. We generate the 12-character token from a v4 UUID's hex digits,
//! matching the teacher's use of `uuid::Uuid::new_v4()` for entity identity.

use uuid::Uuid;

fn token12() -> String {
    // A v4 UUID has 32 hex digits; the first 12 are plenty of entropy
    // (2^48 combinations) and are already lowercase alphanumeric.
    let full = Uuid::new_v4().simple().to_string();
    full[..12].to_string()
}

/// Generate a new node id (`n_` + 12 alphanumeric chars).
pub fn new_node_id() -> String {
    format!("n_{}", token12())
}

/// Generate a new content-block id (`b_` + 12 alphanumeric chars).
pub fn new_block_id() -> String {
    format!("b_{}", token12())
}

/// Generate a new edit-record id (`edit_` + 12 alphanumeric chars).
pub fn new_edit_id() -> String {
    format!("edit_{}", token12())
}

/// Check that `id` matches `prefix` + exactly 12 lowercase-alphanumeric
/// characters.
pub fn is_valid_id(id: &str, prefix: &str) -> bool {
    match id.strip_prefix(prefix) {
        Some(rest) => rest.len() == 12 && rest.chars().all(|c| c.is_ascii_alphanumeric()),
        None => false,
    }
}
