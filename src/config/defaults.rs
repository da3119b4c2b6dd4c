//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Registry Defaults
// =============================================================================

pub fn default_api_base() -> String {
    "https://discord.com/api/v10".to_string()
}

pub fn default_token_env() -> String {
    "SLASHSYNC_TOKEN".to_string()
}

pub fn default_request_timeout() -> u64 {
    10
}

// =============================================================================
// Sync Defaults
// =============================================================================

pub fn default_concurrency() -> usize {
    1
}
