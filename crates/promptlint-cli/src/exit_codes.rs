//! Process exit codes. Part of the CLI contract; CI scripts key on them.

pub const OK: i32 = 0;
pub const ISSUES_FOUND: i32 = 1; // Issues at or above --fail-on
pub const CONFIG_ERROR: i32 = 2; // Unreadable context, bad config or unknown rule
