pub const OK: i32 = 0;
/// Any unrecovered error: bad config, corrupt dataset, provider failure.
pub const FATAL: i32 = 2;
