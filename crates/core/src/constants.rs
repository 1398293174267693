/// Fixed reference currency for exchange rates and estimated GDP.
pub const BASE_CURRENCY: &str = "USD";

/// Inclusive lower bound for the per-record GDP multiplier.
pub const GDP_MULTIPLIER_MIN: i64 = 1_000;

/// Inclusive upper bound for the per-record GDP multiplier.
pub const GDP_MULTIPLIER_MAX: i64 = 2_000;

/// Page size applied when a listing omits `limit`.
pub const DEFAULT_LIST_LIMIT: i64 = 250;

/// Largest accepted `limit` value.
pub const MAX_LIST_LIMIT: i64 = 500;

/// Largest accepted `offset` value.
pub const MAX_LIST_OFFSET: i64 = 1_000_000_000;
