//! Pagination parameter normalization.
//!
//! Callers hand the tools loosely-shaped pagination input; `normalize` turns
//! it into a canonical parameter set obeying Relay directional rules
//! (forward: `first`/`after`, backward: `last`/`before`, plus a legacy
//! `offset` fallback). The function is total: malformed input is coerced to
//! safe defaults and never rejected.

use serde_json::{Map, Value};

/// Injected warning capability for the normalizer and aggregator.
///
/// Defaults to a no-op so the pure-function contracts stay testable without
/// capturing log output.
pub trait PageLog: Send + Sync {
    fn warn(&self, message: &str);
}

/// Discards all warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLog;

impl PageLog for NoopLog {
    fn warn(&self, _message: &str) {}
}

/// Forwards warnings to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl PageLog for TracingLog {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Canonical pagination parameters.
///
/// After normalization at most one of `first`/`last` is set, and a truthy
/// `before` implies `last`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaginationParams {
    /// Legacy offset fallback, clamped to `>= 0`.
    pub offset: Option<u64>,
    /// Forward page size, clamped to `>= 1`.
    pub first: Option<u64>,
    /// Forward cursor.
    pub after: Option<String>,
    /// Backward cursor.
    pub before: Option<String>,
    /// Backward page size, clamped to `>= 1`.
    pub last: Option<u64>,
    /// Page cap for multi-page aggregation.
    pub max_pages: Option<u32>,
    /// Unrecognized caller fields, passed through untouched so
    /// resource-specific filters can coexist.
    pub extra: Map<String, Value>,
}

impl PaginationParams {
    /// The per-page item bound implied by these parameters.
    pub fn page_size(&self) -> u64 {
        self.first.or(self.last).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// GraphQL variable map for a single-page fetch. Empty cursors (the
    /// coerced form of null input) are skipped.
    pub fn to_variables(&self) -> Map<String, Value> {
        let mut vars = Map::new();
        if let Some(first) = self.first {
            vars.insert("first".to_string(), first.into());
        }
        if let Some(last) = self.last {
            vars.insert("last".to_string(), last.into());
        }
        if let Some(after) = self.after.as_deref().filter(|c| !c.is_empty()) {
            vars.insert("after".to_string(), after.into());
        }
        if let Some(before) = self.before.as_deref().filter(|c| !c.is_empty()) {
            vars.insert("before".to_string(), before.into());
        }
        if let Some(offset) = self.offset {
            vars.insert("offset".to_string(), offset.into());
        }
        for (key, value) in &self.extra {
            vars.insert(key.clone(), value.clone());
        }
        vars
    }
}

/// Default page size when the caller specifies no direction or count.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Fields consumed by the normalizer; everything else passes through.
const RECOGNIZED: &[&str] = &[
    "offset",
    "first",
    "after",
    "before",
    "last",
    "page_size",
    "max_pages",
];

/// Normalize raw pagination input with warnings discarded.
pub fn normalize(raw: &Value) -> PaginationParams {
    normalize_with(raw, &NoopLog)
}

/// Normalize raw pagination input.
///
/// Deterministic and total: never errors, regardless of input shape.
/// Directional resolution, in precedence order:
/// 1. truthy `before` — backward: `last = last ?? first ?? 10`, `first` cleared;
/// 2. `last` without `before` — non-standard but tolerated with a warning:
///    `last` kept, `first` cleared;
/// 3. otherwise forward: `first = first ?? 10`, `last` cleared.
///
/// The `last`-over-`first` precedence in case 2 is deliberate compatibility
/// behavior; do not reorder it.
pub fn normalize_with(raw: &Value, log: &dyn PageLog) -> PaginationParams {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    let mut params = PaginationParams {
        offset: obj.get("offset").and_then(coerce_int).map(|n| n.max(0) as u64),
        first: obj.get("first").and_then(coerce_int).map(clamp_page_count),
        last: obj.get("last").and_then(coerce_int).map(clamp_page_count),
        after: obj.get("after").map(coerce_cursor),
        before: obj.get("before").map(coerce_cursor),
        max_pages: obj
            .get("max_pages")
            .and_then(coerce_int)
            .map(|n| n.max(1) as u32),
        extra: Map::new(),
    };

    // page_size is a convenience alias for first, losing to an explicit first.
    if params.first.is_none() {
        params.first = obj.get("page_size").and_then(coerce_int).map(clamp_page_count);
    }

    let before_truthy = params.before.as_deref().is_some_and(|c| !c.is_empty());
    if before_truthy {
        params.last = Some(params.last.or(params.first).unwrap_or(DEFAULT_PAGE_SIZE));
        params.first = None;
    } else if params.last.is_some() {
        params.first = None;
        log.warn("using `last` without `before` is non-standard backward pagination");
    } else {
        params.first = Some(params.first.unwrap_or(DEFAULT_PAGE_SIZE));
        params.last = None;
    }

    for (key, value) in obj {
        if !RECOGNIZED.contains(&key.as_str()) {
            params.extra.insert(key.clone(), value.clone());
        }
    }

    params
}

/// Coerce a JSON value to a floored integer. Numeric strings are accepted;
/// anything else is treated as absent.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_f64().map(|f| f.floor() as i64),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.floor() as i64),
        _ => None,
    }
}

fn clamp_page_count(n: i64) -> u64 {
    n.max(1) as u64
}

/// Coerce a cursor to a string: strings kept, numbers stringified,
/// null and anything else become the empty (falsy) cursor.
fn coerce_cursor(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
