//! Key-value query state shared with the host (URL query string or similar).

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::models::shift::TimeRangeUpdate;

pub const SHIFT_KEY: &str = "var_shifts_options";
pub const GROUP_KEY: &str = "var_shift_group";
pub const FROM_KEY: &str = "from";
pub const TO_KEY: &str = "to";
pub const REFRESH_KEY: &str = "refresh";

/// Partial update, applied key by key.
pub type QueryMap = IndexMap<String, String>;

pub trait QueryStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, partial: QueryMap);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl QueryStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, partial: QueryMap) {
        self.values.extend(partial);
    }
}

/// Epoch milliseconds stored under `key`, if it holds an absolute value.
/// Relative values such as `now-6h` yield `None`.
pub fn read_millis<S: QueryStore + ?Sized>(store: &S, key: &str) -> Option<i64> {
    store.get(key).and_then(|v| v.trim().parse().ok())
}

/// Publish `update`, swapping the bounds if they arrive reversed.
pub fn write_time_range<S: QueryStore + ?Sized>(
    store: &mut S,
    update: &TimeRangeUpdate,
    refresh: Option<&str>,
) {
    let (from, to) = if update.from > update.to {
        (update.to, update.from)
    } else {
        (update.from, update.to)
    };

    let mut partial = QueryMap::new();
    partial.insert(FROM_KEY.into(), from.to_string());
    partial.insert(TO_KEY.into(), to.to_string());
    if let Some(uuid) = &update.uuid {
        partial.insert(SHIFT_KEY.into(), uuid.clone());
    }
    if let Some(refresh) = refresh {
        partial.insert(REFRESH_KEY.into(), refresh.to_string());
    }

    store.set(partial);
}
