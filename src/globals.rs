//! Process-wide template variables.
//!
//! Values stored here are visible to every [`Template`](crate::template::Template)
//! rendered in this process, including templates constructed before the value
//! was assigned. The mapping lives for the whole process and is never torn
//! down. It is guarded by a mutex, but callers that assign from several
//! threads still decide among themselves which write lands last.

use indexmap::IndexMap;
use log::debug;
use serde_json::Value;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

static GLOBAL_VARS: OnceLock<Mutex<IndexMap<String, Value>>> = OnceLock::new();

fn lock() -> MutexGuard<'static, IndexMap<String, Value>> {
    GLOBAL_VARS
        .get_or_init(|| Mutex::new(IndexMap::new()))
        .lock()
        // The map holds plain values, a panic mid-insert cannot leave it torn.
        .unwrap_or_else(PoisonError::into_inner)
}

/// Sets a global variable, replacing any previous value under `key`.
pub fn assign_global<K: Into<String>, V: Into<Value>>(key: K, value: V) {
    let key = key.into();
    debug!("Assigning global variable '{}'.", key);
    lock().insert(key, value.into());
}

/// Returns a copy of the global variable stored under `key`.
pub fn global(key: &str) -> Option<Value> {
    lock().get(key).cloned()
}

/// Removes a global variable and returns its previous value.
pub fn remove_global(key: &str) -> Option<Value> {
    lock().shift_remove(key)
}

/// Snapshot of every global variable in assignment order.
pub fn globals() -> IndexMap<String, Value> {
    lock().clone()
}
