//! Builder warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the substitution and materializer components to report inputs that
//! were recovered from rather than rejected; recovery keeps the original
//! value, so the warning is the only trace.

use std::collections::HashSet;
use std::sync::Mutex;

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recovered condition (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("Build", "substitution 'theme' is not assignable to text");
/// ```
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let first_time = WARNED
        .lock()
        .unwrap()
        .get_or_insert_with(HashSet::new)
        .insert(key);
    if first_time {
        eprintln!("{}", format!("[arbor {component}] ⚠ {message}").yellow());
    }
}

/// Clear all recorded warnings (call when starting a fresh build)
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn clear_warnings() {
    if let Some(set) = WARNED.lock().unwrap().as_mut() {
        set.clear();
    }
}
