//! Deduplicated warnings.
//!
//! Selector input is sometimes accepted but partly ignored (pseudo-classes,
//! for example). Each distinct warning is reported once through the `log`
//! facade so a selector evaluated in a loop does not flood the output.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already reported (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about an unsupported feature (reported once per unique message).
///
/// Returns `true` if this call emitted the warning, `false` if the same
/// message had already been reported.
///
/// # Example
/// ```
/// use quarry_common::warning::warn_once;
///
/// let first = warn_once("doc-example", "pseudo-class ':hover' ignored");
/// let second = warn_once("doc-example", "pseudo-class ':hover' ignored");
/// assert!(first);
/// assert!(!second);
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_report = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_report {
        log::warn!(target: "quarry", "[{component}] {message}");
    }
    should_report
}

/// Clear all recorded warnings so they are reported again.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
