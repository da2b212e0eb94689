//! Importance tiers for layers.

use creative_core::Priority;

const CRITICAL_KEYWORDS: &[&str] = &["cta", "button", "logo"];
const HIGH_KEYWORDS: &[&str] = &["price", "product"];
const MEDIUM_KEYWORDS: &[&str] = &["title", "headline"];
const LOW_KEYWORDS: &[&str] = &["tagline", "description", "subtitle"];

/// Assign a priority tier to a layer.
///
/// An explicit override always wins. Otherwise the layer key is matched
/// case-insensitively against keyword groups, checked from most to least
/// important; main-product images are at least `High`. Unmatched keys are
/// `Medium`.
pub fn classify_priority(key: &str, explicit: Option<Priority>, is_main_product: bool) -> Priority {
    if let Some(priority) = explicit {
        return priority;
    }

    let key = key.to_lowercase();
    let matches = |keywords: &[&str]| keywords.iter().any(|k| key.contains(k));

    if matches(CRITICAL_KEYWORDS) {
        Priority::Critical
    } else if is_main_product || matches(HIGH_KEYWORDS) {
        Priority::High
    } else if matches(MEDIUM_KEYWORDS) {
        Priority::Medium
    } else if matches(LOW_KEYWORDS) {
        Priority::Low
    } else {
        Priority::Medium
    }
}
