//! Markdown fence stripping for raw model output.

use once_cell::sync::Lazy;
use regex::Regex;

// Opening ```json / ```JSON / bare ``` at the very start, plus following whitespace.
static OPENING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\A\s*```(?:json)?\s*").expect("opening fence pattern is valid"));

// Closing ``` at the very end, plus surrounding whitespace.
static CLOSING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*```\s*\z").expect("closing fence pattern is valid"));

/// Remove a markdown code fence wrapping `raw`. Backticks inside the
/// payload are left as they are.
pub fn strip_code_fences(raw: &str) -> String {
    let opened = OPENING_FENCE.replace(raw, "");
    CLOSING_FENCE.replace(&opened, "").into_owned()
}
