//! Boolean words accepted for flags.

const TRUE_WORDS: [&str; 3] = ["1", "on", "true"];
const FALSE_WORDS: [&str; 3] = ["0", "off", "false"];

/// Reads a boolean word, ignoring ASCII case.
///
/// `1`, `on` and `true` read as `true`; `0`, `off` and `false` as `false`.
/// Anything else is not a boolean.
pub fn parse(text: &str) -> Option<bool> {
    let matches = |words: &[&str]| words.iter().any(|w| w.eq_ignore_ascii_case(text));

    if matches(&TRUE_WORDS) {
        Some(true)
    } else if matches(&FALSE_WORDS) {
        Some(false)
    } else {
        None
    }
}
