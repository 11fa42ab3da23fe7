//! Extra argument tokenization.

/// Split a user-supplied extra argument string on whitespace.
///
/// There is no quoting: an argument that itself contains a space cannot be
/// expressed through this setting.
pub fn tokenize_extra_args(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}
