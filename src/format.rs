//! Small text helpers shared by the serializers

/// Format a number in its minimal decimal form, no trailing `.0`.
///
/// Serialized output feeds back into the lexer, so the textual form must stay
/// a valid number token.
pub(crate) fn format_number(value: f64) -> String {
    value.to_string()
}

/// Uppercase the first character, leaving the rest untouched.
pub(crate) fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
