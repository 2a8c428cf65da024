//! Centralized validation helpers.

/// Delimiter used when none is configured
pub const DEFAULT_DELIMITER: char = ',';

/// Parse a configured delimiter string into a single character.
///
/// Returns `None` unless the string holds exactly one character.
///
/// # Examples
///
/// ```
/// use hello_genomics::utils::validation::parse_delimiter;
///
/// assert_eq!(parse_delimiter(";"), Some(';'));
/// assert_eq!(parse_delimiter("\t"), Some('\t'));
/// assert_eq!(parse_delimiter(""), None);
/// assert_eq!(parse_delimiter(",,"), None);
/// ```
#[must_use]
pub fn parse_delimiter(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Strip a trailing `\n` or `\r\n`
#[must_use]
pub fn trim_line_ending(s: &str) -> &str {
    let s = s.strip_suffix('\n').unwrap_or(s);
    s.strip_suffix('\r').unwrap_or(s)
}

/// Strip a leading UTF-8 byte order mark
#[must_use]
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix('\u{feff}').unwrap_or(s)
}
