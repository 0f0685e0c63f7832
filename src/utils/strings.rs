//! String utility functions

/// Split an entry line on the first unescaped `=`.
///
/// Returns the unescaped, trimmed key and the trimmed value, or `None` when
/// the line has no separator. `\=` inside the key does not split.
///
/// # Examples
///
/// ```
/// use proptree::utils::strings::split_key_value;
///
/// assert_eq!(split_key_value("a = b"), Some(("a".to_string(), "b")));
/// assert_eq!(split_key_value("x=y=z"), Some(("x".to_string(), "y=z")));
/// assert_eq!(split_key_value(r"a\=b = c"), Some(("a=b".to_string(), "c")));
/// assert_eq!(split_key_value("no separator"), None);
/// ```
pub fn split_key_value(line: &str) -> Option<(String, &str)> {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' => {
                let key = unescape_key(line[..i].trim());
                return Some((key, line[i + 1..].trim()));
            }
            _ => {}
        }
    }
    None
}

/// Replace `\=` with `=` in a key.
pub fn unescape_key(key: &str) -> String {
    key.replace("\\=", "=")
}

/// Escape `=` in a key so it survives [`split_key_value`].
pub fn escape_key(key: &str) -> String {
    key.replace('=', "\\=")
}

/// Whether `text` ends with an odd number of backslashes, i.e. a
/// continuation marker that is not itself escaped.
///
/// ```
/// use proptree::utils::strings::ends_with_continuation;
///
/// assert!(ends_with_continuation(r"foo \"));
/// assert!(!ends_with_continuation(r"C:\dir\\"));
/// assert!(!ends_with_continuation("plain"));
/// ```
pub fn ends_with_continuation(text: &str) -> bool {
    let count = text.chars().rev().take_while(|&c| c == '\\').count();
    count % 2 == 1
}
