//! Identifier case helpers.
//!
//! - [`camel_split`]: `UserID` -> `user_id`, `HTTPServer` -> `http_server`.
//! - [`capitalize`]: `name` -> `Name`.

/// Splits an identifier into lowercase words and joins them with `sep`.
///
/// Word boundaries are:
/// - any non-alphanumeric character (the character itself is dropped),
/// - a lowercase letter or digit followed by an uppercase letter,
/// - the last uppercase letter of an acronym that is followed by a lowercase letter.
///
/// Digits stay attached to the word before them.
///
/// # Examples
///
/// ```
/// use fk_utils::camel_split;
///
/// assert_eq!(camel_split("UserID", "_"), "user_id");
/// assert_eq!(camel_split("HTTPServer", "_"), "http_server");
/// assert_eq!(camel_split("Ipv4Address", "_"), "ipv4_address");
/// assert_eq!(camel_split("created_at", "_"), "created_at");
/// assert_eq!(camel_split("userName", "-"), "user-name");
/// ```
pub fn camel_split(ident: &str, sep: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut word = String::with_capacity(ident.len());

    for (idx, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            flush(&mut words, &mut word);
            continue;
        }

        if ch.is_uppercase() && !word.is_empty() {
            let prev = chars[idx - 1];
            let next = chars.get(idx + 1).copied();
            let after_lower = prev.is_lowercase() || prev.is_numeric();
            let acronym_end = prev.is_uppercase() && next.is_some_and(char::is_lowercase);
            if after_lower || acronym_end {
                flush(&mut words, &mut word);
            }
        }

        word.extend(ch.to_lowercase());
    }
    flush(&mut words, &mut word);

    words.join(sep)
}

#[inline]
fn flush(words: &mut Vec<String>, word: &mut String) {
    if !word.is_empty() {
        words.push(core::mem::take(word));
    }
}

/// Uppercases the first character, leaving the rest untouched.
///
/// # Examples
///
/// ```
/// use fk_utils::capitalize;
///
/// assert_eq!(capitalize("name"), "Name");
/// assert_eq!(capitalize("Name"), "Name");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(ident: &str) -> String {
    let mut chars = ident.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{camel_split, capitalize};

    #[test]
    fn split_acronyms_and_digits() {
        assert_eq!(camel_split("ID", "_"), "id");
        assert_eq!(camel_split("UserID", "_"), "user_id");
        assert_eq!(camel_split("userId", "_"), "user_id");
        assert_eq!(camel_split("JSONData", "_"), "json_data");
        assert_eq!(camel_split("Md5Sum", "_"), "md5_sum");
        assert_eq!(camel_split("V2", "_"), "v2");
    }

    #[test]
    fn split_drops_separators() {
        assert_eq!(camel_split("_private", "_"), "private");
        assert_eq!(camel_split("user__name", "_"), "user_name");
        assert_eq!(camel_split("user-name", "_"), "user_name");
        assert_eq!(camel_split("", "_"), "");
    }

    #[test]
    fn split_is_idempotent() {
        for ident in ["UserID", "HTTPServer", "createdAt", "a_b_c"] {
            let once = camel_split(ident, "_");
            assert_eq!(camel_split(&once, "_"), once);
        }
    }

    #[test]
    fn capitalize_first_char_only() {
        assert_eq!(capitalize("userID"), "UserID");
        assert_eq!(capitalize("é"), "É");
    }
}
