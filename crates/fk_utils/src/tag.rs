//! Field tag tokenizer.
//!
//! A tag is a sequence of `key:"value"` pairs separated by spaces:
//!
//! ```text
//! json:"user_id,omitempty" name:"uid" width:"12"
//! ```
//!
//! Keys are runs of non-space characters other than `:` and `"`.
//! Values are double-quoted, with `\\`, `\"`, `\n`, `\t` and `\r` escapes.
//! When a key appears twice, the first value is kept.

use core::fmt;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use thiserror::Error;

#[inline]
fn is_key_char(ch: char) -> bool {
    ch > ' ' && ch != ':' && ch != '"' && ch != '\x7f'
}

// -----------------------------------------------------------------------------
// TagError

/// Syntax errors reported by [`TagMap::parse`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("tag key at byte {offset} is empty")]
    EmptyKey { offset: usize },
    #[error("tag key `{key}` is not followed by `:\"`")]
    ExpectedValue { key: String },
    #[error("value of tag key `{key}` is missing its closing quote")]
    UnterminatedValue { key: String },
    #[error("value of tag key `{key}` contains the unknown escape `\\{escape}`")]
    InvalidEscape { key: String, escape: char },
}

// -----------------------------------------------------------------------------
// TagMap

/// Parsed field tags, ordered by key.
///
/// # Examples
///
/// ```
/// use fk_utils::TagMap;
///
/// let tags = TagMap::parse(r#"json:"user_id,omitempty" name:"uid""#).unwrap();
///
/// assert_eq!(tags.get("json"), Some("user_id,omitempty"));
/// assert_eq!(tags.get("name"), Some("uid"));
/// assert_eq!(tags.get("xml"), None);
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct TagMap {
    pairs: BTreeMap<String, String>,
}

impl TagMap {
    /// Creates an empty [`TagMap`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            pairs: BTreeMap::new(),
        }
    }

    /// Parses a raw tag string.
    ///
    /// Returns the first syntax error found; see [`TagMap::parse_lossy`]
    /// for a variant that never fails.
    pub fn parse(raw: &str) -> Result<Self, TagError> {
        let mut tags = Self::new();
        tags.extend_from_raw(raw)?;
        Ok(tags)
    }

    /// Parses a raw tag string, keeping every pair read before the first
    /// syntax error.
    ///
    /// # Examples
    ///
    /// ```
    /// use fk_utils::TagMap;
    ///
    /// let tags = TagMap::parse_lossy(r#"json:"id" broken"#);
    /// assert_eq!(tags.get("json"), Some("id"));
    /// assert_eq!(tags.len(), 1);
    /// ```
    pub fn parse_lossy(raw: &str) -> Self {
        let mut tags = Self::new();
        if let Err(e) = tags.extend_from_raw(raw) {
            log::debug!("malformed field tag `{raw}`: {e}");
        }
        tags
    }

    /// Parses `raw` and adds its pairs, keeping existing keys.
    ///
    /// Pairs read before a syntax error are kept.
    pub fn extend_from_raw(&mut self, raw: &str) -> Result<(), TagError> {
        let mut cursor = Cursor { raw, pos: 0 };

        loop {
            cursor.skip_spaces();
            if cursor.is_end() {
                return Ok(());
            }

            let offset = cursor.pos;
            let key = cursor.take_while(is_key_char);
            if key.is_empty() {
                return Err(TagError::EmptyKey { offset });
            }
            if !cursor.eat(':') || !cursor.eat('"') {
                return Err(TagError::ExpectedValue { key: key.into() });
            }

            let value = cursor.quoted_value(key)?;
            self.insert(key, value);
        }
    }

    /// Adds one pair. Returns `false` and keeps the old value if the key exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        match self.pairs.entry(key.into()) {
            Entry::Vacant(entry) => {
                entry.insert(value.into());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Returns the value of `key`, if present.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.contains_key(key)
    }

    /// Iterates over the pairs, ordered by key.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Debug for TagMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = Self::new();
        for (key, value) in iter {
            tags.insert(key, value);
        }
        tags
    }
}

// -----------------------------------------------------------------------------
// Cursor

struct Cursor<'a> {
    raw: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    #[inline]
    fn rest(&self) -> &'a str {
        &self.raw[self.pos..]
    }

    #[inline]
    fn is_end(&self) -> bool {
        self.pos >= self.raw.len()
    }

    fn skip_spaces(&mut self) {
        self.take_while(|ch| ch == ' ');
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|ch| !pred(ch)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn eat(&mut self, expect: char) -> bool {
        if self.rest().starts_with(expect) {
            self.pos += expect.len_utf8();
            true
        } else {
            false
        }
    }

    // The opening quote has been consumed.
    fn quoted_value(&mut self, key: &str) -> Result<String, TagError> {
        let mut value = String::new();
        let mut chars = self.rest().char_indices();

        while let Some((idx, ch)) = chars.next() {
            match ch {
                '"' => {
                    self.pos += idx + 1;
                    return Ok(value);
                }
                '\\' => {
                    let escape = match chars.next() {
                        Some((_, escape)) => escape,
                        None => break,
                    };
                    value.push(match escape {
                        '\\' => '\\',
                        '"' => '"',
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        _ => {
                            return Err(TagError::InvalidEscape {
                                key: key.into(),
                                escape,
                            });
                        }
                    });
                }
                _ => value.push(ch),
            }
        }

        Err(TagError::UnterminatedValue { key: key.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::{TagError, TagMap};

    #[test]
    fn parse_multiple_pairs() {
        let tags = TagMap::parse(r#"json:"id,string"  name:"uid" x-extra:"a b""#).unwrap();
        assert_eq!(tags.len(), 3);
        assert_eq!(tags.get("json"), Some("id,string"));
        assert_eq!(tags.get("name"), Some("uid"));
        assert_eq!(tags.get("x-extra"), Some("a b"));
    }

    #[test]
    fn parse_empty_and_blank() {
        assert!(TagMap::parse("").unwrap().is_empty());
        assert!(TagMap::parse("   ").unwrap().is_empty());
        assert_eq!(TagMap::parse(r#"json:"""#).unwrap().get("json"), Some(""));
    }

    #[test]
    fn parse_escapes() {
        let tags = TagMap::parse(r#"doc:"say \"hi\"\n""#).unwrap();
        assert_eq!(tags.get("doc"), Some("say \"hi\"\n"));
    }

    #[test]
    fn first_duplicate_wins() {
        let tags = TagMap::parse(r#"json:"a" json:"b""#).unwrap();
        assert_eq!(tags.get("json"), Some("a"));
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(
            TagMap::parse(r#"json"#),
            Err(TagError::ExpectedValue { key: "json".into() })
        );
        assert_eq!(
            TagMap::parse(r#"json:id"#),
            Err(TagError::ExpectedValue { key: "json".into() })
        );
        assert_eq!(
            TagMap::parse(r#"json:"id"#),
            Err(TagError::UnterminatedValue { key: "json".into() })
        );
        assert_eq!(
            TagMap::parse(r#"json:"\q""#),
            Err(TagError::InvalidEscape {
                key: "json".into(),
                escape: 'q'
            })
        );
        assert_eq!(
            TagMap::parse(r#":"x""#),
            Err(TagError::EmptyKey { offset: 0 })
        );
    }

    #[test]
    fn lossy_keeps_prefix() {
        let tags = TagMap::parse_lossy(r#"json:"id" name:"unterminated"#);
        assert_eq!(tags.get("json"), Some("id"));
        assert!(!tags.contains("name"));
    }

    #[test]
    fn from_pairs() {
        let tags: TagMap = [("json", "a,omitempty"), ("name", "b")].into_iter().collect();
        assert_eq!(tags.iter().collect::<Vec<_>>(), [("json", "a,omitempty"), ("name", "b")]);
    }
}
