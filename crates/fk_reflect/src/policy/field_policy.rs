use core::fmt;
use std::sync::OnceLock;

use fk_utils::{TagMap, camel_split};

use crate::Value;
use crate::info::FieldDecl;
use crate::policy::TagOptions;

// -----------------------------------------------------------------------------
// FieldPolicy

/// The serialization policy of one flattened field.
///
/// Parsed from the field's primary tag value, `name,flag,flag...`:
///
/// - `-` alone ignores the field; `-` followed by flags names it `-`.
/// - The first token is the external name; empty means "derive it from the
///   source name".
/// - Flags are case-insensitive, and the last one wins for each setting:
///   `omitempty`/`allowempty`, `omitzero`/`allowzero`,
///   `omitfalse`/`allowfalse` and `string`. Unknown flags are ignored.
///
/// `omitempty` is on by default. The name key overrides the external name.
///
/// # Examples
///
/// ```
/// use fk_reflect::policy::{FieldPolicy, TagOptions};
/// use fk_utils::TagMap;
///
/// let tags = TagMap::parse(r#"json:",allowempty,OmitZero""#).unwrap();
/// let policy = FieldPolicy::from_tags("UserID", tags, &TagOptions::new());
///
/// assert_eq!(policy.marshal_name(), "user_id");
/// assert!(!policy.omit_empty());
/// assert!(policy.omit_zero());
/// assert!(!policy.is_ignored());
/// ```
#[derive(Clone)]
pub struct FieldPolicy {
    ignored: bool,
    omit_empty: bool,
    omit_zero: bool,
    omit_false: bool,
    force_string: bool,
    name: String,
    field_name: &'static str,
    tags: TagMap,
    snake_name: OnceLock<String>,
}

impl FieldPolicy {
    /// Parses the policy of a declared field.
    #[inline]
    pub fn parse(decl: &FieldDecl, options: &TagOptions) -> Self {
        Self::from_tags(decl.name(), decl.tags().clone(), options)
    }

    /// Parses the policy of the source field `field_name` from its tags.
    pub fn from_tags(field_name: &'static str, tags: TagMap, options: &TagOptions) -> Self {
        let mut policy = Self {
            ignored: false,
            omit_empty: true,
            omit_zero: false,
            omit_false: false,
            force_string: false,
            name: String::new(),
            field_name,
            tags: TagMap::new(),
            snake_name: OnceLock::new(),
        };

        if let Some(value) = tags.get(options.primary_key()) {
            let mut tokens = value.split(',');
            let first = tokens.next().unwrap_or_default();
            let mut flags = tokens.peekable();

            if first == "-" && flags.peek().is_none() {
                policy.ignored = true;
            } else {
                policy.name = first.to_owned();
            }

            for flag in flags {
                policy.apply_flag(flag);
            }
        }

        if let Some(name) = tags.get(options.name_key()) {
            policy.name = name.to_owned();
        }

        policy.tags = tags;
        policy
    }

    fn apply_flag(&mut self, flag: &str) {
        match flag.to_lowercase().as_str() {
            "omitempty" => self.omit_empty = true,
            "allowempty" => self.omit_empty = false,
            "omitzero" => self.omit_zero = true,
            "allowzero" => self.omit_zero = false,
            "omitfalse" => self.omit_false = true,
            "allowfalse" => self.omit_false = false,
            "string" => self.force_string = true,
            _ => {}
        }
    }

    /// Returns the name the field is addressed by on the wire.
    ///
    /// Without an explicit name this is the snake-case source name, computed
    /// once and cached.
    #[inline]
    pub fn marshal_name(&self) -> &str {
        if self.name.is_empty() {
            self.snake_field_name()
        } else {
            &self.name
        }
    }

    /// Returns the source name split into lowercase words joined by `_`.
    pub fn snake_field_name(&self) -> &str {
        self.snake_name.get_or_init(|| camel_split(self.field_name, "_"))
    }

    /// Returns the explicit external name, empty if none was given.
    #[inline]
    pub fn explicit_name(&self) -> &str {
        &self.name
    }

    /// Returns the source field name.
    #[inline]
    pub const fn field_name(&self) -> &'static str {
        self.field_name
    }

    /// Returns every tag of the field.
    #[inline]
    pub const fn tags(&self) -> &TagMap {
        &self.tags
    }

    #[inline]
    pub const fn is_ignored(&self) -> bool {
        self.ignored
    }

    #[inline]
    pub const fn omit_empty(&self) -> bool {
        self.omit_empty
    }

    #[inline]
    pub const fn omit_zero(&self) -> bool {
        self.omit_zero
    }

    #[inline]
    pub const fn omit_false(&self) -> bool {
        self.omit_false
    }

    /// Returns `true` if the value should be encoded as a string.
    #[inline]
    pub const fn force_string(&self) -> bool {
        self.force_string
    }

    /// Returns `true` if `value` should be left out under this policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use fk_reflect::policy::{FieldPolicy, TagOptions};
    ///
    /// let tags = [("json", "count,omitzero,allowempty")].into_iter().collect();
    /// let policy = FieldPolicy::from_tags("Count", tags, &TagOptions::new());
    ///
    /// assert!(policy.should_omit(&0_u32));
    /// assert!(!policy.should_omit(&7_u32));
    /// assert!(!policy.should_omit(&String::new()));
    /// ```
    pub fn should_omit(&self, value: &dyn Value) -> bool {
        (self.omit_empty && value.is_empty())
            || (self.omit_zero && value.is_zero())
            || (self.omit_false && value.is_false())
    }
}

impl PartialEq for FieldPolicy {
    fn eq(&self, other: &Self) -> bool {
        self.ignored == other.ignored
            && self.omit_empty == other.omit_empty
            && self.omit_zero == other.omit_zero
            && self.omit_false == other.omit_false
            && self.force_string == other.force_string
            && self.name == other.name
            && self.field_name == other.field_name
            && self.tags == other.tags
    }
}

impl Eq for FieldPolicy {}

impl fmt::Debug for FieldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldPolicy")
            .field("marshal_name", &self.marshal_name())
            .field("field_name", &self.field_name)
            .field("ignored", &self.ignored)
            .field("omit_empty", &self.omit_empty)
            .field("omit_zero", &self.omit_zero)
            .field("omit_false", &self.omit_false)
            .field("force_string", &self.force_string)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::FieldPolicy;
    use crate::policy::TagOptions;
    use fk_utils::TagMap;

    fn policy(field: &'static str, raw: &str) -> FieldPolicy {
        FieldPolicy::from_tags(field, TagMap::parse(raw).unwrap(), &TagOptions::new())
    }

    #[test]
    fn dash_alone_ignores() {
        assert!(policy("Secret", r#"json:"-""#).is_ignored());

        let named = policy("Dash", r#"json:"-,string""#);
        assert!(!named.is_ignored());
        assert_eq!(named.marshal_name(), "-");
        assert!(named.force_string());
    }

    #[test]
    fn default_name_is_snake_case() {
        let p = policy("UserID", "");
        assert_eq!(p.marshal_name(), "user_id");
        assert!(p.omit_empty());
        assert!(!p.omit_zero());
        assert!(!p.omit_false());

        assert_eq!(policy("UserID", r#"json:",omitzero""#).marshal_name(), "user_id");
    }

    #[test]
    fn last_flag_wins() {
        assert!(!policy("A", r#"json:"a,omitempty,allowempty""#).omit_empty());
        assert!(policy("A", r#"json:"a,allowempty,OMITEMPTY""#).omit_empty());
        assert!(policy("A", r#"json:"a,omitfalse,unknown""#).omit_false());
        assert!(!policy("A", r#"json:"a,omitzero,AllowZero""#).omit_zero());
    }

    #[test]
    fn name_key_overrides() {
        let p = policy("UserID", r#"json:"uid" name:"owner""#);
        assert_eq!(p.marshal_name(), "owner");
        assert_eq!(p.explicit_name(), "owner");

        let p = policy("UserID", r#"json:"-" name:"owner""#);
        assert!(p.is_ignored());
        assert_eq!(p.marshal_name(), "owner");
    }

    #[test]
    fn custom_primary_key() {
        let options = TagOptions::new().with_primary_key("yaml");
        let tags = TagMap::parse(r#"json:"-" yaml:"kept""#).unwrap();
        let p = FieldPolicy::from_tags("Kept", tags, &options);
        assert!(!p.is_ignored());
        assert_eq!(p.marshal_name(), "kept");
    }

    #[test]
    fn omission() {
        let p = policy("Flag", r#"json:"flag,allowempty,omitfalse""#);
        assert!(p.should_omit(&false));
        assert!(!p.should_omit(&true));
        assert!(!p.should_omit(&None::<u8>));

        let p = policy("Note", "");
        assert!(p.should_omit(&None::<u8>));
        assert!(p.should_omit(&String::new()));
        assert!(!p.should_omit(&0_u8));
    }

    #[test]
    fn equality_ignores_memo() {
        let a = policy("UserID", "");
        let b = a.clone();
        let _ = a.marshal_name();
        assert_eq!(a, b);
    }
}
