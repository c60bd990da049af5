use std::borrow::Cow;

/// Tag keys read by [`FieldPolicy::parse`](crate::policy::FieldPolicy::parse).
///
/// The primary key (default `json`) carries `name,flag,flag...`; the name key
/// (default `name`) overrides the external name when present.
///
/// # Examples
///
/// ```
/// use fk_reflect::policy::TagOptions;
///
/// let options = TagOptions::new().with_primary_key("yaml");
/// assert_eq!(options.primary_key(), "yaml");
/// assert_eq!(options.name_key(), "name");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TagOptions {
    primary_key: Cow<'static, str>,
    name_key: Cow<'static, str>,
}

impl TagOptions {
    /// `json` and `name`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            primary_key: Cow::Borrowed("json"),
            name_key: Cow::Borrowed("name"),
        }
    }

    /// Replaces the primary key.
    pub fn with_primary_key(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.primary_key = key.into();
        self
    }

    /// Replaces the name key.
    pub fn with_name_key(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.name_key = key.into();
        self
    }

    #[inline]
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    #[inline]
    pub fn name_key(&self) -> &str {
        &self.name_key
    }
}

impl Default for TagOptions {
    fn default() -> Self {
        Self::new()
    }
}
