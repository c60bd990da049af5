use syn::{Attribute, LitStr};

use crate::RECORD_ATTRIBUTE_NAME;

/// One tag source, kept in declaration order so the first value of a key wins.
#[derive(Debug)]
pub(crate) enum TagAttr {
    /// `key = "value"`
    Pair(String, LitStr),
    /// `tag = "key:\"value\" ..."`
    Raw(LitStr),
}

/// Field-level `#[record(...)]` attributes.
///
/// - `embed`
/// - `tag = "raw tag string"`
/// - `key = "value"` for any other identifier
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub embed: bool,
    pub tags: Vec<TagAttr>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(RECORD_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("embed") {
                    if result.embed {
                        return Err(meta.error("duplicate `embed` attribute"));
                    }
                    result.embed = true;
                    return Ok(());
                }

                if meta.path.is_ident("tag") {
                    result.tags.push(TagAttr::Raw(meta.value()?.parse()?));
                    return Ok(());
                }

                match meta.path.get_ident() {
                    Some(key) => {
                        let key = key.to_string();
                        result.tags.push(TagAttr::Pair(key, meta.value()?.parse()?));
                        Ok(())
                    }
                    None => Err(meta.error("expected `embed`, `tag = \"...\"` or `key = \"value\"`")),
                }
            })?;
        }

        Ok(result)
    }
}
