use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The umbrella crate re-exporting every `fk_*` crate under its short name.
const UMBRELLA_NAME: &str = "fieldkit";
const CRATE_PREFIX: &str = "fk_";
const DEPENDENCY_TABLES: [&str; 2] = ["dependencies", "dev-dependencies"];

/// The Cargo.toml of the crate a proc-macro is expanding in.
///
/// Generated code has to name `fk_reflect` with a path that is valid in the
/// calling crate, which may depend on `fk_reflect` itself or only on the
/// `fieldkit` umbrella.
///
/// # Example
///
/// ```rust
/// # use fk_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("fk_reflect"));
/// ```
///
/// # Resolution rules
///
/// `[dependencies]` is searched first, then `[dev-dependencies]`. In each:
///
/// 1. `name` itself is listed: `::name`.
/// 2. `name` is `fk_<short>` and `fieldkit` is listed: `::fieldkit::<short>`.
///
/// Without a match the result is `::name`. A crate expanding its own derive
/// needs `extern crate self as name;` for that to resolve.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

impl Manifest {
    /// Parse manifest text, `None` if it is not valid TOML.
    pub fn parse_manifest(text: Box<str>) -> Option<Document<Box<str>>> {
        Document::parse(text).ok()
    }

    /// Resolve the path of crate `name` as seen from this manifest.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        DEPENDENCY_TABLES
            .iter()
            .filter_map(|table| match self.manifest.get(table) {
                Some(Item::Table(deps)) => Some(deps),
                _ => None,
            })
            .find_map(|deps| Self::find_in_deps(deps, name))
            .unwrap_or_else(|| absolute_path(&[name]))
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(absolute_path(&[name]));
        }
        match name.strip_prefix(CRATE_PREFIX) {
            Some(short) if deps.contains_key(UMBRELLA_NAME) => {
                Some(absolute_path(&[UMBRELLA_NAME, short]))
            }
            _ => None,
        }
    }

    /// Run `func` with the caller's manifest.
    ///
    /// Parsed manifests are kept per path and read again when the file's
    /// modification time changes. Call this once per macro invocation.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = manifest_path();
        let modified_time = std::fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .unwrap_or_else(|e| panic!("no modified time for {}: {e}", path.display()));

        {
            let cached = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = cached.get(&path)
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        let manifest = Manifest {
            manifest: read_manifest(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

// Crate names are valid identifiers, so this only fails on a caller bug.
fn absolute_path(segments: &[&str]) -> syn::Path {
    let text = format!("::{}", segments.join("::"));
    syn::parse_str(&text).unwrap_or_else(|e| panic!("`{text}` is not a path: {e}"))
}

#[inline(never)]
fn manifest_path() -> PathBuf {
    let dir = std::env::var_os("CARGO_MANIFEST_DIR")
        .expect("CARGO_MANIFEST_DIR should be set by cargo");
    let path = PathBuf::from(dir).join("Cargo.toml");
    assert!(path.exists(), "no Cargo.toml at {}", path.display());
    path
}

#[inline(never)]
fn read_manifest(path: &Path) -> Document<Box<str>> {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("unable to read {}: {e}", path.display()));
    Manifest::parse_manifest(text.into_boxed_str())
        .unwrap_or_else(|| panic!("unable to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::Manifest;
    use std::time::SystemTime;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Manifest::parse_manifest(text.into()).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    fn segments(path: &syn::Path) -> Vec<String> {
        path.segments.iter().map(|s| s.ident.to_string()).collect()
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\nfk_reflect = \"0.0.1\"\n");
        let path = m.get_crate_path("fk_reflect");
        assert!(path.leading_colon.is_some());
        assert_eq!(segments(&path), ["fk_reflect"]);
    }

    #[test]
    fn through_umbrella() {
        let m = manifest("[dependencies]\nfieldkit = \"0.0.1\"\n");
        assert_eq!(segments(&m.get_crate_path("fk_reflect")), ["fieldkit", "reflect"]);
    }

    #[test]
    fn direct_beats_umbrella() {
        let m = manifest("[dependencies]\nfieldkit = \"0.0.1\"\nfk_reflect = \"0.0.1\"\n");
        assert_eq!(segments(&m.get_crate_path("fk_reflect")), ["fk_reflect"]);
    }

    #[test]
    fn dev_dependency_and_fallback() {
        let m = manifest("[dev-dependencies]\nfieldkit = \"0.0.1\"\n");
        assert_eq!(segments(&m.get_crate_path("fk_utils")), ["fieldkit", "utils"]);

        let m = manifest("[package]\nname = \"demo\"\n");
        assert_eq!(segments(&m.get_crate_path("fk_reflect")), ["fk_reflect"]);
    }
}
