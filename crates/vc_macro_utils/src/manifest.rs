use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;
use std::{env, fs};

use toml_edit::{Document, Item, Table};

/// The invoking crate's `Cargo.toml`, used to find the path under which a
/// member crate is reachable from generated code.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_marshal"));
/// ```
///
/// Reading the manifest is not cheap. Resolve once per macro invocation and
/// pass the path along.
///
/// # Resolution rules
///
/// 1. A dependency named `name` resolves to `::name`.
/// 2. A dependency renamed from `name` (`alias = { package = "name" }`)
///    resolves to `::alias`.
/// 3. If `name` starts with `vc_` and the facade `vc_data` is a dependency,
///    `::vc_data::<rest>` is used (`vc_marshal` becomes `::vc_data::marshal`).
/// 4. Steps 1-3 are repeated for `dev-dependencies`.
/// 5. Otherwise `::name` is returned.
///
/// A crate that expands its own derives should declare
/// `extern crate self as name;` so that `::name` resolves inside it.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "vc_data";
const MEMBER_PREFIX: &str = "vc_";
const DEPENDENCY_SECTIONS: [&str; 2] = ["dependencies", "dev-dependencies"];

/// Parsed manifests keyed by the location of their `Cargo.toml`.
static CACHE: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

impl Manifest {
    /// Locates the invoking crate's `Cargo.toml` together with its
    /// modification time.
    #[inline(never)]
    fn locate() -> (PathBuf, SystemTime) {
        let Some(dir) = env::var_os("CARGO_MANIFEST_DIR") else {
            panic!("`CARGO_MANIFEST_DIR` is not set, proc-macros must run under cargo");
        };
        let location = PathBuf::from(dir).join("Cargo.toml");
        match fs::metadata(&location).and_then(|meta| meta.modified()) {
            Ok(modified) => (location, modified),
            Err(err) => panic!("cannot stat `{}`: {err}", location.display()),
        }
    }

    #[inline(never)]
    fn load(location: &Path, modified_time: SystemTime) -> Self {
        let text = match fs::read_to_string(location) {
            Ok(text) => text.into_boxed_str(),
            Err(err) => panic!("cannot read `{}`: {err}", location.display()),
        };
        match Document::parse(text) {
            Ok(manifest) => Self {
                manifest,
                modified_time,
            },
            Err(err) => panic!("`{}` is not valid TOML: {err}", location.display()),
        }
    }

    fn crate_root(name: &str) -> syn::Path {
        syn::parse_str(&format!("::{name}"))
            .unwrap_or_else(|_| panic!("'{name}' is not a valid crate name"))
    }

    fn renamed_from(deps: &Table, name: &str) -> Option<String> {
        deps.iter().find_map(|(alias, item)| {
            let package = item.get("package")?.as_str()?;
            (package == name).then(|| alias.replace('-', "_"))
        })
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::crate_root(name));
        }
        if let Some(alias) = Self::renamed_from(deps, name) {
            return Some(Self::crate_root(&alias));
        }
        let module = name.strip_prefix(MEMBER_PREFIX)?;
        if !deps.contains_key(FACADE_NAME) {
            return None;
        }
        let mut path = Self::crate_root(FACADE_NAME);
        let segment: syn::PathSegment = syn::parse_str(module)
            .unwrap_or_else(|_| panic!("'{module}' is not a valid module name"));
        path.segments.push(segment);
        Some(path)
    }

    /// Returns the path of the crate `name` as seen from the invoking crate.
    /// See the type documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        DEPENDENCY_SECTIONS
            .into_iter()
            .find_map(|section| match self.manifest.get(section) {
                Some(Item::Table(deps)) => Self::find_in_deps(deps, name),
                _ => None,
            })
            .unwrap_or_else(|| Self::crate_root(name))
    }

    /// Runs `func` on the invoking crate's manifest.
    ///
    /// Parsed manifests are cached per path and re-read when the file's
    /// modification time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        let (location, modified_time) = Self::locate();

        {
            let cache = CACHE.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = cache.get(&location)
                && cached.modified_time == modified_time
            {
                return func(cached);
            }
        }

        let fresh = Self::load(&location, modified_time);
        let output = func(&fresh);
        CACHE
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(location, fresh);
        output
    }
}
