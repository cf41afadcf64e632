//! Link target classification and canonical address resolution.
//!
//! Every link-like target on a page goes through [`resolve`] before anything
//! else decides what to do with it. Targets that point nowhere useful, or
//! away from the dashboard, are reported as such so the caller can leave the
//! environment's default behavior alone.

use log::*;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use url::Url;

/// Origin every dashboard document is served from.
///
pub const SITE_ORIGIN: &str = "http://fundmon.local/";

/// Canonical absolute form of a navigable target.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AddressablePath {
    pub pathname: String,
    pub search: String,
    pub hash: String,
    /// The address named a directory. The canonical pathname drops the
    /// trailing slash, but the document served there is its `index.html`.
    pub directory: bool,
}

/// Outcome of classifying a link target.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Internal(AddressablePath),
    NotNavigable,
    External,
}

impl AddressablePath {
    /// Build the canonical path of a parsed location.
    ///
    pub fn from_url(url: &Url) -> AddressablePath {
        let raw = url.path();
        AddressablePath {
            pathname: normalize_pathname(raw),
            search: url
                .query()
                .filter(|query| !query.is_empty())
                .map(|query| format!("?{}", query))
                .unwrap_or_default(),
            hash: url
                .fragment()
                .filter(|fragment| !fragment.is_empty())
                .map(|fragment| format!("#{}", fragment))
                .unwrap_or_default(),
            directory: raw.len() > 1 && raw.ends_with('/'),
        }
    }

    /// Return the root document path.
    ///
    pub fn root() -> AddressablePath {
        AddressablePath {
            pathname: "/".to_string(),
            search: String::new(),
            hash: String::new(),
            directory: false,
        }
    }

    /// Parse a root-relative address such as `/alerts.html?id=3`, falling
    /// back to the root document when it cannot be resolved.
    ///
    pub fn parse(address: &str) -> AddressablePath {
        match site_origin().join(address.trim()) {
            Ok(url) => AddressablePath::from_url(&url),
            Err(e) => {
                warn!("Unresolvable address '{}': {}", address, e);
                AddressablePath::root()
            }
        }
    }

    /// Return the absolute location of this path on the site origin.
    ///
    pub fn to_location(&self) -> Url {
        let slash = if self.directory { "/" } else { "" };
        site_origin()
            .join(&format!("{}{}{}{}", self.pathname, slash, self.search, self.hash))
            .unwrap_or_else(|_| site_origin().clone())
    }

    /// Return the last path segment, `index.html` for a directory.
    ///
    pub fn filename(&self) -> &str {
        if self.directory {
            "index.html"
        } else {
            filename(&self.pathname)
        }
    }
}

impl fmt::Display for AddressablePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}

/// Classify `target` relative to `current` and resolve it when navigable.
///
pub fn resolve(target: &str, current: &Url) -> Resolution {
    let target = target.trim();
    if target.is_empty() || target == "#" {
        return Resolution::NotNavigable;
    }
    if target.starts_with("//") {
        return Resolution::External;
    }
    if let Some(scheme) = scheme_of(target) {
        return match scheme.as_str() {
            "javascript" | "mailto" | "tel" => Resolution::NotNavigable,
            _ => Resolution::External,
        };
    }
    // Fragment-only targets resolve against the current document, query
    // included, and are navigated like any other in-app target: the page is
    // reloaded at the new hash rather than scrolled in place.
    match current.join(target) {
        Ok(url) => Resolution::Internal(AddressablePath::from_url(&url)),
        Err(e) => {
            debug!("Treating '{}' as not navigable: {}", target, e);
            Resolution::NotNavigable
        }
    }
}

/// Strip a single trailing slash from `pathname`, keeping the root as `/`.
///
pub fn normalize_pathname(pathname: &str) -> String {
    let trimmed = pathname.strip_suffix('/').unwrap_or(pathname);
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Return the final segment of `pathname`, `index.html` when it is empty.
///
pub fn filename(pathname: &str) -> &str {
    match pathname.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => "index.html",
    }
}

fn site_origin() -> &'static Url {
    static ORIGIN: OnceLock<Url> = OnceLock::new();
    ORIGIN.get_or_init(|| Url::parse(SITE_ORIGIN).expect("site origin is a valid absolute URL"))
}

fn scheme_of(target: &str) -> Option<String> {
    static SCHEME: OnceLock<Option<Regex>> = OnceLock::new();
    let re = SCHEME
        .get_or_init(|| match Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):") {
            Ok(re) => Some(re),
            Err(e) => {
                error!("Invalid scheme pattern: {}", e);
                None
            }
        })
        .as_ref()?;
    re.captures(target)
        .and_then(|caps| caps.get(1))
        .map(|scheme| scheme.as_str().to_ascii_lowercase())
}
