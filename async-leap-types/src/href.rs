// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! Path-style resource identifiers (`/area/5`, `/zone/842/status`).

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A reference to another LEAP resource, e.g. `{"href": "/zone/842"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HRef {
    /// The resource path.
    pub href: String,
}

impl HRef {
    /// Create a reference from a path.
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }

    /// The numeric id embedded in the path, if any.
    pub fn id(&self) -> Option<u32> {
        id_from_href(&self.href)
    }
}

fn href_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^/(?:\D+)/(\d+)(?:/\D+)?").expect("valid href pattern"))
}

/// Extract an id from any kind of href.
///
/// The id is the first numeric segment following the type name, so
/// `/zone/842`, `/zone/842/status` and `/device/128/linknode/129` all
/// yield the first number. Returns `None` when the format does not match;
/// inputs not starting with `/` are never matched.
pub fn id_from_href(href: &str) -> Option<u32> {
    let captures = href_pattern().captures(href)?;
    captures.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_from_wellformed_hrefs() {
        for kind in ["area", "zone", "device"] {
            for n in [0u32, 5, 842, 65536] {
                assert_eq!(id_from_href(&format!("/{kind}/{n}")), Some(n));
                assert_eq!(id_from_href(&format!("/{kind}/{n}/status")), Some(n));
            }
        }
    }

    #[test]
    fn id_takes_first_numeric_segment() {
        assert_eq!(id_from_href("/device/128/linknode/129"), Some(128));
        assert_eq!(id_from_href("/area/117/status"), Some(117));
    }

    #[test]
    fn id_absent_for_malformed_hrefs() {
        assert_eq!(id_from_href(""), None);
        assert_eq!(id_from_href("/nonumber"), None);
        assert_eq!(id_from_href("/project"), None);
        assert_eq!(id_from_href("zone/842"), None);
        assert_eq!(id_from_href("/database/@Project"), None);
    }

    #[test]
    fn href_id_accessor() {
        assert_eq!(HRef::new("/zone/842").id(), Some(842));
        assert_eq!(HRef::new("/project").id(), None);
    }
}
