//! Serde representations of selectors and overrides for file-based configs.
//!
//! An override property may be written three ways in TOML:
//!
//! ```toml
//! condim = 3                                   # scalar
//! condim = { "^[FR][LR]_foot_collision$" = 3, ".*_collision" = 1 }
//! condim = [                                   # explicit priorities
//!     { pattern = ".*", value = 1, priority = 100 },
//!     { pattern = "^A$", value = 3 },
//! ]
//! ```
//!
//! Table keys are unordered, which is harmless: precedence is decided by
//! priority, never by declaration order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ResolveError;
use crate::pattern::Selector;
use crate::resolve::{Override, PatternOverride};

// ---------------------------------------------------------------------------
// OverrideSpec
// ---------------------------------------------------------------------------

/// One entry of an explicitly prioritized override list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideEntrySpec<T> {
    pub pattern: String,
    pub value: T,
    /// Defaults to the pattern's specificity.
    #[serde(default)]
    pub priority: Option<i32>,
}

/// Uncompiled override as read from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverrideSpec<T> {
    Scalar(T),
    Patterned(BTreeMap<String, T>),
    Entries(Vec<OverrideEntrySpec<T>>),
}

impl<T> OverrideSpec<T> {
    /// Compile every pattern into an [`Override`].
    pub fn compile(self) -> Result<Override<T>, ResolveError> {
        match self {
            Self::Scalar(v) => Ok(Override::Scalar(v)),
            Self::Patterned(map) => Override::patterned(map),
            Self::Entries(entries) => entries
                .into_iter()
                .map(|e| {
                    let entry = PatternOverride::new(&e.pattern, e.value)?;
                    Ok(match e.priority {
                        Some(p) => entry.with_priority(p),
                        None => entry,
                    })
                })
                .collect::<Result<Vec<_>, ResolveError>>()
                .map(Override::Patterned),
        }
    }
}

/// Compile an optional override property.
pub fn compile_optional<T>(
    spec: Option<OverrideSpec<T>>,
) -> Result<Option<Override<T>>, ResolveError> {
    spec.map(OverrideSpec::compile).transpose()
}

/// Compile a list of pattern strings into a [`Selector`].
pub fn compile_selector(patterns: &[String]) -> Result<Selector, ResolveError> {
    Selector::new(patterns)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Doc {
        condim: OverrideSpec<i32>,
        #[serde(default)]
        friction: Option<OverrideSpec<Vec<f64>>>,
    }

    #[test]
    fn scalar_from_toml() {
        let doc: Doc = toml::from_str("condim = 3").unwrap();
        assert_eq!(doc.condim, OverrideSpec::Scalar(3));
        assert!(doc.friction.is_none());
    }

    #[test]
    fn pattern_table_from_toml() {
        let doc: Doc = toml::from_str(
            r#"
            condim = { "^[FR][LR]_foot_collision$" = 3, ".*_collision" = 1 }
            friction = { "^[FR][LR]_foot_collision$" = [0.6] }
        "#,
        )
        .unwrap();
        let Override::Patterned(entries) = doc.condim.compile().unwrap() else {
            panic!("Expected Override::Patterned");
        };
        assert_eq!(entries.len(), 2);
        let foot = entries
            .iter()
            .find(|e| e.pattern.as_str() == "^[FR][LR]_foot_collision$")
            .unwrap();
        assert_eq!(foot.value, 3);
        assert_eq!(foot.priority, 32);

        let friction = compile_optional(doc.friction).unwrap().unwrap();
        assert_eq!(friction.values(), vec![&vec![0.6]]);
    }

    #[test]
    fn vector_scalar_from_toml() {
        let doc: Doc = toml::from_str("condim = 1\nfriction = [1.0, 0.005, 0.0001]").unwrap();
        assert_eq!(
            doc.friction,
            Some(OverrideSpec::Scalar(vec![1.0, 0.005, 0.0001]))
        );
    }

    #[test]
    fn prioritized_entries_from_toml() {
        let doc: Doc = toml::from_str(
            r#"
            condim = [
                { pattern = ".*", value = 1, priority = 100 },
                { pattern = "^A$", value = 3 },
            ]
        "#,
        )
        .unwrap();
        let Override::Patterned(entries) = doc.condim.compile().unwrap() else {
            panic!("Expected Override::Patterned");
        };
        assert_eq!(entries[0].priority, 100);
        assert_eq!(entries[1].priority, 2);
    }

    #[test]
    fn invalid_pattern_key_fails_to_compile() {
        let doc: Doc = toml::from_str(r#"condim = { "(" = 3 }"#).unwrap();
        assert!(matches!(
            doc.condim.compile(),
            Err(ResolveError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn override_spec_json_roundtrip() {
        let spec = OverrideSpec::Patterned(BTreeMap::from([(".*_joint".to_string(), 0.5)]));
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{".*_joint":0.5}"#);
        let back: OverrideSpec<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn compile_selector_keeps_order() {
        let s = compile_selector(&[".*_hip_joint".into(), ".*_thigh_joint".into()]).unwrap();
        assert_eq!(
            s.sources().collect::<Vec<_>>(),
            vec![".*_hip_joint", ".*_thigh_joint"]
        );
    }
}
