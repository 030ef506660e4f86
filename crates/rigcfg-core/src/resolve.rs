//! Scalar-or-patterned override resolution.
//!
//! # Precedence
//!
//! For a [`Override::Patterned`] property, every entry whose pattern matches
//! the element is a candidate. The candidate with the highest priority wins.
//! Priority defaults to the pattern's specificity, so `"^A$"` beats `".*"` on
//! element `"A"` regardless of declaration order. Candidates tied at the top
//! priority must agree on the value, otherwise resolution fails with
//! [`ResolveError::OverrideConflict`].
//!
//! When no entry matches, the caller-supplied default is used; without one the
//! element fails with [`ResolveError::NoOverride`].

use tracing::debug;

use crate::error::ResolveError;
use crate::pattern::{Pattern, Selector};

// ---------------------------------------------------------------------------
// PatternOverride / Override
// ---------------------------------------------------------------------------

/// One `(pattern, value, priority)` entry of a patterned override.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternOverride<T> {
    pub pattern: Pattern,
    pub value: T,
    pub priority: i32,
}

impl<T> PatternOverride<T> {
    /// Entry whose priority is the pattern's specificity.
    pub fn new(pattern: &str, value: T) -> Result<Self, ResolveError> {
        let pattern = Pattern::new(pattern)?;
        Ok(Self {
            priority: pattern.specificity(),
            pattern,
            value,
        })
    }

    /// Replace the derived priority with an explicit one.
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// A property that is either one value for every selected element, or a
/// pattern-keyed list of values.
#[derive(Debug, Clone, PartialEq)]
pub enum Override<T> {
    Scalar(T),
    Patterned(Vec<PatternOverride<T>>),
}

impl<T> Override<T> {
    pub const fn scalar(value: T) -> Self {
        Self::Scalar(value)
    }

    /// Build a patterned override from `(pattern, value)` pairs.
    pub fn patterned<I, S>(entries: I) -> Result<Self, ResolveError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
    {
        entries
            .into_iter()
            .map(|(pattern, value)| PatternOverride::new(pattern.as_ref(), value))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::Patterned)
    }

    /// Apply `f` to every value, keeping patterns and priorities.
    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<Override<U>, E> {
        match self {
            Self::Scalar(v) => Ok(Override::Scalar(f(v)?)),
            Self::Patterned(entries) => entries
                .into_iter()
                .map(|e| {
                    Ok(PatternOverride {
                        pattern: e.pattern,
                        value: f(e.value)?,
                        priority: e.priority,
                    })
                })
                .collect::<Result<Vec<_>, E>>()
                .map(Override::Patterned),
        }
    }

    /// Every value this override can produce.
    pub fn values(&self) -> Vec<&T> {
        match self {
            Self::Scalar(v) => vec![v],
            Self::Patterned(entries) => entries.iter().map(|e| &e.value).collect(),
        }
    }
}

impl<T> From<T> for Override<T> {
    fn from(value: T) -> Self {
        Self::Scalar(value)
    }
}

impl<T: Clone + PartialEq> Override<T> {
    /// Resolve the value for one element already known to be selected.
    pub fn resolve_one(
        &self,
        element: &str,
        default: Option<&T>,
    ) -> Result<Resolved<T>, ResolveError> {
        match self {
            Self::Scalar(value) => Ok(Resolved {
                value: value.clone(),
                source: ValueSource::Scalar,
            }),
            Self::Patterned(entries) => {
                let candidates: Vec<&PatternOverride<T>> = entries
                    .iter()
                    .filter(|e| e.pattern.is_match(element))
                    .collect();
                let Some(top) = candidates.iter().map(|e| e.priority).max() else {
                    return default
                        .map(|value| Resolved::from_default(value.clone()))
                        .ok_or_else(|| ResolveError::NoOverride {
                            element: element.to_owned(),
                        });
                };
                let mut tied = candidates.into_iter().filter(|e| e.priority == top);
                // `max` returned Some, so at least one entry carries `top`.
                let Some(winner) = tied.next() else {
                    return Err(ResolveError::NoOverride {
                        element: element.to_owned(),
                    });
                };
                if let Some(other) = tied.find(|e| e.value != winner.value) {
                    return Err(ResolveError::OverrideConflict {
                        element: element.to_owned(),
                        first: winner.pattern.as_str().to_owned(),
                        second: other.pattern.as_str().to_owned(),
                        priority: top,
                    });
                }
                Ok(Resolved {
                    value: winner.value.clone(),
                    source: ValueSource::Pattern(winner.pattern.as_str().to_owned()),
                })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Resolved values
// ---------------------------------------------------------------------------

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// The owning group's scalar value.
    Scalar,
    /// The override entry with this pattern.
    Pattern(String),
    /// No entry matched; the caller's default was used.
    Default,
}

/// A concrete value plus its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    /// Value that falls back to a default.
    pub const fn from_default(value: T) -> Self {
        Self {
            value,
            source: ValueSource::Default,
        }
    }

    /// Whether the value was set by the group rather than defaulted.
    pub const fn is_explicit(&self) -> bool {
        !matches!(self.source, ValueSource::Default)
    }
}

/// Element name → resolved value, in element order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMap<T> {
    entries: Vec<(String, Resolved<T>)>,
}

impl<T> Default for ResolvedMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> ResolvedMap<T> {
    pub fn get(&self, element: &str) -> Option<&Resolved<T>> {
        self.entries
            .iter()
            .find(|(name, _)| name == element)
            .map(|(_, r)| r)
    }

    /// Shortcut for the resolved value of `element`.
    pub fn value(&self, element: &str) -> Option<&T> {
        self.get(element).map(|r| &r.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Resolved<T>)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r))
    }

    /// Element names in resolution order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

// ---------------------------------------------------------------------------
// resolve
// ---------------------------------------------------------------------------

/// Resolution options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Fail on elements that no selector pattern matches instead of skipping
    /// them.
    pub strict_coverage: bool,
}

impl ResolveOptions {
    pub const STRICT: Self = Self {
        strict_coverage: true,
    };
    pub const LENIENT: Self = Self {
        strict_coverage: false,
    };
}

/// Expand `selector` over `element_names` and resolve `property` for every
/// selected element.
///
/// Output order follows `element_names`. An empty element list always yields
/// an empty map.
pub fn resolve<T, S>(
    element_names: &[S],
    selector: &Selector,
    property: &Override<T>,
    default: Option<&T>,
    options: ResolveOptions,
) -> Result<ResolvedMap<T>, ResolveError>
where
    T: Clone + PartialEq,
    S: AsRef<str>,
{
    let mut entries = Vec::with_capacity(element_names.len());
    let mut skipped = 0_usize;
    for name in element_names.iter().map(|n| n.as_ref()) {
        if !selector.matches(name) {
            if options.strict_coverage {
                return Err(ResolveError::UnmatchedElement {
                    element: name.to_owned(),
                });
            }
            skipped += 1;
            continue;
        }
        entries.push((name.to_owned(), property.resolve_one(name, default)?));
    }
    debug!(
        selected = entries.len(),
        skipped,
        patterns = selector.len(),
        "resolved override"
    );
    Ok(ResolvedMap { entries })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
