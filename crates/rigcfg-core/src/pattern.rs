//! Compiled name patterns and ordered selectors.
//!
//! A [`Pattern`] always matches against the *whole* element name: the source
//! text is wrapped as `^(?:source)$` before compilation, so `".*_collision"`
//! and `"^.*_collision$"` select exactly the same elements.
//!
//! Each pattern carries a specificity score used as the default override
//! priority. The score is computed from the parsed expression and only counts
//! what every match must contain:
//!
//! - a literal character scores 2, a class or a single `.` scores 1;
//! - anchors, `?`, `*` and `{0,n}` repetitions score 0;
//! - `{m,n}` with `m > 0` scores `m` times its operand;
//! - an alternation scores one below its cheapest branch.
//!
//! | pattern                      | specificity |
//! |------------------------------|-------------|
//! | `.*`                         | 0           |
//! | `^A$`                        | 2           |
//! | `FL_foot\|FR_foot`           | 13          |
//! | `^FL_foot$`                  | 14          |
//! | `.*_collision`               | 20          |
//! | `.*_foot_collision`          | 30          |
//! | `^[FR][LR]_foot_collision$`  | 32          |

use std::fmt;

use regex::Regex;
use regex_syntax::hir::{Hir, HirKind};

use crate::error::ResolveError;

// ---------------------------------------------------------------------------
// Pattern
// ---------------------------------------------------------------------------

/// A full-match regular expression over element names.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
    specificity: i32,
}

impl Pattern {
    /// Compile `source` into a full-match pattern.
    pub fn new(source: impl Into<String>) -> Result<Self, ResolveError> {
        let source = source.into();
        let wrapped = format!("^(?:{source})$");
        let invalid = |message: String| ResolveError::InvalidPattern {
            pattern: source.clone(),
            message,
        };
        let regex = Regex::new(&wrapped).map_err(|e| invalid(e.to_string()))?;
        let hir = regex_syntax::parse(&wrapped).map_err(|e| invalid(e.to_string()))?;
        let specificity = i32::try_from(weight(&hir)).unwrap_or(i32::MAX);
        Ok(Self {
            source,
            regex,
            specificity,
        })
    }

    /// Whether `name` matches this pattern in full.
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// The pattern text as written by the caller.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Weighted count of what every match must contain.
    pub const fn specificity(&self) -> i32 {
        self.specificity
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl TryFrom<&str> for Pattern {
    type Error = ResolveError;

    fn try_from(source: &str) -> Result<Self, Self::Error> {
        Self::new(source)
    }
}

/// Weight of one required literal character.
const LITERAL_WEIGHT: u32 = 2;

/// Weight of one required class position, `.` included.
const CLASS_WEIGHT: u32 = 1;

/// Score what every match of `hir` must contain.
fn weight(hir: &Hir) -> u32 {
    match hir.kind() {
        HirKind::Empty | HirKind::Look(_) => 0,
        HirKind::Literal(literal) => {
            let chars = String::from_utf8_lossy(&literal.0).chars().count();
            u32::try_from(chars)
                .unwrap_or(u32::MAX)
                .saturating_mul(LITERAL_WEIGHT)
        }
        HirKind::Class(_) => CLASS_WEIGHT,
        // `?`, `*` and `{0,n}` have `min == 0` and require nothing.
        HirKind::Repetition(rep) => rep.min.saturating_mul(weight(&rep.sub)),
        HirKind::Capture(capture) => weight(&capture.sub),
        HirKind::Concat(subs) => subs.iter().map(weight).fold(0, u32::saturating_add),
        // One below the cheapest branch, as a class sits one below a literal.
        HirKind::Alternation(subs) => subs
            .iter()
            .map(weight)
            .min()
            .unwrap_or(0)
            .saturating_sub(CLASS_WEIGHT),
    }
}

// ---------------------------------------------------------------------------
// Selector
// ---------------------------------------------------------------------------

/// Ordered collection of patterns owned by one configuration group.
///
/// Duplicate pattern strings are dropped, keeping the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    patterns: Vec<Pattern>,
}

impl Selector {
    /// Compile every source string, in order.
    pub fn new<I, S>(sources: I) -> Result<Self, ResolveError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut patterns: Vec<Pattern> = Vec::new();
        for source in sources {
            let pattern = Pattern::new(source.as_ref())?;
            if !patterns.contains(&pattern) {
                patterns.push(pattern);
            }
        }
        Ok(Self { patterns })
    }

    /// Patterns in declaration order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether any pattern matches `name`.
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(name))
    }

    /// Elements of `names` selected by this selector, preserving order.
    pub fn select<'a, S: AsRef<str>>(&self, names: &'a [S]) -> Vec<&'a str> {
        names
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| self.matches(name))
            .collect()
    }

    /// Pattern source strings, in order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Pattern::as_str)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
