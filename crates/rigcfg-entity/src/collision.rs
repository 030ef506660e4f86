//! Collision groups: contact properties for the geometries a selector matches.
//!
//! Every property is optional and may be a scalar or a pattern-keyed
//! [`Override`]. Properties a group leaves unset, and patterned properties
//! with no entry for a geometry, resolve to the simulator defaults in
//! [`CollisionDefaults`], so each selected geometry ends up with a complete
//! set of values.

use rigcfg_core::{AssemblyError, Override, Resolved, ResolveError, ResolveOptions, Selector};

/// Valid contact dimensionalities.
pub const VALID_CONDIM: [i32; 4] = [1, 3, 4, 6];

// ---------------------------------------------------------------------------
// CollisionDefaults
// ---------------------------------------------------------------------------

/// Simulator defaults for geometry contact properties.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionDefaults {
    pub contype: i32,
    pub conaffinity: i32,
    pub condim: i32,
    pub priority: i32,
    /// `[sliding, torsional, rolling]`.
    pub friction: Vec<f64>,
    /// `[timeconst, dampratio]`.
    pub solref: Vec<f64>,
    /// `[d0, d_width, width, midpoint, power]`.
    pub solimp: Vec<f64>,
    pub margin: f64,
    pub gap: f64,
}

impl Default for CollisionDefaults {
    fn default() -> Self {
        Self {
            contype: 1,
            conaffinity: 1,
            condim: 3,
            priority: 0,
            friction: vec![1.0, 0.005, 0.0001],
            solref: vec![0.02, 1.0],
            solimp: vec![0.9, 0.95, 0.001, 0.5, 2.0],
            margin: 0.0,
            gap: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// CollisionGroup
// ---------------------------------------------------------------------------

/// Contact configuration for the geometries matched by `geoms`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollisionGroup {
    /// Geometry name patterns.
    pub geoms: Selector,
    pub contype: Option<Override<i32>>,
    pub conaffinity: Option<Override<i32>>,
    pub condim: Option<Override<i32>>,
    pub priority: Option<Override<i32>>,
    pub friction: Option<Override<Vec<f64>>>,
    pub solref: Option<Override<Vec<f64>>>,
    pub solimp: Option<Override<Vec<f64>>>,
    pub margin: Option<Override<f64>>,
    pub gap: Option<Override<f64>>,
    /// Switch off collisions for every geometry this group does not select.
    pub disable_other_geoms: bool,
}

impl CollisionGroup {
    pub fn new(geoms: Selector) -> Self {
        Self {
            geoms,
            disable_other_geoms: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_contype(mut self, v: impl Into<Override<i32>>) -> Self {
        self.contype = Some(v.into());
        self
    }

    #[must_use]
    pub fn with_conaffinity(mut self, v: impl Into<Override<i32>>) -> Self {
        self.conaffinity = Some(v.into());
        self
    }

    #[must_use]
    pub fn with_condim(mut self, v: impl Into<Override<i32>>) -> Self {
        self.condim = Some(v.into());
        self
    }

    #[must_use]
    pub fn with_priority(mut self, v: impl Into<Override<i32>>) -> Self {
        self.priority = Some(v.into());
        self
    }

    #[must_use]
    pub fn with_friction(mut self, v: impl Into<Override<Vec<f64>>>) -> Self {
        self.friction = Some(v.into());
        self
    }

    #[must_use]
    pub fn with_solref(mut self, v: impl Into<Override<Vec<f64>>>) -> Self {
        self.solref = Some(v.into());
        self
    }

    #[must_use]
    pub fn with_solimp(mut self, v: impl Into<Override<Vec<f64>>>) -> Self {
        self.solimp = Some(v.into());
        self
    }

    #[must_use]
    pub fn with_margin(mut self, v: impl Into<Override<f64>>) -> Self {
        self.margin = Some(v.into());
        self
    }

    #[must_use]
    pub fn with_gap(mut self, v: impl Into<Override<f64>>) -> Self {
        self.gap = Some(v.into());
        self
    }

    #[must_use]
    pub const fn with_disable_other_geoms(mut self, disable: bool) -> Self {
        self.disable_other_geoms = disable;
        self
    }

    /// Check every value any override can produce.
    pub fn validate(&self) -> Result<(), AssemblyError> {
        if self.geoms.is_empty() {
            return Err(invalid("geoms", "selector has no patterns".into()));
        }
        for &condim in values(self.condim.as_ref()) {
            if !VALID_CONDIM.contains(&condim) {
                return Err(invalid(
                    "condim",
                    format!("{condim} not in {VALID_CONDIM:?}"),
                ));
            }
        }
        for &mask in values(self.contype.as_ref())
            .chain(values(self.conaffinity.as_ref()))
        {
            if mask < 0 {
                return Err(invalid("contype/conaffinity", format!("{mask} is negative")));
            }
        }
        check_vectors("friction", self.friction.as_ref(), 1..=3)?;
        check_vectors("solref", self.solref.as_ref(), 2..=2)?;
        check_vectors("solimp", self.solimp.as_ref(), 3..=5)?;
        for &v in values(self.margin.as_ref()).chain(values(self.gap.as_ref())) {
            if !(v.is_finite() && v >= 0.0) {
                return Err(invalid("margin/gap", format!("{v} must be finite and >= 0")));
            }
        }
        Ok(())
    }

    /// Resolve this group against `geom_names`.
    ///
    /// Strict coverage only applies to geometries the group would otherwise
    /// leave untouched, i.e. when `disable_other_geoms` is unset.
    pub fn resolve<S: AsRef<str>>(
        &self,
        geom_names: &[S],
        defaults: &CollisionDefaults,
        options: ResolveOptions,
    ) -> Result<CollisionResolution, ResolveError> {
        let mut out = CollisionResolution::default();
        for name in geom_names.iter().map(|n| n.as_ref()) {
            if !self.geoms.matches(name) {
                if self.disable_other_geoms {
                    out.disabled.push(name.to_owned());
                } else if options.strict_coverage {
                    return Err(ResolveError::UnmatchedElement {
                        element: name.to_owned(),
                    });
                }
                continue;
            }
            out.selected.push(ResolvedGeom {
                name: name.to_owned(),
                contype: property(self.contype.as_ref(), name, &defaults.contype)?,
                conaffinity: property(self.conaffinity.as_ref(), name, &defaults.conaffinity)?,
                condim: property(self.condim.as_ref(), name, &defaults.condim)?,
                priority: property(self.priority.as_ref(), name, &defaults.priority)?,
                friction: property(self.friction.as_ref(), name, &defaults.friction)?,
                solref: property(self.solref.as_ref(), name, &defaults.solref)?,
                solimp: property(self.solimp.as_ref(), name, &defaults.solimp)?,
                margin: property(self.margin.as_ref(), name, &defaults.margin)?,
                gap: property(self.gap.as_ref(), name, &defaults.gap)?,
            });
        }
        Ok(out)
    }
}

fn property<T: Clone + PartialEq>(
    prop: Option<&Override<T>>,
    name: &str,
    default: &T,
) -> Result<Resolved<T>, ResolveError> {
    match prop {
        Some(o) => o.resolve_one(name, Some(default)),
        None => Ok(Resolved::from_default(default.clone())),
    }
}

fn values<T>(prop: Option<&Override<T>>) -> impl Iterator<Item = &T> {
    prop.map(Override::values).unwrap_or_default().into_iter()
}

fn check_vectors(
    field: &'static str,
    prop: Option<&Override<Vec<f64>>>,
    len: std::ops::RangeInclusive<usize>,
) -> Result<(), AssemblyError> {
    for v in values(prop) {
        if !len.contains(&v.len()) {
            return Err(invalid(
                field,
                format!("expected {}..={} values, got {}", len.start(), len.end(), v.len()),
            ));
        }
        if v.iter().any(|x| !x.is_finite()) {
            return Err(invalid(field, "values must be finite".into()));
        }
    }
    Ok(())
}

const fn invalid(field: &'static str, message: String) -> AssemblyError {
    AssemblyError::InvalidCollisionValue { field, message }
}

// ---------------------------------------------------------------------------
// Resolution output
// ---------------------------------------------------------------------------

/// Fully resolved contact properties of one geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGeom {
    pub name: String,
    pub contype: Resolved<i32>,
    pub conaffinity: Resolved<i32>,
    pub condim: Resolved<i32>,
    pub priority: Resolved<i32>,
    pub friction: Resolved<Vec<f64>>,
    pub solref: Resolved<Vec<f64>>,
    pub solimp: Resolved<Vec<f64>>,
    pub margin: Resolved<f64>,
    pub gap: Resolved<f64>,
}

/// Result of applying one collision group to a geometry list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionResolution {
    /// Geometries the group selects, in model order.
    pub selected: Vec<ResolvedGeom>,
    /// Geometries whose collisions are switched off (`contype = conaffinity = 0`).
    pub disabled: Vec<String>,
}

impl CollisionResolution {
    pub fn geom(&self, name: &str) -> Option<&ResolvedGeom> {
        self.selected.iter().find(|g| g.name == name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const FOOT: &str = "^[FR][LR]_foot_collision$";

    const GEOMS: [&str; 5] = [
        "trunk_collision",
        "FL_calf_collision",
        "FL_foot_collision",
        "RR_foot_collision",
        "FL_hip_visual",
    ];

    fn full() -> CollisionGroup {
        CollisionGroup::new(Selector::new([".*_collision"]).unwrap())
            .with_condim(Override::patterned([(FOOT, 3), (".*_collision", 1)]).unwrap())
            .with_priority(Override::patterned([(FOOT, 1)]).unwrap())
            .with_friction(Override::patterned([(FOOT, vec![0.6])]).unwrap())
            .with_solimp(Override::patterned([(FOOT, vec![0.9, 0.95, 0.023])]).unwrap())
            .with_contype(1)
            .with_conaffinity(0)
    }

    #[test]
    fn defaults_match_simulator() {
        let d = CollisionDefaults::default();
        assert_eq!(d.condim, 3);
        assert_eq!(d.priority, 0);
        assert_eq!(d.friction, vec![1.0, 0.005, 0.0001]);
        assert_eq!(d.solimp.len(), 5);
    }

    #[test]
    fn new_disables_other_geoms() {
        let g = CollisionGroup::new(Selector::new(["a"]).unwrap());
        assert!(g.disable_other_geoms);
        assert!(g.condim.is_none());
    }

    #[test]
    fn foot_overrides_and_catch_all() {
        let res = full()
            .resolve(&GEOMS, &CollisionDefaults::default(), ResolveOptions::LENIENT)
            .unwrap();
        let foot = res.geom("FL_foot_collision").unwrap();
        assert_eq!(foot.condim.value, 3);
        assert_eq!(foot.priority.value, 1);
        assert!(foot.priority.is_explicit());
        assert_eq!(foot.friction.value, vec![0.6]);
        assert_eq!(foot.solimp.value, vec![0.9, 0.95, 0.023]);

        let calf = res.geom("FL_calf_collision").unwrap();
        assert_eq!(calf.condim.value, 1);
        assert_eq!(calf.priority.value, 0);
        assert!(!calf.priority.is_explicit());
        assert_eq!(calf.friction.value, vec![1.0, 0.005, 0.0001]);
        assert_eq!(calf.contype.value, 1);
        assert_eq!(calf.conaffinity.value, 0);
    }

    #[test]
    fn unselected_geoms_are_disabled() {
        let res = full()
            .resolve(&GEOMS, &CollisionDefaults::default(), ResolveOptions::STRICT)
            .unwrap();
        assert_eq!(res.selected.len(), 4);
        assert_eq!(res.disabled, vec!["FL_hip_visual"]);
    }

    #[test]
    fn strict_coverage_without_disabling() {
        let group = full().with_disable_other_geoms(false);
        let err = group
            .resolve(&GEOMS, &CollisionDefaults::default(), ResolveOptions::STRICT)
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnmatchedElement {
                element: "FL_hip_visual".into()
            }
        );
        let res = group
            .resolve(&GEOMS, &CollisionDefaults::default(), ResolveOptions::LENIENT)
            .unwrap();
        assert!(res.disabled.is_empty());
    }

    #[test]
    fn conflicting_overrides_surface() {
        let group = CollisionGroup::new(Selector::new([".*"]).unwrap())
            .with_condim(Override::patterned([("FL_.*", 1), (".*ion", 3)]).unwrap());
        let err = group
            .resolve(&GEOMS, &CollisionDefaults::default(), ResolveOptions::LENIENT)
            .unwrap_err();
        assert!(matches!(err, ResolveError::OverrideConflict { .. }));
    }

    #[test]
    fn validate_accepts_go2_style_group() {
        assert!(full().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let base = || CollisionGroup::new(Selector::new(["a"]).unwrap());
        assert!(matches!(
            base().with_condim(2).validate(),
            Err(AssemblyError::InvalidCollisionValue { field: "condim", .. })
        ));
        assert!(matches!(
            base().with_friction(vec![1.0, 0.1, 0.1, 0.1]).validate(),
            Err(AssemblyError::InvalidCollisionValue { field: "friction", .. })
        ));
        assert!(matches!(
            base().with_solimp(vec![0.9, 0.95]).validate(),
            Err(AssemblyError::InvalidCollisionValue { field: "solimp", .. })
        ));
        assert!(matches!(
            base().with_solref(vec![0.02]).validate(),
            Err(AssemblyError::InvalidCollisionValue { field: "solref", .. })
        ));
        assert!(matches!(
            base().with_margin(-0.1).validate(),
            Err(AssemblyError::InvalidCollisionValue { field: "margin/gap", .. })
        ));
        assert!(matches!(
            base().with_contype(-1).validate(),
            Err(AssemblyError::InvalidCollisionValue { .. })
        ));
        assert!(matches!(
            CollisionGroup::default().validate(),
            Err(AssemblyError::InvalidCollisionValue { field: "geoms", .. })
        ));
    }

    #[test]
    fn empty_geom_list() {
        let empty: [&str; 0] = [];
        let res = full()
            .resolve(&empty, &CollisionDefaults::default(), ResolveOptions::STRICT)
            .unwrap();
        assert!(res.selected.is_empty());
        assert!(res.disabled.is_empty());
    }
}
