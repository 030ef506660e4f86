//! Element name fixtures.

/// Leg prefixes in model order.
pub const LEGS: [&str; 4] = ["FL", "FR", "RL", "RR"];

/// The twelve Go2 joints, leg by leg, hip → thigh → calf.
pub fn go2_joint_names() -> Vec<String> {
    LEGS.iter()
        .flat_map(|leg| {
            ["hip", "thigh", "calf"]
                .into_iter()
                .map(move |part| format!("{leg}_{part}_joint"))
        })
        .collect()
}

/// Go2 geometries: base collision, per-leg collision shapes, and a few
/// visual meshes that no collision pattern should select.
pub fn go2_geom_names() -> Vec<String> {
    let mut names = vec!["base_visual".to_owned(), "base_collision".to_owned()];
    for leg in LEGS {
        names.push(format!("{leg}_hip_visual"));
        for part in ["hip", "thigh", "calf", "foot"] {
            names.push(format!("{leg}_{part}_collision"));
        }
    }
    names
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
