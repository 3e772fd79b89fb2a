//! Vector and rotation helpers on top of glam with explicit degenerate handling.

pub use glam::{Quat, Vec3};

/// Squared sine of the angle below which two directions count as parallel.
pub const PARALLEL_EPSILON: f32 = 1e-10;

/// `v` divided by its largest absolute component, or `None` when `v` is zero
/// or not finite.
///
/// The result has components in `[-1, 1]`, so squaring it can neither
/// overflow for huge inputs nor flush to zero for tiny ones.
#[inline]
fn rescaled(v: Vec3) -> Option<(Vec3, f32)> {
    let scale = v.abs().max_element();
    (scale > 0.0 && scale.is_finite()).then(|| (v / scale, scale))
}

/// Normalize `v`, or `None` when it has no direction (zero or not finite).
///
/// Works at any scale: a bone of 1e-6 units and a target 1e20 units away
/// both get their true direction.
#[inline]
pub fn try_direction(v: Vec3) -> Option<Vec3> {
    rescaled(v).map(|(unit_box, _)| unit_box / unit_box.length())
}

/// Normalize `v`, substituting `fallback` when `v` has no direction.
///
/// `fallback` is expected to be a unit vector already.
#[inline]
pub fn direction_or(v: Vec3, fallback: Vec3) -> Vec3 {
    try_direction(v).unwrap_or(fallback)
}

/// Length of `v` without overflow for components past `sqrt(f32::MAX)`.
#[inline]
pub fn scaled_length(v: Vec3) -> f32 {
    rescaled(v).map_or(v.length(), |(unit_box, scale)| unit_box.length() * scale)
}

/// Shortest-arc rotation carrying the direction of `from` onto the direction of `to`.
///
/// Neither input needs to be normalized. Returns identity when either input
/// is degenerate. Antiparallel inputs yield a half turn about an arbitrary
/// perpendicular axis.
pub fn from_to_rotation(from: Vec3, to: Vec3) -> Quat {
    match (try_direction(from), try_direction(to)) {
        (Some(from), Some(to)) => Quat::from_rotation_arc(from, to),
        _ => Quat::IDENTITY,
    }
}

/// Component of `v` orthogonal to the unit vector `axis`, normalized.
///
/// Gram-Schmidt step of an ortho-normalization against `axis`. `None` when
/// `v` is zero or within [`PARALLEL_EPSILON`] of parallel to `axis`; the test
/// is on the angle, so it does not depend on the length of `v`.
pub fn reject_from_axis(v: Vec3, axis: Vec3) -> Option<Vec3> {
    let dir = try_direction(v)?;
    let rejected = dir - axis * dir.dot(axis);
    (rejected.length_squared() > PARALLEL_EPSILON).then(|| rejected.normalize())
}

/// Signed angle in radians turning `from` onto `to` about `axis`.
///
/// Both vectors are assumed orthogonal to `axis`; the sign follows the right-hand rule.
pub fn signed_angle_about(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    axis.dot(from.cross(to)).atan2(from.dot(to))
}

/// Approximate equality for glam types
pub trait ApproxEq {
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl ApproxEq for Vec3 {
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.distance(*other) <= epsilon
    }
}

impl ApproxEq for Quat {
    /// `q` and `-q` describe the same rotation, so compare by |dot|.
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        1.0 - self.dot(*other).abs() <= epsilon
    }
}
