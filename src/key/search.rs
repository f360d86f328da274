//! Numeric searches used to lay keys out along arcs.

use super::Key;
use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// A key tilted about X by `degrees` around a center `radius` above it.
///
/// Positive angles tip the key toward +Y and up the bowl.
pub fn bowl_key(radius: Real, degrees: Real) -> Key {
    Key::new().map_local(|t| t.translate_z(-radius).rotate_x(degrees).translate_z(radius))
}

/// Walks the bowl angle up in `step_degrees` increments until the key origin
/// has moved more than `distance` (straight line, not arc length) from where
/// it started. `up` chooses the direction of travel.
///
/// Returns `None` when the distance cannot be reached within half a turn.
pub fn find_rotated_key(distance: Real, radius: Real, up: bool, step_degrees: Real) -> Option<Key> {
    if step_degrees <= 0.0 || radius <= 0.0 {
        return None;
    }
    let direction = if up { 1.0 } else { -1.0 };
    let steps = step_count(180.0, step_degrees);
    (1..=steps).find_map(|k| {
        let degrees = step_degrees * k as Real;
        let key = bowl_key(radius, direction * degrees);
        let moved = key.transforms().origin().coords.norm();
        (moved > distance).then(|| {
            log::debug!("bowl radius {radius}: {distance} mm reached at {degrees:.3} degrees");
            key
        })
    })
}

/// Whole steps of size `step` that fit in `limit`, allowing for rounding in
/// the division.
fn step_count(limit: Real, step: Real) -> u64 {
    (limit / step + 1e-9).floor() as u64
}

/// Grows a radius from `start` along `to_center` in `step` increments until
/// the center is closer to `other` than to `start`.
///
/// Returns `None` if that does not happen before `max_radius`, which is the
/// case whenever `other` lies behind `start` relative to `to_center`.
pub fn find_radius(
    start: &Point3<Real>,
    to_center: &Vector3<Real>,
    other: &Point3<Real>,
    step: Real,
    max_radius: Real,
) -> Option<Real> {
    let dir = to_center.try_normalize(Real::EPSILON)?;
    if step <= 0.0 {
        return None;
    }
    (1..=step_count(max_radius, step)).map(|k| step * k as Real).find(|&r| {
        let center = start + dir * r;
        (center - start).norm() > (center - other).norm()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bowl_key_moves_on_a_circle() {
        let p = bowl_key(60.0, 17.0).transforms().origin();
        let chord = 2.0 * 60.0 * (8.5 as Real).to_radians().sin();
        assert_relative_eq!(p.coords.norm(), chord, epsilon = 1e-9);
        assert!(p.y > 0.0);
        assert!(bowl_key(60.0, -17.0).transforms().origin().y < 0.0);
    }

    #[test]
    fn unreachable_distance_gives_none() {
        assert!(find_rotated_key(130.0, 60.0, true, 0.5).is_none());
        assert!(find_rotated_key(10.0, 60.0, true, 0.0).is_none());
    }

    #[test]
    fn half_turn_is_the_last_step() {
        // Only the 180 degree step clears a distance this close to the diameter.
        let key = find_rotated_key(120.0 - 1e-6, 60.0, true, 0.1).unwrap();
        assert_relative_eq!(key.local_transforms.steps()[1].rx, 180.0, epsilon = 1e-9);
        assert_eq!(step_count(180.0, 0.1), 1800);
    }

    #[test]
    fn radius_between_two_points() {
        let start = Point3::new(0.0, 0.0, 0.0);
        let other = Point3::new(10.0, 0.0, 10.0);
        // Equidistant center on the z axis sits at z = 10.
        let r = find_radius(&start, &Vector3::z(), &other, 0.01, 100.0).unwrap();
        assert!((10.0..10.02).contains(&r));
        assert!(find_radius(&start, &Vector3::z(), &Point3::new(0.0, 0.0, -5.0), 0.01, 100.0).is_none());
    }
}
