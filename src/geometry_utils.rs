/// Return the initial bearing (forward azimuth, in degrees clockwise from
/// geographic north) of the great-circle path from the previous position
/// to the current one, on a spherical earth.
///
/// The result is always in the range [0, 360). Identical positions yield 0,
/// which is why callers tracking stationary objects should not rely on this.
pub fn bearing(latitude: f64, longitude: f64, previous_latitude: f64, previous_longitude: f64) -> f64 {
    let phi1 = previous_latitude.to_radians();
    let phi2 = latitude.to_radians();
    let delta_lambda = (longitude - previous_longitude).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();
    let angle_deg = y.atan2(x).to_degrees();

    (angle_deg + 360.0) % 360.0
}

/// Same positions, bitwise. Coordinates from the feed are repeated verbatim
/// when an aircraft has not reported a new position.
pub fn same_position(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 == b.0 && a.1 == b.1
}
