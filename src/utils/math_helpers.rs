use crate::models::CentreOfMass;

/// Euclidean distance between two centres of mass.
#[inline]
pub fn distance(a: &impl CentreOfMass, b: &impl CentreOfMass) -> f64 {
    let (ax, ay) = a.com();
    let (bx, by) = b.com();
    ((bx - ax).powi(2) + (by - ay).powi(2)).sqrt()
}

/// Unit vector pointing from `a` to `b`. Not defined for coincident points;
/// callers cut forces off below `FORCE_THRESHOLD` before getting here.
#[inline]
pub fn unit_vector(a: &impl CentreOfMass, b: &impl CentreOfMass) -> (f64, f64) {
    let dist = distance(a, b);
    let (ax, ay) = a.com();
    let (bx, by) = b.com();
    ((bx - ax) / dist, (by - ay) / dist)
}
