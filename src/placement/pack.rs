//! Circle packing inside a unit circle.
//!
//! Circles are packed with the front-chain algorithm (Wang et al., "Visualization
//! of large hierarchical data by circle packing"): each new circle is placed
//! tangent to two adjacent circles of the current front chain, and the chain is
//! repaired whenever the candidate would intersect a circle further along it.
//! The smallest enclosing circle of the result is then found with Welzl's
//! algorithm (adapted to circles), and everything is scaled so that enclosing
//! circle becomes the unit circle centred on the origin.
//!
//! Output circles are tangent or disjoint, and all lie inside the unit circle.

use super::geometry::Circle;
use crate::core::DeckRng;

/// Overlap tolerated when testing front-chain intersection.
const INTERSECT_EPSILON: f64 = 1e-6;

/// Pack circles of the given radii into the unit circle.
///
/// Returns one circle per input radius, in input order, with centres and
/// radii normalized to the unit circle. Radii are relative: only their
/// ratios matter. The RNG only shuffles the enclosing-circle search.
#[must_use]
pub fn pack(radii: &[f64], rng: &mut DeckRng) -> Vec<Circle> {
    let mut circles: Vec<Circle> = radii.iter().map(|&r| Circle::new(0.0, 0.0, r)).collect();
    if circles.is_empty() {
        return circles;
    }

    front_chain(&mut circles);

    let mut shuffled = circles.clone();
    rng.shuffle(&mut shuffled);
    let enclosing = enclose(&shuffled).unwrap_or_else(|| bounding_circle(&circles));

    for c in &mut circles {
        c.x = (c.x - enclosing.x) / enclosing.r;
        c.y = (c.y - enclosing.y) / enclosing.r;
        c.r /= enclosing.r;
    }
    circles
}

/// Lay circles out tangent to each other around the origin.
fn front_chain(circles: &mut [Circle]) {
    let n = circles.len();
    if n < 2 {
        return;
    }

    circles[0].x = -circles[1].r;
    circles[1].x = circles[0].r;
    if n < 3 {
        return;
    }

    let (x, y) = place(&circles[1], &circles[0], circles[2].r);
    circles[2].x = x;
    circles[2].y = y;

    // Doubly linked front chain over circle indices.
    let mut next = vec![0usize; n];
    let mut prev = vec![0usize; n];
    next[0] = 1;
    next[1] = 2;
    next[2] = 0;
    prev[0] = 2;
    prev[1] = 0;
    prev[2] = 1;

    let (mut a, mut b) = (0usize, 1usize);
    let mut i = 3;

    'pack: while i < n {
        let (x, y) = place(&circles[a], &circles[b], circles[i].r);
        circles[i].x = x;
        circles[i].y = y;

        // Find the closest intersecting circle on the front chain, measured by
        // linear distance along the chain in either direction.
        let mut j = next[b];
        let mut k = prev[a];
        let mut sj = circles[b].r;
        let mut sk = circles[a].r;
        loop {
            if sj <= sk {
                if intersects(&circles[j], &circles[i]) {
                    b = j;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sj += circles[j].r;
                j = next[j];
            } else {
                if intersects(&circles[k], &circles[i]) {
                    a = k;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sk += circles[k].r;
                k = prev[k];
            }
            if j == next[k] {
                break;
            }
        }

        // Insert i between a and b.
        prev[i] = a;
        next[i] = b;
        next[a] = i;
        prev[b] = i;

        // Restart from the adjacent pair closest to the origin.
        let mut best = score(circles, &next, a);
        let mut c = next[i];
        while c != i {
            let s = score(circles, &next, c);
            if s < best {
                a = c;
                best = s;
            }
            c = next[c];
        }
        b = next[a];
        i += 1;
    }
}

/// Centre of a circle of radius `r` tangent to both `b` and `a`.
fn place(b: &Circle, a: &Circle, r: f64) -> (f64, f64) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let d2 = dx * dx + dy * dy;
    if d2 <= 0.0 {
        return (a.x + r, a.y);
    }

    let a2 = (a.r + r) * (a.r + r);
    let b2 = (b.r + r) * (b.r + r);
    if a2 > b2 {
        let x = (d2 + b2 - a2) / (2.0 * d2);
        let y = (b2 / d2 - x * x).max(0.0).sqrt();
        (b.x - x * dx - y * dy, b.y - x * dy + y * dx)
    } else {
        let x = (d2 + a2 - b2) / (2.0 * d2);
        let y = (a2 / d2 - x * x).max(0.0).sqrt();
        (a.x + x * dx - y * dy, a.y + x * dy + y * dx)
    }
}

fn intersects(a: &Circle, b: &Circle) -> bool {
    let dr = a.r + b.r - INTERSECT_EPSILON;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

/// Squared distance from the origin to the weighted midpoint of a chain link.
fn score(circles: &[Circle], next: &[usize], node: usize) -> f64 {
    let a = &circles[node];
    let b = &circles[next[node]];
    let ab = a.r + b.r;
    let dx = (a.x * b.r + b.x * a.r) / ab;
    let dy = (a.y * b.r + b.y * a.r) / ab;
    dx * dx + dy * dy
}

// =============================================================================
// Smallest enclosing circle
// =============================================================================

/// Smallest circle enclosing every input circle.
///
/// Returns `None` if the search degenerates numerically; callers fall back
/// to [`bounding_circle`].
fn enclose(circles: &[Circle]) -> Option<Circle> {
    let mut basis: Vec<Circle> = Vec::new();
    let mut e: Option<Circle> = None;
    let mut i = 0;
    let mut steps = 0usize;
    let step_limit = 64 * (circles.len() + 1) * (circles.len() + 1);

    while i < circles.len() {
        steps += 1;
        if steps > step_limit {
            return None;
        }
        let p = circles[i];
        if e.is_some_and(|e| encloses_weak(&e, &p)) {
            i += 1;
        } else {
            basis = extend_basis(&basis, p)?;
            let candidate = enclose_basis(&basis)?;
            if !(candidate.x.is_finite() && candidate.y.is_finite() && candidate.r.is_finite()) {
                return None;
            }
            e = Some(candidate);
            i = 0;
        }
    }
    e
}

/// Circle centred on the mean centre that reaches every input circle.
fn bounding_circle(circles: &[Circle]) -> Circle {
    let n = circles.len().max(1) as f64;
    let cx = circles.iter().map(|c| c.x).sum::<f64>() / n;
    let cy = circles.iter().map(|c| c.y).sum::<f64>() / n;
    let center = Circle::new(cx, cy, 0.0);
    let r = circles
        .iter()
        .map(|c| center.distance(c) + c.r)
        .fold(0.0, f64::max);
    Circle::new(cx, cy, r)
}

fn extend_basis(basis: &[Circle], p: Circle) -> Option<Vec<Circle>> {
    if encloses_weak_all(&p, basis) {
        return Some(vec![p]);
    }

    for bi in basis {
        if encloses_not(&p, bi) && encloses_weak_all(&enclose_basis2(bi, &p), basis) {
            return Some(vec![*bi, p]);
        }
    }

    for (i, bi) in basis.iter().enumerate() {
        for bj in &basis[i + 1..] {
            if encloses_not(&enclose_basis2(bi, bj), &p)
                && encloses_not(&enclose_basis2(bi, &p), bj)
                && encloses_not(&enclose_basis2(bj, &p), bi)
                && encloses_weak_all(&enclose_basis3(bi, bj, &p), basis)
            {
                return Some(vec![*bi, *bj, p]);
            }
        }
    }

    None
}

fn encloses_not(a: &Circle, b: &Circle) -> bool {
    let dr = a.r - b.r;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr < 0.0 || dr * dr < dx * dx + dy * dy
}

fn encloses_weak(a: &Circle, b: &Circle) -> bool {
    let dr = a.r - b.r + a.r.max(b.r).max(1.0) * 1e-9;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn encloses_weak_all(a: &Circle, basis: &[Circle]) -> bool {
    basis.iter().all(|b| encloses_weak(a, b))
}

fn enclose_basis(basis: &[Circle]) -> Option<Circle> {
    match basis {
        [a] => Some(*a),
        [a, b] => Some(enclose_basis2(a, b)),
        [a, b, c] => Some(enclose_basis3(a, b, c)),
        _ => None,
    }
}

fn enclose_basis2(a: &Circle, b: &Circle) -> Circle {
    let x21 = b.x - a.x;
    let y21 = b.y - a.y;
    let r21 = b.r - a.r;
    let l = x21.hypot(y21);
    if l == 0.0 {
        return if a.r >= b.r { *a } else { *b };
    }
    Circle::new(
        (a.x + b.x + x21 / l * r21) / 2.0,
        (a.y + b.y + y21 / l * r21) / 2.0,
        (l + a.r + b.r) / 2.0,
    )
}

fn enclose_basis3(a: &Circle, b: &Circle, c: &Circle) -> Circle {
    let (x1, y1, r1) = (a.x, a.y, a.r);
    let (x2, y2, r2) = (b.x, b.y, b.r);
    let (x3, y3, r3) = (c.x, c.y, c.r);

    let a2 = x1 - x2;
    let a3 = x1 - x3;
    let b2 = y1 - y2;
    let b3 = y1 - y3;
    let c2 = r2 - r1;
    let c3 = r3 - r1;
    let d1 = x1 * x1 + y1 * y1 - r1 * r1;
    let d2 = d1 - x2 * x2 - y2 * y2 + r2 * r2;
    let d3 = d1 - x3 * x3 - y3 * y3 + r3 * r3;
    let ab = a3 * b2 - a2 * b3;
    let xa = (b2 * d3 - b3 * d2) / (ab * 2.0) - x1;
    let xb = (b3 * c2 - b2 * c3) / ab;
    let ya = (a3 * d2 - a2 * d3) / (ab * 2.0) - y1;
    let yb = (a2 * c3 - a3 * c2) / ab;
    let qa = xb * xb + yb * yb - 1.0;
    let qb = 2.0 * (r1 + xa * xb + ya * yb);
    let qc = xa * xa + ya * ya - r1 * r1;
    let r = -(if qa.abs() > 1e-6 {
        (qb + (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa)
    } else {
        qc / qb
    });

    Circle::new(x1 + xa + xb * r, y1 + ya + yb * r, r)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-6;

    fn assert_packed(circles: &[Circle]) {
        for (i, a) in circles.iter().enumerate() {
            assert!(
                a.x.hypot(a.y) + a.r <= 1.0 + TOLERANCE,
                "circle {} escapes the unit circle: {:?}",
                i,
                a
            );
            for b in &circles[i + 1..] {
                assert!(
                    a.distance(b) >= a.r + b.r - TOLERANCE,
                    "circles overlap: {:?} {:?}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_single_circle_fills_unit_circle() {
        let mut rng = DeckRng::new(1);
        let circles = pack(&[3.0], &mut rng);

        assert_eq!(circles.len(), 1);
        assert!(circles[0].x.abs() < TOLERANCE);
        assert!(circles[0].y.abs() < TOLERANCE);
        assert!((circles[0].r - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_two_equal_circles() {
        let mut rng = DeckRng::new(1);
        let circles = pack(&[1.0, 1.0], &mut rng);

        assert_packed(&circles);
        assert!((circles[0].r - 0.5).abs() < TOLERANCE);
        assert!((circles[0].distance(&circles[1]) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_keeps_input_order_and_ratios() {
        let mut rng = DeckRng::new(9);
        let radii = [2.0, 1.5, 1.0, 1.0];
        let circles = pack(&radii, &mut rng);

        assert_eq!(circles.len(), 4);
        let scale = circles[0].r / radii[0];
        for (c, r) in circles.iter().zip(radii) {
            assert!((c.r - r * scale).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_many_circles_do_not_overlap() {
        let mut rng = DeckRng::new(42);
        let radii: Vec<f64> = [4.0, 4.0, 3.0, 3.0, 2.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0, 1.0]
            .iter()
            .map(|w: &f64| w.sqrt())
            .collect();
        let circles = pack(&radii, &mut rng);

        assert_eq!(circles.len(), radii.len());
        assert_packed(&circles);
    }

    #[test]
    fn test_empty_input() {
        let mut rng = DeckRng::new(0);
        assert!(pack(&[], &mut rng).is_empty());
    }

    #[test]
    fn test_enclose_two_circles() {
        let e = enclose(&[Circle::new(-1.0, 0.0, 1.0), Circle::new(2.0, 0.0, 2.0)]).unwrap();
        assert!((e.x - 1.0).abs() < TOLERANCE);
        assert!(e.y.abs() < TOLERANCE);
        assert!((e.r - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_bounding_circle_encloses() {
        let circles = [Circle::new(0.0, 0.0, 1.0), Circle::new(4.0, 0.0, 1.0)];
        let b = bounding_circle(&circles);
        for c in &circles {
            assert!(b.distance(c) + c.r <= b.r + TOLERANCE);
        }
    }
}
