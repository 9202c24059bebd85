use nalgebra::geometry::Point3;
use nalgebra::Vector3;
use std::f64::consts::TAU;

/// Rotate `p` counter-clockwise about the z axis by `angle` radians
pub fn rotate_z(p: &Point3<f64>, angle: f64) -> Point3<f64> {
    let (s, c) = angle.sin_cos();
    Point3::new(p.x * c - p.y * s, p.y * c + p.x * s, p.z)
}

/// Reflect `p` across the yz plane
pub fn mirror_x(p: &Point3<f64>) -> Point3<f64> {
    Point3::new(-p.x, p.y, p.z)
}

/// A circle in 3D, in the plane through `center` perpendicular to `normal`
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Point3<f64>,
    pub radius: f64,
    pub normal: Vector3<f64>,
}

impl Circle {
    /// The circle through three points, oriented so that it runs `p0` -> `p1` -> `p2`.
    /// Returns None if the points are (nearly) collinear.
    pub fn through(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Option<Circle> {
        let a = p0 - p2;
        let b = p1 - p2;
        let axb = a.cross(&b);
        let axb_sq = axb.norm_squared();
        if axb_sq <= f64::EPSILON * a.norm_squared() * b.norm_squared() {
            return None;
        }
        let offset = (b * a.norm_squared() - a * b.norm_squared()).cross(&axb) / (2.0 * axb_sq);
        let center = *p2 + offset;
        let normal = (p1 - p0).cross(&(p2 - p1)).normalize();
        Some(Circle {
            center,
            radius: offset.norm(),
            normal,
        })
    }

    /// Angle of `p` around the circle, in [0, 2pi), measured from `from`
    fn angle_of(&self, from: &Point3<f64>, p: &Point3<f64>) -> f64 {
        let u = (from - self.center).normalize();
        let v = self.normal.cross(&u);
        let d = p - self.center;
        d.dot(&v).atan2(d.dot(&u)).rem_euclid(TAU)
    }

    fn point_at(&self, from: &Point3<f64>, angle: f64) -> Point3<f64> {
        let u = (from - self.center).normalize();
        let v = self.normal.cross(&u);
        self.center + (u * angle.cos() + v * angle.sin()) * self.radius
    }
}

/// Sample the arc from `start` to `end` through `through` with `segments` straight pieces
pub fn arc_points(
    start: &Point3<f64>,
    end: &Point3<f64>,
    through: &Point3<f64>,
    segments: usize,
) -> Option<Vec<Point3<f64>>> {
    let circle = Circle::through(start, through, end)?;
    let sweep = circle.angle_of(start, end);
    let segments = segments.max(1);
    let mut points: Vec<Point3<f64>> = (0..segments)
        .map(|i| circle.point_at(start, sweep * i as f64 / segments as f64))
        .collect();
    // Hit the end exactly, so joined curves meet
    points.push(*end);
    Some(points)
}

/// Closed polyline around a circle in the xy plane, starting and ending on +x
pub fn circle_points(center: &Point3<f64>, radius: f64, segments: usize) -> Vec<Point3<f64>> {
    let segments = segments.max(3);
    let mut points: Vec<Point3<f64>> = (0..segments)
        .map(|i| {
            let angle = TAU * i as f64 / segments as f64;
            *center + Vector3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
        })
        .collect();
    points.push(points[0]);
    points
}

/// Uniform Catmull-Rom spline through `points`, with `per_span` pieces between each pair
pub fn catmull_rom(points: &[Point3<f64>], per_span: usize) -> Vec<Point3<f64>> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let per_span = per_span.max(1);
    let n = points.len();
    // Extend the ends linearly so the curve reaches the first and last point
    let before = points[0] + (points[0] - points[1]);
    let after = points[n - 1] + (points[n - 1] - points[n - 2]);
    let at = |i: isize| -> Point3<f64> {
        if i < 0 {
            before
        } else if i as usize >= n {
            after
        } else {
            points[i as usize]
        }
    };

    let mut out = Vec::with_capacity((n - 1) * per_span + 1);
    for i in 0..(n - 1) as isize {
        let (p0, p1, p2, p3) = (at(i - 1).coords, at(i).coords, at(i + 1).coords, at(i + 2).coords);
        for step in 0..per_span {
            let t = step as f64 / per_span as f64;
            let t2 = t * t;
            let t3 = t2 * t;
            let q = (p1 * 2.0
                + (p2 - p0) * t
                + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2
                + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * t3)
                * 0.5;
            out.push(Point3::from(q));
        }
    }
    out.push(points[n - 1]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-10;

    fn points_equal(p1: &Point3<f64>, p2: &Point3<f64>) -> bool {
        (p1 - p2).norm() < EPSILON
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let p = rotate_z(&Point3::new(1.0, 0.0, 2.0), FRAC_PI_2);
        assert!(points_equal(&p, &Point3::new(0.0, 1.0, 2.0)));
    }

    #[test]
    fn test_mirror() {
        let p = mirror_x(&Point3::new(1.5, -2.0, 3.0));
        assert!(points_equal(&p, &Point3::new(-1.5, -2.0, 3.0)));
    }

    #[test]
    fn test_circle_through_three_points() {
        let c = Circle::through(
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
            &Point3::new(-1.0, 0.0, 0.0),
        )
        .unwrap();
        assert!(points_equal(&c.center, &Point3::new(0.0, 0.0, 0.0)));
        assert!((c.radius - 1.0).abs() < EPSILON);
        // Counter-clockwise, seen from +z
        assert!((c.normal.z - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_circle_off_axis() {
        let center = Point3::new(3.0, -2.0, 5.0);
        let on = |angle: f64| center + Vector3::new(2.0 * angle.cos(), 0.0, 2.0 * angle.sin());
        let c = Circle::through(&on(0.1), &on(1.7), &on(4.0)).unwrap();
        assert!(points_equal(&c.center, &center));
        assert!((c.radius - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_collinear_points_have_no_circle() {
        let c = Circle::through(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 1.0, 0.0),
            &Point3::new(2.0, 2.0, 0.0),
        );
        assert!(c.is_none());
    }

    #[test]
    fn test_arc_goes_through_middle_point() {
        // Clockwise three quarter arc, the long way round from +x to +y
        let start = Point3::new(1.0, 0.0, 0.0);
        let end = Point3::new(0.0, 1.0, 0.0);
        let through = Point3::new(-1.0, 0.0, 0.0);
        let pts = arc_points(&start, &end, &through, 6).unwrap();
        assert_eq!(pts.len(), 7);
        assert!(points_equal(&pts[0], &start));
        assert!(points_equal(&pts[6], &end));
        for p in &pts {
            assert!((p.coords.norm() - 1.0).abs() < EPSILON);
        }
        // Halfway along a 270 degree arc is 135 degrees from the start
        let mid = &pts[3];
        assert!(points_equal(
            mid,
            &Point3::new((0.75 * std::f64::consts::PI).cos(), -(0.75 * std::f64::consts::PI).sin(), 0.0)
        ));
    }

    #[test]
    fn test_short_arc() {
        let start = Point3::new(1.0, 0.0, 0.0);
        let end = Point3::new(0.0, 1.0, 0.0);
        let half = 0.5f64.sqrt();
        let pts = arc_points(&start, &end, &Point3::new(half, half, 0.0), 2).unwrap();
        assert!(points_equal(&pts[1], &Point3::new(half, half, 0.0)));
    }

    #[test]
    fn test_circle_points_close() {
        let pts = circle_points(&Point3::new(1.0, 1.0, 0.0), 2.0, 8);
        assert_eq!(pts.len(), 9);
        assert!(points_equal(&pts[0], &pts[8]));
        assert!(points_equal(&pts[2], &Point3::new(1.0, 3.0, 0.0)));
    }

    #[test]
    fn test_catmull_rom_interpolates() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(3.0, 3.0, 0.0),
            Point3::new(6.0, 3.5, 1.0),
        ];
        let curve = catmull_rom(&pts, 4);
        assert_eq!(curve.len(), 13);
        for (i, p) in pts.iter().enumerate() {
            assert!(points_equal(&curve[i * 4], p));
        }
    }

    #[test]
    fn test_catmull_rom_on_a_line_stays_on_it() {
        let pts: Vec<Point3<f64>> = (0..4).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        for p in catmull_rom(&pts, 5) {
            assert!(p.y.abs() < EPSILON && p.z.abs() < EPSILON);
        }
    }
}
