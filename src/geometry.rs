use glam::Vec2;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// A polygon needs at least three vertices to enclose anything.
    #[error("polygon needs at least 3 points, got {0}")]
    InvalidGeometry(usize),
}

/// Linear interpolation: `a + (b - a) * t`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Intersection of two segments, expressed along the first segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub point: Vec2,
    /// Parametric position in [0, 1] along the first segment argument.
    pub offset: f32,
}

/// Intersection point of segments AB and CD, if any.
///
/// Solves the parametric system `A + t(B-A) = C + u(D-C)` with the
/// cross-product formulation. Parallel and collinear segments have a zero
/// denominator and yield `None`; collinear overlap gets no special handling.
pub fn segment_intersection(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<Intersection> {
    let t_top = (d.x - c.x) * (a.y - c.y) - (d.y - c.y) * (a.x - c.x);
    let u_top = (c.y - a.y) * (a.x - b.x) - (c.x - a.x) * (a.y - b.y);
    let bottom = (d.y - c.y) * (b.x - a.x) - (d.x - c.x) * (b.y - a.y);

    if bottom == 0.0 {
        return None;
    }

    let t = t_top / bottom;
    let u = u_top / bottom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Intersection {
            point: Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t)),
            offset: t,
        })
    } else {
        None
    }
}

/// A closed polygon. The closing edge (last vertex back to first) is owned
/// here, so callers never duplicate the first vertex themselves.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    points: Vec<Vec2>,
}

impl Polygon {
    pub fn new(points: Vec<Vec2>) -> Result<Self, GeometryError> {
        if points.len() < 3 {
            return Err(GeometryError::InvalidGeometry(points.len()));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Cyclic edge sequence, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

/// Quads come up constantly (car bodies), so give them an infallible path.
impl From<[Vec2; 4]> for Polygon {
    fn from(points: [Vec2; 4]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }
}

/// True iff any edge of `p` crosses any edge of `q`. Short-circuits on the
/// first hit.
pub fn polygons_intersect(p: &Polygon, q: &Polygon) -> bool {
    for (a, b) in p.edges() {
        for (c, d) in q.edges() {
            if segment_intersection(a, b, c, d).is_some() {
                return true;
            }
        }
    }
    false
}

/// True iff any edge of `p` crosses any segment of the open chain.
/// Road borders are polylines, not closed shapes, so the chain does not wrap.
pub fn polygon_hits_polyline(p: &Polygon, chain: &[Vec2]) -> bool {
    for window in chain.windows(2) {
        for (a, b) in p.edges() {
            if segment_intersection(a, b, window[0], window[1]).is_some() {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(cx: f32, cy: f32, half: f32) -> Polygon {
        Polygon::new(vec![
            Vec2::new(cx - half, cy - half),
            Vec2::new(cx + half, cy - half),
            Vec2::new(cx + half, cy + half),
            Vec2::new(cx - half, cy + half),
        ])
        .unwrap()
    }

    #[test]
    fn crossing_segments_intersect_at_lerp_point() {
        let hit = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, -5.0),
            Vec2::new(5.0, 5.0),
        )
        .unwrap();

        assert!((hit.point.x - 5.0).abs() < 1e-6);
        assert!((hit.point.y - 0.0).abs() < 1e-6);
        assert!((hit.offset - 0.5).abs() < 1e-6);
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        let hit = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(10.0, 1.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn disjoint_segments_on_crossing_lines_do_not_intersect() {
        // The infinite lines cross, but outside both segments.
        let hit = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(5.0, -5.0),
            Vec2::new(5.0, 5.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn offset_is_parametric_along_first_segment() {
        let hit = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(2.5, -1.0),
            Vec2::new(2.5, 1.0),
        )
        .unwrap();
        assert!((hit.offset - 0.25).abs() < 1e-6);
    }

    #[test]
    fn polygon_rejects_fewer_than_three_points() {
        let err = Polygon::new(vec![Vec2::ZERO, Vec2::ONE]).unwrap_err();
        assert_eq!(err, GeometryError::InvalidGeometry(2));
    }

    #[test]
    fn polygon_edges_include_closing_edge() {
        let p = square(0.0, 0.0, 1.0);
        let edges: Vec<_> = p.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3].1, p.points()[0]);
    }

    #[test]
    fn polygons_intersect_is_symmetric() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(1.5, 0.0, 1.0);
        let c = square(10.0, 10.0, 1.0);

        assert!(polygons_intersect(&a, &b));
        assert!(polygons_intersect(&b, &a));
        assert!(!polygons_intersect(&a, &c));
        assert!(!polygons_intersect(&c, &a));
    }

    #[test]
    fn contained_polygon_without_edge_crossing_reports_no_intersection() {
        // Edge test only: full containment has no crossing edges.
        let outer = square(0.0, 0.0, 10.0);
        let inner = square(0.0, 0.0, 1.0);
        assert!(!polygons_intersect(&outer, &inner));
    }

    #[test]
    fn polygon_hits_open_polyline() {
        let p = square(0.0, 0.0, 1.0);
        let chain = [Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0)];
        assert!(polygon_hits_polyline(&p, &chain));

        let far = [Vec2::new(-5.0, 20.0), Vec2::new(5.0, 20.0)];
        assert!(!polygon_hits_polyline(&p, &far));
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    }
}
