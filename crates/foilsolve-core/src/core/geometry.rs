use nalgebra::{Point2, Rotation2};
use thiserror::Error;

/// Smallest number of surface points accepted for an airfoil contour.
pub const MIN_POINTS: usize = 5;
/// Largest contour the engine's fixed-size panel arrays can hold.
pub const MAX_POINTS: usize = 300;

const DEGENERATE_CHORD: f64 = 1e-12;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Geometry requires at least {min} points, got {actual}")]
    TooFewPoints { min: usize, actual: usize },

    #[error("Geometry accepts at most {max} points, got {actual}")]
    TooManyPoints { max: usize, actual: usize },

    #[error("Coordinate {index} is not finite: ({x}, {y})")]
    NonFiniteCoordinate { index: usize, x: f64, y: f64 },

    #[error("Degenerate geometry: {0}")]
    Degenerate(String),

    #[error("Invalid NACA specification '{code}': {reason}")]
    InvalidNaca { code: String, reason: String },

    #[error("Invalid {section} section: {reason}")]
    InvalidSection {
        section: &'static str,
        reason: String,
    },
}

/// An ordered airfoil contour.
///
/// Points run from the trailing edge over the upper surface to the leading edge and back along
/// the lower surface to the trailing edge, the usual convention for panel-method engines.
/// A `Geometry` is validated on construction and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    points: Vec<Point2<f64>>,
}

impl Geometry {
    /// Builds a geometry from surface points.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if the point count lies outside [`MIN_POINTS`]..=[`MAX_POINTS`],
    /// a coordinate is not finite, or the leading and trailing edges coincide.
    pub fn new(points: Vec<Point2<f64>>) -> Result<Self, GeometryError> {
        if points.len() < MIN_POINTS {
            return Err(GeometryError::TooFewPoints {
                min: MIN_POINTS,
                actual: points.len(),
            });
        }
        if points.len() > MAX_POINTS {
            return Err(GeometryError::TooManyPoints {
                max: MAX_POINTS,
                actual: points.len(),
            });
        }

        if let Some((index, p)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(GeometryError::NonFiniteCoordinate {
                index,
                x: p.x,
                y: p.y,
            });
        }

        let geometry = Self { points };
        if geometry.chord() < DEGENERATE_CHORD {
            return Err(GeometryError::Degenerate(
                "leading edge and trailing edge coincide".to_string(),
            ));
        }
        Ok(geometry)
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, GeometryError> {
        Self::new(pairs.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn to_pairs(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x, p.y)).collect()
    }

    /// Index of the leading-edge node (the first node with the smallest `x`).
    pub fn nose_index(&self) -> usize {
        self.points
            .iter()
            .enumerate()
            .fold(0, |best, (i, p)| {
                if p.x < self.points[best].x { i } else { best }
            })
    }

    pub fn leading_edge(&self) -> Point2<f64> {
        self.points[self.nose_index()]
    }

    /// Midpoint of the first and last contour nodes.
    pub fn trailing_edge(&self) -> Point2<f64> {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        nalgebra::center(&first, &last)
    }

    pub fn chord(&self) -> f64 {
        nalgebra::distance(&self.leading_edge(), &self.trailing_edge())
    }

    /// Moves the nose to the origin, scales the nose-to-trailing-edge distance to one, rotates
    /// the chord onto the x axis and closes the trailing edge at `y = 0`.
    pub fn normalized(&self) -> Result<Geometry, GeometryError> {
        let nose = self.leading_edge();
        let trailing_edge = self.trailing_edge() - nose;
        let scale = trailing_edge.norm();
        let rotation = Rotation2::new(-trailing_edge.y.atan2(trailing_edge.x));

        let mut points: Vec<Point2<f64>> = self
            .points
            .iter()
            .map(|p| Point2::from(rotation * ((p - nose) / scale)))
            .collect();
        let last = points.len() - 1;
        points[0].y = 0.0;
        points[last].y = 0.0;
        Geometry::new(points)
    }

    /// Upper (trailing edge to nose) and lower (nose to trailing edge) surfaces.
    /// Both slices include the nose node.
    pub fn surfaces(&self) -> (&[Point2<f64>], &[Point2<f64>]) {
        let nose = self.nose_index();
        (&self.points[..=nose], &self.points[nose..])
    }

    /// Mean camber, as a fraction of chord, at chord fraction `x_frac ∈ [0, 1]`.
    pub fn camber_at(&self, x_frac: f64) -> Option<f64> {
        let (upper, lower) = self.surface_ordinates_at(x_frac)?;
        Some(0.5 * (upper + lower))
    }

    /// Local thickness, as a fraction of chord, at chord fraction `x_frac ∈ [0, 1]`.
    pub fn thickness_at(&self, x_frac: f64) -> Option<f64> {
        let (upper, lower) = self.surface_ordinates_at(x_frac)?;
        Some(upper - lower)
    }

    /// Maximum thickness as a fraction of chord, sampled on `samples` interior stations.
    pub fn max_thickness(&self, samples: usize) -> f64 {
        (1..samples.max(2))
            .filter_map(|i| self.thickness_at(i as f64 / samples.max(2) as f64))
            .fold(0.0, f64::max)
    }

    /// Whether the camber line stays within `tolerance` (fraction of chord) of the chord line.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        const STATIONS: usize = 50;
        (1..STATIONS)
            .filter_map(|i| self.camber_at(i as f64 / STATIONS as f64))
            .all(|c| c.abs() <= tolerance)
    }

    fn surface_ordinates_at(&self, x_frac: f64) -> Option<(f64, f64)> {
        if !(0.0..=1.0).contains(&x_frac) {
            return None;
        }
        let le = self.leading_edge();
        let te = self.trailing_edge();
        let chord_x = te.x - le.x;
        if chord_x.abs() < DEGENERATE_CHORD {
            return None;
        }
        let x = le.x + x_frac * chord_x;

        let (upper, lower) = self.surfaces();
        let y_upper = interpolate_y(upper, x)?;
        let y_lower = interpolate_y(lower, x)?;
        let (y_upper, y_lower) = if y_upper >= y_lower {
            (y_upper, y_lower)
        } else {
            (y_lower, y_upper)
        };
        Some(((y_upper - le.y) / chord_x, (y_lower - le.y) / chord_x))
    }
}

/// Linear interpolation of `y` at `x` along a surface that is monotonic in `x` in either
/// direction. Returns `None` when `x` lies outside the surface's span.
fn interpolate_y(surface: &[Point2<f64>], x: f64) -> Option<f64> {
    surface.windows(2).find_map(|segment| {
        let (a, b) = (segment[0], segment[1]);
        let (lo, hi) = if a.x <= b.x { (a, b) } else { (b, a) };
        if x < lo.x || x > hi.x {
            return None;
        }
        let span = hi.x - lo.x;
        if span < DEGENERATE_CHORD {
            return Some(0.5 * (lo.y + hi.y));
        }
        Some(lo.y + (x - lo.x) / span * (hi.y - lo.y))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn diamond() -> Geometry {
        Geometry::from_pairs(&[
            (1.0, 0.0),
            (0.5, 0.05),
            (0.0, 0.0),
            (0.5, -0.05),
            (1.0, 0.0),
        ])
        .unwrap()
    }

    fn cambered_plate() -> Geometry {
        Geometry::from_pairs(&[
            (1.0, 0.0),
            (0.5, 0.06),
            (0.0, 0.0),
            (0.5, 0.02),
            (1.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn new_rejects_too_few_points() {
        let result = Geometry::from_pairs(&[(1.0, 0.0), (0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(
            result,
            Err(GeometryError::TooFewPoints { min: 5, actual: 3 })
        );
    }

    #[test]
    fn new_rejects_more_points_than_the_engine_holds() {
        let contour = |n: usize| -> Vec<(f64, f64)> {
            (0..n)
                .map(|i| {
                    let theta = 2.0 * std::f64::consts::PI * i as f64 / (n - 1) as f64;
                    (0.5 + 0.5 * theta.cos(), 0.05 * theta.sin())
                })
                .collect()
        };
        assert!(Geometry::from_pairs(&contour(MAX_POINTS)).is_ok());
        assert_eq!(
            Geometry::from_pairs(&contour(MAX_POINTS + 1)),
            Err(GeometryError::TooManyPoints {
                max: 300,
                actual: 301
            })
        );
    }

    #[test]
    fn new_rejects_non_finite_coordinates() {
        let result = Geometry::from_pairs(&[
            (1.0, 0.0),
            (0.5, f64::NAN),
            (0.0, 0.0),
            (0.5, -0.05),
            (1.0, 0.0),
        ]);
        assert!(matches!(
            result,
            Err(GeometryError::NonFiniteCoordinate { index: 1, .. })
        ));
    }

    #[test]
    fn new_rejects_zero_chord() {
        let result = Geometry::from_pairs(&[(0.0, 0.0); 6]);
        assert!(matches!(result, Err(GeometryError::Degenerate(_))));
    }

    #[test]
    fn nose_and_edges_are_located_correctly() {
        let g = diamond();
        assert_eq!(g.nose_index(), 2);
        assert_eq!(g.leading_edge(), Point2::new(0.0, 0.0));
        assert_eq!(g.trailing_edge(), Point2::new(1.0, 0.0));
        assert!((g.chord() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn surfaces_share_the_nose_node() {
        let g = diamond();
        let (upper, lower) = g.surfaces();
        assert_eq!(upper.len(), 3);
        assert_eq!(lower.len(), 3);
        assert_eq!(upper.last(), lower.first());
    }

    #[test]
    fn thickness_and_camber_are_interpolated_linearly() {
        let g = cambered_plate();
        assert!((g.thickness_at(0.5).unwrap() - 0.04).abs() < TOLERANCE);
        assert!((g.camber_at(0.5).unwrap() - 0.04).abs() < TOLERANCE);
        assert!((g.camber_at(0.25).unwrap() - 0.02).abs() < TOLERANCE);
        assert!(g.camber_at(1.5).is_none());
    }

    #[test]
    fn max_thickness_finds_the_thickest_station() {
        let g = diamond();
        assert!((g.max_thickness(100) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn symmetry_check_distinguishes_cambered_sections() {
        assert!(diamond().is_symmetric(1e-9));
        assert!(!cambered_plate().is_symmetric(1e-3));
    }

    #[test]
    fn normalized_puts_nose_at_origin_and_chord_on_x_axis() {
        let tilted = Geometry::from_pairs(&[
            (3.0, 2.0),
            (2.0, 2.2),
            (1.0, 0.0),
            (2.0, 1.8),
            (3.0, 2.0),
        ])
        .unwrap();
        let g = tilted.normalized().unwrap();
        assert_eq!(g.leading_edge(), Point2::new(0.0, 0.0));
        assert!((g.trailing_edge() - Point2::new(1.0, 0.0)).norm() < TOLERANCE);
        assert!((g.chord() - 1.0).abs() < TOLERANCE);
        assert_eq!(g.points()[0].y, 0.0);
        assert_eq!(g.points()[4].y, 0.0);
        assert!(g.points()[1].y > 0.0);
    }

    #[test]
    fn to_pairs_round_trips_input_order() {
        let pairs = vec![
            (1.0, 0.0),
            (0.5, 0.05),
            (0.0, 0.0),
            (0.5, -0.05),
            (1.0, 0.0),
        ];
        let g = Geometry::from_pairs(&pairs).unwrap();
        assert_eq!(g.to_pairs(), pairs);
        assert_eq!(g.num_points(), 5);
    }
}
