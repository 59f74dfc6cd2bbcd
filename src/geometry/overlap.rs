//! Intersection of two filled circles.

use std::f32::consts::PI;

use glam::Vec2;

/// A filled circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Center in surface coordinates.
    pub center: Vec2,
    /// Radius, never negative.
    pub radius: f32,
}

impl Circle {
    /// Circle at `center` with `radius`.
    #[must_use]
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether `point` lies inside or on the circle.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    /// Filled area.
    #[must_use]
    pub fn area(&self) -> f32 {
        PI * self.radius * self.radius
    }

    /// Axis-aligned bounds as `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let r = Vec2::splat(self.radius);
        (self.center - r, self.center + r)
    }
}

/// Lens-shaped intersection of two partially overlapping circles.
///
/// The boundary is the arc of `a` that lies inside `b` plus the arc of `b`
/// that lies inside `a`; both arcs end at the two `chord` points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    /// First bounding circle.
    pub a: Circle,
    /// Second bounding circle.
    pub b: Circle,
    /// Where the two circle outlines cross.
    pub chord: [Vec2; 2],
}

impl Lens {
    /// Whether `point` lies inside both circles.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        self.a.contains(point) && self.b.contains(point)
    }

    /// Area of the lens (sum of the two circular segments).
    #[must_use]
    pub fn area(&self) -> f32 {
        let d = self.a.center.distance(self.b.center);
        segment_area(self.a.radius, d, self.b.radius)
            + segment_area(self.b.radius, d, self.a.radius)
    }

    /// Axis-aligned bounds as `(min, max)`.
    ///
    /// Extremes sit either on a chord point or on an axis-extreme point of
    /// one circle that the other circle also covers.
    #[must_use]
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let mut min = self.chord[0].min(self.chord[1]);
        let mut max = self.chord[0].max(self.chord[1]);
        for (circle, other) in [(self.a, self.b), (self.b, self.a)] {
            for dir in [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y] {
                let p = circle.center + dir * circle.radius;
                if other.contains(p) {
                    min = min.min(p);
                    max = max.max(p);
                }
            }
        }
        (min, max)
    }
}

/// Area of the circular segment of a circle with radius `r` cut off by the
/// chord it shares with a circle of radius `other` at center distance `d`.
fn segment_area(r: f32, d: f32, other: f32) -> f32 {
    let cos_half = ((d * d + r * r - other * other) / (2.0 * d * r))
        .clamp(-1.0, 1.0);
    let half_angle = cos_half.acos();
    r * r * (half_angle - half_angle.sin() * half_angle.cos())
}

/// The region covered by both circles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlap {
    /// The circles are disjoint or only touch.
    Empty,
    /// One circle lies entirely inside the other; this is the inner one.
    Circle(Circle),
    /// The outlines cross at two points.
    Lens(Lens),
}

impl Overlap {
    /// Intersect two circles.
    #[must_use]
    pub fn between(a: Circle, b: Circle) -> Self {
        if a.radius <= 0.0 || b.radius <= 0.0 {
            return Self::Empty;
        }
        let delta = b.center - a.center;
        let d = delta.length();
        if d >= a.radius + b.radius {
            return Self::Empty;
        }
        if d <= (a.radius - b.radius).abs() {
            return Self::Circle(if a.radius <= b.radius { a } else { b });
        }

        // Distance from a's center to the chord midpoint along the axis
        let along = (d * d + a.radius * a.radius - b.radius * b.radius)
            / (2.0 * d);
        let half_chord = (a.radius * a.radius - along * along).max(0.0).sqrt();
        let axis = delta / d;
        let mid = a.center + axis * along;
        let offset = axis.perp() * half_chord;
        Self::Lens(Lens {
            a,
            b,
            chord: [mid + offset, mid - offset],
        })
    }

    /// Whether nothing is covered by both circles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Covered area.
    #[must_use]
    pub fn area(&self) -> f32 {
        match self {
            Self::Empty => 0.0,
            Self::Circle(c) => c.area(),
            Self::Lens(lens) => lens.area(),
        }
    }

    /// Whether `point` lies in the shared region.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        match self {
            Self::Empty => false,
            Self::Circle(c) => c.contains(point),
            Self::Lens(lens) => lens.contains(point),
        }
    }

    /// Axis-aligned bounds as `(min, max)`, `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        match self {
            Self::Empty => None,
            Self::Circle(c) => Some(c.bounds()),
            Self::Lens(lens) => Some(lens.bounds()),
        }
    }
}
