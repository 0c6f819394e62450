//! Geometric primitives and the pure link-geometry functions.
//!
//! Everything in this module is stateless: given identical inputs the
//! functions return identical outputs, which keeps layout rendering stable
//! and lets them be tested in isolation.

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

/// Point on the boundary of a circle-approximated shape centered at
/// `center` with radius `radius`, along the line towards `other`, pushed
/// outward by `margin`.
///
/// Link endpoints use this so that rendered paths touch a node's visible
/// border instead of its center. A zero radius degenerates to a point
/// offset `margin` towards `other`, which is how curve points are nudged.
pub fn intersection(center: Point, radius: f32, other: Point, margin: f32) -> Point {
    let direction = other.sub_point(center);
    let length = direction.hypot();
    if length == 0.0 {
        return center;
    }

    let offset = radius + margin;
    center.add_point(direction.scale(offset / length))
}

/// Spread between neighbouring parallel links, in offset units.
const PARALLEL_SPREAD: f32 = 25.0;

/// Additional curvature applied per unit of deviation from the default
/// link-distance ratio.
const RATIO_CURVATURE: f32 = 40.0;

/// Control point for a curved link between `start` and `end`.
///
/// The point sits on the perpendicular through the segment midpoint. Its
/// offset grows with the link's parallel index (so multiple links between
/// the same pair of nodes fan out instead of overlapping) and with the
/// deviation of `distance_ratio` from 1.0. A single link at the default
/// ratio yields the midpoint itself, producing a straight path.
pub fn curve_point(start: Point, end: Point, parallel_index: i32, distance_ratio: f32) -> Point {
    let mid = start.midpoint(end);
    let offset = parallel_index as f32 * PARALLEL_SPREAD + (distance_ratio - 1.0) * RATIO_CURVATURE;
    if offset == 0.0 {
        return mid;
    }

    mid.add_point(normal_vector(start, end, offset))
}

/// How far a self-loop extends beyond the node border.
const LOOP_EXTENT: f32 = 80.0;

/// Half-angle of the wedge a self-loop occupies on the node border.
const LOOP_SPREAD_ANGLE: f32 = 0.6;

/// Deterministic closed curve for a self-referencing link.
///
/// Returns `[start, control1, control2, end]` for a cubic path anchored on
/// the node's own boundary, sized independently of any other links.
pub fn loop_path(center: Point, radius: f32) -> [Point; 4] {
    let (up_start, up_end) = (-LOOP_SPREAD_ANGLE, LOOP_SPREAD_ANGLE);

    let on_border = |angle: f32, distance: f32| {
        Point::new(
            center.x() + distance * angle.sin(),
            center.y() - distance * angle.cos(),
        )
    };

    [
        on_border(up_start, radius),
        on_border(up_start * 1.5, radius + LOOP_EXTENT),
        on_border(up_end * 1.5, radius + LOOP_EXTENT),
        on_border(up_end, radius),
    ]
}

/// Unit normal of the direction `from` → `to`, scaled to `length`.
///
/// Cardinality labels are offset off the link path with this. Coincident
/// input points yield the zero vector.
pub fn normal_vector(from: Point, to: Point, length: f32) -> Point {
    let direction = to.sub_point(from);
    let hypot = direction.hypot();
    if hypot == 0.0 {
        return Point::default();
    }

    Point::new(
        -direction.y() / hypot * length,
        direction.x() / hypot * length,
    )
}
