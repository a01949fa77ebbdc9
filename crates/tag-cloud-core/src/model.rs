use serde::{Deserialize, Serialize};

/// Integer point on the layout plane. `y` grows downwards.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance to `other`. Exact for any two points of the plane.
    pub fn distance_squared(&self, other: Point) -> i128 {
        let dx = (self.x as i128) - (other.x as i128);
        let dy = (self.y as i128) - (other.y as i128);
        dx * dx + dy * dy
    }
}

#[inline]
fn clamp_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Requested rectangle size. Signed so that bad input can be represented and rejected.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True when both parts are strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn area(&self) -> i64 {
        (self.width as i64) * (self.height as i64)
    }
}

/// Axis-aligned rectangle. `x,y` is top-left; `right`/`bottom` are exclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_point_size(location: Point, size: Size) -> Self {
        Self::new(location.x, location.y, size.width, size.height)
    }

    /// Rectangle of `size` whose [`center`](Self::center) is exactly `center`.
    ///
    /// The top-left corner saturates at the edge of the `i32` plane; use
    /// [`try_centered_at`](Self::try_centered_at) to detect that case.
    pub fn centered_at(center: Point, size: Size) -> Self {
        Self::new(
            center.x.saturating_sub(size.width / 2),
            center.y.saturating_sub(size.height / 2),
            size.width,
            size.height,
        )
    }

    /// Rectangle of `size` centered at `(x, y)`, or `None` unless all of it,
    /// including the exclusive right and bottom edges, lies on the `i32` plane.
    pub fn try_centered_at(x: i64, y: i64, size: Size) -> Option<Self> {
        let left = x - (size.width / 2) as i64;
        let top = y - (size.height / 2) as i64;
        let right = left + size.width as i64;
        let bottom = top + size.height as i64;
        let (min, max) = (i32::MIN as i64, i32::MAX as i64);
        if left < min || top < min || right > max || bottom > max {
            return None;
        }
        Some(Self::new(left as i32, top as i32, size.width, size.height))
    }

    pub fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    // Edges are widened so that rectangles touching the border of the plane
    // compare without overflow.
    #[inline]
    pub fn left(&self) -> i64 {
        self.x as i64
    }
    #[inline]
    pub fn top(&self) -> i64 {
        self.y as i64
    }
    /// Exclusive right edge (`x + width`).
    #[inline]
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }
    /// Exclusive bottom edge (`y + height`).
    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn area(&self) -> i64 {
        self.size().area()
    }

    /// Center rounded down onto the integer grid.
    pub fn center(&self) -> Point {
        Point::new(
            self.x.saturating_add(self.width / 2),
            self.y.saturating_add(self.height / 2),
        )
    }

    /// True if the interiors intersect. Rectangles sharing only an edge or a corner
    /// do not intersect.
    #[inline]
    pub fn intersects_with(&self, other: &Rectangle) -> bool {
        !(self.right() <= other.left()
            || other.right() <= self.left()
            || self.bottom() <= other.top()
            || other.bottom() <= self.top())
    }

    /// Smallest rectangle containing both `self` and `other`. Width and height
    /// saturate at `i32::MAX` for unions spanning more than half the plane.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rectangle::new(
            clamp_i32(left),
            clamp_i32(top),
            clamp_i32(right - left),
            clamp_i32(bottom - top),
        )
    }

    /// The four corners, clockwise from top-left.
    pub fn corners(&self) -> [Point; 4] {
        let (l, t) = (self.x, self.y);
        let (r, b) = (clamp_i32(self.right()), clamp_i32(self.bottom()));
        [
            Point::new(l, t),
            Point::new(r, t),
            Point::new(r, b),
            Point::new(l, b),
        ]
    }
}

/// Bounding rectangle of all `rects`, or `None` if there are none.
pub fn bounding_box<'a, I>(rects: I) -> Option<Rectangle>
where
    I: IntoIterator<Item = &'a Rectangle>,
{
    rects.into_iter().fold(None, |acc, r| match acc {
        None => Some(*r),
        Some(b) => Some(b.union(r)),
    })
}

/// Owned snapshot of a cloud: its center and the rectangles in placement order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CloudLayout {
    pub center: Point,
    pub rectangles: Vec<Rectangle>,
}

/// Statistics about how tightly a cloud is packed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CloudStats {
    /// Number of placed rectangles.
    pub num_rects: usize,
    /// Sum of all rectangle areas.
    pub total_area: i64,
    /// Bounding box of the whole cloud (None when empty).
    pub bounds: Option<Rectangle>,
    /// Largest distance from the center to any rectangle corner.
    pub enclosing_radius: f64,
    /// total_area / area of the enclosing circle (0.0 to 1.0).
    /// Higher is better.
    pub density: f64,
}

impl CloudLayout {
    /// Computes density statistics for this layout.
    pub fn stats(&self) -> CloudStats {
        CloudStats::compute(self.center, &self.rectangles)
    }
}

impl CloudStats {
    /// Statistics for `rects` laid out around `center`.
    pub fn compute(center: Point, rects: &[Rectangle]) -> Self {
        let total_area: i64 = rects.iter().map(Rectangle::area).sum();
        let bounds = bounding_box(rects);
        let max_sq = rects
            .iter()
            .flat_map(|r| r.corners())
            .map(|p| p.distance_squared(center))
            .max()
            .unwrap_or(0);
        let enclosing_radius = (max_sq as f64).sqrt();
        let circle = std::f64::consts::PI * enclosing_radius * enclosing_radius;
        let density = if circle > 0.0 {
            total_area as f64 / circle
        } else {
            0.0
        };
        CloudStats {
            num_rects: rects.len(),
            total_area,
            bounds,
            enclosing_radius,
            density,
        }
    }

    /// Area of the circle whose radius is the shorter side of the bounding box.
    /// A compact, round cloud always covers less than this.
    pub fn inscribed_circle_area(&self) -> f64 {
        match self.bounds {
            Some(b) => {
                let r = b.width.min(b.height) as f64;
                std::f64::consts::PI * r * r
            }
            None => 0.0,
        }
    }

    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        let (w, h) = self.bounds.map(|b| (b.width, b.height)).unwrap_or((0, 0));
        format!(
            "Rectangles: {}, Area: {} px², Bounds: {}x{}, Radius: {:.1}, Density: {:.2}%",
            self.num_rects,
            self.total_area,
            w,
            h,
            self.enclosing_radius,
            self.density * 100.0,
        )
    }
}
