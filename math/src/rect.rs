use std::cmp;

/// An axis-aligned rectangle in integer pixel coordinates.
///
/// `x` and `y` name the top-left corner; `w` and `h` extend right and down. A rectangle with a
/// non-positive width or height is empty: it contains no points and overlaps nothing.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[inline]
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// One past the rightmost column. Widened so that `x + w` cannot overflow.
    #[inline]
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.w)
    }

    /// One past the bottom row, widened like `right`.
    #[inline]
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.h)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Whether the point lies inside the rectangle. The right and bottom edges are exclusive.
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && i64::from(x) < self.right() && y >= self.y && i64::from(y) < self.bottom()
    }

    /// Overlap test. Rectangles which only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && i64::from(self.x) < other.right()
            && i64::from(other.x) < self.right()
            && i64::from(self.y) < other.bottom()
            && i64::from(other.y) < self.bottom()
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let x = cmp::max(self.x, other.x);
        let y = cmp::max(self.y, other.y);
        // The overlap is no larger than either rectangle, so its size fits in an `i32`.
        Some(Rect {
            x,
            y,
            w: (cmp::min(self.right(), other.right()) - i64::from(x)) as i32,
            h: (cmp::min(self.bottom(), other.bottom()) - i64::from(y)) as i32,
        })
    }

    /// Whether the rectangle lies within a `width`x`height` area anchored at the origin.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.w >= 0
            && self.h >= 0
            && self.right() <= i64::from(width)
            && self.bottom() <= i64::from(height)
    }
}
