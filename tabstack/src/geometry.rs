//! Integer geometry shared by folders, drag handlers and trackers.
//!
//! All coordinates are display coordinates unless a method says otherwise.

/// Size sentinel meaning "no constraint".
pub const INFINITE: i32 = i32::MAX;

/// A point in display coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    pub fn delta(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Width/height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Extent along one axis.
    pub fn extent(self, width: bool) -> i32 {
        if width { self.width } else { self.height }
    }
}

/// Axis-aligned rectangle. Empty when width or height is not positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.right()
            && point.y < self.bottom()
    }

    /// Whether `other` lies completely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn translate(&self, delta: Point) -> Rect {
        Rect::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Shrink every side by `amount`, never below an empty rectangle.
    pub fn inset(&self, amount: i32) -> Rect {
        Rect::new(
            self.x + amount,
            self.y + amount,
            (self.width - 2 * amount).max(0),
            (self.height - 2 * amount).max(0),
        )
    }

    /// Signed distance from `point` to `side`. Negative when the point is
    /// beyond that edge.
    pub fn distance_from_edge(&self, point: Point, side: Side) -> i32 {
        match side {
            Side::Left => point.x - self.x,
            Side::Top => point.y - self.y,
            Side::Right => self.right() - point.x,
            Side::Bottom => self.bottom() - point.y,
        }
    }

    /// Side of the rectangle closest to `point`.
    ///
    /// Sides are tried in the order left, right, top, bottom and the first
    /// strict minimum wins.
    pub fn closest_side(&self, point: Point) -> Side {
        let mut closest = Side::Left;
        let mut closest_distance = i32::MAX;
        for side in [Side::Left, Side::Right, Side::Top, Side::Bottom] {
            let distance = self.distance_from_edge(point, side);
            if distance < closest_distance {
                closest_distance = distance;
                closest = side;
            }
        }
        closest
    }
}

/// Edge of a rectangle; also the position of a folder's tab strip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Side {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}
