use std::ops::{Add, AddAssign, Neg, Sub};

/// Rows taken by the window chrome above the playfield: border, title and separator.
pub const CHROME_ROWS: i32 = 3;

/// A cell position or a displacement, in (row, column) order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vector2 {
    pub y: i32,
    pub x: i32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { y: 0, x: 0 };

    pub const fn new(y: i32, x: i32) -> Self {
        Vector2 { y, x }
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.y + other.y, self.x + other.x)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, other: Vector2) {
        *self = *self + other;
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.y, -self.x)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, other: Vector2) -> Vector2 {
        self + -other
    }
}

/// Heading of the snake. Only the zero vector and the four unit axis
/// vectors can be expressed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Still,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn vector(self) -> Vector2 {
        match self {
            Direction::Still => Vector2::ZERO,
            Direction::Up => Vector2::new(-1, 0),
            Direction::Down => Vector2::new(1, 0),
            Direction::Left => Vector2::new(0, -1),
            Direction::Right => Vector2::new(0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Still => Direction::Still,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Size of the drawable window, border included.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub height: i32,
    pub width: i32,
}

impl Dimensions {
    pub const fn new(height: i32, width: i32) -> Self {
        Dimensions { height, width }
    }

    /// Band the snake head is kept in. Leaving it teleports the head to the
    /// opposite edge.
    pub fn wrap_band(&self) -> Region {
        Region {
            top: CHROME_ROWS + 1,
            bottom: self.height - 3,
            left: 2,
            right: self.width - 3,
        }
    }

    /// Interior below the chrome, wiped before every repaint.
    pub fn playfield(&self) -> Region {
        Region {
            top: CHROME_ROWS,
            bottom: self.height - 2,
            left: 1,
            right: self.width - 2,
        }
    }

    pub fn contains(&self, pos: Vector2) -> bool {
        (0..self.height).contains(&pos.y) && (0..self.width).contains(&pos.x)
    }
}

/// Rectangle of cells with inclusive edges.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl Region {
    /// Teleports a position lying past one edge onto the opposite edge.
    /// Each axis is handled independently; positions inside are untouched.
    pub fn wrap(&self, pos: Vector2) -> Vector2 {
        let x = if pos.x > self.right {
            self.left
        } else if pos.x < self.left {
            self.right
        } else {
            pos.x
        };

        let y = if pos.y > self.bottom {
            self.top
        } else if pos.y < self.top {
            self.bottom
        } else {
            pos.y
        };

        Vector2::new(y, x)
    }

    pub fn cells(&self) -> impl Iterator<Item = Vector2> {
        let Region { top, bottom, left, right } = *self;
        (top..=bottom).flat_map(move |y| (left..=right).map(move |x| Vector2::new(y, x)))
    }
}
