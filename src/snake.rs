use crate::geometry::{Dimensions, Direction, Vector2};

pub const SNAKE_CHAR: char = '#';

/// Ordered body of the snake, head first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    // Never empty: created with one segment and only ever appended to.
    segments: Vec<Vector2>,
    glyph: char,
    direction: Direction,
}

impl Snake {
    pub fn spawn(origin: Vector2) -> Self {
        Snake { segments: vec![origin], glyph: SNAKE_CHAR, direction: Direction::Still }
    }

    pub fn segments(&self) -> &[Vector2] {
        &self.segments
    }

    pub fn head(&self) -> Vector2 {
        self.segments[0]
    }

    pub fn tail(&self) -> Vector2 {
        self.segments[self.segments.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Overwrites the heading. Turning straight back into the body is allowed
    /// and ends the game on the next step.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Whether heading `direction` would run the head into the second segment.
    pub fn reverses(&self, direction: Direction) -> bool {
        self.len() > 1 && direction != Direction::Still && direction == self.direction.opposite()
    }

    /// One simulation step: wrap the head back into the band, drag every
    /// segment onto its predecessor, then move the head.
    pub fn advance(&mut self, dims: Dimensions) {
        // The wrap corrects the previous step's overshoot, so it runs first.
        self.segments[0] = dims.wrap_band().wrap(self.segments[0]);

        for i in (1..self.segments.len()).rev() {
            self.segments[i] = self.segments[i - 1];
        }

        self.segments[0] += self.direction.vector();
    }

    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.segments[1..].contains(&head)
    }

    pub fn occupies(&self, pos: Vector2) -> bool {
        self.head() == pos
    }

    /// Appends a segment one step behind the tail, against the heading.
    pub fn grow(&mut self) {
        let new_tail = self.tail() - self.direction.vector();
        self.segments.push(new_tail);
    }
}
