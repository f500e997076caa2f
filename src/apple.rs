use rand::Rng;

use crate::geometry::{Dimensions, Vector2};

pub const APPLE_CHAR: char = 'o';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Apple {
    position: Vector2,
    glyph: char,
}

impl Apple {
    /// Places an apple on a uniformly random cell with row in
    /// `[1, height - 1]` and column in `[1, width - 1]`.
    ///
    /// The snake is not consulted: an apple can land on the body, on the
    /// chrome rows, or outside the band the head can reach.
    ///
    /// The head only ever stands on rows `[3, height - 2]` and columns
    /// `[1, width - 2]`, so an apple on row 1, row 2, row `height - 1` or
    /// column `width - 1` can never be eaten. Except on row 1, such an apple
    /// is also hidden: the border and separator are drawn over it on the
    /// same tick.
    pub fn spawn_random<R: Rng>(dims: Dimensions, rng: &mut R) -> Self {
        Apple { position: random_cell(dims, rng), glyph: APPLE_CHAR }
    }

    pub fn relocate<R: Rng>(&mut self, dims: Dimensions, rng: &mut R) {
        self.position = random_cell(dims, rng);
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    #[cfg(test)]
    pub fn at(position: Vector2) -> Self {
        Apple { position, glyph: APPLE_CHAR }
    }
}

fn random_cell<R: Rng>(dims: Dimensions, rng: &mut R) -> Vector2 {
    let y = rng.gen_range(1..=dims.height - 1);
    let x = rng.gen_range(1..=dims.width - 1);
    Vector2::new(y, x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Snake;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const DIMS: Dimensions = Dimensions::new(20, 40);
    const RNG_SEED: u64 = 0x5EED;

    #[test]
    fn spawns_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(RNG_SEED);
        for _ in 0..1000 {
            let apple = Apple::spawn_random(DIMS, &mut rng);
            let pos = apple.position();
            assert!((1..=19).contains(&pos.y), "row out of range: {:?}", pos);
            assert!((1..=39).contains(&pos.x), "column out of range: {:?}", pos);
            assert_eq!(apple.glyph(), APPLE_CHAR);
        }
    }

    #[test]
    fn covers_whole_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(RNG_SEED);
        let mut apple = Apple::spawn_random(DIMS, &mut rng);
        let (mut min, mut max) = (apple.position(), apple.position());
        for _ in 0..5000 {
            apple.relocate(DIMS, &mut rng);
            let pos = apple.position();
            min = Vector2::new(min.y.min(pos.y), min.x.min(pos.x));
            max = Vector2::new(max.y.max(pos.y), max.x.max(pos.x));
        }
        assert_eq!(min, Vector2::new(1, 1));
        assert_eq!(max, Vector2::new(19, 39));
    }

    #[test]
    fn relocate_keeps_the_apple() {
        let mut rng = ChaCha8Rng::seed_from_u64(RNG_SEED);
        let mut apple = Apple::spawn_random(DIMS, &mut rng);
        let first = apple.position();
        let moved = (0..50).any(|_| {
            apple.relocate(DIMS, &mut rng);
            apple.position() != first
        });
        assert!(moved);
        assert_eq!(apple.glyph(), APPLE_CHAR);
    }

    #[test]
    fn may_spawn_on_the_snake() {
        // A 2x2 window leaves a single candidate cell.
        let tiny = Dimensions::new(2, 2);
        let snake = Snake::spawn(Vector2::new(1, 1));
        let mut rng = ChaCha8Rng::seed_from_u64(RNG_SEED);
        let apple = Apple::spawn_random(tiny, &mut rng);
        assert!(snake.occupies(apple.position()));
    }
}
