use ndarray::Array2;

use super::*;

/// Uniform random placement: keeps drawing coordinates until the requested
/// number of distinct cells carry mines, re-drawing on duplicates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomFieldGenerator {
    seed: u64,
}

impl RandomFieldGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl FieldGenerator for RandomFieldGenerator {
    fn generate(self, config: BoardConfig) -> MineField {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mask: Array2<bool> = Array2::default(idx(config.size()));

        // BoardConfig keeps at least one cell free, so every draw loop
        // eventually lands on an unmined coordinate.
        let mut placed: CellCount = 0;
        while placed < config.mines {
            let row = rng.random_range(0..config.rows);
            let col = rng.random_range(0..config.cols);
            let slot = &mut mask[idx((row, col))];
            if *slot {
                continue;
            }
            *slot = true;
            placed += 1;
        }

        log::debug!(
            "placed {} mines on a {}x{} board (seed {})",
            placed,
            config.rows,
            config.cols,
            self.seed
        );
        MineField::from_mask(mask)
    }
}
