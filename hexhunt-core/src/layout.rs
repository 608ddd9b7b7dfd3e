//! BoardLayout - serializable board definition

use crate::board::{Board, BoardError, CellKind, Coord};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rows of the classic 6x10 hunt, entry at (0, 0)
const CLASSIC_ROWS: [[&str; 10]; 6] = [
    [" ", " ", " ", " ", "[+]", " ", " ", " ", " ", " "],
    [" ", "(+)", " ", "(/)", "$", " ", "(x)", " ", "O", " "],
    [" ", " ", "O", " ", "O", " ", " ", "[x]", "(~)", " "],
    ["O", "[+]", " ", "O", " ", "(x)", "O", "$", " ", "$"],
    [" ", " ", "(+)", "$", "O", " ", "O", "O", " ", " "],
    [" ", " ", " ", " ", " ", "[x]", " ", " ", " ", " "],
];

/// Board plus entry point, as stored on disk
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub name: String,
    pub start: Coord,
    /// Row-major display glyphs
    pub cells: Vec<Vec<String>>,
}

/// Cell mix for [`BoardLayout::random`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomMix {
    pub obstacle: f64,
    pub trap: f64,
    pub reward: f64,
    pub treasures: usize,
}

impl Default for RandomMix {
    fn default() -> Self {
        Self {
            obstacle: 0.15,
            trap: 0.08,
            reward: 0.05,
            treasures: 4,
        }
    }
}

impl BoardLayout {
    /// Parse the glyph grid
    pub fn to_board(&self) -> Result<Board, BoardError> {
        Board::from_glyph_rows(&self.cells)
    }

    pub fn from_board(name: &str, board: &Board, start: Coord) -> Self {
        Self {
            name: name.to_string(),
            start,
            cells: board.glyph_rows(),
        }
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let layout: BoardLayout = serde_json::from_str(&content)?;
        // Reject bad glyphs at load time rather than at solve time
        layout.to_board()?;
        Ok(layout)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The original 6x10 treasure hunt
    pub fn classic() -> Self {
        Self {
            name: "classic".to_string(),
            start: Coord::new(0, 0),
            cells: CLASSIC_ROWS
                .iter()
                .map(|row| row.iter().map(|glyph| glyph.to_string()).collect())
                .collect(),
        }
    }

    /// Random layout; the start cell is always empty
    pub fn random<R: Rng>(rng: &mut R, name: &str, rows: usize, cols: usize, mix: RandomMix) -> Self {
        const TRAPS: [CellKind; 4] = [
            CellKind::Trap1,
            CellKind::Trap2,
            CellKind::Trap3,
            CellKind::Trap4,
        ];
        const REWARDS: [CellKind; 2] = [CellKind::Reward1, CellKind::Reward2];

        let mut cells = vec![vec![CellKind::Empty; cols]; rows];
        for (r, row) in cells.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                if r == 0 && c == 0 {
                    continue;
                }
                let roll: f64 = rng.gen();
                *cell = if roll < mix.obstacle {
                    CellKind::Obstacle
                } else if roll < mix.obstacle + mix.trap {
                    TRAPS[rng.gen_range(0..TRAPS.len())]
                } else if roll < mix.obstacle + mix.trap + mix.reward {
                    REWARDS[rng.gen_range(0..REWARDS.len())]
                } else {
                    CellKind::Empty
                };
            }
        }

        // Treasures go on distinct non-start cells
        let capacity = (rows * cols).saturating_sub(1);
        let mut placed = 0;
        while placed < mix.treasures.min(capacity) {
            let r = rng.gen_range(0..rows);
            let c = rng.gen_range(0..cols);
            if (r, c) == (0, 0) || cells[r][c] == CellKind::Treasure {
                continue;
            }
            cells[r][c] = CellKind::Treasure;
            placed += 1;
        }

        Self {
            name: name.to_string(),
            start: Coord::new(0, 0),
            cells: cells
                .iter()
                .map(|row| row.iter().map(|kind| kind.glyph().to_string()).collect())
                .collect(),
        }
    }

    /// Reproducible random layout
    pub fn seeded(seed: u64, rows: usize, cols: usize, mix: RandomMix) -> Self {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        Self::random(&mut rng, &format!("random-{seed}"), rows, cols, mix)
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::classic()
    }
}
