use crate::ai::weights::WeightTable;
use crate::game::{GameState, opponent_of};
use crate::types::{BOARD_SIZE, NUM_SQUARES};

/// Coefficients for the non-terminal heuristic terms.
#[derive(Debug, Clone)]
pub struct EvalParams {
    pub weights: WeightTable,
    /// Per-legal-move bonus for whichever side holds the move.
    pub mobility_weight: i32,
    /// Per-disc bonus for edge runs anchored at an occupied corner.
    pub stability_bonus: i32,
}

impl Default for EvalParams {
    fn default() -> Self {
        Self {
            weights: WeightTable::default(),
            mobility_weight: 2,
            stability_bonus: 8,
        }
    }
}

/// Each corner with the two edge directions leading away from it.
const CORNERS: [(usize, (i32, i32), (i32, i32)); 4] = [
    (0, (0, 1), (1, 0)),
    (7, (0, -1), (1, 0)),
    (56, (0, 1), (-1, 0)),
    (63, (0, -1), (-1, 0)),
];

/// Scores positions from a fixed player's point of view; higher is better
/// for that player.
///
/// A finished game scores as the signed final disc margin. Anything else
/// sums the positional weight table, a mobility bonus signed by whose turn
/// it is, and a corner-anchored stability bonus.
#[derive(Debug, Clone)]
pub struct Evaluator {
    me: u8,
    params: EvalParams,
}

impl Evaluator {
    pub fn new(me: u8) -> Self {
        Self::with_params(me, EvalParams::default())
    }

    pub fn with_params(me: u8, params: EvalParams) -> Self {
        Self { me, params }
    }

    /// The player this evaluator scores for.
    pub fn player(&self) -> u8 {
        self.me
    }

    pub fn evaluate(&self, state: &GameState) -> i32 {
        let opp = opponent_of(self.me);
        if state.is_game_over() {
            return state.disc_count(self.me) as i32 - state.disc_count(opp) as i32;
        }

        let cells = state.board().to_array();
        self.positional(&cells) + self.mobility(state) + self.stability(&cells)
    }

    fn positional(&self, cells: &[u8; NUM_SQUARES]) -> i32 {
        let opp = opponent_of(self.me);
        let mut total = 0;

        for (pos, &cell) in cells.iter().enumerate() {
            if cell == self.me {
                total += self.params.weights.get(pos);
            } else if cell == opp {
                total -= self.params.weights.get(pos);
            }
        }

        total
    }

    fn mobility(&self, state: &GameState) -> i32 {
        let options = state.legal_move_count() as i32;
        let signed = if state.current_player() == self.me {
            options
        } else {
            -options
        };
        self.params.mobility_weight * signed
    }

    /// Walks outward from each occupied corner along both of its edges,
    /// crediting the corner disc once plus every contiguous same-color
    /// disc; a run stops at the first mismatch or empty cell.
    fn stability(&self, cells: &[u8; NUM_SQUARES]) -> i32 {
        let mut total = 0;

        for (corner, first_edge, second_edge) in CORNERS {
            let color = cells[corner];
            if color == 0 {
                continue;
            }

            let anchored = 1
                + edge_run(cells, corner, first_edge, color)
                + edge_run(cells, corner, second_edge, color);
            let sign = if color == self.me { 1 } else { -1 };
            total += sign * self.params.stability_bonus * anchored;
        }

        total
    }
}

fn edge_run(cells: &[u8; NUM_SQUARES], corner: usize, dir: (i32, i32), color: u8) -> i32 {
    let mut row = (corner / BOARD_SIZE) as i32 + dir.0;
    let mut col = (corner % BOARD_SIZE) as i32 + dir.1;
    let mut run = 0;

    while (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col) {
        if cells[(row as usize) * BOARD_SIZE + col as usize] != color {
            break;
        }
        run += 1;
        row += dir.0;
        col += dir.1;
    }

    run
}
