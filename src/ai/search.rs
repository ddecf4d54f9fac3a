use crate::ai::eval::Evaluator;
use crate::game::GameState;
use crate::types::Position;

/// Depth-limited minimax with alpha-beta pruning.
///
/// Nodes where the evaluator's player holds the move maximize; opponent
/// nodes minimize. Children are expanded in the row-major order of the
/// legal-move enumeration, and every recursive call works on its own copy
/// of the state. Pruning only skips work: the returned value is always
/// identical to an unpruned minimax of the same depth.
pub struct Searcher<'a> {
    evaluator: &'a Evaluator,
}

impl<'a> Searcher<'a> {
    pub fn new(evaluator: &'a Evaluator) -> Self {
        Self { evaluator }
    }

    /// Scores one candidate root move: the value of the position reached
    /// by `mv` under optimal play for `depth` further plies. Depth 0
    /// returns the static evaluation of that position.
    ///
    /// A candidate outside the legal set forfeits the game for the mover
    /// and is scored like any other terminal leaf.
    pub fn score_move(&self, state: &GameState, mv: Position, depth: u8) -> i32 {
        let next = state.apply_move(mv);
        self.minimax(&next, depth, i32::MIN, i32::MAX)
    }

    /// Picks the best candidate, scoring them in the given order. A later
    /// candidate whose score ties the running best replaces it, so the
    /// last of several equal scorers wins.
    pub fn select_move(
        &self,
        state: &GameState,
        candidates: &[Position],
        depth: u8,
    ) -> Option<(Position, i32)> {
        let mut best: Option<(Position, i32)> = None;

        for &mv in candidates {
            let score = self.score_move(state, mv, depth);
            match best {
                Some((_, best_score)) if score < best_score => {}
                _ => best = Some((mv, score)),
            }
        }

        best
    }

    fn minimax(&self, state: &GameState, depth: u8, mut alpha: i32, mut beta: i32) -> i32 {
        if state.is_game_over() || depth == 0 {
            return self.evaluator.evaluate(state);
        }

        if state.current_player() == self.evaluator.player() {
            let mut best = i32::MIN;
            for mv in state.legal_positions() {
                let score = self.minimax(&state.apply_move(mv), depth - 1, alpha, beta);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for mv in state.legal_positions() {
                let score = self.minimax(&state.apply_move(mv), depth - 1, alpha, beta);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}
