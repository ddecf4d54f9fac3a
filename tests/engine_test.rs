//! End-to-end tests over the public engine API: request parsing, move
//! selection, and cross-checks of the pruned search against a plain
//! minimax reference.

use othello_engine::ai::eval::{EvalParams, Evaluator};
use othello_engine::ai::search::Searcher;
use othello_engine::ai::weights::WeightTable;
use othello_engine::board::Board;
use othello_engine::game::{GameState, PLAYER_BLACK, PLAYER_WHITE};
use othello_engine::protocol;
use othello_engine::types::Position;

fn bit(row: usize, col: usize) -> u64 {
    1u64 << (row * 8 + col)
}

/// Unpruned minimax used as the ground truth for the alpha-beta search.
fn reference_value(evaluator: &Evaluator, state: &GameState, depth: u8) -> i32 {
    if state.is_game_over() || depth == 0 {
        return evaluator.evaluate(state);
    }

    let scores = state
        .legal_positions()
        .into_iter()
        .map(|mv| reference_value(evaluator, &state.apply_move(mv), depth - 1));

    if state.current_player() == evaluator.player() {
        scores.max().unwrap()
    } else {
        scores.min().unwrap()
    }
}

fn reference_score(evaluator: &Evaluator, state: &GameState, mv: Position, depth: u8) -> i32 {
    reference_value(evaluator, &state.apply_move(mv), depth)
}

fn opening_request() -> String {
    let mut cells = [0u8; 64];
    cells[3 * 8 + 3] = 2;
    cells[3 * 8 + 4] = 1;
    cells[4 * 8 + 3] = 1;
    cells[4 * 8 + 4] = 2;

    let mut out = String::from("1\n");
    for row in 0..8 {
        for col in 0..8 {
            out.push_str(&format!("{} ", cells[row * 8 + col]));
        }
        out.push('\n');
    }
    out.push_str("4\n2 3\n3 2\n4 5\n5 4\n");
    out
}

#[test]
fn pruning_never_changes_the_returned_value() {
    let evaluator = Evaluator::new(PLAYER_BLACK);
    let searcher = Searcher::new(&evaluator);

    // The opening position and a few plies into one line of play.
    let mut positions = vec![GameState::new()];
    let mut state = GameState::new();
    for _ in 0..6 {
        state = state.apply_move(state.legal_positions()[0]);
        positions.push(state);
    }

    for state in &positions {
        if state.is_game_over() {
            break;
        }
        for depth in 0..=3 {
            for mv in state.legal_positions() {
                assert_eq!(
                    searcher.score_move(state, mv, depth),
                    reference_score(&evaluator, state, mv, depth),
                    "pruned and unpruned values diverged at depth {depth}"
                );
            }
        }
    }
}

#[test]
fn request_to_move_flow_picks_the_expected_opening_square() {
    let request = protocol::parse_request(&opening_request()).unwrap();
    let state = GameState::from_cells(&request.cells, request.player);
    assert_eq!(state.legal_positions(), request.candidates);

    let evaluator = Evaluator::new(request.player);
    let searcher = Searcher::new(&evaluator);

    let (mv, _score) = searcher
        .select_move(&state, &request.candidates, 1)
        .unwrap();

    // All four openings tie by symmetry; the `>=` rule keeps the last.
    assert_eq!(mv, Position::new(5, 4));
    assert_eq!(protocol::format_move(mv), "5 4\n");
}

#[test]
fn every_schedule_pass_returns_a_listed_candidate() {
    let request = protocol::parse_request(&opening_request()).unwrap();
    let state = GameState::from_cells(&request.cells, request.player);
    let evaluator = Evaluator::new(request.player);
    let searcher = Searcher::new(&evaluator);

    for depth in [0, 2, 4] {
        let (mv, _score) = searcher
            .select_move(&state, &request.candidates, depth)
            .unwrap();
        assert!(request.candidates.contains(&mv), "pass at depth {depth}");
    }
}

#[test]
fn losing_a_whole_edge_swings_both_positional_and_stability_terms() {
    // Black holds the bottom edge except h8; white holds the a8 corner
    // and can play into the gap, flipping the entire edge. Extra discs in
    // the middle keep the game going afterwards.
    let mut black = bit(3, 3) | bit(3, 4);
    for col in 1..7 {
        black |= bit(7, col);
    }
    let white = bit(7, 0) | bit(3, 5);
    let before = GameState::from_board(Board::from_bitboards(black, white), PLAYER_WHITE);
    assert!(before.is_legal(Position::new(7, 7)));

    let after = before.apply_move(Position::new(7, 7));
    assert!(!after.is_game_over());
    assert_eq!(after.current_player(), PLAYER_BLACK);

    // Positional term alone: every flipped edge disc changes hands and
    // white gains the 500-point h8 corner.
    let positional_only = EvalParams {
        mobility_weight: 0,
        stability_bonus: 0,
        ..EvalParams::default()
    };
    let eval = Evaluator::with_params(PLAYER_BLACK, positional_only);
    assert_eq!(eval.evaluate(&after) - eval.evaluate(&before), -460);

    // Stability term alone: white's lone anchored corner grows into two
    // fully anchored corner runs across the captured edge.
    let stability_only = EvalParams {
        weights: WeightTable::new([0; 64]),
        mobility_weight: 0,
        stability_bonus: 8,
    };
    let eval = Evaluator::with_params(PLAYER_BLACK, stability_only);
    assert_eq!(eval.evaluate(&before), -8);
    assert_eq!(eval.evaluate(&after), -128);
}

#[test]
fn self_play_stays_rule_consistent_to_the_end() {
    let black_eval = Evaluator::new(PLAYER_BLACK);
    let white_eval = Evaluator::new(PLAYER_WHITE);
    let mut state = GameState::new();
    let mut plies = 0;

    while !state.is_game_over() && plies < 70 {
        let evaluator = if state.current_player() == PLAYER_BLACK {
            &black_eval
        } else {
            &white_eval
        };
        let searcher = Searcher::new(evaluator);
        let candidates = state.legal_positions();

        let (mv, _score) = searcher.select_move(&state, &candidates, 2).unwrap();
        assert!(candidates.contains(&mv));

        let mover = state.current_player();
        let before_count = state.disc_count(mover);
        state = state.apply_move(mv);

        assert!(state.winner().is_none(), "self-play never probes illegally");
        assert!(state.disc_count(mover) > before_count);
        assert_eq!(
            state.disc_count(PLAYER_BLACK) as u32
                + state.disc_count(PLAYER_WHITE) as u32
                + state.empty_count() as u32,
            64
        );
        plies += 1;
    }

    assert!(state.is_game_over());
    // A finished game's value is the exact disc margin for either side.
    let margin = state.disc_count(PLAYER_BLACK) as i32 - state.disc_count(PLAYER_WHITE) as i32;
    assert_eq!(black_eval.evaluate(&state), margin);
    assert_eq!(white_eval.evaluate(&state), -margin);
}
