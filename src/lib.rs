//! Othello move-selection engine.
//!
//! The core is a rule-enforcing board simulation ([`game::GameState`]), a
//! multi-term positional heuristic ([`ai::eval::Evaluator`]), and a
//! depth-limited alpha-beta search ([`ai::search::Searcher`]) combining
//! the two to rate candidate moves. [`protocol`] and [`config`] cover the
//! file-based request exchange and the tunable engine settings.

pub mod ai;
pub mod board;
pub mod config;
pub mod game;
pub mod protocol;
pub mod types;
