use crate::board::Board;
use crate::types::{NUM_SQUARES, Position, bitmask_to_positions};

pub const PLAYER_BLACK: u8 = 1;
pub const PLAYER_WHITE: u8 = 2;

pub fn opponent_of(player: u8) -> u8 {
    match player {
        PLAYER_BLACK => PLAYER_WHITE,
        PLAYER_WHITE => PLAYER_BLACK,
        _ => unreachable!("invalid player value: {}", player),
    }
}

/// One position of the game: grid, side to move, cached legal moves, and
/// terminal bookkeeping.
///
/// The struct is `Copy`; [`GameState::apply_move`] derives a fresh state
/// and never mutates the receiver, so sibling search branches cannot
/// observe each other's speculative moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: u8,
    legal: u64,
    is_game_over: bool,
    winner: Option<u8>,
}

impl GameState {
    /// The standard starting position, black to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), PLAYER_BLACK)
    }

    /// Builds a state from the external cell encoding and side to move.
    pub fn from_cells(cells: &[u8; NUM_SQUARES], current_player: u8) -> Self {
        Self::from_board(Board::from_array(cells), current_player)
    }

    pub fn from_board(board: Board, current_player: u8) -> Self {
        let mut state = Self {
            board,
            current_player,
            legal: 0,
            is_game_over: false,
            winner: None,
        };
        state.refresh_turn();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> u8 {
        self.current_player
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    /// Set only when an illegal probe forfeited the game; a naturally
    /// finished game scores by disc counts instead.
    pub fn winner(&self) -> Option<u8> {
        self.winner
    }

    /// Legal moves for the side to move, row-major order.
    pub fn legal_positions(&self) -> Vec<Position> {
        bitmask_to_positions(self.legal)
    }

    pub fn legal_move_count(&self) -> u32 {
        self.legal.count_ones()
    }

    pub fn has_legal_moves(&self) -> bool {
        self.legal != 0
    }

    pub fn is_legal(&self, p: Position) -> bool {
        (self.legal & (1u64 << p.index())) != 0
    }

    pub fn disc_count(&self, player: u8) -> u8 {
        let (black, white) = self.board.count();
        if player == PLAYER_BLACK { black } else { white }
    }

    pub fn empty_count(&self) -> u8 {
        self.board.empty_count()
    }

    /// Plays `p` for the side to move and returns the derived state.
    ///
    /// Control passes to the opponent; if the opponent has no legal move
    /// the turn passes back (forced pass), and if neither side can move
    /// the game is over.
    ///
    /// Applying a coordinate outside the legal set forfeits: the result is
    /// terminal with the mover's opponent recorded as winner. Search
    /// scores such a state as a normal leaf.
    pub fn apply_move(&self, p: Position) -> GameState {
        let mut next = *self;

        let flips = next.board.place(p.index(), next.current_player == PLAYER_BLACK);
        if flips == 0 {
            next.is_game_over = true;
            next.winner = Some(opponent_of(next.current_player));
            next.legal = 0;
            return next;
        }

        next.current_player = opponent_of(next.current_player);
        next.refresh_turn();
        next
    }

    /// Recomputes the cached legal moves, applying the pass rule: a side
    /// with no move yields the turn back, and two empty move sets in
    /// succession end the game.
    fn refresh_turn(&mut self) {
        self.legal = self.moves_for(self.current_player);
        if self.legal != 0 {
            return;
        }

        self.current_player = opponent_of(self.current_player);
        self.legal = self.moves_for(self.current_player);
        if self.legal == 0 {
            self.is_game_over = true;
        }
    }

    fn moves_for(&self, player: u8) -> u64 {
        self.board.legal_moves(player == PLAYER_BLACK)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
