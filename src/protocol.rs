use crate::game::{PLAYER_BLACK, PLAYER_WHITE};
use crate::types::{BOARD_SIZE, NUM_SQUARES, Position};

/// One move request: who the engine plays as, the grid in the external
/// 0/1/2 encoding, and the caller-enumerated candidate moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub player: u8,
    pub cells: [u8; NUM_SQUARES],
    pub candidates: Vec<Position>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("unexpected end of input while reading {0}")]
    UnexpectedEof(&'static str),

    #[error("invalid integer {token:?} while reading {field}")]
    InvalidToken { field: &'static str, token: String },

    #[error("player id must be 1 or 2, got {0}")]
    InvalidPlayer(i64),

    #[error("cell value must be 0, 1, or 2, got {0}")]
    InvalidCell(i64),

    #[error("candidate count must be between 0 and 64, got {0}")]
    InvalidCount(i64),

    #[error("coordinate out of range: ({0}, {1})")]
    CoordinateOutOfRange(i64, i64),
}

/// Parses a request stream: player id, 64 cells row-major, candidate
/// count, then that many `row col` pairs. Whitespace of any shape
/// separates tokens.
pub fn parse_request(input: &str) -> Result<MoveRequest, ProtocolError> {
    let mut tokens = input.split_whitespace();

    let player = next_int(&mut tokens, "player id")?;
    if player != PLAYER_BLACK as i64 && player != PLAYER_WHITE as i64 {
        return Err(ProtocolError::InvalidPlayer(player));
    }

    let mut cells = [0u8; NUM_SQUARES];
    for cell in cells.iter_mut() {
        let value = next_int(&mut tokens, "board cell")?;
        if !(0..=2).contains(&value) {
            return Err(ProtocolError::InvalidCell(value));
        }
        *cell = value as u8;
    }

    let count = next_int(&mut tokens, "candidate count")?;
    if !(0..=NUM_SQUARES as i64).contains(&count) {
        return Err(ProtocolError::InvalidCount(count));
    }

    let mut candidates = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let row = next_int(&mut tokens, "candidate row")?;
        let col = next_int(&mut tokens, "candidate column")?;
        if !(0..BOARD_SIZE as i64).contains(&row) || !(0..BOARD_SIZE as i64).contains(&col) {
            return Err(ProtocolError::CoordinateOutOfRange(row, col));
        }
        candidates.push(Position::new(row as u8, col as u8));
    }

    Ok(MoveRequest {
        player: player as u8,
        cells,
        candidates,
    })
}

/// Formats the chosen move as the `row col` line the response stream
/// expects.
pub fn format_move(p: Position) -> String {
    format!("{} {}\n", p.row, p.col)
}

fn next_int<'a, I>(tokens: &mut I, field: &'static str) -> Result<i64, ProtocolError>
where
    I: Iterator<Item = &'a str>,
{
    let token = tokens.next().ok_or(ProtocolError::UnexpectedEof(field))?;
    token.parse().map_err(|_| ProtocolError::InvalidToken {
        field,
        token: token.to_string(),
    })
}
