use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::types::{BOARD_SIZE, NUM_SQUARES};

const MAGIC: &[u8; 4] = b"OTWT";
const VERSION: u32 = 1;
const HEADER_SIZE: usize = 16;
const PAYLOAD_SIZE: usize = NUM_SQUARES * 4;

/// The two observed corner magnitudes; everything else in the grid is
/// shared between the presets.
const CORNER_HEAVY_CORNER: i32 = 500;
const BALANCED_CORNER: i32 = 100;

static PRESETS: Lazy<BTreeMap<&'static str, WeightTable>> = Lazy::new(|| {
    BTreeMap::from([
        ("corner_heavy", WeightTable::with_corner_weight(CORNER_HEAVY_CORNER)),
        ("balanced", WeightTable::with_corner_weight(BALANCED_CORNER)),
    ])
});

#[derive(Debug, thiserror::Error)]
pub enum WeightsError {
    #[error("weights data too short: expected at least {expected} bytes, got {got}")]
    TooShort { expected: usize, got: usize },

    #[error("invalid weights magic (expected OTWT)")]
    BadMagic,

    #[error("unsupported weights version: expected {expected}, got {got}")]
    BadVersion { expected: u32, got: u32 },

    #[error("CRC32 mismatch: expected {expected:#010x}, got {got:#010x}")]
    CrcMismatch { expected: u32, got: u32 },

    #[error("weights payload must be exactly {expected} bytes, got {got}")]
    BadPayloadLength { expected: usize, got: usize },

    #[error("unknown weight preset: {0:?}")]
    UnknownPreset(String),
}

/// Static positional weight matrix: corners highest, the cells diagonally
/// adjacent to each corner strongly negative, graded smaller weights
/// toward the center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    cells: [i32; NUM_SQUARES],
}

impl WeightTable {
    /// Wraps an explicit row-major weight grid.
    pub fn new(cells: [i32; NUM_SQUARES]) -> Self {
        Self { cells }
    }

    /// The variant with the original 500-point corners.
    pub fn corner_heavy() -> Self {
        PRESETS["corner_heavy"].clone()
    }

    /// The variant with 100-point corners.
    pub fn balanced() -> Self {
        PRESETS["balanced"].clone()
    }

    /// Looks up a preset by its configuration name.
    pub fn from_preset(name: &str) -> Result<Self, WeightsError> {
        PRESETS
            .get(name)
            .cloned()
            .ok_or_else(|| WeightsError::UnknownPreset(name.to_string()))
    }

    fn with_corner_weight(corner: i32) -> Self {
        let grid: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
            [corner, -25, 10, 5, 5, 10, -25, corner],
            [-25, -45, 1, 1, 1, 1, -45, -25],
            [10, 1, 3, 2, 2, 3, 1, 10],
            [5, 1, 2, 1, 1, 2, 1, 5],
            [5, 1, 2, 1, 1, 2, 1, 5],
            [10, 1, 3, 2, 2, 3, 1, 10],
            [-25, -45, 1, 1, 1, 1, -45, -25],
            [corner, -25, 10, 5, 5, 10, -25, corner],
        ];

        let mut cells = [0i32; NUM_SQUARES];
        for (row, row_weights) in grid.iter().enumerate() {
            for (col, &weight) in row_weights.iter().enumerate() {
                cells[row * BOARD_SIZE + col] = weight;
            }
        }
        Self { cells }
    }

    /// Deserializes a table from the binary weights format:
    /// magic, version, CRC32 of the payload, reserved word, then 64
    /// little-endian `i32` weights in row-major order.
    pub fn from_bytes(data: &[u8]) -> Result<Self, WeightsError> {
        if data.len() < HEADER_SIZE {
            return Err(WeightsError::TooShort {
                expected: HEADER_SIZE,
                got: data.len(),
            });
        }

        if &data[0..4] != MAGIC {
            return Err(WeightsError::BadMagic);
        }

        let version = read_u32_le(data, 4);
        if version != VERSION {
            return Err(WeightsError::BadVersion {
                expected: VERSION,
                got: version,
            });
        }

        let expected_crc = read_u32_le(data, 8);
        let payload = &data[HEADER_SIZE..];

        if payload.len() != PAYLOAD_SIZE {
            return Err(WeightsError::BadPayloadLength {
                expected: PAYLOAD_SIZE,
                got: payload.len(),
            });
        }

        let actual_crc = crc32fast::hash(payload);
        if actual_crc != expected_crc {
            return Err(WeightsError::CrcMismatch {
                expected: expected_crc,
                got: actual_crc,
            });
        }

        let mut cells = [0i32; NUM_SQUARES];
        for (i, cell) in cells.iter_mut().enumerate() {
            let start = i * 4;
            let mut chunk = [0u8; 4];
            chunk.copy_from_slice(&payload[start..start + 4]);
            *cell = i32::from_le_bytes(chunk);
        }

        Ok(Self { cells })
    }

    /// Serializes into the format accepted by [`WeightTable::from_bytes`].
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(PAYLOAD_SIZE);
        for weight in &self.cells {
            payload.extend_from_slice(&weight.to_le_bytes());
        }

        let crc = crc32fast::hash(&payload);
        let mut out = Vec::with_capacity(HEADER_SIZE + PAYLOAD_SIZE);
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&payload);
        out
    }

    /// Weight of the square at flat index `pos`.
    pub fn get(&self, pos: usize) -> i32 {
        self.cells[pos]
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::corner_heavy()
    }
}

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(row: usize, col: usize) -> usize {
        row * BOARD_SIZE + col
    }

    #[test]
    fn presets_differ_only_in_corner_magnitude() {
        let heavy = WeightTable::corner_heavy();
        let balanced = WeightTable::balanced();

        for &corner in &[idx(0, 0), idx(0, 7), idx(7, 0), idx(7, 7)] {
            assert_eq!(heavy.get(corner), 500);
            assert_eq!(balanced.get(corner), 100);
        }
        for pos in 0..NUM_SQUARES {
            if ![idx(0, 0), idx(0, 7), idx(7, 0), idx(7, 7)].contains(&pos) {
                assert_eq!(heavy.get(pos), balanced.get(pos));
            }
        }
    }

    #[test]
    fn corner_adjacent_diagonals_are_strongly_negative() {
        let table = WeightTable::corner_heavy();

        assert_eq!(table.get(idx(1, 1)), -45);
        assert_eq!(table.get(idx(1, 6)), -45);
        assert_eq!(table.get(idx(6, 1)), -45);
        assert_eq!(table.get(idx(6, 6)), -45);
        assert_eq!(table.get(idx(0, 1)), -25);
        assert_eq!(table.get(idx(1, 0)), -25);
    }

    #[test]
    fn from_preset_resolves_known_names_and_rejects_others() {
        assert_eq!(
            WeightTable::from_preset("balanced").unwrap(),
            WeightTable::balanced()
        );

        let err = WeightTable::from_preset("aggressive").unwrap_err();
        assert!(matches!(err, WeightsError::UnknownPreset(_)));
    }

    #[test]
    fn bytes_round_trip_preserves_the_table() {
        let table = WeightTable::balanced();
        let bytes = table.to_bytes();

        assert_eq!(WeightTable::from_bytes(&bytes).unwrap(), table);
    }

    #[test]
    fn from_bytes_rejects_invalid_magic() {
        let mut bytes = WeightTable::default().to_bytes();
        bytes[0] = b'X';

        let err = WeightTable::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, WeightsError::BadMagic));
    }

    #[test]
    fn from_bytes_rejects_unsupported_version() {
        let mut bytes = WeightTable::default().to_bytes();
        bytes[4..8].copy_from_slice(&2u32.to_le_bytes());

        let err = WeightTable::from_bytes(&bytes).unwrap_err();
        assert!(matches!(
            err,
            WeightsError::BadVersion {
                expected: 1,
                got: 2
            }
        ));
    }

    #[test]
    fn from_bytes_rejects_crc_mismatch() {
        let mut bytes = WeightTable::default().to_bytes();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;

        let err = WeightTable::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, WeightsError::CrcMismatch { .. }));
    }

    #[test]
    fn from_bytes_rejects_truncated_payload() {
        let mut bytes = WeightTable::default().to_bytes();
        bytes.pop();

        let err = WeightTable::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, WeightsError::BadPayloadLength { .. }));
    }
}
