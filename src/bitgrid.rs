//! Bit-packed 2D boolean array backing the wall storage.

use crate::error::HexError;
use rand::Rng;

/// A fixed-size 2D bit array. Bits are stored row-major, packed eight per
/// byte with the most significant bit first, which is also the byte order
/// of the hex-encoded form.
///
/// Unused bits in the final byte are kept zero by every bulk operation, so
/// equality and the encoded form do not depend on how a grid was produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitGrid {
    rows: usize,
    cols: usize,
    bytes: Vec<u8>,
}

impl BitGrid {
    /// Creates a `rows` x `cols` grid with every bit cleared. Either
    /// dimension may be zero, giving an empty grid.
    pub fn new(rows: usize, cols: usize) -> BitGrid {
        BitGrid {
            rows,
            cols,
            bytes: vec![0; (rows * cols + 7) / 8],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of bytes backing the packed bits.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    fn bit_ix(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        let ix = self.bit_ix(row, col);
        self.bytes[ix / 8] & (0x80 >> (ix % 8)) != 0
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        let ix = self.bit_ix(row, col);
        let mask = 0x80 >> (ix % 8);
        if value {
            self.bytes[ix / 8] |= mask;
        } else {
            self.bytes[ix / 8] &= !mask;
        }
    }

    /// Sets every bit to `value`.
    pub fn fill(&mut self, value: bool) {
        let byte = if value { 0xff } else { 0x00 };
        for b in self.bytes.iter_mut() {
            *b = byte;
        }
        self.mask_tail();
    }

    /// Replaces the packed bytes with a uniform random byte stream from `rng`.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for b in self.bytes.iter_mut() {
            *b = rng.gen();
        }
        self.mask_tail();
    }

    fn mask_tail(&mut self) {
        let used = self.rows * self.cols % 8;
        if used != 0 {
            if let Some(last) = self.bytes.last_mut() {
                *last &= 0xffu8 << (8 - used);
            }
        }
    }

    /// Encodes the packed bytes as lowercase hex, two characters per byte.
    /// An empty grid encodes as the empty string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Decodes a hex byte run produced by [to_hex](Self::to_hex) into a new
    /// `rows` x `cols` grid. The run must contain exactly two hex digits per
    /// backing byte; digits are accepted in either case.
    pub fn from_hex(rows: usize, cols: usize, hex: &str) -> Result<BitGrid, HexError> {
        let mut grid = BitGrid::new(rows, cols);
        let expected = grid.bytes.len() * 2;
        if hex.len() != expected {
            return Err(HexError::Length {
                expected,
                found: hex.len(),
            });
        }
        for i in 0..grid.bytes.len() {
            let pair = hex.get(i * 2..i * 2 + 2).ok_or(HexError::Digit { pos: i * 2 })?;
            if !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(HexError::Digit { pos: i * 2 });
            }
            grid.bytes[i] = u8::from_str_radix(pair, 16).map_err(|_| HexError::Digit { pos: i * 2 })?;
        }
        grid.mask_tail();
        Ok(grid)
    }
}
