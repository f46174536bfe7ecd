//! Linear address decomposition.
//!
//! The host presents a 31-bit byte address. The least-significant bit is
//! discarded (the port is 16 bits wide, so there is no sub-word addressing)
//! and the remaining word address splits into column, row, and bank fields:
//!
//! ```text
//! word = addr >> 1
//! column = word[8:0]
//! row    = word[21:9]
//! bank   = word[23:22]
//! ```
//!
//! Unaligned or out-of-range addresses are undefined and are not checked.

use crate::common::constants::{
    BANK_ADDR_MASK, COL_ADDR_MASK, NUM_COL_ADDR_BITS, NUM_ROW_ADDR_BITS, ROW_ADDR_MASK,
};

/// The bank/row/column fields of a decomposed host address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressFields {
    /// Bank select (2 bits).
    pub bank: u8,
    /// Row address (13 bits).
    pub row: u16,
    /// Column address (9 bits).
    pub col: u16,
}

impl AddressFields {
    /// Decomposes a linear host byte address into bank, row, and column.
    pub fn decompose(addr: u32) -> Self {
        let word = addr >> 1;
        Self {
            bank: ((word >> (NUM_COL_ADDR_BITS + NUM_ROW_ADDR_BITS)) & BANK_ADDR_MASK) as u8,
            row: ((word >> NUM_COL_ADDR_BITS) & ROW_ADDR_MASK) as u16,
            col: (word & COL_ADDR_MASK) as u16,
        }
    }
}
