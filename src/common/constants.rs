//! Geometry constants for the simulated SDRAM device.
//!
//! The device is a 256 Mbit x16 part: 4 banks of 8192 rows by 512 columns,
//! 16 bits per column. All address masks and widths used by the controller
//! and the device model derive from the constants here.

/// Width of one data element in bits.
pub const NUM_ELEMENT_BITS: u32 = 16;

/// Number of row address bits.
pub const NUM_ROW_ADDR_BITS: u32 = 13;
/// Number of rows per bank.
pub const NUM_ROWS: u32 = 1 << NUM_ROW_ADDR_BITS;
/// Mask extracting a row index from a word address.
pub const ROW_ADDR_MASK: u32 = NUM_ROWS - 1;

/// Number of column address bits.
pub const NUM_COL_ADDR_BITS: u32 = 9;
/// Number of columns per row.
pub const NUM_COLS: u32 = 1 << NUM_COL_ADDR_BITS;
/// Mask extracting a column index from a word address.
pub const COL_ADDR_MASK: u32 = NUM_COLS - 1;

/// Number of bank address bits.
pub const NUM_BANK_ADDR_BITS: u32 = 2;
/// Number of banks.
pub const NUM_BANKS: u32 = 1 << NUM_BANK_ADDR_BITS;
/// Mask extracting a bank index from a word address.
pub const BANK_ADDR_MASK: u32 = NUM_BANKS - 1;

/// Address line A10, set on a Read/Write command to request auto-precharge.
pub const AUTO_PRECHARGE_BIT: u16 = 1 << 10;

/// Address line A10, set on a Precharge command to precharge all banks.
pub const PRECHARGE_ALL_BIT: u16 = 1 << 10;

/// Mask for the two DQM (byte mask) lines.
pub const DQM_MASK: u8 = 0b11;
