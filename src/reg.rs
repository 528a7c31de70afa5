//! Register map of the MPL3115A2

pub const DEFAULT_ADDRESS: u8 = 0x60;
pub const WHO_AM_I_VALUE: u8 = 0xC4;

pub const STATUS: u8 = 0x00;
pub const OUT_P_MSB: u8 = 0x01;
pub const OUT_T_MSB: u8 = 0x04;
pub const WHO_AM_I: u8 = 0x0C;
pub const PT_DATA_CFG: u8 = 0x13;
pub const CTRL_REG1: u8 = 0x26;

// STATUS
pub const STATUS_TDR: u8 = 1 << 1;
pub const STATUS_PDR: u8 = 1 << 2;

// CTRL_REG1
pub const CTRL1_SBYB: u8 = 1 << 0;
pub const CTRL1_OST: u8 = 1 << 1;
pub const CTRL1_OS_SHIFT: u8 = 3;
pub const CTRL1_OS_MASK: u8 = 0x07 << CTRL1_OS_SHIFT;
pub const CTRL1_ALT: u8 = 1 << 7;

// PT_DATA_CFG: data ready event flags for pressure and temperature
pub const PT_DATA_CFG_EVENTS: u8 = 0x07;

/// Status polls after a one-shot trigger before giving up
pub const DATA_READY_POLLS: u8 = 100;
pub const DATA_READY_POLL_MS: u32 = 10;
