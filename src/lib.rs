#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

mod reg;

pub mod decode;
pub mod device_impl;

/// Default 7-bit I²C address of the MPL3115A2
pub const DEFAULT_ADDRESS: u8 = reg::DEFAULT_ADDRESS;

/// Value reported by the WHO_AM_I register
pub const CHIP_ID: u8 = reg::WHO_AM_I_VALUE;

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// I²C bus error
    I2c(E),
    /// Chip ID doesn't match the expected value
    UnsupportedChip,
}

/// Power state of the device
///
/// Controlled by the SBYB bit of CTRL_REG1
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    Standby,
    Active,
}

/// Acquisition mode
///
/// Pressure and Altitude share the pressure data registers, the ALT bit
/// selects how the device interprets them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Pressure,
    Altitude,
    Temperature,
}

impl Mode {
    /// Status register bit that flags a completed conversion for this mode
    pub(crate) const fn data_ready_bit(self) -> u8 {
        match self {
            Mode::Pressure | Mode::Altitude => reg::STATUS_PDR,
            Mode::Temperature => reg::STATUS_TDR,
        }
    }
}

/// Clamp an oversample ratio exponent into the 0..=7 range the device accepts.
pub fn clamp_oversample(oversample: i32) -> u8 {
    oversample.clamp(0, 7) as u8
}

/// Worst case conversion time in milliseconds for an oversample exponent.
///
/// Values above 7 are clamped.
pub fn oversample_data_ready_ms(oversample: u8) -> u16 {
    const TABLE: [u16; 8] = [6, 10, 18, 34, 66, 130, 258, 512];
    TABLE[usize::from(oversample.min(7))]
}

pub use device_impl::MPL3115A2;

#[cfg(all(feature = "blocking", feature = "async"))]
compile_error!("Cannot enable both blocking and async features");

#[cfg(not(any(feature = "blocking", feature = "async")))]
compile_error!("Either the blocking or the async feature must be enabled");
