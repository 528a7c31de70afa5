//! Transaction builders for driving the driver against an I²C mock
#![allow(dead_code)]

use embedded_hal::delay::DelayNs;
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use sw03::MPL3115A2;

pub const ADDR: u8 = 0x60;

pub const STATUS: u8 = 0x00;
pub const OUT_P_MSB: u8 = 0x01;
pub const OUT_T_MSB: u8 = 0x04;
pub const WHO_AM_I: u8 = 0x0C;
pub const PT_DATA_CFG: u8 = 0x13;
pub const CTRL_REG1: u8 = 0x26;

pub const SBYB: u8 = 0x01;
pub const OST: u8 = 0x02;
pub const ALT: u8 = 0x80;
pub const OS_MASK: u8 = 0x38;

pub const TDR: u8 = 0x02;
pub const PDR: u8 = 0x04;

pub type Sensor = MPL3115A2<I2cMock, NoopDelay>;

pub fn sensor(expectations: &[I2cTransaction]) -> Sensor {
    MPL3115A2::new(I2cMock::new(expectations), NoopDelay::new())
}

/// Check that every expected transaction was consumed
pub fn finish(sensor: Sensor) {
    let (mut i2c, _) = sensor.release();
    i2c.done();
}

/// Delay that records every requested wait instead of sleeping
#[derive(Default)]
pub struct RecordingDelay {
    pub delays_ns: Vec<u64>,
}

impl RecordingDelay {
    pub fn total_ms(&self) -> u64 {
        self.delays_ns.iter().sum::<u64>() / 1_000_000
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_ns.push(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.delays_ns.push(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ns.push(u64::from(ms) * 1_000_000);
    }
}

pub fn read(register: u8, value: u8) -> I2cTransaction {
    I2cTransaction::write_read(ADDR, vec![register], vec![value])
}

pub fn burst(register: u8, data: &[u8]) -> I2cTransaction {
    I2cTransaction::write_read(ADDR, vec![register], data.to_vec())
}

pub fn write(register: u8, value: u8) -> I2cTransaction {
    I2cTransaction::write(ADDR, vec![register, value])
}

/// Read-modify-write of CTRL_REG1, returns the value written
pub fn modify_ctrl(tx: &mut Vec<I2cTransaction>, ctrl: u8, clear: u8, set: u8) -> u8 {
    let new = (ctrl & !clear) | set;
    tx.push(read(CTRL_REG1, ctrl));
    tx.push(write(CTRL_REG1, new));
    new
}

/// `init(osr)` starting from `ctrl`, returns CTRL_REG1 afterwards
pub fn init_sequence(tx: &mut Vec<I2cTransaction>, ctrl: u8, osr: u8) -> u8 {
    let ctrl = modify_ctrl(tx, ctrl, SBYB, 0);
    let ctrl = modify_ctrl(tx, ctrl, ALT, 0);
    let ctrl = modify_ctrl(tx, ctrl, OS_MASK, osr << 3);
    tx.push(write(PT_DATA_CFG, 0x07));
    modify_ctrl(tx, ctrl, 0, SBYB)
}

/// standby → set mode → active
pub fn mode_switch(tx: &mut Vec<I2cTransaction>, ctrl: u8, alt: bool) -> u8 {
    let ctrl = modify_ctrl(tx, ctrl, SBYB, 0);
    let ctrl = modify_ctrl(tx, ctrl, ALT, if alt { ALT } else { 0 });
    modify_ctrl(tx, ctrl, 0, SBYB)
}

pub fn one_shot(tx: &mut Vec<I2cTransaction>, ctrl: u8) -> u8 {
    let ctrl = modify_ctrl(tx, ctrl, OST, 0);
    modify_ctrl(tx, ctrl, 0, OST)
}

/// `init(0)` from the power-on CTRL_REG1 value
pub fn initialised(tx: &mut Vec<I2cTransaction>) -> u8 {
    init_sequence(tx, 0x00, 0)
}
