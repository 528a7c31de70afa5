//! MPL3115A2 driver
//!
//! Every measurement goes through the same pipeline: make sure the device is
//! in the right acquisition mode, wait for (or trigger) a conversion, burst
//! read the output registers and decode them.

use log::{debug, trace, warn};

#[cfg(feature = "blocking")]
use embedded_hal::{delay::DelayNs, i2c::I2c};
#[cfg(feature = "async")]
use embedded_hal_async::{delay::DelayNs as AsyncDelayNs, i2c::I2c as AsyncI2c};

use crate::{clamp_oversample, decode, reg, Error, Mode, PowerMode};

/// MPL3115A2 pressure, altitude and temperature sensor
pub struct MPL3115A2<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    mode: Option<Mode>,
    power: Option<PowerMode>,
}

impl<I2C, D> MPL3115A2<I2C, D> {
    /// Create a driver for a device at the default address (0x60).
    ///
    /// Nothing is sent on the bus until [`init`](Self::init) is called.
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_address(i2c, delay, reg::DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            mode: None,
            power: None,
        }
    }

    /// Acquisition mode last written to the device, `None` before init
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Power state last written to the device, `None` before init
    pub fn power_mode(&self) -> Option<PowerMode> {
        self.power
    }

    /// Give back the I²C bus and the delay
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

#[maybe_async_cfg::maybe(
    sync(
        cfg(feature = "blocking"),
        self = "MPL3115A2",
        idents(AsyncI2c(sync = "I2c"), AsyncDelayNs(sync = "DelayNs"))
    ),
    async(feature = "async", keep_self)
)]
impl<I2C, D, E> MPL3115A2<I2C, D>
where
    I2C: AsyncI2c<Error = E>,
    D: AsyncDelayNs,
{
    /// Read a single register
    pub async fn read_register(&mut self, register: u8) -> Result<u8, Error<E>> {
        let mut buf = [0u8; 1];
        self.read_burst(register, &mut buf).await?;
        Ok(buf[0])
    }

    /// Read `buf.len()` consecutive registers starting at `register`
    pub async fn read_burst(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Error<E>> {
        self.i2c
            .write_read(self.address, &[register], buf)
            .await
            .map_err(Error::I2c)
    }

    /// Write a single register
    pub async fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<E>> {
        self.i2c
            .write(self.address, &[register, value])
            .await
            .map_err(Error::I2c)
    }

    /// Read `register`, clear the bits in `clear`, set the bits in `set` and
    /// write the result back.
    ///
    /// If the write fails the register content on the device is unknown.
    pub async fn modify_register(&mut self, register: u8, clear: u8, set: u8) -> Result<(), Error<E>> {
        let value = self.read_register(register).await?;
        self.write_register(register, (value & !clear) | set).await
    }

    /// Read the WHO_AM_I register
    pub async fn chip_id(&mut self) -> Result<u8, Error<E>> {
        self.read_register(reg::WHO_AM_I).await
    }

    /// Verify that the device answering on the bus is an MPL3115A2
    pub async fn check_chip_id(&mut self) -> Result<(), Error<E>> {
        let id = self.chip_id().await?;
        if id != reg::WHO_AM_I_VALUE {
            warn!("unexpected chip id {:#04x}", id);
            return Err(Error::UnsupportedChip);
        }
        Ok(())
    }

    /// Bring the device into a known state.
    ///
    /// Leaves it active in pressure mode with the given oversample ratio
    /// (clamped to 0..=7) and data ready events enabled.
    pub async fn init(&mut self, oversample: i32) -> Result<(), Error<E>> {
        self.mode = None;
        self.standby().await?;
        self.set_mode(Mode::Pressure).await?;
        self.set_oversample_rate(oversample).await?;
        self.enable_event_flags().await?;
        self.active().await
    }

    pub async fn standby(&mut self) -> Result<(), Error<E>> {
        self.modify_register(reg::CTRL_REG1, reg::CTRL1_SBYB, 0).await?;
        self.power = Some(PowerMode::Standby);
        Ok(())
    }

    pub async fn active(&mut self) -> Result<(), Error<E>> {
        self.modify_register(reg::CTRL_REG1, 0, reg::CTRL1_SBYB).await?;
        self.power = Some(PowerMode::Active);
        Ok(())
    }

    /// Select the acquisition mode. Only takes effect in standby.
    ///
    /// The ALT bit is set for every mode other than pressure.
    pub async fn set_mode(&mut self, mode: Mode) -> Result<(), Error<E>> {
        let alt = match mode {
            Mode::Pressure => 0,
            Mode::Altitude | Mode::Temperature => reg::CTRL1_ALT,
        };
        self.modify_register(reg::CTRL_REG1, reg::CTRL1_ALT, alt).await?;
        self.mode = Some(mode);
        Ok(())
    }

    /// Write the oversample ratio exponent, clamped to 0..=7.
    pub async fn set_oversample_rate(&mut self, oversample: i32) -> Result<(), Error<E>> {
        let osr = clamp_oversample(oversample);
        self.modify_register(reg::CTRL_REG1, reg::CTRL1_OS_MASK, osr << reg::CTRL1_OS_SHIFT)
            .await
    }

    /// Enable pressure and temperature data ready event flags
    pub async fn enable_event_flags(&mut self) -> Result<(), Error<E>> {
        self.write_register(reg::PT_DATA_CFG, reg::PT_DATA_CFG_EVENTS).await
    }

    /// Switch acquisition mode unless the recorded mode already matches.
    async fn ensure_mode(&mut self, mode: Mode) -> Result<(), Error<E>> {
        if self.mode == Some(mode) {
            return Ok(());
        }
        debug!("switching to {:?} mode", mode);
        self.standby().await?;
        self.set_mode(mode).await?;
        self.active().await
    }

    /// Force a new conversion with a 0→1 edge on OST, whatever its current value.
    async fn trigger_one_shot(&mut self) -> Result<(), Error<E>> {
        trace!("one-shot trigger");
        self.modify_register(reg::CTRL_REG1, reg::CTRL1_OST, 0).await?;
        self.modify_register(reg::CTRL_REG1, 0, reg::CTRL1_OST).await
    }

    /// Returns `false` when the flag did not show up within the poll budget.
    async fn wait_for_data(&mut self, flag: u8) -> Result<bool, Error<E>> {
        let status = self.read_register(reg::STATUS).await?;
        if status & flag != 0 {
            return Ok(true);
        }
        self.trigger_one_shot().await?;

        for _ in 0..reg::DATA_READY_POLLS {
            let status = self.read_register(reg::STATUS).await?;
            if status & flag != 0 {
                return Ok(true);
            }
            self.delay.delay_ms(reg::DATA_READY_POLL_MS).await;
        }
        warn!("data ready timeout, status flag {:#04x}", flag);
        Ok(false)
    }

    async fn read_raw_pressure_registers(&mut self, mode: Mode) -> Result<Option<u32>, Error<E>> {
        self.ensure_mode(mode).await?;
        if !self.wait_for_data(mode.data_ready_bit()).await? {
            return Ok(None);
        }
        let mut data = [0u8; 3];
        self.read_burst(reg::OUT_P_MSB, &mut data).await?;
        Ok(Some(decode::raw_pressure(data)))
    }

    /// Raw 20-bit altitude sample (signed Q16.4), `None` if no data became ready
    pub async fn get_raw_altitude(&mut self) -> Result<Option<u32>, Error<E>> {
        self.read_raw_pressure_registers(Mode::Altitude).await
    }

    /// Raw 20-bit pressure sample (unsigned Q18.2), `None` if no data became ready
    pub async fn get_raw_pressure(&mut self) -> Result<Option<u32>, Error<E>> {
        self.read_raw_pressure_registers(Mode::Pressure).await
    }

    /// Raw 12-bit temperature sample (signed Q8.4), `None` if no data became ready
    pub async fn get_raw_temperature(&mut self) -> Result<Option<u16>, Error<E>> {
        self.ensure_mode(Mode::Temperature).await?;
        if !self.wait_for_data(Mode::Temperature.data_ready_bit()).await? {
            return Ok(None);
        }
        let mut data = [0u8; 2];
        self.read_burst(reg::OUT_T_MSB, &mut data).await?;
        Ok(Some(decode::raw_temperature(data)))
    }

    /// Altitude in meters
    pub async fn get_altitude(&mut self) -> Result<Option<f32>, Error<E>> {
        Ok(self.get_raw_altitude().await?.map(decode::altitude))
    }

    /// Pressure in Pa
    pub async fn get_pressure(&mut self) -> Result<Option<f32>, Error<E>> {
        Ok(self.get_raw_pressure().await?.map(decode::pressure))
    }

    /// Temperature in °C
    pub async fn get_temp_c(&mut self) -> Result<Option<f32>, Error<E>> {
        Ok(self.get_raw_temperature().await?.map(decode::temperature))
    }
}
