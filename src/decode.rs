//! Conversion of raw output register contents into physical units.
//!
//! The sign corrections are applied to the scaled value. Both divisors are
//! powers of two, so comparing after the division gives the same result as a
//! two's complement interpretation of the raw word.

/// Assemble the 20-bit pressure/altitude sample from OUT_P_MSB..OUT_P_LSB.
pub fn raw_pressure(data: [u8; 3]) -> u32 {
    ((u32::from(data[0]) << 16) | (u32::from(data[1]) << 8) | u32::from(data[2])) >> 4
}

/// Assemble the 12-bit temperature sample from OUT_T_MSB..OUT_T_LSB.
pub fn raw_temperature(data: [u8; 2]) -> u16 {
    (u16::from(data[0]) << 4) | (u16::from(data[1]) >> 4)
}

/// Pressure in Pa from an unsigned Q18.2 sample.
pub fn pressure(raw: u32) -> f32 {
    cast::f32(raw) / 4.0
}

/// Altitude in meters from a signed Q16.4 sample.
pub fn altitude(raw: u32) -> f32 {
    let alt = cast::f32(raw) / 16.0;
    if alt > 32767.0 {
        alt - 65536.0
    } else {
        alt
    }
}

/// Temperature in °C from a signed Q8.4 sample.
pub fn temperature(raw: u16) -> f32 {
    let temp = cast::f32(raw) / 16.0;
    if temp > 127.0 {
        temp - 256.0
    } else {
        temp
    }
}
