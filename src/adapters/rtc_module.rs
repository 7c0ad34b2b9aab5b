//! DS3231 + AT24C32 breakout adapter.
//!
//! The common RTC breakout carries both chips on one I2C bus: the
//! DS3231 clock at 0x68 and a 4 KiB AT24C32 EEPROM at 0x57. One
//! adapter owns the bus and serves both the [`ClockPort`] and the
//! [`StoragePort`].

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::app::ports::{ClockPort, StoragePort};
use crate::clock::Timestamp;
use crate::error::{ClockError, StorageError};

const DS3231_ADDR: u8 = 0x68;
const AT24C32_ADDR: u8 = 0x57;
const AT24C32_CAPACITY: usize = 4096;
/// AT24C32 internal write cycle, datasheet maximum.
const EEPROM_WRITE_CYCLE_MS: u32 = 5;

const REG_SECONDS: u8 = 0x00;
const REG_STATUS: u8 = 0x0F;
/// Oscillator stop flag: set while the clock was unpowered.
const STATUS_OSF: u8 = 0x80;

pub struct RtcModule<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C: I2c, D: DelayNs> RtcModule<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Check the DS3231 answers on the bus at all.
    pub fn probe(&mut self) -> Result<(), ClockError> {
        self.read_reg(REG_STATUS)
            .map(|_| ())
            .map_err(|_| ClockError::NotFound)
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8, ClockError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(DS3231_ADDR, &[reg], &mut buf)
            .map_err(|_| ClockError::BusError)?;
        Ok(buf[0])
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), ClockError> {
        self.i2c
            .write(DS3231_ADDR, &[reg, value])
            .map_err(|_| ClockError::BusError)
    }
}

impl<I2C: I2c, D: DelayNs> ClockPort for RtcModule<I2C, D> {
    fn now(&mut self) -> Result<Timestamp, ClockError> {
        let mut regs = [0u8; 7];
        self.i2c
            .write_read(DS3231_ADDR, &[REG_SECONDS], &mut regs)
            .map_err(|_| ClockError::BusError)?;
        Ok(Timestamp {
            second: bcd_to_dec(regs[0] & 0x7F),
            minute: bcd_to_dec(regs[1] & 0x7F),
            hour: bcd_to_dec(regs[2] & 0x3F),
            day: bcd_to_dec(regs[4] & 0x3F),
            // Mask the century bit off the month register.
            month: bcd_to_dec(regs[5] & 0x1F),
            year: 2000 + u16::from(bcd_to_dec(regs[6])),
        })
    }

    fn lost_power(&mut self) -> Result<bool, ClockError> {
        Ok(self.read_reg(REG_STATUS)? & STATUS_OSF != 0)
    }

    fn set(&mut self, at: &Timestamp) -> Result<(), ClockError> {
        if at.year < 2000 || at.year > 2099 {
            return Err(ClockError::InvalidTime);
        }
        let payload = [
            REG_SECONDS,
            dec_to_bcd(at.second),
            dec_to_bcd(at.minute),
            dec_to_bcd(at.hour),
            weekday_reg(at),
            dec_to_bcd(at.day),
            dec_to_bcd(at.month),
            dec_to_bcd((at.year - 2000) as u8),
        ];
        self.i2c
            .write(DS3231_ADDR, &payload)
            .map_err(|_| ClockError::BusError)?;
        // Setting the time re-validates the clock: clear the stop flag.
        let status = self.read_reg(REG_STATUS)?;
        self.write_reg(REG_STATUS, status & !STATUS_OSF)
    }
}

impl<I2C: I2c, D: DelayNs> StoragePort for RtcModule<I2C, D> {
    fn capacity(&self) -> usize {
        AT24C32_CAPACITY
    }

    fn write_byte(&mut self, address: u16, value: u8) -> Result<(), StorageError> {
        let [hi, lo] = address.to_be_bytes();
        self.i2c
            .write(AT24C32_ADDR, &[hi, lo, value])
            .map_err(|_| StorageError::WriteFailed)?;
        self.delay.delay_ms(EEPROM_WRITE_CYCLE_MS);
        Ok(())
    }
}

fn bcd_to_dec(v: u8) -> u8 {
    (v >> 4) * 10 + (v & 0x0F)
}

fn dec_to_bcd(v: u8) -> u8 {
    ((v / 10) << 4) | (v % 10)
}

/// DS3231 day-of-week register, 1..=7 with 1 = Sunday.
fn weekday_reg(at: &Timestamp) -> u8 {
    let days = at.epoch_secs().div_euclid(86_400);
    // The Unix epoch fell on a Thursday.
    (((days + 4).rem_euclid(7)) as u8) + 1
}
