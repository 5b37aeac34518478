#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod device;
pub mod interface;
pub mod measurement;
pub mod registers;

// Re-export main types
pub use config::{
    AveragingConfig, CircuitParameters, CoarseGain, CurrentRange, Dio0Function, Dio1Function,
    EccStatus, FaultConfig, FaultDelay, VoltageEventConfig, WriteMode,
};
pub use device::Acs37800Driver;
pub use interface::I2cInterface;
pub use measurement::{
    AveragingWindow, ErrorFlags, InstantaneousReading, PowerFactorReading, PowerReading,
    RmsReading,
};

/// ACS37800 I2C address when DIO_0 and DIO_1 are low at power-up (default: 0x60)
///
/// The address can be moved in EEPROM with
/// [`Acs37800Driver::set_i2c_address`], after which the DIO pins no longer select it.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x60;

/// Customer access code that unlocks EEPROM writes when written to register 0x2F
pub const CUSTOMER_ACCESS_CODE: u32 = 0x4F70_656E;

/// Time the device needs to commit an EEPROM write, in milliseconds
///
/// Reading the register back before this elapses returns zero.
pub const EEPROM_SETTLE_MS: u32 = 100;

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// An EEPROM write did not read back as requested, or its ECC field reported an error
    ReadModifyWriteVerificationFailure,
    /// A requested value does not fit its register field
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}

#[cfg(feature = "std")]
impl<E> std::fmt::Display for Error<E>
where
    E: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bus(error) => write!(f, "I2C bus error: {error:?}"),
            Self::ReadModifyWriteVerificationFailure => {
                write!(f, "EEPROM write did not verify")
            }
            Self::InvalidConfig => write!(f, "value does not fit its register field"),
        }
    }
}

#[cfg(feature = "std")]
impl<E> std::error::Error for Error<E> where E: std::fmt::Debug {}
