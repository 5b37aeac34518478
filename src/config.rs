//! Configuration types for the ACS37800
//!
//! Enumerated register fields, grouped configuration structures, and the external circuit
//! parameters that the measurement conversions depend on.
//!
//! # Example
//!
//! ```ignore
//! # use acs37800::{Acs37800Driver, CoarseGain, WriteMode};
//! # let mut meter: Acs37800Driver<_> = todo!();
//! # let mut delay = todo!();
//! // Change the gain for this power cycle only
//! meter.set_current_coarse_gain(CoarseGain::X2, WriteMode::ShadowOnly, &mut delay)?;
//!
//! // Change it permanently
//! meter.set_current_coarse_gain(CoarseGain::X2, WriteMode::ShadowAndPersist, &mut delay)?;
//! # Ok::<(), acs37800::Error<()>>(())
//! ```

use crate::Error;

/// Largest value accepted by the 7-bit I2C address field
pub const MAX_I2C_ADDRESS: u8 = 0x7F;

/// Largest value accepted by the 10-bit sample count field
pub const MAX_NUMBER_OF_SAMPLES: u16 = 0x3FF;

/// Default sense resistance for the voltage channel in ohms
pub const DEFAULT_SENSE_RESISTANCE: f32 = 8_200.0;

/// Default total isolation (divider) resistance for the voltage channel in ohms
pub const DEFAULT_DIVIDER_RESISTANCE: f32 = 2_000_000.0;

/// Where a configuration change is written
///
/// Shadow memory takes effect immediately and is lost on reset. EEPROM survives power cycles but
/// is only loaded into shadow memory at power-up, which is why persisting also writes the shadow
/// copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteMode {
    /// Write the shadow register only
    ShadowOnly,
    /// Write the shadow register, then the EEPROM register, and verify the EEPROM copy
    ShadowAndPersist,
}

impl WriteMode {
    /// Whether this mode writes EEPROM
    pub const fn persists(self) -> bool {
        matches!(self, Self::ShadowAndPersist)
    }
}

/// Coarse gain of the current channel (`crs_sns`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CoarseGain {
    /// 1x
    X1 = 0,
    /// 2x
    X2 = 1,
    /// 3x
    X3 = 2,
    /// 3.5x
    X3_5 = 3,
    /// 4x
    X4 = 4,
    /// 4.5x
    X4_5 = 5,
    /// 5.5x
    X5_5 = 6,
    /// 8x
    X8 = 7,
}

impl CoarseGain {
    /// All selectors in register order
    pub const ALL: [Self; 8] = [
        Self::X1,
        Self::X2,
        Self::X3,
        Self::X3_5,
        Self::X4,
        Self::X4_5,
        Self::X5_5,
        Self::X8,
    ];

    /// Decode the 3-bit register field
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0b111) as usize]
    }

    /// Register field value
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Gain as a multiplier
    #[must_use]
    pub const fn multiplier(self) -> f32 {
        match self {
            Self::X1 => 1.0,
            Self::X2 => 2.0,
            Self::X3 => 3.0,
            Self::X3_5 => 3.5,
            Self::X4 => 4.0,
            Self::X4_5 => 4.5,
            Self::X5_5 => 5.5,
            Self::X8 => 8.0,
        }
    }
}

/// Overcurrent fault delay (`fltdly`)
///
/// Field values 0 and 1 both mean no delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultDelay {
    /// No delay
    None = 0,
    /// 4.75 µs
    Us4_75 = 2,
    /// 9.25 µs
    Us9_25 = 3,
    /// 13.75 µs
    Us13_75 = 4,
    /// 18.50 µs
    Us18_50 = 5,
    /// 23.25 µs
    Us23_25 = 6,
    /// 27.75 µs
    Us27_75 = 7,
}

impl FaultDelay {
    /// Decode the 3-bit register field
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            2 => Self::Us4_75,
            3 => Self::Us9_25,
            4 => Self::Us13_75,
            5 => Self::Us18_50,
            6 => Self::Us23_25,
            7 => Self::Us27_75,
            _ => Self::None,
        }
    }

    /// Register field value
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Delay in microseconds
    #[must_use]
    pub const fn microseconds(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Us4_75 => 4.75,
            Self::Us9_25 => 9.25,
            Self::Us13_75 => 13.75,
            Self::Us18_50 => 18.50,
            Self::Us23_25 => 23.25,
            Self::Us27_75 => 27.75,
        }
    }
}

/// DIO_0 pin function (`dio_0_sel`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dio0Function {
    /// Voltage zero crossing
    ZeroCrossing = 0,
    /// Overvoltage flag
    Overvoltage = 1,
    /// Undervoltage flag
    Undervoltage = 2,
    /// Overvoltage or undervoltage flag
    OvervoltageOrUndervoltage = 3,
}

impl Dio0Function {
    /// Decode the 2-bit register field
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::ZeroCrossing,
            1 => Self::Overvoltage,
            2 => Self::Undervoltage,
            _ => Self::OvervoltageOrUndervoltage,
        }
    }

    /// Register field value
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// DIO_1 pin function (`dio_1_sel`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dio1Function {
    /// Overcurrent fault
    Overcurrent = 0,
    /// Undervoltage flag
    Undervoltage = 1,
    /// Overvoltage flag
    Overvoltage = 2,
    /// Overvoltage, undervoltage or latched overcurrent fault
    OvervoltageOrUndervoltageOrLatchedOvercurrent = 3,
}

impl Dio1Function {
    /// Decode the 2-bit register field
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Overcurrent,
            1 => Self::Undervoltage,
            2 => Self::Overvoltage,
            _ => Self::OvervoltageOrUndervoltageOrLatchedOvercurrent,
        }
    }

    /// Register field value
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// EEPROM error correction status
///
/// Decoded from the two most significant bits of the 6-bit ECC field. Persisted writes are only
/// accepted when the whole field reads zero, so a `NoError` status with other bits set still
/// fails verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EccStatus {
    /// No error
    NoError = 0,
    /// A single-bit error was found and corrected
    ErrorCorrected = 1,
    /// The stored value is corrupt
    Uncorrectable = 2,
    /// Undefined status
    NoMeaning = 3,
}

impl EccStatus {
    /// Decode the 6-bit ECC field of an EEPROM register
    #[must_use]
    pub const fn from_field(ecc: u8) -> Self {
        match (ecc >> 4) & 0b11 {
            0 => Self::NoError,
            1 => Self::ErrorCorrected,
            2 => Self::Uncorrectable,
            _ => Self::NoMeaning,
        }
    }

    /// Whether the EEPROM contents can be trusted as written
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::NoError)
    }
}

/// Current sensing range of the part
///
/// The power conversion constants are specified for the 30 A part and scale inversely with the
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CurrentRange {
    /// ACS37800KMACTR-030B3-I2C
    Amps30,
    /// ACS37800KMACTR-090B3-I2C
    Amps90,
}

impl CurrentRange {
    /// Full-scale current in amps
    #[must_use]
    pub const fn amps(self) -> f32 {
        match self {
            Self::Amps30 => 30.0,
            Self::Amps90 => 90.0,
        }
    }
}

/// External circuit parameters used to convert codes into line quantities
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CircuitParameters {
    /// Current sensing range of the part
    pub current_range: CurrentRange,
    /// Voltage channel sense resistance in ohms
    pub sense_resistance: f32,
    /// Total isolation resistance above the sense resistor in ohms
    pub divider_resistance: f32,
}

impl Default for CircuitParameters {
    fn default() -> Self {
        Self {
            current_range: CurrentRange::Amps30,
            sense_resistance: DEFAULT_SENSE_RESISTANCE,
            divider_resistance: DEFAULT_DIVIDER_RESISTANCE,
        }
    }
}

impl CircuitParameters {
    /// Ratio between line voltage and the voltage across the sense resistor
    ///
    /// `(R_divider + R_sense) / R_sense`
    #[must_use]
    pub fn resistor_multiplier(&self) -> f32 {
        (self.divider_resistance + self.sense_resistance) / self.sense_resistance
    }
}

/// RMS averaging window lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AveragingConfig {
    /// First averaging stage (7 bits, 0-127)
    pub rms_avg_one: u8,
    /// Second averaging stage (10 bits, 0-1023)
    pub rms_avg_two: u16,
}

impl AveragingConfig {
    /// Create a validated averaging configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either value exceeds its field width.
    pub const fn new(rms_avg_one: u8, rms_avg_two: u16) -> Result<Self, Error<()>> {
        let config = Self {
            rms_avg_one,
            rms_avg_two,
        };
        if !config.is_valid() {
            return Err(Error::InvalidConfig);
        }
        Ok(config)
    }

    /// Whether every value fits its register field
    pub const fn is_valid(&self) -> bool {
        self.rms_avg_one <= 0x7F && self.rms_avg_two <= 0x3FF
    }
}

/// Overcurrent fault configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaultConfig {
    /// Overcurrent fault threshold (8 bits)
    pub threshold: u8,
    /// Delay before the fault output asserts
    pub delay: FaultDelay,
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            threshold: 0,
            delay: FaultDelay::None,
        }
    }
}

/// Over/undervoltage event configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VoltageEventConfig {
    /// Overvoltage threshold (6 bits, 0-63)
    pub overvoltage_threshold: u8,
    /// Undervoltage threshold (6 bits, 0-63)
    pub undervoltage_threshold: u8,
    /// Cycles a threshold must be crossed before the event flags (6 bits, 0-63)
    pub event_cycles: u8,
}

impl VoltageEventConfig {
    /// Create a validated voltage event configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if any value exceeds 6 bits.
    pub const fn new(
        overvoltage_threshold: u8,
        undervoltage_threshold: u8,
        event_cycles: u8,
    ) -> Result<Self, Error<()>> {
        let config = Self {
            overvoltage_threshold,
            undervoltage_threshold,
            event_cycles,
        };
        if !config.is_valid() {
            return Err(Error::InvalidConfig);
        }
        Ok(config)
    }

    /// Whether every value fits its register field
    pub const fn is_valid(&self) -> bool {
        self.overvoltage_threshold <= 0x3F
            && self.undervoltage_threshold <= 0x3F
            && self.event_cycles <= 0x3F
    }
}
