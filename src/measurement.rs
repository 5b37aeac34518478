//! Measurement types and code-to-unit conversions
//!
//! Every conversion here is a pure function of a raw register field and the
//! [`CircuitParameters`] in effect, so the driver only has to fetch the bits.
//!
//! # Scaling conventions
//!
//! The datasheet contradicts itself on the RMS fields (it describes them as 16-bit fixed point
//! with 16 or 15 fractional bits, and separately gives a 110 LSB/mV sensitivity). The conversions
//! below use the sensitivity: RMS codes reach 55000 at full scale, instantaneous codes 27500.
//! Both channels span a ±250 mV differential input.

use crate::config::CircuitParameters;

/// RMS code corresponding to the full differential input range
pub const RMS_FULL_SCALE_CODES: f32 = 55_000.0;

/// Instantaneous code corresponding to the full differential input range
pub const INSTANTANEOUS_FULL_SCALE_CODES: f32 = 27_500.0;

/// Voltage channel differential input range in millivolts
pub const DIFFERENTIAL_INPUT_RANGE_MV: f32 = 250.0;

/// Current range the power sensitivities below are specified for, in amps
pub const POWER_REFERENCE_RANGE_AMPS: f32 = 30.0;

/// Active (and instantaneous) power sensitivity of the 30 A part in LSB/mW
pub const ACTIVE_POWER_LSB_PER_MW: f32 = 3.08;

/// Reactive power sensitivity of the 30 A part in LSB/mVAR
pub const REACTIVE_POWER_LSB_PER_MVAR: f32 = 6.15;

/// Apparent power sensitivity of the 30 A part in LSB/mVA
pub const APPARENT_POWER_LSB_PER_MVA: f32 = 6.15;

/// Width of the power factor field in bits
const POWER_FACTOR_BITS: u32 = 11;

/// Reinterpret a 16-bit field as two's complement
#[allow(clippy::cast_possible_wrap)]
const fn as_signed(code: u16) -> i16 {
    code as i16
}

/// Convert a voltage channel code into line volts
fn line_volts(code: f32, full_scale_codes: f32, params: &CircuitParameters) -> f32 {
    let millivolts = code / full_scale_codes * DIFFERENTIAL_INPUT_RANGE_MV;
    millivolts / 1000.0 * params.resistor_multiplier()
}

/// Convert a power code into line units (W, VAR or VA) given the 30 A sensitivity
fn line_power(code: f32, lsb_per_milli_unit: f32, params: &CircuitParameters) -> f32 {
    let lsb = lsb_per_milli_unit * (POWER_REFERENCE_RANGE_AMPS / params.current_range.amps());
    code / lsb * params.resistor_multiplier() / 1000.0
}

/// RMS voltage in volts from the unsigned `vrms` field
#[must_use]
pub fn decode_rms_voltage(code: u16, params: &CircuitParameters) -> f32 {
    line_volts(f32::from(code), RMS_FULL_SCALE_CODES, params)
}

/// RMS current in amps from the signed `irms` field
#[must_use]
pub fn decode_rms_current(code: u16, params: &CircuitParameters) -> f32 {
    f32::from(as_signed(code)) / RMS_FULL_SCALE_CODES * params.current_range.amps()
}

/// Instantaneous voltage in volts from the signed `vcodes` field
#[must_use]
pub fn decode_instantaneous_voltage(code: u16, params: &CircuitParameters) -> f32 {
    line_volts(
        f32::from(as_signed(code)),
        INSTANTANEOUS_FULL_SCALE_CODES,
        params,
    )
}

/// Instantaneous current in amps from the signed `icodes` field
#[must_use]
pub fn decode_instantaneous_current(code: u16, params: &CircuitParameters) -> f32 {
    f32::from(as_signed(code)) / INSTANTANEOUS_FULL_SCALE_CODES * params.current_range.amps()
}

/// Instantaneous power in watts from the signed `pinstant` field
#[must_use]
pub fn decode_instantaneous_power(code: u16, params: &CircuitParameters) -> f32 {
    line_power(f32::from(as_signed(code)), ACTIVE_POWER_LSB_PER_MW, params)
}

/// Active power in watts from the signed `pactive` (or averaged) field
#[must_use]
pub fn decode_active_power(code: u16, params: &CircuitParameters) -> f32 {
    line_power(f32::from(as_signed(code)), ACTIVE_POWER_LSB_PER_MW, params)
}

/// Reactive power in VAR from the unsigned `pimag` field
#[must_use]
pub fn decode_reactive_power(code: u16, params: &CircuitParameters) -> f32 {
    line_power(f32::from(code), REACTIVE_POWER_LSB_PER_MVAR, params)
}

/// Apparent power in VA from the unsigned `papparent` field
#[must_use]
pub fn decode_apparent_power(code: u16, params: &CircuitParameters) -> f32 {
    line_power(f32::from(code), APPARENT_POWER_LSB_PER_MVA, params)
}

/// Power factor in -1.0..1.0 from the signed 11-bit `pfactor` field
///
/// The field has 10 fractional bits. It is moved to the top of an `i16` so the sign bit lands in
/// bit 15, then scaled by 2^15.
#[must_use]
pub fn decode_power_factor(code: u16) -> f32 {
    let mask = (1u16 << POWER_FACTOR_BITS) - 1;
    let aligned = as_signed((code & mask) << (16 - POWER_FACTOR_BITS));
    f32::from(aligned) / 32_768.0
}

/// Averaging period for the averaged RMS and power registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AveragingWindow {
    /// One second average (0x26, 0x28)
    OneSecond,
    /// One minute average (0x27, 0x29)
    OneMinute,
}

/// RMS voltage and current
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RmsReading {
    /// RMS line voltage in volts
    pub volts: f32,
    /// RMS current in amps
    pub amps: f32,
}

impl RmsReading {
    /// Decode from the raw `vrms` and `irms` fields
    #[must_use]
    pub fn from_raw(vrms: u16, irms: u16, params: &CircuitParameters) -> Self {
        Self {
            volts: decode_rms_voltage(vrms, params),
            amps: decode_rms_current(irms, params),
        }
    }
}

/// Active and reactive power
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerReading {
    /// Active power in watts
    pub active_watts: f32,
    /// Reactive power in VAR
    pub reactive_var: f32,
}

impl PowerReading {
    /// Decode from the raw `pactive` and `pimag` fields
    #[must_use]
    pub fn from_raw(pactive: u16, pimag: u16, params: &CircuitParameters) -> Self {
        Self {
            active_watts: decode_active_power(pactive, params),
            reactive_var: decode_reactive_power(pimag, params),
        }
    }
}

/// Apparent power and power factor
///
/// The direction flags are reported as the device delivers them rather than folded into the sign
/// of `power_factor`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerFactorReading {
    /// Apparent power in VA
    pub apparent_va: f32,
    /// Power factor in -1.0..1.0
    pub power_factor: f32,
    /// Sign of the phase angle (`posangle`)
    pub positive_angle: bool,
    /// Sign of the power factor (`pospf`)
    pub positive_power_factor: bool,
}

impl PowerFactorReading {
    /// Decode from the raw `papparent` and `pfactor` fields and the two sign flags
    #[must_use]
    pub fn from_raw(
        papparent: u16,
        pfactor: u16,
        positive_angle: bool,
        positive_power_factor: bool,
        params: &CircuitParameters,
    ) -> Self {
        Self {
            apparent_va: decode_apparent_power(papparent, params),
            power_factor: decode_power_factor(pfactor),
            positive_angle,
            positive_power_factor,
        }
    }

    /// Phase angle between voltage and current in degrees
    ///
    /// Magnitude is `acos(|pf|)`, negative when `positive_angle` is clear.
    #[must_use]
    pub fn phase_angle_degrees(&self) -> f32 {
        let magnitude = libm::acosf(libm::fabsf(self.power_factor).min(1.0)).to_degrees();
        if self.positive_angle {
            magnitude
        } else {
            -magnitude
        }
    }
}

/// Instantaneous voltage, current and power
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InstantaneousReading {
    /// Instantaneous line voltage in volts
    pub volts: f32,
    /// Instantaneous current in amps
    pub amps: f32,
    /// Instantaneous power in watts
    pub watts: f32,
}

/// Status flags from register 0x2D
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ErrorFlags {
    /// Voltage zero crossing output (bit 0)
    pub zero_crossing: bool,
    /// Overcurrent fault active (bit 1)
    pub fault: bool,
    /// Overcurrent fault latched (bit 2)
    pub fault_latched: bool,
    /// Overvoltage (bit 3)
    pub overvoltage: bool,
    /// Undervoltage (bit 4)
    pub undervoltage: bool,
}

impl ErrorFlags {
    /// Whether any fault or voltage event flag is set
    #[must_use]
    pub const fn any(&self) -> bool {
        self.fault || self.fault_latched || self.overvoltage || self.undervoltage
    }
}
