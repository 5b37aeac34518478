//! High-level driver API for the ACS37800
//!
//! This module provides a user-friendly interface to the ACS37800 power monitor, handling the
//! EEPROM unlock sequence, shadow/EEPROM configuration writes, and measurement conversion.
//!
//! The driver caches nothing but the [`CircuitParameters`]: every call round-trips to the device.
//! Multi-step EEPROM writes are not atomic on the bus, so when one driver is shared between
//! execution contexts the whole driver must sit behind a single lock.

use crate::config::{
    AveragingConfig, CircuitParameters, CoarseGain, CurrentRange, Dio0Function, Dio1Function,
    FaultConfig, FaultDelay, MAX_I2C_ADDRESS, MAX_NUMBER_OF_SAMPLES,
    VoltageEventConfig, WriteMode,
};
use crate::measurement::{
    AveragingWindow, ErrorFlags, InstantaneousReading, PowerFactorReading, PowerReading,
    RmsReading, decode_active_power, decode_instantaneous_current, decode_instantaneous_power,
    decode_instantaneous_voltage,
};
use crate::registers::Acs37800 as RegisterDevice;
use crate::{CUSTOMER_ACCESS_CODE, EEPROM_SETTLE_MS, Error};

use device_driver::RegisterInterface;
use embedded_hal::delay::DelayNs;

/// Register width used for raw transfers
const REGISTER_SIZE_BITS: u32 = 32;

/// Width mask of the ECC field in EEPROM registers
const ECC_FIELD_MASK: u8 = 0x3F;

/// Whether the ECC field of an EEPROM register reports a clean read
///
/// Only an all-zero field counts. Use [`EccStatus::from_field`](crate::EccStatus::from_field) to tell the failure kinds apart.
const fn ecc_ok(ecc: u8) -> bool {
    (ecc & ECC_FIELD_MASK) == 0
}

/// Main driver for the ACS37800
pub struct Acs37800Driver<I> {
    device: RegisterDevice<I>,
    circuit: CircuitParameters,
}

impl<I> Acs37800Driver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a new ACS37800 driver instance with default circuit parameters
    ///
    /// No bus traffic happens here. Call [`probe()`](Self::probe) to check that a device answers.
    pub fn new(interface: I) -> Self {
        Self::new_with_parameters(interface, CircuitParameters::default())
    }

    /// Create a new ACS37800 driver instance for a specific part and voltage divider
    pub fn new_with_parameters(interface: I, circuit: CircuitParameters) -> Self {
        Self {
            device: RegisterDevice::new(interface),
            circuit,
        }
    }

    /// Consume the driver and return the interface
    pub fn release(self) -> I {
        self.device.interface
    }

    /// Check that a device answers at the configured address
    ///
    /// Reads the shadow trim register. A failure here leaves the driver usable; deciding whether
    /// to continue is up to the caller.
    pub fn probe(&mut self) -> bool {
        match self.device.trim_shadow().read() {
            Ok(_reg) => {
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "probe: ok, coarse gain x{}",
                    CoarseGain::from_bits(_reg.crs_sns()).multiplier()
                );
                true
            }
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("probe: no response from device");
                false
            }
        }
    }

    // ==================== CIRCUIT PARAMETERS ====================

    /// Circuit parameters used by the measurement conversions
    pub const fn circuit_parameters(&self) -> &CircuitParameters {
        &self.circuit
    }

    /// Replace all circuit parameters
    pub fn set_circuit_parameters(&mut self, circuit: CircuitParameters) {
        self.circuit = circuit;
    }

    /// Change the current sensing range (30 A or 90 A part)
    pub fn set_current_range(&mut self, range: CurrentRange) {
        self.circuit.current_range = range;
    }

    /// Change the voltage channel sense resistance in ohms
    pub fn set_sense_resistance(&mut self, ohms: f32) {
        self.circuit.sense_resistance = ohms;
    }

    /// Change the total divider resistance above the sense resistor in ohms
    pub fn set_divider_resistance(&mut self, ohms: f32) {
        self.circuit.divider_resistance = ohms;
    }

    // ==================== RAW REGISTER ACCESS ====================

    /// Read a register's raw 32-bit contents
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_register(&mut self, address: u8) -> Result<u32, Error<I::Error>> {
        let mut buffer = [0u8; 4];
        self.device
            .interface
            .read_register(address, REGISTER_SIZE_BITS, &mut buffer)?;
        let value = u32::from_le_bytes(buffer);

        #[cfg(feature = "defmt")]
        defmt::trace!("read_register: {:#x} = {:#x}", address, value);

        Ok(value)
    }

    /// Write a register's raw 32-bit contents
    ///
    /// This bypasses the unlock sequence; EEPROM registers ignore it unless the access code is
    /// already set.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn write_register(&mut self, address: u8, value: u32) -> Result<(), Error<I::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("write_register: {:#x} <- {:#x}", address, value);

        self.device
            .interface
            .write_register(address, REGISTER_SIZE_BITS, &value.to_le_bytes())?;
        Ok(())
    }

    /// Whether the device currently accepts EEPROM writes
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_unlocked(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.access_status().read()?.customer_access())
    }

    // ==================== EEPROM WRITE SEQUENCING ====================

    /// Run `f` with the customer access code set
    ///
    /// The code is cleared after `f` returns, whether or not it succeeded. An error from `f`
    /// takes precedence over an error while clearing.
    fn with_unlocked<T>(
        &mut self,
        f: impl FnOnce(&mut RegisterDevice<I>) -> Result<T, I::Error>,
    ) -> Result<T, Error<I::Error>> {
        self.device.access_code().write(|w| {
            w.set_access_code(CUSTOMER_ACCESS_CODE);
        })?;

        let result = f(&mut self.device);

        let lock = self.device.access_code().write(|w| {
            w.set_access_code(0);
        });

        match (result, lock) {
            (Ok(value), Ok(_)) => Ok(value),
            (Err(error), _) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("with_unlocked: bus error inside unlocked window");
                Err(Error::Bus(error))
            }
            (Ok(_), Err(error)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("with_unlocked: failed to clear the access code");
                Err(Error::Bus(error))
            }
        }
    }

    /// Write EEPROM under the access code, wait for the commit, then verify
    fn persist<D>(
        &mut self,
        delay: &mut D,
        write: impl FnOnce(&mut RegisterDevice<I>) -> Result<(), I::Error>,
        verify: impl FnOnce(&mut RegisterDevice<I>) -> Result<bool, I::Error>,
    ) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        self.with_unlocked(write)?;

        // Reads before the commit completes return zero
        delay.delay_ms(EEPROM_SETTLE_MS);

        if verify(&mut self.device)? {
            Ok(())
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("persist: EEPROM readback mismatch or ECC error");
            Err(Error::ReadModifyWriteVerificationFailure)
        }
    }

    /// Apply a configuration change to shadow memory, and to EEPROM when requested
    fn update_config<D>(
        &mut self,
        mode: WriteMode,
        delay: &mut D,
        shadow: impl FnOnce(&mut RegisterDevice<I>) -> Result<(), I::Error>,
        eeprom: impl FnOnce(&mut RegisterDevice<I>) -> Result<(), I::Error>,
        verify: impl FnOnce(&mut RegisterDevice<I>) -> Result<bool, I::Error>,
    ) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        match mode {
            WriteMode::ShadowOnly => {
                shadow(&mut self.device)?;
                Ok(())
            }
            WriteMode::ShadowAndPersist => self.persist(
                delay,
                |device| {
                    shadow(device)?;
                    eeprom(device)
                },
                verify,
            ),
        }
    }

    // ==================== CONFIGURATION ====================

    /// Set the coarse gain of the current channel
    ///
    /// The delay provider is only used when `mode` persists the change.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails, or
    /// `ReadModifyWriteVerificationFailure` if the EEPROM copy does not read back.
    pub fn set_current_coarse_gain<D>(
        &mut self,
        gain: CoarseGain,
        mode: WriteMode,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        #[cfg(feature = "defmt")]
        defmt::debug!("set_current_coarse_gain: {} ({})", gain, mode);

        let bits = gain.bits();
        self.update_config(
            mode,
            delay,
            |device| {
                device.trim_shadow().modify(|w| {
                    w.set_crs_sns(bits);
                })
            },
            |device| {
                device.trim_eeprom().modify(|w| {
                    w.set_crs_sns(bits);
                })
            },
            |device| {
                let reg = device.trim_eeprom().read()?;
                Ok(reg.crs_sns() == bits && ecc_ok(reg.ecc()))
            },
        )
    }

    /// Read the coarse gain of the current channel from shadow memory
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_current_coarse_gain(&mut self) -> Result<CoarseGain, Error<I::Error>> {
        let reg = self.device.trim_shadow().read()?;
        let gain = CoarseGain::from_bits(reg.crs_sns());

        #[cfg(feature = "defmt")]
        defmt::debug!("get_current_coarse_gain: {}", gain);

        Ok(gain)
    }

    /// Change the I2C address in EEPROM
    ///
    /// Also sets the flag that stops the DIO pins from selecting the address. The new address
    /// takes effect after the next power cycle; this driver keeps using the old one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `new_address` does not fit in 7 bits, an error if communication
    /// with the device fails, or `ReadModifyWriteVerificationFailure` if the address does not read
    /// back.
    pub fn set_i2c_address<D>(&mut self, new_address: u8, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        if new_address > MAX_I2C_ADDRESS {
            return Err(Error::InvalidConfig);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("set_i2c_address: {:#x}", new_address);

        self.persist(
            delay,
            |device| {
                device.interface_eeprom().modify(|w| {
                    w.set_slv_addr(new_address);
                    w.set_dis_slv_addr(true);
                })
            },
            |device| {
                let reg = device.interface_eeprom().read()?;

                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "set_i2c_address: readback {:#x}, ecc {}",
                    reg.slv_addr(),
                    reg.ecc()
                );

                Ok(reg.slv_addr() == new_address && ecc_ok(reg.ecc()))
            },
        )
    }

    /// Read the I2C address stored in EEPROM
    ///
    /// Returns the address and whether it overrides the DIO pin strapping.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_i2c_address(&mut self) -> Result<(u8, bool), Error<I::Error>> {
        let reg = self.device.interface_eeprom().read()?;
        Ok((reg.slv_addr(), reg.dis_slv_addr()))
    }

    /// Set the number of samples used for the RMS calculation
    ///
    /// Only takes effect while [`set_bypass_n_enable`](Self::set_bypass_n_enable) is on.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `samples` exceeds 1023, an error if communication with the
    /// device fails, or `ReadModifyWriteVerificationFailure` if the EEPROM copy does not read
    /// back.
    pub fn set_number_of_samples<D>(
        &mut self,
        samples: u16,
        mode: WriteMode,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        if samples > MAX_NUMBER_OF_SAMPLES {
            return Err(Error::InvalidConfig);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("set_number_of_samples: {} ({})", samples, mode);

        self.update_config(
            mode,
            delay,
            |device| {
                device.interface_shadow().modify(|w| {
                    w.set_n(samples);
                })
            },
            |device| {
                device.interface_eeprom().modify(|w| {
                    w.set_n(samples);
                })
            },
            |device| {
                let reg = device.interface_eeprom().read()?;
                Ok(reg.n() == samples && ecc_ok(reg.ecc()))
            },
        )
    }

    /// Read the number of samples for the RMS calculation from shadow memory
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_number_of_samples(&mut self) -> Result<u16, Error<I::Error>> {
        let samples = self.device.interface_shadow().read()?.n();

        #[cfg(feature = "defmt")]
        defmt::debug!("get_number_of_samples: {}", samples);

        Ok(samples)
    }

    /// Select between the fixed sample count (`true`) and the zero-crossing window (`false`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails, or
    /// `ReadModifyWriteVerificationFailure` if the EEPROM copy does not read back.
    pub fn set_bypass_n_enable<D>(
        &mut self,
        bypass: bool,
        mode: WriteMode,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        #[cfg(feature = "defmt")]
        defmt::debug!("set_bypass_n_enable: {} ({})", bypass, mode);

        self.update_config(
            mode,
            delay,
            |device| {
                device.interface_shadow().modify(|w| {
                    w.set_bypass_n_en(bypass);
                })
            },
            |device| {
                device.interface_eeprom().modify(|w| {
                    w.set_bypass_n_en(bypass);
                })
            },
            |device| {
                let reg = device.interface_eeprom().read()?;
                Ok(reg.bypass_n_en() == bypass && ecc_ok(reg.ecc()))
            },
        )
    }

    /// Read the `bypass_n_en` flag from shadow memory
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_bypass_n_enable(&mut self) -> Result<bool, Error<I::Error>> {
        let bypass = self.device.interface_shadow().read()?.bypass_n_en();

        #[cfg(feature = "defmt")]
        defmt::debug!("get_bypass_n_enable: {}", bypass);

        Ok(bypass)
    }

    /// Select the functions of the DIO_0 and DIO_1 pins
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails, or
    /// `ReadModifyWriteVerificationFailure` if the EEPROM copy does not read back.
    pub fn set_dio_functions<D>(
        &mut self,
        dio0: Dio0Function,
        dio1: Dio1Function,
        mode: WriteMode,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        #[cfg(feature = "defmt")]
        defmt::debug!("set_dio_functions: {}, {} ({})", dio0, dio1, mode);

        let (zero, one) = (dio0.bits(), dio1.bits());
        self.update_config(
            mode,
            delay,
            |device| {
                device.interface_shadow().modify(|w| {
                    w.set_dio_zero_sel(zero);
                    w.set_dio_one_sel(one);
                })
            },
            |device| {
                device.interface_eeprom().modify(|w| {
                    w.set_dio_zero_sel(zero);
                    w.set_dio_one_sel(one);
                })
            },
            |device| {
                let reg = device.interface_eeprom().read()?;
                Ok(reg.dio_zero_sel() == zero && reg.dio_one_sel() == one && ecc_ok(reg.ecc()))
            },
        )
    }

    /// Read the DIO pin functions from shadow memory
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_dio_functions(&mut self) -> Result<(Dio0Function, Dio1Function), Error<I::Error>> {
        let reg = self.device.interface_shadow().read()?;
        Ok((
            Dio0Function::from_bits(reg.dio_zero_sel()),
            Dio1Function::from_bits(reg.dio_one_sel()),
        ))
    }

    /// Configure the overcurrent fault threshold and delay
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails, or
    /// `ReadModifyWriteVerificationFailure` if the EEPROM copy does not read back.
    pub fn set_fault_config<D>(
        &mut self,
        config: FaultConfig,
        mode: WriteMode,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        #[cfg(feature = "defmt")]
        defmt::debug!("set_fault_config: {} ({})", config, mode);

        let (threshold, delay_bits) = (config.threshold, config.delay.bits());
        self.update_config(
            mode,
            delay,
            |device| {
                device.fault_shadow().modify(|w| {
                    w.set_fault(threshold);
                    w.set_fltdly(delay_bits);
                })
            },
            |device| {
                device.fault_eeprom().modify(|w| {
                    w.set_fault(threshold);
                    w.set_fltdly(delay_bits);
                })
            },
            |device| {
                let reg = device.fault_eeprom().read()?;
                Ok(reg.fault() == threshold && reg.fltdly() == delay_bits && ecc_ok(reg.ecc()))
            },
        )
    }

    /// Read the overcurrent fault configuration from shadow memory
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_fault_config(&mut self) -> Result<FaultConfig, Error<I::Error>> {
        let reg = self.device.fault_shadow().read()?;
        Ok(FaultConfig {
            threshold: reg.fault(),
            delay: FaultDelay::from_bits(reg.fltdly()),
        })
    }

    /// Configure the over/undervoltage thresholds and event cycle count
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a value exceeds 6 bits, an error if communication with the
    /// device fails, or `ReadModifyWriteVerificationFailure` if the EEPROM copy does not read
    /// back.
    pub fn set_voltage_event_config<D>(
        &mut self,
        config: VoltageEventConfig,
        mode: WriteMode,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        if !config.is_valid() {
            return Err(Error::InvalidConfig);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("set_voltage_event_config: {} ({})", config, mode);

        self.update_config(
            mode,
            delay,
            |device| {
                device.voltage_event_shadow().modify(|w| {
                    w.set_overvreg(config.overvoltage_threshold);
                    w.set_undervreg(config.undervoltage_threshold);
                    w.set_vevent_cycs(config.event_cycles);
                })
            },
            |device| {
                device.voltage_event_eeprom().modify(|w| {
                    w.set_overvreg(config.overvoltage_threshold);
                    w.set_undervreg(config.undervoltage_threshold);
                    w.set_vevent_cycs(config.event_cycles);
                })
            },
            |device| {
                let reg = device.voltage_event_eeprom().read()?;
                Ok(reg.overvreg() == config.overvoltage_threshold
                    && reg.undervreg() == config.undervoltage_threshold
                    && reg.vevent_cycs() == config.event_cycles
                    && ecc_ok(reg.ecc()))
            },
        )
    }

    /// Read the voltage event configuration from shadow memory
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_voltage_event_config(&mut self) -> Result<VoltageEventConfig, Error<I::Error>> {
        let reg = self.device.voltage_event_shadow().read()?;
        Ok(VoltageEventConfig {
            overvoltage_threshold: reg.overvreg(),
            undervoltage_threshold: reg.undervreg(),
            event_cycles: reg.vevent_cycs(),
        })
    }

    /// Configure the two RMS averaging stages
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a value exceeds its field width, an error if communication with
    /// the device fails, or `ReadModifyWriteVerificationFailure` if the EEPROM copy does not read
    /// back.
    pub fn set_averaging_config<D>(
        &mut self,
        config: AveragingConfig,
        mode: WriteMode,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        if !config.is_valid() {
            return Err(Error::InvalidConfig);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("set_averaging_config: {} ({})", config, mode);

        self.update_config(
            mode,
            delay,
            |device| {
                device.averaging_shadow().modify(|w| {
                    w.set_rms_avg_one(config.rms_avg_one);
                    w.set_rms_avg_two(config.rms_avg_two);
                })
            },
            |device| {
                device.averaging_eeprom().modify(|w| {
                    w.set_rms_avg_one(config.rms_avg_one);
                    w.set_rms_avg_two(config.rms_avg_two);
                })
            },
            |device| {
                let reg = device.averaging_eeprom().read()?;
                Ok(reg.rms_avg_one() == config.rms_avg_one
                    && reg.rms_avg_two() == config.rms_avg_two
                    && ecc_ok(reg.ecc()))
            },
        )
    }

    /// Read the RMS averaging configuration from shadow memory
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_averaging_config(&mut self) -> Result<AveragingConfig, Error<I::Error>> {
        let reg = self.device.averaging_shadow().read()?;
        Ok(AveragingConfig {
            rms_avg_one: reg.rms_avg_one(),
            rms_avg_two: reg.rms_avg_two(),
        })
    }

    // ==================== MEASUREMENTS ====================

    /// Read RMS voltage (V) and current (A) from register 0x20
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_rms(&mut self) -> Result<RmsReading, Error<I::Error>> {
        let reg = self.device.rms().read()?;

        #[cfg(feature = "defmt")]
        defmt::trace!("read_rms: vrms {:#x}, irms {:#x}", reg.vrms(), reg.irms());

        let reading = RmsReading::from_raw(reg.vrms(), reg.irms(), &self.circuit);

        #[cfg(feature = "defmt")]
        defmt::debug!("read_rms: {} V, {} A", reading.volts, reading.amps);

        Ok(reading)
    }

    /// Read the averaged RMS voltage (V) and current (A) from register 0x26 or 0x27
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_rms_average(
        &mut self,
        window: AveragingWindow,
    ) -> Result<RmsReading, Error<I::Error>> {
        let (vrms, irms) = match window {
            AveragingWindow::OneSecond => {
                let reg = self.device.rms_avg_second().read()?;
                (reg.vrmsavg(), reg.irmsavg())
            }
            AveragingWindow::OneMinute => {
                let reg = self.device.rms_avg_minute().read()?;
                (reg.vrmsavg(), reg.irmsavg())
            }
        };

        #[cfg(feature = "defmt")]
        defmt::trace!("read_rms_average: vrms {:#x}, irms {:#x}", vrms, irms);

        Ok(RmsReading::from_raw(vrms, irms, &self.circuit))
    }

    /// Read active (W) and reactive (VAR) power from register 0x21
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_power_active_reactive(&mut self) -> Result<PowerReading, Error<I::Error>> {
        let reg = self.device.power().read()?;

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "read_power_active_reactive: pactive {:#x}, pimag {:#x}",
            reg.pactive(),
            reg.pimag()
        );

        let reading = PowerReading::from_raw(reg.pactive(), reg.pimag(), &self.circuit);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "read_power_active_reactive: {} W, {} VAR",
            reading.active_watts,
            reading.reactive_var
        );

        Ok(reading)
    }

    /// Read the averaged active power (W) from register 0x28 or 0x29
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_active_power_average(
        &mut self,
        window: AveragingWindow,
    ) -> Result<f32, Error<I::Error>> {
        let code = match window {
            AveragingWindow::OneSecond => self.device.pact_avg_second().read()?.pactavg(),
            AveragingWindow::OneMinute => self.device.pact_avg_minute().read()?.pactavg(),
        };

        #[cfg(feature = "defmt")]
        defmt::trace!("read_active_power_average: pactavg {:#x}", code);

        Ok(decode_active_power(code, &self.circuit))
    }

    /// Read apparent power (VA), power factor and the direction flags from register 0x22
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_power_factor(&mut self) -> Result<PowerFactorReading, Error<I::Error>> {
        let reg = self.device.power_factor().read()?;

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "read_power_factor: papparent {:#x}, pfactor {:#x}",
            reg.papparent(),
            reg.pfactor()
        );

        let reading = PowerFactorReading::from_raw(
            reg.papparent(),
            reg.pfactor(),
            reg.posangle(),
            reg.pospf(),
            &self.circuit,
        );

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "read_power_factor: {} VA, pf {}",
            reading.apparent_va,
            reading.power_factor
        );

        Ok(reading)
    }

    /// Read instantaneous voltage (V), current (A) and power (W) from registers 0x2A and 0x2C
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. If the first register read fails
    /// the second is not attempted.
    pub fn read_instantaneous(&mut self) -> Result<InstantaneousReading, Error<I::Error>> {
        let codes = self.device.instant_codes().read()?;
        let pinstant = self.device.instant_power().read()?.pinstant();

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "read_instantaneous: vcodes {:#x}, icodes {:#x}, pinstant {:#x}",
            codes.vcodes(),
            codes.icodes(),
            pinstant
        );

        let reading = InstantaneousReading {
            volts: decode_instantaneous_voltage(codes.vcodes(), &self.circuit),
            amps: decode_instantaneous_current(codes.icodes(), &self.circuit),
            watts: decode_instantaneous_power(pinstant, &self.circuit),
        };

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "read_instantaneous: {} V, {} A, {} W",
            reading.volts,
            reading.amps,
            reading.watts
        );

        Ok(reading)
    }

    /// Read the status flags from register 0x2D
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_error_flags(&mut self) -> Result<ErrorFlags, Error<I::Error>> {
        let reg = self.device.status().read()?;
        let flags = ErrorFlags {
            zero_crossing: reg.vzerocrossout(),
            fault: reg.faultout(),
            fault_latched: reg.faultlatched(),
            overvoltage: reg.overvoltage(),
            undervoltage: reg.undervoltage(),
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("read_error_flags: {}", flags);

        Ok(flags)
    }

    /// Read the number of samples in the current RMS window from register 0x25
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_number_of_points(&mut self) -> Result<u16, Error<I::Error>> {
        Ok(self.device.num_points().read()?.numptsout())
    }
}
