//! Integration tests for basic workflow scenarios

use crate::common::mock_interface::ACCESS_CODE_REGISTER;
use crate::common::test_utils::pack_halves;
use crate::common::{MockDelay, assert_float_eq, create_mock_driver};
use acs37800::{
    AveragingWindow, CoarseGain, CurrentRange, Dio0Function, Dio1Function, EEPROM_SETTLE_MS,
    WriteMode,
};

#[test]
fn test_complete_measurement_workflow() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();

    // Probe the device
    assert!(driver.probe());

    // Describe the board
    driver.set_current_range(CurrentRange::Amps90);
    driver.set_sense_resistance(1_000.0);
    driver.set_divider_resistance(999_000.0);

    // Configure a fixed RMS window
    driver
        .set_bypass_n_enable(true, WriteMode::ShadowOnly, &mut delay)
        .unwrap();
    driver
        .set_number_of_samples(1023, WriteMode::ShadowOnly, &mut delay)
        .unwrap();
    assert!(delay.ms_calls.is_empty());

    // Set up mock measurement data
    interface.set_register(0x20, pack_halves(44_000, 11_000));
    interface.set_register(0x21, pack_halves(308, 0));
    interface.set_register(0x22, 308 | (0x3FF << 16) | (1 << 27) | (1 << 28));
    interface.set_register(0x25, 1023);

    let rms = driver.read_rms().unwrap();
    assert_float_eq(rms.volts, 200.0, 1e-2);
    assert_float_eq(rms.amps, 18.0, 1e-3);

    let power = driver.read_power_active_reactive().unwrap();
    assert_float_eq(power.active_watts, 300.0, 1e-1);

    let pf = driver.read_power_factor().unwrap();
    assert!(pf.power_factor > 0.99);
    assert!(pf.phase_angle_degrees() < 3.0);

    assert_eq!(driver.read_number_of_points().unwrap(), 1023);
    assert!(!driver.read_error_flags().unwrap().any());
}

#[test]
fn test_error_recovery() {
    let (mut driver, interface) = create_mock_driver();

    // Inject a read failure
    interface.fail_next_read();

    // This read should fail
    assert!(driver.read_power_active_reactive().is_err());

    // But subsequent reads should work (error was only for one operation)
    interface.set_register(0x21, pack_halves(308, 615));
    assert!(driver.read_power_active_reactive().is_ok());
}

#[test]
fn test_commissioning_workflow_persists_settings() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();
    interface.enforce_eeprom_lock(true);

    driver
        .set_current_coarse_gain(CoarseGain::X4, WriteMode::ShadowAndPersist, &mut delay)
        .unwrap();
    driver
        .set_dio_functions(
            Dio0Function::OvervoltageOrUndervoltage,
            Dio1Function::Overcurrent,
            WriteMode::ShadowAndPersist,
            &mut delay,
        )
        .unwrap();
    driver.set_i2c_address(0x65, &mut delay).unwrap();

    // Every EEPROM write waited for the commit and relocked the device
    assert_eq!(delay.ms_calls, vec![EEPROM_SETTLE_MS; 3]);
    assert_eq!(interface.get_register(ACCESS_CODE_REGISTER), 0);
    assert!(!driver.is_unlocked().unwrap());

    // The DIO and address settings share one EEPROM register
    let eeprom = interface.get_register(0x0F);
    assert_eq!((eeprom >> 2) & 0x7F, 0x65);
    assert_eq!((eeprom >> 10) & 0b11, 0b11);
    assert_eq!((eeprom >> 12) & 0b11, 0b00);

    assert_eq!(driver.get_current_coarse_gain().unwrap(), CoarseGain::X4);
    assert_eq!(driver.get_i2c_address().unwrap(), (0x65, true));
}

#[test]
fn test_averages_and_instantaneous_together() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_register(0x26, pack_halves(27_500, 27_500));
    interface.set_register(0x28, 308);
    interface.set_register(0x2A, pack_halves(0, 0));
    interface.set_register(0x2C, 0);

    let average = driver.read_rms_average(AveragingWindow::OneSecond).unwrap();
    assert_float_eq(average.amps, 15.0, 1e-3);
    assert!(
        driver
            .read_active_power_average(AveragingWindow::OneSecond)
            .unwrap()
            > 0.0
    );

    let instant = driver.read_instantaneous().unwrap();
    assert_float_eq(instant.volts, 0.0, 1e-6);
    assert_float_eq(instant.amps, 0.0, 1e-6);
    assert_float_eq(instant.watts, 0.0, 1e-6);
}

#[test]
fn test_release_returns_interface() {
    let (driver, interface) = create_mock_driver();
    let released = driver.release();

    released.set_register(0x20, 42);
    assert_eq!(interface.get_register(0x20), 42);
}
