//! Unit tests for error handling and recovery

use crate::common::{MockDelay, MockError, create_mock_driver};
use acs37800::{
    AveragingConfig, AveragingWindow, CoarseGain, Error, VoltageEventConfig, WriteMode,
};

#[test]
fn test_read_failure_basic() {
    let (mut driver, interface) = create_mock_driver();

    // Inject a read failure
    interface.fail_next_read();

    // This read should fail
    let result = driver.read_rms();
    assert!(
        matches!(result, Err(Error::Bus(MockError::Communication))),
        "Read should fail when error is injected"
    );
}

#[test]
fn test_read_failure_recovery() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_read();
    assert!(driver.read_rms().is_err(), "First read should fail");

    // Subsequent read should succeed (error was only for one operation)
    assert!(
        driver.read_rms().is_ok(),
        "Subsequent read should succeed after single failure"
    );
}

#[test]
fn test_write_failure_basic() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();

    interface.fail_next_write();

    let result = driver.set_current_coarse_gain(CoarseGain::X2, WriteMode::ShadowOnly, &mut delay);
    assert!(result.is_err(), "Write should fail when error is injected");
    assert!(interface.writes().is_empty());
}

#[test]
fn test_shadow_read_failure_prevents_write() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();

    interface.fail_next_read();

    let result = driver.set_bypass_n_enable(true, WriteMode::ShadowOnly, &mut delay);
    assert!(result.is_err());
    assert!(
        interface.writes().is_empty(),
        "Read-modify-write must not write after a failed read"
    );
}

#[test]
fn test_multiple_read_failures() {
    let (mut driver, interface) = create_mock_driver();

    for i in 0..3 {
        interface.fail_next_read();
        let result = driver.read_power_factor();
        assert!(result.is_err(), "Read {} should fail", i);
    }

    assert!(driver.read_power_factor().is_ok());
}

#[test]
fn test_instantaneous_stops_after_first_failure() {
    let (mut driver, interface) = create_mock_driver();
    interface.fail_reads_at(0x2A);

    assert!(driver.read_instantaneous().is_err());
    assert!(
        interface.operations().is_empty(),
        "0x2C must not be read after 0x2A fails"
    );
}

#[test]
fn test_instantaneous_second_read_failure() {
    let (mut driver, interface) = create_mock_driver();
    interface.fail_reads_at(0x2C);

    assert!(driver.read_instantaneous().is_err());
    assert_eq!(interface.operations().len(), 1);
}

#[test]
fn test_probe_reports_missing_device() {
    let (mut driver, interface) = create_mock_driver();

    assert!(driver.probe());

    interface.fail_reads_at(0x1B);
    assert!(!driver.probe());

    // The driver stays usable for other registers
    assert!(driver.read_rms().is_ok());
}

#[test]
fn test_invalid_number_of_samples() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();

    let result = driver.set_number_of_samples(1024, WriteMode::ShadowOnly, &mut delay);
    assert!(matches!(result, Err(Error::InvalidConfig)));
    assert!(interface.operations().is_empty());

    driver
        .set_number_of_samples(1023, WriteMode::ShadowOnly, &mut delay)
        .unwrap();
    assert_eq!(driver.get_number_of_samples().unwrap(), 1023);
}

#[test]
fn test_invalid_voltage_event_config() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();

    let config = VoltageEventConfig {
        overvoltage_threshold: 64,
        undervoltage_threshold: 0,
        event_cycles: 0,
    };
    let result = driver.set_voltage_event_config(config, WriteMode::ShadowAndPersist, &mut delay);

    assert!(matches!(result, Err(Error::InvalidConfig)));
    assert!(interface.operations().is_empty());
}

#[test]
fn test_invalid_averaging_config() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();

    let config = AveragingConfig {
        rms_avg_one: 0x80,
        rms_avg_two: 0,
    };
    let result = driver.set_averaging_config(config, WriteMode::ShadowOnly, &mut delay);

    assert!(matches!(result, Err(Error::InvalidConfig)));
    assert!(interface.operations().is_empty());
}

#[test]
fn test_average_read_failure_per_window() {
    let (mut driver, interface) = create_mock_driver();
    interface.fail_reads_at(0x27);

    assert!(driver.read_rms_average(AveragingWindow::OneSecond).is_ok());
    assert!(driver.read_rms_average(AveragingWindow::OneMinute).is_err());
}

#[test]
fn test_raw_register_errors_propagate() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_read();
    assert!(matches!(
        driver.read_register(0x20),
        Err(Error::Bus(MockError::Communication))
    ));

    interface.fail_next_write();
    assert!(matches!(
        driver.write_register(0x1B, 0),
        Err(Error::Bus(MockError::Communication))
    ));
}

#[cfg(feature = "std")]
#[test]
fn test_errors_box_into_std_error() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();

    interface.fail_next_read();
    let bus: Box<dyn std::error::Error> = Box::new(driver.read_rms().unwrap_err());
    assert_eq!(bus.to_string(), "I2C bus error: Communication");

    let invalid = driver
        .set_i2c_address(0x80, &mut delay)
        .unwrap_err();
    assert_eq!(invalid.to_string(), "value does not fit its register field");

    interface.drop_eeprom_writes(true);
    let unverified = driver.set_i2c_address(0x61, &mut delay).unwrap_err();
    assert_eq!(unverified.to_string(), "EEPROM write did not verify");
}
