//! Unit tests for the generated register field layout

use crate::common::MockInterface;
use acs37800::registers::Acs37800;

fn device_with(address: u8, value: u32) -> Acs37800<MockInterface> {
    let interface = MockInterface::new();
    interface.set_register(address, value);
    Acs37800::new(interface)
}

#[test]
fn test_trim_eeprom_fields() {
    let value = 0x0AB | (0x2CD << 9) | (0b101 << 19) | (1 << 22) | (0x2A << 26);
    let mut device = device_with(0x0B, value);

    let reg = device.trim_eeprom().read().unwrap();
    assert_eq!(reg.qvo_fine(), 0x0AB);
    assert_eq!(reg.sns_fine(), 0x2CD);
    assert_eq!(reg.crs_sns(), 0b101);
    assert!(reg.iavgselen());
    assert!(!reg.pavgselen());
    assert_eq!(reg.ecc(), 0x2A);
}

#[test]
fn test_trim_shadow_fields() {
    let value = 0x0AB | (0x12D << 9) | (0b110 << 18) | (1 << 21);
    let mut device = device_with(0x1B, value);

    let reg = device.trim_shadow().read().unwrap();
    assert_eq!(reg.qvo_fine(), 0x0AB);
    assert_eq!(reg.sns_fine(), 0x12D);
    assert_eq!(reg.crs_sns(), 0b110);
    assert!(reg.iavgselen());
}

#[test]
fn test_interface_eeprom_fields() {
    let value = (0x61 << 2) | (1 << 9) | (0b01 << 10) | (0b10 << 12) | (777 << 14) | (1 << 24);
    let mut device = device_with(0x0F, value);

    let reg = device.interface_eeprom().read().unwrap();
    assert_eq!(reg.slv_addr(), 0x61);
    assert!(reg.dis_slv_addr());
    assert_eq!(reg.dio_zero_sel(), 0b01);
    assert_eq!(reg.dio_one_sel(), 0b10);
    assert_eq!(reg.n(), 777);
    assert!(reg.bypass_n_en());
    assert_eq!(reg.ecc(), 0);
}

#[test]
fn test_power_factor_fields() {
    let value = 0xBEEF | (0x7FF << 16) | (1 << 28);
    let mut device = device_with(0x22, value);

    let reg = device.power_factor().read().unwrap();
    assert_eq!(reg.papparent(), 0xBEEF);
    assert_eq!(reg.pfactor(), 0x7FF);
    assert!(!reg.posangle());
    assert!(reg.pospf());
}

#[test]
fn test_status_bit_order() {
    let mut device = device_with(0x2D, 0b0_0001);
    let reg = device.status().read().unwrap();
    assert!(reg.vzerocrossout());
    assert!(!reg.faultout());

    let mut device = device_with(0x2D, 0b1_0000);
    let reg = device.status().read().unwrap();
    assert!(reg.undervoltage());
    assert!(!reg.overvoltage());
}

#[test]
fn test_access_code_write_is_little_endian() {
    let interface = MockInterface::new();
    let mut device = Acs37800::new(interface.clone());

    device
        .access_code()
        .write(|w| {
            w.set_access_code(0x4F70_656E);
        })
        .unwrap();

    assert_eq!(interface.get_register(0x2F), 0x4F70_656E);
}
