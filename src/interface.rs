//! Bus interface implementation for the ACS37800
//!
//! This module provides the `device-driver` register interface for I2C communication with the
//! ACS37800. Every register transfer moves exactly one address byte and four little-endian data
//! bytes; byte order is handled by the register definitions, so this layer only frames the bytes.

use crate::DEFAULT_I2C_ADDRESS;

use device_driver::RegisterInterface;

/// Size of a register transfer in bytes
const REGISTER_BYTES: usize = 4;

/// I2C interface for the ACS37800
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface with the default address (0x60, DIO pins low)
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(i2c);
    /// let mut meter = Acs37800Driver::new(interface);
    /// ```
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: DEFAULT_I2C_ADDRESS,
        }
    }

    /// Create a new I2C interface with a custom device address
    ///
    /// Use this when the DIO pins strap a different address, or after the address has been
    /// moved in EEPROM and the device power-cycled.
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    /// * `address` - The 7-bit I2C device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// The 7-bit address this interface talks to
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        // Repeated start between the address byte and the data, the bus is never released
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        let mut buffer = [0u8; 1 + REGISTER_BYTES];
        buffer[0] = address;
        let len = write_data.len().min(REGISTER_BYTES);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len])
    }
}
