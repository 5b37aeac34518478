//! Register definitions for the ACS37800
//!
//! Every register is 32 bits wide and transferred little-endian. The register file is split into
//! three persistence classes:
//!
//! ## Register Classes
//! - **EEPROM** (0x0B-0x0F): non-volatile configuration, writable only while the customer access
//!   code is present in 0x2F. Each register ends in a 6-bit ECC field.
//! - **Shadow** (0x1B-0x1F): volatile copy of the EEPROM loaded at power-up. No ECC field.
//! - **Volatile** (0x20-0x30): live measurement outputs and the access code register.
//!
//! The trim register uses a different layout in EEPROM (0x0B) and shadow (0x1B) memory, so the two
//! are declared separately. The remaining shadow registers share their EEPROM counterpart's field
//! offsets.

device_driver::create_device!(
    device_name: Acs37800,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        // ==================== EEPROM REGISTERS ====================

        /// Trim and coarse gain (EEPROM, 0x0B)
        register TrimEeprom {
            const ADDRESS = 0x0B;
            const SIZE_BITS = 32;

            /// Current channel offset trim
            qvo_fine: uint = 0..9,
            /// Current channel fine sensitivity trim
            sns_fine: uint = 9..19,
            /// Current channel coarse gain selector
            crs_sns: uint = 19..22,
            /// Use the averaged current for RMS calculations
            iavgselen: bool = 22,
            /// Use the averaged power for power calculations
            pavgselen: bool = 23,
            reserved_25_24: uint = 24..26,
            /// EEPROM error correction status
            ecc: uint = 26..32,
        },

        /// RMS averaging and voltage offset (EEPROM, 0x0C)
        register AveragingEeprom {
            const ADDRESS = 0x0C;
            const SIZE_BITS = 32;

            /// Number of averages for the first RMS averaging stage
            rms_avg_one: uint = 0..7,
            /// Number of averages for the second RMS averaging stage
            rms_avg_two: uint = 7..17,
            /// Voltage channel offset trim
            vchan_offset_code: uint = 17..25,
            reserved_25: uint = 25..26,
            /// EEPROM error correction status
            ecc: uint = 26..32,
        },

        /// Overcurrent fault configuration (EEPROM, 0x0D)
        register FaultEeprom {
            const ADDRESS = 0x0D;
            const SIZE_BITS = 32;

            reserved_6_0: uint = 0..7,
            /// Enable delay on the current channel
            ichan_del_en: bool = 7,
            reserved_8: uint = 8..9,
            /// Channel delay selection
            chan_del_sel: uint = 9..12,
            reserved_12: uint = 12..13,
            /// Overcurrent fault threshold
            fault: uint = 13..21,
            /// Overcurrent fault delay
            fltdly: uint = 21..24,
            reserved_25_24: uint = 24..26,
            /// EEPROM error correction status
            ecc: uint = 26..32,
        },

        /// Voltage event configuration (EEPROM, 0x0E)
        register VoltageEventEeprom {
            const ADDRESS = 0x0E;
            const SIZE_BITS = 32;

            /// Number of cycles before a voltage event is flagged
            vevent_cycs: uint = 0..6,
            reserved_7_6: uint = 6..8,
            /// Overvoltage threshold
            overvreg: uint = 8..14,
            /// Undervoltage threshold
            undervreg: uint = 14..20,
            /// Delay counter selection
            delaycnt_sel: bool = 20,
            /// Half-cycle zero crossing
            halfcycle_en: bool = 21,
            /// Square wave zero crossing output
            squarewave_en: bool = 22,
            /// Zero crossing channel selection
            zerocrosschansel: bool = 23,
            /// Zero crossing edge selection
            zerocrossedgesel: bool = 24,
            reserved_25: uint = 25..26,
            /// EEPROM error correction status
            ecc: uint = 26..32,
        },

        /// I2C and DIO configuration (EEPROM, 0x0F)
        register InterfaceEeprom {
            const ADDRESS = 0x0F;
            const SIZE_BITS = 32;

            reserved_1_0: uint = 0..2,
            /// I2C slave address
            slv_addr: uint = 2..9,
            /// Ignore the DIO pins when selecting the I2C address
            dis_slv_addr: bool = 9,
            /// DIO_0 pin function
            dio_zero_sel: uint = 10..12,
            /// DIO_1 pin function
            dio_one_sel: uint = 12..14,
            /// Number of samples for the RMS calculation
            n: uint = 14..24,
            /// Use `n` instead of the zero-crossing window
            bypass_n_en: bool = 24,
            reserved_25: uint = 25..26,
            /// EEPROM error correction status
            ecc: uint = 26..32,
        },

        // ==================== SHADOW REGISTERS ====================

        /// Trim and coarse gain (shadow, 0x1B)
        ///
        /// The fine sensitivity field is one bit narrower than in EEPROM, which shifts the coarse
        /// gain down by one bit.
        register TrimShadow {
            const ADDRESS = 0x1B;
            const SIZE_BITS = 32;

            /// Current channel offset trim
            qvo_fine: uint = 0..9,
            /// Current channel fine sensitivity trim
            sns_fine: uint = 9..18,
            /// Current channel coarse gain selector
            crs_sns: uint = 18..21,
            /// Use the averaged current for RMS calculations
            iavgselen: bool = 21,
            reserved_31_22: uint = 22..32,
        },

        /// RMS averaging and voltage offset (shadow, 0x1C)
        register AveragingShadow {
            const ADDRESS = 0x1C;
            const SIZE_BITS = 32;

            rms_avg_one: uint = 0..7,
            rms_avg_two: uint = 7..17,
            vchan_offset_code: uint = 17..25,
            reserved_31_25: uint = 25..32,
        },

        /// Overcurrent fault configuration (shadow, 0x1D)
        register FaultShadow {
            const ADDRESS = 0x1D;
            const SIZE_BITS = 32;

            reserved_6_0: uint = 0..7,
            ichan_del_en: bool = 7,
            reserved_8: uint = 8..9,
            chan_del_sel: uint = 9..12,
            reserved_12: uint = 12..13,
            fault: uint = 13..21,
            fltdly: uint = 21..24,
            reserved_31_24: uint = 24..32,
        },

        /// Voltage event configuration (shadow, 0x1E)
        register VoltageEventShadow {
            const ADDRESS = 0x1E;
            const SIZE_BITS = 32;

            vevent_cycs: uint = 0..6,
            reserved_7_6: uint = 6..8,
            overvreg: uint = 8..14,
            undervreg: uint = 14..20,
            delaycnt_sel: bool = 20,
            halfcycle_en: bool = 21,
            squarewave_en: bool = 22,
            zerocrosschansel: bool = 23,
            zerocrossedgesel: bool = 24,
            reserved_31_25: uint = 25..32,
        },

        /// I2C and DIO configuration (shadow, 0x1F)
        register InterfaceShadow {
            const ADDRESS = 0x1F;
            const SIZE_BITS = 32;

            reserved_1_0: uint = 0..2,
            slv_addr: uint = 2..9,
            dis_slv_addr: bool = 9,
            dio_zero_sel: uint = 10..12,
            dio_one_sel: uint = 12..14,
            n: uint = 14..24,
            bypass_n_en: bool = 24,
            reserved_31_25: uint = 25..32,
        },

        // ==================== VOLATILE REGISTERS ====================

        /// RMS voltage and current (0x20)
        register Rms {
            const ADDRESS = 0x20;
            const SIZE_BITS = 32;

            /// RMS voltage, unsigned 16-bit fixed point
            vrms: uint = 0..16,
            /// RMS current, signed 16-bit fixed point
            irms: uint = 16..32,
        },

        /// Active and reactive power (0x21)
        register Power {
            const ADDRESS = 0x21;
            const SIZE_BITS = 32;

            /// Active power, signed 16-bit fixed point
            pactive: uint = 0..16,
            /// Reactive power, unsigned 16-bit fixed point
            pimag: uint = 16..32,
        },

        /// Apparent power and power factor (0x22)
        register PowerFactor {
            const ADDRESS = 0x22;
            const SIZE_BITS = 32;

            /// Apparent power, unsigned 16-bit fixed point
            papparent: uint = 0..16,
            /// Power factor, signed 11-bit fixed point
            pfactor: uint = 16..27,
            /// Phase angle is positive
            posangle: bool = 27,
            /// Power factor is positive
            pospf: bool = 28,
            reserved_31_29: uint = 29..32,
        },

        /// Number of samples in the current RMS window (0x25)
        register NumPoints {
            const ADDRESS = 0x25;
            const SIZE_BITS = 32;

            /// Sample count
            numptsout: uint = 0..10,
            reserved_31_10: uint = 10..32,
        },

        /// RMS voltage and current averaged over one second (0x26)
        register RmsAvgSecond {
            const ADDRESS = 0x26;
            const SIZE_BITS = 32;

            /// Averaged RMS voltage
            vrmsavg: uint = 0..16,
            /// Averaged RMS current
            irmsavg: uint = 16..32,
        },

        /// RMS voltage and current averaged over one minute (0x27)
        register RmsAvgMinute {
            const ADDRESS = 0x27;
            const SIZE_BITS = 32;

            /// Averaged RMS voltage
            vrmsavg: uint = 0..16,
            /// Averaged RMS current
            irmsavg: uint = 16..32,
        },

        /// Active power averaged over one second (0x28)
        register PactAvgSecond {
            const ADDRESS = 0x28;
            const SIZE_BITS = 32;

            /// Averaged active power
            pactavg: uint = 0..16,
            reserved_31_16: uint = 16..32,
        },

        /// Active power averaged over one minute (0x29)
        register PactAvgMinute {
            const ADDRESS = 0x29;
            const SIZE_BITS = 32;

            /// Averaged active power
            pactavg: uint = 0..16,
            reserved_31_16: uint = 16..32,
        },

        /// Instantaneous voltage and current codes (0x2A)
        register InstantCodes {
            const ADDRESS = 0x2A;
            const SIZE_BITS = 32;

            /// Instantaneous voltage, signed 16-bit
            vcodes: uint = 0..16,
            /// Instantaneous current, signed 16-bit
            icodes: uint = 16..32,
        },

        /// Instantaneous power (0x2C)
        register InstantPower {
            const ADDRESS = 0x2C;
            const SIZE_BITS = 32;

            /// Instantaneous power, signed 16-bit
            pinstant: uint = 0..16,
            reserved_31_16: uint = 16..32,
        },

        /// Status flags (0x2D)
        register Status {
            const ADDRESS = 0x2D;
            const SIZE_BITS = 32;

            /// Voltage zero crossing output
            vzerocrossout: bool = 0,
            /// Overcurrent fault output
            faultout: bool = 1,
            /// Latched overcurrent fault
            faultlatched: bool = 2,
            /// Overvoltage flag
            overvoltage: bool = 3,
            /// Undervoltage flag
            undervoltage: bool = 4,
            reserved_31_5: uint = 5..32,
        },

        /// Customer access code (0x2F)
        register AccessCode {
            const ADDRESS = 0x2F;
            const SIZE_BITS = 32;

            /// Write 0x4F70656E to unlock EEPROM writes, 0 to lock
            access_code: uint = 0..32,
        },

        /// Access status (0x30)
        register AccessStatus {
            const ADDRESS = 0x30;
            const SIZE_BITS = 32;

            /// Set while the customer access code is accepted
            customer_access: bool = 0,
            reserved_31_1: uint = 1..32,
        },
    }
);
