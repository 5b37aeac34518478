//! Common test utilities and mock implementations

#![allow(dead_code, unused_imports)]


pub use mock_interface::{MockError, MockInterface, Operation};
pub use test_utils::{MockDelay, assert_float_eq, create_mock_driver, create_mock_driver_with};
