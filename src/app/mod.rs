//! Outer application pieces used by the binary.
//!
//! Address input and exit-code mapping.

pub mod exit;
pub mod input;

pub use exit::{exit_code, EXIT_FAILURE, EXIT_SUCCESS};
pub use input::{collect_addresses, read_address_lines};
