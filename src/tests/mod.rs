//! integrated tests
pub mod toolkit;

mod sp3;
