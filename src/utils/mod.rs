//! Small shared helpers.
//!
//! This module provides:
//! - Hostname normalization (trailing dots, case-insensitive comparison)
//! - A settle-all concurrent join

mod hostname;
mod settle;

pub use hostname::{is_ipv4_literal, same_host, strip_trailing_dot};
pub use settle::settle_all;

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
