#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod config;
pub mod decode;

mod chunks;
mod error;
mod header;
mod skip;
