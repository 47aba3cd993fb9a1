#![no_std]

#[macro_use]
extern crate log;
extern crate hal;
extern crate heapless;
extern crate micromath;
extern crate nalgebra;
extern crate rand;
extern crate serde;
extern crate spin;

pub mod algorithm;
pub mod app;
pub mod config;
pub mod datastructures;
pub mod logger;
pub mod modes;
pub mod types;

#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(test)]
extern crate pretty_assertions;
