#![no_std]

pub mod display;
pub mod imu;
pub mod input;
pub mod persist;
