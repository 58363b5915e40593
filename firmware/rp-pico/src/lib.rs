#![no_std]

//! Raspberry Pi Pico bindings for the traffic-light library.

pub mod alarm;
pub mod console;
pub mod lamps;
