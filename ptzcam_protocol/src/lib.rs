#![doc = include_str!("../README.md")]

#[macro_use]
extern crate bitflags;

#[macro_use]
extern crate tracing;

pub mod command;
pub mod controls;
pub mod device;
mod error;
pub mod motion;

pub use crate::{
    controls::{
        parse_capabilities, AxisRange, Capabilities, CapabilityGroups, ControlName,
        ControlParams, PanTilt,
    },
    device::{parse_device_list, Device, DeviceListParser},
    error::Error,
    motion::{MotionPlan, MotionStep, MotionTarget},
};

/// Result type.
pub type Result<T = ()> = std::result::Result<T, Error>;
