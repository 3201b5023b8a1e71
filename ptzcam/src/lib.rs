#![doc = include_str!("../README.md")]

#[macro_use]
extern crate tracing;

pub mod camera;
mod error;
mod sequencer;
mod shell;

pub use {
    crate::{
        error::{exit_status, Error, LEGACY_EXIT_CODE},
        sequencer::{run_cycle, Sequencer, DEFAULT_DELAY},
        shell::{CommandRunner, Shell},
    },
    ptzcam_protocol as protocol,
};
pub type Result<T = ()> = std::result::Result<T, Error>;
