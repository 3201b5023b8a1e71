//! # Device enumeration
//!
//! `v4l2-ctl --list-devices` prints a descriptor line for each device,
//! followed by its tab-indented device nodes, with a blank line between
//! devices:
//!
//! ```text
//! HD Pro Webcam C920 (usb-0000:00:14.0-1):
//! 	/dev/video0
//! 	/dev/video1
//!
//! bcm2835-codec-decode (platform:bcm2835-codec):
//! 	/dev/video10
//! ```
//!
//! Only USB devices are of interest, and only the first node listed under
//! each of them: later nodes of multi-stream cameras are metadata streams
//! that don't accept controls.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A video device found on the USB bus.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Device {
    /// Raw descriptor line, including the bus identifier.
    pub name: String,
    /// Device node path, eg: `/dev/video0`.
    pub path: String,
}

impl Device {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.name, self.path)
    }
}

/// Pairs each USB descriptor line with the device node line immediately
/// following it.
///
/// Lines must have had their tab characters stripped before being pushed.
///
/// ## States
///
/// * idle: [Self::push_line] ignores device node lines.
/// * awaiting path: a USB descriptor line has been seen, and the next line
///   completes a [Device] if it is a device node.
///
/// Any line which is neither a descriptor nor a device node returns the
/// parser to idle.
#[derive(Debug, Default)]
pub struct DeviceListParser {
    /// Descriptor line waiting for its device node. `Some` while awaiting a
    /// path.
    pending: Option<String>,
}

impl DeviceListParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the next device node line will produce a [Device].
    #[inline]
    pub fn awaiting_path(&self) -> bool {
        self.pending.is_some()
    }

    /// Feeds one line of output to the parser, returning a [Device] if the
    /// line completed one.
    pub fn push_line(&mut self, line: &str) -> Option<Device> {
        if line.contains("usb-") {
            self.pending = Some(line.to_string());
            return None;
        }

        if line.contains("/dev/video") {
            let Some(name) = self.pending.take() else {
                trace!("ignoring device node without a fresh descriptor: {line:?}");
                return None;
            };
            return Some(Device {
                name,
                path: line.to_string(),
            });
        }

        if let Some(name) = self.pending.take() {
            trace!("descriptor {name:?} was not followed by a device node");
        }
        None
    }
}

/// Parses the output of `v4l2-ctl --list-devices` into the USB devices it
/// lists, in the order the tool listed them.
pub fn parse_device_list(output: &str) -> Vec<Device> {
    let output = output.replace('\t', "");
    let mut parser = DeviceListParser::new();
    output
        .split('\n')
        .filter_map(|line| parser.push_line(line))
        .collect()
}
