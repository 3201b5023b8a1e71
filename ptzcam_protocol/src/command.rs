//! # Command lines
//!
//! Builders for the `v4l2-ctl` invocations used to drive a camera. These are
//! shell command lines: device paths are interpolated as-is.
use crate::controls::ControlName;

/// Default device control tool.
pub const DEFAULT_TOOL: &str = "v4l2-ctl";

/// Lists all video devices.
pub fn list_devices(tool: &str) -> String {
    format!("{tool} --list-devices")
}

/// Lists the controls of the device at `path`.
pub fn list_controls(tool: &str, path: &str) -> String {
    format!("{tool} --device={path} --list-ctrls")
}

/// Sets one or more controls of the device at `path` in a single
/// invocation.
pub fn set_controls(tool: &str, path: &str, controls: &[(ControlName, i64)]) -> String {
    let assignments = controls
        .iter()
        .map(|(control, value)| format!("{control}={value}"))
        .collect::<Vec<_>>()
        .join(",");
    format!("{tool} --device={path} --set-ctrl={assignments}")
}
