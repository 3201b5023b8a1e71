//! Camera discovery, capabilities and motion.
//!
//! Every operation runs `tool` (normally [DEFAULT_TOOL]) through a
//! [CommandRunner], one command at a time.
//!
//! [DEFAULT_TOOL]: crate::protocol::command::DEFAULT_TOOL
use crate::{
    protocol::{
        command, parse_capabilities, parse_device_list, Capabilities, ControlName, Device,
        MotionTarget,
    },
    CommandRunner, Result,
};

/// Lists USB video devices, in the order `tool` enumerates them.
pub async fn discover(runner: &impl CommandRunner, tool: &str) -> Result<Vec<Device>> {
    let output = runner.run(&command::list_devices(tool)).await?;
    let devices = parse_device_list(&output);
    debug!("found {} USB video device(s): {devices:?}", devices.len());
    Ok(devices)
}

/// Gets the first USB video device, if there is one.
pub async fn get_first_camera(runner: &impl CommandRunner, tool: &str) -> Result<Option<Device>> {
    Ok(discover(runner, tool).await?.into_iter().next())
}

/// Reads the pan, tilt and zoom capabilities of `device`.
pub async fn get_capabilities(
    runner: &impl CommandRunner,
    tool: &str,
    device: &Device,
) -> Result<Capabilities> {
    let output = runner
        .run(&command::list_controls(tool, &device.path))
        .await?;
    let caps = parse_capabilities(&output);
    debug!("{}: capability groups {:?}", device.path, caps.groups());
    Ok(caps)
}

/// Moves pan and tilt to absolute positions, in a single command.
///
/// Values are not checked against the device's capabilities.
pub async fn set_pan_tilt(
    runner: &impl CommandRunner,
    tool: &str,
    device: &Device,
    pan: i64,
    tilt: i64,
) -> Result {
    let cmd = command::set_controls(
        tool,
        &device.path,
        &[
            (ControlName::PanAbsolute, pan),
            (ControlName::TiltAbsolute, tilt),
        ],
    );
    runner.run(&cmd).await?;
    Ok(())
}

/// Sets absolute zoom.
///
/// The value is not checked against the device's capabilities.
pub async fn set_zoom(
    runner: &impl CommandRunner,
    tool: &str,
    device: &Device,
    zoom: i64,
) -> Result {
    let cmd = command::set_controls(tool, &device.path, &[(ControlName::ZoomAbsolute, zoom)]);
    runner.run(&cmd).await?;
    Ok(())
}

/// Moves to `target`: pan and tilt first, then zoom.
pub async fn move_to(
    runner: &impl CommandRunner,
    tool: &str,
    device: &Device,
    target: MotionTarget,
) -> Result {
    set_pan_tilt(runner, tool, device, target.pan, target.tilt).await?;
    set_zoom(runner, tool, device, target.zoom).await
}
