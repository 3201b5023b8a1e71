//! Test cycle sequencing.
use crate::{
    camera,
    protocol::{Device, MotionPlan},
    CommandRunner, Error, Result,
};
use std::time::Duration;
use tokio::time::sleep;

/// Time to wait after each step but the last.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(5000);

/// Runs the [MotionPlan] test cycle on a device, pausing between each step.
///
/// Each step's commands complete before its pause begins, and only one
/// command runs at a time. The first failure aborts the cycle.
pub struct Sequencer<'a, R> {
    runner: &'a R,
    tool: &'a str,
    delay: Duration,
}

impl<'a, R: CommandRunner> Sequencer<'a, R> {
    pub fn new(runner: &'a R, tool: &'a str) -> Self {
        Self {
            runner,
            tool,
            delay: DEFAULT_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Reads the capabilities of `device`, and runs the test cycle on it.
    ///
    /// ## Errors
    ///
    /// * [`protocol::Error::MissingCapability`][crate::protocol::Error] if
    ///   the device lacks absolute pan or zoom. This is checked before the
    ///   device is moved.
    pub async fn run_device(&self, device: &Device) -> Result {
        let caps = camera::get_capabilities(self.runner, self.tool, device).await?;
        let plan = MotionPlan::from_capabilities(&caps)?;
        self.run(device, &plan).await
    }

    /// Runs `plan` on `device`.
    pub async fn run(&self, device: &Device, plan: &MotionPlan) -> Result {
        let steps = plan.steps();
        for (i, (step, target)) in steps.iter().enumerate() {
            info!("step {}/{}: {step} {target}", i + 1, steps.len());
            camera::move_to(self.runner, self.tool, device, *target).await?;

            if i + 1 < steps.len() {
                debug!("waiting {:?}", self.delay);
                sleep(self.delay).await;
            }
        }

        info!("test complete");
        Ok(())
    }
}

/// Runs a full test cycle on the first USB camera `tool` finds.
///
/// ## Errors
///
/// * [`Error::NoDeviceFound`] if there are no USB video devices
pub async fn run_cycle(runner: &impl CommandRunner, tool: &str, delay: Duration) -> Result {
    let device = camera::get_first_camera(runner, tool)
        .await?
        .ok_or(Error::NoDeviceFound)?;
    info!("using camera {device}");

    Sequencer::new(runner, tool)
        .with_delay(delay)
        .run_device(&device)
        .await
}
