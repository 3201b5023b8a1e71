//! # Test cycle motions
use crate::{
    controls::{Capabilities, ControlName},
    error::Error,
    Result,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// An absolute pan, tilt and zoom position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionTarget {
    pub pan: i64,
    pub tilt: i64,
    pub zoom: i64,
}

impl MotionTarget {
    /// Pan, tilt and zoom all at zero.
    pub const CENTER: Self = Self::new(0, 0, 0);

    pub const fn new(pan: i64, tilt: i64, zoom: i64) -> Self {
        Self { pan, tilt, zoom }
    }
}

impl Display for MotionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.pan, self.tilt, self.zoom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MotionStep {
    Center,
    Max,
    Min,
}

impl Display for MotionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Center => "center",
            Self::Max => "max",
            Self::Min => "min",
        })
    }
}

/// The test cycle: center, max, min, then back to center.
///
/// The max and min steps drive *both* pan and tilt to the **pan** axis'
/// limits; the tilt axis' own range is not consulted. Cameras with an
/// asymmetric tilt range will be asked to tilt past their limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionPlan {
    steps: [(MotionStep, MotionTarget); 4],
}

impl MotionPlan {
    /// Builds the test cycle for a device with the given capabilities.
    ///
    /// ## Errors
    ///
    /// * [`Error::MissingCapability`] if the device does not report
    ///   `pan_absolute` or `zoom_absolute`
    pub fn from_capabilities(caps: &Capabilities) -> Result<Self> {
        let pan = caps
            .get(ControlName::PanAbsolute)
            .ok_or(Error::MissingCapability(ControlName::PanAbsolute.as_str()))?;
        let zoom = caps
            .get(ControlName::ZoomAbsolute)
            .ok_or(Error::MissingCapability(ControlName::ZoomAbsolute.as_str()))?;

        Ok(Self {
            steps: [
                (MotionStep::Center, MotionTarget::CENTER),
                (
                    MotionStep::Max,
                    MotionTarget::new(pan.max, pan.max, zoom.max),
                ),
                (
                    MotionStep::Min,
                    MotionTarget::new(pan.min, pan.min, zoom.min),
                ),
                (MotionStep::Center, MotionTarget::CENTER),
            ],
        })
    }

    pub fn steps(&self) -> &[(MotionStep, MotionTarget)] {
        &self.steps
    }

    /// Gets the targets in the order they are visited.
    pub fn targets(&self) -> impl Iterator<Item = MotionTarget> + '_ {
        self.steps.iter().map(|(_, t)| *t)
    }
}
