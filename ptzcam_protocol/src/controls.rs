//! # Control capabilities
//!
//! `v4l2-ctl --device=/dev/videoN --list-ctrls` prints one line per control:
//!
//! ```text
//!                      brightness (int)    : min=0 max=14 step=1 default=6 value=6
//!                    pan_absolute (int)    : min=-612000 max=612000 step=3600 default=0 value=0
//!                  focus_absolute (int)    : min=0 max=3900 step=1 default=1675 value=1607 flags=inactive
//!                      focus_auto (bool)   : default=1 value=1
//!                 zoom_continuous (int)    : min=0 max=7 step=1 default=6 value=0 flags=write-only
//! ```
//!
//! Only the six pan, tilt and zoom controls in [ControlName] are read; every
//! other line is ignored.
use crate::{error::Error, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display};

/// Controls read from the device, in the order they are matched against a
/// line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControlName {
    PanAbsolute,
    TiltAbsolute,
    ZoomAbsolute,
    /// Zoom speed.
    ZoomContinuous,
    PanSpeed,
    TiltSpeed,
}

impl ControlName {
    /// All recognised controls, in match priority order.
    pub const ALL: [Self; 6] = [
        Self::PanAbsolute,
        Self::TiltAbsolute,
        Self::ZoomAbsolute,
        Self::ZoomContinuous,
        Self::PanSpeed,
        Self::TiltSpeed,
    ];

    /// The control's name, as used by `v4l2-ctl`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PanAbsolute => "pan_absolute",
            Self::TiltAbsolute => "tilt_absolute",
            Self::ZoomAbsolute => "zoom_absolute",
            Self::ZoomContinuous => "zoom_continuous",
            Self::PanSpeed => "pan_speed",
            Self::TiltSpeed => "tilt_speed",
        }
    }

    /// Finds the first recognised control named in `s`.
    pub fn find(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| s.contains(c.as_str()))
    }
}

impl Display for ControlName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// `key=value` parameters describing a control.
///
/// Values are kept as text; unknown keys like `flags` are retained but never
/// read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlParams {
    params: BTreeMap<String, String>,
}

impl ControlParams {
    /// Parses a semicolon-delimited sequence of `key=value` tokens.
    ///
    /// Empty tokens are skipped, and a token without `=` is recorded with an
    /// empty value. Later tokens replace earlier ones with the same key.
    pub fn parse(data: &str) -> Self {
        let params = data
            .split(';')
            .filter(|t| !t.is_empty())
            .map(|t| {
                let (k, v) = t.split_once('=').unwrap_or((t, ""));
                (k.to_string(), v.to_string())
            })
            .collect();
        Self { params }
    }

    /// Parses the part of a `--list-ctrls` line after its colon.
    pub fn from_line_data(data: &str) -> Self {
        Self::parse(&data.trim().replace(' ', ";"))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Gets a numeric parameter of `control`.
    pub fn get_int(&self, control: ControlName, field: &'static str) -> Result<i64> {
        let value = self.get(field).ok_or(Error::MissingField {
            control: control.as_str(),
            field,
        })?;
        value.parse().map_err(|_| Error::InvalidNumber {
            control: control.as_str(),
            field,
            value: value.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Range of values a control accepts, and its current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisRange {
    pub min: i64,
    pub max: i64,
    /// Step size.
    pub resolution: i64,
    pub default: i64,
    /// Current value.
    pub value: i64,
}

impl AxisRange {
    /// Builds an [AxisRange] from the parameters of `control`.
    ///
    /// ## Errors
    ///
    /// * [`Error::MissingField`] if any of `min`, `max`, `step`, `default`
    ///   or `value` is absent
    /// * [`Error::InvalidNumber`] if one of those isn't an integer
    pub fn from_params(control: ControlName, params: &ControlParams) -> Result<Self> {
        Ok(Self {
            min: params.get_int(control, "min")?,
            max: params.get_int(control, "max")?,
            resolution: params.get_int(control, "step")?,
            default: params.get_int(control, "default")?,
            value: params.get_int(control, "value")?,
        })
    }
}

impl Display for AxisRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}..={} step {} (default {}, value {})",
            self.min, self.max, self.resolution, self.default, self.value
        )
    }
}

/// A pair of pan and tilt ranges.
///
/// Either may be missing if the device only reported one of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanTilt {
    pub pan: Option<AxisRange>,
    pub tilt: Option<AxisRange>,
}

bitflags! {
    /// Capability groups reported by a device.
    #[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
    pub struct CapabilityGroups: u8 {
        const ABSOLUTE_PAN_TILT = 1;
        const ABSOLUTE_ZOOM     = 1 << 1;
        const RELATIVE_PAN_TILT = 1 << 2;
        const RELATIVE_ZOOM     = 1 << 3;

        const ABSOLUTE = Self::ABSOLUTE_PAN_TILT.bits() | Self::ABSOLUTE_ZOOM.bits();
    }
}

/// Pan, tilt and zoom capabilities of a device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Capabilities {
    /// `pan_absolute` and `tilt_absolute`.
    pub absolute_pan_tilt: Option<PanTilt>,
    /// `zoom_absolute`.
    pub absolute_zoom: Option<AxisRange>,
    /// `pan_speed` and `tilt_speed`.
    pub relative_pan_tilt: Option<PanTilt>,
    /// `zoom_continuous`.
    pub relative_zoom: Option<AxisRange>,
}

impl Capabilities {
    /// Records the range of `control`, replacing any previous range for it.
    ///
    /// Pan/tilt groups are created the first time either of their axes is
    /// set.
    pub fn set(&mut self, control: ControlName, range: AxisRange) {
        match control {
            ControlName::PanAbsolute => {
                self.absolute_pan_tilt.get_or_insert_with(Default::default).pan = Some(range)
            }
            ControlName::TiltAbsolute => {
                self.absolute_pan_tilt.get_or_insert_with(Default::default).tilt = Some(range)
            }
            ControlName::ZoomAbsolute => self.absolute_zoom = Some(range),
            ControlName::ZoomContinuous => self.relative_zoom = Some(range),
            ControlName::PanSpeed => {
                self.relative_pan_tilt.get_or_insert_with(Default::default).pan = Some(range)
            }
            ControlName::TiltSpeed => {
                self.relative_pan_tilt.get_or_insert_with(Default::default).tilt = Some(range)
            }
        }
    }

    /// Gets the recorded range of `control`.
    pub fn get(&self, control: ControlName) -> Option<AxisRange> {
        match control {
            ControlName::PanAbsolute => self.absolute_pan_tilt.and_then(|g| g.pan),
            ControlName::TiltAbsolute => self.absolute_pan_tilt.and_then(|g| g.tilt),
            ControlName::ZoomAbsolute => self.absolute_zoom,
            ControlName::ZoomContinuous => self.relative_zoom,
            ControlName::PanSpeed => self.relative_pan_tilt.and_then(|g| g.pan),
            ControlName::TiltSpeed => self.relative_pan_tilt.and_then(|g| g.tilt),
        }
    }

    /// Gets the groups which are present.
    pub fn groups(&self) -> CapabilityGroups {
        let mut groups = CapabilityGroups::empty();
        groups.set(
            CapabilityGroups::ABSOLUTE_PAN_TILT,
            self.absolute_pan_tilt.is_some(),
        );
        groups.set(CapabilityGroups::ABSOLUTE_ZOOM, self.absolute_zoom.is_some());
        groups.set(
            CapabilityGroups::RELATIVE_PAN_TILT,
            self.relative_pan_tilt.is_some(),
        );
        groups.set(CapabilityGroups::RELATIVE_ZOOM, self.relative_zoom.is_some());
        groups
    }
}

/// Parses the output of `v4l2-ctl --list-ctrls`.
///
/// Recognised controls which are missing a field are logged and skipped.
pub fn parse_capabilities(output: &str) -> Capabilities {
    let output = output.replace('\t', "");
    let mut caps = Capabilities::default();

    for line in output.split('\n') {
        let Some((name, data)) = line.split_once(':') else {
            continue;
        };
        let Some(control) = ControlName::find(name) else {
            continue;
        };

        let params = ControlParams::from_line_data(data);
        match AxisRange::from_params(control, &params) {
            Ok(range) => {
                debug!("{control}: {range}");
                caps.set(control, range);
            }
            Err(e) => warn!("ignoring malformed control line {line:?}: {e}"),
        }
    }

    caps
}

#[cfg(test)]
mod test {
    use super::*;

    /// Logitech PTZ Pro 2, from an older version of `v4l2-ctl`.
    const PTZ_PRO_2: &str = "                     brightness (int)    : min=0 max=14 step=1 default=6 value=6
                       contrast (int)    : min=0 max=14 step=1 default=8 value=8
                     saturation (int)    : min=60 max=200 step=10 default=110 value=110
                            hue (int)    : min=0 max=14 step=1 default=7 value=7
                          gamma (int)    : min=0 max=63 step=1 default=0 value=0
           power_line_frequency (menu)   : min=0 max=2 default=1 value=2
                      sharpness (int)    : min=0 max=15 step=1 default=4 value=4
         backlight_compensation (int)    : min=0 max=1 step=1 default=0 value=0
                   pan_absolute (int)    : min=-612000 max=612000 step=3600 default=0 value=0
                  tilt_absolute (int)    : min=-108000 max=324000 step=3600 default=0 value=0
                 focus_absolute (int)    : min=0 max=3900 step=1 default=1675 value=1607 flags=inactive
                     focus_auto (bool)   : default=1 value=1
                  zoom_absolute (int)    : min=0 max=16384 step=1 default=0 value=0
                zoom_continuous (int)    : min=0 max=7 step=1 default=6 value=0 flags=write-only
                      pan_speed (int)    : min=0 max=24 step=1 default=15 value=0
                     tilt_speed (int)    : min=0 max=20 step=1 default=15 value=0
";

    fn range(min: i64, max: i64, resolution: i64, default: i64, value: i64) -> AxisRange {
        AxisRange {
            min,
            max,
            resolution,
            default,
            value,
        }
    }

    #[test]
    fn pan_absolute_line() -> Result {
        let caps = parse_capabilities(
            "pan_absolute (int)    : min=-612000 max=612000 step=3600 default=0 value=0",
        );
        assert_eq!(
            Some(range(-612000, 612000, 3600, 0, 0)),
            caps.get(ControlName::PanAbsolute)
        );
        let group = caps.absolute_pan_tilt.ok_or(Error::MissingCapability("pan"))?;
        assert_eq!(None, group.tilt);
        assert_eq!(CapabilityGroups::ABSOLUTE_PAN_TILT, caps.groups());
        Ok(())
    }

    #[test]
    fn ptz_pro_2() {
        let caps = parse_capabilities(PTZ_PRO_2);
        assert_eq!(
            Capabilities {
                absolute_pan_tilt: Some(PanTilt {
                    pan: Some(range(-612000, 612000, 3600, 0, 0)),
                    tilt: Some(range(-108000, 324000, 3600, 0, 0)),
                }),
                absolute_zoom: Some(range(0, 16384, 1, 0, 0)),
                relative_pan_tilt: Some(PanTilt {
                    pan: Some(range(0, 24, 1, 15, 0)),
                    tilt: Some(range(0, 20, 1, 15, 0)),
                }),
                relative_zoom: Some(range(0, 7, 1, 6, 0)),
            },
            caps
        );
        assert_eq!(CapabilityGroups::all(), caps.groups());

        // Same input, same result.
        assert_eq!(caps, parse_capabilities(PTZ_PRO_2));
    }

    #[test]
    fn tabs_are_ignored() {
        let tabbed = PTZ_PRO_2.replace("    ", "\t    \t").replace("=", "=\t");
        assert_eq!(parse_capabilities(PTZ_PRO_2), parse_capabilities(&tabbed));
    }

    #[test]
    fn newer_tool_output() {
        // v4l2-ctl >= 1.14 adds control IDs and section headers.
        let output = "
User Controls

                     brightness 0x00980900 (int)    : min=0 max=255 step=1 default=128 value=128

Camera Controls

                   pan_absolute 0x009a0908 (int)    : min=-36000 max=36000 step=3600 default=0 value=0
                  zoom_absolute 0x009a090d (int)    : min=100 max=500 step=1 default=100 value=100
";
        let caps = parse_capabilities(output);
        assert_eq!(
            Some(range(-36000, 36000, 3600, 0, 0)),
            caps.get(ControlName::PanAbsolute)
        );
        assert_eq!(None, caps.get(ControlName::TiltAbsolute));
        assert_eq!(Some(range(100, 500, 1, 100, 100)), caps.absolute_zoom);
        assert_eq!(CapabilityGroups::ABSOLUTE, caps.groups());
    }

    #[test]
    fn no_ptz_controls() {
        let caps = parse_capabilities(
            "brightness (int)    : min=0 max=14 step=1 default=6 value=6\n\
             focus_auto (bool)   : default=1 value=1\n",
        );
        assert_eq!(Capabilities::default(), caps);
        assert!(caps.groups().is_empty());
    }

    #[test]
    fn malformed_line_skipped() {
        let caps = parse_capabilities(
            "pan_absolute (int)    : default=0 value=0\n\
             tilt_absolute (int)    : min=-10 max=10 step=1 default=0 value=0\n",
        );
        assert_eq!(
            Some(PanTilt {
                pan: None,
                tilt: Some(range(-10, 10, 1, 0, 0)),
            }),
            caps.absolute_pan_tilt
        );

        // A malformed line on its own doesn't create its group.
        let caps = parse_capabilities("pan_absolute (int) : default=0 value=0");
        assert_eq!(None, caps.absolute_pan_tilt);
        assert!(caps.groups().is_empty());
    }

    #[test]
    fn later_line_replaces_earlier() {
        let caps = parse_capabilities(
            "zoom_absolute (int) : min=0 max=10 step=1 default=0 value=0\n\
             zoom_absolute (int) : min=0 max=20 step=1 default=0 value=5\n",
        );
        assert_eq!(Some(range(0, 20, 1, 0, 5)), caps.absolute_zoom);
    }

    #[test]
    fn params() -> Result {
        let params = ControlParams::from_line_data(
            "  min=0 max=3900  step=1 default=1675 value=1607 flags=inactive ",
        );
        assert_eq!(6, params.len());
        assert_eq!(Some("inactive"), params.get("flags"));
        assert_eq!(3900, params.get_int(ControlName::ZoomAbsolute, "max")?);
        assert_eq!(
            Err(Error::InvalidNumber {
                control: "zoom_absolute",
                field: "flags",
                value: "inactive".to_string(),
            }),
            params.get_int(ControlName::ZoomAbsolute, "flags")
        );
        assert_eq!(
            Err(Error::MissingField {
                control: "pan_speed",
                field: "menu",
            }),
            params.get_int(ControlName::PanSpeed, "menu")
        );
        assert!(ControlParams::parse("").is_empty());
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_derives() {
        use crate::{Device, MotionTarget};
        use serde::{de::DeserializeOwned, Serialize};

        fn serde_type<T: Serialize + DeserializeOwned>() {}
        serde_type::<ControlName>();
        serde_type::<AxisRange>();
        serde_type::<PanTilt>();
        serde_type::<Capabilities>();
        serde_type::<Device>();
        serde_type::<MotionTarget>();
    }

    #[test]
    fn control_name_priority() {
        assert_eq!(Some(ControlName::PanAbsolute), ControlName::find("pan_absolute (int)"));
        assert_eq!(Some(ControlName::TiltSpeed), ControlName::find("  tilt_speed (int) "));
        assert_eq!(None, ControlName::find("focus_absolute (int)"));
        assert_eq!(None, ControlName::find("pan_relative (int)"));
    }
}
