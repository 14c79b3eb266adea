/*!
Typed facades over the ASCOM Alpaca Device API v1.

Each facade (e.g. [`Telescope`], [`Dome`]) owns a handle to an [`AlpacaClient`](crate::AlpacaClient)
and a device number, and maps named ASCOM properties and methods onto GET and PUT requests of the form
`/api/v1/{device_type}/{device_number}/{method}`.

Methods common to all device types live on [`DeviceClient`], which every facade dereferences to.

Arguments with a documented valid range are checked locally: out-of-range values are rejected with
[`AlpacaError::InvalidValue`](crate::AlpacaError::InvalidValue) before anything is sent, and no
transaction ID is consumed.
*/

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[macro_use]
mod macros;

mod device;
pub use device::{DeviceClient, DeviceStateItem};

mod server_info;
pub use server_info::{ConfiguredDevice, ServerInfo};

#[cfg(any(feature = "camera", feature = "telescope"))]
mod camera_telescope_shared;
#[cfg(any(feature = "camera", feature = "telescope"))]
pub use camera_telescope_shared::GuideDirection;

#[cfg(feature = "camera")]
mod camera;
#[cfg(feature = "camera")]
pub use camera::{Camera, CameraState, SensorType};

#[cfg(feature = "cover_calibrator")]
mod cover_calibrator;
#[cfg(feature = "cover_calibrator")]
pub use cover_calibrator::{CalibratorStatus, CoverCalibrator, CoverStatus};

#[cfg(feature = "dome")]
mod dome;
#[cfg(feature = "dome")]
pub use dome::{Dome, ShutterState};

#[cfg(feature = "filter_wheel")]
mod filter_wheel;
#[cfg(feature = "filter_wheel")]
pub use filter_wheel::FilterWheel;

#[cfg(feature = "focuser")]
mod focuser;
#[cfg(feature = "focuser")]
pub use focuser::Focuser;

#[cfg(feature = "observing_conditions")]
mod observing_conditions;
#[cfg(feature = "observing_conditions")]
pub use observing_conditions::ObservingConditions;

#[cfg(feature = "rotator")]
mod rotator;
#[cfg(feature = "rotator")]
pub use rotator::Rotator;

#[cfg(feature = "safety_monitor")]
mod safety_monitor;
#[cfg(feature = "safety_monitor")]
pub use safety_monitor::SafetyMonitor;

#[cfg(feature = "switch")]
mod switch;
#[cfg(feature = "switch")]
pub use switch::Switch;

#[cfg(feature = "telescope")]
mod telescope;
#[cfg(feature = "telescope")]
pub use telescope::{
    AlignmentMode, AxisRate, DriveRate, EquatorialSystem, PierSide, Telescope, TelescopeAxis,
};

/// Alpaca device type, rendered as the lowercase path segment used in URLs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum DeviceType {
    /// Camera.
    #[display("camera")]
    Camera,
    /// Cover calibrator.
    #[display("covercalibrator")]
    CoverCalibrator,
    /// Dome.
    #[display("dome")]
    Dome,
    /// Filter wheel.
    #[display("filterwheel")]
    FilterWheel,
    /// Focuser.
    #[display("focuser")]
    Focuser,
    /// Observing conditions (weather) sensor.
    #[display("observingconditions")]
    ObservingConditions,
    /// Rotator.
    #[display("rotator")]
    Rotator,
    /// Safety monitor.
    #[display("safetymonitor")]
    SafetyMonitor,
    /// Switch.
    #[display("switch")]
    Switch,
    /// Telescope.
    #[display("telescope")]
    Telescope,
}

impl DeviceType {
    /// All device types.
    pub const ALL: [Self; 10] = [
        Self::Camera,
        Self::CoverCalibrator,
        Self::Dome,
        Self::FilterWheel,
        Self::Focuser,
        Self::ObservingConditions,
        Self::Rotator,
        Self::SafetyMonitor,
        Self::Switch,
        Self::Telescope,
    ];
}

/// Error returned when parsing an unknown device type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown device type {0:?}")]
pub struct UnknownDeviceType(pub String);

impl FromStr for DeviceType {
    type Err = UnknownDeviceType;

    /// Parse either the path form (`filterwheel`) or the display form (`FilterWheel`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownDeviceType(s.to_owned()))
    }
}
