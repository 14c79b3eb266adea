use super::device::ensure_in_range;
use crate::errors::AlpacaResult;
use crate::params::Form;

device_facade! {
    /// CoverCalibrator Specific Methods.
    pub struct CoverCalibrator(CoverCalibrator) {
        /// Returns the current calibrator brightness in the range 0 (completely off) to MaxBrightness (fully on).
        fn brightness() -> i32 = "brightness";
        /// True while the calibrator brightness is transitioning to a new value.
        fn calibrator_changing() -> bool = "calibratorchanging";
        /// Returns the state of the calibration device, if present, otherwise returns "NotPresent".
        fn calibrator_state() -> CalibratorStatus = "calibratorstate";
        /// True while the cover is in motion.
        fn cover_moving() -> bool = "covermoving";
        /// Returns the state of the device cover, if present, otherwise returns "NotPresent".
        fn cover_state() -> CoverStatus = "coverstate";
        /// The Brightness value that makes the calibrator deliver its maximum illumination.
        fn max_brightness() -> i32 = "maxbrightness";
    }
}

impl CoverCalibrator {
    /// Turns the calibrator off if the device has calibration capability.
    pub async fn calibrator_off(&self) -> AlpacaResult {
        self.device.put("calibratoroff", Form::new()).await
    }

    /// Turns the calibrator on at the specified brightness if the device has calibration capability.
    pub async fn calibrator_on(&self, brightness: i32) -> AlpacaResult {
        let brightness = ensure_in_range("Brightness", brightness, 0.., "non-negative")?;
        self.device
            .put("calibratoron", Form::new().with("Brightness", brightness))
            .await
    }

    /// Initiates cover closing if a cover is present.
    pub async fn close_cover(&self) -> AlpacaResult {
        self.device.put("closecover", Form::new()).await
    }

    /// Stops any cover movement that may be in progress if a cover is present and cover movement can be interrupted.
    pub async fn halt_cover(&self) -> AlpacaResult {
        self.device.put("haltcover", Form::new()).await
    }

    /// Initiates cover opening if a cover is present.
    pub async fn open_cover(&self) -> AlpacaResult {
        self.device.put("opencover", Form::new()).await
    }
}

device_enum! {
    /// Describes the state of a calibration device.
    pub enum CalibratorStatus {
        /// This device does not have a calibration capability.
        NotPresent = 0,
        /// The calibrator is off.
        Off = 1,
        /// The calibrator is stabilising or is not yet in the commanded state.
        NotReady = 2,
        /// The calibrator is ready for use.
        Ready = 3,
        /// The calibrator state is unknown.
        Unknown = 4,
        /// The calibrator encountered an error when changing state.
        Error = 5,
    }
}

device_enum! {
    /// Describes the state of a telescope cover.
    pub enum CoverStatus {
        /// This device does not have a cover that can be closed independently.
        NotPresent = 0,
        /// The cover is closed.
        Closed = 1,
        /// The cover is moving to a new position.
        Moving = 2,
        /// The cover is open.
        Open = 3,
        /// The state of the cover is unknown.
        Unknown = 4,
        /// The device encountered an error when changing state.
        Error = 5,
    }
}
