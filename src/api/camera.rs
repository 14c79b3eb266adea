use super::GuideDirection;
use super::device::ensure_in_range;
use crate::errors::AlpacaResult;
use crate::params::Form;
use crate::response::ImageArray;

device_facade! {
    /// Camera Specific Methods.
    pub struct Camera(Camera) {
        /// Returns the X offset of the Bayer matrix, as defined in SensorType.
        fn bayer_offset_x() -> i32 = "bayeroffsetx";
        /// Returns the Y offset of the Bayer matrix, as defined in SensorType.
        fn bayer_offset_y() -> i32 = "bayeroffsety";
        /// Returns the binning factor for the X axis.
        fn bin_x() -> i32 = "binx";
        /// Returns the binning factor for the Y axis.
        fn bin_y() -> i32 = "biny";
        /// Returns the current camera operational state.
        fn camera_state() -> CameraState = "camerastate";
        /// Returns the width of the CCD camera chip in unbinned pixels.
        fn camera_xsize() -> i32 = "cameraxsize";
        /// Returns the height of the CCD camera chip in unbinned pixels.
        fn camera_ysize() -> i32 = "cameraysize";
        /// Returns a flag showing whether this camera can abort exposures.
        fn can_abort_exposure() -> bool = "canabortexposure";
        /// Returns a flag showing whether this camera supports asymmetric binning.
        fn can_asymmetric_bin() -> bool = "canasymmetricbin";
        /// Indicates whether the camera has a fast readout mode.
        fn can_fast_readout() -> bool = "canfastreadout";
        /// If true, the camera's cooler power setting can be read.
        fn can_get_cooler_power() -> bool = "cangetcoolerpower";
        /// Returns a flag indicating whether this camera supports pulse guiding.
        fn can_pulse_guide() -> bool = "canpulseguide";
        /// Returns a flag indicating whether this camera supports setting the CCD temperature.
        fn can_set_ccd_temperature() -> bool = "cansetccdtemperature";
        /// Returns a flag indicating whether this camera can stop an exposure that is in progress.
        fn can_stop_exposure() -> bool = "canstopexposure";
        /// Returns the current CCD temperature in degrees Celsius.
        fn ccd_temperature() -> f64 = "ccdtemperature";
        /// Returns the current cooler on/off state.
        fn cooler_on() -> bool = "cooleron";
        /// Returns the present cooler power level, in percent.
        fn cooler_power() -> f64 = "coolerpower";
        /// Returns the gain of the camera in photoelectrons per A/D unit.
        fn electrons_per_adu() -> f64 = "electronsperadu";
        /// Returns the maximum exposure time supported by StartExposure.
        fn exposure_max() -> f64 = "exposuremax";
        /// Returns the minimum exposure time supported by StartExposure.
        fn exposure_min() -> f64 = "exposuremin";
        /// Returns the smallest increment in exposure time supported by StartExposure.
        fn exposure_resolution() -> f64 = "exposureresolution";
        /// Returns whether Fast Readout Mode is enabled.
        fn fast_readout() -> bool = "fastreadout";
        /// Reports the full well capacity of the camera in electrons, at the current camera settings (binning, SetupDialog settings, etc.).
        fn full_well_capacity() -> f64 = "fullwellcapacity";
        /// The camera's gain (GAIN VALUE MODE) OR the index of the selected camera gain description in the Gains array (GAINS INDEX MODE).
        fn gain() -> i32 = "gain";
        /// Returns the maximum value of Gain.
        fn gain_max() -> i32 = "gainmax";
        /// Returns the minimum value of Gain.
        fn gain_min() -> i32 = "gainmin";
        /// Returns the Gains supported by the camera.
        fn gains() -> Vec<String> = "gains";
        /// Returns a flag indicating whether this camera has a mechanical shutter.
        fn has_shutter() -> bool = "hasshutter";
        /// Returns the current heat sink temperature (called "ambient temperature" by some manufacturers) in degrees Celsius.
        fn heat_sink_temperature() -> f64 = "heatsinktemperature";
        /// Returns a flag indicating whether the image is ready to be downloaded from the camera.
        fn image_ready() -> bool = "imageready";
        /// Returns a flag indicating whether the camera is currently in a PulseGuide operation.
        fn is_pulse_guiding() -> bool = "ispulseguiding";
        /// Reports the actual exposure duration in seconds (i.e. shutter open time).
        fn last_exposure_duration() -> f64 = "lastexposureduration";
        /// Reports the actual exposure start in the FITS-standard CCYY-MM-DDThh:mm:ss[.sss...] format.
        fn last_exposure_start_time() -> String = "lastexposurestarttime";
        /// Reports the maximum ADU value the camera can produce.
        fn max_adu() -> i32 = "maxadu";
        /// Returns the maximum allowed binning for the X camera axis.
        fn max_bin_x() -> i32 = "maxbinx";
        /// Returns the maximum allowed binning for the Y camera axis.
        fn max_bin_y() -> i32 = "maxbiny";
        /// Returns the current subframe width, if binning is active, value is in binned pixels.
        fn num_x() -> i32 = "numx";
        /// Returns the current subframe height, if binning is active, value is in binned pixels.
        fn num_y() -> i32 = "numy";
        /// Returns the camera's offset (OFFSET VALUE MODE) OR the index of the selected camera offset description in the Offsets array (OFFSETS INDEX MODE).
        fn offset() -> i32 = "offset";
        /// Returns the maximum value of offset.
        fn offset_max() -> i32 = "offsetmax";
        /// Returns the Minimum value of offset.
        fn offset_min() -> i32 = "offsetmin";
        /// Returns the Offsets supported by the camera.
        fn offsets() -> Vec<String> = "offsets";
        /// Returns the percentage of the current operation that is complete.
        fn percent_completed() -> i32 = "percentcompleted";
        /// Returns the width of the CCD chip pixels in microns.
        fn pixel_size_x() -> f64 = "pixelsizex";
        /// Returns the Height of the CCD chip pixels in microns.
        fn pixel_size_y() -> f64 = "pixelsizey";
        /// Returns the ReadoutMode as an index into the array ReadoutModes.
        fn readout_mode() -> i32 = "readoutmode";
        /// List of available readout modes.
        fn readout_modes() -> Vec<String> = "readoutmodes";
        /// The name of the sensor used within the camera.
        fn sensor_name() -> String = "sensorname";
        /// Returns a value indicating whether the sensor is monochrome, or what Bayer matrix it encodes.
        fn sensor_type() -> SensorType = "sensortype";
        /// Returns the current camera cooler setpoint in degrees Celsius.
        fn set_ccd_temperature() -> f64 = "setccdtemperature";
        /// Sets the subframe start position for the X axis (0 based) and returns the current value.
        fn start_x() -> i32 = "startx";
        /// Sets the subframe start position for the Y axis (0 based) and returns the current value.
        fn start_y() -> i32 = "starty";
        /// The Camera's sub exposure duration in seconds.
        fn sub_exposure_duration() -> f64 = "subexposureduration";
    }
}

impl Camera {
    /// Sets the binning factor for the X axis.
    pub async fn set_bin_x(&self, bin_x: i32) -> AlpacaResult {
        let bin_x = ensure_in_range("BinX", bin_x, 1.., "at least 1")?;
        self.device.put("binx", Form::new().with("BinX", bin_x)).await
    }

    /// Sets the binning factor for the Y axis.
    pub async fn set_bin_y(&self, bin_y: i32) -> AlpacaResult {
        let bin_y = ensure_in_range("BinY", bin_y, 1.., "at least 1")?;
        self.device.put("biny", Form::new().with("BinY", bin_y)).await
    }

    /// Turns the camera cooler on and off.
    pub async fn set_cooler_on(&self, cooler_on: bool) -> AlpacaResult {
        self.device
            .put("cooleron", Form::new().with("CoolerOn", cooler_on))
            .await
    }

    /// Sets whether Fast Readout Mode is enabled.
    pub async fn set_fast_readout(&self, fast_readout: bool) -> AlpacaResult {
        self.device
            .put("fastreadout", Form::new().with("FastReadout", fast_readout))
            .await
    }

    /// Sets the camera's gain.
    pub async fn set_gain(&self, gain: i32) -> AlpacaResult {
        self.device.put("gain", Form::new().with("Gain", gain)).await
    }

    /// Sets the current subframe width.
    pub async fn set_num_x(&self, num_x: i32) -> AlpacaResult {
        let num_x = ensure_in_range("NumX", num_x, 1.., "at least 1")?;
        self.device.put("numx", Form::new().with("NumX", num_x)).await
    }

    /// Sets the current subframe height.
    pub async fn set_num_y(&self, num_y: i32) -> AlpacaResult {
        let num_y = ensure_in_range("NumY", num_y, 1.., "at least 1")?;
        self.device.put("numy", Form::new().with("NumY", num_y)).await
    }

    /// Sets the camera's offset.
    pub async fn set_offset(&self, offset: i32) -> AlpacaResult {
        self.device
            .put("offset", Form::new().with("Offset", offset))
            .await
    }

    /// Sets the ReadoutMode as an index into the array ReadoutModes.
    pub async fn set_readout_mode(&self, readout_mode: i32) -> AlpacaResult {
        let readout_mode = ensure_in_range("ReadoutMode", readout_mode, 0.., "non-negative")?;
        self.device
            .put("readoutmode", Form::new().with("ReadoutMode", readout_mode))
            .await
    }

    /// Set the camera's cooler setpoint (degrees Celsius).
    pub async fn set_set_ccd_temperature(&self, set_ccd_temperature: f64) -> AlpacaResult {
        let set_ccd_temperature = ensure_in_range(
            "SetCCDTemperature",
            set_ccd_temperature,
            -273.15..=100.0,
            "[-273.15, 100]",
        )?;
        self.device
            .put(
                "setccdtemperature",
                Form::new().with("SetCCDTemperature", set_ccd_temperature),
            )
            .await
    }

    /// Sets the subframe start position for the X axis (0 based).
    pub async fn set_start_x(&self, start_x: i32) -> AlpacaResult {
        let start_x = ensure_in_range("StartX", start_x, 0.., "non-negative")?;
        self.device
            .put("startx", Form::new().with("StartX", start_x))
            .await
    }

    /// Sets the subframe start position for the Y axis (0 based).
    pub async fn set_start_y(&self, start_y: i32) -> AlpacaResult {
        let start_y = ensure_in_range("StartY", start_y, 0.., "non-negative")?;
        self.device
            .put("starty", Form::new().with("StartY", start_y))
            .await
    }

    /// Sets image sub exposure duration in seconds.
    pub async fn set_sub_exposure_duration(&self, sub_exposure_duration: f64) -> AlpacaResult {
        let sub_exposure_duration = ensure_in_range(
            "SubExposureDuration",
            sub_exposure_duration,
            0.0..,
            "non-negative",
        )?;
        self.device
            .put(
                "subexposureduration",
                Form::new().with("SubExposureDuration", sub_exposure_duration),
            )
            .await
    }

    /// Returns the image from the last exposure as a 2-D array, indexed as `data[x][y]`.
    ///
    /// Convert it with [`ImageArray::to_ndarray`] for dense processing.
    pub async fn image_array(&self) -> AlpacaResult<ImageArray> {
        self.device
            .client()
            .get_image_array(
                self.device.device_type(),
                self.device.device_number(),
                "imagearray",
            )
            .await
    }

    /// Aborts the current exposure, if any, and returns the camera to Idle state.
    pub async fn abort_exposure(&self) -> AlpacaResult {
        self.device.put("abortexposure", Form::new()).await
    }

    /// Instructs the mount to move in a particular direction for a given period of time (milliseconds).
    pub async fn pulse_guide(&self, direction: GuideDirection, duration: i32) -> AlpacaResult {
        let duration = ensure_in_range("Duration", duration, 0.., "non-negative")?;
        self.device
            .put(
                "pulseguide",
                Form::new()
                    .with("Direction", direction)
                    .with("Duration", duration),
            )
            .await
    }

    /// Starts an exposure of `duration` seconds.
    ///
    /// Use [`image_ready`](Self::image_ready) to check when the exposure is complete.
    pub async fn start_exposure(&self, duration: f64, light: bool) -> AlpacaResult {
        let duration = ensure_in_range("Duration", duration, 0.0.., "non-negative")?;
        self.device
            .put(
                "startexposure",
                Form::new().with("Duration", duration).with("Light", light),
            )
            .await
    }

    /// Stops the current exposure, if any.
    pub async fn stop_exposure(&self) -> AlpacaResult {
        self.device.put("stopexposure", Form::new()).await
    }
}

device_enum! {
    /// Camera state.
    pub enum CameraState {
        /// At idle state, available to start exposure.
        Idle = 0,
        /// Exposure started but waiting (for shutter, trigger, filter wheel, etc.).
        Waiting = 1,
        /// Exposure currently in progress.
        Exposing = 2,
        /// Sensor array is being read out (digitized).
        Reading = 3,
        /// Downloading data to host.
        Download = 4,
        /// Camera error condition serious enough to prevent further operations.
        Error = 5,
    }
}

device_enum! {
    /// The type of sensor in the camera.
    pub enum SensorType {
        /// Single-plane monochrome sensor.
        Monochrome = 0,
        /// Multiple-plane color sensor.
        Color = 1,
        /// Single-plane Bayer matrix RGGB sensor.
        RGGB = 2,
        /// Single-plane Bayer matrix CMYG sensor.
        CMYG = 3,
        /// Single-plane Bayer matrix CMYG2 sensor.
        CMYG2 = 4,
        /// Single-plane Bayer matrix LRGB sensor.
        LRGB = 5,
    }
}
