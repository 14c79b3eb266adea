use super::device::ensure_in_range;
use crate::errors::AlpacaResult;
use crate::params::Form;

device_facade! {
    /// Dome Specific Methods.
    pub struct Dome(Dome) {
        /// The dome altitude (degrees, horizon zero and increasing positive to 90 zenith).
        fn altitude() -> f64 = "altitude";
        /// Indicates whether the dome is in the home position.
        fn at_home() -> bool = "athome";
        /// True if the dome is in the programmed park position.
        fn at_park() -> bool = "atpark";
        /// The dome azimuth (degrees, North zero and increasing clockwise, i.e., 90 East, 180 South, 270 West).
        fn azimuth() -> f64 = "azimuth";
        /// True if the dome can move to the home position.
        fn can_find_home() -> bool = "canfindhome";
        /// True if the dome is capable of programmed parking (Park method).
        fn can_park() -> bool = "canpark";
        /// True if driver is capable of setting the dome altitude.
        fn can_set_altitude() -> bool = "cansetaltitude";
        /// True if driver is capable of setting the dome azimuth.
        fn can_set_azimuth() -> bool = "cansetazimuth";
        /// True if driver is capable of setting the dome park position.
        fn can_set_park() -> bool = "cansetpark";
        /// True if driver is capable of automatically operating shutter.
        fn can_set_shutter() -> bool = "cansetshutter";
        /// True if driver is capable of slaving to a telescope.
        fn can_slave() -> bool = "canslave";
        /// True if driver is capable of synchronizing the dome azimuth position using the SyncToAzimuth method.
        fn can_sync_azimuth() -> bool = "cansyncazimuth";
        /// Returns the status of the dome shutter or roll-off roof.
        fn shutter_status() -> ShutterState = "shutterstatus";
        /// True if the dome is slaved to the telescope in its hardware, else False.
        fn slaved() -> bool = "slaved";
        /// True if any part of the dome is currently moving, False if all dome components are steady.
        fn slewing() -> bool = "slewing";
    }
}

impl Dome {
    /// Sets whether the dome is slaved to the telescope.
    pub async fn set_slaved(&self, slaved: bool) -> AlpacaResult {
        self.device
            .put("slaved", Form::new().with("Slaved", slaved))
            .await
    }

    /// Calling this method will immediately disable hardware slewing (Slaved will become False).
    pub async fn abort_slew(&self) -> AlpacaResult {
        self.device.put("abortslew", Form::new()).await
    }

    /// Close the shutter or otherwise shield telescope from the sky.
    pub async fn close_shutter(&self) -> AlpacaResult {
        self.device.put("closeshutter", Form::new()).await
    }

    /// After Home position is established initializes Azimuth to the default value and sets the AtHome flag.
    pub async fn find_home(&self) -> AlpacaResult {
        self.device.put("findhome", Form::new()).await
    }

    /// Open shutter or otherwise expose telescope to the sky.
    pub async fn open_shutter(&self) -> AlpacaResult {
        self.device.put("openshutter", Form::new()).await
    }

    /// After assuming programmed park position, sets AtPark flag.
    pub async fn park(&self) -> AlpacaResult {
        self.device.put("park", Form::new()).await
    }

    /// Set the current azimuth, altitude position of dome to be the park position.
    pub async fn set_park(&self) -> AlpacaResult {
        self.device.put("setpark", Form::new()).await
    }

    /// Slew the dome to the given altitude position, in `[0, 90]` degrees.
    pub async fn slew_to_altitude(&self, altitude: f64) -> AlpacaResult {
        let altitude = ensure_in_range("Altitude", altitude, 0.0..=90.0, "[0, 90]")?;
        self.device
            .put("slewtoaltitude", Form::new().with("Altitude", altitude))
            .await
    }

    /// Slew the dome to the given azimuth position, in `[0, 360]` degrees.
    pub async fn slew_to_azimuth(&self, azimuth: f64) -> AlpacaResult {
        self.device
            .put("slewtoazimuth", azimuth_form(azimuth)?)
            .await
    }

    /// Synchronize the current position of the dome to the given azimuth, in `[0, 360]` degrees.
    pub async fn sync_to_azimuth(&self, azimuth: f64) -> AlpacaResult {
        self.device
            .put("synctoazimuth", azimuth_form(azimuth)?)
            .await
    }
}

fn azimuth_form(azimuth: f64) -> AlpacaResult<Form> {
    let azimuth = ensure_in_range("Azimuth", azimuth, 0.0..=360.0, "[0, 360]")?;
    Ok(Form::new().with("Azimuth", azimuth))
}

device_enum! {
    /// Indicates the current state of the shutter or roof.
    pub enum ShutterState {
        /// The shutter or roof is open.
        Open = 0,
        /// The shutter or roof is closed.
        Closed = 1,
        /// The shutter or roof is opening.
        Opening = 2,
        /// The shutter or roof is closing.
        Closing = 3,
        /// The shutter or roof has encountered a problem.
        Error = 4,
    }
}
