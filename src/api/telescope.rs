use super::GuideDirection;
use super::device::ensure_in_range;
use crate::errors::{AlpacaError, AlpacaResult};
use crate::params::Form;
use serde::{Deserialize, Serialize};
use std::ops::Bound;

device_facade! {
    /// Telescope Specific Methods.
    pub struct Telescope(Telescope) {
        /// The alignment mode of the mount (Alt/Az, Polar, German Polar).
        fn alignment_mode() -> AlignmentMode = "alignmentmode";
        /// The altitude above the local horizon of the mount's current position (degrees, positive up).
        fn altitude() -> f64 = "altitude";
        /// The area of the telescope's aperture, taking into account any obstructions (square meters).
        fn aperture_area() -> f64 = "aperturearea";
        /// The telescope's effective aperture diameter (meters).
        fn aperture_diameter() -> f64 = "aperturediameter";
        /// True if the mount is stopped in the Home position.
        fn at_home() -> bool = "athome";
        /// True if the telescope has been put into the parked state.
        fn at_park() -> bool = "atpark";
        /// The azimuth at the local horizon of the mount's current position (degrees, North-referenced, positive East/clockwise).
        fn azimuth() -> f64 = "azimuth";
        /// True if this telescope is capable of programmed finding of its home position.
        fn can_find_home() -> bool = "canfindhome";
        /// True if this telescope is capable of programmed parking.
        fn can_park() -> bool = "canpark";
        /// True if this telescope is capable of software-pulsed guiding.
        fn can_pulse_guide() -> bool = "canpulseguide";
        /// True if the declination rate can be changed.
        fn can_set_declination_rate() -> bool = "cansetdeclinationrate";
        /// True if the guide rates can be changed.
        fn can_set_guide_rates() -> bool = "cansetguiderates";
        /// True if this telescope is capable of programmed setting of its park position.
        fn can_set_park() -> bool = "cansetpark";
        /// True if the side of pier can be set.
        fn can_set_pier_side() -> bool = "cansetpierside";
        /// True if the right ascension rate can be changed.
        fn can_set_right_ascension_rate() -> bool = "cansetrightascensionrate";
        /// True if the tracking state can be changed.
        fn can_set_tracking() -> bool = "cansettracking";
        /// True if this telescope is capable of programmed slewing (synchronous or asynchronous) to equatorial coordinates.
        fn can_slew() -> bool = "canslew";
        /// True if this telescope is capable of programmed slewing (synchronous or asynchronous) to local horizontal coordinates.
        fn can_slew_alt_az() -> bool = "canslewaltaz";
        /// True if this telescope is capable of programmed asynchronous slewing to local horizontal coordinates.
        fn can_slew_alt_az_async() -> bool = "canslewaltazasync";
        /// True if this telescope is capable of programmed asynchronous slewing to equatorial coordinates.
        fn can_slew_async() -> bool = "canslewasync";
        /// True if this telescope is capable of programmed synching to equatorial coordinates.
        fn can_sync() -> bool = "cansync";
        /// True if this telescope is capable of programmed synching to local horizontal coordinates.
        fn can_sync_alt_az() -> bool = "cansyncaltaz";
        /// True if this telescope is capable of programmed unparking.
        fn can_unpark() -> bool = "canunpark";
        /// The declination (degrees) of the mount's current equatorial coordinates.
        fn declination() -> f64 = "declination";
        /// The declination tracking rate (arcseconds per second).
        fn declination_rate() -> f64 = "declinationrate";
        /// True if the telescope or driver applies atmospheric refraction to coordinates.
        fn does_refraction() -> bool = "doesrefraction";
        /// Equatorial coordinate system used by this telescope.
        fn equatorial_system() -> EquatorialSystem = "equatorialsystem";
        /// The telescope's focal length in meters.
        fn focal_length() -> f64 = "focallength";
        /// The current Declination movement rate offset for telescope guiding (degrees/sec).
        fn guide_rate_declination() -> f64 = "guideratedeclination";
        /// The current RightAscension movement rate offset for telescope guiding (degrees/sec).
        fn guide_rate_right_ascension() -> f64 = "guideraterightascension";
        /// True if a PulseGuide command is in progress.
        fn is_pulse_guiding() -> bool = "ispulseguiding";
        /// The right ascension (hours) of the mount's current equatorial coordinates.
        fn right_ascension() -> f64 = "rightascension";
        /// The right ascension tracking rate (seconds per sidereal second).
        fn right_ascension_rate() -> f64 = "rightascensionrate";
        /// The mount's pointing state.
        fn side_of_pier() -> PierSide = "sideofpier";
        /// The local apparent sidereal time from the telescope's internal clock (hours, sidereal).
        fn sidereal_time() -> f64 = "siderealtime";
        /// The elevation above mean sea level (meters) of the site at which the telescope is located.
        fn site_elevation() -> f64 = "siteelevation";
        /// The geodetic(map) latitude (degrees, positive North, WGS84) of the site at which the telescope is located.
        fn site_latitude() -> f64 = "sitelatitude";
        /// The longitude (degrees, positive East, WGS84) of the site at which the telescope is located.
        fn site_longitude() -> f64 = "sitelongitude";
        /// True if any (RA/Dec, Alt/Az or MoveAxis) slew is in progress.
        fn slewing() -> bool = "slewing";
        /// The post-slew settling time (sec.).
        fn slew_settle_time() -> i32 = "slewsettletime";
        /// The declination (degrees, positive North) for the target of an equatorial slew or sync operation.
        fn target_declination() -> f64 = "targetdeclination";
        /// The right ascension (hours) for the target of an equatorial slew or sync operation.
        fn target_right_ascension() -> f64 = "targetrightascension";
        /// The state of the telescope's sidereal tracking drive.
        fn tracking() -> bool = "tracking";
        /// The current tracking rate of the telescope's sidereal drive.
        fn tracking_rate() -> DriveRate = "trackingrate";
        /// The tracking rates supported by the telescope.
        fn tracking_rates() -> Vec<DriveRate> = "trackingrates";
        /// The UTC date/time of the telescope's internal clock in ISO 8601 format.
        fn utc_date() -> String = "utcdate";
    }
}

const LATITUDE: (Bound<f64>, Bound<f64>) = (Bound::Excluded(-90.0), Bound::Excluded(90.0));
const LONGITUDE: (Bound<f64>, Bound<f64>) = (Bound::Excluded(-180.0), Bound::Excluded(180.0));

impl Telescope {
    /// Set the declination tracking rate (arcseconds per second).
    pub async fn set_declination_rate(&self, declination_rate: f64) -> AlpacaResult {
        self.device
            .put(
                "declinationrate",
                Form::new().with("DeclinationRate", declination_rate),
            )
            .await
    }

    /// Set whether the telescope or driver applies atmospheric refraction to coordinates.
    pub async fn set_does_refraction(&self, does_refraction: bool) -> AlpacaResult {
        self.device
            .put(
                "doesrefraction",
                Form::new().with("DoesRefraction", does_refraction),
            )
            .await
    }

    /// Set the current Declination movement rate offset for telescope guiding (degrees/sec).
    pub async fn set_guide_rate_declination(&self, rate: f64) -> AlpacaResult {
        self.device
            .put(
                "guideratedeclination",
                Form::new().with("GuideRateDeclination", rate),
            )
            .await
    }

    /// Set the current RightAscension movement rate offset for telescope guiding (degrees/sec).
    pub async fn set_guide_rate_right_ascension(&self, rate: f64) -> AlpacaResult {
        self.device
            .put(
                "guideraterightascension",
                Form::new().with("GuideRateRightAscension", rate),
            )
            .await
    }

    /// Set the right ascension tracking rate (seconds per sidereal second).
    pub async fn set_right_ascension_rate(&self, right_ascension_rate: f64) -> AlpacaResult {
        self.device
            .put(
                "rightascensionrate",
                Form::new().with("RightAscensionRate", right_ascension_rate),
            )
            .await
    }

    /// Set the pointing state of the mount.
    ///
    /// Only [`PierSide::East`] and [`PierSide::West`] can be requested.
    pub async fn set_side_of_pier(&self, side_of_pier: PierSide) -> AlpacaResult {
        if side_of_pier == PierSide::Unknown {
            return Err(AlpacaError::InvalidValue {
                name: "SideOfPier",
                value: format!("{side_of_pier:?}"),
                expected: "East or West",
            });
        }
        self.device
            .put("sideofpier", Form::new().with("SideOfPier", side_of_pier))
            .await
    }

    /// Set the elevation above mean sea level (metres) of the site, in `[-1000, 10000]`.
    pub async fn set_site_elevation(&self, site_elevation: f64) -> AlpacaResult {
        let site_elevation = ensure_in_range(
            "SiteElevation",
            site_elevation,
            -1000.0..=10000.0,
            "[-1000, 10000]",
        )?;
        self.device
            .put(
                "siteelevation",
                Form::new().with("SiteElevation", site_elevation),
            )
            .await
    }

    /// Set the observing site's latitude (degrees), strictly between -90 and 90.
    pub async fn set_site_latitude(&self, site_latitude: f64) -> AlpacaResult {
        let site_latitude = ensure_in_range("SiteLatitude", site_latitude, LATITUDE, "(-90, 90)")?;
        self.device
            .put("sitelatitude", Form::new().with("SiteLatitude", site_latitude))
            .await
    }

    /// Set the observing site's longitude (degrees, positive East), strictly between -180 and 180.
    pub async fn set_site_longitude(&self, site_longitude: f64) -> AlpacaResult {
        let site_longitude =
            ensure_in_range("SiteLongitude", site_longitude, LONGITUDE, "(-180, 180)")?;
        self.device
            .put(
                "sitelongitude",
                Form::new().with("SiteLongitude", site_longitude),
            )
            .await
    }

    /// Set the post-slew settling time (sec.).
    pub async fn set_slew_settle_time(&self, slew_settle_time: i32) -> AlpacaResult {
        let slew_settle_time =
            ensure_in_range("SlewSettleTime", slew_settle_time, 0.., "non-negative")?;
        self.device
            .put(
                "slewsettletime",
                Form::new().with("SlewSettleTime", slew_settle_time),
            )
            .await
    }

    /// Set the declination (degrees, positive North) for the target of an equatorial slew or sync operation.
    pub async fn set_target_declination(&self, target_declination: f64) -> AlpacaResult {
        let target_declination = ensure_in_range(
            "TargetDeclination",
            target_declination,
            -90.0..=90.0,
            "[-90, 90]",
        )?;
        self.device
            .put(
                "targetdeclination",
                Form::new().with("TargetDeclination", target_declination),
            )
            .await
    }

    /// Set the right ascension (hours) for the target of an equatorial slew or sync operation.
    pub async fn set_target_right_ascension(&self, target_right_ascension: f64) -> AlpacaResult {
        let target_right_ascension = ensure_in_range(
            "TargetRightAscension",
            target_right_ascension,
            0.0..=24.0,
            "[0, 24]",
        )?;
        self.device
            .put(
                "targetrightascension",
                Form::new().with("TargetRightAscension", target_right_ascension),
            )
            .await
    }

    /// Set the state of the telescope's sidereal tracking drive.
    pub async fn set_tracking(&self, tracking: bool) -> AlpacaResult {
        self.device
            .put("tracking", Form::new().with("Tracking", tracking))
            .await
    }

    /// Set the current tracking rate of the telescope's sidereal drive.
    pub async fn set_tracking_rate(&self, tracking_rate: DriveRate) -> AlpacaResult {
        self.device
            .put(
                "trackingrate",
                Form::new().with("TrackingRate", tracking_rate),
            )
            .await
    }

    /// Set the UTC date/time of the telescope's internal clock, in ISO 8601 format.
    pub async fn set_utc_date(&self, utc_date: &str) -> AlpacaResult {
        self.device
            .put("utcdate", Form::new().with("UTCDate", utc_date))
            .await
    }

    /// Immediately stops a slew in progress.
    pub async fn abort_slew(&self) -> AlpacaResult {
        self.device.put("abortslew", Form::new()).await
    }

    /// The rates at which the telescope may be moved about the specified axis by [`move_axis`](Self::move_axis).
    pub async fn axis_rates(&self, axis: TelescopeAxis) -> AlpacaResult<Vec<AxisRate>> {
        self.device
            .get_with("axisrates", Form::new().with("axis", axis))
            .await
    }

    /// True if this telescope can move the requested axis.
    pub async fn can_move_axis(&self, axis: TelescopeAxis) -> AlpacaResult<bool> {
        self.device
            .get_with("canmoveaxis", Form::new().with("axis", axis))
            .await
    }

    /// Predicts the pointing state that a German equatorial mount will be in if it slews to the given coordinates.
    pub async fn destination_side_of_pier(
        &self,
        right_ascension: f64,
        declination: f64,
    ) -> AlpacaResult<PierSide> {
        self.device
            .get_with(
                "destinationsideofpier",
                Form::new()
                    .with("RightAscension", right_ascension)
                    .with("Declination", declination),
            )
            .await
    }

    /// Locates the telescope's "home" position (synchronous).
    pub async fn find_home(&self) -> AlpacaResult {
        self.device.put("findhome", Form::new()).await
    }

    /// Move the telescope in one axis at the given rate (degrees/sec).
    pub async fn move_axis(&self, axis: TelescopeAxis, rate: f64) -> AlpacaResult {
        self.device
            .put(
                "moveaxis",
                Form::new().with("Axis", axis).with("Rate", rate),
            )
            .await
    }

    /// Move the telescope to its park position, stop all motion and set AtPark to True.
    pub async fn park(&self) -> AlpacaResult {
        self.device.put("park", Form::new()).await
    }

    /// Moves the scope in the given direction for the given time (milliseconds) at the current guide rate.
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

    /// Sets the telescope's park position to be its current position.
    pub async fn set_park(&self) -> AlpacaResult {
        self.device.put("setpark", Form::new()).await
    }

    /// Move the telescope to the given local horizontal coordinates, return when slew is complete.
    pub async fn slew_to_alt_az(&self, azimuth: f64, altitude: f64) -> AlpacaResult {
        self.device
            .put("slewtoaltaz", alt_az_form(azimuth, altitude)?)
            .await
    }

    /// Move the telescope to the given local horizontal coordinates, return immediately after the slew starts.
    pub async fn slew_to_alt_az_async(&self, azimuth: f64, altitude: f64) -> AlpacaResult {
        self.device
            .put("slewtoaltazasync", alt_az_form(azimuth, altitude)?)
            .await
    }

    /// Move the telescope to the given equatorial coordinates, return when slew is complete.
    pub async fn slew_to_coordinates(&self, right_ascension: f64, declination: f64) -> AlpacaResult {
        self.device
            .put(
                "slewtocoordinates",
                coordinates_form(right_ascension, declination)?,
            )
            .await
    }

    /// Move the telescope to the given equatorial coordinates, return immediately after the slew starts.
    ///
    /// Poll [`slewing`](Self::slewing) to find out when the mount reaches the coordinates.
    pub async fn slew_to_coordinates_async(
        &self,
        right_ascension: f64,
        declination: f64,
    ) -> AlpacaResult {
        self.device
            .put(
                "slewtocoordinatesasync",
                coordinates_form(right_ascension, declination)?,
            )
            .await
    }

    /// Move the telescope to the target equatorial coordinates, return when slew is complete.
    pub async fn slew_to_target(&self) -> AlpacaResult {
        self.device.put("slewtotarget", Form::new()).await
    }

    /// Move the telescope to the target equatorial coordinates, return immediately after the slew starts.
    pub async fn slew_to_target_async(&self) -> AlpacaResult {
        self.device.put("slewtotargetasync", Form::new()).await
    }

    /// Matches the scope's local horizontal coordinates to the given local horizontal coordinates.
    pub async fn sync_to_alt_az(&self, azimuth: f64, altitude: f64) -> AlpacaResult {
        self.device
            .put("synctoaltaz", alt_az_form(azimuth, altitude)?)
            .await
    }

    /// Matches the scope's equatorial coordinates to the given equatorial coordinates.
    pub async fn sync_to_coordinates(&self, right_ascension: f64, declination: f64) -> AlpacaResult {
        self.device
            .put(
                "synctocoordinates",
                coordinates_form(right_ascension, declination)?,
            )
            .await
    }

    /// Matches the scope's equatorial coordinates to the target equatorial coordinates.
    pub async fn sync_to_target(&self) -> AlpacaResult {
        self.device.put("synctotarget", Form::new()).await
    }

    /// Takes telescope out of the Parked state.
    pub async fn unpark(&self) -> AlpacaResult {
        self.device.put("unpark", Form::new()).await
    }
}

fn alt_az_form(azimuth: f64, altitude: f64) -> AlpacaResult<Form> {
    Ok(Form::new()
        .with(
            "Azimuth",
            ensure_in_range("Azimuth", azimuth, 0.0..=360.0, "[0, 360]")?,
        )
        .with(
            "Altitude",
            ensure_in_range("Altitude", altitude, -90.0..=90.0, "[-90, 90]")?,
        ))
}

fn coordinates_form(right_ascension: f64, declination: f64) -> AlpacaResult<Form> {
    Ok(Form::new()
        .with(
            "RightAscension",
            ensure_in_range("RightAscension", right_ascension, 0.0..=24.0, "[0, 24]")?,
        )
        .with(
            "Declination",
            ensure_in_range("Declination", declination, -90.0..=90.0, "[-90, 90]")?,
        ))
}

device_enum! {
    /// The alignment mode (geometry) of the mount.
    pub enum AlignmentMode {
        /// Altitude-Azimuth type mount.
        AltAz = 0,
        /// Polar (equatorial) mount other than German equatorial.
        Polar = 1,
        /// German equatorial type mount.
        GermanPolar = 2,
    }
}

device_enum! {
    /// The equatorial coordinate system used by the mount.
    pub enum EquatorialSystem {
        /// Custom or unknown equinox and/or reference frame.
        Other = 0,
        /// Topocentric coordinates.
        Topocentric = 1,
        /// J2000 equator/equinox.
        J2000 = 2,
        /// J2050 equator/equinox.
        J2050 = 3,
        /// B1950 equinox, FK4 reference frame.
        B1950 = 4,
    }
}

device_enum! {
    /// Well-known telescope tracking rates.
    pub enum DriveRate {
        /// Sidereal tracking rate (15.041 arcseconds per second).
        Sidereal = 0,
        /// Lunar tracking rate (14.685 arcseconds per second).
        Lunar = 1,
        /// Solar tracking rate (15.0 arcseconds per second).
        Solar = 2,
        /// King tracking rate (15.0369 arcseconds per second).
        King = 3,
    }
}

device_enum! {
    /// The pointing state of the mount.
    pub enum PierSide {
        /// Normal pointing state - Mount on the East side of pier (looking West).
        East = 0,
        /// Through the pole pointing state - Mount on the West side of pier (looking East).
        West = 1,
        /// Unknown or indeterminate.
        Unknown = -1,
    }
}

device_enum! {
    /// The telescope axis.
    pub enum TelescopeAxis {
        /// Primary axis (e.g., Right Ascension or Azimuth).
        Primary = 0,
        /// Secondary axis (e.g., Declination or Altitude).
        Secondary = 1,
        /// Tertiary axis (e.g. imager rotator/de-rotator).
        Tertiary = 2,
    }
}

/// Axis rate object.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AxisRate {
    /// The maximum rate (degrees per second).
    pub maximum: f64,
    /// The minimum rate (degrees per second).
    pub minimum: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockReply, MockServer};

    #[tokio::test]
    async fn site_validation_happens_before_io() -> eyre::Result<()> {
        let server = MockServer::start().await?;
        let telescope = Telescope::new(&server.config(), 0);

        for latitude in [-90.0, 90.0, 123.0, f64::NAN] {
            let err = telescope
                .set_site_latitude(latitude)
                .await
                .expect_err("latitude must be rejected");
            assert!(matches!(err, AlpacaError::InvalidValue { name: "SiteLatitude", .. }));
        }
        for longitude in [-180.0, 180.0] {
            assert!(telescope.set_site_longitude(longitude).await.is_err());
        }
        for elevation in [-1000.5, 10000.5] {
            assert!(telescope.set_site_elevation(elevation).await.is_err());
        }
        let err = telescope
            .set_side_of_pier(PierSide::Unknown)
            .await
            .expect_err("unknown pier side must be rejected");
        assert_eq!(
            err.to_string(),
            "invalid SideOfPier: Unknown (expected East or West)"
        );

        assert_eq!(telescope.client().transaction_id(), 0);
        assert!(server.requests().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn site_setters_accept_valid_values() -> eyre::Result<()> {
        let server = MockServer::start().await?;
        let telescope = Telescope::new(&server.config(), 0);
        server.reply_with(MockReply::ack());

        telescope.set_site_latitude(51.5).await?;
        assert_eq!(server.last_request().param("SiteLatitude").as_deref(), Some("51.5"));

        telescope.set_site_longitude(-0.25).await?;
        telescope.set_site_elevation(-1000.0).await?;
        telescope.set_site_elevation(10000.0).await?;

        telescope.set_side_of_pier(PierSide::West).await?;
        let request = server.last_request();
        assert_eq!(request.path, "/api/v1/telescope/0/sideofpier");
        assert_eq!(request.param("SideOfPier").as_deref(), Some("1"));

        assert_eq!(telescope.client().transaction_id(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn axis_queries() -> eyre::Result<()> {
        let server = MockServer::start().await?;
        let telescope = Telescope::new(&server.config(), 1);

        server.reply_with(MockReply::value(serde_json::json!([
            { "Maximum": 6.0, "Minimum": 0.0 },
        ])));
        let rates = telescope.axis_rates(TelescopeAxis::Secondary).await?;
        assert_eq!(
            rates,
            [AxisRate {
                maximum: 6.0,
                minimum: 0.0,
            }]
        );
        let request = server.last_request();
        assert_eq!(request.path, "/api/v1/telescope/1/axisrates");
        assert_eq!(
            request.query.as_deref(),
            Some("ClientID=42&ClientTransactionID=0&axis=1")
        );

        server.reply_with(MockReply::value(true));
        assert!(telescope.can_move_axis(TelescopeAxis::Tertiary).await?);
        assert_eq!(server.last_request().param("axis").as_deref(), Some("2"));

        server.reply_with(MockReply::ack());
        telescope.move_axis(TelescopeAxis::Primary, 1.5).await?;
        let request = server.last_request();
        assert_eq!(
            request.body,
            "ClientID=42&ClientTransactionID=1&Axis=0&Rate=1.5"
        );
        Ok(())
    }

    #[tokio::test]
    async fn decodes_enum_properties() -> eyre::Result<()> {
        let server = MockServer::start().await?;
        let telescope = Telescope::new(&server.config(), 0);

        server.reply_with(MockReply::value(2));
        assert_eq!(telescope.alignment_mode().await?, AlignmentMode::GermanPolar);

        server.reply_with(MockReply::value(-1));
        assert_eq!(telescope.side_of_pier().await?, PierSide::Unknown);

        server.reply_with(MockReply::value([0, 1, 3]));
        assert_eq!(
            telescope.tracking_rates().await?,
            [DriveRate::Sidereal, DriveRate::Lunar, DriveRate::King]
        );

        server.reply_with(MockReply::value(7));
        let err = telescope
            .equatorial_system()
            .await
            .expect_err("7 is not a known equatorial system");
        assert!(matches!(err, AlpacaError::Decode { .. }), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn slews_validate_coordinates() -> eyre::Result<()> {
        let server = MockServer::start().await?;
        let telescope = Telescope::new(&server.config(), 0);
        server.reply_with(MockReply::ack());

        assert!(telescope.slew_to_coordinates_async(25.0, 0.0).await.is_err());
        assert!(telescope.slew_to_alt_az(180.0, 91.0).await.is_err());
        assert_eq!(telescope.client().transaction_id(), 0);

        telescope.slew_to_coordinates_async(5.5, -12.25).await?;
        let request = server.last_request();
        assert_eq!(request.path, "/api/v1/telescope/0/slewtocoordinatesasync");
        assert_eq!(request.param("RightAscension").as_deref(), Some("5.5"));
        assert_eq!(request.param("Declination").as_deref(), Some("-12.25"));

        telescope.pulse_guide(GuideDirection::West, 500).await?;
        let request = server.last_request();
        assert_eq!(request.param("Direction").as_deref(), Some("3"));
        assert_eq!(request.param("Duration").as_deref(), Some("500"));
        assert_eq!(telescope.client().transaction_id(), 2);
        Ok(())
    }
}
