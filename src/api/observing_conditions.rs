use super::device::ensure_in_range;
use crate::errors::AlpacaResult;
use crate::params::Form;

device_facade! {
    /// ObservingConditions Specific Methods.
    pub struct ObservingConditions(ObservingConditions) {
        /// Gets the time period (hours) over which observations will be averaged.
        fn average_period() -> f64 = "averageperiod";
        /// Gets the percentage of the sky obscured by cloud.
        fn cloud_cover() -> f64 = "cloudcover";
        /// Gets the atmospheric dew point at the observatory reported in °C.
        fn dew_point() -> f64 = "dewpoint";
        /// Gets the atmospheric humidity (%) at the observatory.
        fn humidity() -> f64 = "humidity";
        /// Gets the atmospheric pressure in hectoPascals at the observatory's altitude - NOT reduced to sea level.
        fn pressure() -> f64 = "pressure";
        /// Gets the rain rate (mm/hour) at the observatory.
        fn rain_rate() -> f64 = "rainrate";
        /// Gets the sky brightness at the observatory (Lux).
        fn sky_brightness() -> f64 = "skybrightness";
        /// Gets the sky quality at the observatory (magnitudes per square arc second).
        fn sky_quality() -> f64 = "skyquality";
        /// Gets the sky temperature(°C) at the observatory.
        fn sky_temperature() -> f64 = "skytemperature";
        /// Gets the seeing at the observatory measured as star full width half maximum (FWHM) in arc secs.
        fn star_fwhm() -> f64 = "starfwhm";
        /// Gets the temperature(°C) at the observatory.
        fn temperature() -> f64 = "temperature";
        /// Gets the wind direction.
        ///
        /// The returned value must be between 0.0 and 360.0, interpreted according to the metereological standard, where a special value of 0.0 is returned when the wind speed is 0.0.
        fn wind_direction() -> f64 = "winddirection";
        /// Gets the peak 3 second wind gust(m/s) at the observatory over the last 2 minutes.
        fn wind_gust() -> f64 = "windgust";
        /// Gets the wind speed(m/s) at the observatory.
        fn wind_speed() -> f64 = "windspeed";
    }
}

impl ObservingConditions {
    /// Sets the time period (hours) over which observations will be averaged.
    pub async fn set_average_period(&self, average_period: f64) -> AlpacaResult {
        let average_period =
            ensure_in_range("AveragePeriod", average_period, 0.0.., "non-negative")?;
        self.device
            .put(
                "averageperiod",
                Form::new().with("AveragePeriod", average_period),
            )
            .await
    }

    /// Forces the driver to immediately query its attached hardware to refresh sensor values.
    pub async fn refresh(&self) -> AlpacaResult {
        self.device.put("refresh", Form::new()).await
    }

    /// Gets a description of the sensor with the name specified in the SensorName parameter.
    pub async fn sensor_description(&self, sensor_name: &str) -> AlpacaResult<String> {
        self.device
            .get_with(
                "sensordescription",
                Form::new().with("SensorName", sensor_name),
            )
            .await
    }

    /// Gets the time (seconds) since the sensor specified in the SensorName parameter was last updated.
    pub async fn time_since_last_update(&self, sensor_name: &str) -> AlpacaResult<f64> {
        self.device
            .get_with(
                "timesincelastupdate",
                Form::new().with("SensorName", sensor_name),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockReply, MockServer};

    #[tokio::test]
    async fn sensor_queries() -> eyre::Result<()> {
        let server = MockServer::start().await?;
        let conditions = ObservingConditions::new(&server.config(), 0);

        server.reply_with(MockReply::value(12.5));
        assert_eq!(conditions.time_since_last_update("Humidity").await?, 12.5);
        assert_eq!(
            server.last_request().query.as_deref(),
            Some("ClientID=42&ClientTransactionID=0&SensorName=Humidity")
        );

        server.reply_with(MockReply::value("Capacitive hygrometer"));
        assert_eq!(
            conditions.sensor_description("Humidity").await?,
            "Capacitive hygrometer"
        );

        server.reply_with(MockReply::value(1013.25));
        assert_eq!(conditions.pressure().await?, 1013.25);
        assert_eq!(conditions.client().transaction_id(), 0);
        Ok(())
    }
}
