use super::device::ensure_in_range;
use crate::errors::AlpacaResult;
use crate::params::{ASCOMParam, Form};
use serde::de::DeserializeOwned;

device_facade! {
    /// Switch Specific Methods.
    pub struct Switch(Switch) {
        /// The number of switch devices managed by this driver.
        ///
        /// Devices are numbered from 0 to MaxSwitch - 1.
        fn max_switch() -> i32 = "maxswitch";
    }
}

impl Switch {
    async fn get_for<T: DeserializeOwned + Default>(&self, method: &str, id: i32) -> AlpacaResult<T> {
        let id = ensure_in_range("Id", id, 0.., "non-negative")?;
        self.device.get_with(method, Form::new().with("Id", id)).await
    }

    async fn put_for(
        &self,
        method: &str,
        id: i32,
        name: &'static str,
        value: impl ASCOMParam,
    ) -> AlpacaResult {
        let id = ensure_in_range("Id", id, 0.., "non-negative")?;
        self.device
            .put(method, Form::new().with("Id", id).with(name, value))
            .await
    }

    /// True if the switch supports asynchronous operation (ISwitchV3 and later).
    pub async fn can_async(&self, id: i32) -> AlpacaResult<bool> {
        self.get_for("canasync", id).await
    }

    /// Reports if the specified switch device can be written to, default true.
    pub async fn can_write(&self, id: i32) -> AlpacaResult<bool> {
        self.get_for("canwrite", id).await
    }

    /// Return the state of switch device id as a boolean.
    pub async fn get_switch(&self, id: i32) -> AlpacaResult<bool> {
        self.get_for("getswitch", id).await
    }

    /// Gets the description of the specified switch device.
    pub async fn get_switch_description(&self, id: i32) -> AlpacaResult<String> {
        self.get_for("getswitchdescription", id).await
    }

    /// Gets the name of the specified switch device.
    pub async fn get_switch_name(&self, id: i32) -> AlpacaResult<String> {
        self.get_for("getswitchname", id).await
    }

    /// Gets the value of the specified switch device as a double.
    pub async fn get_switch_value(&self, id: i32) -> AlpacaResult<f64> {
        self.get_for("getswitchvalue", id).await
    }

    /// Gets the minimum value of the specified switch device as a double.
    pub async fn min_switch_value(&self, id: i32) -> AlpacaResult<f64> {
        self.get_for("minswitchvalue", id).await
    }

    /// Gets the maximum value of the specified switch device as a double.
    pub async fn max_switch_value(&self, id: i32) -> AlpacaResult<f64> {
        self.get_for("maxswitchvalue", id).await
    }

    /// True once an asynchronous state change of the specified switch has completed (ISwitchV3 and later).
    pub async fn state_change_complete(&self, id: i32) -> AlpacaResult<bool> {
        self.get_for("statechangecomplete", id).await
    }

    /// Returns the step size that this device supports (the difference between successive values of the device).
    pub async fn switch_step(&self, id: i32) -> AlpacaResult<f64> {
        self.get_for("switchstep", id).await
    }

    /// Starts changing the state of the specified switch and returns immediately (ISwitchV3 and later).
    pub async fn set_async(&self, id: i32, state: bool) -> AlpacaResult {
        self.put_for("setasync", id, "State", state).await
    }

    /// Starts changing the value of the specified switch and returns immediately (ISwitchV3 and later).
    pub async fn set_async_value(&self, id: i32, value: f64) -> AlpacaResult {
        self.put_for("setasyncvalue", id, "Value", value).await
    }

    /// Sets a switch controller device to the specified state, true or false.
    pub async fn set_switch(&self, id: i32, state: bool) -> AlpacaResult {
        self.put_for("setswitch", id, "State", state).await
    }

    /// Sets a switch device name to the specified value.
    pub async fn set_switch_name(&self, id: i32, name: &str) -> AlpacaResult {
        self.put_for("setswitchname", id, "Name", name).await
    }

    /// Sets a switch device value to the specified value.
    pub async fn set_switch_value(&self, id: i32, value: f64) -> AlpacaResult {
        self.put_for("setswitchvalue", id, "Value", value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockReply, MockServer};

    #[tokio::test]
    async fn switches_are_addressed_by_id() -> eyre::Result<()> {
        let server = MockServer::start().await?;
        let switch = Switch::new(&server.config(), 0);

        server.reply_with(MockReply::value("Dew heater"));
        assert_eq!(switch.get_switch_name(3).await?, "Dew heater");
        assert_eq!(
            server.last_request().query.as_deref(),
            Some("ClientID=42&ClientTransactionID=0&Id=3")
        );

        server.reply_with(MockReply::ack());
        switch.set_switch_value(3, 0.75).await?;
        let request = server.last_request();
        assert_eq!(request.path, "/api/v1/switch/0/setswitchvalue");
        assert_eq!(
            request.body,
            "ClientID=42&ClientTransactionID=1&Id=3&Value=0.75"
        );

        assert!(switch.set_switch(-1, true).await.is_err());
        assert!(switch.get_switch(-1).await.is_err());
        assert_eq!(switch.client().transaction_id(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn switch_name_is_form_encoded() -> eyre::Result<()> {
        let server = MockServer::start().await?;
        let switch = Switch::new(&server.config(), 0);

        server.reply_with(MockReply::ack());
        switch.set_switch_name(2, "Dew heater, 2 & 3 °C").await?;
        let request = server.last_request();
        assert!(!request.body.contains('°'), "{}", request.body);
        assert_eq!(request.param("Name").as_deref(), Some("Dew heater, 2 & 3 °C"));
        assert_eq!(request.param("id").as_deref(), Some("2"));
        Ok(())
    }
}
