use super::DeviceType;
use crate::client::AlpacaClient;
use crate::errors::{AlpacaError, AlpacaResult};
use crate::params::Form;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::ops::RangeBounds;
use std::sync::Arc;
use std::time::Duration;

/// A single device, identified by its type and number on a given client.
///
/// Provides the ASCOM methods common to all device types.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    client: Arc<AlpacaClient>,
    device_type: DeviceType,
    device_number: u32,
}

/// Entry of the `devicestate` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceStateItem {
    /// Property name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Property value.
    #[serde(rename = "Value")]
    pub value: serde_json::Value,
}

impl DeviceClient {
    /// Create a handle for device `device_number` of `device_type`.
    pub const fn new(client: Arc<AlpacaClient>, device_type: DeviceType, device_number: u32) -> Self {
        Self {
            client,
            device_type,
            device_number,
        }
    }

    /// Underlying client.
    pub const fn client(&self) -> &Arc<AlpacaClient> {
        &self.client
    }

    /// Device type.
    pub const fn device_type(&self) -> DeviceType {
        self.device_type
    }

    /// Device number.
    pub const fn device_number(&self) -> u32 {
        self.device_number
    }

    /// Return a handle with a different request deadline, sharing transaction state.
    #[must_use]
    pub fn with_timeout(&self, timeout: Option<Duration>) -> Self {
        Self {
            client: Arc::new(self.client.with_timeout(timeout)),
            ..self.clone()
        }
    }

    pub(crate) async fn get<T: DeserializeOwned + Default>(&self, method: &str) -> AlpacaResult<T> {
        self.client
            .get_value(self.device_type, self.device_number, method)
            .await
    }

    pub(crate) async fn get_with<T: DeserializeOwned + Default>(
        &self,
        method: &str,
        query: Form,
    ) -> AlpacaResult<T> {
        self.client
            .get_value_with(self.device_type, self.device_number, method, query)
            .await
    }

    pub(crate) async fn put(&self, method: &str, form: Form) -> AlpacaResult {
        self.client
            .put(self.device_type, self.device_number, method, form)
            .await
    }

    pub(crate) async fn put_value<T: DeserializeOwned + Default>(
        &self,
        method: &str,
        form: Form,
    ) -> AlpacaResult<T> {
        self.client
            .put_value(self.device_type, self.device_number, method, form)
            .await
    }

    /// Invoke the specified device-specific custom action.
    pub async fn action(&self, action: &str, parameters: &str) -> AlpacaResult<String> {
        self.put_value(
            "action",
            Form::new()
                .with("Action", action)
                .with("Parameters", parameters),
        )
        .await
    }

    /// Transmit an arbitrary string to the device and don't wait for a response.
    pub async fn command_blind(&self, command: &str, raw: bool) -> AlpacaResult {
        self.put(
            "commandblind",
            Form::new().with("Command", command).with("Raw", raw),
        )
        .await
    }

    /// Transmit an arbitrary string to the device and wait for a boolean response.
    pub async fn command_bool(&self, command: &str, raw: bool) -> AlpacaResult<bool> {
        self.put_value(
            "commandbool",
            Form::new().with("Command", command).with("Raw", raw),
        )
        .await
    }

    /// Transmit an arbitrary string to the device and wait for a string response.
    pub async fn command_string(&self, command: &str, raw: bool) -> AlpacaResult<String> {
        self.put_value(
            "commandstring",
            Form::new().with("Command", command).with("Raw", raw),
        )
        .await
    }

    /// Retrieve the connected state of the device.
    pub async fn connected(&self) -> AlpacaResult<bool> {
        self.get("connected").await
    }

    /// Set the connected state of the device.
    pub async fn set_connected(&self, connected: bool) -> AlpacaResult {
        self.put("connected", Form::new().with("Connected", connected))
            .await
    }

    /// Start connecting to the device asynchronously (Platform 7).
    pub async fn connect(&self) -> AlpacaResult {
        self.put("connect", Form::new()).await
    }

    /// Start disconnecting from the device asynchronously (Platform 7).
    pub async fn disconnect(&self) -> AlpacaResult {
        self.put("disconnect", Form::new()).await
    }

    /// True while an asynchronous connect or disconnect is in progress.
    pub async fn connecting(&self) -> AlpacaResult<bool> {
        self.get("connecting").await
    }

    /// Description of the device, such as manufacturer and model number.
    pub async fn description(&self) -> AlpacaResult<String> {
        self.get("description").await
    }

    /// Descriptive and version information about this ASCOM driver.
    pub async fn driver_info(&self) -> AlpacaResult<String> {
        self.get("driverinfo").await
    }

    /// Driver version string in the form `n.n`.
    pub async fn driver_version(&self) -> AlpacaResult<String> {
        self.get("driverversion").await
    }

    /// Version of the ASCOM device interface contract this device complies with.
    pub async fn interface_version(&self) -> AlpacaResult<i32> {
        self.get("interfaceversion").await
    }

    /// Short name of the device.
    pub async fn name(&self) -> AlpacaResult<String> {
        self.get("name").await
    }

    /// Names of the supported custom actions.
    pub async fn supported_actions(&self) -> AlpacaResult<Vec<String>> {
        self.get("supportedactions").await
    }

    /// Snapshot of the device's operational properties (Platform 7).
    pub async fn device_state(&self) -> AlpacaResult<Vec<DeviceStateItem>> {
        self.get("devicestate").await
    }
}

/// Reject `value` unless it lies in `range`, without touching the network.
pub(crate) fn ensure_in_range<T>(
    name: &'static str,
    value: T,
    range: impl RangeBounds<T>,
    expected: &'static str,
) -> AlpacaResult<T>
where
    T: PartialOrd + std::fmt::Display,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        tracing::debug!(name, %value, expected, "Rejecting out-of-range argument");
        Err(AlpacaError::InvalidValue {
            name,
            value: value.to_string(),
            expected,
        })
    }
}
