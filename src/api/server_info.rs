use super::DeviceType;
use serde::{Deserialize, Serialize};

/// Device entry of the management API's configured devices list.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredDevice {
    /// Device name.
    #[serde(rename = "DeviceName")]
    pub name: String,
    /// Device type as reported by the server (e.g. `FilterWheel`).
    #[serde(rename = "DeviceType")]
    pub ty: String,
    /// Device number within its type.
    #[serde(rename = "DeviceNumber")]
    pub number: u32,
    /// Unique device ID.
    #[serde(rename = "UniqueID")]
    pub unique_id: String,
}

impl ConfiguredDevice {
    /// Parsed device type, if it's one this crate knows about.
    pub fn device_type(&self) -> Option<DeviceType> {
        self.ty.parse().ok()
    }
}

/// General information about the server.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerInfo {
    /// Server name.
    pub server_name: String,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Manufacturer version.
    pub manufacturer_version: String,
    /// Server location.
    pub location: String,
}
