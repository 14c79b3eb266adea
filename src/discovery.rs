//! Alpaca discovery payloads.
//!
//! Only the wire format lives here: building and validating the UDP request
//! datagram and decoding the reply. Sending and listening is left to the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed tag at the start of every discovery request.
pub const DISCOVERY_TAG: &[u8; 15] = b"alpacadiscovery";
/// Size of the reserved zero block after the version byte.
pub const RESERVED_LEN: usize = 48;
/// Total size of a discovery request.
pub const DISCOVERY_MSG_LEN: usize = DISCOVERY_TAG.len() + 1 + RESERVED_LEN;
/// Current discovery protocol version.
pub const DISCOVERY_VERSION: u32 = 1;
/// UDP port Alpaca servers listen on for discovery requests.
pub const DEFAULT_DISCOVERY_PORT: u16 = 32227;
/// Default Alpaca HTTP port.
pub const DEFAULT_ALPACA_PORT: u16 = 11111;

/// Discovery payload errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    /// The version doesn't fit into a single ASCII digit.
    #[error("discovery version {0} can't be encoded as a single digit")]
    InvalidVersion(u32),
    /// The datagram has the wrong size.
    #[error("discovery message must be 64 bytes, got {0}")]
    InvalidLength(usize),
    /// The datagram doesn't start with `alpacadiscovery`.
    #[error("discovery message doesn't start with the alpacadiscovery tag")]
    InvalidTag,
    /// The version byte is not an ASCII digit.
    #[error("discovery version byte {0:#04X} is not an ASCII digit")]
    InvalidVersionByte(u8),
}

/// Discovery request datagram.
///
/// The version is carried as the ASCII character of its digit: version `1` is
/// the byte `b'1'` (`0x31`), not `0x01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryMessage {
    fixed: [u8; 15],
    version: u8,
    reserved: [u8; RESERVED_LEN],
}

impl DiscoveryMessage {
    /// Build a request for the given protocol version (`0..=9`).
    pub fn new(version: u32) -> Result<Self, DiscoveryError> {
        let digit = char::from_digit(version, 10)
            .and_then(|digit| u8::try_from(digit).ok())
            .ok_or(DiscoveryError::InvalidVersion(version))?;

        Ok(Self {
            fixed: *DISCOVERY_TAG,
            version: digit,
            reserved: [0; RESERVED_LEN],
        })
    }

    /// Validate and decode an incoming request datagram.
    pub fn parse(bytes: &[u8]) -> Result<Self, DiscoveryError> {
        let bytes: &[u8; DISCOVERY_MSG_LEN] = bytes
            .try_into()
            .map_err(|_wrong_size| DiscoveryError::InvalidLength(bytes.len()))?;

        let (fixed, rest) = bytes.split_at(DISCOVERY_TAG.len());
        if fixed != DISCOVERY_TAG {
            return Err(DiscoveryError::InvalidTag);
        }

        let (&version, reserved) = rest
            .split_first()
            .ok_or(DiscoveryError::InvalidLength(bytes.len()))?;
        if !version.is_ascii_digit() {
            return Err(DiscoveryError::InvalidVersionByte(version));
        }

        let mut message = Self {
            fixed: *DISCOVERY_TAG,
            version,
            reserved: [0; RESERVED_LEN],
        };
        message.reserved.copy_from_slice(reserved);
        Ok(message)
    }

    /// The `alpacadiscovery` tag.
    pub const fn fixed(&self) -> &[u8; 15] {
        &self.fixed
    }

    /// Raw version byte (an ASCII digit).
    pub const fn version_byte(&self) -> u8 {
        self.version
    }

    /// Numeric protocol version.
    pub fn version(&self) -> u32 {
        // Both constructors guarantee an ASCII digit.
        u32::from(self.version - b'0')
    }

    /// Reserved block.
    pub const fn reserved(&self) -> &[u8; RESERVED_LEN] {
        &self.reserved
    }

    /// Serialize into the datagram payload.
    pub fn to_bytes(&self) -> [u8; DISCOVERY_MSG_LEN] {
        let mut bytes = [0; DISCOVERY_MSG_LEN];
        let (fixed, rest) = bytes.split_at_mut(DISCOVERY_TAG.len());
        fixed.copy_from_slice(&self.fixed);
        rest[0] = self.version;
        rest[1..].copy_from_slice(&self.reserved);
        bytes
    }
}

impl Default for DiscoveryMessage {
    fn default() -> Self {
        Self {
            fixed: *DISCOVERY_TAG,
            version: b'1',
            reserved: [0; RESERVED_LEN],
        }
    }
}

/// Resolved target of discovery-related requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryEndpoint {
    /// Client ID of the requesting client.
    pub client_id: u32,
    /// URL scheme to use when talking to discovered servers.
    pub protocol: String,
    /// `{host}:{port}` address.
    pub address: String,
    /// Request payload.
    pub message: DiscoveryMessage,
}

impl DiscoveryEndpoint {
    /// Resolve the address with the same precedence as [`base_url`](crate::endpoint::base_url).
    ///
    /// Ports outside of `1..=65535` (including `-1`) are replaced with
    /// [`DEFAULT_ALPACA_PORT`]. The host is `domain` when `port` is `-1` and the
    /// domain is non-empty, otherwise `ip`.
    pub fn new(client_id: u32, protocol: impl Into<String>, domain: &str, ip: &str, port: i32) -> Self {
        let resolved_port = u16::try_from(port)
            .ok()
            .filter(|&port| port != 0)
            .unwrap_or(DEFAULT_ALPACA_PORT);

        let host = if port == crate::endpoint::NO_PORT && !domain.is_empty() {
            domain
        } else {
            ip
        };

        tracing::debug!(client_id, host, port = resolved_port, "Resolved discovery endpoint");

        Self {
            client_id,
            protocol: protocol.into(),
            address: format!("{host}:{resolved_port}"),
            message: DiscoveryMessage::default(),
        }
    }
}

/// Discovery reply sent by Alpaca servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlpacaPort {
    /// HTTP port of the responding Alpaca server.
    #[serde(rename = "AlpacaPort")]
    pub alpaca_port: u16,
}

impl AlpacaPort {
    /// Decode a reply datagram.
    pub fn parse(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_layout() -> eyre::Result<()> {
        let message = DiscoveryMessage::new(1)?;
        assert_eq!(message.fixed(), b"alpacadiscovery");
        assert_eq!(message.version_byte(), 0x31);
        assert_eq!(message.version(), 1);
        assert_eq!(message.reserved().len(), 48);
        assert!(message.reserved().iter().all(|&b| b == 0));

        let bytes = message.to_bytes();
        assert_eq!(bytes.len(), 64);
        assert_eq!(&bytes[..16], b"alpacadiscovery1");
        assert!(bytes[16..].iter().all(|&b| b == 0));
        Ok(())
    }

    #[test]
    fn version_is_ascii_digit() -> eyre::Result<()> {
        assert_eq!(DiscoveryMessage::new(0)?.version_byte(), b'0');
        assert_eq!(DiscoveryMessage::new(9)?.version_byte(), b'9');
        assert_eq!(DiscoveryMessage::new(3)?.to_bytes()[DISCOVERY_TAG.len()], b'3');
        assert_eq!(
            DiscoveryMessage::new(10),
            Err(DiscoveryError::InvalidVersion(10))
        );
        assert_eq!(DiscoveryMessage::default(), DiscoveryMessage::new(DISCOVERY_VERSION)?);
        Ok(())
    }

    #[test]
    fn parses_valid_datagram() -> eyre::Result<()> {
        let bytes = DiscoveryMessage::new(2)?.to_bytes();
        let parsed = DiscoveryMessage::parse(&bytes)?;
        assert_eq!(parsed.version(), 2);
        Ok(())
    }

    #[test]
    fn rejects_invalid_datagrams() {
        assert_eq!(
            DiscoveryMessage::parse(b"alpacadiscovery1"),
            Err(DiscoveryError::InvalidLength(16))
        );

        let mut bytes = DiscoveryMessage::default().to_bytes();
        bytes[0] = b'A';
        assert_eq!(DiscoveryMessage::parse(&bytes), Err(DiscoveryError::InvalidTag));

        let mut bytes = DiscoveryMessage::default().to_bytes();
        bytes[15] = 1;
        assert_eq!(
            DiscoveryMessage::parse(&bytes),
            Err(DiscoveryError::InvalidVersionByte(1))
        );
    }

    #[test]
    fn endpoint_port_fallback() {
        let endpoint = DiscoveryEndpoint::new(1, "http", "", "127.0.0.1", 67900);
        assert_eq!(endpoint.address, "127.0.0.1:11111");

        for port in [0, -5, 65536] {
            assert_eq!(
                DiscoveryEndpoint::new(1, "http", "", "10.0.0.1", port).address,
                "10.0.0.1:11111"
            );
        }

        assert_eq!(
            DiscoveryEndpoint::new(1, "http", "", "10.0.0.1", 1).address,
            "10.0.0.1:1"
        );
        assert_eq!(
            DiscoveryEndpoint::new(1, "http", "", "10.0.0.1", 65535).address,
            "10.0.0.1:65535"
        );
    }

    #[test]
    fn endpoint_prefers_domain_without_port() {
        let endpoint = DiscoveryEndpoint::new(7, "https", "alpaca.local", "10.0.0.1", -1);
        assert_eq!(endpoint.address, "alpaca.local:11111");
        assert_eq!(endpoint.protocol, "https");
        assert_eq!(endpoint.client_id, 7);

        assert_eq!(
            DiscoveryEndpoint::new(7, "http", "alpaca.local", "10.0.0.1", 8080).address,
            "10.0.0.1:8080"
        );
    }

    #[test]
    fn parses_reply() -> eyre::Result<()> {
        assert_eq!(
            AlpacaPort::parse(br#"{"AlpacaPort": 11111}"#)?,
            AlpacaPort { alpaca_port: 11111 }
        );
        assert!(AlpacaPort::parse(b"garbage").is_err());
        Ok(())
    }
}
