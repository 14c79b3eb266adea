use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::time::Duration;
use thiserror::Error;

/// Alpaca representation of an ASCOM error code.
///
/// Wraps the raw `ErrorNumber` field of a response envelope, which is a signed
/// 32-bit integer on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ASCOMErrorCode(i32);

/// The starting value for error numbers.
const BASE: i32 = 0x400;
/// The starting value for driver-specific error numbers.
const DRIVER_BASE: i32 = 0x500;
/// The maximum value for error numbers.
const MAX: i32 = 0xFFF;

impl ASCOMErrorCode {
    /// Wrap a raw error number as received from a device.
    ///
    /// No range check is performed: devices in the wild report all sorts of numbers
    /// and the client has to pass them through unchanged.
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Generate ASCOM error code from a zero-based driver error code.
    ///
    /// Will panic if the driver error code is larger than the maximum allowed (2815).
    pub const fn new_for_driver(driver_code: u16) -> Self {
        const DRIVER_MAX: u16 = 0xFFF - 0x500;

        assert!(driver_code <= DRIVER_MAX, "Driver error code is too large");

        #[expect(clippy::as_conversions)]
        let driver_code = driver_code as i32;

        Self(driver_code + DRIVER_BASE)
    }

    /// Get the driver-specific error code.
    ///
    /// Returns `Ok` with `0`-based driver error code if this is a driver error.
    /// Returns `Err` with raw error code if not a driver error.
    pub const fn as_driver_error(self) -> Result<i32, i32> {
        if self.0 >= DRIVER_BASE && self.0 <= MAX {
            Ok(self.0 - DRIVER_BASE)
        } else {
            Err(self.0)
        }
    }

    /// Whether the code falls into the range reserved for ASCOM errors (0x400..=0xFFF).
    pub const fn is_ascom_range(self) -> bool {
        self.0 >= BASE && self.0 <= MAX
    }

    /// Get the raw error code.
    pub const fn raw(self) -> i32 {
        self.0
    }
}

/// ASCOM error reported by a device inside a response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("ASCOM error {code}: {message}")]
pub struct ASCOMError {
    /// Error number.
    #[serde(rename = "ErrorNumber", default = "ok_code")]
    pub code: ASCOMErrorCode,
    /// Error message.
    #[serde(rename = "ErrorMessage", default)]
    pub message: Cow<'static, str>,
}

const fn ok_code() -> ASCOMErrorCode {
    ASCOMErrorCode::OK
}

impl ASCOMError {
    /// Create a new `ASCOMError` from given error code and a message.
    pub fn new(code: ASCOMErrorCode, message: impl std::fmt::Display) -> Self {
        Self {
            code,
            message: message.to_string().into(),
        }
    }
}

macro_rules! ascom_error_codes {
    ($(#[doc = $doc:literal] $name:ident = $value:literal,)*) => {
        impl ASCOMErrorCode {
            $(
                #[doc = $doc]
                pub const $name: Self = Self($value);
            )*
        }

        impl std::fmt::Debug for ASCOMErrorCode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match *self {
                    $(
                        Self::$name => f.write_str(stringify!($name)),
                    )*
                    _ => match self.as_driver_error() {
                        Ok(driver_code) => write!(f, "DRIVER_ERROR[{driver_code}]"),
                        Err(raw_code) => write!(f, "{raw_code:#X}"),
                    },
                }
            }
        }

        impl std::fmt::Display for ASCOMErrorCode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Debug::fmt(self, f)
            }
        }
    };
}

ascom_error_codes! {
    #[doc = "Success"]
    OK = 0,
    #[doc = "The requested action is not implemented in this driver"]
    ACTION_NOT_IMPLEMENTED = 0x40C,
    #[doc = "The requested operation can not be undertaken at this time"]
    INVALID_OPERATION = 0x40B,
    #[doc = "Invalid value"]
    INVALID_VALUE = 0x401,
    #[doc = "The attempted operation is invalid because the mount is currently in a Parked state"]
    INVALID_WHILE_PARKED = 0x408,
    #[doc = "The attempted operation is invalid because the mount is currently in a Slaved state"]
    INVALID_WHILE_SLAVED = 0x409,
    #[doc = "The communications channel is not connected"]
    NOT_CONNECTED = 0x407,
    #[doc = "Property or method not implemented"]
    NOT_IMPLEMENTED = 0x400,
    #[doc = "A value has not been set"]
    VALUE_NOT_SET = 0x402,
}

/// Error returned by every client operation.
///
/// Variants map onto the failure classes of an Alpaca exchange: the request never
/// completed ([`Transport`](Self::Transport), [`Timeout`](Self::Timeout),
/// [`Decode`](Self::Decode)), the server answered with a non-2xx status
/// ([`Http`](Self::Http)), the device reported an error in the envelope
/// ([`Device`](Self::Device)), or the call was rejected locally before any I/O.
#[derive(Debug, Error)]
pub enum AlpacaError {
    /// Network failure while sending the request or reading the response.
    #[error("failed to send Alpaca request to {endpoint}: {source}")]
    Transport {
        /// Request URL.
        endpoint: String,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// The exchange did not complete before the configured deadline.
    #[error("Alpaca request to {endpoint} timed out after {timeout:?}")]
    Timeout {
        /// Request URL.
        endpoint: String,
        /// Deadline that elapsed.
        timeout: Duration,
    },

    /// The response body is not a valid Alpaca envelope.
    #[error("couldn't decode Alpaca response from {endpoint}: {source}")]
    Decode {
        /// Request URL.
        endpoint: String,
        /// JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The server replied with a non-2xx HTTP status.
    #[error("HTTP {status} from {endpoint}: {message}")]
    Http {
        /// Request URL.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body as text.
        message: String,
    },

    /// The device reported a non-zero `ErrorNumber`.
    #[error(transparent)]
    Device(#[from] ASCOMError),

    /// An argument was rejected before sending anything to the device.
    #[error("invalid {name}: {value} (expected {expected})")]
    InvalidValue {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: String,
        /// Human-readable accepted range.
        expected: &'static str,
    },
}

impl AlpacaError {
    /// Error code of a device-reported error, if this is one.
    pub const fn device_code(&self) -> Option<ASCOMErrorCode> {
        match self {
            Self::Device(err) => Some(err.code),
            _ => None,
        }
    }

    /// HTTP status of a non-2xx reply, if this is one.
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for Alpaca client operations.
pub type AlpacaResult<T = ()> = Result<T, AlpacaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_names_known_codes() {
        assert_eq!(format!("{:?}", ASCOMErrorCode::NOT_IMPLEMENTED), "NOT_IMPLEMENTED");
        assert_eq!(
            ASCOMErrorCode::new_for_driver(3).to_string(),
            "DRIVER_ERROR[3]"
        );
        assert_eq!(ASCOMErrorCode::from_raw(0x123).to_string(), "0x123");
    }

    #[test]
    fn driver_codes_round_trip() {
        let code = ASCOMErrorCode::new_for_driver(7);
        assert_eq!(code.raw(), 0x507);
        assert_eq!(code.as_driver_error(), Ok(7));
        assert!(code.is_ascom_range());
        assert_eq!(ASCOMErrorCode::INVALID_VALUE.as_driver_error(), Err(0x401));
        assert!(!ASCOMErrorCode::from_raw(-1).is_ascom_range());
    }

    #[test]
    fn decodes_from_envelope_fields() -> eyre::Result<()> {
        let err: ASCOMError = serde_json::from_str(
            r#"{"Value":0,"ErrorNumber":1025,"ErrorMessage":"Bad value"}"#,
        )?;
        assert_eq!(err.code, ASCOMErrorCode::INVALID_VALUE);
        assert_eq!(err.to_string(), "ASCOM error INVALID_VALUE: Bad value");

        let ok: ASCOMError = serde_json::from_str(r#"{"Value":true}"#)?;
        assert_eq!(ok.code, ASCOMErrorCode::OK);
        assert!(ok.message.is_empty());
        Ok(())
    }
}
