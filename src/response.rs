//! Decoded shape of Alpaca JSON replies.

use crate::errors::{ASCOMError, ASCOMErrorCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};

/// Transaction identifiers echoed by the server.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseTransaction {
    /// Client transaction ID as echoed by the server.
    #[serde(rename = "ClientTransactionID", default)]
    pub client_transaction_id: u32,
    /// Server's own transaction counter.
    #[serde(rename = "ServerTransactionID", default)]
    pub server_transaction_id: u32,
}

/// Response envelope carrying a single `Value`.
///
/// Any field that is missing from the JSON decodes as its zero value, so a
/// `{}` reply yields `T::default()` with no error.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Kind-specific value.
    #[serde(rename = "Value", default)]
    pub value: T,
    /// Transaction identifiers.
    #[serde(flatten)]
    pub transaction: ResponseTransaction,
    /// Device-reported error number, `0` on success.
    #[serde(rename = "ErrorNumber", default)]
    pub error_number: i32,
    /// Device-reported error message, empty on success.
    #[serde(rename = "ErrorMessage", default)]
    pub error_message: String,
}

/// Envelope of a string property.
pub type StringEnvelope = Envelope<String>;
/// Envelope of a string-list property.
pub type StringListEnvelope = Envelope<Vec<String>>;
/// Envelope of a boolean property.
pub type BoolEnvelope = Envelope<bool>;
/// Envelope of a floating-point property.
pub type DoubleEnvelope = Envelope<f64>;
/// Envelope of an integer property.
pub type IntEnvelope = Envelope<i32>;
/// Envelope of an unsigned integer list property.
pub type UInt32ListEnvelope = Envelope<Vec<u32>>;
/// Envelope of a PUT acknowledgement.
pub type AckEnvelope = Envelope<Acknowledgement>;

/// Value of a void operation.
///
/// Accepts and discards whatever the server puts into `Value` (usually nothing).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Acknowledgement;

impl<'de> Deserialize<'de> for Acknowledgement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let IgnoredAny = IgnoredAny::deserialize(deserializer)?;
        Ok(Self)
    }
}

/// Response envelope of a 2-D image array.
///
/// Unlike other kinds, the element type and rank live next to `Value` at the top level.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageArrayEnvelope {
    /// Element type code (`2` for `Int32`).
    #[serde(rename = "Type", default)]
    pub element_type: i32,
    /// Array rank.
    #[serde(rename = "Rank", default)]
    pub rank: i32,
    /// Column-major pixel data: `value[x][y]`.
    #[serde(rename = "Value", default)]
    pub value: Vec<Vec<u32>>,
    /// Transaction identifiers.
    #[serde(flatten)]
    pub transaction: ResponseTransaction,
    /// Device-reported error number, `0` on success.
    #[serde(rename = "ErrorNumber", default)]
    pub error_number: i32,
    /// Device-reported error message, empty on success.
    #[serde(rename = "ErrorMessage", default)]
    pub error_message: String,
}

/// 2-D image array extracted from an [`ImageArrayEnvelope`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImageArray {
    /// Element type code as reported by the device.
    pub element_type: i32,
    /// Array rank as reported by the device.
    pub rank: i32,
    /// Pixel data indexed as `data[x][y]`.
    pub data: Vec<Vec<u32>>,
}

impl ImageArray {
    /// Image width (first dimension).
    pub fn width(&self) -> usize {
        self.data.len()
    }

    /// Image height (second dimension), taken from the first column.
    pub fn height(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }

    /// Convert into a dense `(width, height)` array.
    ///
    /// Fails if the columns have different lengths.
    #[cfg(feature = "camera")]
    pub fn to_ndarray(&self) -> Result<ndarray::Array2<u32>, ndarray::ShapeError> {
        let height = self.height();
        if self.data.iter().any(|column| column.len() != height) {
            return Err(ndarray::ShapeError::from_kind(
                ndarray::ErrorKind::IncompatibleShape,
            ));
        }
        ndarray::Array2::from_shape_vec((self.width(), height), self.data.concat())
    }
}

/// A decodable envelope.
///
/// Implemented by every envelope kind so the client core can handle the transaction
/// and error fields uniformly and only differ in how the value is extracted.
pub trait Reply: DeserializeOwned {
    /// Value carried by this envelope.
    type Value;

    /// Transaction identifiers.
    fn transaction(&self) -> ResponseTransaction;

    /// Raw error number.
    fn error_number(&self) -> i32;

    /// Device-reported error, if `ErrorNumber` is non-zero.
    fn device_error(&self) -> Option<ASCOMError>;

    /// Extract the value, discarding the rest of the envelope.
    fn into_value(self) -> Self::Value;
}

fn device_error(error_number: i32, error_message: &str) -> Option<ASCOMError> {
    (error_number != 0).then(|| {
        ASCOMError::new(ASCOMErrorCode::from_raw(error_number), error_message)
    })
}

impl<T: DeserializeOwned + Default> Reply for Envelope<T> {
    type Value = T;

    fn transaction(&self) -> ResponseTransaction {
        self.transaction
    }

    fn error_number(&self) -> i32 {
        self.error_number
    }

    fn device_error(&self) -> Option<ASCOMError> {
        device_error(self.error_number, &self.error_message)
    }

    fn into_value(self) -> T {
        self.value
    }
}

impl Reply for ImageArrayEnvelope {
    type Value = ImageArray;

    fn transaction(&self) -> ResponseTransaction {
        self.transaction
    }

    fn error_number(&self) -> i32 {
        self.error_number
    }

    fn device_error(&self) -> Option<ASCOMError> {
        device_error(self.error_number, &self.error_message)
    }

    fn into_value(self) -> ImageArray {
        ImageArray {
            element_type: self.element_type,
            rank: self.rank,
            data: self.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_envelope() -> eyre::Result<()> {
        let envelope: DoubleEnvelope = serde_json::from_str(
            r#"{"Value":45.5,"ClientTransactionID":3,"ServerTransactionID":17,"ErrorNumber":0,"ErrorMessage":""}"#,
        )?;
        assert_eq!(envelope.value, 45.5);
        assert_eq!(
            envelope.transaction,
            ResponseTransaction {
                client_transaction_id: 3,
                server_transaction_id: 17,
            }
        );
        assert!(envelope.device_error().is_none());
        Ok(())
    }

    #[test]
    fn missing_fields_default_to_zero_values() -> eyre::Result<()> {
        let envelope: StringListEnvelope = serde_json::from_str("{}")?;
        assert_eq!(envelope, Envelope::default());
        Ok(())
    }

    #[test]
    fn surfaces_device_error() -> eyre::Result<()> {
        let envelope: BoolEnvelope = serde_json::from_str(
            r#"{"Value":false,"ErrorNumber":1031,"ErrorMessage":"Not connected"}"#,
        )?;
        let err = envelope.device_error().ok_or_else(|| eyre::eyre!("no error"))?;
        assert_eq!(err.code, ASCOMErrorCode::NOT_CONNECTED);
        assert_eq!(err.message, "Not connected");
        Ok(())
    }

    #[test]
    fn acknowledgement_ignores_any_value() -> eyre::Result<()> {
        let with_value: AckEnvelope =
            serde_json::from_str(r#"{"Value":{"nested":[1,2]},"ClientTransactionID":5}"#)?;
        assert_eq!(with_value.transaction.client_transaction_id, 5);

        let without_value: AckEnvelope = serde_json::from_str(r#"{"ErrorNumber":0}"#)?;
        assert_eq!(without_value.error_number, 0);
        Ok(())
    }

    #[test]
    fn decodes_image_array() -> eyre::Result<()> {
        let envelope: ImageArrayEnvelope = serde_json::from_str(
            r#"{"Type":2,"Rank":2,"Value":[[1,2,3],[4,5,6]],"ClientTransactionID":0,"ServerTransactionID":9,"ErrorNumber":0,"ErrorMessage":""}"#,
        )?;
        let image = envelope.into_value();
        assert_eq!(image.element_type, 2);
        assert_eq!(image.rank, 2);
        assert_eq!((image.width(), image.height()), (2, 3));

        #[cfg(feature = "camera")]
        {
            let array = image.to_ndarray()?;
            assert_eq!(array[[1, 2]], 6);
        }
        Ok(())
    }
}
