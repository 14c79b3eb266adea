use serde::Serialize;
use std::borrow::Cow;

/// A value that can be sent as an Alpaca query or form parameter.
pub trait ASCOMParam {
    /// Render the value the way Alpaca servers expect it.
    fn to_param(self) -> String;
}

impl ASCOMParam for String {
    fn to_param(self) -> String {
        self
    }
}

impl ASCOMParam for &str {
    fn to_param(self) -> String {
        self.to_owned()
    }
}

impl ASCOMParam for bool {
    fn to_param(self) -> String {
        (if self { "True" } else { "False" }).to_owned()
    }
}

macro_rules! simple_ascom_param {
    ($($ty:ty),*) => {
        $(
            impl ASCOMParam for $ty {
                fn to_param(self) -> String {
                    ToString::to_string(&self)
                }
            }
        )*
    };
}

simple_ascom_param!(i32, u32, u64, f64);

/// Implement [`ASCOMParam`] for `num_enum` enums by sending their discriminant.
macro_rules! enum_param {
    ($($name:ty),* $(,)?) => {
        $(
            impl $crate::params::ASCOMParam for $name {
                fn to_param(self) -> String {
                    let primitive: <Self as num_enum::TryFromPrimitive>::Primitive = self.into();
                    $crate::params::ASCOMParam::to_param(primitive)
                }
            }
        )*
    };
}
pub(crate) use enum_param;

/// Ordered list of named parameters for a request.
///
/// Used both as the URL-encoded body of PUT requests and for extra GET query
/// parameters.
///
/// ```
/// use alpaca_rest_client::Form;
///
/// let form = Form::new().with("RightAscension", 5.5).with("Declination", -12.0);
/// assert_eq!(form.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Form(Vec<(Cow<'static, str>, String)>);

impl Form {
    /// Create an empty form.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a parameter.
    #[must_use]
    pub fn with(mut self, name: impl Into<Cow<'static, str>>, value: impl ASCOMParam) -> Self {
        self.push(name, value);
        self
    }

    /// Append a parameter in place.
    pub fn push(&mut self, name: impl Into<Cow<'static, str>>, value: impl ASCOMParam) {
        self.0.push((name.into(), value.to_param()));
    }

    /// Get the rendered value of a parameter by name (case-insensitive, like Alpaca servers).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return a new form that starts with the transaction parameters followed by `self`.
    pub(crate) fn with_transaction(self, client_id: u32, client_transaction_id: u32) -> Self {
        let mut form = Self::new()
            .with("ClientID", client_id)
            .with("ClientTransactionID", client_transaction_id);
        form.0.extend(self.0);
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_values_like_alpaca() {
        let form = Form::new()
            .with("Tracking", true)
            .with("Parked", false)
            .with("Position", 1234_i32)
            .with("Rate", 0.5_f64)
            .with("Name", "Lum");

        assert_eq!(form.get("tracking"), Some("True"));
        assert_eq!(form.get("Parked"), Some("False"));
        assert_eq!(form.get("POSITION"), Some("1234"));
        assert_eq!(form.get("Rate"), Some("0.5"));
        assert_eq!(form.get("Name"), Some("Lum"));
        assert_eq!(form.get("Missing"), None);
    }

    #[test]
    fn transaction_params_come_first() {
        let form = Form::new().with("Brightness", 10_i32).with_transaction(3, 9);
        assert_eq!(
            form,
            Form(vec![
                ("ClientID".into(), "3".to_owned()),
                ("ClientTransactionID".into(), "9".to_owned()),
                ("Brightness".into(), "10".to_owned()),
            ])
        );
    }
}
