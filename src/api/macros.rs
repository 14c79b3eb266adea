/// Declare a device facade struct together with its plain property getters.
///
/// ```ignore
/// device_facade! {
///     /// Focuser Specific Methods.
///     pub struct Focuser(Focuser) {
///         /// True if the focuser is capable of absolute position.
///         fn absolute() -> bool = "absolute";
///     }
/// }
/// ```
///
/// Getters with parameters, setters and actions are written by hand in a separate `impl` block.
macro_rules! device_facade {
    (
        $(#[doc = $doc:literal])*
        pub struct $name:ident($device_type:ident) {
            $(
                $(#[doc = $getter_doc:literal])*
                fn $getter:ident() -> $ty:ty = $method:literal;
            )*
        }
    ) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, derive_more::Deref)]
        pub struct $name {
            device: $crate::api::DeviceClient,
        }

        impl $name {
            /// Create a facade with its own dedicated client.
            pub fn new(config: &$crate::ClientConfig, device_number: u32) -> Self {
                Self::with_client(
                    std::sync::Arc::new($crate::AlpacaClient::new(config)),
                    device_number,
                )
            }

            /// Create a facade on top of an existing client.
            ///
            /// All facades created from the same client share its transaction counter
            /// and error state.
            pub fn with_client(
                client: std::sync::Arc<$crate::AlpacaClient>,
                device_number: u32,
            ) -> Self {
                Self {
                    device: $crate::api::DeviceClient::new(
                        client,
                        $crate::api::DeviceType::$device_type,
                        device_number,
                    ),
                }
            }

            /// Return a handle with a different request deadline.
            ///
            /// The handle shares the transaction counter and error state with `self`.
            #[must_use]
            pub fn with_timeout(&self, timeout: Option<std::time::Duration>) -> Self {
                Self {
                    device: self.device.with_timeout(timeout),
                }
            }

            $(
                $(#[doc = $getter_doc])*
                pub async fn $getter(&self) -> $crate::AlpacaResult<$ty> {
                    self.device.get($method).await
                }
            )*
        }
    };
}

/// Declare a device enum that travels as its `i32` discriminant.
///
/// The first variant is the zero value returned when a reply has no `Value`.
macro_rules! device_enum {
    (
        $(#[doc = $doc:literal])*
        pub enum $name:ident {
            $(#[doc = $first_doc:literal])*
            $first:ident = $first_value:literal,
            $(
                $(#[doc = $variant_doc:literal])*
                $variant:ident = $value:literal,
            )*
        }
    ) => {
        $(#[doc = $doc])*
        #[derive(
            Debug,
            PartialEq,
            Eq,
            Clone,
            Copy,
            serde::Serialize,
            serde::Deserialize,
            num_enum::TryFromPrimitive,
            num_enum::IntoPrimitive,
        )]
        #[serde(try_from = "i32", into = "i32")]
        #[repr(i32)]
        pub enum $name {
            $(#[doc = $first_doc])*
            $first = $first_value,
            $(
                $(#[doc = $variant_doc])*
                $variant = $value,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$first
            }
        }

        $crate::params::enum_param!($name);
    };
}
