//! URL and query-string construction.
//!
//! Everything here is plain string formatting. Host names, IP addresses, device
//! types and method names are not validated or escaped: device types and method
//! names are fixed lowercase literals chosen by the facades, and hosts are supplied
//! by the caller as-is.

use std::fmt::Display;

/// Port value meaning "no port, use the domain name".
pub const NO_PORT: i32 = -1;

/// URL scheme for the given security flag.
pub const fn protocol(secure: bool) -> &'static str {
    if secure { "https" } else { "http" }
}

/// Build the base URL of an Alpaca server.
///
/// When `port` is [`NO_PORT`] and `domain` is non-empty the result is
/// `{protocol}://{domain}`. In every other case it's `{protocol}://{ip}:{port}`,
/// even for ports that make no sense such as `0`.
pub fn base_url(secure: bool, domain: &str, ip: &str, port: i32) -> String {
    let protocol = protocol(secure);
    if port == NO_PORT && !domain.is_empty() {
        format!("{protocol}://{domain}")
    } else {
        format!("{protocol}://{ip}:{port}")
    }
}

/// Build a device API URL: `{base_url}/api/v1/{device_type}/{device_number}/{method}`.
pub fn endpoint(
    base_url: &str,
    device_type: impl Display,
    device_number: u32,
    method: &str,
) -> String {
    format!("{base_url}/api/v1/{device_type}/{device_number}/{method}")
}

/// Build a management API URL: `{base_url}/management/{path}`.
pub fn management_endpoint(base_url: &str, path: &str) -> String {
    format!("{base_url}/management/{path}")
}

/// Build the transaction query string sent with every request.
pub fn query_string(client_id: u32, client_transaction_id: u32) -> String {
    format!("ClientID={client_id}&ClientTransactionID={client_transaction_id}")
}
