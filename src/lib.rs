/*!
Client for the [ASCOM Alpaca](https://ascom-standards.org/Developer/Alpaca.htm) device-control protocol.

Alpaca exposes astronomy hardware (telescopes, cameras, domes and so on) over a REST/JSON API.
This crate implements the client side:

- [`AlpacaClient`] performs the GET and PUT exchanges, keeps the per-client transaction counter and
  records the most recent HTTP error.
- [`api`] contains typed facades for each device type, such as [`api::Telescope`] or [`api::Dome`].
- [`discovery`] builds and parses the UDP discovery payloads.

## Example

```no_run
use alpaca_rest_client::ClientConfig;
use alpaca_rest_client::api::Telescope;

# async fn run() -> Result<(), alpaca_rest_client::AlpacaError> {
let config = ClientConfig::new(1, false, "", "192.168.1.20", 11111);
let telescope = Telescope::new(&config, 0);

if telescope.can_slew().await? {
    telescope.slew_to_coordinates_async(5.5, -5.4).await?;
}
# Ok(())
# }
```

## Errors

Every operation returns an [`AlpacaResult`]. By default ([`ErrorPolicy::Strict`]) non-2xx replies and
device-reported errors are returned as [`AlpacaError`]s. [`ErrorPolicy::Legacy`] reproduces the
behaviour of older Alpaca clients where only PUT requests surface device errors, and HTTP errors have
to be polled via [`AlpacaClient::last_error`].

## Transactions

Every request carries `ClientID` and `ClientTransactionID`. The transaction ID starts at `0`, is
reused by GET requests and is advanced by exactly one before each PUT, whether it succeeds or not.
Arguments rejected by local validation don't consume a transaction ID.
*/

pub mod api;
mod client;
pub mod discovery;
pub mod endpoint;
mod errors;
mod params;
pub mod response;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use api::DeviceType;
pub use client::{AlpacaClient, ClientConfig, ErrorPolicy};
pub use errors::{ASCOMError, ASCOMErrorCode, AlpacaError, AlpacaResult};
pub use params::{ASCOMParam, Form};
pub use transaction::HttpStatusError;
