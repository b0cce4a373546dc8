use std::time::Duration;

use crate::models::error::FetchError;

/// Fetches scene descriptor bytes over the network.
///
/// Implementations must enforce the passed timeout and report it as
/// `FetchError::Timeout`, distinct from HTTP-status and transport
/// failures.
pub trait SceneFetcher {
    fn fetch(&mut self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError>;
}
