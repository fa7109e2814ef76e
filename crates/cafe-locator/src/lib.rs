//! Device geolocation with a short-lived persisted cache.

pub mod error;
pub mod ip;
pub mod locator;
pub mod provider;

pub use error::{LocationError, LocatorError};
pub use ip::IpLocationProvider;
pub use locator::Locator;
pub use provider::{LocationProvider, PositionOptions};
