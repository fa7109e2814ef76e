use std::future::Future;
use std::time::Duration;

use cafe_core::Coordinate;

use crate::error::LocationError;

/// Options passed to the platform location service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest platform-cached fix the provider may return. Zero forces a
    /// fresh fix.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::ZERO,
        }
    }
}

/// The platform location service.
pub trait LocationProvider {
    fn current_position(
        &self,
        options: &PositionOptions,
    ) -> impl Future<Output = Result<Coordinate, LocationError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_request_fresh_high_accuracy_fix() {
        let options = PositionOptions::default();
        assert!(options.high_accuracy);
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.maximum_age, Duration::ZERO);
    }
}
