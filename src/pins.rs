//! Infallible stand-in pin and delay implementations.
//!
//! These back virtual machine setups and tests; real deployments bind
//! the HAL types of their target instead.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

/// Output pin that records its level instead of driving hardware.
#[derive(Debug, Clone, Default)]
pub struct StubPin {
    high: bool,
}

impl StubPin {
    /// Pin initially low.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level.
    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for StubPin {
    type Error = Infallible;
}

impl OutputPin for StubPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

/// Delay provider that returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubDelay;

impl DelayNs for StubDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
