//! Reader configuration

use wsmem_core::constants::DEFAULT_GROWTH_STEP;
use wsmem_core::env::env_get;
use wsmem_core::error::{WsError, WsResult};

/// Configuration for working-set reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Descriptor slots added to the buffer per attempt (default: 4096)
    pub growth_step: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            growth_step: DEFAULT_GROWTH_STEP,
        }
    }
}

impl ReaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `WSM_GROWTH_STEP`
    pub fn from_env() -> Self {
        Self {
            growth_step: env_get("WSM_GROWTH_STEP", DEFAULT_GROWTH_STEP),
        }
    }

    /// Set the number of slots added per attempt
    pub fn growth_step(mut self, n: usize) -> Self {
        self.growth_step = n;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> WsResult<()> {
        if self.growth_step == 0 {
            return Err(WsError::InvalidConfig("growth_step must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_step() {
        let cfg = ReaderConfig::default();
        assert_eq!(cfg.growth_step, 4096);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let cfg = ReaderConfig::new().growth_step(64);
        assert_eq!(cfg.growth_step, 64);
    }

    #[test]
    fn test_zero_step_rejected() {
        let cfg = ReaderConfig::new().growth_step(0);
        assert!(matches!(cfg.validate(), Err(WsError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("WSM_GROWTH_STEP", "128");
        assert_eq!(ReaderConfig::from_env().growth_step, 128);

        std::env::set_var("WSM_GROWTH_STEP", "many");
        assert_eq!(ReaderConfig::from_env().growth_step, DEFAULT_GROWTH_STEP);
        std::env::remove_var("WSM_GROWTH_STEP");
    }
}
