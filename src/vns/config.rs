//! VNS configuration.

use crate::initial::InitialStrategy;
use crate::shaking::ShakeMode;

/// Which outer-loop acceptance scheme drives the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VnsVariant {
    /// Classic neighborhood-index loop: merge shaking first, division
    /// second, resetting to the first on any improvement.
    Basic,
    /// Evaluates both shaking operators every round and commits the
    /// better post-descent candidate, stopping when neither improves.
    Smart,
}

/// Configuration parameters for the cell-formation VNS.
///
/// # Examples
///
/// ```
/// use u_cellform::vns::{VnsConfig, VnsVariant};
///
/// let config = VnsConfig::default()
///     .with_variant(VnsVariant::Smart)
///     .with_max_shakes(1000)
///     .with_seed(42);
/// assert_eq!(config.max_shakes, 1000);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone)]
pub struct VnsConfig {
    /// Constructive builder for the starting solution.
    pub initial: InitialStrategy,
    /// How the shaking operators pick their move.
    pub shake_mode: ShakeMode,
    /// Fraction of a cluster's members moved out by a division, in (0, 1).
    pub split_fraction: f64,
    /// Outer-loop acceptance scheme.
    pub variant: VnsVariant,
    /// Maximum number of shaking attempts (hard budget). 0 = no limit.
    pub max_shakes: usize,
    /// Random seed (None for default seed). Only the random shake mode
    /// draws from the generator.
    pub seed: Option<u64>,
}

impl Default for VnsConfig {
    fn default() -> Self {
        Self {
            initial: InitialStrategy::default(),
            shake_mode: ShakeMode::Exhaustive,
            split_fraction: 0.5,
            variant: VnsVariant::Basic,
            max_shakes: 0,
            seed: None,
        }
    }
}

impl VnsConfig {
    /// Sets the initial-solution strategy.
    pub fn with_initial(mut self, initial: InitialStrategy) -> Self {
        self.initial = initial;
        self
    }

    /// Sets the shaking mode.
    pub fn with_shake_mode(mut self, mode: ShakeMode) -> Self {
        self.shake_mode = mode;
        self
    }

    /// Sets the division split fraction.
    pub fn with_split_fraction(mut self, fraction: f64) -> Self {
        self.split_fraction = fraction;
        self
    }

    /// Sets the outer-loop variant.
    pub fn with_variant(mut self, variant: VnsVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Sets the shake budget (0 = unlimited).
    pub fn with_max_shakes(mut self, n: usize) -> Self {
        self.max_shakes = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.split_fraction > 0.0 && self.split_fraction < 1.0) {
            return Err(format!(
                "split_fraction must be in (0, 1), got {}",
                self.split_fraction
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = VnsConfig::default();
        assert_eq!(config.initial, InitialStrategy::Greedy { target_clusters: 0 });
        assert_eq!(config.shake_mode, ShakeMode::Exhaustive);
        assert_eq!(config.split_fraction, 0.5);
        assert_eq!(config.variant, VnsVariant::Basic);
        assert_eq!(config.max_shakes, 0);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = VnsConfig::default()
            .with_initial(InitialStrategy::RoundRobin)
            .with_shake_mode(ShakeMode::Random)
            .with_split_fraction(0.25)
            .with_variant(VnsVariant::Smart)
            .with_max_shakes(50)
            .with_seed(123);

        assert_eq!(config.initial, InitialStrategy::RoundRobin);
        assert_eq!(config.shake_mode, ShakeMode::Random);
        assert_eq!(config.split_fraction, 0.25);
        assert_eq!(config.variant, VnsVariant::Smart);
        assert_eq!(config.max_shakes, 50);
        assert_eq!(config.seed, Some(123));
    }

    #[test]
    fn test_config_rejects_degenerate_split_fraction() {
        assert!(VnsConfig::default().with_split_fraction(0.0).validate().is_err());
        assert!(VnsConfig::default().with_split_fraction(1.0).validate().is_err());
        assert!(VnsConfig::default().with_split_fraction(f64::NAN).validate().is_err());
    }
}
