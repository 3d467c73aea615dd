//! Builder utilities for configuring the community detector.

use std::num::NonZeroUsize;

use crate::{detector::CommunityDetector, error::DetectionError, Result};

/// Default bound on detection rounds.
const DEFAULT_MAX_ROUNDS: usize = 100;

/// Configures and constructs [`CommunityDetector`] instances.
///
/// # Examples
/// ```
/// use tessella_core::DetectorBuilder;
///
/// let detector = DetectorBuilder::new()
///     .with_max_rounds(50)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(detector.max_rounds().get(), 50);
/// ```
#[derive(Debug, Clone)]
pub struct DetectorBuilder {
    max_rounds: usize,
}

impl Default for DetectorBuilder {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl DetectorBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the bound on detection rounds.
    ///
    /// Each round sweeps every currently pending leaf once. The bound exists
    /// purely to guarantee termination under numerical pathology, not as a
    /// quality knob; the default of 100 comfortably exceeds any hierarchy
    /// depth reachable on the network sizes this engine targets.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Returns the currently configured round bound.
    #[must_use]
    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Validates the configuration and constructs a [`CommunityDetector`].
    ///
    /// # Errors
    /// Returns [`DetectionError::InvalidMaxRounds`] when the round bound is
    /// zero.
    pub fn build(self) -> Result<CommunityDetector> {
        let max_rounds = NonZeroUsize::new(self.max_rounds)
            .ok_or(DetectionError::InvalidMaxRounds { got: self.max_rounds })?;
        Ok(CommunityDetector::new(max_rounds))
    }
}
