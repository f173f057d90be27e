//! Simulation configuration.

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationErrorKind};

/// Immutable timing parameters for one simulation run.
///
/// All values are in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Overhead ticks inserted between two processes.
    pub context_switch_time: u64,
    /// Round-Robin quantum. Validated but unused by FCFS.
    pub time_quantum: u64,
}

impl SimulationConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    /// `NonPositiveQuantum` if `time_quantum` is zero.
    pub fn new(context_switch_time: u64, time_quantum: u64) -> Result<Self, ValidationError> {
        let config = Self {
            context_switch_time,
            time_quantum,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the context-switch overhead.
    pub fn with_context_switch(mut self, ticks: u64) -> Self {
        self.context_switch_time = ticks;
        self
    }

    /// Checks the invariants the unsigned types cannot express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.time_quantum == 0 {
            return Err(ValidationError::new(
                ValidationErrorKind::NonPositiveQuantum,
                "Invalid time quantum: must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            context_switch_time: 0,
            time_quantum: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let c = SimulationConfig::new(2, 4).unwrap();
        assert_eq!(c.context_switch_time, 2);
        assert_eq!(c.time_quantum, 4);
    }

    #[test]
    fn test_zero_quantum_rejected() {
        let err = SimulationConfig::new(0, 0).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NonPositiveQuantum);
    }

    #[test]
    fn test_default_is_valid() {
        let c = SimulationConfig::default().with_context_switch(3);
        assert!(c.validate().is_ok());
        assert_eq!(c.context_switch_time, 3);
    }
}
