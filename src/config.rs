//! Processor configuration.

/// How much a [`HuffProcessor`](crate::HuffProcessor) reports through `tracing`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Pass boundaries and sizes only, at `debug` level.
    #[default]
    Quiet,
    /// Also log every symbol's code at `info` level.
    Encodings,
}

/// Options fixed when a processor is constructed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Logging detail.
    pub verbosity: Verbosity,
}

impl Config {
    /// Default configuration: quiet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the verbosity.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub(crate) fn log_encodings(&self) -> bool {
        self.verbosity >= Verbosity::Encodings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_quiet() {
        assert_eq!(Config::new().verbosity, Verbosity::Quiet);
        assert!(!Config::new().log_encodings());
        assert!(Config::new()
            .with_verbosity(Verbosity::Encodings)
            .log_encodings());
    }
}
