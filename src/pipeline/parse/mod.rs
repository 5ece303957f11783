mod fit;

pub use fit::FitParser;

use std::collections::HashMap;

use crate::config::FailurePolicy;
use crate::error::ParseError;
use crate::types::sample::{Sample, Tags};

pub trait Parser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<Sample>, ParseError>;

    fn parse_line(&self, line: &str) -> Result<Sample, ParseError>;

    /// Tags attached to every sample produced afterwards.
    fn set_default_tags(&mut self, tags: Tags);
}

#[derive(Debug, Clone, Default)]
pub struct ParserOptions {
    pub default_tags: Tags,
    pub failure_policy: FailurePolicy,
}

pub type ParserFactory = fn(&ParserOptions) -> Box<dyn Parser + Send + Sync>;

/// Format name to parser constructor. Built at startup and read-only afterwards.
#[derive(Clone, Default)]
pub struct ParserRegistry {
    factories: HashMap<&'static str, ParserFactory>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("fit", fit_parser);
        registry
    }

    pub fn register(&mut self, format: &'static str, factory: ParserFactory) {
        self.factories.insert(format, factory);
    }

    pub fn formats(&self) -> Vec<&'static str> {
        let mut formats: Vec<_> = self.factories.keys().copied().collect();
        formats.sort_unstable();
        formats
    }

    pub fn create(
        &self,
        format: &str,
        options: &ParserOptions,
    ) -> Result<Box<dyn Parser + Send + Sync>, ParseError> {
        self.factories
            .get(format)
            .map(|factory| factory(options))
            .ok_or_else(|| ParseError::UnknownFormat(format.to_string()))
    }
}

fn fit_parser(options: &ParserOptions) -> Box<dyn Parser + Send + Sync> {
    Box::new(FitParser::new(options))
}
