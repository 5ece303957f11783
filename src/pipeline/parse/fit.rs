use crate::config::FailurePolicy;
use crate::error::ParseError;
use crate::pipeline::decode::decode_activity;
use crate::pipeline::parse::{Parser, ParserOptions};
use crate::pipeline::project::project_activity;
use crate::types::sample::{activity_tags, Sample, Tags};

pub struct FitParser {
    default_tags: Tags,
    failure_policy: FailurePolicy,
}

impl FitParser {
    pub fn new(options: &ParserOptions) -> Self {
        Self {
            default_tags: options.default_tags.clone(),
            failure_policy: options.failure_policy,
        }
    }
}

impl Parser for FitParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<Sample>, ParseError> {
        let stream = decode_activity(bytes)?;
        let tags = activity_tags(&self.default_tags, stream.timestamp);

        let mut samples = Vec::new();
        for result in project_activity(&stream, tags) {
            match (result, self.failure_policy) {
                (Ok(sample), _) => samples.push(sample),
                (Err(err), FailurePolicy::FailFast) => return Err(err.into()),
                (Err(err), FailurePolicy::Skip) => {
                    tracing::warn!("Skipping message that could not be projected: {}", err);
                }
            }
        }

        Ok(samples)
    }

    fn parse_line(&self, _line: &str) -> Result<Sample, ParseError> {
        Err(ParseError::LineUnsupported("fit"))
    }

    fn set_default_tags(&mut self, tags: Tags) {
        self.default_tags = tags;
    }
}
