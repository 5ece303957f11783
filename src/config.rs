use crate::pipeline::parse::ParserOptions;
use crate::types::sample::Tags;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the whole file on the first message that cannot be projected.
    #[default]
    FailFast,
    /// Drop such messages and keep their siblings.
    Skip,
}

impl FailurePolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fail_fast" | "fail-fast" => Some(FailurePolicy::FailFast),
            "skip" => Some(FailurePolicy::Skip),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub max_file_size: usize,
    pub default_tags: Tags,
    pub failure_policy: FailurePolicy,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let max_file_size_mb = std::env::var("MAX_FILE_SIZE_MB")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(25);

        let default_tags = std::env::var("DEFAULT_TAGS")
            .map(|s| parse_tags(&s))
            .unwrap_or_default();

        let failure_policy = std::env::var("FAILURE_POLICY")
            .ok()
            .and_then(|s| FailurePolicy::from_str(&s))
            .unwrap_or_default();

        Self {
            port,
            max_file_size: max_file_size_mb * 1024 * 1024,
            default_tags,
            failure_policy,
        }
    }

    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            default_tags: self.default_tags.clone(),
            failure_policy: self.failure_policy,
        }
    }
}

/// Parse `key=value,key=value`. Entries without `=` or with an empty key are ignored.
pub fn parse_tags(s: &str) -> Tags {
    s.split(',')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), value.trim().to_string()))
        })
        .collect()
}
