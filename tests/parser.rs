mod common;

use fitmetrics_rs::config::FailurePolicy;
use fitmetrics_rs::error::ParseError;
use fitmetrics_rs::pipeline::parse::{Parser, ParserOptions, ParserRegistry};
use fitmetrics_rs::types::sample::{FieldValue, MessageKind, Tags};

fn options() -> ParserOptions {
    ParserOptions {
        default_tags: Tags::from([("device".to_string(), "watch1".to_string())]),
        failure_policy: FailurePolicy::FailFast,
    }
}

#[test]
fn default_registry_knows_fit() {
    let registry = ParserRegistry::with_defaults();
    assert_eq!(registry.formats(), vec!["fit"]);
}

#[test]
fn unknown_format_is_reported() {
    let registry = ParserRegistry::with_defaults();
    let err = registry.create("gpx", &options()).err().expect("no gpx parser");
    assert!(matches!(err, ParseError::UnknownFormat(format) if format == "gpx"));
}

#[test]
fn fit_parser_emits_records_then_events_then_laps() {
    let parser = ParserRegistry::with_defaults()
        .create("fit", &options())
        .expect("fit parser");

    let samples = parser.parse(&common::activity_fit()).expect("parse");

    let kinds: Vec<_> = samples.iter().map(|s| s.name).collect();
    assert_eq!(
        kinds,
        vec![
            MessageKind::Record,
            MessageKind::Record,
            MessageKind::Event,
            MessageKind::Lap
        ]
    );

    for sample in &samples {
        assert_eq!(sample.tags.get("device").map(String::as_str), Some("watch1"));
        assert_eq!(
            sample.tags.get("activity_time").map(String::as_str),
            Some("2021-09-08T01:47:40Z")
        );
    }

    let record = &samples[0];
    assert_eq!(record.fields.get("heart_rate__bpm"), Some(&FieldValue::Integer(150)));
    assert!(!record.fields.contains_key("temperature__degC"));

    let event = &samples[2];
    assert_eq!(event.fields.get("event").and_then(FieldValue::as_text), Some("timer"));
    assert_eq!(event.fields.get("event_type").and_then(FieldValue::as_text), Some("start"));

    let lap = &samples[3];
    assert_eq!(lap.fields.get("elapsed_time__s"), Some(&FieldValue::Float(120.0)));
    assert!(!lap.fields.contains_key("heart_rate_avg__bpm"));
}

#[test]
fn pedal_fields_reach_the_samples() {
    let parser = ParserRegistry::with_defaults()
        .create("fit", &options())
        .expect("fit parser");

    let samples = parser.parse(&common::pedal_fit()).expect("parse");
    assert_eq!(samples.len(), 3);

    let record = &samples[0].fields;
    assert_eq!(
        record.get("pedal_left_contribution__%"),
        Some(&FieldValue::Float(63.0))
    );
    assert_eq!(record.get("stroke").and_then(FieldValue::as_text), Some("other"));
    assert_eq!(record.get("cycles"), Some(&FieldValue::Integer(5)));
    assert_eq!(record.get("cycles_total"), Some(&FieldValue::Integer(5)));
    assert_eq!(
        record.get("power_accumulated_compressed__W"),
        Some(&FieldValue::Integer(100))
    );
    assert_eq!(record.get("power_accumulated__W"), Some(&FieldValue::Integer(100)));

    let second = &samples[1].fields;
    assert!(!second.contains_key("pedal_left_contribution__%"));
    assert!(!second.contains_key("cycles"));
    assert_eq!(
        second.get("stroke").and_then(FieldValue::as_text),
        Some("unknown_variant_9")
    );

    let lap = &samples[2];
    assert_eq!(lap.name, MessageKind::Lap);
    let left = lap
        .fields
        .get("pedal_left_contribution__%")
        .and_then(FieldValue::as_f64)
        .expect("lap balance");
    assert!((left - 42.5).abs() < 1e-9);
}

#[test]
fn decode_failure_produces_no_samples() {
    let parser = ParserRegistry::with_defaults()
        .create("fit", &options())
        .expect("fit parser");

    assert!(matches!(
        parser.parse(&common::records_only_fit()),
        Err(ParseError::NotAnActivity)
    ));
    assert!(matches!(
        parser.parse(b"nope"),
        Err(ParseError::InvalidFit(_))
    ));
}

#[test]
fn fit_has_no_line_form() {
    let parser = ParserRegistry::with_defaults()
        .create("fit", &options())
        .expect("fit parser");

    assert!(matches!(
        parser.parse_line("cpu.usage.idle 90"),
        Err(ParseError::LineUnsupported("fit"))
    ));
}

#[test]
fn default_tags_can_be_replaced() {
    let mut parser = ParserRegistry::with_defaults()
        .create("fit", &options())
        .expect("fit parser");
    parser.set_default_tags(Tags::from([("site".to_string(), "track".to_string())]));

    let samples = parser.parse(&common::activity_fit()).expect("parse");

    assert!(samples.iter().all(|s| s.tags.get("device").is_none()));
    assert!(samples
        .iter()
        .all(|s| s.tags.get("site").map(String::as_str) == Some("track")));
}

#[test]
fn custom_factories_can_be_registered() {
    struct Empty;

    impl Parser for Empty {
        fn parse(&self, _bytes: &[u8]) -> Result<Vec<fitmetrics_rs::types::sample::Sample>, ParseError> {
            Ok(Vec::new())
        }

        fn parse_line(&self, _line: &str) -> Result<fitmetrics_rs::types::sample::Sample, ParseError> {
            Err(ParseError::LineUnsupported("empty"))
        }

        fn set_default_tags(&mut self, _tags: Tags) {}
    }

    fn empty(_options: &ParserOptions) -> Box<dyn Parser + Send + Sync> {
        Box::new(Empty)
    }

    let mut registry = ParserRegistry::with_defaults();
    registry.register("empty", empty);

    assert_eq!(registry.formats(), vec!["empty", "fit"]);
    let parser = registry.create("empty", &options()).expect("empty parser");
    assert!(parser.parse(b"").expect("parse").is_empty());
}
