use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::ProjectError;
use crate::types::activity::{ActivityStream, Event, Lap, Record};
use crate::types::balance::{Balance, PackedBalance};
use crate::types::sample::{FieldValue, Fields, MessageKind, Sample, Tags};
use crate::types::sentinel::{self, insert_if_set, insert_if_valid};

#[derive(Debug, Clone, Copy)]
pub enum Message<'a> {
    Record(&'a Record),
    Event(&'a Event),
    Lap(&'a Lap),
}

impl Message<'_> {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Record(_) => MessageKind::Record,
            Message::Event(_) => MessageKind::Event,
            Message::Lap(_) => MessageKind::Lap,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Message::Record(r) => r.timestamp,
            Message::Event(e) => e.timestamp,
            Message::Lap(l) => l.timestamp,
        }
    }
}

pub fn project(message: Message<'_>, tags: &Arc<Tags>) -> Result<Sample, ProjectError> {
    let fields = match message {
        Message::Record(r) => project_record(r)?,
        Message::Event(e) => project_event(e),
        Message::Lap(l) => project_lap(l)?,
    };

    Ok(Sample {
        name: message.kind(),
        tags: Arc::clone(tags),
        fields,
        timestamp: message.timestamp(),
    })
}

/// Project every message of an activity: records, then events, then laps.
///
/// The three kinds are projected in parallel; order within each kind follows the file.
pub fn project_activity(
    stream: &ActivityStream,
    tags: Arc<Tags>,
) -> Vec<Result<Sample, ProjectError>> {
    let (records, (events, laps)) = rayon::join(
        || project_all(stream.records.iter().map(Message::Record).collect(), &tags),
        || {
            rayon::join(
                || project_all(stream.events.iter().map(Message::Event).collect(), &tags),
                || project_all(stream.laps.iter().map(Message::Lap).collect(), &tags),
            )
        },
    );

    let mut samples = records;
    samples.extend(events);
    samples.extend(laps);
    samples
}

fn project_all(messages: Vec<Message<'_>>, tags: &Arc<Tags>) -> Vec<Result<Sample, ProjectError>> {
    use rayon::prelude::*;

    messages.into_par_iter().map(|m| project(m, tags)).collect()
}

pub fn project_record(r: &Record) -> Result<Fields, ProjectError> {
    let mut fields = Fields::new();

    insert_if_valid("latitude__deg", r.latitude, &mut fields);
    insert_if_valid("longitude__deg", r.longitude, &mut fields);
    insert_if_valid("altitude__m", r.altitude, &mut fields);
    insert_if_set("heart_rate__bpm", r.heart_rate, sentinel::UINT8, &mut fields);
    insert_if_set("cadence__rpm", r.cadence, sentinel::UINT8, &mut fields);
    insert_if_valid("distance__m", r.distance, &mut fields);
    insert_if_valid("speed__m/s", r.speed, &mut fields);
    insert_if_set("power__W", r.power, sentinel::UINT16, &mut fields);
    insert_if_valid("grade__%", r.grade, &mut fields);
    insert_if_set("resistance_level", r.resistance, sentinel::UINT8, &mut fields);
    insert_if_valid("time_from_course__s", r.time_from_course, &mut fields);
    insert_if_valid("cycle_length__m", r.cycle_length, &mut fields);
    insert_if_set("temperature__degC", r.temperature, sentinel::SINT8, &mut fields);
    insert_if_set("cycles", r.cycles, sentinel::UINT8, &mut fields);
    insert_if_set("cycles_total", r.total_cycles, sentinel::UINT32, &mut fields);
    insert_if_set(
        "power_accumulated_compressed__W",
        r.compressed_accumulated_power,
        sentinel::UINT16,
        &mut fields,
    );
    insert_if_set(
        "power_accumulated__W",
        r.accumulated_power,
        sentinel::UINT32,
        &mut fields,
    );
    let balance = PackedBalance::try_from(r.left_right_balance)?;
    insert_if_valid("pedal_left_contribution__%", balance.left_contribution(), &mut fields);
    insert_if_set("gps_accuracy__m", r.gps_accuracy, sentinel::UINT8, &mut fields);
    insert_if_valid("speed_vertical__m/s", r.vertical_speed, &mut fields);
    insert_if_set("calories__kcal", r.calories, sentinel::UINT16, &mut fields);
    insert_if_valid("oscillation_vertical__mm", r.vertical_oscillation, &mut fields);
    insert_if_valid("stance_time__%", r.stance_time_percent, &mut fields);
    insert_if_valid("stance_time__ms", r.stance_time, &mut fields);
    insert_if_valid("torque_effectiveness_left__%", r.left_torque_effectiveness, &mut fields);
    insert_if_valid("torque_effectiveness_right__%", r.right_torque_effectiveness, &mut fields);
    insert_if_valid("pedal_smoothness_left__%", r.left_pedal_smoothness, &mut fields);
    insert_if_valid("pedal_smoothness_right__%", r.right_pedal_smoothness, &mut fields);
    insert_if_valid("pedal_smoothness__%", r.combined_pedal_smoothness, &mut fields);
    insert_if_valid("time__s", r.time128, &mut fields);
    if r.stroke_type.is_valid() {
        fields.insert("stroke", FieldValue::from(r.stroke_type.to_string()));
    }
    insert_if_valid("ball_speed__m/s", r.ball_speed, &mut fields);
    insert_if_valid("hemoglobin_concentration_total__g/dL", r.total_hemoglobin_conc, &mut fields);
    insert_if_valid(
        "hemoglobin_concentration_total_min__g/dL",
        r.total_hemoglobin_conc_min,
        &mut fields,
    );
    insert_if_valid(
        "hemoglobin_concentration_total_max__g/dL",
        r.total_hemoglobin_conc_max,
        &mut fields,
    );
    insert_if_valid("hemoglobin_saturated_total__%", r.saturated_hemoglobin_percent, &mut fields);
    insert_if_valid(
        "hemoglobin_saturated_total_min__%",
        r.saturated_hemoglobin_percent_min,
        &mut fields,
    );
    insert_if_valid(
        "hemoglobin_saturated_total_max__%",
        r.saturated_hemoglobin_percent_max,
        &mut fields,
    );

    Ok(fields)
}

pub fn project_event(e: &Event) -> Fields {
    let mut fields = Fields::new();
    fields.insert("event", FieldValue::from(e.event.as_str()));
    fields.insert("event_type", FieldValue::from(e.event_type.as_str()));
    fields
}

pub fn project_lap(lap: &Lap) -> Result<Fields, ProjectError> {
    let mut fields = Fields::new();

    insert_if_valid("elapsed_time__s", lap.total_elapsed_time, &mut fields);
    insert_if_valid("moving_time__s", lap.total_moving_time, &mut fields);
    insert_if_valid("distance__m", lap.total_distance, &mut fields);
    insert_if_set("calories__kcal", lap.total_calories, sentinel::UINT16, &mut fields);
    insert_if_set("heart_rate_avg__bpm", lap.avg_heart_rate, sentinel::UINT8, &mut fields);
    insert_if_set("heart_rate_max__bpm", lap.max_heart_rate, sentinel::UINT8, &mut fields);
    insert_if_set("cadence_avg__rpm", lap.avg_cadence, sentinel::UINT8, &mut fields);
    insert_if_valid("speed_avg__m/s", lap.avg_speed, &mut fields);
    insert_if_valid("speed_max__m/s", lap.max_speed, &mut fields);
    let balance = PackedBalance::try_from(lap.left_right_balance)?;
    insert_if_valid("pedal_left_contribution__%", balance.left_contribution(), &mut fields);

    Ok(fields)
}
