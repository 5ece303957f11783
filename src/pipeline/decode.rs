use std::collections::HashSet;

use chrono::{DateTime, Utc};
use fitparser::de::{from_bytes_with_options, DecodeOption};
use fitparser::profile::MesgNum;
use fitparser::{FitDataRecord, Value};

use crate::error::ParseError;
use crate::types::activity::{ActivityStream, Event, Lap, Record, StrokeType};
use crate::types::balance::{LeftRightBalance, LeftRightBalance100, RawBalance};

/// Decode a FIT payload into the typed activity stream.
///
/// Fields the file does not carry keep their invalid marker (integers) or NaN
/// (scaled values). Composite fields (`cycles`, `compressed_accumulated_power`)
/// are kept alongside the fields they expand into.
pub fn decode_activity(bytes: &[u8]) -> Result<ActivityStream, ParseError> {
    let options = HashSet::from([DecodeOption::KeepCompositeFields]);
    let data = from_bytes_with_options(bytes, &options)
        .map_err(|e| ParseError::InvalidFit(format!("Failed to parse FIT file: {}", e)))?;

    let mut activity_time = None;
    let mut records = Vec::new();
    let mut events = Vec::new();
    let mut laps = Vec::new();

    for message in &data {
        match message.kind() {
            MesgNum::Activity => activity_time = Some(required_timestamp(message, "activity")?),
            MesgNum::Record => {
                records.push(decode_record(message, required_timestamp(message, "record")?))
            }
            MesgNum::Event => {
                events.push(decode_event(message, required_timestamp(message, "event")?))
            }
            MesgNum::Lap => laps.push(decode_lap(message, required_timestamp(message, "lap")?)),
            _ => {}
        }
    }

    let timestamp = activity_time.ok_or(ParseError::NotAnActivity)?;

    tracing::debug!(
        "Decoded activity with {} records, {} events, {} laps",
        records.len(),
        events.len(),
        laps.len()
    );

    Ok(ActivityStream {
        timestamp,
        records,
        events,
        laps,
    })
}

fn required_timestamp(
    message: &FitDataRecord,
    kind: &'static str,
) -> Result<DateTime<Utc>, ParseError> {
    timestamp_of(message).ok_or(ParseError::MissingTimestamp(kind))
}

fn timestamp_of(message: &FitDataRecord) -> Option<DateTime<Utc>> {
    message
        .fields()
        .iter()
        .find(|field| field.name() == "timestamp")
        .and_then(|field| match field.value() {
            Value::Timestamp(ts) => Some(ts.with_timezone(&Utc)),
            _ => None,
        })
}

fn decode_record(message: &FitDataRecord, timestamp: DateTime<Utc>) -> Record {
    let mut r = Record::unset(timestamp);
    let mut altitude = f64::NAN;
    let mut speed = f64::NAN;

    for field in message.fields() {
        let value = field.value();
        match field.name() {
            "position_lat" => r.latitude = as_f64(value).map_or(f64::NAN, semicircles_to_degrees),
            "position_long" => r.longitude = as_f64(value).map_or(f64::NAN, semicircles_to_degrees),
            "enhanced_altitude" => r.altitude = scaled(value),
            "altitude" => altitude = scaled(value),
            "enhanced_speed" => r.speed = scaled(value),
            "speed" => speed = scaled(value),
            "heart_rate" => set_int(&mut r.heart_rate, value),
            "cadence" => set_int(&mut r.cadence, value),
            "distance" => r.distance = scaled(value),
            "power" => set_int(&mut r.power, value),
            "grade" => r.grade = scaled(value),
            "resistance" => set_int(&mut r.resistance, value),
            "time_from_course" => r.time_from_course = scaled(value),
            "cycle_length" => r.cycle_length = scaled(value),
            "temperature" => set_int(&mut r.temperature, value),
            "cycles" => set_int(&mut r.cycles, value),
            "total_cycles" => set_int(&mut r.total_cycles, value),
            "compressed_accumulated_power" => set_int(&mut r.compressed_accumulated_power, value),
            "accumulated_power" => set_int(&mut r.accumulated_power, value),
            "left_right_balance" => {
                if let Some(balance) = raw_balance(value, false) {
                    r.left_right_balance = balance;
                }
            }
            "gps_accuracy" => set_int(&mut r.gps_accuracy, value),
            "vertical_speed" => r.vertical_speed = scaled(value),
            "calories" => set_int(&mut r.calories, value),
            "vertical_oscillation" => r.vertical_oscillation = scaled(value),
            "stance_time_percent" => r.stance_time_percent = scaled(value),
            "stance_time" => r.stance_time = scaled(value),
            "left_torque_effectiveness" => r.left_torque_effectiveness = scaled(value),
            "right_torque_effectiveness" => r.right_torque_effectiveness = scaled(value),
            "left_pedal_smoothness" => r.left_pedal_smoothness = scaled(value),
            "right_pedal_smoothness" => r.right_pedal_smoothness = scaled(value),
            "combined_pedal_smoothness" => r.combined_pedal_smoothness = scaled(value),
            "time128" => r.time128 = scaled(value),
            "stroke_type" => r.stroke_type = stroke_type(value),
            "ball_speed" => r.ball_speed = scaled(value),
            "total_hemoglobin_conc" => r.total_hemoglobin_conc = scaled(value),
            "total_hemoglobin_conc_min" => r.total_hemoglobin_conc_min = scaled(value),
            "total_hemoglobin_conc_max" => r.total_hemoglobin_conc_max = scaled(value),
            "saturated_hemoglobin_percent" => r.saturated_hemoglobin_percent = scaled(value),
            "saturated_hemoglobin_percent_min" => {
                r.saturated_hemoglobin_percent_min = scaled(value)
            }
            "saturated_hemoglobin_percent_max" => {
                r.saturated_hemoglobin_percent_max = scaled(value)
            }
            _ => {}
        }
    }

    if r.altitude.is_nan() {
        r.altitude = altitude;
    }
    if r.speed.is_nan() {
        r.speed = speed;
    }

    r
}

fn decode_event(message: &FitDataRecord, timestamp: DateTime<Utc>) -> Event {
    let mut event = Event {
        timestamp,
        event: "unknown".to_string(),
        event_type: "unknown".to_string(),
    };

    for field in message.fields() {
        match field.name() {
            "event" => {
                if let Some(label) = as_label(field.value()) {
                    event.event = label;
                }
            }
            "event_type" => {
                if let Some(label) = as_label(field.value()) {
                    event.event_type = label;
                }
            }
            _ => {}
        }
    }

    event
}

fn decode_lap(message: &FitDataRecord, timestamp: DateTime<Utc>) -> Lap {
    let mut lap = Lap::unset(timestamp);
    let mut avg_speed = f64::NAN;
    let mut max_speed = f64::NAN;

    for field in message.fields() {
        let value = field.value();
        match field.name() {
            "total_elapsed_time" => lap.total_elapsed_time = scaled(value),
            "total_moving_time" => lap.total_moving_time = scaled(value),
            "total_distance" => lap.total_distance = scaled(value),
            "total_calories" => set_int(&mut lap.total_calories, value),
            "avg_heart_rate" => set_int(&mut lap.avg_heart_rate, value),
            "max_heart_rate" => set_int(&mut lap.max_heart_rate, value),
            "avg_cadence" => set_int(&mut lap.avg_cadence, value),
            "enhanced_avg_speed" => lap.avg_speed = scaled(value),
            "enhanced_max_speed" => lap.max_speed = scaled(value),
            "avg_speed" => avg_speed = scaled(value),
            "max_speed" => max_speed = scaled(value),
            "left_right_balance" => {
                if let Some(balance) = raw_balance(value, true) {
                    lap.left_right_balance = balance;
                }
            }
            _ => {}
        }
    }

    if lap.avg_speed.is_nan() {
        lap.avg_speed = avg_speed;
    }
    if lap.max_speed.is_nan() {
        lap.max_speed = max_speed;
    }

    lap
}

fn semicircles_to_degrees(semicircles: f64) -> f64 {
    semicircles * (180.0 / 2_147_483_648.0)
}

fn scaled(value: &Value) -> f64 {
    as_f64(value).unwrap_or(f64::NAN)
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Float32(v) => Some(*v as f64),
        Value::Float64(v) => Some(*v),
        Value::Array(values) => values.iter().find_map(as_f64),
        other => as_i64(other).map(|v| v as f64),
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Byte(v) | Value::Enum(v) | Value::UInt8(v) | Value::UInt8z(v) => Some(*v as i64),
        Value::SInt8(v) => Some(*v as i64),
        Value::SInt16(v) => Some(*v as i64),
        Value::UInt16(v) | Value::UInt16z(v) => Some(*v as i64),
        Value::SInt32(v) => Some(*v as i64),
        Value::UInt32(v) | Value::UInt32z(v) => Some(*v as i64),
        Value::SInt64(v) => Some(*v),
        Value::UInt64(v) | Value::UInt64z(v) => i64::try_from(*v).ok(),
        _ => None,
    }
}

/// Overwrite `slot` when the value fits the field's integer type.
fn set_int<T: TryFrom<i64>>(slot: &mut T, value: &Value) {
    match as_i64(value).map(T::try_from) {
        Some(Ok(v)) => *slot = v,
        _ => tracing::debug!("Ignoring non-integer or out-of-range value {:?}", value),
    }
}

fn as_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        other => as_i64(other).map(|v| v.to_string()),
    }
}

fn stroke_type(value: &Value) -> StrokeType {
    match value {
        Value::String(label) => StrokeType::from_label(label),
        other => as_i64(other)
            .and_then(|v| u8::try_from(v).ok())
            .map_or(StrokeType::Invalid, StrokeType::from_u8),
    }
}

/// Keep the raw balance and its width. Named values ("mask", "right") come
/// back as strings and are mapped onto their bit patterns. Any other enum
/// value comes back as `SInt64` and takes the width of the field it was read
/// from.
fn raw_balance(value: &Value, wide: bool) -> Option<RawBalance> {
    match value {
        Value::SInt64(v) => {
            let value = match u32::try_from(*v) {
                Ok(value) => value,
                Err(_) => {
                    tracing::debug!("Ignoring negative balance value {}", v);
                    return None;
                }
            };
            Some(RawBalance {
                value,
                width: if wide { 2 } else { 1 },
            })
        }
        Value::Byte(v) | Value::Enum(v) | Value::UInt8(v) | Value::UInt8z(v) => {
            Some(RawBalance::narrow(*v))
        }
        Value::UInt16(v) | Value::UInt16z(v) => Some(RawBalance::wide(*v)),
        Value::UInt32(v) | Value::UInt32z(v) => Some(RawBalance {
            value: *v,
            width: 4,
        }),
        Value::String(label) => match (label.as_str(), wide) {
            ("mask", false) => Some(RawBalance::narrow(LeftRightBalance::MASK)),
            ("right", false) => Some(RawBalance::narrow(LeftRightBalance::RIGHT)),
            ("mask", true) => Some(RawBalance::wide(LeftRightBalance100::MASK)),
            ("right", true) => Some(RawBalance::wide(LeftRightBalance100::RIGHT)),
            _ => None,
        },
        _ => None,
    }
}
