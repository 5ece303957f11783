use std::fmt;

use chrono::{DateTime, Utc};

use crate::types::balance::RawBalance;
use crate::types::sentinel;

#[derive(Debug, Clone, Copy)]
pub enum FileFormat {
    Fit,
}

impl FileFormat {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = filename.rsplit('.').next()?.to_lowercase();
        match ext.as_str() {
            "fit" => Some(FileFormat::Fit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Fit => "fit",
        }
    }
}

/// A decoded activity file. Records, events and laps keep file order.
#[derive(Debug, Clone)]
pub struct ActivityStream {
    pub timestamp: DateTime<Utc>,
    pub records: Vec<Record>,
    pub events: Vec<Event>,
    pub laps: Vec<Lap>,
}

/// Point-in-time sample. Integers hold their raw value or the invalid marker
/// of their base type, scaled values are NaN when absent.
#[derive(Debug, Clone)]
pub struct Record {
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub heart_rate: u8,
    pub cadence: u8,
    pub distance: f64,
    pub speed: f64,
    pub power: u16,
    pub grade: f64,
    pub resistance: u8,
    pub time_from_course: f64,
    pub cycle_length: f64,
    pub temperature: i8,
    pub cycles: u8,
    pub total_cycles: u32,
    pub compressed_accumulated_power: u16,
    pub accumulated_power: u32,
    pub left_right_balance: RawBalance,
    pub gps_accuracy: u8,
    pub vertical_speed: f64,
    pub calories: u16,
    pub vertical_oscillation: f64,
    pub stance_time_percent: f64,
    pub stance_time: f64,
    pub left_torque_effectiveness: f64,
    pub right_torque_effectiveness: f64,
    pub left_pedal_smoothness: f64,
    pub right_pedal_smoothness: f64,
    pub combined_pedal_smoothness: f64,
    pub time128: f64,
    pub stroke_type: StrokeType,
    pub ball_speed: f64,
    pub total_hemoglobin_conc: f64,
    pub total_hemoglobin_conc_min: f64,
    pub total_hemoglobin_conc_max: f64,
    pub saturated_hemoglobin_percent: f64,
    pub saturated_hemoglobin_percent_min: f64,
    pub saturated_hemoglobin_percent_max: f64,
}

impl Record {
    /// A record at `timestamp` with every optional field unset.
    pub fn unset(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            latitude: f64::NAN,
            longitude: f64::NAN,
            altitude: f64::NAN,
            heart_rate: sentinel::UINT8,
            cadence: sentinel::UINT8,
            distance: f64::NAN,
            speed: f64::NAN,
            power: sentinel::UINT16,
            grade: f64::NAN,
            resistance: sentinel::UINT8,
            time_from_course: f64::NAN,
            cycle_length: f64::NAN,
            temperature: sentinel::SINT8,
            cycles: sentinel::UINT8,
            total_cycles: sentinel::UINT32,
            compressed_accumulated_power: sentinel::UINT16,
            accumulated_power: sentinel::UINT32,
            left_right_balance: RawBalance::narrow_invalid(),
            gps_accuracy: sentinel::UINT8,
            vertical_speed: f64::NAN,
            calories: sentinel::UINT16,
            vertical_oscillation: f64::NAN,
            stance_time_percent: f64::NAN,
            stance_time: f64::NAN,
            left_torque_effectiveness: f64::NAN,
            right_torque_effectiveness: f64::NAN,
            left_pedal_smoothness: f64::NAN,
            right_pedal_smoothness: f64::NAN,
            combined_pedal_smoothness: f64::NAN,
            time128: f64::NAN,
            stroke_type: StrokeType::Invalid,
            ball_speed: f64::NAN,
            total_hemoglobin_conc: f64::NAN,
            total_hemoglobin_conc_min: f64::NAN,
            total_hemoglobin_conc_max: f64::NAN,
            saturated_hemoglobin_percent: f64::NAN,
            saturated_hemoglobin_percent_min: f64::NAN,
            saturated_hemoglobin_percent_max: f64::NAN,
        }
    }
}

/// A discrete occurrence. Both labels are always present.
#[derive(Debug, Clone)]
pub struct Event {
    pub timestamp: DateTime<Utc>,
    pub event: String,
    pub event_type: String,
}

#[derive(Debug, Clone)]
pub struct Lap {
    pub timestamp: DateTime<Utc>,
    pub total_elapsed_time: f64,
    pub total_moving_time: f64,
    pub total_distance: f64,
    pub total_calories: u16,
    pub avg_heart_rate: u8,
    pub max_heart_rate: u8,
    pub avg_cadence: u8,
    pub avg_speed: f64,
    pub max_speed: f64,
    pub left_right_balance: RawBalance,
}

impl Lap {
    pub fn unset(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            total_elapsed_time: f64::NAN,
            total_moving_time: f64::NAN,
            total_distance: f64::NAN,
            total_calories: sentinel::UINT16,
            avg_heart_rate: sentinel::UINT8,
            max_heart_rate: sentinel::UINT8,
            avg_cadence: sentinel::UINT8,
            avg_speed: f64::NAN,
            max_speed: f64::NAN,
            left_right_balance: RawBalance::wide_invalid(),
        }
    }
}

/// Racket stroke. Values the profile does not name are kept as `Unknown`,
/// only the `0xFF` marker is `Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeType {
    NoEvent,
    Other,
    Serve,
    Forehand,
    Backhand,
    Smash,
    Unknown(u8),
    Invalid,
}

impl StrokeType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => StrokeType::NoEvent,
            1 => StrokeType::Other,
            2 => StrokeType::Serve,
            3 => StrokeType::Forehand,
            4 => StrokeType::Backhand,
            5 => StrokeType::Smash,
            sentinel::UINT8 => StrokeType::Invalid,
            other => StrokeType::Unknown(other),
        }
    }

    /// Accepts the profile names and `unknown_variant_N`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "no_event" => StrokeType::NoEvent,
            "other" => StrokeType::Other,
            "serve" => StrokeType::Serve,
            "forehand" => StrokeType::Forehand,
            "backhand" => StrokeType::Backhand,
            "smash" => StrokeType::Smash,
            other => other
                .strip_prefix("unknown_variant_")
                .and_then(|n| n.parse::<u8>().ok())
                .map_or(StrokeType::Invalid, StrokeType::from_u8),
        }
    }

    pub fn is_valid(&self) -> bool {
        *self != StrokeType::Invalid
    }
}

impl fmt::Display for StrokeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrokeType::NoEvent => f.write_str("no_event"),
            StrokeType::Other => f.write_str("other"),
            StrokeType::Serve => f.write_str("serve"),
            StrokeType::Forehand => f.write_str("forehand"),
            StrokeType::Backhand => f.write_str("backhand"),
            StrokeType::Smash => f.write_str("smash"),
            StrokeType::Unknown(v) => write!(f, "unknown_variant_{}", v),
            StrokeType::Invalid => f.write_str("invalid"),
        }
    }
}
