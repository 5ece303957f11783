//! Raw values the FIT format reserves for "field not set".
//!
//! Integer fields are compared against the marker of their own base type.
//! Scaled fields arrive as `f64` and use NaN for absence.

use crate::types::sample::{FieldValue, Fields};

pub const UINT8: u8 = 0xFF;
pub const SINT8: i8 = 0x7F;
pub const UINT16: u16 = 0xFFFF;
pub const UINT32: u32 = 0xFFFF_FFFF;

/// Insert a scaled value unless it is NaN (any sign or payload).
pub fn insert_if_valid(name: &'static str, value: f64, fields: &mut Fields) {
    if !value.is_nan() {
        fields.insert(name, FieldValue::Float(value));
    }
}

/// Insert a raw integer unless it equals that field's invalid marker.
pub fn insert_if_set<T>(name: &'static str, value: T, invalid: T, fields: &mut Fields)
where
    T: PartialEq + Into<FieldValue>,
{
    if value != invalid {
        fields.insert(name, value.into());
    }
}
