//! Left/right power balance as packed by FIT devices.
//!
//! The low bits hold a percentage, the top bit says whether that percentage
//! belongs to the right side. All-ones marks an unknown balance.

use crate::error::ProjectError;
use crate::types::sentinel;

pub trait Balance {
    fn right_contribution(&self) -> f64;

    fn left_contribution(&self) -> f64 {
        100.0 - self.right_contribution()
    }
}

/// One-byte balance in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeftRightBalance(pub u8);

impl LeftRightBalance {
    pub const INVALID: u8 = sentinel::UINT8;
    pub const MASK: u8 = 0x7F;
    pub const RIGHT: u8 = 0x80;
}

impl Balance for LeftRightBalance {
    fn right_contribution(&self) -> f64 {
        if self.0 == Self::INVALID {
            return f64::NAN;
        }
        let amount = f64::from(self.0 & Self::MASK);
        if self.0 & Self::RIGHT != 0 {
            amount
        } else {
            100.0 - amount
        }
    }
}

/// Two-byte balance in hundredths of a percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeftRightBalance100(pub u16);

impl LeftRightBalance100 {
    pub const INVALID: u16 = sentinel::UINT16;
    pub const MASK: u16 = 0x3FFF;
    pub const RIGHT: u16 = 0x8000;
}

impl Balance for LeftRightBalance100 {
    fn right_contribution(&self) -> f64 {
        if self.0 == Self::INVALID {
            return f64::NAN;
        }
        let amount = f64::from(self.0 & Self::MASK) / 100.0;
        if self.0 & Self::RIGHT != 0 {
            amount
        } else {
            100.0 - amount
        }
    }
}

/// Balance as it came off the wire: the raw integer and its width in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBalance {
    pub value: u32,
    pub width: u8,
}

impl RawBalance {
    pub const fn narrow(value: u8) -> Self {
        Self {
            value: value as u32,
            width: 1,
        }
    }

    pub const fn wide(value: u16) -> Self {
        Self {
            value: value as u32,
            width: 2,
        }
    }

    pub const fn narrow_invalid() -> Self {
        Self::narrow(LeftRightBalance::INVALID)
    }

    pub const fn wide_invalid() -> Self {
        Self::wide(LeftRightBalance100::INVALID)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackedBalance {
    Narrow(LeftRightBalance),
    Wide(LeftRightBalance100),
}

impl TryFrom<RawBalance> for PackedBalance {
    type Error = ProjectError;

    fn try_from(raw: RawBalance) -> Result<Self, Self::Error> {
        let unsupported = || ProjectError::UnsupportedEncoding {
            field: "left_right_balance",
            detail: format!("{}-byte value {:#x}", raw.width, raw.value),
        };
        match raw.width {
            1 => u8::try_from(raw.value)
                .map(|v| PackedBalance::Narrow(LeftRightBalance(v)))
                .map_err(|_| unsupported()),
            2 => u16::try_from(raw.value)
                .map(|v| PackedBalance::Wide(LeftRightBalance100(v)))
                .map_err(|_| unsupported()),
            _ => Err(unsupported()),
        }
    }
}

impl Balance for PackedBalance {
    fn right_contribution(&self) -> f64 {
        match self {
            PackedBalance::Narrow(b) => b.right_contribution(),
            PackedBalance::Wide(b) => b.right_contribution(),
        }
    }
}
