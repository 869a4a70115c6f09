use rosc::OscType;
use serde::Deserialize;

use crate::error::{Error, Result};

/// A single cell statistic. Integers and floats keep their representation
/// all the way to the OSC type tag.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Float(f64),
}

impl CellValue {
    /// Convert to an OSC argument. Ints become `i` (32-bit), floats become `f`.
    /// An integer that does not fit in 32 bits is rejected rather than truncated.
    pub fn to_osc(self) -> Result<OscType> {
        match self {
            CellValue::Int(v) => i32::try_from(v)
                .map(OscType::Int)
                .map_err(|_| Error::Encoding(format!("integer {} does not fit an OSC int32 argument", v))),
            CellValue::Float(v) => Ok(OscType::Float(v as f32)),
        }
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<u8> for CellValue {
    fn from(v: u8) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<f32> for CellValue {
    fn from(v: f32) -> Self {
        CellValue::Float(v as f64)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

/// Statistics for one tile of the webcam grid, as produced by the analysis stage.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CellData {
    pub row: i64,
    pub col: i64,
    pub avg_red: CellValue,
    pub avg_green: CellValue,
    pub avg_blue: CellValue,
    pub brightness: CellValue,
    pub contrast: CellValue,
    /// Most frequent color as (r, g, b)
    pub dominant_color: [CellValue; 3],
}
