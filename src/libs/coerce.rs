use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::descriptor::{FieldDescriptor, FieldKind};
use crate::error::CoercionError;
use crate::value::{Value, ValueType};

/// The storage type a form field is written as.
pub fn target_type(name: &str, kind: FieldKind) -> ValueType {
    if name.ends_with("_user_id") || name == "job_id" || name == "work_hours" {
        ValueType::Int
    } else if name == "hourly_rate" {
        ValueType::Decimal
    } else {
        match kind {
            FieldKind::Date => ValueType::Date,
            FieldKind::Time => ValueType::Time,
            _ => ValueType::Text,
        }
    }
}

/// Turns a raw form string into a typed storage value. Missing or empty input is null.
pub fn coerce(field: &FieldDescriptor, raw: Option<&str>) -> Result<(Value, ValueType), CoercionError> {
    let ty = target_type(field.name, field.kind);
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok((Value::Null, ty)),
    };
    let fail = |expected: &'static str| CoercionError {
        field: field.name.to_string(),
        value: raw.to_string(),
        expected,
    };

    let value = match ty {
        ValueType::Int => raw
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| fail("integer"))?,
        ValueType::Decimal => parse_decimal(raw.trim())
            .map(Value::Decimal)
            .ok_or_else(|| fail("decimal"))?,
        ValueType::Date => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Value::Date)
            .map_err(|_| fail("date"))?,
        ValueType::Time => parse_time(raw.trim())
            .map(Value::Time)
            .ok_or_else(|| fail("time"))?,
        _ => Value::Text(raw.to_string()),
    };
    Ok((value, ty))
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}
