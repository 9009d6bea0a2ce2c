//! Request body checks for appearance creation.

use crate::error::{AppError, RATING_OUT_OF_RANGE};
use crate::model::Rating;
use serde_json::{Map, Value};

pub struct RequestValidator;

fn integral(f: f64) -> Option<i64> {
    // i64::MAX is not representable as f64; the bound is exclusive.
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

impl RequestValidator {
    /// The body must be a JSON object; fields are looked up individually afterwards.
    pub fn object(body: &Value) -> Result<&Map<String, Value>, AppError> {
        body.as_object()
            .ok_or_else(|| AppError::BadRequest("body must be a JSON object".into()))
    }

    /// Resolve an id field the way an INTEGER column compares against it:
    /// integers, integral floats (`1.0`) and numeric strings (`"1"`) name a row.
    /// Anything else (absent, null, `1.5`, `"abc"`, booleans) names nothing.
    pub fn id(body: &Map<String, Value>, field: &str) -> Option<i64> {
        match body.get(field)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(integral))
            }
            _ => None,
        }
    }

    /// `rating` must be a JSON integer in 1..=5. Floats, strings and booleans are rejected.
    pub fn rating(body: &Map<String, Value>) -> Result<Rating, AppError> {
        let n = match body.get("rating") {
            Some(Value::Number(n)) => n.as_i64(),
            _ => None,
        };
        n.ok_or_else(|| AppError::Validation(RATING_OUT_OF_RANGE.into()))
            .and_then(Rating::try_from)
    }
}
