use std::{error::Error, fmt};

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::api::CreateBookmark;
use crate::model::NewBookmark;

lazy_static! {
    // Optional http(s) scheme, then a dotted domain ending in a >=2 letter
    // label or a dotted-quad IPv4 address, then optional port, path
    // segments, query string and fragment.
    static ref URL_PATTERN: Regex = Regex::new(
        r"(?i)^(https?://)?((([a-z\d]([a-z\d-]*[a-z\d])*)\.)+[a-z]{2,}|((\d{1,3}\.){3}\d{1,3}))(:\d+)?(/[-a-z\d%_.~+]*)*(\?[;&a-z\d%_.~+=-]*)?(#[-a-z\d_]*)?$"
    )
    .unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    TitleRequired,
    UrlRequired,
    UrlInvalid,
    RatingRequired,
    RatingNotANumber,
    RatingOutOfRange,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ValidationError::*;
        match self {
            TitleRequired => write!(f, "title required"),
            UrlRequired => write!(f, "url required"),
            UrlInvalid => write!(f, "url must be a valid URL"),
            RatingRequired => write!(f, "rating required"),
            RatingNotANumber => write!(f, "rating must be a number"),
            RatingOutOfRange => write!(f, "rating out of range"),
        }
    }
}

impl Error for ValidationError {}

pub fn is_valid_url(url: &str) -> bool {
    URL_PATTERN.is_match(url)
}

fn rating_as_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Checks a create payload field by field, stopping at the first violated
/// rule. The check order is a contract: title, url presence, url shape,
/// rating presence, rating numeric, rating range.
pub fn validate(payload: CreateBookmark) -> Result<NewBookmark, ValidationError> {
    let title = match payload.title {
        Some(t) if !t.is_empty() => t,
        _ => return Err(ValidationError::TitleRequired),
    };

    let url = match payload.url {
        Some(u) if !u.is_empty() => u,
        _ => return Err(ValidationError::UrlRequired),
    };

    if !is_valid_url(&url) {
        return Err(ValidationError::UrlInvalid);
    }

    let rating = match payload.rating {
        Some(Value::Null) | None => return Err(ValidationError::RatingRequired),
        Some(value) => rating_as_number(&value).ok_or(ValidationError::RatingNotANumber)?,
    };

    if !(1..=5).contains(&rating) {
        return Err(ValidationError::RatingOutOfRange);
    }

    Ok(NewBookmark {
        title,
        url,
        description: payload.description.unwrap_or_default(),
        rating,
    })
}
