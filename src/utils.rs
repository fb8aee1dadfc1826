use axum::http::StatusCode;
use time::OffsetDateTime;
use time::macros::format_description;

use crate::constants::*;

pub fn db_error() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ERR_DATABASE_OPERATION.to_string(),
    )
}

pub fn confirmation_required() -> (StatusCode, String) {
    (
        StatusCode::PRECONDITION_REQUIRED,
        ERR_CONFIRMATION_REQUIRED.to_string(),
    )
}

pub fn validate_string_length(
    value: &str,
    field_name: &str,
    max_length: usize,
) -> Result<(), (StatusCode, String)> {
    if value.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("{} cannot be empty", field_name),
        ));
    }
    if value.len() > max_length {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("{} must be less than {} characters", field_name, max_length),
        ));
    }
    Ok(())
}

pub fn validate_date(value: &str) -> Result<(), (StatusCode, String)> {
    if value.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Date cannot be empty".to_string()));
    }

    time::Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid date format".to_string()))?;

    Ok(())
}

pub fn validate_positive_amount(amount: f64, field_name: &str) -> Result<(), (StatusCode, String)> {
    if !amount.is_finite() {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("{} must be a valid finite number", field_name),
        ));
    }
    if amount <= 0.0 {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("{} must be positive", field_name),
        ));
    }
    Ok(())
}

/// Zero is accepted and reads as "no goal".
pub fn validate_goal(goal: f64) -> Result<(), (StatusCode, String)> {
    if !goal.is_finite() || goal < 0.0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "Goal must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

pub fn today_date() -> String {
    let today = OffsetDateTime::now_utc().date();
    today
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| today.to_string())
}
