//! Validation for the model endpoint section.

use crate::schema::NetsourceConfig;

use super::helpers::{validate_range, validate_range_f64};

pub(crate) fn validate_model(errors: &mut Vec<String>, config: &NetsourceConfig) {
    let model = &config.model;

    if model.name.trim().is_empty() {
        errors.push("model.name must not be empty".into());
    }
    if !(model.base_url.starts_with("http://") || model.base_url.starts_with("https://")) {
        errors.push(format!(
            "model.base_url = {:?} must start with http:// or https://",
            model.base_url
        ));
    }
    validate_range_f64(
        errors,
        "model.default_temperature",
        model.default_temperature,
        0.0,
        2.0,
    );
    validate_range(
        errors,
        "model.request_timeout_secs",
        model.request_timeout_secs,
        1,
        600,
    );
}
