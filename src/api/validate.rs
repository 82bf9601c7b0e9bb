//! Form validation for incoming submissions.
//!
//! Runs before any database access. Only the first failing check is reported.

use crate::storage::{NewProject, NewUser};
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use thiserror::Error;

pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Submitted form fields keyed by name.
pub type FormFields = HashMap<String, String>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Invalid password or passwords don't match")]
    InvalidPassword,
    #[error("Invalid zipcode")]
    InvalidZipcode,
}

#[must_use]
pub fn valid_zipcode(zipcode: &str) -> bool {
    Regex::new(r"^[0-9]{5}$").is_ok_and(|re| re.is_match(zipcode))
}

#[must_use]
pub fn valid_password(password: &SecretString, confirm_password: &SecretString) -> bool {
    let password = password.expose_secret();
    password == confirm_password.expose_secret()
        && password.chars().count() >= PASSWORD_MIN_LENGTH
}

/// Validate a `new-profile` submission.
///
/// Password checks run before the zipcode check. The password is only compared,
/// never returned.
///
/// # Errors
/// Returns the first failing [`ValidationError`].
pub fn validate_new_profile(fields: &FormFields) -> Result<NewUser, ValidationError> {
    let password = SecretString::from(required(fields, "password")?);
    let confirm_password = SecretString::from(required(fields, "confirm_password")?);
    let username = required(fields, "username")?;
    let email = required(fields, "email")?;
    let zipcode = required(fields, "zipcode")?;

    if !valid_password(&password, &confirm_password) {
        return Err(ValidationError::InvalidPassword);
    }

    if !valid_zipcode(&zipcode) {
        return Err(ValidationError::InvalidZipcode);
    }

    Ok(NewUser {
        username,
        email,
        zipcode,
    })
}

/// Validate a `project` submission. Whether the user exists is checked by the store.
///
/// # Errors
/// Returns [`ValidationError::MissingField`] when `project` or `username` is absent or blank.
pub fn validate_new_project(fields: &FormFields) -> Result<NewProject, ValidationError> {
    let project = non_empty(fields, "project")?;
    let username = non_empty(fields, "username")?;

    Ok(NewProject { project, username })
}

fn required(fields: &FormFields, name: &'static str) -> Result<String, ValidationError> {
    fields
        .get(name)
        .cloned()
        .ok_or(ValidationError::MissingField(name))
}

fn non_empty(fields: &FormFields, name: &'static str) -> Result<String, ValidationError> {
    required(fields, name).and_then(|value| {
        if value.trim().is_empty() {
            Err(ValidationError::MissingField(name))
        } else {
            Ok(value)
        }
    })
}
