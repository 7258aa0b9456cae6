use std::env::VarError;

use crate::error::DriverError;

pub mod database;
pub mod error;

pub(crate) fn env(key: &str) -> Result<Option<String>, DriverError> {
    match dotenvy::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(None),
        Err(error) => Err(DriverError::from(error)),
    }
}
