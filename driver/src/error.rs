use error_stack::Report;
use kernel::KernelError;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Env(dotenvy::Error),
    #[error(transparent)]
    Io(std::io::Error),
    #[error(transparent)]
    Serde(serde_json::Error),
    #[error(transparent)]
    Parse(std::num::ParseIntError),
}

impl From<dotenvy::Error> for DriverError {
    fn from(value: dotenvy::Error) -> Self {
        Self::Env(value)
    }
}

impl From<std::io::Error> for DriverError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for DriverError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

impl From<std::num::ParseIntError> for DriverError {
    fn from(value: std::num::ParseIntError) -> Self {
        Self::Parse(value)
    }
}

pub trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

impl<T, E> ConvertError for Result<T, E>
where
    E: Into<DriverError>,
{
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::new(error.into()).change_context(KernelError::Internal))
    }
}
