use rsb_derive::Builder;
use serde::*;
use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

#[derive(Debug)]
pub enum CampdirError {
    SystemError(CampdirSystemError),
    DatabaseError(CampdirDatabaseError),
    DataConflictError(CampdirDataConflictError),
    DataNotFoundError(CampdirDataNotFoundError),
    InvalidParametersError(CampdirInvalidParametersError),
    SerializeError(CampdirSerializationError),
    DeserializeError(CampdirSerializationError),
}

impl Display for CampdirError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match *self {
            CampdirError::SystemError(ref err) => err.fmt(f),
            CampdirError::DatabaseError(ref err) => err.fmt(f),
            CampdirError::DataConflictError(ref err) => err.fmt(f),
            CampdirError::DataNotFoundError(ref err) => err.fmt(f),
            CampdirError::InvalidParametersError(ref err) => err.fmt(f),
            CampdirError::SerializeError(ref err) => err.fmt(f),
            CampdirError::DeserializeError(ref err) => err.fmt(f),
        }
    }
}

impl Error for CampdirError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            CampdirError::SystemError(ref err) => Some(err),
            CampdirError::DatabaseError(ref err) => Some(err),
            CampdirError::DataConflictError(ref err) => Some(err),
            CampdirError::DataNotFoundError(ref err) => Some(err),
            CampdirError::InvalidParametersError(ref err) => Some(err),
            CampdirError::SerializeError(ref err) => Some(err),
            CampdirError::DeserializeError(ref err) => Some(err),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Builder, Serialize, Deserialize)]
pub struct CampdirErrorPublicGenericDetails {
    pub code: String,
}

#[derive(Debug, Eq, PartialEq, Clone, Builder)]
pub struct CampdirSystemError {
    pub public: CampdirErrorPublicGenericDetails,
    pub message: String,
}

impl Display for CampdirSystemError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Campdir system/internal error: {}", self.message)
    }
}

impl std::error::Error for CampdirSystemError {}

#[derive(Debug, Clone, Builder)]
pub struct CampdirDatabaseError {
    pub public: CampdirErrorPublicGenericDetails,
    pub details: String,
    pub retry_possible: bool,
}

impl Display for CampdirDatabaseError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Database general error occurred: {}", self.details)
    }
}

impl std::error::Error for CampdirDatabaseError {}

#[derive(Debug, Clone, Builder)]
pub struct CampdirDataConflictError {
    pub public: CampdirErrorPublicGenericDetails,
    pub details: String,
}

impl Display for CampdirDataConflictError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Database conflict error occurred: {}", self.details)
    }
}

impl std::error::Error for CampdirDataConflictError {}

#[derive(Debug, Clone, Builder)]
pub struct CampdirDataNotFoundError {
    pub public: CampdirErrorPublicGenericDetails,
    pub data_detail_message: String,
}

impl Display for CampdirDataNotFoundError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Data not found error occurred: {:?}", self.public)
    }
}

impl std::error::Error for CampdirDataNotFoundError {}

#[derive(Debug, Eq, PartialEq, Clone, Builder, Serialize, Deserialize)]
pub struct CampdirInvalidParametersPublicDetails {
    pub field: String,
    pub error: String,
}

#[derive(Debug, Clone, Builder)]
pub struct CampdirInvalidParametersError {
    pub public: CampdirInvalidParametersPublicDetails,
}

impl Display for CampdirInvalidParametersError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Invalid parameters error occurred: {:?}", self.public)
    }
}

impl std::error::Error for CampdirInvalidParametersError {}

#[derive(Debug, Builder)]
pub struct CampdirSerializationError {
    pub public: CampdirErrorPublicGenericDetails,
}

impl CampdirSerializationError {
    pub fn from_message<S: AsRef<str>>(message: S) -> CampdirSerializationError {
        let message_str = message.as_ref().to_string();
        CampdirSerializationError::new(CampdirErrorPublicGenericDetails::new(message_str))
    }
}

impl Display for CampdirSerializationError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Invalid serialization: {:?}", self.public)
    }
}

impl std::error::Error for CampdirSerializationError {}

impl From<serde_json::Error> for CampdirError {
    fn from(json_err: serde_json::Error) -> Self {
        if json_err.is_data() {
            CampdirError::DeserializeError(CampdirSerializationError::from_message(format!(
                "JSON data error: {}",
                json_err
            )))
        } else {
            CampdirError::SerializeError(CampdirSerializationError::from_message(format!(
                "JSON error: {}",
                json_err
            )))
        }
    }
}

impl From<chrono::ParseError> for CampdirError {
    fn from(parse_err: chrono::ParseError) -> Self {
        CampdirError::DeserializeError(CampdirSerializationError::from_message(format!(
            "Parse error: {}",
            parse_err
        )))
    }
}
