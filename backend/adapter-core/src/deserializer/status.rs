use crate::deserializer::Deserializer;

use serde_json::Value;

/// Value a status code must equal for the response to count as a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessSentinel {
    Code(i64),
    Text(&'static str),
}

impl SuccessSentinel {
    pub fn matches(&self, code: &Value) -> bool {
        match self {
            SuccessSentinel::Code(expected) => code.as_i64() == Some(*expected),
            SuccessSentinel::Text(expected) => code.as_str() == Some(*expected),
        }
    }
}

/// Where a service nests its status inside the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLayout {
    pub container: &'static str,
    pub code: &'static str,
    pub message: &'static str,
    pub success: SuccessSentinel,
}

/// Success/failure classification from a status nested in the body.
///
/// `is_success` and `is_failed` are always opposite. A body with no status
/// at all is failed.
pub trait StatusDeserializer: Deserializer {
    const STATUS: StatusLayout;

    /// The nested code, exactly as the service sent it.
    fn status_code(&self) -> Option<&Value> {
        self.field(&[Self::STATUS.container, Self::STATUS.code])
    }

    fn status_message(&self) -> Option<&str> {
        self.str_field(&[Self::STATUS.container, Self::STATUS.message])
    }

    fn is_success(&self) -> bool {
        self.status_code()
            .is_some_and(|code| Self::STATUS.success.matches(code))
    }

    fn is_failed(&self) -> bool {
        !self.is_success()
    }
}
