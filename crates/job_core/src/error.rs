use thiserror::Error;

pub const FETCH_FAILED_MESSAGE: &str = "Could not fetch jobs. Please check the API response.";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    NetworkError(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read saved jobs: {0}")]
    Read(String),

    #[error("failed to write saved jobs: {0}")]
    Write(String),
}

/// Application form rule violations, declared in checking order.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your full name.")]
    NameEmpty,

    #[error("Name must be at least 2 characters long.")]
    NameTooShort,

    #[error("Name should not contain numbers.")]
    NameContainsDigit,

    #[error("Please enter your email address.")]
    EmailEmpty,

    #[error("Please enter a valid email address (e.g., example@email.com).")]
    EmailInvalid,

    #[error("Please enter your contact number.")]
    PhoneEmpty,

    #[error("Please enter a valid phone number (minimum 10 digits).")]
    PhoneInvalid,

    #[error("Please explain why we should hire you.")]
    JustificationEmpty,

    #[error("Your answer must be at least 20 characters long.")]
    JustificationTooShort,

    #[error("Your answer must not exceed 500 characters.")]
    JustificationTooLong,

    #[error("Please provide a more detailed answer (at least 5 words).")]
    JustificationTooFewWords,
}

impl ValidationError {
    pub fn field(self) -> &'static str {
        match self {
            Self::NameEmpty | Self::NameTooShort | Self::NameContainsDigit => "name",
            Self::EmailEmpty | Self::EmailInvalid => "email",
            Self::PhoneEmpty | Self::PhoneInvalid => "phone",
            Self::JustificationEmpty
            | Self::JustificationTooShort
            | Self::JustificationTooLong
            | Self::JustificationTooFewWords => "justification",
        }
    }
}
