//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// Registry and session violations (`UnknownCustomer`, `UnknownAccount`,
/// `InvalidAmount`, `InsufficientFunds`) end a session. A bad card/PIN pair is
/// not an error at all during a session; `AuthenticationFailed` only appears
/// when a caller opts into strict handling.
#[derive(Error, Debug)]
pub enum Error {
    #[error("User does not exist in the system: {0}")]
    UnknownCustomer(String),

    #[error("User verification failed")]
    AuthenticationFailed,

    #[error("Bad account number was entered: {0}")]
    UnknownAccount(String),

    #[error("Amount must be at least 1, got {0}")]
    InvalidAmount(i64),

    #[error("Your account balance ({balance}) is lower than the requested withdrawal ({requested})")]
    InsufficientFunds { balance: u64, requested: u64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Operator input ended before the session finished")]
    InputClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Process exit status for this error kind
    ///
    /// Every fatal session condition gets its own status so scripts driving
    /// the terminal can tell them apart.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::UnknownCustomer(_) => 2,
            Error::UnknownAccount(_) => 3,
            Error::InvalidAmount(_) => 4,
            Error::InsufficientFunds { .. } => 5,
            Error::InvalidInput(_) => 6,
            Error::InputClosed => 7,
            Error::AuthenticationFailed => 8,
            _ => 1,
        }
    }

    /// Short machine-friendly name, used as the event log error message
    pub fn kind(&self) -> &'static str {
        match self {
            Error::UnknownCustomer(_) => "unknown_customer",
            Error::AuthenticationFailed => "authentication_failed",
            Error::UnknownAccount(_) => "unknown_account",
            Error::InvalidAmount(_) => "invalid_amount",
            Error::InsufficientFunds { .. } => "insufficient_funds",
            Error::InvalidInput(_) => "invalid_input",
            Error::InputClosed => "input_closed",
            Error::Io(_) => "io",
            Error::Other(_) => "other",
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_for_fatal_kinds() {
        let errors = [
            Error::UnknownCustomer("c1".into()),
            Error::UnknownAccount("a1".into()),
            Error::InvalidAmount(0),
            Error::InsufficientFunds { balance: 1, requested: 2 },
            Error::invalid_input("bad"),
            Error::InputClosed,
            Error::AuthenticationFailed,
        ];
        let mut codes: Vec<u8> = errors.iter().map(Error::exit_code).collect();
        assert!(codes.iter().all(|c| *c > 1));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_generic_errors_exit_with_one() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        assert_eq!(Error::from(io).exit_code(), 1);
        assert_eq!(Error::Other("boom".into()).exit_code(), 1);
    }

    #[test]
    fn test_error_messages() {
        let err = Error::InsufficientFunds { balance: 15, requested: 20 };
        assert!(err.to_string().contains("lower than the requested withdrawal"));
        assert_eq!(err.kind(), "insufficient_funds");

        let err = Error::UnknownCustomer("deadbeef".into());
        assert!(err.to_string().contains("does not exist"));
    }
}
