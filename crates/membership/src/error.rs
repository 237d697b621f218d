use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MembershipError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS]")]
    InvalidDate(String),

    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(String),
}

pub type Result<T> = std::result::Result<T, MembershipError>;
