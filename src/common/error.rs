use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    /// Payload exceeds the capacity of version 40 for its mode and EC level
    #[error("Data too long")]
    DataTooLong,

    /// Payload does not fit the version requested by the caller
    #[error("Capacity overflow")]
    CapacityOverflow,

    #[error("Invalid version")]
    InvalidVersion,

    #[error("Invalid error correction level")]
    InvalidECLevel,

    #[error("Invalid masking pattern")]
    InvalidMaskingPattern,
}

pub type QRResult<T> = Result<T, QRError>;
