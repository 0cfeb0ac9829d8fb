use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Reader underflow: wanted {wanted} bytes, {remaining} remaining")]
pub struct UnderflowError {
    pub wanted: usize,
    pub remaining: usize,
}

/// Structural decode failure. Every variant is the lower-level cause of a rejected byte stream;
/// no partially decoded value is ever returned alongside it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedRlp {
    #[error("RLP wrong encoding: {0}")]
    Underflow(#[from] UnderflowError),

    #[error("RLP length mismatch: declared {declared}, remaining {remaining}")]
    LengthMismatch { declared: usize, remaining: usize },

    #[error("RLP too many bytes to decode")]
    LengthOverflow,

    #[error("RLP non-canonical encoding: {0}")]
    NonCanonical(&'static str),

    #[error("RLP nesting is too deep")]
    DepthExceeded,

    #[error("RLP: empty slice")]
    EmptyInput,

    #[error("Spurious bytes found in byte stream after obj parsing: {0} bytes")]
    TrailingBytes(usize),

    #[error("RLP: list expected")]
    ExpectedList,

    #[error("RLP: byte string expected")]
    ExpectedString,

    #[error("RlpIncorrectListLen: expected {expected}, found {found}")]
    FieldCount { expected: &'static str, found: usize },

    #[error("Value of {0} has leading zero in rlp encoding")]
    LeadingZero(&'static str),

    #[error("Value of {0} does not fit its integer type")]
    IntegerOverflow(&'static str),

    #[error("Access list is not supported")]
    UnsupportedAccessList,

    #[error("RLP: invalid tx type {0}")]
    UnknownTxType(u8),

    #[error("Invalid hex input: {0}")]
    InvalidHex(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("signature is missing or partial")]
    MissingSignature,

    #[error("must be positive")]
    NotPositive,

    #[error("contract creation without init code")]
    EmptyInitCode,

    #[error("intrinsic gas too low: have {have}, want {want}")]
    BelowIntrinsicGas { have: u64, want: u64 },

    #[error("exceeds max fee per gas")]
    ExceedsMaxFee,

    #[error("invalid length {len}")]
    InvalidLength { len: usize },

    #[error("out of range")]
    OutOfRange,

    #[error("non-canonical value {0}")]
    NonCanonicalV(u64),

    #[error("expected {expected}, found {found}")]
    ChainIdMismatch { expected: u64, found: u64 },
}

/// A structurally well-formed transaction that must not be accepted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Transaction semantic validity error on {field}: {violation}")]
pub struct SemanticValidityError {
    pub field: &'static str,
    pub violation: Violation,
}

impl SemanticValidityError {
    pub fn new(field: &'static str, violation: Violation) -> Self {
        Self { field, violation }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    #[error("Invalid Ethereum transaction signature: {0}")]
    InvalidEthereumSignature(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Calculation overflow")]
    CalculationOverflow,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Malformed RLP: {0}")]
    MalformedRlp(#[from] MalformedRlp),

    #[error(transparent)]
    SemanticValidity(#[from] SemanticValidityError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("Transaction is not signed")]
    Unsigned,
}

impl From<UnderflowError> for CodecError {
    fn from(e: UnderflowError) -> Self {
        CodecError::MalformedRlp(e.into())
    }
}
