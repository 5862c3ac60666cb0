//! Structured error types shared across ORF crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`OrfError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (lengths, offending values, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for overlap reduction computations.
///
/// Every input problem maps to exactly one variant. None of them are
/// transient; callers should fix the input rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", content = "detail")]
pub enum OrfError {
    /// The requested number of frequency bins is zero.
    #[error("zero length: {0}")]
    ZeroLength(ErrorInfo),
    /// The frequency spacing is zero, negative or not a number.
    #[error("non-positive frequency spacing: {0}")]
    NonPositiveSpacing(ErrorInfo),
    /// The start frequency is negative or not a number.
    #[error("negative start frequency: {0}")]
    NegativeStartFrequency(ErrorInfo),
    /// Caller supplied output storage does not match the requested length.
    #[error("length mismatch: {0}")]
    LengthMismatch(ErrorInfo),
    /// A detector response tensor is not symmetric.
    #[error("asymmetric response tensor: {0}")]
    AsymmetricTensor(ErrorInfo),
    /// A detector location, the separation or a derived quantity is not finite.
    #[error("non-finite input: {0}")]
    NonFiniteInput(ErrorInfo),
    /// A required input (detector, sampling parameters, site) is absent or unknown.
    #[error("invalid reference: {0}")]
    InvalidReference(ErrorInfo),
    /// Job configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl OrfError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            OrfError::ZeroLength(info)
            | OrfError::NonPositiveSpacing(info)
            | OrfError::NegativeStartFrequency(info)
            | OrfError::LengthMismatch(info)
            | OrfError::AsymmetricTensor(info)
            | OrfError::NonFiniteInput(info)
            | OrfError::InvalidReference(info)
            | OrfError::Config(info)
            | OrfError::Serde(info) => info,
        }
    }

    /// Short, stable name of the error family.
    pub fn kind(&self) -> &'static str {
        match self {
            OrfError::ZeroLength(_) => "zero-length",
            OrfError::NonPositiveSpacing(_) => "non-positive-spacing",
            OrfError::NegativeStartFrequency(_) => "negative-start-frequency",
            OrfError::LengthMismatch(_) => "length-mismatch",
            OrfError::AsymmetricTensor(_) => "asymmetric-tensor",
            OrfError::NonFiniteInput(_) => "non-finite-input",
            OrfError::InvalidReference(_) => "invalid-reference",
            OrfError::Config(_) => "config",
            OrfError::Serde(_) => "serde",
        }
    }
}
