//! Observation Module
//! A single (date-label, quantity) pair and the boundary parsing that admits it.

use std::fmt;
use thiserror::Error;

/// Reasons a submitted entry is refused before it reaches the store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("date must not be empty")]
    EmptyDate,
    #[error("'{0}' is not a number")]
    InvalidQuantity(String),
    #[error("quantity must be finite, got {0}")]
    NonFiniteQuantity(f64),
}

/// Stable per-session identifier handed out by the store on append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservationId(pub(crate) u64);

impl fmt::Display for ObservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One recorded consumption value.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub id: ObservationId,
    pub date: String,
    pub consumption: f64,
}

/// A validated entry that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewObservation {
    pub date: String,
    pub consumption: f64,
}

impl NewObservation {
    /// Validate raw form input.
    ///
    /// The date is an opaque label, kept exactly as typed and only checked
    /// for emptiness after trimming. The quantity must parse as a finite `f64`.
    pub fn parse(date: &str, quantity: &str) -> Result<Self, InputError> {
        if date.trim().is_empty() {
            return Err(InputError::EmptyDate);
        }

        let quantity = quantity.trim();
        let consumption: f64 = quantity
            .parse()
            .map_err(|_| InputError::InvalidQuantity(quantity.to_string()))?;
        Self::new(date, consumption)
    }

    pub fn new(date: impl Into<String>, consumption: f64) -> Result<Self, InputError> {
        let date = date.into();
        if date.trim().is_empty() {
            return Err(InputError::EmptyDate);
        }
        if !consumption.is_finite() {
            return Err(InputError::NonFiniteQuantity(consumption));
        }
        Ok(Self { date, consumption })
    }
}
