//! Numeric strategy abstraction for coordinate values.
//!
//! The normalization and distance algorithms are written once against the
//! [`Scalar`] trait and instantiated for both coordinate representations:
//! fast native `f64`, and arbitrary-precision [`rust_decimal::Decimal`] for
//! callers that need exact linear arithmetic. Both representations must
//! normalize identically and agree on distances within a small relative
//! tolerance.

use std::ops::{Add, Mul, Neg, Sub};

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use thiserror::Error;

/// A textual coordinate or height literal failed to parse.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid numeric literal: '{0}'")]
pub struct FormatError(pub String);

/// Numeric strategy for coordinate arithmetic.
///
/// Only the operations the normalization and distance algorithms need:
/// construction from integers and doubles, parsing, comparison (via
/// `PartialOrd`), and the linear ops (via the std operator traits).
/// Transcendental steps always go through `to_f64` / `from_f64`; arbitrary
/// precision buys exactness only on the linear and comparison steps.
pub trait Scalar:
    Copy
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Constructs the value of a small integer constant (band boundaries,
    /// degree multiples).
    fn from_i32(value: i32) -> Self;

    /// Wraps an `f64` intermediate (used after transcendental steps).
    fn from_f64(value: f64) -> Self;

    /// Materializes an `f64` for transcendental steps and display.
    fn to_f64(self) -> f64;

    /// Parses a textual numeric literal.
    fn parse(text: &str) -> Result<Self, FormatError>;

    /// Number of whole 360-degree turns in this value, truncated toward
    /// zero. Used to reduce a raw angle into `(-360, 360)`.
    fn full_turns(self) -> Self;

    /// Absolute value.
    fn abs(self) -> Self {
        if self < Self::from_i32(0) {
            -self
        } else {
            self
        }
    }

    /// The smaller of two values.
    fn min(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }
}

impl Scalar for f64 {
    fn from_i32(value: i32) -> Self {
        f64::from(value)
    }

    fn from_f64(value: f64) -> Self {
        value
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn parse(text: &str) -> Result<Self, FormatError> {
        text.trim()
            .parse::<f64>()
            .map_err(|_| FormatError(text.to_string()))
    }

    fn full_turns(self) -> Self {
        (self / 360.0).trunc()
    }
}

impl Scalar for Decimal {
    fn from_i32(value: i32) -> Self {
        Decimal::from(value)
    }

    fn from_f64(value: f64) -> Self {
        // Non-finite doubles have no decimal form; they collapse to zero,
        // which matches the normalized origin the rest of the model uses.
        // Qualified: FromPrimitive carries a from_f64 of its own.
        <Decimal as FromPrimitive>::from_f64(value).unwrap_or_default()
    }

    fn to_f64(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or_default()
    }

    fn parse(text: &str) -> Result<Self, FormatError> {
        text.trim()
            .parse::<Decimal>()
            .map_err(|_| FormatError(text.to_string()))
    }

    fn full_turns(self) -> Self {
        (self / Decimal::from(360)).trunc()
    }
}
