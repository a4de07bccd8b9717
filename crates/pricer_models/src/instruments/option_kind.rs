//! Option kind and position side.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;
use pricer_core::types::InputError;

/// Type of a European vanilla option.
///
/// # Variants
/// - `Call`: max(S - K, 0) at expiry
/// - `Put`: max(K - S, 0) at expiry
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionKind;
///
/// let kind: OptionKind = " CALL ".parse().unwrap();
/// assert_eq!(kind, OptionKind::Call);
/// assert_eq!(kind.payoff(110.0_f64, 100.0), 10.0);
///
/// assert!("straddle".parse::<OptionKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionKind {
    /// Call option: max(S - K, 0)
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl OptionKind {
    /// Intrinsic value at expiry for terminal price `spot`.
    #[inline]
    pub fn payoff<T: Float>(&self, spot: T, strike: T) -> T {
        match self {
            OptionKind::Call => (spot - strike).max(T::zero()),
            OptionKind::Put => (strike - spot).max(T::zero()),
        }
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionKind::Call)
    }

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKind::Call => "call",
            OptionKind::Put => "put",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for OptionKind {
    type Err = InputError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(OptionKind::Call),
            "put" => Ok(OptionKind::Put),
            _ => Err(InputError::UnknownVariant {
                field: "type",
                value: s.to_string(),
            }),
        }
    }
}

/// Direction of a position.
///
/// A short position is the exact negation of the equivalent long position,
/// in value and in every Greek.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// Holder of the option
    Long,
    /// Writer of the option
    Short,
}

impl Side {
    /// `+1` for long, `-1` for short.
    #[inline]
    pub fn sign<T: Float>(&self) -> T {
        match self {
            Side::Long => T::one(),
            Side::Short => -T::one(),
        }
    }

    /// The other side.
    #[inline]
    pub fn flipped(&self) -> Self {
        match self {
            Side::Long => Side::Short,
            Side::Short => Side::Long,
        }
    }

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Long => "long",
            Side::Short => "short",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Side {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" => Ok(Side::Long),
            "short" => Ok(Side::Short),
            _ => Err(InputError::UnknownVariant {
                field: "side",
                value: s.to_string(),
            }),
        }
    }
}
