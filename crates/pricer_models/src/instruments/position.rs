//! Option positions and their boundary representation.
//!
//! A [`PositionSpec`] is what arrives from a request or a portfolio file:
//! every field optional, kinds and sides still strings. Resolving it
//! against a volatility fallback yields a validated, immutable
//! [`Position`].

use pricer_core::types::validate::require_positive;
use pricer_core::types::InputError;

use super::option_kind::{OptionKind, Side};

/// One validated option leg.
///
/// Quantity is a positive contract count; the sign is carried by
/// [`Side`].
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionKind, Position, Side};
///
/// let pos = Position::new(OptionKind::Call, Side::Short, 2, 100.0, 0.5, 0.25).unwrap();
/// assert_eq!(pos.signed_quantity(), -2.0);
///
/// assert!(Position::new(OptionKind::Call, Side::Long, 0, 100.0, 0.5, 0.25).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    kind: OptionKind,
    side: Side,
    quantity: u64,
    strike: f64,
    time_to_expiry: f64,
    volatility: f64,
}

impl Position {
    /// Creates a validated position.
    ///
    /// # Errors
    /// - `InputError::InvalidCount` if quantity is zero
    /// - `InputError::NonPositive` / `NonFinite` for strike, expiry or volatility
    pub fn new(
        kind: OptionKind,
        side: Side,
        quantity: u64,
        strike: f64,
        time_to_expiry: f64,
        volatility: f64,
    ) -> Result<Self, InputError> {
        if quantity == 0 {
            return Err(InputError::InvalidCount {
                field: "quantity",
                value: 0,
            });
        }
        Ok(Self {
            kind,
            side,
            quantity,
            strike: require_positive("strike", strike)?,
            time_to_expiry: require_positive("time_to_expiry", time_to_expiry)?,
            volatility: require_positive("volatility", volatility)?,
        })
    }

    /// Call or put.
    #[inline]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Long or short.
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Number of contracts.
    #[inline]
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to expiry in years.
    #[inline]
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    /// Annualised volatility used to price this position.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Quantity with the side's sign applied.
    #[inline]
    pub fn signed_quantity(&self) -> f64 {
        self.side.sign::<f64>() * self.quantity as f64
    }

    /// The same position on the given side.
    pub fn with_side(&self, side: Side) -> Self {
        Self { side, ..*self }
    }
}

/// Unresolved position as received at the boundary.
///
/// Field names follow the request schema: `type`, `side`, `quantity`,
/// `strike`, `time_to_expiry`, `volatility`. Missing values deserialize
/// as `None` and are reported by [`PositionSpec::resolve`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PositionSpec {
    /// `"call"` or `"put"`
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub option_type: Option<String>,
    /// `"long"` or `"short"`
    pub side: Option<String>,
    /// Number of contracts
    pub quantity: Option<i64>,
    /// Strike price
    pub strike: Option<f64>,
    /// Time to expiry in years
    pub time_to_expiry: Option<f64>,
    /// Annualised volatility, filled from a provider when absent
    pub volatility: Option<f64>,
}

impl PositionSpec {
    /// Resolves into a validated [`Position`].
    ///
    /// An explicit `volatility` always wins; `fallback_volatility` is used
    /// only when the field is absent.
    ///
    /// # Errors
    /// - `InputError::MissingField` naming the first absent required field
    /// - `InputError::UnknownVariant` for an unrecognised type or side
    /// - `InputError::InvalidCount` / `NonPositive` for a quantity below one
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::PositionSpec;
    ///
    /// let spec = PositionSpec {
    ///     option_type: Some("put".into()),
    ///     side: Some("long".into()),
    ///     quantity: Some(3),
    ///     strike: Some(95.0),
    ///     time_to_expiry: Some(0.25),
    ///     volatility: None,
    /// };
    ///
    /// let pos = spec.resolve(Some(0.3)).unwrap();
    /// assert_eq!(pos.volatility(), 0.3);
    ///
    /// let err = spec.resolve(None).unwrap_err();
    /// assert_eq!(err.field(), Some("volatility"));
    /// ```
    pub fn resolve(&self, fallback_volatility: Option<f64>) -> Result<Position, InputError> {
        let kind: OptionKind = required("type", self.option_type.as_deref())?.parse()?;
        let side: Side = required("side", self.side.as_deref())?.parse()?;

        let quantity = required("quantity", self.quantity)?;
        if quantity < 1 {
            return Err(InputError::InvalidCount {
                field: "quantity",
                value: quantity,
            });
        }

        let strike = required("strike", self.strike)?;
        let time_to_expiry = required("time_to_expiry", self.time_to_expiry)?;
        let volatility = required("volatility", self.volatility.or(fallback_volatility))?;

        Position::new(
            kind,
            side,
            quantity as u64,
            strike,
            time_to_expiry,
            volatility,
        )
    }

    /// Whether the position carries its own volatility.
    pub fn has_volatility(&self) -> bool {
        self.volatility.is_some()
    }
}

impl From<&Position> for PositionSpec {
    fn from(pos: &Position) -> Self {
        Self {
            option_type: Some(pos.kind.to_string()),
            side: Some(pos.side.to_string()),
            quantity: Some(pos.quantity as i64),
            strike: Some(pos.strike),
            time_to_expiry: Some(pos.time_to_expiry),
            volatility: Some(pos.volatility),
        }
    }
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, InputError> {
    value.ok_or(InputError::MissingField { field })
}
