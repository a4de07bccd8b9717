//! Black-Scholes pricing model for European options.
//!
//! This module provides the Black-Scholes model for pricing European
//! call and put options with analytical Greeks calculations.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Units
//!
//! - Vega is per unit of volatility (multiply by 0.01 for one vol point)
//! - Theta is per year (divide by 365 for calendar-day decay)

use std::ops::{Add, AddAssign};

use num_traits::Float;

use super::distributions::{lit, norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::OptionKind;

/// First- and second-order sensitivities of an option value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks<T> {
    /// ∂V/∂S
    pub delta: T,
    /// ∂²V/∂S²
    pub gamma: T,
    /// ∂V/∂σ, per unit volatility
    pub vega: T,
    /// ∂V/∂t, per year
    pub theta: T,
    /// ∂V/∂r
    pub rho: T,
}

impl<T: Float> Greeks<T> {
    /// All sensitivities zero.
    pub fn zero() -> Self {
        Self {
            delta: T::zero(),
            gamma: T::zero(),
            vega: T::zero(),
            theta: T::zero(),
            rho: T::zero(),
        }
    }

    /// Multiplies every sensitivity by `factor`.
    pub fn scaled(&self, factor: T) -> Self {
        Self {
            delta: self.delta * factor,
            gamma: self.gamma * factor,
            vega: self.vega * factor,
            theta: self.theta * factor,
            rho: self.rho * factor,
        }
    }
}

impl<T: Float> Default for Greeks<T> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Float> Add for Greeks<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            delta: self.delta + rhs.delta,
            gamma: self.gamma + rhs.gamma,
            vega: self.vega + rhs.vega,
            theta: self.theta + rhs.theta,
            rho: self.rho + rhs.rho,
        }
    }
}

impl<T: Float> AddAssign for Greeks<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Price together with its Greeks.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Valuation<T> {
    /// Option value
    pub price: T,
    /// Sensitivities of the value
    pub greeks: Greeks<T>,
}

impl<T: Float> Valuation<T> {
    /// Multiplies the price and every sensitivity by `factor`.
    pub fn scaled(&self, factor: T) -> Self {
        Self {
            price: self.price * factor,
            greeks: self.greeks.scaled(factor),
        }
    }
}

/// Black-Scholes model for European option pricing.
///
/// Holds the market-side inputs (spot, rate, volatility); strike and
/// expiry are supplied per option.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
/// use pricer_models::instruments::OptionKind;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call = bs.price(OptionKind::Call, 100.0, 1.0).unwrap();
/// let put = bs.price(OptionKind::Put, 100.0, 1.0).unwrap();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised, may be negative)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0 or not finite
    /// - `AnalyticalError::InvalidRate` if rate is not finite
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0 or not finite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        if !is_positive(spot) {
            return Err(AnalyticalError::InvalidSpot {
                spot: as_f64(spot),
            });
        }

        if !rate.is_finite() {
            return Err(AnalyticalError::InvalidRate { rate: as_f64(rate) });
        }

        if !is_positive(volatility) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: as_f64(volatility),
            });
        }

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Validates the option-side inputs.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidStrike` if strike <= 0 or not finite
    /// - `AnalyticalError::InvalidMaturity` if expiry <= 0 or not finite
    pub fn check_contract(&self, strike: T, expiry: T) -> Result<(), AnalyticalError> {
        if !is_positive(strike) {
            return Err(AnalyticalError::InvalidStrike {
                strike: as_f64(strike),
            });
        }
        if !is_positive(expiry) {
            return Err(AnalyticalError::InvalidMaturity {
                maturity: as_f64(expiry),
            });
        }
        Ok(())
    }

    /// Computes the d1 term of the Black-Scholes formula.
    ///
    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    ///
    /// Strike and expiry are assumed valid; see [`Self::check_contract`].
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let drift = (self.rate + lit::<T>(0.5) * self.volatility * self.volatility) * expiry;
        ((self.spot / strike).ln() + drift) / (self.volatility * expiry.sqrt())
    }

    /// Computes the d2 term of the Black-Scholes formula.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// European call price, C = S·N(d₁) - K·e^(-rT)·N(d₂).
    ///
    /// Strike and expiry are assumed valid.
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        let discount = (-self.rate * expiry).exp();
        self.spot * norm_cdf(self.d1(strike, expiry))
            - strike * discount * norm_cdf(self.d2(strike, expiry))
    }

    /// European put price, P = K·e^(-rT)·N(-d₂) - S·N(-d₁).
    ///
    /// Strike and expiry are assumed valid.
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        let discount = (-self.rate * expiry).exp();
        strike * discount * norm_cdf(-self.d2(strike, expiry))
            - self.spot * norm_cdf(-self.d1(strike, expiry))
    }

    /// Checked price for either option kind.
    ///
    /// # Errors
    /// Returns `AnalyticalError` if strike or expiry is not positive.
    pub fn price(&self, kind: OptionKind, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        self.check_contract(strike, expiry)?;
        Ok(match kind {
            OptionKind::Call => self.price_call(strike, expiry),
            OptionKind::Put => self.price_put(strike, expiry),
        })
    }

    /// Checked Greeks for either option kind.
    ///
    /// # Errors
    /// Returns `AnalyticalError` if strike or expiry is not positive.
    pub fn greeks(
        &self,
        kind: OptionKind,
        strike: T,
        expiry: T,
    ) -> Result<Greeks<T>, AnalyticalError> {
        self.valuation(kind, strike, expiry).map(|v| v.greeks)
    }

    /// Checked price and Greeks, sharing d₁, d₂ and the discount factor.
    ///
    /// - Delta: N(d₁) for calls, N(d₁) - 1 for puts
    /// - Gamma: φ(d₁) / (S·σ·√T)
    /// - Vega: S·φ(d₁)·√T
    /// - Theta: -(S·φ(d₁)·σ)/(2√T) ∓ r·K·e^(-rT)·N(±d₂)
    /// - Rho: ±K·T·e^(-rT)·N(±d₂)
    ///
    /// # Errors
    /// Returns `AnalyticalError` if strike or expiry is not positive.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::OptionKind;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.03, 0.25).unwrap();
    /// let v = bs.valuation(OptionKind::Call, 100.0, 1.0).unwrap();
    /// assert!((v.price - 11.3485).abs() < 1e-3);
    /// assert!((v.greeks.delta - 0.5968).abs() < 1e-3);
    /// ```
    pub fn valuation(
        &self,
        kind: OptionKind,
        strike: T,
        expiry: T,
    ) -> Result<Valuation<T>, AnalyticalError> {
        self.check_contract(strike, expiry)?;

        let sqrt_t = expiry.sqrt();
        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.volatility * sqrt_t;
        let discounted_strike = strike * (-self.rate * expiry).exp();
        let pdf_d1 = norm_pdf(d1);

        let gamma = pdf_d1 / (self.spot * self.volatility * sqrt_t);
        let vega = self.spot * pdf_d1 * sqrt_t;
        // Time decay shared by calls and puts
        let decay = -(self.spot * pdf_d1 * self.volatility) / (lit::<T>(2.0) * sqrt_t);

        let (price, delta, theta, rho) = match kind {
            OptionKind::Call => {
                let n_d1 = norm_cdf(d1);
                let n_d2 = norm_cdf(d2);
                (
                    self.spot * n_d1 - discounted_strike * n_d2,
                    n_d1,
                    decay - self.rate * discounted_strike * n_d2,
                    discounted_strike * expiry * n_d2,
                )
            }
            OptionKind::Put => {
                let n_minus_d2 = norm_cdf(-d2);
                (
                    discounted_strike * n_minus_d2 - self.spot * norm_cdf(-d1),
                    norm_cdf(d1) - T::one(),
                    decay + self.rate * discounted_strike * n_minus_d2,
                    -discounted_strike * expiry * n_minus_d2,
                )
            }
        };

        Ok(Valuation {
            price,
            greeks: Greeks {
                delta,
                gamma,
                vega,
                theta,
                rho,
            },
        })
    }
}

#[inline]
fn is_positive<T: Float>(value: T) -> bool {
    value.is_finite() && value > T::zero()
}

#[inline]
fn as_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
