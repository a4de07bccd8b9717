//! Option instrument definitions.
//!
//! # Types
//!
//! - [`OptionKind`]: Call or put, with the terminal payoff
//! - [`Side`]: Long or short; short negates value and every Greek
//! - [`Position`]: A validated, immutable option leg
//! - [`PositionSpec`]: The unresolved boundary form of a position
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{OptionKind, PositionSpec, Side};
//!
//! let spec = PositionSpec {
//!     option_type: Some("call".into()),
//!     side: Some("short".into()),
//!     quantity: Some(1),
//!     strike: Some(100.0),
//!     time_to_expiry: Some(1.0),
//!     volatility: Some(0.25),
//! };
//!
//! let pos = spec.resolve(None).unwrap();
//! assert_eq!(pos.kind(), OptionKind::Call);
//! assert_eq!(pos.side(), Side::Short);
//! ```

mod option_kind;
mod position;

pub use option_kind::{OptionKind, Side};
pub use position::{Position, PositionSpec};
