//! Unit newtypes for distribution network quantities.
//!
//! Network design mixes three kinds of numbers that must never be added
//! together: lane lengths (km), money, and product volume (units shipped or
//! demanded). Each gets its own `#[repr(transparent)]` wrapper so that, for
//! example, a distance cannot be summed into a cost by accident.
//!
//! # Usage
//!
//! ```
//! use depot_core::units::{Currency, Kilometers, Quantity};
//!
//! let lane = Kilometers(1_100.0);
//! let per_unit = lane.priced_at(0.046);
//! assert!((per_unit.value() - 50.6).abs() < 1e-9);
//!
//! let demand = Quantity(3_000.0);
//! let shipped: Quantity = [demand, Quantity(500.0)].into_iter().sum();
//! assert_eq!(shipped, Quantity(3_500.0));
//!
//! let total = per_unit * demand.value() + Currency(10.0);
//! assert!(total.value() > 0.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// Implements the arithmetic shared by every unit type
macro_rules! impl_unit_ops {
    ($type:ty, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl AddAssign for $type {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Mul<$type> for f64 {
            type Output = $type;
            fn mul(self, rhs: $type) -> Self::Output {
                <$type>::new(self * rhs.0)
            }
        }

        impl Div<$type> for $type {
            type Output = f64;
            fn div(self, rhs: $type) -> Self::Output {
                self.0 / rhs.0
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:.2} {}", self.0, $unit_name)
            }
        }

        impl $type {
            /// Create a new value
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Get the raw numeric value
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            /// Check if value is finite
            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            /// Strictly positive and finite
            #[inline]
            pub fn is_positive(self) -> bool {
                self.0.is_finite() && self.0 > 0.0
            }

            /// Non-negative and finite
            #[inline]
            pub fn is_non_negative(self) -> bool {
                self.0.is_finite() && self.0 >= 0.0
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|x| x.0).sum())
            }
        }

        impl<'a> std::iter::Sum<&'a $type> for $type {
            fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
                Self(iter.map(|x| x.0).sum())
            }
        }
    };
}

/// Lane length in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Kilometers(pub f64);

impl_unit_ops!(Kilometers, "km");

/// Money in the instance currency (the reference data uses CAD).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Currency(pub f64);

impl_unit_ops!(Currency, "$");

/// Product volume: store demand or units shipped along a lane.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Quantity(pub f64);

impl_unit_ops!(Quantity, "units");

impl Kilometers {
    /// Per-unit lane cost for a transport mode priced per kilometre.
    #[inline]
    pub fn priced_at(self, unit_cost_per_km: f64) -> Currency {
        Currency(self.0 * unit_cost_per_km)
    }
}

impl Currency {
    /// Relative difference against another amount, guarded near zero.
    pub fn relative_gap(self, other: Currency) -> f64 {
        let scale = self.0.abs().max(other.0.abs()).max(1.0);
        (self.0 - other.0).abs() / scale
    }
}
