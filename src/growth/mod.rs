//! Growth functions and the patterns that drive them
//!
//! # Architecture
//!
//! 1. **Rules** ([`GrowthRule`]): how principal `k` grows to time `t`
//! 2. **Functions** ([`Amount`], [`Accumulation`]): wrap a rule and derive
//!    interest earned, effective rates and discount factors
//! 3. **Patterns**: compound, force, discount, tiered and loan rules
//! 4. **Solvers**: closed-form inverses for simple and compound interest
//!
//! # Example
//!
//! ```rust
//! use interest_theory::growth::{Amount, GrowthFunction};
//!
//! let amt = Amount::compound(1000.0, 0.05).unwrap();
//! let value = amt.value_at(10.0).unwrap();
//! assert!((value - 1628.89).abs() < 0.01);
//! ```

mod rule;
mod amount;
mod compound;
mod discount;
mod tiered;
mod loan;
pub mod solvers;

pub use rule::{AccumulationFn, AmountFn, GrowthRule};
pub use amount::{Accumulation, Amount, GrowthFunction};
pub use compound::{Compound, Force};
pub use discount::{CompoundDiscount, SimpleDiscount};
pub use tiered::{TieredBalance, TieredTime};
pub use loan::SimpleLoan;
pub use solvers::{
    compound_interest_solver, initial_principal_solver, simple_interest_solver,
    simple_interval_solver, Solved,
};
