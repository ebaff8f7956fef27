//! `Instrument` and `PricingEngine` traits.
//!
//! Instruments hold their terms and market-data handles and compute results
//! on demand; an engine turns an immutable argument snapshot into
//! [`PricingResults`].

use std::collections::HashMap;
use vk_core::{Real, Result};
use vk_time::Date;

/// Results of pricing an instrument.
///
/// Contains the value and optionally additional named results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingResults {
    /// Present value.
    pub value: Real,
    /// Additional named results.
    pub additional_results: HashMap<String, Real>,
}

impl PricingResults {
    /// Create pricing results with just a value.
    pub fn from_value(value: Real) -> Self {
        Self {
            value,
            additional_results: HashMap::new(),
        }
    }

    /// Add a named result.
    pub fn with_result(mut self, key: impl Into<String>, value: Real) -> Self {
        self.additional_results.insert(key.into(), value);
        self
    }
}

/// A pricing engine for instruments described by `Args`.
///
/// `calculate` is a pure function of the arguments and the engine's own
/// state; it either returns a complete result or fails.
pub trait PricingEngine<Args>: std::fmt::Debug + Send + Sync {
    /// Price the instrument described by `args`.
    fn calculate(&self, args: &Args) -> Result<PricingResults>;
}

/// Base trait for all financial instruments.
pub trait Instrument: std::fmt::Debug + Send + Sync {
    /// Whether the instrument is expired (past maturity).
    fn is_expired(&self) -> bool;

    /// The maturity or last relevant date.
    fn maturity_date(&self) -> Option<Date> {
        None
    }
}
