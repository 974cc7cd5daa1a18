/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Synthetic order generation.

use crate::config::{ConfigError, GeneratorConfig};
use crate::orderbook::Order;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

/// Source of synthetic orders.
///
/// Implemented for any `FnMut() -> Order`, which keeps fixed or scripted
/// orders a closure away.
pub trait OrderGenerator: Send + 'static {
    /// Produces the next candidate order.
    fn next_order(&mut self) -> Order;
}

impl<F> OrderGenerator for F
where
    F: FnMut() -> Order + Send + 'static,
{
    fn next_order(&mut self) -> Order {
        self()
    }
}

/// Samples quantity and price uniformly from half-open ranges.
///
/// Defaults to quantity in `[0.1, 10.1)` and price in `[50, 1050)`.
///
/// # Examples
///
/// ```
/// use orderbook_reconciler::reconciler::{OrderGenerator, UniformOrderGenerator};
///
/// let mut generator = UniformOrderGenerator::seeded(7);
/// let order = generator.next_order();
/// assert!((0.1..10.1).contains(&order.quantity()));
/// assert!((50.0..1050.0).contains(&order.price()));
/// ```
#[derive(Debug, Clone)]
pub struct UniformOrderGenerator {
    rng: StdRng,
    quantity: Range<f64>,
    price: Range<f64>,
}

impl UniformOrderGenerator {
    /// Entropy-seeded generator with the default ranges.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy(), &GeneratorConfig::default())
    }

    /// Deterministic generator with the default ranges.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), &GeneratorConfig::default())
    }

    /// Generator using the configured ranges and optional seed.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidRange`] if either range is empty or not
    /// strictly positive.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::with_rng(rng, config))
    }

    fn with_rng(rng: StdRng, config: &GeneratorConfig) -> Self {
        Self {
            rng,
            quantity: config.quantity_range(),
            price: config.price_range(),
        }
    }
}

impl Default for UniformOrderGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderGenerator for UniformOrderGenerator {
    fn next_order(&mut self) -> Order {
        let quantity = self.rng.gen_range(self.quantity.clone());
        let price = self.rng.gen_range(self.price.clone());
        Order::new(quantity, price)
    }
}
