//! Ordered fallback chains.
//!
//! A chain holds named strategies for one job (resolving an image,
//! arranging a slide). Strategies are tried in order; the first `Ok` wins
//! and its name is logged, so a fallback never happens silently.

use crate::error::{Error, Result};

/// One way of producing `O` from `I`.
pub trait Strategy<I: ?Sized, O> {
    /// Name used in logs and in the exhaustion error.
    fn name(&self) -> &str;

    /// Try to produce a result.
    fn attempt(&self, input: &I) -> Result<O>;
}

/// A strategy backed by a closure.
pub struct FnStrategy<F> {
    name: &'static str,
    f: F,
}

impl<F> FnStrategy<F> {
    /// Wrap a closure under a name.
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<I: ?Sized, O, F> Strategy<I, O> for FnStrategy<F>
where
    F: Fn(&I) -> Result<O>,
{
    fn name(&self) -> &str {
        self.name
    }

    fn attempt(&self, input: &I) -> Result<O> {
        (self.f)(input)
    }
}

/// The outcome of a successful chain run.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<O> {
    /// Produced value
    pub value: O,
    /// Name of the strategy that produced it
    pub strategy: String,
    /// Zero-based position of that strategy in the chain
    pub index: usize,
}

/// Strategies tried in insertion order.
pub struct StrategyChain<'a, I: ?Sized, O> {
    subject: String,
    strategies: Vec<Box<dyn Strategy<I, O> + 'a>>,
}

impl<'a, I: ?Sized, O> StrategyChain<'a, I, O> {
    /// Create an empty chain for a subject (e.g. "image rId7").
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            strategies: Vec::new(),
        }
    }

    /// Append a strategy and return self.
    pub fn with<S>(mut self, strategy: S) -> Self
    where
        S: Strategy<I, O> + 'a,
    {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Append a closure strategy and return self.
    pub fn with_fn<F>(self, name: &'static str, f: F) -> Self
    where
        F: Fn(&I) -> Result<O> + 'a,
        I: 'a,
        O: 'a,
    {
        self.with(FnStrategy::new(name, f))
    }

    /// Number of strategies.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Check if the chain has no strategies.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Run the chain, returning the first success.
    ///
    /// Fails with [`Error::StrategyExhausted`] when every strategy failed
    /// or the chain is empty.
    pub fn run(&self, input: &I) -> Result<Resolved<O>> {
        let mut failures = Vec::new();

        for (index, strategy) in self.strategies.iter().enumerate() {
            match strategy.attempt(input) {
                Ok(value) => {
                    log::debug!(
                        "{}: strategy '{}' succeeded after {} failure(s)",
                        self.subject,
                        strategy.name(),
                        failures.len()
                    );
                    return Ok(Resolved {
                        value,
                        strategy: strategy.name().to_string(),
                        index,
                    });
                }
                Err(e) => {
                    log::trace!("{}: strategy '{}' failed: {}", self.subject, strategy.name(), e);
                    failures.push(format!("{} ({})", strategy.name(), e));
                }
            }
        }

        let attempts = if failures.is_empty() {
            "no strategies registered".to_string()
        } else {
            failures.join("; ")
        };
        log::debug!("{}: all strategies failed", self.subject);
        Err(Error::StrategyExhausted {
            subject: self.subject.clone(),
            attempts,
        })
    }
}
