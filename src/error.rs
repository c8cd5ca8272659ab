//! Typed per-unit generation errors and batch error aggregation.

use color_eyre::eyre::{Report, eyre};
use thiserror::Error;

/// A single generation unit's failure, tagged with enough context to be
/// actionable on its own.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// A readme's entire fan-out failed. No partial namespace results from
    /// a failed readme are ever surfaced.
    #[error("failed to generate from readme '{readme}': {message}")]
    Readme { readme: String, message: String },

    /// A single RP/namespace target failed.
    #[error("failed to generate {rp}/{namespace}: {message}")]
    Namespace {
        rp: String,
        namespace: String,
        message: String,
    },
}

/// Accumulates independent per-unit failures into one combined error.
///
/// Batch workflows record every unit failure here and keep going; the
/// combined error is surfaced only after the whole batch has been
/// attempted. An empty builder yields no error at all.
#[derive(Debug, Default)]
pub struct ErrorBuilder {
    messages: Vec<String>,
}

impl ErrorBuilder {
    /// Record any number of unit errors, preserving insertion order.
    pub fn add<I, E>(&mut self, errs: I)
    where
        I: IntoIterator<Item = E>,
        E: std::fmt::Display,
    {
        for err in errs {
            self.messages.push(err.to_string());
        }
    }

    /// Record a single unit error.
    pub fn add_one(&mut self, err: impl std::fmt::Display) {
        self.messages.push(err.to_string());
    }

    /// Number of errors recorded so far.
    pub fn count(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Combine everything recorded into one error, or `None` when the
    /// batch finished clean.
    pub fn build(self) -> Option<Report> {
        if self.messages.is_empty() {
            return None;
        }

        Some(eyre!(
            "total {} error(s): \n{}",
            self.messages.len(),
            self.messages.join("\n")
        ))
    }

    /// Convenience form of [`ErrorBuilder::build`] for workflow tails.
    pub fn into_result(self) -> crate::result::Result<()> {
        match self.build() {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }
}
