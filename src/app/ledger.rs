use std::{fmt::Display, ops::Deref};

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, trace};

use super::subject::{Field, Subject};
use crate::error::{Error, Result};

/// Credit weighted totals of one calculation.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Cgpa {
    pub points: f64,
    pub credits: f64,
}

impl Cgpa {
    pub fn value(&self) -> f64 {
        if self.credits > 0.0 {
            self.points / self.credits
        } else {
            0.0
        }
    }
}

/// Two decimals, with exact halves rounded up.
impl Display for Cgpa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match Decimal::from_f64_retain(self.value()) {
            Some(value) => {
                let mut rounded =
                    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                rounded.rescale(2);
                write!(f, "{rounded}")
            }
            None => write!(f, "{:.2}", self.value()),
        }
    }
}

/// Subjects in the order they were added.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Ledger(Vec<Subject>);

impl Ledger {
    pub fn with_rows(rows: usize) -> Self {
        Self(vec![Subject::default(); rows])
    }

    /// Appends an empty subject and returns its position.
    pub fn add(&mut self) -> usize {
        self.0.push(Subject::default());
        debug!(rows = self.0.len(), "added subject");
        self.0.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Result<Subject> {
        self.check(index)?;
        let subject = self.0.remove(index);
        debug!(index, rows = self.0.len(), "removed subject");
        Ok(subject)
    }

    pub fn edit(&mut self, index: usize, field: Field, value: impl Into<String>) -> Result<()> {
        self.check(index)?;
        let value = value.into();
        trace!(index, ?field, %value, "edited subject");
        self.0[index].set(field, value);
        Ok(())
    }

    pub fn compute(&self) -> Cgpa {
        self.0.iter().fold(Cgpa::default(), |acc, subject| {
            let credits = subject.credits();
            Cgpa {
                points: acc.points + subject.grade_points() * credits,
                credits: acc.credits + credits,
            }
        })
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.0.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.0.len(),
            })
        }
    }
}

impl Deref for Ledger {
    type Target = [Subject];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
