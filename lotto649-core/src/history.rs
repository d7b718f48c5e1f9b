use std::collections::BTreeSet;

use crate::models::{Combination, Draw};

/// Historical draws in record order. Built once, never mutated.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    draws: Vec<Draw>,
}

impl Archive {
    pub fn new(draws: Vec<Draw>) -> Self {
        Self { draws }
    }

    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    pub fn combinations(&self) -> impl Iterator<Item = &Combination> {
        self.draws.iter().map(|d| &d.numbers)
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}

impl FromIterator<Draw> for Archive {
    fn from_iter<I: IntoIterator<Item = Draw>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Outcome of the history lookup; `Unavailable` when no archive was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryCheck {
    Unavailable,
    Occurrences(usize),
}

impl HistoryCheck {
    pub fn run<I>(candidate: I, archive: Option<&Archive>) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        match archive {
            Some(archive) => HistoryCheck::Occurrences(check_historical_occurrence(candidate, archive)),
            None => HistoryCheck::Unavailable,
        }
    }
}

fn same_set(candidate: &BTreeSet<u8>, combination: &Combination) -> bool {
    // Both sides iterate in ascending order.
    candidate.iter().eq(combination.numbers().iter())
}

/// Number of archived draws whose six numbers equal `candidate` as a set.
pub fn check_historical_occurrence<I>(candidate: I, archive: &Archive) -> usize
where
    I: IntoIterator<Item = u8>,
{
    let candidate: BTreeSet<u8> = candidate.into_iter().collect();
    archive
        .combinations()
        .filter(|c| same_set(&candidate, c))
        .count()
}

pub fn matching_draws<'a, I>(candidate: I, archive: &'a Archive) -> Vec<&'a Draw>
where
    I: IntoIterator<Item = u8>,
{
    let candidate: BTreeSet<u8> = candidate.into_iter().collect();
    archive
        .draws()
        .iter()
        .filter(|d| same_set(&candidate, &d.numbers))
        .collect()
}
