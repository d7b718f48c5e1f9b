use std::fmt;

use crate::error::{LottoError, Result};

/// Highest number that can be drawn.
pub const POOL_SIZE: u8 = 49;

/// Numbers per combination.
pub const PICK_COUNT: usize = 6;

/// Six distinct numbers in `1..=49`, kept sorted so that equality is set equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Combination([u8; PICK_COUNT]);

impl Combination {
    pub fn new(numbers: [u8; PICK_COUNT]) -> Result<Self> {
        validate_numbers(&numbers)?;
        let mut sorted = numbers;
        sorted.sort_unstable();
        Ok(Self(sorted))
    }

    pub fn from_slice(numbers: &[u8]) -> Result<Self> {
        let arr: [u8; PICK_COUNT] = numbers.try_into().map_err(|_| LottoError::WrongCount {
            expected: PICK_COUNT,
            found: numbers.len(),
        })?;
        Self::new(arr)
    }

    pub fn numbers(&self) -> &[u8; PICK_COUNT] {
        &self.0
    }

    pub fn contains(&self, number: u8) -> bool {
        self.0.binary_search(&number).is_ok()
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, n) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " - ")?;
            }
            write!(f, "{:2}", n)?;
        }
        Ok(())
    }
}

/// One row of the historical archive.
#[derive(Debug, Clone, PartialEq)]
pub struct Draw {
    pub draw_number: u32,
    pub sequence_number: u32,
    pub date: String,
    pub numbers: Combination,
    pub bonus: Option<u8>,
}

pub fn validate_numbers(numbers: &[u8]) -> Result<()> {
    for &n in numbers {
        if n < 1 || n > POOL_SIZE {
            return Err(LottoError::NumberOutOfRange {
                number: n,
                max: POOL_SIZE,
            });
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                return Err(LottoError::DuplicateNumber(numbers[i]));
            }
        }
    }
    Ok(())
}

pub fn validate_bonus(numbers: &Combination, bonus: u8) -> Result<()> {
    if bonus < 1 || bonus > POOL_SIZE {
        return Err(LottoError::NumberOutOfRange {
            number: bonus,
            max: POOL_SIZE,
        });
    }
    if numbers.contains(bonus) {
        return Err(LottoError::DuplicateNumber(bonus));
    }
    Ok(())
}
