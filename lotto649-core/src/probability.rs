use crate::combinatorics::combinations;
use crate::error::{LottoError, Result};
use crate::models::{PICK_COUNT, POOL_SIZE};

/// C(49, 6), for bounds that must be known at compile time (CLI argument
/// ranges). Queries compute it with [`total_combinations`].
pub const TOTAL_COMBINATIONS: u64 = 13_983_816;

/// Size of the 6/49 combination space.
pub fn total_combinations() -> Result<u64> {
    combinations(POOL_SIZE as u64, PICK_COUNT as u64)
}

/// Winning probability kept as the exact ratio `successes / total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probability {
    successes: u64,
    total: u64,
}

impl Probability {
    pub fn successes(&self) -> u64 {
        self.successes
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn as_f64(&self) -> f64 {
        self.successes as f64 / self.total as f64
    }

    pub fn percent(&self) -> f64 {
        self.as_f64() * 100.0
    }

    /// `N` in "1 chance sur N", rounded to the nearest integer.
    pub fn odds(&self) -> u64 {
        (self.total as f64 / self.successes as f64).round() as u64
    }
}

pub fn one_ticket_probability() -> Result<Probability> {
    Ok(Probability {
        successes: 1,
        total: total_combinations()?,
    })
}

/// Probability of hitting the jackpot with `ticket_count` tickets.
///
/// Assumes every ticket covers a different combination: `n` tickets then
/// cover `n` outcomes. Counts above the number of combinations are clamped.
pub fn multi_ticket_probability(ticket_count: u64) -> Result<Probability> {
    if ticket_count == 0 {
        return Err(LottoError::InvalidArgument {
            message: "il faut jouer au moins une grille".to_string(),
        });
    }
    let total = total_combinations()?;
    Ok(Probability {
        successes: ticket_count.min(total),
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_matches_combinations() {
        assert_eq!(total_combinations().unwrap(), 13_983_816);
        assert_eq!(total_combinations().unwrap(), TOTAL_COMBINATIONS);
    }

    #[test]
    fn test_one_ticket() {
        let p = one_ticket_probability().unwrap();
        assert_eq!(p.as_f64(), 1.0 / 13_983_816.0);
        assert_eq!(p.odds(), 13_983_816);
    }

    #[test]
    fn test_multi_ticket_single_equals_one_ticket() {
        let p = multi_ticket_probability(1).unwrap();
        assert_eq!(p, one_ticket_probability().unwrap());
        assert_eq!(p.as_f64(), one_ticket_probability().unwrap().as_f64());
    }

    #[test]
    fn test_multi_ticket_all_combinations() {
        let p = multi_ticket_probability(13_983_816).unwrap();
        assert_eq!(p.as_f64(), 1.0);
        assert_eq!(p.odds(), 1);
    }

    #[test]
    fn test_multi_ticket_clamped() {
        let p = multi_ticket_probability(999_999_999).unwrap();
        assert_eq!(p.as_f64(), 1.0);
        assert_eq!(p.successes(), TOTAL_COMBINATIONS);
    }

    #[test]
    fn test_multi_ticket_zero_rejected() {
        assert!(matches!(
            multi_ticket_probability(0),
            Err(LottoError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_percent_and_odds() {
        let p = multi_ticket_probability(100).unwrap();
        assert!((p.percent() - 100.0 * 100.0 / 13_983_816.0).abs() < 1e-12);
        // 13983816 / 100 = 139838.16
        assert_eq!(p.odds(), 139_838);

        let p = multi_ticket_probability(3).unwrap();
        // 4661272 exactly
        assert_eq!(p.odds(), 4_661_272);
    }
}
