use crate::error::{LottoError, Result};

/// `n!`, failing once the product leaves the `u128` range (from `35!` on).
pub fn factorial(n: u32) -> Result<u128> {
    (1..=n as u128)
        .try_fold(1u128, |acc, i| acc.checked_mul(i))
        .ok_or_else(|| LottoError::Overflow {
            operation: format!("{n}!"),
        })
}

/// Number of `k`-element subsets of an `n`-element set.
///
/// Equal to `n! / (k! (n-k)!)` but built incrementally as
/// `C(m, i) = C(m-1, i-1) * m / i`, so every intermediate value is itself a
/// binomial coefficient and `C(49, 6)` never needs `49!`.
pub fn combinations(n: u64, k: u64) -> Result<u64> {
    if k > n {
        return Err(LottoError::InvalidArgument {
            message: format!("k ({k}) ne peut pas dépasser n ({n})"),
        });
    }
    let k = k.min(n - k);
    let overflow = || LottoError::Overflow {
        operation: format!("C({n}, {k})"),
    };

    let mut result: u128 = 1;
    for i in 1..=k as u128 {
        let m = (n - k) as u128 + i;
        result = result.checked_mul(m).ok_or_else(overflow)? / i;
    }
    u64::try_from(result).map_err(|_| overflow())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorial_small() {
        assert_eq!(factorial(0).unwrap(), 1);
        assert_eq!(factorial(1).unwrap(), 1);
        assert_eq!(factorial(5).unwrap(), 120);
        assert_eq!(factorial(10).unwrap(), 3_628_800);
    }

    #[test]
    fn test_factorial_overflow() {
        assert!(factorial(34).is_ok());
        assert!(matches!(factorial(35), Err(LottoError::Overflow { .. })));
    }

    #[test]
    fn test_combinations_649() {
        assert_eq!(combinations(49, 6).unwrap(), 13_983_816);
    }

    #[test]
    fn test_combinations_edges() {
        for n in 0..=60 {
            assert_eq!(combinations(n, 0).unwrap(), 1);
            assert_eq!(combinations(n, n).unwrap(), 1);
        }
    }

    #[test]
    fn test_combinations_symmetry() {
        for n in 0..=60 {
            for k in 0..=n {
                assert_eq!(combinations(n, k).unwrap(), combinations(n, n - k).unwrap());
            }
        }
    }

    #[test]
    fn test_combinations_matches_factorial_definition() {
        for n in 0..=20u32 {
            for k in 0..=n {
                let expected = factorial(n).unwrap()
                    / (factorial(k).unwrap() * factorial(n - k).unwrap());
                assert_eq!(combinations(n as u64, k as u64).unwrap() as u128, expected);
            }
        }
    }

    #[test]
    fn test_combinations_k_greater_than_n() {
        for n in 0..10 {
            for k in (n + 1)..(n + 5) {
                assert!(matches!(
                    combinations(n, k),
                    Err(LottoError::InvalidArgument { .. })
                ));
            }
        }
    }

    #[test]
    fn test_combinations_overflow() {
        assert!(matches!(
            combinations(200, 100),
            Err(LottoError::Overflow { .. })
        ));
    }
}
