use crate::error::{Error, Result};

/// Returns the larger member of the first twin prime pair `(p, p + 2)` with
/// `p >= min` and `p + 2 <= max`.
///
/// Candidates are scanned upward from `max(min, 3)`, odd numbers only.
pub fn find_twin_prime_ceiling(min: usize, max: usize) -> Result<usize> {
  let mut candidate = min.max(3);
  if candidate % 2 == 0 {
    candidate += 1;
  }

  while candidate.checked_add(2).is_some_and(|upper| upper <= max) {
    if is_prime(candidate) && is_prime(candidate + 2) {
      return Ok(candidate + 2);
    }
    candidate += 2;
  }

  Err(Error::NoTwinPrime { min, max })
}

/// Trial division over the 6k +/- 1 wheel.
pub fn is_prime(n: usize) -> bool {
  if n <= 1 {
    return false;
  }
  if n <= 3 {
    return true;
  }
  if n % 2 == 0 || n % 3 == 0 {
    return false;
  }

  let mut i = 5usize;
  while i.checked_mul(i).is_some_and(|square| square <= n) {
    if n % i == 0 || n % (i + 2) == 0 {
      return false;
    }
    i += 6;
  }
  true
}

#[cfg(test)]
mod tests {

  use super::*;

  #[test]
  fn test_is_prime_small() {
    let primes: Vec<usize> = (0..50).filter(|&n| is_prime(n)).collect();
    assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]);
  }

  #[test]
  fn test_is_prime_squares_of_primes() {
    // 6k +/- 1 wheel must still catch p * p
    for p in [5usize, 7, 11, 13, 97, 307] {
      assert!(!is_prime(p * p), "{} is not prime", p * p);
    }
    assert!(is_prime(95_801));
    assert!(!is_prime(95_807));
  }

  #[test]
  fn test_twin_prime_scan_starts_at_min() {
    // (11, 13) is the first pair at or above 10
    assert_eq!(find_twin_prime_ceiling(10, 20).unwrap(), 13);
    assert_eq!(find_twin_prime_ceiling(14, 20).unwrap(), 19);
    assert_eq!(find_twin_prime_ceiling(0, 10).unwrap(), 5);
  }

  #[test]
  fn test_twin_prime_reference_range() {
    let capacity = find_twin_prime_ceiling(95_500, 96_000).unwrap();
    assert_eq!(capacity, 95_791);
    assert!(is_prime(capacity) && is_prime(capacity - 2));
  }

  #[test]
  fn test_twin_prime_pair_must_fit_below_max() {
    // (17, 19) exists but 19 > 18
    assert!(matches!(
      find_twin_prime_ceiling(14, 18),
      Err(Error::NoTwinPrime { min: 14, max: 18 })
    ));
  }

  #[test]
  fn test_twin_prime_empty_range() {
    assert!(find_twin_prime_ceiling(24, 28).is_err());
    assert!(find_twin_prime_ceiling(100, 50).is_err());
    assert!(find_twin_prime_ceiling(usize::MAX - 1, usize::MAX).is_err());
  }
}
