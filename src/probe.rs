use crate::{
  error::{Error, Result},
  prime::is_prime,
};

mod sealed {
  pub trait Sealed {}
}

pub trait Probe: sealed::Sealed {
  const NAME: &'static str;

  /// Rejects capacities for which the sequence over `0..capacity` attempts
  /// would not visit every slot.
  fn check_capacity(capacity: usize) -> Result<()>;

  /// Slot for the given attempt. `capacity` must have passed `check_capacity`.
  fn probe(hash: u64, capacity: usize, attempt: usize) -> usize;
}

/// `(h(k) + i) mod m`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearProbe;

/// `(h1(k) + i * h2(k)) mod m` with `h1 = h mod m` and `h2 = 1 + h mod (m - 2)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DoubleHashProbe;

impl sealed::Sealed for LinearProbe {}
impl sealed::Sealed for DoubleHashProbe {}

impl Probe for LinearProbe {
  const NAME: &'static str = "Linear Probing";

  fn check_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
      return Err(Error::CapacityTooSmall { capacity, minimum: 1 });
    }
    Ok(())
  }

  #[inline]
  fn probe(hash: u64, capacity: usize, attempt: usize) -> usize {
    let m = capacity as u128;
    let h1 = hash as u128 % m;
    ((h1 + attempt as u128) % m) as usize
  }
}

impl Probe for DoubleHashProbe {
  const NAME: &'static str = "Double Hashing";

  fn check_capacity(capacity: usize) -> Result<()> {
    if capacity < 3 {
      return Err(Error::CapacityTooSmall { capacity, minimum: 3 });
    }
    if !is_prime(capacity) {
      return Err(Error::CapacityNotPrime(capacity));
    }
    Ok(())
  }

  #[inline]
  fn probe(hash: u64, capacity: usize, attempt: usize) -> usize {
    let m = capacity as u128;
    let h1 = hash as u128 % m;
    let h2 = step(hash, capacity) as u128;
    ((h1 + attempt as u128 * h2) % m) as usize
  }
}

// Secondary hash, always in [1, capacity - 2].
fn step(hash: u64, capacity: usize) -> usize {
  1 + (hash % (capacity as u64 - 2)) as usize
}
