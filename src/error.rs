use std::{io, path::PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum Error {
  #[error("no twin prime pair found in range [{min}, {max}]")]
  NoTwinPrime { min: usize, max: usize },

  #[error("capacity {0} is not prime; double hashing needs a prime capacity")]
  CapacityNotPrime(usize),

  #[error("capacity {capacity} is too small, must be at least {minimum}")]
  CapacityTooSmall { capacity: usize, minimum: usize },

  #[error("load factor {0} must be strictly between 0 and 1")]
  InvalidLoadFactor(f64),

  #[error("debug level {0} must be 0, 1 or 2")]
  InvalidDebugLevel(u8),

  #[error("failed to dump table to {}: {source}", path.display())]
  Dump {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

pub type Result<T> = std::result::Result<T, Error>;
