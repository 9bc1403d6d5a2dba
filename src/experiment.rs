use std::{
  fmt,
  hash::{BuildHasher, Hash},
  path::PathBuf,
};

use crate::{
  error::{Error, Result},
  prime::find_twin_prime_ceiling,
  probe::Probe,
  source::{DataSource, Key, KeySource, SourceOptions},
  table::{DoubleHashingTable, InsertOutcome, LinearProbingTable, OpenAddressTable},
};

pub const DEFAULT_MIN_RANGE: usize = 95_500;
pub const DEFAULT_MAX_RANGE: usize = 96_000;

#[derive(Debug, Clone)]
pub struct ExperimentConfig {
  pub source: DataSource,
  pub load_factor: f64,
  /// 0 prints the summary, 1 also dumps both tables, 2 also logs every insert.
  pub debug_level: u8,
  pub min_range: usize,
  pub max_range: usize,
  pub source_options: SourceOptions,
  pub linear_dump: PathBuf,
  pub double_dump: PathBuf,
}

impl Default for ExperimentConfig {
  fn default() -> Self {
    Self {
      source: DataSource::Random,
      load_factor: 0.5,
      debug_level: 0,
      min_range: DEFAULT_MIN_RANGE,
      max_range: DEFAULT_MAX_RANGE,
      source_options: SourceOptions::default(),
      linear_dump: PathBuf::from("linear-dump.txt"),
      double_dump: PathBuf::from("double-dump.txt"),
    }
  }
}

impl ExperimentConfig {
  pub fn validate(&self) -> Result<()> {
    if !(self.load_factor > 0.0 && self.load_factor < 1.0) {
      return Err(Error::InvalidLoadFactor(self.load_factor));
    }
    if self.debug_level > 2 {
      return Err(Error::InvalidDebugLevel(self.debug_level));
    }
    Ok(())
  }

  pub fn dumps_enabled(&self) -> bool {
    self.debug_level >= 1
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableReport {
  pub strategy: &'static str,
  pub capacity: usize,
  pub element_count: usize,
  pub duplicate_count: usize,
  pub average_probes: f64,
  pub load_factor: f64,
  pub reached_target: bool,
}

impl TableReport {
  pub fn from_table<K, P: Probe, S: BuildHasher>(table: &OpenAddressTable<K, P, S>, reached_target: bool) -> Self {
    Self {
      strategy: table.strategy_name(),
      capacity: table.capacity(),
      element_count: table.len(),
      duplicate_count: table.duplicate_count(),
      average_probes: table.average_probes(),
      load_factor: table.load_factor(),
      reached_target,
    }
  }

  pub fn inserted(&self) -> usize {
    self.element_count + self.duplicate_count
  }
}

impl fmt::Display for TableReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "        Using {}", self.strategy)?;
    writeln!(f, "size of hash table is {}", self.element_count)?;
    writeln!(f, "        Inserted {} elements, of which {} were duplicates", self.inserted(), self.duplicate_count)?;
    write!(f, "        Avg. no. of probes = {:.2}", self.average_probes)
  }
}

pub struct ExperimentOutcome {
  pub capacity: usize,
  pub target: usize,
  pub linear: LinearProbingTable<Key>,
  pub double: DoubleHashingTable<Key>,
  pub linear_report: TableReport,
  pub double_report: TableReport,
}

pub struct Experiment;

impl Experiment {
  pub fn run(config: &ExperimentConfig) -> Result<ExperimentOutcome> {
    config.validate()?;

    let capacity = find_twin_prime_ceiling(config.min_range, config.max_range)?;
    let target = target_elements(config.load_factor, capacity);
    log::info!("twin prime table capacity {capacity}, target {target} elements from {}", config.source);

    let mut linear = LinearProbingTable::<Key>::new_with_capacity(capacity)?;
    let mut double = DoubleHashingTable::<Key>::new_with_capacity(capacity)?;

    // Each table has its own writer and its own copy of the key stream.
    let (linear_done, double_done) = rayon::join(
      || populate(&mut linear, KeySource::new(config.source, &config.source_options), target),
      || populate(&mut double, KeySource::new(config.source, &config.source_options), target),
    );

    let linear_report = TableReport::from_table(&linear, linear_done);
    let double_report = TableReport::from_table(&double, double_done);
    Ok(ExperimentOutcome { capacity, target, linear, double, linear_report, double_report })
  }
}

pub fn target_elements(load_factor: f64, capacity: usize) -> usize {
  ((load_factor * capacity as f64).ceil() as usize).min(capacity)
}

/// Inserts keys until the table holds `target` entries. Returns whether the
/// target was reached.
///
/// Stops early when the table is full, the source runs dry, or `capacity`
/// keys in a row were duplicates.
pub fn populate<K, P, S, I>(table: &mut OpenAddressTable<K, P, S>, keys: I, target: usize) -> bool
where
  K: Eq + Hash,
  P: Probe,
  S: BuildHasher,
  I: IntoIterator<Item = K>,
{
  let mut keys = keys.into_iter();
  let mut stalled = 0usize;

  while table.len() < target {
    let Some(key) = keys.next() else {
      break;
    };
    match table.insert_key(key) {
      InsertOutcome::Inserted { .. } => stalled = 0,
      InsertOutcome::DuplicateFound { .. } => {
        stalled += 1;
        if stalled >= table.capacity() {
          break;
        }
      }
      InsertOutcome::TableFull => break,
    }
  }

  let reached = table.len() >= target;
  if !reached {
    log::warn!(
      "{}: could not reach target load factor, inserted {} out of {} elements",
      table.strategy_name(),
      table.len(),
      target
    );
  }
  reached
}
