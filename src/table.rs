use std::{
  borrow::Borrow,
  fmt::{self, Display},
  fs::File,
  hash::{BuildHasher, Hash, Hasher},
  io::{self, BufWriter, Write},
  marker::PhantomData,
  path::Path,
};

use foldhash::fast::FixedState;

use crate::{
  entry::Entry,
  error::{Error, Result},
  probe::{DoubleHashProbe, LinearProbe, Probe},
};

/// Result of [`OpenAddressTable::insert`].
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
  /// The entry was placed at `index` after `probes` attempts.
  Inserted { index: usize, probes: usize },
  /// An equal key already lives at `index`; its frequency is now `frequency`.
  DuplicateFound { index: usize, frequency: usize },
  /// Every slot on the probe path holds a different key. Nothing changed.
  TableFull,
}

/// Fixed-capacity open addressing table. `P` picks the probe sequence.
///
/// There is no deletion and no growth: an occupied slot keeps its entry for
/// the lifetime of the table.
#[derive(Debug, Clone)]
pub struct OpenAddressTable<K, P: Probe, S: BuildHasher = FixedState> {
  slots: Vec<Option<Entry<K>>>,
  hasher: S,
  size: usize,
  total_probes: usize,
  duplicates: usize,
  _probe: PhantomData<P>,
}

pub type LinearProbingTable<K, S = FixedState> = OpenAddressTable<K, LinearProbe, S>;
pub type DoubleHashingTable<K, S = FixedState> = OpenAddressTable<K, DoubleHashProbe, S>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpRow<'a, K> {
  pub index: usize,
  pub key: &'a K,
  pub frequency: usize,
  pub probe_count: usize,
}

impl<K: Display> Display for DumpRow<'_, K> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "table[{}]: {} {} {}", self.index, self.key, self.frequency, self.probe_count)
  }
}

impl<K: Eq + Hash, P: Probe> OpenAddressTable<K, P, FixedState> {
  pub fn new_with_capacity(capacity: usize) -> Result<Self> {
    Self::new_with_capacity_and_hasher(capacity, FixedState::default())
  }
}

impl<K: Eq + Hash, P: Probe, S: BuildHasher> OpenAddressTable<K, P, S> {

  /// Fails if `P` cannot cover every slot of a table this size.
  pub fn new_with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self> {
    P::check_capacity(capacity)?;
    let slots = (0..capacity).map(|_| None).collect();
    Ok(Self { slots, hasher, size: 0, total_probes: 0, duplicates: 0, _probe: PhantomData })
  }

  pub fn insert_key(&mut self, key: K) -> InsertOutcome {
    self.insert(Entry::new(key))
  }

  /// The stored entry always starts with frequency 1, even if `entry` was
  /// copied out of another table.
  pub fn insert(&mut self, mut entry: Entry<K>) -> InsertOutcome {
    let hash = self.hash_u64(entry.key());
    let capacity = self.capacity();

    for attempt in 0..capacity {
      let index = P::probe(hash, capacity, attempt);
      let slot = &mut self.slots[index];

      match slot {
        None => {
          let probes = attempt + 1;
          log::debug!("{}: inserted hash {:#018x} at index {} with {} probes", P::NAME, hash, index, probes);
          entry.place(probes);
          *slot = Some(entry);
          self.size += 1;
          self.total_probes += probes;
          return InsertOutcome::Inserted { index, probes };
        }
        Some(existing) if existing.key() == entry.key() => {
          existing.bump_frequency();
          let frequency = existing.frequency();
          self.duplicates += 1;
          log::debug!("{}: duplicate hash {:#018x} at index {}, frequency now {}", P::NAME, hash, index, frequency);
          return InsertOutcome::DuplicateFound { index, frequency };
        }
        // Occupied by a different key, keep probing
        Some(_) => {}
      }
    }

    log::warn!("{}: could not insert hash {:#018x} after {} probes, table is full", P::NAME, hash, capacity);
    InsertOutcome::TableFull
  }

  /// Follows the insertion probe path and stops at the first empty slot.
  pub fn search<Q>(&self, key: &Q) -> Option<&Entry<K>>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let hash = self.hash_u64(key);
    let capacity = self.capacity();

    for attempt in 0..capacity {
      let index = P::probe(hash, capacity, attempt);
      match &self.slots[index] {
        None => return None,
        Some(entry) if <K as Borrow<Q>>::borrow(entry.key()) == key => return Some(entry),
        Some(_) => {}
      }
    }
    None
  }

  fn hash_u64<T: Hash + ?Sized>(&self, item: &T) -> u64 {
    let mut hasher = self.hasher.build_hasher();

    item.hash(&mut hasher);
    hasher.finish()
  }
}

impl<K, P: Probe, S: BuildHasher> OpenAddressTable<K, P, S> {

  pub fn strategy_name(&self) -> &'static str {
    P::NAME
  }

  pub fn capacity(&self) -> usize {
    self.slots.len()
  }

  pub fn len(&self) -> usize {
    self.size
  }

  pub fn is_empty(&self) -> bool {
    self.size == 0
  }

  pub fn is_full(&self) -> bool {
    self.size == self.capacity()
  }

  pub fn duplicate_count(&self) -> usize {
    self.duplicates
  }

  pub fn total_probes(&self) -> usize {
    self.total_probes
  }

  /// Average probes per successful insertion. Duplicates do not count.
  pub fn average_probes(&self) -> f64 {
    if self.size == 0 {
      return 0.0;
    }
    self.total_probes as f64 / self.size as f64
  }

  pub fn load_factor(&self) -> f64 {
    self.size as f64 / self.capacity() as f64
  }

  /// Occupied slots in ascending index order.
  pub fn dump(&self) -> Dump<'_, K> {
    Dump { slots: self.slots.iter().enumerate(), remaining: self.size }
  }

  pub fn write_dump<W: Write>(&self, mut out: W) -> io::Result<()>
  where
    K: Display,
  {
    for row in self.dump() {
      writeln!(out, "{row}")?;
    }
    out.flush()
  }

  /// Writes the dump to `path`, replacing any existing file.
  pub fn dump_to_file<T: AsRef<Path>>(&self, path: T) -> Result<()>
  where
    K: Display,
  {
    let path = path.as_ref();
    let to_error = |source| Error::Dump { path: path.to_path_buf(), source };

    let file = File::create(path).map_err(to_error)?;
    self.write_dump(BufWriter::new(file)).map_err(to_error)?;
    log::info!("{}: dumped {} entries to {}", P::NAME, self.size, path.display());
    Ok(())
  }
}

pub struct Dump<'a, K> {
  slots: std::iter::Enumerate<std::slice::Iter<'a, Option<Entry<K>>>>,
  remaining: usize,
}

impl<'a, K> Iterator for Dump<'a, K> {
  type Item = DumpRow<'a, K>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.remaining == 0 {
      return None;
    }

    for (index, slot) in self.slots.by_ref() {
      // Skip empty slots
      if let Some(entry) = slot {
        self.remaining -= 1;
        return Some(DumpRow {
          index,
          key: entry.key(),
          frequency: entry.frequency(),
          probe_count: entry.probe_count(),
        });
      }
    }
    None
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remaining, Some(self.remaining))
  }
}

impl<K> ExactSizeIterator for Dump<'_, K> {}
