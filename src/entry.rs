/// A key stored in the table, with its duplicate count and the number of
/// probes it took to place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K> {
  key: K,
  frequency: usize,
  probe_count: usize,
}

impl<K> Entry<K> {
  pub fn new(key: K) -> Self {
    Self { key, frequency: 1, probe_count: 0 }
  }

  pub fn key(&self) -> &K {
    &self.key
  }

  pub fn frequency(&self) -> usize {
    self.frequency
  }

  /// Probes used when the entry was placed. Zero until the table places it.
  pub fn probe_count(&self) -> usize {
    self.probe_count
  }

  // A placed entry is a first insertion, whatever it carried before.
  pub(crate) fn place(&mut self, probe_count: usize) {
    self.frequency = 1;
    self.probe_count = probe_count;
  }

  pub(crate) fn bump_frequency(&mut self) {
    self.frequency += 1;
  }
}
