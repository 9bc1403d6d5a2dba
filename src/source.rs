use std::{
  fmt,
  fs::File,
  io::{self, BufRead, BufReader},
  path::{Path, PathBuf},
  str::FromStr,
  time::{SystemTime, UNIX_EPOCH},
};

use rand::{rngs::StdRng, Rng, SeedableRng};

pub const RANDOM_KEY_RANGE: u32 = 1_000_000;

pub const DATE_STEP_MILLIS: u64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
  Random,
  Date,
  WordList,
}

impl DataSource {
  pub fn name(&self) -> &'static str {
    match self {
      DataSource::Random => "Random Numbers",
      DataSource::Date => "Date Values",
      DataSource::WordList => "Word List",
    }
  }
}

impl fmt::Display for DataSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for DataSource {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim() {
      "1" => Ok(DataSource::Random),
      "2" => Ok(DataSource::Date),
      "3" => Ok(DataSource::WordList),
      other => Err(format!("data source must be 1, 2 or 3, got `{other}`")),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
  Number(u32),
  /// Milliseconds since the Unix epoch.
  Timestamp(u64),
  Word(String),
}

impl fmt::Display for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Key::Number(n) => write!(f, "{n}"),
      Key::Timestamp(millis) => write!(f, "{millis}"),
      Key::Word(word) => f.write_str(word),
    }
  }
}

#[derive(Debug, Clone)]
pub struct SourceOptions {
  pub seed: u64,
  pub start_millis: u64,
  pub word_list: PathBuf,
}

impl Default for SourceOptions {
  fn default() -> Self {
    Self { seed: 42, start_millis: now_millis(), word_list: PathBuf::from("word-list.txt") }
  }
}

pub fn now_millis() -> u64 {
  SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or_default()
}

/// Endless key stream. Sources built from the same options repeat the same
/// sequence.
pub struct KeySource {
  inner: Inner,
}

enum Inner {
  Numbers(StdRng),
  Dates { next_millis: u64 },
  Words { words: Vec<String>, next: usize },
  RandomWords(StdRng),
}

impl KeySource {
  pub fn new(source: DataSource, options: &SourceOptions) -> Self {
    let inner = match source {
      DataSource::Random => Inner::Numbers(StdRng::seed_from_u64(options.seed)),
      DataSource::Date => Inner::Dates { next_millis: options.start_millis },
      DataSource::WordList => match read_word_list(&options.word_list) {
        Ok(words) if !words.is_empty() => Inner::Words { words, next: 0 },
        Ok(_) => {
          log::warn!("word list {} is empty, falling back to random strings", options.word_list.display());
          Inner::RandomWords(StdRng::seed_from_u64(options.seed))
        }
        Err(err) => {
          log::warn!("error reading word list {}: {err}, falling back to random strings", options.word_list.display());
          Inner::RandomWords(StdRng::seed_from_u64(options.seed))
        }
      },
    };
    Self { inner }
  }

  pub(crate) fn from_words(words: Vec<String>) -> Self {
    Self { inner: Inner::Words { words, next: 0 } }
  }
}

impl Iterator for KeySource {
  type Item = Key;

  fn next(&mut self) -> Option<Key> {
    match &mut self.inner {
      Inner::Numbers(rng) => Some(Key::Number(rng.gen_range(0..RANDOM_KEY_RANGE))),
      Inner::Dates { next_millis } => {
        let millis = *next_millis;
        *next_millis = millis.saturating_add(DATE_STEP_MILLIS);
        Some(Key::Timestamp(millis))
      }
      Inner::Words { words, next } => {
        let word = words.get(*next % words.len().max(1))?.clone();
        *next += 1;
        Some(Key::Word(word))
      }
      Inner::RandomWords(rng) => Some(Key::Word(random_word(rng))),
    }
  }
}

pub fn read_word_list<T: AsRef<Path>>(path: T) -> io::Result<Vec<String>> {
  let reader = BufReader::new(File::open(path)?);
  let mut words = Vec::new();
  for line in reader.lines() {
    let line = line?;
    let word = line.trim();
    if !word.is_empty() {
      words.push(word.to_string());
    }
  }
  Ok(words)
}

fn random_word(rng: &mut StdRng) -> String {
  let len = rng.gen_range(5..15);
  (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}
