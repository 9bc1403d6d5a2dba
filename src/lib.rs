mod entry;
mod error;
mod prime;
mod probe;
mod table;

pub mod experiment;
pub mod source;

pub use entry::Entry;
pub use error::{Error, Result};
pub use prime::{find_twin_prime_ceiling, is_prime};
pub use probe::{DoubleHashProbe, LinearProbe, Probe};
pub use table::{DoubleHashingTable, Dump, DumpRow, InsertOutcome, LinearProbingTable, OpenAddressTable};
