//! Bridge transport seam, candidate call sequences, and the sequencing client.

pub mod candidates;
pub mod client;
pub mod transport;
