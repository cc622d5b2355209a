/*! Finds Maximal Unique Matches (MUMs) between a reference sequence and a
 * set of query sequences, in the manner of the classic `mummer` tool.
 *
 * The reference is turned into a subject string containing both strands and
 * indexed once with an enhanced suffix array (suffix array, inverse, LCP
 * array and a prefix lookup table). Queries are then streamed against the
 * index: each round finds the longest prefix of the remaining query that
 * occurs in the subject, and prefixes occurring exactly once are reported
 * as anchors when they reach the minimum length. That minimum is either
 * user-supplied or derived from the shustring length distribution of
 * random sequences.
 *
 * Index construction is based on the [`libsais-rs`] crate, and independent
 * queries are processed in parallel with [`rayon`].
 *
 * ## Usage
 *
 * The following is a basic example of how to use this library:
 *
 * ```
 * use tummer::{EsaConfig, Sequence, find_anchors};
 *
 * let reference = Sequence::new("reference", b"ACGTTTTACGT").unwrap();
 * let index = EsaConfig::new().build_index(reference.to_subject());
 *
 * let anchors = find_anchors(&index, b"ACGTTTT", 4);
 *
 * assert_eq!(anchors.len(), 1);
 * assert_eq!(anchors[0].length, 7);
 * ```
 *
 * The binary target wraps this into the complete workflow: FASTA ingress,
 * forward and reverse-complement passes and `mummer`-style output columns.
 *
 * [`libsais-rs`]: https://github.com/feldroop/libsais-rs
 */

pub mod anchor;
pub mod cli;
mod config;
mod construction;
pub mod driver;
mod esa;
pub mod io;
pub mod sequence;
pub mod stats;

mod lookup_table;

#[doc(inline)]
pub use anchor::{Anchor, find_anchors};
#[doc(inline)]
pub use config::EsaConfig;
#[doc(inline)]
pub use driver::{RunConfig, run};
pub use esa::{Esa, LcpInterval, PrefixMatch};
#[doc(inline)]
pub use sequence::Sequence;
