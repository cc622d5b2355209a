use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use bio::io::fasta;
use log::warn;

use crate::sequence::{Sequence, SequenceError};

/// Shared state of the ingress phase.
///
/// The non-canonical indicator is a one-way flag: once any sequence needed
/// an `N` substitution it stays set, so the driver can warn exactly once.
#[derive(Debug, Default)]
pub struct Ingress {
    non_canonical: AtomicBool,
}

impl Ingress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_non_canonical(&self) {
        self.non_canonical.store(true, Ordering::Relaxed);
    }

    pub fn saw_non_canonical(&self) -> bool {
        self.non_canonical.load(Ordering::Relaxed)
    }
}

/// Reads all sequences of one FASTA file into `sequences`. `-` reads
/// standard input.
///
/// A file that cannot be opened or parsed is reported and skipped; that only
/// becomes fatal later if fewer than two sequences remain overall. Records
/// without a name are skipped as well. An empty sequence is an error.
pub fn read_fasta(
    path: &str,
    sequences: &mut Vec<Sequence>,
    ingress: &Ingress,
) -> Result<(), SequenceError> {
    let reader = match open(path) {
        Ok(reader) => reader,
        Err(error) => {
            warn!("{path}: {error}");
            return Ok(());
        }
    };

    for result in fasta::Reader::new(reader).records() {
        let record = match result {
            Ok(record) => record,
            Err(error) => {
                warn!("{path}: {error}");
                break;
            }
        };

        if record.id().is_empty() {
            warn!("{path}: skipping a record without a name");
            continue;
        }

        let sequence = Sequence::new(record.id(), record.seq())?;
        if sequence.had_non_canonical() {
            ingress.mark_non_canonical();
        }

        sequences.push(sequence);
    }

    Ok(())
}

/// Joins all sequences of one FASTA file into a single sequence named after
/// the file.
///
/// A file that yields no sequences contributes nothing, consistent with
/// [`read_fasta`].
pub fn read_fasta_join(
    path: &str,
    sequences: &mut Vec<Sequence>,
    ingress: &Ingress,
) -> Result<(), SequenceError> {
    let mut parts = Vec::new();
    read_fasta(path, &mut parts, ingress)?;

    if parts.is_empty() {
        return Ok(());
    }

    sequences.push(Sequence::concat(join_name(path), &parts)?);

    Ok(())
}

fn open(path: &str) -> io::Result<BufReader<Box<dyn Read>>> {
    let reader: Box<dyn Read> = if path == "-" {
        Box::new(io::stdin())
    } else {
        Box::new(File::open(path)?)
    };

    Ok(BufReader::new(reader))
}

/// `path/file.ext` becomes `file`; everything from the first dot of the
/// file name is stripped.
fn join_name(path: &str) -> String {
    let base = match Path::new(path).file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.to_string(),
    };

    match base.split_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => base,
    }
}
