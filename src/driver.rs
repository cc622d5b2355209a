use std::borrow::Cow;
use std::io::Write;

use log::{debug, info};
use rayon::prelude::*;
use thiserror::Error;

use crate::anchor::{self, Anchor};
use crate::esa::Esa;
use crate::sequence::Sequence;
use crate::stats;

/// Longest supported sequence, chosen so the doubled subject still fits
/// into i32 suffix array entries.
pub const LENGTH_LIMIT: usize = (i32::MAX as usize - 1) / 2;

/// The immutable per-run settings shared by the driver and the anchor
/// finder.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    pub forward: bool,
    pub reverse_complement: bool,
    /// Probability with which an anchor is allowed to be random; used when
    /// `min_length` is not set.
    pub probability: f64,
    /// User-supplied minimum anchor length; 0 derives it from `probability`.
    pub min_length: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            forward: true,
            reverse_complement: false,
            probability: 0.05,
            min_length: 0,
        }
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("with less than two sequences ({0} given) there is nothing to compare")]
    TooFewSequences(usize),
    #[error("the sequence {name} is too long, the technical limit is {LENGTH_LIMIT}")]
    Oversize { name: String },
    #[error("failed to write results")]
    Output(#[from] std::io::Error),
}

/// Indexes the first sequence and streams every other one against it.
///
/// Each enabled pass of each query is rendered into its own buffer on a
/// rayon worker; the buffers are written in input order, so the lines of one
/// query stay contiguous.
pub fn run(
    sequences: &[Sequence],
    config: &RunConfig,
    out: &mut dyn Write,
) -> Result<(), RunError> {
    if sequences.len() < 2 {
        return Err(RunError::TooFewSequences(sequences.len()));
    }

    for sequence in sequences {
        if sequence.len() > LENGTH_LIMIT {
            return Err(RunError::Oversize {
                name: sequence.name().to_string(),
            });
        }
    }

    info!("comparing {} sequences", sequences.len());

    let reference = &sequences[0];
    let esa = Esa::new(reference.to_subject());

    let threshold = if config.min_length > 0 {
        config.min_length
    } else {
        stats::min_anchor_length(config.probability, reference.gc(), esa.text_len())
    };
    info!("minimum anchor length: {threshold}");

    let mut passes: Vec<(String, Cow<[u8]>, usize)> = Vec::new();
    for (index, query) in sequences.iter().enumerate().skip(1) {
        if config.forward {
            passes.push((
                format!("> {}\n", query.name()),
                Cow::Borrowed(query.residues()),
                index,
            ));
        }

        if config.reverse_complement {
            passes.push((
                format!("> {} Reverse\n", query.name()),
                Cow::Owned(query.reverse_complement()),
                index,
            ));
        }
    }

    let blocks: Vec<String> = passes
        .par_iter()
        .map(|(header, query, index)| {
            debug!("comparing sequences 0 and {index}");

            let mut block = header.clone();
            for anchor in anchor::find_anchors(&esa, query.as_ref(), threshold) {
                block.push_str(&render_anchor(&anchor));
            }

            block
        })
        .collect();

    for block in blocks {
        out.write_all(block.as_bytes())?;
    }
    out.flush()?;

    Ok(())
}

/// One match line: 1-based positions and the length, right-aligned in
/// 8-character columns separated by two spaces.
fn render_anchor(anchor: &Anchor) -> String {
    format!(
        "{:8}  {:8}  {:8}\n",
        anchor.reference_position + 1,
        anchor.query_position + 1,
        anchor.length
    )
}
