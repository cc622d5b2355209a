use std::io::BufWriter;

use log::{LevelFilter, warn};

use tummer::cli;
use tummer::driver;
use tummer::io::{Ingress, read_fasta, read_fasta_join};

fn main() -> anyhow::Result<()> {
    let (cli, config) = cli::parse_command_line();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        })
        .format_timestamp(None)
        .init();

    let ingress = Ingress::new();
    let mut sequences = Vec::new();

    for path in cli.input_paths()? {
        if cli.join {
            read_fasta_join(&path, &mut sequences, &ingress)?;
        } else {
            read_fasta(&path, &mut sequences, &ingress)?;
        }
    }

    if ingress.saw_non_canonical() {
        warn!(
            "the input sequences contained characters other than acgtACGT; \
             these were mapped to N to ensure correct results"
        );
    }

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    driver::run(&sequences, &config, &mut out)?;

    Ok(())
}
