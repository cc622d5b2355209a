use clap::parser::ValueSource;
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser};

use crate::driver::RunConfig;

const DEFAULT_PROBABILITY: f64 = 0.05;

/// Finds maximal unique matches between the first sequence and every other
/// one.
#[derive(Debug, Parser)]
#[command(name = "tummer", version, about)]
pub struct Cli {
    /// Compute forward and reverse complement matches; default: forward only
    #[arg(short = 'b', action = ArgAction::Count)]
    pub both: u8,

    /// Compute only reverse complement matches; default: forward only
    #[arg(short = 'r', action = ArgAction::Count)]
    pub reverse: u8,

    /// Treat all sequences from one file as a single genome
    #[arg(short, long)]
    pub join: bool,

    /// Significance of a match
    #[arg(
        short,
        value_name = "FLOAT",
        default_value_t = DEFAULT_PROBABILITY,
        value_parser = parse_probability
    )]
    pub probability: f64,

    /// Minimum length of a match; derived from the significance by default
    #[arg(
        short = 'l',
        long = "min-length",
        value_name = "INT",
        default_value_t = 0,
        value_parser = parse_min_length
    )]
    pub min_length: usize,

    /// Prints additional information; twice also reports compared pairs
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// FASTA files, the first sequence is the reference; `-` reads stdin
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,
}

impl Cli {
    /// The files actually read: no files without join mode means stdin, and
    /// join mode with a single file additionally reads stdin so there is a
    /// second genome to compare against.
    pub fn input_paths(&self) -> anyhow::Result<Vec<String>> {
        if self.join {
            if self.files.is_empty() {
                anyhow::bail!("in join mode at least one filename needs to be supplied");
            }

            let mut paths = self.files.clone();
            if paths.len() == 1 {
                paths.push("-".to_string());
            }
            return Ok(paths);
        }

        if self.files.is_empty() {
            return Ok(vec!["-".to_string()]);
        }

        Ok(self.files.clone())
    }
}

/// Parses the command line and resolves the `-b`/`-r` interaction by their
/// last occurrence: `-r` alone clears the forward pass, `-b` enables both,
/// the later flag wins.
pub fn parse_command_line() -> (Cli, RunConfig) {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|error| error.exit());
    let config = resolve(&cli, &matches);

    (cli, config)
}

fn resolve(cli: &Cli, matches: &ArgMatches) -> RunConfig {
    let last_both = last_command_line_index(matches, "both");
    let last_reverse = last_command_line_index(matches, "reverse");

    let (forward, reverse_complement) = match (last_both, last_reverse) {
        (None, None) => (true, false),
        (Some(_), None) => (true, true),
        (None, Some(_)) => (false, true),
        (Some(both), Some(reverse)) => {
            if reverse > both {
                (false, true)
            } else {
                (true, true)
            }
        }
    };

    RunConfig {
        forward,
        reverse_complement,
        probability: cli.probability,
        min_length: cli.min_length,
    }
}

fn last_command_line_index(matches: &ArgMatches, id: &str) -> Option<usize> {
    if matches.value_source(id) != Some(ValueSource::CommandLine) {
        return None;
    }

    matches.indices_of(id).and_then(|indices| indices.last())
}

/// Never fails: a bad value is reported and the default kept. The warning
/// goes directly to stderr because the logger is not yet configured while
/// clap runs.
fn parse_probability(raw: &str) -> Result<f64, std::convert::Infallible> {
    match raw.parse::<f64>() {
        Ok(value) if (0.0..=1.0).contains(&value) => Ok(value),
        Ok(value) => {
            eprintln!(
                "tummer: a probability should be a value between 0 and 1; \
                 ignoring -p {value}"
            );
            Ok(DEFAULT_PROBABILITY)
        }
        Err(_) => {
            eprintln!(
                "tummer: expected a floating point number for -p, \
                 but '{raw}' was given; ignoring it"
            );
            Ok(DEFAULT_PROBABILITY)
        }
    }
}

fn parse_min_length(raw: &str) -> Result<usize, std::convert::Infallible> {
    match raw.parse::<usize>() {
        Ok(value) => Ok(value),
        Err(_) => {
            eprintln!("tummer: expected a number for -l, but '{raw}' was given; ignoring it");
            Ok(0)
        }
    }
}
