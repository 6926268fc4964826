// src/bin/tdigest_cli.rs
use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use naive_tdigest::tdigest::{DigestOptions, ScaleFamily, TDigest, DEFAULT_COMPRESSION};
use naive_tdigest::TdError;

#[cfg(target_os = "linux")]
use jemallocator::Jemalloc;

#[global_allocator]
#[cfg(target_os = "linux")]
static ALLOC: Jemalloc = Jemalloc;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scale {
    K1,
    K2,
    K3,
    Quad,
}
impl From<Scale> for ScaleFamily {
    fn from(s: Scale) -> Self {
        match s {
            Scale::K1 => ScaleFamily::K1,
            Scale::K2 => ScaleFamily::K2,
            Scale::K3 => ScaleFamily::K3,
            Scale::Quad => ScaleFamily::Quad,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Compression parameter (> 0); larger keeps more centroids
    #[arg(short = 'c', long, default_value_t = DEFAULT_COMPRESSION)]
    compression: f64,

    /// Scale family (k1|k2|k3|quad)
    #[arg(short = 's', long, value_enum, default_value_t = Scale::K1)]
    scale: Scale,

    /// Read samples from this file instead of stdin (space/comma/newline separated)
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print one quantile estimate per line, in the order given
    Quantile {
        /// q in [0,1]; repeat for several probes
        #[arg(short, long, required = true, num_args = 1..)]
        q: Vec<f64>,
    },
    /// Print the median estimate
    Median,
    /// Print the compressed digest as `mean<TAB>weight` lines
    Centroids,
}

fn parse_numbers(s: &str) -> Result<Vec<f64>, Box<dyn Error>> {
    let mut out = Vec::new();
    for tok in s
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|t| !t.is_empty())
    {
        out.push(tok.parse::<f64>()?);
    }
    Ok(out)
}

fn read_samples(input: Option<&PathBuf>) -> Result<Vec<f64>, Box<dyn Error>> {
    let s = match input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s)?;
            s
        }
    };
    parse_numbers(&s)
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let opts = DigestOptions::new(args.compression).with_scale(args.scale.into());
    let xs = read_samples(args.input.as_ref())?;
    let digest = TDigest::from_values(&xs, opts)?;

    match args.cmd {
        Cmd::Quantile { q } => {
            for v in digest.quantiles(&q)? {
                println!("{v}");
            }
        }
        Cmd::Median => println!("{}", digest.median()?),
        Cmd::Centroids => {
            for c in digest.centroids() {
                println!("{}\t{}", c.mean(), c.weight());
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    match run(args) {
        Err(e) if e.downcast_ref::<TdError>().is_some() => {
            eprintln!("{e}");
            std::process::exit(2);
        }
        other => other,
    }
}
