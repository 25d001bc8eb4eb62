//! nvkit - probe the CUDA math and imaging libraries
//!
//! Reports which libraries load, estimates cuFFT work areas and draws
//! random numbers on the host through cuRAND.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use nvkit_fft::TransformType;
use nvkit_rand::RngKind;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "nvkit")]
#[command(author, version, about = "Probe cuFFT, cuRAND, cuSOLVER and NPP")]
#[command(long_about = "
Loads the CUDA libraries the nvkit crates wrap and exercises them.

Library paths are taken from NVKIT_<LIB>_PATH, then CUDA_PATH / CUDA_HOME,
then the system loader. Log output is filtered by NVKIT_LOG or -v.

Examples:
  nvkit info                                # Which libraries load, and versions
  nvkit fft-estimate --nx 1024 --type c2c   # Work area for a 1D plan
  nvkit fft-estimate --nx 512 --ny 512 --type r2c
  nvkit rand --kind philox --dist normal -n 8 --seed 42
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which libraries resolve, from where, and their versions
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Estimate the cuFFT work area for a plan without creating it
    #[command(name = "fft-estimate", visible_alias = "fft")]
    FftEstimate(FftEstimateArgs),

    /// Generate random numbers with a host-side cuRAND generator
    Rand(RandArgs),
}

/// Arguments for the `info` command.
#[derive(Args)]
struct InfoArgs {
    /// Only report whether each library loads
    #[arg(short, long)]
    quiet: bool,
}

/// Arguments for the `fft-estimate` command.
#[derive(Args)]
struct FftEstimateArgs {
    /// Size of the first (innermost) dimension
    #[arg(long)]
    nx: i32,

    /// Size of the second dimension
    #[arg(long)]
    ny: Option<i32>,

    /// Size of the third dimension (requires --ny)
    #[arg(long, requires = "ny")]
    nz: Option<i32>,

    /// Transform type: r2c, c2r, c2c, d2z, z2d, z2z
    #[arg(short = 't', long = "type", default_value = "c2c")]
    ty: TransformType,

    /// Number of transforms (1D only)
    #[arg(short, long, default_value = "1")]
    batch: i32,
}

/// Value distribution for `rand`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Dist {
    /// Uniform on (0, 1]
    Uniform,
    /// Normal with --mean and --stddev
    Normal,
    /// Poisson with --lambda
    Poisson,
}

/// Arguments for the `rand` command.
#[derive(Args)]
struct RandArgs {
    /// Generator: xorwow, philox, mrg32k3a, mtgp32, mt19937, sobol32, ...
    #[arg(short, long, default_value = "xorwow")]
    kind: RngKind,

    /// Distribution
    #[arg(short, long, value_enum, default_value = "uniform")]
    dist: Dist,

    /// Number of values
    #[arg(short, default_value = "8")]
    n: usize,

    /// Seed (pseudorandom generators only)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Mean for --dist normal
    #[arg(long, default_value = "0.0")]
    mean: f32,

    /// Standard deviation for --dist normal
    #[arg(long, default_value = "1.0")]
    stddev: f32,

    /// Rate for --dist poisson
    #[arg(long, default_value = "4.0")]
    lambda: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("NVKIT_LOG").unwrap_or_else(|_| EnvFilter::new(filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let verbose = cli.verbose > 0;
    match cli.command {
        Commands::Info(args) => commands::info::run(args, verbose),
        Commands::FftEstimate(args) => commands::fft::run(args, verbose),
        Commands::Rand(args) => commands::rand::run(args, verbose),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fft_estimate() {
        let cli = Cli::parse_from(["nvkit", "fft-estimate", "--nx", "64", "--ny", "32", "--type", "r2c"]);
        let Commands::FftEstimate(args) = cli.command else { panic!("wrong command") };
        assert_eq!(args.nx, 64);
        assert_eq!(args.ny, Some(32));
        assert_eq!(args.nz, None);
        assert_eq!(args.ty, TransformType::R2C);
    }

    #[test]
    fn test_parse_rand_and_verbosity() {
        let cli = Cli::parse_from(["nvkit", "-vv", "rand", "--kind", "philox", "--dist", "poisson", "-n", "3"]);
        assert_eq!(cli.verbose, 2);
        let Commands::Rand(args) = cli.command else { panic!("wrong command") };
        assert_eq!(args.kind, RngKind::Philox4_32_10);
        assert_eq!(args.dist, Dist::Poisson);
        assert_eq!(args.n, 3);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn test_nz_requires_ny() {
        assert!(Cli::try_parse_from(["nvkit", "fft-estimate", "--nx", "8", "--nz", "8"]).is_err());
    }
}
