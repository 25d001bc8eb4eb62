//! Host-side random number generation.

use anyhow::{bail, Context, Result};
use nvkit_rand::{Curand, HostGenerator, PoissonDistribution};
use tracing::info;

use crate::{Dist, RandArgs};

/// Generates `n` values with a host generator and prints one per line.
pub fn run(args: RandArgs, verbose: bool) -> Result<()> {
    if args.seed.is_some() && args.kind.is_quasi() {
        bail!("{:?} is quasirandom and takes no seed", args.kind);
    }
    let curand = Curand::load().context("cuRAND is not available")?;
    let mut generator = match args.seed {
        Some(seed) => HostGenerator::seeded(&curand, args.kind, seed)?,
        None => HostGenerator::new(&curand, args.kind)?,
    };
    info!(kind = ?args.kind, dist = ?args.dist, n = args.n, "generating");

    let lines: Vec<String> = match args.dist {
        Dist::Uniform => {
            let mut values = vec![0f32; args.n];
            generator.uniform_f32(&mut values)?;
            values.iter().map(|v| format!("{v:.6}")).collect()
        }
        Dist::Normal => {
            // cuRAND produces normals in pairs
            let mut values = vec![0f32; args.n.next_multiple_of(2)];
            generator.normal_f32(&mut values, args.mean, args.stddev)?;
            values.truncate(args.n);
            values.iter().map(|v| format!("{v:.6}")).collect()
        }
        Dist::Poisson => {
            let mut values = vec![0u32; args.n];
            let mut dist = PoissonDistribution::new(&curand, args.lambda)?;
            dist.generate(&mut generator, &mut values)?;
            dist.release()?;
            values.iter().map(u32::to_string).collect()
        }
    };

    if verbose {
        println!("# {:?} {:?} n={}", args.kind, args.dist, args.n);
    }
    for line in lines {
        println!("{line}");
    }
    generator.release()?;
    Ok(())
}
