//! Work area estimate for a cuFFT plan.

use anyhow::{bail, Context, Result};
use nvkit_fft::{Cufft, FftPlan, PlanShape, Shape1d, Shape2d, Shape3d, TransformType};

use crate::FftEstimateArgs;

/// Prints the estimated work area for the requested plan shape.
pub fn run(args: FftEstimateArgs, verbose: bool) -> Result<()> {
    if args.batch != 1 && args.ny.is_some() {
        bail!("--batch applies to 1D plans only");
    }
    let cufft = Cufft::load().context("cuFFT is not available")?;

    let (label, bytes) = match (args.ny, args.nz) {
        (None, _) => describe(&cufft, Shape1d::new(args.nx, args.batch), args.ty)?,
        (Some(ny), None) => describe(&cufft, Shape2d::new(args.nx, ny), args.ty)?,
        (Some(ny), Some(nz)) => describe(&cufft, Shape3d::new(args.nx, ny, nz), args.ty)?,
    };

    println!("{label} {:?}: {}", args.ty, format_size(bytes));
    if verbose {
        println!("  bytes: {bytes}");
        if let Some(path) = cufft.library().path() {
            println!("  library: {path}");
        }
    }
    Ok(())
}

fn describe<S: PlanShape>(cufft: &Cufft, shape: S, ty: TransformType) -> Result<(String, usize)> {
    let bytes = FftPlan::estimate(cufft, &shape, ty).with_context(|| format!("estimate for {shape:?} failed"))?;
    Ok((format!("{shape:?}"), bytes))
}

/// Formats a byte count with a binary unit.
pub fn format_size(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 { format!("{bytes} B") } else { format!("{value:.1} {}", UNITS[unit]) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(8 << 20), "8.0 MiB");
    }
}
