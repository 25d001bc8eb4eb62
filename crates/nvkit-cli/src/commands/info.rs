//! Library discovery report.
//!
//! Loads each wrapped library independently so one missing library does not
//! hide the others.

use anyhow::Result;
use nvkit_core::NativeLibrary;
use nvkit_fft::Cufft;
use nvkit_npp::Npp;
use nvkit_rand::Curand;
use nvkit_solver::{Cusolver, Cusparse};
use tracing::debug;

use crate::InfoArgs;

/// Prints one line per library: where it loaded from and its version.
pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    report("cufft", Cufft::load().map(|lib| (location(lib.library()), lib.version().map(|v| v.to_string()))), &args);
    report("curand", Curand::load().map(|lib| (location(lib.library()), lib.version().map(|v| v.to_string()))), &args);
    report("cusolver", Cusolver::load().map(|lib| (location(lib.library()), lib.version().map(|v| v.to_string()))), &args);
    report(
        "cusparse",
        Cusparse::load().map(|lib| (location(lib.library()), lib.version().map(|(a, b, c)| format!("{a}.{b}.{c}")))),
        &args,
    );

    match Npp::load() {
        Ok(npp) => {
            let version = npp.version().map(|v| format!("{}.{}.{}", v.major, v.minor, v.build));
            report("npp", Ok::<_, nvkit_npp::NppError>((format!("{} libraries", npp.libraries().len()), version)), &args);
            if verbose {
                for lib in npp.libraries() {
                    println!("    {:<10} {}", lib.name(), location(lib));
                }
            }
        }
        Err(err) => report::<String, _>("npp", Err(err), &args),
    }
    Ok(())
}

fn location(lib: &NativeLibrary) -> String {
    lib.path().unwrap_or("<table>").to_owned()
}

fn report<V, E>(name: &str, loaded: Result<(String, Result<V, E>), E>, args: &InfoArgs)
where
    V: std::fmt::Display,
    E: std::fmt::Display,
{
    match loaded {
        Ok((_, _)) if args.quiet => println!("{name:<10} ok"),
        Ok((from, Ok(version))) => println!("{name:<10} {version:<12} {from}"),
        Ok((from, Err(err))) => {
            debug!(library = name, error = %err, "version query failed");
            println!("{name:<10} {:<12} {from}", "?");
        }
        Err(err) if args.quiet => {
            debug!(library = name, error = %err, "load failed");
            println!("{name:<10} missing");
        }
        Err(err) => println!("{name:<10} missing: {err}"),
    }
}
