//! Command-line front end for kmeanspp-rs
//!
//! ```text
//! kmeans lloyd <K> [--max-iter N] [--eps E] [INPUT]        # first K points as seeds
//! kmeans plusplus <K> [MAX_ITER] <EPS> <FILE1> <FILE2>     # keyed files, K-means++ seeds
//! kmeans elbow <INPUT> [--max-k N]                         # inertia curve and elbow
//! ```
//!
//! Points are comma-separated floats, one per line (or `.npy` arrays).
//! Centroids are printed with four decimals. Rejected input prints a short
//! message and exits with status 1.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kmeanspp_rs::elbow::{detect_elbow, inertia_curve};
use kmeanspp_rs::io::{
    format_centroids, format_indices, inner_join, parse_points, read_keyed_points, read_points,
};
use kmeanspp_rs::validate::{parse_count, ClusterParams};
use kmeanspp_rs::{fit, init, kmeans_plus_plus, KMeansError};
use log::{debug, info, LevelFilter};
use ndarray::Array2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kmeans", version, about = "K-means and K-means++ clustering")]
struct Cli {
    /// Log progress of every iteration to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lloyd's algorithm seeded with the first K points
    #[command(allow_negative_numbers = true)]
    Lloyd {
        /// Number of clusters (1 < K < N)
        #[arg(allow_hyphen_values = true)]
        k: String,

        /// Maximum number of iterations (1 < N < 1000)
        #[arg(long, default_value = "400")]
        max_iter: String,

        /// Convergence threshold on the largest centroid shift
        #[arg(long, default_value = "0.001", allow_hyphen_values = true)]
        eps: String,

        /// Points file; reads stdin when omitted
        input: Option<PathBuf>,
    },

    /// K-means++ seeding on the inner join of two keyed files, then Lloyd
    #[command(allow_negative_numbers = true)]
    Plusplus {
        /// K [MAX_ITER] EPS FILE1 FILE2; files are keyed by column 0 and
        /// must have the same number of rows
        #[arg(num_args = 4..=5, value_name = "ARGS", required = true)]
        args: Vec<String>,

        /// Maximum number of iterations when MAX_ITER is not given positionally
        #[arg(long, default_value = "300")]
        max_iter: String,

        /// Seed for the K-means++ random generator
        #[arg(long, default_value_t = 1234)]
        seed: u64,
    },

    /// Inertia for k = 1..=max_k and the elbow of that curve
    Elbow {
        /// Points file
        input: PathBuf,

        /// Largest k to try
        #[arg(long, default_value_t = 10)]
        max_k: usize,

        /// Maximum number of iterations per run
        #[arg(long, default_value_t = 300)]
        max_iter: usize,

        /// Convergence threshold on the largest centroid shift
        #[arg(long, default_value_t = 1e-4)]
        eps: f64,

        /// Base seed; run k uses seed + k
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn parse_params(k: &str, max_iter: &str, eps: &str) -> Result<ClusterParams, KMeansError> {
    let k = parse_count(k)
        .ok_or_else(|| KMeansError::InvalidK(format!("'{}' is not a whole number", k)))?;
    let max_iter = parse_count(max_iter).ok_or_else(|| {
        KMeansError::InvalidMaxIter(format!("'{}' is not a whole number", max_iter))
    })?;
    let eps: f64 = eps
        .trim()
        .parse()
        .map_err(|_| KMeansError::InvalidEps(format!("'{}' is not a number", eps)))?;

    Ok(ClusterParams::new(k, max_iter, eps))
}

fn run_lloyd(k: &str, max_iter: &str, eps: &str, input: Option<PathBuf>) -> Result<()> {
    let params = parse_params(k, max_iter, eps)?;

    let points: Array2<f64> = match &input {
        Some(path) => {
            read_points(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => parse_points(std::io::stdin().lock()).context("reading stdin")?,
    };
    params.validate(points.nrows())?;

    info!(
        "Lloyd: {} points, {} features, k = {}",
        points.nrows(),
        points.ncols(),
        params.k
    );

    let seeding = init::first_k(&points.view(), params.k)?;
    let result = fit(
        &points.view(),
        &seeding.centroids.view(),
        params.max_iter,
        params.eps,
    )?;

    println!("{}", format_centroids(&result.centroids.view()));
    Ok(())
}

/// Positional arguments of `plusplus`: `K [MAX_ITER] EPS FILE1 FILE2`
#[derive(Debug, PartialEq)]
struct PlusplusArgs<'a> {
    k: &'a str,
    max_iter: &'a str,
    eps: &'a str,
    file1: PathBuf,
    file2: PathBuf,
}

impl<'a> PlusplusArgs<'a> {
    fn split(args: &'a [String], default_max_iter: &'a str) -> Result<Self, KMeansError> {
        match args {
            [k, max_iter, eps, file1, file2] => Ok(Self {
                k,
                max_iter,
                eps,
                file1: file1.into(),
                file2: file2.into(),
            }),
            [k, eps, file1, file2] => Ok(Self {
                k,
                max_iter: default_max_iter,
                eps,
                file1: file1.into(),
                file2: file2.into(),
            }),
            _ => Err(KMeansError::InvalidDimensions(format!(
                "plusplus takes 4 or 5 arguments, got {}",
                args.len()
            ))),
        }
    }
}

fn run_plusplus(args: &[String], default_max_iter: &str, seed: u64) -> Result<()> {
    let PlusplusArgs {
        k,
        max_iter,
        eps,
        file1,
        file2,
    } = PlusplusArgs::split(args, default_max_iter)?;
    let params = parse_params(k, max_iter, eps)?;

    let left = read_keyed_points(&file1).with_context(|| format!("reading {}", file1.display()))?;
    let right =
        read_keyed_points(&file2).with_context(|| format!("reading {}", file2.display()))?;
    if left.len() != right.len() {
        return Err(KMeansError::InvalidK(format!(
            "{} has {} rows but {} has {}",
            file1.display(),
            left.len(),
            file2.display(),
            right.len()
        ))
        .into());
    }
    let joined = inner_join(&left, &right);
    debug!(
        "joined {} and {} rows into {} rows of dimension {}",
        left.len(),
        right.len(),
        joined.len(),
        joined.dim()
    );

    params.validate(joined.len())?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let seeding = kmeans_plus_plus(&joined.points.view(), params.k, &mut rng)?;
    let result = fit(
        &joined.points.view(),
        &seeding.centroids.view(),
        params.max_iter,
        params.eps,
    )?;

    println!("{}", format_indices(&seeding.indices));
    println!("{}", format_centroids(&result.centroids.view()));
    Ok(())
}

fn run_elbow(input: PathBuf, max_k: usize, max_iter: usize, eps: f64, seed: u64) -> Result<()> {
    let points = read_points(&input).with_context(|| format!("reading {}", input.display()))?;

    let curve = inertia_curve(&points.view(), max_k, max_iter, eps, seed)?;
    for (k, inertia) in curve.ks.iter().zip(curve.inertias.iter()) {
        println!("{},{:.4}", k, inertia);
    }

    if let Some((k, inertia)) = detect_elbow(&curve) {
        println!("elbow at k={} (inertia {:.4})", k, inertia);
    }
    Ok(())
}

/// Short message shown to the user for a failed run
fn user_message(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<KMeansError>() {
        Some(KMeansError::InvalidK(_)) => "Invalid number of clusters!",
        Some(KMeansError::InvalidMaxIter(_)) => "Invalid maximum iteration!",
        Some(KMeansError::InvalidEps(_)) => "Invalid epsilon!",
        _ => "An Error Has Occurred",
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are not failures
            if !err.use_stderr() {
                err.exit();
            }
            let _ = err.print();
            println!("An Error Has Occurred");
            std::process::exit(1);
        }
    };
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Command::Lloyd {
            k,
            max_iter,
            eps,
            input,
        } => run_lloyd(&k, &max_iter, &eps, input),
        Command::Plusplus {
            args,
            max_iter,
            seed,
        } => run_plusplus(&args, &max_iter, seed),
        Command::Elbow {
            input,
            max_k,
            max_iter,
            eps,
            seed,
        } => run_elbow(input, max_k, max_iter, eps, seed),
    };

    if let Err(err) = outcome {
        debug!("{:#}", err);
        println!("{}", user_message(&err));
        std::process::exit(1);
    }
}
