//! Cluster a generated point cloud and report the converged centroids
//!
//! Usage: `lloyd2d <points> <k> <threads> [--seed N] [--snapshots out.jsonl]`

#[macro_use]
extern crate log;

use clap::Parser;
use lloyd2d::{run, EmptyClusterPolicy, JsonLinesWriter, KMeansConfig, NoopObserver};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser, Clone, Debug)]
#[command(version, about = "Lloyd's k-means over random 2-D points")]
struct ArgParser {
    /// Number of points to generate
    points: usize,

    /// Number of clusters
    k: usize,

    /// Number of worker threads
    #[arg(default_value_t = 1)]
    threads: usize,

    /// Seed for point generation
    #[arg(long, default_value_t = 10_100)]
    seed: u64,

    /// Coordinates are drawn from [0, max-coordinate)
    #[arg(long, default_value_t = 100.0)]
    max_coordinate: f64,

    /// Stop after this many iterations even if not converged
    #[arg(long)]
    max_iters: Option<usize>,

    /// Abort when a cluster owns no points instead of keeping its centroid
    #[arg(long, default_value_t = false)]
    fail_on_empty: bool,

    /// Write every iteration's state as JSON lines to this file
    #[arg(long)]
    snapshots: Option<PathBuf>,

    /// Verbose logging
    #[arg(long, default_value_t = false)]
    debug: bool,
}

impl ArgParser {
    fn to_config(&self) -> KMeansConfig {
        let policy = if self.fail_on_empty {
            EmptyClusterPolicy::Fail
        } else {
            EmptyClusterPolicy::KeepPrevious
        };

        KMeansConfig::new(self.k)
            .with_n_points(self.points)
            .with_max_coordinate(self.max_coordinate)
            .with_seed(self.seed)
            .with_workers(self.threads)
            .with_max_iters(self.max_iters)
            .with_empty_cluster(policy)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ArgParser::parse();

    let mut builder = pretty_env_logger::formatted_timed_builder();
    let level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    builder.filter_level(level).init();

    let config = args.to_config();
    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(1);
    }

    println!("Number of points: {}", config.n_points);
    println!("Number of centroids: {}", config.k);

    let result = match &args.snapshots {
        Some(path) => {
            let mut writer = JsonLinesWriter::new(BufWriter::new(File::create(path)?));
            let result = run(&config, &mut writer)?;
            writer.finish()?;
            info!("Wrote snapshots to {}", path.display());
            result
        }
        None => run(&config, &mut NoopObserver)?,
    };

    println!("Time: {:?}", result.elapsed);
    if result.converged {
        println!("Converged");
    } else {
        println!("Stopped before convergence");
    }
    println!("Steps: {}", result.n_iterations);
    println!("Centroids:");
    for (i, c) in result.centroids.iter().enumerate() {
        println!("  {}: ({:.4}, {:.4})", i, c.x, c.y);
    }

    Ok(())
}
