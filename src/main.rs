#![cfg_attr(not(test), deny(clippy::unwrap_used))]

use std::process::ExitCode;

use fanout::bench::{self, report, BenchmarkConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fanout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("benchmark failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> fanout::Result<()> {
    let config = BenchmarkConfig::from_env()?;
    tracing::info!(
        sizes = ?config.sizes,
        min_degree = config.min_degree,
        seed = config.seed,
        repetitions = config.repetitions,
        "loaded configuration"
    );

    println!();
    print!(
        "{}",
        report::render_header("B-Tree vs Binary Search Tree Benchmark")
    );

    let runs = bench::run_all(&config)?;
    report::write_report(
        &mut std::io::stdout().lock(),
        &runs,
        config.min_degree,
        &config.disk,
    )?;

    let paths = report::export_all(&config.output_dir, &runs, config.min_degree, &config.disk)?;
    println!("\nFiles written:");
    for path in paths {
        println!("  - {}", path.display());
    }

    Ok(())
}
