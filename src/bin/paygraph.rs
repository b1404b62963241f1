//! Command-line driver for the rolling payment-graph median.
//!
//! ```bash
//! paygraph --input payments.txt --output medians.txt
//! RUST_LOG=debug paygraph -i payments.txt -o medians.txt --window-size 120
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{error, info};

use paygraph::paygraph::pipeline::run_pipeline;
use paygraph::GraphConfig;

#[derive(Parser)]
#[command(name = "paygraph")]
#[command(about = "Rolling median of node degree over a trailing-window payment graph")]
#[command(version)]
struct Cli {
    /// Input file of line-delimited JSON payments
    #[arg(short, long)]
    input: PathBuf,

    /// Output file receiving one median per processed payment
    #[arg(short, long)]
    output: PathBuf,

    /// Trailing window width in seconds
    #[arg(short = 'w', long, default_value_t = paygraph::DEFAULT_WINDOW_SIZE)]
    window_size: i64,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match GraphConfig::new(cli.window_size) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            process::exit(2);
        }
    };

    info!(
        "processing {} into {} with a {}s window",
        cli.input.display(),
        cli.output.display(),
        config.window_size
    );
    match run_pipeline(&cli.input, &cli.output, config) {
        Ok(written) => info!("done; {} median line(s) written", written),
        Err(err) => {
            error!("pipeline failed: {}", err);
            process::exit(1);
        }
    }
}
