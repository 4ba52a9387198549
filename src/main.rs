use std::error::Error;

use clap::Parser;
use log::{error, info, LevelFilter};

mod args;
mod board;

fn main() {
    let args = args::Args::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    info!("args: {:?}", args);

    if let Err(e) = board::run(&args) {
        error!("{:?}", e);
        eprintln!("An error occured: {}", e);
        let mut cause = e.source();
        while let Some(c) = cause {
            eprintln!("  caused by: {}", c);
            cause = c.source();
        }
        std::process::exit(1);
    }
}
