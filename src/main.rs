// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
extern crate rustcommon_logger;

use rustcommon_logger::{LogBuilder, MultiLogBuilder, Stdout};
use tpm_plot::{Config, VERSION};

fn main() {
    let config = match Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // initialize logging
    let log = LogBuilder::new()
        .output(Box::new(Stdout::new()))
        .log_queue_depth(1024)
        .single_message_size(4096)
        .build()
        .expect("failed to initialize log");

    let mut log = MultiLogBuilder::new()
        .level_filter(config.general().logging().level_filter())
        .default(log)
        .build()
        .start();

    info!(
        "tpm-plot {}: {} figures from {}",
        VERSION,
        config.figures().len(),
        config.general().data_dir().display()
    );

    let status = match tpm_plot::run(&config) {
        Ok(written) => {
            for path in written {
                info!("wrote {}", path.display());
            }
            0
        }
        Err(e) => {
            error!("{}", e);
            1
        }
    };

    let _ = log.flush();
    std::process::exit(status);
}
