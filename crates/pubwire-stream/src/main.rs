//! pubwire-replay
//!
//! Routes a recorded subscribe response through the envelope router:
//! - strict YAML config (routing + paging sections)
//! - every event delivered to a logging listener
//! - router counters printed on exit
//!
//! Usage: `pubwire-replay <config.yaml> <subscribe-response.json>`
//! Log level comes from `RUST_LOG`.

use std::fs;
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use pubwire_core::error::{PubwireError, Result};
use pubwire_stream::dispatch::{Dispatcher, LoggingListener};
use pubwire_stream::paging::PagingPolicy;
use pubwire_stream::router::{EnvelopeRouter, EventKind};
use pubwire_stream::config;

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut args = std::env::args().skip(1);
    let (Some(config_path), Some(input_path)) = (args.next(), args.next()) else {
        eprintln!("usage: pubwire-replay <config.yaml> <subscribe-response.json>");
        return ExitCode::from(2);
    };

    match run(&config_path, &input_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "replay failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: &str, input_path: &str) -> Result<()> {
    let cfg = config::load_from_file(config_path)?;
    let paging = PagingPolicy::try_from(&cfg.paging)?;
    tracing::info!(
        presence_suffix = %cfg.routing.presence_suffix,
        strict_kinds = cfg.routing.strict_kinds,
        ?paging,
        "pubwire-replay starting"
    );

    let router = EnvelopeRouter::new(&cfg.routing);
    let dispatcher = Dispatcher::new();
    for kind in EventKind::ALL {
        dispatcher.register(Arc::new(LoggingListener::new(kind)));
    }

    let buf = fs::read(input_path)
        .map_err(|e| PubwireError::Internal(format!("read input failed: {e}")))?;
    let batch = router.route_response(&buf)?;

    for failure in &batch.failures {
        tracing::warn!(
            index = failure.index,
            channel = %failure.channel,
            code = failure.error.code().as_str(),
            error = %failure.error,
            "envelope failed to decode"
        );
    }
    for event in &batch.events {
        dispatcher.dispatch(event)?;
    }

    tracing::info!(
        cursor = batch.cursor.timetoken,
        region = batch.cursor.region,
        events = batch.events.len(),
        failures = batch.failures.len(),
        "replay finished"
    );
    print!("{}", router.metrics().render());
    Ok(())
}
