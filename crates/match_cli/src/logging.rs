use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` drives filtering (default
/// `info`); logs go to stderr so stdout stays pure JSON output.
pub fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}
