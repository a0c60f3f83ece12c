use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_FILTER: &str = "info,faturas=debug";

/// Installs the global subscriber once; later calls are ignored.
pub fn init_logging(filter: Option<&str>) {
    let env = filter
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
pub fn init_test_logging() {
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
