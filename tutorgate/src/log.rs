use tracing_subscriber::EnvFilter;

pub fn set(env_filter: String) {
    let filter = EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new(env_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_file(true)
        .with_line_number(true)
        .init();
}
