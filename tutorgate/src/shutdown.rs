/// Resolves when the process receives a stop request, SIGTERM or SIGINT.
#[cfg(unix)]
pub async fn wait() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let mut signal_terminate = signal(SignalKind::terminate()).unwrap();
    let mut signal_interrupt = signal(SignalKind::interrupt()).unwrap();

    tokio::select! {
        _ = signal_terminate.recv() => "SIGTERM",
        _ = signal_interrupt.recv() => "SIGINT",
    }
}

#[cfg(not(unix))]
pub async fn wait() -> &'static str {
    let _ = tokio::signal::ctrl_c().await;
    "CTRL_C"
}
