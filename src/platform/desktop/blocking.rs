use anyhow::{Context, Result};

/// Runs `f` on the runtime's blocking pool so the UI task keeps rendering.
pub async fn run_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .context("background task failed")
}
