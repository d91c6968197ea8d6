use tokio::sync::watch;
use tokio::task::JoinError;
use tokio::task::JoinHandle;

/// A spawned server future.
pub type ServerTask = JoinHandle<anyhow::Result<()>>;

/// Run both servers until the first one stops, then stop the other.
///
/// Whichever server exits first (cleanly or not) triggers `shutdown` so the
/// other drains and exits too. The first failure is returned.
pub async fn supervise(
    mut http: ServerTask,
    mut grpc: ServerTask,
    shutdown: &watch::Sender<()>,
) -> anyhow::Result<()> {
    let (stopped, result) = tokio::select! {
        result = &mut http => ("http", result),
        result = &mut grpc => ("grpc", result),
    };
    let first = report(stopped, result);

    let _ = shutdown.send(());

    let (name, task) = if stopped == "http" {
        ("grpc", grpc)
    } else {
        ("http", http)
    };
    let second = report(name, task.await);

    first.and(second)
}

fn report(
    server: &'static str,
    result: Result<anyhow::Result<()>, JoinError>,
) -> anyhow::Result<()> {
    match result {
        Ok(Ok(())) => {
            tracing::info!(server, "Server exited");
            Ok(())
        }
        Ok(Err(e)) => {
            tracing::error!(server, error = %e, "Server failed");
            Err(e)
        }
        Err(e) => {
            tracing::error!(server, error = %e, "Server task failed");
            Err(e.into())
        }
    }
}
