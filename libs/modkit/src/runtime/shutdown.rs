use anyhow::Result;

/// Resolves on the first SIGINT/SIGTERM (Ctrl+C/Ctrl+Break on Windows).
pub async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        let signal = tokio::select! {
            _ = sigterm.recv() => "SIGTERM",
            _ = sigint.recv()  => "SIGINT",
        };
        tracing::info!(signal, "shutdown signal received");
        Ok(())
    }

    #[cfg(windows)]
    {
        use tokio::signal::windows::{ctrl_break, ctrl_c};
        let mut c = ctrl_c()?;
        let mut br = ctrl_break()?;
        tokio::select! {
            _ = c.recv()  => {},
            _ = br.recv() => {},
        }
        tracing::info!("shutdown signal received");
        Ok(())
    }
}
