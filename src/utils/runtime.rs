use anyhow::Result;

/// Runtime used by the command line. Everything happens on one thread: the store is the only
/// thing that awaits and the statistics are computed synchronously.
pub fn single_thread_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
