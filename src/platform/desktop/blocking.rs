use std::time::Instant;

/// Runs file I/O on the UI thread, logging how long it took. Documents are
/// small enough that load and save stay synchronous.
pub fn run_blocking<F, T>(label: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let started = Instant::now();
    let result = f();
    tracing::debug!(
        operation = label,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "blocking operation finished"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_blocking_returns_the_closure_result() {
        assert_eq!(run_blocking("sum", || 2 + 3), 5);
    }
}
