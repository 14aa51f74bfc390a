use tracing_subscriber::{
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

/// Install the global `fmt` subscriber, filtered by `RUST_LOG` (default
/// `info`). Fails if a global subscriber is already set.
pub fn init_tracing() -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish()
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_reported() {
        let _ = init_tracing();
        assert!(init_tracing().is_err());
    }
}
