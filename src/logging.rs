//! Logging setup for host applications
//!
//! The crate itself only emits through the `log` facade. Hosts that do not
//! bring their own logger can call [`init`].

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info,locale_manager=debug";

/// Initialize `env_logger`, honouring `RUST_LOG`
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let env = env_logger::Env::default().default_filter_or(DEFAULT_FILTER);

    if env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init()
        .is_ok()
    {
        log::debug!("Logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        log::info!("still logging");
    }
}
