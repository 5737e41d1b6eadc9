use env_logger::Env;

pub struct LogSetup;

impl LogSetup {
    /// Install the global logger. `RUST_LOG` wins over the configured level.
    pub fn init(level: &str) {
        let result = env_logger::Builder::from_env(Env::default().default_filter_or(level))
            .format_target(false)
            .format_timestamp(None)
            .try_init();

        if result.is_err() {
            log::debug!("Logger already initialised");
        }
    }
}
