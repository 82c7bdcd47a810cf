use log::LevelFilter;

/// Initialize the logger at `level`, letting `RUST_LOG` override it.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
