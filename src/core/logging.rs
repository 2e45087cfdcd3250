//! Logging initialization

/// Initialize env_logger with a default filter of `info` and millisecond
/// timestamps. `RUST_LOG` overrides the filter; `RUST_LOG=planetforge=debug`
/// also prints derived properties and biome weight tables.
///
/// # Example
/// ```no_run
/// use planetforge::{create_model, PlanetConfig};
///
/// planetforge::core::logging::init();
/// let model = create_model(PlanetConfig::desert(7)).unwrap();
/// log::info!("Sea level of '{}' is {}", model.name(), model.properties().sea_level);
/// ```
pub fn init() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .format_timestamp_millis()
    .init();
}
