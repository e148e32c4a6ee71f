// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;
use crate::utils::log;

/// Validate configuration and log a registry summary.
pub fn run_validate(config: &Config) -> Result<()> {
    log::header("Validating configuration");

    if let Err(e) = config.validate() {
        log::error(&format!("Config validation failed: {}", e));
        return Err(e);
    }

    log::success("Config OK");
    log::sub_item(&format!("API: {}", config.api.base_url));
    log::sub_item(&format!("API key variable: {}", config.api.api_key_env));
    log::sub_item(&format!("Poll interval: {}s", config.api.poll_interval_secs));
    log::sub_item(&format!("Cycle interval: {}s", config.schedule.interval_secs));
    log::sub_item(&format!("Job store: {}", config.sink.store_path));

    for platform in &config.platforms {
        log::sub_item(&format!(
            "{} via {}: {} sources, {}s deadline{}",
            platform.platform,
            platform.actor_id,
            platform.sources.len(),
            platform.run_timeout().as_secs(),
            if platform.enabled { "" } else { " (disabled)" }
        ));
    }
    Ok(())
}
