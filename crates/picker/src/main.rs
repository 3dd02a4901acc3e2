use picker::config;
use picker::sys::runtime;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match config::write_default_config() {
        Ok(path) => log::debug!("Config at {}", path.display()),
        Err(e) => log::error!("Failed to write default config: {}", e),
    }
    let config = config::load_or_setup();

    runtime::run(config)
}
