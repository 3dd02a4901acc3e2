use crate::app::AppModel;
use crate::config::{self, Config};
use crate::delegate::LogDelegate;
use crate::events::AppEvent;
use crate::selector::Selector;
use async_channel::Sender;
use tokio::runtime::Runtime;

pub fn start_background_services(tx: Sender<AppEvent>) {
    {
        let tx = tx.clone();
        tokio::spawn(async move {
            crate::sys::server::run_server(tx).await;
        });
    }

    {
        let tx = tx.clone();
        tokio::spawn(async move {
            config::run_async_watcher(tx).await;
        });
    }
}

pub fn run(config: Config) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    let (tx, rx) = async_channel::bounded(32);

    log::info!(
        "Starting with {} swatches, radius {}, border {} {}",
        config.swatches.len(),
        config.radius,
        config.border.color,
        config.border.width
    );
    let selector = Selector::from_config(&config);

    rt.block_on(async {
        start_background_services(tx.clone());
        AppModel::new(selector, tx, Box::new(LogDelegate))
            .run(rx)
            .await;
    });
    Ok(())
}
