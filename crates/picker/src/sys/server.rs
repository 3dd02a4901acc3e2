use crate::events::AppEvent;
use async_channel::Sender;
use swatch::protocol::{Command, SOCKET_PATH};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;

pub async fn run_server(tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if std::fs::metadata(SOCKET_PATH).is_ok() {
        let _ = std::fs::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };
    log::info!("Listening on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let (reader, mut writer) = stream.into_split();
                    let mut lines = BufReader::new(reader).lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        let reply = dispatch(&tx, line.trim()).await;
                        if writer.write_all(format!("{}\n", reply).as_bytes()).await.is_err() {
                            break;
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

async fn dispatch(tx: &Sender<AppEvent>, line: &str) -> String {
    let command = match line.parse::<Command>() {
        Ok(c) => c,
        Err(e) => return format!("error {}", e),
    };

    let (reply_tx, reply_rx) = async_channel::bounded(1);
    if tx
        .send(AppEvent::Command {
            command,
            reply: reply_tx,
        })
        .await
        .is_err()
    {
        return "error picker is shutting down".to_string();
    }

    reply_rx
        .recv()
        .await
        .unwrap_or_else(|_| "error no reply".to_string())
}
