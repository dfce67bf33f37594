mod consts;
mod types;
mod words;
mod client;
mod game;

use log::{info, warn};
use tokio::net::TcpListener;

use crate::consts::PORT;
use crate::game::{Table, TableReq};
use crate::words::WordPool;

#[tokio::main]
async fn main() {
    env_logger::init();

    let words = WordPool::load().await;

    let mut table = Table::new(words);
    let table_tx = table.get_tx();
    let _table_handle = tokio::spawn(async move { table.run().await });

    let try_socket = TcpListener::bind(format!("0.0.0.0:{}", PORT)).await;
    let listener = try_socket.expect("failed to bind");
    info!("listening on port {}", PORT);

    while let Ok((stream, addr)) = listener.accept().await {
        let table_tx = table_tx.clone();
        tokio::spawn(async move {
            match tokio_tungstenite::accept_async(stream).await {
                Ok(ws_stream) => {
                    info!("connection from {}", addr);
                    table_tx
                        .send(TableReq::ClientLogin { ws_stream })
                        .await
                        .unwrap_or_default();
                }
                Err(err) => {
                    warn!("websocket handshake with {} failed: {}", addr, err);
                }
            }
        });
    }
}
