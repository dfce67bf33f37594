use crate::consts::*;
use crate::types::*;
use crate::game::TableReq;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use futures::{StreamExt, SinkExt};

use protocol::{BinCodeMessage, ClientRequest, ServerResponse};

/// One websocket connection bound to a seat. The three tasks move frames
/// between the socket and the table's channel; game data lives in `GameState`
/// and the name a seat acts under is tracked by the table.
#[derive(Debug)]
pub struct Client {
    pub(crate) ws_from_table_tx: mpsc::Sender<WsMsg>,

    pub(crate) _tx_handle: JoinHandle<()>,
    pub(crate) _rx_handle: JoinHandle<()>,
    pub(crate) _ping_handle: JoinHandle<()>,
}

impl Client {
    pub(crate) fn new(seat: usize, stream: WsStream, table_tx: mpsc::Sender<TableReq>) -> Self {
        let (mut ws_tx, mut ws_rx) = stream.split();
        let (ws_from_table_tx, mut ws_from_table_rx) = mpsc::channel::<WsMsg>(128);

        let tx_ping = ws_from_table_tx.clone();
        let _ping_handle = tokio::spawn(async move {
            loop {
                tx_ping.send(WsMsg::Ping(Vec::new())).await.unwrap_or_default();
                time::sleep(HB_DURATION).await;
            }
        });

        let inbound_tx = table_tx.clone();
        let _rx_handle = tokio::spawn(async move {
            while let Some(Ok(ws_msg)) = ws_rx.next().await {
                match ws_msg {
                    WsMsg::Binary(bin) => {
                        if let Ok(req) = ClientRequest::deser(&bin) {
                            inbound_tx.send(TableReq::ClientReq(seat, req)).await.unwrap_or_default();
                        }
                    }
                    WsMsg::Close(_) => {
                        inbound_tx.send(TableReq::ClientLogout(seat)).await.unwrap_or_default();
                        break;
                    }
                    _ => {}
                }
            }
        });

        let logout_reminder = table_tx.clone();
        let _tx_handle = tokio::spawn(async move {
            use tokio_tungstenite::tungstenite::error::Error::AlreadyClosed;
            while let Some(ws_msg) = ws_from_table_rx.recv().await {
                match ws_tx.send(ws_msg).await {
                    Err(AlreadyClosed) => {
                        logout_reminder.send(TableReq::ClientLogout(seat)).await.unwrap_or_default();
                        break;
                    }
                    _ => {}
                }
            }
        });

        Self {
            ws_from_table_tx,

            _tx_handle,
            _rx_handle,
            _ping_handle,
        }
    }

    pub(crate) async fn send(&self, resp: ServerResponse) {
        if let Ok(msg) = resp.ser() {
            self.ws_from_table_tx.send(msg).await.unwrap_or_default()
        }
    }

    pub(crate) fn abort(&self) {
        self._rx_handle.abort();
        self._tx_handle.abort();
        self._ping_handle.abort();
    }
}
