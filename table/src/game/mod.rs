mod state;
mod request;

use log::{info, warn};

use tokio::sync::mpsc::{Sender, Receiver, channel};
use futures::SinkExt;

use state::GameState;

use crate::consts::*;
use crate::types::*;
use crate::client::Client;
use crate::words::WordPool;
pub use request::Request as TableReq;

use protocol::{BinCodeMessage, ClientRequest as ClientReq, ServerResponse as Resp, Phase, PlayerEntry, Snapshot};

/// One two-seat game. Connection tasks feed requests through the loopback
/// channel; this task is the only writer of the game state.
pub struct Table {
    state: GameState,
    words: WordPool,

    seats: [Option<Client>; SEAT_COUNT],
    /// The joined name each seat acts under. Bound by an accepted `Join`,
    /// cleared on disconnect and on reset.
    seat_names: [Option<String>; SEAT_COUNT],

    tb_rx: Receiver<TableReq>,
    loopback: Sender<TableReq>,
}

impl Table {
    pub fn new(words: WordPool) -> Self {
        let (loopback, tb_rx) = channel::<TableReq>(32);

        Self {
            state: GameState::new(),
            words,

            seats: [None, None],
            seat_names: [None, None],

            tb_rx,
            loopback,
        }
    }

    pub fn get_tx(&self) -> Sender<TableReq> {
        self.loopback.clone()
    }

    pub async fn run(&mut self) {
        while let Some(req) = self.tb_rx.recv().await {
            match req {
                TableReq::ClientReq(seat, req) => {
                    if self.permits(seat, &req) {
                        self.handle(seat, req).await;
                    }
                }
                TableReq::ClientLogin { ws_stream } => {
                    self.login(ws_stream).await;
                }
                TableReq::ClientLogout(seat) => {
                    self.logout(seat);
                }
            }
        }
    }

    /// Whether a seat is entitled to a request in the current phase.
    /// Anything refused here is dropped without a reply.
    fn permits(&self, seat: usize, req: &ClientReq) -> bool {
        match req {
            ClientReq::Join { .. } => true,
            ClientReq::Reset => true,
            ClientReq::StartRound => self.state.phase == Phase::Lobby,
            ClientReq::NextTurn => self.state.phase == Phase::RoundOver,
            ClientReq::Frame { .. } => {
                self.state.phase == Phase::Playing && self.is_drawer(seat)
            }
            ClientReq::Guess { .. } => {
                self.state.phase == Phase::Playing
                    && !self.is_drawer(seat)
                    && self.joined_name(seat).is_some()
            }
        }
    }

    async fn handle(&mut self, seat: usize, req: ClientReq) {
        match req {
            ClientReq::Join { name } => {
                self.bind_name(seat, name).await;
            }
            ClientReq::StartRound => {
                if self.state.start_round(&self.words) {
                    self.begin_turn().await;
                } else {
                    self.send(seat, Resp::Notice {
                        msg: "need two players to start".to_string(),
                    }).await;
                }
            }
            ClientReq::Frame { bin } => {
                self.state.update_drawing(bin.clone());
                let revision = self.state.revision;
                self.broadcast_except(Resp::Frame { bin, revision }, seat).await;
            }
            ClientReq::Guess { text } => {
                if let Some(guesser) = self.joined_name(seat) {
                    self.state.guess(&guesser, &text);
                    self.broadcast_snapshot().await;
                    if self.state.phase == Phase::RoundOver {
                        self.broadcast(Resp::Notice {
                            msg: self.state.last_outcome.clone(),
                        }).await;
                    }
                }
            }
            ClientReq::NextTurn => {
                if self.state.next_turn(&self.words) {
                    self.begin_turn().await;
                }
            }
            ClientReq::Reset => {
                self.reset().await;
            }
        }
    }

    async fn login(&mut self, ws_stream: WsStream) {
        let free = (0..SEAT_COUNT).find(|&seat| self.seats[seat].is_none());
        match free {
            Some(seat) => {
                let client = Client::new(seat, ws_stream, self.get_tx());
                client.send(Resp::Snapshot(self.snapshot())).await;
                self.seats[seat] = Some(client);
                info!("client seated at {}", seat);
            }
            None => {
                self.refuse(ws_stream).await;
            }
        }
    }

    async fn refuse(&self, mut ws_stream: WsStream) {
        warn!("refusing connection, table is full");
        if let Ok(msg) = Resp::TableFull.ser() {
            ws_stream.send(msg).await.unwrap_or_default();
        }
        ws_stream.close(None).await.unwrap_or_default();
    }

    fn logout(&mut self, seat: usize) {
        if let Some(client) = self.seats[seat].take() {
            client.abort();
            info!("seat {} ({:?}) disconnected", seat, self.seat_names[seat]);
        }
        self.seat_names[seat] = None;
    }

    /// Binds the seat to a name the game actually knows: either `join`
    /// accepted it, or it already belongs to a player (a reconnect). A
    /// rejected name leaves the seat unbound. A rejoining drawer gets the
    /// word back.
    async fn bind_name(&mut self, seat: usize, name: String) {
        let accepted = self.state.join(&name)
            || self.state.players.iter().any(|player| player == &name);
        if accepted {
            self.seat_names[seat] = Some(name);
            if self.is_drawer(seat) {
                if let Some(word) = self.state.current_word.clone() {
                    self.send(seat, Resp::Secret { word }).await;
                }
            }
        }
        self.broadcast_snapshot().await;
    }

    /// Pushes the fresh secret to the drawer, then the new round to everyone.
    async fn begin_turn(&mut self) {
        if let Some(word) = self.state.current_word.clone() {
            if let Some(seat) = self.drawer_seat() {
                self.send(seat, Resp::Secret { word }).await;
            }
        }
        self.broadcast_snapshot().await;
    }

    async fn reset(&mut self) {
        self.state.reset();
        self.seat_names = [None, None];
        info!("game reset to lobby");
        self.broadcast_snapshot().await;
    }

    fn drawer_seat(&self) -> Option<usize> {
        let drawer = self.state.players.get(self.state.drawer_idx)?;
        (0..SEAT_COUNT).find(|&seat| self.seat_names[seat].as_deref() == Some(drawer.as_str()))
    }

    fn is_drawer(&self, seat: usize) -> bool {
        self.drawer_seat() == Some(seat)
    }

    /// The seat's bound name, but only while it names a joined player.
    fn joined_name(&self, seat: usize) -> Option<String> {
        let name = self.seat_names[seat].as_deref()?;
        if self.state.players.iter().any(|player| player == name) {
            Some(name.to_string())
        } else {
            None
        }
    }

    async fn send(&self, seat: usize, resp: Resp) {
        if let Some(ref client) = self.seats[seat] {
            client.send(resp).await;
        }
    }

    async fn broadcast(&self, resp: Resp) {
        for client in self.seats.iter().flatten() {
            client.send(resp.clone()).await;
        }
    }

    async fn broadcast_except(&self, resp: Resp, except: usize) {
        for seat in 0..SEAT_COUNT {
            if seat != except {
                if let Some(ref client) = self.seats[seat] {
                    client.send(resp.clone()).await;
                }
            }
        }
    }

    async fn broadcast_snapshot(&self) {
        self.broadcast(Resp::Snapshot(self.snapshot())).await;
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.state.phase,
            players: self.state.players.iter().map(|name| PlayerEntry {
                name: name.clone(),
                score: self.state.scores.get(name).copied().unwrap_or(0),
            }).collect(),
            drawer: self.state.drawer_idx as u8,
            guesses_left: self.state.guesses_left as u8,
            last_outcome: self.state.last_outcome.clone(),
            revision: self.state.revision,
        }
    }
}
