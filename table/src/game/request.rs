use crate::types::*;

#[derive(Debug)]
pub enum Request {
    ClientReq(usize, protocol::ClientRequest),
    ClientLogin {
        ws_stream: WsStream,
    },
    ClientLogout(usize),
}
