pub mod request;
pub mod response;

pub use request::*;
pub use response::*;

use serde::{Serialize, Deserialize};
use bincode::{serialize, deserialize, ErrorKind};
use tokio_tungstenite::tungstenite::Message;

pub trait BinCodeMessage<'a>: Serialize + Deserialize<'a>{
    fn deser(bin: &'a [u8]) -> Result<Self, Box<ErrorKind>> {
        deserialize::<Self>(bin)
    }

    fn ser(&self) -> Result<Message, Box<ErrorKind>> {
        let bin = serialize(&self)?;
        Ok(Message::Binary(bin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_request_survives_the_wire() {
        let req = ClientRequest::Guess { text: "Rainbow".to_string() };
        let msg = req.ser().unwrap();
        match msg {
            Message::Binary(bin) => {
                assert_eq!(ClientRequest::deser(&bin).unwrap(), req);
            }
            other => panic!("expected a binary frame, got {:?}", other),
        }
    }
}
