//! Transport primitives: typed values, messages and the single-peer
//! connection.
//!
//! The attribute-tree engine consumes these as an "append/read typed
//! value" and "send request, get asynchronous reply" capability; the
//! byte-level marshaling of a real bus lives outside this crate.

pub mod connection;
pub mod message;
pub mod path;
pub mod value;


pub use connection::{Connection, PendingCall, TransportError};
pub use message::{Message, MessageKind};
pub use path::ObjectPath;
pub use value::{Array, Dict, Value};
