//! The single-peer transport the protocol engine runs over.

use std::collections::{HashMap, HashSet, VecDeque};

use log::trace;
use thiserror::Error;

use crate::dispatch::{DispatchStatus, Dispatcher};

use super::message::{Message, MessageKind};

/// Transport failures. Unavailability at startup is fatal to the
/// process; nothing else here is.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no connection to the peer bus")]
    Unavailable,
}

/// Handle for an in-flight asynchronous method call.
///
/// The reply, when it arrives, is claimed with
/// [`Connection::take_reply`]; the main loop is never blocked on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingCall {
    serial: u32,
}

impl PendingCall {
    pub fn serial(&self) -> u32 {
        self.serial
    }
}

/// In-memory connection to the peer.
///
/// Messages from the peer are pushed onto the inbound queue; messages
/// this side sends accumulate on the outbound queue for the peer (or a
/// test) to drain. Replies to pending calls are routed by reply
/// serial and held until claimed.
#[derive(Debug, Default)]
pub struct Connection {
    inbound: VecDeque<Message>,
    outbound: VecDeque<Message>,
    next_serial: u32,
    awaiting: HashSet<u32>,
    completed: HashMap<u32, Message>,
}

impl Connection {
    /// Open the connection to the peer.
    pub fn open() -> Result<Self, TransportError> {
        Ok(Self {
            next_serial: 1,
            ..Self::default()
        })
    }

    /// Send a message without expecting a reply. Returns the serial
    /// assigned to it.
    pub fn send(&mut self, mut message: Message) -> u32 {
        let serial = self.next_serial;
        self.next_serial += 1;
        message.serial = serial;
        self.outbound.push_back(message);
        serial
    }

    /// Send a method call and register interest in its reply.
    pub fn send_with_reply(&mut self, message: Message) -> PendingCall {
        let serial = self.send(message);
        self.awaiting.insert(serial);
        PendingCall { serial }
    }

    /// Claim the reply to a pending call, if it has arrived.
    pub fn take_reply(&mut self, call: &PendingCall) -> Option<Message> {
        self.completed.remove(&call.serial)
    }

    /// Enqueue a message arriving from the peer.
    pub fn push_inbound(&mut self, message: Message) {
        self.inbound.push_back(message);
    }

    /// Drain everything queued for the peer.
    pub fn drain_outbound(&mut self) -> Vec<Message> {
        self.outbound.drain(..).collect()
    }

    /// Number of messages queued for the peer.
    pub fn outbound_len(&self) -> usize {
        self.outbound.len()
    }

    /// Drain the inbound queue once, routing replies to their pending
    /// calls and dispatching everything else through `dispatcher`.
    ///
    /// Unrecognised messages fall through the dispatcher unhandled and
    /// are dropped; they are never fatal.
    pub fn read_write_dispatch(&mut self, dispatcher: &Dispatcher) {
        while let Some(message) = self.inbound.pop_front() {
            if let Some(reply_serial) = message.reply_serial {
                if self.awaiting.remove(&reply_serial) {
                    self.completed.insert(reply_serial, message);
                    continue;
                }
            }

            match dispatcher.dispatch(&message) {
                DispatchStatus::Handled(Some(reply)) => {
                    self.send(reply);
                }
                DispatchStatus::Handled(None) => {}
                DispatchStatus::NotHandled => {
                    if message.kind == MessageKind::MethodCall {
                        trace!(
                            "unhandled method call {:?}.{:?} on {:?}",
                            message.interface,
                            message.member,
                            message.path
                        );
                    }
                }
            }
        }
    }
}
