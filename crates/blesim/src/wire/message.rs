//! Wire messages exchanged with the peer.

use super::path::ObjectPath;
use super::value::Value;

/// The four message shapes of the wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    MethodCall,
    MethodReturn,
    Error,
    Signal,
}

/// One protocol message.
///
/// Serials are assigned by the connection on send; a freshly built
/// message carries serial zero until then.
#[derive(Debug, Clone)]
pub struct Message {
    pub kind: MessageKind,
    pub serial: u32,
    pub reply_serial: Option<u32>,
    pub destination: Option<String>,
    pub path: Option<ObjectPath>,
    pub interface: Option<String>,
    pub member: Option<String>,
    pub error_name: Option<String>,
    pub body: Vec<Value>,
}

impl Message {
    fn empty(kind: MessageKind) -> Self {
        Self {
            kind,
            serial: 0,
            reply_serial: None,
            destination: None,
            path: None,
            interface: None,
            member: None,
            error_name: None,
            body: Vec::new(),
        }
    }

    /// Build a method call addressed to the peer.
    pub fn method_call(
        destination: &str,
        path: ObjectPath,
        interface: &str,
        member: &str,
    ) -> Self {
        let mut message = Self::empty(MessageKind::MethodCall);
        message.destination = Some(destination.to_string());
        message.path = Some(path);
        message.interface = Some(interface.to_string());
        message.member = Some(member.to_string());
        message
    }

    /// Build the successful reply to `call`.
    pub fn method_return(call: &Message) -> Self {
        let mut message = Self::empty(MessageKind::MethodReturn);
        message.reply_serial = Some(call.serial);
        message
    }

    /// Build an error-typed reply to `call`.
    pub fn error_reply(call: &Message, error_name: &str, text: &str) -> Self {
        let mut message = Self::empty(MessageKind::Error);
        message.reply_serial = Some(call.serial);
        message.error_name = Some(error_name.to_string());
        message.body = vec![Value::Str(text.to_string())];
        message
    }

    /// Build a signal emitted from `path`.
    pub fn signal(path: ObjectPath, interface: &str, member: &str) -> Self {
        let mut message = Self::empty(MessageKind::Signal);
        message.path = Some(path);
        message.interface = Some(interface.to_string());
        message.member = Some(member.to_string());
        message
    }

    /// Attach a body to the message.
    pub fn with_body(mut self, body: Vec<Value>) -> Self {
        self.body = body;
        self
    }

    /// Whether this is a method call for the given interface/member.
    pub fn is_method_call(&self, interface: &str, member: &str) -> bool {
        self.kind == MessageKind::MethodCall
            && self.interface.as_deref() == Some(interface)
            && self.member.as_deref() == Some(member)
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }

    pub fn error_name(&self) -> Option<&str> {
        self.error_name.as_deref()
    }

    /// The human-readable text of an error reply, when the body is a
    /// single string.
    pub fn error_message(&self) -> Option<&str> {
        if !self.is_error() || self.body.len() != 1 {
            return None;
        }
        self.body[0].as_str()
    }

    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.body.get(index)
    }
}
