//! The capability surface one tree node exposes to the dispatcher.

use std::sync::{Arc, RwLock};

use crate::wire::{Message, Value};

/// One named, typed property in an attribute table.
///
/// The table is ordered; `GetAll` and aggregate enumeration serialize
/// in table order. Names are unique within a table.
#[derive(Debug, Clone, Copy)]
pub struct PropertySpec {
    pub name: &'static str,
    pub signature: &'static str,
}

/// Outcome of routing one message at an object.
#[derive(Debug)]
pub enum DispatchStatus {
    /// The object consumed the message, optionally producing a reply.
    Handled(Option<Message>),
    /// Not for this object; the message falls through to the next
    /// handler in the stack.
    NotHandled,
}

/// An addressable object: its primary interface, its attribute table,
/// and its method handlers.
///
/// `read_property` must succeed for every name in the table and must
/// produce a value matching the declared signature; a mismatch is a
/// protocol-format bug in the object, not a runtime error.
pub trait Object {
    /// The interface this object's attribute table belongs to.
    fn interface(&self) -> &'static str;

    /// The ordered attribute table.
    fn properties(&self) -> &'static [PropertySpec];

    /// Read one property by name. `None` only for names outside the
    /// table.
    fn read_property(&self, name: &str) -> Option<Value>;

    /// Handle a method call addressed to this object.
    fn call(&mut self, message: &Message) -> DispatchStatus {
        let _ = message;
        DispatchStatus::NotHandled
    }
}

/// Shared handle the dispatcher keeps per bound path. The same node
/// is aliased by its parent's child list; the tree is only touched
/// from the main loop thread.
pub type SharedObject = Arc<RwLock<dyn Object>>;
