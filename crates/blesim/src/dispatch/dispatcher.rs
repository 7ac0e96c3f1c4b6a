//! Path-to-object routing and the generic properties surface.

use std::collections::HashMap;

use log::{debug, warn};
use thiserror::Error;

use crate::constants::{
    METHOD_GET, METHOD_GET_ALL, METHOD_SET, PROPERTIES_INTERFACE, SIGNAL_PROPERTIES_CHANGED,
};
use crate::wire::{Dict, Message, MessageKind, ObjectPath, Value};

use super::object::{DispatchStatus, Object, SharedObject};

/// Local binding failures.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("object path {0} is already bound")]
    PathTaken(ObjectPath),
}

/// Routes inbound requests to registered objects.
///
/// Requests on the standard properties surface are answered here from
/// the object's attribute table; anything else is delegated to the
/// object's own method handlers. Unknown paths and members fall
/// through as [`DispatchStatus::NotHandled`], never an error.
#[derive(Default)]
pub struct Dispatcher {
    objects: HashMap<ObjectPath, SharedObject>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind one object at `path`. Only one binding per path is
    /// permitted.
    pub fn bind(&mut self, path: &ObjectPath, object: SharedObject) -> Result<(), DispatchError> {
        if self.objects.contains_key(path) {
            return Err(DispatchError::PathTaken(path.clone()));
        }
        self.objects.insert(path.clone(), object);
        Ok(())
    }

    /// Whether a path currently has a binding.
    pub fn is_bound(&self, path: &ObjectPath) -> bool {
        self.objects.contains_key(path)
    }

    /// Route one message.
    pub fn dispatch(&self, message: &Message) -> DispatchStatus {
        if message.kind != MessageKind::MethodCall {
            return DispatchStatus::NotHandled;
        }

        let object = match message.path.as_ref().and_then(|p| self.objects.get(p)) {
            Some(object) => object,
            None => return DispatchStatus::NotHandled,
        };

        if message.interface.as_deref() == Some(PROPERTIES_INTERFACE) {
            return handle_properties(&*object.read().unwrap(), message);
        }

        object.write().unwrap().call(message)
    }
}

fn handle_properties(object: &dyn Object, message: &Message) -> DispatchStatus {
    match message.member.as_deref() {
        Some(m) if m == METHOD_GET => DispatchStatus::Handled(get_property_reply(object, message)),
        Some(m) if m == METHOD_GET_ALL => {
            let reply = Message::method_return(message)
                .with_body(vec![Value::Dict(property_dict(object))]);
            DispatchStatus::Handled(Some(reply))
        }
        Some(m) if m == METHOD_SET => {
            // Accepted as a message shape but deliberately a no-op:
            // writes only flow through the characteristic WriteValue
            // method, never the generic Set.
            debug!(
                "ignoring generic Set on {:?}",
                message.path.as_ref().map(|p| p.as_str())
            );
            DispatchStatus::Handled(None)
        }
        _ => DispatchStatus::NotHandled,
    }
}

fn get_property_reply(object: &dyn Object, message: &Message) -> Option<Message> {
    let name = match (message.arg(0), message.arg(1)) {
        (Some(Value::Str(_)), Some(Value::Str(name))) => name.as_str(),
        _ => {
            warn!("could not get a property name from get property request");
            return None;
        }
    };

    let reply = Message::method_return(message);
    match read_checked(object, name) {
        // Unknown property names get an empty reply rather than an
        // error, matching the peer-visible behaviour this emulates.
        None => {
            warn!("get request for unknown property {}", name);
            Some(reply)
        }
        Some(value) => Some(reply.with_body(vec![Value::variant(value)])),
    }
}

/// Serialize an object's full attribute table in table order, as a
/// `{name -> variant}` mapping.
pub fn property_dict(object: &dyn Object) -> Dict {
    let mut dict = Dict::new("s", "v");
    for spec in object.properties() {
        if let Some(value) = read_checked(object, spec.name) {
            dict.insert(Value::Str(spec.name.to_string()), Value::variant(value));
        }
    }
    dict
}

/// Serialize an object as a `{interface -> {name -> variant}}`
/// mapping, the per-node entry of aggregate enumeration.
pub fn interface_dict(object: &dyn Object) -> Dict {
    let mut dict = Dict::new("s", "a{sv}");
    dict.insert(
        Value::Str(object.interface().to_string()),
        Value::Dict(property_dict(object)),
    );
    dict
}

/// Build a `PropertiesChanged` signal carrying `changed` and an empty
/// invalidated-properties list.
pub fn properties_changed(path: ObjectPath, interface: &str, changed: Dict) -> Message {
    Message::signal(path, PROPERTIES_INTERFACE, SIGNAL_PROPERTIES_CHANGED).with_body(vec![
        Value::Str(interface.to_string()),
        Value::Dict(changed),
        Value::string_array(Vec::<String>::new()),
    ])
}

fn read_checked(object: &dyn Object, name: &str) -> Option<Value> {
    let spec = object.properties().iter().find(|s| s.name == name)?;
    let value = object.read_property(name)?;
    // A getter that misses its declared signature is a bug in the
    // object, not a condition to recover from at runtime.
    debug_assert_eq!(
        value.signature(),
        spec.signature,
        "property {} produced a mismatched signature",
        name
    );
    Some(value)
}
