//! GATT characteristic node: value storage, the notification state
//! machine, and the peer-facing read/write/notify methods.

use std::sync::{Arc, RwLock};

use log::{debug, warn};

use crate::constants::{
    DESCRIPTOR_PATH_TAG, ERROR_INVALID_ARGS, GATT_CHARACTERISTIC_INTERFACE, METHOD_READ_VALUE,
    METHOD_START_NOTIFY, METHOD_STOP_NOTIFY, METHOD_WRITE_VALUE,
};
use crate::dispatch::{properties_changed, DispatchStatus, Dispatcher, Object, PropertySpec};
use crate::wire::{Connection, Dict, Message, ObjectPath, Value};

use super::descriptor::Descriptor;
use super::error::AttachError;
use super::flags::CharacteristicFlags;

const CHARACTERISTIC_PROPERTIES: &[PropertySpec] = &[
    PropertySpec {
        name: "UUID",
        signature: "s",
    },
    PropertySpec {
        name: "Service",
        signature: "o",
    },
    PropertySpec {
        name: "Flags",
        signature: "as",
    },
    PropertySpec {
        name: "Value",
        signature: "ay",
    },
];

/// A characteristic attached to one service.
///
/// `notifying` is transient state driven by the peer through
/// `StartNotify`/`StopNotify`; while set, simulation-side value
/// updates are pushed as `PropertiesChanged` signals.
pub struct Characteristic {
    pub(crate) uuid: String,
    pub(crate) service_path: Option<ObjectPath>,
    pub(crate) path: Option<ObjectPath>,
    pub(crate) flags: CharacteristicFlags,
    pub(crate) value: Vec<u8>,
    pub(crate) notifying: bool,
    pub(crate) descriptors: Vec<Arc<RwLock<Descriptor>>>,
    next_descriptor: u32,
}

impl Characteristic {
    /// Create a detached characteristic. It gets an address when
    /// attached to a service.
    pub fn new(
        uuid: &str,
        flags: CharacteristicFlags,
        initial_value: &[u8],
    ) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self {
            uuid: uuid.to_string(),
            service_path: None,
            path: None,
            flags,
            value: initial_value.to_vec(),
            notifying: false,
            descriptors: Vec::new(),
            next_descriptor: 0,
        }))
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn path(&self) -> Option<&ObjectPath> {
        self.path.as_ref()
    }

    pub fn flags(&self) -> CharacteristicFlags {
        self.flags
    }

    pub fn is_notifying(&self) -> bool {
        self.notifying
    }

    pub fn descriptor_count(&self) -> usize {
        self.descriptors.len()
    }

    /// The stored value, verbatim.
    pub fn read_value(&self) -> &[u8] {
        &self.value
    }

    /// Replace the stored value unconditionally. This is the remote
    /// write path; it never emits a change signal.
    pub fn write_value(&mut self, value: &[u8]) {
        self.value = value.to_vec();
    }

    /// Simulation-side value update. Identical bytes are a no-op;
    /// otherwise the value is stored and, while notifying, exactly one
    /// change signal naming only `Value` is emitted. Returns whether
    /// the value changed.
    pub fn update_value(&mut self, value: &[u8], connection: &mut Connection) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value.to_vec();

        if self.notifying {
            if let Some(path) = &self.path {
                let mut changed = Dict::new("s", "v");
                changed.insert(
                    Value::Str("Value".to_string()),
                    Value::variant(Value::byte_array(&self.value)),
                );
                connection.send(properties_changed(
                    path.clone(),
                    GATT_CHARACTERISTIC_INTERFACE,
                    changed,
                ));
            }
        }
        true
    }

    /// Attach a descriptor under this characteristic.
    pub fn add_descriptor(
        &mut self,
        descriptor: &Arc<RwLock<Descriptor>>,
        dispatcher: &mut Dispatcher,
    ) -> Result<(), AttachError> {
        let mut desc = descriptor.write().unwrap();

        if let Some(existing) = &desc.characteristic_path {
            warn!(
                "descriptor {} is already attached at {}",
                desc.uuid, existing
            );
            return Err(AttachError::AlreadyAttached(existing.clone()));
        }
        if self
            .descriptors
            .iter()
            .any(|d| d.read().unwrap().uuid == desc.uuid)
        {
            warn!(
                "characteristic {} already has a descriptor with UUID {}",
                self.uuid, desc.uuid
            );
            return Err(AttachError::DuplicateUuid(desc.uuid.clone()));
        }
        let parent_path = match &self.path {
            Some(path) => path.clone(),
            None => {
                warn!(
                    "cannot attach descriptor {}: characteristic {} has no address yet",
                    desc.uuid, self.uuid
                );
                return Err(AttachError::ParentNotReady);
            }
        };

        let path = parent_path.child(DESCRIPTOR_PATH_TAG, self.next_descriptor);
        desc.path = Some(path.clone());
        if let Err(err) = dispatcher.bind(&path, descriptor.clone()) {
            desc.path = None;
            warn!("could not bind descriptor {}: {}", desc.uuid, err);
            return Err(err.into());
        }

        desc.characteristic_path = Some(parent_path);
        self.next_descriptor += 1;
        self.descriptors.insert(0, descriptor.clone());
        Ok(())
    }

    fn read_value_reply(&self, message: &Message) -> DispatchStatus {
        // The caller-provided read options (offset etc.) are not yet
        // parsed anywhere.
        DispatchStatus::Handled(Some(
            Message::method_return(message).with_body(vec![Value::byte_array(&self.value)]),
        ))
    }

    fn write_value_reply(&mut self, message: &Message) -> DispatchStatus {
        let bytes = match message.arg(0).and_then(Value::as_bytes) {
            Some(bytes) => bytes,
            None => {
                warn!("malformed WriteValue for characteristic {}", self.uuid);
                return DispatchStatus::Handled(Some(Message::error_reply(
                    message,
                    ERROR_INVALID_ARGS,
                    "expected a byte array value",
                )));
            }
        };
        debug!(
            "characteristic {} written with value {}",
            self.uuid,
            hex::encode(&bytes)
        );
        self.write_value(&bytes);
        DispatchStatus::Handled(Some(Message::method_return(message)))
    }
}

impl Object for Characteristic {
    fn interface(&self) -> &'static str {
        GATT_CHARACTERISTIC_INTERFACE
    }

    fn properties(&self) -> &'static [PropertySpec] {
        CHARACTERISTIC_PROPERTIES
    }

    fn read_property(&self, name: &str) -> Option<Value> {
        match name {
            "UUID" => Some(Value::Str(self.uuid.clone())),
            "Service" => Some(Value::Path(
                self.service_path.clone().unwrap_or_else(ObjectPath::root),
            )),
            "Flags" => Some(Value::string_array(self.flags.wire_names())),
            "Value" => Some(Value::byte_array(&self.value)),
            _ => None,
        }
    }

    fn call(&mut self, message: &Message) -> DispatchStatus {
        if message.is_method_call(GATT_CHARACTERISTIC_INTERFACE, METHOD_READ_VALUE) {
            self.read_value_reply(message)
        } else if message.is_method_call(GATT_CHARACTERISTIC_INTERFACE, METHOD_WRITE_VALUE) {
            self.write_value_reply(message)
        } else if message.is_method_call(GATT_CHARACTERISTIC_INTERFACE, METHOD_START_NOTIFY) {
            // Idempotent on repeated calls.
            self.notifying = true;
            DispatchStatus::Handled(Some(Message::method_return(message)))
        } else if message.is_method_call(GATT_CHARACTERISTIC_INTERFACE, METHOD_STOP_NOTIFY) {
            self.notifying = false;
            DispatchStatus::Handled(Some(Message::method_return(message)))
        } else {
            DispatchStatus::NotHandled
        }
    }
}
