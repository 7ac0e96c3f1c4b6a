//! GATT descriptor node.

use std::sync::{Arc, RwLock};

use crate::constants::GATT_DESCRIPTOR_INTERFACE;
use crate::dispatch::{Object, PropertySpec};
use crate::wire::{ObjectPath, Value};

use super::flags::DescriptorFlags;

const DESCRIPTOR_PROPERTIES: &[PropertySpec] = &[
    PropertySpec {
        name: "UUID",
        signature: "s",
    },
    PropertySpec {
        name: "Characteristic",
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

/// A descriptor attached to one characteristic. Leaf node; it exposes
/// properties only.
pub struct Descriptor {
    pub(crate) uuid: String,
    pub(crate) characteristic_path: Option<ObjectPath>,
    pub(crate) path: Option<ObjectPath>,
    pub(crate) flags: DescriptorFlags,
    pub(crate) value: Vec<u8>,
}

impl Descriptor {
    /// Create a detached descriptor. It gets an address when attached
    /// to a characteristic.
    pub fn new(uuid: &str, flags: DescriptorFlags, value: &[u8]) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self {
            uuid: uuid.to_string(),
            characteristic_path: None,
            path: None,
            flags,
            value: value.to_vec(),
        }))
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn path(&self) -> Option<&ObjectPath> {
        self.path.as_ref()
    }

    pub fn flags(&self) -> DescriptorFlags {
        self.flags
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

impl Object for Descriptor {
    fn interface(&self) -> &'static str {
        GATT_DESCRIPTOR_INTERFACE
    }

    fn properties(&self) -> &'static [PropertySpec] {
        DESCRIPTOR_PROPERTIES
    }

    fn read_property(&self, name: &str) -> Option<Value> {
        match name {
            "UUID" => Some(Value::Str(self.uuid.clone())),
            "Characteristic" => Some(Value::Path(
                self.characteristic_path
                    .clone()
                    .unwrap_or_else(ObjectPath::root),
            )),
            "Flags" => Some(Value::string_array(self.flags.wire_names())),
            "Value" => Some(Value::byte_array(&self.value)),
            _ => None,
        }
    }
}
