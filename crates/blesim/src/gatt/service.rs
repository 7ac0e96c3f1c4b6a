//! GATT service node.

use std::sync::{Arc, RwLock};

use log::warn;

use crate::constants::{CHARACTERISTIC_PATH_TAG, GATT_SERVICE_INTERFACE};
use crate::dispatch::{Dispatcher, Object, PropertySpec};
use crate::wire::{ObjectPath, Value};

use super::characteristic::Characteristic;
use super::error::AttachError;

const SERVICE_PROPERTIES: &[PropertySpec] = &[
    PropertySpec {
        name: "UUID",
        signature: "s",
    },
    PropertySpec {
        name: "Device",
        signature: "o",
    },
    PropertySpec {
        name: "Primary",
        signature: "b",
    },
];

/// A service attached to one device.
pub struct Service {
    pub(crate) uuid: String,
    pub(crate) primary: bool,
    pub(crate) device_path: Option<ObjectPath>,
    pub(crate) path: Option<ObjectPath>,
    pub(crate) characteristics: Vec<Arc<RwLock<Characteristic>>>,
    next_characteristic: u32,
}

impl Service {
    /// Create a detached service. It gets an address when attached to
    /// a device.
    pub fn new(uuid: &str, primary: bool) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self {
            uuid: uuid.to_string(),
            primary,
            device_path: None,
            path: None,
            characteristics: Vec::new(),
            next_characteristic: 0,
        }))
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }

    pub fn path(&self) -> Option<&ObjectPath> {
        self.path.as_ref()
    }

    pub fn characteristic_count(&self) -> usize {
        self.characteristics.len()
    }

    /// Find an attached characteristic by UUID.
    pub fn characteristic(&self, uuid: &str) -> Option<Arc<RwLock<Characteristic>>> {
        self.characteristics
            .iter()
            .find(|c| c.read().unwrap().uuid == uuid)
            .cloned()
    }

    /// Attach a characteristic under this service.
    pub fn add_characteristic(
        &mut self,
        characteristic: &Arc<RwLock<Characteristic>>,
        dispatcher: &mut Dispatcher,
    ) -> Result<(), AttachError> {
        let mut chr = characteristic.write().unwrap();

        if let Some(existing) = &chr.service_path {
            warn!(
                "characteristic {} is already attached at {}",
                chr.uuid, existing
            );
            return Err(AttachError::AlreadyAttached(existing.clone()));
        }
        if self
            .characteristics
            .iter()
            .any(|c| c.read().unwrap().uuid == chr.uuid)
        {
            warn!(
                "service {} already has a characteristic with UUID {}",
                self.uuid, chr.uuid
            );
            return Err(AttachError::DuplicateUuid(chr.uuid.clone()));
        }
        let parent_path = match &self.path {
            Some(path) => path.clone(),
            None => {
                warn!(
                    "cannot attach characteristic {}: service {} has no address yet",
                    chr.uuid, self.uuid
                );
                return Err(AttachError::ParentNotReady);
            }
        };

        let path = parent_path.child(CHARACTERISTIC_PATH_TAG, self.next_characteristic);
        chr.path = Some(path.clone());
        if let Err(err) = dispatcher.bind(&path, characteristic.clone()) {
            chr.path = None;
            warn!("could not bind characteristic {}: {}", chr.uuid, err);
            return Err(err.into());
        }

        chr.service_path = Some(parent_path);
        self.next_characteristic += 1;
        self.characteristics.insert(0, characteristic.clone());
        Ok(())
    }
}

impl Object for Service {
    fn interface(&self) -> &'static str {
        GATT_SERVICE_INTERFACE
    }

    fn properties(&self) -> &'static [PropertySpec] {
        SERVICE_PROPERTIES
    }

    fn read_property(&self, name: &str) -> Option<Value> {
        match name {
            "UUID" => Some(Value::Str(self.uuid.clone())),
            "Device" => Some(Value::Path(
                self.device_path.clone().unwrap_or_else(ObjectPath::root),
            )),
            "Primary" => Some(Value::Bool(self.primary)),
            _ => None,
        }
    }
}
