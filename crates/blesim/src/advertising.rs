//! The advertisement sibling object and its registration handshake.

use std::sync::{Arc, RwLock};

use log::{debug, error, warn};

use crate::constants::{
    ADVERTISEMENT_DATA_MAX_SIZE, ADVERTISEMENT_DISCOVERABLE_DEFAULT,
    ADVERTISEMENT_DISCOVERABLE_TIMEOUT_DEFAULT, ADVERTISEMENT_DURATION_DEFAULT,
    ADVERTISEMENT_MAX_INTERVAL_DEFAULT, ADVERTISEMENT_MIN_INTERVAL_DEFAULT,
    ADVERTISEMENT_TIMEOUT_DEFAULT, ADVERTISEMENT_TX_POWER_DEFAULT, ADVERTISEMENT_TYPE_DEFAULT,
    LE_ADVERTISEMENT_INTERFACE, LE_ADVERTISING_MANAGER_INTERFACE, METHOD_REGISTER_ADVERTISEMENT,
    METHOD_RELEASE, PEER_BUS_NAME,
};
use crate::dispatch::{DispatchStatus, Dispatcher, Object, PropertySpec, SharedObject};
use crate::gatt::RegisterError;
use crate::wire::{Connection, Dict, Message, ObjectPath, PendingCall, Value};

const ADVERTISEMENT_PROPERTIES: &[PropertySpec] = &[
    PropertySpec {
        name: "Type",
        signature: "s",
    },
    PropertySpec {
        name: "ManufacturerData",
        signature: "a{qv}",
    },
    PropertySpec {
        name: "Discoverable",
        signature: "b",
    },
    PropertySpec {
        name: "DiscoverableTimeout",
        signature: "q",
    },
    PropertySpec {
        name: "Includes",
        signature: "as",
    },
    PropertySpec {
        name: "Duration",
        signature: "q",
    },
    PropertySpec {
        name: "Timeout",
        signature: "q",
    },
    PropertySpec {
        name: "MinInterval",
        signature: "u",
    },
    PropertySpec {
        name: "MaxInterval",
        signature: "u",
    },
];

/// Broadcast parameters for one device. Not a GATT entity; it lives
/// beside the tree at `/dev<N>/advrt0` and registers against the
/// peer's advertising manager rather than its GATT manager.
pub struct Advertisement {
    path: ObjectPath,
    // Copy of the owning device's display name, for log lines only.
    local_name: String,
    advertisement_type: String,
    manufacturer_id: u16,
    manufacturer_data: Vec<u8>,
    discoverable: bool,
    discoverable_timeout: u16,
    duration: u16,
    timeout: u16,
    min_interval: u32,
    max_interval: u32,
    tx_power: i16,
    registered: bool,
    pending: Option<PendingCall>,
}

impl Advertisement {
    pub(crate) fn new(
        path: ObjectPath,
        local_name: &str,
        manufacturer_id: u16,
        manufacturer_data: &[u8],
    ) -> Arc<RwLock<Self>> {
        if manufacturer_data.len() > ADVERTISEMENT_DATA_MAX_SIZE {
            warn!(
                "manufacturer data for {} truncated to {} bytes",
                local_name, ADVERTISEMENT_DATA_MAX_SIZE
            );
        }
        let len = manufacturer_data.len().min(ADVERTISEMENT_DATA_MAX_SIZE);
        Arc::new(RwLock::new(Self {
            path,
            local_name: local_name.to_string(),
            advertisement_type: ADVERTISEMENT_TYPE_DEFAULT.to_string(),
            manufacturer_id,
            manufacturer_data: manufacturer_data[..len].to_vec(),
            discoverable: ADVERTISEMENT_DISCOVERABLE_DEFAULT,
            discoverable_timeout: ADVERTISEMENT_DISCOVERABLE_TIMEOUT_DEFAULT,
            duration: ADVERTISEMENT_DURATION_DEFAULT,
            timeout: ADVERTISEMENT_TIMEOUT_DEFAULT,
            min_interval: ADVERTISEMENT_MIN_INTERVAL_DEFAULT,
            max_interval: ADVERTISEMENT_MAX_INTERVAL_DEFAULT,
            tx_power: ADVERTISEMENT_TX_POWER_DEFAULT,
            registered: false,
            pending: None,
        }))
    }

    pub fn path(&self) -> &ObjectPath {
        &self.path
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub fn tx_power(&self) -> i16 {
        self.tx_power
    }

    pub fn set_discoverable(&mut self, discoverable: bool, timeout: u16) {
        self.discoverable = discoverable;
        self.discoverable_timeout = timeout;
    }

    pub fn set_intervals(&mut self, min_interval: u32, max_interval: u32) {
        self.min_interval = min_interval;
        self.max_interval = max_interval;
    }

    /// Bind the advertisement locally, then ask the peer's advertising
    /// manager at `controller_path` to register it.
    pub(crate) fn register(
        advertisement: &Arc<RwLock<Self>>,
        controller_path: &ObjectPath,
        dispatcher: &mut Dispatcher,
        connection: &mut Connection,
    ) -> Result<(), RegisterError> {
        let object: SharedObject = advertisement.clone();
        let mut adv = advertisement.write().unwrap();

        dispatcher.bind(&adv.path.clone(), object)?;
        let message = Message::method_call(
            PEER_BUS_NAME,
            controller_path.clone(),
            LE_ADVERTISING_MANAGER_INTERFACE,
            METHOD_REGISTER_ADVERTISEMENT,
        )
        .with_body(vec![
            Value::Path(adv.path.clone()),
            Value::Dict(Dict::new("s", "v")),
        ]);
        adv.pending = Some(connection.send_with_reply(message));
        debug!("registering {}'s advertisement with peer", adv.local_name);
        Ok(())
    }

    /// Claim a pending registration reply, if one has arrived.
    pub(crate) fn poll(&mut self, connection: &mut Connection) {
        let call = match self.pending {
            Some(call) => call,
            None => return,
        };
        let reply = match connection.take_reply(&call) {
            Some(reply) => reply,
            None => return,
        };
        self.pending = None;

        if reply.is_error() {
            error!(
                "unable to register advert for device ({}) with peer ({}: {})",
                self.local_name,
                reply.error_name().unwrap_or("unknown"),
                reply.error_message().unwrap_or("")
            );
        } else {
            debug!(
                "successfully registered {}'s advertisement with peer",
                self.local_name
            );
            self.registered = true;
        }
    }
}

impl Object for Advertisement {
    fn interface(&self) -> &'static str {
        LE_ADVERTISEMENT_INTERFACE
    }

    fn properties(&self) -> &'static [PropertySpec] {
        ADVERTISEMENT_PROPERTIES
    }

    fn read_property(&self, name: &str) -> Option<Value> {
        match name {
            "Type" => Some(Value::Str(self.advertisement_type.clone())),
            "ManufacturerData" => {
                let mut dict = Dict::new("q", "v");
                dict.insert(
                    Value::Uint16(self.manufacturer_id),
                    Value::variant(Value::byte_array(&self.manufacturer_data)),
                );
                Some(Value::Dict(dict))
            }
            "Discoverable" => Some(Value::Bool(self.discoverable)),
            "DiscoverableTimeout" => Some(Value::Uint16(self.discoverable_timeout)),
            "Includes" => Some(Value::string_array(Vec::<String>::new())),
            "Duration" => Some(Value::Uint16(self.duration)),
            "Timeout" => Some(Value::Uint16(self.timeout)),
            "MinInterval" => Some(Value::Uint32(self.min_interval)),
            "MaxInterval" => Some(Value::Uint32(self.max_interval)),
            _ => None,
        }
    }

    fn call(&mut self, message: &Message) -> DispatchStatus {
        if message.is_method_call(LE_ADVERTISEMENT_INTERFACE, METHOD_RELEASE) {
            // The peer may release us at any time; always succeed.
            debug!("peer released advertisement for {}", self.local_name);
            DispatchStatus::Handled(Some(Message::method_return(message)))
        } else {
            DispatchStatus::NotHandled
        }
    }
}
