//! The simulated peripheral root: service ownership, the aggregate
//! enumeration surface, and the registration handshake with the peer.

use std::sync::{Arc, RwLock};

use log::{debug, error, warn};

use crate::advertising::Advertisement;
use crate::constants::{
    ADVERTISEMENT_PATH_TAG, GATT_MANAGER_INTERFACE, METHOD_GET_MANAGED_OBJECTS,
    METHOD_REGISTER_APPLICATION, OBJECT_MANAGER_INTERFACE, PEER_BUS_NAME, SERVICE_PATH_TAG,
};
use crate::controller::Controller;
use crate::dispatch::{
    interface_dict, DispatchStatus, Dispatcher, Object, PropertySpec, SharedObject,
};
use crate::registry::Registry;
use crate::wire::{Connection, Dict, Message, ObjectPath, PendingCall, Value};

use super::error::{AttachError, RegisterError};
use super::service::Service;

/// Progress of the two-phase handshake that makes a device visible to
/// the peer. `Rejected` is terminal; there is no automatic retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Unregistered,
    ControllerReady,
    LocallyBound,
    PendingPeerAck,
    Registered,
    Rejected,
}

/// Root of one simulated peripheral.
///
/// A device gets its address at construction from the registry's
/// device counter; everything below it is addressed relative to that
/// root at attach time.
pub struct Device {
    name: String,
    path: ObjectPath,
    controller: Option<ObjectPath>,
    registration: RegistrationState,
    pending_register: Option<PendingCall>,
    services: Vec<Arc<RwLock<Service>>>,
    next_service: u32,
    advertisement: Arc<RwLock<Advertisement>>,
}

impl Device {
    /// Create a device with its advertisement. `manufacturer_data` is
    /// truncated to the broadcast payload limit.
    pub fn new(
        name: &str,
        manufacturer_id: u16,
        manufacturer_data: &[u8],
        registry: &mut Registry,
    ) -> Arc<RwLock<Self>> {
        let path = registry.allocate_device_path();
        let advertisement = Advertisement::new(
            path.child(ADVERTISEMENT_PATH_TAG, 0),
            name,
            manufacturer_id,
            manufacturer_data,
        );
        Arc::new(RwLock::new(Self {
            name: name.to_string(),
            path,
            controller: None,
            registration: RegistrationState::Unregistered,
            pending_register: None,
            services: Vec::new(),
            next_service: 0,
            advertisement,
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &ObjectPath {
        &self.path
    }

    pub fn registration_state(&self) -> RegistrationState {
        self.registration
    }

    pub fn is_registered(&self) -> bool {
        self.registration == RegistrationState::Registered
    }

    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    pub fn advertisement(&self) -> Arc<RwLock<Advertisement>> {
        self.advertisement.clone()
    }

    /// Find an attached service by UUID.
    pub fn service(&self, uuid: &str) -> Option<Arc<RwLock<Service>>> {
        self.services
            .iter()
            .find(|s| s.read().unwrap().uuid() == uuid)
            .cloned()
    }

    /// Record the controller this device is exposed on.
    pub fn power_on(&mut self, controller: &Controller) {
        self.controller = Some(controller.path().clone());
        if self.registration == RegistrationState::Unregistered {
            self.registration = RegistrationState::ControllerReady;
        }
    }

    /// Attach a service under this device.
    pub fn add_service(
        &mut self,
        service: &Arc<RwLock<Service>>,
        dispatcher: &mut Dispatcher,
    ) -> Result<(), AttachError> {
        let mut svc = service.write().unwrap();

        if let Some(existing) = &svc.device_path {
            warn!("service {} is already attached at {}", svc.uuid, existing);
            return Err(AttachError::AlreadyAttached(existing.clone()));
        }
        if self
            .services
            .iter()
            .any(|s| s.read().unwrap().uuid == svc.uuid)
        {
            warn!(
                "device {} already has a service with UUID {}",
                self.name, svc.uuid
            );
            return Err(AttachError::DuplicateUuid(svc.uuid.clone()));
        }

        let path = self.path.child(SERVICE_PATH_TAG, self.next_service);
        svc.path = Some(path.clone());
        if let Err(err) = dispatcher.bind(&path, service.clone()) {
            svc.path = None;
            warn!("could not bind service {}: {}", svc.uuid, err);
            return Err(err.into());
        }

        svc.device_path = Some(self.path.clone());
        self.next_service += 1;
        self.services.insert(0, service.clone());
        Ok(())
    }

    /// Bind the device's object-manager surface locally, then ask the
    /// peer's GATT manager to register the application rooted at this
    /// device.
    ///
    /// The peer call is asynchronous; the reply is claimed later by
    /// [`Device::poll_registration`] without ever blocking the loop.
    pub fn register(
        device: &Arc<RwLock<Self>>,
        dispatcher: &mut Dispatcher,
        connection: &mut Connection,
    ) -> Result<(), RegisterError> {
        let object: SharedObject = device.clone();
        let mut dev = device.write().unwrap();

        let controller = dev
            .controller
            .clone()
            .ok_or(RegisterError::ControllerNotReady)?;
        dispatcher.bind(&dev.path.clone(), object)?;
        dev.registration = RegistrationState::LocallyBound;

        let message = Message::method_call(
            PEER_BUS_NAME,
            controller,
            GATT_MANAGER_INTERFACE,
            METHOD_REGISTER_APPLICATION,
        )
        .with_body(vec![
            Value::Path(dev.path.clone()),
            Value::Dict(Dict::new("s", "v")),
        ]);
        dev.pending_register = Some(connection.send_with_reply(message));
        dev.registration = RegistrationState::PendingPeerAck;
        debug!("registering {}'s application with peer", dev.name);
        Ok(())
    }

    /// Register this device's advertisement with the peer's
    /// advertising manager, keyed off the controller path. Same
    /// two-phase pattern as [`Device::register`].
    pub fn advertise(
        device: &Arc<RwLock<Self>>,
        dispatcher: &mut Dispatcher,
        connection: &mut Connection,
    ) -> Result<(), RegisterError> {
        let (controller, advertisement) = {
            let dev = device.read().unwrap();
            (
                dev.controller
                    .clone()
                    .ok_or(RegisterError::ControllerNotReady)?,
                dev.advertisement.clone(),
            )
        };
        Advertisement::register(&advertisement, &controller, dispatcher, connection)
    }

    /// Claim any pending peer replies and advance the registration
    /// state machines. Called once per loop tick.
    pub fn poll_registration(&mut self, connection: &mut Connection) {
        if let Some(call) = self.pending_register {
            if let Some(reply) = connection.take_reply(&call) {
                self.pending_register = None;
                if reply.is_error() {
                    error!(
                        "unable to register application for device ({}) with peer ({}: {})",
                        self.name,
                        reply.error_name().unwrap_or("unknown"),
                        reply.error_message().unwrap_or("")
                    );
                    self.registration = RegistrationState::Rejected;
                } else {
                    debug!("successfully registered {}'s application with peer", self.name);
                    self.registration = RegistrationState::Registered;
                }
            }
        }

        self.advertisement.write().unwrap().poll(connection);
    }

    /// Serialize the whole attached tree: every service,
    /// characteristic and descriptor exactly once, each as its full
    /// attribute table. An empty tree yields an empty mapping.
    fn managed_objects(&self) -> Dict {
        let mut objects = Dict::new("o", "a{sa{sv}}");
        for service in &self.services {
            let svc = service.read().unwrap();
            if let Some(path) = svc.path() {
                objects.insert(Value::Path(path.clone()), Value::Dict(interface_dict(&*svc)));
            }
            for characteristic in &svc.characteristics {
                let chr = characteristic.read().unwrap();
                if let Some(path) = chr.path() {
                    objects.insert(Value::Path(path.clone()), Value::Dict(interface_dict(&*chr)));
                }
                for descriptor in &chr.descriptors {
                    let desc = descriptor.read().unwrap();
                    if let Some(path) = desc.path() {
                        objects
                            .insert(Value::Path(path.clone()), Value::Dict(interface_dict(&*desc)));
                    }
                }
            }
        }
        objects
    }
}

impl Object for Device {
    fn interface(&self) -> &'static str {
        OBJECT_MANAGER_INTERFACE
    }

    fn properties(&self) -> &'static [PropertySpec] {
        &[]
    }

    fn read_property(&self, _name: &str) -> Option<Value> {
        None
    }

    fn call(&mut self, message: &Message) -> DispatchStatus {
        if message.is_method_call(OBJECT_MANAGER_INTERFACE, METHOD_GET_MANAGED_OBJECTS) {
            let reply = Message::method_return(message)
                .with_body(vec![Value::Dict(self.managed_objects())]);
            DispatchStatus::Handled(Some(reply))
        } else {
            DispatchStatus::NotHandled
        }
    }
}
