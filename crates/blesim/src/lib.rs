//! blesim - a Bluetooth Low-Energy GATT peripheral emulator
//!
//! This library builds a tree of addressable objects (device,
//! services, characteristics, descriptors, advertisement) and exposes
//! it to an external peripheral manager through an object/property/
//! method wire protocol. The manager discovers the tree through
//! introspection-style calls and drives it with read/write/subscribe
//! requests while the emulator pushes change notifications for
//! notifying characteristics.

pub mod advertising;
pub mod constants;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod gatt;
pub mod mainloop;
pub mod registry;
pub mod wire;

// Re-export common types for convenience
pub use advertising::Advertisement;
pub use controller::{Controller, ControllerError};
pub use dispatch::{DispatchError, DispatchStatus, Dispatcher, Object, PropertySpec};
pub use error::{Error, Result};
pub use gatt::{
    AttachError, Characteristic, CharacteristicFlags, Descriptor, DescriptorFlags, Device,
    RegisterError, RegistrationState, Service,
};
pub use registry::Registry;
pub use wire::{
    Connection, Dict, Message, MessageKind, ObjectPath, PendingCall, TransportError, Value,
};
