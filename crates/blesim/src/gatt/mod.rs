//! The attribute tree: device, services, characteristics and
//! descriptors, with the attach protocol binding them into the
//! dispatcher.

pub mod characteristic;
pub mod descriptor;
pub mod device;
pub mod error;
pub mod flags;
pub mod service;


pub use characteristic::Characteristic;
pub use descriptor::Descriptor;
pub use device::{Device, RegistrationState};
pub use error::{AttachError, RegisterError};
pub use flags::{CharacteristicFlags, DescriptorFlags};
pub use service::Service;
