//! Signature-driven property/method dispatch over the object tree.

pub mod dispatcher;
pub mod object;

#[cfg(test)]
mod tests;

pub use dispatcher::{
    interface_dict, properties_changed, property_dict, DispatchError, Dispatcher,
};
pub use object::{DispatchStatus, Object, PropertySpec, SharedObject};
