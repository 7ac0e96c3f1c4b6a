//! Error handling for tree construction and registration.

use thiserror::Error;

use crate::dispatch::DispatchError;
use crate::wire::ObjectPath;

/// Structural rejections of the attach protocol. The tree is left
/// unchanged on every variant.
#[derive(Debug, Error)]
pub enum AttachError {
    #[error("node is already attached at {0}")]
    AlreadyAttached(ObjectPath),

    #[error("a sibling with UUID {0} already exists")]
    DuplicateUuid(String),

    #[error("parent has not been attached yet")]
    ParentNotReady,

    #[error("dispatch registration failed: {0}")]
    Registration(#[from] DispatchError),
}

/// Failures starting the registration handshake with the peer.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("controller has not been initialised for this device")]
    ControllerNotReady,

    #[error("local bind failed: {0}")]
    Bind(#[from] DispatchError),
}
