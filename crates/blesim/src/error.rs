//! Error types for the blesim library.

use thiserror::Error;

use crate::controller::ControllerError;
use crate::dispatch::DispatchError;
use crate::gatt::{AttachError, RegisterError};
use crate::wire::TransportError;

/// Top-level error, aggregating the per-layer failures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("controller error: {0}")]
    Controller(#[from] ControllerError),

    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("attach error: {0}")]
    Attach(#[from] AttachError),

    #[error("registration error: {0}")]
    Register(#[from] RegisterError),
}

pub type Result<T> = std::result::Result<T, Error>;
