//! Virtual controller lifecycle hooks.
//!
//! The controller stands in for the radio the peripheral is exposed
//! on. Its event loop runs on a background pump thread that never
//! touches tree or dispatcher state; the only cross-thread contract
//! is the stop flag.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;
use thiserror::Error;

use crate::constants::{
    ADAPTER_INTERFACE, METHOD_SET, PEER_BUS_NAME, PROPERTIES_INTERFACE, PROPERTY_DISCOVERABLE,
    PROPERTY_POWERED,
};
use crate::registry::Registry;
use crate::wire::{Connection, Message, ObjectPath, Value};

const PUMP_INTERVAL: Duration = Duration::from_millis(50);

/// Failures opening the virtual controller. Fatal to process start.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("failed to start controller event pump: {0}")]
    Pump(#[from] io::Error),
}

/// One virtual controller and its background event pump.
pub struct Controller {
    path: ObjectPath,
    running: Arc<AtomicBool>,
    pump: Option<JoinHandle<()>>,
}

impl Controller {
    /// Open a controller, allocating its address and starting the
    /// pump thread.
    pub fn open(registry: &mut Registry) -> Result<Self, ControllerError> {
        let path = registry.allocate_controller_path();
        let running = Arc::new(AtomicBool::new(true));

        let flag = running.clone();
        let pump = thread::Builder::new()
            .name("controller-pump".to_string())
            .spawn(move || {
                while flag.load(Ordering::Relaxed) {
                    thread::sleep(PUMP_INTERVAL);
                }
            })?;

        debug!("virtual controller {} ready", path);
        Ok(Self {
            path,
            running,
            pump: Some(pump),
        })
    }

    pub fn path(&self) -> &ObjectPath {
        &self.path
    }

    /// Ask the peer to power this controller on or off.
    pub fn set_powered(&self, connection: &mut Connection, powered: bool) {
        self.set_adapter_property(connection, PROPERTY_POWERED, Value::Bool(powered));
    }

    /// Ask the peer to make this controller discoverable.
    pub fn set_discoverable(&self, connection: &mut Connection, discoverable: bool) {
        self.set_adapter_property(connection, PROPERTY_DISCOVERABLE, Value::Bool(discoverable));
    }

    fn set_adapter_property(&self, connection: &mut Connection, property: &str, value: Value) {
        let message = Message::method_call(
            PEER_BUS_NAME,
            self.path.clone(),
            PROPERTIES_INTERFACE,
            METHOD_SET,
        )
        .with_body(vec![
            Value::Str(ADAPTER_INTERFACE.to_string()),
            Value::Str(property.to_string()),
            Value::variant(value),
        ]);
        connection.send(message);
        debug!("set {} {} on controller {}", ADAPTER_INTERFACE, property, self.path);
    }

    /// Stop and join the pump thread. Idempotent.
    pub fn close(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(pump) = self.pump.take() {
            let _ = pump.join();
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.close();
    }
}
