//! Sequential path counters for top-level objects.

use crate::constants::DEVICE_PATH_TAG;
use crate::wire::ObjectPath;

/// Allocates top-level addresses for devices and controllers.
///
/// Kept as an explicit value passed to constructors rather than
/// process-global counters, so separate simulations (and tests) never
/// observe each other's numbering.
#[derive(Debug, Default)]
pub struct Registry {
    next_device: u32,
    next_controller: u32,
}

impl Registry {
    /// Create a registry with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next device root path, `/dev<N>`.
    pub fn allocate_device_path(&mut self) -> ObjectPath {
        let path = ObjectPath::top_level(DEVICE_PATH_TAG, self.next_device);
        self.next_device += 1;
        path
    }

    /// Allocate the next virtual controller path.
    pub fn allocate_controller_path(&mut self) -> ObjectPath {
        let path = ObjectPath::new(format!("/org/bluez/hci{}", self.next_controller));
        self.next_controller += 1;
        path
    }
}
