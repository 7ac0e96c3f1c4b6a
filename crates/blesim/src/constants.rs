//! Protocol names, path tags and defaults shared across the crate.

use std::time::Duration;

/// Bus name of the peer peripheral manager.
pub const PEER_BUS_NAME: &str = "org.bluez";
/// Bus name this emulator claims for itself.
pub const SIM_BUS_NAME: &str = "org.blesim";

/// Standard properties surface.
pub const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";
pub const METHOD_GET: &str = "Get";
pub const METHOD_SET: &str = "Set";
pub const METHOD_GET_ALL: &str = "GetAll";
pub const SIGNAL_PROPERTIES_CHANGED: &str = "PropertiesChanged";

/// Standard object manager surface.
pub const OBJECT_MANAGER_INTERFACE: &str = "org.freedesktop.DBus.ObjectManager";
pub const METHOD_GET_MANAGED_OBJECTS: &str = "GetManagedObjects";

/// Peer-side endpoints this core registers against.
pub const GATT_MANAGER_INTERFACE: &str = "org.bluez.GattManager1";
pub const METHOD_REGISTER_APPLICATION: &str = "RegisterApplication";
pub const LE_ADVERTISING_MANAGER_INTERFACE: &str = "org.bluez.LEAdvertisingManager1";
pub const METHOD_REGISTER_ADVERTISEMENT: &str = "RegisterAdvertisement";
pub const ADAPTER_INTERFACE: &str = "org.bluez.Adapter1";
pub const PROPERTY_POWERED: &str = "Powered";
pub const PROPERTY_DISCOVERABLE: &str = "Discoverable";

/// Interfaces this core implements for the peer to call.
pub const GATT_SERVICE_INTERFACE: &str = "org.bluez.GattService1";
pub const GATT_CHARACTERISTIC_INTERFACE: &str = "org.bluez.GattCharacteristic1";
pub const GATT_DESCRIPTOR_INTERFACE: &str = "org.bluez.GattDescriptor1";
pub const LE_ADVERTISEMENT_INTERFACE: &str = "org.bluez.LEAdvertisement1";
pub const METHOD_RELEASE: &str = "Release";

pub const METHOD_READ_VALUE: &str = "ReadValue";
pub const METHOD_WRITE_VALUE: &str = "WriteValue";
pub const METHOD_START_NOTIFY: &str = "StartNotify";
pub const METHOD_STOP_NOTIFY: &str = "StopNotify";

pub const ERROR_INVALID_ARGS: &str = "org.freedesktop.DBus.Error.InvalidArgs";

/// Path segment tags, one per node kind.
pub const DEVICE_PATH_TAG: &str = "dev";
pub const SERVICE_PATH_TAG: &str = "serv";
pub const CHARACTERISTIC_PATH_TAG: &str = "char";
pub const DESCRIPTOR_PATH_TAG: &str = "desc";
pub const ADVERTISEMENT_PATH_TAG: &str = "advrt";

/// Advertisement defaults.
pub const ADVERTISEMENT_TYPE_DEFAULT: &str = "peripheral";
pub const ADVERTISEMENT_DATA_MAX_SIZE: usize = 24;
pub const ADVERTISEMENT_DISCOVERABLE_DEFAULT: bool = true;
pub const ADVERTISEMENT_DISCOVERABLE_TIMEOUT_DEFAULT: u16 = 0;
pub const ADVERTISEMENT_DURATION_DEFAULT: u16 = 2;
pub const ADVERTISEMENT_TIMEOUT_DEFAULT: u16 = 0;
pub const ADVERTISEMENT_MIN_INTERVAL_DEFAULT: u32 = 100;
pub const ADVERTISEMENT_MAX_INTERVAL_DEFAULT: u32 = 1000;
pub const ADVERTISEMENT_TX_POWER_DEFAULT: i16 = 7;

/// Sleep interval of the cooperative main loop.
pub const MAINLOOP_INTERVAL: Duration = Duration::from_millis(100);
