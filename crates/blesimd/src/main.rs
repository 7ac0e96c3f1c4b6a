//! blesimd - runs one simulated heart-rate peripheral.
//!
//! Builds a device with the standard heart-rate service, registers it
//! and its advertisement, then drives the loop with a tick that feeds
//! jittered measurement samples through the tree. The peer side of the
//! in-memory transport is played by a loopback that acknowledges every
//! outbound method call.

use std::sync::atomic::AtomicBool;

use log::info;
use rand::Rng;

use blesim::{
    mainloop, Characteristic, CharacteristicFlags, Connection, Controller, Descriptor,
    DescriptorFlags, Device, Dispatcher, Message, MessageKind, Registry, Result, Service,
};

const HEART_RATE_SERVICE: &str = "0000180d-0000-1000-8000-00805f9b34fb";
const HEART_RATE_MEASUREMENT: &str = "00002a37-0000-1000-8000-00805f9b34fb";
const CLIENT_CHARACTERISTIC_CONFIGURATION: &str = "00002902-0000-1000-8000-00805f9b34fb";

const RESTING_RATE: u8 = 60;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut registry = Registry::new();
    let mut dispatcher = Dispatcher::new();
    let mut connection = Connection::open()?;
    let controller = Controller::open(&mut registry)?;

    let device = Device::new("blesim heart rate", 0xffff, &[0x01, 0x02], &mut registry);
    let service = Service::new(HEART_RATE_SERVICE, true);
    let characteristic = Characteristic::new(
        HEART_RATE_MEASUREMENT,
        CharacteristicFlags::READ | CharacteristicFlags::NOTIFY,
        &[0x00, RESTING_RATE],
    );
    let descriptor = Descriptor::new(
        CLIENT_CHARACTERISTIC_CONFIGURATION,
        DescriptorFlags::READ | DescriptorFlags::WRITE,
        &[0x00, 0x00],
    );

    device
        .write()
        .unwrap()
        .add_service(&service, &mut dispatcher)?;
    service
        .write()
        .unwrap()
        .add_characteristic(&characteristic, &mut dispatcher)?;
    characteristic
        .write()
        .unwrap()
        .add_descriptor(&descriptor, &mut dispatcher)?;

    device.write().unwrap().power_on(&controller);
    Device::register(&device, &mut dispatcher, &mut connection)?;
    Device::advertise(&device, &mut dispatcher, &mut connection)?;
    controller.set_powered(&mut connection, true);
    controller.set_discoverable(&mut connection, true);

    info!(
        "simulated peripheral \"{}\" running at {}",
        device.read().unwrap().name(),
        device.read().unwrap().path()
    );

    let running = AtomicBool::new(true);
    let mut rng = rand::thread_rng();
    mainloop::run(&mut connection, &dispatcher, &running, |connection| {
        // Loopback peer: every method call we sent is acknowledged.
        for message in connection.drain_outbound() {
            if message.kind == MessageKind::MethodCall {
                connection.push_inbound(Message::method_return(&message));
            }
        }

        device.write().unwrap().poll_registration(connection);

        let sample = RESTING_RATE + rng.gen_range(0..8);
        characteristic
            .write()
            .unwrap()
            .update_value(&[0x00, sample], connection);
    });

    Ok(())
}
