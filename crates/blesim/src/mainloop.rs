//! The single cooperative loop driving the simulation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crate::constants::MAINLOOP_INTERVAL;
use crate::dispatch::Dispatcher;
use crate::wire::Connection;

/// Run the loop until `running` is cleared: invoke the simulation
/// tick, drain and dispatch the inbound queue, then sleep for a fixed
/// small interval.
///
/// Nothing in the loop blocks on the peer; pending registration
/// replies come back through the inbound queue and are claimed by the
/// tick via `poll_registration`.
pub fn run<F>(
    connection: &mut Connection,
    dispatcher: &Dispatcher,
    running: &AtomicBool,
    mut tick: F,
) where
    F: FnMut(&mut Connection),
{
    while running.load(Ordering::SeqCst) {
        tick(connection);
        connection.read_write_dispatch(dispatcher);
        thread::sleep(MAINLOOP_INTERVAL);
    }
}
