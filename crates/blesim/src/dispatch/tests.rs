//! Unit tests for dispatch and the generic properties surface.

use std::sync::{Arc, RwLock};

use super::{
    interface_dict, properties_changed, property_dict, DispatchError, DispatchStatus, Dispatcher,
    Object, PropertySpec, SharedObject,
};
use crate::constants::{
    METHOD_GET, METHOD_GET_ALL, METHOD_SET, PROPERTIES_INTERFACE, SIGNAL_PROPERTIES_CHANGED,
};
use crate::wire::{Dict, Message, MessageKind, ObjectPath, Value};

const THERMOMETER_INTERFACE: &str = "org.blesim.test.Thermometer1";

const THERMOMETER_PROPERTIES: &[PropertySpec] = &[
    PropertySpec {
        name: "Temperature",
        signature: "q",
    },
    PropertySpec {
        name: "Unit",
        signature: "s",
    },
];

struct Thermometer {
    temperature: u16,
    resets: u32,
}

impl Thermometer {
    fn bind(dispatcher: &mut Dispatcher, path: &ObjectPath) -> Arc<RwLock<Self>> {
        let handle = Arc::new(RwLock::new(Thermometer {
            temperature: 310,
            resets: 0,
        }));
        let object: SharedObject = handle.clone();
        dispatcher.bind(path, object).unwrap();
        handle
    }
}

impl Object for Thermometer {
    fn interface(&self) -> &'static str {
        THERMOMETER_INTERFACE
    }

    fn properties(&self) -> &'static [PropertySpec] {
        THERMOMETER_PROPERTIES
    }

    fn read_property(&self, name: &str) -> Option<Value> {
        match name {
            "Temperature" => Some(Value::Uint16(self.temperature)),
            "Unit" => Some(Value::Str("kelvin".to_string())),
            _ => None,
        }
    }

    fn call(&mut self, message: &Message) -> DispatchStatus {
        if message.interface.as_deref() == Some(THERMOMETER_INTERFACE)
            && message.member.as_deref() == Some("Reset")
        {
            self.resets += 1;
            self.temperature = 0;
            return DispatchStatus::Handled(Some(Message::method_return(message)));
        }
        DispatchStatus::NotHandled
    }
}

fn properties_call(path: &ObjectPath, member: &str, body: Vec<Value>) -> Message {
    Message::method_call("org.blesim", path.clone(), PROPERTIES_INTERFACE, member).with_body(body)
}

#[test]
fn test_bind_rejects_taken_path() {
    let mut dispatcher = Dispatcher::new();
    let path = ObjectPath::new("/dev0");
    let _first = Thermometer::bind(&mut dispatcher, &path);

    let second: SharedObject = Arc::new(RwLock::new(Thermometer {
        temperature: 0,
        resets: 0,
    }));
    match dispatcher.bind(&path, second) {
        Err(DispatchError::PathTaken(taken)) => assert_eq!(taken, path),
        Ok(()) => panic!("second binding accepted"),
    }
    assert!(dispatcher.is_bound(&path));
}

#[test]
fn test_get_known_property() {
    let mut dispatcher = Dispatcher::new();
    let path = ObjectPath::new("/dev0");
    let _object = Thermometer::bind(&mut dispatcher, &path);

    let call = properties_call(
        &path,
        METHOD_GET,
        vec![
            Value::Str(THERMOMETER_INTERFACE.to_string()),
            Value::Str("Temperature".to_string()),
        ],
    );
    let reply = match dispatcher.dispatch(&call) {
        DispatchStatus::Handled(Some(reply)) => reply,
        other => panic!("expected a reply, got {:?}", other),
    };
    assert_eq!(reply.kind, MessageKind::MethodReturn);
    assert_eq!(
        reply.arg(0),
        Some(&Value::variant(Value::Uint16(310)))
    );
}

#[test]
fn test_get_unknown_property_replies_empty() {
    let mut dispatcher = Dispatcher::new();
    let path = ObjectPath::new("/dev0");
    let _object = Thermometer::bind(&mut dispatcher, &path);

    let call = properties_call(
        &path,
        METHOD_GET,
        vec![
            Value::Str(THERMOMETER_INTERFACE.to_string()),
            Value::Str("Pressure".to_string()),
        ],
    );
    let reply = match dispatcher.dispatch(&call) {
        DispatchStatus::Handled(Some(reply)) => reply,
        other => panic!("expected a reply, got {:?}", other),
    };
    assert_eq!(reply.kind, MessageKind::MethodReturn);
    assert!(reply.body.is_empty());
}

#[test]
fn test_get_all_serializes_in_table_order() {
    let mut dispatcher = Dispatcher::new();
    let path = ObjectPath::new("/dev0");
    let _object = Thermometer::bind(&mut dispatcher, &path);

    let call = properties_call(
        &path,
        METHOD_GET_ALL,
        vec![Value::Str(THERMOMETER_INTERFACE.to_string())],
    );
    let reply = match dispatcher.dispatch(&call) {
        DispatchStatus::Handled(Some(reply)) => reply,
        other => panic!("expected a reply, got {:?}", other),
    };

    let dict = match reply.arg(0) {
        Some(Value::Dict(dict)) => dict,
        other => panic!("expected a dict body, got {:?}", other),
    };
    let names: Vec<&str> = dict
        .entries
        .iter()
        .filter_map(|(key, _)| key.as_str())
        .collect();
    assert_eq!(names, ["Temperature", "Unit"]);
}

#[test]
fn test_set_is_consumed_without_reply() {
    let mut dispatcher = Dispatcher::new();
    let path = ObjectPath::new("/dev0");
    let object = Thermometer::bind(&mut dispatcher, &path);

    let call = properties_call(
        &path,
        METHOD_SET,
        vec![
            Value::Str(THERMOMETER_INTERFACE.to_string()),
            Value::Str("Temperature".to_string()),
            Value::variant(Value::Uint16(0)),
        ],
    );
    match dispatcher.dispatch(&call) {
        DispatchStatus::Handled(None) => {}
        other => panic!("expected a silent consume, got {:?}", other),
    }
    // The attribute itself is untouched.
    assert_eq!(object.read().unwrap().temperature, 310);
}

#[test]
fn test_object_method_call_routed() {
    let mut dispatcher = Dispatcher::new();
    let path = ObjectPath::new("/dev0");
    let object = Thermometer::bind(&mut dispatcher, &path);

    let call = Message::method_call("org.blesim", path.clone(), THERMOMETER_INTERFACE, "Reset");
    match dispatcher.dispatch(&call) {
        DispatchStatus::Handled(Some(reply)) => {
            assert_eq!(reply.kind, MessageKind::MethodReturn)
        }
        other => panic!("expected a reply, got {:?}", other),
    }
    assert_eq!(object.read().unwrap().resets, 1);
    assert_eq!(object.read().unwrap().temperature, 0);
}

#[test]
fn test_unknown_path_and_member_fall_through() {
    let mut dispatcher = Dispatcher::new();
    let path = ObjectPath::new("/dev0");
    let _object = Thermometer::bind(&mut dispatcher, &path);

    let elsewhere = Message::method_call(
        "org.blesim",
        ObjectPath::new("/dev1"),
        THERMOMETER_INTERFACE,
        "Reset",
    );
    assert!(matches!(
        dispatcher.dispatch(&elsewhere),
        DispatchStatus::NotHandled
    ));

    let unknown = Message::method_call("org.blesim", path, THERMOMETER_INTERFACE, "Frob");
    assert!(matches!(
        dispatcher.dispatch(&unknown),
        DispatchStatus::NotHandled
    ));
}

#[test]
fn test_interface_dict_wraps_property_dict() {
    let thermometer = Thermometer {
        temperature: 277,
        resets: 0,
    };
    let dict = interface_dict(&thermometer);
    assert_eq!(dict.len(), 1);

    let inner = match dict.get(&Value::Str(THERMOMETER_INTERFACE.to_string())) {
        Some(Value::Dict(inner)) => inner,
        other => panic!("expected a nested dict, got {:?}", other),
    };
    assert_eq!(
        inner.get(&Value::Str("Temperature".to_string())),
        Some(&Value::variant(Value::Uint16(277)))
    );
    assert_eq!(inner.len(), property_dict(&thermometer).len());
}

#[test]
fn test_properties_changed_signal_shape() {
    let mut changed = Dict::new("s", "v");
    changed.insert(
        Value::Str("Temperature".to_string()),
        Value::variant(Value::Uint16(300)),
    );
    let signal = properties_changed(ObjectPath::new("/dev0"), THERMOMETER_INTERFACE, changed);

    assert_eq!(signal.kind, MessageKind::Signal);
    assert_eq!(signal.interface.as_deref(), Some(PROPERTIES_INTERFACE));
    assert_eq!(signal.member.as_deref(), Some(SIGNAL_PROPERTIES_CHANGED));
    assert_eq!(
        signal.arg(0),
        Some(&Value::Str(THERMOMETER_INTERFACE.to_string()))
    );
    assert!(matches!(signal.arg(1), Some(Value::Dict(_))));
    // Invalidated-properties list is always present and empty.
    match signal.arg(2) {
        Some(Value::Array(array)) => {
            assert_eq!(array.element_signature, "s");
            assert!(array.items.is_empty());
        }
        other => panic!("expected a string array, got {:?}", other),
    }
}
