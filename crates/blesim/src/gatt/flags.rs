//! Capability flag sets and their wire spellings.

use bitflags::bitflags;

bitflags! {
    /// The 17 characteristic capabilities.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CharacteristicFlags: u32 {
        const BROADCAST = 1 << 0;
        const READ = 1 << 1;
        const WRITE_WITHOUT_RESPONSE = 1 << 2;
        const WRITE = 1 << 3;
        const NOTIFY = 1 << 4;
        const INDICATE = 1 << 5;
        const AUTHENTICATED_SIGNED_WRITES = 1 << 6;
        const EXTENDED_PROPERTIES = 1 << 7;
        const RELIABLE_WRITE = 1 << 8;
        const WRITABLE_AUXILIARIES = 1 << 9;
        const ENCRYPT_READ = 1 << 10;
        const ENCRYPT_WRITE = 1 << 11;
        const ENCRYPT_AUTHENTICATED_READ = 1 << 12;
        const ENCRYPT_AUTHENTICATED_WRITE = 1 << 13;
        const SECURE_READ = 1 << 14;
        const SECURE_WRITE = 1 << 15;
        const AUTHORIZE = 1 << 16;
    }
}

bitflags! {
    /// The 9 descriptor capabilities.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DescriptorFlags: u16 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
        const ENCRYPT_READ = 1 << 2;
        const ENCRYPT_WRITE = 1 << 3;
        const ENCRYPT_AUTHENTICATED_READ = 1 << 4;
        const ENCRYPT_AUTHENTICATED_WRITE = 1 << 5;
        const SECURE_READ = 1 << 6;
        const SECURE_WRITE = 1 << 7;
        const AUTHORIZE = 1 << 8;
    }
}

const CHARACTERISTIC_FLAG_NAMES: &[(CharacteristicFlags, &str)] = &[
    (CharacteristicFlags::BROADCAST, "broadcast"),
    (CharacteristicFlags::READ, "read"),
    (
        CharacteristicFlags::WRITE_WITHOUT_RESPONSE,
        "write-without-response",
    ),
    (CharacteristicFlags::WRITE, "write"),
    (CharacteristicFlags::NOTIFY, "notify"),
    (CharacteristicFlags::INDICATE, "indicate"),
    (
        CharacteristicFlags::AUTHENTICATED_SIGNED_WRITES,
        "authenticated-signed-writes",
    ),
    (
        CharacteristicFlags::EXTENDED_PROPERTIES,
        "extended-properties",
    ),
    (CharacteristicFlags::RELIABLE_WRITE, "reliable-write"),
    (
        CharacteristicFlags::WRITABLE_AUXILIARIES,
        "writable-auxiliaries",
    ),
    (CharacteristicFlags::ENCRYPT_READ, "encrypt-read"),
    (CharacteristicFlags::ENCRYPT_WRITE, "encrypt-write"),
    (
        CharacteristicFlags::ENCRYPT_AUTHENTICATED_READ,
        "encrypt-authenticated-read",
    ),
    (
        CharacteristicFlags::ENCRYPT_AUTHENTICATED_WRITE,
        "encrypt-authenticated-write",
    ),
    (CharacteristicFlags::SECURE_READ, "secure-read"),
    (CharacteristicFlags::SECURE_WRITE, "secure-write"),
    (CharacteristicFlags::AUTHORIZE, "authorize"),
];

const DESCRIPTOR_FLAG_NAMES: &[(DescriptorFlags, &str)] = &[
    (DescriptorFlags::READ, "read"),
    (DescriptorFlags::WRITE, "write"),
    (DescriptorFlags::ENCRYPT_READ, "encrypt-read"),
    (DescriptorFlags::ENCRYPT_WRITE, "encrypt-write"),
    (
        DescriptorFlags::ENCRYPT_AUTHENTICATED_READ,
        "encrypt-authenticated-read",
    ),
    (
        DescriptorFlags::ENCRYPT_AUTHENTICATED_WRITE,
        "encrypt-authenticated-write",
    ),
    (DescriptorFlags::SECURE_READ, "secure-read"),
    (DescriptorFlags::SECURE_WRITE, "secure-write"),
    (DescriptorFlags::AUTHORIZE, "authorize"),
];

impl CharacteristicFlags {
    /// The wire spellings of the set capabilities, in declaration
    /// order.
    pub fn wire_names(&self) -> Vec<&'static str> {
        CHARACTERISTIC_FLAG_NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl DescriptorFlags {
    /// The wire spellings of the set capabilities, in declaration
    /// order.
    pub fn wire_names(&self) -> Vec<&'static str> {
        DESCRIPTOR_FLAG_NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}
