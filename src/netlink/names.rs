//! Interface index to name resolution.

use std::collections::HashMap;

/// Resolves a kernel interface index to its name.
pub trait InterfaceNames {
    fn name_of(&self, index: u32) -> Option<String>;
}

/// Live lookup through `if_nameindex(3)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemInterfaceNames;

impl InterfaceNames for SystemInterfaceNames {
    fn name_of(&self, index: u32) -> Option<String> {
        let interfaces = match nix::net::if_::if_nameindex() {
            Ok(interfaces) => interfaces,
            Err(e) => {
                log::debug!("if_nameindex failed: {e}");
                return None;
            }
        };
        interfaces
            .iter()
            .find(|iface| iface.index() == index)
            .map(|iface| iface.name().to_string_lossy().into_owned())
    }
}

/// Fixed index table.
#[derive(Debug, Default, Clone)]
pub struct StaticInterfaceNames(pub HashMap<u32, String>);

impl StaticInterfaceNames {
    pub fn new(entries: &[(u32, &str)]) -> Self {
        StaticInterfaceNames(
            entries
                .iter()
                .map(|(index, name)| (*index, name.to_string()))
                .collect(),
        )
    }
}

impl InterfaceNames for StaticInterfaceNames {
    fn name_of(&self, index: u32) -> Option<String> {
        self.0.get(&index).cloned()
    }
}
