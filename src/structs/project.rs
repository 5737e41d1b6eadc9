use serde::{Deserialize, Serialize};
use crate::structs::resource_path::ResourcePath;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub accessible: bool,
}

impl Project {
    pub fn resource(&self) -> ResourcePath {
        ResourcePath::new(&self.name)
    }
}
