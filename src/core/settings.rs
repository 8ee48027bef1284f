use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Read},
    net::{Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};

use crate::error::FolioError;

pub const DEFAULT_SETTINGS_PATH: &str = "core/settings.json";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Settings {
    pub ipv4_addr: Ipv4Setting,
    pub port: U16Setting,
    pub remote_url: StrSetting,
    pub local_data_path: StrSetting,
    pub snapshot_file_name: StrSetting,
    pub passkey_path: StrSetting,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StrSetting {
    pub name: String,
    pub value: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct U16Setting {
    pub name: String,
    pub value: u16,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Ipv4Setting {
    pub name: String,
    pub value: Ipv4Addr,
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FolioError> {
        let mut buffer = Vec::new();
        BufReader::new(File::open(path)?).read_to_end(&mut buffer)?;
        Ok(serde_json::from_slice::<Settings>(&buffer)?)
    }

    pub fn new() -> Self {
        Settings {
            ipv4_addr: Ipv4Setting {
                name: "Ipv4 Address".to_string(),
                value: Ipv4Addr::new(127, 0, 0, 1),
            },
            port: U16Setting {
                name: "Port".to_string(),
                value: 4010,
            },
            remote_url: StrSetting {
                name: "Remote URL".to_string(),
                value: "http://127.0.0.1:4010/data/snapshot.json".to_string(),
            },
            local_data_path: StrSetting {
                name: "local_data_path".to_string(),
                value: "data".to_string(),
            },
            snapshot_file_name: StrSetting {
                name: "snapshot_file_name".to_string(),
                value: "snapshot".to_string(),
            },
            passkey_path: StrSetting {
                name: "passkey_path".to_string(),
                value: "key/pass.key".to_string(),
            },
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.ipv4_addr.value.into(), self.port.value)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        Path::new(&self.local_data_path.value).join(format!("{}.json", self.snapshot_file_name.value))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new()
    }
}
