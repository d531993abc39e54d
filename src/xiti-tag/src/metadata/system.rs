use super::{DeviceInfo, MetadataProvider, MetadataSnapshot};
use crate::config::Config;
use std::fs;
use std::path::{Path, PathBuf};
use sysinfo::System;
use tracing::debug;

const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];
const NET_CLASS_DIR: &str = "/sys/class/net";
const PRODUCT_NAME_FILE: &str = "/sys/devices/virtual/dmi/id/product_name";
const MACHINE_ID_FILE: &str = "/etc/machine-id";

/// Collects the device attributes from the host running the client.
///
/// The application version is not something the host knows, so it comes
/// from the configuration, as does an explicit device id.
#[derive(Debug, Clone)]
pub struct SystemMetadataProvider {
    app_version: Option<String>,
    device_id: Option<String>,
    net_class_dir: PathBuf,
}

impl SystemMetadataProvider {
    pub fn from_config(config: &Config) -> Self {
        Self {
            app_version: config.app_version.clone(),
            device_id: config.device_id.clone(),
            net_class_dir: PathBuf::from(NET_CLASS_DIR),
        }
    }

    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            locale: detect_locale(),
            model: detect_model(),
            os_release: detect_os_release(),
            wifi_enabled: detect_wifi(&self.net_class_dir),
            app_version: self.app_version.clone(),
            device_id: self.device_id.clone().or_else(read_machine_id),
        }
    }
}

impl MetadataProvider for SystemMetadataProvider {
    fn snapshot(&self) -> MetadataSnapshot {
        self.device_info().snapshot()
    }
}

fn detect_locale() -> Option<String> {
    let locale = LOCALE_ENV_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| parse_locale(&value));

    if locale.is_none() {
        debug!("SystemMetadataProvider: unable to get locale");
    }
    locale
}

/// `fr_FR.UTF-8@euro` -> `fr_FR`
fn parse_locale(value: &str) -> Option<String> {
    let locale = value
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();

    match locale {
        "" | "C" | "POSIX" => None,
        locale => Some(locale.to_string()),
    }
}

fn detect_model() -> Option<String> {
    if !cfg!(target_os = "linux") {
        return None;
    }

    let model = read_trimmed(Path::new(PRODUCT_NAME_FILE));
    if model.is_none() {
        debug!("SystemMetadataProvider: unable to get model");
    }
    model
}

fn detect_os_release() -> Option<String> {
    let release = System::os_version();
    if release.is_none() {
        debug!("SystemMetadataProvider: unable to get os version");
    }
    release
}

/// `Some(true)` when a wireless interface is up, `None` when the interfaces
/// cannot be listed.
fn detect_wifi(net_class_dir: &Path) -> Option<bool> {
    let entries = match fs::read_dir(net_class_dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("SystemMetadataProvider: unable to get wifi state: {}", e);
            return None;
        }
    };

    let wifi_up = entries.flatten().any(|entry| {
        let interface = entry.path();
        interface.join("wireless").exists()
            && read_trimmed(&interface.join("operstate")).as_deref() == Some("up")
    });

    Some(wifi_up)
}

fn read_machine_id() -> Option<String> {
    let id = read_trimmed(Path::new(MACHINE_ID_FILE));
    if id.is_none() {
        debug!("SystemMetadataProvider: unable to get client id");
    }
    id
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|contents| contents.trim().to_string())
        .filter(|contents| !contents.is_empty())
}
