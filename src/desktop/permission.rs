//! Desktop microphone permission.
//!
//! Desktops have no per-app prompt; device access stands in for permission.
//! The query probes the default input device and answers `Granted` when one
//! is present.

use crate::platform::{PermissionClient, PermissionState};
use crate::Result;
use cpal::traits::{DeviceTrait, HostTrait};
use tracing::{info, warn};

pub struct DesktopPermission;

impl PermissionClient for DesktopPermission {
    fn request_permission(&self) -> Result<PermissionState> {
        let host = cpal::default_host();

        match host.default_input_device() {
            Some(device) => {
                info!(
                    "Using input device: {}",
                    device.name().unwrap_or_else(|_| "Unknown".to_string())
                );
                Ok(PermissionState::Granted)
            }
            None => {
                warn!("No input device available");
                Ok(PermissionState::Denied)
            }
        }
    }
}
