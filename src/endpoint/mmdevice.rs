//! Thin safe wrapper over the Windows MMDevice COM API.
//!
//! All COM calls stay inside this module; the rest of the crate sees plain
//! `String` identifiers and names through `DeviceEnumerator`.

use std::ffi::c_void;

use anyhow::{Context, Result};
use windows::core::HSTRING;
use windows::Win32::Devices::FunctionDiscovery::PKEY_Device_FriendlyName;
use windows::Win32::Media::Audio::{
    eCapture, eConsole, eRender, EDataFlow, IMMDevice, IMMDeviceEnumerator, MMDeviceEnumerator,
};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoTaskMemFree, CoUninitialize, CLSCTX_ALL,
    COINIT_MULTITHREADED, STGM_READ,
};

use crate::endpoint::Direction;

/// COM apartment scoped to the enumerator's lifetime
struct ComApartment;

impl ComApartment {
    fn new() -> Result<Self> {
        unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) }
            .ok()
            .context("Failed to initialize COM")?;
        Ok(Self)
    }
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        unsafe { CoUninitialize() };
    }
}

/// Owns the MMDevice enumerator and the COM apartment it lives in.
// Field order matters: the enumerator must be released before the
// apartment is torn down.
pub struct DeviceEnumerator {
    enumerator: IMMDeviceEnumerator,
    _apartment: ComApartment,
}

impl DeviceEnumerator {
    pub fn new() -> Result<Self> {
        let apartment = ComApartment::new()?;
        let enumerator: IMMDeviceEnumerator =
            unsafe { CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL) }
                .context("Failed to create MMDevice enumerator")?;

        Ok(Self {
            enumerator,
            _apartment: apartment,
        })
    }

    /// ID of the current default endpoint for the console role
    pub fn default_endpoint_id(&self, direction: Direction) -> Result<String> {
        let device = unsafe {
            self.enumerator
                .GetDefaultAudioEndpoint(data_flow(direction), eConsole)
        }
        .with_context(|| format!("Failed to query default {} endpoint", direction))?;

        device_id(&device)
    }

    /// Friendly name of an endpoint, read from its property store
    pub fn friendly_name(&self, endpoint_id: &str) -> Result<String> {
        let device = unsafe { self.enumerator.GetDevice(&HSTRING::from(endpoint_id)) }
            .with_context(|| format!("Failed to open endpoint {}", endpoint_id))?;

        let store = unsafe { device.OpenPropertyStore(STGM_READ) }
            .with_context(|| format!("Failed to open property store for {}", endpoint_id))?;

        let value = unsafe { store.GetValue(&PKEY_Device_FriendlyName) }
            .with_context(|| format!("Failed to read friendly name for {}", endpoint_id))?;

        Ok(value.to_string())
    }
}

fn data_flow(direction: Direction) -> EDataFlow {
    match direction {
        Direction::Render => eRender,
        Direction::Capture => eCapture,
    }
}

fn device_id(device: &IMMDevice) -> Result<String> {
    let pwstr = unsafe { device.GetId() }.context("Failed to read endpoint ID")?;
    // Copy out before freeing the COM-allocated string
    let id = unsafe { pwstr.to_string() };
    unsafe { CoTaskMemFree(Some(pwstr.as_ptr() as *const c_void)) };
    id.context("Endpoint ID is not valid UTF-16")
}
