// Rotrs Event Loop
// Direct evdev access to grabbed pointer devices

use std::os::unix::io::AsRawFd;

use evdev::{Device, EventType};

use crate::input::{
    is_pointer, is_virtual_device, matches_device_filter, DeviceCapabilities, InputEvent,
    VIRTUAL_DEVICE_PREFIX,
};

/// Result type for event loop operations
pub type EventLoopResult<T> = Result<T, EventLoopError>;

/// Errors that can occur in event loop
#[derive(Debug, thiserror::Error)]
pub enum EventLoopError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Device information for listing and chain construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Device index within the event loop
    pub index: usize,
    /// Device name
    pub name: String,
    /// Device path
    pub path: String,
}

/// Input event annotated with its source device.
#[derive(Debug, Clone, Copy)]
pub struct PolledEvent {
    pub event: InputEvent,
    /// Index into [`EventLoop::devices`]
    pub device_index: usize,
}

impl From<&evdev::InputEvent> for InputEvent {
    fn from(event: &evdev::InputEvent) -> Self {
        InputEvent::new(event.event_type().0, event.code(), event.value())
    }
}

impl From<InputEvent> for evdev::InputEvent {
    fn from(event: InputEvent) -> Self {
        evdev::InputEvent::new(EventType(event.event_type), event.code, event.value)
    }
}

/// Extract relative-axis capabilities from an evdev device
pub fn device_capabilities(device: &Device) -> DeviceCapabilities {
    let has_ev_rel = device.supported_events().contains(EventType::RELATIVE);
    let rel_axes = device
        .supported_relative_axes()
        .map(|axes| axes.iter().map(|axis| axis.0).collect())
        .unwrap_or_default();
    DeviceCapabilities::new(has_ev_rel, rel_axes)
}

/// Event loop over grabbed pointer devices.
///
/// Grabbing keeps the unrotated events away from the rest of the system; the
/// processed ones are re-emitted through the virtual pointer. Devices are
/// ungrabbed on drop.
pub struct EventLoop {
    devices: Vec<Device>,
    infos: Vec<DeviceInfo>,
    poll_fds: Vec<libc::pollfd>,
    grabbed: bool,
}

impl EventLoop {
    /// Open and grab the pointer devices that match `filter_names`.
    ///
    /// An empty filter grabs every non-virtual pointer.
    pub fn new_with_grab_filtered(filter_names: &[String]) -> EventLoopResult<Self> {
        let (mut devices, infos) = Self::find_pointers_filtered(filter_names)?;

        // A previous instance may have died holding the grab
        for device in &mut devices {
            let _ = device.ungrab();
        }
        for device in &mut devices {
            device.grab()?;
        }

        for info in &infos {
            log::info!("grabbed {} ({})", info.name, info.path);
        }

        let poll_fds = Self::create_poll_fds(&devices);
        Ok(Self {
            devices,
            infos,
            poll_fds,
            grabbed: true,
        })
    }

    fn create_poll_fds(devices: &[Device]) -> Vec<libc::pollfd> {
        devices
            .iter()
            .map(|d| libc::pollfd {
                fd: d.as_raw_fd(),
                events: libc::POLLIN,
                revents: 0,
            })
            .collect()
    }

    /// Ungrab all devices (called on shutdown)
    pub fn ungrab_all(&mut self) {
        if self.grabbed {
            for device in &mut self.devices {
                let _ = device.ungrab();
            }
            self.grabbed = false;
        }
    }

    /// List all pointer devices, for `--list-devices`
    pub fn list_devices() -> EventLoopResult<Vec<DeviceInfo>> {
        let mut devices_info = Vec::new();

        for (path, device) in evdev::enumerate() {
            let name = device.name().unwrap_or("Unknown");
            if is_virtual_device(name, VIRTUAL_DEVICE_PREFIX) {
                continue;
            }
            if is_pointer(&device_capabilities(&device)) {
                devices_info.push(DeviceInfo {
                    index: devices_info.len(),
                    name: name.to_string(),
                    path: path.display().to_string(),
                });
            }
        }

        if devices_info.is_empty() {
            return Err(EventLoopError::DeviceNotFound(
                "No pointer devices found".to_string(),
            ));
        }

        Ok(devices_info)
    }

    fn find_pointers_filtered(
        filter_names: &[String],
    ) -> EventLoopResult<(Vec<Device>, Vec<DeviceInfo>)> {
        let mut devices = Vec::new();
        let mut infos = Vec::new();

        for (path, device) in evdev::enumerate() {
            let name = device.name().unwrap_or("Unknown").to_string();
            let path = path.display().to_string();
            let pointer = is_pointer(&device_capabilities(&device));
            let virtual_device = is_virtual_device(&name, VIRTUAL_DEVICE_PREFIX);

            if matches_device_filter(&name, &path, filter_names, pointer, virtual_device) {
                infos.push(DeviceInfo {
                    index: devices.len(),
                    name,
                    path,
                });
                devices.push(device);
            }
        }

        if devices.is_empty() {
            let what = if filter_names.is_empty() {
                "No pointer devices found".to_string()
            } else {
                format!("No device matches {:?}", filter_names)
            };
            return Err(EventLoopError::DeviceNotFound(what));
        }

        Ok((devices, infos))
    }

    /// Poll for events with source device metadata.
    ///
    /// # Arguments
    /// * `timeout_ms` - Timeout in milliseconds (0 = non-blocking, -1 = infinite)
    ///
    /// Returns an empty vector on timeout or EINTR. Errors on fatal I/O or once
    /// every device has hung up.
    pub fn poll_for_events(&mut self, timeout_ms: i32) -> EventLoopResult<Vec<PolledEvent>> {
        if all_retired(&self.poll_fds) {
            return Err(EventLoopError::DeviceNotFound(
                "all grabbed devices disconnected".to_string(),
            ));
        }

        let mut events = Vec::new();

        let poll_result = unsafe {
            libc::poll(
                self.poll_fds.as_mut_ptr(),
                self.poll_fds.len() as libc::nfds_t,
                timeout_ms,
            )
        };

        if poll_result < 0 {
            let err = std::io::Error::last_os_error();
            // EINTR: a signal arrived; the caller re-checks its running flag
            if err.raw_os_error() == Some(libc::EINTR) {
                return Ok(events);
            }
            return Err(EventLoopError::Io(err));
        }

        if poll_result == 0 {
            return Ok(events);
        }

        for (index, device) in self.devices.iter_mut().enumerate() {
            let revents = self.poll_fds[index].revents;
            if is_hangup(revents) {
                let info = &self.infos[index];
                log::warn!("{} ({}) disconnected; no longer polling it", info.name, info.path);
                // poll skips negative descriptors, indices stay aligned
                self.poll_fds[index].fd = -1;
                continue;
            }
            if revents & libc::POLLIN == 0 {
                continue;
            }
            match device.fetch_events() {
                Ok(device_events) => {
                    events.extend(device_events.map(|event| PolledEvent {
                        event: InputEvent::from(&event),
                        device_index: index,
                    }));
                }
                Err(e) => {
                    log::warn!("read from {} failed: {}", self.infos[index].name, e);
                }
            }
        }

        Ok(events)
    }

    /// Devices managed by this loop, indexed like [`PolledEvent::device_index`]
    pub fn devices(&self) -> &[DeviceInfo] {
        &self.infos
    }

    /// Union of the button codes every grabbed device supports.
    ///
    /// The virtual pointer must declare them or clicks would be dropped.
    pub fn supported_buttons(&self) -> Vec<u16> {
        let mut buttons: Vec<u16> = self
            .devices
            .iter()
            .filter_map(|d| d.supported_keys())
            .flat_map(|keys| keys.iter().map(|key| key.code()))
            .collect();
        buttons.sort_unstable();
        buttons.dedup();
        buttons
    }
}

/// The descriptor was closed under us: unplugged, revoked or invalid.
fn is_hangup(revents: libc::c_short) -> bool {
    revents & (libc::POLLHUP | libc::POLLERR | libc::POLLNVAL) != 0
}

fn all_retired(poll_fds: &[libc::pollfd]) -> bool {
    poll_fds.iter().all(|pfd| pfd.fd < 0)
}

/// Devices MUST be ungrabbed on every exit path, including panics, or the
/// pointer stays dead until the devices are replugged.
impl Drop for EventLoop {
    fn drop(&mut self) {
        self.ungrab_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::event::{EV_REL, REL_X};

    #[test]
    fn test_event_conversion_round_trip() {
        let ours = InputEvent::new(EV_REL, REL_X, -17);
        let theirs: evdev::InputEvent = ours.into();
        assert_eq!(theirs.event_type(), EventType::RELATIVE);
        assert_eq!(theirs.code(), REL_X);
        assert_eq!(theirs.value(), -17);
        assert_eq!(InputEvent::from(&theirs), ours);
    }

    fn pollfd(fd: i32, revents: libc::c_short) -> libc::pollfd {
        libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents,
        }
    }

    #[test]
    fn test_hangup_detection() {
        assert!(!is_hangup(0));
        assert!(!is_hangup(libc::POLLIN));
        assert!(is_hangup(libc::POLLHUP));
        assert!(is_hangup(libc::POLLERR));
        assert!(is_hangup(libc::POLLNVAL));
        // A final read can be pending alongside the hangup
        assert!(is_hangup(libc::POLLIN | libc::POLLHUP));
    }

    #[test]
    fn test_all_retired() {
        assert!(!all_retired(&[pollfd(3, 0), pollfd(-1, 0)]));
        assert!(all_retired(&[pollfd(-1, libc::POLLHUP), pollfd(-1, 0)]));
    }

    #[test]
    fn test_list_devices() {
        // Depends on the machine; only checks the call is well-behaved
        match EventLoop::list_devices() {
            Ok(devices) => {
                for (i, device) in devices.iter().enumerate() {
                    assert_eq!(device.index, i);
                }
            }
            Err(EventLoopError::DeviceNotFound(_)) => {
                println!("Skipping test: no pointer devices found");
            }
            Err(e) => {
                panic!("Unexpected error: {}", e);
            }
        }
    }
}
