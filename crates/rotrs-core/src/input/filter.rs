// Rotrs Input Layer - Device Filtering
// Device matching logic for autodetection and manual filtering

/// Check if a device matches the given filter criteria.
///
/// 1. If filter names are given, only devices whose path or name equals one
///    of them match, virtual or not.
/// 2. With an empty filter, every non-virtual pointer matches.
///
/// # Arguments
/// * `device_name` - The device name from evdev
/// * `device_path` - The device path (e.g., "/dev/input/event0")
/// * `filter_names` - Device names/paths to match (empty for autodetect)
/// * `is_pointer` - Whether the device reports REL_X and REL_Y
/// * `is_virtual` - Whether the device is our own virtual output
pub fn matches_device_filter(
    device_name: &str,
    device_path: &str,
    filter_names: &[String],
    is_pointer: bool,
    is_virtual: bool,
) -> bool {
    if !filter_names.is_empty() {
        return filter_names
            .iter()
            .any(|match_name| device_path == match_name || device_name == match_name);
    }

    !is_virtual && is_pointer
}
