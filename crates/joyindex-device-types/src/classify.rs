//! Controller classification for enumerated device names.
//!
//! Enumeration sources hand back everything HID-shaped: keyboards, mice,
//! virtual devices, audio endpoints. Classification is a two-stage keyword
//! filter over the display name. The exclusion set is checked first and
//! always wins; a name matching neither set is rejected.

/// Names containing any of these are never controllers, regardless of what
/// else the name says.
const EXCLUDE_KEYWORDS: &[&str] = &[
    "keyboard",
    "mouse",
    "hub",
    "storage",
    "network",
    "ethernet",
    "bluetooth",
    "audio",
    "speaker",
    "microphone",
    "headset",
    "camera",
    "webcam",
    "printer",
    "scanner",
    "touchpad",
    "trackpad",
    "virtual",
    "root",
    "composite",
    "receiver",
];

/// A name must contain at least one of these to be accepted. Generic device
/// class terms plus brand/model tokens common to HOTAS-class hardware.
const INCLUDE_KEYWORDS: &[&str] = &[
    "joystick",
    "joy stick",
    "gamepad",
    "game pad",
    "game controller",
    "flight",
    "throttle",
    "rudder",
    "pedal",
    "hotas",
    "stick",
    "yoke",
    "sidewinder",
    "warthog",
    "t16000",
    "t.16000",
    "x52",
    "x56",
    "thrustmaster",
    "saitek",
    "logitech extreme",
    "vkb",
    "gladiator",
    "virpil",
    "vpc",
    "winwing",
    "honeycomb",
    "ch products",
    "fighterstick",
];

/// Classify a device display name as a game controller.
///
/// Conservative by default: unknown names are rejected rather than let a
/// keyboard end up in the remapping table.
pub fn is_game_controller(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    if EXCLUDE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return false;
    }
    INCLUDE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_controller_names() {
        assert!(is_game_controller("Thrustmaster T.16000M"));
        assert!(is_game_controller("TWCS Throttle"));
        assert!(is_game_controller("VKB Gladiator NXT"));
        assert!(is_game_controller("MFG Crosswind Rudder Pedals"));
        assert!(is_game_controller("HID-compliant game controller"));
    }

    #[test]
    fn rejects_excluded_device_classes() {
        assert!(!is_game_controller("USB Keyboard"));
        assert!(!is_game_controller("Logitech G502 Mouse"));
        assert!(!is_game_controller("USB Root Hub"));
        assert!(!is_game_controller("Virtual Audio Device"));
    }

    #[test]
    fn exclusion_wins_over_inclusion() {
        // "joystick" alone would pass, but "virtual" is checked first.
        assert!(!is_game_controller("vJoy Virtual Joystick"));
        assert!(!is_game_controller("Flight Sim Bluetooth Receiver"));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(!is_game_controller("USB Input Device"));
        assert!(!is_game_controller(""));
    }
}
