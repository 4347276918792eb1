//! Visual state of the record control.
//!
//! The press/animation layer is a pure function of {permission granted?,
//! pressed?} so it can be unit-tested without any recorder dependency.

use egui::Color32;

/// Accent color while the control is held down
const PRESSED_COLOR: Color32 = Color32::from_rgb(0xCC, 0x33, 0x63);
/// Base color while idle and allowed to record
const BASE_COLOR: Color32 = Color32::from_rgb(0xB5, 0x8D, 0xF1);
/// Color shown whenever recording is not permitted
const DISABLED_COLOR: Color32 = Color32::from_rgb(0xA9, 0xA9, 0xA9);

/// Scale factor applied to the control while held down
const PRESSED_SCALE: f32 = 1.2;

/// Resolved appearance of the record control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlVisual {
    pub color: Color32,
    pub scale: f32,
}

/// Map {permission granted?, pressed?} to the control's appearance.
///
/// Without permission the control shows the disabled color regardless of
/// press state and never enlarges.
pub fn control_visual(granted: bool, pressed: bool) -> ControlVisual {
    if !granted {
        return ControlVisual {
            color: DISABLED_COLOR,
            scale: 1.0,
        };
    }

    if pressed {
        ControlVisual {
            color: PRESSED_COLOR,
            scale: PRESSED_SCALE,
        }
    } else {
        ControlVisual {
            color: BASE_COLOR,
            scale: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granted_unpressed_is_base() {
        let visual = control_visual(true, false);
        assert_eq!(visual.color, BASE_COLOR);
        assert_eq!(visual.scale, 1.0);
    }

    #[test]
    fn test_granted_pressed_is_accent_and_enlarged() {
        let visual = control_visual(true, true);
        assert_eq!(visual.color, PRESSED_COLOR);
        assert_eq!(visual.scale, PRESSED_SCALE);
    }

    #[test]
    fn test_denied_is_disabled_regardless_of_press() {
        for pressed in [false, true] {
            let visual = control_visual(false, pressed);
            assert_eq!(visual.color, DISABLED_COLOR);
            assert_eq!(visual.scale, 1.0);
        }
    }
}
