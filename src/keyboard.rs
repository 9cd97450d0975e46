//! Keyboard shortcuts.

/// A key press as delivered by the page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPress {
    pub key: String,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleLanguage,
    CloseLightbox,
    NextImage,
    PreviousImage,
}

/// Map a key press to a command.
///
/// Alt+L toggles the language anywhere. Lightbox keys only act while the
/// lightbox is open, and only without Ctrl or Meta held.
pub fn command_for(press: &KeyPress, lightbox_open: bool) -> Option<Command> {
    if press.alt && !press.ctrl && !press.meta && press.key.eq_ignore_ascii_case("l") {
        return Some(Command::ToggleLanguage);
    }

    if !lightbox_open || press.alt || press.ctrl || press.meta {
        return None;
    }

    match press.key.as_str() {
        "Escape" | "Esc" => Some(Command::CloseLightbox),
        "ArrowRight" | "Right" => Some(Command::NextImage),
        "ArrowLeft" | "Left" => Some(Command::PreviousImage),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alt_l_toggles_either_case() {
        assert_eq!(
            command_for(&KeyPress::new("l").with_alt(), false),
            Some(Command::ToggleLanguage)
        );
        assert_eq!(
            command_for(&KeyPress::new("L").with_alt().with_shift(), true),
            Some(Command::ToggleLanguage)
        );
    }

    #[test]
    fn test_plain_l_does_nothing() {
        assert_eq!(command_for(&KeyPress::new("l"), false), None);
        assert_eq!(command_for(&KeyPress::new("l").with_alt().with_ctrl(), false), None);
    }

    #[test]
    fn test_lightbox_keys_require_open_lightbox() {
        for key in ["Escape", "ArrowRight", "ArrowLeft"] {
            assert_eq!(command_for(&KeyPress::new(key), false), None);
        }
    }

    #[test]
    fn test_lightbox_keys_when_open() {
        assert_eq!(
            command_for(&KeyPress::new("Escape"), true),
            Some(Command::CloseLightbox)
        );
        assert_eq!(
            command_for(&KeyPress::new("ArrowRight"), true),
            Some(Command::NextImage)
        );
        assert_eq!(
            command_for(&KeyPress::new("ArrowLeft"), true),
            Some(Command::PreviousImage)
        );
        assert_eq!(command_for(&KeyPress::new("Enter"), true), None);
    }

    #[test]
    fn test_modified_arrows_ignored() {
        assert_eq!(command_for(&KeyPress::new("ArrowRight").with_ctrl(), true), None);
    }
}
