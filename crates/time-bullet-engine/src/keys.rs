/// A key as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Char(char),
    Other,
}

impl Key {
    pub fn from_char(c: char) -> Self {
        match c {
            ' ' => Key::Space,
            '\n' | '\r' => Key::Enter,
            c => Key::Char(c),
        }
    }
}

/// Modifier keys held during a keydown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// A keydown event, with the host's "prevent default" switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    default_prevented: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::NONE)
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            default_prevented: false,
        }
    }

    /// Ask the host not to perform its own handling of this key.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Keys that can rewrite a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Space,
    Enter,
}

impl Trigger {
    /// Enter counts only without Shift, Ctrl or Alt (Shift+Enter is a soft
    /// break in most editors). Space counts regardless of modifiers.
    pub fn classify(event: &KeyEvent) -> Option<Self> {
        let m = event.modifiers;
        match event.key {
            Key::Enter if !m.shift && !m.ctrl && !m.alt => Some(Trigger::Enter),
            Key::Space => Some(Trigger::Space),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };
    const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };
    const ALT: Modifiers = Modifiers {
        alt: true,
        ..Modifiers::NONE
    };
    const META: Modifiers = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };

    #[rstest]
    #[case(Key::Enter, Modifiers::NONE, Some(Trigger::Enter))]
    #[case(Key::Enter, SHIFT, None)]
    #[case(Key::Enter, CTRL, None)]
    #[case(Key::Enter, ALT, None)]
    #[case(Key::Enter, META, Some(Trigger::Enter))]
    #[case(Key::Space, Modifiers::NONE, Some(Trigger::Space))]
    #[case(Key::Space, SHIFT, Some(Trigger::Space))]
    #[case(Key::Char('t'), Modifiers::NONE, None)]
    #[case(Key::Other, Modifiers::NONE, None)]
    fn test_classify(
        #[case] key: Key,
        #[case] modifiers: Modifiers,
        #[case] expected: Option<Trigger>,
    ) {
        let event = KeyEvent::with_modifiers(key, modifiers);
        assert_eq!(Trigger::classify(&event), expected);
    }

    #[test]
    fn test_key_from_char() {
        assert_eq!(Key::from_char(' '), Key::Space);
        assert_eq!(Key::from_char('\n'), Key::Enter);
        assert_eq!(Key::from_char('-'), Key::Char('-'));
    }

    #[test]
    fn test_prevent_default() {
        let mut event = KeyEvent::new(Key::Space);
        assert!(!event.is_default_prevented());

        event.prevent_default();
        assert!(event.is_default_prevented());
    }
}
