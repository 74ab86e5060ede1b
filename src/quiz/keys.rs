/// Keys the quiz view reacts to, decoupled from any UI toolkit's key type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizKey {
    ArrowLeft,
    ArrowRight,
    Char(char),
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizCommand {
    Previous,
    Next,
    Select(usize),
    ToggleFullscreen,
}

/// Digit keys only cover the first four options.
const MAX_DIGIT_OPTIONS: usize = 4;

pub fn map_key(key: &QuizKey, option_count: usize, in_text_input: bool) -> Option<QuizCommand> {
    if in_text_input {
        return None;
    }
    match key {
        QuizKey::ArrowLeft => Some(QuizCommand::Previous),
        QuizKey::ArrowRight => Some(QuizCommand::Next),
        QuizKey::Char('f') | QuizKey::Char('F') => Some(QuizCommand::ToggleFullscreen),
        QuizKey::Char(c) => {
            let digit = c.to_digit(10)? as usize;
            if (1..=MAX_DIGIT_OPTIONS).contains(&digit) && digit <= option_count {
                Some(QuizCommand::Select(digit - 1))
            } else {
                None
            }
        }
        QuizKey::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_navigate() {
        assert_eq!(map_key(&QuizKey::ArrowLeft, 4, false), Some(QuizCommand::Previous));
        assert_eq!(map_key(&QuizKey::ArrowRight, 4, false), Some(QuizCommand::Next));
    }

    #[test]
    fn test_digits_select_existing_options() {
        assert_eq!(map_key(&QuizKey::Char('1'), 4, false), Some(QuizCommand::Select(0)));
        assert_eq!(map_key(&QuizKey::Char('4'), 4, false), Some(QuizCommand::Select(3)));
        assert_eq!(map_key(&QuizKey::Char('3'), 2, false), None);
        assert_eq!(map_key(&QuizKey::Char('5'), 6, false), None);
        assert_eq!(map_key(&QuizKey::Char('0'), 4, false), None);
    }

    #[test]
    fn test_fullscreen_shortcut() {
        assert_eq!(map_key(&QuizKey::Char('f'), 4, false), Some(QuizCommand::ToggleFullscreen));
        assert_eq!(map_key(&QuizKey::Char('F'), 4, false), Some(QuizCommand::ToggleFullscreen));
    }

    #[test]
    fn test_text_input_swallows_everything() {
        for key in [QuizKey::ArrowLeft, QuizKey::Char('2'), QuizKey::Char('f')] {
            assert_eq!(map_key(&key, 4, true), None);
        }
        assert_eq!(map_key(&QuizKey::Other, 4, false), None);
        assert_eq!(map_key(&QuizKey::Char('x'), 4, false), None);
    }
}
