//! Navigation-related state types.

/// Specifying the different screens.
///
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum Screen {
    #[default]
    Habits,
    Tasks,
    Goals,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Habits, Screen::Tasks, Screen::Goals];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Habits => "Habits",
            Screen::Tasks => "Tasks",
            Screen::Goals => "Goals",
        }
    }

    /// Return the screen after this one, wrapping around.
    ///
    pub fn next(&self) -> Screen {
        match self {
            Screen::Habits => Screen::Tasks,
            Screen::Tasks => Screen::Goals,
            Screen::Goals => Screen::Habits,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Screen::Habits => 0,
            Screen::Tasks => 1,
            Screen::Goals => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cycles_through_all_screens() {
        let mut screen = Screen::default();
        for expected in Screen::ALL.iter().skip(1) {
            screen = screen.next();
            assert_eq!(&screen, expected);
        }
        assert_eq!(screen.next(), Screen::Habits);
    }

    #[test]
    fn test_index_matches_order() {
        for (i, screen) in Screen::ALL.iter().enumerate() {
            assert_eq!(screen.index(), i);
        }
    }
}
