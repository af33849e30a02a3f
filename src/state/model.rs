//! Tracker data types.
//!
//! Habits and tasks optionally belong to a goal. Drafts are what the entry
//! forms produce; the state turns them into stored records.

use chrono::{NaiveDate, NaiveTime};
use fake::Dummy;

/// Day of the week a habit repeats on.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RepeatDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl RepeatDay {
    pub const ALL: [RepeatDay; 7] = [
        RepeatDay::Monday,
        RepeatDay::Tuesday,
        RepeatDay::Wednesday,
        RepeatDay::Thursday,
        RepeatDay::Friday,
        RepeatDay::Saturday,
        RepeatDay::Sunday,
    ];

    pub fn short_name(&self) -> &'static str {
        match self {
            RepeatDay::Monday => "Mon",
            RepeatDay::Tuesday => "Tue",
            RepeatDay::Wednesday => "Wed",
            RepeatDay::Thursday => "Thu",
            RepeatDay::Friday => "Fri",
            RepeatDay::Saturday => "Sat",
            RepeatDay::Sunday => "Sun",
        }
    }
}

/// Goal cover category.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq)]
pub enum Cover {
    Exercise,
    Travel,
    LearnSkills,
    Education,
    Personal,
    Creative,
}

impl Cover {
    pub fn label(&self) -> &'static str {
        match self {
            Cover::Exercise => "Exercise",
            Cover::Travel => "Travel",
            Cover::LearnSkills => "Learn skills",
            Cover::Education => "Education",
            Cover::Personal => "Personal",
            Cover::Creative => "Creative",
        }
    }
}

/// Defines habit data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Habit {
    pub id: u64,
    pub title: String,
    pub days: Vec<RepeatDay>,
    pub reminder: Option<NaiveTime>,
    pub paused: bool,
    pub note: String,
    pub goal_id: Option<u64>,
}

/// Defines task data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub due: Option<NaiveDate>,
    pub reminder: Option<NaiveTime>,
    pub done: bool,
    pub note: String,
    pub goal_id: Option<u64>,
}

/// Defines goal data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Goal {
    pub id: u64,
    pub title: String,
    pub duration: String,
    pub start_date: NaiveDate,
    pub cover: Cover,
}

/// Values produced by the habit form.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq)]
pub struct HabitDraft {
    pub title: String,
    pub days: Vec<RepeatDay>,
    pub reminder: Option<NaiveTime>,
    pub paused: bool,
    pub note: String,
}

impl From<&Habit> for HabitDraft {
    fn from(habit: &Habit) -> Self {
        HabitDraft {
            title: habit.title.clone(),
            days: habit.days.clone(),
            reminder: habit.reminder,
            paused: habit.paused,
            note: habit.note.clone(),
        }
    }
}

/// Values produced by the task form.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub due: Option<NaiveDate>,
    pub reminder: Option<NaiveTime>,
    pub note: String,
}

fn time(hour: u32, minute: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Seed goals shown on first start.
///
pub fn sample_goals() -> Vec<Goal> {
    let start = date(2024, 1, 1).unwrap_or_default();
    vec![
        Goal {
            id: 1,
            title: "Run a half marathon".to_string(),
            duration: "3 months".to_string(),
            start_date: start,
            cover: Cover::Exercise,
        },
        Goal {
            id: 2,
            title: "Learn Spanish".to_string(),
            duration: "6 months".to_string(),
            start_date: start,
            cover: Cover::LearnSkills,
        },
    ]
}

/// Seed habits shown on first start.
///
pub fn sample_habits() -> Vec<Habit> {
    use RepeatDay::*;
    vec![
        Habit {
            id: 1,
            title: "Morning run".to_string(),
            days: vec![Monday, Wednesday, Friday],
            reminder: time(6, 30),
            paused: false,
            note: "Keep the pace easy".to_string(),
            goal_id: Some(1),
        },
        Habit {
            id: 2,
            title: "Vocabulary drill".to_string(),
            days: RepeatDay::ALL.to_vec(),
            reminder: time(20, 0),
            paused: false,
            note: String::new(),
            goal_id: Some(2),
        },
        Habit {
            id: 3,
            title: "Stretching".to_string(),
            days: vec![Tuesday, Thursday, Saturday],
            reminder: None,
            paused: true,
            note: String::new(),
            goal_id: None,
        },
    ]
}

/// Seed tasks shown on first start.
///
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task {
            id: 1,
            title: "Buy running shoes".to_string(),
            due: date(2024, 1, 10),
            reminder: time(18, 0),
            done: true,
            note: String::new(),
            goal_id: Some(1),
        },
        Task {
            id: 2,
            title: "Register for the race".to_string(),
            due: date(2024, 2, 1),
            reminder: None,
            done: false,
            note: "Early bird closes end of January".to_string(),
            goal_id: Some(1),
        },
        Task {
            id: 3,
            title: "Book a tutor session".to_string(),
            due: None,
            reminder: None,
            done: false,
            note: String::new(),
            goal_id: Some(2),
        },
    ]
}
