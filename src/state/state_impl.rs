use super::error::StateError;
use super::model::{
    sample_goals, sample_habits, sample_tasks, Goal, Habit, HabitDraft, Task, TaskDraft,
};
use super::navigation::Screen;
use crate::app::ActionSender;
use crate::events::actions::Action;
use crate::logger::LogBuffer;
use crate::ui::Theme;
use log::*;
use ratatui::widgets::ListState;

/// Number of log lines kept visible in the log panel.
const LOG_PANEL_LINES: usize = 200;

/// Houses data representative of application state.
///
pub struct State {
    action_sender: Option<ActionSender>,
    log_buffer: LogBuffer,
    theme: Theme,
    screen: Screen,
    habits: Vec<Habit>,
    tasks: Vec<Task>,
    goals: Vec<Goal>,
    habits_list_state: ListState,
    tasks_list_state: ListState,
    goals_list_state: ListState,
    next_id: u64,
    show_log: bool,
    quit_requested: bool,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        let habits = sample_habits();
        let tasks = sample_tasks();
        let next_id = habits
            .iter()
            .map(|h| h.id)
            .chain(tasks.iter().map(|t| t.id))
            .max()
            .unwrap_or(0)
            + 1;
        let mut state = State {
            action_sender: None,
            log_buffer: LogBuffer::default(),
            theme: Theme::default(),
            screen: Screen::default(),
            habits,
            tasks,
            goals: sample_goals(),
            habits_list_state: ListState::default(),
            tasks_list_state: ListState::default(),
            goals_list_state: ListState::default(),
            next_id,
            show_log: false,
            quit_requested: false,
        };
        state.clamp_selections();
        state
    }
}

impl State {
    pub fn new(action_sender: ActionSender, log_buffer: LogBuffer, theme: Theme) -> Self {
        State {
            action_sender: Some(action_sender),
            log_buffer,
            theme,
            ..State::default()
        }
    }

    /// Get the current theme.
    ///
    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    pub fn current_screen(&self) -> Screen {
        self.screen
    }

    /// Switch to the next screen.
    ///
    pub fn next_screen(&mut self) -> &mut Self {
        self.screen = self.screen.next();
        self
    }

    pub fn get_habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get_tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get_goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Habits and tasks attached to a goal.
    ///
    pub fn goal_items(&self, goal_id: u64) -> (Vec<&Habit>, Vec<&Task>) {
        (
            self.habits
                .iter()
                .filter(|h| h.goal_id == Some(goal_id))
                .collect(),
            self.tasks
                .iter()
                .filter(|t| t.goal_id == Some(goal_id))
                .collect(),
        )
    }

    pub fn get_habits_list_state(&mut self) -> &mut ListState {
        &mut self.habits_list_state
    }

    pub fn get_tasks_list_state(&mut self) -> &mut ListState {
        &mut self.tasks_list_state
    }

    pub fn get_goals_list_state(&mut self) -> &mut ListState {
        &mut self.goals_list_state
    }

    fn current_list(&mut self) -> (usize, &mut ListState) {
        match self.screen {
            Screen::Habits => (self.habits.len(), &mut self.habits_list_state),
            Screen::Tasks => (self.tasks.len(), &mut self.tasks_list_state),
            Screen::Goals => (self.goals.len(), &mut self.goals_list_state),
        }
    }

    /// Activate the next item on the current screen.
    ///
    pub fn next_item(&mut self) -> &mut Self {
        let (len, list_state) = self.current_list();
        if len == 0 {
            list_state.select(None);
            return self;
        }
        let next = match list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        list_state.select(Some(next));
        self
    }

    /// Activate the previous item on the current screen.
    ///
    pub fn previous_item(&mut self) -> &mut Self {
        let (len, list_state) = self.current_list();
        if len == 0 {
            list_state.select(None);
            return self;
        }
        let prev = match list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => len - 1,
        };
        list_state.select(Some(prev));
        self
    }

    fn clamp_selections(&mut self) {
        fn clamp(list_state: &mut ListState, len: usize) {
            let selected = match (list_state.selected(), len) {
                (_, 0) => None,
                (Some(i), len) => Some(i.min(len - 1)),
                (None, _) => Some(0),
            };
            list_state.select(selected);
        }
        clamp(&mut self.habits_list_state, self.habits.len());
        clamp(&mut self.tasks_list_state, self.tasks.len());
        clamp(&mut self.goals_list_state, self.goals.len());
    }

    pub fn selected_habit(&self) -> Option<&Habit> {
        self.habits_list_state
            .selected()
            .and_then(|i| self.habits.get(i))
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks_list_state
            .selected()
            .and_then(|i| self.tasks.get(i))
    }

    pub fn get_habit(&self, id: u64) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn get_task(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Store a new habit built from `draft`, returning its id.
    ///
    pub fn add_habit(&mut self, draft: HabitDraft) -> u64 {
        let id = self.take_id();
        info!("Adding habit '{}'...", draft.title);
        self.habits.push(Habit {
            id,
            title: draft.title,
            days: draft.days,
            reminder: draft.reminder,
            paused: draft.paused,
            note: draft.note,
            goal_id: None,
        });
        self.habits_list_state.select(Some(self.habits.len() - 1));
        id
    }

    /// Overwrite the editable fields of an existing habit.
    ///
    pub fn update_habit(&mut self, id: u64, draft: HabitDraft) -> Result<(), StateError> {
        let habit = self
            .habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(StateError::HabitNotFound { id })?;
        info!("Updating habit '{}'...", draft.title);
        habit.title = draft.title;
        habit.days = draft.days;
        habit.reminder = draft.reminder;
        habit.paused = draft.paused;
        habit.note = draft.note;
        Ok(())
    }

    pub fn delete_habit(&mut self, id: u64) -> Result<Habit, StateError> {
        let index = self
            .habits
            .iter()
            .position(|h| h.id == id)
            .ok_or(StateError::HabitNotFound { id })?;
        let habit = self.habits.remove(index);
        info!("Deleted habit '{}'.", habit.title);
        self.clamp_selections();
        Ok(habit)
    }

    /// Flip the paused flag of a habit. Returns the new value.
    ///
    pub fn toggle_habit_pause(&mut self, id: u64) -> Result<bool, StateError> {
        let habit = self
            .habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(StateError::HabitNotFound { id })?;
        habit.paused = !habit.paused;
        debug!("Habit '{}' paused: {}", habit.title, habit.paused);
        Ok(habit.paused)
    }

    /// Store a new task built from `draft`, returning its id.
    ///
    pub fn add_task(&mut self, draft: TaskDraft) -> u64 {
        let id = self.take_id();
        info!("Adding task '{}'...", draft.title);
        self.tasks.push(Task {
            id,
            title: draft.title,
            due: draft.due,
            reminder: draft.reminder,
            done: false,
            note: draft.note,
            goal_id: None,
        });
        self.tasks_list_state.select(Some(self.tasks.len() - 1));
        id
    }

    pub fn delete_task(&mut self, id: u64) -> Result<Task, StateError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StateError::TaskNotFound { id })?;
        let task = self.tasks.remove(index);
        info!("Deleted task '{}'.", task.title);
        self.clamp_selections();
        Ok(task)
    }

    /// Flip the done flag of a task. Returns the new value.
    ///
    pub fn toggle_task_done(&mut self, id: u64) -> Result<bool, StateError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StateError::TaskNotFound { id })?;
        task.done = !task.done;
        debug!("Task '{}' done: {}", task.title, task.done);
        Ok(task.done)
    }

    /// Replace habits, tasks and goals with the bundled samples. Ids handed
    /// out earlier are never reused.
    ///
    pub fn reset_data(&mut self) -> &mut Self {
        warn!(
            "Resetting data ({} habits, {} tasks)...",
            self.habits.len(),
            self.tasks.len()
        );
        let next_id = self.next_id;
        let fresh = State::default();
        self.habits = fresh.habits;
        self.tasks = fresh.tasks;
        self.goals = fresh.goals;
        self.next_id = next_id.max(fresh.next_id);
        self.habits_list_state = ListState::default();
        self.tasks_list_state = ListState::default();
        self.goals_list_state = ListState::default();
        self.clamp_selections();
        self
    }

    pub fn toggle_log(&mut self) -> &mut Self {
        self.show_log = !self.show_log;
        self
    }

    pub fn is_log_visible(&self) -> bool {
        self.show_log
    }

    pub fn log_entries(&self) -> Vec<String> {
        self.log_buffer.recent(LOG_PANEL_LINES)
    }

    pub fn request_quit(&mut self) -> &mut Self {
        self.quit_requested = true;
        self
    }

    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Send an action to the worker thread.
    ///
    pub fn dispatch(&self, action: Action) -> Result<(), StateError> {
        match &self.action_sender {
            Some(sender) => sender
                .send(action)
                .map_err(|_| StateError::ActionChannelClosed),
            None => Err(StateError::ActionChannelClosed),
        }
    }
}
