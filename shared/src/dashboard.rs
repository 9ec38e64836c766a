//! The grid-logging state machine behind the dashboard.
//!
//! A click on an activity arms it; the next click on a cell logs the armed
//! activity there and disarms. Cell clicks while nothing is armed do nothing.
//!
//! Every logged cell is also queued for the server. Queued writes go out one
//! at a time, in click order, and stay queued until the server acknowledges
//! them, so a grid arriving from the server never hides them.

use chrono::NaiveDate;

use crate::grid::{GridSize, LoggedActivities, Position};
use crate::{seed_activities, Activity, ActivityId, CreateGridRequest, DailyGrid, GridId, LogActivityRequest};

/// Failed requests in a row before syncing pauses until the next click
pub const MAX_SYNC_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    #[default]
    Idle,
    /// An activity waiting for a target cell
    Armed(Activity),
}

impl Selection {
    pub fn armed(&self) -> Option<&Activity> {
        match self {
            Selection::Idle => None,
            Selection::Armed(activity) => Some(activity),
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, Selection::Armed(_))
    }
}

/// A cell write produced by a click while armed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAssignment {
    pub position: Position,
    pub activity_id: ActivityId,
    /// The activity previously logged at this position
    pub replaced: Option<ActivityId>,
}

/// What the client knows about the server's grid for the active date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemoteGrid {
    /// The grid for the date has been requested and not answered yet
    #[default]
    Loading,
    /// The server has no grid for the date
    Missing,
    Creating,
    Ready(GridId),
}

/// A local write waiting for the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuedLog {
    pub date: NaiveDate,
    pub request: LogActivityRequest,
}

/// The next request needed to bring the server up to date
#[derive(Debug, Clone, PartialEq)]
pub enum SyncStep {
    Create(CreateGridRequest),
    Log(GridId, QueuedLog),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    SelectActivity(Activity),
    ClickCell(Position),
    SetGridSize(GridSize),
    SetDate(NaiveDate),
    ActivitiesLoaded(Vec<Activity>),
    /// The server's grid for a date; its mapping is adopted under any queued writes
    GridLoaded(DailyGrid),
    /// The server has no grid for this date, or could not be asked
    GridMissing(NaiveDate),
    /// Marks the step returned by `next_sync` as in flight
    BeginSync,
    GridCreated(DailyGrid),
    /// The in-flight log was stored; carries the grid the server returned
    CellSynced(DailyGrid),
    SyncFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub date: NaiveDate,
    pub grid_size: GridSize,
    pub activities: Vec<Activity>,
    pub selection: Selection,
    pub logged: LoggedActivities,
    pub remote: RemoteGrid,
    /// Unacknowledged writes, oldest first; the in-flight one included
    pub outbox: Vec<QueuedLog>,
    pub in_flight: Option<SyncStep>,
    pub sync_failures: u32,
}

impl DashboardState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            grid_size: GridSize::default(),
            activities: seed_activities(),
            selection: Selection::Idle,
            logged: LoggedActivities::new(),
            remote: RemoteGrid::Loading,
            outbox: Vec::new(),
            in_flight: None,
            sync_failures: 0,
        }
    }

    pub fn with_grid_size(mut self, grid_size: GridSize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn apply(&mut self, action: DashboardAction) -> Option<CellAssignment> {
        match action {
            DashboardAction::SelectActivity(activity) => self.select_activity(activity),
            DashboardAction::ClickCell(position) => return self.click_cell(position),
            DashboardAction::SetGridSize(size) => self.set_grid_size(size),
            DashboardAction::SetDate(date) => self.set_date(date),
            DashboardAction::ActivitiesLoaded(activities) => self.activities_loaded(activities),
            DashboardAction::GridLoaded(grid) => self.grid_loaded(grid),
            DashboardAction::GridMissing(date) => self.grid_missing(date),
            DashboardAction::BeginSync => {
                self.begin_sync();
            }
            DashboardAction::GridCreated(grid) => self.grid_created(&grid),
            DashboardAction::CellSynced(grid) => self.cell_synced(&grid),
            DashboardAction::SyncFailed => self.sync_failed(),
        }
        None
    }

    /// Arms `activity`, replacing whatever was armed before
    pub fn select_activity(&mut self, activity: Activity) {
        self.selection = Selection::Armed(activity);
    }

    pub fn click_cell(&mut self, position: Position) -> Option<CellAssignment> {
        let activity_id = self.selection.armed()?.id;
        let replaced = self.logged.assign(position, activity_id);
        self.selection = Selection::Idle;

        self.outbox.push(QueuedLog {
            date: self.date,
            request: LogActivityRequest { activity_id, position },
        });
        self.sync_failures = 0;

        Some(CellAssignment {
            position,
            activity_id,
            replaced,
        })
    }

    /// Logged positions are kept even when they fall outside the new size
    pub fn set_grid_size(&mut self, grid_size: GridSize) {
        self.grid_size = grid_size;
    }

    /// The mapping carries over to the new date; the server grid is looked up again.
    /// Writes queued for other dates wait until that date is active again.
    pub fn set_date(&mut self, date: NaiveDate) {
        if self.date != date {
            self.date = date;
            self.remote = RemoteGrid::Loading;
        }
    }

    /// An empty list keeps the current activities
    pub fn activities_loaded(&mut self, activities: Vec<Activity>) {
        if !activities.is_empty() {
            self.activities = activities;
        }
    }

    pub fn grid_loaded(&mut self, grid: DailyGrid) {
        if grid.date != self.date {
            return;
        }
        self.remote = RemoteGrid::Ready(grid.id);
        self.grid_size = grid.size();
        self.logged = grid.activities_logged;

        for queued in self.outbox.iter().filter(|queued| queued.date == self.date) {
            self.logged.assign(queued.request.position, queued.request.activity_id);
        }
    }

    pub fn grid_missing(&mut self, date: NaiveDate) {
        if date == self.date && self.remote == RemoteGrid::Loading {
            self.remote = RemoteGrid::Missing;
        }
    }

    /// The request to send next, if any. Nothing is sent while a request is in
    /// flight, while the grid lookup is pending, or after repeated failures.
    pub fn next_sync(&self) -> Option<SyncStep> {
        if self.in_flight.is_some() || self.sync_failures >= MAX_SYNC_ATTEMPTS {
            return None;
        }
        let queued = self.outbox.iter().find(|queued| queued.date == self.date)?;

        match self.remote {
            RemoteGrid::Loading | RemoteGrid::Creating => None,
            RemoteGrid::Missing => Some(SyncStep::Create(CreateGridRequest {
                date: self.date,
                grid_size: self.grid_size,
                notes: String::new(),
            })),
            RemoteGrid::Ready(grid_id) => Some(SyncStep::Log(grid_id, *queued)),
        }
    }

    pub fn begin_sync(&mut self) -> Option<SyncStep> {
        let step = self.next_sync()?;
        if let SyncStep::Create(_) = step {
            self.remote = RemoteGrid::Creating;
        }
        self.in_flight = Some(step.clone());
        Some(step)
    }

    pub fn grid_created(&mut self, grid: &DailyGrid) {
        self.in_flight = None;
        self.sync_failures = 0;
        if grid.date == self.date {
            self.remote = RemoteGrid::Ready(grid.id);
        }
    }

    /// Drops the acknowledged write from the queue. The local mapping is kept
    /// since later clicks may already have changed it.
    pub fn cell_synced(&mut self, grid: &DailyGrid) {
        if let Some(SyncStep::Log(_, sent)) = self.in_flight.take() {
            if let Some(index) = self.outbox.iter().position(|queued| *queued == sent) {
                self.outbox.remove(index);
            }
        }
        self.sync_failures = 0;
        if grid.date == self.date {
            self.remote = RemoteGrid::Ready(grid.id);
        }
    }

    /// The write stays queued. A failed create usually means the grid exists
    /// after all, so the lookup is repeated before trying again.
    pub fn sync_failed(&mut self) {
        if let Some(SyncStep::Create(request)) = self.in_flight.take() {
            if request.date == self.date && self.remote == RemoteGrid::Creating {
                self.remote = RemoteGrid::Loading;
            }
        }
        self.sync_failures += 1;
    }

    pub fn remote_grid_id(&self) -> Option<GridId> {
        match self.remote {
            RemoteGrid::Ready(id) => Some(id),
            _ => None,
        }
    }

    /// Whether the active date's grid still needs to be looked up
    pub fn needs_lookup(&self) -> bool {
        self.remote == RemoteGrid::Loading
    }

    pub fn completion_percent(&self) -> u32 {
        self.logged.completion_percent(self.grid_size)
    }

    /// Logged positions that cannot be rendered: outside the current size, or
    /// pointing at an activity that is not in the list.
    pub fn stale_positions(&self) -> Vec<Position> {
        self.logged
            .iter()
            .filter(|(position, activity_id)| {
                !self.grid_size.contains(*position)
                    || !self.activities.iter().any(|a| a.id == *activity_id)
            })
            .map(|(position, _)| position)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn exercise() -> Activity {
        Activity::new(1, "Exercise", "#3B82F6", "💪")
    }

    fn remote_grid(id: GridId, day: u32, grid_size: u32, logged: &[(Position, ActivityId)]) -> DailyGrid {
        DailyGrid {
            id,
            date: date(day),
            grid_size,
            activities_logged: logged.iter().copied().collect(),
            completion_percentage: 0.0,
            notes: String::new(),
        }
    }

    #[test]
    fn test_new_state_is_idle_and_empty() {
        let state = DashboardState::new(date(1));
        assert_eq!(state.selection, Selection::Idle);
        assert!(state.logged.is_empty());
        assert_eq!(state.grid_size, GridSize::Small);
        assert_eq!(state.activities.len(), 5);
    }

    #[test]
    fn test_select_then_click_logs_and_disarms() {
        let mut state = DashboardState::new(date(1));
        state.select_activity(exercise());
        assert!(state.selection.is_armed());

        let assignment = state.click_cell(0);
        assert_eq!(
            assignment,
            Some(CellAssignment {
                position: 0,
                activity_id: 1,
                replaced: None
            })
        );
        assert_eq!(state.logged.get(0), Some(1));
        assert_eq!(state.selection, Selection::Idle);
    }

    #[test]
    fn test_click_while_idle_is_noop() {
        let mut state = DashboardState::new(date(1));
        state.logged.assign(3, 2);
        let before = state.logged.clone();

        assert_eq!(state.click_cell(3), None);
        assert_eq!(state.click_cell(7), None);
        assert_eq!(state.logged, before);
        assert_eq!(state.selection, Selection::Idle);
    }

    #[test]
    fn test_second_click_after_log_is_noop() {
        let mut state = DashboardState::new(date(1));
        state.select_activity(exercise());
        state.click_cell(0);

        assert_eq!(state.click_cell(1), None);
        assert_eq!(state.logged.len(), 1);
    }

    #[test]
    fn test_click_overwrites_existing_cell() {
        let mut state = DashboardState::new(date(1));
        state.logged.assign(4, 1);

        let read = state.activities[1].clone();
        state.select_activity(read);
        let assignment = state.click_cell(4).unwrap();

        assert_eq!(assignment.replaced, Some(1));
        assert_eq!(state.logged.get(4), Some(2));
    }

    #[test]
    fn test_reselect_replaces_armed_activity() {
        let mut state = DashboardState::new(date(1));
        let exercise = state.activities[0].clone();
        let read = state.activities[1].clone();

        state.select_activity(exercise.clone());
        state.select_activity(exercise.clone());
        assert_eq!(state.selection.armed(), Some(&exercise));

        state.select_activity(read.clone());
        assert_eq!(state.selection.armed(), Some(&read));
    }

    #[test]
    fn test_exercise_scenario() {
        let mut state = DashboardState::new(date(1));
        let exercise = state.activities[0].clone();

        state.apply(DashboardAction::SelectActivity(exercise.clone()));
        let assignment = state.apply(DashboardAction::ClickCell(0));

        assert!(assignment.is_some());
        assert_eq!(state.logged.activity_at(&state.activities, 0), Some(&exercise));
        assert_eq!(state.selection, Selection::Idle);
        assert_eq!(state.completion_percent(), 6);
    }

    #[test]
    fn test_four_logged_cells_is_quarter_complete() {
        let mut state = DashboardState::new(date(1));
        for position in 0..4 {
            let activity = state.activities[position as usize].clone();
            state.select_activity(activity);
            state.click_cell(position);
        }
        assert_eq!(state.completion_percent(), 25);
    }

    #[test]
    fn test_set_grid_size_keeps_mapping_and_selection() {
        let mut state = DashboardState::new(date(1)).with_grid_size(GridSize::Large);
        state.logged.assign(40, 1);
        state.select_activity(exercise());

        state.apply(DashboardAction::SetGridSize(GridSize::Small));

        assert_eq!(state.grid_size, GridSize::Small);
        assert_eq!(state.logged.get(40), Some(1));
        assert!(state.selection.is_armed());
        assert_eq!(state.stale_positions(), vec![40]);
    }

    #[test]
    fn test_stale_positions_flags_unknown_activities() {
        let mut state = DashboardState::new(date(1));
        state.logged.assign(0, 1);
        state.logged.assign(1, 42);
        assert_eq!(state.stale_positions(), vec![1]);
    }

    #[test]
    fn test_set_date_keeps_mapping() {
        let mut state = DashboardState::new(date(1));
        state.logged.assign(2, 3);
        state.remote = RemoteGrid::Ready(8);

        state.set_date(date(2));

        assert_eq!(state.date, date(2));
        assert_eq!(state.logged.get(2), Some(3));
        assert_eq!(state.remote_grid_id(), None);
        assert!(state.needs_lookup());
    }

    #[test]
    fn test_grid_loaded_replaces_mapping_for_same_date() {
        let mut state = DashboardState::new(date(1));
        state.logged.assign(9, 1);

        state.apply(DashboardAction::GridLoaded(remote_grid(5, 1, 36, &[(20, 2)])));

        assert_eq!(state.remote_grid_id(), Some(5));
        assert_eq!(state.grid_size, GridSize::Medium);
        assert_eq!(state.logged.get(9), None);
        assert_eq!(state.logged.get(20), Some(2));
    }

    #[test]
    fn test_grid_loaded_for_other_date_is_ignored() {
        let mut state = DashboardState::new(date(2));
        state.logged.assign(9, 1);

        state.grid_loaded(remote_grid(5, 1, 36, &[(20, 2)]));

        assert_eq!(state.remote_grid_id(), None);
        assert_eq!(state.grid_size, GridSize::Small);
        assert_eq!(state.logged.get(9), Some(1));
    }

    #[test]
    fn test_activities_loaded_keeps_seeds_when_empty() {
        let mut state = DashboardState::new(date(1));
        state.apply(DashboardAction::ActivitiesLoaded(Vec::new()));
        assert_eq!(state.activities.len(), 5);

        state.apply(DashboardAction::ActivitiesLoaded(vec![Activity::new(10, "Swim", "#0EA5E9", "🏊")]));
        assert_eq!(state.activities.len(), 1);
        assert_eq!(state.activities[0].id, 10);
    }

    fn log(state: &mut DashboardState, activity: usize, position: Position) {
        let activity = state.activities[activity].clone();
        state.select_activity(activity);
        state.click_cell(position);
    }

    fn sent_log(step: Option<SyncStep>) -> (GridId, LogActivityRequest) {
        match step {
            Some(SyncStep::Log(grid_id, queued)) => (grid_id, queued.request),
            other => panic!("expected a log step, got {:?}", other),
        }
    }

    #[test]
    fn test_click_queues_write() {
        let mut state = DashboardState::new(date(1));
        log(&mut state, 0, 3);

        assert_eq!(
            state.outbox,
            vec![QueuedLog {
                date: date(1),
                request: LogActivityRequest { activity_id: 1, position: 3 },
            }]
        );
    }

    #[test]
    fn test_nothing_sent_while_grid_lookup_pending() {
        let mut state = DashboardState::new(date(1));
        log(&mut state, 0, 0);

        assert_eq!(state.next_sync(), None);
        assert_eq!(state.begin_sync(), None);
        assert_eq!(state.in_flight, None);
    }

    #[test]
    fn test_clicks_before_grid_loaded_survive_and_sync() {
        let mut state = DashboardState::new(date(1));
        log(&mut state, 0, 0);
        log(&mut state, 1, 1);

        state.apply(DashboardAction::GridLoaded(remote_grid(7, 1, 16, &[(5, 3)])));

        assert_eq!(state.logged.get(0), Some(1));
        assert_eq!(state.logged.get(1), Some(2));
        assert_eq!(state.logged.get(5), Some(3));

        let (grid_id, request) = sent_log(state.begin_sync());
        assert_eq!(grid_id, 7);
        assert_eq!(request, LogActivityRequest { activity_id: 1, position: 0 });
        assert_eq!(state.next_sync(), None);

        state.apply(DashboardAction::CellSynced(remote_grid(7, 1, 16, &[(0, 1), (5, 3)])));
        let (_, request) = sent_log(state.begin_sync());
        assert_eq!(request, LogActivityRequest { activity_id: 2, position: 1 });

        state.apply(DashboardAction::CellSynced(remote_grid(7, 1, 16, &[(0, 1), (1, 2), (5, 3)])));
        assert!(state.outbox.is_empty());
        assert_eq!(state.next_sync(), None);
    }

    #[test]
    fn test_missing_grid_is_created_once_for_quick_clicks() {
        let mut state = DashboardState::new(date(1)).with_grid_size(GridSize::Medium);
        state.apply(DashboardAction::GridMissing(date(1)));

        log(&mut state, 0, 0);
        let step = state.begin_sync();
        assert_eq!(
            step,
            Some(SyncStep::Create(CreateGridRequest {
                date: date(1),
                grid_size: GridSize::Medium,
                notes: String::new(),
            }))
        );
        assert_eq!(state.remote, RemoteGrid::Creating);

        log(&mut state, 1, 1);
        assert_eq!(state.next_sync(), None);

        state.apply(DashboardAction::GridCreated(remote_grid(9, 1, 36, &[])));
        assert_eq!(state.remote_grid_id(), Some(9));

        let (grid_id, request) = sent_log(state.begin_sync());
        assert_eq!((grid_id, request.position), (9, 0));
        state.apply(DashboardAction::CellSynced(remote_grid(9, 1, 36, &[(0, 1)])));

        let (grid_id, request) = sent_log(state.begin_sync());
        assert_eq!((grid_id, request.position), (9, 1));
    }

    #[test]
    fn test_failed_create_looks_grid_up_again() {
        let mut state = DashboardState::new(date(1));
        state.grid_missing(date(1));
        log(&mut state, 0, 2);
        state.begin_sync();

        state.apply(DashboardAction::SyncFailed);

        assert!(state.needs_lookup());
        assert_eq!(state.logged.get(2), Some(1));
        assert_eq!(state.outbox.len(), 1);

        state.grid_loaded(remote_grid(4, 1, 16, &[]));
        let (grid_id, request) = sent_log(state.begin_sync());
        assert_eq!((grid_id, request.position), (4, 2));
    }

    #[test]
    fn test_failed_log_keeps_local_write_and_retries() {
        let mut state = DashboardState::new(date(1));
        state.grid_loaded(remote_grid(4, 1, 16, &[]));
        log(&mut state, 0, 2);
        let first = state.begin_sync();

        state.apply(DashboardAction::SyncFailed);

        assert_eq!(state.logged.get(2), Some(1));
        assert_eq!(state.next_sync(), first);
    }

    #[test]
    fn test_sync_pauses_after_repeated_failures_until_next_click() {
        let mut state = DashboardState::new(date(1));
        state.grid_loaded(remote_grid(4, 1, 16, &[]));
        log(&mut state, 0, 2);

        for _ in 0..MAX_SYNC_ATTEMPTS {
            assert!(state.begin_sync().is_some());
            state.sync_failed();
        }
        assert_eq!(state.next_sync(), None);

        log(&mut state, 1, 3);
        let (_, request) = sent_log(state.next_sync());
        assert_eq!(request.position, 2);
    }

    #[test]
    fn test_writes_for_other_dates_wait() {
        let mut state = DashboardState::new(date(1));
        state.grid_loaded(remote_grid(4, 1, 16, &[]));
        log(&mut state, 0, 2);

        state.set_date(date(2));
        state.grid_missing(date(2));
        assert_eq!(state.next_sync(), None);

        state.set_date(date(1));
        state.grid_loaded(remote_grid(4, 1, 16, &[]));
        let (grid_id, request) = sent_log(state.next_sync());
        assert_eq!((grid_id, request.position), (4, 2));
    }

    #[test]
    fn test_late_answers_for_previous_date_are_ignored() {
        let mut state = DashboardState::new(date(2));
        state.grid_missing(date(1));
        assert_eq!(state.remote, RemoteGrid::Loading);

        state.grid_created(&remote_grid(4, 1, 16, &[]));
        assert_eq!(state.remote_grid_id(), None);
    }
}
