use super::{RequestStatus, Thunk};
use crate::{DailyGrid, GridRange};

#[derive(Debug, Clone, PartialEq)]
pub enum GridsAction {
    /// `None` when the server has no grid for the date
    FetchByDate(Thunk<Option<DailyGrid>>),
    Create(Thunk<DailyGrid>),
    LogActivity(Thunk<DailyGrid>),
    Range(Thunk<GridRange>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridsState {
    pub current: Option<DailyGrid>,
    pub range: Option<GridRange>,
    pub status: RequestStatus,
}

impl GridsState {
    pub fn reduce(&mut self, action: GridsAction) {
        match action {
            GridsAction::FetchByDate(thunk) => {
                if let Some(grid) = self.status.track(thunk, "Failed to load grid") {
                    self.current = grid;
                }
            }
            GridsAction::Create(thunk) => {
                if let Some(grid) = self.status.track(thunk, "Failed to create grid") {
                    self.current = Some(grid);
                }
            }
            GridsAction::LogActivity(thunk) => {
                if let Some(grid) = self.status.track(thunk, "Failed to log activity") {
                    self.current = Some(grid);
                }
            }
            GridsAction::Range(thunk) => {
                if let Some(range) = self.status.track(thunk, "Failed to load grid range") {
                    self.range = Some(range);
                }
            }
        }
    }
}
