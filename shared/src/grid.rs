//! Grid geometry and the position-to-activity mapping for one day.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Activity, ActivityId};

/// Zero-based cell index, independent of row/column layout
pub type Position = u32;

/// The supported grid layouts.
///
/// Serialized as the raw cell count (16, 36 or 64). Any other count resolves
/// to the smallest layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum GridSize {
    /// 4×4
    #[default]
    Small,
    /// 6×6
    Medium,
    /// 8×8
    Large,
}

impl GridSize {
    pub const ALL: [GridSize; 3] = [GridSize::Small, GridSize::Medium, GridSize::Large];

    pub fn from_cells(cells: u32) -> Self {
        match cells {
            16 => GridSize::Small,
            36 => GridSize::Medium,
            64 => GridSize::Large,
            _ => GridSize::Small,
        }
    }

    /// `(rows, cols)`
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            GridSize::Small => (4, 4),
            GridSize::Medium => (6, 6),
            GridSize::Large => (8, 8),
        }
    }

    pub fn cells(self) -> u32 {
        let (rows, cols) = self.dimensions();
        rows * cols
    }

    pub fn contains(self, position: Position) -> bool {
        position < self.cells()
    }

    pub fn label(self) -> String {
        let (rows, cols) = self.dimensions();
        format!("{}×{} Grid", rows, cols)
    }
}

impl From<u32> for GridSize {
    fn from(cells: u32) -> Self {
        GridSize::from_cells(cells)
    }
}

impl From<GridSize> for u32 {
    fn from(size: GridSize) -> Self {
        size.cells()
    }
}

/// Which activity, if any, was logged in each cell.
///
/// At most one activity per position. On the wire this is a JSON object keyed
/// by the decimal position, e.g. `{"0": 1, "5": 3}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoggedActivities(BTreeMap<Position, ActivityId>);

impl LoggedActivities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, position: Position) -> Option<ActivityId> {
        self.0.get(&position).copied()
    }

    /// Records `activity_id` at `position`, returning what was there before
    pub fn assign(&mut self, position: Position, activity_id: ActivityId) -> Option<ActivityId> {
        self.0.insert(position, activity_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, ActivityId)> + '_ {
        self.0.iter().map(|(position, id)| (*position, *id))
    }

    /// Resolves the activity logged at `position`. An id with no matching
    /// activity reads as an unlogged cell.
    pub fn activity_at<'a>(&self, activities: &'a [Activity], position: Position) -> Option<&'a Activity> {
        let activity_id = self.get(position)?;
        activities.iter().find(|activity| activity.id == activity_id)
    }

    /// Every logged key counts, including positions beyond `size`
    pub fn completion_percent(&self, size: GridSize) -> u32 {
        completion_percent(self.len(), size.cells())
    }
}

impl FromIterator<(Position, ActivityId)> for LoggedActivities {
    fn from_iter<I: IntoIterator<Item = (Position, ActivityId)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// `100 * logged / cells`, rounded half up to a whole percent
pub fn completion_percent(logged: usize, cells: u32) -> u32 {
    if cells == 0 {
        return 0;
    }
    let logged = logged as u64;
    let cells = cells as u64;
    ((200 * logged + cells) / (2 * cells)) as u32
}

/// What a single cell should display
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellView<'a> {
    Logged(&'a Activity),
    /// `armed` is set while an activity is selected and waiting for a target
    Empty { armed: bool },
}

impl CellView<'_> {
    pub fn title(&self) -> &str {
        match self {
            CellView::Logged(activity) => &activity.name,
            CellView::Empty { .. } => "Click to log activity",
        }
    }
}

/// One view per cell of `size`, in position order
pub fn cell_views<'a>(
    size: GridSize,
    activities: &'a [Activity],
    logged: &LoggedActivities,
    armed: bool,
) -> Vec<CellView<'a>> {
    (0..size.cells())
        .map(|position| match logged.activity_at(activities, position) {
            Some(activity) => CellView::Logged(activity),
            None => CellView::Empty { armed },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed_activities;

    #[test]
    fn test_valid_sizes_have_matching_dimensions() {
        for (size, cells) in [(GridSize::Small, 16), (GridSize::Medium, 36), (GridSize::Large, 64)] {
            let (rows, cols) = size.dimensions();
            assert_eq!(rows * cols, cells);
            assert_eq!(size.cells(), cells);
            assert_eq!(GridSize::from_cells(cells), size);
        }
    }

    #[test]
    fn test_unknown_sizes_fall_back_to_four_by_four() {
        for cells in [0, 4, 20, 25, 49, 100, u32::MAX] {
            let size = GridSize::from_cells(cells);
            assert_eq!(size, GridSize::Small);
            assert_eq!(size.dimensions(), (4, 4));
        }
    }

    #[test]
    fn test_grid_size_deserializes_with_fallback() {
        let size: GridSize = serde_json::from_str("36").unwrap();
        assert_eq!(size, GridSize::Medium);

        let size: GridSize = serde_json::from_str("50").unwrap();
        assert_eq!(size, GridSize::Small);

        assert_eq!(serde_json::to_string(&GridSize::Large).unwrap(), "64");
    }

    #[test]
    fn test_grid_size_labels() {
        let labels: Vec<String> = GridSize::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["4×4 Grid", "6×6 Grid", "8×8 Grid"]);
    }

    #[test]
    fn test_cell_views_cover_every_cell() {
        let activities = seed_activities();
        let logged = LoggedActivities::new();

        for size in GridSize::ALL {
            let views = cell_views(size, &activities, &logged, false);
            assert_eq!(views.len() as u32, size.cells());
        }
    }

    #[test]
    fn test_cell_views_resolve_logged_activities() {
        let activities = seed_activities();
        let logged: LoggedActivities = [(0, 1), (3, 4)].into_iter().collect();

        let views = cell_views(GridSize::Small, &activities, &logged, true);
        assert_eq!(views[0], CellView::Logged(&activities[0]));
        assert_eq!(views[3], CellView::Logged(&activities[3]));
        assert_eq!(views[1], CellView::Empty { armed: true });
        assert_eq!(views[0].title(), "Exercise");
        assert_eq!(views[1].title(), "Click to log activity");
    }

    #[test]
    fn test_unknown_activity_id_reads_as_empty() {
        let activities = seed_activities();
        let logged: LoggedActivities = [(2, 99)].into_iter().collect();

        assert_eq!(logged.activity_at(&activities, 2), None);
        let views = cell_views(GridSize::Small, &activities, &logged, false);
        assert_eq!(views[2], CellView::Empty { armed: false });
    }

    #[test]
    fn test_assign_overwrites_previous_value() {
        let mut logged = LoggedActivities::new();
        assert_eq!(logged.assign(5, 1), None);
        assert_eq!(logged.assign(5, 2), Some(1));
        assert_eq!(logged.get(5), Some(2));
        assert_eq!(logged.len(), 1);
    }

    #[test]
    fn test_completion_percent() {
        assert_eq!(completion_percent(0, 16), 0);
        assert_eq!(completion_percent(1, 16), 6);
        assert_eq!(completion_percent(4, 16), 25);
        assert_eq!(completion_percent(16, 16), 100);
        assert_eq!(completion_percent(1, 36), 3);
        assert_eq!(completion_percent(32, 64), 50);
        // 12.5 rounds up
        assert_eq!(completion_percent(1, 8), 13);
        assert_eq!(completion_percent(3, 0), 0);
    }

    #[test]
    fn test_completion_counts_out_of_bound_keys() {
        let logged: LoggedActivities = (0..20).map(|p| (p, 1)).collect();
        assert_eq!(logged.completion_percent(GridSize::Small), 125);
        assert_eq!(logged.completion_percent(GridSize::Large), 31);
    }

    #[test]
    fn test_logged_activities_wire_format() {
        let logged: LoggedActivities = [(0, 1), (12, 3)].into_iter().collect();
        let json = serde_json::to_string(&logged).unwrap();
        assert_eq!(json, r#"{"0":1,"12":3}"#);

        let back: LoggedActivities = serde_json::from_str(&json).unwrap();
        assert_eq!(back, logged);
    }
}
