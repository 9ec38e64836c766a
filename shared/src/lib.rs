use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod dashboard;
pub mod grid;
pub mod store;

pub use dashboard::{CellAssignment, DashboardAction, DashboardState, QueuedLog, RemoteGrid, Selection, SyncStep};
pub use grid::{CellView, GridSize, LoggedActivities, Position};
pub use store::{AppAction, AppState, RequestStatus, Thunk};

/// Server-assigned activity identifier
pub type ActivityId = i64;

/// Server-assigned daily grid identifier
pub type GridId = i64;

/// A habit the user can log into grid cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    /// Hex color used to paint logged cells
    pub color: String,
    /// Short glyph drawn inside logged cells
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub frequency: Frequency,
    /// Target number of completions per period (1-100)
    #[serde(default = "default_target_count")]
    pub target_count: u32,
    #[serde(default)]
    pub category: Option<ActivityCategory>,
    /// Share of the last 30 days with a log, computed by the server
    #[serde(default)]
    pub completion_rate: f64,
    #[serde(default)]
    pub current_streak: u32,
}

impl Activity {
    pub fn new(id: ActivityId, name: &str, color: &str, icon: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
            description: String::new(),
            is_active: true,
            frequency: Frequency::default(),
            target_count: default_target_count(),
            category: None,
            completion_rate: 0.0,
            current_streak: 0,
        }
    }
}

/// Activities available before the server list has been fetched
pub fn seed_activities() -> Vec<Activity> {
    vec![
        Activity::new(1, "Exercise", "#3B82F6", "💪"),
        Activity::new(2, "Read", "#10B981", "📚"),
        Activity::new(3, "Meditate", "#8B5CF6", "🧘"),
        Activity::new(4, "Work", "#F59E0B", "💼"),
        Activity::new(5, "Social", "#EF4444", "👥"),
    ]
}

fn default_true() -> bool {
    true
}

fn default_target_count() -> u32 {
    1
}

fn default_grid_cells() -> u32 {
    GridSize::default().cells()
}

/// How often an activity is expected to be completed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityCategory {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub icon: String,
    #[serde(default)]
    pub description: String,
}

/// Body for creating or updating an activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPayload {
    pub name: String,
    pub color: String,
    pub icon: String,
    pub description: String,
    pub is_active: bool,
    pub frequency: Frequency,
    pub target_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

impl From<&Activity> for ActivityPayload {
    fn from(activity: &Activity) -> Self {
        Self {
            name: activity.name.clone(),
            color: activity.color.clone(),
            icon: activity.icon.clone(),
            description: activity.description.clone(),
            is_active: activity.is_active,
            frequency: activity.frequency,
            target_count: activity.target_count,
            category_id: activity.category.as_ref().map(|c| c.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleActiveResponse {
    #[serde(default)]
    pub message: String,
    pub is_active: bool,
}

/// One user's grid for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyGrid {
    pub id: GridId,
    pub date: NaiveDate,
    /// Raw cell count as stored by the server
    #[serde(default = "default_grid_cells")]
    pub grid_size: u32,
    #[serde(default)]
    pub activities_logged: LoggedActivities,
    #[serde(default)]
    pub completion_percentage: f64,
    #[serde(default)]
    pub notes: String,
}

impl DailyGrid {
    pub fn size(&self) -> GridSize {
        GridSize::from_cells(self.grid_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGridRequest {
    pub date: NaiveDate,
    pub grid_size: GridSize,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogActivityRequest {
    pub activity_id: ActivityId,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogActivityResponse {
    #[serde(default)]
    pub message: String,
    pub grid: DailyGrid,
}

/// Grids between two dates, inclusive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub grids: Vec<DailyGrid>,
    #[serde(default)]
    pub total_activities: u32,
    #[serde(default)]
    pub average_completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub subscription_tier: String,
    #[serde(default = "default_grid_cells")]
    pub default_grid_size: u32,
    #[serde(default)]
    pub theme: String,
}

impl User {
    /// First and last name, or the username when both are blank
    pub fn full_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    pub fn grid_size(&self) -> GridSize {
        GridSize::from_cells(self.default_grid_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Reply to a successful login or registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: String,
    pub user: User,
    /// Present only when the server issues token credentials
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Partial profile update; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_grid_size: Option<GridSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserAnalytics {
    pub total_activities_logged: u32,
    pub total_days_tracked: u32,
    pub longest_streak: u32,
    pub current_streak: u32,
    pub average_completion_rate: f64,
    #[serde(default)]
    pub last_activity_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakAnalytics {
    pub activity_id: ActivityId,
    pub activity_name: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRate {
    pub activity_id: ActivityId,
    pub activity_name: String,
    pub completion_rate: f64,
    pub total_logs: u32,
    pub target_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternInsight {
    pub pattern_type: String,
    #[serde(default)]
    pub pattern_data: serde_json::Value,
    pub confidence_score: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyInsights {
    pub best_day: Option<String>,
    pub most_productive_time: Option<String>,
    #[serde(default)]
    pub activity_diversity: u32,
    #[serde(default)]
    pub consistency_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub id: i64,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_activities: u32,
    pub completion_rate: f64,
    pub streak_maintained: bool,
    /// `(activity name, log count)`, most logged first
    #[serde(default)]
    pub top_activities: Vec<(String, u32)>,
    #[serde(default)]
    pub insights: WeeklyInsights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_full_payload() {
        let json = r##"{
            "id": 7,
            "name": "Swim",
            "color": "#0EA5E9",
            "icon": "🏊",
            "category": {"id": 2, "name": "Health", "color": "#10B981", "icon": "star", "description": ""},
            "description": "Laps",
            "is_active": false,
            "frequency": "weekly",
            "target_count": 3,
            "reminder_enabled": false,
            "completion_rate": 40.0,
            "current_streak": 2,
            "created_at": "2025-01-01T10:00:00Z"
        }"##;

        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.id, 7);
        assert_eq!(activity.frequency, Frequency::Weekly);
        assert_eq!(activity.target_count, 3);
        assert!(!activity.is_active);
        assert_eq!(activity.category.unwrap().name, "Health");
    }

    #[test]
    fn test_activity_minimal_payload_defaults() {
        let json = r##"{"id": 1, "name": "Read", "color": "#10B981", "icon": "📚"}"##;
        let activity: Activity = serde_json::from_str(json).unwrap();

        assert_eq!(activity, Activity::new(1, "Read", "#10B981", "📚"));
        assert!(activity.is_active);
        assert_eq!(activity.frequency, Frequency::Daily);
        assert_eq!(activity.target_count, 1);
    }

    #[test]
    fn test_seed_activities() {
        let seeds = seed_activities();
        let ids: Vec<ActivityId> = seeds.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(seeds[0].name, "Exercise");
        assert_eq!(seeds[0].color, "#3B82F6");
    }

    #[test]
    fn test_activity_payload_carries_category_id() {
        let mut activity = Activity::new(3, "Meditate", "#8B5CF6", "🧘");
        activity.category = Some(ActivityCategory {
            id: 9,
            name: "Mind".to_string(),
            color: "#8B5CF6".to_string(),
            icon: "star".to_string(),
            description: String::new(),
        });

        let value = serde_json::to_value(ActivityPayload::from(&activity)).unwrap();
        assert_eq!(value["category_id"], 9);
        assert_eq!(value["frequency"], "daily");

        activity.category = None;
        let value = serde_json::to_value(ActivityPayload::from(&activity)).unwrap();
        assert!(value.get("category_id").is_none());
    }

    #[test]
    fn test_daily_grid_from_server() {
        let json = r#"{
            "id": 12,
            "date": "2025-03-04",
            "grid_size": 36,
            "activities_logged": {"0": 1, "5": 3},
            "completion_percentage": 5.55,
            "grid_dimensions": [6, 6],
            "notes": ""
        }"#;

        let grid: DailyGrid = serde_json::from_str(json).unwrap();
        assert_eq!(grid.date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        assert_eq!(grid.size(), GridSize::Medium);
        assert_eq!(grid.activities_logged.get(5), Some(3));
        assert_eq!(grid.activities_logged.len(), 2);
    }

    #[test]
    fn test_create_grid_request_serializes_cell_count() {
        let request = CreateGridRequest {
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            grid_size: GridSize::Large,
            notes: String::new(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, serde_json::json!({"date": "2025-03-04", "grid_size": 64}));
    }

    #[test]
    fn test_auth_response_without_token() {
        let json = r#"{"message": "Login successful", "user": {"id": 1, "username": "sam"}}"#;
        let response: AuthResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.token, None);
        assert_eq!(response.user.default_grid_size, 16);
        assert_eq!(response.user.full_name(), "sam");
    }

    #[test]
    fn test_user_full_name() {
        let json = r#"{"id": 1, "username": "sam", "first_name": "Sam", "last_name": "Lee", "default_grid_size": 64}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.full_name(), "Sam Lee");
        assert_eq!(user.grid_size(), GridSize::Large);
    }

    #[test]
    fn test_profile_update_skips_unset_fields() {
        let update = ProfileUpdate {
            theme: Some("dark".to_string()),
            default_grid_size: Some(GridSize::Medium),
            ..ProfileUpdate::default()
        };

        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({"theme": "dark", "default_grid_size": 36}));
    }

    #[test]
    fn test_weekly_report_top_activities() {
        let json = r#"{
            "id": 3,
            "week_start": "2025-03-03",
            "week_end": "2025-03-09",
            "total_activities": 11,
            "completion_rate": 42.5,
            "streak_maintained": false,
            "top_activities": [["Read", 6], ["Exercise", 5]],
            "insights": {"best_day": "Monday", "most_productive_time": null, "activity_diversity": 2, "consistency_score": 71.4}
        }"#;

        let report: WeeklyReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.top_activities[0], ("Read".to_string(), 6));
        assert_eq!(report.insights.best_day.as_deref(), Some("Monday"));
    }
}
