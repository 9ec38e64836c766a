use super::{RequestStatus, Thunk};
use crate::{CompletionRate, PatternInsight, StreakAnalytics, UserAnalytics, WeeklyReport};

#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsAction {
    Overview(Thunk<UserAnalytics>),
    Streaks(Thunk<Vec<StreakAnalytics>>),
    CompletionRates(Thunk<Vec<CompletionRate>>),
    Patterns(Thunk<Vec<PatternInsight>>),
    WeeklyReport(Thunk<WeeklyReport>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsState {
    pub overview: Option<UserAnalytics>,
    pub streaks: Vec<StreakAnalytics>,
    pub completion_rates: Vec<CompletionRate>,
    pub patterns: Vec<PatternInsight>,
    pub weekly_report: Option<WeeklyReport>,
    pub status: RequestStatus,
}

impl AnalyticsState {
    pub fn reduce(&mut self, action: AnalyticsAction) {
        match action {
            AnalyticsAction::Overview(thunk) => {
                if let Some(overview) = self.status.track(thunk, "Failed to load overview") {
                    self.overview = Some(overview);
                }
            }
            AnalyticsAction::Streaks(thunk) => {
                if let Some(streaks) = self.status.track(thunk, "Failed to load streaks") {
                    self.streaks = streaks;
                }
            }
            AnalyticsAction::CompletionRates(thunk) => {
                if let Some(rates) = self.status.track(thunk, "Failed to load completion rates") {
                    self.completion_rates = rates;
                }
            }
            AnalyticsAction::Patterns(thunk) => {
                if let Some(patterns) = self.status.track(thunk, "Failed to load patterns") {
                    self.patterns = patterns;
                }
            }
            AnalyticsAction::WeeklyReport(thunk) => {
                if let Some(report) = self.status.track(thunk, "Failed to load weekly report") {
                    self.weekly_report = Some(report);
                }
            }
        }
    }

    /// Activity with the longest current streak
    pub fn best_streak(&self) -> Option<&StreakAnalytics> {
        self.streaks.iter().max_by_key(|streak| streak.current_streak)
    }
}
