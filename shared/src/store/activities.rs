use super::{RequestStatus, Thunk};
use crate::{Activity, ActivityCategory, ActivityId};

#[derive(Debug, Clone, PartialEq)]
pub enum ActivitiesAction {
    Fetch(Thunk<Vec<Activity>>),
    Create(Thunk<Activity>),
    Update(Thunk<Activity>),
    Delete(Thunk<ActivityId>),
    /// `(id, is_active)` as reported by the server
    ToggleActive(Thunk<(ActivityId, bool)>),
    Categories(Thunk<Vec<ActivityCategory>>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivitiesState {
    pub items: Vec<Activity>,
    pub categories: Vec<ActivityCategory>,
    pub status: RequestStatus,
}

impl ActivitiesState {
    pub fn reduce(&mut self, action: ActivitiesAction) {
        match action {
            ActivitiesAction::Fetch(thunk) => {
                if let Some(items) = self.status.track(thunk, "Failed to load activities") {
                    self.items = items;
                }
            }
            ActivitiesAction::Create(thunk) => {
                // Newest first, matching the server ordering
                if let Some(activity) = self.status.track(thunk, "Failed to create activity") {
                    self.items.insert(0, activity);
                }
            }
            ActivitiesAction::Update(thunk) => {
                if let Some(activity) = self.status.track(thunk, "Failed to update activity") {
                    if let Some(existing) = self.find_mut(activity.id) {
                        *existing = activity;
                    }
                }
            }
            ActivitiesAction::Delete(thunk) => {
                if let Some(id) = self.status.track(thunk, "Failed to delete activity") {
                    self.items.retain(|activity| activity.id != id);
                }
            }
            ActivitiesAction::ToggleActive(thunk) => {
                if let Some((id, is_active)) = self.status.track(thunk, "Failed to toggle activity") {
                    if let Some(existing) = self.find_mut(id) {
                        existing.is_active = is_active;
                    }
                }
            }
            ActivitiesAction::Categories(thunk) => {
                if let Some(categories) = self.status.track(thunk, "Failed to load categories") {
                    self.categories = categories;
                }
            }
        }
    }

    pub fn find(&self, id: ActivityId) -> Option<&Activity> {
        self.items.iter().find(|activity| activity.id == id)
    }

    pub fn active(&self) -> impl Iterator<Item = &Activity> {
        self.items.iter().filter(|activity| activity.is_active)
    }

    fn find_mut(&mut self, id: ActivityId) -> Option<&mut Activity> {
        self.items.iter_mut().find(|activity| activity.id == id)
    }
}
