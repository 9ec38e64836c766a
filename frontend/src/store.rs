use std::ops::Deref;
use std::rc::Rc;

use shared::{AppAction, AppState};
use yew::prelude::*;

/// Session state owned by the root component and passed down as a prop
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store(AppState);

impl Reducible for Store {
    type Action = AppAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.0.reduce(action);
        Rc::new(next)
    }
}

impl Deref for Store {
    type Target = AppState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub type StoreHandle = UseReducerHandle<Store>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::store::{AuthAction, GridsAction};
    use shared::Thunk;

    #[test]
    fn test_reduce_returns_new_state() {
        let store = Rc::new(Store::default());
        let next = store.clone().reduce(AppAction::Auth(AuthAction::Login(Thunk::Pending)));

        assert!(next.auth.status.loading);
        assert!(!store.auth.status.loading);
    }

    #[test]
    fn test_slices_are_independent() {
        let store = Rc::new(Store::default());
        let next = store
            .reduce(AppAction::Grids(GridsAction::FetchByDate(Thunk::rejected("offline"))))
            .reduce(AppAction::Auth(AuthAction::ClearError));

        assert_eq!(next.grids.status.error.as_deref(), Some("offline"));
        assert_eq!(next.auth.status.error, None);
    }
}
