use super::{RequestStatus, Thunk};
use crate::{AuthResponse, User};

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    Login(Thunk<AuthResponse>),
    Register(Thunk<AuthResponse>),
    Logout(Thunk<()>),
    ClearError,
    SetUser(User),
    /// The server rejected the stored credentials
    Unauthorized,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub status: RequestStatus,
}

impl AuthState {
    pub fn reduce(&mut self, action: AuthAction) {
        match action {
            AuthAction::Login(thunk) => {
                if let Some(response) = self.status.track(thunk, "Login failed") {
                    self.sign_in(response.user);
                }
            }
            AuthAction::Register(thunk) => {
                if let Some(response) = self.status.track(thunk, "Registration failed") {
                    self.sign_in(response.user);
                }
            }
            // Only a completed logout clears the session
            AuthAction::Logout(Thunk::Fulfilled(())) => self.sign_out(),
            AuthAction::Logout(_) => {}
            AuthAction::ClearError => self.status.error = None,
            AuthAction::SetUser(user) => self.sign_in(user),
            AuthAction::Unauthorized => self.sign_out(),
        }
    }

    fn sign_in(&mut self, user: User) {
        self.user = Some(user);
        self.is_authenticated = true;
    }

    fn sign_out(&mut self) {
        self.user = None;
        self.is_authenticated = false;
    }
}
