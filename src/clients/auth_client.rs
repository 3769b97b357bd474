use tokio::sync::mpsc;

use crate::auth_actor::AuthError;
use crate::domain::{Session, Signup, User, UserFilter};
use crate::messages::AuthRequest;

/// Client for interacting with the auth service.
#[derive(Clone)]
pub struct AuthClient {
    sender: mpsc::Sender<AuthRequest>,
}

impl AuthClient {
    pub fn new(sender: mpsc::Sender<AuthRequest>) -> Self {
        Self { sender }
    }
}

client_method!(AuthClient => fn login(email: String, password: String) -> User as AuthRequest::Login, Error = AuthError, skip = [password]);
client_method!(AuthClient => fn signup(signup: Signup) -> User as AuthRequest::Signup, Error = AuthError, skip = [signup]);
client_method!(AuthClient => fn logout() -> () as AuthRequest::Logout, Error = AuthError);
client_method!(AuthClient => fn current_session() -> Session as AuthRequest::CurrentSession, Error = AuthError);
client_method!(AuthClient => fn list_users(filter: UserFilter) -> Vec<User> as AuthRequest::ListUsers, Error = AuthError);
