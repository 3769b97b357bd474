use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use crate::clients::AuthClient;
use crate::domain::{Account, Session, Signup, User, UserFilter};
use crate::messages::{AuthRequest, ServiceResponse};
use crate::storage::{self, Storage};
use super::error::AuthError;

/// Storage key of the persisted session.
pub const AUTH_STORAGE_KEY: &str = "auth-storage";

const USER_ID_PREFIX: &str = "user-";

/// Numeric part of a generated user id.
fn generated_number(id: &str) -> Option<u64> {
    id.strip_prefix(USER_ID_PREFIX)?.parse().ok()
}

/// Authentication actor.
///
/// Accounts registered at runtime live only as long as the service; the
/// session is the only state written to storage.
pub struct AuthService {
    receiver: mpsc::Receiver<AuthRequest>,
    accounts: Vec<Account>,
    session: Session,
    storage: Arc<dyn Storage>,
    latency: Duration,
    next_id: u64,
}

impl AuthService {
    pub fn new(
        buffer_size: usize,
        accounts: Vec<Account>,
        storage: Arc<dyn Storage>,
        latency: Duration,
    ) -> (Self, AuthClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let session = match storage::load_state::<Session>(storage.as_ref(), AUTH_STORAGE_KEY) {
            Ok(session) => session.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable persisted session");
                Session::default()
            }
        };
        // Generated ids must not repeat one already handed out, including the
        // restored user whose account did not survive the restart
        let next_id = accounts
            .iter()
            .map(|account| &account.user)
            .chain(session.user.as_ref())
            .filter_map(|user| generated_number(&user.id))
            .max()
            .map_or(1, |n| n.saturating_add(1));
        let service = Self {
            receiver,
            accounts,
            session,
            storage,
            latency,
            next_id,
        };
        (service, AuthClient::new(sender))
    }

    #[instrument(name = "auth_service", skip(self))]
    pub async fn run(mut self) {
        info!(accounts = self.accounts.len(), "AuthService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                AuthRequest::Login { email, password, respond_to } => {
                    self.handle_login(email, password, respond_to).await;
                }
                AuthRequest::Signup { signup, respond_to } => {
                    self.handle_signup(signup, respond_to).await;
                }
                AuthRequest::Logout { respond_to } => {
                    self.set_session(Session::default());
                    info!("User logged out");
                    let _ = respond_to.send(Ok(()));
                }
                AuthRequest::CurrentSession { respond_to } => {
                    let _ = respond_to.send(Ok(self.session.clone()));
                }
                AuthRequest::ListUsers { filter, respond_to } => {
                    self.handle_list_users(filter, respond_to);
                }
            }
        }
        info!("AuthService stopped");
    }

    fn set_session(&mut self, session: Session) {
        self.session = session;
        if let Err(e) = storage::save_state(self.storage.as_ref(), AUTH_STORAGE_KEY, &self.session) {
            warn!(error = %e, "Failed to persist session");
        }
    }

    /// Stands in for the round trip to an authentication backend.
    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// **Security:** the password is skipped; only the email is recorded.
    #[instrument(fields(user_email = %email), skip(self, email, password, respond_to))]
    async fn handle_login(
        &mut self,
        email: String,
        password: String,
        respond_to: ServiceResponse<User, AuthError>,
    ) {
        debug!("Processing login request");
        self.simulate_latency().await;

        let Some(account) = self.accounts.iter().find(|account| account.matches(&email, &password)) else {
            error!("Login rejected");
            let _ = respond_to.send(Err(AuthError::InvalidCredentials));
            return;
        };
        let user = account.user.clone();
        self.set_session(Session::signed_in(user.clone()));
        info!(user_id = %user.id, role = %user.role, "User logged in");
        let _ = respond_to.send(Ok(user));
    }

    #[instrument(fields(user_email = %signup.email, role = %signup.role), skip(self, signup, respond_to))]
    async fn handle_signup(&mut self, signup: Signup, respond_to: ServiceResponse<User, AuthError>) {
        debug!("Processing signup request");
        self.simulate_latency().await;

        if signup.email.trim().is_empty() || signup.password.is_empty() {
            error!("Validation failed: empty email or password");
            let _ = respond_to.send(Err(AuthError::Validation("Email and password required".to_string())));
            return;
        }
        if self.accounts.iter().any(|account| account.user.email == signup.email) {
            error!("Signup rejected: email taken");
            let _ = respond_to.send(Err(AuthError::EmailTaken(signup.email)));
            return;
        }

        let user = User::new(self.generate_id(), signup.email, signup.name, signup.role);
        self.accounts.push(Account::new(user.clone(), signup.password));
        self.set_session(Session::signed_in(user.clone()));
        info!(user_id = %user.id, "User signed up");
        let _ = respond_to.send(Ok(user));
    }

    fn generate_id(&mut self) -> String {
        loop {
            let id = format!("{USER_ID_PREFIX}{}", self.next_id);
            self.next_id += 1;
            if !self.accounts.iter().any(|account| account.user.id == id) {
                return id;
            }
        }
    }

    fn handle_list_users(&self, filter: UserFilter, respond_to: ServiceResponse<Vec<User>, AuthError>) {
        let users = self
            .accounts
            .iter()
            .map(|account| &account.user)
            .filter(|user| filter.matches(user))
            .cloned()
            .collect();
        let _ = respond_to.send(Ok(users));
    }
}
