//! Session store
//!
//! Single source of truth for the authenticated user. The lifecycle starts
//! `Unknown` while the stored credential is checked, then settles into
//! `Anonymous` or `Authenticated`; login, registration, logout and the HTTP
//! layer's 401 teardown move it between the two. The store never terminates;
//! it lives as long as the process.
//!
//! Within every action the credential write or delete completes before the
//! state update that depends on it, so a reader woken by a notification
//! never observes an authenticated session without a stored credential.

use crate::messages;
use crate::navigator::Navigator;
use edupredict_core::{CredentialStore, User};
use edupredict_http::{
    ApiClient, AuthResponse, ClientError, ProfileUpdate, RegisterRequest, UploadFile,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tracing::{info, warn};

/// Lifecycle phase derived from the session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Startup: the stored credential has not been resolved yet
    Unknown,
    Anonymous,
    Authenticated,
}

/// Immutable view of the session handed to subscribers
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
    pub phase: SessionPhase,
}

#[derive(Debug, Clone)]
struct SessionState {
    user: Option<User>,
    loading: bool,
    error: Option<String>,
    /// False only until the first bootstrap/login/logout settles the phase
    settled: bool,
}

impl SessionState {
    fn snapshot(&self) -> SessionSnapshot {
        let phase = if self.user.is_some() {
            SessionPhase::Authenticated
        } else if self.settled {
            SessionPhase::Anonymous
        } else {
            SessionPhase::Unknown
        };
        SessionSnapshot {
            user: self.user.clone(),
            loading: self.loading,
            error: self.error.clone(),
            phase,
        }
    }
}

/// Handle returned by [`SessionStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Arc<dyn Fn(&SessionSnapshot) + Send + Sync>;

/// Process-wide authentication state with subscribe/notify semantics
pub struct SessionStore {
    client: ApiClient,
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    state: RwLock<SessionState>,
    subscribers: Mutex<Vec<(u64, Subscriber)>>,
    next_subscriber: AtomicU64,
}

impl SessionStore {
    /// Create the store and wire the client's 401 teardown into it.
    ///
    /// The store shares the client's credential store; there is exactly one
    /// owner of the token per process.
    pub fn new(client: ApiClient, navigator: Arc<dyn Navigator>) -> Arc<Self> {
        let credentials = client.credentials();
        let store = Arc::new(Self {
            client,
            credentials,
            navigator,
            state: RwLock::new(SessionState {
                user: None,
                loading: true,
                error: None,
                settled: false,
            }),
            subscribers: Mutex::new(Vec::new()),
            next_subscriber: AtomicU64::new(0),
        });

        let weak = Arc::downgrade(&store);
        store.client.set_unauthorized_hook(move || {
            if let Some(store) = weak.upgrade() {
                store.expire_session();
            }
        });

        store
    }

    /// The configured client, for call sites outside the auth surface
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Current state without subscribing
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state
            .read()
            .expect("session state lock poisoned")
            .snapshot()
    }

    /// Register a callback invoked with a fresh snapshot after every state
    /// change
    pub fn subscribe(
        &self,
        subscriber: impl Fn(&SessionSnapshot) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.next_subscriber.fetch_add(1, Ordering::Relaxed);
        self.subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .push((id, Arc::new(subscriber)));
        SubscriptionId(id)
    }

    /// Remove a previously registered callback
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .retain(|(subscriber_id, _)| *subscriber_id != id.0);
    }

    /// Resolve the stored credential into a user, or settle anonymous.
    ///
    /// Always ends with `loading == false`. Any failure to resolve the
    /// credential deletes it; a doubtful session is not worth keeping.
    pub async fn bootstrap(&self) {
        self.mutate(|state| state.loading = true);

        let stored = match self.credentials.get().await {
            Ok(stored) => stored,
            Err(err) => {
                warn!("credential store unreadable during bootstrap: {err}");
                None
            }
        };

        if stored.is_none() {
            self.mutate(|state| {
                state.user = None;
                state.loading = false;
                state.settled = true;
            });
            return;
        }

        match self.client.current_user().await {
            Ok(user) => {
                info!(user_id = user.id, "session restored");
                self.mutate(|state| {
                    state.user = Some(user);
                    state.error = None;
                    state.loading = false;
                    state.settled = true;
                });
            }
            Err(err) => {
                if let Err(clear_err) = self.credentials.clear().await {
                    warn!("failed to clear stale credential: {clear_err}");
                }
                warn!("could not restore session: {err}");
                self.mutate(|state| {
                    state.user = None;
                    state.error = Some(messages::SESSION_EXPIRED.to_owned());
                    state.loading = false;
                    state.settled = true;
                });
            }
        }
    }

    /// Authenticate with email and password.
    ///
    /// A failed attempt records the error and re-raises it; the current user
    /// (if any) is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        self.mutate(|state| state.loading = true);
        let result = self.client.login(email, password).await;
        self.complete_sign_in(result, messages::LOGIN_FAILED).await
    }

    /// Create an account and sign in with it; same contract as [`login`]
    ///
    /// [`login`]: SessionStore::login
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ClientError> {
        self.mutate(|state| state.loading = true);
        let result = self.client.register(request).await;
        self.complete_sign_in(result, messages::REGISTRATION_FAILED)
            .await
    }

    /// Drop the credential and the in-memory user.
    ///
    /// Always succeeds locally; credential-store failures are logged, not
    /// surfaced.
    pub async fn logout(&self) {
        if let Err(err) = self.credentials.clear().await {
            warn!("failed to clear credential on logout: {err}");
        }
        info!("logged out");
        self.mutate(|state| {
            state.user = None;
            state.error = None;
            state.loading = false;
            state.settled = true;
        });
    }

    /// Update profile fields and optionally the profile picture.
    ///
    /// On success the user is replaced wholesale with the server's
    /// representation; nothing is merged from the previous state.
    pub async fn update_profile(
        &self,
        fields: &ProfileUpdate,
        photo: Option<UploadFile>,
    ) -> Result<User, ClientError> {
        self.mutate(|state| state.loading = true);
        match self.client.update_profile(fields, photo).await {
            Ok(user) => {
                info!(user_id = user.id, "profile updated");
                self.mutate(|state| {
                    state.user = Some(user.clone());
                    state.error = None;
                    state.loading = false;
                });
                Ok(user)
            }
            Err(error) => {
                self.record_failure(&error, messages::PROFILE_UPDATE_FAILED);
                Err(error)
            }
        }
    }

    /// Change the account password; the current user is not touched
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ClientError> {
        self.mutate(|state| state.loading = true);
        match self
            .client
            .change_password(current_password, new_password)
            .await
        {
            Ok(()) => {
                self.mutate(|state| {
                    state.error = None;
                    state.loading = false;
                });
                Ok(())
            }
            Err(error) => {
                self.record_failure(&error, messages::PASSWORD_CHANGE_FAILED);
                Err(error)
            }
        }
    }

    /// Drop a transient error without issuing a new action
    pub fn clear_error(&self) {
        self.mutate(|state| state.error = None);
    }

    async fn complete_sign_in(
        &self,
        result: Result<AuthResponse, ClientError>,
        fallback: &str,
    ) -> Result<User, ClientError> {
        match result {
            Ok(response) => {
                if let Err(err) = self.credentials.set(&response.token).await {
                    let error = ClientError::from(err);
                    self.record_failure(&error, fallback);
                    return Err(error);
                }
                info!(user_id = response.user.id, "signed in");
                self.mutate(|state| {
                    state.user = Some(response.user.clone());
                    state.error = None;
                    state.loading = false;
                    state.settled = true;
                });
                Ok(response.user)
            }
            Err(error) => {
                self.record_failure(&error, fallback);
                Err(error)
            }
        }
    }

    /// Forced logout after the backend rejected the credential. The HTTP
    /// layer has already removed the token; this converges the in-memory
    /// state and sends the user back to the login entry point.
    fn expire_session(&self) {
        info!("session expired, redirecting to login");
        self.mutate(|state| {
            state.user = None;
            state.error = Some(messages::SESSION_EXPIRED.to_owned());
            state.loading = false;
            state.settled = true;
        });
        self.navigator.to_login();
    }

    fn record_failure(&self, error: &ClientError, fallback: &str) {
        let message = messages::user_message(error, fallback);
        self.mutate(|state| {
            state.error = Some(message);
            state.loading = false;
        });
    }

    fn mutate(&self, apply: impl FnOnce(&mut SessionState)) {
        let snapshot = {
            let mut state = self.state.write().expect("session state lock poisoned");
            apply(&mut state);
            state.snapshot()
        };
        self.notify(&snapshot);
    }

    fn notify(&self, snapshot: &SessionSnapshot) {
        let subscribers: Vec<Subscriber> = self
            .subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();
        for subscriber in subscribers {
            subscriber(snapshot);
        }
    }
}
