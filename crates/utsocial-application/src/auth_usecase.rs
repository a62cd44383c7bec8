//! Login / registration use case.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use utsocial_core::auth::{AuthError, AuthMode, AuthService, TerminalLog};
use utsocial_core::error::Result;
use utsocial_core::session::{Route, SessionStore};
use utsocial_core::user::User;

/// Values typed into the login screen. `username` is only used when
/// registering; in login mode `email` is the identifier.
#[derive(Clone, Default)]
pub struct AuthForm {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl AuthForm {
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            username: String::new(),
            password: password.into(),
        }
    }

    pub fn register(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for AuthForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthForm")
            .field("email", &self.email)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// What the login screen should do after a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Session stored; navigate to `redirect`.
    LoggedIn { user: User, redirect: Route },
    /// Account created; the form is back in login mode.
    Registered,
}

/// Clears the in-flight flag when the submission finishes, however it ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives the login screen: mode toggle, a single in-flight submission and
/// the terminal progress log.
pub struct AuthUseCase {
    auth: Arc<dyn AuthService>,
    session: Arc<dyn SessionStore>,
    mode: Mutex<AuthMode>,
    terminal: Mutex<TerminalLog>,
    in_flight: AtomicBool,
}

impl AuthUseCase {
    pub fn new(auth: Arc<dyn AuthService>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            auth,
            session,
            mode: Mutex::new(AuthMode::Login),
            terminal: Mutex::new(TerminalLog::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn mode(&self) -> AuthMode {
        *self.mode.lock().await
    }

    /// Switches between the login and registration forms.
    pub async fn toggle_mode(&self) -> AuthMode {
        let mut mode = self.mode.lock().await;
        *mode = mode.toggled();
        *mode
    }

    /// Whether a submission is waiting for the service. Views show a pending
    /// indicator and disable the submit button while this is true.
    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn terminal_lines(&self) -> Vec<String> {
        self.terminal.lock().await.lines().to_vec()
    }

    /// Submits the form in the current mode.
    ///
    /// A second call while one is pending fails with `AuthError::Busy` and
    /// sends nothing. Every other failure is also written to the terminal log.
    pub async fn submit(&self, form: &AuthForm) -> Result<AuthOutcome> {
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(AuthError::Busy)?;

        let mode = self.mode().await;
        self.log(format!("Attempting {}...", mode.action())).await;

        let result = match mode {
            AuthMode::Login => self.login(form).await,
            AuthMode::Register => self.register(form).await,
        };

        if let Err(err) = &result {
            tracing::warn!("{} failed: {}", mode.action(), err);
            self.terminal.lock().await.error(err.to_string());
        }
        result
    }

    async fn login(&self, form: &AuthForm) -> Result<AuthOutcome> {
        let user = self.auth.login(&form.email, &form.password).await?;
        self.session.save(&user).await?;

        tracing::info!("User {} logged in", user.id);
        self.log("Authentication successful").await;
        self.log("Redirecting to secure network...").await;

        Ok(AuthOutcome::LoggedIn {
            user,
            redirect: Route::Feed,
        })
    }

    async fn register(&self, form: &AuthForm) -> Result<AuthOutcome> {
        self.auth
            .register(&form.email, &form.username, &form.password)
            .await?;

        self.log("Registration successful").await;
        self.log("Please login with your new credentials").await;
        *self.mode.lock().await = AuthMode::Login;

        Ok(AuthOutcome::Registered)
    }

    async fn log(&self, line: impl AsRef<str>) {
        self.terminal.lock().await.event(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Notify;
    use utsocial_core::session::InMemorySessionStore;

    /// Accepts a@b.com / pw123, rejects everything else, and optionally
    /// parks inside `login` until released.
    #[derive(Default)]
    struct FakeAuth {
        entered: Notify,
        release: Notify,
        hold: bool,
    }

    #[async_trait]
    impl AuthService for FakeAuth {
        async fn login(
            &self,
            identifier: &str,
            password: &str,
        ) -> std::result::Result<User, AuthError> {
            if self.hold {
                self.entered.notify_one();
                self.release.notified().await;
            }
            if identifier == "a@b.com" && password == "pw123" {
                Ok(User::new("u1", "alice", "a@b.com"))
            } else {
                Err(AuthError::rejected(401, Some("bad credentials".into())))
            }
        }

        async fn register(
            &self,
            email: &str,
            _username: &str,
            _password: &str,
        ) -> std::result::Result<(), AuthError> {
            if email == "taken@b.com" {
                Err(AuthError::rejected(400, Some("Email already registered".into())))
            } else {
                Ok(())
            }
        }
    }

    fn usecase(auth: FakeAuth) -> (AuthUseCase, InMemorySessionStore) {
        let session = InMemorySessionStore::new();
        (
            AuthUseCase::new(Arc::new(auth), Arc::new(session.clone())),
            session,
        )
    }

    #[tokio::test]
    async fn test_login_stores_session_and_redirects() {
        let (usecase, session) = usecase(FakeAuth::default());

        let outcome = usecase
            .submit(&AuthForm::login("a@b.com", "pw123"))
            .await
            .unwrap();

        let expected = User::new("u1", "alice", "a@b.com");
        assert_eq!(
            outcome,
            AuthOutcome::LoggedIn {
                user: expected.clone(),
                redirect: Route::Feed
            }
        );
        assert_eq!(session.load().await.unwrap(), Some(expected));
        let lines = usecase.terminal_lines().await;
        assert_eq!(
            &lines[3..],
            &[
                "> Attempting login...".to_string(),
                "> Authentication successful".to_string(),
                "> Redirecting to secure network...".to_string(),
            ]
        );
        assert!(!usecase.is_pending());
    }

    #[tokio::test]
    async fn test_rejected_login_keeps_session_absent() {
        let (usecase, session) = usecase(FakeAuth::default());

        let err = usecase
            .submit(&AuthForm::login("a@b.com", "nope"))
            .await
            .unwrap_err();

        assert_eq!(
            err.as_auth().map(ToString::to_string).as_deref(),
            Some("bad credentials")
        );
        assert!(session.load().await.unwrap().is_none());
        assert_eq!(
            usecase.terminal_lines().await.last().map(String::as_str),
            Some("> ERROR: bad credentials")
        );
        assert!(!usecase.is_pending());
    }

    #[tokio::test]
    async fn test_register_switches_back_to_login() {
        let (usecase, session) = usecase(FakeAuth::default());
        assert_eq!(usecase.toggle_mode().await, AuthMode::Register);

        let outcome = usecase
            .submit(&AuthForm::register("new@b.com", "newbie", "pw123"))
            .await
            .unwrap();

        assert_eq!(outcome, AuthOutcome::Registered);
        assert_eq!(usecase.mode().await, AuthMode::Login);
        assert!(session.load().await.unwrap().is_none());
        let lines = usecase.terminal_lines().await;
        assert!(lines.contains(&"> Attempting registration...".to_string()));
        assert!(lines.contains(&"> Please login with your new credentials".to_string()));
    }

    #[tokio::test]
    async fn test_failed_register_stays_in_register_mode() {
        let (usecase, _session) = usecase(FakeAuth::default());
        usecase.toggle_mode().await;

        let err = usecase
            .submit(&AuthForm::register("taken@b.com", "dup", "pw123"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Email already registered");
        assert_eq!(usecase.mode().await, AuthMode::Register);
    }

    #[tokio::test]
    async fn test_second_submit_while_pending_is_busy() {
        let auth = Arc::new(FakeAuth {
            hold: true,
            ..FakeAuth::default()
        });
        let session = InMemorySessionStore::new();
        let usecase = Arc::new(AuthUseCase::new(auth.clone(), Arc::new(session.clone())));

        let first = {
            let usecase = usecase.clone();
            tokio::spawn(async move {
                usecase
                    .submit(&AuthForm::login("a@b.com", "pw123"))
                    .await
            })
        };
        auth.entered.notified().await;
        assert!(usecase.is_pending());

        let lines_before = usecase.terminal_lines().await.len();
        let err = usecase
            .submit(&AuthForm::login("a@b.com", "pw123"))
            .await
            .unwrap_err();
        assert_eq!(err.as_auth(), Some(&AuthError::Busy));
        assert_eq!(usecase.terminal_lines().await.len(), lines_before);

        auth.release.notify_one();
        assert!(first.await.unwrap().is_ok());
        assert!(!usecase.is_pending());
        assert!(session.load().await.unwrap().is_some());
    }

    #[test]
    fn test_form_debug_hides_password() {
        let rendered = format!("{:?}", AuthForm::login("a@b.com", "hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
