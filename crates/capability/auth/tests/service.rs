use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use std::sync::{Arc, Mutex};
use techassist_auth::{
    AuthError, AuthService, AuthorizeRequest, CredentialStore, Credentials, IdentityProvider,
    InMemoryCredentialStore, SessionEvent, UserInfo,
};

struct FakeProvider {
    authorize_result: Result<Credentials, AuthError>,
    user_info_result: Result<UserInfo, AuthError>,
    requests: Mutex<Vec<AuthorizeRequest>>,
}

impl FakeProvider {
    fn new(
        authorize_result: Result<Credentials, AuthError>,
        user_info_result: Result<UserInfo, AuthError>,
    ) -> Self {
        Self {
            authorize_result,
            user_info_result,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn authorize(&self, request: &AuthorizeRequest) -> Result<Credentials, AuthError> {
        self.requests.lock().expect("lock").push(request.clone());
        self.authorize_result.clone()
    }

    async fn user_info(&self, _access_token: &str) -> Result<UserInfo, AuthError> {
        self.user_info_result.clone()
    }
}

fn request() -> AuthorizeRequest {
    AuthorizeRequest {
        domain: "tenant.example.com".to_string(),
        client_id: "client".to_string(),
        redirect_url: "app://tenant.example.com/ios/com.example/callback".to_string(),
        scope: "openid profile email".to_string(),
        ephemeral_session: true,
    }
}

fn credentials(valid_for: TimeDelta) -> Credentials {
    Credentials {
        access_token: "access".to_string(),
        id_token: None,
        expires_at: Utc::now() + valid_for,
    }
}

fn user(name: &str, email: &str) -> UserInfo {
    UserInfo {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        ..UserInfo::default()
    }
}

#[tokio::test]
async fn login_stores_credentials_and_emits_events() {
    let provider = Arc::new(FakeProvider::new(
        Ok(credentials(TimeDelta::hours(1))),
        Ok(user("Leo Santos", "leo@example.com")),
    ));
    let store = Arc::new(InMemoryCredentialStore::new());
    let auth = AuthService::new(provider.clone(), store.clone(), request());
    let mut events = auth.subscribe();

    let profile = auth.login().await.expect("login");
    assert_eq!(profile.display_name.as_deref(), Some("Leo Santos"));
    assert_eq!(profile.email.as_deref(), Some("leo@example.com"));
    assert!(store.load().expect("load").is_some());
    assert_eq!(provider.requests.lock().expect("lock")[0], request());

    assert_eq!(events.recv().await.expect("event"), SessionEvent::LoginStarted);
    assert_eq!(
        events.recv().await.expect("event"),
        SessionEvent::SignedIn(profile.clone())
    );
    let snapshot = auth.snapshot();
    assert!(snapshot.is_authenticated);
    assert!(!snapshot.is_loading);
    assert_eq!(snapshot.profile, Some(profile));
}

#[tokio::test]
async fn login_failure_is_surfaced_verbatim() {
    let provider = Arc::new(FakeProvider::new(
        Err(AuthError::Provider("User cancelled the Auth".to_string())),
        Ok(UserInfo::default()),
    ));
    let store = Arc::new(InMemoryCredentialStore::with_credentials(credentials(
        TimeDelta::hours(1),
    )));
    let auth = AuthService::new(provider, store.clone(), request());
    let mut events = auth.subscribe();

    let err = auth.login().await.expect_err("login should fail");
    assert_eq!(err.to_string(), "User cancelled the Auth");
    // 登录前已清除旧会话
    assert!(store.load().expect("load").is_none());

    assert_eq!(events.recv().await.expect("event"), SessionEvent::LoginStarted);
    assert_eq!(
        events.recv().await.expect("event"),
        SessionEvent::LoginFailed("User cancelled the Auth".to_string())
    );
    let snapshot = auth.snapshot();
    assert!(!snapshot.is_authenticated);
    assert_eq!(
        snapshot.error_message.as_deref(),
        Some("User cancelled the Auth")
    );
}

#[tokio::test]
async fn user_info_failure_falls_back_to_id_token() {
    let claims = UserInfo {
        given_name: Some("Ana".to_string()),
        family_name: Some("Ruiz".to_string()),
        ..UserInfo::default()
    };
    let id_token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"k"),
    )
    .expect("encode");
    let mut issued = credentials(TimeDelta::hours(1));
    issued.id_token = Some(id_token);

    let provider = Arc::new(FakeProvider::new(
        Ok(issued),
        Err(AuthError::Provider("network down".to_string())),
    ));
    let auth = AuthService::new(provider, Arc::new(InMemoryCredentialStore::new()), request());

    let profile = auth.login().await.expect("login still succeeds");
    assert_eq!(profile.display_name.as_deref(), Some("Ana Ruiz"));
    assert!(auth.snapshot().is_authenticated);
}

#[tokio::test]
async fn logout_clears_synchronously() {
    let provider = Arc::new(FakeProvider::new(
        Ok(credentials(TimeDelta::hours(1))),
        Ok(user("Leo", "leo@example.com")),
    ));
    let store = Arc::new(InMemoryCredentialStore::new());
    let auth = AuthService::new(provider, store.clone(), request());
    auth.login().await.expect("login");

    let mut events = auth.subscribe();
    auth.logout();
    assert!(store.load().expect("load").is_none());
    assert_eq!(auth.snapshot(), Default::default());
    assert_eq!(events.recv().await.expect("event"), SessionEvent::SignedOut);
}

#[tokio::test]
async fn check_session_restores_valid_credentials() {
    let provider = Arc::new(FakeProvider::new(
        Err(AuthError::Provider("unused".to_string())),
        Ok(user("Leo Santos", "leo@example.com")),
    ));
    let store = Arc::new(InMemoryCredentialStore::with_credentials(credentials(
        TimeDelta::minutes(30),
    )));
    let auth = AuthService::new(provider, store, request());

    assert!(auth.check_session(Utc::now()).await);
    let snapshot = auth.snapshot();
    assert!(snapshot.is_authenticated);
    assert_eq!(
        snapshot.profile.and_then(|profile| profile.display_name).as_deref(),
        Some("Leo Santos")
    );
}

#[tokio::test]
async fn check_session_rejects_expired_credentials() {
    let provider = Arc::new(FakeProvider::new(
        Err(AuthError::Provider("unused".to_string())),
        Ok(UserInfo::default()),
    ));
    let store = Arc::new(InMemoryCredentialStore::with_credentials(credentials(
        TimeDelta::minutes(-1),
    )));
    let auth = AuthService::new(provider, store, request());

    assert!(!auth.check_session(Utc::now()).await);
    assert!(!auth.snapshot().is_authenticated);
}
