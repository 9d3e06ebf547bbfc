use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use spotter::{
    AuthError, EmailMessage, Error, Mailer, MailerConfig, MailerError, MemoryAccountRepository,
    RegisterInput, RequestContext, Spotter, TokenConfig,
};

/// Mail transport that records every message instead of sending it.
struct RecordingMailer {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
}

impl RecordingMailer {
    fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

fn test_spotter() -> (
    Spotter<MemoryAccountRepository, RecordingMailer>,
    Arc<RecordingMailer>,
) {
    let mailer = Arc::new(RecordingMailer::new());
    let spotter = Spotter::new(
        Arc::new(MemoryAccountRepository::new()),
        mailer.clone(),
        TokenConfig::new("session-secret-for-tests", "email-secret-for-tests"),
        MailerConfig::new("noreply@spotter.app"),
    );
    (spotter, mailer)
}

fn register_input(username: &str) -> RegisterInput {
    RegisterInput {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: "hunter2!".to_string(),
        confirm_password: "hunter2!".to_string(),
        phone_number: None,
    }
}

#[tokio::test]
async fn test_register_stores_account_and_returns_token() {
    let _ = tracing_subscriber::fmt::try_init();
    let (spotter, mailer) = test_spotter();

    // Register an account
    let registered = spotter
        .register(
            register_input("alice"),
            &RequestContext::new("localhost:4000"),
        )
        .await
        .unwrap();

    // Verify account details
    assert_eq!(registered.account.username, "alice");
    assert_eq!(registered.account.email, "alice@example.com");
    assert!(!registered.account.verified);
    assert!(!registered.account.admin);

    // The session token carries the stored identity
    let claims = spotter.verify_session_token(&registered.token).unwrap();
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.email, "alice@example.com");
    assert_eq!(claims.id, registered.account.id.to_string());

    // The account is persisted
    let stored = spotter.get_account("alice").await.unwrap().unwrap();
    assert_eq!(stored.id, registered.account.id);

    // A verification email was dispatched to the new address
    let sent = mailer.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "alice@example.com");
    assert_eq!(sent[0].from, "noreply@spotter.app");
    assert!(sent[0].text.contains("http://localhost:4000/verify?token="));
}

#[tokio::test]
async fn test_register_response_never_exposes_password_hash() {
    let (spotter, _mailer) = test_spotter();

    let registered = spotter
        .register(
            register_input("alice"),
            &RequestContext::new("localhost:4000"),
        )
        .await
        .unwrap();

    let json = serde_json::to_value(&registered).unwrap();
    assert!(json.get("password_hash").is_none());
    assert!(json["token"].is_string());
    assert_eq!(json["username"], "alice");
}

#[tokio::test]
async fn test_register_rejects_taken_username() {
    let (spotter, mailer) = test_spotter();
    let context = RequestContext::new("localhost:4000");

    spotter
        .register(register_input("alice"), &context)
        .await
        .unwrap();

    // Second registration with the same username fails with a field error
    let result = spotter.register(register_input("alice"), &context).await;
    match result {
        Err(Error::Auth(AuthError::UsernameTaken { errors })) => {
            assert_eq!(errors["username"], "This username is taken");
        }
        other => panic!("expected UsernameTaken, got {other:?}"),
    }

    // Only the first registration stored an account or sent mail
    assert_eq!(spotter.list_accounts().await.unwrap().len(), 1);
    assert_eq!(mailer.sent_messages().len(), 1);
}

#[tokio::test]
async fn test_register_taken_username_wins_over_invalid_payload() {
    let (spotter, _mailer) = test_spotter();
    let context = RequestContext::new("localhost:4000");

    spotter
        .register(register_input("alice"), &context)
        .await
        .unwrap();

    // Same username with an invalid payload still reports the taken name
    let mut input = register_input("alice");
    input.email = "not-an-email".to_string();
    input.confirm_password = "different".to_string();

    let result = spotter.register(input, &context).await;
    assert!(matches!(
        result,
        Err(Error::Auth(AuthError::UsernameTaken { .. }))
    ));
}

#[tokio::test]
async fn test_register_collects_field_errors() {
    let (spotter, mailer) = test_spotter();

    let input = RegisterInput {
        username: "   ".to_string(),
        email: "not-an-email".to_string(),
        password: "hunter2!".to_string(),
        confirm_password: "different".to_string(),
        phone_number: None,
    };

    let result = spotter
        .register(input, &RequestContext::new("localhost:4000"))
        .await;
    match result {
        Err(Error::Auth(AuthError::ValidationFailed { errors })) => {
            assert_eq!(errors["username"], "Username must not be empty");
            assert_eq!(errors["email"], "Email must be a valid email address");
            assert_eq!(errors["confirm_password"], "Passwords must match");
        }
        other => panic!("expected ValidationFailed, got {other:?}"),
    }

    // Nothing was stored or notified
    assert!(spotter.list_accounts().await.unwrap().is_empty());
    assert!(mailer.sent_messages().is_empty());
}

#[tokio::test]
async fn test_register_keeps_phone_number() {
    let (spotter, _mailer) = test_spotter();

    let mut input = register_input("alice");
    input.phone_number = Some("+4915112345678".to_string());

    let registered = spotter
        .register(input, &RequestContext::new("localhost:4000"))
        .await
        .unwrap();
    assert_eq!(
        registered.account.phone_number.as_deref(),
        Some("+4915112345678")
    );

    let stored = spotter.get_account("alice").await.unwrap().unwrap();
    assert_eq!(stored.phone_number.as_deref(), Some("+4915112345678"));
}
