//! # Form submissions and screen-local state

mod support;

use pretty_assertions::assert_eq;
use std::time::Duration;

use async_trait::async_trait;
use roof_core::{
    AssessmentField, AuthError, AuthSubscription, Identity, IdentityFeed, IdentityGateway,
    StoreError,
};
use roof_session::schedule_form::{
    MISSING_FIELDS_MESSAGE, SUBMIT_FAILED_MESSAGE, SUBMITTED_MESSAGE,
};
use roof_session::{
    Action, ActionError, AuthForm, AuthMode, Notice, Screen, Session, ViewSelector,
};
use rstest::rstest;
use serde_json::json;

use support::{FakeIdentity, FakeStore, IdentityCall, collection, mount, signed_in_session};

fn landing() -> (std::sync::Arc<FakeIdentity>, Session) {
    let identity = FakeIdentity::new();
    let store = FakeStore::new();
    let mut session = mount(&identity, &store);
    identity.publish(None);
    session.drain_notifications();
    (identity, session)
}

async fn fill_credentials(session: &mut Session, email: &str, password: &str) {
    session
        .dispatch(Action::EditEmail(email.into()))
        .await
        .expect("offered");
    session
        .dispatch(Action::EditPassword(password.into()))
        .await
        .expect("offered");
}

async fn fill_assessment(session: &mut Session, address: &str, contact: &str, phone: &str) {
    for (field, value) in [
        (AssessmentField::Address, address),
        (AssessmentField::Contact, contact),
        (AssessmentField::Phone, phone),
    ] {
        session
            .dispatch(Action::EditAssessment(field, value.into()))
            .await
            .expect("offered");
    }
}

// ---------------------------------------------------------------------------
// Authentication form
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_account_then_notification_enters_dashboard() {
    let (identity, mut session) = landing();
    session
        .dispatch(Action::SetAuthMode(AuthMode::SignUp))
        .await
        .expect("offered");
    fill_credentials(&mut session, "a@b.com", "secret1").await;

    session.dispatch(Action::SubmitAuth).await.expect("offered");

    assert_eq!(
        identity.calls(),
        vec![IdentityCall::CreateAccount {
            email: "a@b.com".into(),
            password: "secret1".into(),
        }]
    );
    // The call's own success does not move the screen.
    assert_eq!(session.screen(), Screen::LoggedOut);
    assert_eq!(session.auth_form().error(), None);
    assert!(!session.auth_form().is_busy());

    session.drain_notifications();
    assert_eq!(session.screen(), Screen::LoggedIn(ViewSelector::DashboardHome));
    assert_eq!(session.identity().map(|i| i.email.as_str()), Some("a@b.com"));
}

#[tokio::test]
async fn log_in_uses_sign_in() {
    let (identity, mut session) = landing();
    fill_credentials(&mut session, "a@b.com", "secret1").await;

    session.dispatch(Action::SubmitAuth).await.expect("offered");

    assert_eq!(
        identity.calls(),
        vec![IdentityCall::SignIn {
            email: "a@b.com".into(),
            password: "secret1".into(),
        }]
    );
}

#[tokio::test]
async fn short_password_never_reaches_the_gateway() {
    let (identity, mut session) = landing();
    fill_credentials(&mut session, "a@b.com", "12345").await;

    session.dispatch(Action::SubmitAuth).await.expect("offered");

    assert!(identity.calls().is_empty());
    assert_eq!(
        session.auth_form().error(),
        Some("Password must be at least 6 characters.")
    );
}

#[tokio::test]
async fn gateway_failure_is_shown_and_cleared_by_mode_switch() {
    let (identity, mut session) = landing();
    identity.fail_next(AuthError::InvalidCredentials);
    fill_credentials(&mut session, "a@b.com", "wrong-password").await;

    session.dispatch(Action::SubmitAuth).await.expect("offered");

    assert_eq!(
        session.auth_form().error(),
        Some("invalid email or password")
    );
    assert!(!session.auth_form().is_busy());
    assert_eq!(session.drain_notifications(), 0);
    assert_eq!(session.screen(), Screen::LoggedOut);

    session
        .dispatch(Action::SetAuthMode(AuthMode::SignUp))
        .await
        .expect("offered");
    assert_eq!(session.auth_form().error(), None);
}

#[tokio::test]
async fn resubmission_clears_previous_error() {
    let (identity, mut session) = landing();
    identity.fail_next(AuthError::TooManyAttempts);
    fill_credentials(&mut session, "a@b.com", "secret1").await;
    session.dispatch(Action::SubmitAuth).await.expect("offered");
    assert!(session.auth_form().error().is_some());

    session.dispatch(Action::SubmitAuth).await.expect("offered");
    assert_eq!(session.auth_form().error(), None);
}

// ---------------------------------------------------------------------------
// Schedule form
// ---------------------------------------------------------------------------

/// Identity service that never answers.
struct Unresponsive {
    feed: IdentityFeed,
}

#[async_trait]
impl IdentityGateway for Unresponsive {
    async fn create_account(&self, _email: &str, _password: &str) -> Result<Identity, AuthError> {
        std::future::pending().await
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> Result<Identity, AuthError> {
        std::future::pending().await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        std::future::pending().await
    }

    fn subscribe(&self) -> AuthSubscription {
        self.feed.subscribe()
    }
}

#[tokio::test]
async fn abandoned_submission_leaves_form_usable() {
    let gateway = Unresponsive {
        feed: IdentityFeed::new(),
    };
    let mut form = AuthForm::new();
    form.set_email("a@b.com");
    form.set_password("secret1");

    let outcome = tokio::time::timeout(Duration::from_millis(20), form.submit(&gateway)).await;

    assert!(outcome.is_err(), "gateway never answers");
    assert!(!form.is_busy());
    assert_eq!(form.error(), None);
    assert_eq!(form.email(), "a@b.com");
}

#[rstest]
#[case("", "Jane Doe", "555-1234")]
#[case("123 Main St", "", "555-1234")]
#[case("123 Main St", "Jane Doe", "")]
#[case("", "", "")]
#[tokio::test]
async fn missing_required_field_never_inserts(
    #[case] address: &str,
    #[case] contact: &str,
    #[case] phone: &str,
) {
    let (_, store, mut session) = signed_in_session("a@b.com");
    session.dispatch(Action::OpenSchedule).await.expect("offered");
    fill_assessment(&mut session, address, contact, phone).await;

    session
        .dispatch(Action::SubmitAssessment)
        .await
        .expect("offered");

    assert!(store.inserts().is_empty());
    assert_eq!(
        session.schedule_form().notice(),
        Some(Notice::Error(MISSING_FIELDS_MESSAGE))
    );
    assert!(!session.schedule_form().is_busy());
}

#[tokio::test]
async fn complete_request_is_inserted_once_and_draft_cleared() {
    let (_, store, mut session) = signed_in_session("a@b.com");
    session.dispatch(Action::OpenSchedule).await.expect("offered");
    fill_assessment(&mut session, "123 Main St", "Jane Doe", "555-1234").await;

    session
        .dispatch(Action::SubmitAssessment)
        .await
        .expect("offered");

    let inserts = store.inserts();
    assert_eq!(inserts.len(), 1);
    let (path, document) = &inserts[0];
    assert_eq!(path, &collection());
    assert_eq!(
        serde_json::Value::Object(document.fields.clone()),
        json!({
            "address": "123 Main St",
            "contact": "Jane Doe",
            "phone": "555-1234",
            "notes": "",
            "requesterEmail": "a@b.com",
            "requesterId": "uid-a",
            "status": "pending",
        })
    );
    assert_eq!(document.server_timestamps, vec!["submittedAt".to_string()]);

    let form = session.schedule_form();
    assert_eq!(form.notice(), Some(Notice::Success(SUBMITTED_MESSAGE)));
    assert!(form.draft().is_empty());
    assert!(!form.is_busy());
}

#[tokio::test]
async fn notes_do_not_carry_into_the_next_request() {
    let (_, store, mut session) = signed_in_session("a@b.com");
    session.dispatch(Action::OpenSchedule).await.expect("offered");
    fill_assessment(&mut session, "1 First Ave", "Sam", "555-0000").await;
    session
        .dispatch(Action::EditAssessment(
            AssessmentField::Notes,
            "gate code 4321".into(),
        ))
        .await
        .expect("offered");
    session
        .dispatch(Action::SubmitAssessment)
        .await
        .expect("offered");

    assert_eq!(session.schedule_form().draft().notes, "");

    fill_assessment(&mut session, "2 Second Ave", "Alex", "555-1111").await;
    session
        .dispatch(Action::SubmitAssessment)
        .await
        .expect("offered");

    let inserts = store.inserts();
    assert_eq!(inserts.len(), 2);
    assert_eq!(inserts[1].1.field("notes"), Some(&json!("")));
}

#[tokio::test]
async fn store_failure_shows_generic_message_and_keeps_draft() {
    let (_, store, mut session) = signed_in_session("a@b.com");
    store.fail_next(StoreError::PermissionDenied("rules".into()));
    session.dispatch(Action::OpenSchedule).await.expect("offered");
    fill_assessment(&mut session, "123 Main St", "Jane Doe", "555-1234").await;

    session
        .dispatch(Action::SubmitAssessment)
        .await
        .expect("offered");

    let form = session.schedule_form();
    assert_eq!(form.notice(), Some(Notice::Error(SUBMIT_FAILED_MESSAGE)));
    assert_eq!(form.draft().address, "123 Main St");
    assert!(!form.is_busy());
    assert!(store.inserts().is_empty());
}

#[tokio::test]
async fn leaving_schedule_discards_draft_and_notice() {
    let (_, _, mut session) = signed_in_session("a@b.com");
    session.dispatch(Action::OpenSchedule).await.expect("offered");
    fill_assessment(&mut session, "", "Jane Doe", "").await;
    session
        .dispatch(Action::SubmitAssessment)
        .await
        .expect("offered");
    assert!(session.schedule_form().notice().is_some());

    session.dispatch(Action::BackToDashboard).await.expect("offered");
    session.dispatch(Action::OpenSchedule).await.expect("offered");

    assert!(session.schedule_form().draft().is_empty());
    assert_eq!(session.schedule_form().notice(), None);
}

// ---------------------------------------------------------------------------
// Resource browser
// ---------------------------------------------------------------------------

#[tokio::test]
async fn collapse_expand_twice_keeps_guide_expanded() {
    let (_, _, mut session) = signed_in_session("a@b.com");
    session.dispatch(Action::OpenResources).await.expect("offered");
    let toggle = || Action::ToggleGuide("visual-inspection".into());

    session.dispatch(toggle()).await.expect("known guide");
    assert!(session.resources().is_expanded("visual-inspection"));
    let guide_before = session.resources().guides()[0];

    for _ in 0..2 {
        session.dispatch(toggle()).await.expect("collapse");
        session.dispatch(toggle()).await.expect("expand");
    }

    assert!(session.resources().is_expanded("visual-inspection"));
    assert_eq!(session.resources().guides()[0], guide_before);
}

#[tokio::test]
async fn unknown_guide_is_an_error() {
    let (_, _, mut session) = signed_in_session("a@b.com");
    session.dispatch(Action::OpenResources).await.expect("offered");

    let err = session
        .dispatch(Action::ToggleGuide("hvac-101".into()))
        .await
        .expect_err("not in the catalog");
    assert_eq!(err, ActionError::UnknownGuide("hvac-101".into()));
}

#[tokio::test]
async fn leaving_resources_collapses_guides() {
    let (_, _, mut session) = signed_in_session("a@b.com");
    session.dispatch(Action::OpenResources).await.expect("offered");
    session
        .dispatch(Action::ToggleGuide("unit-age".into()))
        .await
        .expect("known guide");

    session.dispatch(Action::BackToDashboard).await.expect("offered");
    session.dispatch(Action::OpenResources).await.expect("offered");

    assert!(!session.resources().is_expanded("unit-age"));
}
