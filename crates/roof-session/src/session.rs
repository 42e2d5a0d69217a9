//! The member session: view state, forms, and the gateways they talk to.
//!
//! A [`Session`] is mounted once by the process entry point with explicitly
//! constructed gateways. Mounting acquires the identity subscription;
//! unmounting (or dropping) the session releases it.
//!
//! Screen changes come from two places only:
//! - identity notifications ([`Session::notified`] and friends) move between
//!   `Loading`, `LoggedOut`, and `LoggedIn`
//! - navigation actions move between the dashboard screens
//!
//! State owned by a screen lives exactly as long as the screen is showing:
//! leaving the schedule screen discards the draft and its notice, leaving the
//! resources screen collapses every guide, and arriving on the landing screen
//! starts a fresh log-in form.

use std::sync::Arc;

use roof_core::feed::Notification;
use roof_core::{
    AssessmentField, AuthSubscription, CollectionPath, DocumentStore, Identity, IdentityGateway,
};

use crate::auth_form::{AuthForm, AuthMode};
use crate::error::ActionError;
use crate::resources::ResourceBrowser;
use crate::schedule_form::ScheduleForm;
use crate::view::{Screen, ViewSelector, ViewState};

/// Something the member did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Switch the landing form between log-in and sign-up.
    SetAuthMode(AuthMode),
    EditEmail(String),
    EditPassword(String),
    SubmitAuth,
    OpenResources,
    OpenSchedule,
    BackToDashboard,
    SignOut,
    EditAssessment(AssessmentField, String),
    SubmitAssessment,
    /// Expand or collapse the guide with this id.
    ToggleGuide(String),
}

impl Action {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetAuthMode(AuthMode::LogIn) => "login",
            Self::SetAuthMode(AuthMode::SignUp) => "signup",
            Self::EditEmail(_) => "email",
            Self::EditPassword(_) => "password",
            Self::SubmitAuth | Self::SubmitAssessment => "submit",
            Self::OpenResources => "resources",
            Self::OpenSchedule => "schedule",
            Self::BackToDashboard => "back",
            Self::SignOut => "logout",
            Self::EditAssessment(field, _) => field.as_str(),
            Self::ToggleGuide(_) => "toggle",
        }
    }

    /// Whether `screen` offers this action.
    #[must_use]
    pub const fn is_offered_on(&self, screen: Screen) -> bool {
        match self {
            Self::SetAuthMode(_) | Self::EditEmail(_) | Self::EditPassword(_) | Self::SubmitAuth => {
                matches!(screen, Screen::LoggedOut)
            }
            Self::OpenResources | Self::OpenSchedule => {
                matches!(screen, Screen::LoggedIn(ViewSelector::DashboardHome))
            }
            Self::BackToDashboard => matches!(
                screen,
                Screen::LoggedIn(ViewSelector::Resources | ViewSelector::Schedule)
            ),
            Self::SignOut => screen.is_logged_in(),
            Self::EditAssessment(..) | Self::SubmitAssessment => {
                matches!(screen, Screen::LoggedIn(ViewSelector::Schedule))
            }
            Self::ToggleGuide(_) => matches!(screen, Screen::LoggedIn(ViewSelector::Resources)),
        }
    }
}

pub struct Session {
    identity: Arc<dyn IdentityGateway>,
    store: Arc<dyn DocumentStore>,
    collection: CollectionPath,
    subscription: AuthSubscription,
    view: ViewState,
    auth_form: AuthForm,
    schedule: ScheduleForm,
    resources: ResourceBrowser,
}

impl Session {
    /// Subscribe to `identity` and start on the loading screen.
    ///
    /// Assessment requests are inserted into `collection`.
    #[must_use]
    pub fn mount(
        identity: Arc<dyn IdentityGateway>,
        store: Arc<dyn DocumentStore>,
        collection: CollectionPath,
    ) -> Self {
        let subscription = identity.subscribe();
        tracing::debug!(%collection, "session mounted");
        Self {
            identity,
            store,
            collection,
            subscription,
            view: ViewState::new(),
            auth_form: AuthForm::new(),
            schedule: ScheduleForm::new(),
            resources: ResourceBrowser::new(),
        }
    }

    /// Tear the session down, releasing the identity subscription.
    pub fn unmount(self) {
        tracing::debug!(screen = %self.screen(), "session unmounted");
        drop(self);
    }

    // -- state -------------------------------------------------------------

    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.view.screen()
    }

    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.view.identity()
    }

    #[must_use]
    pub const fn auth_form(&self) -> &AuthForm {
        &self.auth_form
    }

    #[must_use]
    pub const fn schedule_form(&self) -> &ScheduleForm {
        &self.schedule
    }

    #[must_use]
    pub const fn resources(&self) -> &ResourceBrowser {
        &self.resources
    }

    #[must_use]
    pub const fn collection(&self) -> &CollectionPath {
        &self.collection
    }

    // -- identity notifications --------------------------------------------

    /// Apply one identity notification and return the resulting screen.
    pub fn notified(&mut self, notification: Notification) -> Screen {
        let before = self.screen();
        let after = self.view.apply(notification);
        self.leave(before, after);
        tracing::debug!(from = %before, to = %after, "identity notification applied");
        after
    }

    /// Wait for the next identity notification and apply it.
    ///
    /// Returns `None` once the identity gateway has gone away.
    pub async fn next_notification(&mut self) -> Option<Screen> {
        let notification = self.subscription.next().await?;
        Some(self.notified(notification))
    }

    /// Apply every notification already delivered, without waiting.
    /// Returns how many were applied.
    pub fn drain_notifications(&mut self) -> usize {
        let mut applied = 0;
        while let Some(notification) = self.subscription.try_next() {
            self.notified(notification);
            applied += 1;
        }
        applied
    }

    // -- user actions ------------------------------------------------------

    /// Handle a user action on the current screen.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] when the current screen does not offer the
    /// action or a guide id is unknown. Gateway failures are not errors here;
    /// they end up on the form. The session stays mutably borrowed until a
    /// gateway call resolves, so submissions never overlap.
    pub async fn dispatch(&mut self, action: Action) -> Result<(), ActionError> {
        let screen = self.screen();
        if !action.is_offered_on(screen) {
            return Err(ActionError::Unavailable {
                action: action.name(),
                screen,
            });
        }

        match action {
            Action::SetAuthMode(mode) => self.auth_form.set_mode(mode),
            Action::EditEmail(email) => self.auth_form.set_email(email),
            Action::EditPassword(password) => self.auth_form.set_password(password),
            Action::SubmitAuth => {
                self.auth_form.submit(self.identity.as_ref()).await;
            }
            Action::OpenResources => self.navigate(ViewSelector::Resources),
            Action::OpenSchedule => self.navigate(ViewSelector::Schedule),
            Action::BackToDashboard => self.navigate(ViewSelector::DashboardHome),
            Action::SignOut => self.sign_out().await,
            Action::EditAssessment(field, value) => self.schedule.set(field, value),
            Action::SubmitAssessment => {
                let Some(requester) = self.view.identity().cloned() else {
                    return Err(ActionError::Unavailable {
                        action: "submit",
                        screen,
                    });
                };
                self.schedule
                    .submit(&requester, self.store.as_ref(), &self.collection)
                    .await;
            }
            Action::ToggleGuide(id) => {
                if self.resources.toggle(&id).is_none() {
                    return Err(ActionError::UnknownGuide(id));
                }
            }
        }
        Ok(())
    }

    fn navigate(&mut self, selector: ViewSelector) {
        let before = self.screen();
        if self.view.select(selector) {
            self.leave(before, self.screen());
        }
    }

    /// Ask the gateway to end the session. The screen changes only when the
    /// matching notification arrives.
    async fn sign_out(&mut self) {
        if let Err(error) = self.identity.sign_out().await {
            tracing::warn!(%error, "sign-out failed");
        }
    }

    /// Drop the state of the screen being left.
    fn leave(&mut self, before: Screen, after: Screen) {
        if before == after {
            return;
        }
        match before {
            Screen::LoggedIn(ViewSelector::Schedule) => self.schedule = ScheduleForm::new(),
            Screen::LoggedIn(ViewSelector::Resources) => self.resources.collapse_all(),
            _ => {}
        }
        if after == Screen::LoggedOut {
            self.auth_form = AuthForm::new();
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("screen", &self.screen())
            .field("collection", &self.collection)
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}
