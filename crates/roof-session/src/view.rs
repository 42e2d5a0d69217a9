//! Auth-gated screen state machine.
//!
//! ```text
//! Loading ──absent──→ LoggedOut ──present──→ LoggedIn(DashboardHome)
//!    │                    ↑                        │  ↑
//!    └─────present────────┼───────────────────────→┘  │ any present (selector reset)
//!                         └────────absent─────────────┘
//! ```
//!
//! Only identity notifications move between the outer states. Inside
//! `LoggedIn` the [`ViewSelector`] is changed by navigation.

use std::fmt;

use roof_core::Identity;
use roof_core::feed::Notification;

// ---------------------------------------------------------------------------
// ViewSelector
// ---------------------------------------------------------------------------

/// Which authenticated screen is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewSelector {
    #[default]
    DashboardHome,
    Resources,
    Schedule,
}

impl ViewSelector {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DashboardHome => "dashboard",
            Self::Resources => "resources",
            Self::Schedule => "schedule",
        }
    }
}

impl fmt::Display for ViewSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// Top-level screen derived from the auth snapshot and the view selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Screen {
    #[default]
    Loading,
    LoggedOut,
    LoggedIn(ViewSelector),
}

impl Screen {
    #[must_use]
    pub const fn is_logged_in(self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => f.write_str("loading"),
            Self::LoggedOut => f.write_str("landing"),
            Self::LoggedIn(selector) => selector.fmt(f),
        }
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Latest identity notification plus the dashboard's view selector.
///
/// The dashboard screens are reachable only while an identity is present, the
/// landing screen only while it is absent, and neither before the first
/// notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    identity: Option<Identity>,
    resolved: bool,
    selector: ViewSelector,
}

impl ViewState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn screen(&self) -> Screen {
        match (self.resolved, &self.identity) {
            (false, _) => Screen::Loading,
            (true, None) => Screen::LoggedOut,
            (true, Some(_)) => Screen::LoggedIn(self.selector),
        }
    }

    /// The signed-in identity, if the latest notification carried one.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Whether the first notification has arrived.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Apply an identity notification and return the resulting screen.
    ///
    /// Every notification carrying an identity resets the selector to
    /// [`ViewSelector::DashboardHome`], including a change of user.
    pub fn apply(&mut self, notification: Notification) -> Screen {
        self.resolved = true;
        if notification.is_some() {
            self.selector = ViewSelector::DashboardHome;
        }
        self.identity = notification;
        self.screen()
    }

    /// Switch the authenticated screen. Returns `false` when nobody is
    /// signed in, leaving the state untouched.
    pub fn select(&mut self, selector: ViewSelector) -> bool {
        if !self.screen().is_logged_in() {
            return false;
        }
        self.selector = selector;
        true
    }
}
