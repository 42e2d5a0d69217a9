//! # roof-session
//!
//! The member session: which screen is showing, what the forms hold, and how
//! user actions reach the identity and document store gateways.
//!
//! - [`view`]: the auth-gated screen state machine
//! - [`auth_form`]: log-in / sign-up credentials and their submission
//! - [`schedule_form`]: the assessment request draft and its submission
//! - [`resources`]: expand/collapse state of the resource guides
//! - [`session`]: ties the above to the gateways and the identity subscription

pub mod auth_form;
pub mod error;
pub mod resources;
pub mod schedule_form;
pub mod session;
pub mod view;

mod busy;

pub use auth_form::{AuthForm, AuthMode, FieldError};
pub use error::ActionError;
pub use resources::ResourceBrowser;
pub use schedule_form::{Notice, ScheduleForm};
pub use session::{Action, Session};
pub use view::{Screen, ViewSelector, ViewState};
