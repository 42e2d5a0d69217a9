use thiserror::Error;

use crate::view::Screen;

/// A user action the session refused. Nothing was changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("'{action}' is not available on the {screen} screen")]
    Unavailable { action: &'static str, screen: Screen },

    #[error("no resource guide with id '{0}'")]
    UnknownGuide(String),
}
