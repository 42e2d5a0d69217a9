//! Parsing of shell input lines into session actions.

use std::str::FromStr;

use anyhow::{Context, bail};
use roof_core::AssessmentField;
use roof_core::resources::{self, GuideImage, ResourceGuide};
use roof_session::{Action, AuthMode, Screen, ViewSelector};

/// One line of shell input, resolved against the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Session(Action),
    OpenImage(&'static GuideImage),
    Help,
    Quit,
    Nothing,
}

/// Parse `line` as typed on `screen`.
///
/// `submit` means the assessment form on the schedule screen and the auth
/// form everywhere else. Whether an action is actually offered on `screen`
/// is left to the session.
pub fn parse(line: &str, screen: Screen) -> anyhow::Result<Command> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Nothing);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let action = match verb.to_ascii_lowercase().as_str() {
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        "login" => Action::SetAuthMode(AuthMode::LogIn),
        "signup" => Action::SetAuthMode(AuthMode::SignUp),
        "email" => Action::EditEmail(rest.to_string()),
        "password" => Action::EditPassword(rest.to_string()),
        "submit" if screen == Screen::LoggedIn(ViewSelector::Schedule) => {
            Action::SubmitAssessment
        }
        "submit" => Action::SubmitAuth,
        "resources" => Action::OpenResources,
        "schedule" => Action::OpenSchedule,
        "back" => Action::BackToDashboard,
        "logout" => Action::SignOut,
        "toggle" => Action::ToggleGuide(guide(rest)?.id.to_string()),
        "open" => {
            let mut args = rest.split_whitespace();
            let guide = guide(args.next().unwrap_or_default())?;
            let image = image(guide, args.next().unwrap_or_default())?;
            return Ok(Command::OpenImage(image));
        }
        other => match AssessmentField::from_str(other) {
            Ok(field) => Action::EditAssessment(field, rest.to_string()),
            Err(_) => bail!("unknown command '{verb}' (type 'help')"),
        },
    };
    Ok(Command::Session(action))
}

/// Guide by its 1-based position in the list.
fn guide(arg: &str) -> anyhow::Result<&'static ResourceGuide> {
    let catalog = resources::catalog();
    let position = ordinal(arg, "guide")?;
    catalog
        .get(position - 1)
        .with_context(|| format!("no guide {position}; there are {}", catalog.len()))
}

fn image(guide: &'static ResourceGuide, arg: &str) -> anyhow::Result<&'static GuideImage> {
    let position = ordinal(arg, "image")?;
    guide.images.get(position - 1).with_context(|| {
        format!(
            "no image {position} in '{}'; it has {}",
            guide.title,
            guide.images.len()
        )
    })
}

fn ordinal(arg: &str, what: &str) -> anyhow::Result<usize> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ if arg.is_empty() => bail!("missing {what} number"),
        _ => bail!("'{arg}' is not a {what} number"),
    }
}
