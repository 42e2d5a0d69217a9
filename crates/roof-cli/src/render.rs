//! Plain-text rendering of the session's screens.
//!
//! Every function returns a `String` so the shell decides where it goes.
//! Color is applied only when `color` is set.

use std::fmt::Write as _;

use roof_core::resources::ResourceGuide;
use roof_core::{AssessmentField, Identity};
use roof_session::{
    AuthForm, AuthMode, Notice, ResourceBrowser, ScheduleForm, Screen, Session, ViewSelector,
};

use crate::ui::paint;

const BRAND: &str = "Rooftop Intel";
const RULE: &str = "------------------------------------------------------------";

const RED: &str = "31";
const GREEN: &str = "32";
const BOLD: &str = "1";
const DIM: &str = "2";

/// Render whatever the session is currently showing.
#[must_use]
pub fn screen(session: &Session, color: bool) -> String {
    match (session.screen(), session.identity()) {
        (Screen::LoggedIn(selector), Some(identity)) => {
            let mut out = header(identity, color);
            if selector != ViewSelector::DashboardHome {
                out.push_str(&paint(DIM, "<- Back to Dashboard (back)", color));
                out.push_str("\n\n");
            }
            out.push_str(&match selector {
                ViewSelector::DashboardHome => dashboard_home(color),
                ViewSelector::Resources => resources(session.resources(), color),
                ViewSelector::Schedule => schedule(session.schedule_form(), color),
            });
            out
        }
        (Screen::LoggedOut, _) => landing(session.auth_form(), color),
        _ => loading(),
    }
}

#[must_use]
pub fn loading() -> String {
    format!("Loading {BRAND}...\n")
}

#[must_use]
pub fn landing(form: &AuthForm, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        paint(BOLD, "Stop Guessing About HVAC/R. Get The Facts.", color)
    );
    out.push_str(
        "Create a free account to access DIY HVAC & Refrigeration assessment guides \
         or schedule an expert remote inspection.\n\n",
    );

    let tab = |mode: AuthMode| {
        if form.mode() == mode {
            paint(BOLD, &format!("[{mode}]"), color)
        } else {
            format!(" {mode} ")
        }
    };
    let _ = writeln!(out, "{}  {}", tab(AuthMode::LogIn), tab(AuthMode::SignUp));
    if let Some(error) = form.error() {
        let _ = writeln!(out, "{}", paint(RED, error, color));
    }
    let _ = writeln!(out, "  Email address: {}", form.email());
    let masked = "*".repeat(form.password().chars().count());
    let _ = writeln!(out, "  Password:      {masked}");
    let _ = writeln!(out, "  [{}]", form.mode().submit_label());

    let _ = writeln!(out, "\n{RULE}");
    let _ = writeln!(out, "{}", paint(BOLD, "Make Smarter Decisions, Faster", color));
    for (title, text) in [
        (
            "Avoid Hidden Costs",
            "Identify thousands in potential HVAC costs before you're locked into a lease.",
        ),
        (
            "Strengthen Your Position",
            "Use our detailed reports as a powerful tool to negotiate better lease terms.",
        ),
        (
            "Save Time and Money",
            "Get expert opinions in hours, not days, without costly site visits.",
        ),
    ] {
        let _ = writeln!(out, "  {} {title}: {text}", paint(GREEN, "✓", color));
    }
    out
}

#[must_use]
pub fn header(identity: &Identity, color: bool) -> String {
    format!(
        "{}    Welcome, {}    [Log Out] (logout)\n{RULE}\n",
        paint(BOLD, BRAND, color),
        identity.email
    )
}

#[must_use]
pub fn dashboard_home(color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n", paint(BOLD, "Member Dashboard", color));
    let _ = writeln!(out, "  Free Resources (resources)");
    let _ = writeln!(
        out,
        "    Access our library of DIY guides and checklists for preliminary HVAC assessments.\n"
    );
    let _ = writeln!(out, "  Schedule Assessment (schedule)");
    let _ = writeln!(
        out,
        "    Book a remote video assessment with one of our certified HVAC technicians."
    );
    out
}

#[must_use]
pub fn resources(browser: &ResourceBrowser, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n", paint(BOLD, "DIY Assessment Resources", color));
    for (position, guide) in browser.guides().iter().enumerate() {
        let expanded = browser.is_expanded(guide.id);
        let marker = if expanded { "[-]" } else { "[+]" };
        let _ = writeln!(out, "{} {marker} {}", position + 1, guide.title);
        if expanded {
            guide_detail(&mut out, guide);
        }
    }
    out
}

fn guide_detail(out: &mut String, guide: &ResourceGuide) {
    for line in guide.body.lines() {
        let _ = writeln!(out, "      {line}");
    }
    for (position, image) in guide.images.iter().enumerate() {
        let _ = writeln!(out, "      image {}: {}", position + 1, image.caption);
    }
}

#[must_use]
pub fn schedule(form: &ScheduleForm, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", paint(BOLD, "Schedule a Remote Assessment", color));
    out.push_str(
        "Fill out the details below. Our team will contact you at the provided phone \
         number to schedule the video call.\n\n",
    );
    match form.notice() {
        Some(Notice::Error(message)) => {
            let _ = writeln!(out, "{}", paint(RED, message, color));
        }
        Some(Notice::Success(message)) => {
            let _ = writeln!(out, "{}", paint(GREEN, message, color));
        }
        None => {}
    }
    for field in AssessmentField::ALL {
        let _ = writeln!(
            out,
            "  {:<24} {}",
            format!("{}:", field.label()),
            form.draft().get(field)
        );
    }
    let _ = writeln!(out, "  [Submit Request]");
    out
}

/// Commands available on `screen`.
#[must_use]
pub fn help(screen: Screen) -> String {
    let specific: &[(&str, &str)] = match screen {
        Screen::Loading => &[],
        Screen::LoggedOut => &[
            ("login", "switch to the log-in form"),
            ("signup", "switch to the sign-up form"),
            ("email <address>", "set the email address"),
            ("password <secret>", "set the password (6+ characters)"),
            ("submit", "log in or create the account"),
        ],
        Screen::LoggedIn(ViewSelector::DashboardHome) => &[
            ("resources", "browse the DIY resource guides"),
            ("schedule", "request a remote assessment"),
            ("logout", "sign out"),
        ],
        Screen::LoggedIn(ViewSelector::Resources) => &[
            ("toggle <n>", "expand or collapse guide n"),
            ("open <n> <m>", "open image m of guide n in the browser"),
            ("back", "return to the dashboard"),
            ("logout", "sign out"),
        ],
        Screen::LoggedIn(ViewSelector::Schedule) => &[
            ("address <text>", "property address"),
            ("contact <text>", "on-site contact name"),
            ("phone <text>", "on-site contact phone"),
            ("notes <text>", "optional notes"),
            ("submit", "submit the request"),
            ("back", "return to the dashboard"),
            ("logout", "sign out"),
        ],
    };

    let mut out = String::new();
    for (usage, what) in specific
        .iter()
        .chain(&[("help", "show this list"), ("quit", "leave")])
    {
        let _ = writeln!(out, "  {usage:<20} {what}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_names_the_app() {
        assert_eq!(loading(), "Loading Rooftop Intel...\n");
    }

    #[test]
    fn landing_masks_password_and_shows_error() {
        let mut form = AuthForm::new();
        form.set_email("a@b.com");
        form.set_password("secret1");
        let out = landing(&form, false);

        assert!(out.contains("[Log In]"));
        assert!(out.contains("Email address: a@b.com"));
        assert!(out.contains("*******"));
        assert!(!out.contains("secret1"));
        assert!(out.contains("Avoid Hidden Costs"));
    }

    #[test]
    fn header_greets_member() {
        let out = header(&Identity::new("u1", "a@b.com"), false);
        assert!(out.contains("Welcome, a@b.com"));
    }

    #[test]
    fn resources_show_markers_and_expanded_body() {
        let mut browser = ResourceBrowser::new();
        browser.toggle("unit-age");
        let out = resources(&browser, false);

        assert!(out.contains("1 [+] DIY Visual Inspection Checklist"));
        assert!(out.contains("2 [-] How to Determine a Unit's Age"));
        assert!(out.contains("Common Formats"));
        assert!(out.contains("image 1: Locate the data plate"));
        assert!(!out.contains("Overall Condition"));
    }

    #[test]
    fn schedule_lists_labels_and_values() {
        let mut form = ScheduleForm::new();
        form.set(AssessmentField::Address, "123 Main St");
        let out = schedule(&form, false);

        assert!(out.contains("Property Address*:"));
        assert!(out.contains("123 Main St"));
        assert!(out.contains("Notes (Optional):"));
        assert!(out.contains("[Submit Request]"));
    }

    #[test]
    fn colored_notice_is_wrapped_in_sgr() {
        let painted = paint(RED, "Please fill out all required fields.", true);
        assert!(painted.starts_with("\u{1b}[31m"));
    }

    #[test]
    fn help_lists_screen_commands() {
        let out = help(Screen::LoggedIn(ViewSelector::Resources));
        assert!(out.contains("toggle <n>"));
        assert!(out.contains("quit"));
        assert!(!out.contains("signup"));
    }
}
