//! CLI commands and terminal output

mod auth;
mod context;
mod status;
pub mod style;

pub use auth::run_auth;
pub use status::{StatusOptions, run_status};

use anstream::{eprintln, println};
use stack_status::error::{Error, Failure};
use std::process::ExitCode;
use style::Stylize;

/// Print an error for the user, as JSON when `json` is set
pub fn report_error(err: &Error, json: bool) {
    if json {
        match serde_json::to_string_pretty(&Failure::from(err)) {
            Ok(body) => println!("{body}"),
            Err(_) => eprintln!("{err}"),
        }
        return;
    }

    eprintln!("{} {err}", "error:".error());
    if let Some(hint) = hint(err) {
        eprintln!("{}", hint.muted());
    }
}

/// Exit code for a failed command
pub fn exit_code(err: &Error) -> ExitCode {
    if err.is_setup_error() {
        ExitCode::from(2)
    } else if err.is_transient() {
        ExitCode::from(3)
    } else {
        ExitCode::FAILURE
    }
}

fn hint(err: &Error) -> Option<&'static str> {
    match err {
        Error::MalformedStackFooter | Error::EmptyStack => Some(
            "The PR must be created by a stacking tool that adds a 'Stack from ...' footer listing each PR.",
        ),
        Error::InvalidRepository(_) => {
            Some("Pass --repo owner/name, or set `repo` under [github] in the config file.")
        }
        Error::TransientFetch(_) => Some("Try again in a moment."),
        Error::UnknownReviewState(_) | Error::UnknownCiState(_) => {
            Some("GitHub reported a state this tool does not understand yet.")
        }
        _ => None,
    }
}
