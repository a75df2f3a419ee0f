use std::fmt;

use anyhow::Result;
use inquire::{InquireError, Select, Text};
use skycast_core::{Location, TemperatureUnit};

use crate::app::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    MyLocation,
    Recents,
    ToggleUnit(TemperatureUnit),
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Search => f.write_str("Search a city"),
            Action::MyLocation => f.write_str("Use my location"),
            Action::Recents => f.write_str("Recent cities"),
            Action::ToggleUnit(to) => write!(f, "Show °{}", to.symbol()),
            Action::Quit => f.write_str("Quit"),
        }
    }
}

/// Menu entries; recents only appear once something has been searched.
fn actions(unit: TemperatureUnit, has_recents: bool) -> Vec<Action> {
    let mut actions = vec![Action::Search, Action::MyLocation];
    if has_recents {
        actions.push(Action::Recents);
    }
    actions.push(Action::ToggleUnit(unit.toggle()));
    actions.push(Action::Quit);
    actions
}

enum RecentChoice {
    Open(Location),
    Back,
}

impl fmt::Display for RecentChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecentChoice::Open(loc) => f.write_str(&loc.name),
            RecentChoice::Back => f.write_str("« Back"),
        }
    }
}

/// Ctrl-C and Esc end the current prompt instead of failing the session.
fn cancelled(err: &InquireError) -> bool {
    matches!(err, InquireError::OperationCanceled | InquireError::OperationInterrupted)
}

pub async fn run(app: &mut App) -> Result<()> {
    loop {
        let menu = actions(app.unit(), !app.recents().is_empty());
        let action = match Select::new("What next?", menu).prompt() {
            Ok(action) => action,
            Err(e) if cancelled(&e) => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        match action {
            Action::Search => {
                let query = match Text::new("City:").prompt() {
                    Ok(q) => q,
                    Err(e) if cancelled(&e) => continue,
                    Err(e) => return Err(e.into()),
                };
                app.search(&query).await;
            }
            Action::MyLocation => {
                app.here().await;
            }
            Action::Recents => {
                let mut choices: Vec<RecentChoice> =
                    app.recents().into_iter().map(RecentChoice::Open).collect();
                choices.push(RecentChoice::Back);

                match Select::new("Recent cities:", choices).prompt() {
                    Ok(RecentChoice::Open(location)) => {
                        app.open_recent(&location).await;
                    }
                    Ok(RecentChoice::Back) => {}
                    Err(e) if cancelled(&e) => {}
                    Err(e) => return Err(e.into()),
                }
            }
            Action::ToggleUnit(_) => app.toggle_unit(),
            Action::Quit => return Ok(()),
        }
    }
}
