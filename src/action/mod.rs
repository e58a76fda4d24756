use serde::Deserialize;
use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Display, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    // Fresh page load: new backdrop and new snow
    Reload,
    Error(String),
    ToggleShowHelp,
}
