//! Individual screen implementations for the shell.

mod game;
mod main_menu;
mod player_names;

pub use game::{GameScreen, ModalChoice, SaveStatus};
pub use main_menu::{MainMenuScreen, MenuOption};
pub use player_names::{NAMES_REQUIRED, NameField, PlayerNamesScreen};
