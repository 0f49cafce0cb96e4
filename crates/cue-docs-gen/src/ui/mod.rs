pub mod cli;
pub mod colors;
pub mod commands;
mod logger;

pub use cli::{Cli, Commands, ListCommands, MarkdownCommand, OpenapiCommand};
pub use colors::Colors;
pub(crate) use logger::Logger;

fn term_width() -> u16 {
  if let Ok((width, _)) = crossterm::terminal::size() {
    width
  } else {
    80
  }
}
