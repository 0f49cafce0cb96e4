#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
use clap::Parser;

use crate::ui::{Cli, Colors, Commands, ListCommands, colors};

mod converter;
mod markdown;
mod openapi;
mod schema;
mod ui;
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let colors = Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));

  match cli.command {
    Commands::List { list_command } => match list_command {
      ListCommands::Schemas { input } => ui::commands::list_schemas(&input, &colors).await?,
    },
    Commands::Openapi(command) => {
      let config = ui::commands::OpenApiConfig::from_command(command);
      ui::commands::generate_openapi(config, &colors).await?;
    }
    Commands::Markdown(command) => {
      let config = ui::commands::MarkdownConfig::from_command(command)?;
      ui::commands::generate_markdown(config, &colors).await?;
    }
  }

  Ok(())
}
