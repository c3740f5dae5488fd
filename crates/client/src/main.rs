//! todo-list-client CLI entry point.

use clap::Parser;
use todo_list_client::cli::health::HealthAction;
use todo_list_client::cli::items::{item_body, ItemsAction};
use todo_list_client::cli::{Cli, Commands, OutputFormat};
use todo_list_client::client::items::ListItemsQuery;
use todo_list_client::client::TodoListClient;
use todo_list_client::output::{format_output, pretty};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = TodoListClient::new(&cli.base_url);

    match cli.command {
        Commands::Items(items_cmd) => match items_cmd.action {
            ItemsAction::List { since, limit } => {
                let items = client.list_items(ListItemsQuery { since, limit }).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&items, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_items(&items)),
                }
            }
            ItemsAction::Add {
                description,
                completed,
            } => {
                let item = client
                    .add_item(&item_body(description, completed))
                    .await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&item, cli.format)),
                    OutputFormat::Pretty => println!("Created:\n{}", pretty::format_item(&item)),
                }
            }
            ItemsAction::Update {
                id,
                description,
                completed,
            } => {
                let item = client
                    .update_item(id, &item_body(description, completed))
                    .await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&item, cli.format)),
                    OutputFormat::Pretty => println!("Updated:\n{}", pretty::format_item(&item)),
                }
            }
            ItemsAction::Delete { id } => {
                client.delete_item(id).await?;
                if !cli.quiet {
                    println!("Deleted item {}", id);
                }
            }
        },
        Commands::Health(health_cmd) => match health_cmd.action {
            HealthAction::Live => {
                client.live().await?;
                if !cli.quiet {
                    println!("Live");
                }
            }
            HealthAction::Ready => {
                let status = client.ready().await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&status, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_ready(&status)),
                }
                if !status.healthy {
                    std::process::exit(1);
                }
            }
        },
    }

    Ok(())
}
