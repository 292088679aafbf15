//! Shop Example
//!
//! Terminal storefront: loads the configured catalog, restores the cart from the data
//! directory and reads commands from stdin until `quit`.
//!
//! Commands: `all`, `offers`, `add <id>`, `inc <n>`, `dec <n>`, `rm <n>`, `clear`, `cart`,
//! `close`, `checkout`, `cancel`, `confirm`, `quit`.
//!
//! Use `--catalog data/productos.yml` to load the YAML catalog instead of the JSON one.

use std::io;

use anyhow::Result;
use carrito::{
    catalog::source::from_location,
    config::ShopConfig,
    logging::init_subscriber,
    notifications::{Notification, Notifier},
    render::TableRenderer,
    storage::FileStore,
    storefront::{Command, Storefront},
};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Prints notifications to the terminal.
#[derive(Debug, Default)]
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    #[expect(clippy::print_stdout, reason = "Example code")]
    fn notify(&mut self, notification: Notification) {
        println!(">> {}", notification.message);
    }
}

/// Shop Example
#[tokio::main]
#[expect(clippy::print_stdout, reason = "Example code")]
async fn main() -> Result<()> {
    let config = ShopConfig::load()?;

    init_subscriber(&config.logging)?;

    let formatter = config.formatter()?;
    let storage = FileStore::open(config.data_dir.clone())?;
    let source = from_location(&config.catalog);

    let mut storefront = Storefront::new(
        storage,
        TableRenderer::new(io::stdout()),
        ConsoleNotifier,
        formatter,
    );

    storefront.start(source.as_ref()).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if matches!(line, "quit" | "exit" | "salir") {
            break;
        }

        match line.parse::<Command>() {
            Ok(command) => storefront.dispatch(command),
            Err(error) => println!("{error}"),
        }
    }

    Ok(())
}
