//! Commands

use std::str::FromStr;

use thiserror::Error;

use crate::products::ProductId;

/// A shopper action, dispatched to [`Storefront::dispatch`](super::Storefront::dispatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show every product in the grid.
    ShowAllProducts,

    /// Show only products on offer.
    ShowOffers,

    /// Add one unit of a product to the cart.
    AddToCart(ProductId),

    /// Add one unit to the cart line at a position.
    IncrementLine(usize),

    /// Remove one unit from the cart line at a position.
    DecrementLine(usize),

    /// Remove the cart line at a position.
    RemoveLine(usize),

    /// Empty the cart.
    ClearCart,

    /// Show the cart side panel.
    OpenCartPanel,

    /// Hide the cart side panel.
    CloseCartPanel,

    /// Show the checkout confirmation dialog.
    OpenCheckout,

    /// Dismiss the checkout confirmation dialog.
    CancelCheckout,

    /// Confirm the purchase.
    ConfirmCheckout,
}

/// Errors parsing a command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    /// Empty input
    #[error("no command given")]
    Empty,

    /// Unrecognised command word
    #[error("unknown command: {0}")]
    Unknown(String),

    /// A command that needs an argument was given none
    #[error("command '{0}' needs a number")]
    MissingArgument(String),

    /// The argument was not a number
    #[error("invalid number: {0}")]
    InvalidNumber(String),
}

fn number<T: FromStr>(command: &str, argument: Option<&str>) -> Result<T, CommandParseError> {
    let argument = argument.ok_or_else(|| CommandParseError::MissingArgument(command.to_string()))?;

    argument
        .parse()
        .map_err(|_err| CommandParseError::InvalidNumber(argument.to_string()))
}

impl FromStr for Command {
    type Err = CommandParseError;

    /// Parse a terminal command such as `add 3`, `inc 0` or `confirm`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let command = words.next().ok_or(CommandParseError::Empty)?;
        let argument = words.next();

        let parsed = match command.to_ascii_lowercase().as_str() {
            "all" | "todos" => Command::ShowAllProducts,
            "offers" | "ofertas" => Command::ShowOffers,
            "add" => Command::AddToCart(ProductId(number(command, argument)?)),
            "inc" | "+" => Command::IncrementLine(number(command, argument)?),
            "dec" | "-" => Command::DecrementLine(number(command, argument)?),
            "rm" | "remove" => Command::RemoveLine(number(command, argument)?),
            "clear" => Command::ClearCart,
            "cart" => Command::OpenCartPanel,
            "close" => Command::CloseCartPanel,
            "checkout" => Command::OpenCheckout,
            "cancel" => Command::CancelCheckout,
            "confirm" => Command::ConfirmCheckout,
            other => return Err(CommandParseError::Unknown(other.to_string())),
        };

        Ok(parsed)
    }
}
