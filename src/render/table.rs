//! Terminal table renderer

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use tracing::error;

use super::{CartView, Overlays, ProductCard, Renderer};

/// Renderer that draws the grid and cart as text tables.
#[derive(Debug)]
pub struct TableRenderer<W> {
    out: W,
}

impl<W: io::Write> TableRenderer<W> {
    /// Create a renderer writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the renderer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_block(&mut self, block: &str) {
        if let Err(error) = writeln!(self.out, "{block}").and_then(|()| self.out.flush()) {
            error!(%error, "failed to write to terminal");
        }
    }
}

fn products_table(cards: &[ProductCard]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Product", "Price", "Offer"]);

    for card in cards {
        builder.push_record([
            card.id.to_string(),
            card.name.clone(),
            card.price.clone(),
            card.offer_price.clone().unwrap_or_default(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..4), Alignment::right());

    table.to_string()
}

fn cart_table(view: &CartView) -> String {
    let mut builder = Builder::default();

    builder.push_record(["#", "Product", "Unit", "Qty", "Total"]);

    for row in &view.rows {
        builder.push_record([
            row.index.to_string(),
            row.name.clone(),
            row.unit_price.clone(),
            row.quantity.to_string(),
            row.line_total.clone(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..5), Alignment::right());

    format!(
        "{table}\n Subtotal: {}\n Tax:      {}\n Total:    {}\n Items:    {}",
        view.subtotal, view.tax, view.total, view.item_count
    )
}

impl<W: io::Write> Renderer for TableRenderer<W> {
    fn render_products(&mut self, cards: &[ProductCard]) {
        if cards.is_empty() {
            self.write_block("No products to show.");
            return;
        }

        self.write_block(&products_table(cards));
    }

    fn render_offer_badge(&mut self, badge: Option<&str>) {
        if let Some(badge) = badge {
            self.write_block(&format!("Offers {badge}"));
        }
    }

    fn render_cart(&mut self, view: &CartView) {
        self.write_block(&cart_table(view));
    }

    fn render_overlays(&mut self, overlays: Overlays) {
        if overlays.checkout_dialog.is_open() {
            self.write_block("Confirm purchase? (confirm / cancel)");
        }
    }
}
