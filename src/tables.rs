use comfy_table::{Attribute, Cell, CellAlignment, Table, modifiers, presets};

use crate::{calculator::PriceResult, model::Identifier};

pub fn build_prices_table(prices: &[PriceResult]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec!["Session", "Supplier price", "Fee", "Time", "Energy", "Total"]);
    for price in prices {
        table.add_row(vec![
            Cell::new(format_identifier(price.session_id.as_ref())),
            Cell::new(format_identifier(price.supplier_price_id.as_ref()))
                .add_attribute(Attribute::Dim),
            Cell::new(price.fee_price).set_alignment(CellAlignment::Right),
            Cell::new(price.time_price).set_alignment(CellAlignment::Right),
            Cell::new(price.kwh_price).set_alignment(CellAlignment::Right),
            Cell::new(price.total_price)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Bold),
        ]);
    }
    table
}

fn format_identifier(identifier: Option<&Identifier>) -> String {
    identifier.map_or_else(|| "-".to_owned(), ToString::to_string)
}
