// Drives every controller operation against an in-memory card-price dataset
// and prints the resulting snapshots. Run with: cargo run --bin table_state_demo

use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use tracing_subscriber::EnvFilter;

use table_state::{
    ColumnDescriptor, MemoryStore, QuickFilterMode, SortOrder, TableController, TableRow,
    TableSnapshot, ViewEvent,
};

#[derive(Debug, Clone)]
struct CardPrice {
    id: u64,
    name: String,
    set_code: String,
    rarity: String,
    price_cents: i64,
    quantity: u32,
    observed: NaiveDate,
}

impl TableRow for CardPrice {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

fn dataset() -> Vec<CardPrice> {
    let rows = [
        (1, "Lightning Bolt", "MH2", "uncommon", 150, 12, "2024-03-01"),
        (2, "Ragavan, Nimble Pilferer", "MH2", "mythic", 6200, 2, "2024-03-01"),
        (3, "Counterspell", "MH2", "uncommon", 120, 20, "2024-03-02"),
        (4, "Boseiju, Who Endures", "NEO", "rare", 3100, 4, "2024-03-02"),
        (5, "The Wandering Emperor", "NEO", "mythic", 2500, 3, "2024-03-03"),
        (6, "Farewell", "NEO", "rare", 750, 8, "2024-03-03"),
        (7, "Ledger Shredder", "SNC", "rare", 900, 6, "2024-03-04"),
        (8, "Raffine, Scheming Seer", "SNC", "mythic", 600, 5, "2024-03-04"),
        (9, "Sheoldred, the Apocalypse", "DMU", "mythic", 7800, 1, "2024-03-05"),
        (10, "Liliana of the Veil", "DMU", "mythic", 1900, 4, "2024-03-05"),
    ];
    rows.iter()
        .map(|&(id, name, set_code, rarity, price_cents, quantity, observed)| CardPrice {
            id,
            name: name.to_string(),
            set_code: set_code.to_string(),
            rarity: rarity.to_string(),
            price_cents,
            quantity,
            observed: observed.parse().expect("valid date literal"),
        })
        .collect()
}

fn columns() -> Vec<ColumnDescriptor<CardPrice>> {
    vec![
        ColumnDescriptor::new("name")
            .with_title("Card")
            .with_accessor(|card: &CardPrice| card.name.clone())
            .filter_contains(),
        ColumnDescriptor::new("set")
            .with_title("Set")
            .with_accessor(|card: &CardPrice| card.set_code.clone())
            .filter_equals(),
        ColumnDescriptor::new("rarity")
            .with_title("Rarity")
            .with_accessor(|card: &CardPrice| card.rarity.clone())
            .filter_equals(),
        ColumnDescriptor::new("price")
            .with_title("Price")
            .with_accessor(|card: &CardPrice| format!("${:.2}", card.price_cents as f64 / 100.0))
            .with_comparator(|a: &CardPrice, b: &CardPrice| a.price_cents.cmp(&b.price_cents)),
        ColumnDescriptor::new("qty")
            .with_title("Qty")
            .with_accessor(|card: &CardPrice| card.quantity.to_string())
            .with_comparator(|a: &CardPrice, b: &CardPrice| a.quantity.cmp(&b.quantity)),
        ColumnDescriptor::new("observed")
            .with_title("Observed")
            .with_accessor(|card: &CardPrice| card.observed.to_string())
            .sort_by_value(),
    ]
}

fn render(snapshot: &TableSnapshot<'_, CardPrice>, columns: &[ColumnDescriptor<CardPrice>]) {
    let visible: Vec<&ColumnDescriptor<CardPrice>> = snapshot
        .visible_columns
        .iter()
        .filter_map(|key| columns.iter().find(|column| &column.key == key))
        .collect();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut headers = vec![Cell::new("sel").add_attribute(Attribute::Bold)];
    headers.extend(
        visible
            .iter()
            .map(|column| Cell::new(&column.title).add_attribute(Attribute::Bold)),
    );
    table.set_header(headers);

    for row in &snapshot.rows {
        let mut cells = vec![if snapshot.selection.contains(&row.id()) {
            "[x]".to_string()
        } else {
            "[ ]".to_string()
        }];
        cells.extend(
            visible
                .iter()
                .map(|column| column.value(row).unwrap_or_default()),
        );
        table.add_row(cells);
    }

    println!("{table}");
    println!(
        "page {}/{} | {} filtered row(s) | {} selected | select-all: {}\n",
        snapshot.page,
        snapshot.page_count,
        snapshot.total,
        snapshot.selection.len(),
        snapshot.select_all_checked,
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .compact()
        .init();

    let descriptors = columns();
    let mut controller = TableController::new("demo:card-prices", descriptors.clone())
        .attach_store(Box::new(MemoryStore::new()));
    controller.set_rows(dataset());

    println!("=== Initial view (page size 4) ===");
    controller.handle(ViewEvent::PageChanged {
        page: 1,
        page_size: 4,
    });
    render(&controller.snapshot(), &descriptors);

    println!("=== Filter: mythics from MH2 or DMU ===");
    controller.handle(ViewEvent::FilterSubmitted {
        column: "set".into(),
        values: vec!["MH2".into(), "DMU".into()],
    });
    controller.handle(ViewEvent::FilterSubmitted {
        column: "rarity".into(),
        values: vec!["mythic".into()],
    });
    render(&controller.snapshot(), &descriptors);

    println!("=== Sort by price descending ===");
    controller.handle(ViewEvent::SortSet {
        column: "price".into(),
        order: SortOrder::Descending,
    });
    render(&controller.snapshot(), &descriptors);

    println!("=== Select all (scoped to the filtered view) ===");
    controller.handle(ViewEvent::SelectAllToggled);
    render(&controller.snapshot(), &descriptors);

    println!("=== Clear filters; selection survives ===");
    controller.handle(ViewEvent::FiltersReset);
    render(&controller.snapshot(), &descriptors);

    println!("=== Debounced quick filter: 'emperor' ===");
    controller.queue_quick_filter("emp");
    controller.queue_quick_filter("emperor");
    std::thread::sleep(std::time::Duration::from_millis(350));
    controller.tick();
    render(&controller.snapshot(), &descriptors);
    controller.handle(ViewEvent::QuickFilterCleared);

    println!("=== Fuzzy quick filter: 'shldrd' ===");
    controller.handle(ViewEvent::QuickFilterChanged {
        pattern: "shldrd".into(),
        mode: QuickFilterMode::Fuzzy,
    });
    render(&controller.snapshot(), &descriptors);
    controller.handle(ViewEvent::QuickFilterCleared);

    println!("=== Hide the quantity and observed columns ===");
    controller.handle(ViewEvent::ColumnToggled {
        column: "qty".into(),
    });
    controller.handle(ViewEvent::ColumnToggled {
        column: "observed".into(),
    });
    render(&controller.snapshot(), &descriptors);

    println!("=== Dataset shrinks; page and selection reconcile ===");
    let survivors: Vec<CardPrice> = dataset().into_iter().take(3).collect();
    controller.handle(ViewEvent::PageChanged {
        page: 3,
        page_size: 4,
    });
    controller.set_rows(survivors);
    render(&controller.snapshot(), &descriptors);

    println!("=== Reset columns ===");
    controller.handle(ViewEvent::ColumnsReset);
    render(&controller.snapshot(), &descriptors);
}
