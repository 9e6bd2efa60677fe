use criterion::{black_box, criterion_group, criterion_main, Criterion};

use table_state::{ColumnDescriptor, SortOrder, TableController, TableRow, ViewEvent};

#[derive(Debug, Clone)]
struct Card {
    id: u64,
    name: String,
    set_code: String,
    price_cents: i64,
}

impl TableRow for Card {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

const SETS: [&str; 10] = [
    "MH2", "NEO", "SNC", "DMU", "BRO", "ONE", "MOM", "LTR", "WOE", "LCI",
];

const NAMES: [&str; 8] = [
    "Lightning Bolt",
    "Counterspell",
    "Ragavan",
    "Boseiju",
    "Sheoldred",
    "Farewell",
    "Ledger Shredder",
    "Liliana of the Veil",
];

fn create_dataset(rows: usize) -> Vec<Card> {
    (0..rows as u64)
        .map(|i| Card {
            id: i,
            name: format!("{} #{}", NAMES[i as usize % NAMES.len()], i),
            set_code: SETS[i as usize % SETS.len()].to_string(),
            price_cents: (i as i64 * 37) % 10_000,
        })
        .collect()
}

fn columns() -> Vec<ColumnDescriptor<Card>> {
    vec![
        ColumnDescriptor::new("name")
            .with_accessor(|c: &Card| c.name.clone())
            .filter_contains(),
        ColumnDescriptor::new("set")
            .with_accessor(|c: &Card| c.set_code.clone())
            .filter_equals(),
        ColumnDescriptor::new("price")
            .with_accessor(|c: &Card| c.price_cents.to_string())
            .with_comparator(|a: &Card, b: &Card| a.price_cents.cmp(&b.price_cents)),
    ]
}

fn filtered_controller(rows: usize) -> TableController<Card> {
    let mut controller = TableController::new("bench", columns());
    controller.set_rows(create_dataset(rows));
    controller.handle(ViewEvent::FilterSubmitted {
        column: "set".into(),
        values: vec!["MH2".into(), "NEO".into()],
    });
    controller.handle(ViewEvent::SortSet {
        column: "price".into(),
        order: SortOrder::Descending,
    });
    controller.handle(ViewEvent::PageChanged {
        page: 3,
        page_size: 50,
    });
    controller
}

fn benchmark_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_filter_sort_window");

    for &rows in &[10_000usize, 50_000, 100_000] {
        let mut controller = filtered_controller(rows);
        group.bench_function(format!("{}k_rows", rows / 1_000), |b| {
            b.iter(|| {
                let snapshot = controller.snapshot();
                black_box(snapshot.total);
            });
        });
    }

    group.finish();
}

fn benchmark_filter_submit(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_submit");

    let mut controller = TableController::new("bench", columns());
    controller.set_rows(create_dataset(100_000));

    group.bench_function("contains_100k_rows", |b| {
        b.iter(|| {
            controller.handle(ViewEvent::FilterSubmitted {
                column: "name".into(),
                values: vec![black_box("bolt".to_string())],
            });
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_snapshot, benchmark_filter_submit);
criterion_main!(benches);
