use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use slotsort_core::{ItemHandle, RuleId};
use slotsort_inventory::{
    Grid, InMemoryItemCatalog, InventoryConfig, InventorySorter, InventoryType, ItemAttributes, ItemCategory,
    ItemId, RuleFilters, SortController, SortDirection, SortMode, SortSettings, SortingRule, SystemConfig,
};

/// Four full main inventory pages; the first `rule_count` rules own the
/// leading slots of page one, items are scattered everywhere else.
fn fixture(rule_count: u32, fill_ratio: f64) -> (SortController, InMemoryItemCatalog, Vec<Grid>) {
    let mut controller = SortController::new();
    let mut rule_ids = Vec::new();
    for category in 0..rule_count {
        let rule = SortingRule::new(format!("Category {category}"))
            .with_filters(RuleFilters::categories([ItemCategory(category)]))
            .with_sort(SortSettings::by(SortMode::ItemLevel, SortDirection::Descending));
        rule_ids.push(controller.add_rule(rule).unwrap());
    }

    let mut catalog = InMemoryItemCatalog::new();
    let mut grids = Vec::new();
    let mut handle = 0u64;
    for (page, inventory_type) in InventoryType::MAIN.into_iter().enumerate() {
        let mut config = InventoryConfig::new(inventory_type);
        if page == 0 {
            for (slot, rule_id) in config.slot_configs.iter_mut().zip(rule_ids.iter().cycle()) {
                slot.rule_id = *rule_id;
            }
        }
        let mut grid = Grid::new(config).unwrap();

        let filled = (grid.len() as f64 * fill_ratio) as usize;
        for position in (0..grid.len()).rev().take(filled) {
            handle += 1;
            let category = (handle % (rule_count as u64 + 2)) as u32;
            catalog.insert(
                ItemHandle::new(handle),
                ItemAttributes::new(ItemId(handle as u32), format!("Item {handle}"), ItemCategory(category))
                    .with_level((handle * 7 % 90) as u32),
            );
            grid.set_item(position, Some(ItemHandle::new(handle))).unwrap();
        }
        grids.push(grid);
    }

    (controller, catalog, grids)
}

fn bench_full_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_pass");

    for rule_count in [1u32, 4, 8] {
        let (controller, catalog, grids) = fixture(rule_count, 0.8);
        let slots: usize = grids.iter().map(Grid::len).sum();
        group.throughput(Throughput::Elements(slots as u64));

        group.bench_with_input(BenchmarkId::new("unsorted_start", rule_count), &grids, |b, grids| {
            let sorter = InventorySorter::new(&controller, &catalog, SystemConfig::default());
            b.iter(|| {
                let mut grids = grids.clone();
                black_box(sorter.sort_inventory(InventoryType::Inventory1, &mut grids).unwrap())
            });
        });

        let mut settled = grids.clone();
        let sorter = InventorySorter::new(&controller, &catalog, SystemConfig::default());
        sorter.sort_inventory(InventoryType::Inventory1, &mut settled).unwrap();
        group.bench_with_input(BenchmarkId::new("already_sorted", rule_count), &settled, |b, grids| {
            b.iter(|| {
                let mut grids = grids.clone();
                black_box(sorter.sort_inventory(InventoryType::Inventory1, &mut grids).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_default_rule_only(c: &mut Criterion) {
    let (controller, catalog, grids) = fixture(0, 1.0);
    let config = SystemConfig {
        reorder_unsorted_items: true,
        ..SystemConfig::default()
    };
    let sorter = InventorySorter::new(&controller, &catalog, config);
    assert!(grids[0].slots().iter().all(|s| s.rule_id() == RuleId::DEFAULT));

    c.bench_function("reorder_unsorted_full_inventory", |b| {
        b.iter(|| {
            let mut grids = grids.clone();
            black_box(sorter.sort_inventory(InventoryType::Inventory1, &mut grids).unwrap())
        });
    });
}

criterion_group!(benches, bench_full_pass, bench_default_rule_only);
criterion_main!(benches);
