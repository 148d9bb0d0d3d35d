//! `slotsort-cli` — run one sort pass over a JSON scenario and print the result.
//!
//! Usage: `slotsort-cli <scenario.json>`; log level via `RUST_LOG`.

use std::fmt::Write as _;

use anyhow::Context;
use serde::Deserialize;

use slotsort_core::ItemHandle;
use slotsort_inventory::{
    Grid, InMemoryItemCatalog, InventoryConfig, InventorySorter, ItemAttributes, ItemAttributesProvider,
    SortController, SortingRule, SystemConfig,
};

/// Everything one pass needs: rules, pages with their contents, item metadata.
#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(default)]
    system: SystemConfig,
    #[serde(default)]
    rules: Vec<SortingRule>,
    inventories: Vec<PageScenario>,
    #[serde(default)]
    items: Vec<ScenarioItem>,
}

#[derive(Debug, Deserialize)]
struct PageScenario {
    config: InventoryConfig,
    /// Leading slots of the page; the rest are empty.
    #[serde(default)]
    contents: Vec<Option<ItemHandle>>,
}

#[derive(Debug, Deserialize)]
struct ScenarioItem {
    handle: ItemHandle,
    #[serde(flatten)]
    attributes: ItemAttributes,
}

fn build_grid(page: PageScenario) -> anyhow::Result<Grid> {
    let inventory_type = page.config.inventory_type;
    let mut grid = Grid::new(page.config).with_context(|| format!("configuring {inventory_type}"))?;

    let mut contents = page.contents;
    if contents.len() < grid.len() {
        contents.resize(grid.len(), None);
    }
    grid.load_items(&contents)
        .with_context(|| format!("loading contents of {inventory_type}"))?;
    Ok(grid)
}

fn render(grids: &[Grid], controller: &SortController, items: &dyn ItemAttributesProvider) -> String {
    let mut out = String::new();
    for grid in grids {
        let _ = writeln!(out, "{}:", grid.inventory_type());
        for slot in grid.slots() {
            let rule = controller.rule(slot.rule_id());
            let item = match slot.item() {
                Some(handle) => items
                    .attributes(handle)
                    .map(|attrs| attrs.name)
                    .unwrap_or_else(|_| handle.to_string()),
                None => "-".to_string(),
            };
            let _ = writeln!(out, "  [{:>2}] {:<16} {}", slot.position(), rule.name, item);
        }
    }
    out
}

fn main() -> anyhow::Result<()> {
    slotsort_observability::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: slotsort-cli <scenario.json>")?;
    let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let scenario: Scenario = serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))?;

    let controller = SortController::from_rules(scenario.rules)?;

    let mut catalog = InMemoryItemCatalog::new();
    for item in scenario.items {
        catalog.insert(item.handle, item.attributes);
    }

    let mut grids = scenario
        .inventories
        .into_iter()
        .map(build_grid)
        .collect::<anyhow::Result<Vec<_>>>()?;
    let inventory_type = grids
        .first()
        .map(Grid::inventory_type)
        .context("scenario has no inventories")?;

    let sorter = InventorySorter::new(&controller, &catalog, scenario.system);
    let report = sorter
        .sort_inventory_safe(inventory_type, &mut grids)
        .context("sort pass aborted")?;
    tracing::info!(
        inventory = %inventory_type,
        swaps = report.total_swaps(),
        "sort pass finished"
    );

    print!("{}", render(&grids, &controller, &catalog));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotsort_core::SortError;
    use slotsort_inventory::InventoryType;

    const SCENARIO: &str = include_str!("../scenarios/weapons.json");

    #[test]
    fn bundled_scenario_sorts_and_renders() {
        let scenario: Scenario = serde_json::from_str(SCENARIO).unwrap();
        let controller = SortController::from_rules(scenario.rules).unwrap();
        let mut catalog = InMemoryItemCatalog::new();
        for item in scenario.items {
            catalog.insert(item.handle, item.attributes);
        }
        let mut grids: Vec<Grid> = scenario
            .inventories
            .into_iter()
            .map(build_grid)
            .collect::<anyhow::Result<_>>()
            .unwrap();

        let sorter = InventorySorter::new(&controller, &catalog, scenario.system);
        let report = sorter
            .sort_inventory_safe(grids[0].inventory_type(), &mut grids)
            .unwrap();
        assert!(report.total_swaps() > 0);

        let rendered = render(&grids, &controller, &catalog);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 1 + InventoryType::Inventory1.page_size());
        assert_eq!(
            lines[..5],
            [
                "Inventory1:",
                "  [ 0] Weapons          Iron Gladius",
                "  [ 1] Weapons          Bronze Spear",
                "  [ 2] Unsorted         -",
                "  [ 3] Unsorted         Copper Ore",
            ]
        );
        assert!(lines[5..].iter().all(|line| line.ends_with("Unsorted         -")));
    }

    fn saddle_bag(contents: &str) -> PageScenario {
        let unsorted = r#"{"rule_id":"00000000-0000-0000-0000-000000000000"}"#;
        let slot_configs = vec![unsorted; InventoryType::SaddleBag1.page_size()].join(",");
        serde_json::from_str(&format!(
            r#"{{"config":{{"inventory_type":"SaddleBag1","slot_configs":[{slot_configs}]}},"contents":{contents}}}"#
        ))
        .unwrap()
    }

    #[test]
    fn short_contents_are_padded_to_page_size() {
        let grid = build_grid(saddle_bag("[1, null, 2]")).unwrap();
        assert_eq!(grid.len(), 35);
        assert_eq!(grid.item_count(), 2);
        assert_eq!(grid.slot(2).unwrap().item(), Some(ItemHandle::new(2)));
    }

    #[test]
    fn oversized_contents_are_rejected() {
        let contents = format!("[{}]", (1..=36).map(|n| n.to_string()).collect::<Vec<_>>().join(","));
        let err = build_grid(saddle_bag(&contents)).unwrap_err();
        let mismatch = err.downcast_ref::<SortError>().unwrap();
        assert_eq!(*mismatch, SortError::slot_count_mismatch(InventoryType::SaddleBag1, 35, 36));
    }

    #[test]
    fn page_configs_must_cover_the_whole_page() {
        let page: PageScenario = serde_json::from_str(
            r#"{"config":{"inventory_type":"SaddleBag1","slot_configs":[{"rule_id":"00000000-0000-0000-0000-000000000000"}]},"contents":[1]}"#,
        )
        .unwrap();
        let err = build_grid(page).unwrap_err();
        assert_eq!(
            *err.downcast_ref::<SortError>().unwrap(),
            SortError::slot_count_mismatch(InventoryType::SaddleBag1, 35, 1)
        );
    }
}
