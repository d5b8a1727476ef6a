// ABOUTME: Catalog command for atlas-cli
// ABOUTME: Lists exercises and meals with difficulty, equipment, macros and tags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::display::heading;
use anyhow::{anyhow, Result};
use atlas_coach::config::ServerConfig;
use atlas_core::models::{CatalogItem, ItemCategory};

fn describe(item: &CatalogItem) -> String {
    let tags: Vec<&str> = item.tags.iter().map(String::as_str).collect();
    let detail = match (item.category, item.macros) {
        (ItemCategory::Meal, Some(m)) => {
            format!("{:.0} kcal, {:.0} g protein", m.calories, m.protein_g)
        }
        _ if item.is_bodyweight() => format!("difficulty {:.0}, bodyweight", item.difficulty),
        _ => format!(
            "difficulty {:.0}, needs {}",
            item.difficulty,
            item.equipment.join(", ")
        ),
    };
    format!("{:<28} {:<32} [{}]", item.name, detail, tags.join(", "))
}

/// Print catalog items, optionally filtered
pub fn list(config: &ServerConfig, category: Option<&str>, tag: Option<&str>) -> Result<()> {
    let category = category
        .map(|value| {
            ItemCategory::parse(value)
                .ok_or_else(|| anyhow!("unknown category '{value}' (exercise or meal)"))
        })
        .transpose()?;
    let tag = tag.map(|t| t.trim().to_lowercase());
    let catalog = config.load_catalog()?;

    for current in [ItemCategory::Exercise, ItemCategory::Meal] {
        if category.is_some_and(|c| c != current) {
            continue;
        }
        let items: Vec<&CatalogItem> = catalog
            .by_category(current)
            .filter(|item| tag.as_deref().is_none_or(|t| item.has_tag(t)))
            .collect();
        heading(&format!("{} ({})", current.as_str(), items.len()));
        for item in items {
            println!("{}", describe(item));
        }
    }
    Ok(())
}
