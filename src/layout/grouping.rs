//! Resource grouping: resource → item rows with deduplicated hour totals.

use std::collections::{HashMap, HashSet};

use crate::model::{ItemCategory, ScheduledTaskSegment};

/// One machine or software line under a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemGroup {
    pub name: String,
    /// Category of the first segment seen for this item.
    pub category: ItemCategory,
    /// Sum of `total_hours` over the distinct logical tasks of this item.
    pub total_hours: f32,
    pub segments: Vec<ScheduledTaskSegment>,
}

/// All rows belonging to one trainer.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceGroup {
    pub resource_id: String,
    pub resource_name: String,
    pub items: Vec<ItemGroup>,
}

impl ResourceGroup {
    /// Deduplicated hours across every item of this resource.
    pub fn total_hours(&self) -> f32 {
        self.items.iter().map(|item| item.total_hours).sum()
    }

    pub fn segments(&self) -> impl Iterator<Item = &ScheduledTaskSegment> {
        self.items.iter().flat_map(|item| item.segments.iter())
    }
}

/// Partition segments by resource, then by item name.
///
/// Resources keep their first-seen order. Items inside a resource are sorted
/// machines first (unknown counts as machine), then software, and by
/// case-insensitive name within a category.
pub fn group_segments(segments: &[ScheduledTaskSegment]) -> Vec<ResourceGroup> {
    let mut groups: Vec<ResourceGroup> = Vec::new();
    let mut resource_index: HashMap<&str, usize> = HashMap::new();
    // (resource, item) -> position in that resource's item list
    let mut item_index: HashMap<(&str, &str), usize> = HashMap::new();

    for segment in segments {
        let group_pos = *resource_index
            .entry(segment.resource_id.as_str())
            .or_insert_with(|| {
                groups.push(ResourceGroup {
                    resource_id: segment.resource_id.clone(),
                    resource_name: segment.resource_name.clone(),
                    items: Vec::new(),
                });
                groups.len() - 1
            });
        let group = &mut groups[group_pos];

        let item_pos = *item_index
            .entry((segment.resource_id.as_str(), segment.item_name.as_str()))
            .or_insert_with(|| {
                group.items.push(ItemGroup {
                    name: segment.item_name.clone(),
                    category: segment.item_category,
                    total_hours: 0.0,
                    segments: Vec::new(),
                });
                group.items.len() - 1
            });
        group.items[item_pos].segments.push(segment.clone());
    }

    for group in &mut groups {
        for item in &mut group.items {
            item.total_hours = deduplicated_hours(&item.segments);
        }
        group.items.sort_by(|a, b| {
            a.category
                .sort_rank()
                .cmp(&b.category.sort_rank())
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
                .then_with(|| a.name.cmp(&b.name))
        });
    }

    groups
}

/// Count each logical task's `total_hours` once, however many slices it has.
pub fn deduplicated_hours(segments: &[ScheduledTaskSegment]) -> f32 {
    let mut seen: HashSet<&str> = HashSet::new();
    segments
        .iter()
        .filter(|segment| seen.insert(segment.task_key()))
        .map(|segment| segment.total_hours)
        .sum()
}
