use super::grouping::ResourceGroup;
use crate::model::LayoutConfig;

/// Vertical offsets for one resource block, parallel to its item list.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRows {
    /// Top of the resource header row.
    pub header_offset: f32,
    /// Top of each item row, in sorted item order.
    pub item_offsets: Vec<f32>,
}

/// Row offsets for every group plus the total height they consume.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowLayout {
    pub resources: Vec<ResourceRows>,
    pub total_height: f32,
}

/// Single forward accumulation: header row, then each item row, per resource.
pub fn assign_rows(groups: &[ResourceGroup], config: &LayoutConfig) -> RowLayout {
    let mut cursor = 0.0_f32;
    let mut resources = Vec::with_capacity(groups.len());

    for group in groups {
        let header_offset = cursor;
        cursor += config.resource_header_height;

        let item_offsets = group
            .items
            .iter()
            .map(|_| {
                let offset = cursor;
                cursor += config.item_row_height;
                offset
            })
            .collect();

        resources.push(ResourceRows {
            header_offset,
            item_offsets,
        });
    }

    RowLayout {
        resources,
        total_height: cursor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::grouping::ItemGroup;
    use crate::model::ItemCategory;

    fn group(id: &str, items: usize) -> ResourceGroup {
        ResourceGroup {
            resource_id: id.into(),
            resource_name: id.into(),
            items: (0..items)
                .map(|i| ItemGroup {
                    name: format!("item {}", i),
                    category: ItemCategory::Machine,
                    total_hours: 0.0,
                    segments: Vec::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_offsets_accumulate_in_group_order() {
        let config = LayoutConfig::default(); // header 36, item 28
        let rows = assign_rows(&[group("a", 2), group("b", 1)], &config);

        assert_eq!(rows.resources[0].header_offset, 0.0);
        assert_eq!(rows.resources[0].item_offsets, vec![36.0, 64.0]);
        assert_eq!(rows.resources[1].header_offset, 92.0);
        assert_eq!(rows.resources[1].item_offsets, vec![128.0]);
        assert_eq!(rows.total_height, 156.0);
    }

    #[test]
    fn test_no_groups_no_height() {
        let rows = assign_rows(&[], &LayoutConfig::default());
        assert!(rows.resources.is_empty());
        assert_eq!(rows.total_height, 0.0);
    }
}
