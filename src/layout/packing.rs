use super::*;

/// Horizontal footprint of one cycle as seen by the row packer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackItem {
    pub start_x: f32,
    pub end_x: f32,
    pub label_width: f32,
}

impl PackItem {
    pub fn effective_start_x(&self) -> f32 {
        self.start_x - self.label_width
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSlot {
    pub row: usize,
    pub start_x: f32,
    pub end_x: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowPacking {
    /// One slot per input item, in input order.
    pub slots: Vec<RowSlot>,
    pub row_count: usize,
}

/// `char_width * chars + padding` for named cycles, zero otherwise.
pub fn estimate_label_width(name: &str, config: &LayoutConfig) -> f32 {
    let name = name.trim();
    if name.is_empty() {
        return 0.0;
    }
    name.chars().count() as f32 * config.label_char_width + config.label_padding
}

pub fn conference_height(row_count: usize, config: &LayoutConfig) -> f32 {
    if row_count == 0 {
        return 0.0;
    }
    row_count as f32 * config.bar_height + (row_count - 1) as f32 * config.inter_row_padding
}

/// Greedy first-fit row assignment.
///
/// Each row only remembers the right edge of the last cycle placed in it. An
/// item goes into the first row whose right edge is at or before the item's
/// effective start; otherwise a new row is opened. With
/// [`PackingOrder::Dataset`] items are visited in input order, which is
/// deterministic but not guaranteed minimal. [`PackingOrder::StartTime`]
/// visits them by effective start (stable), which yields the minimum number
/// of rows for interval packing.
pub fn pack_rows(items: &[PackItem], order: PackingOrder) -> RowPacking {
    let mut visit: Vec<usize> = (0..items.len()).collect();
    if order == PackingOrder::StartTime {
        visit.sort_by(|&a, &b| {
            items[a]
                .effective_start_x()
                .total_cmp(&items[b].effective_start_x())
        });
    }

    let mut row_ends: Vec<f32> = Vec::new();
    let mut rows = vec![0usize; items.len()];
    for idx in visit {
        let item = &items[idx];
        let effective_start = item.effective_start_x();
        let row = match row_ends.iter().position(|&end| end <= effective_start) {
            Some(row) => {
                row_ends[row] = item.end_x;
                row
            }
            None => {
                row_ends.push(item.end_x);
                row_ends.len() - 1
            }
        };
        rows[idx] = row;
    }

    let slots = items
        .iter()
        .zip(rows)
        .map(|(item, row)| RowSlot {
            row,
            start_x: item.start_x,
            end_x: item.end_x,
        })
        .collect();
    RowPacking {
        slots,
        row_count: row_ends.len(),
    }
}
