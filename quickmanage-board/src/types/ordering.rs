//! Ordering helpers shared by canonical and presentation column sets.
//!
//! Column orders may contain gaps (deleting a column never renumbers the
//! rest), so every helper here works on sorted `order` values rather than on
//! vector positions.

use super::ids::ColumnId;
use serde::{Deserialize, Serialize};

/// Anything that sits in a left-to-right column set
pub trait BoardColumn {
    fn id(&self) -> &ColumnId;
    fn title(&self) -> &str;
    fn set_title(&mut self, title: String);
    fn order(&self) -> usize;
    fn set_order(&mut self, order: usize);
}

/// Horizontal direction for column moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

/// Order for a column appended to `columns`.
///
/// Equals the column count when orders are contiguous, and stays unique when
/// deletions have left gaps.
pub fn next_order<C: BoardColumn>(columns: &[C]) -> usize {
    columns
        .iter()
        .map(BoardColumn::order)
        .max()
        .map(|o| o + 1)
        .unwrap_or(0)
}

/// Indices of `columns` sorted by `order` (stable for equal orders)
pub fn indices_by_order<C: BoardColumn>(columns: &[C]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..columns.len()).collect();
    indices.sort_by_key(|&i| columns[i].order());
    indices
}

/// Swap the `order` of column `id` with its neighbour in `direction`.
///
/// Returns false when the id is unknown or the column already sits at that
/// edge.
pub fn swap_with_neighbor<C: BoardColumn>(
    columns: &mut [C],
    id: &ColumnId,
    direction: Direction,
) -> bool {
    let sorted = indices_by_order(columns);
    let Some(rank) = sorted.iter().position(|&i| columns[i].id() == id) else {
        return false;
    };

    let neighbor_rank = match direction {
        Direction::Left if rank > 0 => rank - 1,
        Direction::Right if rank + 1 < sorted.len() => rank + 1,
        _ => return false,
    };

    let (a, b) = (sorted[rank], sorted[neighbor_rank]);
    let order_a = columns[a].order();
    let order_b = columns[b].order();
    columns[a].set_order(order_b);
    columns[b].set_order(order_a);
    true
}

/// Insert `item` at `index` clamped to `[0, len]`; returns the index used.
pub fn insert_clamped<T>(items: &mut Vec<T>, index: usize, item: T) -> usize {
    let index = index.min(items.len());
    items.insert(index, item);
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Column;

    fn columns(orders: &[usize]) -> Vec<Column> {
        orders
            .iter()
            .enumerate()
            .map(|(i, &order)| Column::with_id(format!("c{i}"), format!("Col {i}"), order))
            .collect()
    }

    #[test]
    fn test_next_order() {
        assert_eq!(next_order::<Column>(&[]), 0);
        assert_eq!(next_order(&columns(&[0, 1, 2])), 3);
        // a gap left by a deletion never produces a duplicate
        assert_eq!(next_order(&columns(&[1, 2])), 3);
    }

    #[test]
    fn test_swap_right_and_left() {
        let mut cols = columns(&[0, 1, 2]);
        assert!(swap_with_neighbor(&mut cols, &ColumnId::from("c0"), Direction::Right));
        assert_eq!(cols[0].order, 1);
        assert_eq!(cols[1].order, 0);

        assert!(swap_with_neighbor(&mut cols, &ColumnId::from("c0"), Direction::Left));
        assert_eq!(cols[0].order, 0);
        assert_eq!(cols[1].order, 1);
    }

    #[test]
    fn test_swap_at_edges_is_noop() {
        let mut cols = columns(&[0, 1, 2]);
        assert!(!swap_with_neighbor(&mut cols, &ColumnId::from("c0"), Direction::Left));
        assert!(!swap_with_neighbor(&mut cols, &ColumnId::from("c2"), Direction::Right));
        assert!(!swap_with_neighbor(&mut cols, &ColumnId::from("nope"), Direction::Right));
        assert_eq!(
            cols.iter().map(|c| c.order).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_swap_uses_sorted_order_not_position() {
        // stored out of display order, with a gap
        let mut cols = columns(&[4, 0, 2]);
        assert!(swap_with_neighbor(&mut cols, &ColumnId::from("c1"), Direction::Right));
        assert_eq!(cols[1].order, 2);
        assert_eq!(cols[2].order, 0);
        assert_eq!(cols[0].order, 4);
    }

    #[test]
    fn test_insert_clamped() {
        let mut items = vec![1, 2];
        assert_eq!(insert_clamped(&mut items, 99, 3), 2);
        assert_eq!(insert_clamped(&mut items, 0, 0), 0);
        assert_eq!(items, vec![0, 1, 2, 3]);
    }
}
