//! Dense ordering of child collections (gallery images, menu items).

use crate::domain::types::DisplayOrder;

/// Sort submitted items by their requested position and renumber them `1..=n`.
///
/// Items without a requested position are placed after all positioned items.
/// Ties (including all unpositioned items) keep their submission order.
pub fn assign_dense_order<T>(items: Vec<(Option<i32>, T)>) -> Vec<(DisplayOrder, T)> {
    let mut indexed = items
        .into_iter()
        .enumerate()
        .map(|(position, (requested, item))| (requested.is_none(), requested, position, item))
        .collect::<Vec<_>>();

    indexed.sort_by_key(|(unpositioned, requested, position, _)| {
        (*unpositioned, requested.unwrap_or_default(), *position)
    });

    indexed
        .into_iter()
        .zip(1..)
        .filter_map(|((_, _, _, item), order)| DisplayOrder::new(order).ok().map(|o| (o, item)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders<T: Clone>(items: &[(DisplayOrder, T)]) -> Vec<(i32, T)> {
        items
            .iter()
            .map(|(order, item)| (order.get(), item.clone()))
            .collect()
    }

    #[test]
    fn renumbers_sparse_positions() {
        let result = assign_dense_order(vec![(Some(10), "b"), (Some(3), "a"), (Some(42), "c")]);
        assert_eq!(orders(&result), vec![(1, "a"), (2, "b"), (3, "c")]);
    }

    #[test]
    fn keeps_submission_order_for_ties() {
        let result = assign_dense_order(vec![(Some(1), "first"), (Some(1), "second")]);
        assert_eq!(orders(&result), vec![(1, "first"), (2, "second")]);
    }

    #[test]
    fn unpositioned_items_go_last() {
        let result = assign_dense_order(vec![(None, "x"), (Some(5), "a"), (None, "y")]);
        assert_eq!(orders(&result), vec![(1, "a"), (2, "x"), (3, "y")]);
    }

    #[test]
    fn negative_positions_sort_first() {
        let result = assign_dense_order(vec![(Some(0), "b"), (Some(-1), "a")]);
        assert_eq!(orders(&result), vec![(1, "a"), (2, "b")]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let result: Vec<(DisplayOrder, ())> = assign_dense_order(Vec::new());
        assert!(result.is_empty());
    }
}
