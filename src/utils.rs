/// Index of the seat after `index` around a table of `len` seats.
pub fn index_after(index: usize, len: usize) -> usize {
    (index + 1) % len
}

/// Rotates `items` so the element at `start` comes first, wrapping the
/// earlier elements around to the end.
pub fn rotate_from<T: Clone>(items: &[T], start: usize) -> Vec<T> {
    if items.is_empty() {
        return vec![];
    }
    let start = start % items.len();
    items[start..]
        .iter()
        .chain(items[..start].iter())
        .cloned()
        .collect()
}

/// Formats a score delta with an explicit sign ("+13", "-13", "+0").
pub fn with_sign(value: i32) -> String {
    if value >= 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

/// Orders players for a two column dealer picking grid so that reading the
/// grid row by row walks around the table: index 0, 1, -1, 2, -2, ...
pub fn order_into_grid_circle<T: Clone>(items: &[T]) -> Vec<T> {
    let len = items.len() as isize;
    let lookup = |index: isize| {
        let wrapped = if index < 0 { len + index } else { index };
        usize::try_from(wrapped).ok().and_then(|i| items.get(i))
    };
    let mut left: isize = 0;
    let mut right: isize = 1;
    let mut ordered = Vec::with_capacity(items.len());
    while ordered.len() < items.len() {
        if let Some(item) = lookup(left) {
            ordered.push(item.clone());
        }
        left -= 1;
        if ordered.len() < items.len() {
            if let Some(item) = lookup(right) {
                ordered.push(item.clone());
            }
            right += 1;
        }
    }
    ordered
}

/// Adds up scores, pinning the result at the `i32` bounds instead of
/// overflowing. Edited bids are not capped, so totals can get arbitrarily large.
pub fn saturating_sum(values: impl IntoIterator<Item = i32>) -> i32 {
    values.into_iter().fold(0, i32::saturating_add)
}

/// Places a copy of `separator` between each pair of neighbouring items.
pub fn fill_with<T: Clone>(items: Vec<T>, separator: T) -> Vec<T> {
    let mut filled = Vec::with_capacity(items.len() * 2);
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            filled.push(separator.clone());
        }
        filled.push(item);
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturating_sum() {
        assert_eq!(saturating_sum([13, -11, 12]), 14);
        assert_eq!(saturating_sum(Vec::new()), 0);
        assert_eq!(saturating_sum([i32::MAX, 10]), i32::MAX);
        assert_eq!(saturating_sum([-i32::MAX, -10]), i32::MIN);
    }

    #[test]
    fn test_index_after_wraps() {
        assert_eq!(index_after(0, 4), 1);
        assert_eq!(index_after(3, 4), 0);
    }

    #[test]
    fn test_rotate_from() {
        assert_eq!(rotate_from(&["a", "b", "c", "d"], 2), vec!["c", "d", "a", "b"]);
        assert_eq!(rotate_from(&["a", "b", "c"], 0), vec!["a", "b", "c"]);
        assert_eq!(rotate_from(&["a", "b", "c"], 3), vec!["a", "b", "c"]);
        assert!(rotate_from::<i32>(&[], 1).is_empty());
    }

    #[test]
    fn test_with_sign() {
        assert_eq!(with_sign(13), "+13");
        assert_eq!(with_sign(0), "+0");
        assert_eq!(with_sign(-13), "-13");
    }

    #[test]
    fn test_order_into_grid_circle_odd() {
        assert_eq!(
            order_into_grid_circle(&["A", "B", "C", "D", "E"]),
            vec!["A", "B", "E", "C", "D"]
        );
    }

    #[test]
    fn test_order_into_grid_circle_even() {
        assert_eq!(
            order_into_grid_circle(&["A", "B", "C", "D"]),
            vec!["A", "B", "D", "C"]
        );
        assert_eq!(
            order_into_grid_circle(&["A", "B", "C", "D", "E", "F"]),
            vec!["A", "B", "F", "C", "E", "D"]
        );
    }

    #[test]
    fn test_order_into_grid_circle_small() {
        assert_eq!(order_into_grid_circle(&["A"]), vec!["A"]);
        assert_eq!(order_into_grid_circle(&["A", "B"]), vec!["A", "B"]);
        assert!(order_into_grid_circle::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_fill_with() {
        assert_eq!(fill_with(vec![1, 2], 0), vec![1, 0, 2]);
        assert_eq!(fill_with(vec![1, 2, 3], 0), vec![1, 0, 2, 0, 3]);
        assert_eq!(fill_with(vec![1], 0), vec![1]);
    }
}
