/// Round-robin stripe for one lane: the elements at positions
/// `rank, rank + lanes, rank + 2 * lanes, ...`. Requires `lanes >= 1`.
pub fn stripe<T: Clone>(items: &[T], rank: usize, lanes: usize) -> Vec<T> {
    items.iter().skip(rank).step_by(lanes).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stripes_cover_input_exactly_once() {
        let items: Vec<usize> = (0..23).collect();
        for lanes in 1..=7 {
            let mut seen = vec![];
            for rank in 0..lanes {
                for value in stripe(&items, rank, lanes) {
                    assert_eq!(value % lanes, rank);
                    seen.push(value);
                }
            }
            seen.sort_unstable();
            assert_eq!(seen, items);
        }
    }

    #[test]
    fn eight_items_over_three_lanes() {
        let urls: Vec<String> = (0..8).map(|i| format!("u{i}")).collect();
        assert_eq!(stripe(&urls, 0, 3), ["u0", "u3", "u6"]);
        assert_eq!(stripe(&urls, 1, 3), ["u1", "u4", "u7"]);
        assert_eq!(stripe(&urls, 2, 3), ["u2", "u5"]);
    }

    #[test]
    fn surplus_lanes_get_empty_stripes() {
        let items = [1, 2];
        assert_eq!(stripe(&items, 0, 5), [1]);
        assert_eq!(stripe(&items, 1, 5), [2]);
        for rank in 2..5 {
            assert!(stripe(&items, rank, 5).is_empty());
        }
    }

    #[test]
    fn single_lane_keeps_order() {
        let items = ["a", "b", "c"];
        assert_eq!(stripe(&items, 0, 1), items);
    }

    #[test]
    fn empty_input_yields_empty_stripes() {
        let items: [u8; 0] = [];
        for rank in 0..4 {
            assert!(stripe(&items, rank, 4).is_empty());
        }
    }
}
