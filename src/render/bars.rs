use crate::models::{PLACEHOLDER, RepCount};
use crate::targets::{BarList, BarRow};

/// Width of a bar as a whole percentage of the track.
pub fn bar_width_percent(count: u64, scale: u64) -> u32 {
    let scale = scale.max(1) as f64;
    ((count as f64 / scale) * 100.0).round() as u32
}

pub(super) fn draw(list: &mut BarList, rows: &[RepCount]) {
    list.clear();
    let scale = rows.iter().map(RepCount::count).max().unwrap_or(0).max(1);
    for row in rows {
        let count = row.count();
        let label = match row.label.as_deref() {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => PLACEHOLDER.to_string(),
        };
        list.push(BarRow {
            label,
            width_percent: bar_width_percent(count, scale),
            title: count.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rep(label: &str, count: u64) -> RepCount {
        RepCount {
            label: Some(label.to_string()),
            count: Some(count),
        }
    }

    #[test]
    fn widths_are_relative_to_largest() {
        let mut list = BarList::default();
        draw(&mut list, &[rep("Alice", 3), rep("Bob", 6), rep("Cara", 0)]);
        let widths: Vec<u32> = list.rows().iter().map(|row| row.width_percent).collect();
        assert_eq!(widths, vec![50, 100, 0]);
        assert_eq!(list.rows()[0].title, "3");
    }

    #[test]
    fn widths_round_to_nearest_percent() {
        assert_eq!(bar_width_percent(1, 3), 33);
        assert_eq!(bar_width_percent(2, 3), 67);
    }

    #[test]
    fn all_zero_counts_do_not_divide_by_zero() {
        let mut list = BarList::default();
        draw(&mut list, &[rep("Alice", 0), RepCount::default()]);
        assert!(list.rows().iter().all(|row| row.width_percent == 0));
        assert_eq!(list.rows()[1].label, PLACEHOLDER);
    }

    #[test]
    fn input_order_is_kept() {
        let mut list = BarList::default();
        draw(&mut list, &[rep("Zed", 1), rep("Amy", 9)]);
        let labels: Vec<&str> = list.rows().iter().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, vec!["Zed", "Amy"]);
    }
}
