//! Plain-text Gantt chart drawn from a computed layout.

use planline_core::storage::ChartConfig;
use planline_core::{Item, Layout};

const PROGRESS_CELL: char = '#';
const BAR_CELL: char = '=';
const EMPTY_CELL: char = ' ';
const TODAY_CELL: char = '|';

/// Render the header row plus one row per item.
pub fn render(items: &[Item], layout: &Layout, config: &ChartConfig) -> String {
    let label_width = config.label_width as usize;
    let unit_width = config.unit_width(layout.granularity).max(1) as usize;
    let grid_width = unit_width * layout.bucket_count();
    let today_col = layout
        .today_fraction
        .filter(|_| config.show_today)
        .map(|f| ((f * grid_width as f64) as usize).min(grid_width.saturating_sub(1)));

    let mut out = String::new();
    out.push_str(&fit(String::new(), label_width));
    for bucket in &layout.buckets {
        out.push_str(&fit(bucket.label.clone(), unit_width));
    }
    out.push('\n');

    if items.is_empty() {
        out.push_str("No items to display\n");
        return out;
    }

    for item in items {
        let mut cells = vec![EMPTY_CELL; grid_width];
        let mut suffix = String::new();

        if let Some(bar) = layout.bar(item) {
            let from = (bar.left * grid_width as f64).round() as usize;
            let to = ((bar.left + bar.width) * grid_width as f64).round() as usize;
            let to = to.clamp(from + 1, grid_width);
            let filled = ((to - from) as f64 * bar.progress / 100.0).round() as usize;
            for (offset, cell) in cells[from..to].iter_mut().enumerate() {
                *cell = if offset < filled { PROGRESS_CELL } else { BAR_CELL };
            }
            suffix = format!(" {}%", bar.progress.round());
        }
        if let Some(col) = today_col {
            if cells[col] == EMPTY_CELL {
                cells[col] = TODAY_CELL;
            }
        }

        out.push_str(&fit(item.label.clone(), label_width));
        out.extend(cells);
        out.push_str(&suffix);
        out.push('\n');
    }

    out
}

/// Pad or truncate `text` to exactly `width` characters, keeping a space
/// between columns.
fn fit(text: String, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let mut fitted: String = text.chars().take(width - 1).collect();
    let len = fitted.chars().count();
    fitted.extend(std::iter::repeat(' ').take(width - len));
    fitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use planline_core::{Granularity, LayoutEngine};

    fn config() -> ChartConfig {
        ChartConfig {
            label_width: 8,
            unit_width_day: 2,
            unit_width_week: 4,
            unit_width_month: 10,
            show_today: true,
        }
    }

    #[test]
    fn draws_bars_with_progress() {
        let items = vec![
            Item::new(
                "a",
                "Design",
                Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap(),
            )
            .with_progress(50.0),
            Item::new(
                "b",
                "Implementation",
                Utc.with_ymd_and_hms(2025, 2, 3, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2025, 2, 9, 0, 0, 0).unwrap(),
            ),
        ];
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let layout = LayoutEngine::new(Utc).compute(&items, Granularity::Month, now);
        let text = render(&items, &layout, &config());
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "        Jan 2025  Feb 2025  ");
        assert_eq!(lines[1], "Design  #####=====           50%");
        assert_eq!(lines[2], "Impleme           ========== 0%");
    }

    #[test]
    fn marks_today_column_in_empty_cells() {
        let day = |d| Utc.with_ymd_and_hms(2025, 1, d, 0, 0, 0).unwrap();
        let items = vec![
            Item::new("a", "Kickoff", day(6), day(6)),
            Item::new("b", "Review", day(9), day(9)),
        ];
        // four day columns of width 2; Jan 7 00:00 starts the second one
        let layout = LayoutEngine::new(Utc).compute(&items, Granularity::Day, day(7));
        let text = render(&items, &layout, &config());
        let rows: Vec<_> = text.lines().skip(1).collect();
        assert_eq!(rows, ["Kickoff ==|      0%", "Review    |   == 0%"]);

        let mut hidden = config();
        hidden.show_today = false;
        assert!(!render(&items, &layout, &hidden).contains(TODAY_CELL));
    }

    #[test]
    fn empty_items_render_placeholder() {
        let now = Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap();
        let layout = LayoutEngine::new(Utc).compute(&[], Granularity::Month, now);
        let text = render(&[], &layout, &config());
        assert!(text.contains("Jan 2025"));
        assert!(text.ends_with("No items to display\n"));
    }

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit("abc".into(), 5), "abc  ");
        assert_eq!(fit("abcdef".into(), 4), "abc ");
        assert_eq!(fit("abc".into(), 0), "");
    }
}
