//! Level validation report for the `check` command.

use serde::Serialize;
use strictly_sokoban::{Level, Session, Tile};
use tracing::{instrument, warn};

/// What `check` found out about one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelReport {
    /// Level name.
    pub name: String,
    /// Grid width, zero if the level failed to load.
    pub width: usize,
    /// Grid height, zero if the level failed to load.
    pub height: usize,
    /// Boxes not yet on a goal.
    pub loose_boxes: usize,
    /// Every goal, covered or not.
    pub goals: usize,
    /// Already solved as written.
    pub solved: bool,
    /// Why the level cannot be played.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LevelReport {
    /// True if a session could be built from the level.
    pub fn is_playable(&self) -> bool {
        self.error.is_none()
    }
}

/// Builds a session from each level and reports what it looks like.
#[instrument(skip_all, fields(count = levels.len()))]
pub fn check_levels(levels: &[Level]) -> Vec<LevelReport> {
    levels.iter().map(check_level).collect()
}

fn check_level(level: &Level) -> LevelReport {
    match Session::new(level.layout()) {
        Ok(session) => {
            let board = session.board();
            LevelReport {
                name: level.name().clone(),
                width: board.width(),
                height: board.height(),
                loose_boxes: board.count(Tile::BOX),
                goals: board.count_with(Tile::GOAL),
                solved: session.is_won(),
                error: None,
            }
        }
        Err(e) => {
            warn!(level = %level.name(), error = %e, "Level failed to load");
            LevelReport {
                name: level.name().clone(),
                width: 0,
                height: 0,
                loose_boxes: 0,
                goals: 0,
                solved: false,
                error: Some(e.kind().to_string()),
            }
        }
    }
}

/// Formats the reports as a plain-text table.
pub fn format_table(reports: &[LevelReport]) -> String {
    let name_width = reports
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0)
        .max("level".len());

    let mut out = format!(
        "{:<name_width$}  {:>5}  {:>5}  {:>5}  status\n",
        "level", "size", "boxes", "goals"
    );
    for report in reports {
        let status = match (&report.error, report.solved) {
            (Some(error), _) => format!("error: {}", error),
            (None, true) => "already solved".to_string(),
            (None, false) => "ok".to_string(),
        };
        let size = format!("{}x{}", report.width, report.height);
        out.push_str(&format!(
            "{:<name_width$}  {:>5}  {:>5}  {:>5}  {}\n",
            report.name, size, report.loose_boxes, report.goals, status
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let levels = vec![
            Level::new("one", "#####\n#@$.#\n#####"),
            Level::new("done", "#@*#"),
            Level::new("broken", "#@x#"),
        ];
        let reports = check_levels(&levels);

        assert_eq!(reports[0].width, 5);
        assert_eq!(reports[0].height, 3);
        assert_eq!(reports[0].loose_boxes, 1);
        assert_eq!(reports[0].goals, 1);
        assert!(!reports[0].solved);
        assert!(reports[0].is_playable());

        assert!(reports[1].solved);
        assert_eq!(reports[1].goals, 1);

        assert!(!reports[2].is_playable());
        assert!(reports[2].error.as_deref().unwrap().contains('x'));
    }

    #[test]
    fn test_table_lists_every_level() {
        let reports = check_levels(&[Level::new("first", "#@$.#"), Level::new("bad", "")]);
        let table = format_table(&reports);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("first"));
        assert!(lines[1].ends_with("ok"));
        assert!(lines[2].contains("error:"));
    }

    #[test]
    fn test_table_pads_to_longest_name() {
        let reports = check_levels(&[
            Level::new("a", "#@$.#"),
            Level::new("warehouse", "#@*#"),
        ]);
        let table = format_table(&reports);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "level       size  boxes  goals  status");
        assert_eq!(lines[1], "a            5x1      1      1  ok");
        assert_eq!(lines[2], "warehouse    4x1      0      1  already solved");
        assert!(table.ends_with('\n'));
    }

    #[test]
    fn test_json_omits_missing_error() {
        let reports = check_levels(&[Level::new("first", "#@$.#")]);
        let json = serde_json::to_value(&reports).unwrap();
        assert_eq!(json[0]["name"], "first");
        assert!(json[0].get("error").is_none());
    }
}
