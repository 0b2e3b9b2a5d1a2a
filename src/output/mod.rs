pub mod formatter;

pub use formatter::{
    format_delta, format_hand, format_line_score, format_points, format_standings,
    should_use_colors, standings_entries, truncate_name, StandingsEntry,
};
