//! Plain-text rendering of profile lists

use std::fmt::Write as _;

use crate::models::ProfileSet;

/// Formats profiles as an aligned table
#[must_use]
pub fn format_table(profiles: &ProfileSet) -> String {
    if profiles.is_empty() {
        return "No saved profiles.".to_string();
    }

    let name_width = column_width(profiles.iter().map(|p| p.name.len()), 4);
    let host_width = column_width(profiles.iter().map(|p| p.host.len()), 4);
    let user_width = column_width(profiles.iter().map(|p| p.user.len()), 4);
    let port_width = 5;

    let mut output = String::new();
    let _ = writeln!(
        output,
        "{:<name_width$}  {:<host_width$}  {:<user_width$}  {:<port_width$}  KEY",
        "NAME", "HOST", "USER", "PORT"
    );
    let _ = writeln!(
        output,
        "{:-<name_width$}  {:-<host_width$}  {:-<user_width$}  {:-<port_width$}  ---",
        "", "", "", ""
    );

    for profile in profiles.iter() {
        let key = profile
            .key_path
            .as_ref()
            .map_or_else(|| "-".to_string(), |k| k.display().to_string());
        let _ = writeln!(
            output,
            "{:<name_width$}  {:<host_width$}  {:<user_width$}  {:<port_width$}  {}",
            profile.name, profile.host, profile.user, profile.port, key
        );
    }

    output.trim_end().to_string()
}

fn column_width(lengths: impl Iterator<Item = usize>, header: usize) -> usize {
    lengths.max().unwrap_or(header).max(header)
}

/// Formats profiles as a numbered selection list starting at 1
#[must_use]
pub fn format_choices(profiles: &ProfileSet) -> String {
    let mut output = String::new();
    for (i, profile) in profiles.iter().enumerate() {
        let _ = writeln!(output, "{}. {profile}", i + 1);
    }
    output
}
