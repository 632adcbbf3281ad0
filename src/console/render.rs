use crate::domain_model::{REPORT_HEADERS, UserReport};

pub const NO_USERS: &str = "No users in the system.";

/// Renders the all-users dump as a grid table with multi-line cells.
pub fn render_users_table(reports: &[UserReport]) -> String {
    if reports.is_empty() {
        return format!("{NO_USERS}\n");
    }

    let header: Vec<String> = REPORT_HEADERS.iter().map(|h| h.to_string()).collect();
    let rows: Vec<Vec<String>> = reports.iter().map(|r| r.cells().to_vec()).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            let longest = cell.lines().map(|l| l.chars().count()).max().unwrap_or(0);
            *width = (*width).max(longest);
        }
    }

    let mut out = String::new();
    out.push_str(&rule(&widths, '-'));
    out.push_str(&row_lines(&widths, &header));
    out.push_str(&rule(&widths, '='));
    for row in &rows {
        out.push_str(&row_lines(&widths, row));
        out.push_str(&rule(&widths, '-'));
    }
    out
}

pub fn render_users_json(reports: &[UserReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}

fn rule(widths: &[usize], fill: char) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.extend(std::iter::repeat_n(fill, width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn row_lines(widths: &[usize], cells: &[String]) -> String {
    let split: Vec<Vec<&str>> = cells.iter().map(|c| c.lines().collect()).collect();
    let height = split.iter().map(|lines| lines.len()).max().unwrap_or(0).max(1);

    let mut out = String::new();
    for i in 0..height {
        out.push('|');
        for (width, lines) in widths.iter().zip(&split) {
            let text = lines.get(i).copied().unwrap_or("");
            let pad = width - text.chars().count();
            out.push(' ');
            out.push_str(text);
            out.extend(std::iter::repeat_n(' ', pad + 1));
            out.push('|');
        }
        out.push('\n');
    }
    out
}
