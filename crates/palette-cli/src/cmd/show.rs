//! Config subcommand - print the resolved configuration

use anyhow::Result;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use crate::config::Config;

fn rows(config: &Config) -> Vec<(&'static str, String)> {
    vec![
        ("Base URL", config.source.base_url.clone()),
        ("Total", config.fetch.total.to_string()),
        ("Page size", config.fetch.page_size.to_string()),
        (
            "Colors",
            format!("{}..={}", config.fetch.min_colors, config.fetch.max_colors),
        ),
        ("Output", config.output.path.display().to_string()),
        ("Pretty", config.output.pretty.to_string()),
        ("Connect timeout", format!("{}s", config.http.connect_timeout)),
        ("Request timeout", format!("{}s", config.http.request_timeout)),
    ]
}

pub fn run(config: &Config) -> Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Setting").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);
    for (label, value) in rows(config) {
        table.add_row(vec![label.to_string(), value]);
    }
    eprintln!("\n{table}");
    Ok(())
}
