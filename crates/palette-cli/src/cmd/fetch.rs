//! Fetch subcommand - walk the palette listing and write the dataset

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use palette_colourlovers::ColorCountRange;
use palette_core::ProgressContext;

use crate::config::Config;

#[derive(Args, Debug, Default)]
pub struct FetchArgs {
    /// Number of records to walk (default from config, 1000)
    pub total: Option<usize>,

    /// Dataset output path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Records per request (1-100)
    #[arg(short, long)]
    pub page_size: Option<usize>,

    /// Fewest colors a palette may have
    #[arg(long)]
    pub min_colors: Option<usize>,

    /// Most colors a palette may have
    #[arg(long)]
    pub max_colors: Option<usize>,

    /// Indent the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Merge CLI overrides onto the file configuration
fn resolve(args: FetchArgs, config: &Config) -> Result<palette_colourlovers::Config> {
    let color_range = ColorCountRange::new(
        args.min_colors.unwrap_or(config.fetch.min_colors),
        args.max_colors.unwrap_or(config.fetch.max_colors),
    )?;
    Ok(palette_colourlovers::Config {
        base_url: config.source.base_url.clone(),
        total: args.total.unwrap_or(config.fetch.total),
        max_page_size: args.page_size.unwrap_or(config.fetch.page_size),
        color_range,
        output: args.output.unwrap_or_else(|| config.output.path.clone()),
        pretty: args.pretty || config.output.pretty,
    })
}

/// Print a key-value summary table on stderr
fn print_summary(rows: &[(&str, String)]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Fetch").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    eprintln!("\n{table}");
}

pub fn run(args: FetchArgs, config: &Config, progress: &ProgressContext) -> Result<()> {
    let show_table = progress.is_tty();
    let fetch_config = resolve(args, config)?;

    log::info!("Fetching palettes from {}", fetch_config.base_url);
    log::info!("  Output: {}", fetch_config.output.display());

    let summary = palette_colourlovers::run(&fetch_config, progress)?;

    if show_table {
        print_summary(&[
            ("Pages", summary.pages.to_string()),
            ("Palettes", palette_core::fmt_num(summary.palettes as u64)),
            ("Bytes", palette_core::fmt_num(summary.bytes)),
            ("Time", format!("{:.1}s", summary.elapsed.as_secs_f64())),
        ]);
    }
    println!("{}", summary.message());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_come_from_config() {
        let resolved = resolve(FetchArgs::default(), &Config::default()).unwrap();
        assert_eq!(resolved.total, 1000);
        assert_eq!(resolved.max_page_size, 100);
        assert_eq!(resolved.color_range, ColorCountRange::default());
        assert_eq!(resolved.output, PathBuf::from("public/palettes.json"));
        assert!(!resolved.pretty);
    }

    #[test]
    fn positional_total_overrides_config() {
        let args = FetchArgs {
            total: Some(20),
            page_size: Some(10),
            output: Some(PathBuf::from("out.json")),
            ..Default::default()
        };
        let resolved = resolve(args, &Config::default()).unwrap();
        assert_eq!(resolved.total, 20);
        assert_eq!(resolved.max_page_size, 10);
        assert_eq!(resolved.output, PathBuf::from("out.json"));
    }

    #[test]
    fn color_bounds_merge_individually() {
        let args = FetchArgs {
            max_colors: Some(3),
            ..Default::default()
        };
        let resolved = resolve(args, &Config::default()).unwrap();
        assert_eq!(resolved.color_range, ColorCountRange::new(2, 3).unwrap());
    }

    #[test]
    fn inverted_bounds_rejected() {
        let args = FetchArgs {
            min_colors: Some(6),
            ..Default::default()
        };
        assert!(resolve(args, &Config::default()).is_err());
    }

    #[test]
    fn parses_positional_total() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: FetchArgs,
        }

        let w = Wrapper::try_parse_from(["fetch", "250", "-o", "x.json", "--pretty"]).unwrap();
        assert_eq!(w.args.total, Some(250));
        assert_eq!(w.args.output, Some(PathBuf::from("x.json")));
        assert!(w.args.pretty);

        assert!(Wrapper::try_parse_from(["fetch", "many"]).is_err());
    }
}
