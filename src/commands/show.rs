//! Show command handler: code listing and step table.

use anyhow::Result;
use terminal_size::{terminal_size, Width};
use unicode_width::UnicodeWidthStr;

use loopviz::scenario::Listing;
use loopviz::tui::current_theme;
use loopviz::{Scenario, ScenarioRegistry, Step};

/// Gap between the two columns of a split listing
const GUTTER: usize = 4;

pub fn handle(id: &str) -> Result<()> {
    let registry = ScenarioRegistry::builtin();
    let scenario = registry.get(id)?;
    let theme = current_theme();

    println!(
        "{} {}",
        theme.accent_text(scenario.display_title()),
        theme.secondary_text(&format!("({})", scenario.id))
    );
    println!();

    if let Some(listing) = &scenario.listing {
        let width = terminal_size().map(|(Width(w), _)| w as usize);
        for line in listing_lines(listing, width) {
            println!("  {}", theme.primary_text(&line));
        }
        println!();
    }

    if !scenario.initial_heap.is_empty() {
        println!(
            "{} {}",
            theme.secondary_text("heap:"),
            scenario.initial_heap.join(", ")
        );
        println!();
    }

    for line in step_table(scenario) {
        println!("{}", line);
    }
    Ok(())
}

/// Lines of a listing. Split listings go side by side when `width` allows.
pub fn listing_lines(listing: &Listing, width: Option<usize>) -> Vec<String> {
    match listing {
        Listing::Single(code) => code.lines().map(str::to_string).collect(),
        Listing::Split { main, worker } => {
            let left_width = main.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
            let right_width = worker.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
            let needed = left_width + GUTTER + right_width + 2;

            if width.is_some_and(|w| w >= needed) {
                side_by_side(main, worker, left_width)
            } else {
                let mut lines: Vec<String> = vec!["// main.js".to_string()];
                lines.extend(main.lines().map(str::to_string));
                lines.push(String::new());
                lines.push("// worker.js".to_string());
                lines.extend(worker.lines().map(str::to_string));
                lines
            }
        }
    }
}

fn side_by_side(left: &str, right: &str, left_width: usize) -> Vec<String> {
    let left: Vec<&str> = left.lines().collect();
    let right: Vec<&str> = right.lines().collect();
    (0..left.len().max(right.len()))
        .map(|i| {
            let l = left.get(i).copied().unwrap_or("");
            let r = right.get(i).copied().unwrap_or("");
            let pad = left_width - l.width() + GUTTER;
            format!("{}{}{}", l, " ".repeat(pad), r).trim_end().to_string()
        })
        .collect()
}

/// One row per step: index, shape, route, label.
pub fn step_table(scenario: &Scenario) -> Vec<String> {
    let width = scenario.steps.len().to_string().len();
    scenario
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            format!(
                "{:>width$}  {:<10} {:<40} {}",
                i + 1,
                shape_name(step),
                route(step),
                step.label,
                width = width
            )
        })
        .collect()
}

fn shape_name(step: &Step) -> &'static str {
    match (step.source, step.destination) {
        _ if step.category == loopviz::Category::Connection => "connection",
        (None, Some(_)) => "enter",
        (Some(_), None) => "exit",
        (Some(_), Some(_)) => "transfer",
        (None, None) => "malformed",
    }
}

fn route(step: &Step) -> String {
    match (step.source, step.destination) {
        (Some(from), Some(to)) => format!("{} -> {}", from.label(), to.label()),
        (Some(from), None) => format!("{} ->", from.label()),
        (None, Some(to)) => format!("-> {}", to.label()),
        (None, None) => String::new(),
    }
}
