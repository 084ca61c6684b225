use crate::config::Config;
use crate::models::MetricKey;
use crate::Result;
use colored::Colorize;
use serde_json::json;

pub fn run(json: bool) -> Result<()> {
    let config = Config::load()?;
    let (registry, store) = super::load_board(&config)?;

    if json {
        let managers: Vec<_> = registry
            .managers()
            .iter()
            .map(|m| {
                json!({
                    "id": m.id,
                    "name": m.name,
                    "metrics": m.metrics,
                    "completed": m.metrics.completed(),
                    "winner": m.is_winner(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json!({ "managers": managers }))?);
        return Ok(());
    }

    println!("{}", "🧩 SPIFF Puzzle Challenge".cyan().bold());
    println!();

    for manager in registry.managers() {
        let completed = manager.metrics.completed();

        let pieces: Vec<String> = MetricKey::ALL
            .iter()
            .map(|&key| {
                let label = key.label();
                if manager.metrics.get(key) {
                    format!("{} ■", label).green().to_string()
                } else {
                    format!("{} ·", label).bright_black().to_string()
                }
            })
            .collect();

        let filled = completed as usize * 2;
        let bar = format!(
            "{}{}",
            "█".repeat(filled).green(),
            "░".repeat(8 - filled).bright_black()
        );

        let winner = if manager.is_winner() {
            "  🎉 WINNER".magenta().bold().to_string()
        } else {
            String::new()
        };

        println!(
            "   {} {}  {}/4 Pieces  {}{}",
            format!("{:<8}", manager.name).bold(),
            pieces.join("  "),
            completed,
            bar,
            winner
        );
    }

    println!();
    match store.last_saved() {
        Some(saved) => println!(
            "   {}",
            format!("saved {} ({})", saved.format("%Y-%m-%d %H:%M:%S"), store.path().display())
                .bright_black()
        ),
        None => println!("   {}", "no saved data yet".bright_black()),
    }

    Ok(())
}
