use crate::config::Config;
use crate::Result;
use colored::Colorize;

pub fn run(manager_id: &str, metric: &str) -> Result<()> {
    let config = Config::load()?;
    let (mut registry, store) = super::load_board(&config)?;

    let unlocked = registry.toggle_by_name(manager_id, metric)?;
    store.save(&registry)?;

    let name = registry
        .get(manager_id)
        .map(|m| m.name.clone())
        .unwrap_or_else(|| manager_id.to_string());
    let metric_label = metric.to_uppercase();
    if unlocked {
        println!(
            "{}",
            format!("🧩 {} - {} UNLOCKED!", name, metric_label).green().bold()
        );
    } else {
        println!("{}", format!("{} - {} locked", name, metric_label).yellow());
    }

    Ok(())
}
