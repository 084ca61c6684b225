use crate::config::Config;
use crate::models::Standing;
use crate::Result;
use colored::Colorize;

pub fn run(json: bool) -> Result<()> {
    let config = Config::load()?;
    let (registry, _store) = super::load_board(&config)?;
    let ranking = registry.ranking();

    if json {
        println!("{}", serde_json::to_string_pretty(&ranking)?);
        return Ok(());
    }

    println!("{}", "🏆 Current Standings".cyan().bold());
    println!();

    for (position, standing) in ranking.iter().enumerate() {
        let line = format!(
            "{} {:<8} {}/4 ({}%)",
            Standing::medal(position),
            standing.name,
            standing.completed,
            standing.percentage
        );
        if standing.winner {
            println!("   {}", line.magenta().bold());
        } else {
            println!("   {}", line);
        }
    }

    Ok(())
}
