use crate::config::Config;
use crate::Result;
use colored::Colorize;
use dialoguer::Confirm;

pub fn run(force: bool) -> Result<()> {
    let config = Config::load()?;
    let store = config.store()?;

    if !force {
        let confirmed = Confirm::new()
            .with_prompt("Reset the board? All unlocked pieces will be lost")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Aborted.".yellow());
            return Ok(());
        }
    }

    if store.reset()? {
        println!("{}", "🧹 Board reset. Everyone starts from zero.".green());
    } else {
        println!("{}", "Nothing to reset.".yellow());
    }

    Ok(())
}
