use crate::config::Config;
use crate::ui::BoardApp;
use crate::Result;

pub async fn run() -> Result<()> {
    let config = Config::load()?;
    let app = BoardApp::new(&config)?;
    app.run(config.autosave_interval()).await
}
