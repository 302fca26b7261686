use color_eyre::eyre::{Result, WrapErr};
use times_square_noir::{App, Backend, Settings, logging, settings};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let settings_path = settings::settings_path()?;
    let (mut settings, created) =
        Settings::load_or_create(&settings_path).wrap_err("Could not load settings")?;
    settings.apply_env(|name| std::env::var(name).ok());

    if let Err(e) = logging::init(&settings::data_dir()?, settings.debug_mode) {
        eprintln!("Logging disabled: {e}");
    }
    log::info!("Times Square Noir start: {}", chrono::Local::now());
    if created {
        log::info!("Wrote default settings to {}", settings_path.display());
    }

    // Checked before the terminal is taken over so the message stays readable.
    let backend = Backend::from_settings(&settings).wrap_err(
        "Set API_KEY (or GEMINI_API_KEY / OPENAI_API_KEY) or add api_key to settings.json",
    )?;

    let mut app = App::new(backend);
    let result = app.run().await;

    log::info!("Times Square Noir exit: {}", chrono::Local::now());
    result
}
