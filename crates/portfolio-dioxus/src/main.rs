use dioxus::prelude::*;
use portfolio_config::Config;
use portfolio_engine::SiteContent;
use std::env;
use std::path::PathBuf;
use std::process;

mod ui;

use ui::App;

/// Everything the page needs, resolved once before the window opens
#[derive(Clone)]
struct Site {
    config: Config,
    content: SiteContent,
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("portfolio starting up!");

    let config_path = Config::config_path();
    log::info!("Config path: {}", config_path.display());

    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map(String::as_str).unwrap_or("portfolio-dioxus");
    if args.len() > 2 {
        eprintln!("Usage: {program_name} [content-file]");
        process::exit(1);
    }

    let mut config = match Config::load() {
        Ok(Some(config)) => {
            log::info!("Loaded config from {}", config_path.display());
            config
        }
        Ok(None) => {
            log::info!("No config file found, using defaults");
            Config::default()
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    if let Some(content_path) = args.get(1) {
        log::info!("Using content file from CLI argument: {content_path}");
        config = config.with_content_path(PathBuf::from(content_path));
    }

    if let Err(e) = config.tracker() {
        eprintln!(
            "Error: Invalid section settings in '{}': {e}",
            config_path.display()
        );
        process::exit(1);
    }

    let content = match config.load_content() {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let title = format!("{} | {}", content.profile.name, content.profile.role);

    log::info!("About to launch Dioxus app for desktop");
    dioxus::LaunchBuilder::desktop()
        .with_cfg(make_window_config(&title))
        .with_context(Site { config, content })
        .launch(app_root);
}

fn app_root() -> Element {
    let site = use_context::<Site>();

    rsx! {
        App { config: site.config, content: site.content }
    }
}

fn make_window_config(title: &str) -> dioxus::desktop::Config {
    use dioxus::desktop::{Config, WindowBuilder};

    let window = WindowBuilder::new()
        .with_title(title)
        .with_always_on_top(false);

    Config::default().with_window(window)
}
