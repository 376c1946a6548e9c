use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use portfolio_config::Config;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stdout, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use std::{env, process};

mod app;
mod page;
mod ui;

use app::App;

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    // Keep the alternate screen clean unless asked otherwise
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let mut config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    if args.len() == 2 {
        config = config.with_content_path(PathBuf::from(&args[1]));
    } else if args.len() > 2 {
        eprintln!("Usage: {} [content-file]", args[0]);
        process::exit(1);
    }

    let content = match config.load_content() {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let mut app = match App::new(&config, &content) {
        Ok(app) => app,
        Err(e) => {
            eprintln!(
                "Error: Invalid section settings in '{}': {e}",
                config_path.display()
            );
            process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Down | KeyCode::Char('j') => app.scroll_by(1.0),
                    KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-1.0),
                    KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_by(app.viewport_height()),
                    KeyCode::PageUp => app.scroll_by(-app.viewport_height()),
                    KeyCode::Tab => app.navigate_next(),
                    KeyCode::Char(digit @ '1'..='9') => {
                        app.navigate_to_index(digit as usize - '1' as usize);
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => app.scroll_by(3.0),
                    MouseEventKind::ScrollUp => app.scroll_by(-3.0),
                    _ => {}
                },
                _ => {}
            }
        }

        let now = Instant::now();
        app.update(now - last_frame);
        last_frame = now;
    }
}
