use crate::app::App;
use crate::page::BlockBody;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const CARET: &str = "▌";

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    // Navigation bar
    let active = app.active();
    let mut nav = Vec::new();
    for (index, section) in app.sections().iter().enumerate() {
        let style = if *section == active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        nav.push(Span::styled(format!(" {} {} ", index + 1, section), style));
    }
    let title = app
        .page()
        .sections
        .first()
        .map(|section| section.title.clone())
        .unwrap_or_default();
    let nav_bar =
        Paragraph::new(Line::from(nav)).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(nav_bar, chunks[0]);

    // Page viewport
    app.set_viewport_height(f64::from(chunks[1].height));
    let offset = app.scroll().round() as u16;
    let page = Paragraph::new(page_lines(app)).scroll((offset, 0));
    f.render_widget(page, chunks[1]);

    let help = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k ↓/j: Scroll | "),
        Span::raw("1-9: Go to section | Tab: Next section"),
    ]);
    f.render_widget(Paragraph::new(help), chunks[2]);
}

/// Every row of the page, matching the rows the layout reserves
fn page_lines(app: &App) -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let typewriters = app.typewriter_views();
    let mut lines = Vec::new();

    for section in &app.page().sections {
        lines.push(Line::styled(section.title.clone(), heading));
        lines.push(Line::default());

        for block in &section.blocks {
            match &block.body {
                BlockBody::Typewriters(count) => {
                    for index in 0..*count {
                        let line = match typewriters.get(index) {
                            Some(view) if view.typing => format!("{}{CARET}", view.revealed),
                            Some(view) => view.revealed.clone(),
                            None => String::new(),
                        };
                        lines.push(Line::from(line));
                    }
                }
                BlockBody::Text(text) => {
                    if app.is_revealed(&block.id) {
                        lines.extend(text.iter().map(|row| Line::from(row.clone())));
                    } else {
                        lines.extend(text.iter().map(|_| Line::default()));
                    }
                }
            }
            lines.push(Line::default());
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_config::Config;
    use portfolio_engine::SiteContent;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Duration;

    fn screen(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_rows_match_layout() {
        let app = App::new(&Config::default(), &SiteContent::default()).unwrap();

        assert_eq!(page_lines(&app).len() as f64, app.page().layout.height());
    }

    #[test]
    fn test_draws_nav_and_hero() {
        let mut app = App::new(&Config::default(), &SiteContent::default()).unwrap();
        app.update(Duration::from_secs(5));

        let text = screen(&mut app, 80, 16);

        assert!(text.contains("1 home"));
        assert!(text.contains("4 contact"));
        assert!(text.contains("Jayasridhara.B"));
        assert!(text.contains("Full Stack MERN Developer"));
    }

    #[test]
    fn test_hidden_blocks_draw_blank() {
        let mut app = App::new(&Config::default(), &SiteContent::default()).unwrap();

        let text = screen(&mut app, 80, 60);

        assert!(text.contains("About Me"));
        assert!(!text.contains("My Tech Stack"));
    }
}
