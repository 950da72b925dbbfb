//! Top-level layout - chart on top, summary and trade log below, status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::navigation::key_bindings_help;
use crate::panels::{PriceChartPanel, SummaryPanel, TradeLogPanel};

/// Height of the summary/trade-log strip.
const BOTTOM_HEIGHT: u16 = 10;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(BOTTOM_HEIGHT),
            Constraint::Length(1),
        ])
        .split(f.area());

    f.render_widget(PriceChartPanel::new(&app.chart, &app.theme), chunks[0]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(30)])
        .split(chunks[1]);

    f.render_widget(
        SummaryPanel::new(&app.summary, app.synthetic, &app.theme),
        bottom[0],
    );
    f.render_widget(
        TradeLogPanel::new(&app.trades, app.selected_trade, &app.theme),
        bottom[1],
    );

    render_status_bar(f, chunks[2], app);

    if app.show_help {
        render_help(f, centered_rect(50, 40, f.area()), app);
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let spans = vec![
        Span::styled(format!(" {} ", app.label), Style::default().fg(app.theme.accent)),
        Span::raw("| "),
        Span::styled(
            "q:Quit j/k:Trades ?:Help",
            Style::default().fg(app.theme.muted),
        ),
    ];
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help(f: &mut Frame, area: Rect, app: &App) {
    let key_style = Style::default()
        .fg(app.theme.accent)
        .add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = key_bindings_help()
        .into_iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{key:<18}"), key_style),
                Span::styled(action, Style::default().fg(app.theme.text_primary)),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.accent))
        .style(Style::default().bg(app.theme.background));

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{flat_result, round_trip_result};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf.cell((x, y)).map_or(" ", |c| c.symbol()));
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_full_layout() {
        let app = App::new(&round_trip_result());
        let out = screen(&app);
        assert!(out.contains("Golden Cross Trading Strategy for TEST"));
        assert!(out.contains("Trading Strategy Evaluation"));
        assert!(out.contains("+$5.00 (+20.00%)"));
        assert!(out.contains("Trade Log (2 trades)"));
        assert!(out.contains("TEST | 2/3"));
        assert!(!out.contains(" Help "));
    }

    #[test]
    fn test_no_trades_layout() {
        let app = App::new(&flat_result());
        let out = screen(&app);
        assert!(out.contains("No trades were executed during this period."));
        assert!(out.contains("+$0.00 (+0.00%)"));
    }

    #[test]
    fn test_help_overlay() {
        let mut app = App::new(&round_trip_result());
        app.toggle_help();
        let out = screen(&app);
        assert!(out.contains(" Help "));
        assert!(out.contains("Select trade"));
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let r = centered_rect(50, 50, area);
        assert_eq!(r.width, 50);
        assert_eq!(r.height, 20);
        assert_eq!((r.x, r.y), (25, 10));
    }
}
