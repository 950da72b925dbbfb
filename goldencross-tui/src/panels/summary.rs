//! Evaluation summary panel - budgets and profit/loss.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use goldencross_runner::report::format_dollars;
use goldencross_runner::PerformanceSummary;

use crate::theme::Theme;

pub struct SummaryPanel<'a> {
    summary: &'a PerformanceSummary,
    synthetic: bool,
    theme: &'a Theme,
}

impl<'a> SummaryPanel<'a> {
    pub fn new(summary: &'a PerformanceSummary, synthetic: bool, theme: &'a Theme) -> Self {
        Self {
            summary,
            synthetic,
            theme,
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let label = Style::default().fg(self.theme.text_secondary);
        let value = Style::default().fg(self.theme.text_primary);
        let pnl = Style::default()
            .fg(self.theme.tone_color(self.summary.tone()))
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Initial Budget: ", label),
                Span::styled(format_dollars(self.summary.initial_budget), value),
            ]),
            Line::from(vec![
                Span::styled("Final Budget:   ", label),
                Span::styled(format_dollars(self.summary.final_budget), value),
            ]),
            Line::from(vec![
                Span::styled("Profit/Loss:    ", label),
                Span::styled(self.summary.profit_loss_text(), pnl),
            ]),
            Line::from(vec![
                Span::styled("Trades:         ", label),
                Span::styled(self.summary.trade_count.to_string(), value),
            ]),
        ];

        if self.synthetic {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "SYNTHETIC DATA - not market prices",
                Style::default()
                    .fg(self.theme.warning)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        lines
    }
}

impl<'a> Widget for SummaryPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Trading Strategy Evaluation ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));

        Paragraph::new(self.lines()).block(block).render(area, buf);
    }
}
