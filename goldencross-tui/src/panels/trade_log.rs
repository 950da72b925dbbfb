//! Trade log panel - every executed trade, newest last
//!
//! Keeps the selected row on screen by scrolling the visible window.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

use goldencross_core::TradeRecord;
use goldencross_runner::report::{trade_row, NO_TRADES_MESSAGE, TRADE_LOG_HEADERS};

use crate::theme::Theme;

/// Trade log widget
pub struct TradeLogPanel<'a> {
    trades: &'a [TradeRecord],
    selected_index: usize,
    theme: &'a Theme,
}

/// Borders plus the header row.
const CHROME_ROWS: u16 = 3;

impl<'a> TradeLogPanel<'a> {
    pub fn new(trades: &'a [TradeRecord], selected_index: usize, theme: &'a Theme) -> Self {
        Self {
            trades,
            selected_index,
            theme,
        }
    }

    /// First trade shown so that `selected_index` fits in `visible` rows.
    fn scroll_offset(&self, visible: usize) -> usize {
        if visible == 0 {
            return 0;
        }
        self.selected_index.saturating_sub(visible - 1)
    }
}

impl<'a> Widget for TradeLogPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" Trade Log ({} trades) ", self.trades.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));

        if self.trades.is_empty() {
            Paragraph::new(NO_TRADES_MESSAGE)
                .style(Style::default().fg(self.theme.muted))
                .block(block)
                .render(area, buf);
            return;
        }

        let header_cells = TRADE_LOG_HEADERS.iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let header = Row::new(header_cells).height(1);

        let visible = area.height.saturating_sub(CHROME_ROWS) as usize;
        let offset = self.scroll_offset(visible);

        let rows = self
            .trades
            .iter()
            .enumerate()
            .skip(offset)
            .map(|(i, trade)| {
                let style = if i == self.selected_index {
                    Style::default()
                        .bg(self.theme.selection)
                        .fg(self.theme.text_primary)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.theme.text_primary)
                };

                let [date, action, shares, price, value] = trade_row(trade);
                let cells = vec![
                    Cell::from(date),
                    Cell::from(action)
                        .style(Style::default().fg(self.theme.action_color(trade.action))),
                    Cell::from(shares),
                    Cell::from(price),
                    Cell::from(value),
                ];
                Row::new(cells).style(style).height(1)
            });

        let widths = [
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Min(12),
        ];

        Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1)
            .render(area, buf);
    }
}
