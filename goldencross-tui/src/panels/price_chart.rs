//! Price chart panel - close, both moving averages, trade markers
//!
//! X is the row index into the cleaned series; axis labels map it back to
//! dates. Buys are drawn as green blocks, sells and force-sells as pink ones.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Style,
    symbols,
    text::Span,
    widgets::{
        Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph, Widget,
    },
};

use goldencross_runner::ChartModel;

use crate::theme::Theme;

/// Chart panel widget
pub struct PriceChartPanel<'a> {
    model: &'a ChartModel,
    theme: &'a Theme,
}

impl<'a> PriceChartPanel<'a> {
    pub fn new(model: &'a ChartModel, theme: &'a Theme) -> Self {
        Self { model, theme }
    }

    /// First, middle and last date under the x axis.
    fn x_labels(&self) -> Vec<Span<'static>> {
        let [lo, hi] = self.model.x_bounds();
        [lo, (lo + hi) / 2.0, hi]
            .iter()
            .filter_map(|&x| self.model.date_at(x))
            .map(|d| Span::raw(d.format("%Y-%m-%d").to_string()))
            .collect()
    }

    fn y_labels(&self) -> Vec<Span<'static>> {
        let [lo, hi] = self.model.y_bounds();
        [lo, (lo + hi) / 2.0, hi]
            .iter()
            .map(|y| Span::raw(format!("${y:.0}")))
            .collect()
    }
}

impl<'a> Widget for PriceChartPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.model.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));

        if self.model.is_empty() {
            Paragraph::new("No price data")
                .style(Style::default().fg(self.theme.muted))
                .block(block)
                .render(area, buf);
            return;
        }

        let buys: Vec<(f64, f64)> = self.model.buys.iter().map(|m| (m.x, m.price)).collect();
        let sells: Vec<(f64, f64)> = self.model.sells.iter().map(|m| (m.x, m.price)).collect();

        let datasets = vec![
            Dataset::default()
                .name("Close")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.price_line))
                .data(&self.model.price),
            Dataset::default()
                .name(self.model.fast_label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.fast_line))
                .data(&self.model.fast),
            Dataset::default()
                .name(self.model.slow_label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.slow_line))
                .data(&self.model.slow),
            Dataset::default()
                .name("Buy")
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(self.theme.positive))
                .data(&buys),
            Dataset::default()
                .name("Sell")
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(self.theme.negative))
                .data(&sells),
        ];

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title(Span::styled("Date", Style::default().fg(self.theme.text_secondary)))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds(self.model.x_bounds())
                    .labels(self.x_labels()),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(
                        "Price (USD)",
                        Style::default().fg(self.theme.text_secondary),
                    ))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds(self.model.y_bounds())
                    .labels(self.y_labels()),
            )
            .legend_position(Some(LegendPosition::TopLeft))
            .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)));

        chart.render(area, buf);
    }
}
