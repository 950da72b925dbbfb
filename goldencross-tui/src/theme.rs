//! Colour tokens for the GoldenCross viewer.
//!
//! Dark background with neon accents. The three chart lines echo the classic
//! golden-cross plot: sky-blue close, orange fast average, purple slow average.

use ratatui::style::Color;

use goldencross_core::TradeAction;
use goldencross_runner::Tone;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Cyan accent (borders, titles)
    pub accent: Color,
    /// Green (gains, buys)
    pub positive: Color,
    /// Red-pink (losses, sells)
    pub negative: Color,
    /// Orange (force-sells, synthetic data warnings)
    pub warning: Color,
    /// Steel blue (axes, muted text)
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub price_line: Color,
    pub fast_line: Color,
    pub slow_line: Color,
    /// Row highlight in the trade log
    pub selection: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::neon()
    }
}

impl Theme {
    pub fn neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
            price_line: Color::Rgb(135, 206, 235),
            fast_line: Color::Rgb(255, 165, 0),
            slow_line: Color::Rgb(147, 112, 219),
            selection: Color::Rgb(60, 60, 80),
        }
    }

    /// Green for gains (including break-even), pink for losses.
    pub fn pnl_color(&self, value: f64) -> Color {
        if value >= 0.0 {
            self.positive
        } else {
            self.negative
        }
    }

    pub fn tone_color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Gain => self.positive,
            Tone::Loss => self.negative,
        }
    }

    pub fn action_color(&self, action: TradeAction) -> Color {
        match action {
            TradeAction::Buy => self.positive,
            TradeAction::Sell => self.negative,
            TradeAction::ForceSell => self.warning,
        }
    }
}
