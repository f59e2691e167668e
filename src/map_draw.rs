use indicator_atlas::boundary::{BoundaryFeature, extent};
use ratatui::Frame;
use ratatui::layout::Rect as TuiRect;
use ratatui::style::Color;
use ratatui::widgets::canvas::{Canvas, Line};
use ratatui::widgets::{Block, Borders};

pub const NO_DATA: Color = Color::DarkGray;
const HIGHLIGHT: Color = Color::White;

/// Dark blue -> teal -> yellow, sampled at `t` in `0.0..=1.0`.
pub fn scale_color(t: f64) -> Color {
    const STOPS: [(f64, f64, f64); 3] = [(68.0, 1.0, 84.0), (33.0, 145.0, 140.0), (253.0, 231.0, 37.0)];
    let t = t.clamp(0.0, 1.0) * (STOPS.len() - 1) as f64;
    let i = (t.floor() as usize).min(STOPS.len() - 2);
    let f = t - i as f64;
    let (a, b) = (STOPS[i], STOPS[i + 1]);
    let mix = |x: f64, y: f64| (x + (y - x) * f).round() as u8;
    Color::Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// World map viewport: coordinate bounds of the boundary features.
pub struct MapView {
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

impl MapView {
    pub fn new(features: &[BoundaryFeature]) -> Self {
        let (x_bounds, y_bounds) = extent(features).unwrap_or(([-180.0, 180.0], [-90.0, 90.0]));
        Self { x_bounds, y_bounds }
    }

    /// Draws every outline in its data colour, then the highlighted feature on top.
    pub fn render(
        &self,
        f: &mut Frame,
        area: TuiRect,
        title: &str,
        features: &[BoundaryFeature],
        colors: &[Color],
        highlight: Option<&str>,
    ) {
        let canvas = Canvas::default()
            .block(Block::default().title(title).borders(Borders::ALL))
            .x_bounds(self.x_bounds)
            .y_bounds(self.y_bounds)
            .paint(|ctx| {
                for (feature, &color) in features.iter().zip(colors) {
                    draw_outline(ctx, feature, color);
                }
                if let Some(sel) = highlight {
                    for feature in features.iter().filter(|f| f.name == sel) {
                        draw_outline(ctx, feature, HIGHLIGHT);
                    }
                }
            });
        f.render_widget(canvas, area);
    }
}

fn draw_outline(ctx: &mut ratatui::widgets::canvas::Context<'_>, feature: &BoundaryFeature, color: Color) {
    for poly in &feature.shape.0 {
        let ring = &poly.exterior().0;
        for window in ring.windows(2) {
            let (a, b) = (window[0], window[1]);
            ctx.draw(&Line { x1: a.x, y1: a.y, x2: b.x, y2: b.y, color });
        }
        if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
            ctx.draw(&Line { x1: last.x, y1: last.y, x2: first.x, y2: first.y, color });
        }
    }
}
