use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::map_draw::{NO_DATA, scale_color};
use crate::state::AppState;

pub fn draw(f: &mut Frame, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(5)])
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(rows[0]);

    let metric = state.metric();
    let year = state.view.year();

    // Left: countries, selected ones starred
    let items: Vec<ListItem> = state
        .list_items
        .iter()
        .map(|c| {
            let mark = if state.view.is_selected(c) { "* " } else { "  " };
            ListItem::new(format!("{mark}{c}"))
        })
        .collect();
    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Countries"))
        .highlight_symbol(">> ")
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_stateful_widget(list, chunks[0], &mut list_state);

    // Center: choropleth
    let store = state.atlas.store(metric);
    let domain = state.domain();
    let colors: Vec<Color> = state
        .atlas
        .boundaries
        .iter()
        .map(|feature| {
            let economic = state.atlas.economic_name(&feature.name, metric);
            match (store.get(economic, year), domain) {
                (Some(v), Some(bounds)) => scale_color(bounds.normalize(v)),
                _ => NO_DATA,
            }
        })
        .collect();
    let highlight = state.current_country().map(|c| state.atlas.names.to_geo_name(c));
    let title = format!("{} - {}", metric.label(), year);
    state
        .map
        .render(f, chunks[1], &title, &state.atlas.boundaries, &colors, highlight);

    // Right: details, similar countries, selection
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(chunks[2]);

    let info_text = match state.current_country() {
        Some(country) => {
            let value = state
                .current_value()
                .map(|v| metric.format_value(v))
                .unwrap_or_else(|| "no data".to_string());
            let mut text = format!("{country}\n{year}: {value}");
            if let Some((latest_year, latest)) = store.latest(country) {
                text.push_str(&format!("\nlatest ({latest_year}): {}", metric.format_value(latest)));
            }
            if let Some(row) = state.continent_row() {
                text.push_str(&format!(
                    "\n{} avg: {} (n={})",
                    row.continent,
                    metric.format_value(row.mean),
                    row.sample_count
                ));
            }
            if let Some(bounds) = domain {
                text.push_str(&format!(
                    "\nscale: {} - {}",
                    metric.format_value(bounds.low),
                    metric.format_value(bounds.high)
                ));
            }
            text
        }
        None => "No countries with data".to_string(),
    };
    let info = Paragraph::new(info_text)
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .wrap(Wrap { trim: true });
    f.render_widget(info, right[0]);

    let similar_text = state
        .similar()
        .iter()
        .map(|s| format!("{} ({})", s.country, metric.format_value(s.value)))
        .collect::<Vec<_>>()
        .join("\n");
    let similar = Paragraph::new(similar_text)
        .block(Block::default().borders(Borders::ALL).title("Similar"))
        .wrap(Wrap { trim: true });
    f.render_widget(similar, right[1]);

    let (start, end) = state.view.range();
    let slope_text = state
        .slopes()
        .iter()
        .map(|row| {
            let change = row
                .change()
                .map(|c| format!("{:+.1}%", c * 100.0))
                .unwrap_or_else(|| "n/a".to_string());
            format!("{}: {}", row.country, change)
        })
        .collect::<Vec<_>>()
        .join("\n");
    let slopes = Paragraph::new(slope_text)
        .block(Block::default().borders(Borders::ALL).title(format!("Selection {start}-{end}")))
        .wrap(Wrap { trim: true });
    f.render_widget(slopes, right[2]);

    // Bottom: key help or the last error
    let status = Paragraph::new(state.status.as_str())
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });
    f.render_widget(status, rows[1]);
}
