use crossterm::event::KeyCode;
use indicator_atlas::{
    Atlas, ContinentAggregate, DomainPolicy, Metric, PercentileBounds, SimilarCountry, ViewParameters,
    color_domain, continent_average, derived::SlopeRow, derived::slope_rows, suggest_similar,
};

use crate::map_draw::MapView;

const SIMILAR_LIMIT: usize = 5;

pub struct AppState {
    pub atlas: Atlas,
    pub view: ViewParameters,
    pub policy: DomainPolicy,
    pub map: MapView,
    pub list_items: Vec<String>,
    pub selected: usize,
    pub status: String,
}

impl AppState {
    pub const HELP_TEXT: &'static str = "\
↑/↓: country   ←/→: year   m: metric
space: select   c: clear   [ ]: range start   { }: range end
q: quit";

    pub fn new(atlas: Atlas, policy: DomainPolicy) -> Self {
        let view = ViewParameters::new(atlas.span);
        let map = MapView::new(&atlas.boundaries);
        let mut state = Self {
            atlas,
            view,
            policy,
            map,
            list_items: Vec::new(),
            selected: 0,
            status: Self::HELP_TEXT.to_string(),
        };
        state.refresh_list();
        state
    }

    /// Rebuilds the country list for the current metric, keeping the cursor
    /// on the same country when it is still listed.
    fn refresh_list(&mut self) {
        let current = self.current_country().map(str::to_string);
        self.list_items = self
            .atlas
            .countries(self.view.metric())
            .into_iter()
            .map(str::to_string)
            .collect();
        self.selected = current
            .and_then(|c| self.list_items.iter().position(|s| *s == c))
            .unwrap_or(0);
    }

    pub fn current_country(&self) -> Option<&str> {
        self.list_items.get(self.selected).map(String::as_str)
    }

    pub fn current_value(&self) -> Option<f64> {
        let country = self.current_country()?;
        self.atlas.store(self.view.metric()).get(country, self.view.year())
    }

    pub fn domain(&self) -> Option<PercentileBounds> {
        let store = self.atlas.store(self.view.metric());
        color_domain(store, &self.atlas.names, self.view.year(), &self.policy).ok()
    }

    pub fn continent_row(&self) -> Option<ContinentAggregate> {
        let continent = self.atlas.names.continent_of(self.current_country()?)?;
        continent_average(self.atlas.store(self.view.metric()), &self.atlas.names, self.view.year())
            .into_iter()
            .find(|row| row.continent == continent)
    }

    pub fn similar(&self) -> Vec<SimilarCountry> {
        let Some(country) = self.current_country() else {
            return Vec::new();
        };
        let store = self.atlas.store(self.view.metric());
        suggest_similar(store, &self.atlas.names, country, self.view.year(), SIMILAR_LIMIT).unwrap_or_default()
    }

    pub fn slopes(&self) -> Vec<SlopeRow> {
        let (start, end) = self.view.range();
        slope_rows(self.atlas.store(self.view.metric()), self.view.selected(), start, end).unwrap_or_default()
    }

    fn step_year(&mut self, delta: i32) {
        if let Err(e) = self.view.set_year(self.view.year() + delta) {
            self.status = e.to_string();
        }
    }

    fn step_range(&mut self, start_delta: i32, end_delta: i32) {
        let (start, end) = self.view.range();
        if let Err(e) = self.view.set_range(start + start_delta, end + end_delta) {
            self.status = e.to_string();
        }
    }

    /// Returns true when the app should quit.
    pub fn handle_input(&mut self, key: KeyCode) -> bool {
        use KeyCode::*;
        self.status = Self::HELP_TEXT.to_string();
        match key {
            Char('q') => return true,
            Up => {
                if self.selected > 0 {
                    self.selected -= 1
                }
            }
            Down => {
                if self.selected + 1 < self.list_items.len() {
                    self.selected += 1
                }
            }
            Left => self.step_year(-1),
            Right => self.step_year(1),
            Char('m') | Tab => {
                self.view.set_metric(self.view.metric().toggled());
                self.refresh_list();
            }
            Char(' ') => {
                if let Some(country) = self.current_country().map(str::to_string) {
                    self.view.toggle_country(&country);
                }
            }
            Char('c') => self.view.clear_selection(),
            Char('[') => self.step_range(-1, 0),
            Char(']') => self.step_range(1, 0),
            Char('{') => self.step_range(0, -1),
            Char('}') => self.step_range(0, 1),
            _ => {}
        }
        false
    }

    pub fn metric(&self) -> Metric {
        self.view.metric()
    }
}
