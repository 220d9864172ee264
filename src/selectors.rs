//! Page Selectors

use serde::{Deserialize, Serialize};

/// CSS selectors and attribute names for the team list and team pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSelectors {
    pub team_card: String,
    pub team_id_attr: String,
    pub team_name_attr: String,
    pub team_conference_attr: String,
    pub team_anchor: String,
    pub team_href_attr: String,

    pub roster_name: String,
    pub roster_position: String,
    pub roster_appearances: String,

    /// Tab that reveals the results table.
    pub results_toggle: String,
    pub results_body: String,
    pub results_row: String,
    /// Row-relative cells, in home team, away team, date, home score,
    /// away score, venue order.
    pub results_cells: [String; 6],
    pub season_label: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            team_card: "div.teams__card--container".into(),
            team_id_attr: "data-team-id".into(),
            team_name_attr: "data-team-name".into(),
            team_conference_attr: "data-team-conference".into(),
            team_anchor: "a".into(),
            team_href_attr: "href".into(),

            roster_name: "span.single-team__roster-player-name".into(),
            roster_position: "span.single-team__roster-player-title".into(),
            roster_appearances: "span.single-team__roster-player-appearances".into(),

            results_toggle: "a.single-team__tab--results".into(),
            results_body: "table.single-team__results-table tbody".into(),
            results_row: "table.single-team__results-table tbody tr".into(),
            results_cells: [
                "td:nth-of-type(1)".into(),
                "td:nth-of-type(2)".into(),
                "td:nth-of-type(3)".into(),
                "td:nth-of-type(4)".into(),
                "td:nth-of-type(5)".into(),
                "td:nth-of-type(6)".into(),
            ],
            season_label: "select.single-team__season-select option[selected]".into(),
        }
    }
}
