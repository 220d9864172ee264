#[cfg(test)]
mod tests {
    use crate::document::*;
    use crate::error::ScrapeError;
    use indexmap::IndexMap;

    const CONF: &str = "Midwest Central";

    fn game(date: &str, home: &str, away: &str, venue: &str) -> MatchRecord {
        MatchRecord {
            date: date.to_string(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_score: "2".to_string(),
            away_score: "1".to_string(),
            venue: venue.to_string(),
        }
    }

    fn sample_doc() -> LeagueDocument {
        let mut teams = IndexMap::new();
        teams.insert(
            "Chicago City".to_string(),
            TeamRecord::new("101", "https://premier.upsl.com/teams/chicago-city"),
        );
        teams.insert(
            "Detroit FC".to_string(),
            TeamRecord::new("102", "https://premier.upsl.com/teams/detroit-fc"),
        );
        let mut doc = LeagueDocument::new(DEFAULT_DIVISION);
        doc.set_conference(DEFAULT_DIVISION, CONF, teams);
        doc
    }

    #[test]
    fn test_new_document_has_one_empty_division() {
        let doc = LeagueDocument::new(DEFAULT_DIVISION);
        assert_eq!(doc.divisions.len(), 1);
        assert!(doc.divisions[DEFAULT_DIVISION].conferences.is_empty());
    }

    #[test]
    fn test_set_conference_replaces_teams() {
        let mut doc = sample_doc();
        let mut teams = IndexMap::new();
        teams.insert("Milwaukee".to_string(), TeamRecord::new("7", "https://premier/x"));
        doc.set_conference(DEFAULT_DIVISION, CONF, teams);

        let conf = doc.conference(DEFAULT_DIVISION, CONF).unwrap();
        assert_eq!(conf.teams.len(), 1);
        assert!(conf.teams.contains_key("Milwaukee"));
        assert!(doc.team(DEFAULT_DIVISION, CONF, "Chicago City").is_none());
    }

    #[test]
    fn test_set_conference_creates_missing_division() {
        let mut doc = LeagueDocument::default();
        doc.set_conference("Championship", "North", IndexMap::new());
        assert!(doc.conference("Championship", "North").is_some());
    }

    #[test]
    fn test_set_roster_overwrites() {
        let mut doc = sample_doc();
        let first = vec![RosterEntry {
            player: "A One".into(),
            position: "GK".into(),
            appearances: "3".into(),
        }];
        let second = vec![RosterEntry {
            player: "B Two".into(),
            position: "FW".into(),
            appearances: "0".into(),
        }];
        doc.set_roster(DEFAULT_DIVISION, CONF, "Chicago City", first).unwrap();
        doc.set_roster(DEFAULT_DIVISION, CONF, "Chicago City", second.clone())
            .unwrap();

        let team = doc.team(DEFAULT_DIVISION, CONF, "Chicago City").unwrap();
        assert_eq!(team.roster.as_ref(), Some(&second));
    }

    #[test]
    fn test_set_roster_requires_existing_team() {
        let mut doc = sample_doc();
        let err = doc
            .set_roster(DEFAULT_DIVISION, CONF, "Nobody", vec![])
            .unwrap_err();
        assert!(matches!(err, ScrapeError::NotFound(_)));

        let err = doc
            .set_roster(DEFAULT_DIVISION, "Atlantic", "Chicago City", vec![])
            .unwrap_err();
        assert!(matches!(err, ScrapeError::NotFound(_)));
    }

    #[test]
    fn test_append_matches_creates_then_extends() {
        let mut doc = sample_doc();
        let a = game("2024-04-10", "Chicago City", "Detroit FC", "Field 1");
        let b = game("2024-05-01", "Detroit FC", "Chicago City", "Field 2");

        doc.append_matches(DEFAULT_DIVISION, CONF, "Chicago City", "Spring 2024", vec![a.clone()])
            .unwrap();
        doc.append_matches(DEFAULT_DIVISION, CONF, "Chicago City", "Spring 2024", vec![b.clone()])
            .unwrap();

        let team = doc.team(DEFAULT_DIVISION, CONF, "Chicago City").unwrap();
        assert_eq!(team.matches["Spring 2024"], vec![a, b]);
    }

    #[test]
    fn test_append_matches_batches_equal_concatenation() {
        let a = vec![
            game("2024-04-10", "Chicago City", "Detroit FC", "Field 1"),
            game("2024-04-17", "Chicago City", "Detroit FC", "Field 1"),
        ];
        let b = vec![game("2024-05-01", "Detroit FC", "Chicago City", "Field 2")];

        let mut split = sample_doc();
        split
            .append_matches(DEFAULT_DIVISION, CONF, "Detroit FC", "Spring 2024", a.clone())
            .unwrap();
        split
            .append_matches(DEFAULT_DIVISION, CONF, "Detroit FC", "Spring 2024", b.clone())
            .unwrap();

        let mut joined = sample_doc();
        let mut ab = a;
        ab.extend(b);
        joined
            .append_matches(DEFAULT_DIVISION, CONF, "Detroit FC", "Spring 2024", ab)
            .unwrap();

        assert_eq!(split, joined);
    }

    #[test]
    fn test_append_matches_keeps_duplicates() {
        let mut doc = sample_doc();
        let a = game("2024-04-10", "Chicago City", "Detroit FC", "Field 1");
        for _ in 0..2 {
            doc.append_matches(DEFAULT_DIVISION, CONF, "Chicago City", "Spring 2024", vec![a.clone()])
                .unwrap();
        }
        let team = doc.team(DEFAULT_DIVISION, CONF, "Chicago City").unwrap();
        assert_eq!(team.matches["Spring 2024"].len(), 2);
    }

    #[test]
    fn test_round_trip() {
        let mut doc = sample_doc();
        doc.set_roster(
            DEFAULT_DIVISION,
            CONF,
            "Chicago City",
            vec![RosterEntry {
                player: "A One".into(),
                position: "N/A".into(),
                appearances: "0".into(),
            }],
        )
        .unwrap();
        doc.append_matches(
            DEFAULT_DIVISION,
            CONF,
            "Chicago City",
            "Spring 2024",
            vec![game("2024-04-10", "Chicago City", "Detroit FC", "Field 1")],
        )
        .unwrap();
        doc.append_matches(DEFAULT_DIVISION, CONF, "Detroit FC", "Fall 2023", vec![])
            .unwrap();

        let text = save(&doc).unwrap();
        assert_eq!(load(&text).unwrap(), doc);
    }

    #[test]
    fn test_save_uses_season_keys_and_four_space_indent() {
        let mut doc = sample_doc();
        doc.append_matches(
            DEFAULT_DIVISION,
            CONF,
            "Chicago City",
            "Spring 2024",
            vec![game("2024-04-10", "Chicago City", "Detroit FC", "Field 1")],
        )
        .unwrap();

        let text = save(&doc).unwrap();
        assert!(text.starts_with("{\n    \"Division\": {"));
        assert!(text.contains("\"Matches Spring 2024\": ["));
        assert!(text.contains("\"Home Team\": \"Chicago City\""));
    }

    #[test]
    fn test_save_preserves_insertion_order() {
        let doc = sample_doc();
        let text = save(&doc).unwrap();
        let chicago = text.find("Chicago City").unwrap();
        let detroit = text.find("Detroit FC").unwrap();
        assert!(chicago < detroit);
        assert!(text.find("team_id").unwrap() < text.find("team_link").unwrap());
    }

    #[test]
    fn test_load_keeps_unknown_team_keys() {
        let text = r#"{
            "Division": {
                "Premier": {
                    "Conference": {
                        "Midwest Central": {
                            "Teams": {
                                "Chicago City": {
                                    "team_id": "101",
                                    "team_link": "https://premier.upsl.com/teams/chicago-city",
                                    "coach": {"name": "Pat"},
                                    "Matches Spring 2024": []
                                }
                            }
                        }
                    }
                }
            }
        }"#;
        let doc = load(text).unwrap();
        let team = doc.team(DEFAULT_DIVISION, CONF, "Chicago City").unwrap();
        assert!(team.extra.contains_key("coach"));
        assert!(team.matches.contains_key("Spring 2024"));
        assert_eq!(load(&save(&doc).unwrap()).unwrap(), doc);
    }

    #[test]
    fn test_load_rejects_malformed() {
        assert!(matches!(load("not json"), Err(ScrapeError::Parse(_))));
        assert!(matches!(load("{}"), Err(ScrapeError::Parse(_))));

        let missing_link = r#"{"Division": {"Premier": {"Conference": {"X": {"Teams": {
            "T": {"team_id": "1"}
        }}}}}}"#;
        assert!(matches!(load(missing_link), Err(ScrapeError::Parse(_))));

        let numeric_id = r#"{"Division": {"Premier": {"Conference": {"X": {"Teams": {
            "T": {"team_id": 1, "team_link": "https://premier/x"}
        }}}}}}"#;
        assert!(matches!(load(numeric_id), Err(ScrapeError::Parse(_))));
    }

    #[test]
    fn test_teams_iterates_in_document_order() {
        let doc = sample_doc();
        let names: Vec<&str> = doc.teams().map(|(_, _, name, _)| name).collect();
        assert_eq!(names, vec!["Chicago City", "Detroit FC"]);
    }
}
