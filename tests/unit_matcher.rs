use cmdpal::domain::commands::Command;
use cmdpal::domain::matcher::{search, FuzzyMatcher, MatchOptions};

fn labels<'a>(results: &[&'a Command]) -> Vec<&'a str> {
    results
        .iter()
        .map(|command| command.label().unwrap_or_default())
        .collect()
}

fn site_commands() -> Vec<Command> {
    vec![
        Command::new("Go to Settings", &["g", "s"], "settings"),
        Command::new("Close tab", &["cmd", "w"], "close-tab"),
        Command::new("Contact Hopper", &["c", "h"], "contact"),
        Command::new("Go to Articles", &["g", "a"], "articles"),
        Command::new("Go to Home", &["g", "h"], "home"),
        Command::new("Play selected station", &["p"], "play"),
        Command::new("Pause playback", &["space"], "pause"),
        Command::new("Close all tabs", &["cmd", "shift", "w"], "close-all"),
        Command::new("Go to Search", &["/"], "search"),
    ]
}

#[test]
fn fuzzy_search_ranks_best_match_first() {
    let items = vec![
        Command::new("Pause playback", &["space"], "pause"),
        Command::new("Play selected station", &["p"], "play"),
    ];

    let result = search("pla", &items);
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].action(), "play");
    assert_eq!(result[1].action(), "pause");
}

#[test]
fn empty_query_returns_items_in_original_order() {
    let items = vec![
        Command::new("Go to Settings", &["g", "s"], "settings"),
        Command::unlabeled(&["x"], "hidden"),
        Command::new("Close tab", &["cmd", "w"], "close-tab"),
    ];

    let result = search("", &items);
    assert_eq!(result.len(), items.len());
    for (found, original) in result.iter().zip(items.iter()) {
        assert!(std::ptr::eq(*found, original));
    }
}

#[test]
fn single_character_query_matches_nothing() {
    let items = site_commands();
    assert!(search("g", &items).is_empty());
    assert!(search("c", &items).is_empty());
}

#[test]
fn tolerates_typos_within_threshold() {
    let items = site_commands();
    assert_eq!(labels(&search("setings", &items)), vec!["Go to Settings"]);
    assert_eq!(labels(&search("settimgs", &items)), vec!["Go to Settings"]);
    assert_eq!(labels(&search("clse", &items[..2])), vec!["Close tab"]);
}

#[test]
fn matching_ignores_case() {
    let items = site_commands();
    assert_eq!(labels(&search("ARTICLES", &items)), vec!["Go to Articles"]);
}

#[test]
fn unrelated_query_yields_empty_result() {
    let items = site_commands();
    assert!(search("xyz", &items).is_empty());
    assert!(search("zzzz qqqq home", &items).is_empty());
}

#[test]
fn equal_scores_keep_input_order() {
    let items = site_commands();
    assert_eq!(
        labels(&search("go to", &items)),
        vec!["Go to Settings", "Go to Articles", "Go to Home", "Go to Search"]
    );
    assert_eq!(
        labels(&search("close", &items)),
        vec!["Close tab", "Close all tabs"]
    );
}

#[test]
fn closer_matches_rank_ahead_of_distant_ones() {
    let items = site_commands();
    assert_eq!(
        labels(&search("tab", &items)),
        vec!["Close tab", "Close all tabs"]
    );
}

#[test]
fn unlabeled_items_are_never_matched() {
    let items = vec![
        Command::new("Go to Home", &["g", "h"], "home"),
        Command::unlabeled(&["h"], "home-unlabeled"),
        Command::new("Close tab", &["cmd", "w"], "close-tab"),
        Command::new("", &["e"], "empty-label"),
    ];

    let result = search("home", &items);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].action(), "home");
}

#[test]
fn results_are_drawn_from_the_input_set() {
    let items = site_commands();
    for query in ["go", "tab", "setings", "hopper", "pla", "search", "go to the articles page now please"] {
        for found in search(query, &items) {
            assert!(
                items.iter().any(|item| std::ptr::eq(item, found)),
                "query {query:?} returned a foreign item"
            );
        }
    }
}

#[test]
fn long_queries_fall_back_to_token_search() {
    let items = site_commands();
    let matcher = FuzzyMatcher::default();

    let hits = matcher.rank("go to the articles page now please", &items);
    let indices: Vec<usize> = hits.iter().map(|hit| hit.index).collect();
    assert_eq!(indices, vec![0, 3, 4, 8]);
    assert!(hits.iter().all(|hit| (hit.score - 0.5).abs() < 1e-9));
}

#[test]
fn rank_reports_scores() {
    let items = vec![
        Command::new("Play selected station", &["p"], "play"),
        Command::new("Pause playback", &["space"], "pause"),
        Command::new("Go to Settings", &["g", "s"], "settings"),
    ];
    let matcher = FuzzyMatcher::default();

    let hits = matcher.rank("pla", &items);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].index, 0);
    assert!((hits[0].score - 0.001).abs() < 1e-9);
    assert_eq!(hits[1].index, 1);
    assert!((hits[1].score - 0.06).abs() < 1e-9);

    let exact = matcher.rank("go to settings", &items);
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].score, 0.0);
}

#[test]
fn zero_threshold_only_accepts_exact_positions() {
    let items = site_commands();
    let strict = FuzzyMatcher::new(MatchOptions {
        threshold: 0.0,
        ..MatchOptions::default()
    });

    assert!(strict.search("setings", &items).is_empty());
    assert_eq!(
        labels(&strict.search("go to settings", &items)),
        vec!["Go to Settings"]
    );
}

#[test]
fn search_does_not_mutate_input() {
    let items = site_commands();
    let before = items.clone();
    let _ = search("go", &items);
    assert_eq!(items, before);
}

#[test]
fn long_whitespace_only_query_matches_nothing() {
    let items = site_commands();
    let query = " ".repeat(25);
    assert!(search(&query, &items).is_empty());
    assert!(search(" \t ".repeat(10).as_str(), &items).is_empty());
}
