mod common;

use std::sync::Arc;
use std::time::Duration;

use common::MockApi;
use stock_client::suggest::{DEBOUNCE_WINDOW, Key, Phase, SuggestionEngine};

async fn settle(engine: &mut SuggestionEngine<MockApi>) {
    while engine.phase() != Phase::Shown {
        engine.tick().await;
    }
}

/// Engine showing the three suggestions for `query`.
async fn shown(api: &Arc<MockApi>, query: &str) -> SuggestionEngine<MockApi> {
    let mut engine = SuggestionEngine::new(Arc::clone(api));
    engine.on_input(query);
    settle(&mut engine).await;
    assert!(engine.is_visible());
    assert_eq!(engine.suggestions().len(), 3);
    engine
}

#[tokio::test(start_paused = true)]
async fn short_queries_never_fetch() {
    let api = Arc::new(MockApi::default());
    let mut engine = SuggestionEngine::new(Arc::clone(&api));

    for text in ["a", " a ", "", "b "] {
        engine.on_input(text);
        assert_eq!(engine.phase(), Phase::Idle);
    }
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert!(api.search_calls().is_empty());
    assert!(!engine.is_visible());
    assert!(engine.suggestions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn keystroke_burst_fetches_once_for_last_query() {
    let api = Arc::new(MockApi::default());
    let mut engine = SuggestionEngine::new(Arc::clone(&api));

    engine.on_input("ap");
    engine.on_input("app");
    engine.on_input("appl");
    assert_eq!(engine.phase(), Phase::Pending);
    settle(&mut engine).await;

    assert_eq!(api.search_calls(), vec!["appl".to_string()]);
    assert_eq!(engine.suggestions()[0].symbol, "APPL");
    assert!(engine.is_visible());
    assert_eq!(engine.cursor(), None);
}

#[tokio::test(start_paused = true)]
async fn no_fetch_before_window_elapses() {
    let api = Arc::new(MockApi::default());
    let mut engine = SuggestionEngine::new(Arc::clone(&api));

    engine.on_input("ap");
    tokio::time::sleep(DEBOUNCE_WINDOW - Duration::from_millis(50)).await;
    engine.on_input("app");
    tokio::time::sleep(DEBOUNCE_WINDOW - Duration::from_millis(50)).await;
    assert!(api.search_calls().is_empty());

    settle(&mut engine).await;
    assert_eq!(api.search_calls(), vec!["app".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn separate_pauses_fetch_separately() {
    let api = Arc::new(MockApi::default());
    let mut engine = SuggestionEngine::new(Arc::clone(&api));

    engine.on_input("ap");
    settle(&mut engine).await;
    engine.on_input("app");
    settle(&mut engine).await;

    assert_eq!(api.search_calls(), vec!["ap".to_string(), "app".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn unchanged_text_does_not_rearm() {
    let api = Arc::new(MockApi::default());
    let mut engine = shown(&api, "ap").await;

    engine.on_input("ap");
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(engine.phase(), Phase::Shown);
    assert_eq!(api.search_calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn moves_through_pending_loading_shown() {
    let api = Arc::new(MockApi {
        search_delay: Duration::from_millis(100),
        ..MockApi::default()
    });
    let mut engine = SuggestionEngine::new(Arc::clone(&api));

    engine.on_input("ms");
    assert_eq!(engine.phase(), Phase::Pending);
    assert!(engine.tick().await);
    assert_eq!(engine.phase(), Phase::Loading);
    assert!(engine.tick().await);
    assert_eq!(engine.phase(), Phase::Shown);
}

#[tokio::test(start_paused = true)]
async fn superseded_in_flight_fetch_is_ignored() {
    let api = Arc::new(MockApi {
        search_delay: Duration::from_secs(1),
        ..MockApi::default()
    });
    let mut engine = SuggestionEngine::new(Arc::clone(&api));

    engine.on_input("ap");
    assert!(engine.tick().await);
    assert_eq!(engine.phase(), Phase::Loading);

    engine.on_input("app");
    settle(&mut engine).await;
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(api.search_calls(), vec!["ap".to_string(), "app".to_string()]);
    assert_eq!(engine.suggestions()[0].symbol, "APP");
}

#[tokio::test(start_paused = true)]
async fn cursor_is_clamped_without_wraparound() {
    let api = Arc::new(MockApi::default());
    let mut engine = shown(&api, "ap").await;
    let last = engine.suggestions().len() - 1;

    for presses in 0..6 {
        engine.on_key(Key::Escape);
        engine.focus();
        for _ in 0..presses {
            assert_eq!(engine.on_key(Key::Down), None);
        }
        let expected = if presses == 0 { None } else { Some((presses - 1).min(last)) };
        assert_eq!(engine.cursor(), expected, "after {} Down presses", presses);
    }

    // cursor is at the last entry; Up walks back and stops at "no highlight"
    engine.on_key(Key::Up);
    assert_eq!(engine.cursor(), Some(last - 1));
    for _ in 0..5 {
        engine.on_key(Key::Up);
    }
    assert_eq!(engine.cursor(), None);
}

#[tokio::test(start_paused = true)]
async fn enter_commits_highlighted_suggestion() {
    let api = Arc::new(MockApi::default());
    let mut engine = shown(&api, "app").await;

    engine.on_key(Key::Down);
    engine.on_key(Key::Down);
    assert_eq!(engine.highlighted().map(|s| s.symbol.as_str()), Some("APPX"));

    assert_eq!(engine.on_key(Key::Enter), Some("APPX".to_string()));
    assert!(!engine.is_visible());
    assert_eq!(engine.cursor(), None);
    assert_eq!(engine.query(), "APPX");

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(api.search_calls().len(), 1);
    assert!(!engine.is_visible());
}

#[tokio::test(start_paused = true)]
async fn enter_without_highlight_commits_nothing() {
    let api = Arc::new(MockApi::default());
    let mut engine = shown(&api, "app").await;

    assert_eq!(engine.on_key(Key::Enter), None);
    assert!(engine.is_visible());
    assert_eq!(engine.query(), "app");
}

#[tokio::test(start_paused = true)]
async fn escape_hides_and_keys_are_ignored_while_hidden() {
    let api = Arc::new(MockApi::default());
    let mut engine = shown(&api, "app").await;

    engine.on_key(Key::Down);
    assert_eq!(engine.on_key(Key::Escape), None);
    assert!(!engine.is_visible());
    assert_eq!(engine.cursor(), None);
    assert_eq!(engine.query(), "app");

    engine.on_key(Key::Down);
    assert_eq!(engine.cursor(), None);
    assert_eq!(engine.click(0), None);

    engine.focus();
    assert!(engine.is_visible());
}

#[tokio::test(start_paused = true)]
async fn click_commits_regardless_of_cursor() {
    let api = Arc::new(MockApi::default());
    let mut engine = shown(&api, "app").await;

    engine.on_key(Key::Down);
    assert_eq!(engine.click(7), None);
    assert_eq!(engine.click(2), Some("APPY".to_string()));
    assert!(!engine.is_visible());
    assert_eq!(engine.cursor(), None);
    assert_eq!(engine.query(), "APPY");
}

#[tokio::test(start_paused = true)]
async fn click_outside_closes_without_commit() {
    let api = Arc::new(MockApi::default());
    let mut engine = shown(&api, "app").await;

    engine.on_key(Key::Down);
    engine.click_outside();
    assert!(!engine.is_visible());
    assert_eq!(engine.cursor(), None);
    assert_eq!(engine.query(), "app");
}

#[tokio::test(start_paused = true)]
async fn commit_cancels_pending_fetch() {
    let api = Arc::new(MockApi::default());
    let mut engine = shown(&api, "ap").await;

    engine.on_input("app");
    assert_eq!(engine.phase(), Phase::Pending);
    engine.on_key(Key::Down);
    assert_eq!(engine.on_key(Key::Enter), Some("AP".to_string()));

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(api.search_calls(), vec!["ap".to_string()]);
    assert!(!engine.is_visible());
    assert_eq!(engine.query(), "AP");
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_clears_list_silently() {
    let api = Arc::new(MockApi {
        fail_search: true,
        ..MockApi::default()
    });
    let mut engine = SuggestionEngine::new(Arc::clone(&api));

    engine.on_input("ap");
    settle(&mut engine).await;

    assert!(engine.suggestions().is_empty());
    assert!(!engine.is_visible());
}

#[tokio::test(start_paused = true)]
async fn empty_result_keeps_dropdown_hidden() {
    let api = Arc::new(MockApi::default());
    let mut engine = SuggestionEngine::new(Arc::clone(&api));

    engine.on_input("zzq");
    settle(&mut engine).await;

    assert_eq!(engine.phase(), Phase::Shown);
    assert!(!engine.is_visible());
    engine.focus();
    assert!(!engine.is_visible());
}

#[tokio::test(start_paused = true)]
async fn shortening_query_resets_to_idle() {
    let api = Arc::new(MockApi::default());
    let mut engine = shown(&api, "ap").await;

    engine.on_input("a");
    assert_eq!(engine.phase(), Phase::Idle);
    assert!(engine.suggestions().is_empty());
    assert!(!engine.is_visible());
    assert_eq!(engine.cursor(), None);
}
