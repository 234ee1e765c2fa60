//! End-to-end suggestor flows: debounced actor lookup, paging, drill-down.
//!
//! Timer tests run with paused time; awaiting the channel auto-advances the
//! clock to the next pending timer.

use std::time::Duration;

use sqlbench_api::test_utils::{test_actor, test_movie, test_movies, GatewayCall, Op, ScriptedGateway};
use sqlbench_api::MovieQuery;
use sqlbench_app::config::Settings;
use sqlbench_app::suggestor::{DetailView, PAGE_SIZE};
use sqlbench_app::view::SuggestorView;
use sqlbench_app::{Engine, Message};
use sqlbench_core::{ActorDetail, CastMember, MovieDetail};

fn view(engine: &Engine<ScriptedGateway>) -> SuggestorView {
    SuggestorView::derive(engine.state.suggestor.as_ref().expect("suggestor mounted"))
}

async fn settle(engine: &mut Engine<ScriptedGateway>, n: usize) {
    for _ in 0..n {
        assert!(engine.process_next().await, "message channel closed");
    }
}

async fn mounted(gw: &ScriptedGateway) -> Engine<ScriptedGateway> {
    gw.push(Op::ListGenres, Ok(vec!["Comedy", "Drama"]));
    let mut engine = Engine::new(Settings::default(), gw.clone());
    engine.process_message(Message::OpenSuggestor);
    settle(&mut engine, 1).await;
    engine
}

fn type_actor(engine: &mut Engine<ScriptedGateway>, text: &str) {
    engine.process_message(Message::ActorInput {
        text: text.to_string(),
    });
}

#[tokio::test(start_paused = true)]
async fn test_scenario_actor_pick_then_page() {
    let gw = ScriptedGateway::new();
    let mut engine = mounted(&gw).await;
    assert_eq!(view(&engine).genres, vec!["Comedy", "Drama"]);

    gw.push(
        Op::SearchActors,
        Ok(vec![
            test_actor("nm0000158", "Tom Hanks"),
            test_actor("nm0000129", "Tom Cruise"),
        ]),
    );
    type_actor(&mut engine, "T");
    type_actor(&mut engine, "To");
    type_actor(&mut engine, "Tom");
    // Two quiet-period timers ("To" is stale) and one lookup response
    settle(&mut engine, 3).await;

    assert_eq!(
        gw.calls_of(Op::SearchActors),
        vec![GatewayCall::SearchActors {
            name: "Tom".to_string(),
            limit: 10,
        }]
    );
    let v = view(&engine);
    assert_eq!(v.actor.suggestions.len(), 2);
    assert!(v.actor.open);

    engine.process_message(Message::SelectActorSuggestion { index: 0 });
    let v = view(&engine);
    assert_eq!(v.actor.query, "Tom Hanks");
    assert_eq!(v.actor.resolved_id.as_deref(), Some("nm0000158"));
    assert!(!v.actor.open);

    gw.push(Op::SearchMovies, Ok(test_movies(PAGE_SIZE)));
    engine.process_message(Message::SearchMovies);
    settle(&mut engine, 1).await;
    let v = view(&engine);
    assert_eq!(v.movies.page, 1);
    assert_eq!(v.movies.items.len(), 7);
    assert!(v.movies.has_more);

    gw.push(Op::SearchMovies, Ok(test_movies(3)));
    engine.process_message(Message::NextPage);
    settle(&mut engine, 1).await;
    let v = view(&engine);
    assert_eq!(v.movies.page, 2);
    assert!(!v.movies.has_more);
    assert!(v.movies.can_go_back);

    assert_eq!(
        gw.calls_of(Op::SearchMovies),
        vec![
            GatewayCall::SearchMovies(MovieQuery {
                actor_id: Some("nm0000158".to_string()),
                limit: 7,
                offset: 0,
                ..Default::default()
            }),
            GatewayCall::SearchMovies(MovieQuery {
                actor_id: Some("nm0000158".to_string()),
                limit: 7,
                offset: 7,
                ..Default::default()
            }),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_shortening_query_cancels_pending_lookup() {
    let gw = ScriptedGateway::new();
    let mut engine = mounted(&gw).await;

    type_actor(&mut engine, "Tom");
    type_actor(&mut engine, "T");
    // The quiet-period timer still fires, and is ignored
    settle(&mut engine, 1).await;
    tokio::task::yield_now().await;

    assert_eq!(gw.call_count(Op::SearchActors), 0);
    assert!(view(&engine).actor.suggestions.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_one_lookup_per_quiet_window() {
    let gw = ScriptedGateway::new();
    let mut engine = mounted(&gw).await;
    gw.push(Op::SearchActors, Ok(vec![test_actor("nm1", "Meryl Streep")]));

    for text in ["Me", "Mer", "Mery", "Meryl"] {
        type_actor(&mut engine, text);
        tokio::time::advance(Duration::from_millis(100)).await;
    }
    // Four timers, one lookup response
    settle(&mut engine, 5).await;

    assert_eq!(gw.call_count(Op::SearchActors), 1);
    assert_eq!(view(&engine).actor.suggestions[0].name, "Meryl Streep");
}

#[tokio::test(start_paused = true)]
async fn test_superseded_lookup_response_is_discarded() {
    let gw = ScriptedGateway::new();
    let mut engine = mounted(&gw).await;

    let slow = gw.push_held(Op::SearchActors, Ok(vec![test_actor("nm1", "Tom Hanks")]));
    gw.push(Op::SearchActors, Ok(vec![test_actor("nm2", "Tom Cruise")]));

    type_actor(&mut engine, "Tom");
    settle(&mut engine, 1).await;
    type_actor(&mut engine, "Tom C");
    // Timer, then the fast response
    settle(&mut engine, 2).await;
    slow.release();
    settle(&mut engine, 1).await;

    let v = view(&engine);
    assert_eq!(v.actor.suggestions.len(), 1);
    assert_eq!(v.actor.suggestions[0].name, "Tom Cruise");
}

#[tokio::test(start_paused = true)]
async fn test_lookup_landing_while_query_is_edited_is_discarded() {
    let gw = ScriptedGateway::new();
    let mut engine = mounted(&gw).await;

    let slow = gw.push_held(Op::SearchActors, Ok(vec![test_actor("nm3", "Tom Selleck")]));
    gw.push(Op::SearchActors, Ok(vec![test_actor("nm1", "Tom Hanks")]));

    type_actor(&mut engine, "Tom");
    // Quiet period elapses, lookup for "Tom" goes out
    settle(&mut engine, 1).await;
    type_actor(&mut engine, "Tom Han");

    // The old response arrives before the new quiet period ends
    slow.release();
    settle(&mut engine, 1).await;
    let v = view(&engine);
    assert_eq!(v.actor.query, "Tom Han");
    assert!(v.actor.suggestions.is_empty());
    assert!(!v.actor.open);

    // Timer, then the response for the current text
    settle(&mut engine, 2).await;
    let v = view(&engine);
    assert_eq!(v.actor.suggestions.len(), 1);
    assert_eq!(v.actor.suggestions[0].name, "Tom Hanks");
    assert_eq!(gw.call_count(Op::SearchActors), 2);
}

#[tokio::test(start_paused = true)]
async fn test_blur_closes_after_grace_unless_refocused() {
    let gw = ScriptedGateway::new();
    let mut engine = mounted(&gw).await;
    gw.push(Op::SearchActors, Ok(vec![test_actor("nm1", "Tom Hanks")]));
    type_actor(&mut engine, "Tom");
    settle(&mut engine, 2).await;
    assert!(view(&engine).actor.open);

    engine.process_message(Message::ActorBlur);
    engine.process_message(Message::ActorFocus);
    settle(&mut engine, 1).await;
    assert!(view(&engine).actor.open);

    engine.process_message(Message::ActorBlur);
    assert!(view(&engine).actor.open);
    settle(&mut engine, 1).await;
    assert!(!view(&engine).actor.open);

    engine.process_message(Message::ActorFocus);
    assert!(view(&engine).actor.open);
}

#[tokio::test]
async fn test_detail_panels_are_exclusive() {
    let gw = ScriptedGateway::new();
    let mut engine = mounted(&gw).await;

    let slow_movie = gw.push_held(
        Op::GetMovie,
        Ok(MovieDetail {
            summary: test_movie("tt0109830", "Forrest Gump"),
            actors: vec![CastMember {
                id: "nm0000158".to_string(),
                name: "Tom Hanks".to_string(),
                category: "actor".to_string(),
            }],
        }),
    );
    gw.push(
        Op::GetActor,
        Ok(ActorDetail {
            id: "nm0000158".to_string(),
            name: "Tom Hanks".to_string(),
            birth_year: Some(1956),
            top_films: vec![],
        }),
    );

    engine.process_message(Message::OpenMovie {
        id: "tt0109830".to_string(),
    });
    engine.process_message(Message::OpenActor {
        id: "nm0000158".to_string(),
    });
    settle(&mut engine, 1).await;
    slow_movie.release();
    settle(&mut engine, 1).await;

    let v = view(&engine);
    assert!(matches!(v.detail.view, Some(DetailView::Actor(ref a)) if a.name == "Tom Hanks"));

    engine.process_message(Message::CloseDetail);
    assert!(view(&engine).detail.view.is_none());
}

#[tokio::test]
async fn test_search_error_is_inline_and_recoverable() {
    let gw = ScriptedGateway::new();
    let mut engine = mounted(&gw).await;

    gw.push::<Vec<sqlbench_core::MovieSummary>>(Op::SearchMovies, Err("Request failed: 500"));
    engine.process_message(Message::SetGenre {
        genre: Some("Drama".to_string()),
    });
    engine.process_message(Message::SearchMovies);
    settle(&mut engine, 1).await;
    assert_eq!(view(&engine).movies.error.as_deref(), Some("Request failed: 500"));

    gw.push(Op::SearchMovies, Ok(test_movies(2)));
    engine.process_message(Message::SearchMovies);
    settle(&mut engine, 1).await;
    let v = view(&engine);
    assert_eq!(v.movies.error, None);
    assert_eq!(v.movies.items.len(), 2);
    assert!(!v.movies.has_more);
}

#[tokio::test]
async fn test_genre_failure_is_tolerated() {
    let gw = ScriptedGateway::new();
    gw.push::<Vec<String>>(Op::ListGenres, Err("boom"));
    let mut engine = Engine::new(Settings::default(), gw.clone());
    engine.process_message(Message::OpenSuggestor);
    settle(&mut engine, 1).await;

    let v = view(&engine);
    assert!(v.genres.is_empty());
    assert_eq!(v.movies.error, None);
}

#[tokio::test]
async fn test_remount_discards_previous_session_responses() {
    let gw = ScriptedGateway::new();
    let mut engine = mounted(&gw).await;

    let slow = gw.push_held(Op::SearchMovies, Ok(test_movies(7)));
    engine.process_message(Message::SearchMovies);
    tokio::task::yield_now().await;

    engine.process_message(Message::CloseSuggestor);
    gw.push(Op::ListGenres, Ok(vec!["Drama"]));
    engine.process_message(Message::OpenSuggestor);
    settle(&mut engine, 1).await;
    slow.release();
    settle(&mut engine, 1).await;

    let v = view(&engine);
    assert!(v.movies.items.is_empty());
    assert!(!v.movies.loading);
}
