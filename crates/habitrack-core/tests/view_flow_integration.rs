//! Integration tests for the list/detail flow.
//!
//! Drives the router and controllers the way the shell does: one intent at a
//! time, re-rendering after each.

use habitrack_core::{
    AppState, Config, DayKey, DetailView, HabitEvent, HabitStore, Navigation, Route, Router, View,
};

fn pinned_state() -> AppState {
    AppState::from_config(&Config::default())
        .unwrap()
        .pin_today(DayKey::parse("2024-03-10").unwrap())
}

fn list_view(router: &Router, state: &AppState) -> habitrack_core::ListView {
    match router.render(state) {
        View::List(view) => view,
        View::Detail(view) => panic!("expected list view, got {view:?}"),
    }
}

fn detail_view(router: &Router, state: &AppState) -> DetailView {
    match router.render(state) {
        View::Detail(view) => view,
        View::List(view) => panic!("expected detail view, got {view:?}"),
    }
}

#[test]
fn test_full_habit_lifecycle() {
    let mut state = pinned_state();
    let mut router = Router::new();

    // Create from the list
    router.list().toggle_create_form();
    let nav = router.list().submit_create(&mut state, "Meditate");
    router.navigate(nav);
    let view = list_view(&router, &state);
    assert_eq!(view.cards.len(), 3);
    assert_eq!(view.cards[2].title, "Meditate");
    let id = view.cards[2].id.clone();

    // Open its details and toggle the last two days
    let nav = router.list().open_detail(id.as_str());
    router.navigate(nav);
    assert_eq!(router.route(), Route::Detail(id.clone()));

    let window = state.window();
    for day in &window[3..] {
        let nav = router.detail().unwrap().toggle_day(&mut state, *day);
        router.navigate(nav);
    }
    let DetailView::Found { strip, .. } = detail_view(&router, &state) else {
        panic!("created habit should be found");
    };
    let flags: Vec<_> = strip.iter().map(|c| c.completed).collect();
    assert_eq!(flags, [false, false, false, true, true]);

    // The list shows the same strip
    router.navigate(Navigation::ToList);
    let view = list_view(&router, &state);
    let card_flags: Vec<_> = view.cards[2].strip.iter().map(|c| c.completed).collect();
    assert_eq!(card_flags, flags);

    // Rename from the detail view
    router.navigate(Navigation::ToDetail(id.clone()));
    let detail = router.detail().unwrap();
    detail.open_edit(&state);
    let nav = detail.submit_edit(&mut state, "Meditate 10 min");
    router.navigate(nav);
    assert_eq!(state.store().get(id.as_str()).unwrap().title(), "Meditate 10 min");

    // Delete returns to the list
    let nav = router.detail().unwrap().delete(&mut state);
    router.navigate(nav);
    assert_eq!(router.route(), Route::List);
    assert_eq!(list_view(&router, &state).cards.len(), 2);

    let events = state.store_mut().drain_events();
    assert!(matches!(events.first(), Some(HabitEvent::HabitCreated { .. })));
    assert!(matches!(events.last(), Some(HabitEvent::HabitDeleted { .. })));
    assert_eq!(events.len(), 5);
}

#[test]
fn test_unknown_detail_route_renders_not_found() {
    let state = pinned_state();
    let mut router = Router::new();

    router.go(Route::parse("/habits/404").unwrap());
    assert_eq!(
        detail_view(&router, &state),
        DetailView::NotFound { id: "404".into() }
    );
}

#[test]
fn test_stale_detail_view_recovers_to_list() {
    let mut state = pinned_state();
    let mut router = Router::new();
    router.go(Route::Detail("1".into()));

    // Removed behind the detail view's back
    state.store_mut().delete("1").unwrap();

    let today = state.today();
    let nav = router.detail().unwrap().toggle_day(&mut state, today);
    assert_eq!(nav, Navigation::ToList);
    router.navigate(nav);
    assert_eq!(router.route(), Route::List);
    assert_eq!(state.store().len(), 1);
}

#[test]
fn test_navigating_to_list_resets_list_forms() {
    let state = pinned_state();
    let mut router = Router::new();
    router.list().toggle_create_form();
    assert!(list_view(&router, &state).create_form.open);

    router.go(Route::Detail("1".into()));
    router.go(Route::List);
    assert!(!list_view(&router, &state).create_form.open);
}

#[test]
fn test_empty_store_renders_empty_list() {
    let state = AppState::new(HabitStore::new()).pin_today(DayKey::parse("2024-03-10").unwrap());
    let router = Router::new();
    let view = list_view(&router, &state);
    assert!(view.cards.is_empty());
    assert_eq!(view.window.len(), 5);
}
