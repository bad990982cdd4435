//! End-to-end popup flow: raw authoring JSON through normalization,
//! eligibility gating, theme resolution and carousel dispatch.

use promo_core::carousel::{Carousel, Navigation};
use promo_core::dispatch::plan_slides;
use promo_core::eligibility::{
    compute_eligible, session_key, DisplayMode, HostPhase, InMemorySessionStore, PageContext,
    PopupHost, SessionStore, PRESENT_DELAY_MS,
};
use promo_core::popup::{PopupSet, TargetPage};
use promo_core::safety::{normalize_popup_set, MAX_ITEMS_PER_SET};
use promo_core::theme::resolve_all;
use promo_core::theme_catalog::ThemeCatalog;
use serde_json::json;

fn scenario_set() -> PopupSet {
    let normalized = normalize_popup_set(&json!({
        "items": [
            { "id": "A", "active": true, "targetPages": ["home"], "title": "Promo A" },
            { "id": "B", "active": false, "targetPages": ["home"], "title": "Promo B" },
            { "id": "C", "active": true, "targetPages": ["all"], "title": "Promo C" }
        ]
    }));
    assert!(!normalized.modified, "{:?}", normalized.warnings);
    normalized.value
}

/// Mount, wait out the delay, close. Returns the ids that were presented.
fn view_and_close(
    host: &mut PopupHost<&mut InMemorySessionStore>,
    set: &PopupSet,
    page: TargetPage,
    now: u64,
) -> Option<Vec<String>> {
    host.mount(set, PageContext::new(page), now);
    if host.advance_clock(now + PRESENT_DELAY_MS) != HostPhase::Presenting {
        return None;
    }
    let ids = host
        .visible_slides()
        .map(|s| s.ids().into_iter().map(String::from).collect());
    assert!(host.close());
    ids
}

// ---------------------------------------------------------------------------
// Scenario: A/B/C across three page views of one session
// ---------------------------------------------------------------------------

#[test]
fn abc_scenario_across_one_session() {
    let set = scenario_set();
    let mut store = InMemorySessionStore::new();

    {
        let mut host = PopupHost::new(&mut store, DisplayMode::Live);

        // First home view shows A and C.
        let first = view_and_close(&mut host, &set, TargetPage::Home, 0);
        assert_eq!(first, Some(vec!["A".to_string(), "C".to_string()]));

        // Same context again: gated.
        let second = view_and_close(&mut host, &set, TargetPage::Home, 10_000);
        assert_eq!(second, None);
        assert_eq!(host.phase(), HostPhase::Dismissed);

        // A different context yields a different id set, which presents again.
        let third = view_and_close(&mut host, &set, TargetPage::NewsDetail, 20_000);
        assert_eq!(third, Some(vec!["C".to_string()]));
    }

    assert_eq!(store.len(), 2);
    assert!(store.has_seen(&session_key(["A", "C"])));
    assert!(store.has_seen(&session_key(["C"])));
}

#[test]
fn preview_ignores_session_state() {
    let set = scenario_set();
    let mut store = InMemorySessionStore::new();
    store.mark_seen(&session_key(["A", "B", "C"]));

    let mut host = PopupHost::new(&mut store, DisplayMode::Preview);
    assert_eq!(
        host.mount(&set, PageContext::new(TargetPage::JobsBoard), 0),
        HostPhase::Presenting
    );
    assert_eq!(host.visible_slides().map(|s| s.len()), Some(3));
}

// ---------------------------------------------------------------------------
// Normalization bounds
// ---------------------------------------------------------------------------

#[test]
fn oversized_sets_stay_bounded_through_the_pipeline() {
    let items: Vec<_> = (0..40)
        .map(|i| json!({ "id": format!("p{i:02}"), "targetPages": ["all"] }))
        .collect();
    let set = normalize_popup_set(&json!({ "items": items })).value;

    let eligible = compute_eligible(&set, DisplayMode::Live, &PageContext::new(TargetPage::Home))
        .expect("items are eligible");
    assert_eq!(eligible.len(), MAX_ITEMS_PER_SET);
    assert_eq!(eligible.items[0].id, "p00");
    assert_eq!(eligible.items[MAX_ITEMS_PER_SET - 1].id, "p23");
}

// ---------------------------------------------------------------------------
// Resolution and dispatch
// ---------------------------------------------------------------------------

#[test]
fn eligible_slides_resolve_and_follow_the_carousel() {
    let set = normalize_popup_set(&json!({
        "items": [
            { "id": "x", "targetPages": ["all"], "themePresetId": "date_halloween" },
            { "id": "y", "targetPages": ["all"], "themePresetId": "unknown_theme" },
            { "id": "z", "targetPages": ["all"], "themePresetId": "modern_spotify",
              "ctaUrl": "javascript:alert(1)" }
        ]
    }))
    .value;

    let eligible = compute_eligible(&set, DisplayMode::Live, &PageContext::new(TargetPage::Home))
        .expect("items are eligible");
    let descriptors = resolve_all(&eligible.items, ThemeCatalog::builtin());

    assert!(descriptors[1].theme_fallback_used);
    assert!(descriptors[2].cta.target.navigable_url().is_none());

    let mut carousel = Carousel::new(descriptors.len());
    assert_eq!(carousel.retreat(0), Navigation::Moved { from: 0, to: 2 });

    let plan = plan_slides(&descriptors, carousel.state());
    let current: Vec<&str> = plan
        .iter()
        .filter(|p| p.is_current)
        .map(|p| p.item_id.as_str())
        .collect();
    assert_eq!(current, vec!["z"]);
}
