//! Eligibility filtering, once-per-session gating and the popup host.
//!
//! [`compute_eligible`] decides which slides a page view may show.
//! [`PopupHost`] drives one page view through
//! `Idle -> Filtering -> AwaitingGate -> Presenting -> Dismissed`, consulting
//! an injected [`SessionStore`] so a slide set the visitor already dismissed
//! is not shown again in the same session.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::popup::{AdvertiserInfo, CtaTarget, DeviceClass, PopupItem, PopupSet, TargetPage};
use crate::timer::PendingTimer;
use crate::types::Millis;

/// Delay between a live page mount and the popup appearing.
pub const PRESENT_DELAY_MS: Millis = 1_500;

pub const SESSION_KEY_PREFIX: &str = "promo_popup_set_";
pub const SESSION_KEY_SUFFIX: &str = "_seen";

string_enum! {
    /// `preview` is used by the authoring tool: every item shows, the
    /// session store is never touched.
    pub enum DisplayMode {
        Live => "live",
        Preview => "preview",
    }
    default = Live;
}

/// Where a popup set is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageContext {
    pub page: TargetPage,
    /// When known, items restricted to another device class are filtered out.
    #[serde(default)]
    pub device: Option<DeviceClass>,
}

impl PageContext {
    pub fn new(page: TargetPage) -> Self {
        Self { page, device: None }
    }

    pub fn with_device(mut self, device: DeviceClass) -> Self {
        self.device = Some(device);
        self
    }
}

/* --------------------------------------------------------------------------
   Filtering
   -------------------------------------------------------------------------- */

/// Items that survive filtering, in set order.
///
/// Preview keeps everything. Live keeps active items, then items targeting
/// the page (or the wildcard), then items accepting the visitor's device.
pub fn filter_items<'a>(
    set: &'a PopupSet,
    mode: DisplayMode,
    context: &PageContext,
) -> Vec<&'a PopupItem> {
    match mode {
        DisplayMode::Preview => set.items.iter().collect(),
        DisplayMode::Live => set
            .items
            .iter()
            .filter(|item| item.active)
            .filter(|item| item.targets_page(context.page))
            .filter(|item| {
                context
                    .device
                    .is_none_or(|device| item.device_target.accepts(device))
            })
            .collect(),
    }
}

/// Session-store key for a set of item ids.
///
/// Order-independent: ids are sorted before hashing, so the same eligible
/// set always maps to the same key. Each id is length-prefixed, so ids
/// containing separators cannot collide with a split set.
pub fn session_key<I, S>(ids: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ids: Vec<String> = ids.into_iter().map(|s| s.as_ref().to_owned()).collect();
    ids.sort();
    let mut hasher = Sha256::new();
    for id in &ids {
        hasher.update(format!("{}:{id}", id.len()).as_bytes());
    }
    let digest = hasher.finalize();
    format!("{SESSION_KEY_PREFIX}{digest:x}{SESSION_KEY_SUFFIX}")
}

/// Whether `key` has the shape produced by [`session_key`].
pub fn is_session_key(key: &str) -> bool {
    key.strip_prefix(SESSION_KEY_PREFIX)
        .and_then(|rest| rest.strip_suffix(SESSION_KEY_SUFFIX))
        .is_some_and(|hex| {
            hex.len() == 64 && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        })
}

/// Non-empty, ordered list of slides a page view may present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibleSlides {
    pub items: Vec<PopupItem>,
    pub session_key: String,
}

impl EligibleSlides {
    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&PopupItem> {
        self.items.iter().find(|i| i.id == id)
    }
}

/// Filter `set` for `context`. `None` when nothing survives.
pub fn compute_eligible(
    set: &PopupSet,
    mode: DisplayMode,
    context: &PageContext,
) -> Option<EligibleSlides> {
    let items: Vec<PopupItem> = filter_items(set, mode, context)
        .into_iter()
        .cloned()
        .collect();
    if items.is_empty() {
        return None;
    }
    let session_key = session_key(items.iter().map(|i| i.id.as_str()));
    Some(EligibleSlides { items, session_key })
}

/* --------------------------------------------------------------------------
   Session store
   -------------------------------------------------------------------------- */

/// Per-session record of dismissed slide sets.
///
/// Keys are set once and never cleared for the lifetime of the session.
pub trait SessionStore {
    fn has_seen(&self, key: &str) -> bool;
    fn mark_seen(&mut self, key: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemorySessionStore {
    seen: HashSet<String>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    fn has_seen(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    fn mark_seen(&mut self, key: &str) {
        if !self.seen.contains(key) {
            self.seen.insert(key.to_owned());
        }
    }
}

impl<S: SessionStore + ?Sized> SessionStore for &mut S {
    fn has_seen(&self, key: &str) -> bool {
        (**self).has_seen(key)
    }

    fn mark_seen(&mut self, key: &str) {
        (**self).mark_seen(key)
    }
}

/* --------------------------------------------------------------------------
   Host
   -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HostPhase {
    Idle,
    /// Transient, inside [`PopupHost::mount`].
    Filtering,
    /// Live mode: waiting for the presentation delay to elapse.
    AwaitingGate,
    Presenting,
    Dismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    /// Nothing was eligible for this page view.
    NothingEligible,
    /// The eligible set was already dismissed earlier in the session.
    AlreadySeen,
    Closed,
    ActionTaken,
    AdvertiserInfoOpened,
}

impl DismissReason {
    /// Whether the popup was actually on screen before this dismissal.
    pub fn was_presented(self) -> bool {
        !matches!(self, Self::NothingEligible | Self::AlreadySeen)
    }
}

/// Result of pressing a slide's call-to-action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The host should navigate to this (safe) URL.
    Navigate(String),
    /// The host should show the advertiser's contact panel.
    ShowAdvertiserInfo(AdvertiserInfo),
    /// No link and no advertiser: the popup just closed.
    Closed,
    /// The CTA carries an unsafe URL; nothing happens.
    Disabled,
    /// Not presenting, or no such slide.
    Ignored,
}

/// Synchronous notifications from [`PopupHost`]. All methods default to no-ops.
pub trait HostListener {
    fn phase_changed(&mut self, _phase: HostPhase) {}
    fn presented(&mut self, _slides: &EligibleSlides) {}
    fn dismissed(&mut self, _reason: DismissReason) {}
    fn action_taken(&mut self, _url: &str) {}
    fn advertiser_info_opened(&mut self, _info: &AdvertiserInfo) {}
}

impl HostListener for () {}

/// Drives one page view's popup lifecycle.
#[derive(Debug)]
pub struct PopupHost<S, L = ()> {
    store: S,
    listener: L,
    mode: DisplayMode,
    phase: HostPhase,
    slides: Option<EligibleSlides>,
    present_timer: PendingTimer,
    seen_written: bool,
    advertiser_panel: Option<AdvertiserInfo>,
}

impl<S: SessionStore> PopupHost<S> {
    pub fn new(store: S, mode: DisplayMode) -> Self {
        Self::with_listener(store, (), mode)
    }
}

impl<S: SessionStore, L: HostListener> PopupHost<S, L> {
    pub fn with_listener(store: S, listener: L, mode: DisplayMode) -> Self {
        Self {
            store,
            listener,
            mode,
            phase: HostPhase::Idle,
            slides: None,
            present_timer: PendingTimer::idle(),
            seen_written: false,
            advertiser_panel: None,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn phase(&self) -> HostPhase {
        self.phase
    }

    /// The eligible slides of the current mount, if any survived filtering.
    pub fn slides(&self) -> Option<&EligibleSlides> {
        self.slides.as_ref()
    }

    /// Slides currently on screen.
    pub fn visible_slides(&self) -> Option<&EligibleSlides> {
        match self.phase {
            HostPhase::Presenting => self.slides.as_ref(),
            _ => None,
        }
    }

    pub fn advertiser_panel(&self) -> Option<&AdvertiserInfo> {
        self.advertiser_panel.as_ref()
    }

    /// Deadline of the pending presentation, if one is scheduled.
    pub fn presentation_deadline(&self) -> Option<Millis> {
        self.present_timer.deadline()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn set_phase(&mut self, phase: HostPhase) {
        if self.phase != phase {
            self.phase = phase;
            self.listener.phase_changed(phase);
        }
    }

    /// Start a page view. Any previous view is torn down first.
    ///
    /// Filtering always runs before the session store is consulted, and the
    /// store is never read or written in preview mode.
    pub fn mount(&mut self, set: &PopupSet, context: PageContext, now: Millis) -> HostPhase {
        self.unmount();
        self.set_phase(HostPhase::Filtering);

        let Some(slides) = compute_eligible(set, self.mode, &context) else {
            tracing::debug!(page = %context.page, mode = %self.mode, "No eligible popup items");
            self.dismiss(DismissReason::NothingEligible);
            return self.phase;
        };

        tracing::debug!(
            page = %context.page,
            mode = %self.mode,
            count = slides.len(),
            session_key = %slides.session_key,
            "Eligible popup items computed"
        );

        match self.mode {
            DisplayMode::Preview => {
                self.slides = Some(slides);
                self.present();
            }
            DisplayMode::Live => {
                if self.store.has_seen(&slides.session_key) {
                    tracing::debug!(session_key = %slides.session_key, "Popup set already seen");
                    self.slides = Some(slides);
                    self.dismiss(DismissReason::AlreadySeen);
                } else {
                    self.slides = Some(slides);
                    self.present_timer.arm(now, PRESENT_DELAY_MS);
                    self.set_phase(HostPhase::AwaitingGate);
                }
            }
        }
        self.phase
    }

    /// Report the current time; presents once the delay has elapsed.
    pub fn advance_clock(&mut self, now: Millis) -> HostPhase {
        if self.phase == HostPhase::AwaitingGate && self.present_timer.fire_if_due(now) {
            self.present();
        }
        self.phase
    }

    /// Explicit close. Returns `false` when nothing was on screen.
    pub fn close(&mut self) -> bool {
        if self.phase != HostPhase::Presenting {
            return false;
        }
        self.finish(DismissReason::Closed);
        true
    }

    /// Press the call-to-action of slide `item_id`.
    pub fn take_action(&mut self, item_id: &str) -> ActionOutcome {
        if self.phase != HostPhase::Presenting {
            return ActionOutcome::Ignored;
        }
        let Some(item) = self.slides.as_ref().and_then(|s| s.get(item_id)) else {
            return ActionOutcome::Ignored;
        };

        match (&item.cta.target, &item.advertiser_info) {
            (CtaTarget::Unsafe { .. }, _) => {
                tracing::debug!(item_id, "Ignoring disabled call-to-action");
                ActionOutcome::Disabled
            }
            (CtaTarget::Navigable { url }, _) => {
                let url = url.clone();
                self.listener.action_taken(&url);
                self.finish(DismissReason::ActionTaken);
                ActionOutcome::Navigate(url)
            }
            (CtaTarget::None, Some(info)) => {
                let info = info.clone();
                self.listener.advertiser_info_opened(&info);
                self.advertiser_panel = Some(info.clone());
                self.finish(DismissReason::AdvertiserInfoOpened);
                ActionOutcome::ShowAdvertiserInfo(info)
            }
            (CtaTarget::None, None) => {
                self.finish(DismissReason::Closed);
                ActionOutcome::Closed
            }
        }
    }

    /// Hide the advertiser panel opened by [`Self::take_action`].
    pub fn close_advertiser_info(&mut self) -> bool {
        self.advertiser_panel.take().is_some()
    }

    /// Tear down the page view, cancelling any pending presentation.
    pub fn unmount(&mut self) {
        self.present_timer.cancel();
        self.slides = None;
        self.seen_written = false;
        self.advertiser_panel = None;
        self.set_phase(HostPhase::Idle);
    }

    fn present(&mut self) {
        self.set_phase(HostPhase::Presenting);
        if let Some(slides) = &self.slides {
            tracing::info!(
                count = slides.len(),
                mode = %self.mode,
                "Presenting popup set"
            );
            self.listener.presented(slides);
        }
    }

    /// Leave `Presenting`, writing the seen record once (live mode only).
    fn finish(&mut self, reason: DismissReason) {
        if self.mode == DisplayMode::Live && !self.seen_written {
            if let Some(slides) = &self.slides {
                self.store.mark_seen(&slides.session_key);
                self.seen_written = true;
            }
        }
        tracing::info!(reason = ?reason, "Popup dismissed");
        self.dismiss(reason);
    }

    fn dismiss(&mut self, reason: DismissReason) {
        self.present_timer.cancel();
        self.set_phase(HostPhase::Dismissed);
        self.listener.dismissed(reason);
    }
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */
