//! Slide layout dispatch contract.
//!
//! Maps each [`ResolvedDescriptor`] to a layout template and frame, and
//! combines them with the carousel state into the plan a renderer consumes.
//! Nothing here draws anything.

use serde::Serialize;

use crate::carousel::CarouselState;
use crate::popup::{EffectPlacement, PopupSize};
use crate::theme::ResolvedDescriptor;
use crate::theme_catalog::SlideLayout;

string_enum! {
    /// Sizing family of a [`PopupSize`].
    pub enum SizeClass {
        /// Centered dialog, `xs` through `2xl`.
        Standard => "standard",
        Fullscreen => "fullscreen",
        Banner => "banner",
        Sidebar => "sidebar",
    }
    default = Standard;
}

impl SizeClass {
    pub fn of(size: PopupSize) -> Self {
        match size {
            PopupSize::Xs
            | PopupSize::Sm
            | PopupSize::Md
            | PopupSize::Lg
            | PopupSize::Xl
            | PopupSize::Xxl => Self::Standard,
            PopupSize::Fullscreen => Self::Fullscreen,
            PopupSize::BannerTop | PopupSize::BannerBottom => Self::Banner,
            PopupSize::SidebarLeft | PopupSize::SidebarRight => Self::Sidebar,
        }
    }
}

string_enum! {
    /// Where the frame sits in the viewport.
    pub enum Anchor {
        Center => "center",
        Top => "top",
        Bottom => "bottom",
        Left => "left",
        Right => "right",
    }
    default = Center;
}

string_enum! {
    /// Stacking layer of the slide's special effect.
    pub enum EffectLayer {
        BehindContent => "behind_content",
        OverMedia => "over_media",
        AboveAll => "above_all",
    }
    default = OverMedia;
}

impl From<EffectPlacement> for EffectLayer {
    fn from(placement: EffectPlacement) -> Self {
        match placement {
            EffectPlacement::Background => Self::BehindContent,
            EffectPlacement::OverMedia => Self::OverMedia,
            EffectPlacement::ScreenOverlay => Self::AboveAll,
        }
    }
}

/// Outer box of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlideFrame {
    pub size_class: SizeClass,
    pub anchor: Anchor,
    /// Desktop max width; `None` fills the viewport.
    pub max_width_px: Option<u16>,
    /// Standard dialogs go edge-to-edge on small screens.
    pub full_bleed_on_mobile: bool,
}

impl SlideFrame {
    pub fn for_size(size: PopupSize) -> Self {
        let size_class = SizeClass::of(size);
        let (anchor, max_width_px) = match size {
            PopupSize::Xs => (Anchor::Center, Some(280)),
            PopupSize::Sm => (Anchor::Center, Some(384)),
            PopupSize::Md => (Anchor::Center, Some(448)),
            PopupSize::Lg => (Anchor::Center, Some(512)),
            PopupSize::Xl => (Anchor::Center, Some(576)),
            PopupSize::Xxl => (Anchor::Center, Some(672)),
            PopupSize::Fullscreen => (Anchor::Center, None),
            PopupSize::BannerTop => (Anchor::Top, Some(896)),
            PopupSize::BannerBottom => (Anchor::Bottom, Some(896)),
            PopupSize::SidebarLeft => (Anchor::Left, Some(384)),
            PopupSize::SidebarRight => (Anchor::Right, Some(384)),
        };
        Self {
            size_class,
            anchor,
            max_width_px,
            full_bleed_on_mobile: size_class == SizeClass::Standard,
        }
    }
}

/// Layout and frame chosen for one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlideTemplate {
    pub layout: SlideLayout,
    pub frame: SlideFrame,
    pub effect_layer: EffectLayer,
}

/// Pick the template for a resolved slide.
///
/// The theme's layout wins, except that banner-sized slides always use the
/// banner strip: the other layouts need vertical room a banner lacks.
pub fn select_template(descriptor: &ResolvedDescriptor) -> SlideTemplate {
    let frame = SlideFrame::for_size(descriptor.size);
    let layout = match frame.size_class {
        SizeClass::Banner => SlideLayout::BannerTop,
        _ => descriptor.layout,
    };
    SlideTemplate {
        layout,
        frame,
        effect_layer: descriptor.effect.placement.into(),
    }
}

/* --------------------------------------------------------------------------
   Carousel plan
   -------------------------------------------------------------------------- */

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlidePlan {
    pub index: usize,
    pub item_id: String,
    pub template: SlideTemplate,
    pub is_current: bool,
    /// Position relative to the current slide (`-1` is the previous one).
    pub offset: isize,
}

/// Arrows and dots, shown only when there is more than one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationChrome {
    pub show_arrows: bool,
    pub dot_count: usize,
    pub active_dot: Option<usize>,
}

pub fn navigation_chrome(count: usize, state: CarouselState) -> NavigationChrome {
    if count <= 1 {
        return NavigationChrome {
            show_arrows: false,
            dot_count: 0,
            active_dot: None,
        };
    }
    NavigationChrome {
        show_arrows: true,
        dot_count: count,
        active_dot: Some(state.current_index.min(count - 1)),
    }
}

/// One plan entry per descriptor, in order, marking the current slide.
pub fn plan_slides(descriptors: &[ResolvedDescriptor], state: CarouselState) -> Vec<SlidePlan> {
    descriptors
        .iter()
        .enumerate()
        .map(|(index, descriptor)| SlidePlan {
            index,
            item_id: descriptor.item_id.clone(),
            template: select_template(descriptor),
            is_current: index == state.current_index,
            offset: index as isize - state.current_index as isize,
        })
        .collect()
}
