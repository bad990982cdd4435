//! Popup set data model.
//!
//! These are the trusted, fully-defaulted shapes produced by
//! [`crate::safety::normalize_popup_set`]. Nothing past the normalizer
//! boundary reads the raw authoring-tool JSON.

use serde::{Deserialize, Serialize};

use crate::types::ItemId;

/* --------------------------------------------------------------------------
   Tags
   -------------------------------------------------------------------------- */

string_enum! {
    /// Page context a popup item may target.
    pub enum TargetPage {
        Home => "home",
        NewsDetail => "news_detail",
        JobsBoard => "jobs_board",
        AdvertiserPage => "advertiser_page",
        LoginRegister => "login_register",
        UserProfile => "user_profile",
        AdminArea => "admin_area",
        /// Wildcard: matches every page context.
        All => "all",
    }
    default = Home;
}

/// Targets assumed for items saved before targeting existed.
pub const LEGACY_DEFAULT_TARGETS: &[TargetPage] = &[TargetPage::Home, TargetPage::NewsDetail];

string_enum! {
    /// Sizing/layout class consumed by the slide dispatcher.
    pub enum PopupSize {
        Xs => "xs",
        Sm => "sm",
        Md => "md",
        Lg => "lg",
        Xl => "xl",
        Xxl => "2xl",
        Fullscreen => "fullscreen",
        BannerTop => "banner_top",
        BannerBottom => "banner_bottom",
        SidebarLeft => "sidebar_left",
        SidebarRight => "sidebar_right",
    }
    default = Md;
}

string_enum! {
    pub enum SurfaceStyle {
        Solid => "solid",
        Glass => "glass",
        Flat => "flat",
        Outline => "outline",
    }
    default = Solid;
}

string_enum! {
    pub enum BorderRadius {
        None => "none",
        Soft => "soft",
        Strong => "strong",
        Full => "full",
    }
    default = Soft;
}

string_enum! {
    pub enum Shadow {
        None => "none",
        Soft => "soft",
        Strong => "strong",
        Glow => "glow",
    }
    default = Soft;
}

string_enum! {
    pub enum Backdrop {
        None => "none",
        DimSoft => "dim_soft",
        DimStrong => "dim_strong",
        BlurSoft => "blur_soft",
    }
    default = DimSoft;
}

string_enum! {
    pub enum HeaderAccent {
        None => "none",
        TopBar => "top_bar",
        LeftBar => "left_bar",
        Badge => "badge",
    }
    default = None;
}

string_enum! {
    pub enum Spacing {
        Compact => "compact",
        Normal => "normal",
        Comfortable => "comfortable",
    }
    default = Normal;
}

string_enum! {
    pub enum ImagePresentation {
        HeroSingle => "hero_single",
        Split2Col => "split_2col",
        Collage3 => "collage_3",
        StackCards => "stack_cards",
        MiniSlider => "mini_slider",
    }
    default = HeroSingle;
}

string_enum! {
    pub enum MediaFit {
        Cover => "cover",
        Contain => "contain",
    }
    default = Cover;
}

string_enum! {
    pub enum FocusPoint {
        Center => "center",
        Top => "top",
        Bottom => "bottom",
        Left => "left",
        Right => "right",
    }
    default = Center;
}

string_enum! {
    pub enum MediaFilter {
        None => "none",
        Grayscale => "grayscale",
        Sepia => "sepia",
        Saturate => "saturate",
        Contrast => "contrast",
        Brightness => "brightness",
        Blur => "blur",
        Vintage => "vintage",
    }
    default = None;
}

string_enum! {
    pub enum FilterVariant {
        Soft => "soft",
        Strong => "strong",
    }
    default = Soft;
}

string_enum! {
    pub enum OverlayPreset {
        None => "none",
        DarkSoft => "dark_soft",
        DarkStrong => "dark_strong",
        BottomGradient => "bottom_gradient",
        TopGradient => "top_gradient",
        VignetteSoft => "vignette_soft",
        VignetteStrong => "vignette_strong",
        GlassBlurSoft => "glass_blur_soft",
        GlassBlurStrong => "glass_blur_strong",
        ColorBrandTint => "color_brand_tint",
    }
    default = None;
}

string_enum! {
    pub enum FramePreset {
        CleanBorder => "clean_border",
        CleanShadow => "clean_shadow",
        GlassCard => "glass_card",
        FloatingGlow => "floating_glow",
        EditorialFrame => "editorial_frame",
        RoundedModern => "rounded_modern",
        BoldBorder => "bold_border",
        MinimalCorner => "minimal_corner",
    }
    default = CleanBorder;
}

string_enum! {
    /// Animated special effect drawn around or over a slide.
    pub enum SpecialEffect {
        None => "none",
        Snow => "snow",
        Rain => "rain",
        Hearts => "hearts",
        Pumpkins => "pumpkins",
        Confetti => "confetti",
        Sparkles => "sparkles",
        PulseRed => "pulse_red",
        Matrix => "matrix",
        CameraFlash => "camera_flash",
        Scanline => "scanline",
        Noise => "noise",
        Bokeh => "bokeh",
        GradientWave => "gradient_wave",
        Clouds => "clouds",
        Glitch => "glitch",
    }
    default = None;
}

string_enum! {
    pub enum EffectIntensity {
        Low => "low",
        Normal => "normal",
        High => "high",
    }
    default = Normal;
}

string_enum! {
    /// Layer the effect is drawn on.
    pub enum EffectPlacement {
        Background => "background",
        OverMedia => "over_media",
        ScreenOverlay => "screen_overlay",
    }
    default = OverMedia;
}

string_enum! {
    pub enum EffectDirection {
        TopBottom => "top_bottom",
        BottomTop => "bottom_top",
        LeftRight => "left_right",
        RightLeft => "right_left",
        Random => "random",
    }
    default = TopBottom;
}

string_enum! {
    pub enum TextAlign {
        Left => "left",
        Center => "center",
        Right => "right",
    }
    default = Center;
}

string_enum! {
    /// Device class an item is restricted to.
    pub enum DeviceTarget {
        Mobile => "mobile",
        Desktop => "desktop",
        All => "all",
    }
    default = All;
}

string_enum! {
    /// Device class of the current visitor.
    pub enum DeviceClass {
        Mobile => "mobile",
        Desktop => "desktop",
    }
    default = Desktop;
}

impl DeviceTarget {
    /// Whether an item restricted to `self` may show on `device`.
    pub fn accepts(self, device: DeviceClass) -> bool {
        match self {
            Self::All => true,
            Self::Mobile => device == DeviceClass::Mobile,
            Self::Desktop => device == DeviceClass::Desktop,
        }
    }
}

/* --------------------------------------------------------------------------
   Structural theme fields
   -------------------------------------------------------------------------- */

/// Fully resolved structural style of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemeAdvanced {
    pub surface_style: SurfaceStyle,
    pub border_radius: BorderRadius,
    pub shadow: Shadow,
    pub backdrop: Backdrop,
    pub header_accent: HeaderAccent,
    pub spacing: Spacing,
}

/// Partial override of [`ThemeAdvanced`]; `None` means "inherit".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeAdvancedOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_style: Option<SurfaceStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<BorderRadius>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop: Option<Backdrop>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_accent: Option<HeaderAccent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
}

impl ThemeAdvancedOverride {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<ThemeAdvanced> for ThemeAdvancedOverride {
    fn from(full: ThemeAdvanced) -> Self {
        Self {
            surface_style: Some(full.surface_style),
            border_radius: Some(full.border_radius),
            shadow: Some(full.shadow),
            backdrop: Some(full.backdrop),
            header_accent: Some(full.header_accent),
            spacing: Some(full.spacing),
        }
    }
}

/* --------------------------------------------------------------------------
   Effects, typography, media
   -------------------------------------------------------------------------- */

/// Item-level special-effect descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectConfig {
    pub enabled: bool,
    pub effect: SpecialEffect,
    pub intensity: EffectIntensity,
    pub placement: EffectPlacement,
    pub direction: EffectDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Percentage, `0..=100`.
    pub opacity: u8,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            effect: SpecialEffect::None,
            intensity: EffectIntensity::Normal,
            placement: EffectPlacement::OverMedia,
            direction: EffectDirection::TopBottom,
            color: None,
            opacity: 100,
        }
    }
}

/// Partial typography/color override. Unset fields follow the theme.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyleOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
}

/// Per-image presentation. Filter and overlay fall back to the theme when unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageStyle {
    pub fit: MediaFit,
    pub focus_point: FocusPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay_preset: Option<OverlayPreset>,
    /// Percentage, `0..=100`.
    pub overlay_intensity: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<MediaFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_variant: Option<FilterVariant>,
}

/// A validated video reference with its playback settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSource {
    pub url: String,
    pub muted: bool,
    pub looped: bool,
    pub autoplay: bool,
    pub fit: MediaFit,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Safe image URLs, at most [`crate::safety::MAX_IMAGES_PER_ITEM`].
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_presentation: Option<ImagePresentation>,
    pub image_style: ImageStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_url: Option<String>,
}

/* --------------------------------------------------------------------------
   Call to action
   -------------------------------------------------------------------------- */

/// Where a call-to-action leads.
///
/// Only [`CtaTarget::Navigable`] may ever be handed to the host as a
/// navigation target. An unsafe URL is kept for display so editors can see
/// and fix it; it renders as a disabled button.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CtaTarget {
    #[default]
    None,
    Navigable {
        url: String,
    },
    Unsafe {
        raw: String,
    },
}

impl CtaTarget {
    pub fn navigable_url(&self) -> Option<&str> {
        match self {
            Self::Navigable { url } => Some(url),
            _ => None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Unsafe { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CallToAction {
    pub text: String,
    pub target: CtaTarget,
}

/// Advertiser contact card opened when a slide has no CTA URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvertiserInfo {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/* --------------------------------------------------------------------------
   Items and sets
   -------------------------------------------------------------------------- */

/// One slide of a popup set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupItem {
    pub id: ItemId,
    pub active: bool,
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_note: Option<String>,
    pub cta: CallToAction,
    pub target_pages: Vec<TargetPage>,
    pub device_target: DeviceTarget,
    pub theme_preset_id: String,
    pub theme_advanced: ThemeAdvancedOverride,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect_config: Option<EffectConfig>,
    pub text_style: TextStyleOverride,
    pub media: MediaConfig,
    pub popup_size_preset: PopupSize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertiser_info: Option<AdvertiserInfo>,
}

impl PopupItem {
    /// Targets used for page matching; empty lists fall back to
    /// [`LEGACY_DEFAULT_TARGETS`].
    pub fn effective_targets(&self) -> &[TargetPage] {
        if self.target_pages.is_empty() {
            LEGACY_DEFAULT_TARGETS
        } else {
            &self.target_pages
        }
    }

    /// Whether the item may show on `page` (wildcard or exact tag).
    pub fn targets_page(&self, page: TargetPage) -> bool {
        let targets = self.effective_targets();
        targets.contains(&TargetPage::All) || targets.contains(&page)
    }
}

/// Ordered collection of slides shown as one promotional unit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PopupSet {
    pub items: Vec<PopupItem>,
}

impl PopupSet {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */
