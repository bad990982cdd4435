//! Theme resolution.
//!
//! Structural style is computed by folding an ordered list of partial
//! layers, `[engine fallback, theme token defaults, item override]`, one
//! field at a time: a later layer wins only for the fields it sets. Colors,
//! typography, media treatment and effects follow the same
//! item-over-theme-over-engine rule.
//!
//! A [`ResolvedDescriptor`] is fully owned and flat, so resolving many items
//! in parallel needs no coordination.

use serde::Serialize;

use crate::popup::{
    AdvertiserInfo, CallToAction, EffectConfig, EffectDirection, EffectIntensity,
    EffectPlacement, FilterVariant, FocusPoint, FramePreset, ImagePresentation, MediaFilter,
    MediaFit, OverlayPreset, PopupItem, PopupSize, SpecialEffect, TextAlign, ThemeAdvanced,
    ThemeAdvancedOverride, VideoSource,
};
use crate::theme_catalog::{SlideLayout, ThemeCatalog, ThemeToken};
use crate::types::ItemId;

string_enum! {
    /// Layer a resolved value came from.
    pub enum LayerSource {
        Engine => "engine",
        Theme => "theme",
        Item => "item",
    }
    default = Engine;
}

/* --------------------------------------------------------------------------
   Layer merge
   -------------------------------------------------------------------------- */

/// One partial record in the structural override chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeLayer {
    pub source: LayerSource,
    pub fields: ThemeAdvancedOverride,
}

impl ThemeLayer {
    /// Engine fallback constants; every field is set.
    pub fn engine() -> Self {
        Self {
            source: LayerSource::Engine,
            fields: ThemeAdvanced::default().into(),
        }
    }

    pub fn theme(token: &ThemeToken) -> Self {
        Self {
            source: LayerSource::Theme,
            fields: token.defaults.into(),
        }
    }

    pub fn item(item: &PopupItem) -> Self {
        Self {
            source: LayerSource::Item,
            fields: item.theme_advanced,
        }
    }
}

/// Which layer supplied each structural field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ThemeProvenance {
    pub surface_style: LayerSource,
    pub border_radius: LayerSource,
    pub shadow: LayerSource,
    pub backdrop: LayerSource,
    pub header_accent: LayerSource,
    pub spacing: LayerSource,
}

fn apply<T: Copy>(slot: &mut T, origin: &mut LayerSource, value: Option<T>, source: LayerSource) {
    if let Some(value) = value {
        *slot = value;
        *origin = source;
    }
}

/// Fold `layers` in order; later layers win per field.
///
/// Fields no layer sets keep the engine defaults.
pub fn merge_layers(layers: &[ThemeLayer]) -> (ThemeAdvanced, ThemeProvenance) {
    let mut merged = ThemeAdvanced::default();
    let mut origin = ThemeProvenance::default();

    for layer in layers {
        let f = &layer.fields;
        let src = layer.source;
        apply(&mut merged.surface_style, &mut origin.surface_style, f.surface_style, src);
        apply(&mut merged.border_radius, &mut origin.border_radius, f.border_radius, src);
        apply(&mut merged.shadow, &mut origin.shadow, f.shadow, src);
        apply(&mut merged.backdrop, &mut origin.backdrop, f.backdrop, src);
        apply(&mut merged.header_accent, &mut origin.header_accent, f.header_accent, src);
        apply(&mut merged.spacing, &mut origin.spacing, f.spacing, src);
    }

    (merged, origin)
}

/* --------------------------------------------------------------------------
   Resolved descriptor
   -------------------------------------------------------------------------- */

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedColors {
    pub background: String,
    pub title: String,
    pub body: String,
    pub button_bg: String,
    pub button_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTypography {
    pub font_family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_size: Option<String>,
    pub text_align: TextAlign,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMedia {
    pub images: Vec<String>,
    pub presentation: ImagePresentation,
    pub fit: MediaFit,
    pub focus_point: FocusPoint,
    pub filter: MediaFilter,
    pub filter_variant: FilterVariant,
    pub overlay_preset: OverlayPreset,
    pub overlay_intensity: u8,
    pub frame_preset: FramePreset,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedContent {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_note: Option<String>,
}

/// Everything a slide layout needs to render one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDescriptor {
    pub item_id: ItemId,
    /// Id of the token actually applied.
    pub theme_id: String,
    /// `true` when the item named a theme the catalog does not carry.
    pub theme_fallback_used: bool,
    pub layout: SlideLayout,
    pub size: PopupSize,
    pub structure: ThemeAdvanced,
    pub provenance: ThemeProvenance,
    pub colors: ResolvedColors,
    pub typography: ResolvedTypography,
    pub media: ResolvedMedia,
    pub effect: EffectConfig,
    pub effect_source: LayerSource,
    pub content: ResolvedContent,
    pub cta: CallToAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertiser_info: Option<AdvertiserInfo>,
}

/* --------------------------------------------------------------------------
   Resolution
   -------------------------------------------------------------------------- */

/// Resolve one item against `catalog`. Never fails: unknown theme ids use
/// the catalog's default token.
pub fn resolve(item: &PopupItem, catalog: &ThemeCatalog) -> ResolvedDescriptor {
    let token = catalog.get(&item.theme_preset_id);
    let theme_fallback_used = token.id != item.theme_preset_id;
    if theme_fallback_used {
        tracing::debug!(
            item_id = %item.id,
            requested = %item.theme_preset_id,
            applied = %token.id,
            "Unknown theme id, using default token"
        );
    }

    let (structure, provenance) = merge_layers(&[
        ThemeLayer::engine(),
        ThemeLayer::theme(token),
        ThemeLayer::item(item),
    ]);
    let (effect, effect_source) = resolve_effect(item.effect_config.as_ref(), token);

    ResolvedDescriptor {
        item_id: item.id.clone(),
        theme_id: token.id.clone(),
        theme_fallback_used,
        layout: token.layout,
        size: item.popup_size_preset,
        structure,
        provenance,
        colors: resolve_colors(item, token),
        typography: resolve_typography(item, token),
        media: resolve_media(item, token),
        effect,
        effect_source,
        content: ResolvedContent {
            title: item.title.clone(),
            body: item.body.clone(),
            subtitle: item.subtitle.clone(),
            badge_text: item.badge_text.clone(),
            small_note: item.small_note.clone(),
        },
        cta: item.cta.clone(),
        advertiser_info: item.advertiser_info.clone(),
    }
}

/// Resolve a slice of items, preserving order.
pub fn resolve_all(items: &[PopupItem], catalog: &ThemeCatalog) -> Vec<ResolvedDescriptor> {
    items.iter().map(|item| resolve(item, catalog)).collect()
}

fn resolve_colors(item: &PopupItem, token: &ThemeToken) -> ResolvedColors {
    let ts = &item.text_style;
    let c = &token.colors;
    ResolvedColors {
        background: c.background.clone(),
        title: ts.title_color.clone().unwrap_or_else(|| c.title.clone()),
        body: ts.body_color.clone().unwrap_or_else(|| c.body.clone()),
        button_bg: ts.button_color.clone().unwrap_or_else(|| c.button_bg.clone()),
        button_text: ts
            .button_text_color
            .clone()
            .unwrap_or_else(|| c.button_text.clone()),
        border: c.border.clone(),
    }
}

fn resolve_typography(item: &PopupItem, token: &ThemeToken) -> ResolvedTypography {
    let ts = &item.text_style;
    ResolvedTypography {
        font_family: ts
            .font_family
            .clone()
            .unwrap_or_else(|| token.recommended_font_family.clone()),
        title_size: ts.title_size.clone(),
        body_size: ts.body_size.clone(),
        text_align: ts.text_align.unwrap_or_default(),
    }
}

fn resolve_media(item: &PopupItem, token: &ThemeToken) -> ResolvedMedia {
    let m = &item.media;
    let style = &m.image_style;
    ResolvedMedia {
        images: m.images.clone(),
        presentation: m
            .image_presentation
            .unwrap_or(token.recommended_image_presentation),
        fit: style.fit,
        focus_point: style.focus_point,
        filter: style.filter.unwrap_or(token.filter),
        filter_variant: style.filter_variant.unwrap_or(token.filter_variant),
        overlay_preset: style.overlay_preset.unwrap_or(token.overlay_preset),
        overlay_intensity: style.overlay_intensity,
        frame_preset: token.frame_preset,
        video: m.video.clone(),
        logo_url: m.logo_url.clone(),
        background_url: m.background_url.clone(),
    }
}

/// An enabled item effect wins outright; otherwise the token's bundled
/// effect is synthesized with engine defaults; otherwise effects are off.
fn resolve_effect(item_effect: Option<&EffectConfig>, token: &ThemeToken) -> (EffectConfig, LayerSource) {
    if let Some(fx) = item_effect.filter(|fx| fx.enabled) {
        return (fx.clone(), LayerSource::Item);
    }

    match token.bundled_effect() {
        Some(effect) => (
            EffectConfig {
                enabled: true,
                effect,
                intensity: EffectIntensity::Normal,
                placement: EffectPlacement::OverMedia,
                direction: EffectDirection::TopBottom,
                color: None,
                opacity: 100,
            },
            LayerSource::Theme,
        ),
        None => (
            EffectConfig {
                enabled: false,
                effect: SpecialEffect::None,
                intensity: EffectIntensity::Normal,
                placement: EffectPlacement::Background,
                direction: EffectDirection::TopBottom,
                color: None,
                opacity: 0,
            },
            LayerSource::Engine,
        ),
    }
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::popup::{
        Backdrop, BorderRadius, HeaderAccent, Shadow, Spacing, SurfaceStyle, TextStyleOverride,
    };
    use crate::safety::normalize_popup_item;
    use serde_json::json;

    fn item_with_theme(theme: &str) -> PopupItem {
        normalize_popup_item(&json!({ "id": "a", "themePresetId": theme }), 0).value
    }

    fn vogue() -> &'static ThemeToken {
        ThemeCatalog::builtin().get("luxury_vogue")
    }

    // --- Layer merge ---

    #[test]
    fn later_layers_win_per_field() {
        let engine = ThemeLayer::engine();
        let theme = ThemeLayer {
            source: LayerSource::Theme,
            fields: ThemeAdvancedOverride {
                shadow: Some(Shadow::Glow),
                spacing: Some(Spacing::Compact),
                ..Default::default()
            },
        };
        let item = ThemeLayer {
            source: LayerSource::Item,
            fields: ThemeAdvancedOverride {
                spacing: Some(Spacing::Comfortable),
                ..Default::default()
            },
        };

        let (merged, origin) = merge_layers(&[engine, theme, item]);
        assert_eq!(merged.shadow, Shadow::Glow);
        assert_eq!(merged.spacing, Spacing::Comfortable);
        assert_eq!(merged.surface_style, SurfaceStyle::Solid);
        assert_eq!(origin.shadow, LayerSource::Theme);
        assert_eq!(origin.spacing, LayerSource::Item);
        assert_eq!(origin.surface_style, LayerSource::Engine);
    }

    #[test]
    fn empty_chain_yields_engine_defaults() {
        let (merged, origin) = merge_layers(&[]);
        assert_eq!(merged, ThemeAdvanced::default());
        assert_eq!(origin, ThemeProvenance::default());
    }

    #[test]
    fn single_field_override_changes_only_that_field() {
        let token = vogue();
        let base = token.defaults;

        let cases: Vec<(ThemeAdvancedOverride, ThemeAdvanced)> = vec![
            (
                ThemeAdvancedOverride { surface_style: Some(SurfaceStyle::Glass), ..Default::default() },
                ThemeAdvanced { surface_style: SurfaceStyle::Glass, ..base },
            ),
            (
                ThemeAdvancedOverride { border_radius: Some(BorderRadius::Full), ..Default::default() },
                ThemeAdvanced { border_radius: BorderRadius::Full, ..base },
            ),
            (
                ThemeAdvancedOverride { shadow: Some(Shadow::Glow), ..Default::default() },
                ThemeAdvanced { shadow: Shadow::Glow, ..base },
            ),
            (
                ThemeAdvancedOverride { backdrop: Some(Backdrop::BlurSoft), ..Default::default() },
                ThemeAdvanced { backdrop: Backdrop::BlurSoft, ..base },
            ),
            (
                ThemeAdvancedOverride { header_accent: Some(HeaderAccent::Badge), ..Default::default() },
                ThemeAdvanced { header_accent: HeaderAccent::Badge, ..base },
            ),
            (
                ThemeAdvancedOverride { spacing: Some(Spacing::Compact), ..Default::default() },
                ThemeAdvanced { spacing: Spacing::Compact, ..base },
            ),
        ];

        for (over, expected) in cases {
            let mut item = item_with_theme("luxury_vogue");
            item.theme_advanced = over;
            let resolved = resolve(&item, ThemeCatalog::builtin());
            assert_eq!(resolved.structure, expected, "override {over:?}");
        }
    }

    // --- Theme lookup ---

    #[test]
    fn unknown_theme_falls_back_to_default_token() {
        let resolved = resolve(&item_with_theme("no_such_theme"), ThemeCatalog::builtin());
        assert_eq!(resolved.theme_id, ThemeCatalog::builtin().default_token().id);
        assert!(resolved.theme_fallback_used);
    }

    #[test]
    fn known_theme_supplies_layout_and_colors() {
        let resolved = resolve(&item_with_theme("luxury_vogue"), ThemeCatalog::builtin());
        assert!(!resolved.theme_fallback_used);
        assert_eq!(resolved.layout, SlideLayout::Asymmetric);
        assert_eq!(resolved.colors.background, vogue().colors.background);
        assert_eq!(resolved.typography.font_family, "Merriweather");
        assert_eq!(resolved.media.filter, MediaFilter::Grayscale);
        assert_eq!(resolved.provenance.spacing, LayerSource::Theme);
    }

    // --- Colors and typography ---

    #[test]
    fn text_style_overrides_individual_colors() {
        let mut item = item_with_theme("luxury_vogue");
        item.text_style = TextStyleOverride {
            button_color: Some("#ff0000".into()),
            font_family: Some("Caveat".into()),
            ..Default::default()
        };
        let resolved = resolve(&item, ThemeCatalog::builtin());
        let token = vogue();

        assert_eq!(resolved.colors.button_bg, "#ff0000");
        assert_eq!(resolved.colors.title, token.colors.title);
        assert_eq!(resolved.colors.body, token.colors.body);
        assert_eq!(resolved.colors.button_text, token.colors.button_text);
        assert_eq!(resolved.typography.font_family, "Caveat");
    }

    #[test]
    fn explicit_image_presentation_beats_recommendation() {
        let mut item = item_with_theme("luxury_vogue");
        assert_eq!(
            resolve(&item, ThemeCatalog::builtin()).media.presentation,
            ImagePresentation::HeroSingle
        );
        item.media.image_presentation = Some(ImagePresentation::Collage3);
        assert_eq!(
            resolve(&item, ThemeCatalog::builtin()).media.presentation,
            ImagePresentation::Collage3
        );
    }

    // --- Effects ---

    #[test]
    fn enabled_item_effect_wins() {
        let mut item = item_with_theme("date_christmas");
        item.effect_config = Some(EffectConfig {
            enabled: true,
            effect: SpecialEffect::Confetti,
            intensity: EffectIntensity::High,
            ..Default::default()
        });
        let resolved = resolve(&item, ThemeCatalog::builtin());
        assert_eq!(resolved.effect.effect, SpecialEffect::Confetti);
        assert_eq!(resolved.effect.intensity, EffectIntensity::High);
        assert_eq!(resolved.effect_source, LayerSource::Item);
    }

    #[test]
    fn disabled_item_effect_defers_to_theme() {
        let mut item = item_with_theme("date_christmas");
        item.effect_config = Some(EffectConfig {
            enabled: false,
            effect: SpecialEffect::Confetti,
            ..Default::default()
        });
        let resolved = resolve(&item, ThemeCatalog::builtin());
        assert!(resolved.effect.enabled);
        assert_eq!(resolved.effect.effect, SpecialEffect::Snow);
        assert_eq!(resolved.effect.placement, EffectPlacement::OverMedia);
        assert_eq!(resolved.effect.opacity, 100);
        assert_eq!(resolved.effect_source, LayerSource::Theme);
    }

    #[test]
    fn no_effect_anywhere_is_disabled() {
        let mut token = vogue().clone();
        token.special_effect = Some(SpecialEffect::None);
        let catalog = ThemeCatalog::new(vec![token]).unwrap();

        let resolved = resolve(&item_with_theme("luxury_vogue"), &catalog);
        assert!(!resolved.effect.enabled);
        assert_eq!(resolved.effect.placement, EffectPlacement::Background);
        assert_eq!(resolved.effect.opacity, 0);
        assert_eq!(resolved.effect_source, LayerSource::Engine);
    }

    #[test]
    fn resolve_all_preserves_order() {
        let items = vec![item_with_theme("date_easter"), item_with_theme("date_halloween")];
        let resolved = resolve_all(&items, ThemeCatalog::builtin());
        let themes: Vec<&str> = resolved.iter().map(|d| d.theme_id.as_str()).collect();
        assert_eq!(themes, vec!["date_easter", "date_halloween"]);
    }
}
