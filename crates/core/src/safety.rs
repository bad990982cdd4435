//! Safety & normalization of authoring-tool popup configuration.
//!
//! The authoring tool saves popup sets as loosely-typed JSON: fields may be
//! missing, wrong-typed, oversized or adversarial. [`normalize_popup_set`]
//! turns any JSON value into a bounded, fully-defaulted [`PopupSet`] and
//! reports every repair it made. It never fails and is deterministic: no
//! randomness, no clock reads.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::popup::{
    AdvertiserInfo, Backdrop, BorderRadius, CallToAction, CtaTarget, DeviceTarget, EffectConfig,
    EffectDirection, EffectIntensity, EffectPlacement, FilterVariant, FocusPoint, HeaderAccent,
    ImagePresentation, ImageStyle, MediaConfig, MediaFilter, MediaFit, OverlayPreset, PopupItem,
    PopupSet, PopupSize, Shadow, Spacing, SpecialEffect, SurfaceStyle, TargetPage, TextAlign,
    TextStyleOverride, ThemeAdvancedOverride, VideoSource, LEGACY_DEFAULT_TARGETS,
};
use crate::theme_catalog::DEFAULT_THEME_ID;

/* --------------------------------------------------------------------------
   Limits
   -------------------------------------------------------------------------- */

/// Maximum number of slides in one set (3 slides x 8 page contexts).
pub const MAX_ITEMS_PER_SET: usize = 24;

/// Maximum number of images attached to one slide.
pub const MAX_IMAGES_PER_ITEM: usize = 3;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 120;

/// Maximum body length in characters.
pub const MAX_BODY_LEN: usize = 800;

/// Maximum call-to-action label length in characters.
pub const MAX_CTA_TEXT_LEN: usize = 40;

/// Maximum length of subtitle, badge, note and contact fields.
pub const MAX_SHORT_TEXT_LEN: usize = 80;

/// Maximum item id / theme id length in characters.
pub const MAX_ID_LEN: usize = 64;

/// Maximum accepted URL length in bytes.
pub const MAX_URL_LEN: usize = 2048;

/// Title used when an item has none.
pub const DEFAULT_TITLE: &str = "Novo Destaque";

/// Call-to-action label used when an item has none.
pub const DEFAULT_CTA_TEXT: &str = "Saiba Mais";

/* --------------------------------------------------------------------------
   Patterns
   -------------------------------------------------------------------------- */

static HTTP_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://[a-z0-9](?:[a-z0-9.\-]*[a-z0-9])?(?::\d{1,5})?(?:[/?#][^\s\\]*)?$")
        .expect("valid regex")
});

static PROTOCOL_RELATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^//([A-Za-z0-9](?:[A-Za-z0-9.\-]*[A-Za-z0-9])?)(?::\d{1,5})?(?:[/?#][^\s\\]*)?$")
        .expect("valid regex")
});

static RELATIVE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/(?:[^/\\\s][^\s\\]*)?$").expect("valid regex"));

static COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:#[0-9a-fA-F]{3,8}|rgba?\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*(?:,\s*(?:0|1|0?\.\d+)\s*)?\)|[a-zA-Z]{3,20})$",
    )
    .expect("valid regex")
});

static FONT_FAMILY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[A-Za-z0-9 ,'"\-]+$"#).expect("valid regex"));

static FONT_SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.%]{1,12}$").expect("valid regex"));

/* --------------------------------------------------------------------------
   URL safety
   -------------------------------------------------------------------------- */

/// URL acceptance policy.
///
/// Absolute `http`/`https` URLs and first-party relative paths (`/promo`) are
/// always accepted. Protocol-relative URLs (`//cdn.example.com/a.png`) are
/// accepted only for hosts on the first-party list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlPolicy {
    first_party_hosts: Vec<String>,
}

impl UrlPolicy {
    pub fn new<I, S>(first_party_hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let first_party_hosts = first_party_hosts
            .into_iter()
            .map(|h| h.as_ref().trim().to_ascii_lowercase())
            .filter(|h| !h.is_empty())
            .collect();
        Self { first_party_hosts }
    }

    pub fn first_party_hosts(&self) -> &[String] {
        &self.first_party_hosts
    }

    /// Whether `url` may be used as a link target or media source.
    pub fn is_safe_url(&self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() || url.len() > MAX_URL_LEN || url.chars().any(char::is_control) {
            return false;
        }

        if let Some(caps) = PROTOCOL_RELATIVE_RE.captures(url) {
            let host = caps[1].to_ascii_lowercase();
            return self.first_party_hosts.iter().any(|h| *h == host);
        }
        if url.starts_with("//") {
            return false;
        }

        RELATIVE_PATH_RE.is_match(url) || HTTP_URL_RE.is_match(url)
    }
}

/// [`UrlPolicy::is_safe_url`] with no first-party hosts configured.
pub fn is_safe_url(url: &str) -> bool {
    UrlPolicy::default().is_safe_url(url)
}

/* --------------------------------------------------------------------------
   Text helpers
   -------------------------------------------------------------------------- */

/// Strip control characters (newlines and tabs survive) and surrounding
/// whitespace.
pub fn sanitize_text(s: &str) -> String {
    s.chars()
        .filter(|c| matches!(c, '\n' | '\t') || !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Sanitize and cut to at most `max` characters.
///
/// Returns the text and whether it had to be shortened.
pub fn clamp_text(s: &str, max: usize) -> (String, bool) {
    let clean = sanitize_text(s);
    if clean.chars().count() <= max {
        (clean, false)
    } else {
        (clean.chars().take(max).collect(), true)
    }
}

/* --------------------------------------------------------------------------
   Normalization
   -------------------------------------------------------------------------- */

/// Output of a normalization pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Normalized<T> {
    pub value: T,
    /// `true` when any field was repaired, truncated or dropped.
    pub modified: bool,
    /// Human-readable description of each repair, for editors.
    pub warnings: Vec<String>,
}

/// Normalize a raw popup set using the default [`UrlPolicy`].
pub fn normalize_popup_set(raw: &Value) -> Normalized<PopupSet> {
    normalize_popup_set_with(raw, &UrlPolicy::default())
}

/// Normalize a raw popup set.
///
/// - A missing set (`null`) is an empty set and not a modification.
/// - Anything that is not an object with an `items` list yields an empty set.
/// - Items beyond [`MAX_ITEMS_PER_SET`] are dropped; kept items keep their order.
/// - Duplicate ids are made unique by suffixing the item position.
pub fn normalize_popup_set_with(raw: &Value, policy: &UrlPolicy) -> Normalized<PopupSet> {
    let mut warnings = Vec::new();

    let raw_items: &[Value] = match raw {
        Value::Null => &[],
        Value::Object(obj) => match obj.get("items") {
            None | Some(Value::Null) => &[],
            Some(Value::Array(items)) => items,
            Some(_) => {
                warnings.push("'items' is not a list; the set was treated as empty".to_string());
                &[]
            }
        },
        _ => {
            warnings.push("Popup set is not an object; the set was treated as empty".to_string());
            &[]
        }
    };

    let kept = if raw_items.len() > MAX_ITEMS_PER_SET {
        warnings.push(format!(
            "Set has {} items; only the first {MAX_ITEMS_PER_SET} are kept",
            raw_items.len()
        ));
        &raw_items[..MAX_ITEMS_PER_SET]
    } else {
        raw_items
    };

    let mut seen_ids: HashSet<String> = HashSet::with_capacity(kept.len());
    let mut items = Vec::with_capacity(kept.len());

    for (index, raw_item) in kept.iter().enumerate() {
        let Normalized {
            value: mut item,
            warnings: mut item_warnings,
            ..
        } = normalize_popup_item_with(raw_item, index, policy);

        if seen_ids.contains(&item.id) {
            let mut candidate = format!("{}-{}", item.id, index + 1);
            while seen_ids.contains(&candidate) {
                candidate.push('_');
            }
            item_warnings.push(format!(
                "Duplicate id '{}' renamed to '{candidate}'",
                item.id
            ));
            item.id = candidate;
        }
        seen_ids.insert(item.id.clone());

        for warning in item_warnings {
            warnings.push(format!("Item {} (\"{}\"): {warning}", index + 1, item.title));
        }
        items.push(item);
    }

    Normalized {
        value: PopupSet { items },
        modified: !warnings.is_empty(),
        warnings,
    }
}

/// Normalize a single raw item using the default [`UrlPolicy`].
///
/// `index` is the item's position in its set; it seeds the derived id when
/// the item has none.
pub fn normalize_popup_item(raw: &Value, index: usize) -> Normalized<PopupItem> {
    normalize_popup_item_with(raw, index, &UrlPolicy::default())
}

/// Normalize a single raw item.
pub fn normalize_popup_item_with(
    raw: &Value,
    index: usize,
    policy: &UrlPolicy,
) -> Normalized<PopupItem> {
    let mut n = ItemNormalizer {
        policy,
        warnings: Vec::new(),
    };

    let empty = Map::new();
    let obj = match raw {
        Value::Object(obj) => obj,
        _ => {
            n.flag("item is not an object; replaced with defaults");
            &empty
        }
    };

    let item = PopupItem {
        id: n.id(obj, index),
        active: n.boolean(obj, &["active"], true),
        title: n
            .text(obj, &["title"], MAX_TITLE_LEN)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        body: n.text(obj, &["body"], MAX_BODY_LEN).unwrap_or_default(),
        subtitle: n.short_text(obj, &["subtitle"]),
        badge_text: n.short_text(obj, &["badgeText", "badge_text"]),
        small_note: n.short_text(obj, &["smallNote", "small_note"]),
        cta: n.call_to_action(obj),
        target_pages: n.target_pages(obj),
        device_target: n
            .tag(obj, &["deviceTarget", "device_target"], DeviceTarget::parse)
            .unwrap_or_default(),
        theme_preset_id: n
            .text(obj, &["themePresetId", "theme_preset_id"], MAX_ID_LEN)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_THEME_ID.to_string()),
        theme_advanced: n.theme_advanced(obj),
        effect_config: n.effect_config(obj),
        text_style: n.text_style(obj),
        media: n.media(obj),
        popup_size_preset: n
            .tag(obj, &["popupSizePreset", "popup_size_preset"], PopupSize::parse)
            .unwrap_or_default(),
        advertiser_info: n.advertiser_info(obj),
    };

    Normalized {
        value: item,
        modified: !n.warnings.is_empty(),
        warnings: n.warnings,
    }
}

/// Look up a field under any of its accepted spellings; `null` counts as absent.
fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

struct ItemNormalizer<'p> {
    policy: &'p UrlPolicy,
    warnings: Vec<String>,
}

impl ItemNormalizer<'_> {
    fn flag(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    fn id(&mut self, obj: &Map<String, Value>, index: usize) -> String {
        let derived = || format!("item-{}", index + 1);
        match lookup(obj, &["id"]) {
            Some(Value::String(s)) => {
                let (id, clamped) = clamp_text(s, MAX_ID_LEN);
                if id.is_empty() {
                    self.flag("empty id replaced with a positional id");
                    derived()
                } else {
                    if clamped {
                        self.flag(format!("id cut to {MAX_ID_LEN} characters"));
                    }
                    id
                }
            }
            Some(Value::Number(num)) => {
                self.flag("numeric id converted to text");
                num.to_string()
            }
            Some(_) => {
                self.flag("id must be text; replaced with a positional id");
                derived()
            }
            None => {
                self.flag("missing id replaced with a positional id");
                derived()
            }
        }
    }

    fn object<'a>(
        &mut self,
        obj: &'a Map<String, Value>,
        keys: &[&str],
    ) -> Option<&'a Map<String, Value>> {
        match lookup(obj, keys)? {
            Value::Object(inner) => Some(inner),
            _ => {
                self.flag(format!("'{}' must be an object; ignored", keys[0]));
                None
            }
        }
    }

    fn boolean(&mut self, obj: &Map<String, Value>, keys: &[&str], default: bool) -> bool {
        match lookup(obj, keys) {
            None => default,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                self.flag(format!("'{}' must be true/false; using {default}", keys[0]));
                default
            }
        }
    }

    fn text(&mut self, obj: &Map<String, Value>, keys: &[&str], max: usize) -> Option<String> {
        match lookup(obj, keys)? {
            Value::String(s) => {
                let (text, clamped) = clamp_text(s, max);
                if clamped {
                    self.flag(format!("'{}' cut to {max} characters", keys[0]));
                }
                Some(text)
            }
            _ => {
                self.flag(format!("'{}' must be text; ignored", keys[0]));
                None
            }
        }
    }

    fn short_text(&mut self, obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
        self.text(obj, keys, MAX_SHORT_TEXT_LEN)
            .filter(|t| !t.is_empty())
    }

    fn tag<T>(
        &mut self,
        obj: &Map<String, Value>,
        keys: &[&str],
        parse: fn(&str) -> Option<T>,
    ) -> Option<T> {
        match lookup(obj, keys)? {
            Value::String(s) => {
                let parsed = parse(s.trim());
                if parsed.is_none() {
                    self.flag(format!("unknown {} '{s}' ignored", keys[0]));
                }
                parsed
            }
            _ => {
                self.flag(format!("'{}' must be text; ignored", keys[0]));
                None
            }
        }
    }

    fn percent(&mut self, obj: &Map<String, Value>, keys: &[&str], default: u8) -> u8 {
        match lookup(obj, keys) {
            None => default,
            Some(Value::Number(num)) => {
                let raw = num.as_f64().unwrap_or(f64::from(default));
                let clamped = raw.round().clamp(0.0, 100.0);
                if !(0.0..=100.0).contains(&raw) {
                    self.flag(format!("'{}' clamped to {clamped}", keys[0]));
                }
                clamped as u8
            }
            Some(_) => {
                self.flag(format!("'{}' must be a number; using {default}", keys[0]));
                default
            }
        }
    }

    fn color(&mut self, obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
        let value = self.text(obj, keys, 64)?;
        if value.is_empty() {
            return None;
        }
        if COLOR_RE.is_match(&value) {
            Some(value)
        } else {
            self.flag(format!("'{}' is not a valid color; ignored", keys[0]));
            None
        }
    }

    fn matching(
        &mut self,
        obj: &Map<String, Value>,
        keys: &[&str],
        max: usize,
        pattern: &Regex,
    ) -> Option<String> {
        let value = self.text(obj, keys, max)?;
        if value.is_empty() {
            return None;
        }
        if pattern.is_match(&value) {
            Some(value)
        } else {
            self.flag(format!("'{}' contains unsupported characters; ignored", keys[0]));
            None
        }
    }

    /// A media URL: dropped (and flagged) when unsafe.
    fn media_url(&mut self, obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
        match lookup(obj, keys)? {
            Value::String(s) => {
                let url = s.trim();
                if url.is_empty() {
                    None
                } else if self.policy.is_safe_url(url) {
                    Some(url.to_string())
                } else {
                    self.flag(format!("unsafe '{}' removed", keys[0]));
                    None
                }
            }
            _ => {
                self.flag(format!("'{}' must be text; ignored", keys[0]));
                None
            }
        }
    }

    fn call_to_action(&mut self, obj: &Map<String, Value>) -> CallToAction {
        let text = self
            .text(obj, &["ctaText", "cta_text"], MAX_CTA_TEXT_LEN)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_CTA_TEXT.to_string());

        let target = match lookup(obj, &["ctaUrl", "cta_url"]) {
            None => CtaTarget::None,
            Some(Value::String(s)) => {
                let url = s.trim();
                if url.is_empty() {
                    CtaTarget::None
                } else if self.policy.is_safe_url(url) {
                    CtaTarget::Navigable {
                        url: url.to_string(),
                    }
                } else {
                    self.flag("CTA URL is not a safe link; the button is disabled");
                    let (raw, _) = clamp_text(s, MAX_URL_LEN);
                    CtaTarget::Unsafe { raw }
                }
            }
            Some(_) => {
                self.flag("'ctaUrl' must be text; the button has no link");
                CtaTarget::None
            }
        };

        CallToAction { text, target }
    }

    fn target_pages(&mut self, obj: &Map<String, Value>) -> Vec<TargetPage> {
        let tags = match lookup(obj, &["targetPages", "target_pages"]) {
            None => return LEGACY_DEFAULT_TARGETS.to_vec(),
            Some(Value::Array(tags)) => tags,
            Some(_) => {
                self.flag("'targetPages' must be a list; legacy targets applied");
                return LEGACY_DEFAULT_TARGETS.to_vec();
            }
        };

        let mut pages = Vec::with_capacity(tags.len());
        for tag in tags {
            match tag.as_str().map(str::trim).and_then(TargetPage::parse) {
                Some(page) if !pages.contains(&page) => pages.push(page),
                Some(_) => {}
                None => self.flag(format!("unknown target page {tag} dropped")),
            }
        }

        if pages.is_empty() {
            if !tags.is_empty() {
                self.flag("no usable target pages; legacy targets applied");
            }
            return LEGACY_DEFAULT_TARGETS.to_vec();
        }
        pages
    }

    fn theme_advanced(&mut self, obj: &Map<String, Value>) -> ThemeAdvancedOverride {
        let Some(adv) = self.object(obj, &["themeAdvanced", "theme_advanced"]) else {
            return ThemeAdvancedOverride::default();
        };
        ThemeAdvancedOverride {
            surface_style: self.tag(adv, &["surfaceStyle", "surface_style"], SurfaceStyle::parse),
            border_radius: self.tag(adv, &["borderRadius", "border_radius"], BorderRadius::parse),
            shadow: self.tag(adv, &["shadow"], Shadow::parse),
            backdrop: self.tag(adv, &["backdrop"], Backdrop::parse),
            header_accent: self.tag(adv, &["headerAccent", "header_accent"], HeaderAccent::parse),
            spacing: self.tag(adv, &["spacing"], Spacing::parse),
        }
    }

    fn effect_config(&mut self, obj: &Map<String, Value>) -> Option<EffectConfig> {
        let fx = self.object(obj, &["effectConfig", "effect_config"])?;
        let defaults = EffectConfig::default();
        Some(EffectConfig {
            enabled: self.boolean(fx, &["enabled"], defaults.enabled),
            effect: self
                .tag(fx, &["type", "effect"], SpecialEffect::parse)
                .unwrap_or(defaults.effect),
            intensity: self
                .tag(fx, &["intensity"], EffectIntensity::parse)
                .unwrap_or(defaults.intensity),
            placement: self
                .tag(fx, &["placement"], EffectPlacement::parse)
                .unwrap_or(defaults.placement),
            direction: self
                .tag(fx, &["direction"], EffectDirection::parse)
                .unwrap_or(defaults.direction),
            color: self.color(fx, &["color"]),
            opacity: self.percent(fx, &["opacity"], defaults.opacity),
        })
    }

    fn text_style(&mut self, obj: &Map<String, Value>) -> TextStyleOverride {
        let Some(ts) = self.object(obj, &["textStyle", "text_style"]) else {
            return TextStyleOverride::default();
        };
        TextStyleOverride {
            font_family: self.matching(
                ts,
                &["fontFamily", "font_family"],
                MAX_SHORT_TEXT_LEN,
                &FONT_FAMILY_RE,
            ),
            title_size: self.matching(ts, &["titleSize", "title_size"], 12, &FONT_SIZE_RE),
            body_size: self.matching(ts, &["bodySize", "body_size"], 12, &FONT_SIZE_RE),
            title_color: self.color(ts, &["titleColor", "title_color"]),
            body_color: self.color(ts, &["bodyColor", "body_color"]),
            button_color: self.color(ts, &["buttonColor", "button_color"]),
            button_text_color: self.color(ts, &["buttonTextColor", "button_text_color"]),
            text_align: self.tag(ts, &["textAlign", "text_align"], TextAlign::parse),
        }
    }

    fn media(&mut self, obj: &Map<String, Value>) -> MediaConfig {
        // Legacy item-level filter, used when the image style names none.
        let legacy_filter = self.tag(obj, &["filterId", "filter_id"], MediaFilter::parse);
        let legacy_variant =
            self.tag(obj, &["filterVariant", "filter_variant"], FilterVariant::parse);

        let Some(media) = self.object(obj, &["media"]) else {
            return MediaConfig {
                image_style: ImageStyle {
                    filter: legacy_filter,
                    filter_variant: legacy_variant,
                    ..ImageStyle::default()
                },
                ..MediaConfig::default()
            };
        };

        let images = self.images(media);
        let image_presentation = self.tag(
            media,
            &["imagePresentation", "image_presentation"],
            ImagePresentation::parse,
        );

        let mut image_style = match self.object(media, &["imageStyle", "image_style"]) {
            Some(style) => ImageStyle {
                fit: self.tag(style, &["fit"], MediaFit::parse).unwrap_or_default(),
                focus_point: self
                    .tag(style, &["focusPoint", "focus_point"], FocusPoint::parse)
                    .unwrap_or_default(),
                overlay_preset: self.tag(
                    style,
                    &["overlayPreset", "overlay_preset"],
                    OverlayPreset::parse,
                ),
                overlay_intensity: self.percent(style, &["overlayIntensity", "overlay_intensity"], 0),
                filter: self.tag(style, &["filterId", "filter"], MediaFilter::parse),
                filter_variant: self.tag(
                    style,
                    &["filterVariant", "filter_variant"],
                    FilterVariant::parse,
                ),
            },
            None => ImageStyle::default(),
        };
        image_style.filter = image_style.filter.or(legacy_filter);
        image_style.filter_variant = image_style.filter_variant.or(legacy_variant);

        let video = self
            .media_url(media, &["videoUrl", "video_url"])
            .map(|url| self.video(media, url));

        MediaConfig {
            images,
            image_presentation,
            image_style,
            video,
            logo_url: self.media_url(media, &["logoUrl", "logo_url"]),
            background_url: self.media_url(media, &["backgroundUrl", "background_url"]),
        }
    }

    fn images(&mut self, media: &Map<String, Value>) -> Vec<String> {
        let list = match lookup(media, &["images"]) {
            None => return Vec::new(),
            Some(Value::Array(list)) => list,
            Some(_) => {
                self.flag("'images' must be a list; ignored");
                return Vec::new();
            }
        };

        let kept = if list.len() > MAX_IMAGES_PER_ITEM {
            self.flag(format!(
                "{} images given; only the first {MAX_IMAGES_PER_ITEM} are kept",
                list.len()
            ));
            &list[..MAX_IMAGES_PER_ITEM]
        } else {
            &list[..]
        };

        let mut images = Vec::with_capacity(kept.len());
        for image in kept {
            match image.as_str().map(str::trim) {
                Some(url) if self.policy.is_safe_url(url) => images.push(url.to_string()),
                _ => self.flag("an image with an unsafe URL was removed"),
            }
        }
        images
    }

    fn video(&mut self, media: &Map<String, Value>, url: String) -> VideoSource {
        let settings = self.object(media, &["videoSettings", "video_settings"]);
        match settings {
            Some(s) => VideoSource {
                url,
                muted: self.boolean(s, &["muted"], true),
                looped: self.boolean(s, &["loop", "looped"], true),
                autoplay: self.boolean(s, &["autoplay"], true),
                fit: self.tag(s, &["fit"], MediaFit::parse).unwrap_or_default(),
            },
            None => VideoSource {
                url,
                muted: true,
                looped: true,
                autoplay: true,
                fit: MediaFit::Cover,
            },
        }
    }

    fn advertiser_info(&mut self, obj: &Map<String, Value>) -> Option<AdvertiserInfo> {
        let info = self.object(obj, &["advertiserInfo", "advertiser_info"])?;
        let Some(name) = self.short_text(info, &["name"]) else {
            self.flag("advertiser info without a name ignored");
            return None;
        };
        Some(AdvertiserInfo {
            id: self.text(info, &["id"], MAX_ID_LEN).unwrap_or_default(),
            name,
            phone: self.short_text(info, &["phone"]),
            whatsapp: self.short_text(info, &["whatsapp"]),
            address: self.short_text(info, &["address"]),
            logo_url: self.media_url(info, &["logoUrl", "logo_url"]),
            category: self.short_text(info, &["category"]),
        })
    }
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */
