//! Read-only catalog of visual theme tokens.
//!
//! A [`ThemeCatalog`] is never empty: its first token is the default used
//! whenever an item names a theme the catalog does not carry.

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::popup::{
    FilterVariant, FramePreset, ImagePresentation, MediaFilter, OverlayPreset, SpecialEffect,
    ThemeAdvanced,
};

/// Id of the first built-in token, used when an item names no theme.
pub const DEFAULT_THEME_ID: &str = "retail_flash_sale";

string_enum! {
    /// Structural slide layout a theme asks the dispatcher for.
    pub enum SlideLayout {
        Default => "default",
        Split => "split",
        BannerTop => "banner_top",
        Monolith => "monolith",
        Asymmetric => "asymmetric",
        Fragmented => "fragmented",
        Cover => "cover",
        FeatureList => "feature_list",
        Countdown => "countdown",
    }
    default = Default;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub background: String,
    pub title: String,
    pub body: String,
    pub button_bg: String,
    pub button_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
}

/// A named bundle of colors, structural defaults, media treatment and effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeToken {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub filter: MediaFilter,
    pub filter_variant: FilterVariant,
    pub overlay_preset: OverlayPreset,
    pub frame_preset: FramePreset,
    /// Effect bundled with the theme; `None` or `none` means no effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_effect: Option<SpecialEffect>,
    pub colors: ThemeColors,
    pub recommended_font_family: String,
    pub recommended_image_presentation: ImagePresentation,
    pub defaults: ThemeAdvanced,
    #[serde(default)]
    pub layout: SlideLayout,
}

impl ThemeToken {
    /// The bundled effect, if it is a real one.
    pub fn bundled_effect(&self) -> Option<SpecialEffect> {
        self.special_effect.filter(|fx| *fx != SpecialEffect::None)
    }
}

/* --------------------------------------------------------------------------
   Catalog
   -------------------------------------------------------------------------- */

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeCatalog {
    tokens: Vec<ThemeToken>,
}

static BUILTIN: LazyLock<ThemeCatalog> = LazyLock::new(|| {
    ThemeCatalog::new(builtin::SEEDS.iter().map(builtin::Seed::token).collect())
        .expect("built-in theme catalog is valid")
});

impl ThemeCatalog {
    /// Build a catalog. Rejects an empty token list, blank ids and duplicate ids.
    pub fn new(tokens: Vec<ThemeToken>) -> Result<Self, CoreError> {
        if tokens.is_empty() {
            return Err(CoreError::Validation(
                "Theme catalog must contain at least one token".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(tokens.len());
        for token in &tokens {
            if token.id.trim().is_empty() {
                return Err(CoreError::Validation(
                    "Theme token id must not be empty".to_string(),
                ));
            }
            if !seen.insert(token.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate theme token id '{}'",
                    token.id
                )));
            }
        }

        Ok(Self { tokens })
    }

    /// The shared built-in catalog.
    pub fn builtin() -> &'static ThemeCatalog {
        &BUILTIN
    }

    /// The guaranteed default token (first entry).
    pub fn default_token(&self) -> &ThemeToken {
        &self.tokens[0]
    }

    pub fn lookup(&self, id: &str) -> Option<&ThemeToken> {
        self.tokens.iter().find(|t| t.id == id)
    }

    /// Token by id, or the default token when the id is unknown.
    pub fn get(&self, id: &str) -> &ThemeToken {
        self.lookup(id).unwrap_or_else(|| self.default_token())
    }

    /// Token by id, failing with [`CoreError::NotFound`] when unknown.
    pub fn find(&self, id: &str) -> Result<&ThemeToken, CoreError> {
        self.lookup(id).ok_or_else(|| CoreError::NotFound {
            entity: "ThemeToken",
            id: id.to_string(),
        })
    }

    pub fn tokens(&self) -> &[ThemeToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

/* --------------------------------------------------------------------------
   Built-in tokens
   -------------------------------------------------------------------------- */

mod builtin {
    use super::{SlideLayout, ThemeColors, ThemeToken, DEFAULT_THEME_ID};
    use crate::popup::{
        Backdrop as Bd, BorderRadius as Br, FilterVariant, FramePreset as Fp, HeaderAccent as Ha,
        ImagePresentation as Ip, MediaFilter as Mf, OverlayPreset as Op, Shadow as Sh,
        Spacing as Sp, SpecialEffect as Fx, SurfaceStyle as Ss, ThemeAdvanced,
    };
    use FilterVariant::{Soft, Strong};

    pub(super) struct Seed {
        id: &'static str,
        name: &'static str,
        description: &'static str,
        filter: (Mf, FilterVariant),
        overlay: Op,
        frame: Fp,
        effect: Fx,
        /// background, title, body, button background, button text
        colors: [&'static str; 5],
        border: Option<&'static str>,
        font: &'static str,
        presentation: Ip,
        defaults: ThemeAdvanced,
        layout: SlideLayout,
    }

    impl Seed {
        pub(super) fn token(&self) -> ThemeToken {
            let [background, title, body, button_bg, button_text] = self.colors;
            ThemeToken {
                id: self.id.to_string(),
                name: self.name.to_string(),
                description: Some(self.description.to_string()),
                filter: self.filter.0,
                filter_variant: self.filter.1,
                overlay_preset: self.overlay,
                frame_preset: self.frame,
                special_effect: Some(self.effect),
                colors: ThemeColors {
                    background: background.to_string(),
                    title: title.to_string(),
                    body: body.to_string(),
                    button_bg: button_bg.to_string(),
                    button_text: button_text.to_string(),
                    border: self.border.map(str::to_string),
                },
                recommended_font_family: self.font.to_string(),
                recommended_image_presentation: self.presentation,
                defaults: self.defaults,
                layout: self.layout,
            }
        }
    }

    const fn adv(
        surface_style: Ss,
        border_radius: Br,
        shadow: Sh,
        backdrop: Bd,
        header_accent: Ha,
        spacing: Sp,
    ) -> ThemeAdvanced {
        ThemeAdvanced {
            surface_style,
            border_radius,
            shadow,
            backdrop,
            header_accent,
            spacing,
        }
    }

    pub(super) const SEEDS: &[Seed] = &[
        // Retail
        Seed {
            id: DEFAULT_THEME_ID,
            name: "Flash Sale",
            description: "High urgency with a red pulse.",
            filter: (Mf::Saturate, Strong),
            overlay: Op::DarkStrong,
            frame: Fp::BoldBorder,
            effect: Fx::PulseRed,
            colors: ["#dc2626", "#ffffff", "#fee2e2", "#fbbf24", "#000000"],
            border: None,
            font: "Inter",
            presentation: Ip::HeroSingle,
            defaults: adv(Ss::Solid, Br::Soft, Sh::Strong, Bd::DimStrong, Ha::None, Sp::Compact),
            layout: SlideLayout::Default,
        },
        Seed {
            id: "retail_black_friday",
            name: "Black Friday",
            description: "Urban noise and digital grain.",
            filter: (Mf::Contrast, Strong),
            overlay: Op::None,
            frame: Fp::CleanBorder,
            effect: Fx::Noise,
            colors: ["#000000", "#ffffff", "#d4d4d4", "#ffffff", "#000000"],
            border: None,
            font: "Inter",
            presentation: Ip::Split2Col,
            defaults: adv(Ss::Flat, Br::None, Sh::Glow, Bd::DimStrong, Ha::TopBar, Sp::Normal),
            layout: SlideLayout::Monolith,
        },
        Seed {
            id: "retail_cyber_week",
            name: "Cyber Week",
            description: "Digital rain with glitches.",
            filter: (Mf::Saturate, Strong),
            overlay: Op::BottomGradient,
            frame: Fp::FloatingGlow,
            effect: Fx::Matrix,
            colors: ["#0f172a", "#38bdf8", "#e0f2fe", "#2563eb", "#ffffff"],
            border: None,
            font: "Inter",
            presentation: Ip::Collage3,
            defaults: adv(Ss::Glass, Br::Strong, Sh::Glow, Bd::BlurSoft, Ha::None, Sp::Comfortable),
            layout: SlideLayout::Fragmented,
        },
        // Luxury & editorial
        Seed {
            id: "luxury_vogue",
            name: "Vogue Editorial",
            description: "Runway camera flashes.",
            filter: (Mf::Grayscale, Soft),
            overlay: Op::None,
            frame: Fp::EditorialFrame,
            effect: Fx::CameraFlash,
            colors: ["#ffffff", "#171717", "#525252", "#171717", "#ffffff"],
            border: None,
            font: "Merriweather",
            presentation: Ip::HeroSingle,
            defaults: adv(Ss::Outline, Br::None, Sh::None, Bd::DimSoft, Ha::LeftBar, Sp::Comfortable),
            layout: SlideLayout::Asymmetric,
        },
        Seed {
            id: "luxury_gold_royal",
            name: "Gold Royal",
            description: "Floating gold particles.",
            filter: (Mf::Contrast, Soft),
            overlay: Op::VignetteSoft,
            frame: Fp::GlassCard,
            effect: Fx::Sparkles,
            colors: ["#1c1917", "#d6d3d1", "#a8a29e", "#b45309", "#ffffff"],
            border: None,
            font: "Merriweather",
            presentation: Ip::Split2Col,
            defaults: adv(Ss::Solid, Br::Soft, Sh::Strong, Bd::DimStrong, Ha::None, Sp::Comfortable),
            layout: SlideLayout::Cover,
        },
        // Modern & tech
        Seed {
            id: "modern_glass_frost",
            name: "Glass Frost",
            description: "Blurred bokeh lights.",
            filter: (Mf::None, Soft),
            overlay: Op::GlassBlurStrong,
            frame: Fp::GlassCard,
            effect: Fx::Bokeh,
            colors: ["rgba(255, 255, 255, 0.65)", "#0f172a", "#334155", "#0f172a", "#ffffff"],
            border: None,
            font: "Inter",
            presentation: Ip::MiniSlider,
            defaults: adv(Ss::Glass, Br::Strong, Sh::Soft, Bd::BlurSoft, Ha::None, Sp::Comfortable),
            layout: SlideLayout::Default,
        },
        Seed {
            id: "modern_spotify",
            name: "Dark Stream",
            description: "Gradient sound waves.",
            filter: (Mf::Saturate, Strong),
            overlay: Op::BottomGradient,
            frame: Fp::RoundedModern,
            effect: Fx::GradientWave,
            colors: ["#121212", "#1db954", "#b3b3b3", "#1db954", "#000000"],
            border: None,
            font: "Inter",
            presentation: Ip::StackCards,
            defaults: adv(Ss::Solid, Br::Soft, Sh::Strong, Bd::DimStrong, Ha::None, Sp::Normal),
            layout: SlideLayout::Split,
        },
        // Creative & bold
        Seed {
            id: "creative_brutalist",
            name: "Neo-Brutalism",
            description: "Glitch art and hard contrast.",
            filter: (Mf::Contrast, Strong),
            overlay: Op::None,
            frame: Fp::BoldBorder,
            effect: Fx::Glitch,
            colors: ["#f0abfc", "#000000", "#000000", "#000000", "#ffffff"],
            border: Some("#000000"),
            font: "Inter",
            presentation: Ip::HeroSingle,
            defaults: adv(Ss::Outline, Br::None, Sh::None, Bd::DimSoft, Ha::None, Sp::Compact),
            layout: SlideLayout::Monolith,
        },
        Seed {
            id: "creative_retro_90",
            name: "Vaporwave 90s",
            description: "CRT scan lines.",
            filter: (Mf::Vintage, Strong),
            overlay: Op::ColorBrandTint,
            frame: Fp::MinimalCorner,
            effect: Fx::Scanline,
            colors: ["#2e1065", "#f472b6", "#e879f9", "#22d3ee", "#000000"],
            border: None,
            font: "Inter",
            presentation: Ip::Collage3,
            defaults: adv(Ss::Solid, Br::Soft, Sh::Glow, Bd::DimStrong, Ha::Badge, Sp::Normal),
            layout: SlideLayout::Fragmented,
        },
        // Social & chat
        Seed {
            id: "social_whatsapp",
            name: "Zap Direct",
            description: "Chat bubbles drifting in the background.",
            filter: (Mf::None, Soft),
            overlay: Op::None,
            frame: Fp::CleanShadow,
            effect: Fx::Bokeh,
            colors: ["#dcf8c6", "#075e54", "#128c7e", "#25d366", "#ffffff"],
            border: None,
            font: "Inter",
            presentation: Ip::HeroSingle,
            defaults: adv(Ss::Solid, Br::Soft, Sh::Soft, Bd::DimSoft, Ha::TopBar, Sp::Compact),
            layout: SlideLayout::Default,
        },
        Seed {
            id: "social_insta_story",
            name: "Influencer",
            description: "Vibrant animated gradient.",
            filter: (Mf::Saturate, Soft),
            overlay: Op::TopGradient,
            frame: Fp::RoundedModern,
            effect: Fx::GradientWave,
            colors: ["#ffffff", "#be185d", "#374151", "#db2777", "#ffffff"],
            border: None,
            font: "Inter",
            presentation: Ip::MiniSlider,
            defaults: adv(Ss::Solid, Br::Full, Sh::Soft, Bd::BlurSoft, Ha::Badge, Sp::Comfortable),
            layout: SlideLayout::Cover,
        },
        // Seasonal
        Seed {
            id: "date_new_year",
            name: "New Year Gold",
            description: "Animated golden sparkles.",
            filter: (Mf::Contrast, Strong),
            overlay: Op::DarkSoft,
            frame: Fp::FloatingGlow,
            effect: Fx::Sparkles,
            colors: ["#000000", "#fbbf24", "#d4d4d4", "#fbbf24", "#000000"],
            border: Some("#fbbf24"),
            font: "Merriweather",
            presentation: Ip::HeroSingle,
            defaults: adv(Ss::Solid, Br::Soft, Sh::Glow, Bd::DimStrong, Ha::TopBar, Sp::Comfortable),
            layout: SlideLayout::Countdown,
        },
        Seed {
            id: "date_valentines",
            name: "Valentines",
            description: "Floating hearts.",
            filter: (Mf::Saturate, Soft),
            overlay: Op::VignetteSoft,
            frame: Fp::RoundedModern,
            effect: Fx::Hearts,
            colors: ["#fff1f2", "#be123c", "#881337", "#e11d48", "#ffffff"],
            border: None,
            font: "Caveat",
            presentation: Ip::StackCards,
            defaults: adv(Ss::Solid, Br::Strong, Sh::Soft, Bd::BlurSoft, Ha::None, Sp::Normal),
            layout: SlideLayout::Default,
        },
        Seed {
            id: "date_carnival",
            name: "Carnival Neon",
            description: "Confetti shower.",
            filter: (Mf::Saturate, Strong),
            overlay: Op::None,
            frame: Fp::BoldBorder,
            effect: Fx::Confetti,
            colors: ["#2e1065", "#f0abfc", "#e9d5ff", "#22d3ee", "#000000"],
            border: None,
            font: "Inter",
            presentation: Ip::Collage3,
            defaults: adv(Ss::Glass, Br::Strong, Sh::Glow, Bd::DimStrong, Ha::None, Sp::Compact),
            layout: SlideLayout::Fragmented,
        },
        Seed {
            id: "date_easter",
            name: "Easter Chocolate",
            description: "Soft sparkles.",
            filter: (Mf::Sepia, Soft),
            overlay: Op::None,
            frame: Fp::CleanBorder,
            effect: Fx::Sparkles,
            colors: ["#451a03", "#fcd34d", "#fed7aa", "#f59e0b", "#ffffff"],
            border: None,
            font: "Merriweather",
            presentation: Ip::MiniSlider,
            defaults: adv(Ss::Solid, Br::Soft, Sh::Strong, Bd::DimSoft, Ha::Badge, Sp::Normal),
            layout: SlideLayout::FeatureList,
        },
        Seed {
            id: "date_mothers",
            name: "Mothers Day",
            description: "Delicate bokeh lights.",
            filter: (Mf::Brightness, Soft),
            overlay: Op::GlassBlurSoft,
            frame: Fp::GlassCard,
            effect: Fx::Bokeh,
            colors: ["#fdf2f8", "#db2777", "#831843", "#db2777", "#ffffff"],
            border: None,
            font: "Merriweather",
            presentation: Ip::Split2Col,
            defaults: adv(Ss::Glass, Br::Full, Sh::Soft, Bd::BlurSoft, Ha::None, Sp::Comfortable),
            layout: SlideLayout::Asymmetric,
        },
        Seed {
            id: "date_fathers",
            name: "Fathers Day",
            description: "Sober look with scan lines.",
            filter: (Mf::Contrast, Soft),
            overlay: Op::DarkSoft,
            frame: Fp::CleanBorder,
            effect: Fx::Scanline,
            colors: ["#1e3a8a", "#ffffff", "#bfdbfe", "#ffffff", "#1e3a8a"],
            border: None,
            font: "Inter",
            presentation: Ip::HeroSingle,
            defaults: adv(Ss::Solid, Br::Soft, Sh::Strong, Bd::DimSoft, Ha::LeftBar, Sp::Normal),
            layout: SlideLayout::Split,
        },
        Seed {
            id: "date_halloween",
            name: "Halloween",
            description: "Pumpkins and fog.",
            filter: (Mf::Contrast, Strong),
            overlay: Op::VignetteStrong,
            frame: Fp::MinimalCorner,
            effect: Fx::Pumpkins,
            colors: ["#1a0b2e", "#f97316", "#a855f7", "#f97316", "#000000"],
            border: None,
            font: "Creepster",
            presentation: Ip::HeroSingle,
            defaults: adv(Ss::Outline, Br::None, Sh::Glow, Bd::DimStrong, Ha::None, Sp::Compact),
            layout: SlideLayout::Countdown,
        },
        Seed {
            id: "date_christmas",
            name: "Christmas",
            description: "Falling snow.",
            filter: (Mf::Contrast, Strong),
            overlay: Op::VignetteSoft,
            frame: Fp::RoundedModern,
            effect: Fx::Snow,
            colors: ["#14532d", "#fef2f2", "#bbf7d0", "#dc2626", "#ffffff"],
            border: None,
            font: "Merriweather",
            presentation: Ip::StackCards,
            defaults: adv(Ss::Solid, Br::Strong, Sh::Strong, Bd::DimSoft, Ha::Badge, Sp::Normal),
            layout: SlideLayout::Cover,
        },
        // Institutional
        Seed {
            id: "inst_clean_blue",
            name: "Corporate",
            description: "Clouds drifting by.",
            filter: (Mf::None, Soft),
            overlay: Op::None,
            frame: Fp::CleanBorder,
            effect: Fx::Clouds,
            colors: ["#f8fafc", "#0f172a", "#475569", "#0284c7", "#ffffff"],
            border: None,
            font: "Inter",
            presentation: Ip::Split2Col,
            defaults: adv(Ss::Solid, Br::Soft, Sh::Soft, Bd::BlurSoft, Ha::LeftBar, Sp::Normal),
            layout: SlideLayout::FeatureList,
        },
    ];
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */
