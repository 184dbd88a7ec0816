use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

pub const A4_WIDTH_MM: f64 = 210.0;
pub const A4_HEIGHT_MM: f64 = 297.0;

pub const DEFAULT_BADGE_MM: f64 = 58.0;
pub const DEFAULT_BLEED_MM: f64 = 5.0;
pub const DEFAULT_SPACING_MM: f64 = 3.0;
pub const DEFAULT_MARGIN_MM: f64 = 6.0;

pub const MIN_BADGE_MM: f64 = 10.0;
pub const MAX_BADGE_MM: f64 = 100.0;
pub const MAX_BLEED_MM: f64 = 10.0;
pub const MIN_MARGIN_MM: f64 = 5.0;
pub const MAX_MARGIN_MM: f64 = 30.0;

/// Print sheet in millimeters with a uniform margin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetSpec {
    pub width_mm: f64,
    pub height_mm: f64,
    pub margin_mm: f64,
}

impl Default for SheetSpec {
    fn default() -> Self {
        SheetSpec::a4(DEFAULT_MARGIN_MM)
    }
}

impl SheetSpec {
    pub fn a4(margin_mm: f64) -> Self {
        SheetSpec {
            width_mm: A4_WIDTH_MM,
            height_mm: A4_HEIGHT_MM,
            margin_mm,
        }
    }

    /// Margin clamped to the range the UI offers.
    pub fn with_margin(self, margin_mm: f64) -> Self {
        SheetSpec {
            margin_mm: margin_mm.clamp(MIN_MARGIN_MM, MAX_MARGIN_MM),
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        let ok = self.width_mm > 0.0
            && self.height_mm > 0.0
            && self.margin_mm >= 0.0
            && self.margin_mm < self.width_mm.min(self.height_mm) / 2.0;
        if ok {
            Ok(())
        } else {
            Err(LayoutError::InvalidSheetSpec {
                width_mm: self.width_mm,
                height_mm: self.height_mm,
                margin_mm: self.margin_mm,
            })
        }
    }
}

/// Circle footprint used by the placement calculator. The diameter already
/// includes the bleed on both sides.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircleSpec {
    pub diameter_mm: f64,
    pub spacing_mm: f64,
}

impl CircleSpec {
    pub fn new(diameter_mm: f64, spacing_mm: f64) -> Self {
        CircleSpec {
            diameter_mm,
            spacing_mm,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.diameter_mm > 0.0 && self.spacing_mm >= 0.0 {
            Ok(())
        } else {
            Err(LayoutError::InvalidCircleSpec {
                diameter_mm: self.diameter_mm,
                spacing_mm: self.spacing_mm,
            })
        }
    }
}

/// Visible badge size plus the bleed printed around it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeSpec {
    pub badge_mm: f64,
    /// Bleed width on each side of the badge.
    pub bleed_mm: f64,
}

impl Default for BadgeSpec {
    fn default() -> Self {
        BadgeSpec {
            badge_mm: DEFAULT_BADGE_MM,
            bleed_mm: DEFAULT_BLEED_MM,
        }
    }
}

impl BadgeSpec {
    pub fn with_badge_mm(self, badge_mm: f64) -> Self {
        BadgeSpec {
            badge_mm: badge_mm.clamp(MIN_BADGE_MM, MAX_BADGE_MM),
            ..self
        }
    }

    pub fn with_bleed_mm(self, bleed_mm: f64) -> Self {
        BadgeSpec {
            bleed_mm: bleed_mm.clamp(0.0, MAX_BLEED_MM),
            ..self
        }
    }

    /// Total printed diameter: badge plus bleed on both sides.
    pub fn diameter_mm(&self) -> f64 {
        self.badge_mm + self.bleed_mm * 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgePreset {
    Small,
    Standard,
    Large,
}

impl BadgePreset {
    pub const ALL: [BadgePreset; 3] = [BadgePreset::Small, BadgePreset::Standard, BadgePreset::Large];

    pub fn badge(self) -> BadgeSpec {
        let badge_mm = match self {
            BadgePreset::Small => 32.0,
            BadgePreset::Standard => 58.0,
            BadgePreset::Large => 75.0,
        };
        BadgeSpec {
            badge_mm,
            bleed_mm: DEFAULT_BLEED_MM,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BadgePreset::Small => "small",
            BadgePreset::Standard => "standard",
            BadgePreset::Large => "large",
        }
    }
}

impl std::str::FromStr for BadgePreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        BadgePreset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = BadgePreset::ALL.iter().map(|p| p.name()).collect();
                format!("unknown badge preset '{s}' (expected one of {})", names.join(", "))
            })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStrategy {
    /// Rows and columns on a square pitch.
    Grid,
    /// Hexagonal packing with offset alternate rows.
    #[default]
    Compact,
}

impl LayoutStrategy {
    pub fn name(self) -> &'static str {
        match self {
            LayoutStrategy::Grid => "grid",
            LayoutStrategy::Compact => "compact",
        }
    }
}

impl std::str::FromStr for LayoutStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grid" => Ok(LayoutStrategy::Grid),
            "compact" | "hex" | "hexagonal" => Ok(LayoutStrategy::Compact),
            other => Err(format!("unknown layout strategy '{other}' (expected grid or compact)")),
        }
    }
}

/// Snapshot of every parameter a layout depends on. Callers build a fresh
/// one whenever their settings change and pass it into each computation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub sheet: SheetSpec,
    pub badge: BadgeSpec,
    pub spacing_mm: f64,
    pub strategy: LayoutStrategy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            sheet: SheetSpec::default(),
            badge: BadgeSpec::default(),
            spacing_mm: DEFAULT_SPACING_MM,
            strategy: LayoutStrategy::default(),
        }
    }
}

impl LayoutConfig {
    pub fn with_strategy(self, strategy: LayoutStrategy) -> Self {
        LayoutConfig { strategy, ..self }
    }

    pub fn with_spacing(self, spacing_mm: f64) -> Self {
        LayoutConfig { spacing_mm, ..self }
    }

    pub fn circle(&self) -> CircleSpec {
        CircleSpec::new(self.badge.diameter_mm(), self.spacing_mm)
    }

    pub fn validate(&self) -> Result<()> {
        self.sheet.validate()?;
        self.circle().validate()
    }
}
