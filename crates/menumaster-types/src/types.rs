//! Core types for menu analysis

use crate::error::{Error, Result};
use clap::ValueEnum;
use image::ImageFormat;
use serde::{Deserialize, Serialize};

/// Spice tolerance entered by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpiceLevel {
    Mild,
    #[default]
    Medium,
    Spicy,
    #[value(name = "very_spicy")]
    VerySpicy,
}

impl SpiceLevel {
    pub const ALL: [SpiceLevel; 4] = [
        SpiceLevel::Mild,
        SpiceLevel::Medium,
        SpiceLevel::Spicy,
        SpiceLevel::VerySpicy,
    ];

    /// Wire value, as inserted into the prompt
    pub fn as_str(&self) -> &'static str {
        match self {
            SpiceLevel::Mild => "mild",
            SpiceLevel::Medium => "medium",
            SpiceLevel::Spicy => "spicy",
            SpiceLevel::VerySpicy => "very_spicy",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpiceLevel::Mild => "Mild",
            SpiceLevel::Medium => "Medium",
            SpiceLevel::Spicy => "Spicy",
            SpiceLevel::VerySpicy => "Very Spicy",
        }
    }
}

impl std::fmt::Display for SpiceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's dining goal.
///
/// The known goals form a closed set; anything else is kept verbatim in
/// `Other` so callers passing arbitrary tags still get an analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiningScenario {
    #[default]
    None,
    PriceConscious,
    Healthy,
    Sharing,
    QuickLunch,
    FirstTimeIngredient,
    /// Tag outside the known set. Build it with `from_tag`; a known tag
    /// wrapped here by hand reads back as its own variant.
    Other(String),
}

impl DiningScenario {
    /// Goals offered by the selector, in display order
    pub const SELECTABLE: [DiningScenario; 5] = [
        DiningScenario::None,
        DiningScenario::PriceConscious,
        DiningScenario::Healthy,
        DiningScenario::Sharing,
        DiningScenario::QuickLunch,
    ];

    /// Map a tag to a scenario. Never fails.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "" | "none" => DiningScenario::None,
            "price_conscious" => DiningScenario::PriceConscious,
            "healthy" => DiningScenario::Healthy,
            "sharing" => DiningScenario::Sharing,
            "quick_lunch" => DiningScenario::QuickLunch,
            "first_time_ingredient" => DiningScenario::FirstTimeIngredient,
            other => DiningScenario::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            DiningScenario::None => "none",
            DiningScenario::PriceConscious => "price_conscious",
            DiningScenario::Healthy => "healthy",
            DiningScenario::Sharing => "sharing",
            DiningScenario::QuickLunch => "quick_lunch",
            DiningScenario::FirstTimeIngredient => "first_time_ingredient",
            DiningScenario::Other(tag) => tag,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            DiningScenario::None => "Just Exploring",
            DiningScenario::PriceConscious => "Price-conscious",
            DiningScenario::Healthy => "Healthy Options",
            DiningScenario::Sharing => "Sharing with Friends",
            DiningScenario::QuickLunch => "Quick Lunch Break",
            DiningScenario::FirstTimeIngredient => "Trying a New Ingredient",
            DiningScenario::Other(tag) => tag,
        }
    }
}

impl From<String> for DiningScenario {
    fn from(tag: String) -> Self {
        DiningScenario::from_tag(&tag)
    }
}

impl From<DiningScenario> for String {
    fn from(scenario: DiningScenario) -> Self {
        scenario.tag().to_string()
    }
}

impl std::fmt::Display for DiningScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Food preferences captured by value for one analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub likes: String,
    pub dislikes: String,
    pub spice_level: SpiceLevel,
    #[serde(default)]
    pub dining_scenario: DiningScenario,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            likes: "chicken or seafood, mild to medium spicy".to_string(),
            dislikes: "very spicy, raw fish, organ meats".to_string(),
            spice_level: SpiceLevel::Medium,
            dining_scenario: DiningScenario::None,
        }
    }
}

impl Preferences {
    pub fn with_likes(mut self, likes: impl Into<String>) -> Self {
        self.likes = likes.into();
        self
    }

    pub fn with_dislikes(mut self, dislikes: impl Into<String>) -> Self {
        self.dislikes = dislikes.into();
        self
    }

    pub fn with_spice_level(mut self, level: SpiceLevel) -> Self {
        self.spice_level = level;
        self
    }

    pub fn with_dining_scenario(mut self, scenario: DiningScenario) -> Self {
        self.dining_scenario = scenario;
        self
    }
}

/// A single menu photo held in memory for one analysis attempt
#[derive(Clone, PartialEq, Eq)]
pub struct MenuImage {
    data: Vec<u8>,
    mime_type: &'static str,
    name: Option<String>,
}

impl MenuImage {
    /// MIME types the model accepts as inline image data
    pub const SUPPORTED_MIME_TYPES: [&'static str; 5] = [
        "image/jpeg",
        "image/png",
        "image/webp",
        "image/heic",
        "image/heif",
    ];

    /// Wrap raw bytes, sniffing the MIME type from the content
    pub fn from_bytes(data: Vec<u8>, name: Option<String>) -> Result<Self> {
        let mime_type = match heif_mime_type(&data) {
            Some(mime_type) => mime_type,
            None => {
                let format = image::guess_format(&data)?;
                mime_type_for(format).ok_or_else(|| {
                    Error::InvalidImageFormat(format!("Unsupported image format: {:?}", format))
                })?
            }
        };

        Ok(Self {
            data,
            mime_type,
            name,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl std::fmt::Debug for MenuImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuImage")
            .field("mime_type", &self.mime_type)
            .field("name", &self.name)
            .field("bytes", &self.data.len())
            .finish()
    }
}

fn mime_type_for(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Png => Some("image/png"),
        ImageFormat::WebP => Some("image/webp"),
        _ => None,
    }
}

/// HEIC/HEIF detection from the ISO BMFF `ftyp` box.
///
/// Phone cameras write these; `image` does not recognise them.
fn heif_mime_type(data: &[u8]) -> Option<&'static str> {
    if data.len() < 12 || &data[4..8] != b"ftyp" {
        return None;
    }
    // AVIF also lists mif1 as compatible
    if matches!(&data[8..12], b"avif" | b"avis") {
        return None;
    }

    let box_len = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
    let box_end = box_len.clamp(12, data.len());

    // Major brand first, then the compatible brands after the minor version.
    let brands = std::iter::once(&data[8..12])
        .chain(data.get(16..box_end).unwrap_or_default().chunks_exact(4));

    let mut is_heif = false;
    for brand in brands {
        match brand {
            b"heic" | b"heix" | b"heim" | b"heis" | b"hevc" | b"hevx" => {
                return Some("image/heic")
            }
            b"mif1" | b"msf1" | b"heif" => is_heif = true,
            _ => {}
        }
    }
    is_heif.then_some("image/heif")
}

/// Menu summary section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuScanResults {
    pub cuisine_type: String,
    pub restaurant_style: String,
    pub language: String,
}

/// One explained menu item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub dish_name: String,
    pub explanation: String,
    pub key_ingredients: Vec<String>,
    pub taste_profile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergen_alerts: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub dish_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietaryAlert {
    pub dish_name: String,
    pub reason: String,
}

/// Titled free-text section (cultural insights, ordering strategy)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub content: String,
}

/// Structured breakdown returned by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub menu_scan_results: MenuScanResults,
    pub dish_decoder: Vec<Dish>,
    pub smart_recommendations: Vec<Recommendation>,
    pub dietary_alerts: Vec<DietaryAlert>,
    pub cultural_insights: Note,
    pub ordering_strategy: Note,
}
