//! Closed content vocabularies shared by the pipeline, the database rows,
//! and the HTTP DTOs.
//!
//! Wire spellings are load-bearing: they appear verbatim in prompts, in
//! provider JSON output, and in text columns, so the serde representations
//! here are the single source of truth for them. Two values are deliberately
//! not lowercase (`FOMO`, `DMs`).

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Platforms
// ---------------------------------------------------------------------------

/// Social platforms a campaign can target. Campaigns pick 1-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Instagram,
    Tiktok,
    Facebook,
    GoogleBusiness,
}

impl Platform {
    pub const ALL: [Self; 4] = [
        Self::Instagram,
        Self::Tiktok,
        Self::Facebook,
        Self::GoogleBusiness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Tiktok => "tiktok",
            Self::Facebook => "facebook",
            Self::GoogleBusiness => "google_business",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "instagram" => Ok(Self::Instagram),
            "tiktok" => Ok(Self::Tiktok),
            "facebook" => Ok(Self::Facebook),
            "google_business" => Ok(Self::GoogleBusiness),
            _ => Err(format!(
                "Invalid platform '{s}'. Must be one of: {}",
                joined(&Self::ALL.map(|p| p.as_str()))
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Post formats
// ---------------------------------------------------------------------------

/// Content format of a single post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostFormat {
    Image,
    Carousel,
    Reel,
    Story,
}

impl PostFormat {
    pub const ALL: [Self; 4] = [Self::Image, Self::Carousel, Self::Reel, Self::Story];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Carousel => "carousel",
            Self::Reel => "reel",
            Self::Story => "story",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "image" => Ok(Self::Image),
            "carousel" => Ok(Self::Carousel),
            "reel" => Ok(Self::Reel),
            "story" => Ok(Self::Story),
            _ => Err(format!(
                "Invalid post format '{s}'. Must be one of: {}",
                joined(&Self::ALL.map(|f| f.as_str()))
            )),
        }
    }

    /// Hooks are mandatory for short-video formats and forbidden elsewhere.
    pub fn requires_hook(&self) -> bool {
        matches!(self, Self::Reel | Self::Story)
    }

    /// Whether the format is filmed rather than photographed. Used when
    /// sizing the shot list.
    pub fn is_video(&self) -> bool {
        matches!(self, Self::Reel | Self::Story)
    }
}

// ---------------------------------------------------------------------------
// Post status
// ---------------------------------------------------------------------------

/// Approval state of a post. Everything the pipeline creates starts as draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Approved,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Approved => "approved",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "draft" => Ok(Self::Draft),
            "approved" => Ok(Self::Approved),
            _ => Err(format!("Invalid post status '{s}'. Must be draft or approved")),
        }
    }
}

// ---------------------------------------------------------------------------
// Behavioral triggers
// ---------------------------------------------------------------------------

/// Psychological lever a post leans on. Model output is checked against this
/// set; anything else is coerced to [`BehavioralTrigger::DEFAULT`] rather
/// than rejected, because the provider occasionally improvises spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehavioralTrigger {
    Reciprocity,
    #[serde(rename = "FOMO")]
    Fomo,
    Scarcity,
    Trust,
    Nostalgia,
    Belonging,
    Curiosity,
    Urgency,
}

impl BehavioralTrigger {
    pub const ALL: [Self; 8] = [
        Self::Reciprocity,
        Self::Fomo,
        Self::Scarcity,
        Self::Trust,
        Self::Nostalgia,
        Self::Belonging,
        Self::Curiosity,
        Self::Urgency,
    ];

    /// Fallback used when the provider returns an out-of-vocabulary trigger.
    pub const DEFAULT: Self = Self::Curiosity;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reciprocity => "reciprocity",
            Self::Fomo => "FOMO",
            Self::Scarcity => "scarcity",
            Self::Trust => "trust",
            Self::Nostalgia => "nostalgia",
            Self::Belonging => "belonging",
            Self::Curiosity => "curiosity",
            Self::Urgency => "urgency",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        Self::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| {
                format!(
                    "Invalid behavioral_trigger '{s}'. Must be one of: {}",
                    joined(&Self::ALL.map(|t| t.as_str()))
                )
            })
    }
}

// ---------------------------------------------------------------------------
// Strategy types
// ---------------------------------------------------------------------------

/// High-level content strategy bucket for a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyType {
    Educational,
    Promotional,
    Engagement,
    Testimonial,
    BehindTheScenes,
}

impl StrategyType {
    pub const ALL: [Self; 5] = [
        Self::Educational,
        Self::Promotional,
        Self::Engagement,
        Self::Testimonial,
        Self::BehindTheScenes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Educational => "educational",
            Self::Promotional => "promotional",
            Self::Engagement => "engagement",
            Self::Testimonial => "testimonial",
            Self::BehindTheScenes => "behind-the-scenes",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        Self::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| {
                format!(
                    "Invalid strategy_type '{s}'. Must be one of: {}",
                    joined(&Self::ALL.map(|t| t.as_str()))
                )
            })
    }
}

// ---------------------------------------------------------------------------
// Tracking focus
// ---------------------------------------------------------------------------

/// The single metric a post asks the owner to watch. Corresponds to the
/// post's place in the funnel (awareness posts track views, conversion posts
/// track clicks or redemptions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingFocus {
    Views,
    Saves,
    Shares,
    Comments,
    Clicks,
    #[serde(rename = "DMs")]
    Dms,
    Redemptions,
    Attendance,
}

impl TrackingFocus {
    pub const ALL: [Self; 8] = [
        Self::Views,
        Self::Saves,
        Self::Shares,
        Self::Comments,
        Self::Clicks,
        Self::Dms,
        Self::Redemptions,
        Self::Attendance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Views => "views",
            Self::Saves => "saves",
            Self::Shares => "shares",
            Self::Comments => "comments",
            Self::Clicks => "clicks",
            Self::Dms => "DMs",
            Self::Redemptions => "redemptions",
            Self::Attendance => "attendance",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        Self::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| {
                format!(
                    "Invalid tracking_focus '{s}'. Must be one of: {}",
                    joined(&Self::ALL.map(|t| t.as_str()))
                )
            })
    }
}

// ---------------------------------------------------------------------------
// Sales channels
// ---------------------------------------------------------------------------

/// Where the campaign sends buyers. Drives the CTA destination phrase used
/// throughout generated copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalesChannel {
    Website,
    Etsy,
    Amazon,
    Shopify,
    InstagramShop,
    LocalMarket,
    PhysicalStore,
    EmailList,
    Other,
}

impl SalesChannel {
    pub const ALL: [Self; 9] = [
        Self::Website,
        Self::Etsy,
        Self::Amazon,
        Self::Shopify,
        Self::InstagramShop,
        Self::LocalMarket,
        Self::PhysicalStore,
        Self::EmailList,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Etsy => "etsy",
            Self::Amazon => "amazon",
            Self::Shopify => "shopify",
            Self::InstagramShop => "instagram_shop",
            Self::LocalMarket => "local_market",
            Self::PhysicalStore => "physical_store",
            Self::EmailList => "email_list",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        Self::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| {
                format!(
                    "Invalid sales_channel_type '{s}'. Must be one of: {}",
                    joined(&Self::ALL.map(|c| c.as_str()))
                )
            })
    }

    /// Human phrase for "where to send people", embedded in prompts and CTAs.
    pub fn cta_destination(&self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Etsy => "Etsy shop",
            Self::Amazon => "Amazon storefront",
            Self::Shopify => "online store",
            Self::InstagramShop => "Instagram Shop",
            Self::LocalMarket => "booth/market",
            Self::PhysicalStore => "store",
            Self::EmailList => "email list",
            Self::Other => "link in bio",
        }
    }
}

fn joined(values: &[&str]) -> String {
    values.join(", ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
