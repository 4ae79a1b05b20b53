//! Context builder: compresses a brand profile and a campaign into one
//! immutable package consumed by every generation stage.
//!
//! This is plain data transformation, not a generation call. It exists so
//! the three generation stages share one notion of "brand voice" instead of
//! re-deriving tone heuristics independently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::content::{Platform, SalesChannel};
use crate::error::CoreError;
use crate::types::Date;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Brand-profile fields the builder consumes. Constructed from the stored
/// row by the pipeline.
#[derive(Debug, Clone)]
pub struct BrandInputs {
    pub business_name: String,
    pub what_you_sell: String,
    pub what_makes_unique: String,
    pub target_customer: String,
    pub brand_vibe_words: Vec<String>,
}

/// Campaign fields the builder consumes.
#[derive(Debug, Clone)]
pub struct CampaignInputs {
    pub what_promoting: String,
    pub goal: Option<String>,
    pub sales_channel: SalesChannel,
    pub platforms: Vec<Platform>,
    pub start_date: Date,
    pub end_date: Date,
    pub important_date: Option<Date>,
    pub important_date_label: Option<String>,
}

// ---------------------------------------------------------------------------
// Output package
// ---------------------------------------------------------------------------

/// The immutable package embedded into every downstream prompt. Field names
/// are part of the prompt contract; the provider sees this serialized as
/// JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextPackage {
    pub brand_voice_profile: BrandVoiceProfile,
    pub campaign_context: CampaignContext,
    pub platform_rules: BTreeMap<String, PlatformRules>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandVoiceProfile {
    pub business: String,
    pub product_category: String,
    pub unique_value: String,
    pub target_audience: String,
    pub tone_markers: Vec<String>,
    pub avoid_words: Vec<String>,
    pub example_phrases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignContext {
    pub what_promoting: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    pub target_emotion: String,
    pub cta_destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency_moment: Option<String>,
    pub campaign_duration_days: i64,
}

/// Fixed posting conventions for one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformRules {
    pub priority_formats: Vec<String>,
    pub cta_format: String,
    pub best_times: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_limits: Option<CharacterLimits>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterLimits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook: Option<u32>,
}

// ---------------------------------------------------------------------------
// Tone tables
// ---------------------------------------------------------------------------

const CASUAL_TONES: &[&str] = &["warm", "friendly", "authentic", "cozy", "personal"];
const PROFESSIONAL_TONES: &[&str] = &["professional", "elegant", "sophisticated", "refined"];
const ENERGETIC_TONES: &[&str] = &["bold", "playful", "fun", "vibrant", "exciting"];

const CORPORATE_AVOID_WORDS: &[&str] = &[
    "corporate",
    "leverage",
    "synergy",
    "ecosystem",
    "disrupt",
    "revolutionary",
];
const SLANG_AVOID_WORDS: &[&str] = &["totally", "literally", "obsessed", "vibes", "lowkey"];

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build the context package. Pure and deterministic. Fails only when the
/// brand profile's business name is blank.
pub fn build_context(
    brand: &BrandInputs,
    campaign: &CampaignInputs,
) -> Result<ContextPackage, CoreError> {
    if brand.business_name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Brand profile is missing required field: business_name".to_string(),
        ));
    }

    let duration_days = (campaign.end_date - campaign.start_date).num_days();

    let tone_markers = brand.brand_vibe_words.clone();
    let example_phrases = example_phrases(&tone_markers);
    let avoid_words = avoid_words(&tone_markers);
    let target_emotion = target_emotion(campaign.goal.as_deref(), &tone_markers);

    let urgency_moment = campaign.important_date.map(|date| {
        let label = campaign
            .important_date_label
            .as_deref()
            .unwrap_or("Important Date");
        format!("{label}: {date}")
    });

    let mut platform_rules = BTreeMap::new();
    for platform in &campaign.platforms {
        platform_rules.insert(platform.as_str().to_string(), rules_for(*platform));
    }

    Ok(ContextPackage {
        brand_voice_profile: BrandVoiceProfile {
            business: brand.business_name.clone(),
            product_category: brand.what_you_sell.clone(),
            unique_value: brand.what_makes_unique.clone(),
            target_audience: brand.target_customer.clone(),
            tone_markers,
            avoid_words,
            example_phrases,
        },
        campaign_context: CampaignContext {
            what_promoting: campaign.what_promoting.clone(),
            goal: campaign.goal.clone(),
            target_emotion,
            cta_destination: campaign.sales_channel.cta_destination().to_string(),
            urgency_moment,
            campaign_duration_days: duration_days,
        },
        platform_rules,
    })
}

fn matches_bucket(tone_markers: &[String], bucket: &[&str]) -> bool {
    tone_markers
        .iter()
        .any(|t| bucket.contains(&t.to_lowercase().as_str()))
}

/// Opening-phrase suggestions. Every matching tone bucket contributes; a
/// brand that is both warm and playful gets both phrase sets.
fn example_phrases(tone_markers: &[String]) -> Vec<String> {
    let mut phrases: Vec<String> = Vec::new();

    if matches_bucket(tone_markers, CASUAL_TONES) {
        phrases.extend(
            ["Hey friends...", "I've been working on...", "Can't wait to share..."]
                .map(String::from),
        );
    }
    if matches_bucket(tone_markers, PROFESSIONAL_TONES) {
        phrases.extend(
            ["Introducing...", "We're excited to present...", "Discover..."].map(String::from),
        );
    }
    if matches_bucket(tone_markers, ENERGETIC_TONES) {
        phrases.extend(["OMG you guys...", "This is happening!", "Big news..."].map(String::from));
    }

    if phrases.is_empty() {
        phrases.extend(
            ["Check this out...", "Here's something new...", "Excited to share..."]
                .map(String::from),
        );
    }

    phrases
}

/// Casual brands should not sound corporate; everyone else should not sound
/// like a group chat.
fn avoid_words(tone_markers: &[String]) -> Vec<String> {
    let source = if matches_bucket(tone_markers, CASUAL_TONES) {
        CORPORATE_AVOID_WORDS
    } else {
        SLANG_AVOID_WORDS
    };
    source.iter().map(|w| w.to_string()).collect()
}

fn target_emotion(goal: Option<&str>, tone_markers: &[String]) -> String {
    let Some(goal) = goal else {
        let cozy = tone_markers.iter().any(|t| t == "cozy" || t == "warm");
        return if cozy {
            "comfortable anticipation".to_string()
        } else {
            "positive excitement".to_string()
        };
    };

    let goal = goal.to_lowercase();
    let emotion = if goal.contains("launch") || goal.contains("announce") {
        "excited anticipation"
    } else if goal.contains("sale") || goal.contains("discount") {
        "urgency and value"
    } else if goal.contains("awareness") || goal.contains("introduce") {
        "curious interest"
    } else if goal.contains("engagement") || goal.contains("community") {
        "connection and belonging"
    } else {
        "positive excitement"
    };
    emotion.to_string()
}

/// Posting conventions per platform. Every enum value has a record; unknown
/// platform strings (possible when expanding untyped provider output) get
/// [`generic_rules`].
pub fn rules_for(platform: Platform) -> PlatformRules {
    match platform {
        Platform::Instagram => PlatformRules {
            priority_formats: vec!["reel".into(), "carousel".into(), "story".into()],
            cta_format: "link in bio".into(),
            best_times: vec!["7-9am".into(), "12-3pm".into(), "7-9pm".into()],
            character_limits: Some(CharacterLimits {
                caption: Some(2200),
                hook: Some(100),
            }),
        },
        Platform::Tiktok => PlatformRules {
            priority_formats: vec!["video".into()],
            cta_format: "link in bio or pinned comment".into(),
            best_times: vec!["12-3pm".into(), "7-10pm".into()],
            character_limits: Some(CharacterLimits {
                caption: Some(2200),
                hook: Some(100),
            }),
        },
        Platform::Facebook => PlatformRules {
            priority_formats: vec!["image".into(), "video".into(), "carousel".into()],
            cta_format: "post link or Page CTA button".into(),
            best_times: vec!["9-11am".into(), "1-3pm".into()],
            character_limits: Some(CharacterLimits {
                caption: Some(500),
                hook: None,
            }),
        },
        Platform::GoogleBusiness => PlatformRules {
            priority_formats: vec!["image".into(), "short update".into()],
            cta_format: "call to action button".into(),
            best_times: vec!["8-10am".into(), "5-7pm".into()],
            character_limits: Some(CharacterLimits {
                caption: Some(1500),
                hook: None,
            }),
        },
    }
}

/// Fallback rule record for platform labels outside the enum.
pub fn generic_rules() -> PlatformRules {
    PlatformRules {
        priority_formats: vec!["image".into(), "video".into()],
        cta_format: "link in bio".into(),
        best_times: vec!["9am-12pm".into(), "3pm-6pm".into()],
        character_limits: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn brand() -> BrandInputs {
        BrandInputs {
            business_name: "Maple & Clay".to_string(),
            what_you_sell: "handmade ceramic mugs".to_string(),
            what_makes_unique: "small-batch glazes you can't buy twice".to_string(),
            target_customer: "people who romanticize their morning coffee".to_string(),
            brand_vibe_words: vec!["warm".to_string(), "cozy".to_string()],
        }
    }

    fn campaign() -> CampaignInputs {
        CampaignInputs {
            what_promoting: "winter mug collection".to_string(),
            goal: Some("launch the winter line".to_string()),
            sales_channel: SalesChannel::Etsy,
            platforms: vec![Platform::Instagram, Platform::Facebook],
            start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            important_date: Some(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()),
            important_date_label: Some("Launch Day".to_string()),
        }
    }

    // -- Determinism --

    #[test]
    fn identical_inputs_yield_identical_packages() {
        let a = build_context(&brand(), &campaign()).unwrap();
        let b = build_context(&brand(), &campaign()).unwrap();
        assert_eq!(a, b);
    }

    // -- Validation --

    #[test]
    fn blank_business_name_is_rejected() {
        let mut b = brand();
        b.business_name = "   ".to_string();
        let err = build_context(&b, &campaign()).unwrap_err();
        assert!(err.to_string().contains("business_name"));
    }

    // -- Duration --

    #[test]
    fn duration_is_the_day_span() {
        let ctx = build_context(&brand(), &campaign()).unwrap();
        assert_eq!(ctx.campaign_context.campaign_duration_days, 7);
    }

    // -- Tone buckets --

    #[test]
    fn casual_vibes_get_casual_phrases_and_corporate_avoid_list() {
        let ctx = build_context(&brand(), &campaign()).unwrap();
        let phrases = &ctx.brand_voice_profile.example_phrases;
        assert!(phrases.iter().any(|p| p.starts_with("Hey friends")));
        assert!(ctx
            .brand_voice_profile
            .avoid_words
            .contains(&"synergy".to_string()));
    }

    #[test]
    fn professional_vibes_get_slang_avoid_list() {
        let mut b = brand();
        b.brand_vibe_words = vec!["Elegant".to_string()];
        let ctx = build_context(&b, &campaign()).unwrap();
        assert!(ctx
            .brand_voice_profile
            .example_phrases
            .contains(&"Introducing...".to_string()));
        assert!(ctx
            .brand_voice_profile
            .avoid_words
            .contains(&"vibes".to_string()));
    }

    #[test]
    fn multiple_buckets_accumulate_phrases() {
        let mut b = brand();
        b.brand_vibe_words = vec!["warm".to_string(), "playful".to_string()];
        let ctx = build_context(&b, &campaign()).unwrap();
        let phrases = &ctx.brand_voice_profile.example_phrases;
        assert!(phrases.iter().any(|p| p.starts_with("Hey friends")));
        assert!(phrases.contains(&"Big news...".to_string()));
    }

    #[test]
    fn unmatched_vibes_fall_back_to_neutral_phrases() {
        let mut b = brand();
        b.brand_vibe_words = vec!["mysterious".to_string()];
        let ctx = build_context(&b, &campaign()).unwrap();
        assert_eq!(
            ctx.brand_voice_profile.example_phrases,
            vec![
                "Check this out...".to_string(),
                "Here's something new...".to_string(),
                "Excited to share...".to_string(),
            ]
        );
    }

    // -- Target emotion --

    #[test]
    fn launch_goal_maps_to_excited_anticipation() {
        let ctx = build_context(&brand(), &campaign()).unwrap();
        assert_eq!(ctx.campaign_context.target_emotion, "excited anticipation");
    }

    #[test]
    fn sale_goal_maps_to_urgency_and_value() {
        let mut c = campaign();
        c.goal = Some("Holiday SALE on everything".to_string());
        let ctx = build_context(&brand(), &c).unwrap();
        assert_eq!(ctx.campaign_context.target_emotion, "urgency and value");
    }

    #[test]
    fn missing_goal_with_cozy_vibe_is_comfortable_anticipation() {
        let mut c = campaign();
        c.goal = None;
        let ctx = build_context(&brand(), &c).unwrap();
        assert_eq!(
            ctx.campaign_context.target_emotion,
            "comfortable anticipation"
        );
    }

    #[test]
    fn missing_goal_without_cozy_vibe_is_positive_excitement() {
        let mut b = brand();
        b.brand_vibe_words = vec!["bold".to_string()];
        let mut c = campaign();
        c.goal = None;
        let ctx = build_context(&b, &c).unwrap();
        assert_eq!(ctx.campaign_context.target_emotion, "positive excitement");
    }

    #[test]
    fn unmatched_goal_is_positive_excitement() {
        let mut c = campaign();
        c.goal = Some("just keep posting".to_string());
        let ctx = build_context(&brand(), &c).unwrap();
        assert_eq!(ctx.campaign_context.target_emotion, "positive excitement");
    }

    // -- CTA + urgency --

    #[test]
    fn cta_destination_comes_from_sales_channel() {
        let ctx = build_context(&brand(), &campaign()).unwrap();
        assert_eq!(ctx.campaign_context.cta_destination, "Etsy shop");
    }

    #[test]
    fn urgency_moment_uses_label_and_iso_date() {
        let ctx = build_context(&brand(), &campaign()).unwrap();
        assert_eq!(
            ctx.campaign_context.urgency_moment.as_deref(),
            Some("Launch Day: 2026-01-10")
        );
    }

    #[test]
    fn urgency_moment_defaults_label_when_missing() {
        let mut c = campaign();
        c.important_date_label = None;
        let ctx = build_context(&brand(), &c).unwrap();
        assert_eq!(
            ctx.campaign_context.urgency_moment.as_deref(),
            Some("Important Date: 2026-01-10")
        );
    }

    #[test]
    fn urgency_moment_absent_without_important_date() {
        let mut c = campaign();
        c.important_date = None;
        let ctx = build_context(&brand(), &c).unwrap();
        assert!(ctx.campaign_context.urgency_moment.is_none());
    }

    // -- Platform rules --

    #[test]
    fn rules_attached_for_each_campaign_platform() {
        let ctx = build_context(&brand(), &campaign()).unwrap();
        assert_eq!(ctx.platform_rules.len(), 2);
        assert!(ctx.platform_rules.contains_key("instagram"));
        assert!(ctx.platform_rules.contains_key("facebook"));
    }

    #[test]
    fn instagram_rules_carry_caption_and_hook_limits() {
        let rules = rules_for(Platform::Instagram);
        let limits = rules.character_limits.unwrap();
        assert_eq!(limits.caption, Some(2200));
        assert_eq!(limits.hook, Some(100));
        assert_eq!(rules.priority_formats[0], "reel");
    }

    #[test]
    fn google_business_has_its_own_rules() {
        let rules = rules_for(Platform::GoogleBusiness);
        assert_eq!(rules.cta_format, "call to action button");
        assert_eq!(rules.character_limits.unwrap().caption, Some(1500));
    }

    #[test]
    fn generic_rules_have_no_character_limits() {
        let rules = generic_rules();
        assert!(rules.character_limits.is_none());
        assert_eq!(rules.cta_format, "link in bio");
    }

    // -- Serialization contract --

    #[test]
    fn none_fields_are_omitted_from_json() {
        let mut c = campaign();
        c.goal = None;
        c.important_date = None;
        let ctx = build_context(&brand(), &c).unwrap();
        let json = serde_json::to_value(&ctx).unwrap();
        let cc = json.get("campaign_context").unwrap();
        assert!(cc.get("goal").is_none());
        assert!(cc.get("urgency_moment").is_none());
        assert!(cc.get("target_emotion").is_some());
    }
}
