//! Per-post generation stage.
//!
//! One provider call per slot. The slot stays authoritative: whatever the
//! model writes, the finished post keeps the slot's number, date, format,
//! and platforms. Model-authored fields are merged around that identity,
//! with the behavioral trigger coerced into vocabulary and the hook forced
//! to `None` for formats that do not open with one.

use std::collections::BTreeMap;

use postforge_core::content::{BehavioralTrigger, PostStatus};
use postforge_core::context::{generic_rules, ContextPackage};
use postforge_core::plan::{GeneratedPost, PlatformNote, ShotList, StrategyPlan, VisualConcept};
use postforge_core::schedule::PostSlot;
use postforge_provider::{GenerationRequest, TextGenerator};
use serde::Deserialize;
use serde_json::json;

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::exchange::{call_with_timeout, parse_json_payload, pretty_json};

const STAGE: &str = "post";

/// Model-authored half of a post. Slot identity fields in the response are
/// ignored; every field defaults so a sparse response still merges.
#[derive(Debug, Deserialize)]
struct RawPost {
    #[serde(default)]
    post_name: String,
    #[serde(default)]
    hook: Option<String>,
    #[serde(default)]
    caption: String,
    #[serde(default)]
    visual_concept: VisualConcept,
    #[serde(default)]
    platform_notes: BTreeMap<String, PlatformNote>,
    #[serde(default)]
    purpose: String,
    #[serde(default)]
    core_message: String,
    #[serde(default)]
    behavioral_trigger: String,
    #[serde(default)]
    format: String,
    #[serde(default)]
    strategy_type: String,
    #[serde(default)]
    tracking_focus: String,
    #[serde(default)]
    cta: String,
}

/// Generate the content for one slot and merge it into a draft post.
pub async fn generate_post(
    generator: &dyn TextGenerator,
    context: &ContextPackage,
    strategy: &StrategyPlan,
    shot_list: &ShotList,
    slot: &PostSlot,
    config: &PipelineConfig,
) -> Result<GeneratedPost, PipelineError> {
    let request = GenerationRequest {
        system: None,
        prompt: build_post_prompt(context, strategy, shot_list, slot),
        max_tokens: config.post_max_tokens,
        temperature: config.temperature,
    };

    let response = call_with_timeout(generator, &request, STAGE, config.call_timeout).await?;
    let raw: RawPost = parse_json_payload(STAGE, &response)?;
    let post = merge_into_slot(raw, slot);

    tracing::debug!(
        post_number = post.post_number,
        post_type = %post.post_type.as_str(),
        "Post generated"
    );
    Ok(post)
}

fn merge_into_slot(raw: RawPost, slot: &PostSlot) -> GeneratedPost {
    let behavioral_trigger = match BehavioralTrigger::parse(&raw.behavioral_trigger) {
        Ok(trigger) => trigger,
        Err(_) => {
            tracing::warn!(
                post_number = slot.post_number,
                trigger = %raw.behavioral_trigger,
                "Out-of-vocabulary behavioral trigger, defaulting to curiosity"
            );
            BehavioralTrigger::DEFAULT
        }
    };

    let hook = if slot.post_type.requires_hook() {
        raw.hook
    } else {
        None
    };

    GeneratedPost {
        post_number: slot.post_number,
        post_name: raw.post_name,
        scheduled_date: slot.scheduled_date,
        post_type: slot.post_type,
        platforms: slot.platforms.clone(),
        hook,
        caption: raw.caption,
        visual_concept: raw.visual_concept,
        platform_notes: raw.platform_notes,
        purpose: raw.purpose,
        core_message: raw.core_message,
        behavioral_trigger,
        format: raw.format,
        strategy_type: raw.strategy_type,
        tracking_focus: raw.tracking_focus,
        cta: raw.cta,
        status: PostStatus::Draft,
    }
}

fn build_post_prompt(
    context: &ContextPackage,
    strategy: &StrategyPlan,
    shot_list: &ShotList,
    slot: &PostSlot,
) -> String {
    // Intent comes from the matching weekly phase, else the first phase.
    let phase_intent = strategy
        .weekly_phases
        .iter()
        .find(|p| p.phase == slot.phase)
        .or_else(|| strategy.weekly_phases.first())
        .map(|p| p.intent.clone())
        .unwrap_or_default();

    let platform_rules: Vec<serde_json::Value> = slot
        .platforms
        .iter()
        .map(|p| {
            let rules = context
                .platform_rules
                .get(p.as_str())
                .cloned()
                .unwrap_or_else(generic_rules);
            json!({ "platform": p.as_str(), "rules": rules })
        })
        .collect();

    let platforms_joined = slot
        .platforms
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let (hook_flag, hook_instructions, hook_example) = if slot.post_type.requires_hook() {
        (
            "REQUIRED",
            "- First 3 seconds of video, <100 characters\n   - Attention-grabbing, pattern-interrupt\n   - Use \"POV:\", \"When...\", \"This is your sign to...\" patterns",
            r#""POV: Making candles at 6am because inspiration hit...""#,
        )
    } else {
        ("NOT NEEDED", "- Set to null (not a reel/story format)", "null")
    };

    let brand_voice = pretty_json(&context.brand_voice_profile);
    let campaign = pretty_json(&context.campaign_context);
    let shots = pretty_json(&shot_list.shots);
    let rules = pretty_json(&platform_rules);
    let post_number = slot.post_number;
    let scheduled_date = slot.scheduled_date;
    let post_type = slot.post_type.as_str();
    let phase = &slot.phase;
    let theme = &slot.theme;
    let tone_markers = context.brand_voice_profile.tone_markers.join(", ");
    let avoid_words = context.brand_voice_profile.avoid_words.join(", ");
    let example_phrases = context.brand_voice_profile.example_phrases.join(", ");
    let cta_destination = &context.campaign_context.cta_destination;

    format!(
        r##"You are a social media content writer with expertise in {platforms_joined}.

BRAND VOICE (use as reference, don't repeat verbatim):
{brand_voice}

CAMPAIGN GOAL:
{campaign}

THIS POST:
- Post Number: {post_number}
- Date: {scheduled_date}
- Phase: {phase} ({phase_intent})
- Content Type: {post_type}
- Theme: {theme}
- Platforms: {platforms_joined}

AVAILABLE SHOTS FROM SHOT LIST:
{shots}

PLATFORM RULES:
{rules}

TASK: Create compelling content for this specific post.

CONTENT REQUIREMENTS:

1. **Post Name:**
   - Short, descriptive title (3-5 words max)
   - Internal reference only, not shown to audience

2. **Hook ({hook_flag}):**
   {hook_instructions}

3. **Caption:**
   - 250-500 characters
   - Write in {tone_markers} tone
   - Sound like a REAL PERSON, not a brand
   - Use 1-2 relevant emojis naturally (not excessive)
   - Include clear CTA to {cta_destination}
   - Avoid words: {avoid_words}
   - Use phrases like: {example_phrases}

4. **Visual Concept:**
   - Assign 1-3 shots from available shot list
   - For videos: specify timing for each shot (e.g., "0-3 sec", "3-5 sec")
   - Include sequence_order for multi-shot posts
   - Add props, setting, style_notes if relevant

5. **Platform Notes:**
   - Specific instructions per platform
   - Format guidance (e.g., "Post as REEL, not regular post")
   - CTA format for each platform
   - Audio suggestions for video content
   - Best posting times

6. **Content Strategy Metadata:**
   - purpose: What this post aims to achieve (awareness/consideration/conversion)
   - core_message: Main takeaway in one sentence (<150 chars)
   - behavioral_trigger: Must be EXACTLY ONE of these: reciprocity, FOMO, scarcity, trust, nostalgia, belonging, curiosity, urgency
   - format: Content format/style (tutorial, testimonial, behind-the-scenes, product showcase)
   - strategy_type: Category (educational, promotional, engagement, testimonial, behind-the-scenes)
   - tracking_focus: Primary KPI (views, saves, shares, comments, clicks, DMs, redemptions)
   - cta: Call-to-action text (<100 chars)

OUTPUT FORMAT (valid JSON only, no markdown):
{{
  "post_name": "Making Candles",
  "hook": {hook_example},
  "caption": "Okay friends, real talk...\n\nThese new winter scents have been my SECRET project for weeks and I'm SO ready to share them with you.\n\nThink: cozy cabin, hot cocoa, Sunday morning vibes.\n\nPre-orders open Nov 15 💫\nLink in bio!",
  "visual_concept": {{
    "type": "process video montage",
    "description": "Fast-paced clips showing candle-making process",
    "shots": [
      {{
        "shot_number": 2,
        "title": "Pouring Wax Process",
        "timing": "0-3 sec",
        "sequence_order": 1
      }},
      {{
        "shot_number": 5,
        "title": "Wax Close-up",
        "timing": "3-5 sec",
        "sequence_order": 2
      }}
    ],
    "props": ["measuring cup", "wax", "jars"],
    "setting": "kitchen counter with natural light",
    "style_notes": "warm tones, slightly fast-paced editing"
  }},
  "platform_notes": {{
    "instagram": {{
      "format": "Post as REEL (not story, not regular post)",
      "cta": "Add 'Link in bio' at end of caption",
      "audio": "Use trending audio if possible, or original sound with captions",
      "hashtags": "#candlemaking #smallbusiness #handmade",
      "best_time": "7-9am or 7-9pm"
    }},
    "tiktok": {{
      "format": "Keep video under 30 seconds",
      "cta": "Pin shop link in first comment",
      "audio": "Trending sound preferred",
      "hashtags": "#candletok #smallbiz #behindthescenes",
      "best_time": "12-3pm or 7-10pm"
    }}
  }},
  "purpose": "Build anticipation and curiosity for upcoming launch",
  "core_message": "New winter candles coming soon, made with care and excitement",
  "behavioral_trigger": "curiosity",
  "format": "Behind-the-scenes process video",
  "strategy_type": "behind-the-scenes",
  "tracking_focus": "saves",
  "cta": "Save this post and check link in bio for launch updates"
}}

IMPORTANT:
- Write like a human, not a corporate brand
- Align with {phase} phase intent: {phase_intent}
- Use shots from provided shot list only
- Caption must include CTA to {cta_destination}
- Hook required ONLY for reels/stories (set to null otherwise)
- tracking_focus should match funnel stage: awareness → views/reach, consideration → saves/shares, conversion → clicks/DMs
- Return ONLY valid JSON, no explanatory text

Begin:"##
    )
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use postforge_core::content::{Platform, PostFormat};
    use postforge_provider::ProviderError;

    use crate::test_support::{context, shot_list, strategy_plan};

    use super::*;

    struct CannedGenerator {
        response: String,
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, ProviderError> {
            Ok(self.response.clone())
        }
    }

    fn slot(post_type: PostFormat) -> PostSlot {
        PostSlot {
            post_number: 3,
            scheduled_date: NaiveDate::from_ymd_opt(2026, 1, 9).unwrap(),
            post_type,
            phase: "awareness".to_string(),
            theme: "product beauty shots".to_string(),
            platforms: vec![Platform::Instagram, Platform::Facebook],
        }
    }

    fn canned_response(hook: &str, trigger: &str) -> String {
        format!(
            r#"{{
                "post_number": 99,
                "post_name": "Kiln Day",
                "scheduled_date": "1999-01-01",
                "post_type": "story",
                "hook": {hook},
                "caption": "The kiln opens today",
                "visual_concept": {{"type": "single photo", "description": "d", "shots": []}},
                "platform_notes": {{"instagram": {{"format": "Post as REEL", "cta": "Link in bio"}}}},
                "purpose": "awareness",
                "core_message": "new mugs soon",
                "behavioral_trigger": "{trigger}",
                "format": "teaser",
                "strategy_type": "promotional",
                "tracking_focus": "views",
                "cta": "Link in bio"
            }}"#
        )
    }

    #[tokio::test]
    async fn slot_identity_overrides_model_output() {
        let generator = CannedGenerator {
            response: canned_response("\"POV: kiln day\"", "FOMO"),
        };
        let post = generate_post(
            &generator,
            &context(),
            &strategy_plan(),
            &shot_list(),
            &slot(PostFormat::Reel),
            &PipelineConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(post.post_number, 3);
        assert_eq!(
            post.scheduled_date,
            NaiveDate::from_ymd_opt(2026, 1, 9).unwrap()
        );
        assert_eq!(post.post_type, PostFormat::Reel);
        assert_eq!(
            post.platforms,
            vec![Platform::Instagram, Platform::Facebook]
        );
        assert_eq!(post.hook.as_deref(), Some("POV: kiln day"));
        assert_eq!(post.behavioral_trigger, BehavioralTrigger::Fomo);
        assert_eq!(post.status, PostStatus::Draft);
    }

    #[tokio::test]
    async fn hook_is_dropped_for_formats_without_one() {
        let generator = CannedGenerator {
            response: canned_response("\"a hook anyway\"", "curiosity"),
        };
        let post = generate_post(
            &generator,
            &context(),
            &strategy_plan(),
            &shot_list(),
            &slot(PostFormat::Image),
            &PipelineConfig::default(),
        )
        .await
        .unwrap();
        assert!(post.hook.is_none());
    }

    #[tokio::test]
    async fn unknown_trigger_coerces_to_curiosity() {
        let generator = CannedGenerator {
            response: canned_response("null", "intrigue"),
        };
        let post = generate_post(
            &generator,
            &context(),
            &strategy_plan(),
            &shot_list(),
            &slot(PostFormat::Image),
            &PipelineConfig::default(),
        )
        .await
        .unwrap();
        assert_eq!(post.behavioral_trigger, BehavioralTrigger::Curiosity);
    }

    #[tokio::test]
    async fn prose_without_json_is_a_parse_error() {
        let generator = CannedGenerator {
            response: "Sorry, I can't help with that.".to_string(),
        };
        let err = generate_post(
            &generator,
            &context(),
            &strategy_plan(),
            &shot_list(),
            &slot(PostFormat::Image),
            &PipelineConfig::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PipelineError::Parse { stage: "post", .. }));
    }

    #[test]
    fn reel_prompt_demands_a_hook() {
        let prompt = build_post_prompt(
            &context(),
            &strategy_plan(),
            &shot_list(),
            &slot(PostFormat::Reel),
        );
        assert!(prompt.contains("**Hook (REQUIRED):**"));
        assert!(prompt.contains("\"hook\": \"POV: Making candles"));
        assert!(prompt.contains("expertise in instagram, facebook"));
        assert!(prompt.contains("- Phase: awareness (awareness intent)"));
        assert!(prompt.contains("Include clear CTA to Etsy shop"));
    }

    #[test]
    fn image_prompt_sets_hook_to_null() {
        let prompt = build_post_prompt(
            &context(),
            &strategy_plan(),
            &shot_list(),
            &slot(PostFormat::Image),
        );
        assert!(prompt.contains("**Hook (NOT NEEDED):**"));
        assert!(prompt.contains("- Set to null (not a reel/story format)"));
        assert!(prompt.contains("\"hook\": null,"));
    }

    #[test]
    fn phase_intent_falls_back_to_first_phase() {
        let mut s = slot(PostFormat::Image);
        s.phase = "momentum".to_string();
        let prompt = build_post_prompt(&context(), &strategy_plan(), &shot_list(), &s);
        assert!(prompt.contains("- Phase: momentum (awareness intent)"));
    }
}
