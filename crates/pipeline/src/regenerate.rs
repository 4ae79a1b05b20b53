//! Single-post regeneration.
//!
//! Rewrites one field of a post (or the whole post) from user feedback,
//! against the account's monthly regeneration allowance. Unlike the
//! campaign pipeline this uses a system/user prompt split, because the
//! role framing is constant while the feedback varies.

use postforge_core::error::CoreError;
use postforge_core::extract::extract_json;
use postforge_core::limits::{check_action, LimitAction, SubscriptionTier};
use postforge_core::plan::VisualConcept;
use postforge_core::types::DbId;
use postforge_db::models::brand_profile::BrandProfile;
use postforge_db::models::post::Post;
use postforge_db::repositories::{AccountRepo, BrandProfileRepo, PostRepo};
use postforge_db::DbPool;
use postforge_provider::{GenerationRequest, TextGenerator};
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::exchange::{call_with_timeout, pretty_json};

const STAGE: &str = "regeneration";

/// Which part of the post gets rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegenerationKind {
    Caption,
    Hook,
    VisualConcept,
    All,
}

impl RegenerationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegenerationKind::Caption => "caption",
            RegenerationKind::Hook => "hook",
            RegenerationKind::VisualConcept => "visual_concept",
            RegenerationKind::All => "all",
        }
    }

    /// Fallback feedback used when the caller sends none.
    fn default_feedback(&self) -> &'static str {
        match self {
            RegenerationKind::Caption => "Make it more engaging and conversational",
            RegenerationKind::Hook => "Make it more attention-grabbing",
            RegenerationKind::VisualConcept => "Make it more visually interesting",
            RegenerationKind::All => "Reimagine this post entirely",
        }
    }
}

/// The updated row plus how many regenerations the tier still allows this
/// period. `None` means unlimited.
#[derive(Debug, Clone, Serialize)]
pub struct RegenerationOutcome {
    pub post: Post,
    pub regenerations_remaining: Option<u32>,
}

/// Full-rewrite payload for [`RegenerationKind::All`]. Fields the model
/// leaves out keep their stored values, except the hook, which is always
/// replaced: a reimagined post without a hook means no hook.
#[derive(Debug, Deserialize)]
struct FullRewrite {
    #[serde(default)]
    hook: Option<String>,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    visual_concept: Option<serde_json::Value>,
}

/// Regenerate one field (or all fields) of a post the account owns.
///
/// The allowance is checked before the provider call so a blocked account
/// never spends tokens. The counter moves only after the row updates.
pub async fn regenerate_post(
    pool: &DbPool,
    generator: &dyn TextGenerator,
    config: &PipelineConfig,
    account_id: DbId,
    post_id: DbId,
    kind: RegenerationKind,
    user_feedback: Option<&str>,
) -> Result<RegenerationOutcome, PipelineError> {
    let post = PostRepo::find_for_account(pool, post_id, account_id)
        .await?
        .ok_or_else(|| CoreError::not_found("post", post_id))?;
    let brand = BrandProfileRepo::find_by_account(pool, account_id)
        .await?
        .ok_or_else(|| {
            CoreError::Validation("Brand profile not found. Set up your brand profile first.".to_string())
        })?;
    let account = AccountRepo::find_by_id(pool, account_id)
        .await?
        .ok_or_else(|| CoreError::not_found("account", account_id))?;

    let tier = SubscriptionTier::from_account(&account.subscription_tier);
    let used_before = account.ai_regenerations_used_this_period.max(0) as u32;
    let decision = check_action(
        tier,
        LimitAction::Regenerate,
        used_before,
        account.billing_period_end,
    );
    if !decision.allowed {
        return Err(CoreError::LimitExceeded {
            message: decision.message,
        }
        .into());
    }

    tracing::info!(
        post_id,
        account_id,
        kind = kind.as_str(),
        "Regenerating post content"
    );

    let (system, prompt) = build_prompts(&post, &brand, kind, user_feedback);
    let request = GenerationRequest {
        system: Some(system),
        prompt,
        max_tokens: config.post_max_tokens,
        temperature: config.temperature,
    };
    let response = call_with_timeout(generator, &request, STAGE, config.call_timeout).await?;

    let updated = apply_rewrite(pool, &post, kind, &response).await?;

    // The row is updated regardless of what happens to the counter; a
    // stale counter is recoverable, a lost edit is not.
    let used_now = match AccountRepo::increment_regenerations_used(pool, account_id).await {
        Ok(Some(account)) => account.ai_regenerations_used_this_period.max(0) as u32,
        Ok(None) => {
            tracing::warn!(account_id, "Account disappeared during regeneration-counter update");
            used_before + 1
        }
        Err(e) => {
            tracing::error!(account_id, error = %e, "Failed to update regeneration counter");
            used_before + 1
        }
    };

    let regenerations_remaining = tier
        .limits()
        .regenerations_per_month
        .map(|limit| limit.saturating_sub(used_now));

    tracing::info!(post_id, kind = kind.as_str(), "Post regenerated");

    Ok(RegenerationOutcome {
        post: updated,
        regenerations_remaining,
    })
}

/// Write the rewritten content back. Captions and hooks are stored
/// trimmed; JSON payloads are validated against the visual-concept shape
/// before they land in the row.
async fn apply_rewrite(
    pool: &DbPool,
    post: &Post,
    kind: RegenerationKind,
    response: &str,
) -> Result<Post, PipelineError> {
    let updated = match kind {
        RegenerationKind::Caption => {
            PostRepo::update_content(
                pool,
                post.id,
                post.account_id,
                Some(response.trim()),
                false,
                None,
                None,
            )
            .await?
        }
        RegenerationKind::Hook => {
            PostRepo::update_content(
                pool,
                post.id,
                post.account_id,
                None,
                true,
                Some(response.trim()),
                None,
            )
            .await?
        }
        RegenerationKind::VisualConcept => {
            let concept = parse_visual_concept(response)?;
            PostRepo::update_content(
                pool,
                post.id,
                post.account_id,
                None,
                false,
                None,
                Some(&concept),
            )
            .await?
        }
        RegenerationKind::All => {
            let rewrite: FullRewrite = parse_payload(response)?;
            let concept = match &rewrite.visual_concept {
                Some(value) => {
                    validate_visual_concept(value)?;
                    Some(value)
                }
                None => None,
            };
            PostRepo::update_content(
                pool,
                post.id,
                post.account_id,
                rewrite.caption.as_deref().map(str::trim),
                true,
                rewrite.hook.as_deref().map(str::trim),
                concept,
            )
            .await?
        }
    };

    updated
        .ok_or_else(|| CoreError::not_found("post", post.id))
        .map_err(Into::into)
}

fn parse_visual_concept(response: &str) -> Result<serde_json::Value, PipelineError> {
    let value: serde_json::Value = parse_payload(response)?;
    validate_visual_concept(&value)?;
    Ok(value)
}

/// The stored jsonb keeps whatever the model wrote, but it must at least
/// deserialize as a visual concept.
fn validate_visual_concept(value: &serde_json::Value) -> Result<(), PipelineError> {
    serde_json::from_value::<VisualConcept>(value.clone())
        .map(|_| ())
        .map_err(|e| PipelineError::Parse {
            stage: STAGE,
            detail: format!("visual concept has the wrong shape: {e}"),
        })
}

fn parse_payload<T: serde::de::DeserializeOwned>(response: &str) -> Result<T, PipelineError> {
    let json = extract_json(response).ok_or_else(|| PipelineError::Parse {
        stage: STAGE,
        detail: "no JSON object found in response".to_string(),
    })?;
    serde_json::from_str(json).map_err(|e| PipelineError::Parse {
        stage: STAGE,
        detail: e.to_string(),
    })
}

fn build_prompts(
    post: &Post,
    brand: &BrandProfile,
    kind: RegenerationKind,
    user_feedback: Option<&str>,
) -> (String, String) {
    let feedback = user_feedback
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| kind.default_feedback());
    let vibe = brand.brand_vibe_words.join(", ");
    let platforms = post.platforms.join(", ");
    let hook = post.hook.as_deref().unwrap_or("null");

    let brand_context = format!(
        r#"BRAND CONTEXT:
- Business: {business}
- Brand vibe: {vibe}
- Target customer: {target}
- Unique value: {unique}

CURRENT POST:
- Name: {post_name}
- Type: {post_type}
- Platforms: {platforms}
- Scheduled for: {scheduled}"#,
        business = brand.business_name,
        target = brand.target_customer,
        unique = brand.what_makes_unique,
        post_name = post.post_name,
        post_type = post.post_type,
        scheduled = post.scheduled_date,
    );

    match kind {
        RegenerationKind::Caption => (
            "You are a content marketing strategist specializing in social media copywriting. \
             Your task is to rewrite captions based on user feedback while maintaining brand \
             voice and post purpose."
                .to_string(),
            format!(
                r#"{brand_context}

CURRENT CAPTION:
{caption}

USER FEEDBACK:
"{feedback}"

TASK:
Rewrite the caption incorporating the user's feedback while:
1. Maintaining the post's core purpose ({post_type})
2. Keeping the brand voice ({vibe})
3. Optimizing for the specified platforms ({platforms})
4. Addressing the target customer: {target}
5. Highlighting what makes this business unique: {unique}

If the feedback is vague (e.g., "make it better"), interpret it as:
- More engaging and conversational
- Clearer call-to-action
- Better storytelling
- More benefit-focused

Return only the new caption text (150-300 words depending on platform)."#,
                caption = post.caption,
                post_type = post.post_type,
                target = brand.target_customer,
                unique = brand.what_makes_unique,
            ),
        ),
        RegenerationKind::Hook => (
            "You are a content marketing strategist specializing in attention-grabbing hooks. \
             Your task is to rewrite hooks based on user feedback."
                .to_string(),
            format!(
                r#"{brand_context}

CURRENT HOOK:
{hook}

CAPTION CONTEXT:
{caption}

USER FEEDBACK:
"{feedback}"

TASK:
Rewrite the hook (1-2 sentences) incorporating the user's feedback while:
1. Grabbing attention in the first 3 seconds
2. Being platform-appropriate for {platforms}
3. Matching the brand vibe: {vibe}
4. Compelling the target customer ({target}) to stop scrolling

PLATFORM-SPECIFIC HOOKS:
- Instagram: Visual-first, emoji use encouraged, intrigue-based
- Facebook: Question-based, relatable scenarios, community-focused
- TikTok: Trend-aware, conversational, immediate value promise

Return only the new hook text (1-2 sentences maximum)."#,
                caption = post.caption,
                target = brand.target_customer,
            ),
        ),
        RegenerationKind::VisualConcept => (
            "You are a creative director specializing in DIY content creation. Your task is \
             to create achievable visual concepts based on user feedback."
                .to_string(),
            format!(
                r#"{brand_context}

CURRENT VISUAL CONCEPT:
{concept}

CAPTION CONTEXT:
{caption}

USER FEEDBACK:
"{feedback}"

TASK:
Create a new visual concept incorporating the user's feedback while:
1. Remaining achievable with smartphone and basic equipment
2. Matching the brand aesthetic: {vibe}
3. Being optimized for {platforms}
4. Supporting the caption's message

Provide a JSON object with:
- type: "photo" or "video"
- description: Detailed shot description (angle, framing, focus point)
- props: Array of specific items needed
- setting: Where to shoot (be specific)
- style_notes: Lighting, mood, editing direction

Keep it practical and DIY-friendly. Small business owners should be able to execute this themselves."#,
                concept = pretty_json(&post.visual_concept),
                caption = post.caption,
            ),
        ),
        RegenerationKind::All => (
            "You are a content marketing strategist and creative director. Your task is to \
             completely reimagine a post based on user feedback."
                .to_string(),
            format!(
                r#"{brand_context}

CURRENT POST:
- Hook: {hook}
- Caption: {caption}
- Visual concept: {concept}

USER FEEDBACK:
"{feedback}"

TASK:
Completely reimagine this post incorporating the user's feedback while:
1. Maintaining the post's scheduled date and type
2. Keeping the brand voice ({vibe})
3. Optimizing for {platforms}
4. Staying true to the business's unique value: {unique}
5. Targeting the right audience: {target}

Return a JSON object with:
{{
  "hook": "new hook text",
  "caption": "new caption text",
  "visual_concept": {{
    "type": "photo or video",
    "description": "detailed shot description",
    "props": ["prop 1", "prop 2"],
    "setting": "location description",
    "style_notes": "lighting and mood notes"
  }}
}}"#,
                caption = post.caption,
                concept = pretty_json(&post.visual_concept),
                unique = brand.what_makes_unique,
                target = brand.target_customer,
            ),
        ),
    }
}
