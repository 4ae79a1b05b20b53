//! Strategy planning stage.
//!
//! One provider call that turns the context package into a
//! [`StrategyPlan`]: weekly funnel phases with a format mix, a posting
//! cadence with surge dates, content themes, and shot requirements.

use postforge_core::context::ContextPackage;
use postforge_core::plan::StrategyPlan;
use postforge_core::types::Date;
use postforge_provider::{GenerationRequest, TextGenerator};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::exchange::{call_with_timeout, parse_json_payload, pretty_json};

const STAGE: &str = "strategy";

/// Campaign-window figures the strategy prompt needs on top of the context
/// package.
#[derive(Debug, Clone)]
pub struct StrategyInputs {
    /// Inclusive day count of the campaign window.
    pub day_count: i64,
    /// Post count the prompt asks the model to hit, within a ±2 band.
    pub target_posts: u32,
    /// Date the posting surge should cluster around.
    pub important_date: Option<Date>,
}

/// Requested post count: the campaign's own `num_posts` when positive,
/// otherwise roughly 70% of the campaign days.
pub fn target_posts(num_posts: i32, day_count: i64) -> u32 {
    if num_posts > 0 {
        num_posts as u32
    } else {
        (day_count as f64 * 0.7).floor() as u32
    }
}

/// Run the strategy call and parse the plan out of its response.
pub async fn generate_strategy(
    generator: &dyn TextGenerator,
    context: &ContextPackage,
    inputs: &StrategyInputs,
    config: &PipelineConfig,
) -> Result<StrategyPlan, PipelineError> {
    let request = GenerationRequest {
        system: None,
        prompt: build_strategy_prompt(context, inputs),
        max_tokens: config.strategy_max_tokens,
        temperature: config.temperature,
    };

    let response = call_with_timeout(generator, &request, STAGE, config.call_timeout).await?;
    let plan: StrategyPlan = parse_json_payload(STAGE, &response)?;

    tracing::debug!(
        phases = plan.weekly_phases.len(),
        themes = plan.content_themes.len(),
        planned_posts = plan.total_posts(),
        "Strategy plan parsed"
    );
    Ok(plan)
}

fn build_strategy_prompt(context: &ContextPackage, inputs: &StrategyInputs) -> String {
    let brand_voice = pretty_json(&context.brand_voice_profile);
    let campaign = pretty_json(&context.campaign_context);
    let platform_rules = pretty_json(&context.platform_rules);
    let day_count = inputs.day_count;
    let target = i64::from(inputs.target_posts);
    let target_lo = target - 2;
    let target_hi = target + 2;
    let surge_anchor = inputs
        .important_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "launch moment".to_string());

    format!(
        r#"You are a social media strategist with deep algorithm expertise across Instagram, TikTok, Facebook, and Google Business.

BRAND CONTEXT (reference for all decisions):
{brand_voice}

CAMPAIGN CONTEXT:
{campaign}

PLATFORM CAPABILITIES:
{platform_rules}

TASK: Plan content distribution for a {day_count}-day campaign.

TARGET POST COUNT: Generate between {target_lo} and {target_hi} posts total.

STRATEGIC RULES:

1. **Content Phases by Week:**
   - Week 1 (Awareness): Tease and build curiosity
     - Formats: Reels for discovery, Stories for BTS
     - Goal: Reach new audiences, create intrigue

   - Week 2 (Education): Show value and process
     - Formats: Carousels for engagement, Reels for how-to
     - Goal: Build desire, demonstrate expertise

   - Week 3 (Conversion): Launch and sell
     - Formats: Mix of all formats, increase frequency
     - Goal: Drive action, create urgency

   - Week 4+ (Momentum): Final push and gift positioning
     - Formats: Testimonials, last chance messaging
     - Goal: Capture fence-sitters, extend reach

2. **Posting Frequency:**
   - Baseline: Don't post every day (feels spammy and unsustainable)
   - Ideal: 1 post every 1-2 days normally
   - Surge: 2 posts per day around {surge_anchor}
   - Rest days: Leave 1-2 days per week with no posts for audience breathing room

3. **Platform-Specific Best Practices:**
   - Instagram: Prioritize Reels (algorithm favors them), use Carousels for education
   - TikTok: Videos under 30s, leverage trending sounds, educational + entertaining
   - Facebook: Native content (no external links in posts), community-focused
   - Google Business: Product shots + local context, clear CTAs

4. **Content Variety (avoid repetition):**
   - 40% lifestyle/story content (show product in context)
   - 30% product showcase (hero shots, features)
   - 20% education/process (how it's made, tips)
   - 10% direct selling (offers, CTAs, urgency)

5. **Shot Requirements:**
   - List specific types of shots needed for filming day
   - Balance photos vs videos based on format mix
   - Prioritize reusable "hero" shots that work across multiple posts
   - Keep achievable with smartphone (no studio required)

OUTPUT FORMAT (valid JSON only, no markdown):
{{
  "weekly_phases": [
    {{
      "week": 1,
      "dates": "Nov 1-7",
      "phase": "awareness",
      "intent": "tease collection, build curiosity",
      "post_count": 5,
      "format_mix": {{"reel": 3, "image": 2}}
    }}
  ],
  "posting_frequency": {{
    "default": "1 post every 1-2 days",
    "surge_dates": ["2024-11-14", "2024-11-15", "2024-11-16"]
  }},
  "content_themes": [
    {{"theme": "product beauty shots", "count": 8}},
    {{"theme": "behind-the-scenes process", "count": 6}},
    {{"theme": "lifestyle mood", "count": 5}}
  ],
  "shot_requirements": [
    "3 hero product shots (different angles)",
    "2 BTS process videos",
    "4 lifestyle flatlay setups"
  ]
}}

IMPORTANT:
- Total post_count across all weeks should equal {target} (±2)
- Format mix should match platform capabilities
- Surge dates should align with important_date if provided
- Shot requirements should be specific and actionable
- Return ONLY valid JSON, no explanatory text

Begin:"#
    )
}
