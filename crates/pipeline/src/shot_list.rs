//! Shot-list planning stage.
//!
//! One provider call that turns the strategy plan into a [`ShotList`]: a
//! filming plan of reusable master shots with themes, props, locations,
//! priorities, and batch sessions. The `checked` flag on each shot starts
//! out false; serde defaults enforce that when the model omits it.

use postforge_core::context::ContextPackage;
use postforge_core::plan::{ShotList, StrategyPlan};
use postforge_provider::{GenerationRequest, TextGenerator};
use serde_json::json;

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::exchange::{call_with_timeout, parse_json_payload, pretty_json};

const STAGE: &str = "shot_list";

/// Photo/video post counts derived from the strategy's weekly format mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatNeeds {
    pub photos: u32,
    pub videos: u32,
}

impl FormatNeeds {
    /// Sum the format mixes across every weekly phase. Image and carousel
    /// labels count as photo posts; reel, story, and video labels count as
    /// video posts. Other labels do not affect filming needs.
    pub fn from_strategy(strategy: &StrategyPlan) -> Self {
        let mut photos = 0;
        let mut videos = 0;
        for phase in &strategy.weekly_phases {
            for (label, count) in &phase.format_mix {
                match label.as_str() {
                    "image" | "carousel" => photos += count,
                    "reel" | "story" | "video" => videos += count,
                    _ => {}
                }
            }
        }
        Self { photos, videos }
    }

    pub fn total(&self) -> u32 {
        self.photos + self.videos
    }
}

/// Run the shot-list call and parse the filming plan out of its response.
pub async fn generate_shot_list(
    generator: &dyn TextGenerator,
    context: &ContextPackage,
    strategy: &StrategyPlan,
    config: &PipelineConfig,
) -> Result<ShotList, PipelineError> {
    let needs = FormatNeeds::from_strategy(strategy);
    let request = GenerationRequest {
        system: None,
        prompt: build_shot_list_prompt(context, strategy, needs),
        max_tokens: config.shot_list_max_tokens,
        temperature: config.temperature,
    };

    let response = call_with_timeout(generator, &request, STAGE, config.call_timeout).await?;
    let shot_list: ShotList = parse_json_payload(STAGE, &response)?;

    tracing::debug!(
        shots = shot_list.shots.len(),
        sessions = shot_list.batch_sessions.len(),
        "Shot list parsed"
    );
    Ok(shot_list)
}

fn build_shot_list_prompt(
    context: &ContextPackage,
    strategy: &StrategyPlan,
    needs: FormatNeeds,
) -> String {
    let brand_voice = pretty_json(&context.brand_voice_profile);
    let campaign = pretty_json(&context.campaign_context);
    let content_strategy = pretty_json(&json!({
        "themes": strategy.content_themes,
        "shot_requirements": strategy.shot_requirements,
    }));
    let photos = needs.photos;
    let videos = needs.videos;
    let total = needs.total();
    let unique_photos = needs.photos.div_ceil(3);
    let unique_videos = needs.videos.div_ceil(3);
    let theme_names = strategy
        .content_themes
        .iter()
        .map(|t| t.theme.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are a content production planner specializing in batch content creation for small business owners.

BRAND CONTEXT:
{brand_voice}

CAMPAIGN GOAL:
{campaign}

CONTENT STRATEGY:
{content_strategy}

POST FORMATS NEEDED:
- {photos} photo-based posts (images, carousels)
- {videos} video-based posts (reels, stories)
- {total} total posts

TASK: Create a master shot list that can be filmed in ONE 2-3 hour batch session.

REQUIREMENTS:

1. **Shot Efficiency:**
   - Create 8-12 master shots that are reusable across multiple posts
   - Each "hero" shot should be used 3-5 times across different posts
   - Mix of photos ({unique_photos} unique photos) and videos ({unique_videos} unique video clips)

2. **Smartphone-Friendly:**
   - All shots must be achievable with a smartphone
   - Natural lighting preferred (no studio setup required)
   - Simple props found around the house or business
   - Clear instructions for DIY execution

3. **Batch-Optimized:**
   - Group shots by location/setup to minimize transitions
   - Suggest prep needed before filming
   - Estimate session duration and groupings

4. **Visual Themes:**
   - Define 2-3 visual themes with mood and color palette
   - Align themes with content strategy ({theme_names})

OUTPUT FORMAT (valid JSON only, no markdown):
{{
  "themes": [
    {{
      "name": "Cozy Lifestyle",
      "mood": "Warm, inviting, personal",
      "color_palette": ["warm whites", "soft browns", "amber"]
    }}
  ],
  "props": [
    {{
      "item": "Cozy blanket",
      "where_to_find": "living room or bedroom",
      "themes": ["Cozy Lifestyle"]
    }}
  ],
  "locations": [
    {{
      "location": "Kitchen counter by window",
      "lighting": "Natural light from window (shoot 9-11am)",
      "setup_notes": "Clear counter, white surface preferred"
    }}
  ],
  "priority": {{
    "urgent": {{
      "description": "Shots needed for week 1 posts (awareness phase)",
      "shots": [1, 2, 3]
    }},
    "medium": {{
      "description": "Shots for weeks 2-3 (education and conversion)",
      "shots": [4, 5, 6, 7]
    }},
    "flexible": {{
      "description": "Shots for week 4+ (can be filmed later if needed)",
      "shots": [8, 9, 10]
    }}
  }},
  "batch_sessions": [
    {{
      "session_name": "Morning Product Shots",
      "duration": "45-60 minutes",
      "shots": [1, 3, 5],
      "prep_needed": ["Clear counter space", "Gather props", "Charge phone"]
    }}
  ],
  "diy_tips": [
    "Use a stack of books to elevate your phone for overhead shots",
    "Set a 10-second timer to get yourself in the frame naturally",
    "Film each clip 3-4 times to have options in editing"
  ],
  "shots": [
    {{
      "shot_number": 1,
      "title": "Cozy Flat Lay",
      "media_type": "photo",
      "description": "Product with book and blanket on wooden surface. Warm natural light, inviting aesthetic.",
      "file_format": "Shot-1-Cozy-Flat-Lay.jpg",
      "reusable": true,
      "estimated_uses": 4,
      "checked": false
    }},
    {{
      "shot_number": 2,
      "title": "Process BTS Video",
      "media_type": "video",
      "description": "5-7 second clip of hands working on product. Show authentic process, slight camera movement OK.",
      "file_format": "Shot-2-Process-BTS.mp4",
      "reusable": true,
      "estimated_uses": 5,
      "checked": false
    }}
  ]
}}

IMPORTANT:
- Create 8-12 total shots
- Mark shots with 3+ estimated uses as "reusable: true"
- File format should be descriptive (Shot-#-Descriptive-Name.jpg/mp4)
- All shots should have "checked: false" by default
- Include at least 5 DIY tips for smartphone filming
- Organize batch sessions to minimize setup changes
- Return ONLY valid JSON, no explanatory text

Begin:"#
    )
}

#[cfg(test)]
mod tests {
    use postforge_core::plan::WeeklyPhase;

    use crate::test_support::{context, strategy_plan, weekly_phase};

    use super::*;

    fn with_phases(phases: Vec<WeeklyPhase>) -> StrategyPlan {
        StrategyPlan {
            weekly_phases: phases,
            ..strategy_plan()
        }
    }

    #[test]
    fn format_needs_split_photo_and_video_labels() {
        let plan = with_phases(vec![
            weekly_phase(1, "awareness", &[("image", 2), ("reel", 3)]),
            weekly_phase(2, "education", &[("carousel", 1), ("story", 1), ("video", 2)]),
        ]);
        let needs = FormatNeeds::from_strategy(&plan);
        assert_eq!(needs, FormatNeeds { photos: 3, videos: 6 });
        assert_eq!(needs.total(), 9);
    }

    #[test]
    fn unknown_format_labels_are_ignored() {
        let plan = with_phases(vec![weekly_phase(
            1,
            "awareness",
            &[("image", 2), ("livestream", 5)],
        )]);
        let needs = FormatNeeds::from_strategy(&plan);
        assert_eq!(needs, FormatNeeds { photos: 2, videos: 0 });
    }

    #[test]
    fn prompt_carries_counts_and_theme_names() {
        let plan = with_phases(vec![weekly_phase(
            1,
            "awareness",
            &[("image", 4), ("reel", 5)],
        )]);
        let needs = FormatNeeds::from_strategy(&plan);
        let prompt = build_shot_list_prompt(&context(), &plan, needs);
        assert!(prompt.contains("- 4 photo-based posts"));
        assert!(prompt.contains("- 5 video-based posts"));
        assert!(prompt.contains("- 9 total posts"));
        assert!(prompt.contains("(2 unique photos) and videos (2 unique video clips)"));
        assert!(prompt.contains("(product beauty shots, behind-the-scenes process)"));
    }
}
