//! Generation artifacts: the strategy plan, the shot list, and generated
//! posts.
//!
//! These are deserialized from provider output, so every field the model
//! could plausibly omit carries `#[serde(default)]` — a missing field is a
//! quality problem, not a parse failure. The same structs serialize back
//! into the `campaigns.strategy_framework` / `campaigns.shot_list` jsonb
//! columns and into downstream prompts, so field names are wire contracts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::content::{BehavioralTrigger, Platform, PostFormat, PostStatus};
use crate::types::Date;

// ---------------------------------------------------------------------------
// Strategy plan
// ---------------------------------------------------------------------------

/// Weekly-phase distribution plan produced by the strategy stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyPlan {
    #[serde(default)]
    pub weekly_phases: Vec<WeeklyPhase>,
    #[serde(default)]
    pub posting_frequency: PostingFrequency,
    #[serde(default)]
    pub content_themes: Vec<ContentTheme>,
    #[serde(default)]
    pub shot_requirements: Vec<String>,
}

impl StrategyPlan {
    /// Total posts the plan calls for, summed over phases.
    pub fn total_posts(&self) -> u32 {
        self.weekly_phases.iter().map(|p| p.post_count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPhase {
    #[serde(default)]
    pub week: u32,
    #[serde(default)]
    pub dates: String,
    /// Funnel stage label (awareness, education, conversion, momentum).
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub post_count: u32,
    /// Format label -> number of posts in that format. Keys are usually the
    /// post-format vocabulary but the model occasionally answers `video`;
    /// consumers must tolerate unknown keys.
    #[serde(default)]
    pub format_mix: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PostingFrequency {
    /// Baseline cadence, e.g. "1 post every 1-2 days".
    #[serde(default, rename = "default")]
    pub default_cadence: String,
    /// Dates the strategy wants extra density around the campaign's
    /// important date. Carried in the persisted artifact; the even-spread
    /// schedule does not consume them.
    #[serde(default)]
    pub surge_dates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTheme {
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub count: u32,
}

// ---------------------------------------------------------------------------
// Shot list
// ---------------------------------------------------------------------------

/// Master shot inventory produced by the shot-list stage, sized to the
/// strategy's format mix and organized for one batch filming session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotList {
    #[serde(default)]
    pub themes: Vec<VisualTheme>,
    #[serde(default)]
    pub props: Vec<PropItem>,
    #[serde(default)]
    pub locations: Vec<LocationPlan>,
    #[serde(default)]
    pub priority: ShotPriorities,
    #[serde(default)]
    pub batch_sessions: Vec<BatchSession>,
    #[serde(default)]
    pub diy_tips: Vec<String>,
    #[serde(default)]
    pub shots: Vec<Shot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualTheme {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub color_palette: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropItem {
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub where_to_find: String,
    #[serde(default)]
    pub themes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPlan {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub lighting: String,
    #[serde(default)]
    pub setup_notes: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShotPriorities {
    #[serde(default)]
    pub urgent: PriorityBucket,
    #[serde(default)]
    pub medium: PriorityBucket,
    #[serde(default)]
    pub flexible: PriorityBucket,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriorityBucket {
    #[serde(default)]
    pub description: String,
    /// Shot numbers assigned to this tier.
    #[serde(default)]
    pub shots: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSession {
    #[serde(default)]
    pub session_name: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub shots: Vec<i32>,
    #[serde(default)]
    pub prep_needed: Vec<String>,
}

/// One reusable master shot. `media_type` stays a free string (`photo` /
/// `video` expected) because a creative spelling should not fail the whole
/// shot list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    #[serde(default)]
    pub shot_number: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub description: String,
    /// Suggested file name, e.g. `Shot-1-Cozy-Flat-Lay.jpg`.
    #[serde(default)]
    pub file_format: String,
    #[serde(default)]
    pub reusable: bool,
    #[serde(default)]
    pub estimated_uses: u32,
    /// Filming checklist state. Defaults to false whenever the model leaves
    /// it out.
    #[serde(default)]
    pub checked: bool,
}

// ---------------------------------------------------------------------------
// Generated posts
// ---------------------------------------------------------------------------

/// A fully generated post: the slot identity it was generated for plus the
/// provider-written content, with the behavioral trigger already coerced
/// into vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPost {
    pub post_number: i32,
    pub post_name: String,
    pub scheduled_date: Date,
    pub post_type: PostFormat,
    pub platforms: Vec<Platform>,
    pub hook: Option<String>,
    pub caption: String,
    pub visual_concept: VisualConcept,
    /// Per-platform posting instructions. Previewed but not persisted.
    #[serde(default)]
    pub platform_notes: BTreeMap<String, PlatformNote>,
    pub purpose: String,
    pub core_message: String,
    pub behavioral_trigger: BehavioralTrigger,
    /// Free-text framing label ("tutorial", "product showcase", ...). Not
    /// persisted.
    #[serde(default)]
    pub format: String,
    pub strategy_type: String,
    pub tracking_focus: String,
    pub cta: String,
    pub status: PostStatus,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VisualConcept {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    /// 1-3 shots drawn from the campaign's shot list.
    #[serde(default)]
    pub shots: Vec<ConceptShot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setting: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptShot {
    #[serde(default)]
    pub shot_number: i32,
    #[serde(default)]
    pub title: String,
    /// Time window within a video, e.g. "0-3 sec". Photos have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<String>,
    #[serde(default)]
    pub sequence_order: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlatformNote {
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub cta: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
