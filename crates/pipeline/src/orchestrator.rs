//! Campaign orchestration: the staged run from campaign row to persisted
//! posts.
//!
//! Fatal stages come first (fetch, context, strategy, shot list); the
//! per-post stage then runs in delayed batches where each unit fails on its
//! own. Dry runs execute every stage but skip all writes and return a
//! preview instead.

use std::sync::Arc;

use postforge_core::content::{Platform, PostFormat, SalesChannel};
use postforge_core::context::{build_context, BrandInputs, CampaignInputs};
use postforge_core::error::CoreError;
use postforge_core::plan::{GeneratedPost, ShotList, StrategyPlan};
use postforge_core::schedule::{build_slots, inclusive_day_count};
use postforge_core::types::DbId;
use postforge_db::models::brand_profile::BrandProfile;
use postforge_db::models::campaign::Campaign;
use postforge_db::models::post::{NewPost, Post};
use postforge_db::repositories::{AccountRepo, BrandProfileRepo, CampaignRepo, PostRepo};
use postforge_db::DbPool;
use postforge_provider::TextGenerator;
use serde::Serialize;

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::post::generate_post;
use crate::shot_list::generate_shot_list;
use crate::strategy::{generate_strategy, target_posts, StrategyInputs};

/// Posts included in a dry-run preview.
const PREVIEW_POSTS: usize = 3;

/// One failed post-generation unit, keyed by its slot number.
#[derive(Debug, Clone, Serialize)]
pub struct PostFailure {
    pub post_number: i32,
    pub message: String,
}

/// Phase and theme counts echoed back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct StrategySummary {
    pub phases: usize,
    pub themes: usize,
}

/// Full artifacts returned instead of writes on a dry run.
#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub strategy: StrategyPlan,
    #[serde(rename = "shotList")]
    pub shot_list: ShotList,
    pub posts: Vec<GeneratedPost>,
}

/// Result of one orchestration run. A run with post-unit failures is still
/// a success; callers detect partial failure from `failed_posts` and a
/// lower `posts_created`.
#[derive(Debug, Clone, Serialize)]
pub struct OrchestrationOutcome {
    pub success: bool,
    pub dry_run: bool,
    pub posts_created: usize,
    pub shots_created: usize,
    pub strategy: StrategySummary,
    pub failed_posts: Vec<PostFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<Preview>,
}

/// Drives full campaign runs against one pool and one text generator.
pub struct Orchestrator {
    pool: DbPool,
    generator: Arc<dyn TextGenerator>,
    config: PipelineConfig,
}

impl Orchestrator {
    pub fn new(pool: DbPool, generator: Arc<dyn TextGenerator>, config: PipelineConfig) -> Self {
        Self {
            pool,
            generator,
            config,
        }
    }

    /// Run the full pipeline for a campaign the account owns.
    ///
    /// With `dry_run` set, every generation stage still executes but no
    /// artifacts or posts are written and no counters move.
    pub async fn run(
        &self,
        account_id: DbId,
        campaign_id: DbId,
        dry_run: bool,
    ) -> Result<OrchestrationOutcome, PipelineError> {
        let campaign = CampaignRepo::find_for_account(&self.pool, campaign_id, account_id)
            .await?
            .ok_or_else(|| CoreError::not_found("campaign", campaign_id))?;
        AccountRepo::find_by_id(&self.pool, account_id)
            .await?
            .ok_or_else(|| CoreError::not_found("account", account_id))?;
        let brand = BrandProfileRepo::find_by_account(&self.pool, account_id)
            .await?
            .ok_or_else(|| {
                CoreError::Validation(
                    "Brand profile not found. Set up your brand profile before creating a campaign."
                        .to_string(),
                )
            })?;

        let brand_inputs = brand_inputs(&brand);
        let campaign_inputs = campaign_inputs(&campaign)?;
        let platforms = campaign_inputs.platforms.clone();
        let context = build_context(&brand_inputs, &campaign_inputs)?;

        let day_count = inclusive_day_count(campaign.start_date, campaign.end_date);
        let inputs = StrategyInputs {
            day_count,
            target_posts: target_posts(campaign.num_posts, day_count),
            important_date: campaign.important_date,
        };

        tracing::info!(
            campaign_id,
            account_id,
            dry_run,
            day_count,
            target_posts = inputs.target_posts,
            "Starting campaign generation"
        );

        let strategy =
            generate_strategy(self.generator.as_ref(), &context, &inputs, &self.config).await?;
        tracing::info!(
            phases = strategy.weekly_phases.len(),
            themes = strategy.content_themes.len(),
            planned_posts = strategy.total_posts(),
            "Strategy stage complete"
        );

        let shot_list =
            generate_shot_list(self.generator.as_ref(), &context, &strategy, &self.config).await?;
        tracing::info!(shots = shot_list.shots.len(), "Shot list stage complete");

        if !dry_run {
            self.persist_artifacts(campaign_id, &strategy, &shot_list)
                .await?;
        }

        for phase in &strategy.weekly_phases {
            for label in phase.format_mix.keys() {
                if PostFormat::parse(label).is_err() {
                    tracing::warn!(
                        phase = %phase.phase,
                        format = %label,
                        "Unknown format label in strategy mix, slots fall back to image"
                    );
                }
            }
        }

        let slots = build_slots(&strategy, campaign.start_date, campaign.end_date, &platforms)?;

        let batch_size = self.config.batch_size.max(1);
        let batch_count = slots.len().div_ceil(batch_size);
        let mut posts: Vec<GeneratedPost> = Vec::with_capacity(slots.len());
        let mut failed_posts: Vec<PostFailure> = Vec::new();

        for (batch_index, batch) in slots.chunks(batch_size).enumerate() {
            tracing::info!(
                batch = batch_index + 1,
                batches = batch_count,
                units = batch.len(),
                "Generating post batch"
            );

            let results = futures::future::join_all(batch.iter().map(|slot| async {
                (
                    slot.post_number,
                    generate_post(
                        self.generator.as_ref(),
                        &context,
                        &strategy,
                        &shot_list,
                        slot,
                        &self.config,
                    )
                    .await,
                )
            }))
            .await;

            for (post_number, result) in results {
                match result {
                    Ok(post) => posts.push(post),
                    Err(e) => {
                        tracing::error!(post_number, error = %e, "Post generation failed");
                        failed_posts.push(PostFailure {
                            post_number,
                            message: e.to_string(),
                        });
                    }
                }
            }

            if batch_index + 1 < batch_count {
                tokio::time::sleep(self.config.batch_delay).await;
            }
        }

        let posts_created = if dry_run {
            posts.len()
        } else {
            let inserted = self.persist_posts(&campaign, &posts).await?;
            inserted.len()
        };

        tracing::info!(
            campaign_id,
            posts_created,
            failed = failed_posts.len(),
            dry_run,
            "Campaign generation complete"
        );

        let preview = dry_run.then(|| Preview {
            strategy: strategy.clone(),
            shot_list: shot_list.clone(),
            posts: posts.iter().take(PREVIEW_POSTS).cloned().collect(),
        });

        Ok(OrchestrationOutcome {
            success: true,
            dry_run,
            posts_created,
            shots_created: shot_list.shots.len(),
            strategy: StrategySummary {
                phases: strategy.weekly_phases.len(),
                themes: strategy.content_themes.len(),
            },
            failed_posts,
            preview,
        })
    }

    /// Delete the campaign's existing posts, release their quota, and run
    /// the pipeline again from scratch. A dry run skips the delete too.
    pub async fn regenerate(
        &self,
        account_id: DbId,
        campaign_id: DbId,
        dry_run: bool,
    ) -> Result<OrchestrationOutcome, PipelineError> {
        if CampaignRepo::find_for_account(&self.pool, campaign_id, account_id)
            .await?
            .is_none()
        {
            return Err(CoreError::not_found("campaign", campaign_id).into());
        }

        if !dry_run {
            let deleted = PostRepo::delete_for_campaign(&self.pool, campaign_id).await?;
            if deleted > 0 {
                AccountRepo::decrement_posts_created(&self.pool, account_id, deleted as i32)
                    .await?;
                tracing::info!(campaign_id, deleted, "Cleared prior posts before regeneration");
            }
        }

        self.run(account_id, campaign_id, dry_run).await
    }

    async fn persist_artifacts(
        &self,
        campaign_id: DbId,
        strategy: &StrategyPlan,
        shot_list: &ShotList,
    ) -> Result<(), PipelineError> {
        let strategy_value = serde_json::to_value(strategy)
            .map_err(|e| CoreError::Internal(format!("failed to serialize strategy plan: {e}")))?;
        let shot_list_value = serde_json::to_value(shot_list)
            .map_err(|e| CoreError::Internal(format!("failed to serialize shot list: {e}")))?;

        let updated = CampaignRepo::set_plan_artifacts(
            &self.pool,
            campaign_id,
            &strategy_value,
            &shot_list_value,
        )
        .await?;
        if !updated {
            return Err(CoreError::not_found("campaign", campaign_id).into());
        }
        Ok(())
    }

    /// Bulk-insert the successful posts and move the account's usage
    /// counter. A counter failure is logged, not propagated: the posts are
    /// already in and a stale counter is recoverable.
    async fn persist_posts(
        &self,
        campaign: &Campaign,
        posts: &[GeneratedPost],
    ) -> Result<Vec<Post>, PipelineError> {
        let mut rows = Vec::with_capacity(posts.len());
        for post in posts {
            let visual_concept = serde_json::to_value(&post.visual_concept).map_err(|e| {
                CoreError::Internal(format!("failed to serialize visual concept: {e}"))
            })?;
            rows.push(NewPost {
                campaign_id: campaign.id,
                account_id: campaign.account_id,
                post_number: post.post_number,
                post_name: post.post_name.clone(),
                scheduled_date: post.scheduled_date,
                post_type: post.post_type.as_str().to_string(),
                platforms: post
                    .platforms
                    .iter()
                    .map(|p| p.as_str().to_string())
                    .collect(),
                hook: post.hook.clone(),
                caption: post.caption.clone(),
                visual_concept,
                purpose: post.purpose.clone(),
                core_message: post.core_message.clone(),
                behavioral_trigger: post.behavioral_trigger.as_str().to_string(),
                strategy_type: post.strategy_type.clone(),
                tracking_focus: post.tracking_focus.clone(),
                cta: post.cta.clone(),
                status: post.status.as_str().to_string(),
            });
        }

        let inserted = PostRepo::insert_many(&self.pool, &rows).await?;

        if !inserted.is_empty() {
            match AccountRepo::increment_posts_created(
                &self.pool,
                campaign.account_id,
                inserted.len() as i32,
            )
            .await
            {
                Ok(Some(_)) => {}
                Ok(None) => tracing::warn!(
                    account_id = campaign.account_id,
                    "Account disappeared during usage-counter update"
                ),
                Err(e) => tracing::error!(
                    account_id = campaign.account_id,
                    error = %e,
                    "Failed to update posts-created counter"
                ),
            }
        }

        Ok(inserted)
    }
}

fn brand_inputs(brand: &BrandProfile) -> BrandInputs {
    BrandInputs {
        business_name: brand.business_name.clone(),
        what_you_sell: brand.what_you_sell.clone(),
        what_makes_unique: brand.what_makes_unique.clone(),
        target_customer: brand.target_customer.clone(),
        brand_vibe_words: brand.brand_vibe_words.clone(),
    }
}

/// Rehydrate the typed campaign inputs from stored wire strings. Stored
/// labels are validated on write, so a parse failure here means the row
/// was corrupted outside the API.
fn campaign_inputs(campaign: &Campaign) -> Result<CampaignInputs, CoreError> {
    let platforms = campaign
        .platforms
        .iter()
        .map(|label| Platform::parse(label))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| invalid_row(campaign.id, &e))?;
    let sales_channel =
        SalesChannel::parse(&campaign.sales_channel).map_err(|e| invalid_row(campaign.id, &e))?;

    Ok(CampaignInputs {
        what_promoting: campaign.what_promoting.clone(),
        goal: campaign.goal.clone(),
        sales_channel,
        platforms,
        start_date: campaign.start_date,
        end_date: campaign.end_date,
        important_date: campaign.important_date,
        important_date_label: campaign.important_date_label.clone(),
    })
}

fn invalid_row(campaign_id: DbId, detail: &str) -> CoreError {
    CoreError::Internal(format!(
        "campaign {campaign_id} has invalid stored data: {detail}"
    ))
}
