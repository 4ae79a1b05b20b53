//! Subscription tiers and usage-limit decisions.
//!
//! The decision itself is pure: callers look up the relevant usage number
//! (a period counter or a live row count) and pass it in. Enforcement
//! policy differs per action and lives with the caller; this module only
//! answers whether the action fits the tier.

use serde::{Deserialize, Serialize};

use crate::types::Date;

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Starter,
    Pro,
    Enterprise,
}

impl SubscriptionTier {
    pub const ALL: [SubscriptionTier; 3] = [
        SubscriptionTier::Starter,
        SubscriptionTier::Pro,
        SubscriptionTier::Enterprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Starter => "starter",
            SubscriptionTier::Pro => "pro",
            SubscriptionTier::Enterprise => "enterprise",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        Self::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| {
                format!(
                    "Invalid subscription tier '{s}'. Must be one of: starter, pro, enterprise"
                )
            })
    }

    /// Reads a tier off an account row. Accounts predating the current
    /// tier vocabulary keep whatever label they were created with, so
    /// anything unrecognized is treated as starter.
    pub fn from_account(s: &str) -> Self {
        Self::parse(s).unwrap_or(SubscriptionTier::Starter)
    }

    pub fn limits(&self) -> TierLimits {
        match self {
            SubscriptionTier::Starter => TierLimits {
                posts_per_campaign: Some(10),
                regenerations_per_month: Some(5),
                active_campaigns: Some(1),
                brand_profiles: 1,
            },
            SubscriptionTier::Pro => TierLimits {
                posts_per_campaign: Some(50),
                regenerations_per_month: Some(25),
                active_campaigns: Some(5),
                brand_profiles: 1,
            },
            SubscriptionTier::Enterprise => TierLimits {
                posts_per_campaign: None,
                regenerations_per_month: None,
                active_campaigns: None,
                brand_profiles: 5,
            },
        }
    }
}

/// Per-tier caps. `None` means unlimited; brand profiles are capped on
/// every tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierLimits {
    pub posts_per_campaign: Option<u32>,
    pub regenerations_per_month: Option<u32>,
    pub active_campaigns: Option<u32>,
    pub brand_profiles: u32,
}

// ---------------------------------------------------------------------------
// Actions and decisions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitAction {
    CreatePosts,
    Regenerate,
    CreateCampaign,
    CreateBrandProfile,
}

impl LimitAction {
    pub const ALL: [LimitAction; 4] = [
        LimitAction::CreatePosts,
        LimitAction::Regenerate,
        LimitAction::CreateCampaign,
        LimitAction::CreateBrandProfile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LimitAction::CreatePosts => "create_posts",
            LimitAction::Regenerate => "regenerate",
            LimitAction::CreateCampaign => "create_campaign",
            LimitAction::CreateBrandProfile => "create_brand_profile",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        Self::ALL.iter().find(|a| a.as_str() == s).copied().ok_or_else(|| {
            format!(
                "Invalid action '{s}'. Must be one of: create_posts, regenerate, \
                 create_campaign, create_brand_profile"
            )
        })
    }
}

/// Outcome of a limit check, shaped for the usage endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LimitDecision {
    pub allowed: bool,
    pub current_usage: u32,
    /// `None` means the tier has no cap for this action.
    pub limit: Option<u32>,
    pub upgrade_required: bool,
    pub message: String,
    pub tier: SubscriptionTier,
}

/// Compares `current_usage` against the tier's cap for `action`.
///
/// `period_resets_on` is the end of the account's billing period; it only
/// shows up in the blocked-regeneration message.
pub fn check_action(
    tier: SubscriptionTier,
    action: LimitAction,
    current_usage: u32,
    period_resets_on: Option<Date>,
) -> LimitDecision {
    let limits = tier.limits();
    match action {
        LimitAction::CreatePosts => match limits.posts_per_campaign {
            None => allowed_unlimited(tier, current_usage, "Unlimited posts available"),
            Some(limit) => {
                let blocked_message = match tier {
                    SubscriptionTier::Starter => {
                        "Upgrade to Pro to generate up to 50 posts per campaign".to_string()
                    }
                    _ => "Upgrade to Enterprise for unlimited posts".to_string(),
                };
                capped(tier, current_usage, limit, blocked_message)
            }
        },
        LimitAction::Regenerate => match limits.regenerations_per_month {
            None => {
                allowed_unlimited(tier, current_usage, "Unlimited regenerations available")
            }
            Some(limit) => {
                let reset = match period_resets_on {
                    Some(date) => format!("your limit resets on {date}"),
                    None => "your next billing period".to_string(),
                };
                let blocked_message = match tier {
                    SubscriptionTier::Starter => format!(
                        "You've used all {limit} regenerations this month. Upgrade to Pro \
                         for 25 regenerations/month, or wait until {reset}."
                    ),
                    _ => format!(
                        "You've used all {limit} regenerations this month. Upgrade to \
                         Enterprise for unlimited regenerations, or wait until {reset}."
                    ),
                };
                capped(tier, current_usage, limit, blocked_message)
            }
        },
        LimitAction::CreateCampaign => match limits.active_campaigns {
            None => {
                allowed_unlimited(tier, current_usage, "Unlimited campaigns available")
            }
            Some(limit) => {
                let blocked_message = match tier {
                    SubscriptionTier::Starter => {
                        "You can only have 1 active campaign on the Starter tier. Upgrade \
                         to Pro to manage up to 5 campaigns at once, or archive your \
                         current campaign first."
                            .to_string()
                    }
                    _ => "Upgrade to Enterprise to manage unlimited campaigns simultaneously."
                        .to_string(),
                };
                capped(tier, current_usage, limit, blocked_message)
            }
        },
        LimitAction::CreateBrandProfile => {
            let limit = limits.brand_profiles;
            capped(
                tier,
                current_usage,
                limit,
                "Upgrade to Enterprise to manage up to 5 brand profiles, built for \
                 agencies and multi-brand businesses."
                    .to_string(),
            )
        }
    }
}

fn allowed_unlimited(tier: SubscriptionTier, current_usage: u32, message: &str) -> LimitDecision {
    LimitDecision {
        allowed: true,
        current_usage,
        limit: None,
        upgrade_required: false,
        message: message.to_string(),
        tier,
    }
}

fn capped(
    tier: SubscriptionTier,
    current_usage: u32,
    limit: u32,
    blocked_message: String,
) -> LimitDecision {
    let allowed = current_usage < limit;
    LimitDecision {
        allowed,
        current_usage,
        limit: Some(limit),
        upgrade_required: !allowed,
        message: if allowed { String::new() } else { blocked_message },
        tier,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
