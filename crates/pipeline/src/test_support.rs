//! Fixture builders shared by the stage unit tests.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use postforge_core::content::{Platform, SalesChannel};
use postforge_core::context::{build_context, BrandInputs, CampaignInputs, ContextPackage};
use postforge_core::plan::{
    ContentTheme, PostingFrequency, Shot, ShotList, ShotPriorities, StrategyPlan, WeeklyPhase,
};

pub(crate) fn context() -> ContextPackage {
    let brand = BrandInputs {
        business_name: "Maple & Clay".to_string(),
        what_you_sell: "handmade ceramic mugs".to_string(),
        what_makes_unique: "small-batch glazes you can't buy twice".to_string(),
        target_customer: "people who romanticize their morning coffee".to_string(),
        brand_vibe_words: vec!["warm".to_string(), "cozy".to_string()],
    };
    let campaign = CampaignInputs {
        what_promoting: "winter mug collection".to_string(),
        goal: Some("launch the winter line".to_string()),
        sales_channel: SalesChannel::Etsy,
        platforms: vec![Platform::Instagram, Platform::Facebook],
        start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(),
        important_date: Some(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()),
        important_date_label: Some("Launch Day".to_string()),
    };
    build_context(&brand, &campaign).unwrap()
}

pub(crate) fn weekly_phase(week: u32, phase: &str, mix: &[(&str, u32)]) -> WeeklyPhase {
    WeeklyPhase {
        week,
        dates: format!("Week {week}"),
        phase: phase.to_string(),
        intent: format!("{phase} intent"),
        post_count: mix.iter().map(|(_, n)| n).sum(),
        format_mix: mix
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect::<BTreeMap<_, _>>(),
    }
}

pub(crate) fn strategy_plan() -> StrategyPlan {
    StrategyPlan {
        weekly_phases: vec![
            weekly_phase(1, "awareness", &[("reel", 2), ("image", 1)]),
            weekly_phase(2, "conversion", &[("carousel", 1), ("image", 1)]),
        ],
        posting_frequency: PostingFrequency {
            default_cadence: "1 post every 1-2 days".to_string(),
            surge_dates: vec!["2026-01-15".to_string()],
        },
        content_themes: vec![
            ContentTheme {
                theme: "product beauty shots".to_string(),
                count: 3,
            },
            ContentTheme {
                theme: "behind-the-scenes process".to_string(),
                count: 2,
            },
        ],
        shot_requirements: vec![
            "3 hero product shots (different angles)".to_string(),
            "2 BTS process videos".to_string(),
        ],
    }
}

pub(crate) fn shot_list() -> ShotList {
    ShotList {
        themes: vec![],
        props: vec![],
        locations: vec![],
        priority: ShotPriorities::default(),
        batch_sessions: vec![],
        diy_tips: vec!["Use a stack of books to elevate your phone".to_string()],
        shots: vec![
            Shot {
                shot_number: 1,
                title: "Cozy Flat Lay".to_string(),
                media_type: "photo".to_string(),
                description: "Mug with blanket on wooden surface".to_string(),
                file_format: "Shot-1-Cozy-Flat-Lay.jpg".to_string(),
                reusable: true,
                estimated_uses: 4,
                checked: false,
            },
            Shot {
                shot_number: 2,
                title: "Process BTS Video".to_string(),
                media_type: "video".to_string(),
                description: "Hands glazing a mug".to_string(),
                file_format: "Shot-2-Process-BTS.mp4".to_string(),
                reusable: true,
                estimated_uses: 5,
                checked: false,
            },
        ],
    }
}
