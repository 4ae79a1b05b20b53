//! Slot computation: turns a strategy plan plus the campaign window into a
//! dense, dated sequence of post slots.
//!
//! Slots are authoritative. Whatever the generation stage writes later, a
//! post keeps the number, date, format, and platforms of the slot it was
//! generated for.

use crate::content::{Platform, PostFormat};
use crate::error::CoreError;
use crate::plan::StrategyPlan;
use crate::types::Date;

/// One scheduled position in the campaign calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct PostSlot {
    /// 1-based, dense across the whole campaign.
    pub post_number: i32,
    pub scheduled_date: Date,
    pub post_type: PostFormat,
    /// Funnel phase the slot belongs to, copied from its weekly phase.
    pub phase: String,
    pub theme: String,
    pub platforms: Vec<Platform>,
}

/// Number of calendar days in the window, counting both endpoints. A
/// Monday-to-Sunday campaign spans 7 days.
pub fn inclusive_day_count(start: Date, end: Date) -> i64 {
    (end - start).num_days() + 1
}

/// Date for the nth post when `total_posts` are spread evenly across the
/// window. Post 1 always lands on the start date; the offset for post n is
/// `floor(interval * (n - 1))` with a fractional day interval, which keeps
/// every post inside the window.
pub fn scheduled_date(start: Date, end: Date, post_number: i32, total_posts: u32) -> Date {
    let total_days = inclusive_day_count(start, end);
    let interval = total_days as f64 / total_posts as f64;
    let offset = (interval * (post_number as f64 - 1.0)).floor() as i64;
    start + chrono::Duration::days(offset)
}

/// Expands the strategy's weekly phases into dated slots.
///
/// Phases are walked in order and each phase's `format_mix` is flattened
/// into a rotation (keys in sorted order, each repeated by its count).
/// Labels outside the format vocabulary, and an empty mix, fall back to
/// image. Themes rotate over the first three strategy themes; an empty
/// theme label falls back to the first theme.
pub fn build_slots(
    strategy: &StrategyPlan,
    start: Date,
    end: Date,
    platforms: &[Platform],
) -> Result<Vec<PostSlot>, CoreError> {
    let total_posts = strategy.total_posts();
    if total_posts == 0 {
        return Ok(Vec::new());
    }
    if strategy.content_themes.is_empty() {
        return Err(CoreError::Validation(
            "strategy plan contains no content themes".to_string(),
        ));
    }

    let theme_count = strategy.content_themes.len().min(3);
    let mut slots = Vec::with_capacity(total_posts as usize);
    let mut post_number: i32 = 1;

    for phase in &strategy.weekly_phases {
        let formats: Vec<PostFormat> = phase
            .format_mix
            .iter()
            .flat_map(|(label, count)| {
                let format = PostFormat::parse(label).unwrap_or(PostFormat::Image);
                std::iter::repeat(format).take(*count as usize)
            })
            .collect();

        for i in 0..phase.post_count as usize {
            let post_type = if formats.is_empty() {
                PostFormat::Image
            } else {
                formats[i % formats.len()]
            };
            let rotated = &strategy.content_themes[i % theme_count].theme;
            let theme = if rotated.is_empty() {
                strategy.content_themes[0].theme.clone()
            } else {
                rotated.clone()
            };

            slots.push(PostSlot {
                post_number,
                scheduled_date: scheduled_date(start, end, post_number, total_posts),
                post_type,
                phase: phase.phase.clone(),
                theme,
                platforms: platforms.to_vec(),
            });
            post_number += 1;
        }
    }

    Ok(slots)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{ContentTheme, WeeklyPhase};
    use std::collections::BTreeMap;

    fn date(y: i32, m: u32, d: u32) -> Date {
        chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn phase(name: &str, post_count: u32, mix: &[(&str, u32)]) -> WeeklyPhase {
        WeeklyPhase {
            week: 1,
            dates: String::new(),
            phase: name.to_string(),
            intent: String::new(),
            post_count,
            format_mix: mix.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    fn themed_strategy(phases: Vec<WeeklyPhase>, themes: &[&str]) -> StrategyPlan {
        StrategyPlan {
            weekly_phases: phases,
            posting_frequency: Default::default(),
            content_themes: themes
                .iter()
                .map(|t| ContentTheme { theme: t.to_string(), count: 1 })
                .collect(),
            shot_requirements: vec![],
        }
    }

    // -- Date math --

    #[test]
    fn day_count_includes_both_endpoints() {
        assert_eq!(inclusive_day_count(date(2026, 1, 5), date(2026, 1, 11)), 7);
        assert_eq!(inclusive_day_count(date(2026, 1, 5), date(2026, 1, 5)), 1);
    }

    #[test]
    fn first_post_lands_on_start_date() {
        let d = scheduled_date(date(2026, 1, 5), date(2026, 1, 18), 1, 10);
        assert_eq!(d, date(2026, 1, 5));
    }

    #[test]
    fn posts_spread_over_fourteen_days() {
        let start = date(2026, 1, 5);
        let end = date(2026, 1, 18);
        let dates: Vec<Date> = (1..=5).map(|n| scheduled_date(start, end, n, 5)).collect();
        assert_eq!(
            dates,
            vec![
                date(2026, 1, 5),
                date(2026, 1, 7),
                date(2026, 1, 10),
                date(2026, 1, 13),
                date(2026, 1, 16),
            ]
        );
    }

    #[test]
    fn daily_cadence_when_posts_equal_days() {
        let start = date(2026, 1, 5);
        let end = date(2026, 1, 11);
        for n in 1..=7 {
            let d = scheduled_date(start, end, n, 7);
            assert_eq!(d, start + chrono::Duration::days(i64::from(n) - 1));
        }
    }

    #[test]
    fn every_post_stays_inside_the_window() {
        let start = date(2026, 3, 1);
        let end = date(2026, 3, 31);
        for total in 1..=40u32 {
            for n in 1..=total as i32 {
                let d = scheduled_date(start, end, n, total);
                assert!(d >= start && d <= end, "post {n}/{total} landed on {d}");
            }
        }
    }

    // -- Slot building --

    #[test]
    fn slots_are_dense_across_phases() {
        let strategy = themed_strategy(
            vec![
                phase("awareness", 2, &[("image", 2)]),
                phase("conversion", 3, &[("reel", 3)]),
            ],
            &["hero", "process"],
        );
        let slots =
            build_slots(&strategy, date(2026, 1, 5), date(2026, 1, 18), &[Platform::Instagram])
                .unwrap();
        let numbers: Vec<i32> = slots.iter().map(|s| s.post_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(slots[0].phase, "awareness");
        assert_eq!(slots[4].phase, "conversion");
        assert_eq!(slots[4].post_type, PostFormat::Reel);
    }

    #[test]
    fn format_rotation_follows_sorted_mix() {
        // Keys iterate sorted: carousel before image before reel.
        let strategy = themed_strategy(
            vec![phase("awareness", 4, &[("reel", 1), ("carousel", 2), ("image", 1)])],
            &["hero"],
        );
        let slots =
            build_slots(&strategy, date(2026, 1, 5), date(2026, 1, 11), &[Platform::Tiktok])
                .unwrap();
        let formats: Vec<PostFormat> = slots.iter().map(|s| s.post_type).collect();
        assert_eq!(
            formats,
            vec![
                PostFormat::Carousel,
                PostFormat::Carousel,
                PostFormat::Image,
                PostFormat::Reel,
            ]
        );
    }

    #[test]
    fn rotation_wraps_when_mix_is_short() {
        let strategy =
            themed_strategy(vec![phase("awareness", 3, &[("story", 1)])], &["hero"]);
        let slots =
            build_slots(&strategy, date(2026, 1, 5), date(2026, 1, 11), &[]).unwrap();
        assert!(slots.iter().all(|s| s.post_type == PostFormat::Story));
    }

    #[test]
    fn unknown_format_labels_fall_back_to_image() {
        let strategy =
            themed_strategy(vec![phase("awareness", 2, &[("video", 2)])], &["hero"]);
        let slots =
            build_slots(&strategy, date(2026, 1, 5), date(2026, 1, 11), &[]).unwrap();
        assert!(slots.iter().all(|s| s.post_type == PostFormat::Image));
    }

    #[test]
    fn empty_format_mix_falls_back_to_image() {
        let strategy = themed_strategy(vec![phase("awareness", 2, &[])], &["hero"]);
        let slots =
            build_slots(&strategy, date(2026, 1, 5), date(2026, 1, 11), &[]).unwrap();
        assert!(slots.iter().all(|s| s.post_type == PostFormat::Image));
    }

    #[test]
    fn themes_rotate_over_first_three() {
        let strategy = themed_strategy(
            vec![phase("awareness", 5, &[("image", 5)])],
            &["a", "b", "c", "d"],
        );
        let slots =
            build_slots(&strategy, date(2026, 1, 5), date(2026, 1, 11), &[]).unwrap();
        let themes: Vec<&str> = slots.iter().map(|s| s.theme.as_str()).collect();
        assert_eq!(themes, vec!["a", "b", "c", "a", "b"]);
    }

    #[test]
    fn blank_theme_label_falls_back_to_first() {
        let strategy = themed_strategy(
            vec![phase("awareness", 2, &[("image", 2)])],
            &["hero", ""],
        );
        let slots =
            build_slots(&strategy, date(2026, 1, 5), date(2026, 1, 11), &[]).unwrap();
        assert_eq!(slots[1].theme, "hero");
    }

    #[test]
    fn missing_themes_with_posts_is_an_error() {
        let strategy = themed_strategy(vec![phase("awareness", 2, &[("image", 2)])], &[]);
        let err = build_slots(&strategy, date(2026, 1, 5), date(2026, 1, 11), &[]).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn zero_posts_yields_no_slots() {
        let strategy = themed_strategy(vec![phase("awareness", 0, &[])], &[]);
        let slots =
            build_slots(&strategy, date(2026, 1, 5), date(2026, 1, 11), &[]).unwrap();
        assert!(slots.is_empty());
    }

    #[test]
    fn every_slot_carries_campaign_platforms() {
        let platforms = vec![Platform::Instagram, Platform::Facebook];
        let strategy = themed_strategy(vec![phase("awareness", 2, &[("image", 2)])], &["hero"]);
        let slots =
            build_slots(&strategy, date(2026, 1, 5), date(2026, 1, 11), &platforms).unwrap();
        assert!(slots.iter().all(|s| s.platforms == platforms));
    }
}
