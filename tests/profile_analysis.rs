use chrono::{NaiveDate, NaiveDateTime};
use insta_insight::config::ServiceCatalog;
use insta_insight::{
    analyze, AnalysisReport, BioLengthTier, EngagementTier, FrequencyTier, GrowthTier,
    ProfileRecord, RatioTier,
};

fn frozen_clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn record(followers: u64, following: u64, posts: u64) -> ProfileRecord {
    ProfileRecord {
        followers_count: followers,
        following_count: following,
        posts_count: posts,
        ..ProfileRecord::default()
    }
}

fn with_media(mut record: ProfileRecord, entries: usize) -> ProfileRecord {
    record.media = Some(vec![serde_json::json!({}); entries]);
    record
}

fn catalog() -> ServiceCatalog {
    ServiceCatalog::default()
}

#[test]
fn engagement_absent_without_followers() {
    let mut profile = record(0, 100, 10);
    profile.engagement_rate = Some(0.05);

    let analysis = analyze(&profile, &catalog());

    assert!(analysis.engagement.is_none());
}

#[test]
fn engagement_buckets_are_left_inclusive() {
    let cases = [
        (0.0099, EngagementTier::Low),
        (0.01, EngagementTier::Medium),
        (0.0299, EngagementTier::Medium),
        (0.03, EngagementTier::Good),
        (0.0599, EngagementTier::Good),
        (0.06, EngagementTier::Excellent),
    ];

    for (raw_rate, expected) in cases {
        let mut profile = record(100, 0, 0);
        profile.engagement_rate = Some(raw_rate);
        let insight = analyze(&profile, &catalog())
            .engagement
            .expect("followers > 0 should produce an engagement insight");
        assert_eq!(insight.tier, expected, "raw rate {}", raw_rate);
    }
}

#[test]
fn engagement_rate_is_percentage_with_two_decimals() {
    let mut profile = record(100, 0, 0);
    profile.engagement_rate = Some(0.0234);

    let insight = analyze(&profile, &catalog()).engagement.unwrap();

    assert!((insight.rate - 2.34).abs() < 1e-6);
}

#[test]
fn engagement_defaults_when_rate_missing() {
    let profile = record(100, 0, 0);

    let insight = analyze(&profile, &catalog()).engagement.unwrap();

    assert!((insight.rate - 4.5).abs() < 1e-6);
    assert_eq!(insight.tier, EngagementTier::Good);
}

#[test]
fn ratio_absent_without_following() {
    let analysis = analyze(&record(100, 0, 0), &catalog());

    assert!(analysis.ratio.is_none());
}

#[test]
fn ratio_boundary_half_classifies_low_not_very_low() {
    let insight = analyze(&record(500, 1000, 0), &catalog()).ratio.unwrap();

    assert!((insight.ratio - 0.5).abs() < 1e-6);
    assert_eq!(insight.tier, RatioTier::Low);
}

#[test]
fn ratio_buckets_cover_all_tiers() {
    let cases = [
        (400, 1000, RatioTier::VeryLow),
        // 499/1000 rounds to 0.50 and lands in the next bucket up.
        (499, 1000, RatioTier::Low),
        (700, 1000, RatioTier::Low),
        (1000, 1000, RatioTier::Good),
        (1500, 1000, RatioTier::Good),
        (2000, 1000, RatioTier::Excellent),
    ];

    for (followers, following, expected) in cases {
        let insight = analyze(&record(followers, following, 0), &catalog())
            .ratio
            .unwrap();
        assert_eq!(insight.tier, expected, "{}/{}", followers, following);
    }
}

#[test]
fn frequency_absent_without_media() {
    let analysis = analyze(&record(100, 100, 400), &catalog());
    assert!(analysis.frequency.is_none());

    let empty_media = with_media(record(100, 100, 400), 0);
    let analysis = analyze(&empty_media, &catalog());
    assert!(analysis.frequency.is_none());
}

#[test]
fn frequency_assumes_one_year_account() {
    let profile = with_media(record(100, 100, 400), 3);

    let insight = analyze(&profile, &catalog()).frequency.unwrap();

    assert!((insight.posts_per_week - 7.67).abs() < 1e-6);
    assert_eq!(insight.tier, FrequencyTier::High);
}

#[test]
fn frequency_buckets_follow_rounded_value() {
    let cases = [
        (50, FrequencyTier::VeryLow),
        (52, FrequencyTier::Low),
        (150, FrequencyTier::Low),
        (200, FrequencyTier::Moderate),
        (300, FrequencyTier::High),
    ];

    for (posts, expected) in cases {
        let profile = with_media(record(100, 100, posts), 1);
        let insight = analyze(&profile, &catalog()).frequency.unwrap();
        assert_eq!(insight.tier, expected, "posts {}", posts);
    }
}

#[test]
fn bio_absent_when_missing_empty_or_sentinel() {
    let analysis = analyze(&record(10, 10, 0), &catalog());
    assert!(analysis.bio.is_none());

    let mut profile = record(10, 10, 0);
    profile.bio = Some(String::new());
    assert!(analyze(&profile, &catalog()).bio.is_none());

    profile.bio = Some("bio not found".to_string());
    assert!(analyze(&profile, &catalog()).bio.is_none());
}

#[test]
fn bio_flags_hashtags_and_emojis() {
    let mut profile = record(10, 10, 0);
    profile.bio = Some("Daily #coffee rituals \u{2615} and travel notes".to_string());

    let insight = analyze(&profile, &catalog()).bio.unwrap();

    assert!(insight.has_hashtags);
    assert!(insight.has_emojis);
}

#[test]
fn latin1_accents_do_not_count_as_emojis() {
    let mut profile = record(10, 10, 0);
    profile.bio = Some("Café, crônicas e versos por aí".to_string());

    let insight = analyze(&profile, &catalog()).bio.unwrap();

    assert!(!insight.has_emojis);
}

#[test]
fn non_latin1_text_counts_as_emojis() {
    let mut profile = record(10, 10, 0);
    profile.bio = Some("Привет, мир".to_string());

    let insight = analyze(&profile, &catalog()).bio.unwrap();

    assert!(insight.has_emojis);
}

#[test]
fn bio_length_counts_chars_and_buckets() {
    let cases = [
        (29, BioLengthTier::VeryShort),
        (30, BioLengthTier::Short),
        (69, BioLengthTier::Short),
        (70, BioLengthTier::Adequate),
        (129, BioLengthTier::Adequate),
        (130, BioLengthTier::Long),
    ];

    for (length, expected) in cases {
        let mut profile = record(10, 10, 0);
        profile.bio = Some("a".repeat(length));
        let insight = analyze(&profile, &catalog()).bio.unwrap();
        assert_eq!(insight.length, length);
        assert_eq!(insight.tier, expected, "length {}", length);
    }
}

#[test]
fn growth_reaches_ceiling_with_every_factor_maxed() {
    let mut profile = with_media(record(10_000, 1_000, 300), 5);
    profile.engagement_rate = Some(0.07);
    profile.bio = Some(format!("{} \u{2615}", "a".repeat(75)));

    let analysis = analyze(&profile, &catalog());

    assert!((analysis.growth.potential - 10.0).abs() < 1e-6);
    assert_eq!(analysis.growth.tier, GrowthTier::Excellent);
}

#[test]
fn growth_is_zero_for_empty_profile() {
    let analysis = analyze(&ProfileRecord::default(), &catalog());

    assert!((analysis.growth.potential - 0.0).abs() < 1e-6);
    assert_eq!(analysis.growth.tier, GrowthTier::Low);
    assert_eq!(analysis.services.len(), 1);
}

#[test]
fn growth_skips_absent_factors_without_penalty() {
    // Ratio runs but 0.5 scores nothing; engagement 2.0 contributes the only point.
    let mut profile = record(500, 1000, 10);
    profile.engagement_rate = Some(0.02);

    let analysis = analyze(&profile, &catalog());

    assert!((analysis.growth.potential - 0.9).abs() < 1e-6);
    assert_eq!(analysis.growth.tier, GrowthTier::Low);
}

#[test]
fn growth_potential_stays_in_range() {
    let samples = [
        ProfileRecord::default(),
        record(1, 1, 1),
        with_media(record(50_000, 10, 10_000), 12),
        {
            let mut profile = with_media(record(123, 456, 789), 2);
            profile.engagement_rate = Some(1.0);
            profile.bio = Some("#one \u{1F680} two".to_string());
            profile
        },
    ];

    for profile in samples {
        let analysis = analyze(&profile, &catalog());
        assert!(
            (0.0..=10.0).contains(&analysis.growth.potential),
            "potential {} out of range",
            analysis.growth.potential
        );
    }
}

#[test]
fn follower_tier_selects_matching_package() {
    let cases = [
        (999, "1000-1300 followers"),
        (1000, "2000-2300 followers"),
        (4999, "2000-2300 followers"),
        (5000, "5000 followers"),
    ];

    for (followers, expected_package) in cases {
        let mut profile = record(followers, 0, 0);
        profile.engagement_rate = Some(0.05);
        let analysis = analyze(&profile, &catalog());
        assert_eq!(analysis.services[0].service_type, "followers");
        assert_eq!(
            analysis.services[0].package, expected_package,
            "followers {}",
            followers
        );
    }
}

#[test]
fn engagement_boost_appended_only_below_three_percent() {
    let mut profile = record(100, 0, 0);
    profile.engagement_rate = Some(0.03);
    let analysis = analyze(&profile, &catalog());
    assert_eq!(analysis.services.len(), 1);

    profile.engagement_rate = Some(0.02);
    let analysis = analyze(&profile, &catalog());
    assert_eq!(analysis.services.len(), 2);
    assert_eq!(analysis.services[0].service_type, "followers");
    assert_eq!(analysis.services[1].service_type, "likes");
    assert!((analysis.services[1].price - 45.00).abs() < 1e-6);
    assert!(
        analysis.services[1].reason.contains("(2%)"),
        "reason should carry the computed rate: {}",
        analysis.services[1].reason
    );
}

#[test]
fn report_omits_fields_for_stages_that_did_not_run() {
    let report = AnalysisReport::new(analyze(&ProfileRecord::default(), &catalog()), frozen_clock());
    let value = serde_json::to_value(&report).unwrap();
    let object = value.as_object().unwrap();

    for absent in [
        "engagement_rate",
        "engagement_classification",
        "follower_following_ratio",
        "ratio_classification",
        "ratio_recommendation",
        "post_frequency",
        "frequency_classification",
        "frequency_recommendation",
        "bio_length",
        "bio_has_hashtags",
        "bio_has_emojis",
        "bio_length_classification",
        "bio_recommendation",
    ] {
        assert!(!object.contains_key(absent), "{} should be absent", absent);
    }

    for present in [
        "growth_potential",
        "growth_classification",
        "growth_recommendation",
        "analysis_date",
        "services_recommendations",
    ] {
        assert!(object.contains_key(present), "{} should be present", present);
    }
}

#[test]
fn report_timestamp_uses_injected_clock() {
    let report = AnalysisReport::new(analyze(&record(10, 10, 0), &catalog()), frozen_clock());

    assert_eq!(report.analysis_date, "2024-06-01 12:00:00");
}

#[test]
fn frozen_clock_makes_output_idempotent() {
    let mut profile = with_media(record(1500, 800, 120), 4);
    profile.engagement_rate = Some(0.012);
    profile.bio = Some("Street photography #lens \u{1F4F7} daily walks".to_string());

    let first = serde_json::to_string(&AnalysisReport::new(
        analyze(&profile, &catalog()),
        frozen_clock(),
    ))
    .unwrap();
    let second = serde_json::to_string(&AnalysisReport::new(
        analyze(&profile, &catalog()),
        frozen_clock(),
    ))
    .unwrap();

    assert_eq!(first, second);
}
