pub mod config;
pub mod error;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ServiceCatalog;
use crate::error::AnalyzeError;

const DEFAULT_ENGAGEMENT_RATE: f64 = 0.045;
const ASSUMED_ACCOUNT_AGE_DAYS: f64 = 365.0;
const MISSING_BIO_MARKER: &str = "not found";
const MAX_GROWTH_SCORE: u32 = 11;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileRecord {
    pub followers_count: u64,
    pub following_count: u64,
    pub posts_count: u64,
    pub bio: Option<String>,
    pub media: Option<Vec<Value>>,
    pub engagement_rate: Option<f64>,
}

impl ProfileRecord {
    pub fn from_json(payload: &str) -> Result<Self, AnalyzeError> {
        let value: Value = serde_json::from_str(payload).map_err(AnalyzeError::Decode)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, AnalyzeError> {
        if !value.is_object() {
            return Err(AnalyzeError::UnexpectedType(json_type_name(&value)));
        }
        serde_json::from_value(value).map_err(|err| AnalyzeError::Internal(err.to_string()))
    }

    fn has_media(&self) -> bool {
        self.media.as_ref().map_or(false, |media| !media.is_empty())
    }

    fn usable_bio(&self) -> Option<&str> {
        self.bio
            .as_deref()
            .filter(|bio| !bio.is_empty() && !bio.contains(MISSING_BIO_MARKER))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementTier {
    Low,
    Medium,
    Good,
    Excellent,
}

impl EngagementTier {
    pub fn from_rate(rate: f64) -> Self {
        if rate < 1.0 {
            EngagementTier::Low
        } else if rate < 3.0 {
            EngagementTier::Medium
        } else if rate < 6.0 {
            EngagementTier::Good
        } else {
            EngagementTier::Excellent
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EngagementTier::Low => "Low",
            EngagementTier::Medium => "Medium",
            EngagementTier::Good => "Good",
            EngagementTier::Excellent => "Excellent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioTier {
    VeryLow,
    Low,
    Good,
    Excellent,
}

impl RatioTier {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < 0.5 {
            RatioTier::VeryLow
        } else if ratio < 1.0 {
            RatioTier::Low
        } else if ratio < 2.0 {
            RatioTier::Good
        } else {
            RatioTier::Excellent
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RatioTier::VeryLow => "Very low",
            RatioTier::Low => "Low",
            RatioTier::Good => "Good",
            RatioTier::Excellent => "Excellent",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            RatioTier::VeryLow => {
                "Cut back on the number of accounts you follow and focus on creating relevant content to attract more followers."
            }
            RatioTier::Low => {
                "Your ratio is improving, but it is still worth being more selective about the accounts you follow."
            }
            RatioTier::Good => "You have a good ratio. Keep up your current strategy.",
            RatioTier::Excellent => {
                "Your account shows strong authority in its niche. Consider strategies for monetization."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyTier {
    VeryLow,
    Low,
    Moderate,
    High,
}

impl FrequencyTier {
    pub fn from_posts_per_week(posts_per_week: f64) -> Self {
        if posts_per_week < 1.0 {
            FrequencyTier::VeryLow
        } else if posts_per_week < 3.0 {
            FrequencyTier::Low
        } else if posts_per_week < 5.0 {
            FrequencyTier::Moderate
        } else {
            FrequencyTier::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FrequencyTier::VeryLow => "Very low",
            FrequencyTier::Low => "Low",
            FrequencyTier::Moderate => "Moderate",
            FrequencyTier::High => "High",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            FrequencyTier::VeryLow => {
                "Increase your posting frequency significantly, to at least 3 times per week."
            }
            FrequencyTier::Low => "Consider raising your frequency to 4-5 posts per week.",
            FrequencyTier::Moderate => {
                "Good frequency, though a slight increase could maximize your reach."
            }
            FrequencyTier::High => "Excellent posting frequency. Keep the consistency.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BioLengthTier {
    VeryShort,
    Short,
    Adequate,
    Long,
}

impl BioLengthTier {
    pub fn from_length(length: usize) -> Self {
        if length < 30 {
            BioLengthTier::VeryShort
        } else if length < 70 {
            BioLengthTier::Short
        } else if length < 130 {
            BioLengthTier::Adequate
        } else {
            BioLengthTier::Long
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BioLengthTier::VeryShort => "Very short",
            BioLengthTier::Short => "Short",
            BioLengthTier::Adequate => "Adequate",
            BioLengthTier::Long => "Long",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            BioLengthTier::VeryShort => {
                "Your bio is very short. Add more information about your niche and value proposition."
            }
            BioLengthTier::Short => "Your bio could use more detail to engage followers.",
            BioLengthTier::Adequate => {
                "Good bio length. Make sure it includes your value proposition."
            }
            BioLengthTier::Long => "Your bio is at the upper limit. Consider making it more concise.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthTier {
    Low,
    Medium,
    Good,
    Excellent,
}

impl GrowthTier {
    pub fn from_potential(potential: f64) -> Self {
        if potential < 3.0 {
            GrowthTier::Low
        } else if potential < 6.0 {
            GrowthTier::Medium
        } else if potential < 8.0 {
            GrowthTier::Good
        } else {
            GrowthTier::Excellent
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GrowthTier::Low => "Low",
            GrowthTier::Medium => "Medium",
            GrowthTier::Good => "Good",
            GrowthTier::Excellent => "Excellent",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            GrowthTier::Low => {
                "Your profile needs significant improvements to raise its growth potential."
            }
            GrowthTier::Medium => {
                "Your profile has moderate growth potential. Applying these recommendations can raise it significantly."
            }
            GrowthTier::Good => {
                "Your profile has good growth potential. Targeted adjustments can push growth even further."
            }
            GrowthTier::Excellent => {
                "Your profile has excellent growth potential. Keep your strategy going and consider expanding to other platforms."
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngagementInsight {
    pub rate: f64,
    pub tier: EngagementTier,
}

#[derive(Debug, Clone)]
pub struct RatioInsight {
    pub ratio: f64,
    pub tier: RatioTier,
}

#[derive(Debug, Clone)]
pub struct FrequencyInsight {
    pub posts_per_week: f64,
    pub tier: FrequencyTier,
}

#[derive(Debug, Clone)]
pub struct BioInsight {
    pub length: usize,
    pub has_hashtags: bool,
    pub has_emojis: bool,
    pub tier: BioLengthTier,
}

#[derive(Debug, Clone)]
pub struct GrowthInsight {
    pub potential: f64,
    pub tier: GrowthTier,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceRecommendation {
    pub service_type: String,
    pub package: String,
    pub price: f64,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ProfileAnalysis {
    pub engagement: Option<EngagementInsight>,
    pub ratio: Option<RatioInsight>,
    pub frequency: Option<FrequencyInsight>,
    pub bio: Option<BioInsight>,
    pub growth: GrowthInsight,
    pub services: Vec<ServiceRecommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement_classification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follower_following_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio_classification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio_recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_frequency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_classification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio_has_hashtags: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio_has_emojis: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio_length_classification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio_recommendation: Option<String>,
    pub growth_potential: f64,
    pub growth_classification: String,
    pub growth_recommendation: String,
    pub analysis_date: String,
    pub services_recommendations: Vec<ServiceRecommendation>,
}

impl AnalysisReport {
    pub fn new(analysis: ProfileAnalysis, analyzed_at: NaiveDateTime) -> Self {
        let ProfileAnalysis {
            engagement,
            ratio,
            frequency,
            bio,
            growth,
            services,
        } = analysis;

        Self {
            engagement_rate: engagement.as_ref().map(|insight| insight.rate),
            engagement_classification: engagement
                .as_ref()
                .map(|insight| insight.tier.label().to_string()),
            follower_following_ratio: ratio.as_ref().map(|insight| insight.ratio),
            ratio_classification: ratio.as_ref().map(|insight| insight.tier.label().to_string()),
            ratio_recommendation: ratio
                .as_ref()
                .map(|insight| insight.tier.recommendation().to_string()),
            post_frequency: frequency.as_ref().map(|insight| insight.posts_per_week),
            frequency_classification: frequency
                .as_ref()
                .map(|insight| insight.tier.label().to_string()),
            frequency_recommendation: frequency
                .as_ref()
                .map(|insight| insight.tier.recommendation().to_string()),
            bio_length: bio.as_ref().map(|insight| insight.length),
            bio_has_hashtags: bio.as_ref().map(|insight| insight.has_hashtags),
            bio_has_emojis: bio.as_ref().map(|insight| insight.has_emojis),
            bio_length_classification: bio
                .as_ref()
                .map(|insight| insight.tier.label().to_string()),
            bio_recommendation: bio
                .as_ref()
                .map(|insight| insight.tier.recommendation().to_string()),
            growth_potential: growth.potential,
            growth_classification: growth.tier.label().to_string(),
            growth_recommendation: growth.tier.recommendation().to_string(),
            analysis_date: analyzed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            services_recommendations: services,
        }
    }
}

pub fn analyze(record: &ProfileRecord, catalog: &ServiceCatalog) -> ProfileAnalysis {
    let engagement = engagement_insight(record);
    let ratio = ratio_insight(record);
    let frequency = frequency_insight(record);
    let bio = bio_insight(record);
    let growth = growth_insight(
        engagement.as_ref(),
        ratio.as_ref(),
        frequency.as_ref(),
        bio.as_ref(),
    );
    let services = service_recommendations(record, engagement.as_ref(), catalog);

    ProfileAnalysis {
        engagement,
        ratio,
        frequency,
        bio,
        growth,
        services,
    }
}

pub fn analyze_value(
    value: Value,
    catalog: &ServiceCatalog,
    analyzed_at: NaiveDateTime,
) -> Result<AnalysisReport, AnalyzeError> {
    let record = ProfileRecord::from_value(value)?;
    Ok(AnalysisReport::new(analyze(&record, catalog), analyzed_at))
}

pub fn analyze_payload(
    payload: &str,
    catalog: &ServiceCatalog,
    analyzed_at: NaiveDateTime,
) -> Result<AnalysisReport, AnalyzeError> {
    let record = ProfileRecord::from_json(payload)?;
    Ok(AnalysisReport::new(analyze(&record, catalog), analyzed_at))
}

/// Uniform failure shape for the boundary: `{"error": "<message>"}`.
pub fn error_json(err: &AnalyzeError) -> String {
    serde_json::json!({ "error": err.to_string() }).to_string()
}

fn engagement_insight(record: &ProfileRecord) -> Option<EngagementInsight> {
    if record.followers_count == 0 {
        return None;
    }
    let rate = round2(record.engagement_rate.unwrap_or(DEFAULT_ENGAGEMENT_RATE) * 100.0);
    Some(EngagementInsight {
        rate,
        tier: EngagementTier::from_rate(rate),
    })
}

fn ratio_insight(record: &ProfileRecord) -> Option<RatioInsight> {
    if record.following_count == 0 {
        return None;
    }
    let ratio = round2(record.followers_count as f64 / record.following_count as f64);
    Some(RatioInsight {
        ratio,
        tier: RatioTier::from_ratio(ratio),
    })
}

fn frequency_insight(record: &ProfileRecord) -> Option<FrequencyInsight> {
    if !record.has_media() {
        return None;
    }
    // Account age is a fixed one-year assumption; media timestamps are not inspected.
    let posts_per_week = round2(record.posts_count as f64 / ASSUMED_ACCOUNT_AGE_DAYS * 7.0);
    Some(FrequencyInsight {
        posts_per_week,
        tier: FrequencyTier::from_posts_per_week(posts_per_week),
    })
}

fn bio_insight(record: &ProfileRecord) -> Option<BioInsight> {
    let bio = record.usable_bio()?;
    let length = bio.chars().count();
    // Emoji detection is deliberately loose: any code point above U+00FF counts,
    // so Cyrillic or CJK text trips the flag too. A strict emoji range table
    // (U+1F300..U+1FAFF and friends) exists for this job but is not applied;
    // downstream scoring expects the loose check, so it stays.
    let has_emojis = bio.chars().any(|ch| ch as u32 > 0xFF);
    Some(BioInsight {
        length,
        has_hashtags: bio.contains('#'),
        has_emojis,
        tier: BioLengthTier::from_length(length),
    })
}

fn growth_insight(
    engagement: Option<&EngagementInsight>,
    ratio: Option<&RatioInsight>,
    frequency: Option<&FrequencyInsight>,
    bio: Option<&BioInsight>,
) -> GrowthInsight {
    let mut score = 0u32;

    if let Some(insight) = ratio {
        score += tiered_points(insight.ratio, 2.0, 1.0, 0.5);
    }
    if let Some(insight) = engagement {
        score += tiered_points(insight.rate, 5.0, 3.0, 1.0);
    }
    if let Some(insight) = frequency {
        score += tiered_points(insight.posts_per_week, 4.0, 2.0, 0.5);
    }
    if let Some(insight) = bio {
        if insight.has_emojis {
            score += 1;
        }
        if insight.length > 70 {
            score += 1;
        }
    }

    let potential = round1(score as f64 / MAX_GROWTH_SCORE as f64 * 10.0);
    GrowthInsight {
        potential,
        tier: GrowthTier::from_potential(potential),
    }
}

fn service_recommendations(
    record: &ProfileRecord,
    engagement: Option<&EngagementInsight>,
    catalog: &ServiceCatalog,
) -> Vec<ServiceRecommendation> {
    let follower_package = if record.followers_count < 1_000 {
        &catalog.starter_followers
    } else if record.followers_count < 5_000 {
        &catalog.growth_followers
    } else {
        &catalog.pro_followers
    };

    let mut services = vec![ServiceRecommendation {
        service_type: "followers".to_string(),
        package: follower_package.package.clone(),
        price: follower_package.price,
        reason: follower_package.reason.clone(),
    }];

    if let Some(insight) = engagement {
        if insight.rate < 3.0 {
            let boost = &catalog.engagement_boost;
            services.push(ServiceRecommendation {
                service_type: "likes".to_string(),
                package: boost.package.clone(),
                price: boost.price,
                reason: boost.reason.replace("{rate}", &insight.rate.to_string()),
            });
        }
    }

    services
}

fn tiered_points(value: f64, high: f64, mid: f64, low: f64) -> u32 {
    if value > high {
        3
    } else if value > mid {
        2
    } else if value > low {
        1
    } else {
        0
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
