use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Suspicious,
}

/// Synthetic platform metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformMetrics {
    pub followers: u32,
    pub engagement: u32,
    pub sentiment_value: u32,
    pub bot_percentage: u8,
    pub recent_activity: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityGrowth {
    pub daily: u32,
    pub weekly: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialSentimentResult {
    pub score: u8,
    pub sentiment: Sentiment,
    pub bot_detection_score: u8,
    pub suspicious_patterns: Vec<String>,
    pub platform_metrics: PlatformMetrics,
    pub influencer_mentions: u32,
    pub community_growth: CommunityGrowth,
}

impl SocialSentimentResult {
    pub fn degraded() -> Self {
        Self {
            score: 30,
            sentiment: Sentiment::Neutral,
            bot_detection_score: 20,
            suspicious_patterns: Vec::new(),
            platform_metrics: PlatformMetrics::default(),
            influencer_mentions: 0,
            community_growth: CommunityGrowth::default(),
        }
    }
}
