//! Social signal heuristics
//!
//! There is no live social feed: the score comes from keyword checks on the
//! token name and symbol, plus synthetic platform metrics drawn from an
//! injected random source. Only the bounds and the override rules are
//! stable across runs.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Analyzer, ScanTarget};
use crate::{
    error::AnalyzerError,
    models::{CommunityGrowth, PlatformMetrics, Sentiment, SocialSentimentResult},
    random::RandomSource,
};

const MEME_KEYWORDS: [&str; 9] = [
    "moon", "safe", "elon", "doge", "shib", "inu", "baby", "mini", "floki",
];
const PUMP_KEYWORDS: [&str; 6] = ["100x", "1000x", "pump", "rocket", "lambo", "millionaire"];
const PROFESSIONAL_KEYWORDS: [&str; 5] = ["defi", "finance", "protocol", "network", "dao"];

const BASE_BOT_SCORE: i32 = 20;

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// `low + draw(0..span)`
fn draw(random: &dyn RandomSource, low: u32, span: u32) -> u32 {
    low + random.next_below(span)
}

fn clamp_score(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}

/// Score a token's name and symbol
pub fn assess(name: &str, symbol: &str, random: &dyn RandomSource) -> SocialSentimentResult {
    let lower_name = name.to_lowercase();
    let lower_symbol = symbol.to_lowercase();

    let mut score: i32 = 0;
    let mut bot_score = BASE_BOT_SCORE;
    let mut patterns = Vec::new();
    let mut sentiment = Sentiment::Neutral;
    // set by rules that must survive later reclassification
    let mut forced_suspicious = false;

    let meme = contains_any(&lower_name, &MEME_KEYWORDS) || contains_any(&lower_symbol, &MEME_KEYWORDS);
    if meme {
        patterns.push("Token name contains common meme/scam keywords".to_string());
        score += 15;
        bot_score += 20;
    }

    if lower_name.contains("test") || lower_symbol.contains("test") {
        patterns.push("Test token detected".to_string());
        score += 5;
    }

    if contains_any(&lower_name, &PUMP_KEYWORDS) {
        patterns.push("Name suggests pump-and-dump scheme".to_string());
        score += 25;
        bot_score += 30;
        sentiment = Sentiment::Suspicious;
        forced_suspicious = true;
    }

    let symbol_len = symbol.chars().count();
    if !(2..=10).contains(&symbol_len) {
        patterns.push("Unusual token symbol length".to_string());
        score += 10;
    }

    if contains_any(&lower_name, &PROFESSIONAL_KEYWORDS) {
        score -= 10;
        bot_score -= 10;
        if !forced_suspicious {
            sentiment = Sentiment::Positive;
        }
    }

    let (followers, engagement, sentiment_value, recent_activity) = if meme {
        (
            draw(random, 500, 5000),
            draw(random, 50, 200),
            draw(random, 20, 30),
            draw(random, 20, 100),
        )
    } else {
        (
            draw(random, 100, 2000),
            draw(random, 5, 50),
            draw(random, 40, 40),
            draw(random, 5, 20),
        )
    };

    if recent_activity > 50 && followers < 1000 {
        patterns.push("High activity relative to follower count (possible bot network)".to_string());
        score += 20;
        bot_score += 25;
        sentiment = Sentiment::Suspicious;
    }

    if sentiment == Sentiment::Neutral {
        sentiment = match score {
            s if s > 30 => Sentiment::Suspicious,
            s if s > 15 => Sentiment::Negative,
            s if s < 5 => Sentiment::Positive,
            _ => Sentiment::Neutral,
        };
    }

    score += match bot_score {
        b if b > 60 => 30,
        b if b > 40 => 20,
        b if b > 20 => 10,
        _ => 0,
    };

    if sentiment_value < 40 {
        score += 15;
    }

    let bot_detection_score = clamp_score(bot_score);

    SocialSentimentResult {
        score: clamp_score(score),
        sentiment,
        bot_detection_score,
        suspicious_patterns: patterns,
        platform_metrics: PlatformMetrics {
            followers,
            engagement,
            sentiment_value,
            bot_percentage: bot_detection_score,
            recent_activity,
        },
        influencer_mentions: engagement,
        community_growth: CommunityGrowth {
            daily: recent_activity,
            weekly: recent_activity * 7,
        },
    }
}

pub struct SocialAnalyzer {
    random: Arc<dyn RandomSource>,
}

impl SocialAnalyzer {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }
}

#[async_trait]
impl Analyzer for SocialAnalyzer {
    type Output = SocialSentimentResult;

    fn name(&self) -> &'static str {
        "social"
    }

    async fn analyze(&self, target: &ScanTarget) -> Result<SocialSentimentResult, AnalyzerError> {
        Ok(assess(
            &target.identity.name,
            &target.identity.symbol,
            self.random.as_ref(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RngSource;

    /// Always draws the same offset, clamped into range
    struct FixedDraw(u32);

    impl RandomSource for FixedDraw {
        fn next_below(&self, bound: u32) -> u32 {
            self.0.min(bound.saturating_sub(1))
        }
    }

    #[test]
    fn test_pump_keyword_forces_suspicious() {
        // low draws: followers 100, activity 5, sentiment value 40
        let result = assess("Rocket Finance", "RKT", &FixedDraw(0));

        assert_eq!(result.sentiment, Sentiment::Suspicious);
        assert!(result
            .suspicious_patterns
            .contains(&"Name suggests pump-and-dump scheme".to_string()));
        // 25 - 10 (professional) + 10 (bot 40 > 20)
        assert_eq!(result.score, 25);
        assert_eq!(result.bot_detection_score, 40);
    }

    #[test]
    fn test_professional_name_is_positive() {
        let result = assess("Celo Protocol", "CELO", &FixedDraw(0));

        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.score, 0);
        assert_eq!(result.bot_detection_score, 10);
        assert!(result.suspicious_patterns.is_empty());
    }

    #[test]
    fn test_bot_network_rule() {
        // meme ranges with draws of 0: followers 500, activity 20 (no bot rule)
        let quiet = assess("Doge Coin", "DOGE", &FixedDraw(0));
        assert!(!quiet
            .suspicious_patterns
            .iter()
            .any(|p| p.contains("bot network")));

        // draws of 80: followers 580, activity 100
        let busy = assess("Doge Coin", "DOGE", &FixedDraw(80));
        assert_eq!(busy.sentiment, Sentiment::Suspicious);
        assert_eq!(busy.platform_metrics.followers, 580);
        assert_eq!(busy.platform_metrics.recent_activity, 100);
        // meme 15 + bot network 20 + bot 65 > 60 -> 30; sentiment value 49
        assert_eq!(busy.score, 65);
        assert_eq!(busy.bot_detection_score, 65);
        assert_eq!(busy.community_growth.weekly, 700);
        assert_eq!(busy.influencer_mentions, busy.platform_metrics.engagement);
    }

    #[test]
    fn test_neutral_reclassified_by_score() {
        // symbol too long (+10), test (+5): 15 is neither > 15 nor < 5
        let result = assess("Plain Test", "TESTTOKEN123", &FixedDraw(0));
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.score, 15);
    }

    #[test]
    fn test_bounds_hold_for_random_draws() {
        let random = RngSource::seeded(99);
        for (name, symbol) in [
            ("Baby Moon Rocket 1000x Lambo", "X"),
            ("Safe Elon Pump", "SAFEELONPUMPTOKEN"),
            ("DeFi Network DAO", "DND"),
            ("", ""),
        ] {
            for _ in 0..200 {
                let result = assess(name, symbol, &random);
                assert!(result.score <= 100);
                assert!(result.bot_detection_score <= 100);
                assert!((500..5500).contains(&result.platform_metrics.followers)
                    || (100..2100).contains(&result.platform_metrics.followers));
            }
        }
    }
}
