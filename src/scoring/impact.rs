//! Impact scorer: how much does this matter to the business?
//!
//! Points (additive, then clamped to 100):
//! - Sender matches a VIP marker: 30
//! - Record hints at action items: 20
//! - Business keywords: 10 per distinct keyword, max 30
//! - Currency amount mentioned: 15
//! - Organization-wide scope language: 15

use std::sync::OnceLock;

use regex::Regex;

use crate::config::EngineConfig;
use crate::constants::{BUSINESS_KEYWORDS, ORG_SCOPE_KEYWORDS};

use super::{clamp_score, count_keywords, keyword_bonus};

/// Inputs for one impact computation.
pub struct ImpactContext<'a> {
    pub sender: &'a str,
    pub content: &'a str,
    pub has_action_items: bool,
}

/// Impact with its per-rule breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImpactScore {
    pub total: u8,
    pub from_vip: bool,
    pub vip_bonus: u32,
    pub action_bonus: u32,
    pub business_bonus: u32,
    pub money_bonus: u32,
    pub scope_bonus: u32,
}

// Currency symbol, digits with optional thousands separators and decimals,
// optional k/m/b suffix: "$500K", "€1,200,000", "£2.5m".
fn re_money() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)[$€£¥]\s?\d+(?:,\d{3})*(?:\.\d+)?(?:\s?(?:bn|[kmb]))?").unwrap()
    })
}

/// True if the text mentions a currency amount.
pub fn mentions_money(text: &str) -> bool {
    re_money().is_match(text)
}

pub fn score_impact(ctx: &ImpactContext, config: &EngineConfig) -> ImpactScore {
    let from_vip = config.is_vip(ctx.sender);
    let vip_bonus = if from_vip { 30 } else { 0 };

    let action_bonus = if ctx.has_action_items { 20 } else { 0 };

    let lower = ctx.content.to_lowercase();
    let business_bonus = keyword_bonus(count_keywords(
        &lower,
        BUSINESS_KEYWORDS,
        &config.extra_business_keywords,
    ));

    let money_bonus = if mentions_money(ctx.content) { 15 } else { 0 };

    let scope_bonus = if ORG_SCOPE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        15
    } else {
        0
    };

    ImpactScore {
        total: clamp_score(vip_bonus + action_bonus + business_bonus + money_bonus + scope_bonus),
        from_vip,
        vip_bonus,
        action_bonus,
        business_bonus,
        money_bonus,
        scope_bonus,
    }
}
