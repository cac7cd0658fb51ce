//! Which tools get used, and how evenly.

use crate::stats::round2;
use indexmap::IndexMap;
use mood_core::{SessionRecord, ToolId};
use serde::{Deserialize, Serialize};

/// Length of the favorite and least-used lists.
const TOP_N: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolUsagePatterns {
    /// Tool to session count, in first-seen order.
    pub by_tool: IndexMap<ToolId, usize>,
    /// Two most used tools, most used first.
    pub favorite_tools: Vec<ToolId>,
    /// Two least used tools, in ranking order.
    pub least_used_tools: Vec<ToolId>,
    /// 1 when every used tool has the same count, toward 0 as usage skews.
    pub usage_balance: f64,
}

pub fn analyze_tool_usage_patterns(records: &[SessionRecord]) -> ToolUsagePatterns {
    let mut by_tool: IndexMap<ToolId, usize> = IndexMap::new();
    for record in records {
        *by_tool.entry(record.tool_id).or_insert(0) += 1;
    }

    let mut sorted: Vec<(ToolId, usize)> = by_tool.iter().map(|(t, c)| (*t, *c)).collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    let favorite_tools = sorted.iter().take(TOP_N).map(|(t, _)| *t).collect();
    let least_used_tools = sorted[sorted.len().saturating_sub(TOP_N)..]
        .iter()
        .map(|(t, _)| *t)
        .collect();

    let usage_balance = balance_score(by_tool.values().copied(), records.len());
    tracing::debug!(
        "Tool analysis: {} records, {} distinct tools, balance {}",
        records.len(),
        by_tool.len(),
        usage_balance
    );

    ToolUsagePatterns {
        by_tool,
        favorite_tools,
        least_used_tools,
        usage_balance,
    }
}

/// `1 - min(stddev / expected, 1)` where `expected = total / distinct`.
fn balance_score(counts: impl Iterator<Item = usize>, total: usize) -> f64 {
    let counts: Vec<usize> = counts.collect();
    if total == 0 || counts.is_empty() {
        return 0.0;
    }
    let k = counts.len() as f64;
    let expected = total as f64 / k;
    let variance = counts
        .iter()
        .map(|&c| (c as f64 - expected).powi(2))
        .sum::<f64>()
        / k;
    round2(1.0 - (variance.sqrt() / expected).min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(tools: &[ToolId]) -> Vec<SessionRecord> {
        tools
            .iter()
            .enumerate()
            .map(|(i, t)| {
                SessionRecord::new(*t, "in", "out", 1_704_700_000_000 + i as i64 * 86_400_000)
            })
            .collect()
    }

    #[test]
    fn test_empty_history() {
        let patterns = analyze_tool_usage_patterns(&[]);
        assert!(patterns.by_tool.is_empty());
        assert!(patterns.favorite_tools.is_empty());
        assert!(patterns.least_used_tools.is_empty());
        assert_eq!(patterns.usage_balance, 0.0);
    }

    #[test]
    fn test_consecutive_day_scenario() {
        let history = records(&[ToolId::MindDump, ToolId::MindDump, ToolId::DecisionHelper]);
        let patterns = analyze_tool_usage_patterns(&history);

        assert_eq!(patterns.by_tool.len(), 2);
        assert_eq!(patterns.by_tool[&ToolId::MindDump], 2);
        assert_eq!(patterns.by_tool[&ToolId::DecisionHelper], 1);
        assert_eq!(patterns.favorite_tools[0], ToolId::MindDump);
        assert_eq!(
            patterns.least_used_tools,
            vec![ToolId::MindDump, ToolId::DecisionHelper]
        );
        // expected 1.5, stddev 0.5 -> 1 - 1/3
        assert_eq!(patterns.usage_balance, 0.67);
    }

    #[test]
    fn test_single_tool_is_balanced() {
        let history = records(&[ToolId::WriteHard, ToolId::WriteHard]);
        let patterns = analyze_tool_usage_patterns(&history);
        assert_eq!(patterns.usage_balance, 1.0);
        assert_eq!(patterns.favorite_tools, vec![ToolId::WriteHard]);
        assert_eq!(patterns.least_used_tools, vec![ToolId::WriteHard]);
    }

    #[test]
    fn test_even_usage_is_balanced() {
        let history = records(&ToolId::ALL);
        assert_eq!(analyze_tool_usage_patterns(&history).usage_balance, 1.0);
    }

    #[test]
    fn test_skewed_usage_bottoms_out_at_zero() {
        let mut tools = vec![ToolId::MindDump; 20];
        tools.push(ToolId::FindWords);
        let patterns = analyze_tool_usage_patterns(&records(&tools));
        // expected 10.5, stddev 9.5 -> 1 - 0.905 = 0.10
        assert_eq!(patterns.usage_balance, 0.1);
        assert!((0.0..=1.0).contains(&patterns.usage_balance));
    }

    #[test]
    fn test_least_used_order() {
        let history = records(&[
            ToolId::QuickReset,
            ToolId::MindDump,
            ToolId::MindDump,
            ToolId::MindDump,
            ToolId::FindWords,
            ToolId::FindWords,
        ]);
        let patterns = analyze_tool_usage_patterns(&history);
        assert_eq!(
            patterns.favorite_tools,
            vec![ToolId::MindDump, ToolId::FindWords]
        );
        assert_eq!(
            patterns.least_used_tools,
            vec![ToolId::FindWords, ToolId::QuickReset]
        );
    }

    #[test]
    fn test_by_tool_serializes_with_wire_ids() {
        let history = records(&[ToolId::MindDump, ToolId::MindDump, ToolId::DecisionHelper]);
        let json = serde_json::to_value(analyze_tool_usage_patterns(&history)).unwrap();
        assert_eq!(json["byTool"]["mind-dump"], 2);
        assert_eq!(json["byTool"]["decision-helper"], 1);
        assert_eq!(json["favoriteTools"][0], "mind-dump");
    }
}
