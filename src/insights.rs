//! Rule-based optimization suggestions over a completed projection
//!
//! Narrative generation for the presentation layer. Every rule consumes the
//! analytics outputs; nothing here feeds back into the projection core.

use crate::analytics::{average_ltv_per_seller, efficiency_ranking};
use crate::archetype::ArchetypeTable;
use crate::projection::ProjectionResult;

/// Generate textual optimization suggestions for a projected allocation.
///
/// Returns an empty vector when no sellers were allocated.
pub fn generate_insights(table: &ArchetypeTable, result: &ProjectionResult) -> Vec<String> {
    let ranking = efficiency_ranking(result);
    let mut insights = Vec::new();

    let Some(best) = ranking.first() else {
        return insights;
    };
    let best_label = label_for(table, &best.archetype_id);

    if let Some(avg) = average_ltv_per_seller(result) {
        insights.push(format!(
            "Average LTV per seller across the allocation: {:.0}",
            avg
        ));
    }

    insights.push(format!(
        "Most efficient archetype: {} at {:.0} per seller",
        best_label, best.ltv_per_seller
    ));

    // Best vs rest: how much more efficient is the top archetype than the
    // combined remainder of the allocation
    let rest_count: u64 = ranking[1..].iter().map(|e| e.seller_count as u64).sum();
    let rest_contribution: f64 = ranking[1..].iter().map(|e| e.contribution).sum();
    if rest_count > 0 {
        let rest_efficiency = rest_contribution / rest_count as f64;
        if rest_efficiency > 0.0 && best.ltv_per_seller > rest_efficiency {
            insights.push(format!(
                "{} sellers are {:.1}x more efficient than the rest of the mix",
                best_label,
                best.ltv_per_seller / rest_efficiency
            ));
        }
    }

    // Nonzero sellers stuck in the lowest-efficiency archetype
    if ranking.len() > 1 {
        let worst = ranking.last().expect("ranking is non-empty");
        if worst.seller_count > 0 {
            insights.push(format!(
                "Consider converting {} sellers from {} toward {}",
                worst.seller_count,
                label_for(table, &worst.archetype_id),
                best_label
            ));
        }
    }

    // A lower-efficiency archetype outnumbering a higher-efficiency one
    for pair in ranking.windows(2) {
        if pair[1].seller_count > pair[0].seller_count {
            insights.push(format!(
                "{} outnumbers the more efficient {}; nurturing a portion upward would raise the total",
                label_for(table, &pair[1].archetype_id),
                label_for(table, &pair[0].archetype_id)
            ));
            break;
        }
    }

    // Thin top-of-funnel in the strongest segment
    if best.seller_count < 5 {
        insights.push(format!(
            "Only {} {} sellers allocated; acquisition focus there has the highest payoff",
            best.seller_count, best_label
        ));
    }

    insights
}

fn label_for<'a>(table: &'a ArchetypeTable, archetype_id: &'a str) -> &'a str {
    table
        .get(archetype_id)
        .map(|p| p.label.as_str())
        .unwrap_or(archetype_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::SellerAllocation;
    use crate::projection::{ProjectionConfig, ProjectionEngine};

    #[test]
    fn test_empty_allocation_yields_no_insights() {
        let table = ArchetypeTable::default_monthly_sellers();
        let engine = ProjectionEngine::new(table.clone(), ProjectionConfig::default());
        let result = engine.project(&SellerAllocation::new()).unwrap();

        assert!(generate_insights(&table, &result).is_empty());
    }

    #[test]
    fn test_conversion_suggestion_for_weakest_archetype() {
        let table = ArchetypeTable::default_monthly_sellers();
        let engine = ProjectionEngine::new(table.clone(), ProjectionConfig::default());
        let allocation = SellerAllocation::from_pairs([
            ("born_successful", 200),
            ("failed", 1500),
        ])
        .unwrap();
        let result = engine.project(&allocation).unwrap();

        let insights = generate_insights(&table, &result);
        assert!(!insights.is_empty());
        assert!(
            insights.iter().any(|s| s.contains("Consider converting")),
            "expected a conversion suggestion, got: {:?}",
            insights
        );
    }

    #[test]
    fn test_thin_top_segment_flagged() {
        let table = ArchetypeTable::default_monthly_sellers();
        let engine = ProjectionEngine::new(table.clone(), ProjectionConfig::default());
        let allocation = SellerAllocation::from_pairs([
            ("born_successful", 2),
            ("struggling", 100),
        ])
        .unwrap();
        let result = engine.project(&allocation).unwrap();

        let insights = generate_insights(&table, &result);
        assert!(insights.iter().any(|s| s.contains("acquisition focus")));
    }
}
