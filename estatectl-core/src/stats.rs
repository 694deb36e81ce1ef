//! Active-agent statistics.
//!
//! Joins agents -> listings -> views and reports, for every active agent, how
//! many of their listings are priced strictly above a threshold and how many
//! views those listings collected. The join runs as four stages over two hash
//! indexes built once per call, so the whole computation is O(A + L + V).
//!
//! Ordering is by `total_views` descending. Agents with equal totals keep the
//! order they had in the input (the sort is stable).

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::records::{Agent, AgentStat, Listing, ViewRecord};

/// Listings must be priced strictly above this to count.
pub const DEFAULT_PRICE_THRESHOLD: f64 = 300_000.0;

/// Stage 1: agents eligible for output, in input order.
pub fn active_agents(agents: &[Agent]) -> impl Iterator<Item = &Agent> {
    agents.iter().filter(|agent| agent.active)
}

/// Stage 2: qualifying listing ids keyed by owning agent.
#[derive(Debug, Default)]
pub struct ListingIndex {
    by_agent: HashMap<i64, Vec<i64>>,
}

impl ListingIndex {
    pub fn build(listings: &[Listing], price_threshold: f64) -> Self {
        let mut by_agent: HashMap<i64, Vec<i64>> = HashMap::new();

        for listing in listings.iter().filter(|l| l.price > price_threshold) {
            by_agent.entry(listing.agent_id).or_default().push(listing.id);
        }

        Self { by_agent }
    }

    /// Qualifying listing ids for an agent; empty when the agent owns none.
    pub fn qualifying(&self, agent_id: i64) -> &[i64] {
        self.by_agent.get(&agent_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Stage 3: total views keyed by listing.
#[derive(Debug, Default)]
pub struct ViewIndex {
    totals: HashMap<i64, u64>,
}

impl ViewIndex {
    pub fn build(views: &[ViewRecord]) -> Self {
        let mut totals: HashMap<i64, u64> = HashMap::new();

        for record in views {
            let total = totals.entry(record.listing_id).or_default();
            *total = total.saturating_add(record.views);
        }

        Self { totals }
    }

    /// Views recorded against a listing; 0 when it has none.
    pub fn total_for(&self, listing_id: i64) -> u64 {
        self.totals.get(&listing_id).copied().unwrap_or(0)
    }

    /// Stage 4: sum over a set of listings.
    pub fn sum(&self, listing_ids: &[i64]) -> u64 {
        listing_ids
            .iter()
            .fold(0u64, |acc, id| acc.saturating_add(self.total_for(*id)))
    }
}

/// Compute one `AgentStat` per active agent, sorted by total views descending.
///
/// Never fails: orphan listings, listings without views and agents without
/// listings all produce zero-valued fields.
pub fn compute_active_agent_stats(
    agents: &[Agent],
    listings: &[Listing],
    views: &[ViewRecord],
    price_threshold: f64,
) -> Vec<AgentStat> {
    let listing_index = ListingIndex::build(listings, price_threshold);
    let view_index = ViewIndex::build(views);

    let mut stats: Vec<AgentStat> = active_agents(agents)
        .map(|agent| {
            let qualifying = listing_index.qualifying(agent.id);
            AgentStat {
                agent: agent.name.clone(),
                listings: qualifying.len() as u64,
                total_views: view_index.sum(qualifying),
            }
        })
        .collect();

    stats.sort_by_key(|stat| Reverse(stat.total_views));

    tracing::debug!(
        agents = agents.len(),
        listings = listings.len(),
        views = views.len(),
        active = stats.len(),
        price_threshold,
        "computed active agent stats"
    );

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(id: i64, name: &str, active: bool) -> Agent {
        Agent {
            id,
            name: name.into(),
            active,
        }
    }

    fn listing(id: i64, agent_id: i64, price: f64) -> Listing {
        Listing {
            id,
            agent_id,
            price,
            title: None,
            city: None,
        }
    }

    fn view(listing_id: i64, views: u64) -> ViewRecord {
        ViewRecord {
            listing_id,
            date: "2025-09-01".into(),
            views,
        }
    }

    fn stat(agent: &str, listings: u64, total_views: u64) -> AgentStat {
        AgentStat {
            agent: agent.into(),
            listings,
            total_views,
        }
    }

    #[test]
    fn seed_data_ranks_carol_first() {
        let agents = vec![
            agent(101, "Alice", true),
            agent(102, "Bob", false),
            agent(103, "Carol", true),
        ];
        let listings = vec![
            listing(1, 101, 250_000.0),
            listing(2, 102, 320_000.0),
            listing(3, 103, 450_000.0),
        ];
        let views = vec![view(1, 100), view(1, 80), view(2, 50), view(3, 200)];

        let stats = compute_active_agent_stats(&agents, &listings, &views, DEFAULT_PRICE_THRESHOLD);

        assert_eq!(stats, vec![stat("Carol", 1, 200), stat("Alice", 0, 0)]);
    }

    #[test]
    fn agent_without_listings_is_reported_with_zeros() {
        let agents = vec![agent(1, "Dana", true)];
        let stats = compute_active_agent_stats(&agents, &[], &[], DEFAULT_PRICE_THRESHOLD);
        assert_eq!(stats, vec![stat("Dana", 0, 0)]);
    }

    #[test]
    fn qualifying_listing_without_views_counts_but_adds_nothing() {
        let agents = vec![agent(1, "Eve", true)];
        let listings = vec![listing(10, 1, 500_000.0), listing(11, 1, 600_000.0)];
        let views = vec![view(11, 7)];

        let stats = compute_active_agent_stats(&agents, &listings, &views, DEFAULT_PRICE_THRESHOLD);
        assert_eq!(stats, vec![stat("Eve", 2, 7)]);
    }

    #[test]
    fn empty_inputs_give_empty_output() {
        let stats = compute_active_agent_stats(&[], &[], &[], DEFAULT_PRICE_THRESHOLD);
        assert!(stats.is_empty());
    }

    #[test]
    fn threshold_comparison_is_strict() {
        let agents = vec![agent(1, "Frank", true)];
        let listings = vec![listing(1, 1, 300_000.0), listing(2, 1, 300_000.01)];
        let views = vec![view(1, 40), view(2, 2)];

        let stats = compute_active_agent_stats(&agents, &listings, &views, 300_000.0);
        assert_eq!(stats, vec![stat("Frank", 1, 2)]);

        let stats = compute_active_agent_stats(&agents, &listings, &views, 0.0);
        assert_eq!(stats, vec![stat("Frank", 2, 42)]);
    }

    #[test]
    fn orphan_listings_and_views_are_ignored() {
        let agents = vec![agent(1, "Gina", true)];
        let listings = vec![listing(1, 1, 400_000.0), listing(2, 99, 900_000.0)];
        let views = vec![view(1, 5), view(2, 1_000), view(42, 3)];

        let stats = compute_active_agent_stats(&agents, &listings, &views, DEFAULT_PRICE_THRESHOLD);
        assert_eq!(stats, vec![stat("Gina", 1, 5)]);
    }

    #[test]
    fn ties_keep_input_order() {
        let agents = vec![
            agent(1, "Zed", true),
            agent(2, "Amy", true),
            agent(3, "Max", true),
            agent(4, "Bea", true),
        ];
        let listings = vec![listing(1, 1, 1e6), listing(2, 2, 1e6), listing(4, 4, 1e6)];
        let views = vec![view(1, 10), view(2, 10), view(4, 30)];

        let stats = compute_active_agent_stats(&agents, &listings, &views, DEFAULT_PRICE_THRESHOLD);
        let names: Vec<_> = stats.iter().map(|s| s.agent.as_str()).collect();
        assert_eq!(names, vec!["Bea", "Zed", "Amy", "Max"]);
    }

    #[test]
    fn listing_index_only_keeps_qualifying_listings() {
        let index = ListingIndex::build(&[listing(1, 7, 10.0), listing(2, 7, 20.0)], 15.0);
        assert_eq!(index.qualifying(7), &[2]);
        assert!(index.qualifying(8).is_empty());
    }

    #[test]
    fn view_index_sums_repeated_days() {
        let index = ViewIndex::build(&[view(1, 100), view(1, 80), view(2, u64::MAX), view(2, 1)]);
        assert_eq!(index.total_for(1), 180);
        assert_eq!(index.total_for(2), u64::MAX);
        assert_eq!(index.total_for(3), 0);
        assert_eq!(index.sum(&[1, 3]), 180);
    }

    #[test]
    fn inputs_are_left_untouched() {
        let agents = vec![agent(2, "B", true), agent(1, "A", true)];
        let listings = vec![listing(1, 1, 1e6)];
        let views = vec![view(1, 3)];
        let before = (agents.clone(), listings.clone(), views.clone());

        let first = compute_active_agent_stats(&agents, &listings, &views, DEFAULT_PRICE_THRESHOLD);
        let second = compute_active_agent_stats(&agents, &listings, &views, DEFAULT_PRICE_THRESHOLD);

        assert_eq!(first, second);
        assert_eq!((agents, listings, views), before);
    }
}
