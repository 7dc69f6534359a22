use crate::data::LeadRecord;
use std::collections::HashMap;

pub const HOT_STATUS: &str = "quente";

/// How many hot leads count as a healthy volume.
pub const HOT_LEADS_HEALTHY: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotLeadAdvice {
    Reactivate,
    FollowUpNow,
    PrioritizeToday,
}

impl HotLeadAdvice {
    pub fn from_count(hot: usize) -> Self {
        match hot {
            0 => Self::Reactivate,
            n if n < HOT_LEADS_HEALTHY => Self::FollowUpNow,
            _ => Self::PrioritizeToday,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Reactivate => "⚠ Não há leads \"Quente\". Urgente reativar pipeline.",
            Self::FollowUpNow => "Há poucos leads \"Quente\". Focar follow-up imediato.",
            Self::PrioritizeToday => "Bom nível de leads \"Quente\". Priorizar estes nomes já hoje.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeadSummary {
    pub total: usize,
    /// Status categories by descending count; ties keep first-seen order.
    /// `None` is the category of rows with an empty status.
    pub status_counts: Vec<(Option<String>, usize)>,
    pub hot_count: usize,
}

impl LeadSummary {
    pub fn from_records(leads: &[LeadRecord]) -> Self {
        let status_counts = count_by_status(leads);

        // First (most frequent) spelling wins when several normalize to the same key
        let mut by_key: HashMap<String, usize> = HashMap::new();
        for (status, count) in &status_counts {
            if let Some(status) = status {
                by_key
                    .entry(status.trim().to_lowercase())
                    .or_insert(*count);
            }
        }
        let hot_count = by_key.get(HOT_STATUS).copied().unwrap_or(0);

        Self {
            total: leads.len(),
            status_counts,
            hot_count,
        }
    }

    pub fn advice(&self) -> HotLeadAdvice {
        HotLeadAdvice::from_count(self.hot_count)
    }
}

fn count_by_status(leads: &[LeadRecord]) -> Vec<(Option<String>, usize)> {
    let mut index: HashMap<Option<&str>, usize> = HashMap::new();
    let mut counts: Vec<(Option<String>, usize)> = Vec::new();

    for lead in leads {
        let key = lead.status.as_deref();
        match index.get(&key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((lead.status.clone(), 1));
            }
        }
    }

    // sort_by is stable, so equal counts stay in encounter order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leads(statuses: &[Option<&str>]) -> Vec<LeadRecord> {
        statuses
            .iter()
            .map(|s| LeadRecord {
                status: s.map(str::to_string),
            })
            .collect()
    }

    #[test]
    fn test_counts_descending_with_stable_ties() {
        let summary = LeadSummary::from_records(&leads(&[
            Some("Morno"),
            Some("Frio"),
            Some("Quente"),
            Some("Frio"),
            Some("Quente"),
            None,
        ]));

        assert_eq!(summary.total, 6);
        assert_eq!(
            summary.status_counts,
            vec![
                (Some("Frio".to_string()), 2),
                (Some("Quente".to_string()), 2),
                (Some("Morno".to_string()), 1),
                (None, 1),
            ]
        );
    }

    #[test]
    fn test_hot_count_uses_normalized_key() {
        let summary = LeadSummary::from_records(&leads(&[
            Some(" QUENTE "),
            Some(" QUENTE "),
            Some("quente"),
            Some("Frio"),
        ]));
        assert_eq!(summary.hot_count, 2);
    }

    #[test]
    fn test_hot_count_missing_is_zero() {
        let summary = LeadSummary::from_records(&leads(&[Some("Frio"), None]));
        assert_eq!(summary.hot_count, 0);
        assert_eq!(summary.advice(), HotLeadAdvice::Reactivate);
    }

    #[test]
    fn test_advice_thresholds() {
        assert_eq!(HotLeadAdvice::from_count(0), HotLeadAdvice::Reactivate);
        assert_eq!(HotLeadAdvice::from_count(1), HotLeadAdvice::FollowUpNow);
        assert_eq!(HotLeadAdvice::from_count(2), HotLeadAdvice::FollowUpNow);
        assert_eq!(HotLeadAdvice::from_count(3), HotLeadAdvice::PrioritizeToday);
        assert_eq!(HotLeadAdvice::from_count(40), HotLeadAdvice::PrioritizeToday);
    }

    #[test]
    fn test_empty_dataset() {
        let summary = LeadSummary::from_records(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.status_counts.is_empty());
        assert_eq!(summary.advice(), HotLeadAdvice::Reactivate);
    }
}
