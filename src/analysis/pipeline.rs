use crate::data::{DealRecord, PhaseClass};
use std::collections::HashMap;

pub const UPCOMING_LIMIT: usize = 3;
pub const LOW_SUCCESS_RATE: f64 = 30.0;
pub const NO_RESPONSIBLE: &str = "n/a";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineNote {
    OverExposed,
    LowSuccessRate,
    NoActivePipeline,
    Balanced,
}

impl PipelineNote {
    pub fn message(&self) -> &'static str {
        match self {
            Self::OverExposed => {
                "Muito valor em aberto mas pouco convertido. \
                 Rever objeções e pricing nas propostas enviadas."
            }
            Self::LowSuccessRate => {
                "Taxa de sucesso abaixo de 30%. \
                 Sugere muita perda após proposta. Analisar razões de perda."
            }
            Self::NoActivePipeline => {
                "Não há pipeline ativo em negociação. Urgente gerar novas oportunidades."
            }
            Self::Balanced => {
                "Pipeline equilibrado. \
                 Continuar follow-up nas oportunidades com fecho mais próximo."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSummary {
    pub total_open: f64,
    pub total_won: f64,
    pub total_lost: f64,
    pub success_base: f64,
    pub success_rate: f64,
    pub top_responsible: String,
    pub top_value: f64,
    /// Soonest open deals with a known close date, earliest first.
    pub upcoming: Vec<DealRecord>,
    pub notes: Vec<PipelineNote>,
}

impl PipelineSummary {
    pub fn from_records(deals: &[DealRecord]) -> Self {
        let mut total_open = 0.0;
        let mut total_won = 0.0;
        let mut total_lost = 0.0;
        for deal in deals {
            match deal.phase_class() {
                Some(PhaseClass::Open) => total_open += deal.amount,
                Some(PhaseClass::Won) => total_won += deal.amount,
                Some(PhaseClass::Lost) => total_lost += deal.amount,
                None => {}
            }
        }

        let success_base = total_won + total_lost;
        let success_rate = if success_base > 0.0 {
            total_won / success_base * 100.0
        } else {
            0.0
        };

        let (top_responsible, top_value) = top_open_responsible(deals)
            .unwrap_or_else(|| (NO_RESPONSIBLE.to_string(), 0.0));

        let notes = evaluate_notes(total_open, total_won, total_lost, success_rate, success_base);

        Self {
            total_open,
            total_won,
            total_lost,
            success_base,
            success_rate,
            top_responsible,
            top_value,
            upcoming: upcoming_closes(deals),
            notes,
        }
    }
}

/// Groups open deals by owner and returns the owner holding the most open value.
/// Deals without an owner are not grouped.
fn top_open_responsible(deals: &[DealRecord]) -> Option<(String, f64)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, f64)> = Vec::new();

    for deal in deals.iter().filter(|d| d.is_open()) {
        let Some(owner) = deal.responsible.as_deref() else {
            continue;
        };
        match index.get(owner) {
            Some(&i) => totals[i].1 += deal.amount,
            None => {
                index.insert(owner, totals.len());
                totals.push((owner, deal.amount));
            }
        }
    }

    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    totals
        .first()
        .map(|(owner, value)| (owner.to_string(), *value))
}

fn upcoming_closes(deals: &[DealRecord]) -> Vec<DealRecord> {
    let mut dated: Vec<&DealRecord> = deals
        .iter()
        .filter(|d| d.is_open() && d.expected_close.is_some())
        .collect();
    dated.sort_by_key(|d| d.expected_close);
    dated.into_iter().take(UPCOMING_LIMIT).cloned().collect()
}

fn evaluate_notes(
    total_open: f64,
    total_won: f64,
    total_lost: f64,
    success_rate: f64,
    success_base: f64,
) -> Vec<PipelineNote> {
    let mut notes = Vec::new();

    if total_open > total_won * 2.0 && total_won < 1.5 * total_lost {
        notes.push(PipelineNote::OverExposed);
    }
    if success_rate < LOW_SUCCESS_RATE && success_base > 0.0 {
        notes.push(PipelineNote::LowSuccessRate);
    }
    if total_open == 0.0 {
        notes.push(PipelineNote::NoActivePipeline);
    }
    if notes.is_empty() {
        notes.push(PipelineNote::Balanced);
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn deal(name: &str, amount: f64, phase: &str, owner: &str, close: Option<&str>) -> DealRecord {
        DealRecord {
            opportunity: name.to_string(),
            amount,
            phase: phase.to_string(),
            responsible: (!owner.is_empty()).then(|| owner.to_string()),
            expected_close: close.and_then(crate::data::parse_date),
        }
    }

    #[test]
    fn test_won_lost_success_rate() {
        let summary = PipelineSummary::from_records(&[
            deal("A", 1000.0, "Fechado ganho", "Ana", None),
            deal("B", 4000.0, "Fechado perdido", "Rui", None),
        ]);

        assert_relative_eq!(summary.success_rate, 20.0, epsilon = 1e-10);
        assert_relative_eq!(summary.success_base, 5000.0);
        assert!(summary.notes.contains(&PipelineNote::LowSuccessRate));
    }

    #[test]
    fn test_no_open_deals() {
        let summary = PipelineSummary::from_records(&[
            deal("A", 1000.0, "Fechado ganho", "Ana", Some("2024-01-01")),
            deal("B", 500.0, "Em análise", "Rui", Some("2024-01-02")),
        ]);

        assert_eq!(summary.top_responsible, "n/a");
        assert_eq!(summary.top_value, 0.0);
        assert!(summary.upcoming.is_empty());
        assert_eq!(summary.notes, vec![PipelineNote::NoActivePipeline]);
    }

    #[test]
    fn test_unknown_phase_is_excluded() {
        let deals = [
            deal("A", 100.0, "A negociar", "Ana", None),
            deal("B", 200.0, "Fechado ganho", "Ana", None),
            deal("C", 300.0, "Fechado perdido", "Ana", None),
            deal("D", 400.0, "Qualificação", "Ana", None),
        ];
        let summary = PipelineSummary::from_records(&deals);
        let all: f64 = deals.iter().map(|d| d.amount).sum();

        assert_eq!(summary.total_open, 100.0);
        assert_eq!(summary.total_won, 200.0);
        assert_eq!(summary.total_lost, 300.0);
        assert!(summary.total_open + summary.total_won + summary.total_lost < all);
    }

    #[test]
    fn test_known_phases_account_for_every_amount() {
        let deals = [
            deal("A", 1250.5, "A negociar", "Ana", None),
            deal("B", 300.0, "Proposta enviada", "Rui", None),
            deal("C", 200.0, "Fechado ganho", "Ana", None),
            deal("D", 749.5, "Fechado perdido", "Rui", None),
        ];
        let summary = PipelineSummary::from_records(&deals);
        let all: f64 = deals.iter().map(|d| d.amount).sum();

        assert_relative_eq!(
            summary.total_open + summary.total_won + summary.total_lost,
            all,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_success_rate_zero_without_closed_deals() {
        let summary = PipelineSummary::from_records(&[deal("A", 100.0, "A negociar", "Ana", None)]);
        assert_eq!(summary.success_base, 0.0);
        assert_eq!(summary.success_rate, 0.0);
        assert!(!summary.notes.contains(&PipelineNote::LowSuccessRate));
    }

    #[test]
    fn test_top_responsible_sums_open_value() {
        let summary = PipelineSummary::from_records(&[
            deal("A", 500.0, "A negociar", "Ana", None),
            deal("B", 300.0, "Proposta enviada", "Rui", None),
            deal("C", 400.0, "Proposta enviada", "Rui", None),
            deal("D", 9000.0, "Fechado ganho", "Ana", None),
            deal("E", 9000.0, "A negociar", "", None),
        ]);
        assert_eq!(summary.top_responsible, "Rui");
        assert_eq!(summary.top_value, 700.0);
        assert_eq!(summary.total_open, 10200.0);
    }

    #[test]
    fn test_top_responsible_tie_keeps_first_seen() {
        let summary = PipelineSummary::from_records(&[
            deal("A", 500.0, "A negociar", "Rui", None),
            deal("B", 500.0, "A negociar", "Ana", None),
        ]);
        assert_eq!(summary.top_responsible, "Rui");
    }

    #[test]
    fn test_upcoming_closes() {
        let summary = PipelineSummary::from_records(&[
            deal("Late", 1.0, "A negociar", "Ana", Some("2024-09-01")),
            deal("Won", 1.0, "Fechado ganho", "Ana", Some("2024-01-01")),
            deal("NoDate", 1.0, "A negociar", "Ana", None),
            deal("Early", 1.0, "Proposta enviada", "Rui", Some("2024-02-01")),
            deal("Mid", 1.0, "A negociar", "Rui", Some("2024-05-01")),
            deal("Mid2", 1.0, "A negociar", "Rui", Some("2024-05-01")),
        ]);

        let names: Vec<_> = summary.upcoming.iter().map(|d| d.opportunity.as_str()).collect();
        assert_eq!(names, vec!["Early", "Mid", "Mid2"]);
        assert!(summary
            .upcoming
            .windows(2)
            .all(|w| w[0].expected_close <= w[1].expected_close));
        assert_eq!(
            summary.upcoming[0].expected_close,
            NaiveDate::from_ymd_opt(2024, 2, 1)
        );
    }

    #[test]
    fn test_over_exposure_rule() {
        let summary = PipelineSummary::from_records(&[
            deal("A", 10000.0, "A negociar", "Ana", None),
            deal("B", 1000.0, "Fechado ganho", "Ana", None),
            deal("C", 1000.0, "Fechado perdido", "Ana", None),
        ]);
        assert_eq!(summary.notes, vec![PipelineNote::OverExposed]);
    }

    #[test]
    fn test_notes_keep_rule_order() {
        let summary = PipelineSummary::from_records(&[
            deal("A", 10000.0, "A negociar", "Ana", None),
            deal("B", 100.0, "Fechado ganho", "Ana", None),
            deal("C", 1000.0, "Fechado perdido", "Ana", None),
        ]);
        assert_eq!(
            summary.notes,
            vec![PipelineNote::OverExposed, PipelineNote::LowSuccessRate]
        );
    }

    #[test]
    fn test_balanced_fallback() {
        let summary = PipelineSummary::from_records(&[
            deal("A", 1000.0, "A negociar", "Ana", None),
            deal("B", 2000.0, "Fechado ganho", "Ana", None),
            deal("C", 500.0, "Fechado perdido", "Ana", None),
        ]);
        assert_eq!(summary.notes, vec![PipelineNote::Balanced]);
    }

    #[test]
    fn test_empty_dataset_fires_no_pipeline_only() {
        let summary = PipelineSummary::from_records(&[]);
        assert_eq!(summary.notes, vec![PipelineNote::NoActivePipeline]);
        assert_eq!(summary.top_responsible, NO_RESPONSIBLE);
    }
}
