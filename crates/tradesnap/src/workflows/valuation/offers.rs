use super::config::ValuationConfig;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkOffer {
    pub location: String,
    pub value: u32,
    pub distance: String,
    pub is_best: bool,
}

/// Offers from neighbouring sites, derived from the current site's total.
pub fn network_offers(total: u32, config: &ValuationConfig) -> Vec<NetworkOffer> {
    let mut offers: Vec<NetworkOffer> = config
        .network_offers
        .iter()
        .map(|rule| NetworkOffer {
            location: rule.location.clone(),
            value: total.saturating_sub(rule.discount),
            distance: rule.distance.clone(),
            is_best: false,
        })
        .collect();

    // First row wins ties so the current site keeps the badge.
    let best_value = offers.iter().map(|offer| offer.value).max();
    if let Some(best) =
        best_value.and_then(|value| offers.iter_mut().find(|offer| offer.value == value))
    {
        best.is_best = true;
    }

    offers
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeOption {
    pub model: String,
    pub year: i32,
    pub price: u32,
    pub monthly: u32,
    pub deposit_needed: u32,
    pub coverage_pct: u8,
}

pub fn upgrade_options(trade_in_value: u32, config: &ValuationConfig) -> Vec<UpgradeOption> {
    config
        .upgrades
        .iter()
        .map(|candidate| {
            let coverage_pct = if candidate.price == 0 {
                100
            } else {
                (u64::from(trade_in_value) * 100 / u64::from(candidate.price)).min(100) as u8
            };

            UpgradeOption {
                model: candidate.model.clone(),
                year: candidate.year,
                price: candidate.price,
                monthly: candidate.monthly,
                deposit_needed: candidate.price.saturating_sub(trade_in_value),
                coverage_pct,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_rows_discount_from_current_site() {
        let offers = network_offers(8_300, &ValuationConfig::default());
        let values: Vec<u32> = offers.iter().map(|offer| offer.value).collect();
        assert_eq!(values, vec![8_300, 8_000, 7_800]);
        assert!(offers[0].is_best);
        assert_eq!(offers.iter().filter(|offer| offer.is_best).count(), 1);
        assert_eq!(offers[2].distance, "15 miles");
    }

    #[test]
    fn network_discounts_saturate_at_zero() {
        let offers = network_offers(200, &ValuationConfig::default());
        assert_eq!(offers[2].value, 0);
    }

    #[test]
    fn upgrade_coverage_truncates_and_caps() {
        let options = upgrade_options(7_600, &ValuationConfig::default());
        assert_eq!(options[0].deposit_needed, 37_400);
        assert_eq!(options[0].coverage_pct, 16);
        assert_eq!(options[2].coverage_pct, 20);

        let generous = upgrade_options(60_000, &ValuationConfig::default());
        assert!(generous
            .iter()
            .all(|option| option.deposit_needed == 0 && option.coverage_pct == 100));
    }
}
