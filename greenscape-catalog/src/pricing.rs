use crate::activity::Catalog;
use serde::{Deserialize, Serialize};

/// Group pricing rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRules {
    /// Minimum participant count for the group discount
    pub group_discount_min: i32,

    /// Flat discount applied once to the unit price (0.15 = 15% off)
    pub group_discount_rate: f64,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            group_discount_min: 7,
            group_discount_rate: 0.15,
        }
    }
}

/// A derived price for one selection. Unit and total are exact
/// (total == unit * participants, pre-rounding) in both series;
/// rounding happens only in `display`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub unit_usd: f64,
    pub unit_ksh: f64,
    pub total_usd: f64,
    pub total_ksh: f64,
    pub participants: i32,
    pub discount_applied: bool,
}

impl PriceQuote {
    pub fn zero() -> Self {
        Self {
            unit_usd: 0.0,
            unit_ksh: 0.0,
            total_usd: 0.0,
            total_ksh: 0.0,
            participants: 0,
            discount_applied: false,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.total_usd == 0.0 && self.total_ksh == 0.0
    }

    /// Render the four display strings. Each series rounds its unit price
    /// to a whole amount first and totals from the rounded unit, so the
    /// figures on screen always multiply out (e.g. $38 x 7 = $266).
    pub fn display(&self) -> QuoteDisplay {
        let unit_usd = round_half_up(self.unit_usd);
        let unit_ksh = round_half_up(self.unit_ksh);
        let total_usd = unit_usd * i64::from(self.participants.max(0));
        let total_ksh = unit_ksh * i64::from(self.participants.max(0));
        QuoteDisplay {
            unit_usd: format!("${}", unit_usd),
            unit_ksh: format!("KSH {}", group_thousands(unit_ksh)),
            total_usd: format!("${}", total_usd),
            total_ksh: format!("KSH {}", group_thousands(total_ksh)),
            participants: self.participants.max(0),
            discount_applied: self.discount_applied,
        }
    }
}

/// The strings pushed to the display surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteDisplay {
    pub unit_usd: String,
    pub unit_ksh: String,
    pub total_usd: String,
    pub total_ksh: String,
    pub participants: i32,
    pub discount_applied: bool,
}

/// Group pricing engine. Pure: no side effects, no error paths --
/// degenerate input yields the zero quote.
pub struct PricingEngine {
    rules: PricingRules,
}

impl PricingEngine {
    pub fn new(rules: PricingRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &PricingRules {
        &self.rules
    }

    /// Quote a selection. Unknown or inactive activities and non-positive
    /// participant counts are valid "no selection" states, not errors.
    pub fn quote(&self, catalog: &Catalog, activity_id: &str, participants: i32) -> PriceQuote {
        let activity = match catalog.get(activity_id) {
            Some(a) if a.is_active => a,
            _ => return PriceQuote::zero(),
        };
        if participants <= 0 {
            return PriceQuote::zero();
        }

        let discount_applied = participants >= self.rules.group_discount_min;
        let factor = if discount_applied {
            1.0 - self.rules.group_discount_rate
        } else {
            1.0
        };

        // Both series discount and total identically.
        let unit_usd = activity.base_price_usd as f64 * factor;
        let unit_ksh = activity.base_price_ksh as f64 * factor;

        PriceQuote {
            unit_usd,
            unit_ksh,
            total_usd: unit_usd * participants as f64,
            total_ksh: unit_ksh * participants as f64,
            participants,
            discount_applied,
        }
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(PricingRules::default())
    }
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if value < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> PricingEngine {
        PricingEngine::default()
    }

    #[test]
    fn no_discount_below_seven() {
        let catalog = Catalog::greenscape();
        for n in 1..7 {
            let quote = engine().quote(&catalog, "forest-hiking", n);
            assert!(!quote.discount_applied, "unexpected discount at n={}", n);
            assert_eq!(quote.unit_usd, 45.0);
        }
    }

    #[test]
    fn discount_from_seven_up() {
        let catalog = Catalog::greenscape();
        for n in 7..20 {
            let quote = engine().quote(&catalog, "forest-hiking", n);
            assert!(quote.discount_applied, "missing discount at n={}", n);
        }
    }

    #[test]
    fn total_is_unit_times_count_pre_rounding() {
        let catalog = Catalog::greenscape();
        for n in 1..12 {
            let quote = engine().quote(&catalog, "eco-camping", n);
            assert_eq!(quote.total_usd, quote.unit_usd * n as f64);
            assert_eq!(quote.total_ksh, quote.unit_ksh * n as f64);
        }
    }

    #[test]
    fn series_stay_consistent_under_fixed_rate() {
        let catalog = Catalog::greenscape();
        let quote = engine().quote(&catalog, "wildlife-safari", 9);
        assert!((quote.total_ksh - quote.total_usd * 150.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_inputs_yield_zero_quote() {
        let catalog = Catalog::greenscape();
        assert!(engine().quote(&catalog, "space-tourism", 4).is_zero());
        assert!(engine().quote(&catalog, "forest-hiking", 0).is_zero());
        assert!(engine().quote(&catalog, "forest-hiking", -3).is_zero());
    }

    #[test]
    fn inactive_activity_yields_zero_quote() {
        let mut catalog = Catalog::greenscape();
        let mut hiking = catalog.get("forest-hiking").unwrap().clone();
        hiking.is_active = false;
        catalog.insert(hiking);
        assert!(engine().quote(&catalog, "forest-hiking", 4).is_zero());
    }

    #[test]
    fn display_rounds_unit_first() {
        let catalog = Catalog::greenscape();
        // 45 * 0.85 = 38.25 -> $38; 38 * 7 = 266
        let display = engine().quote(&catalog, "forest-hiking", 7).display();
        assert_eq!(display.unit_usd, "$38");
        assert_eq!(display.total_usd, "$266");
        assert!(display.discount_applied);
        // 6750 * 0.85 = 5737.5 -> 5738; 5738 * 7 = 40166
        assert_eq!(display.unit_ksh, "KSH 5,738");
        assert_eq!(display.total_ksh, "KSH 40,166");
    }

    #[test]
    fn zero_quote_displays_zero_strings() {
        let display = PriceQuote::zero().display();
        assert_eq!(display.unit_usd, "$0");
        assert_eq!(display.unit_ksh, "KSH 0");
        assert_eq!(display.total_usd, "$0");
        assert_eq!(display.total_ksh, "KSH 0");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(950), "950");
        assert_eq!(group_thousands(6750), "6,750");
        assert_eq!(group_thousands(126000), "126,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
