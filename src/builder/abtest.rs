//! Choosing the winning variant of an A/B tested page

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AbTestKind {
    BounceRate, // fewest visitors leaving after one page
    DwellTime,  // longest average time on page
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbTestCriterion {
    pub key: &'static str,
    pub group: &'static str,
    pub label: &'static str,
    pub kind: AbTestKind,
}

impl AbTestCriterion {
    pub fn all() -> Vec<AbTestCriterion> {
        vec![
            AbTestCriterion {
                key: "page.bouncerate",
                group: "page.abtest.criteria",
                label: "page.abtest.criteria.bounce",
                kind: AbTestKind::BounceRate,
            },
            AbTestCriterion {
                key: "page.dwelltime",
                group: "page.abtest.criteria",
                label: "page.abtest.criteria.dwelltime",
                kind: AbTestKind::DwellTime,
            },
        ]
    }
}

/// Traffic recorded against one variant of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantStats {
    pub page_id: u64,
    pub hits: u64,
    pub bounces: u64,
    pub dwell_seconds: u64,
}

impl AbTestKind {
    /// The page id of the best performing variant, or `None` if no variant
    /// has been visited. On a tie the variant listed first wins.
    pub fn determine_winner(self, variants: &[VariantStats]) -> Option<u64> {
        let mut best: Option<(u64, f64)> = None;

        for variant in variants
            .iter()
            .filter(|v| v.hits > 0)
        {
            let score = self.score(variant);
            let better = match best {
                None => true,
                Some((_, current)) => score > current,
            };
            if better {
                best = Some((variant.page_id, score));
            }
        }

        best.map(|(page_id, _)| page_id)
    }

    // Higher is better for both criteria.
    fn score(self, variant: &VariantStats) -> f64 {
        let hits = variant.hits as f64;
        match self {
            AbTestKind::BounceRate => -(variant.bounces as f64 / hits),
            AbTestKind::DwellTime => variant.dwell_seconds as f64 / hits,
        }
    }
}
