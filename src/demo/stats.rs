// Running donation totals: a count and an amount raised

use super::format::{format_usd, parse_int, parse_usd};
use crate::component::{Bound, Component, Context, Invocation};
use crate::dom::{Document, ElementId};
use crate::error::NotifyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsAction {
    IncreaseDonations,
    IncreaseDonationAmount,
}

/// Field carried by `increaseDonationAmount`
pub const AMOUNT_DONATED: &str = "amountDonated";

pub struct Stats {
    total_donations: Option<ElementId>,
    raised: Option<ElementId>,
}

impl Stats {
    /// Donation count currently displayed
    pub fn total_donations(&self, doc: &Document) -> Option<i64> {
        self.total_donations
            .and_then(|el| parse_int(&doc.text_content(el)))
    }

    /// Amount currently displayed as raised
    pub fn raised(&self, doc: &Document) -> Option<f64> {
        self.raised.and_then(|el| parse_usd(&doc.text_content(el)))
    }

    fn increase_donations(&self, cx: &mut Context<'_>) {
        let Some(el) = self.total_donations else {
            tracing::warn!("stats: no totalDonations target to update");
            return;
        };
        let current = parse_int(&cx.document().text_content(el)).unwrap_or_else(|| {
            tracing::warn!("stats: totalDonations did not hold a number, restarting at 0");
            0
        });
        cx.document_mut()
            .set_text_content(el, &(current + 1).to_string());
    }

    fn increase_donation_amount(
        &self,
        amount: f64,
        cx: &mut Context<'_>,
    ) {
        let Some(el) = self.raised else {
            tracing::warn!("stats: no raised target to update");
            return;
        };
        let current = parse_usd(&cx.document().text_content(el)).unwrap_or(0.0);
        cx.document_mut()
            .set_text_content(el, &format_usd(current + amount));
    }
}

impl Component for Stats {
    type Action = StatsAction;

    fn dispatch_table() -> &'static [(&'static str, StatsAction)] {
        &[
            ("increaseDonations", StatsAction::IncreaseDonations),
            ("increaseDonationAmount", StatsAction::IncreaseDonationAmount),
        ]
    }

    fn create(bound: Bound) -> Self {
        Self {
            total_donations: bound.targets.target("totalDonations"),
            raised: bound.targets.target("raised"),
        }
    }

    fn initialize(&mut self, cx: &mut Context<'_>) {
        if let Some(el) = self.total_donations {
            cx.document_mut().set_text_content(el, "0");
        }
        if let Some(el) = self.raised {
            cx.document_mut().set_text_content(el, &format_usd(0.0));
        }
    }

    fn handle(
        &mut self,
        action: StatsAction,
        invocation: Invocation<'_>,
        cx: &mut Context<'_>,
    ) -> Result<(), NotifyError> {
        match action {
            StatsAction::IncreaseDonations => self.increase_donations(cx),
            StatsAction::IncreaseDonationAmount => {
                let amount = invocation
                    .params()
                    .and_then(|p| p.get_f64(AMOUNT_DONATED))
                    .ok_or_else(|| NotifyError::Handler {
                        component: cx.component().to_string(),
                        method: "increaseDonationAmount".to_string(),
                        message: format!("expected numeric {} param", AMOUNT_DONATED),
                    })?;
                self.increase_donation_amount(amount, cx);
            }
        }
        Ok(())
    }
}
