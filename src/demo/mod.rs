//! Donation demo: a form component that validates and submits, and a stats
//! component it reports to through the registry.
//!
//! The bundled page lives in `demos/donation.html`.

pub mod form;
pub mod format;
pub mod stats;

pub use form::{DonationForm, FormAction};
pub use stats::{Stats, StatsAction};

use crate::config::MarkupConfig;
use crate::dom::ElementId;
use crate::error::{Error, Result};
use crate::page::{Dispatched, Page};
use crate::registry::ComponentClass;

/// Markup of the bundled donation page
pub const DONATION_PAGE: &str = include_str!("../../demos/donation.html");

/// Registered names and classes of the demo components
pub fn classes() -> [(&'static str, ComponentClass); 2] {
    [
        ("form", ComponentClass::of::<DonationForm>()),
        ("stats", ComponentClass::of::<Stats>()),
    ]
}

/// Parse `html`, register the demo components, and load the page
pub fn load_page(html: &str, markup: MarkupConfig) -> Result<Page> {
    let mut page = Page::parse(html, markup);
    page.register_all(classes())?;
    let instances = page.load();
    tracing::debug!("demo page loaded with {} instances", instances);
    Ok(page)
}

/// Fill in the donation form and submit it
///
/// An `amount` matching a preset checks the `amount-<amount>` radio, anything
/// else is typed into the custom amount field. The first listener failure of
/// any step is returned.
pub fn donate(page: &mut Page, email: &str, amount: &str) -> Result<Dispatched> {
    let email_field = element(page, "email")?;
    settle(page.type_text(email_field, email))?;

    match page.by_id(&format!("amount-{}", amount)) {
        Some(radio) => settle(page.check(radio))?,
        None => {
            let custom = element(page, "custom-amount")?;
            settle(page.type_text(custom, amount))?
        }
    };

    let form = element(page, "donation-form")?;
    settle(page.submit(form))
}

fn element(page: &Page, id: &str) -> Result<ElementId> {
    page.by_id(id)
        .ok_or_else(|| Error::MissingElement(id.to_string()))
}

fn settle(dispatched: Dispatched) -> Result<Dispatched> {
    match dispatched.errors.first() {
        Some(error) => Err(error.clone().into()),
        None => Ok(dispatched),
    }
}

/// Read the stats instance's counters: (donations, raised)
pub fn stats_snapshot(page: &Page) -> Option<(i64, f64)> {
    page.registry()
        .with_instance("stats", 0, |stats: &Stats| {
            Some((
                stats.total_donations(page.document())?,
                stats.raised(page.document())?,
            ))
        })
        .flatten()
}
