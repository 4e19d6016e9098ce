// Donation form: validates e-mail and amount, then reports to `stats`

use regex::Regex;
use std::sync::OnceLock;

use super::format::parse_float;
use super::stats::{Stats, StatsAction, AMOUNT_DONATED};
use crate::component::{Bound, Component, Context, Invocation, Params};
use crate::dom::{Document, ElementId};
use crate::error::NotifyError;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

pub const INVALID_EMAIL: &str = "E-mail is invalid";
pub const INVALID_AMOUNT: &str = "The donation amount must be a valid number greater than 0";
pub const THANK_YOU: &str = "Thank you for your donation!";

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("e-mail pattern compiles"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    SubmitForm,
    ClearAmounts,
    ClearCustomAmount,
    CheckValidEmail,
    CheckValidAmount,
}

pub struct DonationForm {
    element: ElementId,
    email: Option<ElementId>,
    amounts: Vec<ElementId>,
    custom_amount: Option<ElementId>,
}

impl DonationForm {
    /// Amount of the first selected preset, else the custom amount
    ///
    /// `None` when the chosen field does not start with a number.
    pub fn amount_donated(&self, doc: &Document) -> Option<f64> {
        if let Some(selected) = self.amounts.iter().find(|el| doc.checked(**el)) {
            return parse_float(&doc.value(*selected));
        }
        self.custom_amount.and_then(|el| parse_float(&doc.value(el)))
    }

    fn check_valid_email(&self, cx: &mut Context<'_>) -> bool {
        let valid = self
            .email
            .is_some_and(|el| email_pattern().is_match(&cx.document().value(el)));
        if !valid {
            cx.alert(INVALID_EMAIL);
        }
        valid
    }

    fn check_valid_amount(&self, cx: &mut Context<'_>) -> bool {
        let valid = self
            .amount_donated(cx.document())
            .is_some_and(|amount| amount.is_finite() && amount > 0.0);
        if !valid {
            cx.alert(INVALID_AMOUNT);
        }
        valid
    }

    fn clear_amounts(&self, doc: &mut Document) {
        for el in &self.amounts {
            doc.set_checked(*el, false);
        }
    }

    fn clear_custom_amount(&self, doc: &mut Document) {
        if let Some(el) = self.custom_amount {
            doc.set_value(el, "");
        }
    }

    fn submit_form(&self, cx: &mut Context<'_>) -> Result<(), NotifyError> {
        if !(self.check_valid_email(cx) && self.check_valid_amount(cx)) {
            return Ok(());
        }
        let Some(amount) = self.amount_donated(cx.document()) else {
            return Ok(());
        };

        cx.notify_action::<Stats>("stats", StatsAction::IncreaseDonations, &Params::new())?;
        cx.notify_action::<Stats>(
            "stats",
            StatsAction::IncreaseDonationAmount,
            &Params::new().with(AMOUNT_DONATED, amount),
        )?;
        cx.alert(THANK_YOU);
        cx.document_mut().reset_form(self.element);
        Ok(())
    }
}

impl Component for DonationForm {
    type Action = FormAction;

    fn dispatch_table() -> &'static [(&'static str, FormAction)] {
        &[
            ("submitForm", FormAction::SubmitForm),
            ("clearAmounts", FormAction::ClearAmounts),
            ("clearCustomAmount", FormAction::ClearCustomAmount),
            ("checkValidEmail", FormAction::CheckValidEmail),
            ("checkValidAmount", FormAction::CheckValidAmount),
        ]
    }

    fn create(bound: Bound) -> Self {
        Self {
            element: bound.element,
            email: bound.targets.target("email"),
            amounts: bound.targets.all("amount").to_vec(),
            custom_amount: bound.targets.target("customAmount"),
        }
    }

    fn handle(
        &mut self,
        action: FormAction,
        mut invocation: Invocation<'_>,
        cx: &mut Context<'_>,
    ) -> Result<(), NotifyError> {
        match action {
            FormAction::SubmitForm => {
                if let Some(event) = invocation.event() {
                    event.prevent_default();
                }
                self.submit_form(cx)?;
            }
            FormAction::ClearAmounts => self.clear_amounts(cx.document_mut()),
            FormAction::ClearCustomAmount => self.clear_custom_amount(cx.document_mut()),
            FormAction::CheckValidEmail => {
                self.check_valid_email(cx);
            }
            FormAction::CheckValidAmount => {
                self.check_valid_amount(cx);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarkupConfig;
    use crate::page::Page;
    use crate::registry::ComponentClass;

    const FORM_PAGE: &str = r#"
        <form id="f" data-component="form" data-action-form="submit#submitForm">
          <input id="email" type="email" data-target-form="email">
          <input id="a10" type="radio" name="amount" value="10" data-target-form="amount"
                 data-action-form="change#clearCustomAmount">
          <input id="a25" type="radio" name="amount" value="25" data-target-form="amount"
                 data-action-form="change#clearCustomAmount">
          <input id="a50" type="radio" name="amount" value="50" data-target-form="amount"
                 data-action-form="change#clearCustomAmount">
          <input id="custom" type="text" data-target-form="customAmount"
                 data-action-form="input#clearAmounts">
        </form>
    "#;

    fn form_page() -> Page {
        let mut page = Page::parse(FORM_PAGE, MarkupConfig::default());
        page.register("form", ComponentClass::of::<DonationForm>())
            .unwrap();
        page.load();
        page
    }

    fn el(page: &Page, id: &str) -> ElementId {
        page.by_id(id).unwrap()
    }

    fn amount(page: &Page) -> Option<f64> {
        page.registry()
            .with_instance("form", 0, |f: &DonationForm| f.amount_donated(page.document()))
            .flatten()
    }

    #[test]
    fn test_email_pattern() {
        for good in ["donor@example.org", "first.last+tag@mail.example.co"] {
            assert!(email_pattern().is_match(good), "{}", good);
        }
        for bad in ["", "nobody", "a@b", "a @example.org", "donor@example.o"] {
            assert!(!email_pattern().is_match(bad), "{}", bad);
        }
        // Same compiled instance every call
        assert!(std::ptr::eq(email_pattern(), email_pattern()));
    }

    #[test]
    fn test_form_binds_every_preset() {
        let page = form_page();
        let targets = page.registry().instance_targets("form", 0).unwrap();
        assert_eq!(targets.all("amount").len(), 3);
    }

    #[test]
    fn test_selected_radio_wins_over_empty_custom() {
        let mut page = form_page();
        let a25 = el(&page, "a25");
        page.document_mut().set_checked(a25, true);
        assert_eq!(amount(&page), Some(25.0));
    }

    #[test]
    fn test_custom_amount_used_without_radio() {
        let mut page = form_page();
        let custom = el(&page, "custom");
        page.document_mut().set_value(custom, "12.5");
        for radio in ["a10", "a25", "a50"] {
            assert!(!page.document().checked(el(&page, radio)));
        }
        assert_eq!(amount(&page), Some(12.5));

        page.document_mut().set_value(custom, "lots");
        assert_eq!(amount(&page), None);
    }

    #[test]
    fn test_typing_custom_amount_clears_radios() {
        let mut page = form_page();
        let (a10, custom) = (el(&page, "a10"), el(&page, "custom"));

        page.check(a10);
        assert!(page.document().checked(a10));

        let dispatched = page.type_text(custom, "40");
        assert!(dispatched.is_ok());
        assert!(!page.document().checked(a10));
        assert_eq!(amount(&page), Some(40.0));
    }

    #[test]
    fn test_choosing_radio_clears_custom_amount() {
        let mut page = form_page();
        let (a25, custom) = (el(&page, "a25"), el(&page, "custom"));

        page.type_text(custom, "40");
        page.check(a25);
        assert_eq!(page.document().value(custom), "");
        assert_eq!(amount(&page), Some(25.0));
    }

    #[test]
    fn test_invalid_email_alerts_and_stops() {
        let mut page = form_page();
        let (email, a10, form) = (el(&page, "email"), el(&page, "a10"), el(&page, "f"));
        page.document_mut().set_value(email, "not-an-address");
        page.check(a10);

        let dispatched = page.submit(form);
        assert!(dispatched.is_ok());
        assert!(dispatched.event.default_prevented());
        assert_eq!(page.document().alerts(), [INVALID_EMAIL]);
        // Nothing was reset
        assert!(page.document().checked(a10));
    }

    #[test]
    fn test_non_positive_amount_alerts() {
        let mut page = form_page();
        let (email, custom, form) = (el(&page, "email"), el(&page, "custom"), el(&page, "f"));
        page.document_mut().set_value(email, "donor@example.org");

        for value in ["", "0", "-5", "abc"] {
            page.document_mut().set_value(custom, value);
            page.submit(form);
        }
        assert_eq!(page.document().alerts().len(), 4);
        assert!(page.document().alerts().iter().all(|a| a == INVALID_AMOUNT));
    }

    #[test]
    fn test_submit_without_stats_still_thanks() {
        let mut page = form_page();
        let (email, custom, form) = (el(&page, "email"), el(&page, "custom"), el(&page, "f"));
        page.document_mut().set_value(email, "donor@example.org");
        page.document_mut().set_value(custom, "5");

        let dispatched = page.submit(form);
        assert!(dispatched.is_ok());
        assert_eq!(page.document().alerts(), [THANK_YOU]);
        assert_eq!(page.document().value(custom), "");
    }
}
