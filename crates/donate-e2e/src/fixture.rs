//! In-memory donation widget for offline runs.
//!
//! [`WidgetFixture`] scripts a [`MockDriver`] with the same selectors, frames
//! and screen transitions as the live widget: the landing page shows the
//! "Give now" button, each terminal click hides the current screen and shows
//! the next one, and the final submit returns to the card form with a
//! decline tooltip.

use crate::driver::{MockDriver, MockEffect, MockElement};
use crate::locator::{FramePath, Locator, Selector};
use crate::pages::landing::{DONATION_WIDGET_IFRAME, GIVE_NOW_TITLE};
use crate::pages::{
    donation_settings, payment_information, payment_method, personal_information, PaymentField,
    TooltipError,
};
use crate::scenario::PAGE_TITLE;
use std::collections::HashSet;

/// Currencies offered by the mock currency selector
pub const CURRENCIES: [(&str, &str); 3] = [("USD", "$"), ("EUR", "€"), ("GBP", "£")];

/// Currency selected when the dialog opens
pub const INITIAL_CURRENCY: &str = "EUR";

/// Frame of the donation widget
#[must_use]
pub fn widget_frame() -> FramePath {
    FramePath::root().child(DONATION_WIDGET_IFRAME)
}

fn in_widget(css: &str) -> Locator {
    Locator::new(widget_frame(), Selector::css(css))
}

fn shown(locator: Locator) -> MockEffect {
    MockEffect::Show(locator, MockElement::new())
}

/// Builder for a scripted donation widget
#[derive(Debug, Clone)]
pub struct WidgetFixture {
    decline: TooltipError,
    missing_screens: HashSet<&'static str>,
}

impl Default for WidgetFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetFixture {
    /// Widget answering the final submit with the test card decline
    #[must_use]
    pub fn new() -> Self {
        Self {
            decline: TooltipError::expected_decline(),
            missing_screens: HashSet::new(),
        }
    }

    /// Tooltip shown after the final submit
    #[must_use]
    pub fn with_decline(mut self, decline: TooltipError) -> Self {
        self.decline = decline;
        self
    }

    /// Never render the screen with this root selector
    #[must_use]
    pub fn without_screen(mut self, root: &'static str) -> Self {
        let _ = self.missing_screens.insert(root);
        self
    }

    fn screen(&self, root: &'static str) -> Vec<MockEffect> {
        if self.missing_screens.contains(root) {
            Vec::new()
        } else {
            vec![shown(in_widget(root))]
        }
    }

    /// Build the scripted driver
    #[must_use]
    pub fn build(&self) -> MockDriver {
        let driver = MockDriver::new();
        self.script_landing(&driver);
        self.script_donation_settings(&driver);
        self.script_payment_method(&driver);
        self.script_payment_information(&driver);
        self.script_personal_information(&driver);
        driver
    }

    fn script_landing(&self, driver: &MockDriver) {
        let give_now = Locator::new(FramePath::root(), Selector::title(GIVE_NOW_TITLE));
        driver.on_navigate(vec![
            MockEffect::SetTitle(PAGE_TITLE.to_string()),
            shown(give_now.clone()),
        ]);

        let symbol = CURRENCIES
            .iter()
            .find(|(code, _)| *code == INITIAL_CURRENCY)
            .map_or("", |(_, symbol)| *symbol);
        let codes: Vec<&str> = CURRENCIES.iter().map(|(code, _)| *code).collect();

        let mut effects = vec![shown(Locator::css(DONATION_WIDGET_IFRAME))];
        effects.extend(self.screen(donation_settings::SCREEN));
        effects.extend([
            shown(in_widget(donation_settings::MONTHLY_PLAN)),
            MockEffect::Show(
                in_widget(donation_settings::CURRENCY_SELECTOR),
                MockElement::new()
                    .with_options(&codes)
                    .with_value(INITIAL_CURRENCY),
            ),
            MockEffect::Show(
                in_widget(donation_settings::CURRENCY_SYMBOL),
                MockElement::new().with_text(symbol),
            ),
            shown(in_widget(donation_settings::AMOUNT)),
            MockEffect::Show(
                in_widget(donation_settings::DONATE_BUTTON),
                MockElement::new().with_text("Donate"),
            ),
        ]);
        driver.on_click(&give_now, effects);
    }

    fn script_donation_settings(&self, driver: &MockDriver) {
        let donate_button = in_widget(donation_settings::DONATE_BUTTON);
        driver.on_click(
            &in_widget(donation_settings::MONTHLY_PLAN),
            vec![MockEffect::SetText(
                donate_button.clone(),
                "Donate monthly".to_string(),
            )],
        );

        let selector = in_widget(donation_settings::CURRENCY_SELECTOR);
        for (code, symbol) in CURRENCIES {
            driver.on_select(
                &selector,
                code,
                vec![MockEffect::SetText(
                    in_widget(donation_settings::CURRENCY_SYMBOL),
                    symbol.to_string(),
                )],
            );
        }

        let mut effects = vec![MockEffect::Hide(in_widget(donation_settings::SCREEN))];
        effects.extend(self.screen(payment_method::SCREEN));
        effects.extend([
            MockEffect::Show(
                in_widget(payment_method::COVER_FEE_CHECKBOX),
                MockElement::new().with_checked(false),
            ),
            shown(in_widget(payment_method::CREDIT_CARD_BUTTON)),
        ]);
        driver.on_click(&donate_button, effects);
    }

    fn script_payment_method(&self, driver: &MockDriver) {
        let mut effects = vec![MockEffect::Hide(in_widget(payment_method::SCREEN))];
        effects.extend(self.screen(payment_information::SCREEN));
        for field in PaymentField::ALL {
            let card_frame = widget_frame().child(field.iframe());
            effects.push(shown(in_widget(field.iframe())));
            effects.push(shown(Locator::new(card_frame, Selector::css(field.selector()))));
        }
        effects.push(shown(in_widget(payment_information::CONTINUE_BUTTON)));
        driver.on_click(&in_widget(payment_method::CREDIT_CARD_BUTTON), effects);
    }

    fn script_payment_information(&self, driver: &MockDriver) {
        let mut effects = vec![MockEffect::Hide(in_widget(payment_information::SCREEN))];
        effects.extend(self.screen(personal_information::SCREEN));
        effects.extend([
            shown(in_widget(personal_information::FIRST_NAME)),
            shown(in_widget(personal_information::LAST_NAME)),
            shown(in_widget(personal_information::EMAIL)),
            shown(in_widget(personal_information::DONATE_BUTTON)),
        ]);
        driver.on_click(&in_widget(payment_information::CONTINUE_BUTTON), effects);
    }

    fn script_personal_information(&self, driver: &MockDriver) {
        let text = |t: &Option<String>| match t {
            Some(t) => MockElement::new().with_text(t.clone()),
            None => MockElement::new(),
        };

        let mut effects = vec![MockEffect::Hide(in_widget(personal_information::SCREEN))];
        effects.extend(self.screen(payment_information::SCREEN));
        effects.extend([
            MockEffect::Show(
                in_widget(payment_information::ERROR_TITLE),
                text(&self.decline.title),
            ),
            MockEffect::Show(
                in_widget(payment_information::ERROR_MESSAGE),
                text(&self.decline.message),
            ),
        ]);
        driver.on_click(&in_widget(personal_information::DONATE_BUTTON), effects);
    }
}

/// The default scripted widget
#[must_use]
pub fn donation_widget() -> MockDriver {
    WidgetFixture::new().build()
}
