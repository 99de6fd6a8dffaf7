//! Page object contract tests against the scripted in-memory widget.

#![allow(clippy::unwrap_used)]

use donate_e2e::fixture::{widget_frame, WidgetFixture};
use donate_e2e::pages::{payment_information, payment_method, personal_information};
use donate_e2e::prelude::*;
use donate_e2e::{DonationSettings, Locator, PaymentInformation, Selector, SharedDriver};
use std::sync::Arc;

fn fast_config() -> SuiteConfig {
    SuiteConfig {
        base_url: "http://widget.test".into(),
        action_timeout_ms: 200,
        expect_timeout_ms: 200,
        navigation_timeout_ms: 200,
        poll_interval_ms: 5,
        ..SuiteConfig::default()
    }
}

fn setup(fixture: &WidgetFixture) -> (Page, Arc<MockDriver>, SuiteConfig) {
    let config = fast_config();
    let mock = Arc::new(fixture.build());
    let driver: SharedDriver = mock.clone();
    let page = Page::new(driver).with_timeouts(Timeouts::from(&config));
    (page, mock, config)
}

fn in_widget(css: &str) -> Locator {
    Locator::new(widget_frame(), Selector::css(css))
}

async fn open_dialog(page: &Page, config: &SuiteConfig) -> DonationSettings {
    let landing = LandingPage::new(page.clone(), config);
    landing.open_page().await.unwrap();
    landing.click_give_now_button().await.unwrap()
}

async fn open_payment_information(page: &Page, config: &SuiteConfig) -> PaymentInformation {
    open_dialog(page, config)
        .await
        .click_donate_button()
        .await
        .unwrap()
        .click_credit_card_payment_button()
        .await
        .unwrap()
}

// ============================================================================
// Entry page
// ============================================================================

mod landing_tests {
    use super::*;

    #[tokio::test]
    async fn test_open_page_uses_injected_base_url() {
        let (page, mock, config) = setup(&WidgetFixture::new());
        let landing = LandingPage::new(page.clone(), &config);

        landing.open_page().await.unwrap();

        assert!(mock.was_called("navigate:http://widget.test/qa-test-7R58U3/"));
        expect_page(&page).to_have_title("QA Engineer Test").await.unwrap();
    }

    #[tokio::test]
    async fn test_give_now_before_navigation_times_out() {
        let (page, _, config) = setup(&WidgetFixture::new());
        let landing = LandingPage::new(page, &config);

        let err = landing.click_give_now_button().await.unwrap_err();

        assert!(matches!(err, E2eError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_give_now_returns_ready_dialog() {
        let (page, _, config) = setup(&WidgetFixture::new());

        let dialog = open_dialog(&page, &config).await;

        assert!(dialog.get_frame().is_visible().await.unwrap());
        assert_eq!(dialog.frame().path(), &widget_frame());
    }
}

// ============================================================================
// Donation settings
// ============================================================================

mod donation_settings_tests {
    use super::*;

    #[tokio::test]
    async fn test_choose_usd_shows_dollar() {
        let (page, _, config) = setup(&WidgetFixture::new());
        let dialog = open_dialog(&page, &config).await;

        dialog.choose_currency("USD").await.unwrap();

        expect(&dialog.get_currency_symbol())
            .to_contain_text("$")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unknown_currency_rejected() {
        let (page, _, config) = setup(&WidgetFixture::new());
        let dialog = open_dialog(&page, &config).await;

        let err = dialog.choose_currency("XYZ").await.unwrap_err();

        assert!(matches!(err, E2eError::OptionNotFound { .. }));
    }

    #[tokio::test]
    async fn test_monthly_plan_changes_button() {
        let (page, _, config) = setup(&WidgetFixture::new());
        let dialog = open_dialog(&page, &config).await;

        dialog.click_monthly_plan().await.unwrap();

        expect(&dialog.get_donate_button())
            .to_contain_text("monthly")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_input_amount_fills_decimal() {
        let (page, _, config) = setup(&WidgetFixture::new());
        let dialog = open_dialog(&page, &config).await;

        dialog.input_amount(250).await.unwrap();

        assert_eq!(dialog.get_donate_amount().input_value().await.unwrap(), "250");
    }
}

// ============================================================================
// Transitions
// ============================================================================

mod transition_tests {
    use super::*;

    #[tokio::test]
    async fn test_screen_that_never_renders_times_out() {
        let fixture = WidgetFixture::new().without_screen(payment_method::SCREEN);
        let (page, _, config) = setup(&fixture);
        let dialog = open_dialog(&page, &config).await;

        let err = dialog.click_donate_button().await.unwrap_err();

        match err {
            E2eError::Timeout { ms, waited_for } => {
                assert_eq!(ms, 200);
                assert!(waited_for.contains("active-screen-payment-method"));
            }
            other => panic!("expected timeout, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_returned_screen_is_already_visible() {
        let (page, _, config) = setup(&WidgetFixture::new());

        let payment = open_payment_information(&page, &config).await;

        assert!(payment.get_frame().is_visible().await.unwrap());
        let personal = payment.confirm_payment_info().await.unwrap();
        assert!(personal.get_frame().is_visible().await.unwrap());
        assert!(!payment.get_frame().is_visible().await.unwrap());
    }
}

// ============================================================================
// Payment method checkbox
// ============================================================================

mod checkbox_tests {
    use super::*;

    #[tokio::test]
    async fn test_same_state_twice_clicks_once() {
        let (page, mock, config) = setup(&WidgetFixture::new());
        let method = open_dialog(&page, &config)
            .await
            .click_donate_button()
            .await
            .unwrap();
        let checkbox = in_widget(payment_method::COVER_FEE_CHECKBOX);

        method.click_cover_transaction_cost_checkbox(true).await.unwrap();
        method.click_cover_transaction_cost_checkbox(true).await.unwrap();

        assert_eq!(mock.clicks_on(&checkbox), 1);
        expect(&method.get_checkbox())
            .to_have_attribute("aria-checked", "true")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_already_in_state_does_not_click() {
        let (page, mock, config) = setup(&WidgetFixture::new());
        let method = open_dialog(&page, &config)
            .await
            .click_donate_button()
            .await
            .unwrap();

        method.click_cover_transaction_cost_checkbox(false).await.unwrap();

        assert_eq!(mock.clicks_on(&in_widget(payment_method::COVER_FEE_CHECKBOX)), 0);
    }

    #[tokio::test]
    async fn test_toggle_back() {
        let (page, mock, config) = setup(&WidgetFixture::new());
        let method = open_dialog(&page, &config)
            .await
            .click_donate_button()
            .await
            .unwrap();

        method.click_cover_transaction_cost_checkbox(true).await.unwrap();
        method.click_cover_transaction_cost_checkbox(false).await.unwrap();

        assert_eq!(mock.clicks_on(&in_widget(payment_method::COVER_FEE_CHECKBOX)), 2);
        assert!(!method.get_checkbox().is_checked().await.unwrap());
    }
}

// ============================================================================
// Parameterized fills
// ============================================================================

mod fill_tests {
    use super::*;

    #[tokio::test]
    async fn test_each_payment_field_fills_its_own_input() {
        let (page, mock, config) = setup(&WidgetFixture::new());
        let payment = open_payment_information(&page, &config).await;

        for (i, field) in PaymentField::ALL.into_iter().enumerate() {
            payment.fill_payment_info(field, &format!("v{i}")).await.unwrap();
        }

        for (i, field) in PaymentField::ALL.into_iter().enumerate() {
            let locator = Locator::new(
                widget_frame().child(field.iframe()),
                Selector::css(field.selector()),
            );
            assert_eq!(mock.element(&locator).unwrap().value, format!("v{i}"));
        }
    }

    #[tokio::test]
    async fn test_each_personal_field_fills_its_own_input() {
        let (page, mock, config) = setup(&WidgetFixture::new());
        let personal = open_payment_information(&page, &config)
            .await
            .confirm_payment_info()
            .await
            .unwrap();

        personal.fill_personal_data(PersonalField::FirstName, "Ada").await.unwrap();
        personal.fill_personal_data(PersonalField::LastName, "Lovelace").await.unwrap();
        personal.fill_personal_data(PersonalField::Email, "ada@google.com").await.unwrap();

        let value = |css| mock.element(&in_widget(css)).unwrap().value;
        assert_eq!(value(personal_information::FIRST_NAME), "Ada");
        assert_eq!(value(personal_information::LAST_NAME), "Lovelace");
        assert_eq!(value(personal_information::EMAIL), "ada@google.com");
    }

    #[tokio::test]
    async fn test_unknown_tag_never_reaches_the_page() {
        let (page, mock, config) = setup(&WidgetFixture::new());
        let _payment = open_payment_information(&page, &config).await;

        let parsed = "IBAN".parse::<PaymentField>();
        let personal = "Phone".parse::<PersonalField>();

        assert!(matches!(parsed, Err(E2eError::UnknownField { kind: "payment", .. })));
        assert!(matches!(personal, Err(E2eError::UnknownField { kind: "personal", .. })));
        assert!(!mock.was_called("fill:"));
    }

    #[tokio::test]
    async fn test_legacy_tags_fill_expected_inputs() {
        let (page, _, config) = setup(&WidgetFixture::new());
        let payment = open_payment_information(&page, &config).await;

        let field: PaymentField = "expiration date".parse().unwrap();
        payment.fill_payment_info(field, "04 / 24").await.unwrap();

        expect(&payment.get_expiration_date())
            .to_have_value("04 / 24")
            .await
            .unwrap();
    }
}

// ============================================================================
// Error tooltip
// ============================================================================

mod tooltip_tests {
    use super::*;

    async fn submit(fixture: &WidgetFixture) -> (PaymentInformation, E2eResult<TooltipError>) {
        let (page, _, config) = setup(fixture);
        let payment = open_payment_information(&page, &config).await;
        let personal = payment.confirm_payment_info().await.unwrap();
        personal.accept_personal_data().await.unwrap();
        let error = payment.get_error().await;
        (payment, error)
    }

    #[tokio::test]
    async fn test_decline_tooltip_read_after_submit() {
        let (payment, error) = submit(&WidgetFixture::new()).await;

        assert_eq!(error.unwrap(), TooltipError::expected_decline());
        expect(&payment.get_frame()).to_be_visible().await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_message_is_none() {
        let fixture = WidgetFixture::new().with_decline(TooltipError {
            title: Some("Card error".into()),
            message: None,
        });

        let (_, error) = submit(&fixture).await;

        let error = error.unwrap();
        assert_eq!(error.title.as_deref(), Some("Card error"));
        assert_eq!(error.message, None);
    }

    #[tokio::test]
    async fn test_missing_tooltip_is_bounded() {
        let (page, _, config) = setup(&WidgetFixture::new());
        let payment = open_payment_information(&page, &config).await;

        let err = payment.get_error().await.unwrap_err();

        assert!(matches!(err, E2eError::Timeout { .. }));
        assert!(err.to_string().contains(payment_information::ERROR_TITLE));
    }
}
