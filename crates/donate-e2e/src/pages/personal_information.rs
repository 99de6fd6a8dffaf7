//! Personal information screen, the last step before submitting.

use crate::handle::{Element, Frame};
use crate::page_object::Screen;
use crate::result::{E2eError, E2eResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Root of the personal information screen
pub const SCREEN: &str = r#"[aria-label="Personal information"]"#;
/// First name input
pub const FIRST_NAME: &str = r#"[data-qa="personal-first-name"]"#;
/// Last name input
pub const LAST_NAME: &str = r#"[data-qa="personal-last-name"]"#;
/// E-mail input
pub const EMAIL: &str = r#"[data-qa="personal-email"]"#;
/// Final "Donate" button
pub const DONATE_BUTTON: &str = r#"[data-qa="privacy-continue"]"#;

/// An input on the personal information screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonalField {
    /// First name
    FirstName,
    /// Last name
    LastName,
    /// E-mail address
    Email,
}

impl PersonalField {
    /// Every input, in form order
    pub const ALL: [Self; 3] = [Self::FirstName, Self::LastName, Self::Email];

    /// Human-readable tag
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
        }
    }

    /// Selector of the input
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::FirstName => FIRST_NAME,
            Self::LastName => LAST_NAME,
            Self::Email => EMAIL,
        }
    }
}

impl fmt::Display for PersonalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PersonalField {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.tag() == s)
            .ok_or_else(|| E2eError::UnknownField {
                kind: "personal",
                tag: s.to_string(),
            })
    }
}

/// Fourth screen of the widget
#[derive(Debug, Clone)]
pub struct PersonalInformation {
    frame: Frame,
}

impl Screen for PersonalInformation {
    const NAME: &'static str = "personal information";
    const ROOT: &'static str = SCREEN;

    fn frame(&self) -> &Frame {
        &self.frame
    }
}

impl PersonalInformation {
    /// Wait for the screen inside `frame`
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::Timeout`] if it never renders
    pub async fn open(frame: Frame) -> E2eResult<Self> {
        let screen = Self { frame };
        screen.init_screen().await?;
        Ok(screen)
    }

    /// Input for `field`
    #[must_use]
    pub fn get_field(&self, field: PersonalField) -> Element {
        self.frame.locator(field.selector())
    }

    /// The first name input
    #[must_use]
    pub fn get_first_name(&self) -> Element {
        self.get_field(PersonalField::FirstName)
    }

    /// The last name input
    #[must_use]
    pub fn get_last_name(&self) -> Element {
        self.get_field(PersonalField::LastName)
    }

    /// The e-mail input
    #[must_use]
    pub fn get_email(&self) -> Element {
        self.get_field(PersonalField::Email)
    }

    /// Type `value` into a personal data input
    ///
    /// # Errors
    ///
    /// Returns error if the input never becomes editable
    pub async fn fill_personal_data(&self, field: PersonalField, value: &str) -> E2eResult<()> {
        info!(%field, "filling personal data");
        self.frame.fill(field.selector(), value).await
    }

    /// Click the final "Donate" button
    ///
    /// # Errors
    ///
    /// Returns error if the button never becomes clickable
    pub async fn accept_personal_data(&self) -> E2eResult<()> {
        info!("submitting donation");
        self.frame.click(DONATE_BUTTON).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        for (tag, field) in [
            ("First Name", PersonalField::FirstName),
            ("Last Name", PersonalField::LastName),
            ("Email", PersonalField::Email),
        ] {
            assert_eq!(tag.parse::<PersonalField>().unwrap(), field);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_tag() {
        let err = "Phone".parse::<PersonalField>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown personal field \"Phone\"");
    }

    #[test]
    fn test_selectors_are_distinct() {
        let selectors: std::collections::HashSet<_> =
            PersonalField::ALL.iter().map(|f| f.selector()).collect();
        assert_eq!(selectors.len(), PersonalField::ALL.len());
    }
}
