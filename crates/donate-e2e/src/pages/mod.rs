//! Page objects for the donation widget checkout.

pub mod donation_settings;
pub mod landing;
pub mod payment_information;
pub mod payment_method;
pub mod personal_information;

pub use donation_settings::DonationSettings;
pub use landing::LandingPage;
pub use payment_information::{PaymentField, PaymentInformation, TooltipError};
pub use payment_method::PaymentMethod;
pub use personal_information::{PersonalField, PersonalInformation};
