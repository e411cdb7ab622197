//! Payee routing and address details.

/// Width of the registration number field.
pub const REGISTRATION_NUMBER_LEN: usize = 4;

/// Width of the account number field.
pub const ACCOUNT_NUMBER_LEN: usize = 10;

/// Width of the name, address, address2 and city fields.
pub const ADDRESS_LINE_WIDTH: usize = 32;

/// Maximum length of the zip code. The field is written unpadded.
pub const ZIP_CODE_MAX_LEN: usize = 4;

/// The recipient of a payment.
///
/// Every field is required but may be blank. Lengths are checked by
/// [`crate::validate::validate_recipient`], not here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Recipient {
    /// Bank registration number, exactly 4 characters
    pub registration_number: String,

    /// Account number, exactly 10 characters
    pub account_number: String,

    pub name: String,
    pub address: String,
    pub address2: String,

    /// Up to 4 characters
    pub zip_code: String,

    pub city: String,
}

impl Recipient {
    /// Creates a recipient with blank name and address fields.
    pub fn new(registration_number: impl Into<String>, account_number: impl Into<String>) -> Self {
        Recipient {
            registration_number: registration_number.into(),
            account_number: account_number.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>, address2: impl Into<String>) -> Self {
        self.address = address.into();
        self.address2 = address2.into();
        self
    }

    pub fn with_city(mut self, zip_code: impl Into<String>, city: impl Into<String>) -> Self {
        self.zip_code = zip_code.into();
        self.city = city.into();
        self
    }
}
