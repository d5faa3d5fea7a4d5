#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Storage backend failure: {0}")]
    Backend(#[from] sled::Error),
}

/// Reasons a cart cannot be turned into an order. Checked in declaration order.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Your cart is empty")]
    EmptyCart,
    #[error("A shipping address with a country is required")]
    MissingShippingAddress,
    #[error("A payment method must be selected")]
    MissingPaymentMethod,
}

impl ValidationError {
    /// Stable machine-readable code for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyCart => "EMPTY_CART",
            Self::MissingShippingAddress => "MISSING_SHIPPING_ADDRESS",
            Self::MissingPaymentMethod => "MISSING_PAYMENT_METHOD",
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SubmissionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    // order API message, passed through untouched
    #[error("{0}")]
    Rejected(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported payment method: {0:?}")]
pub struct ParsePaymentMethodError(pub String);

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}
