//! Localized messages.
//!
//! Services never build user-facing text directly. They pick a
//! [`MessageKey`] and resolve it for the locale in the request context.

mod catalog;

pub use catalog::StaticMessages;

use emporium_core::{EmporiumError, Interface, Locale, MessageKey};
use emporium_security::{AccessDenied, DenialKind};

/// Resolves message keys to text.
#[cfg_attr(test, mockall::automock)]
pub trait MessageProvider: Interface + Send + Sync {
    /// Returns the text for `key` in `locale`.
    fn message(&self, key: MessageKey, locale: Locale) -> String;
}

/// Localized error constructors.
pub trait MessageProviderExt: MessageProvider {
    fn bad_request(&self, key: MessageKey, locale: Locale) -> EmporiumError {
        EmporiumError::bad_request(key, self.message(key, locale))
    }

    fn not_found(&self, key: MessageKey, locale: Locale) -> EmporiumError {
        EmporiumError::not_found(key, self.message(key, locale))
    }

    fn no_rows_affected(&self, locale: Locale) -> EmporiumError {
        let key = MessageKey::NoRowsAffected;
        EmporiumError::internal(key, self.message(key, locale))
    }

    fn denied(&self, denial: AccessDenied, locale: Locale) -> EmporiumError {
        let message = self.message(denial.key, locale);
        match denial.kind {
            DenialKind::Unauthorized => EmporiumError::unauthorized(denial.key, message),
            DenialKind::Forbidden => EmporiumError::forbidden(denial.key, message),
        }
    }
}

impl<T: MessageProvider + ?Sized> MessageProviderExt for T {}
