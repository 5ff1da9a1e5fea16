//! Tour confirmation delivery.
//!
//! Delivery is a seam so the transport can be swapped without touching the
//! booking flow. The in-tree implementation writes confirmations to the log.

use log::info;
use thiserror::Error;

/// Failure to deliver a confirmation.
#[derive(Debug, Error)]
#[error("notify error: {0}")]
pub struct NotifyError(pub String);

/// Details of a confirmed tour.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub name: String,
    pub email: String,
    pub address: String,
    pub unit: i64,
    pub start_time: String,
}

impl Confirmation {
    /// Render the confirmation message body sent to the prospect.
    pub fn body(&self) -> String {
        format!(
            "Hi {},\n\nYour tour is confirmed!\n\nProperty: {}\nUnit: {}\nTime: {}\n\n- Leasing Bot",
            self.name, self.address, self.unit, self.start_time
        )
    }
}

/// Delivery seam for tour confirmations.
pub trait ConfirmationNotifier: Send + Sync {
    /// Deliver one confirmation to the prospect.
    fn notify(&self, confirmation: &Confirmation) -> Result<(), NotifyError>;
}

/// Notifier that records confirmations in the log instead of delivering them.
pub struct LogNotifier;

impl ConfirmationNotifier for LogNotifier {
    fn notify(&self, confirmation: &Confirmation) -> Result<(), NotifyError> {
        info!(
            "tour confirmation (email={}, property={}):\n{}",
            confirmation.email,
            confirmation.address,
            confirmation.body()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn confirmation_body_includes_tour_details() {
        let confirmation = Confirmation {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            address: "12 Oak Ln".to_string(),
            unit: 7,
            start_time: "2026-09-01 10:00".to_string(),
        };
        assert_eq!(
            confirmation.body(),
            "Hi Ana,\n\nYour tour is confirmed!\n\nProperty: 12 Oak Ln\nUnit: 7\nTime: 2026-09-01 10:00\n\n- Leasing Bot"
        );
    }
}
