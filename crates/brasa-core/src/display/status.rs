//! The `Success:`/`Error:` line printed after a counter, kitchen or driver
//! action.

use std::fmt;

use crate::error::BrasaError;

/// Outcome line for a clock-out, a refused move or a missing order.
///
/// Refused moves carry [`BrasaError::toast_message`], so the terminal shows
/// the same short text a projector toast would.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl From<&BrasaError> for OperationStatus {
    fn from(err: &BrasaError) -> Self {
        Self::failure(err.toast_message())
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{prefix} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderStatus, Role};

    #[test]
    fn test_clock_out_confirmation() {
        let status = OperationStatus::success("Clocked out ana");
        assert_eq!(status.to_string(), "Success: Clocked out ana\n");
    }

    #[test]
    fn test_refused_move_uses_toast_text() {
        let err = BrasaError::InvalidTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Delivered,
            role: Role::Driver,
        };
        assert_eq!(
            OperationStatus::from(&err).to_string(),
            "Error: Order cannot go from pending to delivered\n"
        );
    }
}
