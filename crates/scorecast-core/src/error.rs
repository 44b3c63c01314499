//! Error types for the synchronization core.
//!
//! Validation and lookup errors are terminal for the single request that
//! caused them and never touch the store. Delivery errors are isolated
//! per subscriber and never reach the mutation caller. Nothing in this
//! taxonomy is fatal: the service is expected to run indefinitely.

use scorecast_types::TeamId;

/// Errors from the score store's mutation path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No team with the given identity exists.
    #[error("team {team_id} not found")]
    NotFound {
        /// The identity that failed to resolve.
        team_id: TeamId,
    },
}

/// Errors surfaced to the administrator by the mutation gateway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The submitted points value did not parse as a non-zero integer.
    #[error("invalid points amount: {reason}")]
    InvalidAmount {
        /// Why the value was rejected.
        reason: String,
    },

    /// The submitted team identity does not exist in the store.
    #[error("team {team_id} not found")]
    NotFound {
        /// The identity that failed to resolve.
        team_id: TeamId,
    },
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { team_id } => Self::NotFound { team_id },
        }
    }
}

/// A snapshot could not be handed to one subscriber's outbound queue.
///
/// Logged and treated as an implicit disconnect for that subscriber;
/// never propagated to the mutation path or to other subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The subscriber's bounded queue is full (slow consumer).
    #[error("outbound queue full")]
    QueueFull,

    /// The subscriber's receiving end is gone (transport closed).
    #[error("subscriber disconnected")]
    Disconnected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_gateway_not_found() {
        let err: GatewayError = StoreError::NotFound {
            team_id: TeamId::new(9),
        }
        .into();
        assert_eq!(
            err,
            GatewayError::NotFound {
                team_id: TeamId::new(9)
            }
        );
    }

    #[test]
    fn errors_render_the_offending_id() {
        let err = GatewayError::NotFound {
            team_id: TeamId::new(42),
        };
        assert_eq!(err.to_string(), "team 42 not found");
    }
}
