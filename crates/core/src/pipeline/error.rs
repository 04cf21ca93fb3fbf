//! Pipeline error types.

use thiserror::Error;

use super::types::{BookingStatus, EnquiryStatus, LeadStatus};

/// Errors that can occur during pipeline stage changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The lead status change is not allowed.
    #[error("cannot move lead from {from} to {to}")]
    InvalidLeadTransition {
        /// Current status.
        from: LeadStatus,
        /// Requested status.
        to: LeadStatus,
    },

    /// The enquiry status change is not allowed.
    #[error("cannot move enquiry from {from} to {to}")]
    InvalidEnquiryTransition {
        /// Current status.
        from: EnquiryStatus,
        /// Requested status.
        to: EnquiryStatus,
    },

    /// The booking status change is not allowed.
    #[error("cannot move booking from {from} to {to}")]
    InvalidBookingTransition {
        /// Current status.
        from: BookingStatus,
        /// Requested status.
        to: BookingStatus,
    },

    /// Leads convert to enquiries only once qualified.
    #[error("lead must be qualified to convert, was {0}")]
    LeadNotQualified(LeadStatus),

    /// Enquiries convert to bookings only once quoted.
    #[error("enquiry must be quoted to convert, was {0}")]
    EnquiryNotQuoted(EnquiryStatus),
}
