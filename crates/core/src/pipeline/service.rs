//! Pipeline stage transition rules.

use super::error::PipelineError;
use super::types::{BookingStatus, EnquiryStatus, LeadStatus};

/// Pipeline service enforcing stage-transition rules.
pub struct PipelineService;

impl PipelineService {
    /// Validates a lead status change.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::InvalidLeadTransition` if the move is not allowed.
    pub fn transition_lead(from: LeadStatus, to: LeadStatus) -> Result<LeadStatus, PipelineError> {
        if from.can_transition_to(to) {
            Ok(to)
        } else {
            Err(PipelineError::InvalidLeadTransition { from, to })
        }
    }

    /// Validates a lead-to-enquiry conversion.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::LeadNotQualified` unless the lead is qualified.
    pub fn convert_lead(status: LeadStatus) -> Result<(), PipelineError> {
        if status == LeadStatus::Qualified {
            Ok(())
        } else {
            Err(PipelineError::LeadNotQualified(status))
        }
    }

    /// Validates an enquiry status change.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::InvalidEnquiryTransition` if the move is not allowed.
    pub fn transition_enquiry(
        from: EnquiryStatus,
        to: EnquiryStatus,
    ) -> Result<EnquiryStatus, PipelineError> {
        if from.can_transition_to(to) {
            Ok(to)
        } else {
            Err(PipelineError::InvalidEnquiryTransition { from, to })
        }
    }

    /// Validates an enquiry-to-booking conversion.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::EnquiryNotQuoted` unless a quote was issued.
    pub fn convert_enquiry(status: EnquiryStatus) -> Result<(), PipelineError> {
        if status == EnquiryStatus::Quoted {
            Ok(())
        } else {
            Err(PipelineError::EnquiryNotQuoted(status))
        }
    }

    /// Validates a booking status change.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::InvalidBookingTransition` if the move is not allowed.
    pub fn transition_booking(
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<BookingStatus, PipelineError> {
        if from.can_transition_to(to) {
            Ok(to)
        } else {
            Err(PipelineError::InvalidBookingTransition { from, to })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(LeadStatus::New, LeadStatus::Contacted, true)]
    #[case(LeadStatus::Contacted, LeadStatus::Qualified, true)]
    #[case(LeadStatus::New, LeadStatus::Lost, true)]
    #[case(LeadStatus::Qualified, LeadStatus::Lost, true)]
    #[case(LeadStatus::New, LeadStatus::Qualified, false)]
    #[case(LeadStatus::Lost, LeadStatus::Contacted, false)]
    #[case(LeadStatus::Qualified, LeadStatus::New, false)]
    fn test_lead_transitions(
        #[case] from: LeadStatus,
        #[case] to: LeadStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(PipelineService::transition_lead(from, to).is_ok(), allowed);
    }

    #[test]
    fn test_lead_conversion_requires_qualified() {
        assert!(PipelineService::convert_lead(LeadStatus::Qualified).is_ok());

        for status in [LeadStatus::New, LeadStatus::Contacted, LeadStatus::Lost] {
            assert_eq!(
                PipelineService::convert_lead(status),
                Err(PipelineError::LeadNotQualified(status))
            );
        }
    }

    #[rstest]
    #[case(EnquiryStatus::Open, EnquiryStatus::Quoted, true)]
    #[case(EnquiryStatus::Quoted, EnquiryStatus::Won, true)]
    #[case(EnquiryStatus::Open, EnquiryStatus::Lost, true)]
    #[case(EnquiryStatus::Open, EnquiryStatus::Won, false)]
    #[case(EnquiryStatus::Won, EnquiryStatus::Lost, false)]
    #[case(EnquiryStatus::Lost, EnquiryStatus::Open, false)]
    fn test_enquiry_transitions(
        #[case] from: EnquiryStatus,
        #[case] to: EnquiryStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(
            PipelineService::transition_enquiry(from, to).is_ok(),
            allowed
        );
    }

    #[test]
    fn test_enquiry_conversion_requires_quoted() {
        assert!(PipelineService::convert_enquiry(EnquiryStatus::Quoted).is_ok());
        assert_eq!(
            PipelineService::convert_enquiry(EnquiryStatus::Open),
            Err(PipelineError::EnquiryNotQuoted(EnquiryStatus::Open))
        );
    }

    #[rstest]
    #[case(BookingStatus::Confirmed, BookingStatus::Completed, true)]
    #[case(BookingStatus::Confirmed, BookingStatus::Cancelled, true)]
    #[case(BookingStatus::Completed, BookingStatus::Cancelled, false)]
    #[case(BookingStatus::Cancelled, BookingStatus::Confirmed, false)]
    fn test_booking_transitions(
        #[case] from: BookingStatus,
        #[case] to: BookingStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(
            PipelineService::transition_booking(from, to).is_ok(),
            allowed
        );
    }
}
