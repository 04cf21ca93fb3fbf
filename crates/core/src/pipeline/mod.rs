//! Sales pipeline stage transitions.
//!
//! Leads, enquiries, and bookings each carry a small status machine, and
//! conversion between stages is only allowed from specific states.

pub mod error;
pub mod service;
pub mod types;

pub use error::PipelineError;
pub use service::PipelineService;
pub use types::{BookingStatus, EnquiryStatus, LeadStatus, PaymentStatus};
