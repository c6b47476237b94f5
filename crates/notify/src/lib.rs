//! BuildFlow Notify - SMS delivery with provider failover

pub mod phone;
pub mod sms;

pub use phone::DiallingConfig;
pub use sms::{SmsChain, SmsProvider};
