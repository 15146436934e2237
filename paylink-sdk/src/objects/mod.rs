pub mod payment;
pub mod report;

pub use payment::{Amount, AmountFormat, PaymentInfo, RemotePayment};
pub use report::ErrorReport;
