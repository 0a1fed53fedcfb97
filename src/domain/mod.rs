pub mod card;
pub mod fees;
pub mod partner;
pub mod payment;
pub mod ports;
