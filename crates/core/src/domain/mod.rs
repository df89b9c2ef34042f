pub mod card;
pub mod request;
