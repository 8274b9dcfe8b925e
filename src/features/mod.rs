pub mod health;
pub mod notices;
