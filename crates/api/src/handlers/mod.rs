pub mod health;
pub mod plantseed;
pub mod tokens;
pub mod users;
