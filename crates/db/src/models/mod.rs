pub mod plantseed;
pub mod token;
pub mod user;
