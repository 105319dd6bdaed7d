pub mod auth;
pub mod evaluations;
pub mod leads;
pub mod lessons;
pub mod payments;
pub mod reports;
pub mod sales;
pub mod settings;
pub mod students;
pub mod tariffs;
pub mod users;
