pub mod application;
pub mod company;
pub mod listing;
pub mod recipe;
pub mod recruiter;
pub mod seeker;
pub mod user;
