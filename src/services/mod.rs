pub mod application_service;
pub mod auth_service;
pub mod company_service;
pub mod listing_service;
pub mod recipe_service;
pub mod recruiter_service;
pub mod seeker_service;
