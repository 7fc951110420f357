pub mod application_dto;
pub mod auth_dto;
pub mod company_dto;
pub mod listing_dto;
pub mod pagination;
pub mod recipe_dto;
pub mod recruiter_dto;
pub mod seeker_dto;
