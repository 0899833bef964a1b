pub mod question_request;
pub mod questions_route;
