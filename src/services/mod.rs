pub mod card_service;
pub mod history_service;
pub mod ping_service;
pub mod screen_service;
pub mod session_service;
