pub mod conversion_service;
pub mod settings_service;
