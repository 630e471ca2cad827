pub mod registration_service;
