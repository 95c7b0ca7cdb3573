pub mod youtube_service;
