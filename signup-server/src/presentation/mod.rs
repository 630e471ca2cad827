pub mod dto;
pub mod handlers;
pub mod html;
pub mod middleware;
