pub mod deepseek_service;
pub mod groq_service;
