// API Constants
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";
pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

pub const OPENAI_DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEEPSEEK_DEFAULT_MODEL: &str = "deepseek-chat";

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a friendly, knowledgeable assistant. Answer questions clearly and concisely.";

pub const TEMPERATURE: f64 = 0.7;

// UI Constants
pub const STREAM_CURSOR: &str = "▌";
pub const LOG_FILE_BASENAME: &str = "colloquy";
