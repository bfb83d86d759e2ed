pub mod backup;
pub mod cardio;
pub mod history;
pub mod init;
pub mod measurements;
pub mod misc;
pub mod plans;
pub mod profile;
pub mod progress;
pub mod settings;
pub mod tools;
pub mod workout;
