mod color;
mod emotion;
mod submission;

pub use color::{Centroid, Rgb24};
pub use emotion::Emotion;
pub use submission::{EmotionColors, Questionnaire, Submission};
