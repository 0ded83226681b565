pub mod generation;
pub mod post;
pub mod theme;

pub use generation::{GenerationRequest, Platform, Tone};
pub use post::GeneratedPost;
pub use theme::Theme;
