pub mod post;
pub mod profile;
pub mod user;

pub use post::{Comment, Like, Post};
pub use profile::{EducationEntry, ExperienceEntry, Profile, SocialLinks};
pub use user::User;
