//! Account handlers: registration, login and profile.

mod login_user;
mod profile;
mod register_user;

pub use login_user::{LoginCommand, LoginHandler, LoginResult};
pub use profile::{
    GetProfileHandler, ProfileReader, UpdateProfileCommand, UpdateProfileHandler, UserProfile,
};
pub use register_user::{RegisterUserCommand, RegisterUserHandler};
