pub mod entities;
pub mod errors;
pub mod ports;

// Re-export the domain boundary types and ports.
pub use entities::{
    AuthResult, Credentials, SignupForm, SignupProfile, SocialAssertion, SocialFlow,
    SocialIdentity,
};
pub use errors::AuthError;
pub use ports::{AuthBackend, IdentityProvider, SignInPrompt, TokenSource};
