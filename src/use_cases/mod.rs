pub mod email_login;
pub mod email_signup;
pub mod session;
pub mod social_sign_in;

#[cfg(test)]
pub(crate) mod test_support;
