//! Well-known role name constants carried in the JWT `role` claim.

pub const ROLE_ADMIN: &str = "admin";
