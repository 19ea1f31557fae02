// HTTP handlers grouped by access level:
// - public: token acquisition and registration, no bearer token
// - protected: everything behind the JWT middleware, scoped to the authenticated user

pub mod protected;
pub mod public;
