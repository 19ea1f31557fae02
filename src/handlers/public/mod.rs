pub mod auth; // POST /token - exchange email + password for a bearer token
pub mod users; // POST /users/ - register a new account
