// Typed REST surface, one module per resource.
//
// Every wrapper is a thin `impl ApiClient` block: build the path, log,
// delegate to the shared verb helpers on the client.

pub mod categories;
pub mod orders;
pub mod permissions;
pub mod products;
pub mod roles;
pub mod tags;
pub mod users;
