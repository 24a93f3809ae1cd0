//! Session gating for Herbwise.
//!
//! Three small pieces:
//!
//! - **`token`**: decodes a session token's payload and decides validity from
//!   its expiration instant. Validity is always recomputed from the raw token
//!   value, never cached, so it cannot go stale against the wall clock.
//! - **`context`**: the single source of truth for the current token and the
//!   identity claims decoded from it, with synchronous change notification
//!   for consumers that must re-evaluate gating when the token changes.
//! - **`guard`**: the pure routing decision — protected views bounce invalid
//!   sessions to login, and the login/register views bounce valid sessions to
//!   the dashboard.

mod context;
mod guard;
mod token;

pub use context::{SessionContext, SessionEvent, SubscriberId};
pub use guard::{RouteDecision, RouteKind};
pub use token::{SessionError, decode_claims, is_valid, is_valid_at};
