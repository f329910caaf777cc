//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the alert logic in [`crate::app`] and the
//! systems it talks to:
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌──────────┐           ┌─────────────┐              ┌───────────┐
//! │ Postgres │           │    Chart    │              │ Telegram  │
//! │ Adapter  │           │   Adapter   │              │  Adapter  │
//! └──────────┘           └─────────────┘              └───────────┘
//! ```

pub mod outbound;
