//! HTTP server module for the practitioner directory.
//!
//! An axum server exposing the directory as a REST API. Handlers stay thin:
//! they extract the request, call the service layer and map errors.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query/body extraction                                  │
//! │  - JSON response envelopes                                │
//! │  - CORS, compression, error mapping                       │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (db/services.rs)                           │
//! │  - normalize + execute, validate + insert                 │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - LocalRepository / PostgresRepository                   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Routes
//!
//! | method | path                  |
//! |--------|-----------------------|
//! | GET    | `/health`             |
//! | GET    | `/api/doctors`        |
//! | POST   | `/api/doctors`        |
//! | GET    | `/api/doctors/{slug}` |

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, AppError};
pub use router::create_router;
pub use state::AppState;
